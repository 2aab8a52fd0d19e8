use anyhow::Result;
use std::io::Read;

use crate::application::{LedgerStore, StoreError};
use crate::domain::{DraftEntry, DraftError};

use super::LedgerSnapshot;

/// Result of an import operation
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<ImportError>,
}

/// Error that occurred during import
#[derive(Debug, Clone)]
pub struct ImportError {
    pub line: usize,
    pub field: Option<String>,
    pub error: String,
}

/// Options for import operations
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub dry_run: bool,
}

/// Importer appending entries to the ledger store
pub struct Importer<'a> {
    store: &'a mut LedgerStore,
}

impl<'a> Importer<'a> {
    pub fn new(store: &'a mut LedgerStore) -> Self {
        Self { store }
    }

    /// Import records from CSV. Rows go through the same required-field
    /// validation as the entry form; failing rows are reported by line and
    /// skipped rather than aborting the whole import. Nothing is persisted -
    /// the caller saves explicitly.
    pub fn import_csv<R: Read>(
        &mut self,
        reader: R,
        options: ImportOptions,
    ) -> Result<ImportResult> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut imported = 0;
        let mut skipped = 0;
        let mut errors = Vec::new();

        for (line_num, result) in csv_reader.records().enumerate() {
            let line = line_num + 2; // +2 for header and 0-indexing

            let row = match result {
                Ok(r) => r,
                Err(e) => {
                    errors.push(ImportError {
                        line,
                        field: None,
                        error: format!("CSV parse error: {}", e),
                    });
                    continue;
                }
            };

            let draft = DraftEntry::new(
                row.get(0).unwrap_or(""),
                row.get(1).unwrap_or(""),
                row.get(2).unwrap_or(""),
            );

            match self.append(&draft, &options) {
                Ok(()) => imported += 1,
                Err(e) => {
                    skipped += 1;
                    errors.push(ImportError {
                        line,
                        field: draft_field(&e),
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(ImportResult {
            imported,
            skipped,
            errors,
        })
    }

    /// Import records from a JSON snapshot, under the same validation as CSV
    /// import.
    pub fn import_json<R: Read>(
        &mut self,
        reader: R,
        options: ImportOptions,
    ) -> Result<ImportResult> {
        let snapshot: LedgerSnapshot = serde_json::from_reader(reader)?;

        let mut imported = 0;
        let mut skipped = 0;
        let mut errors = Vec::new();

        for (idx, record) in snapshot.records.iter().enumerate() {
            let line = idx + 1;
            let draft = DraftEntry::new(
                record.date.clone(),
                record.bank_balance.clone(),
                record.cleared.clone().unwrap_or_default(),
            );

            match self.append(&draft, &options) {
                Ok(()) => imported += 1,
                Err(e) => {
                    skipped += 1;
                    errors.push(ImportError {
                        line,
                        field: draft_field(&e),
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(ImportResult {
            imported,
            skipped,
            errors,
        })
    }

    fn append(&mut self, draft: &DraftEntry, options: &ImportOptions) -> Result<(), StoreError> {
        if options.dry_run {
            draft.to_record()?;
            return Ok(());
        }
        self.store.add_entry(draft)?;
        Ok(())
    }
}

fn draft_field(err: &StoreError) -> Option<String> {
    match err {
        StoreError::InvalidDraft(DraftError::MissingField(field)) => Some((*field).to_string()),
        _ => None,
    }
}
