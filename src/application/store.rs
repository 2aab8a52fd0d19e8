use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::domain::{DraftEntry, Record};
use crate::storage::Repository;

use super::StoreError;

/// Outcome of a load operation. A missing data file is the normal first-run
/// state, distinct from a read or decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file existed; the ledger was replaced with this many records.
    Loaded(usize),
    /// No data file on disk; the in-memory ledger was left untouched.
    NoDataFile,
}

/// The ledger store: the ordered in-memory sequence of records plus the
/// repository holding its persisted form. `load`, `save` and `add_entry` are
/// its only mutators; the presentation layer renders `records` and owns the
/// draft being edited.
pub struct LedgerStore {
    repository: Repository,
    records: Vec<Record>,
}

impl LedgerStore {
    /// Create a store over the given repository. The ledger starts empty.
    pub fn new(repository: Repository) -> Self {
        Self {
            repository,
            records: Vec::new(),
        }
    }

    /// Convenience constructor over a data-file path.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(Repository::new(path))
    }

    pub fn path(&self) -> &Path {
        self.repository.path()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replace the ledger with the persisted sequence. Missing file: the
    /// ledger is left as-is and `NoDataFile` is returned. Read or decode
    /// failures are logged and propagated; the ledger is unchanged. Never
    /// touches the persisted file.
    pub async fn load(&mut self) -> Result<LoadOutcome, StoreError> {
        match self.repository.load().await {
            Ok(Some(records)) => {
                let count = records.len();
                self.records = records;
                Ok(LoadOutcome::Loaded(count))
            }
            Ok(None) => {
                debug!("No data file at {}", self.repository.path().display());
                Ok(LoadOutcome::NoDataFile)
            }
            Err(err) => {
                error!("Failed to load ledger: {err:#}");
                Err(err.into())
            }
        }
    }

    /// Write the current ledger to the data file, replacing any previous
    /// content in full. Returns the number of rows written.
    pub async fn save(&self) -> Result<usize, StoreError> {
        match self.repository.save(&self.records).await {
            Ok(count) => Ok(count),
            Err(err) => {
                error!("Failed to save ledger: {err:#}");
                Err(err.into())
            }
        }
    }

    /// Append the draft as a new record at the end of the ledger. Fails
    /// without mutating anything when a required field is empty. Appends
    /// blindly otherwise - no dedup, no sorting - and does not persist; an
    /// explicit `save` is required afterward.
    pub fn add_entry(&mut self, draft: &DraftEntry) -> Result<Record, StoreError> {
        let record = draft.to_record()?;
        self.records.push(record.clone());
        Ok(record)
    }
}
