use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::LedgerStore;
use crate::domain::Record;
use crate::storage::workbook::{BANK_BALANCE_COLUMN, CLEARED_COLUMN, DATE_COLUMN};

/// Ledger snapshot for full export/import
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub records: Vec<Record>,
}

/// Exporter for converting the ledger to interchange formats
pub struct Exporter<'a> {
    store: &'a LedgerStore,
}

impl<'a> Exporter<'a> {
    pub fn new(store: &'a LedgerStore) -> Self {
        Self { store }
    }

    /// Export the ledger to CSV format, one row per record.
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(&[DATE_COLUMN, BANK_BALANCE_COLUMN, CLEARED_COLUMN])?;

        let mut count = 0;
        for record in self.store.records() {
            csv_writer.write_record(&[
                record.date.as_str(),
                record.bank_balance.as_str(),
                record.cleared.as_deref().unwrap_or_default(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the full ledger as a JSON snapshot
    pub fn export_json<W: Write>(&self, mut writer: W) -> Result<LedgerSnapshot> {
        let snapshot = LedgerSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            records: self.store.records().to_vec(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}
