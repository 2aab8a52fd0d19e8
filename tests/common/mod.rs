// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use findash::application::LedgerStore;
use findash::domain::DraftEntry;
use tempfile::TempDir;

/// Helper to create a store over a data file in a temporary directory
pub fn test_store() -> Result<(LedgerStore, TempDir)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("FinancialDashboard.xlsx");
    Ok((LedgerStore::open(path), temp_dir))
}

/// Append a small set of entries covering the optional cleared field
pub fn add_sample_entries(store: &mut LedgerStore) -> Result<()> {
    store.add_entry(&DraftEntry::new("2024-01-01", "500", "120.50"))?;
    store.add_entry(&DraftEntry::new("2024-01-02", "480.25", ""))?;
    store.add_entry(&DraftEntry::new("2024-01-03", "475", "true"))?;
    Ok(())
}
