use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use super::workbook;
use crate::domain::Record;

/// Repository for the persisted spreadsheet file.
///
/// All access to the file goes through a single mutex, so overlapping load
/// and save calls on the same repository serialize instead of racing on the
/// path.
pub struct Repository {
    path: PathBuf,
    file_lock: Mutex<()>,
}

impl Repository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the data file exists on disk.
    pub async fn exists(&self) -> bool {
        fs::try_exists(&self.path).await.unwrap_or(false)
    }

    /// Read and decode the data file. Returns `None` when the file does not
    /// exist - the normal first-run state, not an error.
    pub async fn load(&self) -> Result<Option<Vec<Record>>> {
        let _guard = self.file_lock.lock().await;

        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(None);
        }

        let bytes = fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read data file {}", self.path.display()))?;
        let records = workbook::decode(&bytes)
            .with_context(|| format!("Failed to decode workbook {}", self.path.display()))?;

        debug!(
            "Loaded {} record(s) from {}",
            records.len(),
            self.path.display()
        );
        Ok(Some(records))
    }

    /// Encode the records and replace the data file in full. Bytes go to a
    /// temporary sibling first and are renamed into place, so a crash
    /// mid-write leaves the previous file intact.
    pub async fn save(&self, records: &[Record]) -> Result<usize> {
        let _guard = self.file_lock.lock().await;

        let bytes = workbook::encode(records)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }
        }

        let tmp = self.path.with_extension("xlsx.tmp");
        fs::write(&tmp, &bytes)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to move {} into place", tmp.display()))?;

        debug!(
            "Saved {} record(s) to {}",
            records.len(),
            self.path.display()
        );
        Ok(records.len())
    }
}
