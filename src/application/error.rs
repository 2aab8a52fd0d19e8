use thiserror::Error;

use crate::domain::DraftError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid entry: {0}")]
    InvalidDraft(#[from] DraftError),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
