use serde::{Deserialize, Serialize};

/// One ledger entry. Values are kept exactly as entered - amounts are
/// numeric-as-string and the date is not format-validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Entry date, expected as YYYY-MM-DD
    pub date: String,
    /// Bank balance on that date
    pub bank_balance: String,
    /// Cleared amount, absent when the field was left blank
    pub cleared: Option<String>,
}

impl Record {
    pub fn new(date: impl Into<String>, bank_balance: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            bank_balance: bank_balance.into(),
            cleared: None,
        }
    }

    pub fn with_cleared(mut self, cleared: impl Into<String>) -> Self {
        self.cleared = Some(cleared.into());
        self
    }
}
