use std::fmt;

use super::Record;

/// A partially filled entry, mirroring the text inputs of the entry form.
/// An empty string means the field has not been filled in yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftEntry {
    pub date: String,
    pub bank_balance: String,
    pub cleared: String,
}

impl DraftEntry {
    pub fn new(
        date: impl Into<String>,
        bank_balance: impl Into<String>,
        cleared: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            bank_balance: bank_balance.into(),
            cleared: cleared.into(),
        }
    }

    /// Both `date` and `bank_balance` must be filled in before the draft can
    /// be submitted. `cleared` is never required.
    pub fn is_complete(&self) -> bool {
        !self.date.is_empty() && !self.bank_balance.is_empty()
    }

    /// Reset all fields, as the form does after a successful add.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Convert the draft into a ledger record. An empty `cleared` field
    /// becomes an absent value rather than an empty cell.
    pub fn to_record(&self) -> Result<Record, DraftError> {
        if self.date.is_empty() {
            return Err(DraftError::MissingField("date"));
        }
        if self.bank_balance.is_empty() {
            return Err(DraftError::MissingField("bank_balance"));
        }

        let mut record = Record::new(self.date.clone(), self.bank_balance.clone());
        if !self.cleared.is_empty() {
            record = record.with_cleared(self.cleared.clone());
        }
        Ok(record)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    MissingField(&'static str),
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftError::MissingField(field) => {
                write!(f, "required field is empty: {}", field)
            }
        }
    }
}

impl std::error::Error for DraftError {}
