use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// A validated transfer obligation between two registered banks.
///
/// `from` owes `to` the given amount. Records are only constructed through
/// [`TransactionRecord::new`], so a record in the ledger is always
/// well-formed: a positive amount between two distinct banks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    from: String,
    to: String,
    amount: i64,
    timestamp: DateTime<Utc>,
}

impl TransactionRecord {
    /// Build a record, rejecting self-transfers and non-positive amounts.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        amount: i64,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let from = from.into();
        let to = to.into();

        if amount <= 0 {
            return Err(ValidationError::NonPositiveAmount { amount });
        }
        if from == to {
            return Err(ValidationError::SelfTransaction { name: from });
        }

        Ok(Self {
            from,
            to,
            amount,
            timestamp,
        })
    }

    /// Returns the owing bank
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Returns the owed bank
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Returns the transfer amount (always positive)
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Returns when the obligation was recorded
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns whether `name` is either side of the transfer
    pub fn involves(&self, name: &str) -> bool {
        self.from == name || self.to == name
    }
}

impl std::fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {}: {} on {}",
            self.from, self.to, self.amount, self.timestamp
        )
    }
}
