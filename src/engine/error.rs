/// Top-level error type for the settlement engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    UnknownEntity(#[from] UnknownEntityError),
    #[error(transparent)]
    DuplicateEntity(#[from] DuplicateEntityError),
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error(transparent)]
    Consistency(#[from] ConsistencyError),
}

/// Malformed transaction input, rejected before any state changes.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("transaction amount must be positive, got {amount}")]
    NonPositiveAmount { amount: i64 },

    #[error("bank {name} cannot transact with itself")]
    SelfTransaction { name: String },
}

/// A referenced bank has not been registered.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown bank: {name}")]
pub struct UnknownEntityError {
    pub name: String,
}

/// A bank with this name is already registered.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("bank {name} is already registered")]
pub struct DuplicateEntityError {
    pub name: String,
}

/// Ledger index out of range.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("transaction index {index} is out of range ({len} recorded)")]
pub struct IndexError {
    pub index: usize,
    pub len: usize,
}

/// The balance sheet no longer sums to zero.
///
/// Surfaced when a settlement run drains one side of the selector while the
/// other still holds unmatched balances. This indicates a prior bookkeeping
/// bug, not bad user input.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("net balances sum to {residual}, expected 0; settlement aborted")]
pub struct ConsistencyError {
    /// Signed sum of the unmatched balances.
    pub residual: i64,
}
