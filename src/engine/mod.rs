//! Settlement engine module.
//!
//! This module contains the core netting logic including:
//! - `SettlementEngine` - The facade tying ledger and balances together
//! - `Ledger` - Append-only transaction history
//! - `BalanceSheet` - Per-bank running net positions
//! - `PrioritySelector` - Two-sided, magnitude-ordered bank selection
//! - `minimize` / `Settlement` - The minimal cash flow algorithm
//! - `Error` types - Validation, lookup and consistency errors

mod balance;
mod bank;
mod error;
mod ledger;
mod netting;
mod selector;
mod settlement_engine;
mod transaction;

pub use balance::{BalanceEntry, BalanceSheet, BalanceSnapshot};
pub use bank::Bank;
pub use error::{
    ConsistencyError, DuplicateEntityError, Error, IndexError, UnknownEntityError,
    ValidationError,
};
pub use ledger::Ledger;
pub use netting::{minimize, Settlement};
pub use selector::PrioritySelector;
pub use settlement_engine::SettlementEngine;
pub use transaction::TransactionRecord;
