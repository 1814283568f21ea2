//! An interbank cash flow netting engine.
//!
//! Tracks bilateral money obligations between registered banks and computes
//! a minimal settlement plan: the fewest transfers that pay off every net
//! debt. Obligations are appended to a [`Ledger`], folded into a
//! [`BalanceSheet`] of running net positions, and settled by a greedy
//! largest-debtor/largest-creditor matching pass over a [`PrioritySelector`].
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use settlement_engine::SettlementEngine;
//!
//! let mut engine = SettlementEngine::new();
//! engine.register_bank("alpha", ["wire"]).unwrap();
//! engine.register_bank("beta", ["wire"]).unwrap();
//! engine.register_bank("gamma", ["card"]).unwrap();
//!
//! engine.record_transaction("alpha", "beta", 100, Utc::now()).unwrap();
//! engine.record_transaction("alpha", "gamma", 200, Utc::now()).unwrap();
//!
//! let plan = engine.minimize_cash_flow().unwrap();
//! assert_eq!(plan.len(), 2);
//! assert_eq!(engine.get_balance("alpha").unwrap(), 0);
//! ```

mod engine;

pub use engine::{
    minimize, BalanceEntry, BalanceSheet, BalanceSnapshot, Bank, ConsistencyError,
    DuplicateEntityError, Error, IndexError, Ledger, PrioritySelector, Settlement,
    SettlementEngine, TransactionRecord, UnknownEntityError, ValidationError,
};
