use chrono::{DateTime, Utc};

use super::balance::{BalanceSheet, BalanceSnapshot};
use super::bank::Bank;
use super::error::{Error, IndexError};
use super::ledger::Ledger;
use super::netting::{self, Settlement};
use super::transaction::TransactionRecord;

/// The core settlement engine.
///
/// Owns the bank registry, the append-only transaction ledger, and the
/// balance sheet derived from it, and keeps ledger and balances consistent
/// through every operation. Settlement runs work on an owned snapshot, so
/// the books can never shift under a running computation.
#[derive(Debug, Default)]
pub struct SettlementEngine {
    /// Per-bank net positions, updated with every ledger change
    balances: BalanceSheet,
    /// Append-only transaction history
    ledger: Ledger,
}

impl SettlementEngine {
    /// Create a new `SettlementEngine` with no banks and an empty ledger
    pub fn new() -> Self {
        log::trace!("SettlementEngine initialized");
        Self {
            balances: BalanceSheet::new(),
            ledger: Ledger::new(),
        }
    }

    /// Register a new bank with its accepted payment types.
    ///
    /// Fails with [`DuplicateEntityError`](super::DuplicateEntityError) if
    /// the name is taken. Banks are never deleted once registered.
    pub fn register_bank<I, S>(&mut self, name: &str, types: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.balances
            .register(name, types.into_iter().map(Into::into).collect())?;
        log::debug!("[register] bank {name} ({} total)", self.balances.len());
        Ok(())
    }

    /// Record an obligation: `from` owes `to` `amount`.
    ///
    /// All-or-nothing: shape validation and registry checks both happen
    /// before the ledger or any balance changes.
    pub fn record_transaction(
        &mut self,
        from: &str,
        to: &str,
        amount: i64,
        timestamp: DateTime<Utc>,
    ) -> Result<(), Error> {
        let record = TransactionRecord::new(from, to, amount, timestamp)?;
        self.balances.apply(from, to, amount)?;
        self.ledger.record(record);
        log::trace!("[record] {from} -> {to} amount={amount}");
        Ok(())
    }

    /// Remove the ledger record at `index` and reverse its balance effect.
    ///
    /// Returns the removed record. After clearing, the balance sheet reads
    /// as if the transaction had never been recorded.
    pub fn clear_transaction(&mut self, index: usize) -> Result<TransactionRecord, Error> {
        let record = self.ledger.get(index).ok_or_else(|| IndexError {
            index,
            len: self.ledger.len(),
        })?;
        self.balances
            .reverse(record.from(), record.to(), record.amount())?;
        let removed = self.ledger.remove(index)?;
        log::debug!("[clear] index={index}: {removed}");
        Ok(removed)
    }

    /// Current signed net balance of a bank.
    pub fn get_balance(&self, name: &str) -> Result<i64, Error> {
        Ok(self.balances.get(name)?.net_amount())
    }

    /// Look up a registered bank's full record.
    pub fn bank(&self, name: &str) -> Result<&Bank, Error> {
        Ok(self.balances.get(name)?)
    }

    /// Iterate all registered banks in registration order.
    pub fn banks(&self) -> impl Iterator<Item = &Bank> {
        self.balances.iter()
    }

    /// Owned copy of every bank's current net position.
    pub fn snapshot(&self) -> BalanceSnapshot {
        self.balances.snapshot()
    }

    /// Read-only view of the transaction ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Lazily iterate ledger records matching `predicate`, in insertion
    /// order.
    pub fn history<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a TransactionRecord>
    where
        P: FnMut(&TransactionRecord) -> bool + 'a,
    {
        self.ledger.filter(predicate)
    }

    /// Compute the minimal payoff plan without touching the books.
    ///
    /// The plan is what [`SettlementEngine::minimize_cash_flow`] would
    /// execute; useful for previewing.
    pub fn settlement_plan(&self) -> Result<Vec<Settlement>, Error> {
        Ok(netting::minimize(&self.balances.snapshot())?)
    }

    /// Compute the minimal payoff plan and settle the books.
    ///
    /// Every emitted transfer is executed against the balance sheet, so on
    /// success every bank's net amount is zero. The ledger keeps its
    /// history; only net positions are discharged.
    pub fn minimize_cash_flow(&mut self) -> Result<Vec<Settlement>, Error> {
        let plan = netting::minimize(&self.balances.snapshot())?;

        for settlement in &plan {
            // Paying off an obligation is the exact inverse of recording
            // one: the debtor's net rises, the creditor's falls.
            self.balances
                .reverse(settlement.from(), settlement.to(), settlement.amount())?;
        }

        debug_assert!(
            self.balances.iter().all(|bank| bank.net_amount() == 0),
            "settlement must zero every net position"
        );
        log::info!(
            "[settle] {} transfers across {} banks",
            plan.len(),
            self.balances.len()
        );
        Ok(plan)
    }

    /// The bank owing the most and the bank owed the most, skipping zero
    /// balances. Earliest-registered wins ties.
    pub fn top_debtor_creditor(&self) -> (Option<&Bank>, Option<&Bank>) {
        let mut debtor: Option<&Bank> = None;
        let mut creditor: Option<&Bank> = None;
        for bank in self.balances.iter() {
            if bank.is_debtor() && debtor.is_none_or(|d| bank.net_amount() < d.net_amount()) {
                debtor = Some(bank);
            }
            if bank.is_creditor() && creditor.is_none_or(|c| bank.net_amount() > c.net_amount()) {
                creditor = Some(bank);
            }
        }
        (debtor, creditor)
    }

    /// Returns the number of registered banks
    pub fn bank_count(&self) -> usize {
        self.balances.len()
    }

    /// Returns the number of records in the ledger
    pub fn transaction_count(&self) -> usize {
        self.ledger.len()
    }
}
