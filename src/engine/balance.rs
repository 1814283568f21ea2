use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::bank::Bank;
use super::error::{DuplicateEntityError, UnknownEntityError};

/// Per-bank running net positions, derived incrementally from the ledger.
///
/// Banks live in an owned arena in registration order, with a name index
/// into the arena slots. Registration order is also snapshot order, which is
/// what makes settlement plans deterministic for a given history.
#[derive(Debug, Default)]
pub struct BalanceSheet {
    banks: Vec<Bank>,
    index: HashMap<String, usize>,
}

impl BalanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new bank with a zero balance.
    pub(super) fn register(
        &mut self,
        name: &str,
        types: HashSet<String>,
    ) -> Result<(), DuplicateEntityError> {
        if self.index.contains_key(name) {
            return Err(DuplicateEntityError {
                name: name.to_owned(),
            });
        }
        self.index.insert(name.to_owned(), self.banks.len());
        self.banks.push(Bank::new(name.to_owned(), types));
        Ok(())
    }

    fn slot(&self, name: &str) -> Result<usize, UnknownEntityError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| UnknownEntityError {
                name: name.to_owned(),
            })
    }

    /// Look up a registered bank by name.
    pub fn get(&self, name: &str) -> Result<&Bank, UnknownEntityError> {
        Ok(&self.banks[self.slot(name)?])
    }

    /// Returns a bank's current signed net position
    pub fn net_amount(&self, name: &str) -> Result<i64, UnknownEntityError> {
        Ok(self.get(name)?.net_amount())
    }

    /// Apply a recorded obligation: `from` owes `to` `amount`.
    ///
    /// Both banks are resolved before either balance moves, so a failed
    /// lookup leaves the sheet untouched.
    pub(super) fn apply(
        &mut self,
        from: &str,
        to: &str,
        amount: i64,
    ) -> Result<(), UnknownEntityError> {
        let from_slot = self.slot(from)?;
        let to_slot = self.slot(to)?;
        self.banks[from_slot].debit(amount);
        self.banks[to_slot].credit(amount);
        debug_assert_eq!(self.total(), 0, "balance sheet must stay zero-sum");
        Ok(())
    }

    /// The exact inverse of [`BalanceSheet::apply`], used when a ledger
    /// entry is cleared or an obligation is paid off.
    pub(super) fn reverse(
        &mut self,
        from: &str,
        to: &str,
        amount: i64,
    ) -> Result<(), UnknownEntityError> {
        let from_slot = self.slot(from)?;
        let to_slot = self.slot(to)?;
        self.banks[from_slot].credit(amount);
        self.banks[to_slot].debit(amount);
        debug_assert_eq!(self.total(), 0, "balance sheet must stay zero-sum");
        Ok(())
    }

    /// Owned copy of every bank's current net position, in registration
    /// order.
    ///
    /// The snapshot shares no state with the live sheet, so a settlement
    /// computation never observes mutation made after the call.
    pub fn snapshot(&self) -> BalanceSnapshot {
        self.banks
            .iter()
            .map(|bank| (bank.name(), bank.net_amount()))
            .collect()
    }

    /// Iterate all banks in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Bank> {
        self.banks.iter()
    }

    /// Returns the number of registered banks
    pub fn len(&self) -> usize {
        self.banks.len()
    }

    /// Returns whether no banks are registered
    pub fn is_empty(&self) -> bool {
        self.banks.is_empty()
    }

    /// Signed sum over all net positions. Zero on a consistent sheet.
    pub fn total(&self) -> i64 {
        self.banks.iter().map(Bank::net_amount).sum()
    }
}

/// Immutable copy of every bank's net position at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSnapshot {
    entries: Vec<BalanceEntry>,
}

/// One bank's net position inside a [`BalanceSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceEntry {
    bank: String,
    net: i64,
}

impl BalanceEntry {
    /// Returns the bank name
    pub fn bank(&self) -> &str {
        &self.bank
    }

    /// Returns the signed net position
    pub fn net(&self) -> i64 {
        self.net
    }
}

impl BalanceSnapshot {
    /// Iterate entries in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, BalanceEntry> {
        self.entries.iter()
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Signed sum over all entries. Zero for a consistent snapshot.
    pub fn total(&self) -> i64 {
        self.entries.iter().map(BalanceEntry::net).sum()
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for BalanceSnapshot {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(bank, net)| BalanceEntry {
                    bank: bank.into(),
                    net,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet_with(names: &[&str]) -> BalanceSheet {
        let mut sheet = BalanceSheet::new();
        for name in names {
            sheet.register(name, HashSet::new()).unwrap();
        }
        sheet
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut sheet = sheet_with(&["alpha"]);
        let err = sheet.register("alpha", HashSet::new()).unwrap_err();
        assert_eq!(
            err,
            DuplicateEntityError {
                name: "alpha".to_owned()
            }
        );
        assert_eq!(sheet.len(), 1);
    }

    #[test]
    fn test_apply_moves_both_balances() {
        let mut sheet = sheet_with(&["alpha", "beta"]);
        sheet.apply("alpha", "beta", 50).unwrap();

        assert_eq!(sheet.net_amount("alpha").unwrap(), -50);
        assert_eq!(sheet.net_amount("beta").unwrap(), 50);
        assert_eq!(sheet.total(), 0);
    }

    #[test]
    fn test_reverse_undoes_apply() {
        let mut sheet = sheet_with(&["alpha", "beta"]);
        sheet.apply("alpha", "beta", 50).unwrap();
        sheet.reverse("alpha", "beta", 50).unwrap();

        assert_eq!(sheet.net_amount("alpha").unwrap(), 0);
        assert_eq!(sheet.net_amount("beta").unwrap(), 0);
    }

    #[test]
    fn test_apply_with_unknown_bank_changes_nothing() {
        let mut sheet = sheet_with(&["alpha"]);
        let err = sheet.apply("alpha", "ghost", 50).unwrap_err();
        assert_eq!(
            err,
            UnknownEntityError {
                name: "ghost".to_owned()
            }
        );
        assert_eq!(sheet.net_amount("alpha").unwrap(), 0);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut sheet = sheet_with(&["alpha", "beta"]);
        sheet.apply("alpha", "beta", 50).unwrap();

        let snapshot = sheet.snapshot();
        sheet.apply("alpha", "beta", 25).unwrap();

        // The snapshot still shows the state at capture time.
        assert_eq!(snapshot.iter().next().unwrap().net(), -50);
        assert_eq!(sheet.net_amount("alpha").unwrap(), -75);
    }

    #[test]
    fn test_snapshot_keeps_registration_order() {
        let sheet = sheet_with(&["gamma", "alpha", "beta"]);
        let snapshot = sheet.snapshot();
        let names: Vec<&str> = snapshot.iter().map(BalanceEntry::bank).collect();
        assert_eq!(names, vec!["gamma", "alpha", "beta"]);
    }
}
