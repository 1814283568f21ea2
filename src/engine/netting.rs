//! Minimal cash flow netting.
//!
//! Greedy extreme-pair matching: repeatedly settle the largest debtor
//! against the largest creditor. Every emitted transfer zeroes at least one
//! side of the pair, so a run over D debtors and C creditors emits at most
//! D + C - 1 transfers, which is minimal for pairwise netting of signed
//! balances.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::balance::BalanceSnapshot;
use super::error::ConsistencyError;
use super::selector::PrioritySelector;

/// A single transfer in a settlement plan: `from` pays `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    from: String,
    to: String,
    amount: i64,
}

impl Settlement {
    /// Returns the paying bank
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Returns the receiving bank
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Returns the transfer amount (always positive)
    pub fn amount(&self) -> i64 {
        self.amount
    }
}

impl std::fmt::Display for Settlement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} pays {} {}", self.from, self.to, self.amount)
    }
}

/// Compute the minimum-transfer payoff plan for a balance snapshot.
///
/// # Algorithm
///
/// 1. Partition the snapshot into debtors (net < 0) and creditors (net > 0),
///    skipping zero balances, and push each side into a magnitude-ordered
///    heap.
/// 2. While both heaps are non-empty, pop the extreme debtor `D` and the
///    extreme creditor `C`, emit a transfer of `min(|D|, C)` from `D` to
///    `C`, and re-push whichever side keeps a nonzero remainder.
/// 3. Both heaps drain in the same step on a consistent snapshot, since the
///    balances form a closed system.
///
/// The emitted order is the execution order of payoffs. Ties on magnitude
/// resolve FIFO in snapshot order, so the plan is deterministic.
///
/// # Errors
///
/// [`ConsistencyError`] if the snapshot's balances do not sum to zero, i.e.
/// one heap drains while the other still holds unmatched balances. No
/// partial plan is returned.
pub fn minimize(snapshot: &BalanceSnapshot) -> Result<Vec<Settlement>, ConsistencyError> {
    let mut selector = PrioritySelector::new();
    for entry in snapshot.iter() {
        match entry.net().cmp(&0) {
            Ordering::Less => selector.push_debtor(entry.bank(), entry.net()),
            Ordering::Greater => selector.push_creditor(entry.bank(), entry.net()),
            Ordering::Equal => {}
        }
    }

    let participants = selector.debtor_count() + selector.creditor_count();
    log::trace!(
        "[netting] {} debtors, {} creditors",
        selector.debtor_count(),
        selector.creditor_count()
    );

    let mut plan = Vec::new();
    loop {
        let ((debtor, owed), (creditor, due)) =
            match (selector.pop_max_debtor(), selector.pop_max_creditor()) {
                (Some(debtor), Some(creditor)) => (debtor, creditor),
                (None, None) => break,
                (Some((_, balance)), None) => {
                    let mut residual = balance;
                    while let Some((_, rest)) = selector.pop_max_debtor() {
                        residual += rest;
                    }
                    log::warn!("[netting] unmatched debt {residual}, aborting");
                    return Err(ConsistencyError { residual });
                }
                (None, Some((_, balance))) => {
                    let mut residual = balance;
                    while let Some((_, rest)) = selector.pop_max_creditor() {
                        residual += rest;
                    }
                    log::warn!("[netting] unmatched credit {residual}, aborting");
                    return Err(ConsistencyError { residual });
                }
            };

        let transfer = due.min(-owed);
        log::trace!("[netting] {debtor} pays {creditor} {transfer}");
        plan.push(Settlement {
            from: debtor.clone(),
            to: creditor.clone(),
            amount: transfer,
        });

        // At least one side reaches zero and drops out; the other re-enters
        // with its remainder.
        let still_owed = owed + transfer;
        let still_due = due - transfer;
        if still_owed < 0 {
            selector.push_debtor(debtor, still_owed);
        }
        if still_due > 0 {
            selector.push_creditor(creditor, still_due);
        }
    }

    debug_assert!(
        participants == 0 || plan.len() < participants,
        "plan must stay under the participant count"
    );
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(entries: &[(&str, i64)]) -> BalanceSnapshot {
        entries.iter().map(|&(bank, net)| (bank, net)).collect()
    }

    fn as_tuples(plan: &[Settlement]) -> Vec<(&str, &str, i64)> {
        plan.iter()
            .map(|s| (s.from(), s.to(), s.amount()))
            .collect()
    }

    #[test]
    fn test_single_pair_nets_in_one_transfer() {
        let plan = minimize(&snapshot(&[("alpha", -100), ("beta", 100)])).unwrap();
        assert_eq!(as_tuples(&plan), vec![("alpha", "beta", 100)]);
    }

    #[test]
    fn test_one_debtor_two_creditors() {
        let plan =
            minimize(&snapshot(&[("alpha", -300), ("beta", 100), ("gamma", 200)])).unwrap();
        // Largest creditor first, then the remainder.
        assert_eq!(
            as_tuples(&plan),
            vec![("alpha", "gamma", 200), ("alpha", "beta", 100)]
        );
    }

    #[test]
    fn test_zero_balances_are_excluded() {
        let plan = minimize(&snapshot(&[
            ("idle", 0),
            ("alpha", -50),
            ("beta", 50),
            ("dormant", 0),
        ]))
        .unwrap();
        assert_eq!(as_tuples(&plan), vec![("alpha", "beta", 50)]);
    }

    #[test]
    fn test_empty_snapshot_yields_empty_plan() {
        let plan = minimize(&snapshot(&[])).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_all_zero_snapshot_yields_empty_plan() {
        let plan = minimize(&snapshot(&[("alpha", 0), ("beta", 0)])).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_transfer_count_is_bounded_by_participants() {
        let plan = minimize(&snapshot(&[
            ("a", -500),
            ("b", -200),
            ("c", -300),
            ("d", 400),
            ("e", 350),
            ("f", 250),
        ]))
        .unwrap();
        // 6 nonzero banks: at most 5 transfers.
        assert!(plan.len() <= 5);

        // The plan pays off every balance exactly.
        let mut nets = std::collections::HashMap::from([
            ("a", -500i64),
            ("b", -200),
            ("c", -300),
            ("d", 400),
            ("e", 350),
            ("f", 250),
        ]);
        for settlement in &plan {
            *nets.get_mut(settlement.from()).unwrap() += settlement.amount();
            *nets.get_mut(settlement.to()).unwrap() -= settlement.amount();
        }
        assert!(nets.values().all(|&net| net == 0));
    }

    #[test]
    fn test_equal_magnitudes_settle_in_snapshot_order() {
        let plan = minimize(&snapshot(&[
            ("first", -100),
            ("second", -100),
            ("sink", 200),
        ]))
        .unwrap();
        assert_eq!(
            as_tuples(&plan),
            vec![("first", "sink", 100), ("second", "sink", 100)]
        );
    }

    #[test]
    fn test_unbalanced_snapshot_is_a_consistency_error() {
        let err = minimize(&snapshot(&[("alpha", -300), ("beta", 100)])).unwrap_err();
        assert_eq!(err, ConsistencyError { residual: -200 });

        let err = minimize(&snapshot(&[("alpha", 75)])).unwrap_err();
        assert_eq!(err, ConsistencyError { residual: 75 });
    }

    #[test]
    fn test_transfer_never_exceeds_either_side() {
        let plan = minimize(&snapshot(&[
            ("a", -120),
            ("b", 70),
            ("c", 30),
            ("d", 20),
        ]))
        .unwrap();
        for settlement in &plan {
            assert!(settlement.amount() > 0);
        }
        assert_eq!(
            as_tuples(&plan),
            vec![("a", "b", 70), ("a", "c", 30), ("a", "d", 20)]
        );
    }
}
