use crate::core::member::MemberId;
use crate::core::money::Money;
use crate::engine::balance::MemberBalance;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Balances within this many minor units of zero count as settled.
///
/// The dead zone absorbs the up-to-`n-1`-unit residue the equal-split
/// rounding leaves behind, so a group can actually reach "all settled up"
/// instead of chasing a single stray cent forever.
pub const SETTLEMENT_THRESHOLD: Money = Money::new(1);

/// A suggested transfer: if `from` pays `to` this amount, both parties move
/// toward a zero balance.
///
/// Purely advisory. Nothing is executed; the caller decides whether to record
/// the transfer as an actual [`Payment`](crate::core::payment::Payment).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementSuggestion {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: Money,
}

impl fmt::Display for SettlementSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pays {} {}", self.from, self.to, self.amount)
    }
}

/// The settlement suggestion engine.
///
/// Greedy pairing of debtors against creditors, both taken in balance-list
/// order. This intentionally does not sort by magnitude and therefore does
/// not minimize the number of transfers; it keeps the output stable and
/// predictable for a given membership ordering.
pub struct SettlementSuggester;

impl SettlementSuggester {
    /// Produce transfers that, if carried out, bring every balance within
    /// [`SETTLEMENT_THRESHOLD`] of zero.
    ///
    /// # Algorithm
    ///
    /// 1. Split balances into debtors (`net < -threshold`) and creditors
    ///    (`net > threshold`), preserving input order.
    /// 2. Repeatedly match the first remaining debtor with the first
    ///    remaining creditor for `min` of their outstanding amounts, dropping
    ///    a party once its remainder falls inside the dead zone.
    ///
    /// Every iteration retires at least one party, so the loop runs at most
    /// `debtors + creditors - 1` times. Already-settled input yields an empty
    /// list.
    pub fn suggest_settlements(balances: &[MemberBalance]) -> Vec<SettlementSuggestion> {
        let mut debtors: Vec<(&MemberId, Money)> = balances
            .iter()
            .filter(|b| b.net < -SETTLEMENT_THRESHOLD)
            .map(|b| (&b.member_id, -b.net))
            .collect();
        let mut creditors: Vec<(&MemberId, Money)> = balances
            .iter()
            .filter(|b| b.net > SETTLEMENT_THRESHOLD)
            .map(|b| (&b.member_id, b.net))
            .collect();

        debug!(
            "suggesting settlements: {} debtors, {} creditors",
            debtors.len(),
            creditors.len()
        );

        let mut suggestions = Vec::new();
        let mut d = 0;
        let mut c = 0;

        while d < debtors.len() && c < creditors.len() {
            let transfer = debtors[d].1.min(creditors[c].1);

            suggestions.push(SettlementSuggestion {
                from: debtors[d].0.clone(),
                to: creditors[c].0.clone(),
                amount: transfer,
            });

            debtors[d].1 -= transfer;
            creditors[c].1 -= transfer;

            if debtors[d].1 <= SETTLEMENT_THRESHOLD {
                d += 1;
            }
            if creditors[c].1 <= SETTLEMENT_THRESHOLD {
                c += 1;
            }
        }

        suggestions
    }
}
