use crate::core::expense::Expense;
use crate::core::group::GroupSnapshot;
use crate::core::member::{Member, MemberId};
use crate::core::money::{rounded_equal_share, Money};
use crate::core::payment::Payment;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors arising from balance computation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The caller must supply at least one accepted member (normally the
    /// group creator); the equal split is undefined for an empty group.
    #[error("cannot compute balances for a group with no accepted members")]
    EmptyGroup,
}

/// One member's computed position, broken down into its components.
///
/// `net` is the number that matters: positive means the group owes this
/// member money, negative means they owe the group, zero means settled.
/// The component fields exist so a caller can show *why* the net is what
/// it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberBalance {
    pub member_id: MemberId,
    pub display_name: String,
    /// Sum of expenses this member fronted for the group.
    pub total_paid: Money,
    /// This member's equal share of the group's total expenses.
    pub share_of_expenses: Money,
    /// Sum of settlement payments this member made.
    pub payments_made: Money,
    /// Sum of settlement payments this member received.
    pub payments_received: Money,
    /// `(total_paid - share) + (payments_made - payments_received)`.
    pub net: Money,
}

/// Result of a balance computation over one group snapshot.
///
/// Balances appear in the same order as the input membership. The sheet is
/// ephemeral: it is recomputed from the full history on every query and
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheet {
    balances: Vec<MemberBalance>,
    total_expenses: Money,
    share_per_member: Money,
}

impl BalanceSheet {
    /// Per-member balances, in input membership order.
    pub fn balances(&self) -> &[MemberBalance] {
        &self.balances
    }

    pub fn into_balances(self) -> Vec<MemberBalance> {
        self.balances
    }

    pub fn member_count(&self) -> usize {
        self.balances.len()
    }

    /// Group-wide expense total the shares were computed from.
    pub fn total_expenses(&self) -> Money {
        self.total_expenses
    }

    /// The equal share every member carries.
    pub fn share_per_member(&self) -> Money {
        self.share_per_member
    }

    pub fn balance_for(&self, id: &MemberId) -> Option<&MemberBalance> {
        self.balances.iter().find(|b| &b.member_id == id)
    }

    /// Sum of all net balances. Exactly zero when the expense total divides
    /// evenly; otherwise a rounding residue bounded by [`Self::is_zero_sum_within_residue`].
    pub fn net_sum(&self) -> Money {
        self.balances.iter().map(|b| b.net).sum()
    }

    /// Verify the bounded zero-sum invariant: the net balances of an
    /// `n`-member group sum to within `n - 1` minor units of zero.
    pub fn is_zero_sum_within_residue(&self) -> bool {
        let bound = self.member_count().saturating_sub(1) as i64;
        self.net_sum().minor_units().abs() <= bound
    }
}

impl std::fmt::Display for BalanceSheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Balance Sheet ===")?;
        writeln!(f, "Total Expenses:  {}", self.total_expenses)?;
        writeln!(f, "Share / Member:  {}", self.share_per_member)?;
        writeln!(f, "Members:         {}", self.member_count())?;
        for b in &self.balances {
            writeln!(
                f,
                "  {:<20} paid {:>8}  made {:>8}  received {:>8}  net {:>8}",
                b.display_name, b.total_paid, b.payments_made, b.payments_received, b.net
            )?;
        }
        Ok(())
    }
}

/// The balance computation engine.
///
/// A pure function over one snapshot: no caching, no incremental state,
/// safe to call concurrently from any number of requests.
pub struct BalanceCalculator;

impl BalanceCalculator {
    /// Compute every member's balance from the full expense and payment history.
    ///
    /// # Algorithm
    ///
    /// 1. `total_paid` = sum of expenses the member fronted.
    /// 2. Every member's `share_of_expenses` is the *same* value: the
    ///    group-wide total divided by the member count, rounded
    ///    half-away-from-zero. When the total does not divide evenly this
    ///    leaves a residue of at most `n - 1` minor units, absorbed by the
    ///    settlement dead zone.
    /// 3. `payments_made` / `payments_received` = sums of direct payments.
    /// 4. `net = (total_paid - share) + (payments_made - payments_received)`.
    ///    Handing money to another member settles debt, so it raises the
    ///    payer's net and lowers the receiver's; this is what makes executed
    ///    suggestions drive every balance to zero.
    ///
    /// Output order follows the input member order. Payment rows that slipped
    /// past write-time validation (self-payments, non-members) fold into the
    /// sums arithmetically; they are never repaired here.
    pub fn compute_balances(
        members: &[Member],
        expenses: &[Expense],
        payments: &[Payment],
    ) -> Result<BalanceSheet, EngineError> {
        if members.is_empty() {
            return Err(EngineError::EmptyGroup);
        }

        let mut paid_by: HashMap<&MemberId, Money> = HashMap::new();
        let mut total_expenses = Money::ZERO;
        for expense in expenses {
            *paid_by.entry(expense.payer()).or_insert(Money::ZERO) += expense.amount();
            total_expenses += expense.amount();
        }

        let mut made_by: HashMap<&MemberId, Money> = HashMap::new();
        let mut received_by: HashMap<&MemberId, Money> = HashMap::new();
        for payment in payments {
            *made_by.entry(payment.from()).or_insert(Money::ZERO) += payment.amount();
            *received_by.entry(payment.to()).or_insert(Money::ZERO) += payment.amount();
        }

        let share = rounded_equal_share(total_expenses, members.len());
        debug!(
            "balances: {} members, total expenses {}, share {}",
            members.len(),
            total_expenses,
            share
        );

        let balances = members
            .iter()
            .map(|member| {
                let total_paid = paid_by.get(&member.id).copied().unwrap_or(Money::ZERO);
                let payments_made = made_by.get(&member.id).copied().unwrap_or(Money::ZERO);
                let payments_received =
                    received_by.get(&member.id).copied().unwrap_or(Money::ZERO);
                let net = (total_paid - share) + (payments_made - payments_received);

                MemberBalance {
                    member_id: member.id.clone(),
                    display_name: member.display_name.clone(),
                    total_paid,
                    share_of_expenses: share,
                    payments_made,
                    payments_received,
                    net,
                }
            })
            .collect();

        Ok(BalanceSheet {
            balances,
            total_expenses,
            share_per_member: share,
        })
    }

    /// Compute balances for a whole snapshot.
    pub fn compute(snapshot: &GroupSnapshot) -> Result<BalanceSheet, EngineError> {
        Self::compute_balances(snapshot.members(), snapshot.expenses(), snapshot.payments())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members(ids: &[&str]) -> Vec<Member> {
        ids.iter().map(|id| Member::new(*id, id.to_uppercase())).collect()
    }

    #[test]
    fn test_empty_group_fails_fast() {
        let result = BalanceCalculator::compute_balances(&[], &[], &[]);
        assert!(matches!(result, Err(EngineError::EmptyGroup)));
    }

    #[test]
    fn test_no_activity_all_zero() {
        let sheet = BalanceCalculator::compute_balances(&members(&["a", "b", "c"]), &[], &[])
            .unwrap();
        assert_eq!(sheet.total_expenses(), Money::ZERO);
        assert_eq!(sheet.share_per_member(), Money::ZERO);
        for b in sheet.balances() {
            assert_eq!(b.net, Money::ZERO);
            assert_eq!(b.total_paid, Money::ZERO);
        }
    }

    #[test]
    fn test_single_expense_two_members() {
        let ms = members(&["a", "b"]);
        let expenses = vec![Expense::new(MemberId::new("a"), Money::new(1_000))];
        let sheet = BalanceCalculator::compute_balances(&ms, &expenses, &[]).unwrap();

        let a = sheet.balance_for(&MemberId::new("a")).unwrap();
        let b = sheet.balance_for(&MemberId::new("b")).unwrap();
        assert_eq!(a.share_of_expenses, Money::new(500));
        assert_eq!(b.share_of_expenses, Money::new(500));
        assert_eq!(a.net, Money::new(500));
        assert_eq!(b.net, Money::new(-500));
        assert_eq!(sheet.net_sum(), Money::ZERO);
    }

    #[test]
    fn test_uneven_split_leaves_residue() {
        // 1000 across three members: share 333 each, payer keeps a 1-unit
        // residue that the suggester's dead zone treats as settled.
        let ms = members(&["a", "b", "c"]);
        let expenses = vec![Expense::new(MemberId::new("a"), Money::new(1_000))];
        let sheet = BalanceCalculator::compute_balances(&ms, &expenses, &[]).unwrap();

        assert_eq!(sheet.share_per_member(), Money::new(333));
        assert_eq!(
            sheet.balance_for(&MemberId::new("a")).unwrap().net,
            Money::new(667)
        );
        assert_eq!(
            sheet.balance_for(&MemberId::new("b")).unwrap().net,
            Money::new(-333)
        );
        assert_eq!(sheet.net_sum(), Money::new(1));
        assert!(sheet.is_zero_sum_within_residue());
    }

    #[test]
    fn test_payment_without_expenses_credits_the_payer() {
        // No expenses; bob hands alice 200 directly. Bob has effectively
        // lent the money, so he is now owed 200 and alice owes it.
        let ms = members(&["alice", "bob"]);
        let payments = vec![Payment::new(
            MemberId::new("bob"),
            MemberId::new("alice"),
            Money::new(200),
        )];
        let sheet = BalanceCalculator::compute_balances(&ms, &[], &payments).unwrap();

        assert_eq!(
            sheet.balance_for(&MemberId::new("bob")).unwrap().net,
            Money::new(200)
        );
        assert_eq!(
            sheet.balance_for(&MemberId::new("alice")).unwrap().net,
            Money::new(-200)
        );
    }

    #[test]
    fn test_output_follows_member_order() {
        let ms = members(&["zoe", "adam", "mia"]);
        let sheet = BalanceCalculator::compute_balances(&ms, &[], &[]).unwrap();
        let order: Vec<&str> = sheet.balances().iter().map(|b| b.member_id.as_str()).collect();
        assert_eq!(order, vec!["zoe", "adam", "mia"]);
    }

    #[test]
    fn test_expense_by_non_member_still_counted() {
        // A payer outside the membership list (possible via from_parts) still
        // raises the group total; their own paid sum is simply invisible.
        let ms = members(&["a", "b"]);
        let expenses = vec![Expense::new(MemberId::new("ghost"), Money::new(100))];
        let sheet = BalanceCalculator::compute_balances(&ms, &expenses, &[]).unwrap();

        assert_eq!(sheet.total_expenses(), Money::new(100));
        assert_eq!(sheet.share_per_member(), Money::new(50));
        assert_eq!(
            sheet.balance_for(&MemberId::new("a")).unwrap().net,
            Money::new(-50)
        );
    }

    #[test]
    fn test_component_breakdown() {
        let ms = members(&["a", "b"]);
        let expenses = vec![
            Expense::new(MemberId::new("a"), Money::new(600)),
            Expense::new(MemberId::new("b"), Money::new(400)),
        ];
        let payments = vec![Payment::new(
            MemberId::new("b"),
            MemberId::new("a"),
            Money::new(60),
        )];
        let sheet = BalanceCalculator::compute_balances(&ms, &expenses, &payments).unwrap();

        let a = sheet.balance_for(&MemberId::new("a")).unwrap();
        assert_eq!(a.total_paid, Money::new(600));
        assert_eq!(a.share_of_expenses, Money::new(500));
        assert_eq!(a.payments_made, Money::ZERO);
        assert_eq!(a.payments_received, Money::new(60));
        // (600 - 500) + (0 - 60)
        assert_eq!(a.net, Money::new(40));

        let b = sheet.balance_for(&MemberId::new("b")).unwrap();
        // (400 - 500) + (60 - 0)
        assert_eq!(b.net, Money::new(-40));
    }
}
