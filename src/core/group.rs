use crate::core::expense::Expense;
use crate::core::member::{Member, MemberId};
use crate::core::money::Money;
use crate::core::payment::Payment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors arising from recording activity against a snapshot.
///
/// These are the write-time checks the surrounding application performs
/// before anything reaches the engine. Data assembled with
/// [`GroupSnapshot::from_parts`] bypasses them entirely.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("member {id} is already in this group")]
    DuplicateMember { id: MemberId },
    #[error("payer {id} is not a member of this group")]
    PayerNotMember { id: MemberId },
    #[error("both parties of a payment must be members of this group, {id} is not")]
    PaymentPartyNotMember { id: MemberId },
    #[error("cannot record a payment from {id} to themselves")]
    SelfPayment { id: MemberId },
}

/// A consistent point-in-time view of one group's accepted membership,
/// expense history, and settlement-payment history.
///
/// This is the complete input to the engine. The snapshot is a plain value:
/// computing balances never mutates it, and two computations over the same
/// snapshot always agree.
///
/// # Examples
///
/// ```
/// use split_engine::prelude::*;
///
/// let mut group = GroupSnapshot::new();
/// group.add_member(Member::new("alice", "Alice")).unwrap();
/// group.add_member(Member::new("bob", "Bob")).unwrap();
/// group
///     .add_expense(Expense::new(MemberId::new("alice"), Money::new(1_000)))
///     .unwrap();
///
/// assert_eq!(group.member_count(), 2);
/// assert_eq!(group.total_expenses(), Money::new(1_000));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupSnapshot {
    members: Vec<Member>,
    expenses: Vec<Expense>,
    payments: Vec<Payment>,
}

impl GroupSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a snapshot from collaborator-supplied collections without
    /// re-validating them. Degenerate rows (self-payments, non-member payers)
    /// are folded into the balance sums arithmetically, not rejected.
    pub fn from_parts(
        members: Vec<Member>,
        expenses: Vec<Expense>,
        payments: Vec<Payment>,
    ) -> Self {
        Self {
            members,
            expenses,
            payments,
        }
    }

    /// Add an accepted member.
    pub fn add_member(&mut self, member: Member) -> Result<(), SnapshotError> {
        if self.is_member(&member.id) {
            return Err(SnapshotError::DuplicateMember { id: member.id });
        }
        self.members.push(member);
        Ok(())
    }

    /// Record a shared expense. The payer must be an accepted member.
    pub fn add_expense(&mut self, expense: Expense) -> Result<(), SnapshotError> {
        if !self.is_member(expense.payer()) {
            return Err(SnapshotError::PayerNotMember {
                id: expense.payer().clone(),
            });
        }
        self.expenses.push(expense);
        Ok(())
    }

    /// Record a direct settlement payment between two distinct members.
    pub fn record_payment(&mut self, payment: Payment) -> Result<(), SnapshotError> {
        if payment.from() == payment.to() {
            return Err(SnapshotError::SelfPayment {
                id: payment.from().clone(),
            });
        }
        for party in [payment.from(), payment.to()] {
            if !self.is_member(party) {
                return Err(SnapshotError::PaymentPartyNotMember { id: party.clone() });
            }
        }
        self.payments.push(payment);
        Ok(())
    }

    // --- Accessors ---

    /// Accepted members, in the order they were added. Balance output
    /// follows this ordering.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_member(&self, id: &MemberId) -> bool {
        self.members.iter().any(|m| &m.id == id)
    }

    pub fn member(&self, id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == id)
    }

    /// Group-wide sum of all expenses.
    pub fn total_expenses(&self) -> Money {
        self.expenses.iter().map(|e| e.amount()).sum()
    }

    /// Group-wide sum of all settlement payments.
    pub fn total_payments(&self) -> Money {
        self.payments.iter().map(|p| p.amount()).sum()
    }

    /// Expenses sorted most recent first, as the activity feed shows them.
    pub fn expenses_newest_first(&self) -> Vec<&Expense> {
        let mut sorted: Vec<&Expense> = self.expenses.iter().collect();
        sorted.sort_by_key(|e| std::cmp::Reverse(e.date()));
        sorted
    }

    /// Payments sorted most recent first.
    pub fn payments_newest_first(&self) -> Vec<&Payment> {
        let mut sorted: Vec<&Payment> = self.payments.iter().collect();
        sorted.sort_by_key(|p| std::cmp::Reverse(p.date()));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn two_member_group() -> GroupSnapshot {
        let mut group = GroupSnapshot::new();
        group.add_member(Member::new("alice", "Alice")).unwrap();
        group.add_member(Member::new("bob", "Bob")).unwrap();
        group
    }

    #[test]
    fn test_duplicate_member_rejected() {
        let mut group = two_member_group();
        let err = group.add_member(Member::new("alice", "Alice again"));
        assert!(matches!(
            err,
            Err(SnapshotError::DuplicateMember { .. })
        ));
        assert_eq!(group.member_count(), 2);
    }

    #[test]
    fn test_expense_requires_member_payer() {
        let mut group = two_member_group();
        let err = group.add_expense(Expense::new(MemberId::new("mallory"), Money::new(100)));
        assert!(matches!(err, Err(SnapshotError::PayerNotMember { .. })));
        assert!(group.expenses().is_empty());
    }

    #[test]
    fn test_payment_rejects_self_transfer() {
        let mut group = two_member_group();
        let err = group.record_payment(Payment::new(
            MemberId::new("alice"),
            MemberId::new("alice"),
            Money::new(100),
        ));
        assert!(matches!(err, Err(SnapshotError::SelfPayment { .. })));
    }

    #[test]
    fn test_payment_requires_both_members() {
        let mut group = two_member_group();
        let err = group.record_payment(Payment::new(
            MemberId::new("alice"),
            MemberId::new("mallory"),
            Money::new(100),
        ));
        assert!(matches!(
            err,
            Err(SnapshotError::PaymentPartyNotMember { .. })
        ));
    }

    #[test]
    fn test_totals() {
        let mut group = two_member_group();
        group
            .add_expense(Expense::new(MemberId::new("alice"), Money::new(300)))
            .unwrap();
        group
            .add_expense(Expense::new(MemberId::new("bob"), Money::new(200)))
            .unwrap();
        group
            .record_payment(Payment::new(
                MemberId::new("bob"),
                MemberId::new("alice"),
                Money::new(50),
            ))
            .unwrap();

        assert_eq!(group.total_expenses(), Money::new(500));
        assert_eq!(group.total_payments(), Money::new(50));
    }

    #[test]
    fn test_newest_first_ordering() {
        let mut group = two_member_group();
        let base = Utc::now();
        group
            .add_expense(
                Expense::new(MemberId::new("alice"), Money::new(100))
                    .with_date(base - Duration::days(2)),
            )
            .unwrap();
        group
            .add_expense(
                Expense::new(MemberId::new("bob"), Money::new(200)).with_date(base),
            )
            .unwrap();

        let feed = group.expenses_newest_first();
        assert_eq!(feed[0].amount(), Money::new(200));
        assert_eq!(feed[1].amount(), Money::new(100));

        group
            .record_payment(
                Payment::new(MemberId::new("bob"), MemberId::new("alice"), Money::new(10))
                    .with_date(base - Duration::days(1)),
            )
            .unwrap();
        group
            .record_payment(
                Payment::new(MemberId::new("alice"), MemberId::new("bob"), Money::new(20))
                    .with_date(base),
            )
            .unwrap();
        let feed = group.payments_newest_first();
        assert_eq!(feed[0].amount(), Money::new(20));
        assert_eq!(feed[1].amount(), Money::new(10));
    }

    #[test]
    fn test_from_parts_skips_validation() {
        // Collaborator-supplied data is trusted; a degenerate self-payment
        // lands in the snapshot untouched.
        let alice = MemberId::new("alice");
        let group = GroupSnapshot::from_parts(
            vec![Member::new("alice", "Alice")],
            vec![],
            vec![Payment::new(alice.clone(), alice, Money::new(100))],
        );
        assert_eq!(group.payments().len(), 1);
    }
}
