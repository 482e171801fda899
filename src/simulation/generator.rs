//! Random group-activity generator.
//!
//! Produces synthetic snapshots (members, expenses, payments) to exercise
//! the engine at various group sizes.

use crate::core::expense::Expense;
use crate::core::group::GroupSnapshot;
use crate::core::member::{Member, MemberId};
use crate::core::money::Money;
use crate::core::payment::Payment;
use rand::Rng;

/// Configuration for generating a random group snapshot.
#[derive(Debug, Clone)]
pub struct GroupConfig {
    /// Number of accepted members.
    pub member_count: usize,
    /// Number of expenses to record.
    pub expense_count: usize,
    /// Number of direct payments to record.
    pub payment_count: usize,
    /// Minimum amount per expense/payment, in minor units.
    pub min_amount: Money,
    /// Maximum amount per expense/payment, in minor units.
    pub max_amount: Money,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            member_count: 5,
            expense_count: 20,
            payment_count: 5,
            min_amount: Money::new(100),
            max_amount: Money::new(50_000),
        }
    }
}

/// Generate a random group snapshot for testing.
///
/// Payments always run between two distinct members, so the generated data
/// passes the same write-time checks real data does.
pub fn generate_random_group(config: &GroupConfig) -> GroupSnapshot {
    let mut rng = rand::thread_rng();
    let mut group = GroupSnapshot::new();

    let members: Vec<MemberId> = (0..config.member_count)
        .map(|i| MemberId::new(format!("member-{:03}", i)))
        .collect();
    for (i, id) in members.iter().enumerate() {
        group
            .add_member(Member::new(id.clone(), format!("Member {:03}", i)))
            .expect("generated member ids are unique");
    }

    let min = config.min_amount.minor_units().max(1);
    let max = config.max_amount.minor_units().max(min + 1);

    for _ in 0..config.expense_count {
        let payer = members[rng.gen_range(0..members.len())].clone();
        let amount = Money::new(rng.gen_range(min..max));
        group
            .add_expense(Expense::new(payer, amount))
            .expect("generated payer is always a member");
    }

    if members.len() > 1 {
        for _ in 0..config.payment_count {
            let from_idx = rng.gen_range(0..members.len());
            let mut to_idx = rng.gen_range(0..members.len());
            while to_idx == from_idx {
                to_idx = rng.gen_range(0..members.len());
            }
            let amount = Money::new(rng.gen_range(min..max));
            group
                .record_payment(Payment::new(
                    members[from_idx].clone(),
                    members[to_idx].clone(),
                    amount,
                ))
                .expect("generated payments connect distinct members");
        }
    }

    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::balance::BalanceCalculator;
    use crate::engine::settlement::{SettlementSuggester, SETTLEMENT_THRESHOLD};

    #[test]
    fn test_random_group_generation() {
        let config = GroupConfig {
            member_count: 4,
            expense_count: 10,
            payment_count: 3,
            ..Default::default()
        };

        let group = generate_random_group(&config);
        assert_eq!(group.member_count(), 4);
        assert_eq!(group.expenses().len(), 10);
        assert_eq!(group.payments().len(), 3);
    }

    #[test]
    fn test_single_member_group_generates_no_payments() {
        let config = GroupConfig {
            member_count: 1,
            expense_count: 5,
            payment_count: 3,
            ..Default::default()
        };

        let group = generate_random_group(&config);
        assert!(group.payments().is_empty());
    }

    #[test]
    fn test_random_group_balances() {
        let config = GroupConfig {
            member_count: 8,
            expense_count: 40,
            payment_count: 10,
            ..Default::default()
        };

        let group = generate_random_group(&config);
        let sheet = BalanceCalculator::compute(&group).unwrap();
        assert!(sheet.is_zero_sum_within_residue());

        // Suggestions never move more money than is outstanding.
        let outstanding: Money = sheet
            .balances()
            .iter()
            .filter(|b| b.net > SETTLEMENT_THRESHOLD)
            .map(|b| b.net)
            .sum();
        let suggested: Money = SettlementSuggester::suggest_settlements(sheet.balances())
            .iter()
            .map(|s| s.amount)
            .sum();
        assert!(suggested <= outstanding);
    }
}
