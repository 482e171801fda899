//! Basic balance and settlement example.
//!
//! Demonstrates how the engine splits shared expenses equally and
//! suggests the transfers that square the group up.

use split_engine::core::expense::Expense;
use split_engine::core::group::GroupSnapshot;
use split_engine::core::member::{Member, MemberId};
use split_engine::core::money::Money;
use split_engine::core::payment::Payment;
use split_engine::engine::balance::BalanceCalculator;
use split_engine::engine::settlement::{SettlementSuggester, SETTLEMENT_THRESHOLD};

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║   split-engine: Basic Split Example      ║");
    println!("╚══════════════════════════════════════════╝\n");

    // --- Scenario 1: One shared dinner ---
    println!("━━━ Scenario 1: One Shared Dinner ━━━\n");

    let mut group = GroupSnapshot::new();
    group.add_member(Member::new("alice", "Alice")).unwrap();
    group.add_member(Member::new("bob", "Bob")).unwrap();

    group
        .add_expense(
            Expense::new(MemberId::new("alice"), Money::new(4_800)).with_description("dinner"),
        )
        .unwrap();

    let sheet = BalanceCalculator::compute(&group).unwrap();
    println!("{}", sheet);

    let suggestions = SettlementSuggester::suggest_settlements(sheet.balances());
    println!("Suggested transfers:");
    for s in &suggestions {
        println!("  {}", s);
    }
    println!();

    // --- Scenario 2: A weekend of expenses, partially settled ---
    println!("━━━ Scenario 2: Weekend Trip (3 members) ━━━\n");

    let mut group = GroupSnapshot::new();
    group.add_member(Member::new("alice", "Alice")).unwrap();
    group.add_member(Member::new("bob", "Bob")).unwrap();
    group.add_member(Member::new("carol", "Carol")).unwrap();

    group
        .add_expense(
            Expense::new(MemberId::new("alice"), Money::new(15_000)).with_description("cabin"),
        )
        .unwrap();
    group
        .add_expense(
            Expense::new(MemberId::new("bob"), Money::new(6_300)).with_description("fuel"),
        )
        .unwrap();
    group
        .add_expense(
            Expense::new(MemberId::new("carol"), Money::new(2_700)).with_description("food"),
        )
        .unwrap();
    // Carol already sent Alice part of her share.
    group
        .record_payment(Payment::new(
            MemberId::new("carol"),
            MemberId::new("alice"),
            Money::new(2_000),
        ))
        .unwrap();

    let sheet = BalanceCalculator::compute(&group).unwrap();
    println!("{}", sheet);

    println!("━━━ Member Status ━━━\n");
    for b in sheet.balances() {
        let status = if b.net > SETTLEMENT_THRESHOLD {
            "OWED"
        } else if b.net < -SETTLEMENT_THRESHOLD {
            "OWES"
        } else {
            "SETTLED"
        };
        println!("  {:<10} {:>8}  [{}]", b.display_name, b.net, status);
    }
    println!();

    let suggestions = SettlementSuggester::suggest_settlements(sheet.balances());
    println!("To settle all debts, record these payments:");
    for s in &suggestions {
        println!("  {}", s);
    }
}
