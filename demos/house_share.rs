//! House-share walkthrough: a month of recurring expenses, a mid-month
//! settlement, and the rounding residue a three-way split leaves behind.

use split_engine::core::expense::Expense;
use split_engine::core::group::GroupSnapshot;
use split_engine::core::member::{Member, MemberId};
use split_engine::core::money::Money;
use split_engine::core::payment::Payment;
use split_engine::engine::balance::BalanceCalculator;
use split_engine::engine::settlement::SettlementSuggester;

fn main() {
    let mut group = GroupSnapshot::new();
    group.add_member(Member::new("maya", "Maya")).unwrap();
    group.add_member(Member::new("liam", "Liam")).unwrap();
    group.add_member(Member::new("noor", "Noor")).unwrap();

    let maya = MemberId::new("maya");
    let liam = MemberId::new("liam");
    let noor = MemberId::new("noor");

    // A month of household spending. 100_000 minor units = 1000.00.
    let bills: [(MemberId, i64, &str); 5] = [
        (maya.clone(), 100_000, "rent"),
        (maya.clone(), 4_550, "electricity"),
        (liam.clone(), 12_320, "groceries week 1"),
        (liam.clone(), 9_980, "groceries week 2"),
        (noor.clone(), 3_299, "streaming + internet"),
    ];
    for (payer, amount, what) in bills {
        group
            .add_expense(Expense::new(payer, Money::new(amount)).with_description(what))
            .unwrap();
    }

    // Mid-month, Noor transferred Maya 300.00 toward rent.
    group
        .record_payment(
            Payment::new(noor.clone(), maya.clone(), Money::new(30_000))
                .with_description("rent share"),
        )
        .unwrap();

    let sheet = BalanceCalculator::compute(&group).unwrap();
    println!("{}", sheet);

    // 130_149 total across 3 members happens to divide evenly: share 43_383.
    println!(
        "net sum after rounding: {} (bounded by member count - 1)\n",
        sheet.net_sum()
    );

    let suggestions = SettlementSuggester::suggest_settlements(sheet.balances());
    if suggestions.is_empty() {
        println!("All settled up!");
    } else {
        println!("To settle all debts, record these payments:");
        for s in &suggestions {
            println!("  {}", s);
        }
    }

    // Execute the suggestions and show the group really is settled.
    for s in &suggestions {
        group
            .record_payment(Payment::new(s.from.clone(), s.to.clone(), s.amount))
            .unwrap();
    }
    let settled = BalanceCalculator::compute(&group).unwrap();
    println!("\nAfter recording them:");
    for b in settled.balances() {
        let marker = if b.net.is_zero() { "✓" } else { "≈" };
        println!("  {:<8} net {} {}", b.display_name, b.net, marker);
    }
}
