//! split-engine CLI
//!
//! Compute balances and settlement suggestions from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Show each member's balance breakdown
//! split-engine balances --input group.json
//!
//! # Suggest who should pay whom
//! split-engine settle --input group.json --format json
//!
//! # Generate a random group snapshot for testing
//! split-engine generate --members 5 --expenses 20 --payments 4
//! ```

use chrono::{DateTime, Utc};
use split_engine::core::expense::Expense;
use split_engine::core::group::GroupSnapshot;
use split_engine::core::member::{Member, MemberId};
use split_engine::core::money::Money;
use split_engine::core::payment::Payment;
use split_engine::engine::balance::BalanceCalculator;
use split_engine::engine::settlement::{SettlementSuggester, SETTLEMENT_THRESHOLD};
use split_engine::simulation::generator::{generate_random_group, GroupConfig};
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"split-engine — shared-expense balance and settlement suggestion engine

USAGE:
    split-engine <COMMAND> [OPTIONS]

COMMANDS:
    balances    Compute each member's balance breakdown
    settle      Suggest transfers that settle the group
    generate    Generate a random group snapshot (for testing)
    help        Show this message

OPTIONS (balances, settle):
    --input <FILE>      Path to JSON group snapshot file
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (generate):
    --members <N>       Number of members (default: 5)
    --expenses <N>      Number of expenses (default: 20)
    --payments <N>      Number of payments (default: 4)
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    split-engine balances --input group.json
    split-engine settle --input group.json --format json
    split-engine generate --members 8 --expenses 40 --output test.json"#
    );
}

/// JSON schema for input snapshots. Amounts are integer minor units (cents).
#[derive(serde::Deserialize)]
struct SnapshotFile {
    members: Vec<MemberInput>,
    #[serde(default)]
    expenses: Vec<ExpenseInput>,
    #[serde(default)]
    payments: Vec<PaymentInput>,
}

#[derive(serde::Deserialize)]
struct MemberInput {
    id: String,
    name: Option<String>,
}

#[derive(serde::Deserialize)]
struct ExpenseInput {
    payer: String,
    amount: i64,
    date: Option<DateTime<Utc>>,
    description: Option<String>,
}

#[derive(serde::Deserialize)]
struct PaymentInput {
    from: String,
    to: String,
    amount: i64,
    date: Option<DateTime<Utc>>,
    description: Option<String>,
}

/// JSON output schema for the balances command.
#[derive(serde::Serialize)]
struct BalancesOutput {
    total_expenses: i64,
    share_per_member: i64,
    member_count: usize,
    balances: Vec<BalanceOutput>,
}

#[derive(serde::Serialize)]
struct BalanceOutput {
    member: String,
    name: String,
    total_paid: i64,
    share_of_expenses: i64,
    payments_made: i64,
    payments_received: i64,
    net: i64,
    status: String,
}

#[derive(serde::Serialize)]
struct SettlementOutput {
    from: String,
    to: String,
    amount: i64,
}

fn load_snapshot(path: &str) -> GroupSnapshot {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: SnapshotFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "members": [ {{ "id": "alice", "name": "Alice" }} ],
  "expenses": [ {{ "payer": "alice", "amount": 4800, "description": "dinner" }} ],
  "payments": [ {{ "from": "bob", "to": "alice", "amount": 500 }} ]
}}"#
        );
        process::exit(1);
    });

    let mut group = GroupSnapshot::new();

    for m in file.members {
        let display_name = m.name.unwrap_or_else(|| m.id.clone());
        group
            .add_member(Member::new(m.id, display_name))
            .unwrap_or_else(|e| {
                eprintln!("Invalid member: {}", e);
                process::exit(1);
            });
    }

    for e in file.expenses {
        if e.amount <= 0 {
            eprintln!("Expense amount must be positive, got {}", e.amount);
            process::exit(1);
        }
        let mut expense = Expense::new(MemberId::new(e.payer), Money::new(e.amount));
        if let Some(date) = e.date {
            expense = expense.with_date(date);
        }
        if let Some(description) = e.description {
            expense = expense.with_description(description);
        }
        group.add_expense(expense).unwrap_or_else(|err| {
            eprintln!("Invalid expense: {}", err);
            process::exit(1);
        });
    }

    for p in file.payments {
        if p.amount <= 0 {
            eprintln!("Payment amount must be positive, got {}", p.amount);
            process::exit(1);
        }
        let mut payment = Payment::new(
            MemberId::new(p.from),
            MemberId::new(p.to),
            Money::new(p.amount),
        );
        if let Some(date) = p.date {
            payment = payment.with_date(date);
        }
        if let Some(description) = p.description {
            payment = payment.with_description(description);
        }
        group.record_payment(payment).unwrap_or_else(|err| {
            eprintln!("Invalid payment: {}", err);
            process::exit(1);
        });
    }

    group
}

fn parse_io_options(args: &[String]) -> (String, String) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });
    (path, format)
}

fn status_label(net: Money) -> &'static str {
    if net > SETTLEMENT_THRESHOLD {
        "OWED"
    } else if net < -SETTLEMENT_THRESHOLD {
        "OWES"
    } else {
        "SETTLED"
    }
}

fn cmd_balances(args: &[String]) {
    let (path, format) = parse_io_options(args);
    let group = load_snapshot(&path);

    let sheet = BalanceCalculator::compute(&group).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    if format == "json" {
        let output = BalancesOutput {
            total_expenses: sheet.total_expenses().minor_units(),
            share_per_member: sheet.share_per_member().minor_units(),
            member_count: sheet.member_count(),
            balances: sheet
                .balances()
                .iter()
                .map(|b| BalanceOutput {
                    member: b.member_id.to_string(),
                    name: b.display_name.clone(),
                    total_paid: b.total_paid.minor_units(),
                    share_of_expenses: b.share_of_expenses.minor_units(),
                    payments_made: b.payments_made.minor_units(),
                    payments_received: b.payments_received.minor_units(),
                    net: b.net.minor_units(),
                    status: status_label(b.net).to_string(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        print!("{}", sheet);
        for b in sheet.balances() {
            println!("  {:<20} [{}]", b.display_name, status_label(b.net));
        }
    }
}

fn cmd_settle(args: &[String]) {
    let (path, format) = parse_io_options(args);
    let group = load_snapshot(&path);

    let sheet = BalanceCalculator::compute(&group).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });
    let suggestions = SettlementSuggester::suggest_settlements(sheet.balances());

    if format == "json" {
        let output: Vec<SettlementOutput> = suggestions
            .iter()
            .map(|s| SettlementOutput {
                from: s.from.to_string(),
                to: s.to.to_string(),
                amount: s.amount.minor_units(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else if suggestions.is_empty() {
        println!("All settled up!");
    } else {
        println!("To settle all debts, record these payments:");
        for s in &suggestions {
            let from = group
                .member(&s.from)
                .map(|m| m.display_name.as_str())
                .unwrap_or_else(|| s.from.as_str());
            let to = group
                .member(&s.to)
                .map(|m| m.display_name.as_str())
                .unwrap_or_else(|| s.to.as_str());
            println!("  {} pays {} {}", from, to, s.amount);
        }
    }
}

fn cmd_generate(args: &[String]) {
    let mut members = 5usize;
    let mut expenses = 20usize;
    let mut payments = 4usize;
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--members" => {
                i += 1;
                members = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--members requires a number");
                    process::exit(1);
                });
            }
            "--expenses" => {
                i += 1;
                expenses = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--expenses requires a number");
                    process::exit(1);
                });
            }
            "--payments" => {
                i += 1;
                payments = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--payments requires a number");
                    process::exit(1);
                });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    if members == 0 {
        eprintln!("--members must be at least 1");
        process::exit(1);
    }

    let config = GroupConfig {
        member_count: members,
        expense_count: expenses,
        payment_count: payments,
        ..Default::default()
    };

    let group = generate_random_group(&config);

    #[derive(serde::Serialize)]
    struct OutputMember {
        id: String,
        name: String,
    }

    #[derive(serde::Serialize)]
    struct OutputExpense {
        payer: String,
        amount: i64,
    }

    #[derive(serde::Serialize)]
    struct OutputPayment {
        from: String,
        to: String,
        amount: i64,
    }

    #[derive(serde::Serialize)]
    struct OutputFile {
        members: Vec<OutputMember>,
        expenses: Vec<OutputExpense>,
        payments: Vec<OutputPayment>,
    }

    let output = OutputFile {
        members: group
            .members()
            .iter()
            .map(|m| OutputMember {
                id: m.id.to_string(),
                name: m.display_name.clone(),
            })
            .collect(),
        expenses: group
            .expenses()
            .iter()
            .map(|e| OutputExpense {
                payer: e.payer().to_string(),
                amount: e.amount().minor_units(),
            })
            .collect(),
        payments: group
            .payments()
            .iter()
            .map(|p| OutputPayment {
                from: p.from().to_string(),
                to: p.to().to_string(),
                amount: p.amount().minor_units(),
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output).unwrap();

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {} expenses and {} payments across {} members → {}",
            group.expenses().len(),
            group.payments().len(),
            members,
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "balances" => cmd_balances(rest),
        "settle" => cmd_settle(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
