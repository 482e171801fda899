//! # split-engine
//!
//! Shared-expense balance calculation and settlement suggestion engine.
//!
//! Users form groups, log shared expenses and direct settlement payments;
//! this engine computes each member's net position and a reduced list of
//! transfers that would zero every balance out. All monetary arithmetic
//! uses integer minor currency units (cents), never floating point.
//!
//! Everything around the engine (auth, invitations, storage, UI) lives in
//! the surrounding application; the engine only consumes point-in-time
//! snapshots of membership, expenses, and payments, and every computation is
//! pure and idempotent.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: money, members, expenses, payments, group snapshot
//! - **engine** — Balance calculation and settlement suggestion
//! - **simulation** — Random group-activity generation for benchmarks

pub mod core;
pub mod engine;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::expense::Expense;
    pub use crate::core::group::{GroupSnapshot, SnapshotError};
    pub use crate::core::member::{Member, MemberId};
    pub use crate::core::money::{rounded_equal_share, Money};
    pub use crate::core::payment::Payment;
    pub use crate::engine::balance::{BalanceCalculator, BalanceSheet, EngineError, MemberBalance};
    pub use crate::engine::settlement::{
        SettlementSuggester, SettlementSuggestion, SETTLEMENT_THRESHOLD,
    };
}
