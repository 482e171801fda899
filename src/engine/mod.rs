//! The balance and settlement engines.
//!
//! Both are pure functions over a snapshot: every invocation is independent,
//! idempotent, and safe to run concurrently.

pub mod balance;
pub mod settlement;
