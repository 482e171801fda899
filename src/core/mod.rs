//! Foundational value types: money, members, expenses, payments, and the
//! group snapshot the engine consumes.

pub mod expense;
pub mod group;
pub mod member;
pub mod money;
pub mod payment;
