//! Random group-activity generation for benchmarks and testing.

pub mod generator;
