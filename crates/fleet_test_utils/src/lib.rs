//! # Fleet Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Fleet and ship fixtures
//! - Scripted environments with hazard zones
//! - Determinism test harness
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod determinism;
pub mod environment;
pub mod fixtures;
pub mod strategies;

/// Re-export proptest for convenience.
pub use proptest;
