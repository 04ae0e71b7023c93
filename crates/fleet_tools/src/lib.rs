//! # Fleet Tools
//!
//! Command-line tooling around the fleet decision engine:
//! - Scenario loading from RON
//! - Tactical assessment reports as JSON
//! - Parallel batch assessment of scenario directories
//! - Route planning with either planner

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod batch;
pub mod error;
pub mod report;
pub mod scenario;

pub use error::{Result, ToolError};
