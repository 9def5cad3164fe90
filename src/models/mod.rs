//! Data models for parallel test orchestration
//!
//! This module contains all data structures used throughout the application.

mod command;
mod options;
mod report;
mod test_unit;

pub use command::WorkerCommand;
pub use options::WorkerOptions;
pub use report::{RunPlan, RunReport, WorkerOutcome, WorkerReport};
pub use test_unit::{GroupMode, ScenarioSpecifier, TestUnitId};
