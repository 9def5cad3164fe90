//! Worker execution engine
//!
//! Spawns one OS process per worker and fans their captured output back in.

mod parallel;
mod process;

pub use parallel::ParallelRunner;
pub use process::{env_number, ProcessExecutor, ShellExecutor};
