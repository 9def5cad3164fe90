//! Worker process execution
//!
//! Thin adapter around the OS: spawns one synthesized command, captures its
//! stdout, and reports the exit status. No parsing or aggregation lives here.

use std::process::{Command as OsCommand, Stdio};

use crate::error::ShardError;
use crate::models::{WorkerCommand, WorkerOptions, WorkerOutcome};

/// Environment variable numbering the worker's slice of shared resources.
/// The first worker keeps the bare environment, later ones get "2", "3", …
pub const TEST_ENV_NUMBER: &str = "TEST_ENV_NUMBER";

/// Environment variable carrying the total worker count.
pub const TEST_GROUPS: &str = "PARALLEL_TEST_GROUPS";

/// Executes one worker invocation. The call may block awaiting the
/// subprocess; parallel fan-out is the runner's concern, not the executor's.
pub trait ProcessExecutor: Send + Sync {
    fn execute(
        &self,
        command: &WorkerCommand,
        worker_index: usize,
        total_workers: usize,
        options: &WorkerOptions,
    ) -> Result<WorkerOutcome, ShardError>;
}

/// Worker-slot suffix for `TEST_ENV_NUMBER`.
pub fn env_number(worker_index: usize) -> String {
    if worker_index == 0 {
        String::new()
    } else {
        (worker_index + 1).to_string()
    }
}

/// Real executor: spawns the command as an OS process with the shared worker
/// environment, streams stderr through, and captures stdout.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShellExecutor;

impl ProcessExecutor for ShellExecutor {
    fn execute(
        &self,
        command: &WorkerCommand,
        worker_index: usize,
        total_workers: usize,
        options: &WorkerOptions,
    ) -> Result<WorkerOutcome, ShardError> {
        let output = OsCommand::new(command.program())
            .args(command.args())
            .envs(&options.env)
            .env(TEST_ENV_NUMBER, env_number(worker_index))
            .env(TEST_GROUPS, total_workers.to_string())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| ShardError::Spawn {
                index: worker_index,
                source,
            })?;

        Ok(WorkerOutcome {
            exit_status: output.status.code().unwrap_or(-1),
            output: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}
