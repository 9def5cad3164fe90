//! Worker options
//!
//! One immutable snapshot of configuration shared by every worker. The
//! interactive-terminal marker is computed once, before any command is built,
//! rather than patched into a shared map mid-run.

use serde::Serialize;
use std::collections::BTreeMap;
use std::io::IsTerminal;

use super::GroupMode;

/// Environment marker telling the worker framework it runs under an
/// interactive, auto-detecting session.
pub const AUTOTEST_ENV: &str = "AUTOTEST";

/// Configuration snapshot passed to every worker. Not mutated after
/// construction, so it can be shared across the fan-out without locking.
#[derive(Clone, Debug, Serialize)]
pub struct WorkerOptions {
    /// Distribution granularity.
    pub group_by: GroupMode,
    /// User-supplied options forwarded to the test framework.
    pub test_args: Vec<String>,
    /// Extra environment entries for every worker process.
    pub env: BTreeMap<String, String>,
    /// Whether the controlling process's stdout is an interactive terminal.
    pub interactive: bool,
}

impl WorkerOptions {
    pub fn new(group_by: GroupMode) -> Self {
        Self {
            group_by,
            test_args: Vec::new(),
            env: BTreeMap::new(),
            interactive: false,
        }
    }

    /// Set the framework options forwarded to each worker.
    pub fn with_test_args(mut self, args: Vec<String>) -> Self {
        self.test_args = args;
        self
    }

    /// Add an environment entry for every worker.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Mark the run as interactive. Folds `AUTOTEST=1` into the worker
    /// environment, visible to all subsequently built commands.
    pub fn interactive(mut self, yes: bool) -> Self {
        self.interactive = yes;
        if yes {
            self.env.insert(AUTOTEST_ENV.to_string(), "1".to_string());
        }
        self
    }

    /// Snapshot the terminal state of the current process.
    pub fn detect_interactive(self) -> Self {
        let tty = std::io::stdout().is_terminal();
        self.interactive(tty)
    }
}

impl Default for WorkerOptions {
    fn default() -> Self {
        Self::new(GroupMode::File)
    }
}
