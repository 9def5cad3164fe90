//! Worker invocation command
//!
//! An ordered token list; built once per worker, consumed exactly once by the
//! execution adapter.

use serde::Serialize;
use std::fmt;

/// One worker's full invocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WorkerCommand {
    pub tokens: Vec<String>,
}

impl WorkerCommand {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// The program to spawn (first token).
    pub fn program(&self) -> &str {
        self.tokens.first().map(String::as_str).unwrap_or_default()
    }

    /// Everything after the program token.
    pub fn args(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or(&[])
    }
}

impl fmt::Display for WorkerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}
