//! Crate error taxonomy
//!
//! Everything outside these variants degrades gracefully: unreadable config
//! candidates count as "not found", malformed summary lines are skipped.

use thiserror::Error;

/// Errors surfaced by the orchestration core.
#[derive(Debug, Error)]
pub enum ShardError {
    /// None of the executable candidates resolved. This is the only fatal
    /// condition: the run aborts before any worker is dispatched.
    #[error("no `{name}` executable found (checked bin/{name}, bundler, script/{name}, and PATH)")]
    ExecutableNotFound { name: String },

    /// The worker process could not be spawned at all.
    #[error("failed to spawn worker {index}: {source}")]
    Spawn {
        index: usize,
        #[source]
        source: std::io::Error,
    },
}
