//! Parallel worker fan-out
//!
//! Dispatches one blocking executor call per worker, waits for all of them,
//! and folds the captured outputs into a single run report.

use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::error::ShardError;
use crate::models::{RunReport, WorkerCommand, WorkerOptions, WorkerOutcome, WorkerReport};
use crate::summary;

use super::ProcessExecutor;

/// Runs every worker command and merges the results.
pub struct ParallelRunner {
    executor: Arc<dyn ProcessExecutor>,
}

impl ParallelRunner {
    pub fn new(executor: Arc<dyn ProcessExecutor>) -> Self {
        Self { executor }
    }

    /// Execute all worker commands concurrently and aggregate their output.
    ///
    /// The merged summary is built only after every worker's output has been
    /// captured; workers that exit non-zero still contribute whatever summary
    /// lines they produced. A spawn failure is logged and counted as a failed
    /// worker with no output.
    pub async fn run(
        &self,
        commands: Vec<WorkerCommand>,
        options: &WorkerOptions,
    ) -> RunReport {
        let total = commands.len();
        info!("Dispatching {} worker(s)", total);

        let start = Instant::now();
        let options = Arc::new(options.clone());
        let mut handles = Vec::new();

        for (index, command) in commands.into_iter().enumerate() {
            let executor = self.executor.clone();
            let options = options.clone();

            handles.push(tokio::task::spawn_blocking(move || {
                let outcome = executor.execute(&command, index, total, &options);
                (index, command, outcome)
            }));
        }

        let mut workers = Vec::new();
        for joined in join_all(handles).await {
            let Ok((index, command, outcome)) = joined else {
                warn!("A worker task panicked; its output is lost");
                continue;
            };

            let outcome = outcome.unwrap_or_else(|err: ShardError| {
                error!("{err}");
                WorkerOutcome {
                    exit_status: -1,
                    output: String::new(),
                }
            });

            workers.push(WorkerReport {
                index,
                command,
                exit_status: outcome.exit_status,
                output: outcome.output,
            });
        }

        workers.sort_by_key(|w| w.index);

        let outputs: Vec<String> = workers.iter().map(|w| w.output.clone()).collect();
        let summary = summary::summarize(&outputs);
        let success = workers.len() == total && workers.iter().all(|w| w.exit_status == 0);

        info!(
            "All workers finished in {}ms ({}/{} succeeded)",
            start.elapsed().as_millis(),
            workers.iter().filter(|w| w.exit_status == 0).count(),
            total
        );

        RunReport {
            workers,
            summary,
            success,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GroupMode;
    use std::io;

    /// Canned executor keyed by worker index.
    struct StubExecutor {
        outcomes: Vec<Result<(i32, &'static str), ()>>,
    }

    impl ProcessExecutor for StubExecutor {
        fn execute(
            &self,
            _command: &WorkerCommand,
            worker_index: usize,
            _total_workers: usize,
            _options: &WorkerOptions,
        ) -> Result<WorkerOutcome, ShardError> {
            match self.outcomes[worker_index] {
                Ok((exit_status, output)) => Ok(WorkerOutcome {
                    exit_status,
                    output: output.to_string(),
                }),
                Err(()) => Err(ShardError::Spawn {
                    index: worker_index,
                    source: io::Error::new(io::ErrorKind::NotFound, "stub"),
                }),
            }
        }
    }

    fn commands(n: usize) -> Vec<WorkerCommand> {
        (0..n)
            .map(|_| WorkerCommand::new(vec!["cucumber".to_string()]))
            .collect()
    }

    fn options() -> WorkerOptions {
        WorkerOptions::new(GroupMode::File)
    }

    #[tokio::test]
    async fn test_fan_out_merges_summaries() {
        let runner = ParallelRunner::new(Arc::new(StubExecutor {
            outcomes: vec![
                Ok((0, "3 scenarios (1 failed, 2 passed)\n")),
                Ok((0, "1 scenario (1 failed)\n")),
            ],
        }));

        let report = runner.run(commands(2), &options()).await;
        assert!(report.success);
        assert_eq!(report.summary, "4 scenarios (2 failed, 2 passed)");
    }

    #[tokio::test]
    async fn test_failed_worker_output_still_aggregates() {
        let runner = ParallelRunner::new(Arc::new(StubExecutor {
            outcomes: vec![
                Ok((1, "1 scenario (1 failed)\n")),
                Ok((0, "2 scenarios (2 passed)\n")),
            ],
        }));

        let report = runner.run(commands(2), &options()).await;
        assert!(!report.success);
        assert_eq!(report.failed_workers(), vec![0]);
        assert_eq!(report.summary, "3 scenarios (1 failed, 2 passed)");
    }

    #[tokio::test]
    async fn test_spawn_failure_degrades_to_failed_worker() {
        let runner = ParallelRunner::new(Arc::new(StubExecutor {
            outcomes: vec![Ok((0, "2 scenarios (2 passed)\n")), Err(())],
        }));

        let report = runner.run(commands(2), &options()).await;
        assert!(!report.success);
        assert_eq!(report.workers.len(), 2);
        assert_eq!(report.workers[1].exit_status, -1);
        assert_eq!(report.summary, "2 scenarios (2 passed)");
    }

    #[tokio::test]
    async fn test_workers_sorted_by_index() {
        let runner = ParallelRunner::new(Arc::new(StubExecutor {
            outcomes: vec![Ok((0, "a")), Ok((0, "b")), Ok((0, "c"))],
        }));

        let report = runner.run(commands(3), &options()).await;
        let indices: Vec<usize> = report.workers.iter().map(|w| w.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_no_workers() {
        let runner = ParallelRunner::new(Arc::new(StubExecutor { outcomes: vec![] }));
        let report = runner.run(Vec::new(), &options()).await;

        assert!(report.success);
        assert!(report.summary.is_empty());
    }
}
