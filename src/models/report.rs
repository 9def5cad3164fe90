//! Run plans and reports
//!
//! The plan is what would be dispatched; the report is what came back.

use serde::Serialize;

use super::{TestUnitId, WorkerCommand};

/// Captured result of one worker process.
#[derive(Clone, Debug, Serialize)]
pub struct WorkerOutcome {
    pub exit_status: i32,
    pub output: String,
}

impl WorkerOutcome {
    pub fn success(&self) -> bool {
        self.exit_status == 0
    }
}

/// Computed distribution for a run: one group and one command per worker.
#[derive(Clone, Debug, Serialize)]
pub struct RunPlan {
    pub groups: Vec<Vec<TestUnitId>>,
    pub commands: Vec<WorkerCommand>,
}

impl RunPlan {
    pub fn num_workers(&self) -> usize {
        self.commands.len()
    }
}

/// One worker's slice of the final report.
#[derive(Clone, Debug, Serialize)]
pub struct WorkerReport {
    pub index: usize,
    pub command: WorkerCommand,
    pub exit_status: i32,
    pub output: String,
}

/// Everything captured from a full run, plus the merged summary.
#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    pub workers: Vec<WorkerReport>,
    pub summary: String,
    pub success: bool,
}

impl RunReport {
    /// Indices of workers that exited non-zero.
    pub fn failed_workers(&self) -> Vec<usize> {
        self.workers
            .iter()
            .filter(|w| w.exit_status != 0)
            .map(|w| w.index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_workers() {
        let report = RunReport {
            workers: vec![
                WorkerReport {
                    index: 0,
                    command: WorkerCommand::new(vec!["cucumber".to_string()]),
                    exit_status: 0,
                    output: String::new(),
                },
                WorkerReport {
                    index: 1,
                    command: WorkerCommand::new(vec!["cucumber".to_string()]),
                    exit_status: 2,
                    output: String::new(),
                },
            ],
            summary: String::new(),
            success: false,
        };

        assert_eq!(report.failed_workers(), vec![1]);
    }
}
