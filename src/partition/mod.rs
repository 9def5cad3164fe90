//! Test partitioning
//!
//! Splits the discovered test units into one group per worker. When a
//! recorded runtime log is available the split balances expected runtime;
//! otherwise units are dealt out round-robin.

use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

use crate::command::FsProbe;
use crate::models::{TestUnitId, WorkerOptions};

/// Assigns test units to worker groups. Consumers treat the output as the
/// pre-grouping input for each worker.
pub trait Partitioner {
    fn partition(
        &self,
        ids: &[TestUnitId],
        num_groups: usize,
        options: &WorkerOptions,
    ) -> Vec<Vec<TestUnitId>>;
}

/// Default partitioner: largest-processing-time greedy over recorded per-file
/// runtimes (`<path>:<seconds>` lines), with round-robin fallback when no
/// history exists. Empty groups are dropped so no worker runs with an empty
/// unit list.
pub struct RuntimePartitioner<P: FsProbe> {
    probe: P,
    runtime_log: PathBuf,
}

impl<P: FsProbe> RuntimePartitioner<P> {
    pub fn new(probe: P, runtime_log: impl Into<PathBuf>) -> Self {
        Self {
            probe,
            runtime_log: runtime_log.into(),
        }
    }

    /// Recorded runtimes keyed by path. Garbled lines are skipped.
    fn runtimes(&self) -> HashMap<String, f64> {
        let Some(contents) = self.probe.read_to_string(&self.runtime_log) else {
            return HashMap::new();
        };

        let mut runtimes = HashMap::new();
        for line in contents.lines() {
            let Some((path, seconds)) = line.rsplit_once(':') else {
                continue;
            };
            if let Ok(seconds) = seconds.trim().parse::<f64>() {
                runtimes.insert(path.to_string(), seconds);
            }
        }
        runtimes
    }
}

impl<P: FsProbe> Partitioner for RuntimePartitioner<P> {
    fn partition(
        &self,
        ids: &[TestUnitId],
        num_groups: usize,
        _options: &WorkerOptions,
    ) -> Vec<Vec<TestUnitId>> {
        if num_groups == 0 || ids.is_empty() {
            return Vec::new();
        }

        let runtimes = self.runtimes();
        let groups = if runtimes.is_empty() {
            round_robin(ids, num_groups)
        } else {
            debug!(
                "Balancing {} unit(s) by {} recorded runtime(s)",
                ids.len(),
                runtimes.len()
            );
            by_runtime(ids, num_groups, &runtimes)
        };

        groups.into_iter().filter(|g| !g.is_empty()).collect()
    }
}

/// Deal units out by index, preserving discovery order within each group.
fn round_robin(ids: &[TestUnitId], num_groups: usize) -> Vec<Vec<TestUnitId>> {
    let mut groups = vec![Vec::new(); num_groups];
    for (index, id) in ids.iter().enumerate() {
        groups[index % num_groups].push(id.clone());
    }
    groups
}

/// Greedy balance: heaviest unit first into the currently lightest group.
/// Units without history weigh the average of the known runtimes, so they
/// spread instead of piling onto one worker.
fn by_runtime(
    ids: &[TestUnitId],
    num_groups: usize,
    runtimes: &HashMap<String, f64>,
) -> Vec<Vec<TestUnitId>> {
    let average = runtimes.values().sum::<f64>() / runtimes.len() as f64;

    let mut weighted: Vec<(&TestUnitId, f64)> = ids
        .iter()
        .map(|id| {
            let (path, _) = id.split_lines();
            (id, runtimes.get(path).copied().unwrap_or(average))
        })
        .collect();
    // Stable sort keeps discovery order among equal weights.
    weighted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut groups: Vec<Vec<TestUnitId>> = vec![Vec::new(); num_groups];
    let mut loads = vec![0.0_f64; num_groups];

    for (id, weight) in weighted {
        let lightest = loads
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(index, _)| index)
            .unwrap_or(0);
        groups[lightest].push(id.clone());
        loads[lightest] += weight;
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::MemProbe;
    use crate::models::GroupMode;

    fn ids(raw: &[&str]) -> Vec<TestUnitId> {
        raw.iter().map(|s| TestUnitId::new(*s)).collect()
    }

    fn options() -> WorkerOptions {
        WorkerOptions::new(GroupMode::File)
    }

    #[test]
    fn test_round_robin_without_history() {
        let partitioner = RuntimePartitioner::new(MemProbe::new(), "tmp/runtime.log");
        let groups = partitioner.partition(&ids(&["a", "b", "c", "d", "e"]), 2, &options());

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], ids(&["a", "c", "e"]));
        assert_eq!(groups[1], ids(&["b", "d"]));
    }

    #[test]
    fn test_every_unit_lands_in_exactly_one_group() {
        let partitioner = RuntimePartitioner::new(MemProbe::new(), "tmp/runtime.log");
        let input = ids(&["a", "b", "c", "d", "e", "f", "g"]);
        let groups = partitioner.partition(&input, 3, &options());

        let mut all: Vec<TestUnitId> = groups.into_iter().flatten().collect();
        all.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        assert_eq!(all, input);
    }

    #[test]
    fn test_runtime_balancing_splits_heavy_units() {
        let probe = MemProbe::new().file(
            "tmp/runtime.log",
            "slow.feature:30.0\nquick.feature:1.0\nother.feature:1.5\n",
        );
        let partitioner = RuntimePartitioner::new(probe, "tmp/runtime.log");
        let groups = partitioner.partition(
            &ids(&["slow.feature", "quick.feature", "other.feature"]),
            2,
            &options(),
        );

        assert_eq!(groups.len(), 2);
        // The heavy file gets a worker to itself; the light ones share.
        assert_eq!(groups[0], ids(&["slow.feature"]));
        assert_eq!(groups[1], ids(&["other.feature", "quick.feature"]));
    }

    #[test]
    fn test_garbled_runtime_lines_are_skipped() {
        let probe = MemProbe::new().file("tmp/runtime.log", "a.feature:not-a-number\ngarbage\n");
        let partitioner = RuntimePartitioner::new(probe, "tmp/runtime.log");
        let groups = partitioner.partition(&ids(&["a.feature", "b.feature"]), 2, &options());

        // Unusable history falls back to round-robin.
        assert_eq!(groups[0], ids(&["a.feature"]));
        assert_eq!(groups[1], ids(&["b.feature"]));
    }

    #[test]
    fn test_more_groups_than_units_drops_empty_groups() {
        let partitioner = RuntimePartitioner::new(MemProbe::new(), "tmp/runtime.log");
        let groups = partitioner.partition(&ids(&["a"]), 4, &options());
        assert_eq!(groups, vec![ids(&["a"])]);
    }

    #[test]
    fn test_zero_groups_or_no_units() {
        let partitioner = RuntimePartitioner::new(MemProbe::new(), "tmp/runtime.log");
        assert!(partitioner.partition(&ids(&["a"]), 0, &options()).is_empty());
        assert!(partitioner.partition(&[], 3, &options()).is_empty());
    }
}
