//! Identifier grouping
//!
//! Regroups test unit ids that request scenario-level granularity into one
//! compact specifier per file: `{a:3, a:7, b:2}` becomes `{a:3:7, b:2}`.
//! Every other mode passes ids through unchanged.

use crate::models::{GroupMode, ScenarioSpecifier, TestUnitId};

/// Group ids for dispatch to a single worker.
///
/// Pure function; no errors. Malformed ids are a discovery-collaborator
/// precondition and fall back to path-only singletons.
pub fn group(ids: &[TestUnitId], mode: GroupMode) -> Vec<TestUnitId> {
    if mode != GroupMode::Scenario {
        return ids.to_vec();
    }

    group_by_scenario(ids)
        .iter()
        .map(ScenarioSpecifier::to_unit_id)
        .collect()
}

/// Collapse scenario-granular ids into one specifier per file, preserving
/// first-seen order of paths and the original discovery order of lines.
/// No sorting, no dedup: a line appearing twice is preserved twice.
pub fn group_by_scenario(ids: &[TestUnitId]) -> Vec<ScenarioSpecifier> {
    let mut specifiers: Vec<ScenarioSpecifier> = Vec::new();

    for id in ids {
        let (path, lines) = id.split_lines();
        match specifiers.iter_mut().find(|s| s.path == path) {
            Some(existing) => existing.lines.extend(lines),
            None => specifiers.push(ScenarioSpecifier {
                path: path.to_string(),
                lines,
            }),
        }
    }

    specifiers
}
