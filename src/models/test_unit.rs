//! Test unit identifiers and grouping modes
//!
//! A test unit is a feature file, optionally narrowed to individual scenarios
//! by `:<line>` selectors appended to the path.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for one schedulable test unit: either a bare file path or a
/// `path:line` pair produced by the discovery collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestUnitId(String);

impl TestUnitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into path and trailing line selectors.
    ///
    /// `features/a.feature:3:7` yields `("features/a.feature", [3, 7])`; a
    /// bare path yields no lines. Non-numeric trailing segments mean the colon
    /// belongs to the path itself, so the whole id is treated as a path.
    pub fn split_lines(&self) -> (&str, Vec<u32>) {
        if let Some((path, rest)) = self.0.split_once(':') {
            let lines: Option<Vec<u32>> = rest.split(':').map(|s| s.parse().ok()).collect();
            if let Some(lines) = lines {
                return (path, lines);
            }
        }
        (self.0.as_str(), Vec::new())
    }
}

impl fmt::Display for TestUnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TestUnitId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One file with all its selected scenario line numbers, in discovery order.
/// Duplicates are preserved: later lines may re-select the same scenario.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSpecifier {
    pub path: String,
    pub lines: Vec<u32>,
}

impl ScenarioSpecifier {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            lines: Vec::new(),
        }
    }

    /// Render back into the compact `path:l1:l2:…` id form consumed by the
    /// worker framework. A specifier without lines is just the path.
    pub fn to_unit_id(&self) -> TestUnitId {
        if self.lines.is_empty() {
            return TestUnitId::new(self.path.clone());
        }
        let mut id = self.path.clone();
        for line in &self.lines {
            id.push(':');
            id.push_str(&line.to_string());
        }
        TestUnitId::new(id)
    }
}

impl fmt::Display for ScenarioSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_unit_id())
    }
}

/// Granularity used when distributing test units across workers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupMode {
    /// One unit per feature file (default).
    File,
    /// One unit per scenario; units are re-collapsed per file before dispatch.
    Scenario,
    /// File granularity, balanced by recorded runtimes.
    Runtime,
}

impl GroupMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "file" | "files" => Some(GroupMode::File),
            "scenario" | "scenarios" => Some(GroupMode::Scenario),
            "runtime" => Some(GroupMode::Runtime),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupMode::File => "file",
            GroupMode::Scenario => "scenario",
            GroupMode::Runtime => "runtime",
        }
    }
}

impl fmt::Display for GroupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
