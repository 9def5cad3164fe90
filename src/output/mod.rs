//! Output formatters for run plans and reports
//!
//! Provides text and JSON renderings of the final report and of the `show`
//! preview.

use crate::models::{RunPlan, RunReport};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    JsonPretty,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            _ => None,
        }
    }
}

/// Report formatter
pub struct ReportFormatter {
    format: OutputFormat,
}

impl ReportFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Format the final run report. Text output is the merged summary plus a
    /// note for any failed workers.
    pub fn format_report(&self, report: &RunReport) -> String {
        match self.format {
            OutputFormat::Text => self.format_report_text(report),
            OutputFormat::Json => serde_json::to_string(report).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(report).unwrap_or_default(),
        }
    }

    fn format_report_text(&self, report: &RunReport) -> String {
        let failed = report.failed_workers();
        if failed.is_empty() {
            return report.summary.clone();
        }

        let failed: Vec<String> = failed.iter().map(usize::to_string).collect();
        format!(
            "{}\n\nFailed worker(s): {}",
            report.summary,
            failed.join(", ")
        )
    }

    /// Format a dry-run plan: one line per worker with its unit count and the
    /// exact command that would be executed.
    pub fn format_plan(&self, plan: &RunPlan) -> String {
        match self.format {
            OutputFormat::Text => self.format_plan_text(plan),
            OutputFormat::Json => serde_json::to_string(plan).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(plan).unwrap_or_default(),
        }
    }

    fn format_plan_text(&self, plan: &RunPlan) -> String {
        let mut lines = Vec::new();
        for (index, (group, command)) in plan.groups.iter().zip(&plan.commands).enumerate() {
            lines.push(format!(
                "worker {index} ({} unit{}): {command}",
                group.len(),
                if group.len() == 1 { "" } else { "s" },
            ));
        }
        lines.join("\n")
    }
}
