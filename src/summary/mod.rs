//! Result aggregation
//!
//! Merges the summary lines of independently run workers into one canonical
//! report. The wire format is the plain-text convention printed by the worker
//! framework: `"<int> <category>[s]"` optionally followed by
//! `" (<int> <label>[, <int> <label>]*)"`, e.g.
//! `3 scenarios (1 failed, 2 passed)`.
//!
//! Each worker has already tallied its own subset, so merging is a sum of
//! already-summed counts: leading totals are summed verbatim per category,
//! status sub-labels are summed verbatim per label. Nothing is re-derived.

use regex::Regex;
use std::sync::OnceLock;

/// Category roots recognized in worker output, in render order.
const CATEGORY_ROOTS: &[&str] = &["scenario", "step"];

/// Canonical status-label order within a category, after the root itself.
/// Labels outside this list sort last, stable by first appearance.
const SORT_ORDER: &[&str] = &["failed", "flaky", "undefined", "skipped", "pending", "passed"];

fn summary_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d+) (scenarios?|steps?)(?: \(([^()]*)\))?$").expect("valid regex")
    })
}

fn sub_count_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+) ([A-Za-z][\w-]*)$").expect("valid regex"))
}

/// Label-wise counts for one category root, ordered by first appearance.
#[derive(Clone, Debug, Default)]
struct CategorySummary {
    counts: Vec<(String, u64)>,
}

impl CategorySummary {
    fn add(&mut self, label: &str, n: u64) {
        match self.counts.iter_mut().find(|(l, _)| l == label) {
            Some((_, total)) => *total += n,
            None => self.counts.push((label.to_string(), n)),
        }
    }

    fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Render as `"<head> (<rest>)"`, with the category root pluralized when
    /// its total is not exactly 1.
    fn render(&self, root: &str) -> String {
        let mut ordered = self.counts.clone();
        ordered.sort_by_key(|(label, _)| rank(root, label));

        let (head_label, head_total) = &ordered[0];
        let plural = if *head_total != 1 && head_label == root {
            "s"
        } else {
            ""
        };
        let head = format!("{head_total} {head_label}{plural}");

        if ordered.len() == 1 {
            return head;
        }

        let rest: Vec<String> = ordered[1..]
            .iter()
            .map(|(label, total)| format!("{total} {label}"))
            .collect();
        format!("{head} ({})", rest.join(", "))
    }
}

/// Sort key: the category root first, then the canonical status order,
/// then everything else (stable sort keeps first-appearance order there).
fn rank(root: &str, label: &str) -> usize {
    if label == root {
        return 0;
    }
    SORT_ORDER
        .iter()
        .position(|l| *l == label)
        .map(|i| i + 1)
        .unwrap_or(usize::MAX)
}

/// Merge every worker's captured output into one consolidated summary.
///
/// Deterministic regardless of output order; categories with no contributing
/// lines are omitted entirely. Malformed lines are skipped, never fatal.
pub fn summarize(outputs: &[String]) -> String {
    let mut pools: Vec<(&str, CategorySummary)> = CATEGORY_ROOTS
        .iter()
        .map(|root| (*root, CategorySummary::default()))
        .collect();

    for output in outputs {
        for line in output.lines() {
            let Some((root, counts)) = parse_line(line) else {
                continue;
            };
            if let Some((_, pool)) = pools.iter_mut().find(|(r, _)| *r == root) {
                for (label, n) in counts {
                    pool.add(&label, n);
                }
            }
        }
    }

    let rendered: Vec<String> = pools
        .iter()
        .filter(|(_, pool)| !pool.is_empty())
        .map(|(root, pool)| pool.render(root))
        .collect();
    rendered.join("\n")
}

/// Parse one candidate summary line into its category root and counts. The
/// leading total is recorded under the root label itself. Returns `None` for
/// non-summary lines and for lines with garbled sub-counts.
fn parse_line(line: &str) -> Option<(String, Vec<(String, u64)>)> {
    let caps = summary_line_re().captures(line.trim_end())?;

    let total: u64 = caps[1].parse().ok()?;
    let word = &caps[2];
    let root = word.strip_suffix('s').unwrap_or(word).to_string();

    let mut counts = vec![(root.clone(), total)];
    if let Some(inner) = caps.get(3) {
        for item in inner.as_str().split(", ") {
            let sub = sub_count_re().captures(item)?;
            counts.push((sub[2].to_string(), sub[1].parse().ok()?));
        }
    }

    Some((root, counts))
}
