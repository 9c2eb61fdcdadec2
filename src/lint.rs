use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::lines::ModifiedLinesMap;

/// Diagnostics that never fail a build
///
/// SC1071 only says ShellCheck does not support the script's dialect. The
/// parse-error family (SC1009, SC1070, SC1072, SC1073) stays reportable.
pub const TRIVIAL_CODES: &[&str] = &["SC1071"];

static GCC_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^:]+):(\d+):\d+:.*$").expect("valid regex"));

/// One GCC-format diagnostic, `file:line:column: message`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub path: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// The diagnostic exactly as the linter printed it
    pub raw: String,
}

impl Finding {
    /// Parse a GCC-format line, `None` for anything else
    pub fn parse(line: &str) -> Option<Self> {
        let caps = GCC_LINE_RE.captures(line)?;
        let line_num = caps[2].parse().ok()?;
        Some(Finding {
            path: caps[1].to_string(),
            line: line_num,
            raw: line.to_string(),
        })
    }
}

/// Drop blank lines and lines mentioning a trivial code
///
/// Matching is by substring, so a code anywhere on the line counts. Kept
/// lines are returned verbatim.
pub fn filter_trivial<S: AsRef<str>>(raw: &str, codes: &[S]) -> Vec<String> {
    raw.split('\n')
        .filter(|line| !line.trim().is_empty())
        .filter(|line| !codes.iter().any(|code| line.contains(code.as_ref())))
        .map(str::to_string)
        .collect()
}

/// What happened to one finding during diff filtering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "decision")]
pub enum Decision {
    Kept(Finding),
    Skipped(Finding),
}

impl Decision {
    pub fn finding(&self) -> &Finding {
        match self {
            Decision::Kept(f) | Decision::Skipped(f) => f,
        }
    }
}

/// Result of filtering findings against the modified lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffFilter {
    /// Every finding, in linter order
    pub decisions: Vec<Decision>,
}

impl DiffFilter {
    /// The kept findings' raw lines
    pub fn kept(&self) -> Vec<String> {
        self.decisions
            .iter()
            .filter_map(|d| match d {
                Decision::Kept(f) => Some(f.raw.clone()),
                Decision::Skipped(_) => None,
            })
            .collect()
    }

    pub fn kept_count(&self) -> usize {
        self.decisions.iter().filter(|d| matches!(d, Decision::Kept(_))).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.decisions.len() - self.kept_count()
    }
}

/// Keep only findings that sit on a modified line
///
/// Lines that are not GCC-format findings are dropped without a decision.
pub fn filter_to_modified<S: AsRef<str>>(lines: &[S], map: &ModifiedLinesMap) -> DiffFilter {
    let decisions = lines
        .iter()
        .map(|line| line.as_ref())
        .filter(|line: &&str| !line.trim().is_empty())
        .filter_map(Finding::parse)
        .map(|finding| {
            if map.includes(&finding.path, finding.line) {
                Decision::Kept(finding)
            } else {
                Decision::Skipped(finding)
            }
        })
        .collect();

    DiffFilter { decisions }
}
