//! Console and workflow output for both steps.
//!
//! Stdout is read by the CI workflow, so the wording and the `key=value`
//! lines are part of the contract.

use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use crate::check::CheckSummary;
use crate::extract::ExtractSummary;
use crate::lines::LineSelection;
use crate::lint::Decision;

/// Stdout lines for the extraction step
pub fn extract_lines(summary: &ExtractSummary) -> Vec<String> {
    let mut out = Vec::new();

    if !summary.has_shell_scripts {
        out.push("No shell scripts found in changeset".to_string());
        out.extend(extract_outputs(summary).iter().map(|(k, v)| format!("{k}={v}")));
        return out;
    }

    out.push(format!("Found {} shell script(s):", summary.scripts.len()));
    for script in &summary.scripts {
        out.push(format!("  {}", script.path));
    }
    out.extend(extract_outputs(summary).iter().map(|(k, v)| format!("{k}={v}")));

    for script in &summary.scripts {
        out.push(format!("Extracting modified lines for: {}", script.path));
        match &script.modified_lines {
            LineSelection::All => {
                out.push("  No modified lines found (file might be new or renamed)".to_string())
            }
            selection => out.push(format!("  Modified lines: {}", selection)),
        }
    }

    out
}

/// Stdout lines for the lint step
pub fn check_lines(summary: &CheckSummary) -> Vec<String> {
    let mut out = Vec::new();

    for decision in &summary.decisions {
        let f = decision.finding();
        match decision {
            Decision::Kept(_) => {
                out.push(format!("  ✓ Issue on modified line {}: {}", f.line, f.raw))
            }
            Decision::Skipped(_) => {
                out.push(format!("  ⏭ Skipping issue on unmodified line {}", f.line))
            }
        }
    }

    if summary.has_issues() {
        out.push(format!(
            "Found {} non-trivial ShellCheck issue(s) on modified lines",
            summary.total_issues
        ));
    } else {
        out.push("No non-trivial ShellCheck issues found on modified lines".to_string());
    }

    out.extend(check_outputs(summary).iter().map(|(k, v)| format!("{k}={v}")));
    out
}

/// Workflow outputs of the extraction step
pub fn extract_outputs(summary: &ExtractSummary) -> Vec<(&'static str, String)> {
    vec![("has_shell_scripts", summary.has_shell_scripts.to_string())]
}

/// Workflow outputs of the lint step
pub fn check_outputs(summary: &CheckSummary) -> Vec<(&'static str, String)> {
    vec![
        ("total_issues", summary.total_issues.to_string()),
        ("exit_code", summary.exit_code.to_string()),
    ]
}

/// Append `key=value` lines to a GitHub Actions output file
pub fn append_github_output(path: &Path, outputs: &[(&str, String)]) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    for (key, value) in outputs {
        writeln!(file, "{}={}", key, value)?;
    }
    Ok(())
}

/// Pretty JSON for `--json`
pub fn to_json<T: Serialize>(summary: &T) -> String {
    serde_json::to_string_pretty(summary)
        .unwrap_or_else(|_| r#"{"error": "Failed to serialize summary"}"#.to_string())
}
