use serde::Serialize;
use std::path::PathBuf;

use crate::file::{FileError, write_joined, write_text};
use crate::lines::ModifiedLinesMap;
use crate::lint::{Decision, filter_to_modified, filter_trivial};
use crate::shellcheck::{Linter, run_on_scripts};

pub const RAW_FILE: &str = "shellcheck_raw.txt";
pub const FILTERED_FILE: &str = "shellcheck_filtered.txt";
pub const DIFF_FILTERED_FILE: &str = "shellcheck_diff_filtered.txt";
pub const RESULTS_FILE: &str = "shellcheck_results.txt";

/// Inputs of the lint step
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// `shell_scripts.txt` from the extraction step
    pub scripts_file: PathBuf,
    /// `modified_lines_map.txt` from the extraction step
    pub map_file: PathBuf,
    /// Directory the script paths are relative to
    pub root: PathBuf,
    /// Where the report files go
    pub output_dir: PathBuf,
    /// Codes dropped as trivial
    pub trivial_codes: Vec<String>,
}

/// Result of the lint step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub total_issues: usize,
    /// 1 when any issue sits on a modified line
    pub exit_code: i32,
    pub decisions: Vec<Decision>,
}

impl CheckSummary {
    pub fn has_issues(&self) -> bool {
        self.total_issues > 0
    }
}

/// Lint the changed scripts and keep the issues on modified lines
///
/// Writes the raw, trivial-filtered, diff-filtered and final report files
/// into the output directory. Only failing to write those files is an
/// error; every missing input degrades to an empty report.
pub fn run_check<L: Linter + ?Sized>(
    linter: &L,
    options: &CheckOptions,
) -> Result<CheckSummary, FileError> {
    let out = |name: &str| options.output_dir.join(name);

    let raw = run_on_scripts(linter, &options.root, &options.scripts_file);
    write_text(out(RAW_FILE), &raw)?;

    let filtered = filter_trivial(&raw, &options.trivial_codes);
    write_joined(out(FILTERED_FILE), &filtered)?;
    tracing::debug!(
        raw = raw.lines().count(),
        filtered = filtered.len(),
        "dropped trivial issues"
    );

    let map = ModifiedLinesMap::load(&options.map_file);
    let result = filter_to_modified(&filtered, &map);
    let kept = result.kept();
    write_joined(out(DIFF_FILTERED_FILE), &kept)?;

    let total_issues = kept.len();
    let exit_code = if total_issues > 0 { 1 } else { 0 };

    if total_issues > 0 {
        write_joined(out(RESULTS_FILE), &kept)?;
    } else {
        write_text(out(RESULTS_FILE), "")?;
    }

    Ok(CheckSummary {
        total_issues,
        exit_code,
        decisions: result.decisions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::TRIVIAL_CODES;
    use crate::shellcheck::tests::FakeLinter;
    use std::fs;
    use std::path::Path;

    fn options(dir: &Path) -> CheckOptions {
        CheckOptions {
            scripts_file: dir.join("shell_scripts.txt"),
            map_file: dir.join("modified_lines_map.txt"),
            root: dir.to_path_buf(),
            output_dir: dir.to_path_buf(),
            trivial_codes: TRIVIAL_CODES.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn setup(map: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("file.sh"), "#!/bin/sh\n").unwrap();
        fs::write(dir.path().join("shell_scripts.txt"), "file.sh\n").unwrap();
        fs::write(dir.path().join("modified_lines_map.txt"), map).unwrap();
        dir
    }

    fn read(dir: &Path, name: &str) -> String {
        fs::read_to_string(dir.join(name)).unwrap()
    }

    const OUTPUT: &str = "\
file.sh:5:1: warning: Double quote to prevent globbing. [SC2086]
file.sh:6:1: warning: Unused variable. [SC2034]
file.sh:1:1: error: ShellCheck only supports sh/bash/dash/ksh scripts. [SC1071]
";

    #[test]
    fn test_keeps_issues_on_modified_lines() {
        let dir = setup("file.sh:5,7\n");
        let linter = FakeLinter::default().with("file.sh", OUTPUT, "");

        let summary = run_check(&linter, &options(dir.path())).unwrap();

        assert_eq!(summary.total_issues, 1);
        assert_eq!(summary.exit_code, 1);
        assert!(summary.has_issues());
        assert_eq!(summary.decisions.len(), 2);

        assert_eq!(read(dir.path(), RAW_FILE), OUTPUT);
        assert_eq!(
            read(dir.path(), FILTERED_FILE),
            "file.sh:5:1: warning: Double quote to prevent globbing. [SC2086]\n\
             file.sh:6:1: warning: Unused variable. [SC2034]"
        );
        assert_eq!(
            read(dir.path(), DIFF_FILTERED_FILE),
            "file.sh:5:1: warning: Double quote to prevent globbing. [SC2086]"
        );
        assert_eq!(read(dir.path(), RESULTS_FILE), read(dir.path(), DIFF_FILTERED_FILE));
    }

    #[test]
    fn test_new_file_reports_everything() {
        let dir = setup("file.sh:all\n");
        let linter = FakeLinter::default().with("file.sh", OUTPUT, "");

        let summary = run_check(&linter, &options(dir.path())).unwrap();
        assert_eq!(summary.total_issues, 2);
    }

    #[test]
    fn test_clean_run() {
        let dir = setup("file.sh:5\n");
        let linter = FakeLinter::default();

        let summary = run_check(&linter, &options(dir.path())).unwrap();

        assert_eq!(summary.total_issues, 0);
        assert_eq!(summary.exit_code, 0);
        assert_eq!(read(dir.path(), RAW_FILE), "");
        assert_eq!(read(dir.path(), RESULTS_FILE), "");
    }

    #[test]
    fn test_missing_map_skips_all_findings() {
        let dir = setup("");
        fs::remove_file(dir.path().join("modified_lines_map.txt")).unwrap();
        let linter = FakeLinter::default().with("file.sh", OUTPUT, "");

        let summary = run_check(&linter, &options(dir.path())).unwrap();
        assert_eq!(summary.total_issues, 0);
        assert_eq!(summary.decisions.len(), 2);
    }

    #[test]
    fn test_missing_linter_is_a_clean_run() {
        let dir = setup("file.sh:all\n");
        let linter = FakeLinter {
            missing: true,
            ..FakeLinter::default()
        };

        let summary = run_check(&linter, &options(dir.path())).unwrap();
        assert_eq!(summary.exit_code, 0);
    }

    #[test]
    fn test_unwritable_output_dir() {
        let dir = setup("file.sh:all\n");
        let mut opts = options(dir.path());
        opts.output_dir = dir.path().join("no/such/dir");

        assert!(run_check(&FakeLinter::default(), &opts).is_err());
    }
}
