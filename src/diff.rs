use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::LazyLock;

use crate::file::{FileError, read_lossy};

/// Added line numbers (new-file side) per file path
pub type ModifiedLineMap = BTreeMap<String, BTreeSet<usize>>;

static FILE_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^diff --git a/(.+) b/(.+)$").expect("valid regex"));

static HUNK_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@\s+-\d+(?:,\d+)?\s+\+(\d+)(?:,\d+)?\s+@@").expect("valid regex")
});

/// Parse a unified git diff into the added line numbers of each file
///
/// One forward scan. A `diff --git` header selects the current file (keyed
/// by its `a/` path), a hunk header positions the new-file line counter,
/// and body lines either record an addition, advance past context, or are
/// deletions that leave the counter alone.
///
/// Files that appear in the diff without any added line get no entry.
///
/// # Example
/// ```
/// use shellcheck_diff::parse_diff;
/// let diff = "diff --git a/run.sh b/run.sh\n\
///             --- a/run.sh\n\
///             +++ b/run.sh\n\
///             @@ -1,3 +10,3 @@\n\
///             +echo hello\n";
/// let map = parse_diff(diff);
/// assert_eq!(map["run.sh"].iter().copied().collect::<Vec<_>>(), vec![10]);
/// ```
pub fn parse_diff(text: &str) -> ModifiedLineMap {
    let mut modified = ModifiedLineMap::new();
    let mut current_file: Option<String> = None;
    let mut line_num = 0usize;

    for line in text.split('\n') {
        if let Some(caps) = FILE_HEADER_RE.captures(line) {
            current_file = Some(caps[1].to_string());
            line_num = 0;
            continue;
        }

        let Some(file) = current_file.as_deref() else {
            continue;
        };

        if let Some(caps) = HUNK_HEADER_RE.captures(line) {
            // Absurdly large starts are treated like a deleted-file hunk
            line_num = caps[1].parse().unwrap_or(0);
            continue;
        }

        if line_num == 0 {
            continue;
        }

        if line.starts_with('+') && !line.starts_with("+++") {
            modified.entry(file.to_string()).or_default().insert(line_num);
            line_num += 1;
        } else if line.starts_with(' ') {
            line_num += 1;
        }
        // Deletions and anything else leave the counter alone
    }

    modified
}

/// Read and parse a diff file
///
/// A missing diff is not fatal: every script then falls back to `all`.
pub fn read_diff<P: AsRef<Path>>(path: P) -> ModifiedLineMap {
    match read_lossy(&path) {
        Ok(text) => parse_diff(&text),
        Err(FileError::NotFound(p)) => {
            tracing::error!("Error: {} not found", p.display());
            ModifiedLineMap::new()
        }
        Err(e) => {
            tracing::error!(error = %e, "could not read diff");
            ModifiedLineMap::new()
        }
    }
}
