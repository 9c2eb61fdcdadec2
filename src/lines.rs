//! The `modified_lines_map.txt` format.
//!
//! One entry per line, `path:1,4,5` or `path:all`. The first `:` splits the
//! path from the selection, so paths containing a colon are not supported.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::diff::ModifiedLineMap;
use crate::file::{FileError, read_lossy};

/// Keyword marking every line of a file as modified
pub const ALL_LINES: &str = "all";

/// Which lines of a file count as modified
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum LineSelection {
    /// New or renamed file, every line counts
    All,
    /// Explicit line numbers (1-indexed)
    Lines(BTreeSet<usize>),
    /// A value that could not be read as line numbers; treated like `All`
    Unparseable(String),
}

impl LineSelection {
    /// Parse the text after the `:` of a map entry
    ///
    /// Empty comma-separated parts are ignored, so `""` and `" , "` both
    /// parse to an empty set that matches nothing.
    pub fn parse(value: &str) -> Self {
        if value == ALL_LINES {
            return LineSelection::All;
        }

        let mut lines = BTreeSet::new();
        for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.parse::<usize>() {
                Ok(n) => {
                    lines.insert(n);
                }
                Err(_) => return LineSelection::Unparseable(value.to_string()),
            }
        }
        LineSelection::Lines(lines)
    }

    /// Selection for a script given the lines a diff added to it
    pub fn from_added(added: Option<&BTreeSet<usize>>) -> Self {
        match added {
            Some(lines) if !lines.is_empty() => LineSelection::Lines(lines.clone()),
            _ => LineSelection::All,
        }
    }

    /// Check whether `line` counts as modified
    pub fn contains(&self, line: usize) -> bool {
        match self {
            LineSelection::All | LineSelection::Unparseable(_) => true,
            LineSelection::Lines(lines) => lines.contains(&line),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, LineSelection::All)
    }
}

impl std::fmt::Display for LineSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineSelection::All => write!(f, "{}", ALL_LINES),
            LineSelection::Lines(lines) => {
                let joined = lines.iter().map(usize::to_string).collect::<Vec<_>>().join(",");
                write!(f, "{}", joined)
            }
            LineSelection::Unparseable(raw) => write!(f, "{}", raw),
        }
    }
}

/// One entry of the map file
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    raw: String,
    selection: LineSelection,
}

/// Modified line selections keyed by script path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifiedLinesMap {
    entries: BTreeMap<String, Entry>,
    order: Vec<String>,
}

impl ModifiedLinesMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the map for `scripts` from the lines a diff added
    ///
    /// Scripts the diff never added lines to get `all`.
    pub fn from_diff<S: AsRef<str>>(scripts: &[S], added: &ModifiedLineMap) -> Self {
        let mut map = Self::new();
        for script in scripts {
            let script: &str = script.as_ref();
            map.insert(script, LineSelection::from_added(added.get(script)));
        }
        map
    }

    /// Insert or replace the selection for `path`
    pub fn insert(&mut self, path: &str, selection: LineSelection) {
        let raw = selection.to_string();
        self.insert_entry(path, Entry { raw, selection });
    }

    fn insert_entry(&mut self, path: &str, entry: Entry) {
        if self.entries.insert(path.to_string(), entry).is_none() {
            self.order.push(path.to_string());
        }
    }

    /// Parse map file content
    pub fn parse(content: &str) -> Self {
        let mut map = Self::new();
        for line in content.lines().map(str::trim) {
            let Some((path, value)) = line.split_once(':') else {
                continue;
            };
            map.insert_entry(
                path,
                Entry {
                    raw: value.to_string(),
                    selection: LineSelection::parse(value),
                },
            );
        }
        map
    }

    /// Load a map file; a missing file yields an empty map
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        match read_lossy(&path) {
            Ok(content) => Self::parse(&content),
            Err(FileError::NotFound(p)) => {
                tracing::warn!("Warning: {} not found", p.display());
                Self::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not read modified lines map");
                Self::new()
            }
        }
    }

    /// Selection recorded for `path`
    pub fn get(&self, path: &str) -> Option<&LineSelection> {
        self.entries.get(path).map(|e| &e.selection)
    }

    /// Check whether a finding at `path:line` is on a modified line
    ///
    /// Paths without an entry, or with an empty value, match nothing.
    pub fn includes(&self, path: &str, line: usize) -> bool {
        match self.entries.get(path) {
            Some(entry) if !entry.raw.is_empty() => entry.selection.contains(line),
            _ => false,
        }
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LineSelection)> {
        self.order
            .iter()
            .filter_map(|p| self.entries.get(p).map(|e| (p.as_str(), &e.selection)))
    }

    /// Render as map file lines, `path:selection`
    pub fn render(&self) -> Vec<String> {
        self.order
            .iter()
            .filter_map(|p| self.entries.get(p).map(|e| format!("{}:{}", p, e.raw)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
