use serde::Serialize;
use std::path::PathBuf;

use crate::diff::{ModifiedLineMap, read_diff};
use crate::file::{FileError, read_path_list, write_lines};
use crate::language::{Detection, detect_shell};
use crate::lines::{LineSelection, ModifiedLinesMap};

/// Output file listing the shell scripts, one per line
pub const SHELL_SCRIPTS_FILE: &str = "shell_scripts.txt";

/// Output file mapping each script to its modified lines
pub const MODIFIED_LINES_MAP_FILE: &str = "modified_lines_map.txt";

/// Inputs of the extraction step
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Newline-delimited list of changed paths
    pub changeset: PathBuf,
    /// Unified diff of the change
    pub diff: PathBuf,
    /// Directory the changed paths are relative to
    pub root: PathBuf,
    /// Where the output files go
    pub output_dir: PathBuf,
}

/// A shell script found in the changeset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptInfo {
    pub path: String,
    pub detection: Detection,
    pub modified_lines: LineSelection,
}

/// Result of the extraction step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractSummary {
    pub changed_files: usize,
    pub has_shell_scripts: bool,
    pub scripts: Vec<ScriptInfo>,
}

/// Find the shell scripts of a changeset and the lines the diff added
///
/// Writes `shell_scripts.txt` and `modified_lines_map.txt` into the output
/// directory. Without any shell script the diff is not read and the map
/// file is left empty.
///
/// # Returns
/// * `Ok(ExtractSummary)` - Scripts with their line selections
/// * `Err(FileError)` - Changeset missing, or an output could not be written
pub fn extract_shell_info(options: &ExtractOptions) -> Result<ExtractSummary, FileError> {
    let changed_files = read_path_list(&options.changeset)?;
    tracing::debug!(count = changed_files.len(), "read changeset");

    let detected: Vec<(String, Detection)> = changed_files
        .iter()
        .filter_map(|path| detect_shell(&options.root, path).map(|d| (path.clone(), d)))
        .collect();

    for (path, detection) in &detected {
        tracing::debug!(path = %path, %detection, "shell script");
    }

    let paths: Vec<&str> = detected.iter().map(|(p, _)| p.as_str()).collect();
    write_lines(options.output_dir.join(SHELL_SCRIPTS_FILE), &paths)?;

    let map_path = options.output_dir.join(MODIFIED_LINES_MAP_FILE);
    if detected.is_empty() {
        write_lines::<_, &str>(&map_path, &[])?;
        return Ok(ExtractSummary {
            changed_files: changed_files.len(),
            has_shell_scripts: false,
            scripts: Vec::new(),
        });
    }

    let added: ModifiedLineMap = read_diff(&options.diff);
    let map = ModifiedLinesMap::from_diff(&paths, &added);
    write_lines(&map_path, &map.render())?;

    let scripts = detected
        .into_iter()
        .map(|(path, detection)| {
            let modified_lines = map.get(&path).cloned().unwrap_or(LineSelection::All);
            ScriptInfo {
                path,
                detection,
                modified_lines,
            }
        })
        .collect();

    Ok(ExtractSummary {
        changed_files: changed_files.len(),
        has_shell_scripts: true,
        scripts,
    })
}
