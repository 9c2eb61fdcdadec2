use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// File extensions that always mark a shell script
pub const SHELL_EXTENSIONS: &[&str] = &["sh", "bash"];

/// How a file was recognized as a shell script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Detection {
    /// `.sh` or `.bash` extension
    Extension,
    /// `#!` line mentioning `bash` or `sh`
    Shebang,
}

impl Detection {
    pub fn name(&self) -> &str {
        match self {
            Detection::Extension => "extension",
            Detection::Shebang => "shebang",
        }
    }
}

impl std::fmt::Display for Detection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Detect whether `path` is a shell script
///
/// The extension check looks only at the path string, so it holds even
/// for files that no longer exist. The shebang check reads the first line
/// of `root/path` and succeeds when it starts with `#!` and mentions
/// `bash` or `sh` anywhere.
///
/// # Arguments
/// * `root` - Directory the changeset paths are relative to
/// * `path` - Path as listed in the changeset
///
/// # Returns
/// * `Some(Detection)` - How the script was recognized
/// * `None` - Not a shell script, or the file could not be read
///
/// # Examples
/// ```
/// use shellcheck_diff::{Detection, detect_shell};
/// assert_eq!(detect_shell(".", "deploy.sh"), Some(Detection::Extension));
/// assert_eq!(detect_shell(".", "ci/build.bash"), Some(Detection::Extension));
/// assert_eq!(detect_shell(".", "missing/README"), None);
/// ```
pub fn detect_shell<R: AsRef<Path>, P: AsRef<Path>>(root: R, path: P) -> Option<Detection> {
    let path_ref = path.as_ref();

    // Plain suffix test, so a bare ".sh" counts too
    let name = path_ref.to_string_lossy();
    if SHELL_EXTENSIONS.iter().any(|ext| name.ends_with(&format!(".{ext}"))) {
        return Some(Detection::Extension);
    }

    let full_path = root.as_ref().join(path_ref);
    if !full_path.is_file() {
        return None;
    }

    let first_line = match read_first_line(&full_path) {
        Ok(line) => line,
        Err(e) => {
            tracing::debug!(path = %full_path.display(), error = %e, "could not read first line");
            return None;
        }
    };

    if is_shell_shebang(&first_line) {
        Some(Detection::Shebang)
    } else {
        None
    }
}

/// Convenience wrapper around [`detect_shell`]
pub fn is_shell_script<R: AsRef<Path>, P: AsRef<Path>>(root: R, path: P) -> bool {
    detect_shell(root, path).is_some()
}

/// Check an interpreter line for a shell shebang
///
/// Matching is a plain substring test, so `#!/usr/bin/env zsh` counts too.
pub fn is_shell_shebang(line: &str) -> bool {
    let line = line.trim();
    line.starts_with("#!") && (line.contains("bash") || line.contains("sh"))
}

fn read_first_line(path: &Path) -> std::io::Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut buf = Vec::new();
    reader.read_until(b'\n', &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
