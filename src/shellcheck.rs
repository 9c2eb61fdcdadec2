use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::file::{FileError, read_path_list};

/// Default linter program, looked up on `PATH`
pub const DEFAULT_PROGRAM: &str = "shellcheck";

/// Captured output of one linter run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Error types for linter invocations
#[derive(Debug, thiserror::Error)]
pub enum LintError {
    #[error("{0} command not found")]
    NotInstalled(String),

    #[error("failed to run {program}: {source}")]
    Spawn { program: String, source: io::Error },
}

/// Something that lints one script and reports GCC-format diagnostics
pub trait Linter {
    fn lint(&self, script: &str) -> Result<LintOutput, LintError>;
}

/// The `shellcheck` executable
#[derive(Debug, Clone)]
pub struct ShellCheck {
    program: PathBuf,
    root: PathBuf,
}

impl ShellCheck {
    /// Run `program` with `root` as its working directory
    ///
    /// Scripts are passed relative to `root`, so the paths in the output
    /// match the entries of the modified lines map. A relative program path
    /// such as `./bin/shellcheck` is resolved against the caller's working
    /// directory, not `root`; a bare name is still looked up on `PATH`.
    pub fn new<P: Into<PathBuf>, R: Into<PathBuf>>(program: P, root: R) -> Self {
        Self {
            program: resolve_program(program.into()),
            root: root.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

fn resolve_program(program: PathBuf) -> PathBuf {
    if program.is_absolute() || program.components().count() < 2 {
        return program;
    }
    match std::path::absolute(&program) {
        Ok(abs) => abs,
        Err(e) => {
            tracing::debug!(program = %program.display(), error = %e, "could not make linter path absolute");
            program
        }
    }
}

impl Linter for ShellCheck {
    fn lint(&self, script: &str) -> Result<LintOutput, LintError> {
        let program = self.program.display().to_string();

        // A non-zero status just means issues were found
        let output = Command::new(&self.program)
            .args(["-f", "gcc", script])
            .current_dir(&self.root)
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => LintError::NotInstalled(program.clone()),
                _ => LintError::Spawn {
                    program: program.clone(),
                    source: e,
                },
            })?;

        tracing::debug!(script, status = ?output.status.code(), "linter finished");

        Ok(LintOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Lint every script listed in `scripts_file`
///
/// Listed paths that are not regular files under `root` are skipped. The
/// non-empty stdout and stderr of each run are joined with newlines.
///
/// # Returns
/// The combined output, or an empty string when the list is missing or
/// the linter is not installed. A missing linter discards output already
/// collected from earlier scripts.
pub fn run_on_scripts<L: Linter + ?Sized>(linter: &L, root: &Path, scripts_file: &Path) -> String {
    let scripts = match read_path_list(scripts_file) {
        Ok(scripts) => scripts,
        Err(FileError::NotFound(p)) => {
            tracing::error!("Error: {} not found", p.display());
            return String::new();
        }
        Err(e) => {
            tracing::error!(error = %e, "could not read shell script list");
            return String::new();
        }
    };

    let mut all_output = Vec::new();

    for script in &scripts {
        if !root.join(script).is_file() {
            tracing::debug!(script = %script, "skipping, not a file");
            continue;
        }

        tracing::info!("Checking: {}", script);
        match linter.lint(script) {
            Ok(output) => {
                if !output.stdout.is_empty() {
                    all_output.push(output.stdout);
                }
                if !output.stderr.is_empty() {
                    all_output.push(output.stderr);
                }
            }
            Err(e @ LintError::NotInstalled(_)) => {
                tracing::error!("Error: {}", e);
                return String::new();
            }
            Err(e) => {
                tracing::error!(script = %script, error = %e, "linter failed");
            }
        }
    }

    all_output.join("\n")
}
