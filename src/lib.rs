// Shell script detection module
pub mod language;

// Input and output files module
pub mod file;

// Unified diff parsing module
pub mod diff;

// Modified lines map module
pub mod lines;

// Linter output filtering module
pub mod lint;

// Linter invocation module
pub mod shellcheck;

// Extraction step module
pub mod extract;

// Lint step module
pub mod check;

// Console and workflow output module
pub mod report;

// Tracing setup module
pub mod logging;

// Re-exports
pub use language::{Detection, detect_shell, is_shell_script, is_shell_shebang};
pub use file::{FileError, read_path_list, write_lines, write_joined};
pub use diff::{ModifiedLineMap, parse_diff, read_diff};
pub use lines::{LineSelection, ModifiedLinesMap};
pub use lint::{Decision, DiffFilter, Finding, TRIVIAL_CODES, filter_to_modified, filter_trivial};
pub use shellcheck::{LintError, LintOutput, Linter, ShellCheck, run_on_scripts};
pub use extract::{ExtractOptions, ExtractSummary, ScriptInfo, extract_shell_info};
pub use check::{CheckOptions, CheckSummary, run_check};
pub use logging::{LogFormat, init_tracing};
