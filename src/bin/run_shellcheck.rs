use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use shellcheck_diff::{
    CheckOptions, LogFormat, ShellCheck, TRIVIAL_CODES, init_tracing, run_check,
    report::{append_github_output, check_lines, check_outputs, to_json},
    shellcheck::DEFAULT_PROGRAM,
};
use std::path::PathBuf;

/// Run ShellCheck on changed scripts, keeping issues on modified lines
#[derive(Parser, Debug)]
#[command(name = "run-shellcheck")]
#[command(version)]
#[command(about = "Diff-aware ShellCheck for CI", long_about = None)]
struct Args {
    /// shell_scripts.txt from extract-shell-info
    shell_scripts_file: PathBuf,

    /// modified_lines_map.txt from extract-shell-info
    modified_lines_map_file: PathBuf,

    /// Directory the script paths are relative to
    #[arg(long, default_value = ".")]
    repo_root: PathBuf,

    /// Directory for the shellcheck_*.txt reports
    #[arg(long, env = "SHELLCHECK_DIFF_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Linter executable
    #[arg(long, env = "SHELLCHECK_BIN", default_value = DEFAULT_PROGRAM)]
    shellcheck: PathBuf,

    /// Diagnostic codes treated as trivial (repeatable)
    #[arg(long = "ignore-code", value_name = "CODE")]
    ignore_codes: Vec<String>,

    /// Exit with the computed exit code instead of 0
    #[arg(long)]
    fail_on_issues: bool,

    /// Also print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Append workflow outputs to this file (e.g. $GITHUB_OUTPUT)
    #[arg(long)]
    github_output: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log format: text (default) or json
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_tracing(args.verbose, args.log_format);

    let trivial_codes = if args.ignore_codes.is_empty() {
        TRIVIAL_CODES.iter().map(|c| c.to_string()).collect()
    } else {
        args.ignore_codes
    };

    let options = CheckOptions {
        scripts_file: args.shell_scripts_file,
        map_file: args.modified_lines_map_file,
        root: args.repo_root.clone(),
        output_dir: args.output_dir,
        trivial_codes,
    };
    let linter = ShellCheck::new(args.shellcheck, args.repo_root);

    println!("Running ShellCheck on modified shell scripts with diff-aware filtering...");

    let summary = run_check(&linter, &options)?;

    for line in check_lines(&summary) {
        println!("{}", line);
    }

    if let Some(path) = &args.github_output {
        append_github_output(path, &check_outputs(&summary))
            .wrap_err_with(|| format!("failed to write {}", path.display()))?;
    }

    if args.json {
        println!("{}", to_json(&summary));
    }

    // The workflow reads exit_code from stdout; only fail when asked to
    if args.fail_on_issues && summary.exit_code != 0 {
        std::process::exit(summary.exit_code);
    }

    Ok(())
}
