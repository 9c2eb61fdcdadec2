use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use shellcheck_diff::{
    ExtractOptions, LogFormat, extract_shell_info, init_tracing,
    report::{append_github_output, extract_lines, extract_outputs, to_json},
};
use std::path::PathBuf;

/// Find changed shell scripts and the lines a diff added to them
#[derive(Parser, Debug)]
#[command(name = "extract-shell-info")]
#[command(version)]
#[command(about = "Map changed shell scripts to their modified lines", long_about = None)]
struct Args {
    /// Newline-delimited list of changed file paths
    changeset_file: PathBuf,

    /// Unified diff of the change
    diff_file: PathBuf,

    /// Directory the changed paths are relative to
    #[arg(long, default_value = ".")]
    repo_root: PathBuf,

    /// Directory for shell_scripts.txt and modified_lines_map.txt
    #[arg(long, env = "SHELLCHECK_DIFF_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

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

    let options = ExtractOptions {
        changeset: args.changeset_file,
        diff: args.diff_file,
        root: args.repo_root,
        output_dir: args.output_dir,
    };

    let summary = extract_shell_info(&options)?;

    for line in extract_lines(&summary) {
        println!("{}", line);
    }

    if let Some(path) = &args.github_output {
        append_github_output(path, &extract_outputs(&summary))
            .wrap_err_with(|| format!("failed to write {}", path.display()))?;
    }

    if args.json {
        println!("{}", to_json(&summary));
    }

    Ok(())
}
