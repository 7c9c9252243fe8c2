use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use blogcheck_lib::config::{self, Config};
use blogcheck_lib::exit_codes;
use blogcheck_lib::file_processor::{FileProcessor, FileReport, discover_markdown_files};
use blogcheck_lib::output::{OutputFormat, Reporter, format_all_as_json};

#[derive(Parser)]
#[command(author, version, about, long_about = None, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    check: CheckArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Check Markdown posts (the default when no command is given)
    Check(CheckArgs),
    /// Write a default .blogcheck.toml in the current directory
    Init,
}

#[derive(Args, Clone)]
struct CheckArgs {
    /// Files or directories to check. Defaults to the configured root (source/_posts)
    paths: Vec<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Do not look for a .blogcheck.toml in the current directory
    #[arg(long, conflicts_with = "config")]
    no_config: bool,

    /// Accept indented code fences as long as open and close match
    #[arg(long)]
    allow_code_indent: bool,

    /// Exclude specific files or directories (comma-separated glob patterns)
    #[arg(long)]
    exclude: Option<String>,

    /// Check .gitignore'd files too
    #[arg(long)]
    no_respect_gitignore: bool,

    /// Skip the categories and tags check
    #[arg(long)]
    no_front_matter: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output_format: OutputFormat,

    /// Number of findings printed in full before switching to per-file counts
    #[arg(long)]
    max_errors: Option<usize>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Only print per-file counts
    #[arg(short, long)]
    quiet: bool,

    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Apply command-line flags on top of the loaded configuration
fn apply_cli_overrides(config: &mut Config, args: &CheckArgs) {
    if args.allow_code_indent {
        config.global.allow_code_indent = true;
    }
    if let Some(exclude) = &args.exclude {
        config.global.exclude.extend(
            exclude
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from),
        );
    }
    if args.no_respect_gitignore {
        config.global.respect_gitignore = false;
    }
    if args.no_front_matter {
        config.front_matter.enabled = false;
    }
    if let Some(max_errors) = args.max_errors {
        config.global.max_shown_errors = max_errors;
    }
}

fn run_check(args: &CheckArgs) -> anyhow::Result<i32> {
    let mut config = Config::load(args.config.as_deref(), args.no_config)?;
    apply_cli_overrides(&mut config, args);
    log::debug!("Effective configuration: {config:?}");

    let paths = if args.paths.is_empty() {
        vec![config.global.root.clone()]
    } else {
        args.paths.clone()
    };

    let files = discover_markdown_files(&paths, &config)?;
    let processor = FileProcessor::from_config(&config)?;

    let mut reports: Vec<FileReport> = Vec::with_capacity(files.len());
    let mut tool_errors = 0;
    for result in processor.process_files(&files) {
        match result {
            Ok(report) => reports.push(report),
            Err(err) => {
                eprintln!("{}: {err}", "error".red().bold());
                tool_errors += 1;
            }
        }
    }

    let use_colors = !args.no_color && io::stdout().is_terminal();
    if !use_colors {
        colored::control::set_override(false);
    }

    let total = match args.output_format.create_formatter(use_colors) {
        Some(formatter) => {
            let mut reporter = Reporter::new(formatter, io::stdout().lock(), config.global.max_shown_errors);
            if args.quiet {
                reporter = reporter.counts_only();
            }
            for report in &reports {
                reporter.report_file(report)?;
            }
            reporter.finish()?;
            reporter.total()
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", format_all_as_json(&reports))?;
            reports.iter().map(FileReport::finding_count).sum()
        }
    };

    Ok(exit_codes::for_run(total, tool_errors))
}

fn run_init() -> anyhow::Result<i32> {
    config::create_default_config(config::CONFIG_FILE_NAME)
        .with_context(|| format!("Could not create {}", config::CONFIG_FILE_NAME))?;
    println!("Created {}", config::CONFIG_FILE_NAME);
    Ok(exit_codes::SUCCESS)
}

fn main() {
    let cli = Cli::parse();

    let verbose = match &cli.command {
        Some(Commands::Check(args)) => args.verbose,
        _ => cli.check.verbose,
    };
    init_logging(verbose);

    let result = match &cli.command {
        Some(Commands::Init) => run_init(),
        Some(Commands::Check(args)) => run_check(args),
        None => run_check(&cli.check),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{}: {err:#}", "error".red().bold());
            std::process::exit(exit_codes::TOOL_ERROR);
        }
    }
}
