//! University registration console.
//!
//! Seeds an in-memory directory from `catalog.toml` (via `registrar.toml`) and
//! runs registration commands from stdin or a script file.

use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use registrar::exit_codes;
use registrar::io::config::CONFIG_FILE;
use registrar::io::init::{InitOptions, init_registrar};
use registrar::logging;
use registrar::session::open_session;
use registrar::shell::{ShellOptions, ShellReport, run_shell};
use registrar::validate::validate_setup;

#[derive(Parser)]
#[command(
    name = "registrar",
    version,
    about = "In-memory university course registration"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct SourceArgs {
    /// Config file; defaults are used when it does not exist.
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,
    /// Seed catalog, overriding the config's `catalog` entry.
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Write `registrar.toml` and a sample `catalog.toml` in the current directory.
    Init {
        /// Overwrite existing files.
        #[arg(short, long)]
        force: bool,
    },
    /// Read commands from stdin until EOF or `exit`.
    Shell {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Run commands from a script file.
    Run {
        script: PathBuf,
        #[command(flatten)]
        source: SourceArgs,
        /// Stop at the first failed command.
        #[arg(long)]
        strict: bool,
    },
    /// Check config, catalog and enrollment invariants.
    Validate {
        #[command(flatten)]
        source: SourceArgs,
    },
}

fn main() {
    logging::init();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                let _ = err.print();
                std::process::exit(exit_codes::INVALID);
            }
        },
    };
    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Init { force } => cmd_init(force),
        Command::Shell { source } => cmd_shell(&source),
        Command::Run {
            script,
            source,
            strict,
        } => cmd_run(&script, &source, strict),
        Command::Validate { source } => cmd_validate(&source),
    }
}

fn cmd_init(force: bool) -> Result<i32> {
    let root = std::env::current_dir().context("resolve current directory")?;
    let paths = init_registrar(&root, &InitOptions { force })?;
    println!("wrote {}", paths.config_path.display());
    println!("wrote {}", paths.catalog_path.display());
    Ok(exit_codes::OK)
}

fn cmd_shell(source: &SourceArgs) -> Result<i32> {
    let mut session = open_session(&source.config, source.catalog.as_deref())?;
    let stdin = io::stdin();
    let prompt = stdin.is_terminal().then(|| "registrar> ".to_string());
    let options = ShellOptions {
        strict: false,
        prompt,
    };
    run_shell(
        &mut session.directory,
        &session.config,
        stdin.lock(),
        io::stdout().lock(),
        &options,
    )?;
    Ok(exit_codes::OK)
}

fn cmd_run(script: &Path, source: &SourceArgs, strict: bool) -> Result<i32> {
    let mut session = open_session(&source.config, source.catalog.as_deref())?;
    let file = File::open(script).with_context(|| format!("open script {}", script.display()))?;
    let options = ShellOptions {
        strict: strict || session.config.strict,
        prompt: None,
    };
    let report = run_shell(
        &mut session.directory,
        &session.config,
        BufReader::new(file),
        io::stdout().lock(),
        &options,
    )?;
    info!(
        script = %script.display(),
        executed = report.executed,
        failed = report.failed,
        "script finished"
    );
    Ok(script_exit_code(&report))
}

fn cmd_validate(source: &SourceArgs) -> Result<i32> {
    let outcome = validate_setup(&source.config, source.catalog.as_deref())?;
    println!(
        "ok: {} courses, {} students, {} registrations",
        outcome.stats.courses, outcome.stats.students, outcome.stats.registrations
    );
    Ok(exit_codes::OK)
}

fn script_exit_code(report: &ShellReport) -> i32 {
    if report.failed > 0 {
        exit_codes::REJECTED
    } else {
        exit_codes::OK
    }
}
