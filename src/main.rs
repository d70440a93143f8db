//! @dose
//! purpose: This is the CLI entry point for tokcount. It parses arguments, sets up logging,
//!     loads tokcount.toml from the working directory and prints the count report.
//!
//! when-editing:
//!     - !Reports and failure messages go to stdout; diagnostics go to stderr via tracing
//!     - RUST_LOG overrides the default filter (warn, or debug with -v)
//!     - Error::NotFound gets its own message; every other failure shares the generic one
//!
//! invariants:
//!     - The process exits with 0 on success, 1 on any error (including a missing path
//!       or a stdout that can't be written)
//!
//! do-not:
//!     - Never add business logic here - delegate to the count command
//!     - Never panic - always use proper error handling

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use std::env;
use std::fmt::Display;
use std::io::{self, Write};
use std::path::Path;
use tokcount::cli::{Cli, USAGE};
use tokcount::commands::{run_count, CountOptions};
use tokcount::{Config, Error};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            std::process::exit(if e.print().is_ok() { code } else { 1 });
        }
    };

    init_tracing(cli.verbose);

    let Some(path) = cli.path.as_deref() else {
        emit_or_log(USAGE);
        std::process::exit(1);
    };

    if let Err(e) = run(&cli, path) {
        match e.downcast_ref::<Error>() {
            Some(Error::NotFound { .. }) => emit_or_log(format_args!("Error: {}", e)),
            Some(err) => emit_or_log(format_args!("An error occurred: {}", err)),
            None => emit_or_log(format_args!("An error occurred: {:#}", e)),
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli, path: &Path) -> anyhow::Result<()> {
    let cwd = env::current_dir().context("Failed to get current directory")?;
    let config = Config::load(&cwd);
    let options = CountOptions::resolve(cli, &config);
    tracing::debug!(?options, "resolved options");

    let report = run_count(path, &options)?;
    let rendered = if cli.json {
        report.render_json()?
    } else {
        report.render_text()
    };
    emit(rendered).context("Failed to write report")?;
    Ok(())
}

/// Write one line to stdout. A closed stdout is an error, not a panic.
fn emit(line: impl Display) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{}", line)?;
    out.flush()
}

/// Used on paths that already exit 1, where a failed write has nowhere else to go
fn emit_or_log(line: impl Display) {
    if let Err(e) = emit(line) {
        tracing::debug!(error = %e, "failed to write to stdout");
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
