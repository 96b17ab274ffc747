//! TallyDB shell
//!
//! Reads commands from standard input, or from a script file, and runs
//! them against a fresh in-memory database.

use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use tallydb_cli::{OutputFormat, Session, SessionOptions};
use tallydb_core::{Config, Database};
use tracing_subscriber::EnvFilter;

/// In-memory key/value database shell.
#[derive(Parser)]
#[command(name = "tallydb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Run commands from this file instead of standard input
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Do not print the help banner or prompt
    #[arg(short, long)]
    quiet: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output format for SHOW (text, json)
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Prompt printed before each command
    #[arg(long, default_value = ">> ")]
    prompt: String,

    /// Recount the store after every rollback and log mismatches
    #[arg(long)]
    verify: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let db = Database::with_config(Config::new().verify_invariants(cli.verify));
    let stdout = io::stdout();

    match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| format!("cannot open script {}: {e}", path.display()))?;
            let mut session = Session::new(db, SessionOptions::script().format(cli.format));
            session.run(BufReader::new(file), stdout.lock())?;
        }
        None => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal() && !cli.quiet;
            let options = if interactive {
                SessionOptions {
                    prompt: Some(cli.prompt.clone()),
                    show_help: true,
                    format: cli.format,
                }
            } else {
                SessionOptions::script().format(cli.format)
            };
            let mut session = Session::new(db, options);
            session.run(stdin.lock(), stdout.lock())?;
        }
    }

    Ok(())
}
