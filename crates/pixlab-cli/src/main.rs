//! pixlab - scriptable raster image editor
//!
//! Runs command scripts, single commands or an interactive session against an
//! in-memory store of named images.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "pixlab")]
#[command(author, version, about = "Scriptable raster image editor")]
#[command(long_about = "
Edits PPM, PNG and JPEG images through a small command language.
Images are loaded into named buffers, transformed into new buffers and saved.

Examples:
  pixlab run edits.txt
  pixlab exec \"load 'koala.ppm' k\" \"sepia k s split 50\" \"save 'koala-sepia.png' s\"
  pixlab repl
  RUST_LOG=pixlab=debug pixlab run edits.txt
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only print failed commands
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Exit with an error if any command fails
    #[arg(long, global = true)]
    strict: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a script file, one command per line
    #[command(visible_alias = "r")]
    Run(RunArgs),

    /// Interactive session reading commands from stdin
    Repl,

    /// Execute each argument as one command
    #[command(visible_alias = "x")]
    Exec(ExecArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Script file
    script: PathBuf,
}

#[derive(Args)]
struct ExecArgs {
    /// Commands, e.g. "blur img soft split 50"
    #[arg(required = true, allow_hyphen_values = true)]
    commands: Vec<String>,
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Suppress successful statuses.
    pub quiet: bool,
    /// Fail the process when any command fails.
    pub strict: bool,
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default = match (quiet, verbose) {
        (true, _) => "pixlab=error",
        (false, 0) => "pixlab=warn",
        (false, 1) => "pixlab=info",
        (false, 2) => "pixlab=debug",
        _ => "pixlab=trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(fmt::layer().without_time().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let opts = Options {
        quiet: cli.quiet,
        strict: cli.strict,
    };
    match cli.command {
        Commands::Run(args) => commands::run::run(args, opts),
        Commands::Repl => commands::repl::run(opts),
        Commands::Exec(args) => commands::exec::run(args, opts),
    }
}
