//! Subcommand implementations

pub mod exec;
pub mod repl;
pub mod run;

use anyhow::{Result, bail};
use pixlab_cli::{ScriptReport, Status};
#[allow(unused_imports)]
use tracing::{info, warn};

use crate::Options;

/// Prints one command's status: failures to stderr, the rest to stdout unless quiet.
pub fn print_status(label: &str, status: &Status, opts: Options) {
    if !status.is_ok() {
        eprintln!("{}: {}", label, status);
    } else if !opts.quiet {
        println!("{}: {}", label, status);
    }
}

/// Logs the totals and applies `--strict`.
pub fn finish(report: ScriptReport, opts: Options) -> Result<()> {
    info!(executed = report.executed, failed = report.failed, "Session complete");
    if report.failed > 0 {
        warn!(failed = report.failed, "Some commands failed");
        if opts.strict {
            bail!("{} of {} commands failed", report.failed, report.executed);
        }
    }
    Ok(())
}
