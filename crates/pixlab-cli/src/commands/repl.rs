//! Interactive session

use crate::Options;
use anyhow::{Context, Result};
use pixlab_cli::{Session, repl};
#[allow(unused_imports)]
use tracing::trace;

pub fn run(opts: Options) -> Result<()> {
    trace!("repl::run");

    let mut session = Session::new();
    let stdin = std::io::stdin();
    let report = repl::run(&mut session, stdin.lock(), std::io::stdout())
        .context("Failed to read commands")?;

    super::finish(report, opts)
}
