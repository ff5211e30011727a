//! Script command

use crate::{Options, RunArgs};
use anyhow::{Context, Result};
use pixlab_cli::Session;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: RunArgs, opts: Options) -> Result<()> {
    trace!(script = %args.script.display(), "run::run");

    let mut session = Session::new();
    let report = session
        .run_script_with(&args.script, |line_no, line, status| {
            super::print_status(&format!("{}:{} {}", args.script.display(), line_no, line), status, opts);
        })
        .with_context(|| format!("Failed to run script: {}", args.script.display()))?;

    super::finish(report, opts)
}
