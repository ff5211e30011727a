//! One-shot commands

use crate::{ExecArgs, Options};
use anyhow::Result;
use pixlab_cli::{ScriptReport, Session};
#[allow(unused_imports)]
use tracing::{debug, trace};

pub fn run(args: ExecArgs, opts: Options) -> Result<()> {
    trace!(count = args.commands.len(), "exec::run");

    let mut session = Session::new();
    let mut report = ScriptReport::default();
    for line in &args.commands {
        let status = session.execute(line);
        report.executed += 1;
        if !status.is_ok() {
            report.failed += 1;
        }
        super::print_status(line, &status, opts);
    }
    debug!(buffers = session.store().len(), "exec done");

    super::finish(report, opts)
}
