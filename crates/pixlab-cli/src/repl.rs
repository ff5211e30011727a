//! Interactive text mode.

use std::io::{self, BufRead, Write};

use pixlab_io::{ImageReader, ImageWriter};

use crate::command::USAGE;
use crate::dispatch::{ScriptReport, Session};

/// Prompt printed before each line.
pub const PROMPT: &str = "pixlab> ";

/// Reads commands from `input` until end of input, `quit` or `exit`, writing
/// one status line per command to `output`.
///
/// `help` lists the command grammar. Blank lines and `#` comments are ignored.
pub fn run<C, R, W>(session: &mut Session<C>, input: R, mut output: W) -> io::Result<ScriptReport>
where
    C: ImageReader + ImageWriter,
    R: BufRead,
    W: Write,
{
    let mut totals = ScriptReport::default();
    let mut lines = input.lines();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let line = line?;
        let line = line.trim();
        match line {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                for (_, usage) in USAGE {
                    writeln!(output, "  {}", usage)?;
                }
                writeln!(output, "  quit")?;
                continue;
            }
            _ if line.starts_with('#') => continue,
            _ => {}
        }

        let status = session.execute(line);
        totals.executed += 1;
        if !status.is_ok() {
            totals.failed += 1;
        }
        writeln!(output, "{}", status)?;
    }
    Ok(totals)
}
