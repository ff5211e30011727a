//! Command dispatcher.
//!
//! A [`Session`] owns the buffer store and the file codec. Each command line
//! resolves its sources from the store, runs one operation and publishes the
//! result under the destination name. Failures become a [`Status`]; the
//! session always stays usable for the next command.

use std::fmt;
use std::fs;
use std::path::Path;

use pixlab_core::BufferStore;
use pixlab_io::{FileCodec, ImageReader, ImageWriter};
use pixlab_ops::{color, correct, filter, histogram, levels, transform, wavelet};
#[allow(unused_imports)]
use tracing::{debug, info, trace, warn};

use crate::command::{Axis, Command, Filter};
use crate::error::{CommandError, CommandResult};

/// Deepest allowed chain of scripts running scripts.
pub const MAX_SCRIPT_DEPTH: usize = 16;

/// Status text of a successful command.
pub const SUCCESS: &str = "Operation Successful";

/// Outcome of one command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Completed.
    Success,
    /// Completed, with an anomaly worth reporting.
    Warning(String),
    /// Rejected; the store is unchanged.
    Failed(String),
}

impl Status {
    /// True unless the command failed.
    pub fn is_ok(&self) -> bool {
        !matches!(self, Status::Failed(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Success => f.write_str(SUCCESS),
            Status::Warning(msg) => write!(f, "{} (warning: {})", SUCCESS, msg),
            Status::Failed(msg) => f.write_str(msg),
        }
    }
}

/// Totals for a script run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptReport {
    /// Command lines executed (comments and blank lines excluded).
    pub executed: usize,
    /// Lines that ended in [`Status::Failed`].
    pub failed: usize,
}

/// A store plus the codec used by `load` and `save`.
#[derive(Debug)]
pub struct Session<C = FileCodec> {
    store: BufferStore,
    codec: C,
    depth: usize,
}

impl Session<FileCodec> {
    /// Session backed by the filesystem.
    pub fn new() -> Self {
        Self::with_codec(FileCodec::default())
    }
}

impl Default for Session<FileCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ImageReader + ImageWriter> Session<C> {
    /// Session using `codec` for file access.
    pub fn with_codec(codec: C) -> Self {
        Self {
            store: BufferStore::new(),
            codec,
            depth: 0,
        }
    }

    /// Named buffers produced so far.
    pub fn store(&self) -> &BufferStore {
        &self.store
    }

    /// Mutable access for callers that seed buffers directly.
    pub fn store_mut(&mut self) -> &mut BufferStore {
        &mut self.store
    }

    /// The codec used for file access.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Parses and runs one command line.
    pub fn execute(&mut self, line: &str) -> Status {
        trace!(line, "execute");
        let outcome = Command::parse_line(line).and_then(|command| self.dispatch(&command));
        match outcome {
            Ok(None) => Status::Success,
            Ok(Some(warning)) => Status::Warning(warning),
            Err(err) => {
                debug!(line, error = %err, "command failed");
                Status::Failed(err.to_string())
            }
        }
    }

    /// Runs a parsed command. `Ok(Some(_))` carries a non-fatal warning.
    ///
    /// Sources are resolved before any work, and results are published only
    /// after every output is computed.
    pub fn dispatch(&mut self, command: &Command) -> CommandResult<Option<String>> {
        debug!(%command, "dispatch");
        match command {
            Command::Load { path, name } => {
                let image = self.codec.read(path)?;
                self.store.put(name.as_str(), image);
            }
            Command::Save { path, name } => {
                let image = self.store.get(name)?;
                self.codec.write(path, &image)?;
            }
            Command::Flip { axis, src, dst } => {
                let image = self.store.get(src)?;
                let out = match axis {
                    Axis::Horizontal => transform::flip_h(&image),
                    Axis::Vertical => transform::flip_v(&image),
                };
                self.store.put(dst.as_str(), out);
            }
            Command::Filter { filter: which, src, dst, split } => {
                let image = self.store.get(src)?;
                let out = match which {
                    Filter::Blur => filter::blur(&image, *split),
                    Filter::Sharpen => filter::sharpen(&image, *split),
                    Filter::Sepia => color::sepia(&image, *split),
                    Filter::Greyscale => color::grayscale(&image, *split),
                    Filter::ColorCorrect => correct::color_correct(&image, *split)?,
                };
                self.store.put(dst.as_str(), out);
            }
            Command::Component { which, src, dst, split } => {
                let image = self.store.get(src)?;
                self.store
                    .put(dst.as_str(), color::extract_component(&image, *which, *split));
            }
            Command::Brighten { delta, src, dst } => {
                let image = self.store.get(src)?;
                self.store.put(dst.as_str(), color::brighten(&image, *delta));
            }
            Command::RgbSplit { src, red, green, blue } => {
                let image = self.store.get(src)?;
                let (r, g, b) = color::rgb_split(&image);
                self.store.put(red.as_str(), r);
                self.store.put(green.as_str(), g);
                self.store.put(blue.as_str(), b);
            }
            Command::RgbCombine { dst, red, green, blue } => {
                let r = self.store.get(red)?;
                let g = self.store.get(green)?;
                let b = self.store.get(blue)?;
                let combined = color::rgb_combine(&r, &g, &b);
                self.store.put(dst.as_str(), combined.image);
                return Ok(combined.mismatch.map(|e| e.to_string()));
            }
            Command::Histogram { src, dst } => {
                let image = self.store.get(src)?;
                self.store.put(dst.as_str(), histogram::plot(&image)?);
            }
            Command::Levels { levels: points, src, dst, split } => {
                let image = self.store.get(src)?;
                self.store
                    .put(dst.as_str(), levels::adjust_levels(&image, *points, *split));
            }
            Command::Compress { percent, src, dst } => {
                let image = self.store.get(src)?;
                self.store.put(dst.as_str(), wavelet::compress(&image, *percent)?);
            }
            Command::Run { path } => {
                let report = self.run_script_with(path, |line_no, line, status| {
                    info!(line_no, line, %status, "nested script");
                })?;
                if report.failed > 0 {
                    return Ok(Some(format!(
                        "{} of {} commands in {} failed",
                        report.failed,
                        report.executed,
                        path.display()
                    )));
                }
            }
        }
        Ok(None)
    }

    /// Runs a script, reporting each executed line to `report`.
    ///
    /// Blank lines and lines starting with `#` are skipped. A failing line does
    /// not stop the script.
    ///
    /// # Errors
    ///
    /// Fails only when the script cannot be read or nesting is too deep.
    pub fn run_script_with<P, F>(&mut self, path: P, report: F) -> CommandResult<ScriptReport>
    where
        P: AsRef<Path>,
        F: FnMut(usize, &str, &Status),
    {
        let path = path.as_ref();
        if self.depth >= MAX_SCRIPT_DEPTH {
            return Err(CommandError::TooDeep(MAX_SCRIPT_DEPTH));
        }
        let text = fs::read_to_string(path).map_err(|source| CommandError::Script {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), depth = self.depth, "Running script");

        self.depth += 1;
        let totals = self.run_lines(&text, report);
        self.depth -= 1;
        Ok(totals)
    }

    /// Runs every command line in `text`.
    pub fn run_lines<F>(&mut self, text: &str, mut report: F) -> ScriptReport
    where
        F: FnMut(usize, &str, &Status),
    {
        let mut totals = ScriptReport::default();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let status = self.execute(line);
            totals.executed += 1;
            if !status.is_ok() {
                totals.failed += 1;
            }
            report(idx + 1, line, &status);
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::PathBuf;

    use pixlab_core::PixelBuffer;
    use pixlab_io::{IoError, IoResult};

    use super::*;

    /// Keeps "files" in memory.
    #[derive(Default)]
    struct MemoryCodec {
        files: RefCell<HashMap<PathBuf, PixelBuffer>>,
    }

    impl ImageReader for MemoryCodec {
        fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<PixelBuffer> {
            self.files
                .borrow()
                .get(path.as_ref())
                .cloned()
                .ok_or_else(|| IoError::InvalidFile(format!("no such file: {}", path.as_ref().display())))
        }
    }

    impl ImageWriter for MemoryCodec {
        fn write<P: AsRef<Path>>(&self, path: P, image: &PixelBuffer) -> IoResult<()> {
            self.files
                .borrow_mut()
                .insert(path.as_ref().to_path_buf(), image.clone());
            Ok(())
        }
    }

    fn sample() -> PixelBuffer {
        PixelBuffer::from_rows(&[
            vec![[255, 0, 0], [0, 255, 0]],
            vec![[0, 0, 255], [255, 255, 255]],
        ])
        .unwrap()
    }

    fn session() -> Session<MemoryCodec> {
        let codec = MemoryCodec::default();
        codec.files.borrow_mut().insert("in.ppm".into(), sample());
        let mut session = Session::with_codec(codec);
        assert_eq!(session.execute("load in.ppm img"), Status::Success);
        session
    }

    #[test]
    fn test_status_text() {
        assert_eq!(Status::Success.to_string(), "Operation Successful");
        assert!(Status::Warning("w".into()).to_string().starts_with("Operation Successful"));
        assert!(!Status::Failed("x".into()).is_ok());
    }

    #[test]
    fn test_flip_and_save() {
        let mut s = session();
        assert_eq!(s.execute("vertical-flip img flipped"), Status::Success);
        assert_eq!(s.execute("save 'out dir/flipped.ppm' flipped"), Status::Success);
        let saved = s.codec().files.borrow()[Path::new("out dir/flipped.ppm")].clone();
        assert_eq!(saved.pixel(0, 0), [0, 0, 255]);
        assert_eq!(saved.pixel(1, 1), [0, 255, 0]);
    }

    #[test]
    fn test_brighten() {
        let mut s = session();
        assert_eq!(s.execute("brighten 50 img bright"), Status::Success);
        let out = s.store().get("bright").unwrap();
        assert_eq!(out.pixel(0, 0), [255, 50, 50]);
        assert_eq!(out.pixel(1, 1), [255, 255, 255]);
    }

    #[test]
    fn test_unknown_source_is_reported() {
        let mut s = session();
        let status = s.execute("blur nothing out");
        assert_eq!(status, Status::Failed("image 'nothing' not found".into()));
        assert!(!s.store().contains("out"));
    }

    #[test]
    fn test_bad_parameters_leave_store_untouched() {
        let mut s = session();
        assert!(!s.execute("levels-adjust 200 100 50 img out").is_ok());
        assert!(!s.execute("compress 120 img out").is_ok());
        assert!(!s.execute("sepia img out split -1").is_ok());
        assert!(!s.execute("frobnicate img out").is_ok());
        assert_eq!(s.store().names(), ["img"]);
    }

    #[test]
    fn test_split_and_combine() {
        let mut s = session();
        assert_eq!(s.execute("rgb-split img r g b"), Status::Success);
        assert_eq!(s.execute("rgb-combine back r g b"), Status::Success);
        assert_eq!(s.store().get("back").unwrap(), sample());
    }

    #[test]
    fn test_combine_mismatch_warns() {
        let mut s = session();
        s.store_mut().put("small", PixelBuffer::filled(1, 1, [9, 9, 9]));
        match s.execute("rgb-combine out img small img") {
            Status::Warning(msg) => assert!(msg.contains("size mismatch"), "{}", msg),
            other => panic!("expected warning, got {:?}", other),
        }
        let out = s.store().get("out").unwrap();
        assert_eq!(out.dimensions(), (2, 2));
        assert_eq!(out.pixel(0, 0), [255, 9, 0]);
        assert_eq!(out.pixel(1, 0), [0, 0, 0]);
    }

    #[test]
    fn test_every_filter_runs() {
        let mut s = session();
        for line in [
            "horizontal-flip img a",
            "blur img a split 50",
            "sharpen img a",
            "sepia img a",
            "grayscale img a",
            "greyscale img a split 100",
            "color-correct img a",
            "value-component img a",
            "luma-component img a split 0",
            "histogram img a",
            "levels-adjust 0 128 255 img a",
            "compress 50 img a",
        ] {
            assert_eq!(s.execute(line), Status::Success, "{}", line);
        }
        assert_eq!(s.store().dimensions("a").unwrap(), (2, 2));
    }

    #[test]
    fn test_histogram_size() {
        let mut s = session();
        s.execute("histogram img h");
        assert_eq!(s.store().dimensions("h").unwrap(), (256, 256));
    }

    #[test]
    fn test_run_lines_skips_comments() {
        let mut s = session();
        let mut seen = Vec::new();
        let report = s.run_lines(
            "# comment\n\n  horizontal-flip img a\nblur missing b\n",
            |line_no, _, status| seen.push((line_no, status.is_ok())),
        );
        assert_eq!(report, ScriptReport { executed: 2, failed: 1 });
        assert_eq!(seen, [(3, true), (4, false)]);
    }

    #[test]
    fn test_nested_script() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("inner.txt");
        let mut file = fs::File::create(&script).unwrap();
        writeln!(file, "horizontal-flip img a").unwrap();
        writeln!(file, "blur missing b").unwrap();

        let mut s = session();
        let status = s.execute(&format!("run '{}'", script.display()));
        assert!(matches!(status, Status::Warning(ref m) if m.contains("1 of 2")), "{:?}", status);
        assert!(s.store().contains("a"));
        assert!(!s.execute("-file /no/such/script.txt").is_ok());
    }

    #[test]
    fn test_recursive_script_stops() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("loop.txt");
        fs::write(&script, format!("run '{}'\n", script.display())).unwrap();

        let mut s = session();
        let report = s.run_script_with(&script, |_, _, _| {}).unwrap();
        assert_eq!(report.executed, 1);
        assert_eq!(s.depth, 0);
    }
}
