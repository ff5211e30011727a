//! Command grammar.
//!
//! A command line is split into words by [`tokenize`] and turned into a typed
//! [`Command`] by [`Command::parse`]. Parsing validates every numeric argument
//! (split percentages, levels points, brightness deltas) so execution never
//! starts with bad parameters.
//!
//! ```text
//! load 'images/koala.ppm' koala
//! blur koala koala-blur split 50
//! levels-adjust 20 100 230 koala koala-levels
//! save 'out/koala levels.png' koala-levels
//! ```

use std::fmt;
use std::path::PathBuf;

use pixlab_ops::{Component, Levels, Split};

use crate::error::{CommandError, CommandResult};

/// Splits a line into words. Single- or double-quoted words may hold spaces.
///
/// ```rust
/// use pixlab_cli::command::tokenize;
///
/// let words = tokenize("load 'my images/a.ppm' a").unwrap();
/// assert_eq!(words, ["load", "my images/a.ppm", "a"]);
/// ```
pub fn tokenize(line: &str) -> CommandResult<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut started = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '\'' || ch == '"' => {
                quote = Some(ch);
                started = true;
            }
            None if ch.is_whitespace() => {
                if started {
                    words.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            None => {
                current.push(ch);
                started = true;
            }
        }
    }
    if quote.is_some() {
        return Err(CommandError::Unterminated(line.to_string()));
    }
    if started {
        words.push(current);
    }
    Ok(words)
}

/// Mirror axis for the flip commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Left-right mirror.
    Horizontal,
    /// Top-bottom mirror.
    Vertical,
}

/// Whole-image filters that take `src dst [split P]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// 3x3 blur.
    Blur,
    /// 5x5 sharpen.
    Sharpen,
    /// Sepia tone.
    Sepia,
    /// Rec.709 grayscale.
    Greyscale,
    /// Histogram-peak color correction.
    ColorCorrect,
}

/// A parsed command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Read a file into the store.
    Load { path: PathBuf, name: String },
    /// Write a stored buffer to a file.
    Save { path: PathBuf, name: String },
    /// Mirror an image.
    Flip { axis: Axis, src: String, dst: String },
    /// Run a split-capable filter.
    Filter { filter: Filter, src: String, dst: String, split: Split },
    /// Extract one component.
    Component { which: Component, src: String, dst: String, split: Split },
    /// Add a constant to every channel.
    Brighten { delta: i32, src: String, dst: String },
    /// Split into red, green and blue images.
    RgbSplit { src: String, red: String, green: String, blue: String },
    /// Combine red, green and blue images.
    RgbCombine { dst: String, red: String, green: String, blue: String },
    /// Render a histogram plot.
    Histogram { src: String, dst: String },
    /// Three-point levels adjustment.
    Levels { levels: Levels, src: String, dst: String, split: Split },
    /// Haar wavelet compression.
    Compress { percent: f64, src: String, dst: String },
    /// Execute a script in the current session.
    Run { path: PathBuf },
}

/// Every command word with its argument layout, for help output.
pub const USAGE: &[(&str, &str)] = &[
    ("load", "load 'path' name"),
    ("save", "save 'path' name"),
    ("horizontal-flip", "horizontal-flip src dst"),
    ("vertical-flip", "vertical-flip src dst"),
    ("blur", "blur src dst [split P]"),
    ("sharpen", "sharpen src dst [split P]"),
    ("sepia", "sepia src dst [split P]"),
    ("greyscale", "greyscale src dst [split P]"),
    ("color-correct", "color-correct src dst [split P]"),
    ("red-component", "red-component src dst [split P]"),
    ("green-component", "green-component src dst [split P]"),
    ("blue-component", "blue-component src dst [split P]"),
    ("value-component", "value-component src dst [split P]"),
    ("intensity-component", "intensity-component src dst [split P]"),
    ("luma-component", "luma-component src dst [split P]"),
    ("brighten", "brighten delta src dst"),
    ("rgb-split", "rgb-split src dst-red dst-green dst-blue"),
    ("rgb-combine", "rgb-combine dst red green blue"),
    ("histogram", "histogram src dst"),
    ("levels-adjust", "levels-adjust b m w src dst [split P]"),
    ("compress", "compress percent src dst"),
    ("run", "run 'script-path'"),
];

fn usage_of(command: &'static str) -> &'static str {
    USAGE
        .iter()
        .find(|(name, _)| *name == command)
        .map_or(command, |(_, usage)| *usage)
}

/// Argument cursor that turns shape errors into usage errors.
struct Args<'a> {
    command: &'static str,
    rest: &'a [String],
}

impl<'a> Args<'a> {
    fn usage(&self) -> CommandError {
        CommandError::Usage {
            command: self.command,
            usage: usage_of(self.command),
        }
    }

    fn word(&mut self) -> CommandResult<String> {
        let (first, rest) = self.rest.split_first().ok_or_else(|| self.usage())?;
        self.rest = rest;
        Ok(first.clone())
    }

    fn number<T: std::str::FromStr>(&mut self, what: &'static str) -> CommandResult<T> {
        let value = self.word()?;
        value
            .parse()
            .map_err(|_| CommandError::BadNumber { what, value })
    }

    /// Optional trailing `split P`.
    fn split(&mut self) -> CommandResult<Split> {
        match self.rest {
            [] => Ok(Split::NONE),
            [kw, _] if kw == "split" => {
                self.rest = &self.rest[1..];
                let percent: i64 = self.number("split percentage")?;
                Ok(Split::new(percent)?)
            }
            _ => Err(self.usage()),
        }
    }

    fn finish(self) -> CommandResult<()> {
        if self.rest.is_empty() {
            Ok(())
        } else {
            Err(self.usage())
        }
    }
}

impl Command {
    /// Parses a tokenized line.
    ///
    /// # Errors
    ///
    /// [`CommandError::Unknown`] for an unknown command word,
    /// [`CommandError::Usage`] for a wrong argument layout and
    /// [`CommandError::BadNumber`] or [`CommandError::Ops`] for bad numbers.
    pub fn parse(words: &[String]) -> CommandResult<Self> {
        let Some((head, rest)) = words.split_first() else {
            return Err(CommandError::Unknown(String::new()));
        };
        let name: &'static str = match head.as_str() {
            "grayscale" => "greyscale",
            "-file" => "run",
            other => USAGE
                .iter()
                .map(|(name, _)| *name)
                .find(|name| *name == other)
                .ok_or_else(|| CommandError::Unknown(head.clone()))?,
        };
        let mut args = Args { command: name, rest };

        let command = match name {
            "load" | "save" => {
                let path = PathBuf::from(args.word()?);
                let image = args.word()?;
                if name == "load" {
                    Command::Load { path, name: image }
                } else {
                    Command::Save { path, name: image }
                }
            }
            "horizontal-flip" | "vertical-flip" => {
                let axis = if name == "vertical-flip" { Axis::Vertical } else { Axis::Horizontal };
                Command::Flip { axis, src: args.word()?, dst: args.word()? }
            }
            "blur" | "sharpen" | "sepia" | "greyscale" | "color-correct" => {
                let filter = match name {
                    "blur" => Filter::Blur,
                    "sharpen" => Filter::Sharpen,
                    "sepia" => Filter::Sepia,
                    "greyscale" => Filter::Greyscale,
                    _ => Filter::ColorCorrect,
                };
                let (src, dst) = (args.word()?, args.word()?);
                Command::Filter { filter, src, dst, split: args.split()? }
            }
            "brighten" => Command::Brighten {
                delta: args.number("brightness increment")?,
                src: args.word()?,
                dst: args.word()?,
            },
            "rgb-split" => Command::RgbSplit {
                src: args.word()?,
                red: args.word()?,
                green: args.word()?,
                blue: args.word()?,
            },
            "rgb-combine" => Command::RgbCombine {
                dst: args.word()?,
                red: args.word()?,
                green: args.word()?,
                blue: args.word()?,
            },
            "histogram" => Command::Histogram { src: args.word()?, dst: args.word()? },
            "levels-adjust" => {
                let b: i64 = args.number("shadow point")?;
                let m: i64 = args.number("mid point")?;
                let w: i64 = args.number("highlight point")?;
                let levels = Levels::new(b, m, w)?;
                let (src, dst) = (args.word()?, args.word()?);
                Command::Levels { levels, src, dst, split: args.split()? }
            }
            "compress" => Command::Compress {
                percent: args.number("compression percentage")?,
                src: args.word()?,
                dst: args.word()?,
            },
            "run" => Command::Run { path: PathBuf::from(args.word()?) },
            component => {
                // "<which>-component"
                let which = component.trim_end_matches("-component").parse::<Component>()?;
                let (src, dst) = (args.word()?, args.word()?);
                Command::Component { which, src, dst, split: args.split()? }
            }
        };
        args.finish()?;
        Ok(command)
    }

    /// Parses a raw line.
    pub fn parse_line(line: &str) -> CommandResult<Self> {
        Self::parse(&tokenize(line)?)
    }

    /// Buffer names this command reads from the store.
    pub fn sources(&self) -> Vec<&str> {
        match self {
            Command::Save { name, .. } => vec![name],
            Command::Flip { src, .. }
            | Command::Filter { src, .. }
            | Command::Component { src, .. }
            | Command::Brighten { src, .. }
            | Command::RgbSplit { src, .. }
            | Command::Histogram { src, .. }
            | Command::Levels { src, .. }
            | Command::Compress { src, .. } => vec![src],
            Command::RgbCombine { red, green, blue, .. } => vec![red, green, blue],
            Command::Load { .. } | Command::Run { .. } => Vec::new(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Command::Load { .. } => "load",
            Command::Save { .. } => "save",
            Command::Flip { axis: Axis::Horizontal, .. } => "horizontal-flip",
            Command::Flip { axis: Axis::Vertical, .. } => "vertical-flip",
            Command::Filter { filter, .. } => match filter {
                Filter::Blur => "blur",
                Filter::Sharpen => "sharpen",
                Filter::Sepia => "sepia",
                Filter::Greyscale => "greyscale",
                Filter::ColorCorrect => "color-correct",
            },
            Command::Component { which, .. } => return write!(f, "{}-component", which),
            Command::Brighten { .. } => "brighten",
            Command::RgbSplit { .. } => "rgb-split",
            Command::RgbCombine { .. } => "rgb-combine",
            Command::Histogram { .. } => "histogram",
            Command::Levels { .. } => "levels-adjust",
            Command::Compress { .. } => "compress",
            Command::Run { .. } => "run",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> CommandResult<Command> {
        Command::parse_line(line)
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("  blur  a   b ").unwrap(), ["blur", "a", "b"]);
        assert_eq!(tokenize("save \"x y.png\" z").unwrap(), ["save", "x y.png", "z"]);
        assert_eq!(tokenize("load '' a").unwrap(), ["load", "", "a"]);
        assert!(tokenize("load 'open a").is_err());
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_load_save() {
        assert_eq!(
            parse("load 'res/koala.ppm' koala").unwrap(),
            Command::Load { path: "res/koala.ppm".into(), name: "koala".into() }
        );
        assert!(matches!(parse("save out.png"), Err(CommandError::Usage { command: "save", .. })));
    }

    #[test]
    fn test_parse_split() {
        let cmd = parse("blur a b split 40").unwrap();
        assert_eq!(
            cmd,
            Command::Filter {
                filter: Filter::Blur,
                src: "a".into(),
                dst: "b".into(),
                split: Split::new(40).unwrap(),
            }
        );
        assert!(matches!(parse("sepia a b split 140"), Err(CommandError::Ops(_))));
        assert!(matches!(parse("sepia a b split"), Err(CommandError::Usage { .. })));
        assert!(matches!(parse("sepia a b half 40"), Err(CommandError::Usage { .. })));
        assert!(matches!(parse("sepia a b split x"), Err(CommandError::BadNumber { .. })));
    }

    #[test]
    fn test_parse_components() {
        for which in Component::ALL {
            let line = format!("{}-component src dst split 10", which);
            match parse(&line).unwrap() {
                Command::Component { which: parsed, split, .. } => {
                    assert_eq!(parsed, which);
                    assert_eq!(split.percent(), 10);
                }
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(
            parse("brighten -30 a b").unwrap(),
            Command::Brighten { delta: -30, src: "a".into(), dst: "b".into() }
        );
        assert!(matches!(parse("brighten lots a b"), Err(CommandError::BadNumber { .. })));
        assert!(matches!(parse("levels-adjust 100 50 200 a b"), Err(CommandError::Ops(_))));
        assert!(matches!(parse("compress 12.5 a b").unwrap(), Command::Compress { percent, .. } if percent == 12.5));
    }

    #[test]
    fn test_aliases_and_unknown() {
        assert!(matches!(parse("grayscale a b").unwrap(), Command::Filter { filter: Filter::Greyscale, .. }));
        assert_eq!(parse("-file s.txt").unwrap(), Command::Run { path: "s.txt".into() });
        assert!(matches!(parse("rotate a b"), Err(CommandError::Unknown(w)) if w == "rotate"));
    }

    #[test]
    fn test_trailing_words_rejected() {
        assert!(matches!(parse("histogram a b c"), Err(CommandError::Usage { .. })));
        assert!(matches!(parse("horizontal-flip a b c"), Err(CommandError::Usage { .. })));
    }

    #[test]
    fn test_display_and_sources() {
        let cmd = parse("rgb-combine out r g b").unwrap();
        assert_eq!(cmd.to_string(), "rgb-combine");
        assert_eq!(cmd.sources(), ["r", "g", "b"]);
        assert_eq!(parse("luma-component a b").unwrap().to_string(), "luma-component");
    }
}
