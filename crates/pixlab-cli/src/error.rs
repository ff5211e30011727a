//! Error type for command parsing and execution.

use std::path::PathBuf;

use pixlab_io::IoError;
use pixlab_ops::OpsError;
use thiserror::Error;

/// Why a command line could not be carried out.
///
/// Every variant is reported as a status string; none ends the session.
#[derive(Debug, Error)]
pub enum CommandError {
    /// First word is not a known command.
    #[error("unknown command: {0}")]
    Unknown(String),

    /// Wrong number or shape of arguments.
    #[error("invalid '{command}' command: usage is '{usage}'")]
    Usage {
        /// Command name
        command: &'static str,
        /// Expected argument layout
        usage: &'static str,
    },

    /// A numeric argument did not parse.
    #[error("invalid {what}: '{value}'")]
    BadNumber {
        /// Which argument
        what: &'static str,
        /// Raw token
        value: String,
    },

    /// A quoted argument was never closed.
    #[error("unterminated quote in: {0}")]
    Unterminated(String),

    /// Scripts nested deeper than the session allows.
    #[error("script nesting deeper than {0} levels")]
    TooDeep(usize),

    /// Script file could not be read.
    #[error("cannot read script {}: {source}", path.display())]
    Script {
        /// Script path
        path: PathBuf,
        /// Underlying failure
        source: std::io::Error,
    },

    /// Operation rejected its parameters.
    #[error(transparent)]
    Ops(#[from] OpsError),

    /// Buffer lookup failed.
    #[error(transparent)]
    Core(#[from] pixlab_core::Error),

    /// Loading or saving failed.
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Result type for command handling.
pub type CommandResult<T> = Result<T, CommandError>;
