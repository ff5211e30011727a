//! # pixlab-cli
//!
//! Text front end for the pixlab engine: a command grammar, a dispatcher
//! [`Session`] that owns the named buffer store, a script runner and an
//! interactive loop.
//!
//! # Example
//!
//! ```rust
//! use pixlab_cli::{Session, Status};
//! use pixlab_core::PixelBuffer;
//!
//! let mut session = Session::new();
//! session.store_mut().put("img", PixelBuffer::filled(4, 4, [90, 90, 90]));
//! assert_eq!(session.execute("blur img soft split 50"), Status::Success);
//! assert!(session.execute("blur ghost out").to_string().contains("not found"));
//! ```

pub mod command;
pub mod dispatch;
mod error;
pub mod repl;

pub use command::{Command, tokenize};
pub use dispatch::{ScriptReport, Session, Status};
pub use error::{CommandError, CommandResult};
