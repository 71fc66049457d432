//! Input sources that feed the game event loop.
//!
//! Current input sources:
//! - `console`: line-based commands from stdin (or any async reader)

pub mod console;

pub use console::{Command, parse_command, spawn_console_reader};
