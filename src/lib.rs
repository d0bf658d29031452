//! reindent - Indentation repair for code embedded in quiz question text
//!
//! Question and option text often carries a code snippet whose indentation
//! was lost on the way in (spreadsheet cells, OCR, word processors). This
//! crate offers two pure functions for authoring surfaces:
//! - [`needs_formatting`]: does this text look like it contains code?
//! - [`restore_indentation`]: rebuild a consistent, readable indentation
//!
//! Neither function fails. Absent or empty input is passed through.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod format;
pub mod parser;
pub mod process;
pub mod quiz;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::Config;
pub use detect::{matched_triggers, needs_formatting, needs_formatting_opt};
pub use error::Result;
pub use format::{
    restore_indentation, restore_indentation_opt, restore_indentation_with, trace,
    IndentOptions, IndentState,
};
pub use quiz::QuizItem;
