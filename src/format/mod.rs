//! Indentation reconstruction.
//!
//! This module contains the line-by-line transform:
//! - [`indenter`]: Ordered rule chain that assigns each line a nesting level
//!   from its trimmed content, threading an [`IndentState`] through the block

pub mod indenter;

pub use indenter::{
    restore_indentation, restore_indentation_opt, restore_indentation_with, trace,
    IndentOptions, IndentState, LineTrace, Placement, Rule, DEFAULT_ANSWER_MARKERS,
    DEFAULT_INDENT_WIDTH,
};
