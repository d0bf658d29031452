//! Text block reading utilities.
//!
//! This module provides the infrastructure shared by the classifier and the
//! reconstructor:
//! - [`lines`]: Splits a block into [`LineRecord`]s that keep their original
//!   terminators, so output has exactly the input's line breaks
//! - [`patterns`]: Precompiled regex patterns for the line classification rules

pub mod lines;
pub mod patterns;

pub use lines::{count_line_breaks, next_non_blank, split_lines, LineRecord};
