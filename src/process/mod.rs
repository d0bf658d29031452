//! File and stream processing.
//!
//! This module connects inputs to the engine:
//! - [`format_file`]: reads a text block, applies reconstruction (optionally
//!   gated by detection) and writes the result
//! - [`review_file`]: reviews a JSON batch of quiz items field by field
//! - [`detect_file`]: reports which code triggers fire in an input

pub mod pipeline;

pub use pipeline::{detect_file, format_file, format_text, review_file, DetectReport, FormatOutcome};
