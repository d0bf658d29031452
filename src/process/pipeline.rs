//! Text block processing
//!
//! Reads a whole input, runs detection and reconstruction according to the
//! [`Config`], and writes the result.

use std::borrow::Cow;
use std::io::{BufRead, Write};

use anyhow::Context;
use log::debug;

use crate::config::Config;
use crate::detect::{matched_triggers, needs_formatting};
use crate::format::restore_indentation_with;
use crate::quiz::review_batch;
use crate::Result;

/// Outcome of formatting one input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatOutcome {
    /// Output differs from input
    Changed,
    /// Reconstruction ran and produced identical text
    Unchanged,
    /// Skipped: no code detected and `only_detected` is set
    Skipped,
}

/// Detection summary for one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectReport {
    pub code_detected: bool,
    /// Triggers that fired, in declaration order
    pub triggers: Vec<&'static str>,
}

impl DetectReport {
    /// One-line summary, e.g. `code detected ("def ", "{")`
    #[must_use]
    pub fn summary(&self) -> String {
        if self.code_detected {
            let found: Vec<String> = self.triggers.iter().map(|t| format!("{t:?}")).collect();
            format!("code detected ({})", found.join(", "))
        } else {
            "no code detected".to_string()
        }
    }
}

/// Format one text block according to the config
#[must_use]
pub fn format_text<'a>(text: &'a str, config: &Config) -> (Cow<'a, str>, FormatOutcome) {
    if config.only_detected && !needs_formatting(text) {
        return (Cow::Borrowed(text), FormatOutcome::Skipped);
    }
    let restored = restore_indentation_with(text, &config.indent_options());
    let outcome = match &restored {
        Cow::Borrowed(_) => FormatOutcome::Unchanged,
        Cow::Owned(_) => FormatOutcome::Changed,
    };
    (restored, outcome)
}

/// Read a whole input as UTF-8 text
fn read_input<R: BufRead>(mut input: R, filename: &str) -> Result<String> {
    let mut text = String::new();
    input
        .read_to_string(&mut text)
        .with_context(|| format!("failed to read {filename}"))?;
    Ok(text)
}

/// Format a text file
///
/// Skipped and unchanged inputs are still written, so `output` always holds
/// the full resulting text.
pub fn format_file<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    config: &Config,
    filename: &str,
) -> Result<FormatOutcome> {
    let text = read_input(input, filename)?;
    let (formatted, outcome) = format_text(&text, config);
    debug!("{filename}: {outcome:?}");
    output.write_all(formatted.as_bytes())?;
    Ok(outcome)
}

/// Review a JSON array of quiz items
///
/// The outcome compares the emitted document with the input bytes, so an
/// already reviewed batch reports `Unchanged`.
pub fn review_file<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    config: &Config,
    filename: &str,
) -> Result<FormatOutcome> {
    let text = read_input(input, filename)?;
    let reviewed = review_batch(&text, &config.indent_options(), config.only_detected)
        .with_context(|| format!("{filename} is not a JSON array of quiz items"))?;
    let outcome = if reviewed == text {
        FormatOutcome::Unchanged
    } else {
        FormatOutcome::Changed
    };
    debug!("{filename}: {outcome:?}");
    output.write_all(reviewed.as_bytes())?;
    Ok(outcome)
}

/// Run the detector over an input
pub fn detect_file<R: BufRead>(input: R, filename: &str) -> Result<DetectReport> {
    let text = read_input(input, filename)?;
    Ok(DetectReport {
        code_detected: needs_formatting(&text),
        triggers: matched_triggers(&text),
    })
}
