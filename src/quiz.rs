//! Quiz items for bulk-import review
//!
//! Imported questions arrive as a question text plus answer options. Each
//! field is an independent text block, so each is classified and repaired on
//! its own.

use serde::{Deserialize, Serialize};

use crate::detect::needs_formatting;
use crate::format::{restore_indentation_with, IndentOptions};
use crate::Result;

/// One imported question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    /// Question text, possibly with an embedded snippet
    #[serde(alias = "question")]
    pub text: String,

    /// Answer options, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    /// Correct answer, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

/// A reviewed item with its detection flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewedItem {
    #[serde(flatten)]
    pub item: QuizItem,

    /// Whether any field looked like code before repair
    pub code_detected: bool,
}

impl QuizItem {
    /// Whether the question or any option looks like code
    #[must_use]
    pub fn needs_formatting(&self) -> bool {
        needs_formatting(&self.text) || self.options.iter().any(|o| needs_formatting(o))
    }

    /// Copy of this item with every field repaired
    #[must_use]
    pub fn restored(&self, options: &IndentOptions) -> Self {
        Self {
            text: restore_indentation_with(&self.text, options).into_owned(),
            options: self
                .options
                .iter()
                .map(|o| restore_indentation_with(o, options).into_owned())
                .collect(),
            answer: self.answer.clone(),
        }
    }

    /// Review one item.
    ///
    /// With `only_detected`, items without code are left untouched.
    #[must_use]
    pub fn review(&self, options: &IndentOptions, only_detected: bool) -> ReviewedItem {
        let code_detected = self.needs_formatting();
        let item = if only_detected && !code_detected {
            self.clone()
        } else {
            self.restored(options)
        };
        ReviewedItem {
            item,
            code_detected,
        }
    }
}

/// Review a JSON array of quiz items and return the pretty-printed result
pub fn review_batch(json: &str, options: &IndentOptions, only_detected: bool) -> Result<String> {
    let items: Vec<QuizItem> = serde_json::from_str(json)?;
    let reviewed: Vec<ReviewedItem> = items
        .iter()
        .map(|item| item.review(options, only_detected))
        .collect();
    let mut out = serde_json::to_string_pretty(&reviewed)?;
    out.push('\n');
    Ok(out)
}
