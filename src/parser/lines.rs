/// Line splitting for text blocks
///
/// Splits a block into [`LineRecord`]s that remember their original
/// terminator, so a block can be rebuilt with exactly the same line breaks.

/// One physical line of a text block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRecord<'a> {
    /// Zero-based position in the block
    pub index: usize,
    /// Line text without its terminator
    pub raw: &'a str,
    /// Line text with surrounding whitespace removed
    pub content: &'a str,
    /// Original terminator: `"\n"`, `"\r\n"`, or `""` for the last line
    pub ending: &'a str,
}

impl LineRecord<'_> {
    /// Whitespace-only lines are passed through untouched
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.content.is_empty()
    }
}

/// Split a block into line records.
///
/// A trailing terminator does not produce an extra empty record: `"a\n"` is
/// one record whose ending is `"\n"`. An empty block has no records.
#[must_use]
pub fn split_lines(text: &str) -> Vec<LineRecord<'_>> {
    text.split_inclusive('\n')
        .enumerate()
        .map(|(index, piece)| {
            let (raw, ending) = if let Some(raw) = piece.strip_suffix("\r\n") {
                (raw, "\r\n")
            } else if let Some(raw) = piece.strip_suffix('\n') {
                (raw, "\n")
            } else {
                (piece, "")
            };
            LineRecord {
                index,
                raw,
                content: raw.trim(),
                ending,
            }
        })
        .collect()
}

/// Find the first non-blank line after `index`
#[must_use]
pub fn next_non_blank<'a>(records: &[LineRecord<'a>], index: usize) -> Option<&'a str> {
    records
        .iter()
        .skip(index + 1)
        .find(|record| !record.is_blank())
        .map(|record| record.content)
}

/// Count line breaks in a block
#[must_use]
pub fn count_line_breaks(text: &str) -> usize {
    text.matches('\n').count()
}
