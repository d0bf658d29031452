/// Indentation reconstruction for code embedded in question text
///
/// A single forward pass over the lines of a block. Each non-blank line is
/// classified against an ordered rule list; the first matching rule decides
/// the indentation of that line and how [`IndentState`] changes for the lines
/// that follow. Rule order matters: many lines match more than one rule.
///
/// There is no parser behind this and no error path. Unbalanced or unknown
/// constructs degrade to imperfect indentation, never to a failure.
use std::borrow::Cow;

use log::trace;

use crate::parser::lines::{next_non_blank, split_lines, LineRecord};
use crate::parser::patterns::{
    ASSIGNMENT_OR_CALL_RE, CONTROL_RE, C_CONTROL_KEYWORDS, C_CONTROL_RE, C_TYPE_RE,
    DECLARATION_CALL_RE, DEFINITION_RE, IMPORT_RE, JUMP_RE, MARKUP_TAG_RE, PRINT_RE,
    SIBLING_KEYWORDS,
};

/// Spaces per indentation unit
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Answer-option prefixes that mark the end of top-level code
pub const DEFAULT_ANSWER_MARKERS: &[&str] = &["A)", "B)", "C)", "D)"];

/// Pre-allocated spaces for indentation
const SPACES: &str = "                                                                ";

/// Per-call settings for the reconstructor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentOptions {
    /// Number of spaces in one indentation unit
    pub indent_width: usize,
    /// A `print(` call followed by a line starting with one of these
    /// prefixes is treated as top-level driver code
    pub answer_markers: Vec<String>,
}

impl Default for IndentOptions {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            answer_markers: DEFAULT_ANSWER_MARKERS
                .iter()
                .map(|m| (*m).to_string())
                .collect(),
        }
    }
}

impl IndentOptions {
    /// Default options with a custom indentation width
    #[must_use]
    pub fn with_width(indent_width: usize) -> Self {
        Self {
            indent_width,
            ..Self::default()
        }
    }

    fn is_answer_marker(&self, content: &str) -> bool {
        self.answer_markers
            .iter()
            .any(|marker| !marker.is_empty() && content.starts_with(marker.as_str()))
    }
}

/// Running nesting counters, local to one call
///
/// Both counters are unsigned and only ever decremented with saturating
/// arithmetic, so a stray closer clamps at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndentState {
    /// Nesting depth of colon-style blocks
    pub indent_level: usize,
    /// Nesting depth of `{`/`}` blocks
    pub brace_depth: usize,
}

impl IndentState {
    /// Level for a statement inside whatever block is open
    #[must_use]
    pub fn block_level(self) -> usize {
        self.indent_level.max(usize::from(self.brace_depth > 0))
    }

    #[must_use]
    pub fn is_top_level(self) -> bool {
        self.indent_level == 0 && self.brace_depth == 0
    }

    fn open_brace(&mut self) {
        self.indent_level += 1;
        self.brace_depth += 1;
    }

    fn close_brace(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
        self.brace_depth = self.brace_depth.saturating_sub(1);
    }
}

/// Classification rules, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// `def`/`class` header
    DefinitionHeader,
    /// `if`/`elif`/`else`/`for`/`while`/`try`/`except`/`finally`/`with`
    ControlKeyword,
    /// `return`/`break`/`continue`/`pass`/`raise`
    JumpStatement,
    /// `print(` at line start
    PrintCall,
    /// `import`/`from`
    Import,
    AssignmentOrCall,
    /// Type keyword, `if (`-style header, or `Type name(` declaration
    CFamilyHeader,
    ClosingBrace,
    OpeningBrace,
    /// Ends with `;` or starts with `//`
    Terminator,
    MarkupTag,
    Default,
    /// Whitespace-only line, copied verbatim
    Blank,
}

/// Where a line ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Trimmed content prefixed with this many indentation units
    Level(usize),
    /// Original line, untouched
    Verbatim,
}

/// Decision record for one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineTrace {
    /// Zero-based line index
    pub index: usize,
    pub rule: Rule,
    pub placement: Placement,
    /// Counters after this line was processed
    pub state: IndentState,
}

/// Reconstruct indentation with the default options.
///
/// Empty input is returned borrowed and unchanged.
#[must_use]
pub fn restore_indentation(text: &str) -> Cow<'_, str> {
    restore_indentation_with(text, &IndentOptions::default())
}

/// Reconstruct indentation for optional input; `None` stays `None`
#[must_use]
pub fn restore_indentation_opt(text: Option<&str>) -> Option<Cow<'_, str>> {
    text.map(restore_indentation)
}

/// Reconstruct indentation with explicit options
#[must_use]
pub fn restore_indentation_with<'a>(text: &'a str, options: &IndentOptions) -> Cow<'a, str> {
    if text.is_empty() {
        return Cow::Borrowed(text);
    }

    let records = split_lines(text);
    let unit = indent_unit(options.indent_width);
    let mut output = String::with_capacity(text.len() + text.len() / 4);

    walk(&records, options, |record, line| {
        match line.placement {
            Placement::Verbatim => output.push_str(record.raw),
            Placement::Level(level) => {
                for _ in 0..level {
                    output.push_str(&unit);
                }
                output.push_str(record.content);
            }
        }
        output.push_str(record.ending);
    });

    if output == text {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(output)
    }
}

/// Classify every line without building the output
#[must_use]
pub fn trace(text: &str, options: &IndentOptions) -> Vec<LineTrace> {
    let records = split_lines(text);
    let mut traces = Vec::with_capacity(records.len());
    walk(&records, options, |_, line| traces.push(line));
    traces
}

/// Fold over the records, threading one `IndentState` through the lines
fn walk<F>(records: &[LineRecord<'_>], options: &IndentOptions, mut emit: F)
where
    F: FnMut(&LineRecord<'_>, LineTrace),
{
    let mut state = IndentState::default();

    for record in records {
        let (rule, placement) = if record.is_blank() {
            (Rule::Blank, Placement::Verbatim)
        } else {
            let upcoming = next_non_blank(records, record.index);
            classify_line(record.content, upcoming, &mut state, options)
        };

        trace!(
            "line {}: {rule:?} -> {placement:?} (indent_level={}, brace_depth={})",
            record.index + 1,
            state.indent_level,
            state.brace_depth
        );

        emit(
            record,
            LineTrace {
                index: record.index,
                rule,
                placement,
                state,
            },
        );
    }
}

/// Apply the first matching rule to one trimmed, non-blank line.
///
/// `upcoming` is the next non-blank line, used only by the `print(` lookahead.
fn classify_line(
    content: &str,
    upcoming: Option<&str>,
    state: &mut IndentState,
    options: &IndentOptions,
) -> (Rule, Placement) {
    // 1. def/class header: always top level
    if DEFINITION_RE.is_match(content) {
        state.indent_level = usize::from(content.ends_with(':'));
        return (Rule::DefinitionHeader, Placement::Level(0));
    }

    // 2. colon-style control keyword
    if let Some(keyword) = python_control_keyword(content) {
        let opens_block = content.ends_with(':');
        if SIBLING_KEYWORDS.contains(&keyword) {
            // elif/else/except/finally line up with the header they follow
            let level = state.indent_level.saturating_sub(1);
            if opens_block {
                state.indent_level = level + 1;
            }
            return (Rule::ControlKeyword, Placement::Level(level));
        }
        let level = state.indent_level;
        if opens_block {
            state.indent_level += 1;
        }
        return (Rule::ControlKeyword, Placement::Level(level));
    }

    // 3. jumps never sit at top level
    if JUMP_RE.is_match(content) {
        return (
            Rule::JumpStatement,
            Placement::Level(state.indent_level.max(1)),
        );
    }

    // 4. print(: top-level driver call if nothing but answer options follows
    if PRINT_RE.is_match(content) {
        let top_level = upcoming.is_none_or(|next| options.is_answer_marker(next));
        if top_level {
            state.indent_level = 0;
            return (Rule::PrintCall, Placement::Level(0));
        }
        return (Rule::PrintCall, Placement::Level(state.indent_level.max(1)));
    }

    // 5. imports
    if IMPORT_RE.is_match(content) {
        state.indent_level = 0;
        return (Rule::Import, Placement::Level(0));
    }

    // 6. assignment or call
    if is_assignment_or_call(content) {
        return (
            Rule::AssignmentOrCall,
            Placement::Level(state.indent_level),
        );
    }

    // 7. C-family declaration or control header
    if is_c_family_header(content) {
        let level = state.indent_level;
        if content.contains('{') {
            state.open_brace();
        }
        return (Rule::CFamilyHeader, Placement::Level(level));
    }

    // 8. closing brace dedents before it is placed
    if content.contains('}') {
        state.close_brace();
        let level = state.indent_level;
        // `} else {` reopens the block it just closed
        if content.ends_with('{') {
            state.open_brace();
        }
        return (Rule::ClosingBrace, Placement::Level(level));
    }

    // 9. lone opening brace
    if content == "{" {
        let level = state.indent_level;
        state.open_brace();
        return (Rule::OpeningBrace, Placement::Level(level));
    }

    // 10. statement terminator or line comment
    if content.ends_with(';') || content.starts_with("//") {
        return (Rule::Terminator, Placement::Level(state.block_level()));
    }

    // 11. markup: tag nesting is not tracked
    if MARKUP_TAG_RE.is_match(content) {
        return (Rule::MarkupTag, Placement::Level(state.indent_level));
    }

    // 12. anything else
    if state.is_top_level() {
        (Rule::Default, Placement::Verbatim)
    } else {
        (Rule::Default, Placement::Level(state.block_level()))
    }
}

/// Colon-block keyword at line start, unless the line opens a brace block
fn python_control_keyword(content: &str) -> Option<&'static str> {
    if content.ends_with('{') {
        return None;
    }
    let caps = CONTROL_RE.captures(content)?;
    let keyword = caps.get(1)?.as_str();
    SIBLING_KEYWORDS
        .iter()
        .chain(["if", "for", "while", "try", "with"].iter())
        .find(|kw| **kw == keyword)
        .copied()
}

fn is_assignment_or_call(content: &str) -> bool {
    ASSIGNMENT_OR_CALL_RE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .is_some_and(|ident| !C_CONTROL_KEYWORDS.contains(&ident.as_str()))
}

fn is_c_family_header(content: &str) -> bool {
    C_TYPE_RE.is_match(content)
        || C_CONTROL_RE.is_match(content)
        || DECLARATION_CALL_RE.is_match(content)
}

fn indent_unit(width: usize) -> Cow<'static, str> {
    if width <= SPACES.len() {
        Cow::Borrowed(&SPACES[..width])
    } else {
        Cow::Owned(" ".repeat(width))
    }
}
