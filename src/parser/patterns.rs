/// Regex patterns for the line classification rules
///
/// All patterns are compiled once at first use via `LazyLock` and are matched
/// against the trimmed content of a single line, never against the raw line.
///
/// Patterns are case-sensitive: keywords of the supported languages are.
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// Build a regex from a compile-time constant pattern.
///
/// # Panics
///
/// Panics if the pattern is invalid. All patterns in this module are
/// compile-time constants covered by the tests below, and the panic can only
/// occur at first access of the `LazyLock` static.
fn build_re(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .unicode(true)
        .build()
        .unwrap_or_else(|_| panic!("Invalid regex pattern: {pattern}"))
}

// Keyword terminator: whitespace, `:`, `(` or end of line
const KW_END_STR: &str = r"(?:\s|:|\(|$)";

// ===== PYTHON-STYLE BLOCKS =====

/// `def name(...)` / `class Name:` headers
pub static DEFINITION_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^(?:def|class)\s"));

/// Colon-block control keywords. Group 1 is the keyword.
pub static CONTROL_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(&format!(
        r"^(if|elif|else|for|while|try|except|finally|with){KW_END_STR}"
    ))
});

/// Control keywords that continue the block opened by a previous header
pub const SIBLING_KEYWORDS: &[&str] = &["elif", "else", "except", "finally"];

/// `return`, `break`, `continue`, `pass`, `raise`
pub static JUMP_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"^(?:return|break|continue|pass|raise)\b"));

/// Output call at line start
pub static PRINT_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^print\("));

/// `import x` / `from x import y`
pub static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^(?:import|from)\s"));

// ===== STATEMENTS =====

/// Identifier (with member/index access) followed by an assignment-like
/// operator, an increment, or a call parenthesis. Group 1 is the leading
/// identifier so callers can reject control keywords used like calls.
pub static ASSIGNMENT_OR_CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(
        r"^([A-Za-z_$][\w$]*)(?:(?:\.|->|::)[A-Za-z_$][\w$]*|\[[^\]]*\])*(?:\s*(?:\*\*|//|<<|>>|[-+*/%&|^])?=|\s*(?:\+\+|--)|\()",
    )
});

/// Leading identifiers that look like calls but head C-family control blocks
pub const C_CONTROL_KEYWORDS: &[&str] = &["if", "for", "while", "switch", "catch", "else", "do"];

// ===== C-FAMILY BLOCKS =====

/// Declarations that start with a type or modifier keyword
pub static C_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(
        r"^(?:int|void|char|float|double|long|short|unsigned|signed|bool|boolean|byte|string|String|var|let|const|auto|static|public|private|protected|final|struct|enum|union|typedef|interface|func|fn|function)\b",
    )
});

/// `if (`, `while (`, `switch(` ... and bodies opened without a condition
pub static C_CONTROL_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(r"^(?:(?:if|else\s+if|for|while|switch|catch)\s*\(|(?:else|do|try|finally)\s*\{)")
});

/// `Type name(` declarations such as `Node* build(` or `std::string name(`
pub static DECLARATION_CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(r"^[A-Za-z_][\w:<>,\[\]]*[\s*&]+[A-Za-z_][\w:]*\s*\(")
});

// ===== MARKUP =====

/// Opening or closing markup tag at line start
pub static MARKUP_TAG_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^</?[A-Za-z]"));
