//! Code detection for question text
//!
//! A cheap substring check that decides whether a text block looks like it
//! contains source code. It only drives UI affordances ("code detected",
//! "fix indentation"); nothing is ever blocked on its answer.

/// Literal substrings that suggest embedded code.
///
/// Matching is plain containment, not whole-word.
pub const TRIGGERS: &[&str] = &[
    "def ",
    "if ",
    "for ",
    "while ",
    "class ",
    "function ",
    "{",
    "}",
    "<",
    ">",
    "    ",
    "\t",
    "print(",
    "import ",
    "from ",
    "return ",
];

/// Check if a block should be offered indentation repair
#[must_use]
pub fn needs_formatting(text: &str) -> bool {
    !text.is_empty() && TRIGGERS.iter().any(|trigger| text.contains(trigger))
}

/// Same as [`needs_formatting`]; absent text is never code
#[must_use]
pub fn needs_formatting_opt(text: Option<&str>) -> bool {
    text.is_some_and(needs_formatting)
}

/// All triggers found in `text`, in declaration order
#[must_use]
pub fn matched_triggers(text: &str) -> Vec<&'static str> {
    TRIGGERS
        .iter()
        .copied()
        .filter(|trigger| text.contains(trigger))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_absent() {
        assert!(!needs_formatting(""));
        assert!(!needs_formatting_opt(None));
        assert!(needs_formatting_opt(Some("x = {}")));
    }

    #[test]
    fn test_prose_not_detected() {
        assert!(!needs_formatting("What is the capital of France?"));
        assert!(matched_triggers("What is the capital of France?").is_empty());
    }

    #[test]
    fn test_python_keywords() {
        assert!(needs_formatting("def add(a, b):"));
        assert!(needs_formatting("x = 3 if y else 4"));
        assert!(needs_formatting("class Node:"));
        assert!(needs_formatting("print(x)"));
        assert!(needs_formatting("return x"));
    }

    #[test]
    fn test_substring_not_whole_word() {
        // "motif " ends with "if "
        assert!(needs_formatting("The motif repeats"));
    }

    #[test]
    fn test_whitespace_triggers() {
        assert!(needs_formatting("a\tb"));
        assert!(needs_formatting("    indented"));
        assert!(!needs_formatting("   three"));
    }

    #[test]
    fn test_markup_and_braces() {
        assert!(needs_formatting("<p>Hello</p>"));
        assert!(needs_formatting("int main() {"));
        assert!(needs_formatting("2 > 1"));
    }

    #[test]
    fn test_each_trigger_fires_alone() {
        for trigger in TRIGGERS {
            assert!(needs_formatting(trigger), "{trigger:?} did not fire");
            assert_eq!(matched_triggers(trigger), vec![*trigger]);
        }
    }

    #[test]
    fn test_loop_and_function_keywords() {
        assert_eq!(matched_triggers("for each item"), vec!["for "]);
        assert_eq!(matched_triggers("while waiting"), vec!["while "]);
        assert_eq!(matched_triggers("function add(a, b)"), vec!["function "]);
        assert_eq!(matched_triggers("end }"), vec!["}"]);
        assert!(!needs_formatting("forward, meanwhile, functional"));
    }

    #[test]
    fn test_matched_triggers_order() {
        let found = matched_triggers("from x import y\nif y:\n    print(y)");
        assert_eq!(found, vec!["if ", "    ", "print(", "import ", "from "]);
    }
}
