//! Integration tests for reindent
//!
//! These tests verify that detection, reconstruction, configuration and the
//! processing pipeline work together correctly

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::borrow::Cow;
use std::fs;
use std::io::{BufReader, Cursor};

use reindent::format::{Placement, Rule};
use reindent::parser::count_line_breaks;
use reindent::process::{detect_file, format_file, format_text, review_file, FormatOutcome};
use reindent::quiz::review_batch;
use reindent::{
    needs_formatting, needs_formatting_opt, restore_indentation, restore_indentation_opt,
    restore_indentation_with, trace, Config, IndentOptions, QuizItem,
};

const FIXTURES: &[&str] = &[
    "python_function",
    "brace_block",
    "quiz_question",
    "java_class",
    "markup_script",
    "python_imports",
    "c_loop",
];

/// Assorted inputs, including malformed and hostile ones
const SAMPLES: &[&str] = &[
    "",
    "\n",
    "\n\n\n",
    "x",
    "}}}}",
    "{{{{",
    "}\n{\n}\n}\n",
    "else:\nelif y:\nexcept:\nfinally:",
    "return\nbreak\ncontinue\npass",
    "print(1)\nprint(2)\nA)",
    "def f():\r\n\r\nreturn 1\r\n",
    "   \t  leading and trailing   \t",
    "if (a) {\n} else if (b) {\n} else {\n}",
    "<div>\n<p>hi</p>\n</div>",
    "class A:\ndef b(self):\nfor x in y:\nwhile z:\nif q:\npass",
    "// comment\n;\n{\n// nested\n}",
];

fn fixture(dir: &str, name: &str) -> String {
    let path = format!("tests/fixtures/{dir}/{name}.txt");
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path}: {e}"))
}

fn all_inputs() -> Vec<String> {
    let mut inputs: Vec<String> = SAMPLES.iter().map(|s| (*s).to_string()).collect();
    for name in FIXTURES {
        inputs.push(fixture("in", name));
        inputs.push(fixture("out", name));
    }
    inputs
}

// ============================================================================
// Engine properties
// ============================================================================

#[test]
fn test_line_count_preserved() {
    for input in all_inputs() {
        let output = restore_indentation(&input);
        assert_eq!(
            count_line_breaks(&output),
            count_line_breaks(&input),
            "line breaks changed for {input:?}"
        );
        assert_eq!(output.lines().count(), input.lines().count());
    }
}

#[test]
fn test_idempotent() {
    for input in all_inputs() {
        let once = restore_indentation(&input).into_owned();
        let twice = restore_indentation(&once);
        assert_eq!(twice, once, "not a fixed point for {input:?}");
    }
}

#[test]
fn test_content_preserved_after_trim() {
    for input in all_inputs() {
        let output = restore_indentation(&input);
        let before: Vec<&str> = input.lines().map(str::trim).collect();
        let after: Vec<&str> = output.lines().map(str::trim).collect();
        assert_eq!(before, after, "content changed for {input:?}");
    }
}

#[test]
fn test_counters_never_negative_and_clamp() {
    let traces = trace("}\n}\nx = 1\n{\ny = 2\n}\n}\n", &IndentOptions::default());
    let placements: Vec<Placement> = traces.iter().map(|t| t.placement).collect();
    assert_eq!(
        placements,
        vec![
            Placement::Level(0),
            Placement::Level(0),
            Placement::Level(0),
            Placement::Level(0),
            Placement::Level(1),
            Placement::Level(0),
            Placement::Level(0),
        ]
    );
    assert!(traces.last().unwrap().state.is_top_level());
}

#[test]
fn test_output_has_no_tabs_in_indentation() {
    let input = "def f():\n\tif x:\n\t\treturn 1";
    let output = restore_indentation(input);
    for line in output.lines() {
        let indent: String = line.chars().take_while(|c| c.is_whitespace()).collect();
        assert!(!indent.contains('\t'), "tab left in {line:?}");
        assert_eq!(indent.len() % 4, 0);
    }
}

#[test]
fn test_plain_prose_is_identity() {
    let prose = "Which of the following is a prime number?\n\nA) 4\nB) 6\nC) 7\nD) 9\n";
    assert!(matches!(restore_indentation(prose), Cow::Borrowed(_)));
    assert!(!needs_formatting(prose));
}

#[test]
fn test_absent_input() {
    assert_eq!(restore_indentation_opt(None), None);
    assert!(!needs_formatting_opt(None));
    assert_eq!(restore_indentation(""), "");
}

#[test]
fn test_every_line_is_traced_once() {
    for input in all_inputs() {
        let traces = trace(&input, &IndentOptions::default());
        let expected = if input.is_empty() {
            0
        } else {
            count_line_breaks(&input) + usize::from(!input.ends_with('\n'))
        };
        assert_eq!(traces.len(), expected, "trace length for {input:?}");
        for (i, t) in traces.iter().enumerate() {
            assert_eq!(t.index, i);
        }
    }
}

#[test]
fn test_blank_lines_keep_whitespace() {
    let traces = trace("if x:\n  \t \ny = 1", &IndentOptions::default());
    assert_eq!(traces[1].rule, Rule::Blank);
    assert_eq!(traces[1].placement, Placement::Verbatim);
    assert_eq!(
        restore_indentation("if x:\n  \t \ny = 1"),
        "if x:\n  \t \n    y = 1"
    );
}

#[test]
fn test_mixed_python_and_prose() {
    let input = "Consider:\nfor n in nums:\nif n > 2:\nbreak\nWhat is printed?";
    let expected = "Consider:\nfor n in nums:\n    if n > 2:\n        break\n        What is printed?";
    assert_eq!(restore_indentation(input), expected);
}

#[test]
fn test_width_option_scales_every_level() {
    let input = "for i in a:\nfor j in b:\nx = i + j";
    let out = restore_indentation_with(input, &IndentOptions::with_width(3));
    assert_eq!(out, "for i in a:\n   for j in b:\n      x = i + j");
}

// ============================================================================
// Detection
// ============================================================================

#[test]
fn test_detection_on_fixtures() {
    for name in FIXTURES {
        assert!(
            needs_formatting(&fixture("in", name)),
            "{name} should look like code"
        );
    }
}

#[test]
fn test_detection_false_positive_is_harmless() {
    // "<" fires the detector, but nothing in the text is rearranged
    let text = "Is 3 < 5?";
    assert!(needs_formatting(text));
    assert_eq!(restore_indentation(text), text);
}

// ============================================================================
// Pipeline
// ============================================================================

#[test]
fn test_format_text_with_config() {
    let config = Config {
        indent_width: 2,
        ..Default::default()
    };
    let (out, outcome) = format_text("while x:\nx -= 1", &config);
    assert_eq!(out, "while x:\n  x -= 1");
    assert_eq!(outcome, FormatOutcome::Changed);

    let (out, outcome) = format_text("while x:\n  x -= 1", &config);
    assert_eq!(out, "while x:\n  x -= 1");
    assert_eq!(outcome, FormatOutcome::Unchanged);
}

#[test]
fn test_only_detected_gate() {
    let config = Config {
        only_detected: true,
        ..Default::default()
    };
    let (out, outcome) = format_text("break", &config);
    assert_eq!(out, "break");
    assert_eq!(outcome, FormatOutcome::Skipped);

    let (out, outcome) = format_text("if x:\nbreak", &config);
    assert_eq!(out, "if x:\n    break");
    assert_eq!(outcome, FormatOutcome::Changed);
}

#[test]
fn test_end_to_end_fixture_through_stream() {
    let input = fixture("in", "java_class");
    let reader = BufReader::new(Cursor::new(input.into_bytes()));
    let mut output = Vec::new();
    let outcome = format_file(reader, &mut output, &Config::default(), "java_class.txt").unwrap();
    assert_eq!(outcome, FormatOutcome::Changed);
    assert_eq!(String::from_utf8(output).unwrap(), fixture("out", "java_class"));
}

#[test]
fn test_end_to_end_detect() {
    let reader = BufReader::new(Cursor::new("import os\nprint(os.sep)".as_bytes()));
    let report = detect_file(reader, "q.txt").unwrap();
    assert!(report.code_detected);
    assert_eq!(report.triggers, vec!["print(", "import "]);
}

#[test]
fn test_end_to_end_review_batch() {
    let json = r#"[
        {"text": "What is 2 + 2?", "options": ["3", "4"], "answer": "4"},
        {"question": "def f():\nreturn 4\nprint(f())", "options": ["A) 4", "B) 5"]}
    ]"#;

    let reader = BufReader::new(Cursor::new(json.as_bytes()));
    let mut output = Vec::new();
    let outcome = review_file(reader, &mut output, &Config::default(), "bank.json").unwrap();
    assert_eq!(outcome, FormatOutcome::Changed);
    let out = String::from_utf8(output).unwrap();
    assert!(out.ends_with("]\n"));

    let parsed: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0]["code_detected"], false);
    assert_eq!(parsed[0]["text"], "What is 2 + 2?");
    assert_eq!(parsed[0]["answer"], "4");
    assert_eq!(parsed[1]["code_detected"], true);
    assert_eq!(parsed[1]["text"], "def f():\n    return 4\nprint(f())");
}

#[test]
fn test_review_batch_only_detected() {
    let json = r#"[{"text": "pass the ball", "options": []}]"#;
    let out = review_batch(json, &IndentOptions::default(), true).unwrap();
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed[0]["text"], "pass the ball");
    assert_eq!(parsed[0]["code_detected"], false);
}

#[test]
fn test_quiz_item_trailing_print_is_top_level() {
    let item = QuizItem {
        text: "x = 1\nif x:\nprint(x)".to_string(),
        options: vec!["1".to_string(), "None".to_string()],
        answer: Some("1".to_string()),
    };
    assert!(item.needs_formatting());
    let fixed = item.restored(&IndentOptions::default());
    assert_eq!(fixed.text, "x = 1\nif x:\nprint(x)");
    assert_eq!(fixed.options, item.options);
}

#[test]
fn test_config_file_drives_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("reindent.toml"),
        "indent_width = 2\nanswer_markers = [\"(a)\"]\n",
    )
    .unwrap();
    let file = dir.path().join("q.txt");
    fs::write(&file, "def f():\nprint(1)\n(a) 1\n").unwrap();

    let config = Config::from_discovered_files(&file);
    assert!(config.validate().is_none());
    let (out, _) = format_text("def f():\nreturn 1\nprint(1)\n(a) 1\n", &config);
    assert_eq!(out, "def f():\n  return 1\nprint(1)\n(a) 1\n");
}
