// src/smells.rs

use crate::model::SmellIndicators;
use std::path::Path;

const LONG_FILE_LINES: usize = 500;
const LONG_LINE_CHARS: usize = 120;
const LONG_FUNCTION_LINES: usize = 50;
const NESTING_BASELINE: u32 = 4;
const INDENT_WIDTH: usize = 4;
const COMMENT_RATIO_MIN_LINES: usize = 20;
const COMMENT_RATIO_THRESHOLD: f64 = 0.05;

/// Line prefixes (after leading whitespace) that count as comments.
const COMMENT_PREFIXES: &[&str] = &["#", "//", "/*", "*", "<!--"];

/// Heuristic function-declaration openers across common languages. A new
/// match closes the previously pending function; no bodies are parsed.
const FUNCTION_PREFIXES: &[&str] = &[
    "def ",
    "function ",
    "fn ",
    "func ",
    "public ",
    "private ",
    "protected ",
    "void ",
    "int ",
    "string ",
    "async ",
];

/// Compute smell indicators and a bounded smell score for one file's text.
///
/// Blank lines (after trailing-whitespace trim) are skipped for every
/// per-line measurement; the total line count still includes them. The score
/// sums independent capped terms and is clamped to [0, 100].
pub fn scan(text: &str) -> (SmellIndicators, u32) {
    let lines: Vec<&str> = text.lines().collect();
    let total_lines = lines.len();

    let mut smells = SmellIndicators {
        long_file: total_lines > LONG_FILE_LINES,
        ..SmellIndicators::default()
    };

    let mut comment_lines = 0usize;
    let mut max_indent = 0u32;
    let mut function_start: Option<usize> = None;
    let mut function_lengths: Vec<usize> = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let stripped = line.trim_end();
        if stripped.is_empty() {
            continue;
        }
        if stripped.chars().count() > LONG_LINE_CHARS {
            smells.long_lines += 1;
        }
        let head = stripped.trim_start();
        if COMMENT_PREFIXES.iter().any(|p| head.starts_with(p)) {
            comment_lines += 1;
        }
        let indent = line.chars().take_while(|c| c.is_whitespace()).count();
        max_indent = max_indent.max((indent / INDENT_WIDTH) as u32);
        if FUNCTION_PREFIXES.iter().any(|p| head.starts_with(p)) {
            if let Some(start) = function_start {
                function_lengths.push(i - start);
            }
            function_start = Some(i);
        }
    }
    // The last function runs to end of file.
    if let Some(start) = function_start {
        function_lengths.push(total_lines - start);
    }

    if max_indent > NESTING_BASELINE {
        smells.deep_nesting = max_indent - NESTING_BASELINE;
    }
    smells.long_functions = function_lengths
        .iter()
        .filter(|&&len| len > LONG_FUNCTION_LINES)
        .count() as u32;
    if total_lines > COMMENT_RATIO_MIN_LINES
        && (comment_lines as f64 / total_lines as f64) < COMMENT_RATIO_THRESHOLD
    {
        smells.low_comments = true;
    }

    let mut score = 0u32;
    if smells.long_file {
        score += 25;
    }
    score += (smells.long_functions * 10).min(30);
    score += (smells.deep_nesting * 5).min(20);
    score += smells.long_lines.min(15);
    if smells.low_comments {
        score += 10;
    }

    (smells, score.min(100))
}

/// Read a file as text, replacing undecodable bytes. `None` only on I/O
/// failure; the caller treats that as "not analyzable" and moves on.
pub fn read_text(path: &Path) -> Option<String> {
    std::fs::read(path)
        .ok()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_has_no_smells() {
        let (smells, score) = scan("");
        assert_eq!(smells, SmellIndicators::default());
        assert_eq!(score, 0);
    }

    #[test]
    fn short_clean_file_scores_zero() {
        let text = "fn main() {\n    println!(\"hi\");\n}\n";
        let (smells, score) = scan(text);
        assert!(!smells.low_comments); // too short for the ratio to apply
        assert_eq!(score, 0);
    }

    #[test]
    fn counts_long_lines_on_trimmed_length() {
        let long = format!("{}   \n", "x".repeat(121));
        let padded = format!("{}\n", "y".repeat(118)); // 118 after trim
        let (smells, _) = scan(&format!("{}{}", long, padded));
        assert_eq!(smells.long_lines, 1);
    }

    #[test]
    fn comment_density_uses_all_prefix_styles() {
        // 25 lines, 2 comments (8%): above the 5% floor
        let mut commented = String::from("    # python\n * continuation\n");
        for _ in 0..23 {
            commented.push_str("code();\n");
        }
        let (smells, _) = scan(&commented);
        assert!(!smells.low_comments);

        // 25 lines, 1 comment (4%): below the floor
        let mut sparse = String::from("<!-- html -->\n");
        for _ in 0..24 {
            sparse.push_str("code();\n");
        }
        let (smells, score) = scan(&sparse);
        assert!(smells.low_comments);
        assert_eq!(score, 10);
    }

    #[test]
    fn nesting_excess_over_baseline_of_four() {
        // 24 leading spaces = level 6, excess 2
        let text = format!("{}deep();\n", " ".repeat(24));
        let (smells, score) = scan(&text);
        assert_eq!(smells.deep_nesting, 2);
        assert_eq!(score, 10);
    }

    #[test]
    fn function_lengths_span_between_declarations() {
        let mut text = String::from("def first():\n");
        for _ in 0..60 {
            text.push_str("    pass\n");
        }
        text.push_str("def second():\n    pass\n");
        let (smells, _) = scan(&text);
        // first() spans 61 lines, second() runs 2 lines to EOF
        assert_eq!(smells.long_functions, 1);
    }

    #[test]
    fn worked_example_scores_seventy() {
        // 600 lines, zero comments, one 80-line function, max indent level 6,
        // 20 over-long lines: 25 + 10 + 10 + 15 + 10 = 70.
        let mut text = String::new();
        text.push_str("def big():\n");
        for _ in 0..79 {
            text.push_str("    pass\n");
        }
        text.push_str("x = 1\n");
        for _ in 0..20 {
            text.push_str(&format!("{}\n", "z".repeat(130)));
        }
        text.push_str(&format!("{}nested()\n", " ".repeat(24)));
        while text.lines().count() < 600 {
            text.push_str("x = 1\n");
        }
        let (smells, score) = scan(&text);
        assert!(smells.long_file);
        assert_eq!(smells.long_functions, 1);
        assert_eq!(smells.deep_nesting, 2);
        assert_eq!(smells.long_lines, 20);
        assert!(smells.low_comments);
        assert_eq!(score, 70);
    }

    #[test]
    fn scan_is_idempotent() {
        let text = "def f():\n    if x:\n        return 1\n# note\n";
        assert_eq!(scan(text), scan(text));
    }

    #[test]
    fn score_never_exceeds_one_hundred() {
        let mut text = String::new();
        for i in 0..700 {
            text.push_str(&format!("{}{}\n", " ".repeat(40), "w".repeat(150)));
            if i % 60 == 0 {
                text.push_str("def f():\n");
            }
        }
        let (_, score) = scan(&text);
        assert_eq!(score, 100);
    }
}
