// src/classifier.rs

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// Patterns marking a commit message as bug-related. Whole-word matches
/// except the trailing issue reference (`#` followed by digits), which can
/// appear anywhere.
const BUG_PATTERNS: &[&str] = &[
    r"\bfix\b",
    r"\bfixed\b",
    r"\bfixes\b",
    r"\bfixing\b",
    r"\bbug\b",
    r"\bbugs\b",
    r"\bbugfix\b",
    r"\berror\b",
    r"\berrors\b",
    r"\bissue\b",
    r"\bissues\b",
    r"\bpatch\b",
    r"\bpatched\b",
    r"\brepair\b",
    r"\brepaired\b",
    r"\bresolve\b",
    r"\bresolved\b",
    r"\bresolves\b",
    r"\bhotfix\b",
    r"\bdefect\b",
    r"\bdefects\b",
    r"\bcorrect\b",
    r"\bcorrected\b",
    r"\bcorrection\b",
    r"\bcrash\b",
    r"\bcrashes\b",
    r"\bcrashing\b",
    r"\bfail\b",
    r"\bfailed\b",
    r"\bfailing\b",
    r"\bfailure\b",
    r"\bbroken\b",
    r"\bbreak\b",
    r"\bnull\s*pointer\b",
    r"\bnpe\b",
    r"\bexception\b",
    r"\bexceptions\b",
    r"\bregression\b",
    r"#\d+",
];

static BUG_REGEX: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(&BUG_PATTERNS.join("|"))
        .case_insensitive(true)
        .build()
        .expect("bug pattern set is a valid regex")
});

/// True if the commit message matches any bug-indicating pattern.
pub fn classify(message: &str) -> bool {
    BUG_REGEX.is_match(message)
}
