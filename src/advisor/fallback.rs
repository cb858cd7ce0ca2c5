use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

fn pattern(raw: &str) -> Regex {
    Regex::new(&format!("(?i){}", raw)).expect("fallback pattern")
}

// Error shapes the offline path knows how to detect.
static BASIC_ERRORS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        pattern(r"\b(she|he|it) don't\b"),
        pattern(r"\b(she|he|it) do\b"),
        pattern(r"\b(she|he|it) go\b"),
        pattern(r"\bi is\b"),
    ]
});

// Ordered find-and-replace table for the shapes above.
static CORRECTIONS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (pattern(r"\bhe go\b"), "he goes"),
        (pattern(r"\bshe go\b"), "she goes"),
        (pattern(r"\bi is\b"), "I am"),
        (pattern(r"\bshe don't\b"), "she doesn't"),
        (pattern(r"\bhe don't\b"), "he doesn't"),
    ]
});

/// True if the text matches any error shape the rule table can fix.
pub fn has_known_errors(text: &str) -> bool {
    BASIC_ERRORS.iter().any(|re| re.is_match(text))
}

/// Applies the fixed correction table. Deterministic, total over all input;
/// text with no matching shape comes back unchanged.
pub fn apply_rules(text: &str) -> String {
    let mut corrected = text.to_string();
    for (re, replacement) in CORRECTIONS.iter() {
        corrected = re.replace_all(&corrected, *replacement).into_owned();
    }
    debug!("Rule-based correction: '{}' -> '{}'", text, corrected);
    corrected
}
