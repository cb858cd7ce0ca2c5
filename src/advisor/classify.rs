use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Jaccard similarity above this counts as "no real change".
pub const CORRECT_SIMILARITY_THRESHOLD: f64 = 0.90;

static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("punctuation regex"));

/// Formal/contraction pairs that read as the same sentence. Matching either
/// direction means the candidate is a rephrasing, not a correction.
const CONTRACTION_PAIRS: &[(&str, &str)] = &[
    ("i am", "i'm"),
    ("it is", "it's"),
    ("that is", "that's"),
    ("what is", "what's"),
    ("do not", "don't"),
    ("does not", "doesn't"),
];

/// Token-set Jaccard similarity over lowercase word sets.
pub fn token_set_similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();
    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }
    let common = words_a.intersection(&words_b).count();
    common as f64 / words_a.union(&words_b).count() as f64
}

/// Decides whether the oracle's candidate is close enough to the original
/// that no change is needed.
pub fn is_grammar_correct(original: &str, candidate: &str) -> bool {
    let original_lower = original.to_lowercase();
    let candidate_lower = candidate.to_lowercase();

    if original_lower == candidate_lower {
        return true;
    }

    // Only punctuation/capitalization differs
    let original_clean = PUNCTUATION.replace_all(&original_lower, "");
    let candidate_clean = PUNCTUATION.replace_all(&candidate_lower, "");
    if original_clean == candidate_clean {
        return true;
    }

    if token_set_similarity(original, candidate) > CORRECT_SIMILARITY_THRESHOLD {
        return true;
    }

    CONTRACTION_PAIRS.iter().any(|(formal, contraction)| {
        (original_lower.contains(formal) && candidate_lower.contains(contraction))
            || (original_lower.contains(contraction) && candidate_lower.contains(formal))
    })
}
