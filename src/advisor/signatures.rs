use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Difficulty;

/// A known grammatical error shape: a pattern the original must match, a
/// pattern the candidate must match, and tier-keyed explanation phrasings.
pub struct ErrorSignature {
    original: Regex,
    candidate: Regex,
    easy: &'static str,
    intermediate: &'static str,
    advanced: &'static str,
}

impl ErrorSignature {
    fn phrase(&self, tier: Difficulty) -> &'static str {
        match tier {
            Difficulty::Easy => self.easy,
            Difficulty::Intermediate => self.intermediate,
            Difficulty::Advanced => self.advanced,
        }
    }
}

fn signature(
    original: &str,
    candidate: &str,
    easy: &'static str,
    intermediate: &'static str,
    advanced: &'static str,
) -> ErrorSignature {
    ErrorSignature {
        original: Regex::new(&format!("(?i){}", original)).expect("signature pattern"),
        candidate: Regex::new(&format!("(?i){}", candidate)).expect("signature pattern"),
        easy,
        intermediate,
        advanced,
    }
}

// Ordered: the first signature matching both sides wins.
static SIGNATURES: Lazy<Vec<ErrorSignature>> = Lazy::new(|| {
    vec![
        signature(
            r"\b(she|he|it) don't\b",
            r"\b(she|he|it) doesn't\b",
            "Fixed the verb for clearer communication!",
            "Use 'doesn't' with he/she/it, not 'don't'.",
            "Corrected third-person singular verb form.",
        ),
        signature(
            r"\b(she|he|it) do\b",
            r"\b(she|he|it) does\b",
            "Made the verb match the subject!",
            "Use 'does' with he/she/it, not 'do'.",
            "Corrected subject-verb agreement.",
        ),
        signature(
            r"\b(she|he|it) go\b",
            r"\b(she|he|it) goes\b",
            "Fixed the verb ending!",
            "Use 'goes' with he/she/it, not 'go'.",
            "Corrected third-person singular present tense.",
        ),
        signature(
            r"\bi is\b",
            r"am",
            "Fixed the verb for 'I'!",
            "Use 'am' with 'I', not 'is'.",
            "Corrected first-person verb conjugation.",
        ),
    ]
});

/// Explains what changed between the original and the candidate, preferring a
/// specific signature over the generic tier phrase.
pub fn accurate_explanation(original: &str, candidate: &str, tier: Difficulty) -> &'static str {
    for sig in SIGNATURES.iter() {
        if sig.original.is_match(original) && sig.candidate.is_match(candidate) {
            return sig.phrase(tier);
        }
    }
    match tier {
        Difficulty::Easy => "Improved the sentence for better understanding!",
        Difficulty::Intermediate => "Corrected grammatical errors.",
        Difficulty::Advanced => "Enhanced grammar and sentence structure.",
    }
}
