use rand::seq::IndexedRandom;
use std::sync::Arc;
use tracing::{info, warn};

use crate::models::{CorrectionResult, Difficulty, Status};
use crate::oracle::CorrectionOracle;

pub mod classify;
pub mod fallback;
pub mod signatures;

/// In easy mode, similarity above this keeps the original text as-is.
const EASY_KEEP_THRESHOLD: f64 = 0.85;

const SHORT_INPUT_PROMPT: &str = "Please enter a longer sentence.";

const EASY_CORRECT_POOL: &[&str] = &[
    "Great! Your sentence is clear and easy to understand! 👍",
    "Perfect for everyday conversation! 🎉",
    "Your meaning is clear - well done! ✅",
    "Good enough for basic communication! 💬",
];

const INTERMEDIATE_CORRECT_POOL: &[&str] = &[
    "Perfect grammar! ✅",
    "Excellent writing - no errors found! 📚",
    "Well-constructed sentence! 🎯",
    "Grammatically correct and natural! 🌟",
];

const ADVANCED_CORRECT_POOL: &[&str] = &[
    "Flawless professional English! 💎",
    "Perfect grammar and sophisticated expression! 🏆",
    "Native-level proficiency demonstrated! 🌟",
    "Impeccable grammar and structure! ✅",
];

/// Pool of praise phrasings for an already-correct sentence at the given tier.
pub fn correct_explanations(tier: Difficulty) -> &'static [&'static str] {
    match tier {
        Difficulty::Easy => EASY_CORRECT_POOL,
        Difficulty::Intermediate => INTERMEDIATE_CORRECT_POOL,
        Difficulty::Advanced => ADVANCED_CORRECT_POOL,
    }
}

/// Wraps the black-box correction oracle and applies heuristic judgment to
/// its candidates. Holds no per-request state; one instance is shared
/// read-only across all request tasks.
pub struct CorrectionAdvisor {
    oracle: Arc<dyn CorrectionOracle>,
}

impl CorrectionAdvisor {
    pub fn new(oracle: Arc<dyn CorrectionOracle>) -> Self {
        Self { oracle }
    }

    /// Produces exactly one result for any input: short-input guard, then the
    /// oracle, then either the already-correct path, tier shaping, or the
    /// deterministic fallback when the oracle fails.
    pub async fn correct(&self, text: &str, difficulty: Difficulty) -> CorrectionResult {
        if text.trim().chars().count() < 2 {
            return CorrectionResult::new(
                text,
                text,
                SHORT_INPUT_PROMPT,
                0.1,
                Status::Unsure,
                difficulty,
            );
        }

        match self.oracle.propose(text).await {
            Ok(candidate) => self.judge(text, candidate.trim(), difficulty),
            Err(err) => {
                warn!("Oracle call failed, using rule-based fallback: {}", err);
                self.rule_based(text, difficulty)
            }
        }
    }

    fn judge(&self, original: &str, candidate: &str, difficulty: Difficulty) -> CorrectionResult {
        if classify::is_grammar_correct(original, candidate) {
            return CorrectionResult::new(
                original,
                original,
                self.praise(difficulty),
                0.95,
                Status::Correct,
                difficulty,
            );
        }

        info!("Genuine correction: '{}' -> '{}'", original, candidate);
        let explanation = signatures::accurate_explanation(original, candidate, difficulty);

        match difficulty {
            Difficulty::Easy => {
                // Easy mode tolerates minor divergence as acceptable
                if classify::token_set_similarity(original, candidate) > EASY_KEEP_THRESHOLD {
                    CorrectionResult::new(
                        original,
                        original,
                        "Looks good for conversation!",
                        0.8,
                        Status::Correct,
                        difficulty,
                    )
                } else {
                    CorrectionResult::new(
                        original,
                        candidate,
                        explanation,
                        0.7,
                        Status::Corrected,
                        difficulty,
                    )
                }
            }
            Difficulty::Intermediate => CorrectionResult::new(
                original,
                candidate,
                explanation,
                0.8,
                Status::Corrected,
                difficulty,
            ),
            Difficulty::Advanced => CorrectionResult::new(
                original,
                candidate,
                explanation,
                0.85,
                Status::Corrected,
                difficulty,
            ),
        }
    }

    fn rule_based(&self, text: &str, difficulty: Difficulty) -> CorrectionResult {
        if !fallback::has_known_errors(text) {
            return CorrectionResult::new(
                text,
                text,
                self.praise(difficulty),
                0.9,
                Status::Correct,
                difficulty,
            );
        }
        let corrected = fallback::apply_rules(text);
        CorrectionResult::new(
            text,
            &corrected,
            "Applied basic grammar rules.",
            0.7,
            Status::Corrected,
            difficulty,
        )
    }

    // Presentation variety only; the phrasing carries no semantic content.
    fn praise(&self, difficulty: Difficulty) -> &'static str {
        correct_explanations(difficulty)
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or("Great! No errors found!")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::OracleError;
    use async_trait::async_trait;

    mockall::mock! {
        Oracle {}

        #[async_trait]
        impl CorrectionOracle for Oracle {
            async fn propose(&self, text: &str) -> Result<String, OracleError>;
        }
    }

    fn advisor_with(oracle: MockOracle) -> CorrectionAdvisor {
        CorrectionAdvisor::new(Arc::new(oracle))
    }

    #[tokio::test]
    async fn test_short_input_skips_oracle() {
        let mut oracle = MockOracle::new();
        oracle.expect_propose().times(0);
        let advisor = advisor_with(oracle);

        for text in ["", " ", "a", "  a  "] {
            let result = advisor.correct(text, Difficulty::Intermediate).await;
            assert_eq!(result.status, Status::Unsure);
            assert_eq!(result.confidence, 0.1);
            assert_eq!(result.corrected_text, result.original_text);
            assert_eq!(result.explanation, "Please enter a longer sentence.");
        }
    }

    #[tokio::test]
    async fn test_echoed_candidate_is_correct() {
        let mut oracle = MockOracle::new();
        oracle
            .expect_propose()
            .returning(|text| Ok(text.to_uppercase()));
        let advisor = advisor_with(oracle);

        let result = advisor.correct("This is fine", Difficulty::Intermediate).await;
        assert_eq!(result.status, Status::Correct);
        assert!(result.is_correct);
        assert_eq!(result.confidence, 0.95);
        assert_eq!(result.corrected_text, "This is fine");
        assert!(correct_explanations(Difficulty::Intermediate).contains(&result.explanation.as_str()));
    }

    #[tokio::test]
    async fn test_punctuation_only_change_is_correct() {
        let mut oracle = MockOracle::new();
        oracle
            .expect_propose()
            .returning(|_| Ok("Hello, world!".to_string()));
        let advisor = advisor_with(oracle);

        let result = advisor.correct("Hello world", Difficulty::Advanced).await;
        assert_eq!(result.status, Status::Correct);
        assert_eq!(result.corrected_text, "Hello world");
        assert!(correct_explanations(Difficulty::Advanced).contains(&result.explanation.as_str()));
    }

    #[tokio::test]
    async fn test_contraction_rephrasing_is_correct() {
        let mut oracle = MockOracle::new();
        oracle
            .expect_propose()
            .returning(|_| Ok("I'm happy".to_string()));
        let advisor = advisor_with(oracle);

        let result = advisor.correct("I am happy", Difficulty::Easy).await;
        assert_eq!(result.status, Status::Correct);
        assert_eq!(result.corrected_text, "I am happy");
    }

    #[tokio::test]
    async fn test_signature_explanation_wins_over_generic() {
        let mut oracle = MockOracle::new();
        oracle
            .expect_propose()
            .returning(|_| Ok("She doesn't like it".to_string()));
        let advisor = advisor_with(oracle);

        let result = advisor.correct("She don't like it", Difficulty::Intermediate).await;
        assert_eq!(result.status, Status::Corrected);
        assert_eq!(result.confidence, 0.8);
        assert_eq!(result.corrected_text, "She doesn't like it");
        assert_eq!(result.explanation, "Use 'doesn't' with he/she/it, not 'don't'.");
    }

    #[tokio::test]
    async fn test_easy_tier_applies_dissimilar_correction() {
        let mut oracle = MockOracle::new();
        oracle
            .expect_propose()
            .returning(|_| Ok("I have a dog".to_string()));
        let advisor = advisor_with(oracle);

        // similarity 3/5 = 0.6, below the keep threshold
        let result = advisor.correct("I has a dog", Difficulty::Easy).await;
        assert_eq!(result.status, Status::Corrected);
        assert_eq!(result.confidence, 0.7);
        assert_eq!(result.corrected_text, "I have a dog");
    }

    #[tokio::test]
    async fn test_easy_tier_keeps_near_identical_correction() {
        let original = "one two three four five six seven eight nine ten eleven twelve thirteen";
        let candidate = "one two three four five six seven eight nine ten eleven twelve fourteen";
        let mut oracle = MockOracle::new();
        oracle
            .expect_propose()
            .returning(move |_| Ok(candidate.to_string()));
        let advisor = advisor_with(oracle);

        // similarity 12/14 = 0.857: above the keep threshold, below correct
        let result = advisor.correct(original, Difficulty::Easy).await;
        assert_eq!(result.status, Status::Correct);
        assert_eq!(result.confidence, 0.8);
        assert_eq!(result.corrected_text, original);
        assert_eq!(result.explanation, "Looks good for conversation!");
    }

    #[tokio::test]
    async fn test_advanced_tier_confidence() {
        let mut oracle = MockOracle::new();
        oracle
            .expect_propose()
            .returning(|_| Ok("I have a dog".to_string()));
        let advisor = advisor_with(oracle);

        let result = advisor.correct("I has a dog", Difficulty::Advanced).await;
        assert_eq!(result.status, Status::Corrected);
        assert_eq!(result.confidence, 0.85);
    }

    #[tokio::test]
    async fn test_oracle_failure_falls_back_deterministically() {
        let mut oracle = MockOracle::new();
        oracle
            .expect_propose()
            .returning(|_| Err(OracleError::BadStatus(500)));
        let advisor = advisor_with(oracle);

        let result = advisor.correct("She don't like it", Difficulty::Intermediate).await;
        assert_eq!(result.status, Status::Corrected);
        assert_eq!(result.confidence, 0.7);
        assert_eq!(result.corrected_text, "she doesn't like it");
        assert_eq!(result.explanation, "Applied basic grammar rules.");
    }

    #[tokio::test]
    async fn test_oracle_failure_on_clean_text() {
        let mut oracle = MockOracle::new();
        oracle
            .expect_propose()
            .returning(|_| Err(OracleError::EmptyCandidate));
        let advisor = advisor_with(oracle);

        let result = advisor.correct("This sentence is fine", Difficulty::Easy).await;
        assert_eq!(result.status, Status::Correct);
        assert_eq!(result.confidence, 0.9);
        assert_eq!(result.corrected_text, "This sentence is fine");
        assert!(correct_explanations(Difficulty::Easy).contains(&result.explanation.as_str()));
    }

    #[test]
    fn test_praise_stays_within_pool() {
        for tier in [Difficulty::Easy, Difficulty::Intermediate, Difficulty::Advanced] {
            let pool = correct_explanations(tier);
            assert_eq!(pool.len(), 4);
            // praise() never touches the oracle, so no expectations needed
            let advisor = advisor_with(MockOracle::new());
            for _ in 0..20 {
                assert!(pool.contains(&advisor.praise(tier)));
            }
        }
    }
}
