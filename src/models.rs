use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Difficulty tier controlling explanation phrasing and how aggressively
/// corrections are applied.
///
/// Unknown or missing values normalize to `Intermediate`; the normalized tier
/// is what gets echoed back in `difficulty_used`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "advanced" => Difficulty::Advanced,
            _ => Difficulty::Intermediate,
        }
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Difficulty::normalize(&raw))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Intermediate => write!(f, "intermediate"),
            Difficulty::Advanced => write!(f, "advanced"),
        }
    }
}

/// Outcome tag on a correction result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Correct,
    Corrected,
    Unsure,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Correct => write!(f, "correct"),
            Status::Corrected => write!(f, "corrected"),
            Status::Unsure => write!(f, "unsure"),
        }
    }
}

/// Body of `POST /correct`.
#[derive(Debug, Clone, Deserialize)]
pub struct CorrectionRequest {
    pub text: String,
    #[serde(default)]
    pub difficulty: Difficulty,
}

/// Response body for a single correction, built fresh per request and
/// serialized immediately.
#[derive(Debug, Clone, Serialize)]
pub struct CorrectionResult {
    pub original_text: String,
    pub corrected_text: String,
    pub explanation: String,
    pub confidence: f64,
    pub status: Status,
    pub is_correct: bool,
    pub suggestions: Vec<String>,
    pub difficulty_used: Difficulty,
}

impl CorrectionResult {
    pub fn new(
        original: &str,
        corrected: &str,
        explanation: impl Into<String>,
        confidence: f64,
        status: Status,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            original_text: original.to_string(),
            corrected_text: corrected.to_string(),
            explanation: explanation.into(),
            confidence,
            status,
            is_correct: status == Status::Correct,
            suggestions: Vec::new(),
            difficulty_used: difficulty,
        }
    }
}
