use async_trait::async_trait;

mod ollama;

pub use ollama::OllamaOracle;

/// Generation budget for a single oracle call. The candidate is produced by a
/// bounded beam search, so a call has a hard output-length ceiling.
#[derive(Debug, Clone, Copy)]
pub struct GenerationLimits {
    pub beam_width: u32,
    pub max_new_tokens: u32,
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self {
            beam_width: 2,
            max_new_tokens: 128,
        }
    }
}

/// Instruction prefix the correction model was trained on.
pub const INSTRUCTION_PREFIX: &str = "grammar: ";

pub fn instruction_prompt(text: &str) -> String {
    format!("{}{}", INSTRUCTION_PREFIX, text)
}

/// Errors that can occur while asking the model for a candidate
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("Model request failed: {source}")]
    Request {
        #[from]
        source: reqwest::Error,
    },

    #[error("Model endpoint returned status {0}")]
    BadStatus(u16),

    #[error("Model returned an empty candidate")]
    EmptyCandidate,
}

/// Black-box correction engine: given raw text, returns one candidate
/// corrected string within the generation budget.
///
/// Constructed once at startup and injected into the advisor; implementations
/// must be safe to share across request tasks.
#[async_trait]
pub trait CorrectionOracle: Send + Sync {
    async fn propose(&self, text: &str) -> Result<String, OracleError>;
}
