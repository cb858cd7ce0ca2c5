use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{instruction_prompt, CorrectionOracle, GenerationLimits, OracleError};

/// Correction oracle backed by a local Ollama server.
///
/// Sends the instruction-prefixed text to `/api/generate` and takes the single
/// returned completion as the candidate. Decoding is pinned to temperature 0
/// so the same input yields one stable candidate; Ollama has no beam-width
/// knob, so `beam_width` is only part of the advertised budget.
pub struct OllamaOracle {
    client: Client,
    base_url: String,
    model: String,
    limits: GenerationLimits,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    num_predict: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaOracle {
    pub fn new(base_url: &str, model: &str) -> Self {
        let limits = GenerationLimits::default();
        info!(
            "🧠 Correction oracle: {} (model '{}', {} beams, {} token cap)",
            base_url, model, limits.beam_width, limits.max_new_tokens
        );
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            limits,
        }
    }
}

#[async_trait]
impl CorrectionOracle for OllamaOracle {
    async fn propose(&self, text: &str) -> Result<String, OracleError> {
        let prompt = instruction_prompt(text);
        debug!("Requesting candidate for: '{}'", text);

        let resp = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&GenerateRequest {
                model: &self.model,
                prompt: &prompt,
                stream: false,
                options: GenerateOptions {
                    num_predict: self.limits.max_new_tokens,
                    temperature: 0.0,
                },
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(OracleError::BadStatus(resp.status().as_u16()));
        }

        let body: GenerateResponse = resp.json().await?;
        let candidate = body.response.trim().to_string();
        if candidate.is_empty() {
            return Err(OracleError::EmptyCandidate);
        }

        debug!("Candidate: '{}'", candidate);
        Ok(candidate)
    }
}
