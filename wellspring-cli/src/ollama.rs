//! Ollama-backed generator and embedder collaborators
//!
//! Connects to a local Ollama instance: `/api/chat` for idea generation and
//! `/api/embeddings` for vectors.
//!
//! # Example
//!
//! ```ignore
//! let generator = OllamaGenerator::new("llama3.2");
//! let embedder = OllamaEmbedder::with_base_url("http://192.168.1.100:11434", "nomic-embed-text");
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use wellspring_core::error::{EmbedderError, GeneratorError};
use wellspring_core::provider::{Embedder, IdeaGenerator};

/// Default Ollama API base URL.
const DEFAULT_BASE_URL: &str = "http://localhost:11434";

// ────────────────────────────────────────────────────────────────────────────
// Ollama API Request/Response Types
// ────────────────────────────────────────────────────────────────────────────

/// Message in an Ollama chat request/response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OllamaChatMessage {
    role: String,
    content: String,
}

/// Request body for Ollama's `/api/chat` endpoint.
#[derive(Debug, Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<OllamaChatMessage>,
    stream: bool,
}

/// Response from Ollama's `/api/chat` endpoint.
#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaChatMessage,
}

/// Request body for Ollama's `/api/embeddings` endpoint.
#[derive(Debug, Serialize)]
struct OllamaEmbeddingsRequest {
    model: String,
    prompt: String,
}

/// Response from Ollama's `/api/embeddings` endpoint.
#[derive(Debug, Deserialize)]
struct OllamaEmbeddingsResponse {
    embedding: Vec<f32>,
}

// ────────────────────────────────────────────────────────────────────────────
// Generator
// ────────────────────────────────────────────────────────────────────────────

/// [`IdeaGenerator`] backed by an Ollama chat model.
pub struct OllamaGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaGenerator {
    /// Create a generator against the default local Ollama instance.
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, model)
    }

    /// Create a generator against a specific Ollama instance.
    pub fn with_base_url(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    /// Build the generation request text, including the avoid-repetition
    /// block when prior items exist.
    fn build_request(prompt: &str, batch_size: usize, prior_items: &[String]) -> String {
        let mut request = format!(
            "Generate {batch_size} distinct ideas for the following prompt.\n\
             Respond with exactly one idea per line, numbered, in the form\n\
             \"1. short title: description\" with title and description\n\
             totaling roughly 40-80 words. No other text.\n\n\
             Prompt: {prompt}\n"
        );
        if !prior_items.is_empty() {
            request.push_str(
                "\nThe following ideas were already produced. Generate additional \
                 distinct ideas and avoid semantic repetition of any of them:\n",
            );
            for item in prior_items {
                request.push_str("- ");
                request.push_str(item);
                request.push('\n');
            }
        }
        request
    }
}

/// Parse a chat response into discrete item texts: one item per line in the
/// form `index. short_title: description`. Non-matching lines are dropped.
pub(crate) fn parse_items(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let (index, rest) = line.split_once('.')?;
            if index.is_empty() || !index.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            let rest = rest.trim();
            if rest.is_empty() || !rest.contains(':') {
                return None;
            }
            Some(rest.to_string())
        })
        .collect()
}

#[async_trait]
impl IdeaGenerator for OllamaGenerator {
    async fn generate(
        &self,
        prompt: &str,
        batch_size: usize,
        prior_items: &[String],
    ) -> Result<Vec<String>, GeneratorError> {
        let request = OllamaChatRequest {
            model: self.model.clone(),
            messages: vec![OllamaChatMessage {
                role: "user".to_string(),
                content: Self::build_request(prompt, batch_size, prior_items),
            }],
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| GeneratorError::RequestFailed(e.to_string()))?
            .error_for_status()
            .map_err(|e| GeneratorError::RequestFailed(e.to_string()))?
            .json::<OllamaChatResponse>()
            .await
            .map_err(|e| GeneratorError::MalformedResponse(e.to_string()))?;

        let items = parse_items(&response.message.content);
        if items.is_empty() {
            return Err(GeneratorError::MalformedResponse(
                "no parseable item lines in response".to_string(),
            ));
        }
        Ok(items)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Embedder
// ────────────────────────────────────────────────────────────────────────────

/// [`Embedder`] backed by an Ollama embedding model.
pub struct OllamaEmbedder {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaEmbedder {
    /// Create an embedder against the default local Ollama instance.
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, model)
    }

    /// Create an embedder against a specific Ollama instance.
    pub fn with_base_url(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedderError> {
        let request = OllamaEmbeddingsRequest {
            model: self.model.clone(),
            prompt: text.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/api/embeddings", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| EmbedderError::RequestFailed(e.to_string()))?
            .error_for_status()
            .map_err(|e| EmbedderError::RequestFailed(e.to_string()))?
            .json::<OllamaEmbeddingsResponse>()
            .await
            .map_err(|e| EmbedderError::RequestFailed(e.to_string()))?;

        if response.embedding.is_empty() {
            return Err(EmbedderError::EmptyEmbedding);
        }
        Ok(response.embedding)
    }
}
