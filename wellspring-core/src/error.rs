//! Error types for wellspring-core

use thiserror::Error;

/// Top-level error type for wellspring-core
#[derive(Error, Debug)]
pub enum WellspringError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    #[error("Embedder error: {0}")]
    Embedder(#[from] EmbedderError),

    #[error("Similarity error: {0}")]
    Similarity(#[from] SimilarityError),
}

/// Errors from session configuration validation
///
/// All of these are fatal and raised before any collaborator call is made.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("batch_size must be at least 1, got {0}")]
    InvalidBatchSize(usize),

    #[error("max_batches must be at least 1, got {0}")]
    InvalidMaxBatches(usize),

    #[error("stop_threshold must be in (0, 1], got {0}")]
    InvalidStopThreshold(f64),

    #[error("join_threshold must be in [-1, 1], got {0}")]
    InvalidJoinThreshold(f64),

    #[error("prior_context_limit must be at least 1 when set, got {0}")]
    InvalidPriorContextLimit(usize),
}

/// Errors from the idea generator collaborator
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Generator request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed generator response: {0}")]
    MalformedResponse(String),

    #[error("Generator returned an empty response")]
    EmptyResponse,
}

/// Errors from the embedder collaborator
#[derive(Error, Debug)]
pub enum EmbedderError {
    #[error("Embedder request failed: {0}")]
    RequestFailed(String),

    #[error("Embedder returned an empty vector")]
    EmptyEmbedding,
}

/// Errors from cosine similarity computation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimilarityError {
    /// A zero-magnitude vector indicates a degenerate embedding and must
    /// surface as an error rather than silently comparing as 0.
    #[error("Cannot compute similarity against a zero-magnitude vector")]
    ZeroMagnitude,

    #[error("Vector dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
}
