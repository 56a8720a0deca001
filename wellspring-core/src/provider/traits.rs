//! Collaborator trait definitions
//!
//! Both traits are object-safe so sessions can hold `Arc<dyn ...>` and
//! implementations can be injected (HTTP-backed in the CLI, scripted mocks
//! in tests).

use async_trait::async_trait;

use crate::error::{EmbedderError, GeneratorError};

/// Produces batches of candidate item texts for a prompt.
///
/// `prior_items` carries the texts already produced this session; the
/// implementation is expected to instruct its model to avoid semantic
/// repetition of that list. It is empty on the first batch. Parsing the raw
/// model response into discrete item texts is the implementor's
/// responsibility; the engine only consumes the parsed list.
#[async_trait]
pub trait IdeaGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        batch_size: usize,
        prior_items: &[String],
    ) -> Result<Vec<String>, GeneratorError>;
}

/// Turns an item text into an embedding vector.
///
/// All vectors returned within one session must share a single
/// dimensionality; a mismatch is caught downstream at assignment time.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify both traits are object-safe
    fn _assert_object_safe(_: Box<dyn IdeaGenerator>, _: Box<dyn Embedder>) {}
}
