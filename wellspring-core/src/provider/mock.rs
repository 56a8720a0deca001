//! Scripted collaborators for testing
//!
//! MockGenerator replays queued batches and MockEmbedder serves vectors
//! from a fixed table, enabling fast, deterministic testing of the
//! controller loop without any network.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use super::traits::{Embedder, IdeaGenerator};
use crate::error::{EmbedderError, GeneratorError};

/// Scripted [`IdeaGenerator`]
///
/// Queue batches with [`queue_batch`](MockGenerator::queue_batch) (or a
/// failure with [`queue_error`](MockGenerator::queue_error)) before running
/// a session; each `generate` call consumes one entry. An exhausted queue
/// yields empty batches, which the controller treats as zero-item batches.
#[derive(Default)]
pub struct MockGenerator {
    batches: Mutex<VecDeque<Result<Vec<String>, GeneratorError>>>,
    /// Snapshots of the prior_items length seen by each call
    prior_lens: Mutex<Vec<usize>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a batch of item texts for the next `generate` call.
    pub fn queue_batch<I, S>(&self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.batches
            .lock()
            .unwrap()
            .push_back(Ok(items.into_iter().map(Into::into).collect()));
    }

    /// Queue a generator failure (convenience method).
    pub fn queue_error(&self, error: GeneratorError) {
        self.batches.lock().unwrap().push_back(Err(error));
    }

    /// Number of `generate` calls observed so far.
    pub fn calls(&self) -> usize {
        self.prior_lens.lock().unwrap().len()
    }

    /// The `prior_items` length passed to each `generate` call, in order.
    pub fn prior_lens(&self) -> Vec<usize> {
        self.prior_lens.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdeaGenerator for MockGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        _batch_size: usize,
        prior_items: &[String],
    ) -> Result<Vec<String>, GeneratorError> {
        self.prior_lens.lock().unwrap().push(prior_items.len());
        match self.batches.lock().unwrap().pop_front() {
            Some(batch) => batch,
            None => Ok(Vec::new()),
        }
    }
}

/// Table-backed [`Embedder`]
///
/// Maps item texts to fixed vectors. Texts absent from the table fail with
/// [`EmbedderError::RequestFailed`], which exercises the controller's
/// skip-and-continue path.
#[derive(Default)]
pub struct MockEmbedder {
    vectors: Mutex<HashMap<String, Vec<f32>>>,
}

impl MockEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the vector served for a given text.
    pub fn insert(&self, text: impl Into<String>, vector: Vec<f32>) {
        self.vectors.lock().unwrap().insert(text.into(), vector);
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedderError> {
        self.vectors
            .lock()
            .unwrap()
            .get(text)
            .cloned()
            .ok_or_else(|| EmbedderError::RequestFailed(format!("no vector registered for {text:?}")))
    }
}
