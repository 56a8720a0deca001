//! Session configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for one exhaustion session.
///
/// Validated once at session start, before any collaborator call; invalid
/// values are fatal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Items requested from the generator per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Maximum number of generator calls before stopping on budget
    #[serde(default = "default_max_batches")]
    pub max_batches: usize,

    /// Stop once exhaustion_pct / 100 exceeds this, in (0, 1]
    #[serde(default = "default_stop_threshold")]
    pub stop_threshold: f64,

    /// Minimum cosine similarity for an item to join an existing cluster,
    /// in [-1, 1]
    #[serde(default = "default_join_threshold")]
    pub join_threshold: f64,

    /// The stop threshold is ignored until this many items are assigned
    #[serde(default = "default_minimum_items")]
    pub minimum_items: u64,

    /// Cap on how many prior item texts are passed to the generator.
    /// `None` sends the full history; its unbounded growth is a known
    /// scaling limitation and is logged once a session gets large.
    #[serde(default)]
    pub prior_context_limit: Option<usize>,
}

fn default_batch_size() -> usize {
    25
}

fn default_max_batches() -> usize {
    20
}

fn default_stop_threshold() -> f64 {
    0.95
}

fn default_join_threshold() -> f64 {
    0.70
}

fn default_minimum_items() -> u64 {
    10
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            max_batches: default_max_batches(),
            stop_threshold: default_stop_threshold(),
            join_threshold: default_join_threshold(),
            minimum_items: default_minimum_items(),
            prior_context_limit: None,
        }
    }
}

impl SessionConfig {
    /// Validate all parameters, returning the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(self.batch_size));
        }
        if self.max_batches == 0 {
            return Err(ConfigError::InvalidMaxBatches(self.max_batches));
        }
        if !(self.stop_threshold > 0.0 && self.stop_threshold <= 1.0) {
            return Err(ConfigError::InvalidStopThreshold(self.stop_threshold));
        }
        if !(-1.0..=1.0).contains(&self.join_threshold) {
            return Err(ConfigError::InvalidJoinThreshold(self.join_threshold));
        }
        if self.prior_context_limit == Some(0) {
            return Err(ConfigError::InvalidPriorContextLimit(0));
        }
        Ok(())
    }
}
