//! wellspring-core: idea-space exhaustion estimation for generative sampling
//!
//! Given a prompt, a text generator, and an embedder, wellspring estimates
//! in real time how much of the reachable "idea space" has been explored
//! and stops generating once further batches yield diminishing returns.
//!
//! The pipeline:
//!
//! - **Clustering** - [`cluster::ClusterRegistry`] greedily groups each new
//!   item with the most similar existing cluster representative (cosine
//!   similarity at or above a join threshold), or opens a new cluster
//! - **Spectrum** - [`cluster::FrequencySpectrum`] derives (N, u, f1, f2)
//!   from the cluster sizes
//! - **Estimation** - [`estimator::ExhaustionEstimate`] applies the Chao1
//!   richness formula to extrapolate the total reachable cluster count
//! - **Control** - [`session::ExhaustionController`] runs the batched
//!   generate → embed → assign → estimate loop and applies the stopping
//!   policy
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use wellspring_core::config::SessionConfig;
//! use wellspring_core::provider::{MockEmbedder, MockGenerator};
//! use wellspring_core::session::ExhaustionController;
//!
//! # async fn example() -> Result<(), wellspring_core::WellspringError> {
//! let generator = Arc::new(MockGenerator::new());
//! generator.queue_batch(["1. dawn chorus: birdsong as an alarm clock"]);
//! let embedder = Arc::new(MockEmbedder::new());
//! embedder.insert("1. dawn chorus: birdsong as an alarm clock", vec![1.0, 0.0]);
//!
//! let controller = ExhaustionController::new(generator, embedder, SessionConfig::default());
//! let report = controller.run("novel alarm clock ideas").await?;
//! println!("explored {:.1}% of the idea space", report.exhaustion_pct);
//! # Ok(())
//! # }
//! ```

pub mod cluster;
pub mod config;
pub mod error;
pub mod estimator;
pub mod provider;
pub mod session;
pub mod similarity;

// Re-export key types for convenience
pub use cluster::{Cluster, ClusterId, ClusterRegistry, FrequencySpectrum};
pub use config::SessionConfig;
pub use error::{
    ConfigError, EmbedderError, GeneratorError, SimilarityError, WellspringError,
};
pub use estimator::ExhaustionEstimate;
pub use provider::{Embedder, IdeaGenerator, MockEmbedder, MockGenerator};
pub use session::{ExhaustionController, Item, SessionReport, StopReason};
pub use similarity::cosine;
