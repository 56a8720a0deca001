//! External collaborator abstractions
//!
//! The engine depends on two network-bound collaborators: an
//! [`IdeaGenerator`] producing batches of candidate item texts, and an
//! [`Embedder`] turning a text into a fixed-length vector. Scripted mock
//! implementations live in [`mock`] for tests and offline runs.

pub mod mock;
pub mod traits;

pub use mock::{MockEmbedder, MockGenerator};
pub use traits::{Embedder, IdeaGenerator};
