//! Incremental clustering of generated items
//!
//! [`registry::ClusterRegistry`] performs greedy nearest-representative
//! assignment; [`spectrum::FrequencySpectrum`] derives the group-size
//! frequency counts the exhaustion estimator consumes.

pub mod registry;
pub mod spectrum;

pub use registry::{Cluster, ClusterId, ClusterRegistry};
pub use spectrum::FrequencySpectrum;
