//! Frequency spectrum of cluster sizes
//!
//! A derived, recomputable view over the registry; never stored as
//! authoritative state.

use serde::{Deserialize, Serialize};

use super::registry::ClusterRegistry;

/// Counts derived from the current cluster sizes.
///
/// `observed <= total_items`, and `singletons`/`doubletons` are each at most
/// `observed`. Recomputing without interleaved assignments yields identical
/// values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencySpectrum {
    /// N: total number of items assigned
    pub total_items: u64,
    /// u: number of clusters observed
    pub observed: u64,
    /// f1: clusters seen exactly once
    pub singletons: u64,
    /// f2: clusters seen exactly twice
    pub doubletons: u64,
}

impl FrequencySpectrum {
    /// Derive the spectrum from a registry snapshot.
    pub fn from_registry(registry: &ClusterRegistry) -> Self {
        let mut spectrum = Self::default();
        for cluster in registry.clusters() {
            spectrum.total_items += cluster.count;
            spectrum.observed += 1;
            match cluster.count {
                1 => spectrum.singletons += 1,
                2 => spectrum.doubletons += 1,
                _ => {}
            }
        }
        spectrum
    }
}
