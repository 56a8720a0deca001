//! Cluster registry: greedy nearest-representative assignment
//!
//! Each cluster keeps the embedding of the *first* item assigned to it as
//! its representative for the cluster's lifetime. Representatives are never
//! recomputed as centroids; this keeps assignment O(cluster count) and the
//! statistical behavior order-dependent on purpose.

use serde::{Deserialize, Serialize};

use crate::error::SimilarityError;
use crate::similarity::cosine;

/// Identifier for a cluster, assigned sequentially starting from 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClusterId(pub u64);

impl std::fmt::Display for ClusterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cluster of semantically similar items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    /// Unique, monotonically assigned identifier
    pub id: ClusterId,
    /// Embedding of the first item assigned here; fixed forever
    pub representative: Vec<f32>,
    /// Number of items assigned, always >= 1
    pub count: u64,
}

/// The growing set of observed clusters for one session
///
/// Clusters are created lazily and never merged, split, or deleted, so the
/// registry size is monotonically non-decreasing. All mutation goes through
/// [`ClusterRegistry::assign`]; the session owns the registry and applies
/// assignments sequentially.
#[derive(Debug, Clone)]
pub struct ClusterRegistry {
    clusters: Vec<Cluster>,
    join_threshold: f32,
}

impl ClusterRegistry {
    /// Create an empty registry with the given join threshold.
    ///
    /// The threshold is assumed already validated (see `SessionConfig`).
    pub fn new(join_threshold: f32) -> Self {
        Self {
            clusters: Vec::new(),
            join_threshold,
        }
    }

    /// Assign a vector to the best matching cluster, or create a new one.
    ///
    /// Scans every existing representative and picks the cluster with the
    /// maximum similarity at or above the join threshold (a similarity
    /// exactly equal to the threshold joins). Exact ties go to the
    /// earliest-created cluster. On a miss, a new cluster is created with
    /// this vector as its representative and count 1.
    ///
    /// Assignment is atomic: on error nothing has been mutated.
    ///
    /// # Errors
    ///
    /// - [`SimilarityError::ZeroMagnitude`] for a degenerate vector, even
    ///   when the registry is empty and no comparison would run — a zero
    ///   vector must never become a representative
    /// - [`SimilarityError::DimensionMismatch`] when the vector's length
    ///   differs from the session's established dimensionality
    pub fn assign(&mut self, vector: &[f32]) -> Result<ClusterId, SimilarityError> {
        if vector.iter().map(|x| x * x).sum::<f32>().sqrt() == 0.0 {
            return Err(SimilarityError::ZeroMagnitude);
        }
        if let Some(first) = self.clusters.first() {
            if vector.len() != first.representative.len() {
                return Err(SimilarityError::DimensionMismatch {
                    left: vector.len(),
                    right: first.representative.len(),
                });
            }
        }

        let mut best: Option<(usize, f32)> = None;

        for (idx, cluster) in self.clusters.iter().enumerate() {
            let sim = cosine(vector, &cluster.representative)?;
            if sim >= self.join_threshold {
                // Strictly-greater keeps the earliest cluster on exact ties.
                match best {
                    Some((_, best_sim)) if sim <= best_sim => {}
                    _ => best = Some((idx, sim)),
                }
            }
        }

        if let Some((idx, _)) = best {
            self.clusters[idx].count += 1;
            return Ok(self.clusters[idx].id);
        }

        let id = ClusterId(self.clusters.len() as u64);
        self.clusters.push(Cluster {
            id,
            representative: vector.to_vec(),
            count: 1,
        });
        Ok(id)
    }

    /// Number of clusters observed so far.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// True if no items have been assigned yet.
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Snapshot iterator over the current clusters.
    pub fn clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ClusterRegistry {
        ClusterRegistry::new(0.70)
    }

    #[test]
    fn first_assignment_creates_cluster_zero() {
        let mut reg = registry();
        let id = reg.assign(&[1.0, 0.0]).unwrap();
        assert_eq!(id, ClusterId(0));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn similar_vector_joins_existing_cluster() {
        let mut reg = registry();
        reg.assign(&[1.0, 0.0]).unwrap();
        // cos ~ 0.995, well above threshold
        let id = reg.assign(&[1.0, 0.1]).unwrap();
        assert_eq!(id, ClusterId(0));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.clusters().next().unwrap().count, 2);
    }

    #[test]
    fn dissimilar_vector_creates_new_cluster() {
        let mut reg = registry();
        reg.assign(&[1.0, 0.0]).unwrap();
        let id = reg.assign(&[0.0, 1.0]).unwrap();
        assert_eq!(id, ClusterId(1));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn similarity_exactly_at_threshold_joins() {
        // cos(a, b) = 0.6 with threshold 0.6: must join (>= comparison)
        let mut reg = ClusterRegistry::new(0.6);
        reg.assign(&[1.0, 0.0]).unwrap();
        let id = reg.assign(&[0.6, 0.8]).unwrap();
        assert_eq!(id, ClusterId(0));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn exact_tie_goes_to_earliest_cluster() {
        // Two representatives mirrored around the incoming vector give
        // identical similarity; the earlier id must win.
        let mut reg = ClusterRegistry::new(0.5);
        reg.assign(&[1.0, 0.1]).unwrap();
        reg.assign(&[0.1, 1.0]).unwrap();
        assert_eq!(reg.len(), 2);
        let id = reg.assign(&[1.0, 1.0]).unwrap();
        assert_eq!(id, ClusterId(0));
    }

    #[test]
    fn maximum_similarity_wins_over_first_match() {
        let mut reg = ClusterRegistry::new(0.5);
        reg.assign(&[1.0, 1.0]).unwrap(); // cos vs [0,1] ~ 0.707
        reg.assign(&[0.1, 1.0]).unwrap(); // cos vs [0,1] ~ 0.995
        let id = reg.assign(&[0.0, 1.0]).unwrap();
        assert_eq!(id, ClusterId(1));
    }

    #[test]
    fn representative_is_not_updated_on_join() {
        let mut reg = registry();
        reg.assign(&[1.0, 0.0]).unwrap();
        reg.assign(&[0.9, 0.1]).unwrap();
        let rep = &reg.clusters().next().unwrap().representative;
        assert_eq!(rep, &vec![1.0, 0.0]);
    }

    #[test]
    fn zero_vector_on_empty_registry_is_rejected() {
        let mut reg = registry();
        assert_eq!(reg.assign(&[0.0, 0.0]), Err(SimilarityError::ZeroMagnitude));
        assert!(reg.is_empty());
        // The registry stays usable and ids still start at 0
        assert_eq!(reg.assign(&[1.0, 0.0]).unwrap(), ClusterId(0));
    }

    #[test]
    fn dimension_mismatch_errors_without_mutation() {
        let mut reg = registry();
        reg.assign(&[1.0, 0.0]).unwrap();
        assert_eq!(
            reg.assign(&[1.0, 0.0, 0.0]),
            Err(SimilarityError::DimensionMismatch { left: 3, right: 2 })
        );
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.clusters().next().unwrap().count, 1);
    }

    #[test]
    fn zero_vector_errors_without_mutation() {
        let mut reg = registry();
        reg.assign(&[1.0, 0.0]).unwrap();
        let result = reg.assign(&[0.0, 0.0]);
        assert_eq!(result, Err(SimilarityError::ZeroMagnitude));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.clusters().next().unwrap().count, 1);
    }

    #[test]
    fn assignment_is_deterministic_across_runs() {
        let vectors: Vec<Vec<f32>> = vec![
            vec![1.0, 0.0, 0.0],
            vec![0.9, 0.1, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.9, 0.2],
            vec![0.0, 0.0, 1.0],
        ];
        let run = || -> Vec<ClusterId> {
            let mut reg = registry();
            vectors.iter().map(|v| reg.assign(v).unwrap()).collect()
        };
        assert_eq!(run(), run());
    }
}
