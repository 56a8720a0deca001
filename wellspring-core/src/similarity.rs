//! Cosine similarity between embedding vectors
//!
//! Pure and deterministic. Degenerate inputs (zero magnitude, mismatched
//! dimensions) are surfaced as errors instead of being coerced to 0, since
//! they indicate a broken embedding rather than genuine dissimilarity.

use crate::error::SimilarityError;

/// Compute the cosine similarity between two equal-length vectors.
///
/// Returns a value in [-1, 1]: the dot product divided by the product of
/// the two magnitudes.
///
/// # Errors
///
/// - [`SimilarityError::DimensionMismatch`] if the vectors differ in length
/// - [`SimilarityError::ZeroMagnitude`] if either vector has zero magnitude
pub fn cosine(a: &[f32], b: &[f32]) -> Result<f32, SimilarityError> {
    if a.len() != b.len() {
        return Err(SimilarityError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        return Err(SimilarityError::ZeroMagnitude);
    }

    Ok(dot / (mag_a * mag_b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vectors_have_similarity_one() {
        let v = vec![0.6, 0.8, 0.0];
        let sim = cosine(&v, &v).unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn orthogonal_vectors_have_similarity_zero() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        let sim = cosine(&a, &b).unwrap();
        assert!(sim.abs() < 1e-6);
    }

    #[test]
    fn opposite_vectors_have_similarity_negative_one() {
        let a = vec![1.0, 2.0];
        let b = vec![-1.0, -2.0];
        let sim = cosine(&a, &b).unwrap();
        assert!((sim + 1.0).abs() < 1e-6);
    }

    #[test]
    fn magnitude_does_not_affect_similarity() {
        let a = vec![1.0, 1.0];
        let b = vec![10.0, 10.0];
        let sim = cosine(&a, &b).unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_vector_is_an_error_not_zero() {
        let a = vec![0.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert_eq!(cosine(&a, &b), Err(SimilarityError::ZeroMagnitude));
        assert_eq!(cosine(&b, &a), Err(SimilarityError::ZeroMagnitude));
    }

    #[test]
    fn mismatched_dimensions_are_an_error() {
        let a = vec![1.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert_eq!(
            cosine(&a, &b),
            Err(SimilarityError::DimensionMismatch { left: 2, right: 3 })
        );
    }
}
