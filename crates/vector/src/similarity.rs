use ndarray::ArrayView1;
use rabbitrag_common::{RabbitRagError, Result};

/// Cosine similarity `dot(a, b) / (|a| * |b|)`.
///
/// Vectors of different length are a `DimensionMismatch` error. A zero-norm
/// vector has no direction, so its similarity to anything is `0.0`.
///
/// Accumulates in f64 so squared sums of f32 components neither overflow
/// nor underflow; the result is clamped to `[-1.0, 1.0]`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(RabbitRagError::dimension_mismatch(a.len(), b.len()));
    }

    let a = ArrayView1::from(a).mapv(f64::from);
    let b = ArrayView1::from(b).mapv(f64::from);

    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();
    let denom = norm_a * norm_b;
    if denom == 0.0 {
        return Ok(0.0);
    }

    Ok((a.dot(&b) / denom).clamp(-1.0, 1.0) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(left: f32, right: f32) -> bool {
        (left - right).abs() < 1e-6
    }

    #[test]
    fn test_orthogonal() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_identical() {
        assert!(approx_eq(cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]).unwrap(), 1.0));

        let v = [0.3, -1.2, 4.5, 0.01];
        assert!(approx_eq(cosine_similarity(&v, &v).unwrap(), 1.0));
    }

    #[test]
    fn test_opposite() {
        assert!(approx_eq(cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]).unwrap(), -1.0));
    }

    #[test]
    fn test_symmetric() {
        let pairs: [(&[f32], &[f32]); 3] = [
            (&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]),
            (&[0.5, -0.5], &[0.25, 4.0]),
            (&[0.0, 0.0, 1.0], &[1.0, 1.0, 1.0]),
        ];
        for (a, b) in pairs {
            assert_eq!(cosine_similarity(a, b).unwrap(), cosine_similarity(b, a).unwrap());
        }
    }

    #[test]
    fn test_scale_invariant() {
        let a = cosine_similarity(&[1.0, 2.0], &[2.0, 1.0]).unwrap();
        let b = cosine_similarity(&[10.0, 20.0], &[2.0, 1.0]).unwrap();
        assert!(approx_eq(a, b));
    }

    #[test]
    fn test_extreme_magnitudes() {
        let large = [1e20_f32, 0.0];
        assert!(approx_eq(cosine_similarity(&large, &large).unwrap(), 1.0));

        let tiny = [1e-30_f32, 0.0];
        assert!(approx_eq(cosine_similarity(&tiny, &tiny).unwrap(), 1.0));

        let mixed = cosine_similarity(&[3e30, 4e30], &[4e-30, 3e-30]).unwrap();
        assert!(approx_eq(mixed, 0.96));
    }

    #[test]
    fn test_result_within_unit_range() {
        let v = [0.1_f32, 0.7, -0.3, 1e-3];
        let sim = cosine_similarity(&v, &v).unwrap();
        assert!((-1.0..=1.0).contains(&sim));
        assert!(approx_eq(sim, 1.0));
    }

    #[test]
    fn test_zero_norm_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[0.0, 0.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_length_mismatch() {
        let err = cosine_similarity(&[1.0, 0.0, 0.0], &[1.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            RabbitRagError::DimensionMismatch { expected: 3, actual: 2 }
        ));
    }
}
