//! L2 normalization shared by the index builder and the query path.

/// Euclidean norm, accumulated in f64.
pub fn l2_norm(v: &[f32]) -> f64 {
    v.iter()
        .map(|&x| f64::from(x) * f64::from(x))
        .sum::<f64>()
        .sqrt()
}

/// Scale `v` to unit length: v / (‖v‖ + eps).
///
/// A zero vector stays zero rather than becoming NaN.
pub fn l2_normalize(v: &[f32], eps: f64) -> Vec<f32> {
    let denom = l2_norm(v) + eps;
    v.iter().map(|&x| (f64::from(x) / denom) as f32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_to_unit_length() {
        let v = l2_normalize(&[3.0, 4.0], 1e-12);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);
        assert!((l2_norm(&v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_vector_stays_zero() {
        let v = l2_normalize(&[0.0; 4], 1e-12);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn normalization_is_deterministic() {
        let raw = [0.1f32, -2.5, 7.25, 1e-3];
        assert_eq!(l2_normalize(&raw, 1e-12), l2_normalize(&raw, 1e-12));
    }
}
