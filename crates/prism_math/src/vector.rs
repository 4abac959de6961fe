//! Checked vector operations.
//!
//! `glam::Vec3::normalize` returns NaN components for a zero vector. Everything in
//! the renderer that builds a basis or a direction goes through [`try_normalize`]
//! instead, so a degenerate input fails loudly at the point it enters the system.

use glam::Vec3;
use thiserror::Error;

/// Vectors shorter than this are treated as zero length.
pub const NORMALIZE_EPSILON: f32 = 1e-8;

/// Errors from vector algebra.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    #[error("cannot normalize a zero-length or non-finite vector {0}")]
    ZeroLength(Vec3),
}

/// Normalize `v` to unit length.
///
/// Fails with [`MathError::ZeroLength`] if `v` is (nearly) zero or has a
/// non-finite component.
pub fn try_normalize(v: Vec3) -> Result<Vec3, MathError> {
    if v.length_squared() < NORMALIZE_EPSILON * NORMALIZE_EPSILON {
        return Err(MathError::ZeroLength(v));
    }
    v.try_normalize().ok_or(MathError::ZeroLength(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prop_assert;
    use test_strategy::proptest;

    #[test]
    fn test_normalize_axis() {
        assert_eq!(try_normalize(Vec3::new(0.0, 0.0, -5.0)), Ok(Vec3::NEG_Z));
    }

    #[test]
    fn test_normalize_zero_fails() {
        assert_eq!(try_normalize(Vec3::ZERO), Err(MathError::ZeroLength(Vec3::ZERO)));
    }

    #[test]
    fn test_normalize_non_finite_fails() {
        assert!(try_normalize(Vec3::new(f32::NAN, 1.0, 0.0)).is_err());
        assert!(try_normalize(Vec3::new(f32::INFINITY, 0.0, 0.0)).is_err());
    }

    #[proptest]
    fn normalized_vectors_have_unit_length(
        #[strategy(-1e3f32..1e3f32)] x: f32,
        #[strategy(-1e3f32..1e3f32)] y: f32,
        #[strategy(-1e3f32..1e3f32)] z: f32,
    ) {
        let v = Vec3::new(x, y, z);
        match try_normalize(v) {
            Ok(n) => prop_assert!((n.length() - 1.0).abs() < 1e-5, "length {}", n.length()),
            Err(_) => prop_assert!(v.length() < 1e-6),
        }
    }
}
