//! Per-node affine transform stored as a row-major 4×4 matrix.
//!
//! The exchange format carries transforms as flat arrays of 16 numbers, so
//! the wrapper keeps that representation and converts to [`Matrix4`] only
//! when math is actually needed.

use nalgebra::{Matrix4, Point3};
use serde::{Deserialize, Serialize};

/// A 4×4 affine transform in row-major element order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform(pub [f64; 16]);

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        let mut m = [0.0; 16];
        m[0] = 1.0;
        m[5] = 1.0;
        m[10] = 1.0;
        m[15] = 1.0;
        Self(m)
    }

    /// Pure translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut t = Self::identity();
        t.0[3] = dx;
        t.0[7] = dy;
        t.0[11] = dz;
        t
    }

    /// Whether this is exactly the identity matrix.
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// The translation column `(dx, dy, dz)`.
    pub fn translation_part(&self) -> (f64, f64, f64) {
        (self.0[3], self.0[7], self.0[11])
    }

    /// Convert to an nalgebra matrix.
    pub fn to_matrix(&self) -> Matrix4<f64> {
        Matrix4::from_row_slice(&self.0)
    }

    /// Build from an nalgebra matrix.
    pub fn from_matrix(m: &Matrix4<f64>) -> Self {
        let mut out = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                out[row * 4 + col] = m[(row, col)];
            }
        }
        Self(out)
    }

    /// Transform a point (homogeneous w = 1).
    pub fn apply_point(&self, p: &Point3<f64>) -> Point3<f64> {
        self.to_matrix().transform_point(p)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_is_default() {
        assert!(Transform::default().is_identity());
        assert_eq!(Transform::default().translation_part(), (0.0, 0.0, 0.0));
    }

    #[test]
    fn translation_moves_points() {
        let t = Transform::translation(1.0, -2.0, 3.5);
        let p = t.apply_point(&Point3::new(0.5, 0.5, 0.5));
        assert_relative_eq!(p.x, 1.5);
        assert_relative_eq!(p.y, -1.5);
        assert_relative_eq!(p.z, 4.0);
    }

    #[test]
    fn matrix_roundtrip() {
        let t = Transform::translation(4.0, 5.0, 6.0);
        let back = Transform::from_matrix(&t.to_matrix());
        assert_eq!(t, back);
    }

    #[test]
    fn serializes_as_sixteen_numbers() {
        let json = serde_json::to_string(&Transform::identity()).unwrap();
        let values: Vec<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(values.len(), 16);
        assert_eq!(values[0], 1.0);
        assert_eq!(values[1], 0.0);
    }
}
