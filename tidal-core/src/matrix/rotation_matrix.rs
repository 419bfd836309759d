//! 3×3 rotation matrices.
//!
//! Rotations follow the frame-rotation convention: `rotate_z(ψ)` turns the
//! coordinate frame, not the vector, so `[1, 0, 0]` maps to `[cos ψ, -sin ψ, 0]`.
//! Ecliptic vectors reach the Earth-fixed frame through `Rz(gha) · Rx(-ε)`.
//!
//! ```
//! use tidal_core::{RotationMatrix3, Vector3};
//! use std::f64::consts::FRAC_PI_2;
//!
//! let m = RotationMatrix3::about_z(FRAC_PI_2);
//! let v = m * Vector3::x_axis();
//! assert!(v.x.abs() < 1e-15);
//! assert!((v.y + 1.0).abs() < 1e-15);
//! ```

use super::Vector3;
use std::fmt;

/// A row-major 3×3 rotation matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotationMatrix3 {
    elements: [[f64; 3]; 3],
}

impl RotationMatrix3 {
    fn identity() -> Self {
        Self {
            elements: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Builds a matrix from row-major elements without validation.
    pub fn from_array(elements: [[f64; 3]; 3]) -> Self {
        Self { elements }
    }

    /// Frame rotation about the x axis by `phi` radians.
    pub fn about_x(phi: f64) -> Self {
        let mut m = Self::identity();
        m.rotate_x(phi);
        m
    }

    /// Frame rotation about the z axis by `psi` radians.
    pub fn about_z(psi: f64) -> Self {
        let mut m = Self::identity();
        m.rotate_z(psi);
        m
    }

    /// Replaces `self` with `Rx(phi) · self`.
    ///
    /// ```text
    /// Rx(phi) = | 1    0         0       |
    ///           | 0    cos(phi)  sin(phi)|
    ///           | 0   -sin(phi)  cos(phi)|
    /// ```
    fn rotate_x(&mut self, phi: f64) {
        let (s, c) = libm::sincos(phi);
        for j in 0..3 {
            let a1 = c * self.elements[1][j] + s * self.elements[2][j];
            let a2 = -s * self.elements[1][j] + c * self.elements[2][j];
            self.elements[1][j] = a1;
            self.elements[2][j] = a2;
        }
    }

    /// Replaces `self` with `Rz(psi) · self`.
    ///
    /// ```text
    /// Rz(psi) = | cos(psi)  sin(psi)  0 |
    ///           |-sin(psi)  cos(psi)  0 |
    ///           |    0         0      1 |
    /// ```
    fn rotate_z(&mut self, psi: f64) {
        let (s, c) = libm::sincos(psi);
        for j in 0..3 {
            let a0 = c * self.elements[0][j] + s * self.elements[1][j];
            let a1 = -s * self.elements[0][j] + c * self.elements[1][j];
            self.elements[0][j] = a0;
            self.elements[1][j] = a1;
        }
    }

    pub fn transpose(&self) -> Self {
        let e = &self.elements;
        Self::from_array([
            [e[0][0], e[1][0], e[2][0]],
            [e[0][1], e[1][1], e[2][1]],
            [e[0][2], e[1][2], e[2][2]],
        ])
    }

    pub fn apply(&self, v: &Vector3) -> Vector3 {
        let e = &self.elements;
        Vector3::new(
            e[0][0] * v.x + e[0][1] * v.y + e[0][2] * v.z,
            e[1][0] * v.x + e[1][1] * v.y + e[1][2] * v.z,
            e[2][0] * v.x + e[2][1] * v.y + e[2][2] * v.z,
        )
    }
}

impl std::ops::Mul<Vector3> for RotationMatrix3 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        self.apply(&rhs)
    }
}

impl std::ops::Mul<Vector3> for &RotationMatrix3 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        self.apply(&rhs)
    }
}

impl fmt::Display for RotationMatrix3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.elements {
            writeln!(f, "[{:12.9} {:12.9} {:12.9}]", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_rotate_x_quarter_turn() {
        let v = RotationMatrix3::about_x(FRAC_PI_2) * Vector3::y_axis();
        assert_abs_diff_eq!(v.y, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(v.z, -1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_transpose_inverts_rotation() {
        let m = RotationMatrix3::about_z(0.3);
        let v = RotationMatrix3::about_x(-0.4) * Vector3::new(1.0, 2.0, 3.0);
        let back = m.transpose() * (m * v);
        assert_abs_diff_eq!(back.x, v.x, epsilon = 1e-14);
        assert_abs_diff_eq!(back.y, v.y, epsilon = 1e-14);
        assert_abs_diff_eq!(back.z, v.z, epsilon = 1e-14);
        assert_abs_diff_eq!((m * v).magnitude(), v.magnitude(), epsilon = 1e-14);
    }

    #[test]
    fn test_rotations_compose_in_place() {
        let mut m = RotationMatrix3::about_x(0.2);
        m.rotate_z(0.5);
        let v = Vector3::new(0.3, -1.2, 2.5);
        let expected = RotationMatrix3::about_z(0.5) * (RotationMatrix3::about_x(0.2) * v);
        let got = m * v;
        assert_abs_diff_eq!(got.x, expected.x, epsilon = 1e-15);
        assert_abs_diff_eq!(got.y, expected.y, epsilon = 1e-15);
        assert_abs_diff_eq!(got.z, expected.z, epsilon = 1e-15);
    }
}
