//! Cartesian 3-vectors for Earth-centred, Earth-fixed positions and displacements.
//!
//! Solid-earth tide computations work almost entirely with dot products between a
//! station vector and the geocentric Sun/Moon vectors, so this type keeps the
//! components public and the operators cheap.
//!
//! ```
//! use tidal_core::Vector3;
//!
//! let station = Vector3::new(3.0, 4.0, 0.0);
//! let unit = station.normalize();
//! assert!((unit.magnitude() - 1.0).abs() < 1e-15);
//! assert_eq!(unit.dot(&Vector3::x_axis()), 0.6);
//! ```
use std::fmt;

/// A 3D Cartesian vector, metres unless stated otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn zeros() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    #[inline]
    pub fn x_axis() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    #[inline]
    pub fn y_axis() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    #[inline]
    pub fn z_axis() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// Euclidean length.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        libm::sqrt(self.x * self.x + self.y * self.y + self.z * self.z)
    }

    /// Returns a unit vector in the same direction; the zero vector is returned unchanged.
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag == 0.0 {
            *self
        } else {
            *self / mag
        }
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Distance from the z axis.
    #[inline]
    pub fn equatorial_radius(&self) -> f64 {
        libm::sqrt(self.x * self.x + self.y * self.y)
    }

    #[inline]
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    #[inline]
    pub fn from_array(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl std::ops::Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl std::ops::Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl std::ops::Mul<Vector3> for f64 {
    type Output = Vector3;

    fn mul(self, vec: Vector3) -> Vector3 {
        vec * self
    }
}

impl std::ops::Div<f64> for Vector3 {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        Self::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

impl std::ops::Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// v[i] indexing (panics if i > 2)
impl std::ops::Index<usize> for Vector3 {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vector3 index {} out of bounds", index),
        }
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.6}, {:.6}, {:.6}]", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot() {
        let a = Vector3::x_axis();
        let b = Vector3::y_axis();
        assert_eq!(a.dot(&b), 0.0);
        assert_eq!(Vector3::new(3.0, 4.0, 12.0).equatorial_radius(), 5.0);
        assert_eq!(Vector3::new(1.0, 2.0, 3.0).dot(&Vector3::new(4.0, 5.0, 6.0)), 32.0);
    }

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(Vector3::zeros().normalize(), Vector3::zeros());
    }

    #[test]
    fn test_operators() {
        let mut v = Vector3::new(1.0, 2.0, 3.0);
        v += Vector3::new(1.0, 1.0, 1.0);
        assert_eq!(v, Vector3::new(2.0, 3.0, 4.0));
        assert_eq!(2.0 * v - v, v);
        assert_eq!(-v / 2.0, Vector3::new(-1.0, -1.5, -2.0));
        assert_eq!(v[2], 4.0);
    }

    #[test]
    fn test_equatorial_radius() {
        assert_eq!(Vector3::new(3.0, 4.0, 12.0).equatorial_radius(), 5.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Vector3::new(1.0, -2.5, 0.0).to_string(),
            "[1.000000, -2.500000, 0.000000]"
        );
    }
}
