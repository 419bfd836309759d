//! 3D vectors and rotation matrices for Earth-fixed displacement calculations.
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Vector3`] | Station, Sun and Moon positions; displacement vectors |
//! | [`RotationMatrix3`] | Ecliptic → equator and sidereal rotations; ECEF ↔ local frames |

mod rotation_matrix;
mod vector3;

pub use rotation_matrix::RotationMatrix3;
pub use vector3::Vector3;
