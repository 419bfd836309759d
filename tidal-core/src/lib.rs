//! Low-level building blocks for tidal prediction.
//!
//! `tidal-core` provides the shared pieces every other crate in the workspace
//! leans on: the error taxonomy, physical and astronomical constants, scalar
//! math kernels, 3D vectors and rotations, WGS84 geodesy, and the masked-array
//! container that carries "no data" flags through prediction.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`errors`] | [`TideError`] and [`TideResult`] |
//! | [`constants`] | Epochs, unit conversions, WGS84 and IERS constants |
//! | [`math`] | `fmod`, angle normalization, polynomials, Legendre functions |
//! | [`matrix`] | [`Vector3`] and [`RotationMatrix3`] |
//! | [`location`] | [`Location`], ECEF conversion, local North/East/Radial frame |
//! | [`masked`] | [`MaskedArray`] value + validity pairs |
//!
//! # Re-exports
//!
//! ```
//! use tidal_core::{TideError, TideResult, MaskedArray};
//! use tidal_core::{Location, LocalFrame, LocalDisplacement, Vector3, RotationMatrix3};
//! ```
//!
//! # Design Notes
//!
//! - **Degrees at the edges, radians inside**: astronomical longitudes and
//!   phases are tabulated in degrees; trigonometry converts at the call site.
//! - **Complex harmonic constants** use [`num_complex::Complex64`], re-exported
//!   as [`Complex64`] so downstream crates share one type.

pub mod constants;
pub mod errors;
pub mod location;
pub mod masked;
pub mod math;
pub mod matrix;

pub use errors::{TideError, TideResult};
pub use location::{normal_gravity, LocalDisplacement, LocalFrame, Location};
pub use masked::MaskedArray;
pub use matrix::{RotationMatrix3, Vector3};
pub use num_complex::Complex64;
