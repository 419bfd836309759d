//! Astronomical ephemerides for tidal arguments and body tides.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`formalism`] | [`Formalism`] and the mean longitudes `s, h, p, N, p'` |
//! | [`delaunay`] | IERS 2010 Delaunay arguments `l, l', F, D, Ω` |
//! | [`doodson`] | Doodson phase angles `τ, s, h, p, N', p'` |
//! | [`obliquity`] | IAU 2006 mean obliquity of the ecliptic |
//! | [`schureman`] | Lunar-orbit angles `I, ξ, ν, ν', ν''` for nodal corrections |
//! | [`approximate`] | Analytic Sun and Moon positions behind the [`Ephemeris`] trait |
//!
//! ```
//! use tidal_ephemeris::{mean_longitudes, ApproximateEphemeris, Ephemeris, Formalism};
//! use tidal_time::TideTime;
//!
//! let t = TideTime::from_calendar(2009, 4, 13, 0, 0, 0.0)?;
//! let m = mean_longitudes(t.mjd_tt(), Formalism::Astro5);
//! assert!(m.s >= 0.0 && m.s < 360.0);
//!
//! let sun = ApproximateEphemeris.sun(&t)?;
//! assert!(sun.magnitude() > 1.4e11);
//! # Ok::<(), tidal_core::TideError>(())
//! ```

pub mod approximate;
pub mod delaunay;
pub mod doodson;
pub mod formalism;
pub mod obliquity;
pub mod schureman;

pub use approximate::{lunar_ecef, solar_ecef, ApproximateEphemeris, Ephemeris};
pub use delaunay::{DelaunayArgs, DelaunayArguments};
pub use doodson::{doodson_arguments, DoodsonAngles};
pub use formalism::{
    mean_longitude_rates, mean_longitudes, unwrapped_longitudes, Formalism, MeanLongitudes,
};
pub use obliquity::mean_obliquity;
pub use schureman::SchuremanArguments;
