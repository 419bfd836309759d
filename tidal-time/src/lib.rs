//! Time arguments for tidal prediction.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`epoch`] | [`TideTime`]: days since 1992-01-01 with ΔT, calendar conversion |
//! | [`delta_t`] | [`DeltaT`] sources and the approximate ΔT model |
//! | [`rotation`] | Earth rotation angle, GMST, Greenwich hour angle |
//!
//! ```
//! use tidal_time::{TideTime, DeltaT};
//!
//! let t = TideTime::from_calendar(2009, 4, 13, 0, 0, 0.0)?;
//! assert_eq!(t.days, 6312.0);
//! let dt = DeltaT::Approximate.resolve_one(t.mjd())?;
//! let t = t.with_deltat(dt);
//! assert!(t.mjd_tt() > t.mjd());
//! # Ok::<(), tidal_core::TideError>(())
//! ```

pub mod delta_t;
pub mod epoch;
pub mod rotation;

pub use delta_t::{delta_t_seconds, DeltaT};
pub use epoch::{calendar_to_mjd, mjd_to_decimal_year, TideTime};
pub use rotation::{earth_rotation_angle, greenwich_hour_angle, greenwich_mean_sidereal_time};
