//! Geographic locations and the station-local displacement frame.
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`Location`] | Geodetic latitude/longitude/height on the WGS84 ellipsoid |
//! | [`LocalFrame`] | Rotation between ECEF and geocentric North/East/Radial |
//! | [`LocalDisplacement`] | A displacement expressed as North/East/Radial components |
//! | [`normal_gravity`] | Somigliana normal gravity on the ellipsoid |

mod geodesy;

pub use geodesy::{normal_gravity, LocalDisplacement, LocalFrame};

use crate::errors::{TideError, TideResult};

/// A geodetic location on the WGS84 ellipsoid.
///
/// Angles are stored in radians.
///
/// ```
/// use tidal_core::Location;
///
/// let station = Location::from_degrees(68.96, -136.80, 0.0)?;
/// let ecef = station.to_ecef();
/// assert!(ecef.z > 0.0);
/// # Ok::<(), tidal_core::TideError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Geodetic latitude in radians (positive north)
    pub latitude: f64,
    /// Longitude in radians (positive east)
    pub longitude: f64,
    /// Height above the ellipsoid in metres
    pub height: f64,
}

impl Location {
    /// Creates a location from radians.
    ///
    /// # Errors
    ///
    /// Latitude beyond ±π/2 or a non-finite coordinate.
    pub fn new(latitude: f64, longitude: f64, height: f64) -> TideResult<Self> {
        if !(latitude.is_finite() && longitude.is_finite() && height.is_finite()) {
            return Err(TideError::invalid_input(
                "Location::new",
                "coordinates must be finite",
            ));
        }
        if latitude.abs() > std::f64::consts::FRAC_PI_2 {
            return Err(TideError::invalid_input(
                "Location::new",
                &format!("latitude {} rad outside [-pi/2, pi/2]", latitude),
            ));
        }
        Ok(Self {
            latitude,
            longitude,
            height,
        })
    }

    /// Creates a location from degrees.
    pub fn from_degrees(lat_deg: f64, lon_deg: f64, height: f64) -> TideResult<Self> {
        Self::new(lat_deg.to_radians(), lon_deg.to_radians(), height)
    }

    pub fn latitude_degrees(&self) -> f64 {
        self.latitude.to_degrees()
    }

    pub fn longitude_degrees(&self) -> f64 {
        self.longitude.to_degrees()
    }
}
