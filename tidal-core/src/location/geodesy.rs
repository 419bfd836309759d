//! Geodetic ↔ Earth-centred Earth-fixed conversions and the local frame.
//!
//! Tide displacements are computed in ECEF and reported in a station-local
//! frame built on the *geocentric* colatitude θ and longitude λ of the station:
//!
//! ```text
//! north  = (-cos λ cos θ, -sin λ cos θ,  sin θ)
//! east   = (-sin λ,        cos λ,        0    )
//! radial = ( cos λ sin θ,  sin λ sin θ,  cos θ)
//! ```
//!
//! `north` points toward increasing latitude. Frames that report the
//! colatitude direction (toward the south pole) differ only in the sign of
//! the first component.

use super::Location;
use crate::constants::{WGS84_ECCENTRICITY_SQUARED, WGS84_SEMI_MAJOR_AXIS};
use crate::matrix::{RotationMatrix3, Vector3};

/// Somigliana normal gravity at the equator (m/s²).
const NORMAL_GRAVITY_EQUATOR: f64 = 9.7803253359;

/// Somigliana's constant for WGS84.
const SOMIGLIANA_K: f64 = 0.00193185265241;

impl Location {
    /// Geodetic coordinates → ECEF position in metres (WGS84).
    ///
    /// ```
    /// use tidal_core::Location;
    ///
    /// let equator = Location::from_degrees(0.0, 0.0, 0.0)?;
    /// let v = equator.to_ecef();
    /// assert!((v.x - 6_378_137.0).abs() < 1e-6);
    /// assert!(v.z.abs() < 1e-9);
    /// # Ok::<(), tidal_core::TideError>(())
    /// ```
    pub fn to_ecef(&self) -> Vector3 {
        let (sin_lat, cos_lat) = libm::sincos(self.latitude);
        let (sin_lon, cos_lon) = libm::sincos(self.longitude);
        let n = WGS84_SEMI_MAJOR_AXIS
            / libm::sqrt(1.0 - WGS84_ECCENTRICITY_SQUARED * sin_lat * sin_lat);
        let u = (n + self.height) * cos_lat;
        Vector3::new(
            u * cos_lon,
            u * sin_lon,
            (n * (1.0 - WGS84_ECCENTRICITY_SQUARED) + self.height) * sin_lat,
        )
    }

    /// Geocentric latitude of the station in radians.
    pub fn geocentric_latitude(&self) -> f64 {
        let v = self.to_ecef();
        libm::atan2(v.z, v.equatorial_radius())
    }
}

/// Somigliana normal gravity (m/s²) at geocentric colatitude `theta`.
///
/// Uses `sin²φ = cos²θ`, which is exact only for geodetic latitude; the
/// difference is below 1 part in 10⁵ of gravity.
pub fn normal_gravity(theta: f64) -> f64 {
    let sin2 = libm::cos(theta).powi(2);
    NORMAL_GRAVITY_EQUATOR * (1.0 + SOMIGLIANA_K * sin2)
        / libm::sqrt(1.0 - WGS84_ECCENTRICITY_SQUARED * sin2)
}

/// North/East/Radial components of a displacement (metres).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalDisplacement {
    pub north: f64,
    pub east: f64,
    pub radial: f64,
}

impl LocalDisplacement {
    pub fn new(north: f64, east: f64, radial: f64) -> Self {
        Self {
            north,
            east,
            radial,
        }
    }
}

/// Rotation between ECEF and the geocentric North/East/Radial frame of a station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    /// Geocentric colatitude (radians)
    pub colatitude: f64,
    /// Longitude (radians)
    pub longitude: f64,
    // rows: north, east, radial
    to_local: RotationMatrix3,
}

impl LocalFrame {
    /// Builds the frame at an ECEF station position.
    pub fn from_ecef(station: &Vector3) -> Self {
        let colatitude =
            std::f64::consts::FRAC_PI_2 - libm::atan2(station.z, station.equatorial_radius());
        let longitude = libm::atan2(station.y, station.x);
        Self::from_angles(colatitude, longitude)
    }

    /// Builds the frame from geocentric colatitude and longitude in radians.
    pub fn from_angles(colatitude: f64, longitude: f64) -> Self {
        let (st, ct) = libm::sincos(colatitude);
        let (sl, cl) = libm::sincos(longitude);
        let to_local = RotationMatrix3::from_array([
            [-cl * ct, -sl * ct, st],
            [-sl, cl, 0.0],
            [cl * st, sl * st, ct],
        ]);
        Self {
            colatitude,
            longitude,
            to_local,
        }
    }

    /// Geocentric latitude (radians).
    pub fn latitude(&self) -> f64 {
        std::f64::consts::FRAC_PI_2 - self.colatitude
    }

    /// ECEF vector → North/East/Radial components.
    pub fn to_local(&self, v: &Vector3) -> LocalDisplacement {
        let r = self.to_local.apply(v);
        LocalDisplacement::new(r.x, r.y, r.z)
    }

    /// North/East/Radial components → ECEF vector.
    pub fn to_ecef(&self, d: &LocalDisplacement) -> Vector3 {
        self.to_local
            .transpose()
            .apply(&Vector3::new(d.north, d.east, d.radial))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_ecef_at_north_pole() {
        let pole = Location::from_degrees(90.0, 0.0, 0.0).unwrap().to_ecef();
        assert!(pole.equatorial_radius() < 1e-9);
        assert_abs_diff_eq!(pole.z, 6356752.314245179, epsilon = 1e-6);
    }

    #[test]
    fn test_ecef_with_height() {
        let sea = Location::from_degrees(0.0, 90.0, 0.0).unwrap().to_ecef();
        let high = Location::from_degrees(0.0, 90.0, 1000.0).unwrap().to_ecef();
        assert_abs_diff_eq!(high.y - sea.y, 1000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_geocentric_latitude_smaller_than_geodetic() {
        let loc = Location::from_degrees(45.0, 10.0, 0.0).unwrap();
        let diff = (loc.latitude - loc.geocentric_latitude()).to_degrees() * 60.0;
        assert!(diff > 11.0 && diff < 12.0, "difference {} arcmin", diff);
    }

    #[test]
    fn test_local_frame_radial_is_outward() {
        let station = Location::from_degrees(30.0, 45.0, 0.0).unwrap().to_ecef();
        let frame = LocalFrame::from_ecef(&station);
        let d = frame.to_local(&station.normalize());
        assert_abs_diff_eq!(d.radial, 1.0, epsilon = 1e-14);
        assert_abs_diff_eq!(d.north, 0.0, epsilon = 1e-14);
        assert_abs_diff_eq!(d.east, 0.0, epsilon = 1e-14);
    }

    #[test]
    fn test_local_frame_north_points_to_pole() {
        let frame = LocalFrame::from_angles(std::f64::consts::FRAC_PI_2, 0.0);
        let d = frame.to_local(&Vector3::z_axis());
        assert_abs_diff_eq!(d.north, 1.0, epsilon = 1e-15);
        let e = frame.to_local(&Vector3::y_axis());
        assert_abs_diff_eq!(e.east, 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_local_frame_round_trip() {
        let frame = LocalFrame::from_angles(0.7, -2.1);
        let d = LocalDisplacement::new(0.01, -0.02, 0.3);
        let back = frame.to_local(&frame.to_ecef(&d));
        assert_abs_diff_eq!(back.north, d.north, epsilon = 1e-15);
        assert_abs_diff_eq!(back.east, d.east, epsilon = 1e-15);
        assert_abs_diff_eq!(back.radial, d.radial, epsilon = 1e-15);
    }

    #[test]
    fn test_normal_gravity_range() {
        let equator = normal_gravity(std::f64::consts::FRAC_PI_2);
        let pole = normal_gravity(0.0);
        assert_abs_diff_eq!(equator, 9.7803253359, epsilon = 1e-12);
        assert_abs_diff_eq!(pole, 9.8321849379, epsilon = 1e-6);
    }
}
