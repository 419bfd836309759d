//! Load and ocean pole tides, IERS Conventions (2010) §7.1.4–7.1.5.
//!
//! Both respond to the wobble `(m₁, m₂)` of the rotation pole about its
//! secular mean position:
//!
//! ```text
//! m₁ = x_p − x̄_s        m₂ = −(y_p − ȳ_s)
//! ```
//!
//! Polar motion `(x_p, y_p)` comes from an Earth orientation series supplied
//! by the caller; the mean pole `(x̄_s, ȳ_s)` from a [`MeanPole`] model.

use std::fmt;
use std::str::FromStr;

use tidal_core::constants::{ARCSEC_TO_RAD, EARTH_ROTATION_RATE, IERS_EQUATORIAL_RADIUS, WGS84_GM};
use tidal_core::math::polynomial_sum;
use tidal_core::{normal_gravity, Complex64, LocalDisplacement, LocalFrame, TideError, TideResult, Vector3};
use tidal_time::{mjd_to_decimal_year, TideTime};
use tracing::{debug, instrument};

/// Love number `h₂` at the Chandler frequency.
pub const POLE_H2: f64 = 0.6207;
/// Shida number `l₂` at the Chandler frequency.
pub const POLE_L2: f64 = 0.0836;

/// Ocean pole tide admittance `γ = (1 + k₂ − h₂)`, anelastic.
pub const OCEAN_GAMMA: Complex64 = Complex64::new(0.6870, 0.0036);
const OCEAN_G: f64 = 6.67428e-11;
const SEAWATER_DENSITY: f64 = 1025.0;
const EQUATORIAL_GRAVITY: f64 = 9.7803278;

/// Conventional mean pole model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MeanPole {
    /// Cubic before 2010, linear after.
    Iers2010,
    /// Secular linear pole.
    #[default]
    Iers2018,
}

/// Polar motion in arcseconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolarMotion {
    pub x: f64,
    pub y: f64,
}

impl PolarMotion {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl MeanPole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Iers2010 => "IERS2010",
            Self::Iers2018 => "IERS2018",
        }
    }

    /// Mean pole position at a decimal year.
    ///
    /// ```
    /// use tidal_predict::MeanPole;
    ///
    /// let p = MeanPole::Iers2018.position(2000.0);
    /// assert!((p.x - 0.0550).abs() < 1e-12);
    /// assert!((p.y - 0.3205).abs() < 1e-12);
    /// ```
    pub fn position(&self, year: f64) -> PolarMotion {
        let dt = year - 2000.0;
        // milliarcseconds
        let (x, y) = match self {
            Self::Iers2018 => (55.0 + 1.677 * dt, 320.5 + 3.460 * dt),
            Self::Iers2010 if year <= 2010.0 => (
                polynomial_sum(&[55.974, 1.8243, 0.18413, 0.007024], dt),
                polynomial_sum(&[346.346, 1.7896, -0.10729, -0.000908], dt),
            ),
            Self::Iers2010 => (23.513 + 7.6141 * dt, 358.891 - 0.6287 * dt),
        };
        PolarMotion::new(x / 1000.0, y / 1000.0)
    }

    /// Wobble `(m₁, m₂)` in radians for polar motion `pole` at `time`.
    pub fn wobble(&self, time: &TideTime, pole: PolarMotion) -> (f64, f64) {
        let mean = self.position(mjd_to_decimal_year(time.mjd()));
        (
            (pole.x - mean.x) * ARCSEC_TO_RAD,
            -(pole.y - mean.y) * ARCSEC_TO_RAD,
        )
    }
}

impl fmt::Display for MeanPole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeanPole {
    type Err = TideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "iers2010" | "2010" => Ok(Self::Iers2010),
            "iers2018" | "2018" => Ok(Self::Iers2018),
            _ => Err(TideError::invalid_input(
                "mean pole",
                &format!("{} is not one of IERS2010, IERS2018", s),
            )),
        }
    }
}

/// Caller-supplied ocean pole tide coefficients `u = u_R + i·u_I` at a point,
/// per component, from the Desai (2002) map.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OceanPoleCoefficients {
    pub radial: Complex64,
    pub north: Complex64,
    pub east: Complex64,
}

fn check_lengths(times: usize, others: &[(&str, usize)]) -> TideResult<()> {
    for (context, len) in others {
        if *len != times {
            return Err(TideError::dimension_mismatch(context, times, *len));
        }
    }
    Ok(())
}

/// Load pole tide for one station and wobble.
pub fn load_pole_displacement(station: &Vector3, m1: f64, m2: f64) -> LocalDisplacement {
    let frame = LocalFrame::from_ecef(station);
    let (theta, lambda) = (frame.colatitude, frame.longitude);
    let r = station.magnitude();
    let k = EARTH_ROTATION_RATE * EARTH_ROTATION_RATE * r * r / normal_gravity(theta);
    let (sl, cl) = libm::sincos(lambda);
    let radial = -POLE_H2 * k / 2.0 * libm::sin(2.0 * theta) * (m1 * cl + m2 * sl);
    let colat = -POLE_L2 * k * libm::cos(2.0 * theta) * (m1 * cl + m2 * sl);
    let east = POLE_L2 * k * libm::cos(theta) * (m1 * sl - m2 * cl);
    LocalDisplacement::new(-colat, east, radial)
}

/// Load pole tide, North/East/Radial metres, one station and pole per time.
#[instrument(skip_all, fields(times = times.len(), mean_pole = %model))]
pub fn load_pole_tide(
    times: &[TideTime],
    stations: &[Vector3],
    pole: &[PolarMotion],
    model: MeanPole,
) -> TideResult<Vec<LocalDisplacement>> {
    check_lengths(
        times.len(),
        &[("stations", stations.len()), ("polar motion", pole.len())],
    )?;
    let out: Vec<LocalDisplacement> = times
        .iter()
        .zip(stations.iter().zip(pole))
        .map(|(t, (x, p))| {
            let (m1, m2) = model.wobble(t, *p);
            load_pole_displacement(x, m1, m2)
        })
        .collect();
    debug!(samples = out.len(), "load pole tide complete");
    Ok(out)
}

/// Scale `K = 4πG·a·ρ_w·H_p / (3g)` of the ocean pole tide, metres.
pub fn ocean_pole_scale() -> f64 {
    let a = IERS_EQUATORIAL_RADIUS;
    let omega2 = EARTH_ROTATION_RATE * EARTH_ROTATION_RATE;
    let hp = libm::sqrt(8.0 * std::f64::consts::PI / 15.0) * omega2 * a.powi(4) / WGS84_GM;
    4.0 * std::f64::consts::PI * OCEAN_G * a * SEAWATER_DENSITY * hp / (3.0 * EQUATORIAL_GRAVITY)
}

fn ocean_component(k: f64, m1: f64, m2: f64, u: Complex64) -> f64 {
    let g = OCEAN_GAMMA;
    k * ((m1 * g.re + m2 * g.im) * u.re + (m2 * g.re - m1 * g.im) * u.im)
}

/// Ocean pole tide, North/East/Radial metres, one set of coefficients and
/// pole per time.
#[instrument(skip_all, fields(times = times.len(), mean_pole = %model))]
pub fn ocean_pole_tide(
    times: &[TideTime],
    coefficients: &[OceanPoleCoefficients],
    pole: &[PolarMotion],
    model: MeanPole,
) -> TideResult<Vec<LocalDisplacement>> {
    check_lengths(
        times.len(),
        &[
            ("ocean pole coefficients", coefficients.len()),
            ("polar motion", pole.len()),
        ],
    )?;
    let k = ocean_pole_scale();
    let out: Vec<LocalDisplacement> = times
        .iter()
        .zip(coefficients.iter().zip(pole))
        .map(|(t, (u, p))| {
            let (m1, m2) = model.wobble(t, *p);
            LocalDisplacement::new(
                ocean_component(k, m1, m2, u.north),
                ocean_component(k, m1, m2, u.east),
                ocean_component(k, m1, m2, u.radial),
            )
        })
        .collect();
    debug!(samples = out.len(), "ocean pole tide complete");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use tidal_core::Location;

    #[test]
    fn iers2010_pole_is_continuous_at_2010() {
        let before = MeanPole::Iers2010.position(2010.0);
        let after = MeanPole::Iers2010.position(2010.0 + 1e-9);
        assert_abs_diff_eq!(before.x, after.x, epsilon = 1e-5);
        assert_abs_diff_eq!(before.y, after.y, epsilon = 1e-5);
    }

    #[test]
    fn secular_pole_drifts_linearly() {
        let p = MeanPole::Iers2018.position(2020.0);
        assert_abs_diff_eq!(p.x, 0.08854, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 0.3897, epsilon = 1e-12);
    }

    #[test]
    fn load_pole_tide_matches_conventional_magnitudes() {
        // 33 mm radial and 9 mm transverse per arcsecond of wobble
        let station = Location::from_degrees(45.0, 0.0, 0.0).unwrap().to_ecef();
        let m1 = ARCSEC_TO_RAD;
        let d = load_pole_displacement(&station, m1, 0.0);
        let theta = LocalFrame::from_ecef(&station).colatitude;
        assert_abs_diff_eq!(d.radial, -0.033 * (2.0 * theta).sin(), epsilon = 1e-3);
        assert_abs_diff_eq!(d.north, 0.009 * (2.0 * theta).cos(), epsilon = 5e-4);
        assert_abs_diff_eq!(d.east, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn pole_tides_reference_values() {
        let t = [TideTime::from_mjd(58849.0, 0.0)];
        let station = [Vector3::new(4075578.385, 931852.890, 4801570.154)];
        let pole = [PolarMotion::new(0.15, 0.40)];
        let (m1, m2) = MeanPole::Iers2018.wobble(&t[0], pole[0]);
        assert_abs_diff_eq!(m1, 2.979776182188627e-7, epsilon = 1e-18);
        assert_abs_diff_eq!(m2, -4.995877226635099e-8, epsilon = 1e-18);

        let d = load_pole_tide(&t, &station, &pole, MeanPole::Iers2018).unwrap();
        assert_abs_diff_eq!(d[0].north, 7.059113954950555e-5, epsilon = 1e-12);
        assert_abs_diff_eq!(d[0].east, 1.5947468905283093e-4, epsilon = 1e-12);
        assert_abs_diff_eq!(d[0].radial, -1.8867330771876211e-3, epsilon = 1e-12);

        assert_abs_diff_eq!(ocean_pole_scale(), 5340.428562229677, epsilon = 1e-8);
        let u = [OceanPoleCoefficients {
            radial: Complex64::new(0.0112, -0.0047),
            north: Complex64::new(0.0021, 0.0013),
            east: Complex64::new(-0.0035, 0.0009),
        }];
        let o = ocean_pole_tide(&t, &u, &pole, MeanPole::Iers2018).unwrap();
        assert_abs_diff_eq!(o[0].north, 2.0480645363259866e-6, epsilon = 1e-14);
        assert_abs_diff_eq!(o[0].east, -3.993106039673986e-6, epsilon = 1e-14);
        assert_abs_diff_eq!(o[0].radial, 1.3121957989571265e-5, epsilon = 1e-14);
    }

    #[test]
    fn no_wobble_no_tide() {
        let t = [TideTime::from_mjd(58849.0, 0.0)];
        let mean = MeanPole::Iers2018.position(mjd_to_decimal_year(58849.0));
        let station = [Location::from_degrees(-33.0, 151.0, 10.0).unwrap().to_ecef()];
        let d = load_pole_tide(&t, &station, &[mean], MeanPole::Iers2018).unwrap();
        assert_abs_diff_eq!(d[0].radial, 0.0, epsilon = 1e-15);
        let u = OceanPoleCoefficients {
            radial: Complex64::new(0.01, -0.02),
            ..Default::default()
        };
        let o = ocean_pole_tide(&t, &[u], &[mean], MeanPole::Iers2018).unwrap();
        assert_abs_diff_eq!(o[0].radial, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn ocean_pole_tide_is_linear_in_wobble() {
        let k = ocean_pole_scale();
        let u = Complex64::new(0.012, -0.004);
        let a = ocean_component(k, 1e-6, 2e-6, u);
        let b = ocean_component(k, 2e-6, 4e-6, u);
        assert_abs_diff_eq!(b, 2.0 * a, epsilon = 1e-15);
        assert!(k > 5000.0 && k < 6000.0);
    }

    #[test]
    fn mean_pole_parses() {
        assert_eq!("iers2010".parse::<MeanPole>().unwrap(), MeanPole::Iers2010);
        assert_eq!("IERS2018".parse::<MeanPole>().unwrap(), MeanPole::Iers2018);
        assert!("2003".parse::<MeanPole>().is_err());
        assert_eq!(MeanPole::Iers2010.to_string(), "IERS2010");
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let t = [TideTime::from_tide_days(0.0); 2];
        assert!(matches!(
            load_pole_tide(&t, &[Vector3::x_axis()], &[PolarMotion::default(); 2], MeanPole::Iers2018),
            Err(TideError::DimensionMismatch { .. })
        ));
    }
}
