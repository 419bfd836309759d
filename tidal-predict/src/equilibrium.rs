//! Long-period equilibrium tide.
//!
//! Direct summation of the fifteen Cartwright-Tayler-Edden degree-2 lines
//! larger than 1 mm, after Ray's `LPEQMT`. Each line is a cosine of a
//! combination of the mean longitudes `(s, h, p, N′, p′)` with no nodal
//! correction, scaled by the body-tide factor `γ₂ = 1 + k₂ − h₂` and the
//! normalized degree-2 zonal harmonic of latitude.

use tidal_core::{TideError, TideResult};
use tidal_ephemeris::{mean_longitudes, Formalism};
use tidal_time::TideTime;
use tracing::instrument;

use crate::harmonic::Shape;

/// `1 + k₂ − h₂` with `k₂ = 0.302`, `h₂ = 0.609`.
pub const GAMMA_2: f64 = 0.693;

/// A spectral line: multipliers of `(s, h, p, N′, p′)` and amplitude in cm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquilibriumLine {
    pub coefficients: [i8; 5],
    pub amplitude: f64,
}

const fn line(coefficients: [i8; 5], amplitude: f64) -> EquilibriumLine {
    EquilibriumLine {
        coefficients,
        amplitude,
    }
}

/// The fifteen lines, node first. The `cos N′` modulation of Mm is split
/// into its two sidelines.
pub const LONG_PERIOD_LINES: [EquilibriumLine; 15] = [
    line([0, 0, 0, 1, 0], 2.79),
    line([0, 1, 0, 0, -1], -0.49),
    line([0, 2, 0, 0, 0], -3.10),
    line([1, -2, 1, 0, 0], -0.67),
    line([1, 0, -1, 0, 0], -3.52),
    line([1, 0, -1, 1, 0], 0.23),
    line([1, 0, -1, -1, 0], 0.23),
    line([2, 0, 0, 0, 0], -6.66),
    line([2, 0, 0, 1, 0], -2.76),
    line([2, 0, 0, 2, 0], -0.26),
    line([2, -2, 0, 0, 0], -0.58),
    line([2, 0, -2, 0, 0], -0.29),
    line([3, 0, -1, 0, 0], -1.27),
    line([3, 0, -1, 1, 0], -0.53),
    line([3, -2, 1, 0, 0], -0.24),
];

/// Sum of the lines in cm, before latitude scaling.
fn potential(time: &TideTime, formalism: Formalism) -> f64 {
    let m = mean_longitudes(time.mjd_tt(), formalism);
    let args = [m.s, m.h, m.p, -m.n, m.pp];
    LONG_PERIOD_LINES
        .iter()
        .map(|l| {
            let theta: f64 = l
                .coefficients
                .iter()
                .zip(args)
                .map(|(c, a)| f64::from(*c) * a)
                .sum();
            l.amplitude * libm::cos(theta.to_radians())
        })
        .sum()
}

/// `γ₂·√(5/4π)·P₂(sin φ)` in metres per cm of potential.
fn latitude_factor(latitude: f64) -> TideResult<f64> {
    if !latitude.is_finite() || latitude.abs() > 90.0 {
        return Err(TideError::invalid_input(
            "equilibrium tide",
            &format!("latitude {} outside [-90, 90]", latitude),
        ));
    }
    let sin_phi = libm::sin(latitude.to_radians());
    let p20 = 0.5 * (3.0 * sin_phi * sin_phi - 1.0);
    Ok(GAMMA_2 * libm::sqrt(5.0 / (4.0 * std::f64::consts::PI)) * p20 / 100.0)
}

/// Long-period equilibrium tide in metres.
///
/// `latitudes` are in degrees. The time and latitude axes follow `shape` as
/// in harmonic prediction.
///
/// ```
/// use tidal_ephemeris::Formalism;
/// use tidal_predict::{equilibrium_tide, Shape};
/// use tidal_time::TideTime;
///
/// let t = [TideTime::from_tide_days(0.0), TideTime::from_tide_days(7.0)];
/// let z = equilibrium_tide(&t, &[45.0], Formalism::Astro5, Shape::TimeSeries).unwrap();
/// assert_eq!(z.len(), 2);
/// assert!(z.iter().all(|v| v.abs() < 0.1));
/// ```
#[instrument(skip_all, fields(times = times.len(), points = latitudes.len(), formalism = %formalism))]
pub fn equilibrium_tide(
    times: &[TideTime],
    latitudes: &[f64],
    formalism: Formalism,
    shape: Shape,
) -> TideResult<Vec<f64>> {
    let n = shape.output_len(times.len(), latitudes.len())?;
    let factors = latitudes
        .iter()
        .map(|&lat| latitude_factor(lat))
        .collect::<TideResult<Vec<_>>>()?;
    let potentials: Vec<f64> = times.iter().map(|t| potential(t, formalism)).collect();
    Ok((0..n)
        .map(|k| {
            let (ti, pi) = shape.indices(k);
            potentials[ti] * factors[pi]
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Closed form with fixed-rate longitudes referred to 1987-01-01.
    fn lpeqmt(days: f64, latitude: f64) -> f64 {
        const PHC: [f64; 4] = [290.21, 280.12, 274.35, 343.51];
        const DPD: [f64; 4] = [13.1763965, 0.9856473, 0.1114041, 0.0529539];
        let t = days + 1826.0;
        let shpn: Vec<f64> = (0..4)
            .map(|i| (PHC[i] + DPD[i] * t).rem_euclid(360.0).to_radians())
            .collect();
        let (s, h, p, n) = (shpn[0], shpn[1], shpn[2], shpn[3]);
        let z = 2.79 * n.cos() - 0.49 * (h - 283f64.to_radians()).cos() - 3.10 * (2.0 * h).cos()
            - 0.67 * (s - 2.0 * h + p).cos()
            - (3.52 - 0.46 * n.cos()) * (s - p).cos()
            - 6.66 * (2.0 * s).cos()
            - 2.76 * (2.0 * s + n).cos()
            - 0.26 * (2.0 * s + 2.0 * n).cos()
            - 0.58 * (2.0 * s - 2.0 * h).cos()
            - 0.29 * (2.0 * s - 2.0 * p).cos()
            - 1.27 * (3.0 * s - p).cos()
            - 0.53 * (3.0 * s - p + n).cos()
            - 0.24 * (3.0 * s - 2.0 * h + p).cos();
        let phi = latitude.to_radians();
        let p20 = 0.5 * (3.0 * phi.sin().powi(2) - 1.0);
        GAMMA_2 * (5.0 / (4.0 * std::f64::consts::PI)).sqrt() * p20 * z / 100.0
    }

    #[test]
    fn matches_closed_form() {
        let days: Vec<f64> = (0..40).map(|k| -800.0 + 311.7 * k as f64).collect();
        let times: Vec<TideTime> = days.iter().map(|&d| TideTime::from_tide_days(d)).collect();
        let lats: Vec<f64> = (0..40).map(|k| -80.0 + 4.1 * k as f64).collect();
        let z = equilibrium_tide(&times, &lats, Formalism::Astro5, Shape::Drift).unwrap();
        for ((d, lat), v) in days.iter().zip(&lats).zip(&z) {
            assert_abs_diff_eq!(*v, lpeqmt(*d, *lat), epsilon = 1e-4);
        }
    }

    #[test]
    fn vanishes_at_zonal_node_latitude() {
        let lat = (1.0f64 / 3.0).sqrt().asin().to_degrees();
        let t = [TideTime::from_tide_days(1234.5)];
        let z = equilibrium_tide(&t, &[lat, -lat], Formalism::Cartwright, Shape::Map).unwrap();
        assert_abs_diff_eq!(z[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(z[1], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn hemispheres_are_symmetric() {
        let t: Vec<TideTime> = (0..10).map(|k| TideTime::from_tide_days(k as f64 * 3.3)).collect();
        let north = equilibrium_tide(&t, &[52.0], Formalism::Meeus, Shape::TimeSeries).unwrap();
        let south = equilibrium_tide(&t, &[-52.0], Formalism::Meeus, Shape::TimeSeries).unwrap();
        assert_eq!(north, south);
    }

    #[test]
    fn rejects_bad_latitude() {
        let t = [TideTime::from_tide_days(0.0)];
        assert!(matches!(
            equilibrium_tide(&t, &[91.0], Formalism::Astro5, Shape::Map),
            Err(TideError::InvalidInput { .. })
        ));
        assert!(equilibrium_tide(&t, &[f64::NAN], Formalism::Astro5, Shape::Map).is_err());
    }
}
