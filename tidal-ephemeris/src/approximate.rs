//! Low-order analytic positions of the Sun and Moon in the Earth-fixed frame.
//!
//! Series after Meeus (1998) and Montenbruck (1989). The Sun is good to about
//! 0.01° and the Moon to a few hundredths of a degree, which keeps solid-earth
//! tide errors well below a millimetre.
//!
//! Positions are rotated from the ecliptic of date into the Earth-fixed frame
//! using the Greenwich hour angle only, so precession, nutation and polar
//! motion are ignored.

use libm::{cos, sin};
use tidal_core::constants::{ARCSEC_TO_RAD, DEG_TO_RAD, J2000_OBLIQUITY_DEG};
use tidal_core::math::polynomial_sum;
use tidal_core::{RotationMatrix3, TideResult, Vector3};
use tidal_time::{greenwich_hour_angle, TideTime};

use crate::formalism::{ASTRO5_D, ASTRO5_N, ASTRO5_S};

const SOLAR_ANOMALY: [f64; 4] = [357.5256, 35999.049, -1.559e-4, -4.8e-7];

/// A source of geocentric Sun and Moon positions, metres in the Earth-fixed frame.
///
/// [`ApproximateEphemeris`] is the built-in implementation. A numerical
/// planetary ephemeris plugs in by implementing this trait.
pub trait Ephemeris {
    fn sun(&self, time: &TideTime) -> TideResult<Vector3>;

    fn moon(&self, time: &TideTime) -> TideResult<Vector3>;

    fn name(&self) -> &str;

    /// Sun and Moon positions for each time.
    fn positions(&self, times: &[TideTime]) -> TideResult<Vec<(Vector3, Vector3)>> {
        times
            .iter()
            .map(|t| Ok((self.sun(t)?, self.moon(t)?)))
            .collect()
    }
}

/// Meeus/Montenbruck series; infallible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApproximateEphemeris;

impl Ephemeris for ApproximateEphemeris {
    fn sun(&self, time: &TideTime) -> TideResult<Vector3> {
        Ok(solar_ecef(time))
    }

    fn moon(&self, time: &TideTime) -> TideResult<Vector3> {
        Ok(lunar_ecef(time))
    }

    fn name(&self) -> &str {
        "approximate"
    }
}

fn earth_fixed(time: &TideTime) -> RotationMatrix3 {
    RotationMatrix3::about_z(greenwich_hour_angle(time.mjd()) * DEG_TO_RAD)
}

/// Geocentric solar position at `time`.
///
/// Angles are evaluated on the TT scale, the hour angle on UT.
pub fn solar_ecef(time: &TideTime) -> Vector3 {
    let t = time.centuries();
    let perigee = (282.94 + 1.7192 * t) * DEG_TO_RAD;
    let m = polynomial_sum(&SOLAR_ANOMALY, t) * DEG_TO_RAD;

    let r = 1e9 * (149.619 - 2.499 * cos(m) - 0.021 * cos(2.0 * m));
    let lambda = perigee + m + ARCSEC_TO_RAD * (6892.0 * sin(m) + 72.0 * sin(2.0 * m));

    // ecliptic -> equatorial
    let eps = J2000_OBLIQUITY_DEG * DEG_TO_RAD;
    let v = Vector3::new(
        r * cos(lambda),
        r * sin(lambda) * cos(eps),
        r * sin(lambda) * sin(eps),
    );
    earth_fixed(time) * v
}

/// Geocentric lunar position at `time`.
pub fn lunar_ecef(time: &TideTime) -> Vector3 {
    let t = time.centuries();
    let s = polynomial_sum(&ASTRO5_S, t) * DEG_TO_RAD;
    let d = polynomial_sum(&ASTRO5_D, t) * DEG_TO_RAD;
    let n = polynomial_sum(&ASTRO5_N, t) * DEG_TO_RAD;
    let f = s - n;
    let m = (357.5256 + 35999.049 * t) * DEG_TO_RAD;
    let l = (134.96292 + 477198.86753 * t) * DEG_TO_RAD;

    let r = 1e3
        * (385000.0 - 20905.0 * cos(l) - 3699.0 * cos(2.0 * d - l) - 2956.0 * cos(2.0 * d)
            - 570.0 * cos(2.0 * l)
            + 246.0 * cos(2.0 * l - 2.0 * d)
            - 205.0 * cos(m - 2.0 * d)
            - 171.0 * cos(l + 2.0 * d)
            - 152.0 * cos(l + m - 2.0 * d));

    let lambda = s + ARCSEC_TO_RAD
        * (22640.0 * sin(l) + 769.0 * sin(2.0 * l) - 4586.0 * sin(l - 2.0 * d)
            + 2370.0 * sin(2.0 * d)
            - 668.0 * sin(m)
            - 412.0 * sin(2.0 * f)
            - 212.0 * sin(2.0 * l - 2.0 * d)
            - 206.0 * sin(l + m - 2.0 * d)
            + 192.0 * sin(l + 2.0 * d)
            - 165.0 * sin(m - 2.0 * d)
            - 148.0 * sin(l - m)
            - 125.0 * sin(d)
            - 110.0 * sin(l + m)
            - 55.0 * sin(2.0 * f - 2.0 * d));

    let q = ARCSEC_TO_RAD * (412.0 * sin(2.0 * f) + 541.0 * sin(m));
    let beta = ARCSEC_TO_RAD
        * (18520.0 * sin(f + lambda - s + q) - 526.0 * sin(f - 2.0 * d)
            + 44.0 * sin(l + f - 2.0 * d)
            - 31.0 * sin(-l + f - 2.0 * d)
            - 25.0 * sin(-2.0 * l + f)
            - 23.0 * sin(m + f - 2.0 * d)
            + 21.0 * sin(-l + f)
            + 11.0 * sin(-m + f - 2.0 * d));

    let ecliptic = Vector3::new(
        r * cos(lambda) * cos(beta),
        r * sin(lambda) * cos(beta),
        r * sin(beta),
    );
    let equatorial = RotationMatrix3::about_x(-J2000_OBLIQUITY_DEG * DEG_TO_RAD) * ecliptic;
    earth_fixed(time) * equatorial
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn separation_deg(a: &Vector3, b: &Vector3) -> f64 {
        (a.dot(b) / (a.magnitude() * b.magnitude())).clamp(-1.0, 1.0).acos().to_degrees()
    }

    fn celestial(time: &TideTime, v: Vector3) -> Vector3 {
        earth_fixed(time).transpose() * v
    }

    #[test]
    fn distances_are_physical() {
        for k in 0..60 {
            let time = TideTime::from_mjd(50000.0 + 61.3 * k as f64, 0.0);
            let sun = solar_ecef(&time);
            let moon = lunar_ecef(&time);
            assert!(sun.magnitude() > 1.47e11 && sun.magnitude() < 1.53e11);
            assert!(moon.magnitude() > 3.5e8 && moon.magnitude() < 4.1e8);
            let max_dec = (23.5f64).to_radians().sin();
            assert!(sun.z.abs() / sun.magnitude() <= max_dec);
        }
    }

    #[test]
    fn reference_positions() {
        let time = TideTime::from_mjd(55414.0, 0.0);
        let sun = solar_ecef(&time);
        assert_abs_diff_eq!(sun.x / 1e11, -1.4523048, epsilon = 1e-5);
        assert_abs_diff_eq!(sun.y / 1e9, -3.788017, epsilon = 1e-3);
        assert_abs_diff_eq!(sun.z / 1e10, 4.3819555, epsilon = 1e-5);
        let moon = lunar_ecef(&time);
        assert_abs_diff_eq!(moon.x / 1e8, -1.78145, epsilon = 1e-4);
        assert_abs_diff_eq!(moon.y / 1e8, 2.904895, epsilon = 1e-4);
        assert_abs_diff_eq!(moon.z / 1e8, 1.587175, epsilon = 1e-4);
    }

    #[test]
    fn matches_dehant_reference_directions() {
        // Celestial-frame Sun and Moon from the IERS dehanttideinel example, 2009-04-13.
        let time = TideTime::from_mjd(54934.0, 0.0);
        let sun = Vector3::new(137859926952.015, 54228127881.4350, 23509422341.6960);
        let moon = Vector3::new(-179996231.920342, -312468450.131567, -169288918.592160);

        let s = celestial(&time, solar_ecef(&time));
        let m = celestial(&time, lunar_ecef(&time));
        assert!(separation_deg(&s, &sun) < 0.01);
        assert!(separation_deg(&m, &moon) < 0.1);
        assert_abs_diff_eq!(s.magnitude() / sun.magnitude(), 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(m.magnitude() / moon.magnitude(), 1.0, epsilon = 2e-3);
    }

    #[test]
    fn trait_positions_match_free_functions() {
        let eph = ApproximateEphemeris;
        let times = [TideTime::from_mjd(55000.0, 0.0), TideTime::from_mjd(55000.5, 7.7e-4)];
        let pairs = eph.positions(&times).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].0, solar_ecef(&times[1]));
        assert_eq!(pairs[1].1, lunar_ecef(&times[1]));
        assert_eq!(eph.name(), "approximate");
    }
}
