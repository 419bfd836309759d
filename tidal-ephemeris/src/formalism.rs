//! Mean astronomical longitudes of the Moon and Sun.
//!
//! Every tidal argument is a linear combination of five slowly varying angles:
//!
//! | Symbol | Quantity |
//! |--------|----------|
//! | `s` | mean longitude of the Moon |
//! | `h` | mean longitude of the Sun |
//! | `p` | mean longitude of the lunar perigee |
//! | `N` | mean longitude of the ascending lunar node (decreasing) |
//! | `pp` | mean longitude of the solar perigee |
//!
//! Four polynomial formalisms are available. They agree to about an
//! arcsecond for `s`, `h`, `p` and `N` over 1900–2100, except Cartwright's
//! linear fit, which is only intended for 1990–2010 and drifts by ~30″ in `s`.
//! The solar perigee is only known to ~0.01° in any of them.
//!
//! The caller chooses the formalism explicitly; nothing falls back silently.
//! Inputs are Modified Julian Days on the dynamical scale (MJD + ΔT) except
//! for Cartwright, whose expressions already fold in the year-2000 ΔT.

use std::fmt;
use std::str::FromStr;

use tidal_core::constants::{ARCSEC_TO_RAD, DAYS_PER_JULIAN_CENTURY, J2000_MJD};
use tidal_core::math::{normalize_degrees, polynomial_rate, polynomial_sum};
use tidal_core::{TideError, TideResult};

use crate::delaunay::DelaunayArgs;

/// Polynomial formalism for the mean longitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Formalism {
    /// Linear fit by D. Cartwright for 1990–2010 (OTIS/ATLAS models).
    #[default]
    Cartwright,
    /// Meeus, *Astronomical Algorithms*, in days from J2000.
    Meeus,
    /// Meeus coefficients as implemented in ASTRO5 (GOT/FES models).
    Astro5,
    /// Derived from the IERS 2010 Delaunay arguments.
    Iers,
}

impl Formalism {
    pub const ALL: [Formalism; 4] = [
        Formalism::Cartwright,
        Formalism::Meeus,
        Formalism::Astro5,
        Formalism::Iers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cartwright => "Cartwright",
            Self::Meeus => "Meeus",
            Self::Astro5 => "ASTRO5",
            Self::Iers => "IERS",
        }
    }
}

impl fmt::Display for Formalism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Formalism {
    type Err = TideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cartwright" => Ok(Self::Cartwright),
            "meeus" => Ok(Self::Meeus),
            "astro5" => Ok(Self::Astro5),
            "iers" => Ok(Self::Iers),
            other => Err(TideError::invalid_input(
                "formalism",
                &format!("unknown formalism '{}'", other),
            )),
        }
    }
}

/// The five mean longitudes in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeanLongitudes {
    pub s: f64,
    pub h: f64,
    pub p: f64,
    pub n: f64,
    pub pp: f64,
}

impl MeanLongitudes {
    /// Wraps every longitude into `[0, 360)`.
    pub fn normalized(self) -> Self {
        Self {
            s: normalize_degrees(self.s),
            h: normalize_degrees(self.h),
            p: normalize_degrees(self.p),
            n: normalize_degrees(self.n),
            pp: normalize_degrees(self.pp),
        }
    }

    pub fn to_array(&self) -> [f64; 5] {
        [self.s, self.h, self.p, self.n, self.pp]
    }
}

// Meeus (days from J2000)
const MEEUS_S: [f64; 5] = [
    218.3164591,
    13.17639647754579,
    -9.9454632e-13,
    3.8086292e-20,
    -8.6184958e-27,
];
const MEEUS_H: [f64; 3] = [280.46645, 0.985647360164271, 2.2727347e-13];
const MEEUS_P: [f64; 5] = [
    83.3532430,
    0.11140352391786447,
    -7.7385418e-12,
    -2.5636086e-19,
    2.95738836e-26,
];
const MEEUS_N: [f64; 5] = [
    125.0445550,
    -0.052953762762491446,
    1.55628359e-12,
    4.390675353e-20,
    -9.26940435e-27,
];

// ASTRO5 (centuries from J2000)
pub(crate) const ASTRO5_S: [f64; 5] = [
    218.3164477,
    481267.88123421,
    -1.5786e-3,
    1.855835e-6,
    -1.53388e-8,
];
pub(crate) const ASTRO5_D: [f64; 5] = [
    297.8501921,
    445267.1114034,
    -1.8819e-3,
    1.83195e-6,
    -8.8445e-9,
];
const ASTRO5_P: [f64; 4] = [83.3532465, 4069.0137287, -1.032e-2, -1.249172e-5];
pub(crate) const ASTRO5_N: [f64; 4] = [125.04452, -1934.136261, 2.0708e-3, 2.22222e-6];

// Simon et al. (1994)
const SOLAR_PERIGEE: [f64; 2] = [282.94, 1.7192];

// Cartwright (days from 2000-01-01T12:00 TT expressed in UT)
const CARTWRIGHT_EPOCH: f64 = 51544.4993;
const CARTWRIGHT: [[f64; 2]; 4] = [
    [218.3164, 13.17639648],
    [280.4661, 0.98564736],
    [83.3535, 0.11140353],
    [125.0445, -0.05295377],
];
const CARTWRIGHT_PP: f64 = 282.8;

fn centuries(mjd: f64) -> f64 {
    (mjd - J2000_MJD) / DAYS_PER_JULIAN_CENTURY
}

fn astro5_h() -> [f64; 5] {
    let mut h = [0.0; 5];
    for (i, c) in h.iter_mut().enumerate() {
        *c = ASTRO5_S[i] - ASTRO5_D[i];
    }
    h
}

/// Mean longitudes without wrapping, continuous in time.
///
/// Suited to finite differences; [`mean_longitudes`] wraps the same values.
pub fn unwrapped_longitudes(mjd: f64, formalism: Formalism) -> MeanLongitudes {
    match formalism {
        Formalism::Cartwright => {
            let t = mjd - CARTWRIGHT_EPOCH;
            let [s, h, p, n] = CARTWRIGHT.map(|[c0, c1]| c0 + c1 * t);
            MeanLongitudes {
                s,
                h,
                p,
                n,
                pp: CARTWRIGHT_PP,
            }
        }
        Formalism::Meeus => {
            let t = mjd - J2000_MJD;
            MeanLongitudes {
                s: polynomial_sum(&MEEUS_S, t),
                h: polynomial_sum(&MEEUS_H, t),
                p: polynomial_sum(&MEEUS_P, t),
                n: polynomial_sum(&MEEUS_N, t),
                pp: polynomial_sum(&SOLAR_PERIGEE, t / DAYS_PER_JULIAN_CENTURY),
            }
        }
        Formalism::Astro5 => {
            let t = centuries(mjd);
            MeanLongitudes {
                s: polynomial_sum(&ASTRO5_S, t),
                h: polynomial_sum(&astro5_h(), t),
                p: polynomial_sum(&ASTRO5_P, t),
                n: polynomial_sum(&ASTRO5_N, t),
                pp: polynomial_sum(&SOLAR_PERIGEE, t),
            }
        }
        Formalism::Iers => {
            let t = centuries(mjd);
            let to_deg = ARCSEC_TO_RAD.to_degrees();
            let l = t.moon_mean_anomaly_arcsec() * to_deg;
            let lp = t.sun_mean_anomaly_arcsec() * to_deg;
            let f = t.mean_argument_of_latitude_arcsec() * to_deg;
            let d = t.mean_elongation_arcsec() * to_deg;
            let n = t.moon_ascending_node_longitude_arcsec() * to_deg;
            let s = f + n;
            let h = s - d;
            MeanLongitudes {
                s,
                h,
                p: s - l,
                n,
                pp: h - lp,
            }
        }
    }
}

/// Mean longitudes (degrees) at a Modified Julian Day.
///
/// ```
/// use tidal_ephemeris::{mean_longitudes, Formalism};
///
/// let a = mean_longitudes(55414.0, Formalism::Meeus);
/// let b = mean_longitudes(55414.0, Formalism::Iers);
/// assert!((a.s - b.s).abs() < 3e-4);
/// assert!((a.n - b.n).abs() < 3e-4);
/// ```
pub fn mean_longitudes(mjd: f64, formalism: Formalism) -> MeanLongitudes {
    unwrapped_longitudes(mjd, formalism).normalized()
}

/// Rates of the mean longitudes in degrees per day.
pub fn mean_longitude_rates(mjd: f64, formalism: Formalism) -> MeanLongitudes {
    match formalism {
        Formalism::Cartwright => {
            let [s, h, p, n] = CARTWRIGHT.map(|[_, c1]| c1);
            MeanLongitudes {
                s,
                h,
                p,
                n,
                pp: 0.0,
            }
        }
        Formalism::Meeus => {
            let t = mjd - J2000_MJD;
            MeanLongitudes {
                s: polynomial_rate(&MEEUS_S, t),
                h: polynomial_rate(&MEEUS_H, t),
                p: polynomial_rate(&MEEUS_P, t),
                n: polynomial_rate(&MEEUS_N, t),
                pp: SOLAR_PERIGEE[1] / DAYS_PER_JULIAN_CENTURY,
            }
        }
        Formalism::Astro5 => {
            let t = centuries(mjd);
            let per_day = |c: &[f64]| polynomial_rate(c, t) / DAYS_PER_JULIAN_CENTURY;
            MeanLongitudes {
                s: per_day(&ASTRO5_S),
                h: per_day(&astro5_h()),
                p: per_day(&ASTRO5_P),
                n: per_day(&ASTRO5_N),
                pp: SOLAR_PERIGEE[1] / DAYS_PER_JULIAN_CENTURY,
            }
        }
        Formalism::Iers => {
            // Delaunay polynomials are nearly linear; a centred difference over
            // one day is exact to ~1e-12 deg/day.
            let a = unwrapped_longitudes(mjd - 0.5, formalism);
            let b = unwrapped_longitudes(mjd + 0.5, formalism);
            MeanLongitudes {
                s: b.s - a.s,
                h: b.h - a.h,
                p: b.p - a.p,
                n: b.n - a.n,
                pp: b.pp - a.pp,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn angle_diff(a: f64, b: f64) -> f64 {
        normalize_degrees(a - b + 180.0) - 180.0
    }

    #[test]
    fn astro5_reference_values() {
        let m = mean_longitudes(55414.0, Formalism::Astro5);
        assert_abs_diff_eq!(m.s, 84.38258839064656, epsilon = 1e-9);
        assert_abs_diff_eq!(m.h, 134.4287192455772, epsilon = 1e-9);
        assert_abs_diff_eq!(m.p, 154.4290683231162, epsilon = 1e-9);
        assert_abs_diff_eq!(m.n, 280.1399501727354, epsilon = 1e-9);
        assert_abs_diff_eq!(m.pp, 283.1221340013689, epsilon = 1e-9);
    }

    #[test]
    fn precise_formalisms_agree_to_an_arcsecond() {
        let arcsec = 3e-4;
        for mjd in [40000.0, 48622.0, 55414.0, 60000.0] {
            let meeus = mean_longitudes(mjd, Formalism::Meeus);
            for other in [Formalism::Astro5, Formalism::Iers] {
                let m = mean_longitudes(mjd, other);
                assert!(angle_diff(meeus.s, m.s).abs() < arcsec, "{} s {}", other, mjd);
                assert!(angle_diff(meeus.h, m.h).abs() < arcsec, "{} h {}", other, mjd);
                assert!(angle_diff(meeus.p, m.p).abs() < arcsec, "{} p {}", other, mjd);
                assert!(angle_diff(meeus.n, m.n).abs() < arcsec, "{} N {}", other, mjd);
                assert!(angle_diff(meeus.pp, m.pp).abs() < 0.01, "{} pp {}", other, mjd);
            }
        }
    }

    #[test]
    fn cartwright_close_in_its_fit_window() {
        for mjd in [48622.0, 51544.5, 55197.0] {
            let c = mean_longitudes(mjd, Formalism::Cartwright);
            let m = mean_longitudes(mjd, Formalism::Meeus);
            assert!(angle_diff(c.s, m.s).abs() < 0.02);
            assert!(angle_diff(c.h, m.h).abs() < 1e-3);
            assert!(angle_diff(c.p, m.p).abs() < 2e-3);
            assert!(angle_diff(c.n, m.n).abs() < 1e-3);
            assert_eq!(c.pp, 282.8);
        }
    }

    #[test]
    fn longitudes_are_wrapped() {
        for f in Formalism::ALL {
            let m = mean_longitudes(70000.0, f);
            for v in [m.s, m.h, m.p, m.n] {
                assert!((0.0..360.0).contains(&v), "{} {}", f, v);
            }
        }
    }

    #[test]
    fn rates_match_finite_differences() {
        for f in Formalism::ALL {
            let r = mean_longitude_rates(51544.5, f);
            let a = unwrapped_longitudes(51544.0, f);
            let b = unwrapped_longitudes(51545.0, f);
            assert_abs_diff_eq!(r.s, b.s - a.s, epsilon = 1e-7);
            assert_abs_diff_eq!(r.h, b.h - a.h, epsilon = 1e-7);
            assert_abs_diff_eq!(r.n, b.n - a.n, epsilon = 1e-7);
        }
        let r = mean_longitude_rates(51544.5, Formalism::Astro5);
        assert_abs_diff_eq!(r.s, 13.176396, epsilon = 1e-5);
        assert_abs_diff_eq!(r.h, 0.985647, epsilon = 1e-5);
    }

    #[test]
    fn formalism_strings() {
        for f in Formalism::ALL {
            assert_eq!(f.to_string().parse::<Formalism>().unwrap(), f);
        }
        assert_eq!(" astro5 ".parse::<Formalism>().unwrap(), Formalism::Astro5);
        assert!("ephemeris".parse::<Formalism>().is_err());
    }
}
