//! Doodson phase angles used by the IERS frequency-dependent station corrections.
//!
//! These use their own polynomial set. The lunar longitude carries the
//! general precession correction `PR` and the node is given as `N' = -N`.

use tidal_core::constants::{DAYS_PER_JULIAN_CENTURY, J2000_MJD};
use tidal_core::math::{normalize_degrees, polynomial_sum};
use tidal_time::TideTime;

const S: [f64; 5] = [218.3164477, 481267.88123421, -1.5786e-3, 1.855835e-6, -1.53388e-8];
const TAU_SOLAR: [f64; 4] = [280.4606184, 36000.7700536, 3.8793e-4, -2.58e-8];
const PR: [f64; 5] = [0.0, 1.396971278, 3.08889e-4, 2.1e-8, 7.0e-9];
const H: [f64; 5] = [280.46645, 36000.7697489, 3.0322222e-4, 2.0e-8, -6.54e-9];
const P: [f64; 5] = [83.3532465, 4069.0137287, -1.032172222e-2, -1.24991e-5, 5.263e-8];
const ZNS: [f64; 5] = [234.95544499, 1934.13626197, -2.07561111e-3, -2.13944e-6, 1.65e-8];
const PS: [f64; 5] = [282.93734098, 1.71945766667, 4.5688889e-4, -1.778e-8, -3.34e-9];

/// Phase angles in degrees, each in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoodsonAngles {
    /// Mean lunar time.
    pub tau: f64,
    pub s: f64,
    pub h: f64,
    pub p: f64,
    /// Negative longitude of the ascending node, `N'`.
    pub zns: f64,
    pub ps: f64,
}

impl DoodsonAngles {
    /// `t` in Julian centuries (TT) from J2000, `hour` the UT hour of day.
    pub fn at(t: f64, hour: f64) -> Self {
        let s = polynomial_sum(&S, t);
        let tau = hour * 15.0 - s + polynomial_sum(&TAU_SOLAR, t);
        Self {
            tau: normalize_degrees(tau),
            s: normalize_degrees(s + polynomial_sum(&PR, t)),
            h: normalize_degrees(polynomial_sum(&H, t)),
            p: normalize_degrees(polynomial_sum(&P, t)),
            zns: normalize_degrees(polynomial_sum(&ZNS, t)),
            ps: normalize_degrees(polynomial_sum(&PS, t)),
        }
    }

    pub fn from_time(time: &TideTime) -> Self {
        Self::at(time.centuries(), time.hour())
    }

    /// Argument `τ·n0 + s·n1 + h·n2 + p·n3 + N'·n4 + ps·n5` in degrees.
    pub fn argument(&self, multipliers: &[f64; 6]) -> f64 {
        let angles = [self.tau, self.s, self.h, self.p, self.zns, self.ps];
        angles.iter().zip(multipliers).map(|(a, m)| a * m).sum()
    }
}

/// Doodson angles at a Modified Julian Day (UT) with ΔT in days.
pub fn doodson_arguments(mjd: f64, deltat: f64) -> DoodsonAngles {
    let t = (mjd + deltat - J2000_MJD) / DAYS_PER_JULIAN_CENTURY;
    let hour = (mjd - mjd.floor()) * 24.0;
    DoodsonAngles::at(t, hour)
}
