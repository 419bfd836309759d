//! Delaunay arguments from the IERS Conventions (2010), Chapter 5.
//!
//! Implemented on `f64` holding Julian centuries (TT) from J2000.0. The
//! `*_arcsec` methods return the raw polynomial, continuous in time; the
//! plain methods reduce to radians in `[0, 2π)`.
//!
//! ```
//! use tidal_ephemeris::DelaunayArgs;
//!
//! let t: f64 = 0.1;
//! let l = t.moon_mean_anomaly();
//! let om = t.moon_ascending_node_longitude();
//! assert!(l >= 0.0 && om >= 0.0);
//! ```

use tidal_core::constants::{ARCSEC_TO_RAD, CIRCULAR_ARCSECONDS, DAYS_PER_JULIAN_CENTURY, J2000_MJD};
use tidal_core::math::{fmod, polynomial_sum};

const L: [f64; 5] = [485868.249036, 1717915923.2178, 31.8792, 0.051635, -2.447e-4];
const LP: [f64; 5] = [1287104.79305, 129596581.0481, -0.5532, 1.36e-4, -1.149e-5];
const F: [f64; 5] = [335779.526232, 1739527262.8478, -12.7512, -1.037e-3, 4.17e-6];
const D: [f64; 5] = [1072260.70369, 1602961601.2090, -6.3706, 6.593e-3, -3.169e-5];
const OMEGA: [f64; 5] = [450160.398036, -6962890.5431, 7.4722, 7.702e-3, -5.939e-5];

pub trait DelaunayArgs {
    /// Mean anomaly of the Moon, `l`, in arcseconds.
    fn moon_mean_anomaly_arcsec(&self) -> f64;

    /// Mean anomaly of the Sun, `l'`, in arcseconds.
    fn sun_mean_anomaly_arcsec(&self) -> f64;

    /// Mean argument of latitude of the Moon, `F = L - Ω`, in arcseconds.
    fn mean_argument_of_latitude_arcsec(&self) -> f64;

    /// Mean elongation of the Moon from the Sun, `D`, in arcseconds.
    fn mean_elongation_arcsec(&self) -> f64;

    /// Mean longitude of the ascending lunar node, `Ω`, in arcseconds.
    fn moon_ascending_node_longitude_arcsec(&self) -> f64;

    fn moon_mean_anomaly(&self) -> f64 {
        to_radians(self.moon_mean_anomaly_arcsec())
    }

    fn sun_mean_anomaly(&self) -> f64 {
        to_radians(self.sun_mean_anomaly_arcsec())
    }

    fn mean_argument_of_latitude(&self) -> f64 {
        to_radians(self.mean_argument_of_latitude_arcsec())
    }

    fn mean_elongation(&self) -> f64 {
        to_radians(self.mean_elongation_arcsec())
    }

    fn moon_ascending_node_longitude(&self) -> f64 {
        to_radians(self.moon_ascending_node_longitude_arcsec())
    }
}

#[inline]
fn to_radians(arcsec: f64) -> f64 {
    let r = fmod(arcsec, CIRCULAR_ARCSECONDS) * ARCSEC_TO_RAD;
    if r < 0.0 {
        r + std::f64::consts::TAU
    } else {
        r
    }
}

impl DelaunayArgs for f64 {
    #[inline]
    fn moon_mean_anomaly_arcsec(&self) -> f64 {
        polynomial_sum(&L, *self)
    }

    #[inline]
    fn sun_mean_anomaly_arcsec(&self) -> f64 {
        polynomial_sum(&LP, *self)
    }

    #[inline]
    fn mean_argument_of_latitude_arcsec(&self) -> f64 {
        polynomial_sum(&F, *self)
    }

    #[inline]
    fn mean_elongation_arcsec(&self) -> f64 {
        polynomial_sum(&D, *self)
    }

    #[inline]
    fn moon_ascending_node_longitude_arcsec(&self) -> f64 {
        polynomial_sum(&OMEGA, *self)
    }
}

/// The five Delaunay arguments in radians at one epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DelaunayArguments {
    pub l: f64,
    pub lp: f64,
    pub f: f64,
    pub d: f64,
    pub omega: f64,
}

impl DelaunayArguments {
    /// Evaluates the arguments at a Modified Julian Day on the TT scale.
    pub fn at_mjd(mjd_tt: f64) -> Self {
        Self::at_centuries((mjd_tt - J2000_MJD) / DAYS_PER_JULIAN_CENTURY)
    }

    pub fn at_centuries(t: f64) -> Self {
        Self {
            l: t.moon_mean_anomaly(),
            lp: t.sun_mean_anomaly(),
            f: t.mean_argument_of_latitude(),
            d: t.mean_elongation(),
            omega: t.moon_ascending_node_longitude(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::TAU;

    #[test]
    fn reference_values_at_2008() {
        let args = DelaunayArguments::at_mjd(54465.0);
        assert_abs_diff_eq!(args.l, 2.291187512612069099, epsilon = 1e-12);
        assert_abs_diff_eq!(args.lp, 6.212931111003726414, epsilon = 1e-11);
        assert_abs_diff_eq!(args.f, 3.658025792050572989, epsilon = 1e-12);
        assert_abs_diff_eq!(args.d, 4.554139562402433228, epsilon = 1e-12);
        assert_abs_diff_eq!(args.omega, -0.5167379217231804489 + TAU, epsilon = 1e-12);
    }

    #[test]
    fn centuries_and_mjd_agree() {
        let a = DelaunayArguments::at_centuries(0.07995893223819302);
        let b = DelaunayArguments::at_mjd(54465.0);
        assert_abs_diff_eq!(a.l, b.l, epsilon = 1e-12);
        assert_abs_diff_eq!(a.omega, b.omega, epsilon = 1e-12);
    }

    #[test]
    fn radians_stay_in_range() {
        for t in [-3.0, -0.5, 0.0, 0.25, 2.0] {
            let a = DelaunayArguments::at_centuries(t);
            for v in [a.l, a.lp, a.f, a.d, a.omega] {
                assert!((0.0..TAU).contains(&v));
            }
        }
    }
}
