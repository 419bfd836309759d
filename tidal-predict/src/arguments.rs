//! Equilibrium arguments and angular frequencies.
//!
//! The argument of a constituent with multipliers `(n0..n5, k)` is
//!
//! ```text
//! V = n0·τ + n1·s + n2·h + n3·p + n4·N' + n5·p' + 90°·k
//! ```
//!
//! where `τ = 15°·hour(UT) − s + h` is mean lunar time and `N' = −N`.
//! The mean longitudes are evaluated at `MJD + ΔT`, the hour of day on UT.

use std::fmt;
use std::str::FromStr;

use tidal_constituents::{Catalog, PhaseConvention};
use tidal_core::constants::{DEG_TO_RAD, J2000_MJD, SECONDS_PER_DAY_F64};
use tidal_core::math::normalize_degrees;
use tidal_core::{TideError, TideResult};
use tidal_ephemeris::{mean_longitude_rates, mean_longitudes, unwrapped_longitudes, Formalism};
use tidal_time::TideTime;

use crate::corrections::Corrections;

/// Mean lunar time and the five mean longitudes at one instant, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AstronomicalArguments {
    pub tau: f64,
    pub s: f64,
    pub h: f64,
    pub p: f64,
    /// Longitude of the ascending node `N` (the argument uses `-N`).
    pub n: f64,
    pub pp: f64,
}

impl AstronomicalArguments {
    pub fn at(time: &TideTime, formalism: Formalism) -> Self {
        let m = mean_longitudes(time.mjd_tt(), formalism);
        Self {
            tau: normalize_degrees(15.0 * time.hour() - m.s + m.h),
            s: m.s,
            h: m.h,
            p: m.p,
            n: m.n,
            pp: m.pp,
        }
    }

    /// Multiplicands of the seven coefficients, the last being the 90° step.
    pub fn to_array(&self) -> [f64; 7] {
        [self.tau, self.s, self.h, self.p, -self.n, self.pp, 90.0]
    }

    /// Argument of a coefficient row, wrapped into `[0, 360)`.
    pub fn argument(&self, row: &[i8; 7]) -> f64 {
        let v = self.to_array();
        normalize_degrees(
            row.iter()
                .zip(v.iter())
                .map(|(c, a)| f64::from(*c) * a)
                .sum(),
        )
    }
}

/// Coefficient rows for `names`, in the caller's order.
pub(crate) fn coefficient_rows<S: AsRef<str>>(
    catalog: &Catalog,
    names: &[S],
    convention: PhaseConvention,
) -> TideResult<Vec<[i8; 7]>> {
    catalog.coefficients_table(names, convention)
}

/// Equilibrium arguments in degrees, indexed `[time][constituent]`.
///
/// Longitudes come from the formalism of `corrections` and `s1` takes its
/// phase offset from the same convention.
///
/// ```
/// use tidal_constituents::Catalog;
/// use tidal_predict::{equilibrium_argument, Corrections};
/// use tidal_time::TideTime;
///
/// let t = [TideTime::from_tide_days(0.0)];
/// let g = equilibrium_argument(Catalog::global(), &["m2", "s2"], &t, Corrections::Otis)?;
/// // S2 is 30°/hour of solar time: zero at midnight
/// assert!(g[0][1].abs() < 1e-9 || (g[0][1] - 360.0).abs() < 1e-9);
/// # Ok::<(), tidal_core::TideError>(())
/// ```
pub fn equilibrium_argument<S: AsRef<str>>(
    catalog: &Catalog,
    names: &[S],
    times: &[TideTime],
    corrections: Corrections,
) -> TideResult<Vec<Vec<f64>>> {
    equilibrium_argument_with(
        catalog,
        names,
        times,
        corrections.formalism(),
        corrections.phase_convention(),
    )
}

/// As [`equilibrium_argument`] with an explicit formalism and phase convention.
pub fn equilibrium_argument_with<S: AsRef<str>>(
    catalog: &Catalog,
    names: &[S],
    times: &[TideTime],
    formalism: Formalism,
    convention: PhaseConvention,
) -> TideResult<Vec<Vec<f64>>> {
    let rows = coefficient_rows(catalog, names, convention)?;
    Ok(times
        .iter()
        .map(|t| {
            let args = AstronomicalArguments::at(t, formalism);
            rows.iter().map(|row| args.argument(row)).collect()
        })
        .collect())
}

/// How [`frequency`] differentiates the argument.
///
/// Both evaluate at J2000 (MJD 51544.5), where the unwrapped longitudes are
/// below one revolution so neither suffers cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FrequencyMethod {
    /// Sum of the polynomial derivatives of the longitudes.
    #[default]
    Analytic,
    /// Centred difference of the unwrapped argument over one day.
    FiniteDifference,
}

impl FrequencyMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Analytic => "analytic",
            Self::FiniteDifference => "finite_difference",
        }
    }
}

impl fmt::Display for FrequencyMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrequencyMethod {
    type Err = TideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "analytic" | "analytical" => Ok(Self::Analytic),
            "finite_difference" | "difference" => Ok(Self::FiniteDifference),
            _ => Err(TideError::invalid_input(
                "frequency method",
                &format!("unknown method '{}'", s),
            )),
        }
    }
}

const FREQUENCY_EPOCH: f64 = J2000_MJD;
const HALF_STEP_DAYS: f64 = 0.5;

/// Argument rates in degrees per day, in the order of [`AstronomicalArguments::to_array`].
fn rates(formalism: Formalism) -> [f64; 7] {
    let r = mean_longitude_rates(FREQUENCY_EPOCH, formalism);
    [360.0 - r.s + r.h, r.s, r.h, r.p, -r.n, r.pp, 0.0]
}

fn unwrapped_arguments(mjd: f64, formalism: Formalism) -> [f64; 7] {
    let m = unwrapped_longitudes(mjd, formalism);
    let tau = 360.0 * (mjd - FREQUENCY_EPOCH) - m.s + m.h;
    [tau, m.s, m.h, m.p, -m.n, m.pp, 0.0]
}

fn degrees_per_day(row: &[i8; 7], values: &[f64; 7]) -> f64 {
    row.iter().zip(values).map(|(c, v)| f64::from(*c) * v).sum()
}

pub(crate) fn angular_frequency(row: &[i8; 7], formalism: Formalism, method: FrequencyMethod) -> f64 {
    let deg_per_day = match method {
        FrequencyMethod::Analytic => degrees_per_day(row, &rates(formalism)),
        FrequencyMethod::FiniteDifference => {
            let lo = unwrapped_arguments(FREQUENCY_EPOCH - HALF_STEP_DAYS, formalism);
            let hi = unwrapped_arguments(FREQUENCY_EPOCH + HALF_STEP_DAYS, formalism);
            (degrees_per_day(row, &hi) - degrees_per_day(row, &lo)) / (2.0 * HALF_STEP_DAYS)
        }
    };
    deg_per_day * DEG_TO_RAD / SECONDS_PER_DAY_F64
}

/// Angular frequencies in radians per second.
///
/// ```
/// use tidal_constituents::Catalog;
/// use tidal_predict::{frequency, Corrections, FrequencyMethod};
///
/// let w = frequency(Catalog::global(), &["m2"], Corrections::Got, FrequencyMethod::Analytic)?;
/// assert!((w[0] - 1.405189e-4).abs() < 1e-9);
/// # Ok::<(), tidal_core::TideError>(())
/// ```
pub fn frequency<S: AsRef<str>>(
    catalog: &Catalog,
    names: &[S],
    corrections: Corrections,
    method: FrequencyMethod,
) -> TideResult<Vec<f64>> {
    frequency_with(catalog, names, corrections.formalism(), method)
}

pub fn frequency_with<S: AsRef<str>>(
    catalog: &Catalog,
    names: &[S],
    formalism: Formalism,
    method: FrequencyMethod,
) -> TideResult<Vec<f64>> {
    let rows = coefficient_rows(catalog, names, PhaseConvention::Otis)?;
    Ok(rows
        .iter()
        .map(|row| angular_frequency(row, formalism, method))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use tidal_constituents::parameters;

    #[test]
    fn tau_matches_solar_hour_plus_lunar_offset() {
        let t = TideTime::from_mjd(55000.25, 0.0);
        let a = AstronomicalArguments::at(&t, Formalism::Cartwright);
        assert_abs_diff_eq!(
            a.tau,
            normalize_degrees(90.0 - a.s + a.h),
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(a.to_array()[4], -a.n);
    }

    #[test]
    fn s2_tracks_solar_time() {
        let cat = Catalog::global();
        for hour in [0.0, 3.0, 7.5, 18.0] {
            let t = TideTime::from_mjd(57000.0 + hour / 24.0, 0.0);
            let g = equilibrium_argument(cat, &["s2"], &[t], Corrections::Otis).unwrap();
            assert_abs_diff_eq!(g[0][0], normalize_degrees(30.0 * hour), epsilon = 1e-8);
        }
    }

    #[test]
    fn s1_offset_follows_convention() {
        let cat = Catalog::global();
        let t = [TideTime::from_mjd(57000.0, 0.0)];
        let otis = equilibrium_argument_with(cat, &["s1"], &t, Formalism::Astro5, PhaseConvention::Otis)
            .unwrap();
        let got = equilibrium_argument(cat, &["s1"], &t, Corrections::Got).unwrap();
        assert_abs_diff_eq!(normalize_degrees(got[0][0] - otis[0][0]), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn arguments_preserve_caller_order() {
        let cat = Catalog::global();
        let t = [TideTime::from_tide_days(100.3), TideTime::from_tide_days(200.7)];
        let a = equilibrium_argument(cat, &["k1", "m2", "o1"], &t, Corrections::Otis).unwrap();
        let b = equilibrium_argument(cat, &["o1", "k1", "m2"], &t, Corrections::Otis).unwrap();
        for i in 0..2 {
            assert_eq!(a[i][0], b[i][1]);
            assert_eq!(a[i][1], b[i][2]);
            assert_eq!(a[i][2], b[i][0]);
        }
    }

    #[test]
    fn unknown_name_fails() {
        let err = equilibrium_argument(
            Catalog::global(),
            &["m2", "zz9"],
            &[TideTime::from_tide_days(0.0)],
            Corrections::Otis,
        )
        .unwrap_err();
        assert!(matches!(err, TideError::UnknownConstituent { .. }));
    }

    #[test]
    fn frequencies_match_otis_table() {
        let cat = Catalog::global();
        let names = ["m2", "s2", "k1", "o1", "n2", "p1", "k2", "q1", "mf", "mm"];
        let w = frequency(cat, &names, Corrections::Otis, FrequencyMethod::Analytic).unwrap();
        for (name, omega) in names.iter().zip(&w) {
            let expected = parameters(name).unwrap().unwrap().omega;
            assert_relative_eq!(*omega, expected, max_relative = 2e-5);
        }
    }

    #[test]
    fn methods_agree() {
        let cat = Catalog::global();
        let names: Vec<&str> = cat.iter().map(|c| c.name).collect();
        for formalism in Formalism::ALL {
            let a = frequency_with(cat, &names, formalism, FrequencyMethod::Analytic).unwrap();
            let b = frequency_with(cat, &names, formalism, FrequencyMethod::FiniteDifference)
                .unwrap();
            for ((name, x), y) in names.iter().zip(&a).zip(&b) {
                assert_abs_diff_eq!(*x, *y, epsilon = 1e-12);
                assert!(x.is_finite(), "{name}");
            }
        }
    }

    #[test]
    fn frequency_method_parses() {
        assert_eq!(
            "finite-difference".parse::<FrequencyMethod>().unwrap(),
            FrequencyMethod::FiniteDifference
        );
        assert_eq!("Analytic".parse::<FrequencyMethod>().unwrap(), FrequencyMethod::Analytic);
        assert!("spline".parse::<FrequencyMethod>().is_err());
    }
}
