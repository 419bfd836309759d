//! ΔT = TT − UT1.
//!
//! Prediction needs ΔT to evaluate astronomical longitudes in dynamical time.
//! [`DeltaT`] lets the caller be explicit about where it comes from:
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | `Zero` | Ignore ΔT (legacy OTIS/ATLAS behaviour) |
//! | `Constant(days)` | One value for every time |
//! | `Series(days)` | One value per time, supplied from EOP data |
//! | `Approximate` | Piecewise model below |
//!
//! The approximate model uses the Meeus (1998) rules: polynomials before 1620,
//! a biennial table through 1992 with second-difference interpolation, a
//! decadal fit through 2010, then the Espenak–Meeus polynomials. Expect
//! errors of a second or two against IERS values for the modern era.

use tidal_core::constants::{MJD_ZERO_POINT, SECONDS_PER_DAY_F64};
use tidal_core::{TideError, TideResult};
use tracing::warn;

const TERMS: usize = 187;

/// ΔT in seconds at two-year spacing starting 1620.0.
#[rustfmt::skip]
const DELTA_T_TABLE: [f64; TERMS] = [
    124.0,115.0,106.0, 98.0, 91.0, 85.0, 79.0, 74.0, 70.0, 65.0,
     62.0, 58.0, 55.0, 53.0, 50.0, 48.0, 46.0, 44.0, 42.0, 40.0,
     37.0, 35.0, 33.0, 31.0, 28.0, 26.0, 24.0, 22.0, 20.0, 18.0,
     16.0, 14.0, 13.0, 12.0, 11.0, 10.0,  9.0,  9.0,  9.0,  9.0,
      9.0,  9.0,  9.0,  9.0, 10.0, 10.0, 10.0, 10.0, 10.0, 11.0,
     11.0, 11.0, 11.0, 11.0, 11.0, 11.0, 12.0, 12.0, 12.0, 12.0,
     12.0, 12.0, 13.0, 13.0, 13.0, 13.0, 14.0, 14.0, 14.0, 15.0,
     15.0, 15.0, 15.0, 16.0, 16.0, 16.0, 16.0, 16.0, 17.0, 17.0,
     17.0, 17.0, 17.0, 17.0, 17.0, 17.0, 16.0, 16.0, 15.0, 14.0,
     13.7, 13.1, 12.7, 12.5, 12.5, 12.5, 12.5, 12.5, 12.5, 12.3,
     12.0, 11.4, 10.6,  9.6,  8.6,  7.5,  6.6,  6.0,  5.7,  5.6,
      5.7,  5.9,  6.2,  6.5,  6.8,  7.1,  7.3,  7.5,  7.7,  7.8,
      7.9,  7.5,  6.4,  5.4,  2.9,  1.6, -1.0, -2.7, -3.6, -4.7,
     -5.4, -5.2, -5.5, -5.6, -5.8, -5.9, -6.2, -6.4, -6.1, -4.7,
     -2.7,  0.0,  2.6,  5.4,  7.7, 10.5, 13.4, 16.0, 18.2, 20.2,
     21.2, 22.4, 23.5, 23.9, 24.3, 24.0, 23.9, 23.9, 23.7, 24.0,
     24.3, 25.3, 26.2, 27.3, 28.2, 29.1, 30.0, 30.7, 31.4, 32.2,
     33.1, 34.0, 35.0, 36.5, 38.3, 40.2, 42.2, 44.5, 46.5, 48.5,
     50.5, 52.2, 53.8, 54.9, 55.8, 56.9, 58.3,
];

const JD_948: f64 = 2_067_314.5;
const JD_1620: f64 = 2_305_447.5;
const JD_TABLE_START: f64 = 2_312_752.5;
const JD_1992: f64 = 2_448_622.5;
const JD_2000: f64 = 2_451_544.5;
const JD_2010: f64 = 2_455_197.5;
const BIENNIAL_STEP: f64 = 730.5;
const DECADE: f64 = 3_652.5;
const JD_2050: f64 = 2_469_807.0;

/// Source of ΔT values for a batch of times.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DeltaT {
    #[default]
    Zero,
    /// Days.
    Constant(f64),
    /// Days, one per time.
    Series(Vec<f64>),
    Approximate,
}

impl DeltaT {
    /// ΔT in days for each entry of `mjd` (UT).
    ///
    /// # Errors
    ///
    /// [`DimensionMismatch`](TideError::DimensionMismatch) when a series does
    /// not match the number of times.
    pub fn resolve(&self, mjd: &[f64]) -> TideResult<Vec<f64>> {
        match self {
            Self::Zero => Ok(vec![0.0; mjd.len()]),
            Self::Constant(d) => Ok(vec![*d; mjd.len()]),
            Self::Series(values) => {
                if values.len() != mjd.len() {
                    return Err(TideError::dimension_mismatch(
                        "delta-T series",
                        mjd.len(),
                        values.len(),
                    ));
                }
                Ok(values.clone())
            }
            Self::Approximate => {
                let beyond = mjd.iter().filter(|m| *m + MJD_ZERO_POINT > JD_2050).count();
                if beyond > 0 {
                    warn!(times = beyond, "delta-T extrapolated past 2050");
                }
                Ok(mjd
                    .iter()
                    .map(|m| delta_t_seconds(m + MJD_ZERO_POINT) / SECONDS_PER_DAY_F64)
                    .collect())
            }
        }
    }

    /// ΔT in days for a single time; series must have exactly one entry.
    pub fn resolve_one(&self, mjd: f64) -> TideResult<f64> {
        Ok(self.resolve(&[mjd])?[0])
    }
}

/// Approximate ΔT in seconds for a Julian Date on the UT scale.
///
/// ```
/// use tidal_time::delta_t_seconds;
///
/// let dt = delta_t_seconds(2_451_545.0);
/// assert!((dt - 63.83).abs() < 0.5);
/// ```
pub fn delta_t_seconds(jd_ut: f64) -> f64 {
    match jd_ut {
        jd if jd < JD_948 => delta_t_ancient(jd),
        jd if jd < JD_1620 => delta_t_medieval(jd),
        jd if jd < JD_1992 => delta_t_table(jd),
        jd if jd <= JD_2010 => delta_t_recent(jd),
        jd => delta_t_modern(jd),
    }
}

fn delta_t_ancient(jd: f64) -> f64 {
    let c = (jd - JD_948) / 36525.0;
    1830.0 - 405.0 * c + 46.5 * c * c
}

fn delta_t_medieval(jd: f64) -> f64 {
    let c = (jd - 2_396_758.5) / 36525.0;
    22.5 * c * c
}

fn delta_t_table(jd: f64) -> f64 {
    let mut i = ((jd - JD_TABLE_START) / BIENNIAL_STEP).max(0.0) as usize;
    if i > TERMS - 3 {
        i = TERMS - 3;
    }
    let a = DELTA_T_TABLE[i + 1] - DELTA_T_TABLE[i];
    let b = DELTA_T_TABLE[i + 2] - DELTA_T_TABLE[i + 1];
    let c = a - b;
    let n = (jd - (JD_TABLE_START + BIENNIAL_STEP * i as f64)) / BIENNIAL_STEP;
    DELTA_T_TABLE[i + 1] + n / 2.0 * (a + b + n * c)
}

fn delta_t_recent(jd: f64) -> f64 {
    const DT: [f64; 3] = [56.86, 63.83, 70.0];
    let a = DT[1] - DT[0];
    let b = DT[2] - DT[1];
    let c = b - a;
    let n = (jd - JD_2000) / DECADE;
    DT[1] + n / 2.0 * (a + b + n * c)
}

// Espenak & Meeus (2006) polynomial expressions
fn delta_t_modern(jd: f64) -> f64 {
    let year = 2000.0 + (jd - JD_2000) / 365.25;
    if year < 2050.0 {
        let t = year - 2000.0;
        62.92 + 0.32217 * t + 0.005589 * t * t
    } else {
        let u = (year - 1820.0) / 100.0;
        let base = -20.0 + 32.0 * u * u;
        if year < 2150.0 {
            base - 0.5628 * (2150.0 - year)
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn table_start_value() {
        assert_abs_diff_eq!(delta_t_seconds(JD_TABLE_START), 115.0, epsilon = 1e-6);
    }

    #[test]
    fn table_upper_clip() {
        assert_abs_diff_eq!(delta_t_table(2_449_356.0), 59.3, epsilon = 1e-6);
    }

    #[test]
    fn recent_sample() {
        assert_abs_diff_eq!(
            delta_t_seconds(2_453_371.5),
            67.016_266_923_586_13,
            epsilon = 1e-6
        );
    }

    #[test]
    fn ancient_and_medieval_samples() {
        assert_abs_diff_eq!(
            delta_t_seconds(2_000_000.0),
            2_734.342_214_024_879_5,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            delta_t_seconds(2_100_000.0),
            1_485.280_240_204_242_3,
            epsilon = 1e-6
        );
    }

    #[test]
    fn modern_values_are_plausible() {
        // IERS: 68.18 s at 2015.5, 69.2 s at 2023.0
        let dt_2015 = delta_t_seconds(2_457_218.5);
        assert!((dt_2015 - 68.2).abs() < 1.5, "{}", dt_2015);
        let dt_2023 = delta_t_seconds(2_459_945.5);
        assert!((dt_2023 - 69.2).abs() < 6.0, "{}", dt_2023);
    }

    #[test]
    fn modern_branches_are_continuous() {
        let jd_2050 = JD_2000 + 50.0 * 365.25;
        let below = delta_t_seconds(jd_2050 - 1e-3);
        let above = delta_t_seconds(jd_2050 + 1e-3);
        assert!((below - above).abs() < 1.0, "{} vs {}", below, above);
    }

    #[test]
    fn resolve_variants() {
        let mjd = [55414.0, 55415.0];
        assert_eq!(DeltaT::Zero.resolve(&mjd).unwrap(), vec![0.0, 0.0]);
        assert_eq!(DeltaT::Constant(0.5).resolve(&mjd).unwrap(), vec![0.5, 0.5]);
        let series = DeltaT::Series(vec![1.0, 2.0]);
        assert_eq!(series.resolve(&mjd).unwrap(), vec![1.0, 2.0]);
        let approx = DeltaT::Approximate.resolve(&mjd).unwrap();
        assert!(approx.iter().all(|d| *d > 60.0 / 86400.0 && *d < 70.0 / 86400.0));
    }

    #[test]
    fn series_length_is_checked() {
        let err = DeltaT::Series(vec![1.0]).resolve(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, TideError::DimensionMismatch { .. }));
    }
}
