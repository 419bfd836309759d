//! Harmonic prediction from complex constants.
//!
//! A harmonic constant is `hc = A·exp(-iφ)` with amplitude `A` and Greenwich
//! phase lag `φ`. Each constituent contributes
//!
//! ```text
//! Re(hc · f · exp(i(V + u))) = f·A·cos(V + u - φ)
//! ```
//!
//! so a positive phase delays the response behind the equilibrium argument
//! `V`. Three evaluation shapes share this kernel:
//!
//! | Shape | Times | Points | Output length |
//! |-------|-------|--------|---------------|
//! | [`Shape::Drift`] | one per point | `n` | `n` |
//! | [`Shape::Map`] | one | `n` | `n` |
//! | [`Shape::TimeSeries`] | `m` | one | `m` |
//!
//! A point with any masked constant is masked in the output; it never
//! contributes a zero.

use std::fmt;
use std::str::FromStr;

use tidal_constituents::{canonicalize, Catalog};
use tidal_core::{Complex64, MaskedArray, TideError, TideResult};
use tidal_ephemeris::Formalism;
use tidal_time::TideTime;
use tracing::{debug, instrument, warn};

use crate::arguments::{coefficient_rows, AstronomicalArguments};
use crate::corrections::Corrections;
use crate::nodal::{NodalAngles, NodalPlan};

/// Complex harmonic constants for `n_points × n_constituents`, with validity.
#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicConstants {
    names: Vec<String>,
    // row-major, one row per point
    values: Vec<Complex64>,
    valid: Vec<bool>,
    n_points: usize,
}

impl HarmonicConstants {
    /// Builds from row-major values; non-finite entries are masked.
    pub fn new<S: AsRef<str>>(names: &[S], values: Vec<Complex64>) -> TideResult<Self> {
        let nc = names.len();
        if nc == 0 {
            return Err(TideError::invalid_input(
                "harmonic constants",
                "no constituents supplied",
            ));
        }
        if values.len() % nc != 0 {
            return Err(TideError::dimension_mismatch(
                "harmonic constants",
                (values.len() / nc + 1) * nc,
                values.len(),
            ));
        }
        let valid = values.iter().map(|v| v.re.is_finite() && v.im.is_finite()).collect();
        Ok(Self {
            names: names.iter().map(|s| s.as_ref().to_string()).collect(),
            n_points: values.len() / nc,
            values,
            valid,
        })
    }

    /// Builds from one row per point.
    pub fn from_rows<S: AsRef<str>>(names: &[S], rows: Vec<Vec<Complex64>>) -> TideResult<Self> {
        let mut values = Vec::with_capacity(rows.len() * names.len());
        for row in rows {
            if row.len() != names.len() {
                return Err(TideError::dimension_mismatch(
                    "harmonic constant row",
                    names.len(),
                    row.len(),
                ));
            }
            values.extend(row);
        }
        Self::new(names, values)
    }

    /// Builds from row-major amplitudes and phase lags in degrees.
    ///
    /// Negative amplitudes are rejected; NaN amplitudes or phases are masked.
    pub fn from_amplitude_phase<S: AsRef<str>>(
        names: &[S],
        amplitude: &[f64],
        phase: &[f64],
    ) -> TideResult<Self> {
        if amplitude.len() != phase.len() {
            return Err(TideError::dimension_mismatch(
                "amplitude and phase",
                amplitude.len(),
                phase.len(),
            ));
        }
        if let Some(a) = amplitude.iter().find(|a| **a < 0.0) {
            return Err(TideError::invalid_input(
                "amplitude",
                &format!("negative amplitude {}", a),
            ));
        }
        let values = amplitude
            .iter()
            .zip(phase)
            .map(|(a, p)| Complex64::from_polar(*a, -p.to_radians()))
            .collect();
        Self::new(names, values)
    }

    /// ANDs an explicit validity mask into the finite-value mask.
    pub fn with_mask(mut self, valid: Vec<bool>) -> TideResult<Self> {
        if valid.len() != self.values.len() {
            return Err(TideError::dimension_mismatch(
                "harmonic constant mask",
                self.values.len(),
                valid.len(),
            ));
        }
        for (v, m) in self.valid.iter_mut().zip(valid) {
            *v &= m;
        }
        Ok(self)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn n_points(&self) -> usize {
        self.n_points
    }

    pub fn n_constituents(&self) -> usize {
        self.names.len()
    }

    /// Constants of one point, in constituent order.
    pub fn point(&self, index: usize) -> &[Complex64] {
        let nc = self.names.len();
        &self.values[index * nc..(index + 1) * nc]
    }

    pub fn point_mask(&self, index: usize) -> &[bool] {
        let nc = self.names.len();
        &self.valid[index * nc..(index + 1) * nc]
    }

    /// `true` when every constituent at the point is valid.
    pub fn is_point_valid(&self, index: usize) -> bool {
        self.point_mask(index).iter().all(|v| *v)
    }

    pub fn get(&self, point: usize, constituent: usize) -> Option<Complex64> {
        let k = point * self.names.len() + constituent;
        match self.valid.get(k) {
            Some(true) => Some(self.values[k]),
            _ => None,
        }
    }

    /// Column index of `name`, compared after canonicalization.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        let target = canonicalize(name);
        self.names.iter().position(|n| canonicalize(n) == target)
    }

    /// Subset of columns, in the order of `names`.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> TideResult<Self> {
        let columns = names
            .iter()
            .map(|n| {
                self.index_of(n.as_ref())
                    .ok_or_else(|| TideError::unknown_constituent(n.as_ref()))
            })
            .collect::<TideResult<Vec<_>>>()?;
        let nc = self.names.len();
        let mut values = Vec::with_capacity(self.n_points * columns.len());
        let mut valid = Vec::with_capacity(values.capacity());
        for p in 0..self.n_points {
            for &c in &columns {
                values.push(self.values[p * nc + c]);
                valid.push(self.valid[p * nc + c]);
            }
        }
        Ok(Self {
            names: columns.iter().map(|&c| self.names[c].clone()).collect(),
            values,
            valid,
            n_points: self.n_points,
        })
    }
}

/// Evaluation shape, see the module table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Shape {
    #[default]
    Drift,
    Map,
    TimeSeries,
}

impl Shape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drift => "drift",
            Self::Map => "map",
            Self::TimeSeries => "time_series",
        }
    }

    /// Output length, after checking the time and point axes agree.
    pub fn output_len(&self, n_times: usize, n_points: usize) -> TideResult<usize> {
        match self {
            Self::Drift if n_times == n_points => Ok(n_points),
            Self::Drift => Err(TideError::dimension_mismatch(
                "drift times",
                n_points,
                n_times,
            )),
            Self::Map if n_times == 1 => Ok(n_points),
            Self::Map => Err(TideError::dimension_mismatch("map time", 1, n_times)),
            Self::TimeSeries if n_points == 1 => Ok(n_times),
            Self::TimeSeries => Err(TideError::dimension_mismatch(
                "time series points",
                1,
                n_points,
            )),
        }
    }

    /// `(time index, point index)` of output sample `k`.
    pub(crate) fn indices(&self, k: usize) -> (usize, usize) {
        match self {
            Self::Drift => (k, k),
            Self::Map => (0, k),
            Self::TimeSeries => (k, 0),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shape {
    type Err = TideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "drift" => Ok(Self::Drift),
            "map" | "grid" => Ok(Self::Map),
            "time_series" => Ok(Self::TimeSeries),
            _ => Err(TideError::invalid_input(
                "shape",
                &format!("unknown shape '{}'", s),
            )),
        }
    }
}

/// Coefficient rows and nodal formulas for a fixed constituent list.
#[derive(Debug, Clone)]
pub(crate) struct ArgumentPlan {
    rows: Vec<[i8; 7]>,
    nodal: NodalPlan,
    formalism: Formalism,
}

impl ArgumentPlan {
    pub(crate) fn new<S: AsRef<str>>(
        catalog: &Catalog,
        names: &[S],
        corrections: Corrections,
        formalism: Formalism,
    ) -> TideResult<Self> {
        Ok(Self {
            rows: coefficient_rows(catalog, names, corrections.phase_convention())?,
            nodal: NodalPlan::new(catalog, names, corrections)?,
            formalism,
        })
    }

    /// `f·exp(i(V + u))` per constituent.
    pub(crate) fn phasors(&self, time: &TideTime) -> Vec<Complex64> {
        let args = AstronomicalArguments::at(time, self.formalism);
        let fu = self.nodal.evaluate(&NodalAngles::at(time, self.formalism));
        self.rows
            .iter()
            .zip(fu)
            .map(|(row, c)| Complex64::from_polar(c.f, (args.argument(row) + c.u).to_radians()))
            .collect()
    }
}

/// Sum of `Re(hc·phasor)` over constituents, `None` if any is masked.
pub(crate) fn superpose(hc: &[Complex64], valid: &[bool], phasors: &[Complex64]) -> Option<f64> {
    if !valid.iter().all(|v| *v) {
        return None;
    }
    Some(hc.iter().zip(phasors).map(|(h, p)| (h * p).re).sum())
}

pub(crate) fn warn_on_universal_time(times: &[TideTime], corrections: Corrections) {
    if corrections.expects_dynamical_time() && times.iter().all(|t| t.deltat == 0.0) {
        warn!(
            corrections = %corrections,
            "ΔT is zero: arguments are evaluated on UT instead of TT"
        );
    }
}

pub(crate) fn predict_with(
    catalog: &Catalog,
    times: &[TideTime],
    hc: &HarmonicConstants,
    corrections: Corrections,
    formalism: Formalism,
    shape: Shape,
) -> TideResult<MaskedArray> {
    let n = shape.output_len(times.len(), hc.n_points())?;
    let plan = ArgumentPlan::new(catalog, hc.names(), corrections, formalism)?;
    warn_on_universal_time(times, corrections);

    let map_phasors = match shape {
        Shape::Map => Some(plan.phasors(&times[0])),
        _ => None,
    };
    let out: MaskedArray = (0..n)
        .map(|k| {
            let (ti, pi) = shape.indices(k);
            let local;
            let phasors = match &map_phasors {
                Some(p) => p,
                None => {
                    local = plan.phasors(&times[ti]);
                    &local
                }
            };
            superpose(hc.point(pi), hc.point_mask(pi), phasors)
        })
        .collect();
    debug!(
        samples = n,
        masked = n - out.valid_count(),
        "harmonic prediction complete"
    );
    Ok(out)
}

/// Predicts the tide for the given evaluation shape.
///
/// ```
/// use tidal_constituents::Catalog;
/// use tidal_core::Complex64;
/// use tidal_predict::{equilibrium_argument, predict, Corrections, HarmonicConstants, Shape};
/// use tidal_time::TideTime;
///
/// let cat = Catalog::global();
/// let hc = HarmonicConstants::new(&["m2"], vec![Complex64::new(1.0, 0.0)])?;
/// let t = [TideTime::from_tide_days(0.0)];
/// let tide = predict(cat, &t, &hc, Corrections::Disabled, Shape::Map)?;
/// let g = equilibrium_argument(cat, &["m2"], &t, Corrections::Disabled)?;
/// assert!((tide.get(0).unwrap() - g[0][0].to_radians().cos()).abs() < 1e-9);
/// # Ok::<(), tidal_core::TideError>(())
/// ```
#[instrument(skip_all, fields(times = times.len(), points = hc.n_points(), corrections = %corrections, shape = %shape))]
pub fn predict(
    catalog: &Catalog,
    times: &[TideTime],
    hc: &HarmonicConstants,
    corrections: Corrections,
    shape: Shape,
) -> TideResult<MaskedArray> {
    predict_with(catalog, times, hc, corrections, corrections.formalism(), shape)
}

/// One time per point, e.g. along a satellite track.
pub fn predict_drift(
    catalog: &Catalog,
    times: &[TideTime],
    hc: &HarmonicConstants,
    corrections: Corrections,
) -> TideResult<MaskedArray> {
    predict(catalog, times, hc, corrections, Shape::Drift)
}

/// Every point at a single time.
pub fn predict_map(
    catalog: &Catalog,
    time: &TideTime,
    hc: &HarmonicConstants,
    corrections: Corrections,
) -> TideResult<MaskedArray> {
    predict(catalog, std::slice::from_ref(time), hc, corrections, Shape::Map)
}

/// One point at many times.
pub fn predict_time_series(
    catalog: &Catalog,
    times: &[TideTime],
    hc: &HarmonicConstants,
    corrections: Corrections,
) -> TideResult<MaskedArray> {
    predict(catalog, times, hc, corrections, Shape::TimeSeries)
}

/// [`predict_drift`] spread over the rayon thread pool.
#[cfg(feature = "parallel")]
#[instrument(skip_all, fields(points = hc.n_points(), corrections = %corrections))]
pub fn par_predict_drift(
    catalog: &Catalog,
    times: &[TideTime],
    hc: &HarmonicConstants,
    corrections: Corrections,
) -> TideResult<MaskedArray> {
    use rayon::prelude::*;

    let n = Shape::Drift.output_len(times.len(), hc.n_points())?;
    let plan = ArgumentPlan::new(catalog, hc.names(), corrections, corrections.formalism())?;
    warn_on_universal_time(times, corrections);
    let values: Vec<Option<f64>> = (0..n)
        .into_par_iter()
        .map(|k| superpose(hc.point(k), hc.point_mask(k), &plan.phasors(&times[k])))
        .collect();
    Ok(MaskedArray::from_options(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn cat() -> &'static Catalog {
        Catalog::global()
    }

    #[test]
    fn amplitude_phase_uses_lag_convention() {
        let hc = HarmonicConstants::from_amplitude_phase(&["m2"], &[2.0], &[90.0]).unwrap();
        let v = hc.get(0, 0).unwrap();
        assert_abs_diff_eq!(v.re, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.im, -2.0, epsilon = 1e-12);
    }

    #[test]
    fn positive_phase_delays_the_peak() {
        // peak of a 90° lagged constituent occurs a quarter period after V = 0
        let t = [TideTime::from_tide_days(0.0)];
        let g = crate::equilibrium_argument(cat(), &["s2"], &t, Corrections::Disabled).unwrap();
        let hc =
            HarmonicConstants::from_amplitude_phase(&["s2"], &[1.0], &[g[0][0] + 90.0]).unwrap();
        let quarter = TideTime::from_tide_days(3.0 / 24.0);
        let at_zero = predict_map(cat(), &t[0], &hc, Corrections::Disabled).unwrap();
        let later = predict_map(cat(), &quarter, &hc, Corrections::Disabled).unwrap();
        assert_abs_diff_eq!(at_zero.get(0).unwrap(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(later.get(0).unwrap(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn shapes_check_dimensions() {
        let hc = HarmonicConstants::new(&["m2"], vec![Complex64::new(1.0, 0.0); 3]).unwrap();
        let two = [TideTime::from_tide_days(0.0), TideTime::from_tide_days(1.0)];
        assert!(matches!(
            predict_drift(cat(), &two, &hc, Corrections::Otis),
            Err(TideError::DimensionMismatch { .. })
        ));
        assert!(predict_time_series(cat(), &two, &hc, Corrections::Otis).is_err());
        assert!(predict(cat(), &two, &hc, Corrections::Otis, Shape::Map).is_err());
        assert_eq!(
            predict_map(cat(), &two[0], &hc, Corrections::Otis).unwrap().len(),
            3
        );
    }

    #[test]
    fn masked_point_is_masked_not_zero() {
        let names = ["m2", "k1"];
        let hc = HarmonicConstants::new(
            &names,
            vec![
                Complex64::new(0.5, 0.1),
                Complex64::new(0.2, 0.0),
                Complex64::new(f64::NAN, 0.0),
                Complex64::new(0.2, 0.0),
                Complex64::new(0.5, 0.1),
                Complex64::new(0.2, 0.0),
            ],
        )
        .unwrap()
        .with_mask(vec![true, true, true, true, true, false])
        .unwrap();
        let out = predict_map(cat(), &TideTime::from_tide_days(10.0), &hc, Corrections::Otis)
            .unwrap();
        assert!(out.is_valid(0));
        assert_eq!(out.get(1), None);
        assert_eq!(out.get(2), None);
        assert_eq!(out.valid_count(), 1);
    }

    #[test]
    fn select_reorders_columns() {
        let hc = HarmonicConstants::new(
            &["M2", "k1", "o1"],
            vec![
                Complex64::new(1.0, 0.0),
                Complex64::new(2.0, 0.0),
                Complex64::new(3.0, 0.0),
            ],
        )
        .unwrap();
        let sub = hc.select(&["o1", "m2"]).unwrap();
        assert_eq!(sub.names(), &["o1".to_string(), "M2".to_string()]);
        assert_eq!(sub.get(0, 0).unwrap().re, 3.0);
        assert_eq!(sub.get(0, 1).unwrap().re, 1.0);
        assert!(hc.select(&["s2"]).is_err());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(HarmonicConstants::new::<&str>(&[], vec![]).is_err());
        assert!(HarmonicConstants::new(&["m2", "s2"], vec![Complex64::new(1.0, 0.0); 3]).is_err());
        assert!(HarmonicConstants::from_amplitude_phase(&["m2"], &[-1.0], &[0.0]).is_err());
    }

    #[test]
    fn shape_parses() {
        assert_eq!("grid".parse::<Shape>().unwrap(), Shape::Map);
        assert_eq!("time-series".parse::<Shape>().unwrap(), Shape::TimeSeries);
        assert!("swath".parse::<Shape>().is_err());
    }
}
