//! A catalog handle bundled with [`PredictOptions`].

use tidal_constituents::Catalog;
use tidal_core::constants::TIDE_EPOCH_MJD;
use tidal_core::{MaskedArray, TideResult};
use tidal_time::TideTime;
use tracing::debug;

use crate::arguments::{equilibrium_argument_with, frequency_with};
use crate::equilibrium::equilibrium_tide;
use crate::harmonic::{predict_with, HarmonicConstants, Shape};
use crate::minor::infer_minor_with;
use crate::nodal::{nodal_corrections_with, NodalCorrection};
use crate::options::PredictOptions;

/// Runs the free functions with one set of options.
///
/// Times are given as days since the tide epoch; ΔT is attached from
/// [`PredictOptions::deltat`].
///
/// ```
/// use tidal_core::Complex64;
/// use tidal_predict::{Corrections, HarmonicConstants, PredictOptions, Predictor, Shape};
///
/// let opts = PredictOptions::new(Corrections::Otis).with_infer_minor(false);
/// let predictor = Predictor::global(opts);
/// let hc = HarmonicConstants::new(&["m2", "k1"], vec![
///     Complex64::new(0.8, -0.2),
///     Complex64::new(0.1, 0.05),
/// ])?;
/// let tide = predictor.predict(&[0.0, 0.25, 0.5], &hc, Shape::TimeSeries)?;
/// assert_eq!(tide.valid_count(), 3);
/// # Ok::<(), tidal_core::TideError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Predictor<'a> {
    catalog: &'a Catalog,
    options: PredictOptions,
}

impl<'a> Predictor<'a> {
    pub fn new(catalog: &'a Catalog, options: PredictOptions) -> Self {
        Self { catalog, options }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn options(&self) -> &PredictOptions {
        &self.options
    }

    /// Tide times for `days` with ΔT resolved.
    pub fn times(&self, days: &[f64]) -> TideResult<Vec<TideTime>> {
        let mjd: Vec<f64> = days.iter().map(|d| d + TIDE_EPOCH_MJD).collect();
        let deltat = self.options.deltat.resolve(&mjd)?;
        Ok(days
            .iter()
            .zip(deltat)
            .map(|(d, dt)| TideTime::new(*d, dt))
            .collect())
    }

    /// Major constituents plus, when enabled, the inferred minors.
    pub fn predict(
        &self,
        days: &[f64],
        hc: &HarmonicConstants,
        shape: Shape,
    ) -> TideResult<MaskedArray> {
        let times = self.times(days)?;
        let opts = &self.options;
        let tide = predict_with(
            self.catalog,
            &times,
            hc,
            opts.corrections,
            opts.formalism(),
            shape,
        )?;
        if !opts.infer_minor {
            return Ok(tide);
        }
        let minor = self.infer_minor_at(&times, hc, shape)?;
        debug!("adding inferred minor constituents");
        tide.zip_with(&minor, |a, b| a + b)
    }

    /// Tide of the inferred minor constituents alone.
    pub fn infer_minor(
        &self,
        days: &[f64],
        hc: &HarmonicConstants,
        shape: Shape,
    ) -> TideResult<MaskedArray> {
        let times = self.times(days)?;
        self.infer_minor_at(&times, hc, shape)
    }

    fn infer_minor_at(
        &self,
        times: &[TideTime],
        hc: &HarmonicConstants,
        shape: Shape,
    ) -> TideResult<MaskedArray> {
        let opts = &self.options;
        infer_minor_with(
            self.catalog,
            times,
            hc,
            opts.corrections,
            opts.formalism(),
            opts.minor.as_deref(),
            shape,
        )
    }

    /// Angular frequencies in radians per second.
    pub fn frequency<S: AsRef<str>>(&self, names: &[S]) -> TideResult<Vec<f64>> {
        frequency_with(
            self.catalog,
            names,
            self.options.formalism(),
            self.options.frequency_method,
        )
    }

    /// Equilibrium arguments in degrees, indexed `[time][constituent]`.
    pub fn equilibrium_argument<S: AsRef<str>>(
        &self,
        names: &[S],
        days: &[f64],
    ) -> TideResult<Vec<Vec<f64>>> {
        let times = self.times(days)?;
        equilibrium_argument_with(
            self.catalog,
            names,
            &times,
            self.options.formalism(),
            self.options.corrections.phase_convention(),
        )
    }

    /// Nodal corrections indexed `[time][constituent]`.
    pub fn nodal_corrections<S: AsRef<str>>(
        &self,
        names: &[S],
        days: &[f64],
    ) -> TideResult<Vec<Vec<NodalCorrection>>> {
        let times = self.times(days)?;
        nodal_corrections_with(
            self.catalog,
            names,
            &times,
            self.options.corrections,
            self.options.formalism(),
        )
    }

    /// Long-period equilibrium tide in metres at `latitudes` (degrees).
    pub fn equilibrium_tide(
        &self,
        days: &[f64],
        latitudes: &[f64],
        shape: Shape,
    ) -> TideResult<Vec<f64>> {
        let times = self.times(days)?;
        equilibrium_tide(&times, latitudes, self.options.formalism(), shape)
    }
}

impl Predictor<'static> {
    /// Uses the process-wide [`Catalog::global`].
    pub fn global(options: PredictOptions) -> Self {
        Self::new(Catalog::global(), options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corrections::Corrections;
    use crate::harmonic::predict;
    use crate::minor::{infer_minor, CORE_MAJORS};
    use approx::assert_abs_diff_eq;
    use tidal_core::{Complex64, TideError};
    use tidal_time::DeltaT;

    fn majors() -> HarmonicConstants {
        let values = (0..CORE_MAJORS.len())
            .map(|k| Complex64::from_polar(0.05 + 0.03 * k as f64, 0.4 * k as f64))
            .collect();
        HarmonicConstants::new(&CORE_MAJORS, values).unwrap()
    }

    #[test]
    fn deltat_is_attached_to_times() {
        let p = Predictor::global(
            PredictOptions::new(Corrections::Got).with_deltat(DeltaT::Constant(0.0008)),
        );
        let t = p.times(&[1.0, 2.0]).unwrap();
        assert_eq!(t[1].days, 2.0);
        assert_eq!(t[1].deltat, 0.0008);
        let series = Predictor::global(
            PredictOptions::default().with_deltat(DeltaT::Series(vec![0.0; 3])),
        );
        assert!(matches!(
            series.times(&[1.0, 2.0]),
            Err(TideError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn prediction_adds_minor_tide() {
        let cat = Catalog::global();
        let hc = majors();
        let days = [100.0, 100.5, 101.0];
        let times: Vec<TideTime> = days.iter().map(|d| TideTime::from_tide_days(*d)).collect();
        let total = Predictor::global(PredictOptions::new(Corrections::Otis))
            .predict(&days, &hc, Shape::TimeSeries)
            .unwrap();
        let major = predict(cat, &times, &hc, Corrections::Otis, Shape::TimeSeries).unwrap();
        let minor = infer_minor(cat, &times, &hc, Corrections::Otis, None, Shape::TimeSeries).unwrap();
        for k in 0..3 {
            assert_abs_diff_eq!(
                total.get(k).unwrap(),
                major.get(k).unwrap() + minor.get(k).unwrap(),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn missing_majors_fail_only_with_inference() {
        let hc = HarmonicConstants::new(&["m2"], vec![Complex64::new(1.0, 0.0)]).unwrap();
        let with = Predictor::global(PredictOptions::default());
        assert!(matches!(
            with.predict(&[0.0], &hc, Shape::Map),
            Err(TideError::InsufficientMajorConstituents { .. })
        ));
        let without = Predictor::global(PredictOptions::default().with_infer_minor(false));
        assert!(without.predict(&[0.0], &hc, Shape::Map).is_ok());
    }
}
