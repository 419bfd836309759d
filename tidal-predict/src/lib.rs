//! Harmonic tide prediction.
//!
//! Reconstructs tidal signals from complex harmonic constants: each
//! constituent oscillates at its equilibrium argument, modulated by the
//! nodal factors of its model family, and minor constituents are inferred
//! from the majors by admittance.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`corrections`] | [`Corrections`] conventions and their [`NodalFamily`] |
//! | [`arguments`] | Equilibrium arguments and angular frequencies |
//! | [`nodal`] | Nodal factors `f` and angles `u` |
//! | [`harmonic`] | [`HarmonicConstants`], [`Shape`] and [`predict`] |
//! | [`minor`] | [`infer_minor`] from the core majors |
//! | [`equilibrium`] | Long-period equilibrium tide |
//! | [`solid_earth`] | IERS solid earth tide displacements |
//! | [`pole`] | Load and ocean pole tides |
//! | [`options`] | [`PredictOptions`] |
//! | [`predictor`] | [`Predictor`], a catalog bundled with options |
//!
//! # Conventions
//!
//! Harmonic constants are `amplitude·exp(−i·phase)` with phase a lag: a
//! positive phase delays the response behind the equilibrium argument. The
//! predicted value is `Re(hc · f · exp(i(V + u)))`.
//!
//! ```
//! use tidal_constituents::Catalog;
//! use tidal_predict::{Corrections, HarmonicConstants, Shape, predict};
//! use tidal_time::TideTime;
//!
//! let hc = HarmonicConstants::from_amplitude_phase(&["m2", "s2"], &[1.2, 0.4], &[30.0, 75.0])?;
//! let times: Vec<TideTime> = (0..24).map(|h| TideTime::from_tide_days(h as f64 / 24.0)).collect();
//! let tide = predict(Catalog::global(), &times, &hc, Corrections::Otis, Shape::TimeSeries)?;
//! assert_eq!(tide.len(), 24);
//! assert!(tide.iter().all(|v| v.unwrap().abs() <= 1.7));
//! # Ok::<(), tidal_core::TideError>(())
//! ```

pub mod arguments;
pub mod corrections;
pub mod equilibrium;
pub mod harmonic;
pub mod minor;
pub mod nodal;
pub mod options;
pub mod pole;
pub mod predictor;
pub mod solid_earth;

pub use arguments::{
    equilibrium_argument, equilibrium_argument_with, frequency, frequency_with,
    AstronomicalArguments, FrequencyMethod,
};
pub use corrections::{ensure_consistent, Corrections, NodalFamily};
pub use equilibrium::{equilibrium_tide, EquilibriumLine, LONG_PERIOD_LINES};
#[cfg(feature = "parallel")]
pub use harmonic::par_predict_drift;
pub use harmonic::{
    predict, predict_drift, predict_map, predict_time_series, HarmonicConstants, Shape,
};
pub use minor::{infer_minor, minor_constituents, CORE_MAJORS};
pub use nodal::{
    is_supported, nodal_corrections, nodal_corrections_with, NodalAngles, NodalCorrection,
    NodalPlan,
};
pub use options::PredictOptions;
pub use pole::{
    load_pole_tide, ocean_pole_tide, MeanPole, OceanPoleCoefficients, PolarMotion,
};
pub use predictor::Predictor;
pub use solid_earth::{
    permanent_tide, solid_earth_displacement, solid_earth_tide, solid_earth_tide_with, to_local,
    TideSystem,
};
