//! Prediction options, readable from configuration files.
//!
//! ```
//! use tidal_predict::{Corrections, FrequencyMethod, PredictOptions};
//!
//! let opts = PredictOptions::default();
//! assert_eq!(opts.corrections, Corrections::Otis);
//! assert!(opts.infer_minor);
//! assert_eq!(opts.frequency_method, FrequencyMethod::Analytic);
//! ```

use tidal_ephemeris::Formalism;
use tidal_time::DeltaT;

use crate::arguments::FrequencyMethod;
use crate::corrections::Corrections;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct PredictOptions {
    /// Nodal-correction convention of the harmonic constants.
    #[cfg_attr(feature = "serde", serde(default))]
    pub corrections: Corrections,

    /// TT − UT1 source for the prediction times.
    #[cfg_attr(feature = "serde", serde(default))]
    pub deltat: DeltaT,

    /// Add the inferred minor constituents to the prediction.
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub infer_minor: bool,

    /// Restrict inference to these minors; all of them when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub minor: Option<Vec<String>>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub frequency_method: FrequencyMethod,

    /// Overrides the formalism implied by `corrections`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub formalism: Option<Formalism>,
}

#[cfg(feature = "serde")]
fn default_true() -> bool {
    true
}

impl Default for PredictOptions {
    fn default() -> Self {
        Self {
            corrections: Corrections::default(),
            deltat: DeltaT::default(),
            infer_minor: true,
            minor: None,
            frequency_method: FrequencyMethod::default(),
            formalism: None,
        }
    }
}

impl PredictOptions {
    pub fn new(corrections: Corrections) -> Self {
        Self {
            corrections,
            ..Self::default()
        }
    }

    pub fn with_deltat(mut self, deltat: DeltaT) -> Self {
        self.deltat = deltat;
        self
    }

    pub fn with_infer_minor(mut self, infer_minor: bool) -> Self {
        self.infer_minor = infer_minor;
        self
    }

    pub fn with_minor<S: AsRef<str>>(mut self, minor: &[S]) -> Self {
        self.minor = Some(minor.iter().map(|s| s.as_ref().to_string()).collect());
        self
    }

    pub fn with_frequency_method(mut self, method: FrequencyMethod) -> Self {
        self.frequency_method = method;
        self
    }

    pub fn with_formalism(mut self, formalism: Formalism) -> Self {
        self.formalism = Some(formalism);
        self
    }

    /// Formalism in effect: the override, else the one `corrections` implies.
    pub fn formalism(&self) -> Formalism {
        self.formalism
            .unwrap_or_else(|| self.corrections.formalism())
    }
}
