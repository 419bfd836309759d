//! Nodal-correction conventions of the legacy model families.
//!
//! The convention decides three things at once: which polynomial formalism
//! supplies the mean longitudes, which closed-form table supplies the nodal
//! factors `f` and angles `u`, and which phase offset `s1` carries. They are
//! never mixed inside one prediction call.
//!
//! | Convention | Family | Longitudes | `s1` offset |
//! |------------|--------|------------|-------------|
//! | `OTIS`, `ATLAS`, `TMD3`, `netcdf` | [`NodalFamily::Otis`] | Cartwright | 90° |
//! | `GOT`, `PERTH3` | [`NodalFamily::Pugh`] | ASTRO5 | 180° |
//! | `FES` | [`NodalFamily::Schureman`] | ASTRO5 | 180° |
//! | `disabled` | none, `f = 1`, `u = 0` | Cartwright | 90° |

use std::fmt;
use std::str::FromStr;

use tidal_constituents::PhaseConvention;
use tidal_core::{TideError, TideResult};
use tidal_ephemeris::Formalism;

/// Model family whose nodal-correction conventions apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum Corrections {
    #[default]
    Otis,
    Atlas,
    Tmd3,
    Netcdf,
    Got,
    Perth3,
    Fes,
    /// No nodal modulation. Useful for testing and for constants that
    /// already fold the corrections in.
    Disabled,
}

/// Closed-form formula set selected by a [`Corrections`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodalFamily {
    /// Empirical fits of the OTIS tide model driver.
    Otis,
    /// Pugh (1987) polynomial fits used by GOT and PERTH3.
    Pugh,
    /// Schureman (1940) expressions in the lunar inclination `I`, used by FES.
    Schureman,
}

impl Corrections {
    pub const ALL: [Corrections; 8] = [
        Corrections::Otis,
        Corrections::Atlas,
        Corrections::Tmd3,
        Corrections::Netcdf,
        Corrections::Got,
        Corrections::Perth3,
        Corrections::Fes,
        Corrections::Disabled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Otis => "OTIS",
            Self::Atlas => "ATLAS",
            Self::Tmd3 => "TMD3",
            Self::Netcdf => "netcdf",
            Self::Got => "GOT",
            Self::Perth3 => "PERTH3",
            Self::Fes => "FES",
            Self::Disabled => "disabled",
        }
    }

    /// Formula set for `f` and `u`, `None` when corrections are disabled.
    pub fn family(&self) -> Option<NodalFamily> {
        match self {
            Self::Otis | Self::Atlas | Self::Tmd3 | Self::Netcdf => Some(NodalFamily::Otis),
            Self::Got | Self::Perth3 => Some(NodalFamily::Pugh),
            Self::Fes => Some(NodalFamily::Schureman),
            Self::Disabled => None,
        }
    }

    /// Mean-longitude formalism the family's arguments were built with.
    pub fn formalism(&self) -> Formalism {
        match self.family() {
            Some(NodalFamily::Pugh) | Some(NodalFamily::Schureman) => Formalism::Astro5,
            Some(NodalFamily::Otis) | None => Formalism::Cartwright,
        }
    }

    pub fn phase_convention(&self) -> PhaseConvention {
        match self.family() {
            Some(NodalFamily::Pugh) | Some(NodalFamily::Schureman) => PhaseConvention::Doodson,
            Some(NodalFamily::Otis) | None => PhaseConvention::Otis,
        }
    }

    /// `true` for the GOT and FES families, whose arguments expect dynamical time.
    pub fn expects_dynamical_time(&self) -> bool {
        matches!(
            self.family(),
            Some(NodalFamily::Pugh) | Some(NodalFamily::Schureman)
        )
    }
}

impl fmt::Display for Corrections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Corrections {
    type Err = TideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "otis" => Ok(Self::Otis),
            "atlas" => Ok(Self::Atlas),
            "tmd3" => Ok(Self::Tmd3),
            "netcdf" => Ok(Self::Netcdf),
            "got" => Ok(Self::Got),
            "perth3" => Ok(Self::Perth3),
            "fes" => Ok(Self::Fes),
            "disabled" | "none" => Ok(Self::Disabled),
            _ => Err(TideError::invalid_convention(
                s,
                "expected one of OTIS, ATLAS, TMD3, netcdf, GOT, PERTH3, FES, disabled",
            )),
        }
    }
}

impl TryFrom<String> for Corrections {
    type Error = TideError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Corrections> for String {
    fn from(value: Corrections) -> Self {
        value.as_str().to_string()
    }
}

/// Fails unless every convention in `conventions` is the same.
///
/// Harmonic constants assembled from several readers each carry the
/// convention of their model; mixing them in one prediction is rejected.
pub fn ensure_consistent(conventions: &[Corrections]) -> TideResult<Corrections> {
    let Some(first) = conventions.first() else {
        return Err(TideError::invalid_input(
            "corrections",
            "no convention supplied",
        ));
    };
    if let Some(other) = conventions.iter().find(|c| *c != first) {
        return Err(TideError::invalid_convention(
            other.as_str(),
            &format!("mixed with {} in one prediction", first),
        ));
    }
    Ok(*first)
}
