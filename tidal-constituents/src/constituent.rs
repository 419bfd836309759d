//! A single tidal spectral line.

use std::fmt;

/// Index of each fundamental argument in [`Constituent::coefficients`].
pub const TAU: usize = 0;
pub const S: usize = 1;
pub const H: usize = 2;
pub const P: usize = 3;
pub const NODE: usize = 4;
pub const PP: usize = 5;
/// Phase offset in multiples of 90°.
pub const PHASE: usize = 6;

/// Frequency band, set by the multiplier of mean lunar time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Species {
    LongPeriod,
    Diurnal,
    Semidiurnal,
    /// Terdiurnal and faster; mostly compound shallow-water lines.
    HigherOrder(u8),
}

impl Species {
    pub fn from_tau(tau: i8) -> Self {
        match tau {
            i8::MIN..=0 => Self::LongPeriod,
            1 => Self::Diurnal,
            2 => Self::Semidiurnal,
            n => Self::HigherOrder(n as u8),
        }
    }

    pub fn order(&self) -> u8 {
        match self {
            Self::LongPeriod => 0,
            Self::Diurnal => 1,
            Self::Semidiurnal => 2,
            Self::HigherOrder(n) => *n,
        }
    }
}

/// A named line with its multipliers of `(τ, s, h, p, N', p')` and a phase
/// offset `k` in quarter cycles.
///
/// The node column multiplies `N' = -N`, so a positive entry advances with
/// the regression of the lunar node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Constituent {
    pub name: &'static str,
    pub coefficients: [i8; 7],
    /// Spherical harmonic degree of the generating potential term.
    pub degree: u8,
}

impl Constituent {
    pub const fn new(name: &'static str, coefficients: [i8; 7], degree: u8) -> Self {
        Self {
            name,
            coefficients,
            degree,
        }
    }

    /// Harmonic order, the multiplier of `τ`.
    pub fn order(&self) -> i8 {
        self.coefficients[TAU]
    }

    pub fn species(&self) -> Species {
        Species::from_tau(self.coefficients[TAU])
    }

    /// The six astronomical multipliers without the phase offset.
    pub fn doodson_coefficients(&self) -> [i8; 6] {
        let c = self.coefficients;
        [c[TAU], c[S], c[H], c[P], c[NODE], c[PP]]
    }

    /// Phase offset in degrees.
    pub fn phase_offset(&self) -> f64 {
        90.0 * self.coefficients[PHASE] as f64
    }
}

impl fmt::Display for Constituent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
