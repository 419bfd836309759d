//! Name resolution and lookups over the constituent table.
//!
//! A [`Catalog`] is immutable once built. The process-wide instance from
//! [`Catalog::global`] is built on first use and shared read-only between
//! threads; functions that take a `&Catalog` also accept a custom table.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use tidal_core::{TideError, TideResult};
use tracing::debug;

use crate::constituent::{Constituent, PHASE};
use crate::doodson::{DoodsonCode, DoodsonFormat, DoodsonNumber, ExtendedDoodson};
use crate::table::{ALIASES, CONSTITUENTS};

static GLOBAL: Lazy<Catalog> = Lazy::new(Catalog::standard);

/// Phase-offset convention of the model family.
///
/// GOT and FES models reference `s1` to a `k` of 2 (180°) where OTIS-type
/// models use 1 (90°). No other line differs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PhaseConvention {
    #[default]
    Otis,
    Doodson,
}

impl PhaseConvention {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Otis => "otis",
            Self::Doodson => "doodson",
        }
    }
}

impl fmt::Display for PhaseConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhaseConvention {
    type Err = TideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "otis" => Ok(Self::Otis),
            "doodson" => Ok(Self::Doodson),
            _ => Err(TideError::invalid_input(
                "phase convention",
                &format!("unknown convention '{}'", s),
            )),
        }
    }
}

/// Disambiguates an inverse Doodson lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoodsonHint<'a> {
    /// Keep candidates generated by this harmonic degree.
    Degree(u8),
    /// Keep the named candidate, aliases allowed.
    Name(&'a str),
}

/// Lowercases and strips padding that is not part of a name.
///
/// A trailing `'` marks degree-3 lines and survives.
pub fn canonicalize(name: &str) -> String {
    name.trim_start_matches(|c: char| !c.is_ascii_alphanumeric())
        .trim_end_matches(|c: char| !c.is_ascii_alphanumeric() && c != '\'')
        .to_ascii_lowercase()
}

#[derive(Debug, Clone)]
pub struct Catalog {
    constituents: Vec<Constituent>,
    index: HashMap<&'static str, usize>,
    aliases: HashMap<&'static str, &'static str>,
}

impl Catalog {
    /// The shared built-in catalog.
    pub fn global() -> &'static Catalog {
        &GLOBAL
    }

    /// Builds the built-in table.
    pub fn standard() -> Self {
        let catalog = Self::build(CONSTITUENTS.to_vec(), ALIASES);
        debug!(
            constituents = catalog.len(),
            aliases = catalog.aliases.len(),
            "built constituent catalog"
        );
        catalog
    }

    /// Builds a catalog from a custom list, rejecting duplicate names and
    /// aliases that point nowhere.
    pub fn from_constituents(
        constituents: Vec<Constituent>,
        aliases: &[(&'static str, &'static str)],
    ) -> TideResult<Self> {
        let mut seen = HashMap::new();
        for (i, c) in constituents.iter().enumerate() {
            if seen.insert(c.name, i).is_some() {
                return Err(TideError::invalid_input(
                    "constituent catalog",
                    &format!("duplicate constituent '{}'", c.name),
                ));
            }
        }
        for (alias, target) in aliases {
            if !seen.contains_key(target) {
                return Err(TideError::invalid_input(
                    "constituent catalog",
                    &format!("alias '{}' targets unknown constituent '{}'", alias, target),
                ));
            }
        }
        Ok(Self::build(constituents, aliases))
    }

    fn build(constituents: Vec<Constituent>, aliases: &[(&'static str, &'static str)]) -> Self {
        let index = constituents
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name, i))
            .collect();
        Self {
            constituents,
            index,
            aliases: aliases.iter().copied().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.constituents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constituents.is_empty()
    }

    /// Constituents in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, Constituent> {
        self.constituents.iter()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_ok()
    }

    /// Canonical name for `name` or one of its aliases.
    pub fn resolve(&self, name: &str) -> TideResult<&'static str> {
        let key = canonicalize(name);
        let key = self.aliases.get(key.as_str()).copied().unwrap_or(key.as_str());
        self.index
            .get(key)
            .map(|&i| self.constituents[i].name)
            .ok_or_else(|| TideError::unknown_constituent(name))
    }

    pub fn get(&self, name: &str) -> TideResult<&Constituent> {
        let canonical = self.resolve(name)?;
        Ok(&self.constituents[self.index[canonical]])
    }

    /// Multipliers `(τ, s, h, p, N', p', k)` under `convention`.
    pub fn coefficients(&self, name: &str, convention: PhaseConvention) -> TideResult<[i8; 7]> {
        let c = self.get(name)?;
        let mut row = c.coefficients;
        if convention == PhaseConvention::Doodson && c.name == "s1" {
            row[PHASE] = 2;
        }
        Ok(row)
    }

    /// One row of multipliers per name, in the order given.
    pub fn coefficients_table<S: AsRef<str>>(
        &self,
        names: &[S],
        convention: PhaseConvention,
    ) -> TideResult<Vec<[i8; 7]>> {
        names
            .iter()
            .map(|n| self.coefficients(n.as_ref(), convention))
            .collect()
    }

    pub fn doodson_number(&self, name: &str) -> TideResult<DoodsonNumber> {
        DoodsonNumber::from_coefficients(&self.get(name)?.coefficients)
    }

    pub fn extended_doodson(&self, name: &str) -> TideResult<ExtendedDoodson> {
        ExtendedDoodson::new(self.get(name)?.coefficients)
    }

    /// Doodson numbers for several names in the requested encoding.
    pub fn doodson_numbers<S: AsRef<str>>(
        &self,
        names: &[S],
        format: DoodsonFormat,
    ) -> TideResult<Vec<DoodsonCode>> {
        names
            .iter()
            .map(|n| match format {
                DoodsonFormat::Numeric => self.doodson_number(n.as_ref()).map(DoodsonCode::Numeric),
                DoodsonFormat::Extended => {
                    self.extended_doodson(n.as_ref()).map(DoodsonCode::Extended)
                }
            })
            .collect()
    }

    /// Constituent with this Doodson number.
    ///
    /// Numbers shared by several lines need a hint; without one, or when the
    /// hint leaves more than one, the candidates are returned in the error.
    pub fn from_doodson(
        &self,
        number: &DoodsonNumber,
        hint: Option<DoodsonHint<'_>>,
    ) -> TideResult<&Constituent> {
        let target = number.coefficients();
        let candidates: Vec<&Constituent> = self
            .constituents
            .iter()
            .filter(|c| c.doodson_coefficients() == target)
            .collect();
        self.pick(&number.to_string(), candidates, hint)
    }

    /// Constituent with this extended number under `convention`.
    pub fn from_extended(
        &self,
        code: &ExtendedDoodson,
        convention: PhaseConvention,
        hint: Option<DoodsonHint<'_>>,
    ) -> TideResult<&Constituent> {
        let target = code.coefficients();
        let candidates: Vec<&Constituent> = self
            .constituents
            .iter()
            .filter(|c| {
                self.coefficients(c.name, convention)
                    .map(|row| row == target)
                    .unwrap_or(false)
            })
            .collect();
        self.pick(&code.to_string(), candidates, hint)
    }

    fn pick<'c>(
        &self,
        number: &str,
        candidates: Vec<&'c Constituent>,
        hint: Option<DoodsonHint<'_>>,
    ) -> TideResult<&'c Constituent> {
        match candidates.as_slice() {
            [] => return Err(TideError::unknown_constituent(number)),
            [only] => return Ok(*only),
            _ => {}
        }

        let names: Vec<&str> = candidates.iter().map(|c| c.name).collect();
        let Some(hint) = hint else {
            return Err(TideError::ambiguous_doodson(number, &names));
        };
        let kept: Vec<&Constituent> = match hint {
            DoodsonHint::Degree(degree) => candidates
                .iter()
                .copied()
                .filter(|c| c.degree == degree)
                .collect(),
            DoodsonHint::Name(name) => {
                let wanted = self.resolve(name)?;
                candidates
                    .iter()
                    .copied()
                    .filter(|c| c.name == wanted)
                    .collect()
            }
        };
        match kept.as_slice() {
            [only] => Ok(*only),
            [] => Err(TideError::ambiguous_doodson(number, &names)),
            many => {
                let names: Vec<&str> = many.iter().map(|c| c.name).collect();
                Err(TideError::ambiguous_doodson(number, &names))
            }
        }
    }

    /// Every Doodson number shared by more than one constituent, with the
    /// names that share it, sorted by number.
    pub fn collisions(&self) -> Vec<(DoodsonNumber, Vec<&'static str>)> {
        let mut groups: HashMap<DoodsonNumber, Vec<&'static str>> = HashMap::new();
        for c in &self.constituents {
            if let Ok(number) = DoodsonNumber::from_coefficients(&c.coefficients) {
                groups.entry(number).or_default().push(c.name);
            }
        }
        let mut shared: Vec<_> = groups.into_iter().filter(|(_, v)| v.len() > 1).collect();
        shared.sort_by_key(|(n, _)| n.to_string());
        shared
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Constituent;
    type IntoIter = std::slice::Iter<'a, Constituent>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
