//! Tidal constituent catalog.
//!
//! Every name used by the prediction code resolves here, through a fixed
//! alias table, to a [`Constituent`] carrying its multipliers of the
//! fundamental arguments.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | [`Catalog`], name resolution, coefficient tables, inverse Doodson lookup |
//! | [`constituent`] | [`Constituent`] and its [`Species`] |
//! | [`doodson`] | [`DoodsonNumber`] (`255.555`, `3X1.555`) and [`ExtendedDoodson`] (`BZZZZZZ`) |
//! | [`parameters`] | Equilibrium amplitude, phase, frequency and Love factor for OTIS constituents |
//!
//! ```
//! use tidal_constituents::{Catalog, PhaseConvention};
//!
//! let catalog = Catalog::global();
//! assert_eq!(catalog.resolve("LA2")?, "lambda2");
//! assert_eq!(catalog.doodson_number("k1")?.to_string(), "165.555");
//!
//! let rows = catalog.coefficients_table(&["m2", "s1"], PhaseConvention::Doodson)?;
//! assert_eq!(rows[1][6], 2);
//! # Ok::<(), tidal_core::TideError>(())
//! ```

pub mod catalog;
pub mod constituent;
pub mod doodson;
pub mod parameters;
mod table;

pub use catalog::{canonicalize, Catalog, DoodsonHint, PhaseConvention};
pub use constituent::{Constituent, Species};
pub use doodson::{DoodsonCode, DoodsonFormat, DoodsonNumber, ExtendedDoodson};
pub use parameters::{parameters, parameters_in, ConstituentParameters};
