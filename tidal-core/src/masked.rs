//! Values paired with an explicit validity mask.
//!
//! Upstream interpolation marks harmonic constants it could not produce (land
//! points, outside the model domain). Those flags travel with the data in a
//! [`MaskedArray`] instead of a NaN sentinel, so a NaN produced by arithmetic
//! and a point flagged as missing are both reported as invalid output.
//!
//! Combining two arrays ANDs their validity:
//!
//! ```
//! use tidal_core::MaskedArray;
//!
//! let a = MaskedArray::new(vec![1.0, 2.0, 3.0], vec![true, false, true])?;
//! let b = MaskedArray::from_values(vec![10.0, 20.0, f64::NAN]);
//! let c = a.zip_with(&b, |x, y| x + y)?;
//! assert_eq!(c.get(0), Some(11.0));
//! assert_eq!(c.get(1), None);
//! assert_eq!(c.get(2), None);
//! # Ok::<(), tidal_core::TideError>(())
//! ```

use crate::errors::{TideError, TideResult};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaskedArray {
    values: Vec<f64>,
    valid: Vec<bool>,
}

impl MaskedArray {
    /// Pairs values with a validity mask of the same length.
    ///
    /// Non-finite values are marked invalid regardless of the mask.
    pub fn new(values: Vec<f64>, valid: Vec<bool>) -> TideResult<Self> {
        if values.len() != valid.len() {
            return Err(TideError::dimension_mismatch(
                "masked array validity",
                values.len(),
                valid.len(),
            ));
        }
        let valid = values
            .iter()
            .zip(valid)
            .map(|(v, ok)| ok && v.is_finite())
            .collect();
        Ok(Self { values, valid })
    }

    /// All finite values valid.
    pub fn from_values(values: Vec<f64>) -> Self {
        let valid = values.iter().map(|v| v.is_finite()).collect();
        Self { values, valid }
    }

    pub fn from_options<I: IntoIterator<Item = Option<f64>>>(items: I) -> Self {
        let (values, valid) = items
            .into_iter()
            .map(|o| match o {
                Some(v) if v.is_finite() => (v, true),
                Some(v) => (v, false),
                None => (f64::NAN, false),
            })
            .unzip();
        Self { values, valid }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value at `index` if it is valid.
    pub fn get(&self, index: usize) -> Option<f64> {
        match self.valid.get(index) {
            Some(true) => Some(self.values[index]),
            _ => None,
        }
    }

    pub fn is_valid(&self, index: usize) -> bool {
        self.valid.get(index).copied().unwrap_or(false)
    }

    pub fn valid_count(&self) -> usize {
        self.valid.iter().filter(|v| **v).count()
    }

    /// Raw values, including those under the mask.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn mask(&self) -> &[bool] {
        &self.valid
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }

    /// Values with invalid entries replaced by `fill`.
    pub fn filled(&self, fill: f64) -> Vec<f64> {
        self.iter().map(|v| v.unwrap_or(fill)).collect()
    }

    /// Element-wise combination; the result is valid only where both inputs are.
    pub fn zip_with<F>(&self, other: &Self, f: F) -> TideResult<Self>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.len() != other.len() {
            return Err(TideError::dimension_mismatch(
                "masked array combination",
                self.len(),
                other.len(),
            ));
        }
        let values: Vec<f64> = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| f(*a, *b))
            .collect();
        let valid = self
            .valid
            .iter()
            .zip(&other.valid)
            .zip(&values)
            .map(|((a, b), v)| *a && *b && v.is_finite())
            .collect();
        Ok(Self { values, valid })
    }
}

impl FromIterator<Option<f64>> for MaskedArray {
    fn from_iter<I: IntoIterator<Item = Option<f64>>>(iter: I) -> Self {
        Self::from_options(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_values_are_masked() {
        let m = MaskedArray::new(vec![1.0, f64::INFINITY], vec![true, true]).unwrap();
        assert!(m.is_valid(0));
        assert!(!m.is_valid(1));
        assert_eq!(m.valid_count(), 1);
    }

    #[test]
    fn mismatched_mask_is_rejected() {
        let err = MaskedArray::new(vec![1.0, 2.0], vec![true]).unwrap_err();
        assert!(matches!(err, TideError::DimensionMismatch { .. }));
    }

    #[test]
    fn filled_replaces_masked_values() {
        let m: MaskedArray = vec![Some(1.0), None, Some(3.0)].into_iter().collect();
        assert_eq!(m.filled(-9999.0), vec![1.0, -9999.0, 3.0]);
        assert_eq!(m.get(7), None);
    }

    #[test]
    fn zip_with_propagates_nan_from_arithmetic() {
        let a = MaskedArray::from_values(vec![0.0, 1.0]);
        let b = MaskedArray::from_values(vec![0.0, 1.0]);
        let c = a.zip_with(&b, |x, y| x / y).unwrap();
        assert_eq!(c.get(0), None);
        assert_eq!(c.get(1), Some(1.0));
    }
}
