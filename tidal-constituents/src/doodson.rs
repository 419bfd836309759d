//! Doodson numbers in the classic numeric form and the extended UKHO form.
//!
//! The numeric form writes the multiplier of `τ` as the first digit and the
//! remaining five multipliers offset by 5, as `ddd.ddd`. A digit of 10 is
//! written `X`, which happens for compound shallow-water lines such as
//! `2so3` (`3X1.555`). Anything else outside `0..=10` cannot be encoded.
//!
//! The extended form uses one letter per multiplier, including the phase
//! offset, from the alphabet `RSTUVWXYZABCDEFGHIJKLMNOP` where `Z` is zero,
//! covering `-8..=16`.
//!
//! ```
//! use tidal_constituents::{DoodsonNumber, ExtendedDoodson};
//!
//! let m2: DoodsonNumber = "255.555".parse()?;
//! assert_eq!(m2.coefficients(), [2, 0, 0, 0, 0, 0]);
//! assert_eq!(m2.value(), Some(255.555));
//!
//! let node = ExtendedDoodson::new([0, 0, 0, 0, 1, 0, 2])?;
//! assert_eq!(node.to_string(), "ZZZZAZB");
//! # Ok::<(), tidal_core::TideError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use tidal_core::{TideError, TideResult};

const EXTENDED_ALPHABET: &[u8; 25] = b"RSTUVWXYZABCDEFGHIJKLMNOP";
const EXTENDED_OFFSET: i8 = 8;

/// Six-digit Doodson number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DoodsonNumber {
    digits: [u8; 6],
}

impl DoodsonNumber {
    /// Encodes the leading six multipliers of `coefficients`.
    pub fn from_coefficients(coefficients: &[i8]) -> TideResult<Self> {
        if coefficients.len() < 6 {
            return Err(TideError::dimension_mismatch(
                "doodson coefficients",
                6,
                coefficients.len(),
            ));
        }
        let mut digits = [0u8; 6];
        for (i, (&c, d)) in coefficients.iter().zip(digits.iter_mut()).enumerate() {
            let v = if i == 0 { c as i16 } else { c as i16 + 5 };
            if !(0..=10).contains(&v) {
                return Err(TideError::invalid_doodson(
                    &format!("{:?}", &coefficients[..6]),
                    "multiplier outside the encodable range",
                ));
            }
            *d = v as u8;
        }
        Ok(Self { digits })
    }

    pub fn coefficients(&self) -> [i8; 6] {
        let mut c = [0i8; 6];
        for (i, (&d, out)) in self.digits.iter().zip(c.iter_mut()).enumerate() {
            *out = if i == 0 { d as i8 } else { d as i8 - 5 };
        }
        c
    }

    /// `true` when any digit needs the `X` marker.
    pub fn is_extended(&self) -> bool {
        self.digits.iter().any(|&d| d == 10)
    }

    /// The number as a float, `None` for `X` forms.
    pub fn value(&self) -> Option<f64> {
        if self.is_extended() {
            return None;
        }
        let n = self
            .digits
            .iter()
            .fold(0u32, |acc, &d| acc * 10 + d as u32);
        Some(n as f64 / 1000.0)
    }
}

fn digit_char(d: u8) -> char {
    if d == 10 {
        'X'
    } else {
        (b'0' + d) as char
    }
}

impl fmt::Display for DoodsonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &d) in self.digits.iter().enumerate() {
            if i == 3 {
                f.write_str(".")?;
            }
            write!(f, "{}", digit_char(d))?;
        }
        Ok(())
    }
}

impl FromStr for DoodsonNumber {
    type Err = TideError;

    /// Accepts `255.555`, `55.565` (leading zero dropped) and `3X1.555`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (int, frac) = match trimmed.split_once('.') {
            Some(parts) => parts,
            None if trimmed.len() == 6 => trimmed.split_at(3),
            None => return Err(TideError::invalid_doodson(s, "expected the form ddd.ddd")),
        };
        if int.is_empty() || int.len() > 3 || frac.len() != 3 {
            return Err(TideError::invalid_doodson(s, "expected the form ddd.ddd"));
        }

        let padded = format!("{:0>3}{}", int, frac);
        let mut digits = [0u8; 6];
        for (ch, d) in padded.chars().zip(digits.iter_mut()) {
            *d = match ch {
                '0'..='9' => ch as u8 - b'0',
                'X' | 'x' => 10,
                _ => return Err(TideError::invalid_doodson(s, "unexpected character")),
            };
        }
        Ok(Self { digits })
    }
}

/// Seven-letter extended Doodson number, phase offset included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtendedDoodson {
    coefficients: [i8; 7],
}

impl ExtendedDoodson {
    pub fn new(coefficients: [i8; 7]) -> TideResult<Self> {
        let max = EXTENDED_ALPHABET.len() as i8 - EXTENDED_OFFSET;
        if coefficients
            .iter()
            .any(|&c| c < -EXTENDED_OFFSET || c >= max)
        {
            return Err(TideError::invalid_doodson(
                &format!("{:?}", coefficients),
                "multiplier outside the extended alphabet",
            ));
        }
        Ok(Self { coefficients })
    }

    pub fn coefficients(&self) -> [i8; 7] {
        self.coefficients
    }
}

impl fmt::Display for ExtendedDoodson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &c in &self.coefficients {
            let letter = EXTENDED_ALPHABET[(c + EXTENDED_OFFSET) as usize];
            write!(f, "{}", letter as char)?;
        }
        Ok(())
    }
}

impl FromStr for ExtendedDoodson {
    type Err = TideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        if code.len() != 7 {
            return Err(TideError::invalid_doodson(s, "expected seven letters"));
        }
        let mut coefficients = [0i8; 7];
        for (b, c) in code.bytes().zip(coefficients.iter_mut()) {
            let pos = EXTENDED_ALPHABET
                .iter()
                .position(|&a| a == b)
                .ok_or_else(|| TideError::invalid_doodson(s, "letter outside the alphabet"))?;
            *c = pos as i8 - EXTENDED_OFFSET;
        }
        Ok(Self { coefficients })
    }
}

/// Which encoding [`Catalog::doodson_numbers`](crate::Catalog::doodson_numbers) returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DoodsonFormat {
    #[default]
    Numeric,
    Extended,
}

/// A Doodson number in either encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoodsonCode {
    Numeric(DoodsonNumber),
    Extended(ExtendedDoodson),
}

impl fmt::Display for DoodsonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => n.fmt(f),
            Self::Extended(e) => e.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_encoding() {
        let k1 = DoodsonNumber::from_coefficients(&[1, 1, 0, 0, 0, 0, 1]).unwrap();
        assert_eq!(k1.to_string(), "165.555");
        assert_eq!(k1.value(), Some(165.555));

        let node = DoodsonNumber::from_coefficients(&[0, 0, 0, 0, 1, 0]).unwrap();
        assert_eq!(node.to_string(), "055.565");
        assert_eq!(node.value(), Some(55.565));
    }

    #[test]
    fn x_marker_for_ten() {
        let so3 = DoodsonNumber::from_coefficients(&[3, 5, -4, 0, 0, 0]).unwrap();
        assert_eq!(so3.to_string(), "3X1.555");
        assert!(so3.is_extended());
        assert_eq!(so3.value(), None);
        let parsed: DoodsonNumber = "3x1.555".parse().unwrap();
        assert_eq!(parsed, so3);
    }

    #[test]
    fn unencodable_multiplier() {
        let err = DoodsonNumber::from_coefficients(&[6, 6, -6, 0, 0, 0]).unwrap_err();
        assert!(matches!(err, TideError::InvalidDoodsonNumber { .. }));
        assert!(DoodsonNumber::from_coefficients(&[12, 0, 0, 0, 0, 0]).is_err());
    }

    #[test]
    fn parse_forms() {
        let a: DoodsonNumber = "55.565".parse().unwrap();
        let b: DoodsonNumber = " 055.565 ".parse().unwrap();
        let c: DoodsonNumber = "055565".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.coefficients(), [0, 0, 0, 0, 1, 0]);
        assert!("255.55".parse::<DoodsonNumber>().is_err());
        assert!("2a5.555".parse::<DoodsonNumber>().is_err());
        assert!("1255.555".parse::<DoodsonNumber>().is_err());
    }

    #[test]
    fn extended_letters() {
        let m2 = ExtendedDoodson::new([2, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(m2.to_string(), "BZZZZZZ");
        let m12 = ExtendedDoodson::new([12, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(m12.to_string(), "LZZZZZZ");
        let parsed: ExtendedDoodson = "ceVZZZa".parse().unwrap();
        assert_eq!(parsed.coefficients(), [3, 5, -4, 0, 0, 0, 1]);
        assert!(ExtendedDoodson::new([17, 0, 0, 0, 0, 0, 0]).is_err());
        assert!("BZZZZZ".parse::<ExtendedDoodson>().is_err());
        assert!("BZZZZZQ".parse::<ExtendedDoodson>().is_err());
    }
}
