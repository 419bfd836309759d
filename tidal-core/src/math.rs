//! Scalar kernels shared by the ephemeris, argument and displacement code.
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`fmod`] | C-style floating remainder (sign follows the dividend) |
//! | [`normalize_degrees`] | Wrap an angle into `[0, 360)` |
//! | [`polynomial_sum`] | Evaluate `Σ cᵢ tⁱ` by Horner's rule |
//! | [`polynomial_rate`] | Evaluate the first derivative of the same polynomial |
//! | [`legendre`] | Unnormalized associated Legendre functions `P_l^m(x)` |
//! | [`unwrap_degrees`] | Remove 360° jumps from a sequence of angles |

use crate::errors::{TideError, TideResult};

#[inline]
pub fn fmod(x: f64, y: f64) -> f64 {
    libm::fmod(x, y)
}

/// Wraps an angle in degrees into `[0, 360)`.
///
/// ```
/// use tidal_core::math::normalize_degrees;
///
/// assert_eq!(normalize_degrees(-90.0), 270.0);
/// assert_eq!(normalize_degrees(450.0), 90.0);
/// ```
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = fmod(angle, 360.0);
    if wrapped < 0.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Evaluates `c[0] + c[1]·t + c[2]·t² + …` by Horner's rule.
#[inline]
pub fn polynomial_sum(coefficients: &[f64], t: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * t + c)
}

/// Evaluates the first derivative of [`polynomial_sum`] with respect to `t`.
#[inline]
pub fn polynomial_rate(coefficients: &[f64], t: f64) -> f64 {
    coefficients
        .iter()
        .enumerate()
        .skip(1)
        .rev()
        .fold(0.0, |acc, (i, &c)| acc * t + i as f64 * c)
}

/// Unnormalized associated Legendre functions of degree `l`.
///
/// Returns `[P_l^0(x), P_l^1(x), …, P_l^l(x)]` including the Condon-Shortley
/// phase `(-1)^m`. `x` is usually `sin(latitude)` or a direction cosine.
///
/// ```
/// use tidal_core::math::legendre;
///
/// let p = legendre(2, -0.9).unwrap();
/// assert!((p[0] - 0.715).abs() < 1e-12);
/// assert!((p[1] - 1.1769).abs() < 1e-4);
/// assert!((p[2] - 0.57).abs() < 1e-12);
/// ```
///
/// # Errors
///
/// `x` outside `[-1, 1]` is rejected.
pub fn legendre(l: usize, x: f64) -> TideResult<Vec<f64>> {
    if !(-1.0..=1.0).contains(&x) {
        return Err(TideError::invalid_input(
            "legendre",
            &format!("argument {} outside [-1, 1]", x),
        ));
    }
    let u = libm::sqrt((1.0 - x * x).max(0.0));
    let mut out = Vec::with_capacity(l + 1);
    for m in 0..=l {
        // P_m^m = (-1)^m (2m-1)!! u^m
        let mut pmm = 1.0;
        for k in 1..=m {
            pmm *= -((2 * k - 1) as f64) * u;
        }
        if l == m {
            out.push(pmm);
            continue;
        }
        let mut prev = pmm;
        let mut curr = x * (2 * m + 1) as f64 * pmm;
        for n in (m + 2)..=l {
            let next = ((2 * n - 1) as f64 * x * curr - (n + m - 1) as f64 * prev) / (n - m) as f64;
            prev = curr;
            curr = next;
        }
        out.push(curr);
    }
    Ok(out)
}

/// Removes 360° discontinuities from a sequence of angles in degrees.
pub fn unwrap_degrees(angles: &[f64]) -> Vec<f64> {
    let mut out: Vec<f64> = Vec::with_capacity(angles.len());
    let mut offset = 0.0;
    for (i, &a) in angles.iter().enumerate() {
        if i > 0 {
            let delta = a + offset - out[i - 1];
            if delta > 180.0 {
                offset -= 360.0 * libm::round(delta / 360.0);
            } else if delta < -180.0 {
                offset += 360.0 * libm::round(-delta / 360.0);
            }
        }
        out.push(a + offset);
    }
    out
}
