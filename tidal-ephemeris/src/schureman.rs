//! Auxiliary lunar-orbit angles of Schureman (1940), used by FES-style nodal corrections.
//!
//! All angles are in radians. The inputs are the mean longitudes of the lunar
//! perigee `P` and ascending node `N`, normally from the ASTRO5 formalism.

use std::f64::consts::{PI, TAU};

use crate::formalism::{mean_longitudes, Formalism};

/// Inclination of the lunar orbit to the equator and its derived angles.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchuremanArguments {
    /// Obliquity of the lunar orbit with respect to the equator, `I`.
    pub i: f64,
    /// Longitude in the Moon's orbit of the lunar intersection, `ξ`.
    pub xi: f64,
    /// Right ascension of the lunar intersection, `ν`.
    pub nu: f64,
    /// Term in the argument of L2, `R`.
    pub r: f64,
    /// Reciprocal of the L2 amplitude factor, `1/Ra`.
    pub ra: f64,
    /// Term in the argument of the lunisolar K1 constituent, `ν'`.
    pub nu_prime: f64,
    /// Term in the argument of the lunisolar K2 constituent, `ν''`.
    pub nu_sec: f64,
}

impl SchuremanArguments {
    /// Evaluates the angles from `P` and `N` in radians.
    pub fn from_longitudes(p: f64, n: f64) -> Self {
        let cos_i = 0.913694997 - 0.035692561 * n.cos();
        let i = cos_i.acos();

        let half = (n / 2.0).tan();
        let at1 = (1.01883 * half).atan();
        let at2 = (0.64412 * half).atan();
        let mut xi = n - at1 - at2;
        if n > PI {
            xi -= TAU;
        }
        let nu = at1 - at2;

        let sin_2i = (2.0 * i).sin();
        let nu_prime = (sin_2i * nu.sin() / (sin_2i * nu.cos() + 0.3347)).atan();
        let sin2_i = i.sin().powi(2);
        let nu_sec =
            0.5 * (sin2_i * (2.0 * nu).sin() / (sin2_i * (2.0 * nu).cos() + 0.0727)).atan();

        let p_r = p - xi;
        let t2 = (i / 2.0).tan().powi(2);
        let ra = (1.0 - 12.0 * t2 * (2.0 * p_r).cos() + 36.0 * t2 * t2).sqrt();
        let r = ((2.0 * p_r).sin() / (1.0 / (6.0 * t2) - (2.0 * p_r).cos())).atan();

        Self {
            i,
            xi,
            nu,
            r,
            ra,
            nu_prime,
            nu_sec,
        }
    }

    /// Evaluates the angles at a Modified Julian Day on the TT scale.
    pub fn at_mjd(mjd_tt: f64) -> Self {
        let m = mean_longitudes(mjd_tt, Formalism::Astro5);
        Self::from_longitudes(m.p.to_radians(), m.n.to_radians())
    }
}
