//! Equilibrium parameters of the constituents carried by OTIS-type models.
//!
//! Amplitudes are equilibrium amplitudes in metres, phases in radians,
//! frequencies in radians per second. `alpha` is the load Love number
//! factor `1 + k2 - h2` applied to the equilibrium potential.

use tidal_core::TideResult;

use crate::catalog::Catalog;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstituentParameters {
    pub amplitude: f64,
    pub phase: f64,
    pub omega: f64,
    pub alpha: f64,
    /// Species of the potential term, 0 to 2.
    pub species: u8,
}

const fn p(amplitude: f64, phase: f64, omega: f64, alpha: f64, species: u8) -> ConstituentParameters {
    ConstituentParameters {
        amplitude,
        phase,
        omega,
        alpha,
        species,
    }
}

const PARAMETERS: &[(&str, ConstituentParameters)] = &[
    ("m2", p(0.2441, 1.731557546, 1.405189e-4, 0.693, 2)),
    ("s2", p(0.112743, 0.0, 1.454441e-4, 0.693, 2)),
    ("k1", p(0.141565, 0.173003674, 7.292117e-5, 0.736, 1)),
    ("o1", p(0.100661, 1.558553872, 6.759774e-5, 0.695, 1)),
    ("n2", p(0.046397, 6.050721243, 1.378797e-4, 0.693, 2)),
    ("p1", p(0.046848, 6.110181633, 7.252295e-5, 0.706, 1)),
    ("k2", p(0.030684, 3.487600001, 1.458423e-4, 0.693, 2)),
    ("q1", p(0.019273, 5.877717569, 6.495854e-5, 0.695, 1)),
    ("2n2", p(0.006141, 4.086699633, 1.352405e-4, 0.693, 2)),
    ("mu2", p(0.007408, 3.463115091, 1.355937e-4, 0.693, 2)),
    ("nu2", p(0.008811, 5.427136701, 1.382329e-4, 0.693, 2)),
    ("l2", p(0.006931, 0.553986502, 1.431581e-4, 0.693, 2)),
    ("t2", p(0.006608, 0.052841931, 1.452450e-4, 0.693, 2)),
    ("j1", p(0.007915, 2.137025284, 7.556036e-5, 0.695, 1)),
    ("m1", p(0.007915, 2.436575100, 7.028195e-5, 0.695, 1)),
    ("oo1", p(0.004338, 1.929046130, 7.824458e-5, 0.695, 1)),
    ("rho1", p(0.003661, 5.254133027, 6.531174e-5, 0.695, 1)),
    ("mf", p(0.042041, 1.756042456, 0.053234e-4, 0.693, 0)),
    ("mm", p(0.022191, 1.964021610, 0.026392e-4, 0.693, 0)),
    ("ssa", p(0.019567, 3.487600001, 0.003982e-4, 0.693, 0)),
    ("m4", p(0.0, 3.463115091, 2.810377e-4, 0.693, 0)),
    ("ms4", p(0.0, 1.731557546, 2.859630e-4, 0.693, 0)),
    ("mn4", p(0.0, 1.499093481, 2.783984e-4, 0.693, 0)),
    ("m6", p(0.0, 5.194672637, 4.215566e-4, 0.693, 0)),
    ("m8", p(0.0, 6.926230184, 5.620755e-4, 0.693, 0)),
    ("mk3", p(0.0, 1.904561220, 2.134402e-4, 0.693, 0)),
    ("s6", p(0.0, 0.0, 4.363323e-4, 0.693, 0)),
    ("2sm2", p(0.0, 4.551627762, 1.503693e-4, 0.693, 0)),
    ("2mk3", p(0.0, 3.809122439, 2.081166e-4, 0.693, 0)),
    ("msf", p(0.003681, 4.551627762, 4.925200e-6, 0.693, 0)),
    ("sa", p(0.003104, 6.232786837, 1.990970e-7, 0.693, 0)),
    ("mt", p(0.008044, 3.720064066, 7.962619e-6, 0.693, 0)),
    ("2q1", p(0.002565, 3.91369596, 6.231934e-5, 0.693, 1)),
];

/// Parameters for `name`, `None` for a catalog line OTIS models do not carry.
///
/// Fails only when the name does not resolve.
pub fn parameters(name: &str) -> TideResult<Option<ConstituentParameters>> {
    parameters_in(Catalog::global(), name)
}

pub fn parameters_in(catalog: &Catalog, name: &str) -> TideResult<Option<ConstituentParameters>> {
    let canonical = catalog.resolve(name)?;
    Ok(PARAMETERS
        .iter()
        .find(|(n, _)| *n == canonical)
        .map(|(_, params)| *params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn m2_parameters() {
        let m2 = parameters("M2").unwrap().unwrap();
        assert_eq!(m2.amplitude, 0.2441);
        assert_eq!(m2.species, 2);
        // 12.42 hour period
        let period_hours = std::f64::consts::TAU / m2.omega / 3600.0;
        assert!((period_hours - 12.4206).abs() < 1e-3);
    }

    #[test]
    fn every_entry_is_in_the_catalog() {
        let cat = Catalog::global();
        for (name, _) in PARAMETERS {
            assert_eq!(cat.resolve(name).unwrap(), *name);
        }
    }

    #[test]
    fn missing_and_unknown() {
        assert_eq!(parameters("eps2").unwrap(), None);
        assert!(parameters("xx7").is_err());
    }

    #[test]
    fn diurnal_alpha_differs() {
        let k1 = parameters("k1").unwrap().unwrap();
        let o1 = parameters("o1").unwrap().unwrap();
        assert_eq!(k1.alpha, 0.736);
        assert_eq!(o1.alpha, 0.695);
    }
}
