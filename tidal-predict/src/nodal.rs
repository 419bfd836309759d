//! Nodal modulation factors `f` and angles `u`.
//!
//! Each model family carries its own table mapping canonical constituent
//! names to a closed-form expression in the longitude of the lunar node `N`
//! (and, for M1 and L2, the lunar perigee `p`). Compound lines combine base
//! entries of the same table: `f` is the product of the factors raised to the
//! absolute multiplier, `u` the signed sum of the angles.
//!
//! A name missing from the selected table is an
//! [`InvalidNodalConvention`](TideError::InvalidNodalConvention) error.
//! Lines without lunar modulation are listed explicitly with `f = 1, u = 0`.

use tidal_constituents::Catalog;
use tidal_core::{TideError, TideResult};
use tidal_ephemeris::{mean_longitudes, Formalism, SchuremanArguments};
use tidal_time::TideTime;

use crate::corrections::{Corrections, NodalFamily};

/// Amplitude factor and phase correction (degrees) of one constituent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodalCorrection {
    pub f: f64,
    pub u: f64,
}

impl NodalCorrection {
    pub const UNITY: NodalCorrection = NodalCorrection { f: 1.0, u: 0.0 };

    pub fn new(f: f64, u: f64) -> Self {
        Self { f, u }
    }
}

impl Default for NodalCorrection {
    fn default() -> Self {
        Self::UNITY
    }
}

/// Lunar angles the formulas are written in.
#[derive(Debug, Clone, Copy)]
pub struct NodalAngles {
    /// Longitude of the ascending node (radians).
    pub n: f64,
    /// Longitude of the lunar perigee (radians).
    pub p: f64,
    pub schureman: SchuremanArguments,
}

impl NodalAngles {
    pub fn from_longitudes(n_deg: f64, p_deg: f64) -> Self {
        let n = n_deg.to_radians();
        let p = p_deg.to_radians();
        Self {
            n,
            p,
            schureman: SchuremanArguments::from_longitudes(p, n),
        }
    }

    pub fn at(time: &TideTime, formalism: Formalism) -> Self {
        let m = mean_longitudes(time.mjd_tt(), formalism);
        Self::from_longitudes(m.n, m.p)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Term {
    Unity,
    OtisMm,
    OtisMf,
    OtisMt,
    OtisQ1,
    OtisO1,
    OtisM1,
    OtisChi1,
    OtisK1,
    OtisJ1,
    OtisOO1,
    OtisM2,
    OtisL2,
    OtisK2,
    OtisEta2,
    OtisM3,
    PughMm,
    PughMf,
    PughO1,
    PughK1,
    PughM2,
    PughK2,
    SchuremanMm,
    SchuremanMf,
    SchuremanO1,
    SchuremanK1,
    SchuremanJ1,
    SchuremanOO1,
    SchuremanM2,
    SchuremanL2,
    SchuremanK2,
    SchuremanM3,
    /// Products of base lines, `(name, multiplier)`.
    Compound(&'static [(&'static str, i8)]),
}

const M2_SQUARED: &[(&str, i8)] = &[("m2", 2)];
const M2_CUBED: &[(&str, i8)] = &[("m2", 3)];
const M2_FOURTH: &[(&str, i8)] = &[("m2", 4)];
const M2_ONCE: &[(&str, i8)] = &[("m2", 1)];
const M2_INVERSE: &[(&str, i8)] = &[("m2", -1)];
const M2_K1: &[(&str, i8)] = &[("m2", 1), ("k1", 1)];
const M2_K2: &[(&str, i8)] = &[("m2", 1), ("k2", 1)];
const M2_O1: &[(&str, i8)] = &[("m2", 1), ("o1", 1)];
const TWO_M2_K1: &[(&str, i8)] = &[("m2", 2), ("k1", -1)];
const MF_ONCE: &[(&str, i8)] = &[("mf", 1)];

const OTIS_TABLE: &[(&str, Term)] = &[
    ("z0", Term::Unity),
    ("node", Term::Unity),
    ("sa", Term::Unity),
    ("ssa", Term::Unity),
    ("mm", Term::OtisMm),
    ("msf", Term::Unity),
    ("mf", Term::OtisMf),
    ("mt", Term::OtisMt),
    ("msqm", Term::Compound(MF_ONCE)),
    ("mtm", Term::Compound(MF_ONCE)),
    ("alpha1", Term::Unity),
    ("2q1", Term::OtisQ1),
    ("sigma1", Term::OtisQ1),
    ("q1", Term::OtisQ1),
    ("rho1", Term::OtisQ1),
    ("o1", Term::OtisO1),
    ("tau1", Term::Unity),
    ("m1", Term::OtisM1),
    ("chi1", Term::OtisChi1),
    ("pi1", Term::Unity),
    ("p1", Term::Unity),
    ("s1", Term::Unity),
    ("k1", Term::OtisK1),
    ("psi1", Term::Unity),
    ("phi1", Term::Unity),
    ("theta1", Term::Unity),
    ("j1", Term::OtisJ1),
    ("oo1", Term::OtisOO1),
    ("eps2", Term::Compound(M2_ONCE)),
    ("mns2", Term::Compound(M2_SQUARED)),
    ("2n2", Term::OtisM2),
    ("mu2", Term::OtisM2),
    ("n2", Term::OtisM2),
    ("nu2", Term::OtisM2),
    ("m2a", Term::Unity),
    ("m2", Term::OtisM2),
    ("m2b", Term::Unity),
    ("mks2", Term::Compound(M2_K2)),
    ("lambda2", Term::Unity),
    ("l2", Term::OtisL2),
    ("t2", Term::Unity),
    ("s2", Term::Unity),
    ("r2", Term::Unity),
    ("k2", Term::OtisK2),
    ("eta2", Term::OtisEta2),
    // OTIS drivers advance 2SM2 with +u(M2)
    ("2sm2", Term::Compound(M2_ONCE)),
    ("2mk3", Term::Compound(TWO_M2_K1)),
    ("mo3", Term::Compound(M2_O1)),
    ("m3", Term::OtisM3),
    ("mk3", Term::Compound(M2_K1)),
    ("s3", Term::Unity),
    ("n4", Term::Compound(M2_SQUARED)),
    ("mn4", Term::Compound(M2_SQUARED)),
    ("m4", Term::Compound(M2_SQUARED)),
    ("ms4", Term::Compound(M2_ONCE)),
    ("mk4", Term::Compound(M2_K2)),
    ("s4", Term::Unity),
    ("s5", Term::Unity),
    ("m6", Term::Compound(M2_CUBED)),
    ("s6", Term::Unity),
    ("s7", Term::Unity),
    ("m8", Term::Compound(M2_FOURTH)),
    ("s8", Term::Unity),
];

const PUGH_TABLE: &[(&str, Term)] = &[
    ("z0", Term::Unity),
    ("node", Term::Unity),
    ("sa", Term::Unity),
    ("ssa", Term::Unity),
    ("sta", Term::Unity),
    ("mm", Term::PughMm),
    ("msm", Term::PughMm),
    ("msf", Term::Compound(M2_INVERSE)),
    ("mf", Term::PughMf),
    ("mt", Term::PughMf),
    ("mtm", Term::PughMf),
    ("msqm", Term::PughMf),
    ("2q1", Term::PughO1),
    ("sigma1", Term::PughO1),
    ("q1", Term::PughO1),
    ("rho1", Term::PughO1),
    ("o1", Term::PughO1),
    ("pi1", Term::Unity),
    ("p1", Term::Unity),
    ("s1", Term::Unity),
    ("k1", Term::PughK1),
    ("psi1", Term::Unity),
    ("phi1", Term::Unity),
    ("eps2", Term::PughM2),
    ("mns2", Term::Compound(M2_SQUARED)),
    ("2n2", Term::PughM2),
    ("mu2", Term::PughM2),
    ("n2", Term::PughM2),
    ("nu2", Term::PughM2),
    ("m2", Term::PughM2),
    ("mks2", Term::Compound(M2_K2)),
    ("lambda2", Term::PughM2),
    ("t2", Term::Unity),
    ("s2", Term::Unity),
    ("r2", Term::Unity),
    ("k2", Term::PughK2),
    ("2sm2", Term::Compound(M2_INVERSE)),
    ("2mk3", Term::Compound(TWO_M2_K1)),
    ("mo3", Term::Compound(M2_O1)),
    ("mk3", Term::Compound(M2_K1)),
    ("s3", Term::Unity),
    ("n4", Term::Compound(M2_SQUARED)),
    ("mn4", Term::Compound(M2_SQUARED)),
    ("m4", Term::Compound(M2_SQUARED)),
    ("ms4", Term::Compound(M2_ONCE)),
    ("mk4", Term::Compound(M2_K2)),
    ("s4", Term::Unity),
    ("s5", Term::Unity),
    ("m6", Term::Compound(M2_CUBED)),
    ("s6", Term::Unity),
    ("s7", Term::Unity),
    ("m8", Term::Compound(M2_FOURTH)),
    ("s8", Term::Unity),
];

const SCHUREMAN_TABLE: &[(&str, Term)] = &[
    ("z0", Term::Unity),
    ("node", Term::Unity),
    ("sa", Term::Unity),
    ("ssa", Term::Unity),
    ("sta", Term::Unity),
    ("mm", Term::SchuremanMm),
    ("msm", Term::SchuremanMm),
    ("msf", Term::Compound(M2_INVERSE)),
    ("mf", Term::SchuremanMf),
    ("mt", Term::SchuremanMf),
    ("mtm", Term::SchuremanMf),
    ("msqm", Term::SchuremanMf),
    ("2q1", Term::SchuremanO1),
    ("sigma1", Term::SchuremanO1),
    ("q1", Term::SchuremanO1),
    ("rho1", Term::SchuremanO1),
    ("o1", Term::SchuremanO1),
    ("chi1", Term::SchuremanJ1),
    ("pi1", Term::Unity),
    ("p1", Term::Unity),
    ("s1", Term::Unity),
    ("k1", Term::SchuremanK1),
    ("psi1", Term::Unity),
    ("phi1", Term::Unity),
    ("theta1", Term::SchuremanJ1),
    ("j1", Term::SchuremanJ1),
    ("oo1", Term::SchuremanOO1),
    ("eps2", Term::SchuremanM2),
    ("mns2", Term::Compound(M2_SQUARED)),
    ("2n2", Term::SchuremanM2),
    ("mu2", Term::SchuremanM2),
    ("n2", Term::SchuremanM2),
    ("nu2", Term::SchuremanM2),
    ("m2", Term::SchuremanM2),
    ("mks2", Term::Compound(M2_K2)),
    ("lambda2", Term::SchuremanM2),
    ("l2", Term::SchuremanL2),
    ("t2", Term::Unity),
    ("s2", Term::Unity),
    ("r2", Term::Unity),
    ("k2", Term::SchuremanK2),
    ("2sm2", Term::Compound(M2_INVERSE)),
    ("2mk3", Term::Compound(TWO_M2_K1)),
    ("mo3", Term::Compound(M2_O1)),
    ("m3", Term::SchuremanM3),
    ("mk3", Term::Compound(M2_K1)),
    ("s3", Term::Unity),
    ("n4", Term::Compound(M2_SQUARED)),
    ("mn4", Term::Compound(M2_SQUARED)),
    ("m4", Term::Compound(M2_SQUARED)),
    ("ms4", Term::Compound(M2_ONCE)),
    ("mk4", Term::Compound(M2_K2)),
    ("s4", Term::Unity),
    ("s5", Term::Unity),
    ("m6", Term::Compound(M2_CUBED)),
    ("s6", Term::Unity),
    ("s7", Term::Unity),
    ("m8", Term::Compound(M2_FOURTH)),
    ("s8", Term::Unity),
];

fn table(family: NodalFamily) -> &'static [(&'static str, Term)] {
    match family {
        NodalFamily::Otis => OTIS_TABLE,
        NodalFamily::Pugh => PUGH_TABLE,
        NodalFamily::Schureman => SCHUREMAN_TABLE,
    }
}

fn lookup(family: NodalFamily, name: &str) -> Option<Term> {
    table(family)
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, term)| *term)
}

/// `|1 + a e^{iN} + b e^{2iN}|` with the angle of its conjugate, the shape of
/// most OTIS fits.
fn satellite(a: f64, b: f64, n: f64) -> (f64, f64) {
    let (s, c) = libm::sincos(n);
    let (s2, c2) = libm::sincos(2.0 * n);
    let re = 1.0 + a * c + b * c2;
    let im = a * s + b * s2;
    (libm::hypot(re, im), libm::atan(-im / re).to_degrees())
}

impl Term {
    fn evaluate(&self, family: NodalFamily, a: &NodalAngles) -> NodalCorrection {
        let n = a.n;
        let (sn, cn) = libm::sincos(n);
        let (s2n, c2n) = libm::sincos(2.0 * n);
        let s3n = libm::sin(3.0 * n);
        let sch = &a.schureman;
        let (f, u) = match self {
            Term::Unity => (1.0, 0.0),
            Term::OtisMm | Term::PughMm => (1.0 - 0.130 * cn, 0.0),
            Term::OtisMf | Term::PughMf => (
                1.043 + 0.414 * cn,
                -23.7 * sn + 2.7 * s2n - 0.4 * s3n,
            ),
            Term::OtisMt => satellite(0.203, 0.040, n),
            Term::OtisQ1 => {
                let f = libm::hypot(1.0 + 0.188 * cn, 0.188 * sn);
                let u = libm::atan(0.189 * sn / (1.0 + 0.189 * cn)).to_degrees();
                (f, u)
            }
            Term::OtisO1 => {
                let f = libm::hypot(1.0 + 0.189 * cn - 0.0058 * c2n, 0.189 * sn - 0.0058 * s2n);
                (f, 10.8 * sn - 1.3 * s2n + 0.2 * s3n)
            }
            Term::OtisM1 => {
                let p = a.p;
                let re = 1.36 * libm::cos(p) + 0.267 * libm::cos(p - n);
                let im = 0.64 * libm::sin(p) + 0.135 * libm::sin(p - n);
                (libm::hypot(re, im), libm::atan2(im, re).to_degrees())
            }
            Term::OtisChi1 => satellite(0.221, 0.0, n),
            Term::OtisK1 => {
                let re = 1.0 + 0.1158 * cn - 0.0029 * c2n;
                let im = 0.1554 * sn - 0.0029 * s2n;
                (libm::hypot(re, im), libm::atan(-im / re).to_degrees())
            }
            Term::OtisJ1 => {
                let f = libm::hypot(1.0 + 0.169 * cn, 0.227 * sn);
                let u = libm::atan(-0.227 * sn / (1.0 + 0.169 * cn)).to_degrees();
                (f, u)
            }
            Term::OtisOO1 => satellite(0.640, 0.134, n),
            Term::OtisM2 => {
                let re = 1.0 - 0.03731 * cn + 0.00052 * c2n;
                let im = 0.03731 * sn - 0.00052 * s2n;
                (libm::hypot(re, im), libm::atan(-im / re).to_degrees())
            }
            Term::OtisL2 => {
                let p = a.p;
                let re = 1.0
                    - 0.25 * libm::cos(2.0 * p)
                    - 0.11 * libm::cos(2.0 * p - n)
                    - 0.04 * cn;
                let im = 0.25 * libm::sin(2.0 * p) + 0.11 * libm::sin(2.0 * p - n) + 0.04 * sn;
                (libm::hypot(re, im), libm::atan(-im / re).to_degrees())
            }
            Term::OtisK2 => {
                let re = 1.0 + 0.2852 * cn + 0.0324 * c2n;
                let im = 0.3108 * sn + 0.0324 * s2n;
                (libm::hypot(re, im), libm::atan(-im / re).to_degrees())
            }
            Term::OtisEta2 => satellite(0.436, 0.0, n),
            Term::OtisM3 => {
                let m2 = Term::OtisM2.evaluate(family, a);
                (libm::pow(m2.f, 1.5), 1.5 * m2.u)
            }
            Term::PughO1 => (
                1.009 + 0.187 * cn - 0.015 * c2n,
                10.8 * sn - 1.3 * s2n + 0.2 * s3n,
            ),
            Term::PughK1 => (1.006 + 0.115 * cn - 0.009 * c2n, -8.9 * sn + 0.7 * s2n),
            Term::PughM2 => (1.0 - 0.037 * cn, -2.1 * sn),
            Term::PughK2 => (1.024 + 0.286 * cn + 0.008 * c2n, -17.7 * sn + 0.7 * s2n),
            Term::SchuremanMm => ((2.0 / 3.0 - libm::sin(sch.i).powi(2)) / 0.5021, 0.0),
            Term::SchuremanMf => (
                libm::sin(sch.i).powi(2) / 0.1578,
                (-2.0 * sch.xi).to_degrees(),
            ),
            Term::SchuremanO1 => (
                libm::sin(sch.i) * libm::cos(sch.i / 2.0).powi(2) / 0.3800,
                (2.0 * sch.xi - sch.nu).to_degrees(),
            ),
            Term::SchuremanK1 => {
                let s2i = libm::sin(2.0 * sch.i);
                let f = libm::sqrt(0.8965 * s2i * s2i + 0.6001 * s2i * libm::cos(sch.nu) + 0.1006);
                (f, -sch.nu_prime.to_degrees())
            }
            Term::SchuremanJ1 => (
                libm::sin(2.0 * sch.i) / 0.7214,
                -sch.nu.to_degrees(),
            ),
            Term::SchuremanOO1 => (
                libm::sin(sch.i) * libm::sin(sch.i / 2.0).powi(2) / 0.01640,
                (-2.0 * sch.xi - sch.nu).to_degrees(),
            ),
            Term::SchuremanM2 => (
                libm::cos(sch.i / 2.0).powi(4) / 0.9154,
                (2.0 * sch.xi - 2.0 * sch.nu).to_degrees(),
            ),
            Term::SchuremanL2 => {
                let m2 = Term::SchuremanM2.evaluate(family, a);
                (m2.f * sch.ra, m2.u - sch.r.to_degrees())
            }
            Term::SchuremanK2 => {
                let si = libm::sin(sch.i);
                let f = libm::sqrt(
                    19.0444 * si.powi(4) + 2.7702 * si * si * libm::cos(2.0 * sch.nu) + 0.0981,
                );
                (f, (-2.0 * sch.nu_sec).to_degrees())
            }
            Term::SchuremanM3 => (
                libm::cos(sch.i / 2.0).powi(6) / 0.8758,
                (3.0 * sch.xi - 3.0 * sch.nu).to_degrees(),
            ),
            Term::Compound(parts) => {
                let mut f = 1.0;
                let mut u = 0.0;
                for (name, k) in parts.iter() {
                    let base = lookup(family, name)
                        .map(|t| t.evaluate(family, a))
                        .unwrap_or(NodalCorrection::UNITY);
                    f *= base.f.powi(i32::from(k.unsigned_abs()));
                    u += f64::from(*k) * base.u;
                }
                (f, u)
            }
        };
        NodalCorrection::new(f, u)
    }
}

/// Formula selection for a fixed list of constituents, validated once and
/// evaluated at many times.
#[derive(Debug, Clone)]
pub struct NodalPlan {
    family: Option<NodalFamily>,
    terms: Vec<Term>,
}

impl NodalPlan {
    pub fn new<S: AsRef<str>>(
        catalog: &Catalog,
        names: &[S],
        corrections: Corrections,
    ) -> TideResult<Self> {
        let family = corrections.family();
        let mut terms = Vec::with_capacity(names.len());
        for name in names {
            let canonical = catalog.resolve(name.as_ref())?;
            let term = match family {
                None => Term::Unity,
                Some(family) => lookup(family, canonical).ok_or_else(|| {
                    TideError::invalid_convention(
                        corrections.as_str(),
                        &format!("no nodal correction defined for {}", canonical),
                    )
                })?,
            };
            terms.push(term);
        }
        Ok(Self { family, terms })
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn evaluate(&self, angles: &NodalAngles) -> Vec<NodalCorrection> {
        match self.family {
            None => vec![NodalCorrection::UNITY; self.terms.len()],
            Some(family) => self
                .terms
                .iter()
                .map(|t| t.evaluate(family, angles))
                .collect(),
        }
    }
}

/// `true` when `name` has a nodal formula under `corrections`.
pub fn is_supported(catalog: &Catalog, name: &str, corrections: Corrections) -> bool {
    NodalPlan::new(catalog, &[name], corrections).is_ok()
}

/// Nodal corrections for every constituent at every time, indexed
/// `[time][constituent]`.
///
/// ```
/// use tidal_constituents::Catalog;
/// use tidal_predict::{nodal_corrections, Corrections};
/// use tidal_time::TideTime;
///
/// let times = [TideTime::from_mjd(58000.0, 0.0)];
/// let fu = nodal_corrections(Catalog::global(), &["m2", "s2"], &times, Corrections::Got)?;
/// assert!((fu[0][0].f - 1.0).abs() < 0.04);
/// assert_eq!(fu[0][1].f, 1.0);
/// # Ok::<(), tidal_core::TideError>(())
/// ```
pub fn nodal_corrections<S: AsRef<str>>(
    catalog: &Catalog,
    names: &[S],
    times: &[TideTime],
    corrections: Corrections,
) -> TideResult<Vec<Vec<NodalCorrection>>> {
    nodal_corrections_with(catalog, names, times, corrections, corrections.formalism())
}

/// As [`nodal_corrections`] with the mean longitudes taken from `formalism`.
pub fn nodal_corrections_with<S: AsRef<str>>(
    catalog: &Catalog,
    names: &[S],
    times: &[TideTime],
    corrections: Corrections,
    formalism: Formalism,
) -> TideResult<Vec<Vec<NodalCorrection>>> {
    let plan = NodalPlan::new(catalog, names, corrections)?;
    Ok(times
        .iter()
        .map(|t| plan.evaluate(&NodalAngles::at(t, formalism)))
        .collect())
}
