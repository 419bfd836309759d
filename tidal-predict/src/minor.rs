//! Inference of minor constituents from the majors.
//!
//! Twenty minor lines are estimated by linear admittance from eight core
//! majors (`q1 o1 p1 k1 n2 m2 s2 k2`, plus `2n2` where present). A minor the
//! model already carries as a major is skipped so it is never counted twice.
//! Every core major is required; a partial set fails with
//! [`InsufficientMajorConstituents`](TideError::InsufficientMajorConstituents)
//! instead of silently producing a weaker estimate.
//!
//! FES models replace five semidiurnal admittances with spline fits that also
//! use `k2`, and add `eps2` and `eta2`, which are zero for other families.

use std::collections::HashSet;

use tidal_constituents::Catalog;
use tidal_core::{Complex64, MaskedArray, TideError, TideResult};
use tidal_ephemeris::Formalism;
use tidal_time::TideTime;
use tracing::{debug, instrument, warn};

use crate::arguments::{coefficient_rows, AstronomicalArguments};
use crate::corrections::{Corrections, NodalFamily};
use crate::harmonic::{warn_on_universal_time, HarmonicConstants, Shape};
use crate::nodal::{NodalAngles, NodalCorrection};

/// Majors the admittances are built on, in `z` order.
pub const CORE_MAJORS: [&str; 8] = ["q1", "o1", "p1", "k1", "n2", "m2", "s2", "k2"];

const Q1: usize = 0;
const O1: usize = 1;
const K1: usize = 3;
const N2: usize = 4;
const M2: usize = 5;
const S2: usize = 6;
const K2: usize = 7;
const TWO_N2: usize = 8;

/// Nodal modulation of a minor line, `|1 + a·e^{iN} + b·e^{2iN}|` and its
/// angle with `sign`.
#[derive(Debug, Clone, Copy)]
struct Modulation {
    a: f64,
    b: f64,
    sign: f64,
}

const NONE: Option<Modulation> = None;

const fn modulation(a: f64, b: f64, sign: f64) -> Option<Modulation> {
    Some(Modulation { a, b, sign })
}

const O1_LIKE: Option<Modulation> = modulation(0.189, -0.0058, 1.0);
const M2_LIKE: Option<Modulation> = modulation(-0.0373, 0.0, 1.0);

struct Minor {
    name: &'static str,
    /// Also skipped when this major is present.
    alias: Option<&'static str>,
    admittance: &'static [(usize, f64)],
    /// Replaces `admittance` under FES corrections.
    fes: Option<&'static [(usize, f64)]>,
    modulation: Option<Modulation>,
}

const fn minor(
    name: &'static str,
    admittance: &'static [(usize, f64)],
    fes: Option<&'static [(usize, f64)]>,
    modulation: Option<Modulation>,
) -> Minor {
    Minor {
        name,
        alias: None,
        admittance,
        fes,
        modulation,
    }
}

const MINORS: [Minor; 20] = [
    minor("2q1", &[(Q1, 0.263), (O1, -0.0252)], None, O1_LIKE),
    minor("sigma1", &[(Q1, 0.297), (O1, -0.0264)], None, O1_LIKE),
    minor("rho1", &[(Q1, 0.164), (O1, 0.0048)], None, O1_LIKE),
    minor("m1b", &[(O1, 0.0140), (K1, 0.0101)], None, modulation(0.185, 0.0, 1.0)),
    Minor {
        name: "m1a",
        alias: Some("m1"),
        admittance: &[(O1, 0.0389), (K1, 0.0282)],
        fes: None,
        modulation: modulation(0.201, 0.0, -1.0),
    },
    minor("chi1", &[(O1, 0.0064), (K1, 0.0060)], None, modulation(0.221, 0.0, -1.0)),
    minor("pi1", &[(O1, 0.0030), (K1, 0.0171)], None, NONE),
    minor("phi1", &[(O1, -0.0015), (K1, 0.0152)], None, NONE),
    minor("theta1", &[(O1, -0.0065), (K1, 0.0155)], None, NONE),
    minor("j1", &[(O1, -0.0389), (K1, 0.0836)], None, modulation(0.198, 0.0, -1.0)),
    minor("oo1", &[(O1, -0.0431), (K1, 0.0613)], None, modulation(0.640, 0.134, -1.0)),
    minor("2n2", &[(N2, 0.264), (M2, -0.0253)], None, M2_LIKE),
    minor(
        "mu2",
        &[(N2, 0.298), (M2, -0.0264)],
        Some(&[(K2, 0.069439968323), (N2, 0.351535557706), (M2, -0.046278307672)]),
        M2_LIKE,
    ),
    minor(
        "nu2",
        &[(N2, 0.165), (M2, 0.00487)],
        Some(&[(K2, -0.006104695053), (N2, 0.156878802427), (M2, 0.006755704028)]),
        M2_LIKE,
    ),
    minor(
        "lambda2",
        &[(M2, 0.0040), (S2, 0.0074)],
        Some(&[(K2, 0.016503557465), (N2, -0.013307812292), (M2, 0.007753383202)]),
        NONE,
    ),
    minor("l2", &[(M2, 0.0131), (S2, 0.0326)], None, M2_LIKE),
    minor(
        "l2b",
        &[(M2, 0.0033), (S2, 0.0082)],
        Some(&[(K2, 0.077137765667), (N2, -0.051653455134), (M2, 0.027869916824)]),
        modulation(0.441, 0.0, -1.0),
    ),
    minor(
        "t2",
        &[(S2, 0.0585)],
        Some(&[(K2, 0.180480173707), (N2, -0.020101177502), (M2, 0.008331518844)]),
        NONE,
    ),
    minor("eps2", &[], Some(&[(TWO_N2, 0.53285), (N2, -0.03304)]), M2_LIKE),
    minor("eta2", &[], Some(&[(M2, -0.0034925), (K2, 0.0831707)]), modulation(0.436, 0.0, -1.0)),
];

/// Names of the minor lines inference can add, in evaluation order.
pub fn minor_constituents() -> impl Iterator<Item = &'static str> {
    MINORS.iter().map(|m| m.name)
}

impl Modulation {
    fn evaluate(&self, n: f64) -> NodalCorrection {
        let z = Complex64::new(1.0, 0.0)
            + self.a * Complex64::from_polar(1.0, n)
            + self.b * Complex64::from_polar(1.0, 2.0 * n);
        NodalCorrection::new(z.norm(), self.sign * libm::atan2(z.im, z.re).to_degrees())
    }
}

/// Which minors to add and where the majors sit in the caller's columns.
struct InferencePlan {
    majors: [usize; 8],
    two_n2: Option<usize>,
    minors: Vec<&'static Minor>,
    rows: Vec<[i8; 7]>,
    fes: bool,
}

impl InferencePlan {
    fn new(
        catalog: &Catalog,
        hc: &HarmonicConstants,
        corrections: Corrections,
        selection: Option<&[String]>,
    ) -> TideResult<Self> {
        let present = hc
            .names()
            .iter()
            .map(|n| catalog.resolve(n))
            .collect::<TideResult<Vec<_>>>()?;
        let position = |name: &str| present.iter().position(|p| *p == name);

        let missing: Vec<&str> = CORE_MAJORS
            .iter()
            .copied()
            .filter(|m| position(m).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(TideError::insufficient_majors(&missing));
        }
        let mut majors = [0usize; 8];
        for (slot, name) in majors.iter_mut().zip(CORE_MAJORS) {
            *slot = position(name).unwrap_or_default();
        }

        let wanted = match selection {
            None => None,
            Some(names) => {
                let mut set = HashSet::new();
                for name in names {
                    let canonical = catalog.resolve(name)?;
                    if !MINORS.iter().any(|m| m.name == canonical) {
                        return Err(TideError::invalid_input(
                            "minor constituents",
                            &format!("{} is not an inferable minor constituent", canonical),
                        ));
                    }
                    set.insert(canonical);
                }
                Some(set)
            }
        };

        let mut minors = Vec::new();
        let mut skipped = 0usize;
        for m in MINORS.iter() {
            if wanted.as_ref().is_some_and(|w| !w.contains(m.name)) {
                continue;
            }
            let carried = position(m.name).is_some() || m.alias.is_some_and(|a| position(a).is_some());
            if carried {
                if wanted.is_some() {
                    warn!(constituent = m.name, "requested minor is already a major");
                }
                skipped += 1;
                continue;
            }
            minors.push(m);
        }
        debug!(
            inferred = minors.len(),
            skipped, "minor constituents selected"
        );

        let names: Vec<&str> = minors.iter().map(|m| m.name).collect();
        let rows = coefficient_rows(catalog, &names, corrections.phase_convention())?;
        Ok(Self {
            majors,
            two_n2: position("2n2"),
            minors,
            rows,
            fes: corrections.family() == Some(NodalFamily::Schureman),
        })
    }

    /// Complex admittance-weighted constants of each minor at one point.
    fn admittances(&self, hc: &HarmonicConstants, point: usize) -> Option<Vec<Complex64>> {
        let mut z = [Complex64::new(0.0, 0.0); 9];
        for (slot, &col) in z.iter_mut().zip(&self.majors) {
            *slot = hc.get(point, col)?;
        }
        if let Some(col) = self.two_n2 {
            z[TWO_N2] = hc.get(point, col)?;
        }
        Some(
            self.minors
                .iter()
                .map(|m| {
                    let terms = match (self.fes, m.fes) {
                        (true, Some(fes)) => fes,
                        _ => m.admittance,
                    };
                    terms.iter().map(|(k, c)| z[*k] * *c).sum::<Complex64>()
                })
                .collect(),
        )
    }

    fn phasors(&self, time: &TideTime, formalism: Formalism, corrections: Corrections) -> Vec<Complex64> {
        let args = AstronomicalArguments::at(time, formalism);
        let n = NodalAngles::at(time, formalism).n;
        self.minors
            .iter()
            .zip(&self.rows)
            .map(|(m, row)| {
                let fu = match (corrections.family(), m.modulation) {
                    (Some(_), Some(modulation)) => modulation.evaluate(n),
                    _ => NodalCorrection::UNITY,
                };
                Complex64::from_polar(fu.f, (args.argument(row) + fu.u).to_radians())
            })
            .collect()
    }
}

pub(crate) fn infer_minor_with(
    catalog: &Catalog,
    times: &[TideTime],
    hc: &HarmonicConstants,
    corrections: Corrections,
    formalism: Formalism,
    minor: Option<&[String]>,
    shape: Shape,
) -> TideResult<MaskedArray> {
    let n = shape.output_len(times.len(), hc.n_points())?;
    let plan = InferencePlan::new(catalog, hc, corrections, minor)?;
    warn_on_universal_time(times, corrections);

    let map_phasors = match shape {
        Shape::Map => Some(plan.phasors(&times[0], formalism, corrections)),
        _ => None,
    };
    let out: MaskedArray = (0..n)
        .map(|k| {
            let (ti, pi) = shape.indices(k);
            let zmin = plan.admittances(hc, pi)?;
            let local;
            let phasors = match &map_phasors {
                Some(p) => p,
                None => {
                    local = plan.phasors(&times[ti], formalism, corrections);
                    &local
                }
            };
            Some(zmin.iter().zip(phasors).map(|(z, p)| (z * p).re).sum::<f64>())
        })
        .collect();
    debug!(
        samples = n,
        masked = n - out.valid_count(),
        "minor inference complete"
    );
    Ok(out)
}

/// Tide of the inferred minor constituents.
///
/// `hc` holds the majors as read from the model. `minor` restricts inference
/// to a subset of [`minor_constituents`]; `None` infers all of them.
#[instrument(skip_all, fields(times = times.len(), points = hc.n_points(), corrections = %corrections, shape = %shape))]
pub fn infer_minor(
    catalog: &Catalog,
    times: &[TideTime],
    hc: &HarmonicConstants,
    corrections: Corrections,
    minor: Option<&[String]>,
    shape: Shape,
) -> TideResult<MaskedArray> {
    infer_minor_with(
        catalog,
        times,
        hc,
        corrections,
        corrections.formalism(),
        minor,
        shape,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn majors(extra: &[&str]) -> HarmonicConstants {
        let mut names: Vec<&str> = CORE_MAJORS.to_vec();
        names.extend_from_slice(extra);
        let values = (0..names.len())
            .map(|k| Complex64::from_polar(0.1 + 0.02 * k as f64, 0.3 * k as f64))
            .collect();
        HarmonicConstants::new(&names, values).unwrap()
    }

    #[test]
    fn minor_table_resolves() {
        let cat = Catalog::global();
        for name in minor_constituents() {
            assert_eq!(cat.resolve(name).unwrap(), name);
        }
        assert_eq!(minor_constituents().count(), 20);
    }

    #[test]
    fn modulation_matches_closed_form() {
        let n = 1.1f64;
        let j1 = modulation(0.198, 0.0, -1.0).unwrap().evaluate(n);
        let f = ((1.0 + 0.198 * n.cos()).powi(2) + (0.198 * n.sin()).powi(2)).sqrt();
        let u = (-0.198 * n.sin()).atan2(1.0 + 0.198 * n.cos()).to_degrees();
        assert_abs_diff_eq!(j1.f, f, epsilon = 1e-12);
        assert_abs_diff_eq!(j1.u, u, epsilon = 1e-12);
        let two_n2 = M2_LIKE.unwrap().evaluate(n);
        let u = (-0.0373 * n.sin()).atan2(1.0 - 0.0373 * n.cos()).to_degrees();
        assert_abs_diff_eq!(two_n2.u, u, epsilon = 1e-12);
    }

    #[test]
    fn carried_minors_are_skipped() {
        let cat = Catalog::global();
        let hc = majors(&["2n2", "m1", "j1"]);
        let plan = InferencePlan::new(cat, &hc, Corrections::Otis, None).unwrap();
        let names: Vec<&str> = plan.minors.iter().map(|m| m.name).collect();
        assert!(!names.contains(&"2n2"));
        assert!(!names.contains(&"j1"));
        assert!(!names.contains(&"m1a"));
        assert!(names.contains(&"m1b"));
        assert_eq!(names.len(), 17);
    }

    #[test]
    fn eps2_and_eta2_only_under_fes() {
        let cat = Catalog::global();
        let hc = majors(&["2n2"]);
        let sel = vec!["eps2".to_string(), "eta2".to_string()];
        let t = [TideTime::from_mjd(58000.0, 69.0 / 86400.0)];
        let otis = infer_minor(cat, &t, &hc, Corrections::Otis, Some(&sel), Shape::Map).unwrap();
        assert_abs_diff_eq!(otis.get(0).unwrap(), 0.0, epsilon = 1e-15);
        let fes = infer_minor(cat, &t, &hc, Corrections::Fes, Some(&sel), Shape::Map).unwrap();
        assert!(fes.get(0).unwrap().abs() > 1e-4);
    }

    #[test]
    fn selection_must_be_inferable() {
        let cat = Catalog::global();
        let hc = majors(&[]);
        let t = [TideTime::from_tide_days(0.0)];
        let bad = vec!["m2".to_string()];
        assert!(matches!(
            infer_minor(cat, &t, &hc, Corrections::Otis, Some(&bad), Shape::Map),
            Err(TideError::InvalidInput { .. })
        ));
        let unknown = vec!["zz1".to_string()];
        assert!(matches!(
            infer_minor(cat, &t, &hc, Corrections::Otis, Some(&unknown), Shape::Map),
            Err(TideError::UnknownConstituent { .. })
        ));
    }
}
