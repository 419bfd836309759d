//! Built-in constituent table and alias list.
//!
//! Multipliers are `(τ, s, h, p, N', p', k)`. Lines of the degree-3
//! potential carry a trailing prime in their name.

use crate::constituent::Constituent;

const fn c(name: &'static str, coefficients: [i8; 7]) -> Constituent {
    Constituent::new(name, coefficients, 2)
}

const fn c3(name: &'static str, coefficients: [i8; 7]) -> Constituent {
    Constituent::new(name, coefficients, 3)
}

pub(crate) const CONSTITUENTS: &[Constituent] = &[
    // long period
    c("z0", [0, 0, 0, 0, 0, 0, 0]),
    c("node", [0, 0, 0, 0, 1, 0, 2]),
    c("sa", [0, 0, 1, 0, 0, -1, 0]),
    c("ssa", [0, 0, 2, 0, 0, 0, 0]),
    c("sta", [0, 0, 3, 0, 0, -1, 0]),
    c("msm", [0, 1, -2, 1, 0, 0, 0]),
    c("mm", [0, 1, 0, -1, 0, 0, 0]),
    c("msf", [0, 2, -2, 0, 0, 0, 0]),
    c("mf", [0, 2, 0, 0, 0, 0, 0]),
    c("mstm", [0, 3, -2, 1, 0, 0, 0]),
    c("mt", [0, 3, 0, -1, 0, 0, 0]),
    c("mtm", [0, 3, 0, -1, 0, 0, 0]),
    c("msqm", [0, 4, -2, 0, 0, 0, 0]),
    c("mqm", [0, 4, 0, -2, 0, 0, 0]),
    // diurnal
    c("alpha1", [1, -4, 2, 1, 0, 0, -1]),
    c("2q1", [1, -3, 0, 2, 0, 0, -1]),
    c("sigma1", [1, -3, 2, 0, 0, 0, -1]),
    c("q1", [1, -2, 0, 1, 0, 0, -1]),
    c("rho1", [1, -2, 2, -1, 0, 0, -1]),
    c("o1", [1, -1, 0, 0, 0, 0, -1]),
    c("tau1", [1, -1, 2, 0, 0, 0, 1]),
    c("beta1", [1, 0, -2, 1, 0, 0, 1]),
    c("m1b", [1, 0, 0, -1, 0, 0, 1]),
    c("m1", [1, 0, 0, 0, 0, 0, 1]),
    c("m1a", [1, 0, 0, 1, 0, 0, 1]),
    c("chi1", [1, 0, 2, -1, 0, 0, 1]),
    c("pi1", [1, 1, -3, 0, 0, 1, -1]),
    c("p1", [1, 1, -2, 0, 0, 0, -1]),
    c("s1", [1, 1, -1, 0, 0, 0, 1]),
    c("k1", [1, 1, 0, 0, 0, 0, 1]),
    c("psi1", [1, 1, 1, 0, 0, -1, 1]),
    c("phi1", [1, 1, 2, 0, 0, 0, 1]),
    c("theta1", [1, 2, -2, 1, 0, 0, 1]),
    c("j1", [1, 2, 0, -1, 0, 0, 1]),
    c("so1", [1, 3, -2, 0, 0, 0, 1]),
    c("oo1", [1, 3, 0, 0, 0, 0, 1]),
    c("ups1", [1, 4, 0, -1, 0, 0, 1]),
    // semidiurnal
    c("eps2", [2, -3, 2, 1, 0, 0, 0]),
    c("mns2", [2, -3, 2, 1, 0, 0, 0]),
    c("2n2", [2, -2, 0, 2, 0, 0, 0]),
    c("mu2", [2, -2, 2, 0, 0, 0, 0]),
    c("n2", [2, -1, 0, 1, 0, 0, 0]),
    c("nu2", [2, -1, 2, -1, 0, 0, 0]),
    c("gamma2", [2, 0, -2, 2, 0, 0, 2]),
    c("alpha2", [2, 0, -1, 0, 0, 1, 0]),
    c("m2a", [2, 0, -1, 0, 0, 1, 0]),
    c("m2", [2, 0, 0, 0, 0, 0, 0]),
    c("beta2", [2, 0, 1, 0, 0, -1, 0]),
    c("m2b", [2, 0, 1, 0, 0, -1, 0]),
    c("mks2", [2, 0, 2, 0, 0, 0, 0]),
    c("lambda2", [2, 1, -2, 1, 0, 0, 2]),
    c("l2", [2, 1, 0, -1, 0, 0, 2]),
    c("l2b", [2, 1, 0, 1, 0, 0, 0]),
    c("t2", [2, 2, -3, 0, 0, 1, 0]),
    c("s2", [2, 2, -2, 0, 0, 0, 0]),
    c("r2", [2, 2, -1, 0, 0, -1, 2]),
    c("k2", [2, 2, 0, 0, 0, 0, 0]),
    c("eta2", [2, 3, 0, -1, 0, 0, 0]),
    c("2sm2", [2, 4, -4, 0, 0, 0, 0]),
    // terdiurnal
    c("2mk3", [3, -1, 0, 0, 0, 0, -1]),
    c("mo3", [3, -1, 0, 0, 0, 0, -1]),
    c3("m3", [3, 0, 0, 0, 0, 0, 0]),
    c("so3", [3, 1, -2, 0, 0, 0, -1]),
    c("mk3", [3, 1, 0, 0, 0, 0, 1]),
    c("s3", [3, 3, -3, 0, 0, 0, 0]),
    c("sk3", [3, 3, -2, 0, 0, 0, 1]),
    c("2so3", [3, 5, -4, 0, 0, 0, 1]),
    c("2jp3", [3, 5, -2, -2, 0, 0, 1]),
    c("kso3", [3, 5, -2, 0, 0, 0, 1]),
    c("2jk3", [3, 5, -1, -2, 0, 0, 0]),
    c("2ko3", [3, 5, 0, 0, 0, 0, 1]),
    // quarter-diurnal and faster
    c("n4", [4, -2, 0, 2, 0, 0, 0]),
    c("mn4", [4, -1, 0, 1, 0, 0, 0]),
    c("m4", [4, 0, 0, 0, 0, 0, 0]),
    c("sn4", [4, 1, -2, 1, 0, 0, 0]),
    c("ms4", [4, 2, -2, 0, 0, 0, 0]),
    c("mk4", [4, 2, 0, 0, 0, 0, 0]),
    c("s4", [4, 4, -4, 0, 0, 0, 0]),
    c("sk4", [4, 4, -2, 0, 0, 0, 0]),
    c("2mk5", [5, 1, 0, 0, 0, 0, 1]),
    c("s5", [5, 5, -5, 0, 0, 0, 0]),
    c("n6", [6, -3, 0, 3, 0, 0, 0]),
    c("2mn6", [6, -1, 0, 1, 0, 0, 0]),
    c("m6", [6, 0, 0, 0, 0, 0, 0]),
    c("2ms6", [6, 2, -2, 0, 0, 0, 0]),
    c("2mk6", [6, 2, 0, 0, 0, 0, 0]),
    c("2sm6", [6, 4, -4, 0, 0, 0, 0]),
    c("msk6", [6, 4, -2, 0, 0, 0, 0]),
    c("s6", [6, 6, -6, 0, 0, 0, 0]),
    c("3mk7", [7, 1, 0, 0, 0, 0, 1]),
    c("s7", [7, 7, -7, 0, 0, 0, 0]),
    c("m8", [8, 0, 0, 0, 0, 0, 0]),
    c("s8", [8, 8, -8, 0, 0, 0, 0]),
    c("m10", [10, 0, 0, 0, 0, 0, 0]),
    c("m12", [12, 0, 0, 0, 0, 0, 0]),
    // degree 3
    c3("2q1'", [1, -3, 0, 1, 0, 0, 0]),
    c3("q1'", [1, -2, 0, 0, 0, 0, 0]),
    c3("o1'", [1, -1, 0, 1, 0, 0, 0]),
    c3("m1'", [1, 0, 0, 0, 0, 0, 0]),
    c3("k1'", [1, 1, 0, -1, 0, 0, 0]),
    c3("j1'", [1, 2, 0, 0, 0, 0, 0]),
    c3("2n2'", [2, -2, 0, 1, 0, 0, -1]),
    c3("n2'", [2, -1, 0, 0, 0, 0, -1]),
    c3("m2'", [2, 0, 0, 1, 0, 0, -1]),
    c3("l2'", [2, 1, 0, 0, 0, 0, -1]),
    c3("lambda3", [3, 1, -2, 1, 0, 0, 0]),
    c3("l3", [3, 1, 0, -1, 0, 0, 0]),
    c3("l3b", [3, 1, 0, 1, 0, 0, 0]),
];

/// Alternative spellings, matched after lowercasing and trimming.
pub(crate) const ALIASES: &[(&str, &str)] = &[
    ("2n", "2n2"),
    ("2q", "2q1"),
    ("alp1", "alpha1"),
    ("alp2", "alpha2"),
    ("bet1", "beta1"),
    ("bet2", "beta2"),
    ("e2", "eps2"),
    ("ep2", "eps2"),
    ("gam2", "gamma2"),
    ("la2", "lambda2"),
    ("lam2", "lambda2"),
    ("lda2", "lambda2"),
    ("lm2", "lambda2"),
    ("msq", "msqm"),
    ("omega0", "node"),
    ("om0", "node"),
    ("rho", "rho1"),
    ("sig1", "sigma1"),
    ("the", "theta1"),
    ("the1", "theta1"),
    ("tau", "tau1"),
    ("ups", "ups1"),
];
