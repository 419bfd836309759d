//! Mean obliquity of the ecliptic (IAU 2006, Capitaine et al. 2003).

use tidal_core::constants::{ARCSEC_TO_RAD, DAYS_PER_JULIAN_CENTURY, J2000_MJD};
use tidal_core::math::polynomial_sum;

const EPSILON0: [f64; 6] = [84381.406, -46.836769, -1.831e-4, 2.00340e-4, -5.76e-7, -4.34e-8];

/// Mean obliquity in radians at a Modified Julian Day on the TT scale.
pub fn mean_obliquity(mjd_tt: f64) -> f64 {
    let t = (mjd_tt - J2000_MJD) / DAYS_PER_JULIAN_CENTURY;
    polynomial_sum(&EPSILON0, t) * ARCSEC_TO_RAD
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn reference_value() {
        assert_abs_diff_eq!(mean_obliquity(54465.0), 0.409074444235592, epsilon = 1e-13);
    }

    #[test]
    fn equals_constant_term_at_j2000() {
        assert_abs_diff_eq!(
            mean_obliquity(J2000_MJD).to_degrees(),
            84381.406 / 3600.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn decreases_with_time() {
        assert!(mean_obliquity(60000.0) < mean_obliquity(50000.0));
    }
}
