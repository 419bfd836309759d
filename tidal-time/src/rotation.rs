//! Earth rotation angles used to carry ecliptic ephemerides into the Earth-fixed frame.

use tidal_core::constants::{ARCSEC_TO_RAD, DAYS_PER_JULIAN_CENTURY, J2000_MJD, TWOPI};
use tidal_core::math::{fmod, normalize_degrees};

/// Earth rotation angle (IAU 2000) in radians, `[0, 2π)`.
///
/// `mjd_ut1` is a Modified Julian Day on the UT1 scale. The integer and
/// fractional day are separated before scaling to keep precision.
pub fn earth_rotation_angle(mjd_ut1: f64) -> f64 {
    let t = mjd_ut1 - J2000_MJD;
    let f = fmod(mjd_ut1, 1.0) - 0.5;
    let theta = TWOPI * (f + 0.7790572732640 + 0.00273781191135448 * t);
    wrap_two_pi(theta)
}

/// Greenwich mean sidereal time (IAU 2006) in radians, `[0, 2π)`.
///
/// The polynomial part is evaluated on the TT scale.
pub fn greenwich_mean_sidereal_time(mjd_ut1: f64, mjd_tt: f64) -> f64 {
    let t = (mjd_tt - J2000_MJD) / DAYS_PER_JULIAN_CENTURY;
    let polynomial_arcsec = 0.014506
        + t * (4612.156534
            + t * (1.3915817 + t * (-0.00000044 + t * (-0.000029956 + t * (-0.0000000368)))));
    wrap_two_pi(earth_rotation_angle(mjd_ut1) + polynomial_arcsec * ARCSEC_TO_RAD)
}

/// Greenwich hour angle of the mean equinox in degrees, `[0, 360)` (Meeus 12.4).
pub fn greenwich_hour_angle(mjd: f64) -> f64 {
    normalize_degrees(280.46061837504 + 360.9856473662862 * (mjd - J2000_MJD))
}

fn wrap_two_pi(angle: f64) -> f64 {
    let w = fmod(angle, TWOPI);
    if w < 0.0 {
        w + TWOPI
    } else {
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn era_reference_value() {
        let era = earth_rotation_angle(55414.0) / TWOPI;
        assert_abs_diff_eq!(era, 0.8730204642501604, epsilon = 1e-12);
    }

    #[test]
    fn gmst_reference_value() {
        let hours = greenwich_mean_sidereal_time(55414.0, 55414.0) * 24.0 / TWOPI;
        assert_abs_diff_eq!(hours, 20.96154017401333, epsilon = 1e-8);
    }

    #[test]
    fn gmst_at_j2000() {
        let hours = greenwich_mean_sidereal_time(J2000_MJD, J2000_MJD) * 24.0 / TWOPI;
        assert!(hours > 18.0 && hours < 19.0, "{}", hours);
    }

    #[test]
    fn gha_tracks_gmst() {
        let gha = greenwich_hour_angle(55414.0);
        let gmst = greenwich_mean_sidereal_time(55414.0, 55414.0).to_degrees();
        assert_abs_diff_eq!(gha, gmst, epsilon = 1e-3);
    }
}
