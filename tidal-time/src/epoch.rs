//! Tide-epoch time arguments.
//!
//! Times throughout the workspace are day counts since the tide epoch,
//! 1992-01-01T00:00:00 UTC (MJD 48622). Each [`TideTime`] also carries ΔT
//! (TT − UT1, in days) so astronomical longitudes can be evaluated in
//! dynamical time while the hour of day stays on the Earth-rotation scale.
//!
//! | Quantity | Expression |
//! |----------|------------|
//! | MJD (UT) | `days + 48622` |
//! | MJD (TT) | `days + 48622 + ΔT` |
//! | JD | `MJD + 2400000.5` |
//! | T (centuries, TT) | `(MJD_TT − 51544.5) / 36525` |
//! | hour of day | `24 · frac(MJD_UT)` |

use std::fmt;
use tidal_core::constants::{
    DAYS_PER_JULIAN_CENTURY, HOURS_PER_DAY, J2000_MJD, MJD_ZERO_POINT, SECONDS_PER_DAY_F64,
    TIDE_EPOCH_MJD,
};
use tidal_core::math::fmod;
use tidal_core::{TideError, TideResult};

/// A time argument: days since the tide epoch plus ΔT.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TideTime {
    /// Days since 1992-01-01T00:00:00 UTC.
    pub days: f64,
    /// TT − UT1 in days.
    pub deltat: f64,
}

impl TideTime {
    pub fn new(days: f64, deltat: f64) -> Self {
        Self { days, deltat }
    }

    /// A time with ΔT = 0, the convention of the OTIS-family models.
    pub fn from_tide_days(days: f64) -> Self {
        Self::new(days, 0.0)
    }

    pub fn from_mjd(mjd: f64, deltat: f64) -> Self {
        Self::new(mjd - TIDE_EPOCH_MJD, deltat)
    }

    /// Builds a time from a Gregorian calendar date and UT clock time.
    pub fn from_calendar(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: f64,
    ) -> TideResult<Self> {
        let mjd = calendar_to_mjd(year, month, day)?;
        let fraction =
            (60.0 * (60 * hour as i32 + minute as i32) as f64 + second) / SECONDS_PER_DAY_F64;
        Ok(Self::from_mjd(mjd + fraction, 0.0))
    }

    pub fn with_deltat(self, deltat: f64) -> Self {
        Self::new(self.days, deltat)
    }

    /// Modified Julian Day on the UT scale.
    #[inline]
    pub fn mjd(&self) -> f64 {
        self.days + TIDE_EPOCH_MJD
    }

    /// Modified Julian Day on the dynamical (TT) scale.
    #[inline]
    pub fn mjd_tt(&self) -> f64 {
        self.mjd() + self.deltat
    }

    #[inline]
    pub fn jd(&self) -> f64 {
        self.mjd() + MJD_ZERO_POINT
    }

    /// Julian centuries of TT since J2000.0.
    #[inline]
    pub fn centuries(&self) -> f64 {
        (self.mjd_tt() - J2000_MJD) / DAYS_PER_JULIAN_CENTURY
    }

    /// UT hour of day in `[0, 24)`.
    #[inline]
    pub fn hour(&self) -> f64 {
        let frac = fmod(self.mjd(), 1.0);
        HOURS_PER_DAY * if frac < 0.0 { frac + 1.0 } else { frac }
    }
}

impl fmt::Display for TideTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MJD {:.9} (dT {:.3} s)", self.mjd(), self.deltat * SECONDS_PER_DAY_F64)
    }
}

impl From<f64> for TideTime {
    fn from(days: f64) -> Self {
        Self::from_tide_days(days)
    }
}

/// Modified Julian Day at 0h of a Gregorian calendar date.
///
/// Follows the integer algorithm of ERFA `cal2jd`.
///
/// ```
/// use tidal_time::calendar_to_mjd;
///
/// assert_eq!(calendar_to_mjd(1992, 1, 1)?, 48622.0);
/// assert_eq!(calendar_to_mjd(2009, 4, 13)?, 54934.0);
/// # Ok::<(), tidal_core::TideError>(())
/// ```
pub fn calendar_to_mjd(year: i32, month: u8, day: u8) -> TideResult<f64> {
    if year < -4799 {
        return Err(TideError::invalid_input(
            "calendar_to_mjd",
            &format!("year {} before -4799", year),
        ));
    }
    if !(1..=12).contains(&month) {
        return Err(TideError::invalid_input(
            "calendar_to_mjd",
            &format!("month {} outside 1-12", month),
        ));
    }
    let max_day = days_in_month(year, month);
    if day < 1 || day > max_day {
        return Err(TideError::invalid_input(
            "calendar_to_mjd",
            &format!("day {} outside 1-{} for {}-{:02}", day, max_day, year, month),
        ));
    }
    let my = (month as i32 - 14) / 12;
    let iypmy = year + my;
    let mjd = (1461 * (iypmy + 4800)) / 4 + (367 * (month as i32 - 2 - 12 * my)) / 12
        - (3 * ((iypmy + 4900) / 100)) / 4
        + day as i32
        - 2432076;
    Ok(mjd as f64)
}

fn days_in_month(year: i32, month: u8) -> u8 {
    const DAYS: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
    if month == 2 && leap {
        29
    } else {
        DAYS[(month - 1) as usize]
    }
}

/// Decimal year of a Modified Julian Day, using Julian years from J2000.0.
pub fn mjd_to_decimal_year(mjd: f64) -> f64 {
    2000.0 + (mjd - J2000_MJD) / tidal_core::constants::DAYS_PER_JULIAN_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_tide_epoch() {
        let t = TideTime::from_tide_days(0.0);
        assert_eq!(t.mjd(), 48622.0);
        assert_eq!(t.jd(), 2448622.5);
        assert_eq!(t.hour(), 0.0);
    }

    #[test]
    fn test_calendar_matches_epoch() {
        let t = TideTime::from_calendar(1992, 1, 1, 0, 0, 0.0).unwrap();
        assert_eq!(t.days, 0.0);
        let t = TideTime::from_calendar(2009, 4, 13, 0, 0, 0.0).unwrap();
        assert_eq!(t.days, 6312.0);
    }

    #[test]
    fn test_hour_of_day() {
        let t = TideTime::from_calendar(2000, 1, 1, 18, 30, 0.0).unwrap();
        assert_abs_diff_eq!(t.hour(), 18.5, epsilon = 1e-9);
        let before_epoch = TideTime::from_tide_days(-0.25);
        assert_abs_diff_eq!(before_epoch.hour(), 18.0, epsilon = 1e-9);
    }

    #[test]
    fn test_centuries_use_deltat() {
        let ut = TideTime::from_mjd(J2000_MJD, 0.0);
        assert_eq!(ut.centuries(), 0.0);
        let tt = ut.with_deltat(DAYS_PER_JULIAN_CENTURY);
        assert_abs_diff_eq!(tt.centuries(), 1.0, epsilon = 1e-15);
        assert_eq!(tt.hour(), ut.hour());
    }

    #[test]
    fn test_invalid_calendar_dates() {
        assert!(calendar_to_mjd(2001, 2, 29).is_err());
        assert!(calendar_to_mjd(2000, 2, 29).is_ok());
        assert!(calendar_to_mjd(2000, 13, 1).is_err());
        assert!(calendar_to_mjd(-5000, 1, 1).is_err());
    }

    #[test]
    fn test_decimal_year() {
        assert_abs_diff_eq!(mjd_to_decimal_year(J2000_MJD), 2000.0, epsilon = 1e-12);
    }

    #[test]
    fn test_display() {
        let t = TideTime::new(0.0, 66.184 / 86400.0);
        assert_eq!(t.to_string(), "MJD 48622.000000000 (dT 66.184 s)");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let original = TideTime::new(6312.123456789, 66.184 / 86400.0);
        let json = serde_json::to_string(&original).unwrap();
        let back: TideTime = serde_json::from_str(&json).unwrap();
        assert_eq!(original, back);
    }
}
