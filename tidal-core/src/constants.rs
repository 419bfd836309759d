/// Modified Julian Day of J2000.0 (2000-01-01T12:00:00 TT).
pub const J2000_MJD: f64 = 51544.5;

pub const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;

pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

pub const MJD_ZERO_POINT: f64 = 2_400_000.5;

/// Modified Julian Day of the tide epoch, 1992-01-01T00:00:00.
pub const TIDE_EPOCH_MJD: f64 = 48622.0;

pub const CIRCULAR_ARCSECONDS: f64 = 1296000.0;

pub const SECONDS_PER_DAY_F64: f64 = 86_400.0;

pub const HOURS_PER_DAY: f64 = 24.0;

#[allow(clippy::excessive_precision)]
pub const ARCSEC_TO_RAD: f64 = 4.848136811095359935899141e-6;

#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const PI: f64 = 3.141592653589793238462643;

#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const TWOPI: f64 = 6.283185307179586476925287;

#[allow(clippy::excessive_precision)]
pub const DEG_TO_RAD: f64 = 1.745329251994329576923691e-2;

pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;

/// WGS84 first eccentricity squared: e² = (a² - b²) / a².
pub const WGS84_ECCENTRICITY_SQUARED: f64 = 6.6943799901413165e-3;

/// WGS84 standard gravitational parameter (m³/s²).
pub const WGS84_GM: f64 = 3.986004418e14;

/// Nominal mean angular velocity of the Earth (rad/s).
pub const EARTH_ROTATION_RATE: f64 = 7.292115e-5;

/// Obliquity of the J2000 ecliptic (degrees).
pub const J2000_OBLIQUITY_DEG: f64 = 23.43929111;

/// Mass ratio Sun/Earth used by the IERS displacement model.
pub const MASS_RATIO_SUN: f64 = 332946.0482;

/// Mass ratio Moon/Earth used by the IERS displacement model.
pub const MASS_RATIO_MOON: f64 = 0.0123000371;

/// Equatorial radius of the Earth used by the IERS displacement model (m).
pub const IERS_EQUATORIAL_RADIUS: f64 = 6378136.6;
