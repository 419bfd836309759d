//! Solid earth tide displacements, IERS Conventions (2010) §7.1.1.
//!
//! Station displacement in Earth-fixed coordinates, built in the steps of
//! the `DEHANTTIDEINEL` reference routine:
//!
//! | Step | Term |
//! |------|------|
//! | 1 | in-phase degree 2 and 3, latitude-dependent `h₂`, `l₂` |
//! | 1 | out-of-phase diurnal and semidiurnal radial/transverse terms |
//! | 1 | latitude dependence of the transverse `l⁽¹⁾` contribution |
//! | 2 | frequency-dependent corrections in the diurnal band |
//! | 2 | frequency-dependent corrections in the long-period band |
//!
//! The result is in the tide-free system unless [`TideSystem::MeanTide`] is
//! asked for, in which case the permanent degree-2 tide is removed.
//! [`to_local`] rotates displacements into North/East/Radial.

use std::fmt;
use std::str::FromStr;

use tidal_core::constants::{IERS_EQUATORIAL_RADIUS, MASS_RATIO_MOON, MASS_RATIO_SUN};
use tidal_core::math::{normalize_degrees, polynomial_sum};
use tidal_core::{LocalDisplacement, LocalFrame, TideError, TideResult, Vector3};
use tidal_ephemeris::Ephemeris;
use tidal_time::TideTime;
use tracing::{debug, instrument};

/// Nominal degree-2 Love number.
pub const H20: f64 = 0.6078;
/// Nominal degree-2 Shida number.
pub const L20: f64 = 0.0847;
pub const H3: f64 = 0.292;
pub const L3: f64 = 0.015;

/// Degree-2 amplitude of the permanent tide potential, metres.
const PERMANENT_TIDE: f64 = 0.31460;

/// Reference system for the permanent tide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TideSystem {
    /// Permanent tide included in the displacement.
    #[default]
    TideFree,
    /// Permanent tide removed.
    MeanTide,
}

impl TideSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TideFree => "tide_free",
            Self::MeanTide => "mean_tide",
        }
    }
}

impl fmt::Display for TideSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TideSystem {
    type Err = TideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "tide_free" | "free" => Ok(Self::TideFree),
            "mean_tide" | "mean" => Ok(Self::MeanTide),
            _ => Err(TideError::invalid_input(
                "tide system",
                &format!("{} is not one of tide_free, mean_tide", s),
            )),
        }
    }
}

/// Geocentric angles of a station and its ECEF assembly of local terms.
#[derive(Debug, Clone, Copy)]
struct StationFrame {
    r: f64,
    sin_phi: f64,
    cos_phi: f64,
    sin_la: f64,
    cos_la: f64,
}

impl StationFrame {
    fn new(x: &Vector3) -> Self {
        let r = x.magnitude();
        let (sin_la, cos_la) = libm::sincos(libm::atan2(x.y, x.x));
        Self {
            r,
            sin_phi: x.z / r,
            cos_phi: x.equatorial_radius() / r,
            sin_la,
            cos_la,
        }
    }

    /// Radial, East and North components to ECEF.
    fn to_ecef(&self, dr: f64, de: f64, dn: f64) -> Vector3 {
        let (sp, cp, sl, cl) = (self.sin_phi, self.cos_phi, self.sin_la, self.cos_la);
        Vector3::new(
            dr * cl * cp - de * sl - dn * sp * cl,
            dr * sl * cp + de * cl - dn * sp * sl,
            dr * sp + dn * cp,
        )
    }
}

/// Sun or Moon position with its degree-2 scale factor `GM_b/GM_e · a·(a/r_b)³`.
#[derive(Debug, Clone, Copy)]
struct Body {
    x: Vector3,
    r: f64,
    f2: f64,
}

impl Body {
    fn new(x: Vector3, mass_ratio: f64) -> Self {
        let r = x.magnitude();
        Self {
            x,
            r,
            f2: scale_factor(mass_ratio, r),
        }
    }
}

fn scale_factor(mass_ratio: f64, r: f64) -> f64 {
    let a = IERS_EQUATORIAL_RADIUS;
    mass_ratio * a * (a / r).powi(3)
}

/// Latitude-dependent `h₂` and `l₂`.
fn love_numbers(cos_phi: f64) -> (f64, f64) {
    let p = 1.0 - 1.5 * cos_phi * cos_phi;
    (H20 - 0.0006 * p, L20 + 0.0002 * p)
}

/// In-phase degree 2 and degree 3 displacement.
fn in_phase(x: &Vector3, bodies: &[Body; 2]) -> Vector3 {
    let r = x.magnitude();
    let (h2, l2) = love_numbers(x.equatorial_radius() / r);
    let mut out = Vector3::zeros();
    for b in bodies {
        let sc = x.dot(&b.x) / (r * b.r);
        let p2 = 3.0 * (h2 / 2.0 - l2) * sc * sc - h2 / 2.0;
        let p3 = 2.5 * (H3 - 3.0 * L3) * sc.powi(3) + 1.5 * (L3 - H3) * sc;
        let x2 = 3.0 * l2 * sc;
        let x3 = 1.5 * L3 * (5.0 * sc * sc - 1.0);
        let f3 = b.f2 * (IERS_EQUATORIAL_RADIUS / b.r);
        out += b.f2 * (x2 * b.x / b.r + p2 * *x / r) + f3 * (x3 * b.x / b.r + p3 * *x / r);
    }
    out
}

/// Out-of-phase diurnal band, from the imaginary parts of `h₂¹`, `l₂¹`.
fn out_of_phase_diurnal(x: &Vector3, bodies: &[Body; 2]) -> Vector3 {
    const DHI: f64 = -0.0025;
    const DLI: f64 = -0.0007;
    let st = StationFrame::new(x);
    let (sp, cp, sl, cl) = (st.sin_phi, st.cos_phi, st.sin_la, st.cos_la);
    let cos2phi = cp * cp - sp * sp;
    let (mut dr, mut dn, mut de) = (0.0, 0.0, 0.0);
    for b in bodies {
        let r2 = b.r * b.r;
        dr += -3.0 * DHI * sp * cp * b.f2 * b.x.z * (b.x.x * sl - b.x.y * cl) / r2;
        dn += -3.0 * DLI * cos2phi * b.f2 * b.x.z * (b.x.x * sl - b.x.y * cl) / r2;
        de += -3.0 * DLI * sp * b.f2 * b.x.z * (b.x.x * cl + b.x.y * sl) / r2;
    }
    st.to_ecef(dr, de, dn)
}

/// Out-of-phase semidiurnal band, from the imaginary parts of `h₂²`, `l₂²`.
fn out_of_phase_semidiurnal(x: &Vector3, bodies: &[Body; 2]) -> Vector3 {
    const DHI: f64 = -0.0022;
    const DLI: f64 = -0.0007;
    let st = StationFrame::new(x);
    let (sp, cp, sl, cl) = (st.sin_phi, st.cos_phi, st.sin_la, st.cos_la);
    let cos2la = cl * cl - sl * sl;
    let sin2la = 2.0 * cl * sl;
    let (mut dr, mut dn, mut de) = (0.0, 0.0, 0.0);
    for b in bodies {
        let r2 = b.r * b.r;
        let xy = b.x.x * b.x.x - b.x.y * b.x.y;
        let twoxy = 2.0 * b.x.x * b.x.y;
        dr += -0.75 * DHI * cp * cp * b.f2 * (xy * sin2la - twoxy * cos2la) / r2;
        dn += 1.5 * DLI * sp * cp * b.f2 * (xy * sin2la - twoxy * cos2la) / r2;
        de += -1.5 * DLI * cp * b.f2 * (xy * cos2la + twoxy * sin2la) / r2;
    }
    st.to_ecef(dr, de, dn)
}

/// Transverse contribution of the latitude dependence of `l⁽¹⁾`.
fn latitude_dependence(x: &Vector3, bodies: &[Body; 2]) -> Vector3 {
    const L1_DIURNAL: f64 = 0.0012;
    const L1_SEMIDIURNAL: f64 = 0.0024;
    let st = StationFrame::new(x);
    let (sp, cp, sl, cl) = (st.sin_phi, st.cos_phi, st.sin_la, st.cos_la);

    let (mut dn, mut de) = (0.0, 0.0);
    for b in bodies {
        let r2 = b.r * b.r;
        dn += -L1_DIURNAL * sp * sp * b.f2 * b.x.z * (b.x.x * cl + b.x.y * sl) / r2;
        de += L1_DIURNAL * sp * (cp * cp - sp * sp) * b.f2 * b.x.z * (b.x.x * sl - b.x.y * cl)
            / r2;
    }
    let mut out = st.to_ecef(0.0, 3.0 * de, 3.0 * dn);

    let cos2la = cl * cl - sl * sl;
    let sin2la = 2.0 * cl * sl;
    let (mut dn, mut de) = (0.0, 0.0);
    for b in bodies {
        let r2 = b.r * b.r;
        let xy = b.x.x * b.x.x - b.x.y * b.x.y;
        let twoxy = 2.0 * b.x.x * b.x.y;
        dn += -L1_SEMIDIURNAL / 2.0 * sp * cp * b.f2 * (xy * cos2la + twoxy * sin2la) / r2;
        de += -L1_SEMIDIURNAL / 2.0 * sp * sp * cp * b.f2 * (xy * sin2la - twoxy * cos2la) / r2;
    }
    out += st.to_ecef(0.0, 3.0 * de, 3.0 * dn);
    out
}

/// Fundamental arguments of the frequency-dependent step, degrees.
#[derive(Debug, Clone, Copy)]
struct Step2Arguments {
    s: f64,
    tau: f64,
    h: f64,
    p: f64,
    zns: f64,
    ps: f64,
}

impl Step2Arguments {
    fn at(t: f64, hour: f64) -> Self {
        let s = polynomial_sum(&[218.31664563, 481267.88194, -0.0014663889, 0.00000185139], t);
        let tau = polynomial_sum(&[280.4606184, 36000.7700536, 0.00038793, -0.0000000258], t)
            + 15.0 * hour
            - s;
        let precession = polynomial_sum(
            &[0.0, 1.396971278, 0.000308889, 0.000000021, 0.000000007],
            t,
        );
        let h = polynomial_sum(
            &[280.46645, 36000.7697489, 0.00030322222, 0.000000020, -0.00000000654],
            t,
        );
        let p = polynomial_sum(
            &[83.35324312, 4069.01363525, -0.01032172222, -0.0000124991, 0.00000005263],
            t,
        );
        let zns = polynomial_sum(
            &[234.95544499, 1934.13626197, -0.00207561111, -0.00000213944, 0.00000001650],
            t,
        );
        let ps = polynomial_sum(
            &[282.93734098, 1.71945766667, 0.00045688889, -0.00000001778, -0.00000000334],
            t,
        );
        Self {
            s: normalize_degrees(s + precession),
            tau: normalize_degrees(tau),
            h: normalize_degrees(h),
            p: normalize_degrees(p),
            zns: normalize_degrees(zns),
            ps: normalize_degrees(ps),
        }
    }

    fn theta(&self, row: &[f64; 9]) -> f64 {
        row[0] * self.s + row[1] * self.h + row[2] * self.p + row[3] * self.zns + row[4] * self.ps
    }
}

/// Diurnal band: multipliers of `(s, h, p, N′, p_s)` then
/// `Δr_ip, Δr_op, ΔT_ip, ΔT_op` in mm.
#[rustfmt::skip]
const DIURNAL: [[f64; 9]; 31] = [
    [-3.0, 0.0, 2.0, 0.0, 0.0, -0.01, 0.0, 0.0, 0.0],
    [-3.0, 2.0, 0.0, 0.0, 0.0, -0.01, 0.0, 0.0, 0.0],
    [-2.0, 0.0, 1.0, -1.0, 0.0, -0.02, 0.0, 0.0, 0.0],
    [-2.0, 0.0, 1.0, 0.0, 0.0, -0.08, 0.0, -0.01, 0.01],
    [-2.0, 2.0, -1.0, 0.0, 0.0, -0.02, 0.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0, -1.0, 0.0, -0.10, 0.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0, 0.0, 0.0, -0.51, 0.0, -0.02, 0.03],
    [-1.0, 2.0, 0.0, 0.0, 0.0, 0.01, 0.0, 0.0, 0.0],
    [0.0, -2.0, 1.0, 0.0, 0.0, 0.01, 0.0, 0.0, 0.0],
    [0.0, 0.0, -1.0, 0.0, 0.0, 0.02, 0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0, 0.0, 0.06, 0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 1.0, 0.0, 0.01, 0.0, 0.0, 0.0],
    [0.0, 2.0, -1.0, 0.0, 0.0, 0.01, 0.0, 0.0, 0.0],
    [1.0, -3.0, 0.0, 0.0, 1.0, -0.06, 0.0, 0.0, 0.0],
    [1.0, -2.0, 0.0, -1.0, 0.0, 0.01, 0.0, 0.0, 0.0],
    [1.0, -2.0, 0.0, 0.0, 0.0, -1.23, -0.07, 0.06, 0.01],
    [1.0, -1.0, 0.0, 0.0, -1.0, 0.02, 0.0, 0.0, 0.0],
    [1.0, -1.0, 0.0, 0.0, 1.0, 0.04, 0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0, -1.0, 0.0, -0.22, 0.01, 0.01, 0.0],
    [1.0, 0.0, 0.0, 0.0, 0.0, 12.00, -0.80, -0.67, -0.03],
    [1.0, 0.0, 0.0, 1.0, 0.0, 1.73, -0.12, -0.10, 0.0],
    [1.0, 0.0, 0.0, 2.0, 0.0, -0.04, 0.0, 0.0, 0.0],
    [1.0, 1.0, 0.0, 0.0, -1.0, -0.50, -0.01, 0.03, 0.0],
    [1.0, 1.0, 0.0, 0.0, 1.0, 0.01, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 1.0, -1.0, -0.01, 0.0, 0.0, 0.0],
    [1.0, 2.0, -2.0, 0.0, 0.0, -0.01, 0.0, 0.0, 0.0],
    [1.0, 2.0, 0.0, 0.0, 0.0, -0.11, 0.01, 0.01, 0.0],
    [2.0, -2.0, 1.0, 0.0, 0.0, -0.01, 0.0, 0.0, 0.0],
    [2.0, 0.0, -1.0, 0.0, 0.0, -0.02, 0.0, 0.0, 0.0],
    [3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [3.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
];

/// Long-period band, same layout as [`DIURNAL`].
#[rustfmt::skip]
const LONG_PERIOD: [[f64; 9]; 5] = [
    [0.0, 0.0, 0.0, 1.0, 0.0, 0.47, 0.23, 0.16, 0.07],
    [0.0, 2.0, 0.0, 0.0, 0.0, -0.20, -0.12, -0.11, -0.05],
    [1.0, 0.0, -1.0, 0.0, 0.0, -0.11, -0.08, -0.09, -0.04],
    [2.0, 0.0, 0.0, 0.0, 0.0, -0.13, -0.11, -0.15, -0.07],
    [2.0, 0.0, 0.0, 1.0, 0.0, -0.05, -0.05, -0.06, -0.03],
];

/// Frequency-dependent diurnal correction, `t` in centuries TT and `hour` UT.
fn diurnal_band(x: &Vector3, hour: f64, t: f64) -> Vector3 {
    let args = Step2Arguments::at(t, hour);
    let st = StationFrame::new(x);
    let (sp, cp) = (st.sin_phi, st.cos_phi);
    let zla = libm::atan2(x.y, x.x);
    let mut out = Vector3::zeros();
    for row in &DIURNAL {
        let theta = (args.tau + args.theta(row)).to_radians() + zla;
        let (s, c) = libm::sincos(theta);
        let dr = row[5] * 2.0 * sp * cp * s + row[6] * 2.0 * sp * cp * c;
        let dn = row[7] * (cp * cp - sp * sp) * s + row[8] * (cp * cp - sp * sp) * c;
        let de = row[7] * sp * c - row[8] * sp * s;
        out += st.to_ecef(dr, de, dn);
    }
    out / 1000.0
}

/// Frequency-dependent long-period correction.
fn long_period_band(x: &Vector3, t: f64) -> Vector3 {
    let args = Step2Arguments::at(t, 0.0);
    let st = StationFrame::new(x);
    let (sp, cp) = (st.sin_phi, st.cos_phi);
    let (mut dr, mut dn) = (0.0, 0.0);
    for row in &LONG_PERIOD {
        let (s, c) = libm::sincos(args.theta(row).to_radians());
        let p20 = (3.0 * sp * sp - 1.0) / 2.0;
        dr += row[5] * p20 * c + row[7] * p20 * s;
        dn += row[6] * (2.0 * cp * sp) * c + row[8] * (2.0 * cp * sp) * s;
    }
    st.to_ecef(dr, 0.0, dn) / 1000.0
}

/// Displacement from the permanent tide in the tide-free system.
pub fn permanent_tide(station: &Vector3) -> Vector3 {
    let st = StationFrame::new(station);
    let (h2, l2) = love_numbers(st.cos_phi);
    let k = libm::sqrt(5.0 / (4.0 * std::f64::consts::PI)) * PERMANENT_TIDE;
    let dr = -k * h2 * (1.5 * st.sin_phi * st.sin_phi - 0.5);
    let dn = -k * l2 * 3.0 * st.sin_phi * st.cos_phi;
    st.to_ecef(dr, 0.0, dn)
}

/// Solid earth tide at one station, ECEF metres.
///
/// `sun` and `moon` are geocentric Earth-fixed positions in metres.
pub fn solid_earth_displacement(
    time: &TideTime,
    station: &Vector3,
    sun: &Vector3,
    moon: &Vector3,
    system: TideSystem,
) -> Vector3 {
    let bodies = [Body::new(*sun, MASS_RATIO_SUN), Body::new(*moon, MASS_RATIO_MOON)];
    let t = time.centuries();
    let mut dx = in_phase(station, &bodies)
        + out_of_phase_diurnal(station, &bodies)
        + out_of_phase_semidiurnal(station, &bodies)
        + latitude_dependence(station, &bodies)
        + diurnal_band(station, time.hour(), t)
        + long_period_band(station, t);
    if system == TideSystem::MeanTide {
        dx = dx - permanent_tide(station);
    }
    dx
}

fn check_station(station: &Vector3) -> TideResult<()> {
    if !station.is_finite() || station.magnitude() == 0.0 {
        return Err(TideError::invalid_input(
            "solid earth tide",
            &format!("station position {} is not a point on the Earth", station),
        ));
    }
    Ok(())
}

/// Solid earth tide along a track: one station, Sun and Moon per time.
///
/// # Errors
///
/// [`DimensionMismatch`](TideError::DimensionMismatch) when the four inputs
/// differ in length, [`InvalidInput`](TideError::InvalidInput) for a station
/// at the geocentre or with non-finite coordinates.
#[instrument(skip_all, fields(times = times.len(), system = %system))]
pub fn solid_earth_tide(
    times: &[TideTime],
    stations: &[Vector3],
    sun: &[Vector3],
    moon: &[Vector3],
    system: TideSystem,
) -> TideResult<Vec<Vector3>> {
    for (context, len) in [
        ("stations", stations.len()),
        ("solar positions", sun.len()),
        ("lunar positions", moon.len()),
    ] {
        if len != times.len() {
            return Err(TideError::dimension_mismatch(context, times.len(), len));
        }
    }
    stations.iter().try_for_each(check_station)?;
    let out: Vec<Vector3> = times
        .iter()
        .zip(stations)
        .zip(sun.iter().zip(moon))
        .map(|((t, x), (s, m))| solid_earth_displacement(t, x, s, m, system))
        .collect();
    debug!(samples = out.len(), "solid earth tide complete");
    Ok(out)
}

/// [`solid_earth_tide`] with Sun and Moon positions taken from `ephemeris`.
pub fn solid_earth_tide_with<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    times: &[TideTime],
    stations: &[Vector3],
    system: TideSystem,
) -> TideResult<Vec<Vector3>> {
    let (sun, moon): (Vec<Vector3>, Vec<Vector3>) = ephemeris.positions(times)?.into_iter().unzip();
    debug!(ephemeris = ephemeris.name(), "solar and lunar positions resolved");
    solid_earth_tide(times, stations, &sun, &moon, system)
}

/// Rotates ECEF displacements into each station's North/East/Radial frame.
pub fn to_local(
    stations: &[Vector3],
    displacements: &[Vector3],
) -> TideResult<Vec<LocalDisplacement>> {
    if stations.len() != displacements.len() {
        return Err(TideError::dimension_mismatch(
            "displacements",
            stations.len(),
            displacements.len(),
        ));
    }
    Ok(stations
        .iter()
        .zip(displacements)
        .map(|(x, d)| LocalFrame::from_ecef(x).to_local(d))
        .collect())
}
