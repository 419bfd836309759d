use approx::assert_abs_diff_eq;
use tidal_core::math::{legendre, normalize_degrees};
use tidal_core::{LocalDisplacement, LocalFrame, Location, MaskedArray, TideError, Vector3};

#[test]
fn local_frame_round_trips_through_ecef() {
    let station = Location::from_degrees(-33.9, 151.2, 40.0).unwrap().to_ecef();
    let frame = LocalFrame::from_ecef(&station);
    let d = LocalDisplacement::new(0.012, -0.004, 0.21);
    let back = frame.to_local(&frame.to_ecef(&d));
    assert_abs_diff_eq!(back.north, d.north, epsilon = 1e-15);
    assert_abs_diff_eq!(back.east, d.east, epsilon = 1e-15);
    assert_abs_diff_eq!(back.radial, d.radial, epsilon = 1e-15);
}

#[test]
fn radial_direction_points_away_from_the_geocentre() {
    let station = Location::from_degrees(60.0, -20.0, 0.0).unwrap().to_ecef();
    let up = station.normalize() * 0.1;
    let local = LocalFrame::from_ecef(&station).to_local(&up);
    assert_abs_diff_eq!(local.radial, 0.1, epsilon = 1e-15);
    assert_abs_diff_eq!(local.north, 0.0, epsilon = 1e-15);
    let north_pole = LocalFrame::from_ecef(&Vector3::new(1.0, 0.0, 1.0));
    assert!(north_pole.to_local(&Vector3::z_axis()).north > 0.0);
}

#[test]
fn invalid_latitude_is_rejected() {
    assert!(matches!(
        Location::from_degrees(95.0, 0.0, 0.0),
        Err(TideError::InvalidInput { .. })
    ));
}

#[test]
fn legendre_degree_two_zonal() {
    for x in [-1.0, -0.3, 0.0, 0.5, 1.0] {
        let p = legendre(2, x).unwrap();
        assert_abs_diff_eq!(p[0], 0.5 * (3.0 * x * x - 1.0), epsilon = 1e-15);
    }
    assert!(legendre(2, 1.5).is_err());
}

#[test]
fn masks_combine_with_and() {
    let a: MaskedArray = vec![Some(1.0), None, Some(3.0)].into_iter().collect();
    let b = MaskedArray::new(vec![1.0, 1.0, 1.0], vec![true, true, false]).unwrap();
    let c = a.zip_with(&b, |x, y| x * y).unwrap();
    assert_eq!(c.valid_count(), 1);
    assert_eq!(c.filled(-1.0), vec![1.0, -1.0, -1.0]);
    assert!(a.zip_with(&MaskedArray::from_values(vec![0.0]), |x, _| x).is_err());
}

#[test]
fn angles_wrap_into_one_turn() {
    assert_eq!(normalize_degrees(720.0), 0.0);
    assert_abs_diff_eq!(normalize_degrees(-0.25), 359.75, epsilon = 1e-12);
}
