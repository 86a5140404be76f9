use nalgebra::Vector3;
use solar_power_estimator::eclipse::{EclipseError, ShadowRegime, is_sunlit, shadow_function};
use solar_power_estimator::elements::{DEFAULT_TOLERANCE, rotation, state_to_elements};

const MU_EARTH: f64 = 398_600.4418; // km^3 / s^2
const R_EARTH: f64 = 6_378.1366; // km
const R_SUN: f64 = 695_700.0; // km
const SUN_DISTANCE: f64 = 1.496e8; // km

fn circular_speed(radius_km: f64) -> f64 {
    (MU_EARTH / radius_km).sqrt()
}

#[test]
fn subsolar_satellite_is_sunlit() {
    let r = Vector3::new(7000.0, 0.0, 0.0);
    let v = Vector3::new(0.0, circular_speed(7000.0), 0.0);
    let sun = Vector3::new(SUN_DISTANCE, 0.0, 0.0);

    let f = shadow_function(MU_EARTH, &r, &v, &sun, R_SUN, R_EARTH, ShadowRegime::Umbra)
        .expect("shadow");
    assert!(f > 0.0, "f = {f}");
    assert!(is_sunlit(f));
}

#[test]
fn terminator_plane_satellite_is_sunlit() {
    // Quarter revolution past the subsolar point, 7000 km from the shadow
    // axis: well clear of the ~6378 km umbra cylinder, in full sunlight.
    let r = Vector3::new(0.0, 7000.0, 0.0);
    let v = Vector3::new(-circular_speed(7000.0), 0.0, 0.0);
    let sun = Vector3::new(SUN_DISTANCE, 0.0, 0.0);

    let f = shadow_function(MU_EARTH, &r, &v, &sun, R_SUN, R_EARTH, ShadowRegime::Umbra)
        .expect("shadow");
    assert!(f >= 0.0, "f = {f}");
    assert!(is_sunlit(f));
}

#[test]
fn anti_solar_umbra_satellite_reads_eclipsed() {
    // Night side, 500 km from the Sun-Earth axis: deep inside the umbra.
    let r = Vector3::new(-7000.0, 500.0, 0.0);
    let v = Vector3::new(0.0, 0.0, circular_speed(r.norm()));
    let sun = Vector3::new(SUN_DISTANCE, 0.0, 0.0);

    let f = shadow_function(MU_EARTH, &r, &v, &sun, R_SUN, R_EARTH, ShadowRegime::Umbra)
        .expect("shadow");
    assert!(f < 0.0, "f = {f}");
    assert!(!is_sunlit(f));

    // The exact anti-solar point is the darkest case of all.
    let r_axis = Vector3::new(-7000.0, 0.0, 0.0);
    let v_axis = Vector3::new(0.0, circular_speed(7000.0), 0.0);
    let f_axis = shadow_function(
        MU_EARTH,
        &r_axis,
        &v_axis,
        &sun,
        R_SUN,
        R_EARTH,
        ShadowRegime::Umbra,
    )
    .expect("shadow");
    assert!(f_axis < 0.0, "f = {f_axis}");
}

#[test]
fn night_side_satellite_outside_the_cone_is_sunlit() {
    // Behind the terminator but far enough off-axis to see around the limb.
    let r = Vector3::new(-3000.0, 7000.0, 0.0);
    let v = Vector3::new(0.0, 0.0, circular_speed(r.norm()));
    let sun = Vector3::new(SUN_DISTANCE, 0.0, 0.0);

    let f = shadow_function(MU_EARTH, &r, &v, &sun, R_SUN, R_EARTH, ShadowRegime::Umbra)
        .expect("shadow");
    assert!(f > 0.0, "f = {f}");
    assert!(is_sunlit(f));
}

#[test]
fn umbra_penumbra_difference_isolates_half_width_term() {
    // Flipping the regime flips only the signed half-width term; the beta and
    // zeta projections cancel in the difference, which collapses to
    // 4 p R_primary cos(psi) (1 + e cos(nu)) R_sec / |r_sec|. Day-side
    // fixture with both values positive, so the sign fold is a no-op.
    let r = Vector3::new(5000.0, 4000.0, 2000.0);
    let v = Vector3::new(-4.0, 5.5, 1.0);
    let sun = Vector3::new(0.8 * SUN_DISTANCE, 0.5 * SUN_DISTANCE, 0.2 * SUN_DISTANCE);

    let f_umbra = shadow_function(MU_EARTH, &r, &v, &sun, R_SUN, R_EARTH, ShadowRegime::Umbra)
        .expect("umbra");
    let f_penumbra = shadow_function(
        MU_EARTH,
        &r,
        &v,
        &sun,
        R_SUN,
        R_EARTH,
        ShadowRegime::Penumbra,
    )
    .expect("penumbra");
    assert!(f_umbra > 0.0 && f_penumbra > 0.0);

    let coe = state_to_elements(MU_EARTH, &r, &v, DEFAULT_TOLERANCE).expect("elements");
    let pqw = rotation::perifocal_to_inertial(
        coe.inclination_rad,
        coe.raan_rad,
        coe.arg_periapsis_rad,
    );
    let sun_norm = sun.norm();
    let beta = pqw.matrix().column(0).dot(&sun) / sun_norm;
    let zeta = pqw.matrix().column(1).dot(&sun) / sun_norm;
    let nu = coe.true_anomaly_rad;
    let cos_psi = beta * nu.cos() + zeta * nu.sin();
    let radial = 1.0 + coe.eccentricity * nu.cos();

    // sin(asin(x)) = x for both half-widths, so their sum is 2 R_sec / d.
    let expected = 4.0 * coe.semi_latus_rectum_km * R_EARTH * cos_psi * radial * R_SUN / sun_norm;
    let diff = f_umbra - f_penumbra;
    assert!(
        (diff - expected).abs() < expected.abs().max(1.0) * 1e-9,
        "diff = {diff}, expected = {expected}"
    );
}

#[test]
fn secondary_body_inside_geometry_limit_is_rejected() {
    let r = Vector3::new(7000.0, 0.0, 0.0);
    let v = Vector3::new(0.0, circular_speed(7000.0), 0.0);
    let sun_too_close = Vector3::new(1000.0, 0.0, 0.0);

    assert!(matches!(
        shadow_function(
            MU_EARTH,
            &r,
            &v,
            &sun_too_close,
            R_SUN,
            R_EARTH,
            ShadowRegime::Umbra
        ),
        Err(EclipseError::SecondaryTooClose { .. })
    ));
}

#[test]
fn degenerate_state_propagates_from_element_conversion() {
    let r = Vector3::zeros();
    let v = Vector3::new(0.0, 7.5, 0.0);
    let sun = Vector3::new(SUN_DISTANCE, 0.0, 0.0);

    assert!(matches!(
        shadow_function(MU_EARTH, &r, &v, &sun, R_SUN, R_EARTH, ShadowRegime::Umbra),
        Err(EclipseError::Elements(_))
    ));
}
