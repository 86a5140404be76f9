use nalgebra::{UnitQuaternion, Vector3};
use solar_power_estimator::config::EstimatorConfig;
use solar_power_estimator::elements::StateVector;
use solar_power_estimator::irradiance::IrradianceModel;
use solar_power_estimator::oracle::{PanelArrayOracle, RecordedOracle};
use solar_power_estimator::pipeline::{PipelineError, TimeStep, estimate_power_series};

const MU_EARTH: f64 = 398_600.4418; // km^3 / s^2
const SUN_DISTANCE: f64 = 1.496e8; // km
const EPOCH_JD: f64 = 2_460_117.0; // 2023-06-21 12:00 UTC

fn circular_speed(radius_km: f64) -> f64 {
    (MU_EARTH / radius_km).sqrt()
}

/// Night side, 500 km off the Sun-Earth axis: deep inside the umbra.
fn eclipsed_step() -> TimeStep {
    let position_km = Vector3::new(-7000.0, 500.0, 0.0);
    TimeStep {
        state: StateVector {
            velocity_km_s: Vector3::new(0.0, 0.0, circular_speed(position_km.norm())),
            position_km,
            epoch_jd: EPOCH_JD,
        },
        q_eci2body: UnitQuaternion::identity(),
        sun_position_km: Vector3::new(SUN_DISTANCE, 0.0, 0.0),
    }
}

/// 45 degrees up-sun: well lit, with sun and nadir safely non-collinear.
fn sunlit_step() -> TimeStep {
    let half = 7000.0 * std::f64::consts::FRAC_1_SQRT_2;
    TimeStep {
        state: StateVector {
            position_km: Vector3::new(half, 0.0, half),
            velocity_km_s: Vector3::new(0.0, circular_speed(7000.0), 0.0),
            epoch_jd: EPOCH_JD,
        },
        q_eci2body: UnitQuaternion::identity(),
        sun_position_km: Vector3::new(SUN_DISTANCE, 0.0, 0.0),
    }
}

#[test]
fn umbra_steps_emit_zero_watts_without_solving_an_attitude() {
    let config = EstimatorConfig::default();
    let mut oracle = PanelArrayOracle::single_panel();

    // The exact anti-solar point has sun and nadir collinear; since it is
    // eclipsed, the pipeline must bail out to zero watts before the attitude
    // solve ever sees the degenerate pair.
    let anti_solar = TimeStep {
        state: StateVector {
            position_km: Vector3::new(-7000.0, 0.0, 0.0),
            velocity_km_s: Vector3::new(0.0, circular_speed(7000.0), 0.0),
            epoch_jd: EPOCH_JD,
        },
        q_eci2body: UnitQuaternion::identity(),
        sun_position_km: Vector3::new(SUN_DISTANCE, 0.0, 0.0),
    };

    let series =
        estimate_power_series(&config, &[eclipsed_step(), anti_solar], &mut oracle)
            .expect("series");
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].watts, 0.0);
    assert_eq!(series[0].illuminated_fraction, 0.0);
    assert_eq!(series[1].watts, 0.0);
}

#[test]
fn eclipsed_steps_do_not_shift_recorded_measurements() {
    let config = EstimatorConfig::default();
    // Per-timestep recording: row 0 belongs to the eclipsed step and must be
    // skipped, not consumed, so the sunlit step reads row 1.
    let mut oracle = RecordedOracle::new("area.csv", vec![0.75, 0.5]);

    let steps = [eclipsed_step(), sunlit_step()];
    let series = estimate_power_series(&config, &steps, &mut oracle).expect("series");

    assert_eq!(series.len(), 2);
    assert_eq!(series[0].watts, 0.0);
    assert_eq!(series[0].illuminated_fraction, 0.0);
    assert!((series[1].illuminated_fraction - 0.5).abs() < 1e-12);
    assert!(series[1].watts > 0.0);
    assert_eq!(series[1].epoch_jd, EPOCH_JD);
}

#[test]
fn sunlit_power_scales_with_configured_factors() {
    let config = EstimatorConfig {
        reference_area_m2: 0.06,
        ..EstimatorConfig::default()
    };
    let mut oracle = RecordedOracle::new("area.csv", vec![0.5]);

    let series = estimate_power_series(&config, &[sunlit_step()], &mut oracle).expect("series");

    let model = IrradianceModel {
        max_w_m2: config.max_sun_constant_w_m2,
        min_w_m2: config.min_sun_constant_w_m2,
    };
    let sun_constant = model.at_julian_date(EPOCH_JD).expect("epoch");
    let expected = 0.5 * 0.06 * sun_constant * config.solar_panel_efficiency;
    assert!(
        (series[0].watts - expected).abs() < 1e-9,
        "watts = {}, expected = {expected}",
        series[0].watts
    );
    assert!((series[0].illuminated_fraction - 0.5).abs() < 1e-12);
}

#[test]
fn single_panel_oracle_reports_full_illumination() {
    let config = EstimatorConfig::default();
    let mut oracle = PanelArrayOracle::single_panel();

    let series = estimate_power_series(&config, &[sunlit_step()], &mut oracle).expect("series");
    assert!((series[0].illuminated_fraction - 1.0).abs() < 1e-12);
}

#[test]
fn short_recording_aborts_the_run() {
    let config = EstimatorConfig::default();
    let mut oracle = RecordedOracle::new("area.csv", Vec::new());

    let err = estimate_power_series(&config, &[sunlit_step()], &mut oracle)
        .expect_err("must not default to zero power");
    assert!(matches!(err, PipelineError::Oracle { index: 0, .. }));
}

#[test]
fn invalid_configuration_is_rejected_before_any_work() {
    let config = EstimatorConfig {
        reference_area_m2: 0.0,
        ..EstimatorConfig::default()
    };
    let mut oracle = PanelArrayOracle::single_panel();

    let err = estimate_power_series(&config, &[sunlit_step()], &mut oracle).expect_err("config");
    assert!(matches!(err, PipelineError::Config(_)));
}

#[test]
fn output_preserves_input_order_and_length() {
    let config = EstimatorConfig::default();
    let mut oracle = PanelArrayOracle::single_panel();

    let steps = [
        eclipsed_step(),
        sunlit_step(),
        eclipsed_step(),
        sunlit_step(),
    ];
    let series = estimate_power_series(&config, &steps, &mut oracle).expect("series");

    assert_eq!(series.len(), steps.len());
    for (sample, step) in series.iter().zip(&steps) {
        assert_eq!(sample.epoch_jd, step.state.epoch_jd);
    }
    assert_eq!(series[0].watts, 0.0);
    assert_eq!(series[2].watts, 0.0);
    assert!(series[1].watts > 0.0);
    assert!(series[3].watts > 0.0);
}

#[test]
fn library_reports_a_version() {
    assert!(!solar_power_estimator::version().is_empty());
}
