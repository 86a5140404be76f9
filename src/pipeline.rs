//! Per-timestep power integration.
//!
//! Timesteps are processed strictly in input order: the cross-section oracle
//! owns one mutable scene, so calls must not be reordered or parallelized.
//! Every failure aborts the run loudly; a zero-power sample always means a
//! physically dark panel, never a swallowed error.

use nalgebra::UnitQuaternion;
use thiserror::Error;

use power_attitude::{AttitudeError, align_with_sun_and_nadir, into_body_frame};
use power_config::{ConfigError, EstimatorConfig};
use power_eclipse::{EclipseError, ShadowRegime, is_sunlit, shadow_function};
use power_elements::StateVector;
use power_irradiance::{IrradianceError, IrradianceModel};

use crate::oracle::{CrossSectionOracle, OracleError};

/// Everything known about the spacecraft at one epoch.
#[derive(Debug, Clone, Copy)]
pub struct TimeStep {
    pub state: StateVector,
    /// Known inertial-to-body orientation at this epoch.
    pub q_eci2body: UnitQuaternion<f64>,
    /// Sun position relative to Earth in ECI (km), from an external ephemeris.
    pub sun_position_km: nalgebra::Vector3<f64>,
}

/// Estimated output for one timestep.
#[derive(Debug, Clone, Copy)]
pub struct PowerSample {
    pub epoch_jd: f64,
    /// Illuminated fraction of the reference area; zero while eclipsed.
    pub illuminated_fraction: f64,
    pub watts: f64,
}

/// Errors surfaced by the power integrator, tagged with the failing step.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration rejected: {0}")]
    Config(#[from] ConfigError),
    #[error("eclipse evaluation failed at step {index}: {source}")]
    Eclipse {
        index: usize,
        #[source]
        source: EclipseError,
    },
    #[error("attitude solve failed at step {index}: {source}")]
    Attitude {
        index: usize,
        #[source]
        source: AttitudeError,
    },
    #[error("cross-section oracle failed at step {index}: {source}")]
    Oracle {
        index: usize,
        #[source]
        source: OracleError,
    },
    #[error("irradiance evaluation failed at step {index}: {source}")]
    Irradiance {
        index: usize,
        #[source]
        source: IrradianceError,
    },
}

/// Integrate instantaneous power over an ordered series of timesteps.
///
/// Per step: evaluate the umbra shadow function; while eclipsed the sample is
/// zero watts unconditionally. Otherwise express sun and nadir in the body
/// frame, solve the sun/nadir attitude, measure the illuminated fraction via
/// the oracle, and scale by reference area, seasonal solar constant, panel
/// efficiency, and performance ratio. Output indices align one-to-one with
/// the input.
pub fn estimate_power_series(
    config: &EstimatorConfig,
    steps: &[TimeStep],
    oracle: &mut dyn CrossSectionOracle,
) -> Result<Vec<PowerSample>, PipelineError> {
    config.validate()?;
    let irradiance = IrradianceModel {
        max_w_m2: config.max_sun_constant_w_m2,
        min_w_m2: config.min_sun_constant_w_m2,
    };

    let mut series = Vec::with_capacity(steps.len());
    for (index, step) in steps.iter().enumerate() {
        let epoch_jd = step.state.epoch_jd;
        let shadow = shadow_function(
            config.bodies.mu_earth_km3_s2,
            &step.state.position_km,
            &step.state.velocity_km_s,
            &step.sun_position_km,
            config.bodies.sun_radius_km,
            config.bodies.earth_radius_km,
            ShadowRegime::Umbra,
        )
        .map_err(|source| PipelineError::Eclipse { index, source })?;

        if !is_sunlit(shadow) {
            series.push(PowerSample {
                epoch_jd,
                illuminated_fraction: 0.0,
                watts: 0.0,
            });
            continue;
        }

        let sun_eci = step.sun_position_km.normalize();
        let nadir_eci = -step.state.position_km.normalize();
        let sun_body = into_body_frame(&step.q_eci2body, &sun_eci);
        let nadir_body = into_body_frame(&step.q_eci2body, &nadir_eci);

        let q_body2sun = align_with_sun_and_nadir(&sun_body, &nadir_body)
            .map_err(|source| PipelineError::Attitude { index, source })?;

        let illuminated_fraction = oracle
            .measure(index, &q_body2sun)
            .map_err(|source| PipelineError::Oracle { index, source })?;

        let sun_constant = irradiance
            .at_julian_date(epoch_jd)
            .map_err(|source| PipelineError::Irradiance { index, source })?;

        let watts = illuminated_fraction
            * config.reference_area_m2
            * sun_constant
            * config.solar_panel_efficiency
            * config.performance_ratio;

        series.push(PowerSample {
            epoch_jd,
            illuminated_fraction,
            watts,
        });
    }

    Ok(series)
}
