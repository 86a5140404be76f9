//! Configuration models and loaders for the solar power estimator.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Gravitational parameters and body radii used by the pipeline.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct BodyCatalog {
    #[serde(default = "defaults::mu_earth")]
    pub mu_earth_km3_s2: f64,
    #[serde(default = "defaults::earth_radius")]
    pub earth_radius_km: f64,
    #[serde(default = "defaults::sun_radius")]
    pub sun_radius_km: f64,
}

impl Default for BodyCatalog {
    fn default() -> Self {
        Self {
            mu_earth_km3_s2: defaults::mu_earth(),
            earth_radius_km: defaults::earth_radius(),
            sun_radius_km: defaults::sun_radius(),
        }
    }
}

/// Estimator configuration parsed from YAML or TOML manifests.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct EstimatorConfig {
    /// Photovoltaic conversion efficiency, `(0, 1]`.
    #[serde(default = "defaults::efficiency")]
    pub solar_panel_efficiency: f64,
    /// System-level derating factor applied on top of cell efficiency.
    #[serde(default = "defaults::performance_ratio")]
    pub performance_ratio: f64,
    /// Solar constant near perihelion (W/m²).
    #[serde(default = "defaults::max_sun_constant")]
    pub max_sun_constant_w_m2: f64,
    /// Solar constant near aphelion (W/m²).
    #[serde(default = "defaults::min_sun_constant")]
    pub min_sun_constant_w_m2: f64,
    /// Panel reference area (m²); oracle fractions scale against this.
    #[serde(default = "defaults::reference_area")]
    pub reference_area_m2: f64,
    #[serde(default)]
    pub bodies: BodyCatalog,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            solar_panel_efficiency: defaults::efficiency(),
            performance_ratio: defaults::performance_ratio(),
            max_sun_constant_w_m2: defaults::max_sun_constant(),
            min_sun_constant_w_m2: defaults::min_sun_constant(),
            reference_area_m2: defaults::reference_area(),
            bodies: BodyCatalog::default(),
        }
    }
}

mod defaults {
    pub fn efficiency() -> f64 {
        0.285
    }
    pub fn performance_ratio() -> f64 {
        1.0
    }
    pub fn max_sun_constant() -> f64 {
        1413.0
    }
    pub fn min_sun_constant() -> f64 {
        1322.0
    }
    pub fn reference_area() -> f64 {
        1.0
    }
    pub fn mu_earth() -> f64 {
        398_600.4418
    }
    pub fn earth_radius() -> f64 {
        6_378.1366
    }
    pub fn sun_radius() -> f64 {
        695_700.0
    }
}

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid configuration: {field} = {value}")]
    Invalid { field: &'static str, value: f64 },
}

/// Load and validate an estimator configuration from a YAML or TOML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<EstimatorConfig, ConfigError> {
    let path = path.as_ref();
    let config: EstimatorConfig = if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)?
    } else {
        let reader = File::open(path)?;
        serde_yaml::from_reader(reader)?
    };
    config.validate()?;
    Ok(config)
}

impl EstimatorConfig {
    /// Reject zero, negative, and non-finite parameters before they can turn
    /// into silent NaN power values downstream.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("reference_area_m2", self.reference_area_m2)?;
        check_positive("solar_panel_efficiency", self.solar_panel_efficiency)?;
        if self.solar_panel_efficiency > 1.0 {
            return Err(ConfigError::Invalid {
                field: "solar_panel_efficiency",
                value: self.solar_panel_efficiency,
            });
        }
        check_positive("performance_ratio", self.performance_ratio)?;
        check_positive("max_sun_constant_w_m2", self.max_sun_constant_w_m2)?;
        check_positive("min_sun_constant_w_m2", self.min_sun_constant_w_m2)?;
        if self.max_sun_constant_w_m2 < self.min_sun_constant_w_m2 {
            return Err(ConfigError::Invalid {
                field: "max_sun_constant_w_m2",
                value: self.max_sun_constant_w_m2,
            });
        }
        check_positive("mu_earth_km3_s2", self.bodies.mu_earth_km3_s2)?;
        check_positive("earth_radius_km", self.bodies.earth_radius_km)?;
        check_positive("sun_radius_km", self.bodies.sun_radius_km)?;
        Ok(())
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::Invalid { field, value });
    }
    Ok(())
}
