//! Seasonal solar-constant model.
//!
//! Earth's orbital eccentricity modulates the solar constant over the year;
//! the model is a cosine fit anchored at day 172 (the June solstice, where
//! Earth is near aphelion and irradiance bottoms out).

use std::f64::consts::TAU;

use thiserror::Error;

use power_core::time::fractional_day_of_year;

/// Day of year at which irradiance reaches its minimum.
const MINIMUM_DAY: f64 = 172.0;
/// Mean length of the year in days.
const DAYS_PER_YEAR: f64 = 365.25;

/// Errors surfaced by the irradiance model.
#[derive(Debug, Error)]
pub enum IrradianceError {
    #[error("julian date {jd} cannot be converted to a calendar day")]
    InvalidEpoch { jd: f64 },
}

/// Cosine model of the solar constant between configured extrema.
#[derive(Debug, Clone, Copy)]
pub struct IrradianceModel {
    pub max_w_m2: f64,
    pub min_w_m2: f64,
}

impl Default for IrradianceModel {
    fn default() -> Self {
        Self {
            max_w_m2: 1413.0,
            min_w_m2: 1322.0,
        }
    }
}

impl IrradianceModel {
    /// Solar constant (W/m²) for a fractional day of year.
    pub fn at_day_of_year(&self, day: f64) -> f64 {
        let mean = (self.max_w_m2 + self.min_w_m2) / 2.0;
        let amplitude = (self.max_w_m2 - self.min_w_m2) / 2.0;
        mean - amplitude * (TAU * (day - MINIMUM_DAY) / DAYS_PER_YEAR).cos()
    }

    /// Solar constant (W/m²) at a UTC Julian date.
    pub fn at_julian_date(&self, jd: f64) -> Result<f64, IrradianceError> {
        let day = fractional_day_of_year(jd).ok_or(IrradianceError::InvalidEpoch { jd })?;
        Ok(self.at_day_of_year(day))
    }
}
