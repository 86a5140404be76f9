//! Anomaly transforms between eccentric/hyperbolic and true anomaly.

use crate::{DEFAULT_TOLERANCE, ElementsError};

/// True anomaly from eccentric anomaly, valid for closed orbits (`ecc < 1`).
pub fn eccentric_to_true(e_anom: f64, ecc: f64) -> Result<f64, ElementsError> {
    if ecc >= 1.0 - DEFAULT_TOLERANCE {
        return Err(ElementsError::ParabolicOrbit { ecc });
    }
    Ok(2.0 * (((1.0 + ecc) / (1.0 - ecc)).sqrt() * (e_anom / 2.0).tan()).atan())
}

/// True anomaly from hyperbolic anomaly, valid for open orbits (`ecc > 1`).
pub fn hyperbolic_to_true(f_anom: f64, ecc: f64) -> Result<f64, ElementsError> {
    if ecc <= 1.0 + DEFAULT_TOLERANCE {
        return Err(ElementsError::ParabolicOrbit { ecc });
    }
    Ok(2.0 * (((ecc + 1.0) / (ecc - 1.0)).sqrt() * (f_anom / 2.0).tanh()).atan())
}
