//! Continuous shadow function after Escobal, *Methods of Orbit Determination*.
//!
//! The function combines the orbit's perifocal geometry with the direction of
//! the occluded secondary body (the Sun) into a single scalar whose sign
//! flips at shadow transitions: negative only on the night side of the
//! primary, inside the selected shadow cone. Only the sign is contractually
//! meaningful; the magnitude is not calibrated to any physical unit. Bodies
//! are treated as spheres, with no flattening correction.

use nalgebra::Vector3;
use thiserror::Error;

use power_elements::{DEFAULT_TOLERANCE, ElementsError, rotation, state_to_elements};

/// Selects which shadow cone the function describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowRegime {
    Umbra,
    Penumbra,
}

impl ShadowRegime {
    /// Sign applied to the primary-radius term of the angular half-width.
    fn half_width_sign(self) -> f64 {
        match self {
            ShadowRegime::Umbra => 1.0,
            ShadowRegime::Penumbra => -1.0,
        }
    }
}

/// Errors surfaced by the shadow function.
#[derive(Debug, Error)]
pub enum EclipseError {
    #[error(transparent)]
    Elements(#[from] ElementsError),
    #[error("secondary body at {distance_km} km is too close for the shadow geometry")]
    SecondaryTooClose { distance_km: f64 },
}

/// Evaluate the continuous shadow function for one satellite state.
///
/// * `k` — gravitational parameter of the primary (km³/s²)
/// * `r`, `v` — satellite state relative to the primary (km, km/s)
/// * `r_sec` — secondary-body (Sun) position relative to the primary (km)
/// * `radius_sec_km`, `radius_primary_km` — equatorial radii of the two bodies
///
/// Sign convention: `f >= 0` means sunlit, `f < 0` means inside the selected
/// shadow regime (see [`is_sunlit`]).
pub fn shadow_function(
    k: f64,
    r: &Vector3<f64>,
    v: &Vector3<f64>,
    r_sec: &Vector3<f64>,
    radius_sec_km: f64,
    radius_primary_km: f64,
    regime: ShadowRegime,
) -> Result<f64, EclipseError> {
    let pm = regime.half_width_sign();
    let coe = state_to_elements(k, r, v, DEFAULT_TOLERANCE)?;

    let r_sec_norm = r_sec.norm();
    if r_sec_norm <= radius_sec_km + radius_primary_km {
        return Err(EclipseError::SecondaryTooClose {
            distance_km: r_sec_norm,
        });
    }

    let pqw = rotation::perifocal_to_inertial(
        coe.inclination_rad,
        coe.raan_rad,
        coe.arg_periapsis_rad,
    );
    // Projections of the unit secondary direction onto the P and Q axes.
    let beta = pqw.matrix().column(0).dot(r_sec) / r_sec_norm;
    let zeta = pqw.matrix().column(1).dot(r_sec) / r_sec_norm;

    // Angular half-width of the shadow cone; the primary-radius sign flips
    // between umbra and penumbra.
    let half_width = ((radius_sec_km - pm * radius_primary_km) / r_sec_norm).asin();
    let sin_half_width = half_width.sin();

    let p = coe.semi_latus_rectum_km;
    let ecc = coe.eccentricity;
    let nu = coe.true_anomaly_rad;

    let cos_psi = beta * nu.cos() + zeta * nu.sin();
    let radial_term = 1.0 + ecc * nu.cos();

    let f = radius_primary_km.powi(2) * radial_term.powi(2) + p.powi(2) * cos_psi.powi(2)
        - p.powi(2)
        + pm * 2.0 * p * radius_primary_km * cos_psi * radial_term * sin_half_width;

    // The quadratic is positive inside the infinite shadow cylinder on both
    // sides of the primary, but only the anti-secondary half-space
    // (cos_psi < 0) can actually be shadowed. Fold that discrimination into
    // the sign so the day side always reads sunlit.
    Ok(if cos_psi < 0.0 { -f } else { f.abs() })
}

/// Interpret a shadow-function value: non-negative means sunlit.
#[inline]
pub fn is_sunlit(shadow_value: f64) -> bool {
    shadow_value >= 0.0
}
