//! Classical orbital element conversions for Earth-orbiting state vectors.
//!
//! The converter follows the standard two-body formulation (Vallado): angular
//! momentum, node, and eccentricity vectors first, then one of four geometric
//! cases selected by eccentricity/inclination tolerances. Near-circular and
//! near-equatorial orbits leave some angles undefined, so those cases
//! substitute the longitude of periapsis, argument of latitude, or true
//! longitude and record which substitution was used.

use std::f64::consts::{PI, TAU};

use nalgebra::Vector3;
use thiserror::Error;

pub mod anomaly;
pub mod rotation;

/// Default eccentricity/inclination tolerance for degeneracy checks.
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

/// Satellite position and velocity at an epoch, expressed in ECI.
#[derive(Debug, Clone, Copy)]
pub struct StateVector {
    pub position_km: Vector3<f64>,
    pub velocity_km_s: Vector3<f64>,
    /// Epoch as a Julian date (UTC).
    pub epoch_jd: f64,
}

/// Which of the four element-definition branches produced a set of elements.
///
/// Exactly one branch is taken per conversion; carrying the tag makes branch
/// coverage observable instead of buried in nested conditionals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitGeometry {
    /// Equatorial, non-circular: `raan = 0`, `arg_periapsis` holds the
    /// longitude of periapsis.
    EquatorialNonCircular,
    /// Inclined, circular: `arg_periapsis = 0`, `true_anomaly` holds the
    /// argument of latitude.
    CircularInclined,
    /// Equatorial and circular: both angles zero, `true_anomaly` holds the
    /// true longitude.
    CircularEquatorial,
    /// No degeneracy; all six elements are individually meaningful.
    General,
}

/// Classical orbital elements derived from a single state vector.
#[derive(Debug, Clone, Copy)]
pub struct OrbitalElements {
    pub semi_latus_rectum_km: f64,
    pub eccentricity: f64,
    /// Inclination in radians, `[0, π]`.
    pub inclination_rad: f64,
    /// Right ascension of the ascending node in radians, `[0, 2π)`.
    pub raan_rad: f64,
    /// Argument of periapsis in radians, `[0, 2π)`.
    pub arg_periapsis_rad: f64,
    /// True anomaly in radians, `(-π, π]`.
    pub true_anomaly_rad: f64,
    pub geometry: OrbitGeometry,
}

/// Errors surfaced during element conversions.
#[derive(Debug, Error)]
pub enum ElementsError {
    #[error("degenerate state vector: {reason}")]
    DegenerateState { reason: &'static str },
    #[error("parabolic orbit (ecc = {ecc}) is unsupported")]
    ParabolicOrbit { ecc: f64 },
}

/// Convert a state vector into classical orbital elements.
///
/// `k` is the gravitational parameter of the primary (km³/s²); `tol` selects
/// the degeneracy branches (see [`OrbitGeometry`]). Rectilinear states with
/// zero position or zero angular momentum are rejected.
pub fn state_to_elements(
    k: f64,
    r: &Vector3<f64>,
    v: &Vector3<f64>,
    tol: f64,
) -> Result<OrbitalElements, ElementsError> {
    let r_norm = r.norm();
    if r_norm == 0.0 {
        return Err(ElementsError::DegenerateState {
            reason: "zero position vector",
        });
    }

    let h = r.cross(v);
    let h_norm = h.norm();
    if h_norm < tol {
        return Err(ElementsError::DegenerateState {
            reason: "zero angular momentum (rectilinear orbit)",
        });
    }

    let n = Vector3::z().cross(&h);
    let e_vec = ((v.dot(v) - k / r_norm) * r - r.dot(v) * v) / k;
    let ecc = e_vec.norm();
    let p = h.dot(&h) / k;
    let inc = (h.z / h_norm).acos();

    let circular = ecc < tol;
    let equatorial = inc.abs() < tol;

    let (raan, argp, nu, geometry) = match (equatorial, circular) {
        (true, false) => {
            // Node undefined; measure periapsis from the inertial x-axis.
            let argp = e_vec.y.atan2(e_vec.x).rem_euclid(TAU);
            let nu = (h.dot(&e_vec.cross(r)) / h_norm).atan2(r.dot(&e_vec));
            (0.0, argp, nu, OrbitGeometry::EquatorialNonCircular)
        }
        (false, true) => {
            // Periapsis undefined; measure the satellite from the node.
            let raan = n.y.atan2(n.x).rem_euclid(TAU);
            let nu = (r.dot(&h.cross(&n)) / h_norm).atan2(r.dot(&n));
            (raan, 0.0, nu, OrbitGeometry::CircularInclined)
        }
        (true, true) => {
            let nu = r.y.atan2(r.x);
            (0.0, 0.0, nu, OrbitGeometry::CircularEquatorial)
        }
        (false, false) => {
            if (ecc - 1.0).abs() < tol {
                return Err(ElementsError::ParabolicOrbit { ecc });
            }
            let a = p / (1.0 - ecc * ecc);
            let ka = k * a;
            let nu = if a > 0.0 {
                let e_sin_e = r.dot(v) / ka.sqrt();
                let e_cos_e = r_norm * v.dot(v) / k - 1.0;
                anomaly::eccentric_to_true(e_sin_e.atan2(e_cos_e), ecc)?
            } else {
                let e_sinh_f = r.dot(v) / (-ka).sqrt();
                let e_cosh_f = r_norm * v.dot(v) / k - 1.0;
                let f = ((e_cosh_f + e_sinh_f) / (e_cosh_f - e_sinh_f)).ln() / 2.0;
                anomaly::hyperbolic_to_true(f, ecc)?
            };
            let raan = n.y.atan2(n.x).rem_euclid(TAU);
            let px = r.dot(&n);
            let py = r.dot(&h.cross(&n)) / h_norm;
            let argp = (py.atan2(px) - nu).rem_euclid(TAU);
            (raan, argp, nu, OrbitGeometry::General)
        }
    };

    Ok(OrbitalElements {
        semi_latus_rectum_km: p,
        eccentricity: ecc,
        inclination_rad: inc,
        raan_rad: raan,
        arg_periapsis_rad: argp,
        true_anomaly_rad: wrap_half_open(nu),
        geometry,
    })
}

/// Recover the ECI state vector from classical orbital elements.
///
/// Inverse of [`state_to_elements`]: the perifocal position and velocity are
/// built from `p`, `ecc`, `nu` and rotated into the inertial frame. Works for
/// the degenerate branches too because their angle substitutions keep the
/// composed rotation consistent.
pub fn elements_to_state(k: f64, coe: &OrbitalElements) -> (Vector3<f64>, Vector3<f64>) {
    let p = coe.semi_latus_rectum_km;
    let ecc = coe.eccentricity;
    let nu = coe.true_anomaly_rad;

    let r_mag = p / (1.0 + ecc * nu.cos());
    let r_pf = Vector3::new(r_mag * nu.cos(), r_mag * nu.sin(), 0.0);
    let v_pf = (k / p).sqrt() * Vector3::new(-nu.sin(), ecc + nu.cos(), 0.0);

    let pqw = rotation::perifocal_to_inertial(
        coe.inclination_rad,
        coe.raan_rad,
        coe.arg_periapsis_rad,
    );
    (pqw * r_pf, pqw * v_pf)
}

/// Normalize an angle to `(-π, π]`.
fn wrap_half_open(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped == -PI { PI } else { wrapped }
}
