//! Two-vector constrained attitude: point the body x-axis away from the Sun
//! while biasing the body y-axis toward nadir.
//!
//! Frame convention used throughout the workspace: a per-timestep quaternion
//! `q` is **inertial-to-body**, and inertial vectors are expressed in body
//! coordinates as `v_body = q⁻¹ ⊗ v ⊗ q` (see [`into_body_frame`]).

use nalgebra::{Matrix3, Rotation3, UnitQuaternion, Vector3};
use thiserror::Error;

/// Gram–Schmidt denominator below which sun and nadir count as collinear.
const COLLINEAR_TOLERANCE: f64 = 1e-10;

/// Errors surfaced by the attitude solver.
#[derive(Debug, Error)]
pub enum AttitudeError {
    #[error("degenerate vector: {reason}")]
    DegenerateVector { reason: &'static str },
}

/// Solve for the quaternion aligning the body frame with the Sun and nadir.
///
/// Builds the orthonormal triad `x = -sun`, `y =` nadir orthogonalized
/// against the sun direction, `z = x × y`, and converts the stacked matrix to
/// a unit quaternion (`(w, x, y, z)` component order). Inputs need not be
/// normalized; zero vectors and sun-parallel nadir are rejected — the latter
/// is a real flight condition near the subsolar point that callers must
/// guard against.
pub fn align_with_sun_and_nadir(
    sun: &Vector3<f64>,
    nadir: &Vector3<f64>,
) -> Result<UnitQuaternion<f64>, AttitudeError> {
    let sun_unit = normalized(sun, "zero sun vector")?;
    let nadir_unit = normalized(nadir, "zero nadir vector")?;

    let x_body = -sun_unit;

    // Remove the sun-parallel component of nadir, then renormalize.
    let y_raw = nadir_unit - sun_unit * sun_unit.dot(&nadir_unit);
    let y_norm = y_raw.norm();
    if y_norm < COLLINEAR_TOLERANCE {
        return Err(AttitudeError::DegenerateVector {
            reason: "sun and nadir directions are collinear",
        });
    }
    let y_body = y_raw / y_norm;
    let z_body = x_body.cross(&y_body).normalize();

    // Rows are the body axes in the input frame, so the matrix maps input
    // coordinates to body coordinates; orthonormal by construction.
    let m = Matrix3::from_rows(&[x_body.transpose(), y_body.transpose(), z_body.transpose()]);
    Ok(UnitQuaternion::from_rotation_matrix(
        &Rotation3::from_matrix_unchecked(m),
    ))
}

/// Express an inertial vector in body coordinates using an inertial-to-body
/// quaternion: `v_body = q⁻¹ ⊗ v ⊗ q`.
#[inline]
pub fn into_body_frame(q_eci2body: &UnitQuaternion<f64>, v_inertial: &Vector3<f64>) -> Vector3<f64> {
    q_eci2body.inverse_transform_vector(v_inertial)
}

/// Quaternion components in the fixed `(w, x, y, z)` order.
#[inline]
pub fn wxyz(q: &UnitQuaternion<f64>) -> [f64; 4] {
    [q.w, q.i, q.j, q.k]
}

fn normalized(v: &Vector3<f64>, reason: &'static str) -> Result<Vector3<f64>, AttitudeError> {
    let norm = v.norm();
    if norm < COLLINEAR_TOLERANCE {
        return Err(AttitudeError::DegenerateVector { reason });
    }
    Ok(v / norm)
}
