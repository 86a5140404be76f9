//! Elementary rotations and the perifocal-to-inertial composition.

use nalgebra::{Rotation3, Vector3};

/// Rotation about the inertial x-axis by `angle` radians.
pub fn about_x(angle: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::x_axis(), angle)
}

/// Rotation about the inertial z-axis by `angle` radians.
pub fn about_z(angle: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), angle)
}

/// Perifocal (PQW) to inertial rotation: Rz(raan) · Rx(inc) · Rz(argp).
///
/// Columns of the resulting matrix are the perifocal basis vectors expressed
/// in the inertial frame; the first two (P toward periapsis, Q in-plane) are
/// the projection axes used by the shadow function.
pub fn perifocal_to_inertial(inc_rad: f64, raan_rad: f64, argp_rad: f64) -> Rotation3<f64> {
    about_z(raan_rad) * about_x(inc_rad) * about_z(argp_rad)
}
