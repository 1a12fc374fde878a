pub mod logger;

use nalgebra::{Point3, UnitQuaternion, Vector3};
use std::f32::consts::TAU;

/// Unit circle on the XZ plane, starting at (0, 0, -1) and turning towards +X.
pub fn position_on_circle(prog: f32) -> Vector3<f32> {
    let prog = prog * TAU;
    Vector3::new(prog.sin(), 0.0, -prog.cos())
}

pub fn lerp(a: &Point3<f32>, b: &Point3<f32>, t: f32) -> Point3<f32> { a + (b - a) * t }

/// Rotates one of the local basis axes into world space, the way a transform's
/// `forward`/`right`/`up` would report it.
pub fn modifier(orientation: &UnitQuaternion<f32>, axis: [f32; 3]) -> Vector3<f32> {
    let res = orientation * Vector3::new(axis[0], axis[1], axis[2]);
    match res.try_normalize(f32::EPSILON) {
        Some(res) => res,
        None => Vector3::zeros(),
    }
}
