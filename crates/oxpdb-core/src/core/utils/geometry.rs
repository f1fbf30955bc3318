use nalgebra::{Rotation3, Unit, Vector3};

pub fn angle_between(v1: &Vector3<f64>, v2: &Vector3<f64>) -> f64 {
    let cos_angle = v1.dot(v2) / (v1.norm() * v2.norm());
    cos_angle.clamp(-1.0, 1.0).acos()
}

pub fn rotation_about_axis(axis: &Vector3<f64>, angle: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Unit::new_normalize(*axis), angle)
}
