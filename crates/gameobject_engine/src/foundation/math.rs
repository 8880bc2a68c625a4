//! Math utilities and types
//!
//! The engine only needs positions, so this is a thin layer of nalgebra aliases.

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Point on a circle of `radius` around `center` at `angle` radians, in the XY plane.
///
/// The Z coordinate of the result is taken from `z`.
pub fn orbit_point(center: Vec3, angle: f32, radius: f32, z: f32) -> Vec3 {
    Vec3::new(
        center.x + angle.cos() * radius,
        center.y + angle.sin() * radius,
        z,
    )
}

/// Round to two decimal places
pub fn round_to_hundredths(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    #[test]
    fn test_orbit_point_quarter_turn() {
        let p = orbit_point(Vec3::new(200.0, 200.0, 0.0), PI / 2.0, 50.0, 3.0);
        assert_relative_eq!(p, Vec3::new(200.0, 250.0, 3.0), epsilon = 1e-4);
    }

    #[test]
    fn test_round_to_hundredths() {
        assert_relative_eq!(round_to_hundredths(59.876_54), 59.88);
        assert_relative_eq!(round_to_hundredths(60.0), 60.0);
    }
}
