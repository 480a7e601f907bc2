//! Approach-law helpers:
//! - approach_f32 / approach_vec3 (component-wise)
//! - approach_quat (spherical step with shortest-arc correction)

use glam::{Quat, Vec3};

/// Fraction of the remaining distance covered in one tick.
#[inline]
pub fn step_fraction(rate: f32, dt: f32) -> f32 {
    rate * dt
}

#[inline]
pub fn approach_f32(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * step_fraction(rate, dt)
}

#[inline]
pub fn approach_vec3(current: Vec3, target: Vec3, rate: f32, dt: f32) -> Vec3 {
    current + (target - current) * step_fraction(rate, dt)
}

/// Spherical step from `current` toward `target`.
/// Returns `current` untouched when it already equals the target (either sign).
#[inline]
pub fn approach_quat(current: Quat, target: Quat, rate: f32, dt: f32) -> Quat {
    if current == target || current == -target {
        return current;
    }
    current.slerp(target, step_fraction(rate, dt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_step_matches_literal_law() {
        // c0 = 0, T = 1, r = 10, dt = 0.05 -> 0.5
        assert_eq!(approach_f32(0.0, 1.0, 10.0, 0.05), 0.5);
        assert_eq!(approach_f32(2.0, 2.0, 10.0, 0.05), 2.0);
    }

    #[test]
    fn vec3_is_component_wise() {
        let v = approach_vec3(Vec3::ZERO, Vec3::new(1.0, -2.0, 4.0), 5.0, 0.1);
        assert_eq!(v, Vec3::new(0.5, -1.0, 2.0));
    }

    #[test]
    fn quat_step_covers_fraction_of_angle() {
        let target = Quat::from_rotation_y(1.0);
        let q = approach_quat(Quat::IDENTITY, target, 10.0, 0.05);
        assert!((q.angle_between(Quat::IDENTITY) - 0.5).abs() < 1e-4);
        assert!((q.angle_between(target) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn quat_fixed_point() {
        let q = Quat::from_rotation_z(0.7);
        assert_eq!(approach_quat(q, q, 10.0, 0.016), q);
        assert_eq!(approach_quat(q, -q, 10.0, 0.016), q);
    }
}
