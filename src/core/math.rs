// Math utilities and helper functions

use glam::Vec2;
use std::f32::consts::{PI, TAU};

/// Linear interpolation
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Check if two f32 values are approximately equal
pub fn approx_equal(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Move `current` towards `target` by at most `max_delta`, never overshooting
pub fn move_towards(current: Vec2, target: Vec2, max_delta: f32) -> Vec2 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_delta || distance == 0.0 {
        target
    } else {
        current + delta / distance * max_delta
    }
}

/// Wrap an angle in radians into the range [-PI, PI)
pub fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Interpolate between two angles along the shortest arc
pub fn lerp_angle(from: f32, to: f32, t: f32) -> f32 {
    from + wrap_angle(to - from) * t.clamp(0.0, 1.0)
}

/// Angle (radians) of a direction vector, measured from the +X axis
pub fn angle_of(direction: Vec2) -> f32 {
    direction.y.atan2(direction.x)
}

/// Critically damped spring towards `target`
///
/// `velocity` is carried between calls by the caller. Never overshoots the
/// target.
pub fn smooth_damp(
    current: Vec2,
    target: Vec2,
    velocity: &mut Vec2,
    smooth_time: f32,
    dt: f32,
) -> Vec2 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(0.0001);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;

    let mut output = target + (change + temp) * exp;

    // Clamp when we passed the target this step
    if (target - current).dot(output - target) > 0.0 {
        output = target;
        *velocity = Vec2::ZERO;
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
    }

    #[test]
    fn test_approx_equal() {
        assert!(approx_equal(1.0, 1.00001, 0.0001));
        assert!(!approx_equal(1.0, 1.1, 0.01));
    }

    #[test]
    fn test_move_towards_partial_step() {
        let result = move_towards(Vec2::ZERO, Vec2::new(10.0, 0.0), 2.0);
        assert_relative_eq!(result.x, 2.0);
        assert_relative_eq!(result.y, 0.0);
    }

    #[test]
    fn test_move_towards_does_not_overshoot() {
        let target = Vec2::new(1.0, 1.0);
        assert_eq!(move_towards(Vec2::ZERO, target, 5.0), target);
        assert_eq!(move_towards(target, target, 0.5), target);
    }

    #[test]
    fn test_wrap_angle() {
        assert_relative_eq!(wrap_angle(0.0), 0.0);
        assert_relative_eq!(wrap_angle(TAU + 0.5), 0.5, epsilon = 1e-5);
        assert_relative_eq!(wrap_angle(-TAU - 0.5), -0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_lerp_angle_takes_short_way() {
        // From just below +PI to just above -PI should cross the seam, not spin around
        let from = PI - 0.1;
        let to = -PI + 0.1;
        let halfway = lerp_angle(from, to, 0.5);
        assert_relative_eq!(wrap_angle(halfway).abs(), PI, epsilon = 1e-4);
    }

    #[test]
    fn test_angle_of() {
        assert_relative_eq!(angle_of(Vec2::X), 0.0);
        assert_relative_eq!(angle_of(Vec2::Y), PI / 2.0);
    }

    #[test]
    fn test_smooth_damp_converges_without_overshoot() {
        let target = Vec2::new(10.0, 0.0);
        let mut position = Vec2::ZERO;
        let mut velocity = Vec2::ZERO;

        for _ in 0..600 {
            position = smooth_damp(position, target, &mut velocity, 0.5, 1.0 / 60.0);
            assert!(position.x <= target.x + 1e-4);
        }

        assert_relative_eq!(position.x, target.x, epsilon = 1e-2);
    }

    #[test]
    fn test_smooth_damp_zero_dt_is_noop() {
        let mut velocity = Vec2::ZERO;
        let start = Vec2::new(3.0, 4.0);
        assert_eq!(smooth_damp(start, Vec2::ZERO, &mut velocity, 0.5, 0.0), start);
    }
}
