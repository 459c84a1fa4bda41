// Character movement and facing

use glam::Vec2;

use super::stats::{MovementStats, RotationMode};
use crate::core::math::{angle_of, lerp_angle, move_towards};

/// Turns a desired direction into body velocity and facing
#[derive(Debug, Clone)]
pub struct CharacterController {
    stats: MovementStats,
    /// Normalized movement direction
    move_direction: Vec2,
    /// Target velocity (`move_direction * max_velocity`)
    move_speed: Vec2,
    /// Point to face in `ToTarget` mode
    rotation_target: Option<Vec2>,
}

impl CharacterController {
    pub fn new(stats: MovementStats) -> Self {
        Self {
            stats,
            move_direction: Vec2::ZERO,
            move_speed: Vec2::ZERO,
            rotation_target: None,
        }
    }

    /// Set the desired movement direction; it is normalized
    pub fn set_move_direction(&mut self, direction: Vec2) {
        let direction = direction.normalize_or_zero();
        if direction == self.move_direction {
            return;
        }
        self.move_direction = direction;
        self.move_speed = direction * self.stats.max_velocity;
    }

    /// Point to face in `ToTarget` mode
    pub fn set_rotation_target(&mut self, target: Option<Vec2>) {
        self.rotation_target = target;
    }

    pub fn move_direction(&self) -> Vec2 {
        self.move_direction
    }

    pub fn move_speed(&self) -> Vec2 {
        self.move_speed
    }

    /// Check if the character wants to move
    pub fn is_moving(&self) -> bool {
        self.move_speed != Vec2::ZERO
    }

    pub fn stats(&self) -> &MovementStats {
        &self.stats
    }

    /// Body velocity after one fixed step
    pub fn next_velocity(&self, current: Vec2) -> Vec2 {
        if self.move_direction != Vec2::ZERO {
            if current.length() < self.stats.max_velocity {
                move_towards(current, self.move_speed, self.stats.acceleration)
            } else {
                self.move_speed
            }
        } else if current.length() > 0.0 {
            move_towards(current, Vec2::ZERO, self.stats.deceleration)
        } else {
            current
        }
    }

    /// Facing after one fixed step, for a character at `position`
    pub fn next_rotation(&self, position: Vec2, current: f32) -> f32 {
        let desired = match self.stats.rotation_mode {
            RotationMode::ToMovement if self.is_moving() => angle_of(self.move_speed),
            RotationMode::ToTarget => match self.rotation_target {
                Some(target) if target != position => angle_of(target - position),
                _ => return current,
            },
            RotationMode::ToMovement => return current,
        };

        if self.stats.lerp_rotation {
            lerp_angle(current, desired, self.stats.rotation_speed)
        } else {
            desired
        }
    }
}
