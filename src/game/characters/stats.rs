// Character movement stats

/// How a character turns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationMode {
    /// Face an explicit point (e.g. the mouse cursor)
    ToTarget,
    /// Face the direction of movement
    ToMovement,
}

/// Movement tuning of a character
#[derive(Debug, Clone, Copy)]
pub struct MovementStats {
    /// Maximum velocity (units/second)
    pub max_velocity: f32,
    /// Velocity gained per fixed step while accelerating
    pub acceleration: f32,
    /// Velocity lost per fixed step while stopping
    pub deceleration: f32,
    /// Fraction of the remaining turn applied per step when lerping
    pub rotation_speed: f32,
    /// Lerp towards the desired rotation instead of snapping
    pub lerp_rotation: bool,
    pub rotation_mode: RotationMode,
    /// Collider radius in world units
    pub radius: f32,
}

/// Stats shared by every character unless a scene overrides them
pub const BASE_STATS: MovementStats = MovementStats {
    max_velocity: 6.0,
    acceleration: 0.2,
    deceleration: 0.2,
    rotation_speed: 1.0,
    lerp_rotation: false,
    rotation_mode: RotationMode::ToMovement,
    radius: 0.4,
};

impl Default for MovementStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl MovementStats {
    /// Stats of a character aiming at the cursor
    pub fn aiming() -> Self {
        Self {
            rotation_mode: RotationMode::ToTarget,
            ..BASE_STATS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats() {
        let stats = MovementStats::default();
        assert_eq!(stats.max_velocity, 6.0);
        assert_eq!(stats.acceleration, 0.2);
        assert_eq!(stats.deceleration, 0.2);
        assert!(!stats.lerp_rotation);
        assert_eq!(stats.rotation_mode, RotationMode::ToMovement);
    }

    #[test]
    fn test_aiming_only_changes_rotation_mode() {
        let stats = MovementStats::aiming();
        assert_eq!(stats.rotation_mode, RotationMode::ToTarget);
        assert_eq!(stats.max_velocity, BASE_STATS.max_velocity);
    }
}
