// Game configuration
//
// Tunables for the window, the simulation and the gameplay systems. Every
// struct has a `Default` matching the shipped game; scenes and tests override
// single fields with struct update syntax.

use glam::Vec2;
use std::time::Duration;

use crate::engine::physics::{Layer, LayerMask};

/// Top-level configuration
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Window title
    pub title: String,
    /// Initial window size in logical pixels
    pub window_size: (u32, u32),
    /// How many screen pixels one world unit covers
    pub pixels_per_unit: f32,
    /// Fixed simulation step
    pub fixed_timestep: Duration,
    /// Interaction search defaults for actors
    pub interactor: InteractorSettings,
    /// Camera follow tuning
    pub camera: CameraSettings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Rusted Outpost".to_string(),
            window_size: (1280, 720),
            pixels_per_unit: 32.0,
            fixed_timestep: Duration::from_micros(16_667),
            interactor: InteractorSettings::default(),
            camera: CameraSettings::default(),
        }
    }
}

/// How an actor looks for interactables
#[derive(Debug, Clone, Copy)]
pub struct InteractorSettings {
    /// Time between presence scans; also the liveness cadence of interactions
    pub search_cooldown: Duration,
    /// Search radius around the actor (world units)
    pub radius: f32,
    /// Layers considered interactable
    pub mask: LayerMask,
}

/// Default time between presence scans (20 ms)
pub const DEFAULT_SEARCH_COOLDOWN: Duration = Duration::from_millis(20);

impl Default for InteractorSettings {
    fn default() -> Self {
        Self {
            search_cooldown: DEFAULT_SEARCH_COOLDOWN,
            radius: 2.5,
            mask: Layer::Interactable.mask(),
        }
    }
}

/// Camera follow tuning
#[derive(Debug, Clone, Copy)]
pub struct CameraSettings {
    /// Approximate time to reach the target (seconds)
    pub smooth_time: f32,
    /// Point followed, in the target's local space
    pub target_offset: Vec2,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            smooth_time: 0.5,
            target_offset: Vec2::new(0.0, 2.0),
        }
    }
}
