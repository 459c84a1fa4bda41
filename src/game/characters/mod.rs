// Character system
//
// This module contains everything related to characters:
// - Character data structure
// - Movement stats and the controller turning input into velocity and facing
// - Animator switching the animated parts between idle and walk
// - Carrier handling pickup, drop and held interactions

pub mod animator;
pub mod carrier;
pub mod character;
pub mod controller;
pub mod stats;

// Re-export commonly used types
pub use animator::{CharacterAnimator, IDLE_CLIP, WALK_CLIP};
pub use carrier::Carrier;
pub use character::Character;
pub use controller::CharacterController;
pub use stats::{MovementStats, RotationMode, BASE_STATS};
