// Gameplay
//
// Animation playback and the interaction protocol are the core; characters,
// items, the camera and scene setup sit on top of them. `World` owns all of
// it and advances it one fixed step at a time.

pub mod animation;
pub mod camera;
pub mod characters;
pub mod config;
pub mod interaction;
pub mod items;
pub mod scene;
pub mod world;

pub use config::GameConfig;
pub use world::{World, WorldError};
