// Input handling system
//
// - `action`: game actions and default bindings
// - `config`: remappable source -> action bindings
// - `player`: edge/level state of the local player, exposed through `ButtonState`
// - `manager`: feeds winit events into the player state

pub mod action;
pub mod config;
pub mod manager;
pub mod player;

pub use action::{Action, InputSource};
pub use config::InputConfig;
pub use manager::InputManager;
pub use player::{ButtonState, PlayerInput};
