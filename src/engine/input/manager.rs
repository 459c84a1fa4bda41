// Input manager - turns winit events into action state

use super::action::{Action, InputSource};
use super::config::InputConfig;
use super::player::PlayerInput;
use glam::Vec2;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

/// Owns the bindings and the local player's input state
#[derive(Debug)]
pub struct InputManager {
    /// Gameplay bindings
    config: InputConfig,

    /// Bindings that stay active while paused
    global_config: InputConfig,

    /// Input state of the local player
    player: PlayerInput,
}

impl InputManager {
    /// Create an input manager with the default bindings
    pub fn new() -> Self {
        Self::with_config(InputConfig::gameplay())
    }

    /// Create an input manager with custom gameplay bindings
    pub fn with_config(config: InputConfig) -> Self {
        Self {
            config,
            global_config: InputConfig::global(),
            player: PlayerInput::new(),
        }
    }

    /// Resolve a source, gameplay bindings first
    fn action_for(&self, source: InputSource) -> Option<Action> {
        self.config
            .get_action(source)
            .or_else(|| self.global_config.get_action(source))
    }

    fn apply(&mut self, source: InputSource, state: ElementState) {
        if let Some(action) = self.action_for(source) {
            match state {
                ElementState::Pressed => self.player.press(action),
                ElementState::Released => self.player.release(action),
            }
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Key repeats are not new presses
        if event.repeat {
            return;
        }
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.apply(InputSource::key(key_code), event.state);
        }
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.apply(InputSource::mouse(button), state);
    }

    /// Track the cursor (window pixels)
    pub fn process_cursor_moved(&mut self, x: f64, y: f64) {
        self.player.set_cursor(Vec2::new(x as f32, y as f32));
    }

    /// Consume edge state; call after each fixed update
    pub fn update(&mut self) {
        self.player.update();
    }

    /// Check the pause edge, consuming it
    ///
    /// Works while paused, when no fixed update runs to clear edges.
    pub fn take_pause_request(&mut self) -> bool {
        self.player.consume(Action::Pause)
    }

    /// Input state of the local player
    pub fn player(&self) -> &PlayerInput {
        &self.player
    }

    /// Mutable input state of the local player
    pub fn player_mut(&mut self) -> &mut PlayerInput {
        &mut self.player
    }

    /// Gameplay bindings, for remapping
    pub fn config_mut(&mut self) -> &mut InputConfig {
        &mut self.config
    }

    /// Drop all pressed state (e.g. on focus loss)
    pub fn reset(&mut self) {
        self.player.reset();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
