// Player input state

use super::action::Action;
use glam::Vec2;
use std::collections::HashSet;

/// Edge/level view of the control buttons, as consumed by gameplay code
///
/// "Down" is true only on the step the button went down; "held" stays true
/// for as long as it is pressed.
pub trait ButtonState {
    /// Button went down since the last step
    fn is_button_down(&self, action: Action) -> bool;

    /// Button is currently pressed
    fn is_button_held(&self, action: Action) -> bool;

    /// Movement direction, normalized (zero when idle)
    fn movement(&self) -> Vec2 {
        let mut direction = Vec2::ZERO;
        if self.is_button_held(Action::MoveLeft) {
            direction.x -= 1.0;
        }
        if self.is_button_held(Action::MoveRight) {
            direction.x += 1.0;
        }
        if self.is_button_held(Action::MoveDown) {
            direction.y -= 1.0;
        }
        if self.is_button_held(Action::MoveUp) {
            direction.y += 1.0;
        }
        direction.normalize_or_zero()
    }
}

/// Input state of the local player
#[derive(Debug, Default)]
pub struct PlayerInput {
    /// Actions that are currently pressed
    pressed: HashSet<Action>,

    /// Actions that were pressed since the last step
    just_pressed: HashSet<Action>,

    /// Actions that were released since the last step
    just_released: HashSet<Action>,

    /// Cursor position in window pixels
    cursor: Option<Vec2>,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was just pressed
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Last known cursor position in window pixels
    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }

    /// Register an action press
    pub(crate) fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub(crate) fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Take the press edge of one action. Returns true if it was pending.
    pub(crate) fn consume(&mut self, action: Action) -> bool {
        self.just_pressed.remove(&action)
    }

    pub(crate) fn set_cursor(&mut self, position: Vec2) {
        self.cursor = Some(position);
    }

    /// Clear edge state; call once after every fixed update consumed it
    pub(crate) fn update(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Reset all input state (focus lost)
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

impl ButtonState for PlayerInput {
    fn is_button_down(&self, action: Action) -> bool {
        self.just_pressed(action)
    }

    fn is_button_held(&self, action: Action) -> bool {
        self.is_pressed(action)
    }
}
