// Game action definitions and mappings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement (top-down, four directions)
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,

    // Object interaction: tap to pick up / drop, hold to keep using
    Interact,

    // Weapon handling
    Fire,
    Reload,

    // Meta actions
    Pause,
}

/// Represents an input source (keyboard key or mouse button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    /// Create a mouse button input source
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Default keyboard/mouse bindings
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        // Movement (WASD plus arrows)
        (InputSource::key(KeyCode::KeyW), Action::MoveUp),
        (InputSource::key(KeyCode::KeyS), Action::MoveDown),
        (InputSource::key(KeyCode::KeyA), Action::MoveLeft),
        (InputSource::key(KeyCode::KeyD), Action::MoveRight),
        (InputSource::key(KeyCode::ArrowUp), Action::MoveUp),
        (InputSource::key(KeyCode::ArrowDown), Action::MoveDown),
        (InputSource::key(KeyCode::ArrowLeft), Action::MoveLeft),
        (InputSource::key(KeyCode::ArrowRight), Action::MoveRight),
        // Interaction and weapons
        (InputSource::key(KeyCode::KeyE), Action::Interact),
        (InputSource::mouse(MouseButton::Left), Action::Fire),
        (InputSource::key(KeyCode::KeyR), Action::Reload),
    ]
}

/// Bindings that stay active while the game is paused
pub fn global_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::Escape), Action::Pause),
        (InputSource::key(KeyCode::KeyP), Action::Pause),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_input_source_creation() {
        assert_eq!(
            InputSource::key(KeyCode::KeyE),
            InputSource::Keyboard(KeyCode::KeyE)
        );
        assert_eq!(
            InputSource::mouse(MouseButton::Left),
            InputSource::Mouse(MouseButton::Left)
        );
    }

    #[test]
    fn test_default_bindings_cover_gameplay_actions() {
        let bound: HashSet<Action> = default_bindings().into_iter().map(|(_, a)| a).collect();
        for action in [
            Action::MoveUp,
            Action::MoveDown,
            Action::MoveLeft,
            Action::MoveRight,
            Action::Interact,
            Action::Fire,
            Action::Reload,
        ] {
            assert!(bound.contains(&action), "{:?} has no default binding", action);
        }
    }

    #[test]
    fn test_fire_uses_left_mouse() {
        let fire = default_bindings()
            .into_iter()
            .find(|(_, action)| *action == Action::Fire);
        assert!(matches!(fire, Some((InputSource::Mouse(MouseButton::Left), _))));
    }

    #[test]
    fn test_no_duplicate_sources() {
        let mut seen = HashSet::new();
        for (source, _) in default_bindings().into_iter().chain(global_bindings()) {
            assert!(seen.insert(source), "Duplicate input source {:?}", source);
        }
    }
}
