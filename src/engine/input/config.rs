// Input configuration and remapping

use super::action::{default_bindings, global_bindings, Action, InputSource};
use std::collections::HashMap;

/// Maps input sources (keys/buttons) to game actions
#[derive(Debug, Clone, Default)]
pub struct InputConfig {
    /// Mapping from input sources to actions
    bindings: HashMap<InputSource, Action>,

    /// Reverse mapping for quick lookups (action -> all sources)
    action_to_sources: HashMap<Action, Vec<InputSource>>,
}

impl InputConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration from a list of bindings
    pub fn from_bindings(bindings: Vec<(InputSource, Action)>) -> Self {
        let mut config = Self::new();
        for (source, action) in bindings {
            config.bind(source, action);
        }
        config
    }

    /// Default gameplay bindings
    pub fn gameplay() -> Self {
        Self::from_bindings(default_bindings())
    }

    /// Bindings that work while paused
    pub fn global() -> Self {
        Self::from_bindings(global_bindings())
    }

    /// Bind an input source to an action, replacing its previous binding
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.unbind_source(source);
        self.bindings.insert(source, action);
        self.action_to_sources.entry(action).or_default().push(source);
    }

    /// Unbind an input source
    pub fn unbind_source(&mut self, source: InputSource) {
        if let Some(action) = self.bindings.remove(&source) {
            if let Some(sources) = self.action_to_sources.get_mut(&action) {
                sources.retain(|s| *s != source);
                if sources.is_empty() {
                    self.action_to_sources.remove(&action);
                }
            }
        }
    }

    /// Get the action bound to an input source
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    /// Get all input sources bound to an action
    pub fn get_sources(&self, action: Action) -> Vec<InputSource> {
        self.action_to_sources
            .get(&action)
            .cloned()
            .unwrap_or_default()
    }

    /// Check if an action has any bindings
    pub fn has_binding(&self, action: Action) -> bool {
        self.action_to_sources.contains_key(&action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::MouseButton;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_bind_action() {
        let mut config = InputConfig::new();
        let source = InputSource::key(KeyCode::KeyF);
        config.bind(source, Action::Interact);

        assert_eq!(config.get_action(source), Some(Action::Interact));
    }

    #[test]
    fn test_rebind_source() {
        let mut config = InputConfig::new();
        let source = InputSource::key(KeyCode::KeyF);

        config.bind(source, Action::Interact);
        config.bind(source, Action::Reload);

        assert_eq!(config.get_action(source), Some(Action::Reload));
        assert!(!config.has_binding(Action::Interact));
    }

    #[test]
    fn test_unbind_source() {
        let mut config = InputConfig::gameplay();
        let source = InputSource::mouse(MouseButton::Left);
        config.unbind_source(source);

        assert_eq!(config.get_action(source), None);
        assert!(!config.has_binding(Action::Fire));
    }

    #[test]
    fn test_multiple_sources_per_action() {
        let config = InputConfig::gameplay();
        let sources = config.get_sources(Action::MoveUp);
        assert!(sources.contains(&InputSource::key(KeyCode::KeyW)));
        assert!(sources.contains(&InputSource::key(KeyCode::ArrowUp)));
    }

    #[test]
    fn test_global_has_pause() {
        let config = InputConfig::global();
        assert_eq!(
            config.get_action(InputSource::key(KeyCode::Escape)),
            Some(Action::Pause)
        );
    }
}
