//! Input system with action-based mapping
//!
//! Provides an abstraction layer between raw key events and game actions.

use std::collections::{HashMap, HashSet};

use egui::Key;
use glam::Vec2;

/// Game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Move up the screen (W by default)
    MoveUp,
    /// Move down the screen (S by default)
    MoveDown,
    /// Move left (A by default)
    MoveLeft,
    /// Move right (D by default)
    MoveRight,
    /// Pause/unpause (Escape by default)
    Pause,
}

/// Current state of all inputs for a frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Actions currently held down
    pub held: HashSet<InputAction>,
    /// Actions that were just pressed this frame
    pub just_pressed: HashSet<InputAction>,
    /// Actions that were just released this frame
    pub just_released: HashSet<InputAction>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently held
    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn is_just_pressed(&self, action: InputAction) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this frame
    pub fn is_just_released(&self, action: InputAction) -> bool {
        self.just_released.contains(&action)
    }

    /// Raw movement axes from the held set, each component in {-1, 0, 1}.
    /// Opposite keys cancel out.
    pub fn movement_axes(&self) -> Vec2 {
        let mut axes = Vec2::ZERO;
        if self.is_held(InputAction::MoveUp) {
            axes.y -= 1.0;
        }
        if self.is_held(InputAction::MoveDown) {
            axes.y += 1.0;
        }
        if self.is_held(InputAction::MoveLeft) {
            axes.x -= 1.0;
        }
        if self.is_held(InputAction::MoveRight) {
            axes.x += 1.0;
        }
        axes
    }

    /// Clear frame-specific data (call at end of frame)
    pub fn clear_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

/// Maps physical keys to game actions
#[derive(Debug, Clone)]
pub struct InputBindings {
    bindings: HashMap<Key, InputAction>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };

        // Default WASD bindings
        bindings.bind(Key::W, InputAction::MoveUp);
        bindings.bind(Key::S, InputAction::MoveDown);
        bindings.bind(Key::A, InputAction::MoveLeft);
        bindings.bind(Key::D, InputAction::MoveRight);

        // Arrow keys as alternative
        bindings.bind(Key::ArrowUp, InputAction::MoveUp);
        bindings.bind(Key::ArrowDown, InputAction::MoveDown);
        bindings.bind(Key::ArrowLeft, InputAction::MoveLeft);
        bindings.bind(Key::ArrowRight, InputAction::MoveRight);

        bindings.bind(Key::Escape, InputAction::Pause);

        bindings
    }
}

impl InputBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key to an action
    pub fn bind(&mut self, key: Key, action: InputAction) {
        self.bindings.insert(key, action);
    }

    /// Get the action for a key, if any
    pub fn get_key_action(&self, key: Key) -> Option<InputAction> {
        self.bindings.get(&key).copied()
    }
}

/// Input handler that processes raw events and updates state
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Current input state
    pub state: InputState,
    /// Input bindings
    pub bindings: InputBindings,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a keyboard event
    pub fn handle_key(&mut self, key: Key, pressed: bool) {
        let Some(action) = self.bindings.get_key_action(key) else {
            return;
        };
        if pressed {
            if !self.state.held.contains(&action) {
                self.state.just_pressed.insert(action);
            }
            self.state.held.insert(action);
        } else {
            self.state.held.remove(&action);
            self.state.just_released.insert(action);
        }
    }

    /// Drop every held key, e.g. when focus moves to a text field
    pub fn release_all(&mut self) {
        for action in self.state.held.drain() {
            self.state.just_released.insert(action);
        }
    }

    /// Clear frame-specific input data
    pub fn end_frame(&mut self) {
        self.state.clear_frame();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = InputBindings::default();
        assert_eq!(bindings.get_key_action(Key::W), Some(InputAction::MoveUp));
        assert_eq!(bindings.get_key_action(Key::ArrowRight), Some(InputAction::MoveRight));
        assert_eq!(bindings.get_key_action(Key::Escape), Some(InputAction::Pause));
        assert_eq!(bindings.get_key_action(Key::Q), None);
    }

    #[test]
    fn test_key_press_and_release() {
        let mut handler = InputHandler::new();
        handler.handle_key(Key::D, true);
        assert!(handler.state.is_held(InputAction::MoveRight));
        assert!(handler.state.is_just_pressed(InputAction::MoveRight));

        // Key repeat does not re-trigger just_pressed
        handler.end_frame();
        handler.handle_key(Key::D, true);
        assert!(!handler.state.is_just_pressed(InputAction::MoveRight));

        handler.handle_key(Key::D, false);
        assert!(!handler.state.is_held(InputAction::MoveRight));
        assert!(handler.state.is_just_released(InputAction::MoveRight));
    }

    #[test]
    fn test_movement_axes() {
        let mut state = InputState::new();
        assert_eq!(state.movement_axes(), Vec2::ZERO);

        state.held.insert(InputAction::MoveUp);
        state.held.insert(InputAction::MoveLeft);
        assert_eq!(state.movement_axes(), Vec2::new(-1.0, -1.0));

        state.held.insert(InputAction::MoveRight);
        assert_eq!(state.movement_axes(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_release_all() {
        let mut handler = InputHandler::new();
        handler.handle_key(Key::W, true);
        handler.handle_key(Key::A, true);
        handler.release_all();

        assert!(handler.state.held.is_empty());
        assert!(handler.state.is_just_released(InputAction::MoveUp));
    }
}
