//! Keyboard input
//!
//! Action-based input over macroquad key polling. Gameplay code never sees
//! key codes: the scene consumes a plain `FrameInput` snapshot taken once
//! per frame, which also keeps the update path testable without a window.

use macroquad::prelude::*;

/// All game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement (arrow keys)
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,

    // Combat
    Attack, // A
    Block,  // Space (held)
    Cast,   // Q (mage only)

    // Toggles / system
    Run,     // R - run toggle
    Switch,  // E - swap active hero
    Restart, // N - restart is host-driven, key reserved
}

impl Action {
    fn key(self) -> KeyCode {
        match self {
            Action::MoveLeft => KeyCode::Left,
            Action::MoveRight => KeyCode::Right,
            Action::MoveUp => KeyCode::Up,
            Action::MoveDown => KeyCode::Down,
            Action::Attack => KeyCode::A,
            Action::Block => KeyCode::Space,
            Action::Cast => KeyCode::Q,
            Action::Run => KeyCode::R,
            Action::Switch => KeyCode::E,
            Action::Restart => KeyCode::N,
        }
    }
}

/// Polls the keyboard and produces per-frame input snapshots
pub struct InputState;

impl InputState {
    pub fn new() -> Self {
        Self
    }

    /// Check if action is currently held down
    pub fn action_down(&self, action: Action) -> bool {
        is_key_down(action.key())
    }

    /// Check if action was just pressed this frame (edge, not held)
    pub fn action_pressed(&self, action: Action) -> bool {
        is_key_pressed(action.key())
    }

    /// Capture this frame's input as plain data
    pub fn snapshot(&self) -> FrameInput {
        FrameInput {
            left: self.action_down(Action::MoveLeft),
            right: self.action_down(Action::MoveRight),
            up: self.action_down(Action::MoveUp),
            down: self.action_down(Action::MoveDown),
            attack_pressed: self.action_pressed(Action::Attack),
            block_down: self.action_down(Action::Block),
            run_pressed: self.action_pressed(Action::Run),
            cast_pressed: self.action_pressed(Action::Cast),
            switch_pressed: self.action_pressed(Action::Switch),
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// One frame of input, decoupled from the keyboard
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub attack_pressed: bool,
    pub block_down: bool,
    pub run_pressed: bool,
    pub cast_pressed: bool,
    pub switch_pressed: bool,
}

impl FrameInput {
    /// Horizontal movement axis: -1 left, +1 right, 0 none/both
    pub fn move_x(&self) -> f32 {
        (self.right as i8 - self.left as i8) as f32
    }

    /// Vertical movement axis: -1 up, +1 down
    pub fn move_y(&self) -> f32 {
        (self.down as i8 - self.up as i8) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_axes() {
        let mut input = FrameInput::default();
        assert_eq!(input.move_x(), 0.0);

        input.left = true;
        assert_eq!(input.move_x(), -1.0);

        input.right = true;
        assert_eq!(input.move_x(), 0.0); // both held cancel out

        input.up = true;
        assert_eq!(input.move_y(), -1.0);
    }
}
