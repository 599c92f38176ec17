//! Per-tick input snapshot.
//!
//! The host samples its input devices however it likes and writes the result
//! here once per frame; the controller only ever reads this component. Edge
//! flags are cleared after each fixed tick so one press fires exactly once
//! even when several fixed ticks run in a single frame.

use bevy::prelude::*;

/// Read-only record of the player's input for one tick.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct InputSnapshot {
    /// Horizontal axis in `[-1, 1]`.
    pub horizontal: f32,
    /// Jump button rising edge this tick.
    pub jump_pressed: bool,
    /// Jump button currently held.
    pub jump_held: bool,
    /// Primary dash button rising edge this tick.
    pub dash_primary_pressed: bool,
    /// Secondary dash button rising edge this tick.
    pub dash_secondary_pressed: bool,
}

impl InputSnapshot {
    /// Set the horizontal axis, clamped to `[-1, 1]`.
    pub fn set_horizontal(&mut self, axis: f32) {
        self.horizontal = axis.clamp(-1.0, 1.0);
    }

    /// Record a jump press (edge and hold).
    pub fn press_jump(&mut self) {
        self.jump_pressed = true;
        self.jump_held = true;
    }

    /// Record the jump button being released.
    pub fn release_jump(&mut self) {
        self.jump_held = false;
    }

    /// Record a press of either dash button.
    pub fn press_dash(&mut self) {
        self.dash_primary_pressed = true;
    }

    /// Whether any dash button saw a rising edge this tick.
    pub fn dash_pressed(&self) -> bool {
        self.dash_primary_pressed || self.dash_secondary_pressed
    }

    /// Clear the edge flags. Hold state is left alone.
    pub fn clear_edges(&mut self) {
        self.jump_pressed = false;
        self.dash_primary_pressed = false;
        self.dash_secondary_pressed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_is_clamped() {
        let mut input = InputSnapshot::default();
        input.set_horizontal(3.0);
        assert_eq!(input.horizontal, 1.0);
        input.set_horizontal(-3.0);
        assert_eq!(input.horizontal, -1.0);
        input.set_horizontal(0.4);
        assert_eq!(input.horizontal, 0.4);
    }

    #[test]
    fn either_dash_button_counts() {
        let mut input = InputSnapshot::default();
        assert!(!input.dash_pressed());

        input.dash_primary_pressed = true;
        assert!(input.dash_pressed());

        input.clear_edges();
        input.dash_secondary_pressed = true;
        assert!(input.dash_pressed());
    }

    #[test]
    fn clear_edges_keeps_hold_state() {
        let mut input = InputSnapshot::default();
        input.press_jump();
        input.press_dash();

        input.clear_edges();

        assert!(!input.jump_pressed);
        assert!(!input.dash_pressed());
        assert!(input.jump_held);
    }
}
