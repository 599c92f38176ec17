//! Dash ability state.
//!
//! A dash is a short, cooldown-gated override of the body's velocity along a
//! direction captured at dash start. While a dash is running it owns the
//! velocity outright; gravity shaping and horizontal movement stand aside.

use bevy::prelude::*;

/// Floor applied to the configured dash duration when sizing the dash
/// velocity, so a zero or negative duration degrades to a one-tick burst
/// instead of a division by zero.
pub const MIN_DASH_DURATION: f32 = 0.001;

/// Per-character dash state.
///
/// Invariants, re-established every tick:
/// - `is_dashing` implies `dash_timer > 0`
/// - `can_dash == (time_since_last_dash >= dash_cooldown)`
/// - a dash cannot be restarted while `is_dashing` is true
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
pub struct DashState {
    /// A dash is currently in progress.
    pub is_dashing: bool,
    /// The cooldown has elapsed and a new dash may start.
    pub can_dash: bool,
    /// Time remaining in the current dash (counts down).
    pub dash_timer: f32,
    /// Time since the last dash started (counts up).
    pub time_since_last_dash: f32,
    /// Direction captured at dash start, scaled by the dash distance and
    /// frozen for the dash's duration.
    pub dash_direction: Vec3,
}

impl Default for DashState {
    fn default() -> Self {
        Self {
            is_dashing: false,
            can_dash: true,
            dash_timer: 0.0,
            // Saturated so the first dash is available immediately after spawn
            time_since_last_dash: f32::INFINITY,
            dash_direction: Vec3::ZERO,
        }
    }
}

impl DashState {
    /// Begin a dash, capturing the direction from the horizontal input axis.
    ///
    /// A zero axis captures a zero direction: the character holds position
    /// for the dash's duration. The caller zeroes the working velocity.
    pub fn start(&mut self, horizontal_axis: f32, dash_distance: f32, dash_duration: f32) {
        self.is_dashing = true;
        self.dash_timer = dash_duration.max(MIN_DASH_DURATION);
        self.dash_direction = Vec3::new(horizontal_axis, 0.0, 0.0).normalize_or_zero() * dash_distance;
        self.time_since_last_dash = 0.0;
        self.can_dash = false;
        debug!("dash started, direction {:?}", self.dash_direction);
    }

    /// Advance a running dash by `dt`.
    ///
    /// Returns the dash velocity for this tick, or `None` once the timer has
    /// run out (in which case no velocity is written and the dash ends).
    pub fn advance(&mut self, dt: f32, dash_duration: f32) -> Option<Vec3> {
        self.dash_timer -= dt;
        if self.dash_timer <= 0.0 {
            self.is_dashing = false;
            return None;
        }
        // Constant velocity sized so the full dash covers dash_distance
        Some(self.dash_direction / dash_duration.max(MIN_DASH_DURATION))
    }

    /// Advance the cooldown clock and re-derive `can_dash`. Runs every tick,
    /// dashing or not.
    pub fn tick_cooldown(&mut self, dt: f32, dash_cooldown: f32) {
        self.time_since_last_dash += dt;
        self.can_dash = self.time_since_last_dash >= dash_cooldown;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_at_spawn() {
        let dash = DashState::default();
        assert!(dash.can_dash);
        assert!(!dash.is_dashing);
    }

    #[test]
    fn start_captures_normalized_direction() {
        let mut dash = DashState::default();
        dash.start(0.5, 15.0, 0.2);

        assert!(dash.is_dashing);
        assert!(!dash.can_dash);
        assert_eq!(dash.time_since_last_dash, 0.0);
        // Any non-zero axis normalizes to a unit direction before scaling
        assert_eq!(dash.dash_direction, Vec3::new(15.0, 0.0, 0.0));
    }

    #[test]
    fn zero_axis_captures_zero_direction() {
        let mut dash = DashState::default();
        dash.start(0.0, 15.0, 0.2);

        assert_eq!(dash.dash_direction, Vec3::ZERO);
        // The dash still runs; it just writes a zero velocity
        assert_eq!(dash.advance(0.05, 0.2), Some(Vec3::ZERO));
    }

    #[test]
    fn advance_holds_constant_velocity_until_expiry() {
        let mut dash = DashState::default();
        dash.start(1.0, 15.0, 0.2);

        for _ in 0..3 {
            assert_eq!(dash.advance(0.05, 0.2), Some(Vec3::new(75.0, 0.0, 0.0)));
        }
        // Fourth advance exhausts the timer: no write, dash over
        assert_eq!(dash.advance(0.05, 0.2), None);
        assert!(!dash.is_dashing);
    }

    #[test]
    fn cooldown_rederives_can_dash_every_tick() {
        let mut dash = DashState::default();
        dash.start(1.0, 15.0, 0.2);

        dash.tick_cooldown(0.5, 2.0);
        assert!(!dash.can_dash);
        dash.tick_cooldown(1.0, 2.0);
        assert!(!dash.can_dash);
        dash.tick_cooldown(0.5, 2.0);
        assert!(dash.can_dash);
        assert_eq!(dash.time_since_last_dash, 2.0);
    }

    #[test]
    fn degenerate_duration_is_floored() {
        let mut dash = DashState::default();
        dash.start(1.0, 15.0, 0.0);

        // One finite burst rather than a divide by zero
        let velocity = dash.advance(0.0, 0.0);
        assert!(velocity.is_none() || velocity.unwrap().is_finite());

        let mut dash = DashState::default();
        dash.start(-1.0, 15.0, 0.0);
        assert!(dash.dash_timer > 0.0);
    }
}
