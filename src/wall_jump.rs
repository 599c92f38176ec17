//! Wall-jump ability state machine.
//!
//! A wall jump pairs a one-time vertical impulse with a horizontal push-off
//! ramped over several ticks. The ramp is not a blocking wait: the machine is
//! advanced exactly once per tick from the motion step and coexists with the
//! rest of the update (gravity shaping keeps running underneath it).

use bevy::math::FloatExt;
use bevy::prelude::*;

/// Phase of the wall-jump machine.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WallJumpPhase {
    #[default]
    Idle,
    Active,
}

/// Per-character wall-jump state.
///
/// Active for exactly one contiguous span of ticks per activation, bounded by
/// `elapsed` in `[0, push_off_period]`. The vertical impulse is applied once
/// per activation, on the first advanced tick, never again during the span.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct WallJumpState {
    /// Current phase.
    pub phase: WallJumpPhase,
    /// Time since activation (counts up to the push-off period).
    pub elapsed: f32,
    /// Horizontal push-off distance, signed away from the wall.
    pub push_off_target: f32,
    /// Vertical velocity set once at the start of the span.
    pub jump_impulse: f32,
    impulse_pending: bool,
}

impl WallJumpState {
    /// Arm the machine for a new push-off span.
    ///
    /// Re-activating while already active restarts the span from zero.
    pub fn activate(&mut self, push_off_target: f32, jump_impulse: f32) {
        self.phase = WallJumpPhase::Active;
        self.elapsed = 0.0;
        self.push_off_target = push_off_target;
        self.jump_impulse = jump_impulse;
        self.impulse_pending = true;
        debug!("wall jump armed, push-off target {}", push_off_target);
    }

    /// Advance the machine by one tick.
    ///
    /// While active, overrides the horizontal velocity with the ramped
    /// push-off and, on the first advanced tick only, sets the vertical
    /// velocity to the jump impulse. Depth velocity is never touched. Returns
    /// the velocity unchanged once idle.
    ///
    /// A non-positive push-off period collapses the ramp into a single
    /// full-strength tick.
    pub fn advance(&mut self, mut velocity: Vec3, dt: f32, push_off_period: f32) -> Vec3 {
        if self.phase != WallJumpPhase::Active {
            return velocity;
        }

        self.elapsed += dt;
        let fraction = (self.elapsed / push_off_period).clamp(0.0, 1.0);
        velocity.x = 0.0f32.lerp(self.push_off_target, fraction);

        if self.impulse_pending {
            velocity.y = self.jump_impulse;
            self.impulse_pending = false;
        }

        if self.elapsed >= push_off_period {
            self.phase = WallJumpPhase::Idle;
        }
        velocity
    }

    /// Whether a push-off span is currently running.
    pub fn is_wall_jumping(&self) -> bool {
        self.phase == WallJumpPhase::Active
    }
}
