//! The per-tick motion step.
//!
//! One velocity accumulator is threaded through a fixed sequence of phases:
//! horizontal movement, jump initiation, gravity shaping, the dash tick, the
//! wall-slide clamp, and the wall-jump advance. Each phase takes the
//! accumulator and returns the updated value, so the execution order is
//! explicit here rather than spread across systems. The caller reads the
//! body's velocity before the step and writes the result back after it.

use bevy::prelude::*;

use crate::config::MotionConfig;
use crate::dash::DashState;
use crate::input::InputSnapshot;
use crate::state::{CharacterState, Facing};
use crate::wall_jump::WallJumpState;

/// Run one full motion tick and return the velocity to write to the body.
pub fn step(
    config: &MotionConfig,
    input: &InputSnapshot,
    character: &mut CharacterState,
    dash: &mut DashState,
    wall_jump: &mut WallJumpState,
    dt: f32,
    velocity: Vec3,
) -> Vec3 {
    let velocity = apply_horizontal(config, input, character, dash, velocity);
    let velocity = initiate_jump(config, input, character, wall_jump, velocity);
    let velocity = shape_gravity(config, input, velocity, dt);
    let velocity = tick_dash(config, input, dash, velocity, dt);
    let velocity = clamp_wall_slide(config, character, velocity);
    // Runs after the clamp so the span's lerp is what the body actually gets
    wall_jump.advance(velocity, dt, config.wall_jump_push_off_time)
}

/// Horizontal movement from the input axis. A running dash owns the velocity,
/// so this phase steps aside entirely while dashing.
fn apply_horizontal(
    config: &MotionConfig,
    input: &InputSnapshot,
    character: &mut CharacterState,
    dash: &DashState,
    mut velocity: Vec3,
) -> Vec3 {
    if dash.is_dashing {
        return velocity;
    }
    velocity.x = input.horizontal * config.speed;
    if input.horizontal > 0.0 {
        character.facing = Facing::Right;
    } else if input.horizontal < 0.0 {
        character.facing = Facing::Left;
    }
    velocity
}

/// Jump initiation on the button's rising edge, permitted while grounded or
/// wall-touching. Off a wall (and only a wall) the jump is delegated to the
/// wall-jump machine; otherwise the vertical velocity is set outright.
fn initiate_jump(
    config: &MotionConfig,
    input: &InputSnapshot,
    character: &mut CharacterState,
    wall_jump: &mut WallJumpState,
    mut velocity: Vec3,
) -> Vec3 {
    if !input.jump_pressed || !(character.is_grounded || character.is_touching_wall) {
        return velocity;
    }

    if character.is_touching_wall && !character.is_grounded {
        // Push off away from the current facing
        wall_jump.activate(
            -character.facing.sign() * config.wall_jump_push_off_distance,
            config.jump_force,
        );
    } else {
        velocity.y = config.jump_force;
    }

    character.is_grounded = false;
    character.jump_count += 1;
    velocity
}

/// Gravity shaping: descents fall faster, early-released jumps end sooner.
/// At most one branch fires per tick; neither fires at exactly zero vertical
/// velocity.
fn shape_gravity(config: &MotionConfig, input: &InputSnapshot, mut velocity: Vec3, dt: f32) -> Vec3 {
    if velocity.y < 0.0 {
        velocity.y += config.gravity * (config.fall_multiplier - 1.0) * dt;
    } else if velocity.y > 0.0 && !input.jump_held {
        velocity.y += config.gravity * (config.low_jump_multiplier - 1.0) * dt;
    }
    velocity
}

/// Dash start/continue, mutually exclusive within one tick. The cooldown
/// clock advances unconditionally afterwards, and `can_dash` is re-derived
/// from it.
fn tick_dash(
    config: &MotionConfig,
    input: &InputSnapshot,
    dash: &mut DashState,
    mut velocity: Vec3,
    dt: f32,
) -> Vec3 {
    if input.dash_pressed()
        && dash.can_dash
        && dash.time_since_last_dash >= config.dash_cooldown
        && !dash.is_dashing
    {
        dash.start(input.horizontal, config.dash_distance, config.dash_duration);
        velocity = Vec3::ZERO;
    } else if dash.is_dashing {
        if let Some(dash_velocity) = dash.advance(dt, config.dash_duration) {
            velocity = dash_velocity;
        }
    }
    dash.tick_cooldown(dt, config.dash_cooldown);
    velocity
}

/// Clamp the descent while sliding on a wall. Applies every tick the wall
/// contact holds, whatever the other abilities did earlier in the tick.
fn clamp_wall_slide(config: &MotionConfig, character: &CharacterState, mut velocity: Vec3) -> Vec3 {
    if character.is_touching_wall && !character.is_grounded {
        velocity.y = velocity.y.max(-config.wall_slide_speed);
    }
    velocity
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.05;

    struct Rig {
        config: MotionConfig,
        input: InputSnapshot,
        character: CharacterState,
        dash: DashState,
        wall_jump: WallJumpState,
        velocity: Vec3,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                config: MotionConfig::default(),
                input: InputSnapshot::default(),
                character: CharacterState::default(),
                dash: DashState::default(),
                wall_jump: WallJumpState::default(),
                velocity: Vec3::ZERO,
            }
        }

        fn tick(&mut self) -> Vec3 {
            self.velocity = step(
                &self.config,
                &self.input,
                &mut self.character,
                &mut self.dash,
                &mut self.wall_jump,
                DT,
                self.velocity,
            );
            // Edges are one-tick signals, like the plugin's post-tick clear
            self.input.clear_edges();
            self.velocity
        }
    }

    #[test]
    fn grounded_run_reaches_full_speed_in_one_tick() {
        let mut rig = Rig::new();
        rig.character.is_grounded = true;
        rig.input.set_horizontal(1.0);

        let velocity = rig.tick();
        assert_eq!(velocity, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn ground_jump_is_a_flat_impulse() {
        let mut rig = Rig::new();
        rig.character.is_grounded = true;
        rig.input.press_jump();

        let velocity = rig.tick();
        assert_eq!(velocity.y, 7.0);
        assert!(!rig.character.is_grounded);
        assert_eq!(rig.character.jump_count, 1);
    }

    #[test]
    fn jump_denied_in_the_air() {
        let mut rig = Rig::new();
        rig.input.press_jump();

        let velocity = rig.tick();
        assert_eq!(velocity.y, 0.0);
        assert_eq!(rig.character.jump_count, 0);
    }

    #[test]
    fn grounded_against_wall_jumps_straight_up() {
        // Ground takes precedence over the wall when both contacts hold
        let mut rig = Rig::new();
        rig.character.is_grounded = true;
        rig.character.is_touching_wall = true;
        rig.input.press_jump();

        let velocity = rig.tick();
        assert_eq!(velocity.y, 7.0);
        assert!(!rig.wall_jump.is_wall_jumping());
    }

    #[test]
    fn facing_follows_input_sign_and_is_retained_at_zero() {
        let mut rig = Rig::new();
        rig.input.set_horizontal(-0.3);
        rig.tick();
        assert_eq!(rig.character.facing, Facing::Left);

        rig.input.set_horizontal(0.0);
        rig.tick();
        assert_eq!(rig.character.facing, Facing::Left);

        rig.input.set_horizontal(0.8);
        rig.tick();
        assert_eq!(rig.character.facing, Facing::Right);
    }

    #[test]
    fn fall_multiplier_accelerates_descent() {
        let mut rig = Rig::new();
        rig.velocity = Vec3::new(0.0, -1.0, 0.0);

        let velocity = rig.tick();
        let expected = -1.0 + rig.config.gravity * (rig.config.fall_multiplier - 1.0) * DT;
        assert!((velocity.y - expected).abs() < 1e-6);
    }

    #[test]
    fn low_jump_multiplier_fires_only_when_button_released() {
        let mut rig = Rig::new();
        rig.velocity = Vec3::new(0.0, 3.0, 0.0);
        rig.input.jump_held = true;

        // Held: neither branch
        assert_eq!(rig.tick().y, 3.0);

        // Released: low-jump branch only
        rig.input.jump_held = false;
        let expected = 3.0 + rig.config.gravity * (rig.config.low_jump_multiplier - 1.0) * DT;
        assert!((rig.tick().y - expected).abs() < 1e-6);
    }

    #[test]
    fn gravity_branches_are_mutually_exclusive_at_zero() {
        let mut rig = Rig::new();
        rig.velocity = Vec3::ZERO;
        rig.input.jump_held = false;

        assert_eq!(rig.tick().y, 0.0);
    }

    #[test]
    fn wall_slide_clamps_descent_speed() {
        let mut rig = Rig::new();
        rig.character.is_touching_wall = true;
        rig.velocity = Vec3::new(0.0, -10.0, 0.0);

        let velocity = rig.tick();
        assert_eq!(velocity.y, -2.0);
    }

    #[test]
    fn wall_slide_does_not_clamp_while_grounded() {
        let mut rig = Rig::new();
        rig.character.is_grounded = true;
        rig.character.is_touching_wall = true;
        rig.velocity = Vec3::new(0.0, -10.0, 0.0);

        let velocity = rig.tick();
        assert!(velocity.y < -2.0);
    }

    #[test]
    fn dash_start_zeroes_velocity_and_owns_the_next_ticks() {
        let mut rig = Rig::new();
        rig.character.is_grounded = true;
        rig.input.set_horizontal(1.0);
        rig.input.press_dash();

        // Start tick: velocity reset, no dash write yet
        assert_eq!(rig.tick(), Vec3::ZERO);
        assert!(rig.dash.is_dashing);

        // Following ticks: constant dash velocity, horizontal input ignored
        rig.input.set_horizontal(-1.0);
        assert_eq!(rig.tick(), Vec3::new(75.0, 0.0, 0.0));
        assert_eq!(rig.tick(), Vec3::new(75.0, 0.0, 0.0));
    }

    #[test]
    fn dash_covers_its_distance_within_one_tick_of_error() {
        let mut rig = Rig::new();
        rig.config = rig.config.with_gravity(0.0);
        rig.input.set_horizontal(1.0);
        rig.input.press_dash();

        // Start tick plus the 0.2s span at 0.05s ticks
        let mut displacement = 0.0;
        for _ in 0..5 {
            let velocity = rig.tick();
            displacement += velocity.x * DT;
        }

        assert!(!rig.dash.is_dashing);
        assert!(
            (displacement - rig.config.dash_distance).abs() < 1e-3,
            "dash covered {displacement}, expected {}",
            rig.config.dash_distance
        );
    }

    #[test]
    fn dash_rejected_during_cooldown_and_accepted_after() {
        let mut rig = Rig::new();
        rig.input.set_horizontal(1.0);
        rig.input.press_dash();
        rig.tick();
        assert!(rig.dash.is_dashing);

        // 0.5s in: the dash itself is over, the cooldown is not
        for _ in 0..9 {
            rig.tick();
        }
        rig.input.set_horizontal(1.0);
        rig.input.press_dash();
        rig.tick();
        assert!(!rig.dash.is_dashing);

        // Tick until the cooldown elapses, then retry
        while !rig.dash.can_dash {
            rig.tick();
        }
        rig.input.set_horizontal(1.0);
        rig.input.press_dash();
        rig.tick();
        assert!(rig.dash.is_dashing);
    }

    #[test]
    fn can_dash_always_tracks_the_cooldown_clock() {
        let mut rig = Rig::new();
        for tick_index in 0..60 {
            if tick_index % 17 == 0 {
                rig.input.set_horizontal(1.0);
                rig.input.press_dash();
            }
            if tick_index % 11 == 0 {
                rig.character.is_grounded = true;
                rig.input.press_jump();
            }
            rig.tick();
            assert_eq!(
                rig.dash.can_dash,
                rig.dash.time_since_last_dash >= rig.config.dash_cooldown,
                "invariant broken at tick {tick_index}"
            );
        }
    }

    #[test]
    fn zero_axis_dash_freezes_in_place() {
        let mut rig = Rig::new();
        rig.velocity = Vec3::new(5.0, 0.0, 0.0);
        rig.input.press_dash();

        assert_eq!(rig.tick(), Vec3::ZERO);
        for _ in 0..3 {
            assert_eq!(rig.tick(), Vec3::ZERO);
        }
    }

    #[test]
    fn wall_jump_ramps_away_from_facing() {
        let mut rig = Rig::new();
        rig.character.is_touching_wall = true;
        rig.input.press_jump();

        // Activation tick: impulse plus the first lerp sample
        let velocity = rig.tick();
        assert_eq!(velocity.y, 7.0);
        assert!((velocity.x - -0.5).abs() < 1e-5);
        assert_eq!(rig.character.jump_count, 1);
        assert!(!rig.character.is_grounded);

        rig.input.release_jump();
        let expected_ramp = [-1.0, -1.5, -2.0];
        for want in expected_ramp {
            let velocity = rig.tick();
            assert!(
                (velocity.x - want).abs() < 1e-5,
                "push-off sample {want} missing, got {}",
                velocity.x
            );
        }
        assert!(!rig.wall_jump.is_wall_jumping());

        // Span over: horizontal control returns to the axis
        assert_eq!(rig.tick().x, 0.0);
    }

    #[test]
    fn wall_jump_impulse_not_reapplied_during_span() {
        let mut rig = Rig::new();
        rig.character.is_touching_wall = true;
        rig.input.press_jump();
        rig.tick();
        rig.input.release_jump();

        // After the first tick the span keeps running without touching the
        // impulse; only gravity shaping moves the vertical velocity.
        let before = rig.velocity.y;
        let after = rig.tick().y;
        assert!(after < before);
        assert_ne!(after, 7.0);
    }

    #[test]
    fn jump_and_dash_in_the_same_tick_leaves_dash_in_control() {
        let mut rig = Rig::new();
        rig.character.is_grounded = true;
        rig.input.set_horizontal(1.0);
        rig.input.press_jump();
        rig.input.press_dash();

        let velocity = rig.tick();
        // Jump ran first and its state changes stick, but the dash start
        // zeroed the velocity afterwards.
        assert_eq!(rig.character.jump_count, 1);
        assert!(!rig.character.is_grounded);
        assert!(rig.dash.is_dashing);
        assert_eq!(velocity, Vec3::ZERO);
    }

    #[test]
    fn depth_velocity_passes_through_untouched() {
        let mut rig = Rig::new();
        rig.character.is_grounded = true;
        rig.input.set_horizontal(1.0);
        rig.velocity = Vec3::new(0.0, 0.0, 2.5);

        let velocity = rig.tick();
        assert_eq!(velocity.z, 2.5);
    }
}
