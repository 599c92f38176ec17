//! # `platformer_motion`
//!
//! A platformer character-motion core with physics backend abstraction.
//!
//! This crate turns a per-tick input snapshot and surface contact events into a
//! single authoritative velocity for a physically simulated body:
//! - Horizontal run with facing tracking
//! - Flat-impulse jumps with fall and low-jump gravity shaping
//! - Wall slide with a clamped descent speed
//! - Wall jumps with a time-interpolated horizontal push-off
//! - Cooldown-gated dashes that override velocity along a captured direction
//! - Abstracts the physics backend for easy swapping (Rapier3D included)
//!
//! ## Architecture
//!
//! All motion state lives in components on the character entity. One chained
//! `FixedUpdate` system tuple runs the whole tick in a fixed order: contact
//! tracking, the ordered motion step, then state marker sync. The motion step
//! itself threads a single velocity accumulator through its phases, so the
//! execution order is auditable in one place ([`motion::step`]).
//!
//! The controller never reads colliders or raycasts on its own; it consumes
//! [`contact::SurfaceContact`] events and a velocity-settable body exposed
//! through [`backend::MotionPhysicsBackend`].
//!
//! ## Usage
//!
//! ```rust
//! use platformer_motion::prelude::*;
//!
//! // Tune a character and prepare its per-tick input
//! let config = MotionConfig::default().with_speed(6.0).with_dash(12.0, 0.15, 1.5);
//! let mut input = InputSnapshot::default();
//! input.set_horizontal(1.0);
//! ```
//!
//! With the Rapier3D backend:
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_rapier3d::prelude::*;
//! use platformer_motion::prelude::*;
//!
//! App::new()
//!     .add_plugins(MinimalPlugins)
//!     .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
//!     .add_plugins(PlatformerMotionPlugin::<Rapier3dBackend>::default())
//!     .run();
//! ```

use bevy::prelude::*;

pub mod backend;
pub mod config;
pub mod contact;
pub mod dash;
pub mod input;
pub mod motion;
pub mod state;
pub mod systems;
pub mod wall_jump;

#[cfg(feature = "rapier3d")]
pub mod rapier;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::backend::MotionPhysicsBackend;
    pub use crate::config::{load_motion_config, ConfigLoadError, MotionConfig};
    pub use crate::contact::{ContactPhase, SurfaceContact, SurfaceKind};
    pub use crate::dash::DashState;
    pub use crate::input::InputSnapshot;
    pub use crate::state::{Airborne, CharacterState, Facing, Grounded, TouchingWall};
    pub use crate::wall_jump::{WallJumpPhase, WallJumpState};
    pub use crate::PlatformerMotionPlugin;

    #[cfg(feature = "rapier3d")]
    pub use crate::rapier::{PlatformerCharacterBundle, Rapier3dBackend};
}

/// Main plugin for the character-motion system.
///
/// This plugin is generic over a physics backend `B` which provides the actual
/// physics operations (velocity read/write, fixed timestep).
///
/// # Type Parameters
/// - `B`: The physics backend implementation (e.g., `Rapier3dBackend`)
pub struct PlatformerMotionPlugin<B: backend::MotionPhysicsBackend> {
    _marker: std::marker::PhantomData<B>,
}

impl<B: backend::MotionPhysicsBackend> Default for PlatformerMotionPlugin<B> {
    fn default() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

impl<B: backend::MotionPhysicsBackend> Plugin for PlatformerMotionPlugin<B> {
    fn build(&self, app: &mut App) {
        // Register core types
        app.register_type::<config::MotionConfig>();
        app.register_type::<input::InputSnapshot>();
        app.register_type::<state::CharacterState>();
        app.register_type::<state::Grounded>();
        app.register_type::<state::Airborne>();
        app.register_type::<state::TouchingWall>();
        app.register_type::<contact::SurfaceKind>();
        app.register_type::<dash::DashState>();
        app.register_type::<wall_jump::WallJumpState>();

        app.add_event::<contact::SurfaceContact>();

        // Add the physics backend plugin
        app.add_plugins(B::plugin());

        // The whole tick runs in FixedUpdate in a fixed order: contacts are
        // drained before the motion step reads them, markers sync after the
        // step has written its result.
        app.add_systems(
            FixedUpdate,
            (
                systems::assert_physics_bodies::<B>,
                systems::track_contacts,
                systems::update_motion::<B>,
                systems::sync_state_markers,
            )
                .chain(),
        );

        // Edge flags are consumed by exactly one fixed tick
        app.add_systems(FixedPostUpdate, systems::clear_input_edges);
    }
}
