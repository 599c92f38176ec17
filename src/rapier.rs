//! Rapier3D physics backend implementation.
//!
//! This module provides the physics backend for Bevy Rapier3D.
//! Enable with the `rapier3d` feature.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::backend::MotionPhysicsBackend;
use crate::config::MotionConfig;
use crate::contact::{ContactPhase, SurfaceContact, SurfaceKind};
use crate::dash::DashState;
use crate::input::InputSnapshot;
use crate::state::CharacterState;
use crate::wall_jump::WallJumpState;

/// Rapier3D physics backend for the motion controller.
///
/// Uses `bevy_rapier3d`'s `Velocity` component as the authoritative velocity
/// channel and translates Rapier collision events into the controller's
/// surface contact events.
pub struct Rapier3dBackend;

impl MotionPhysicsBackend for Rapier3dBackend {
    type VelocityComponent = Velocity;

    fn plugin() -> impl Plugin {
        Rapier3dBackendPlugin
    }

    fn get_velocity(world: &World, entity: Entity) -> Vec3 {
        world
            .get::<Velocity>(entity)
            .map(|v| v.linvel)
            .unwrap_or(Vec3::ZERO)
    }

    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec3) {
        if let Some(mut vel) = world.get_mut::<Velocity>(entity) {
            vel.linvel = velocity;
        }
    }
}

/// Plugin wiring the Rapier collision stream into the contact tracker.
///
/// Expects `RapierPhysicsPlugin` to be added by the host.
pub struct Rapier3dBackendPlugin;

impl Plugin for Rapier3dBackendPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            emit_surface_contacts.before(crate::systems::track_contacts),
        );
    }
}

/// Translate Rapier collision events into [`SurfaceContact`] events.
///
/// Only pairs where one side is a character and the other carries a
/// [`SurfaceKind`] tag produce a contact; everything else is dropped here.
pub fn emit_surface_contacts(
    mut collisions: EventReader<CollisionEvent>,
    mut contacts: EventWriter<SurfaceContact>,
    characters: Query<(), With<CharacterState>>,
    surfaces: Query<&SurfaceKind>,
) {
    for event in collisions.read() {
        let (a, b, phase) = match *event {
            CollisionEvent::Started(a, b, _) => (a, b, ContactPhase::Enter),
            CollisionEvent::Stopped(a, b, _) => (a, b, ContactPhase::Exit),
        };

        let Some((character, kind)) = classify_pair(
            a,
            b,
            characters.contains(a),
            characters.contains(b),
            surfaces.get(a).ok().copied(),
            surfaces.get(b).ok().copied(),
        ) else {
            continue;
        };

        contacts.write(SurfaceContact {
            character,
            kind,
            phase,
        });
    }
}

/// Pick the character and the surface tag out of a collision pair, if the
/// pair has one of each.
fn classify_pair(
    a: Entity,
    b: Entity,
    a_is_character: bool,
    b_is_character: bool,
    a_surface: Option<SurfaceKind>,
    b_surface: Option<SurfaceKind>,
) -> Option<(Entity, SurfaceKind)> {
    if a_is_character {
        b_surface.map(|kind| (a, kind))
    } else if b_is_character {
        a_surface.map(|kind| (b, kind))
    } else {
        None
    }
}

/// Everything a playable character needs on top of a `Transform` and a
/// `Collider`: the motion components plus a dynamic Rapier body locked to the
/// movement plane.
#[derive(Bundle)]
pub struct PlatformerCharacterBundle {
    pub character: CharacterState,
    pub dash: DashState,
    pub wall_jump: WallJumpState,
    pub input: InputSnapshot,
    pub config: MotionConfig,
    pub body: RigidBody,
    pub velocity: Velocity,
    pub locked_axes: LockedAxes,
    pub gravity_scale: GravityScale,
    pub active_events: ActiveEvents,
}

impl PlatformerCharacterBundle {
    /// Build a character with the given tuning.
    pub fn new(config: MotionConfig) -> Self {
        Self {
            character: CharacterState::default(),
            dash: DashState::default(),
            wall_jump: WallJumpState::default(),
            input: InputSnapshot::default(),
            config,
            body: RigidBody::Dynamic,
            velocity: Velocity::default(),
            // The controller owns rotation and the depth axis
            locked_axes: LockedAxes::ROTATION_LOCKED | LockedAxes::TRANSLATION_LOCKED_Z,
            gravity_scale: GravityScale(1.0),
            active_events: ActiveEvents::COLLISION_EVENTS,
        }
    }
}

impl Default for PlatformerCharacterBundle {
    fn default() -> Self {
        Self::new(MotionConfig::default())
    }
}
