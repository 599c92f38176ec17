//! Core controller systems.
//!
//! These systems wire the pure motion step into the ECS schedule. They are
//! generic over the physics backend so different physics engines can be used.

use bevy::prelude::*;

use crate::backend::MotionPhysicsBackend;
use crate::config::MotionConfig;
use crate::contact::SurfaceContact;
use crate::dash::DashState;
use crate::input::InputSnapshot;
use crate::motion;
use crate::state::{Airborne, CharacterState, Grounded, TouchingWall};
use crate::wall_jump::WallJumpState;

/// Fail fast when a character is spawned without a physics body.
///
/// A character the backend cannot read a velocity from cannot be simulated at
/// all; that is a setup error, not a condition to limp through per tick.
pub fn assert_physics_bodies<B: MotionPhysicsBackend>(
    characters: Query<Entity, (Added<CharacterState>, Without<B::VelocityComponent>)>,
) {
    for entity in &characters {
        panic!(
            "character {entity:?} has no physics body; insert the backend's velocity \
             component before simulating it"
        );
    }
}

/// Drain surface contact events into the per-character flags.
///
/// Contact transitions are instantaneous, idempotent flag flips; they carry no
/// ordering requirement beyond landing before the next motion tick.
pub fn track_contacts(
    mut contacts: EventReader<SurfaceContact>,
    mut characters: Query<&mut CharacterState>,
) {
    for contact in contacts.read() {
        let Ok(mut state) = characters.get_mut(contact.character) else {
            continue;
        };
        let was_grounded = state.is_grounded;
        let was_on_wall = state.is_touching_wall;
        state.apply_contact(contact.kind, contact.phase);
        if state.is_grounded != was_grounded || state.is_touching_wall != was_on_wall {
            debug!(
                "{:?} contact change: grounded={} wall={}",
                contact.character, state.is_grounded, state.is_touching_wall
            );
        }
    }
}

/// Run the motion step for every character and write the result to the body.
pub fn update_motion<B: MotionPhysicsBackend>(world: &mut World) {
    let dt = B::get_fixed_timestep(world);

    let actors: Vec<(Entity, MotionConfig, InputSnapshot)> = world
        .query::<(Entity, &MotionConfig, &InputSnapshot)>()
        .iter(world)
        .map(|(entity, config, input)| (entity, *config, *input))
        .collect();

    let mut states = world.query::<(&mut CharacterState, &mut DashState, &mut WallJumpState)>();

    for (entity, config, input) in actors {
        let velocity = B::get_velocity(world, entity);

        let Ok((mut character, mut dash, mut wall_jump)) = states.get_mut(world, entity) else {
            continue;
        };
        let next = motion::step(
            &config,
            &input,
            &mut character,
            &mut dash,
            &mut wall_jump,
            dt,
            velocity,
        );
        character.velocity = next;

        B::set_velocity(world, entity, next);
    }
}

/// Sync the state marker components from the character flags.
pub fn sync_state_markers(
    mut commands: Commands,
    characters: Query<(
        Entity,
        &CharacterState,
        Has<Grounded>,
        Has<Airborne>,
        Has<TouchingWall>,
    )>,
) {
    for (entity, state, has_grounded, has_airborne, has_wall) in &characters {
        if state.is_grounded && !has_grounded {
            commands.entity(entity).insert(Grounded).remove::<Airborne>();
        } else if !state.is_grounded && (has_grounded || !has_airborne) {
            commands.entity(entity).insert(Airborne).remove::<Grounded>();
        }

        if state.is_touching_wall && !has_wall {
            commands.entity(entity).insert(TouchingWall);
        } else if !state.is_touching_wall && has_wall {
            commands.entity(entity).remove::<TouchingWall>();
        }
    }
}

/// Clear input edge flags at the end of each fixed tick so a single press is
/// consumed exactly once.
pub fn clear_input_edges(mut inputs: Query<&mut InputSnapshot>) {
    for mut input in &mut inputs {
        input.clear_edges();
    }
}
