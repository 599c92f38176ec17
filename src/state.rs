//! Character state and state marker components.
//!
//! [`CharacterState`] is the per-character hub: the velocity mirror, the
//! contact-derived flags and the jump bookkeeping. The marker components are
//! synced from it after every motion tick so downstream systems can use plain
//! query filters instead of reading fields.

use bevy::prelude::*;

use crate::contact::{ContactPhase, SurfaceKind};

/// Which way the character is facing. Never "neither".
///
/// Updated from the sign of the horizontal input; zero input retains the
/// previous facing.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// The facing as a sign, `-1.0` or `+1.0`.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Core per-character motion state.
///
/// One instance per character, created at spawn and alive until despawn.
/// `is_grounded` and `is_touching_wall` are mutated by the contact tracker
/// (and cleared by a jump); everything else belongs to the motion step.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct CharacterState {
    /// Mirror of the physics body's velocity, refreshed every tick.
    pub velocity: Vec3,
    /// Currently in contact with a `Ground` surface.
    pub is_grounded: bool,
    /// Currently in contact with a `Wall` surface.
    pub is_touching_wall: bool,
    /// Direction the character is facing.
    pub facing: Facing,
    /// Jumps taken since the last ground or wall contact.
    ///
    /// Reset on new contact, incremented per jump. Bookkeeping only; jump
    /// eligibility is decided by the contact flags.
    pub jump_count: u32,
}

impl CharacterState {
    /// Apply one contact transition.
    ///
    /// Idempotent per phase: repeated enters leave the flags and the reset
    /// counter exactly where the first one put them.
    pub fn apply_contact(&mut self, kind: SurfaceKind, phase: ContactPhase) {
        match (kind, phase) {
            (SurfaceKind::Ground, ContactPhase::Enter) => {
                self.is_grounded = true;
                self.jump_count = 0;
            }
            (SurfaceKind::Wall, ContactPhase::Enter) => {
                self.is_touching_wall = true;
                self.jump_count = 0;
            }
            (SurfaceKind::Ground, ContactPhase::Exit) => self.is_grounded = false,
            (SurfaceKind::Wall, ContactPhase::Exit) => self.is_touching_wall = false,
            (SurfaceKind::Other, _) => {}
        }
    }
}

/// Marker component indicating the character is grounded.
///
/// Added and removed automatically after each motion tick. Mutually exclusive
/// with [`Airborne`].
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Grounded;

/// Marker component indicating the character is airborne.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Airborne;

/// Marker component indicating the character is touching a wall.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct TouchingWall;
