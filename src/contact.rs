//! Surface contact events.
//!
//! The physics backend translates its engine-specific collision callbacks into
//! [`SurfaceContact`] events; the tracker system flips the grounded/wall flags
//! on [`crate::state::CharacterState`] in response. Contacts are edge-triggered
//! and carry no tick-timing dependency: an event sent at any point is observed
//! before the next motion tick reads the flags.

use bevy::prelude::*;

/// Closed set of surface categories the controller reacts to.
///
/// Attach this to level colliders to tag them. Anything tagged [`Other`]
/// (or not tagged at all) is ignored by the tracker.
///
/// [`Other`]: SurfaceKind::Other
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[reflect(Component)]
pub enum SurfaceKind {
    /// Walkable ground; grants jumps and grounded state.
    Ground,
    /// Vertical surface; grants wall slide and wall jumps.
    Wall,
    /// Everything else.
    #[default]
    Other,
}

/// Whether a contact began or ended.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPhase {
    Enter,
    Exit,
}

/// A character gained or lost contact with a tagged surface.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SurfaceContact {
    /// The character entity involved in the contact.
    pub character: Entity,
    /// Category of the surface touched.
    pub kind: SurfaceKind,
    /// Whether the contact began or ended.
    pub phase: ContactPhase,
}
