//! Physics backend abstraction.
//!
//! This module defines the trait that physics backends must implement to work
//! with the motion controller. This allows easy swapping between physics
//! engines (Rapier3D, custom kinematic bodies, test doubles, etc.).

use bevy::prelude::*;

/// Trait for physics backend implementations.
///
/// The backend is the controller's only channel to the simulated body: it
/// reads the body's current velocity at the start of a tick and writes the
/// final velocity back at the end. Gravity integration, collision response
/// and everything else about the body stays inside the physics engine.
///
/// For an example implementation, see the `rapier` module's `Rapier3dBackend`
/// which implements this trait for Bevy Rapier3D.
pub trait MotionPhysicsBackend: 'static + Send + Sync {
    /// The velocity component type used by this backend.
    ///
    /// A character entity missing this component cannot be simulated; the
    /// plugin treats that as a fatal setup error, not a per-tick condition.
    type VelocityComponent: Component;

    /// Returns the plugin that sets up this backend.
    fn plugin() -> impl Plugin;

    /// Get the current velocity of an entity.
    fn get_velocity(world: &World, entity: Entity) -> Vec3;

    /// Set the velocity of an entity.
    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec3);

    /// Get the fixed timestep delta time.
    fn get_fixed_timestep(world: &World) -> f32 {
        world
            .get_resource::<Time<Fixed>>()
            .map(|t| t.timestep().as_secs_f32())
            // Bevy's default fixed rate
            .unwrap_or(1.0 / 64.0)
    }
}

/// Empty plugin for backends that don't need additional setup.
pub struct NoOpBackendPlugin;

impl Plugin for NoOpBackendPlugin {
    fn build(&self, _app: &mut App) {}
}
