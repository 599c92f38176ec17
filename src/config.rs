//! Motion tuning and configuration loading.
//!
//! All knobs are plain numbers. The controller performs no cross-validation:
//! out-of-range values produce their literal arithmetic consequence, with the
//! single exception of the dash-duration floor (see [`crate::dash`]).

use std::fmt;
use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Tuning parameters for a single character.
///
/// Lives as a component on the character entity so different characters can
/// carry different tunings. Loadable from RON via [`load_motion_config`].
///
/// `gravity` is the vertical gravity acceleration the physics world applies to
/// the body; the controller only uses it to scale the fall and low-jump
/// shaping branches. Keep it in sync with the physics engine's gravity.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct MotionConfig {
    /// Horizontal movement speed (units/second).
    pub speed: f32,
    /// Vertical velocity set by a jump (a flat impulse, not additive).
    pub jump_force: f32,
    /// Total distance covered by a full dash.
    pub dash_distance: f32,
    /// Duration of a dash (seconds).
    pub dash_duration: f32,
    /// Minimum time between dash starts (seconds).
    pub dash_cooldown: f32,
    /// Gravity multiplier while falling.
    pub fall_multiplier: f32,
    /// Gravity multiplier while rising with the jump button released.
    pub low_jump_multiplier: f32,
    /// Maximum downward speed while sliding on a wall.
    pub wall_slide_speed: f32,
    /// Horizontal push-off distance of a wall jump, applied away from facing.
    pub wall_jump_push_off_distance: f32,
    /// Duration of the wall-jump push-off ramp (seconds).
    pub wall_jump_push_off_time: f32,
    /// Number of consecutive jumps the character is meant to have.
    ///
    /// Bookkeeping only: jump eligibility is decided by ground/wall contact,
    /// not by comparing `CharacterState::jump_count` against this.
    pub max_jump_count: u32,
    /// Vertical gravity acceleration (negative = down).
    pub gravity: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            jump_force: 7.0,
            dash_distance: 15.0,
            dash_duration: 0.2,
            dash_cooldown: 2.0,
            fall_multiplier: 2.5,
            low_jump_multiplier: 2.0,
            wall_slide_speed: 2.0,
            wall_jump_push_off_distance: 2.0,
            wall_jump_push_off_time: 0.2,
            max_jump_count: 1,
            gravity: -9.81,
        }
    }
}

impl MotionConfig {
    /// Set the horizontal movement speed.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Set the jump impulse.
    pub fn with_jump_force(mut self, jump_force: f32) -> Self {
        self.jump_force = jump_force;
        self
    }

    /// Set dash distance, duration and cooldown together.
    pub fn with_dash(mut self, distance: f32, duration: f32, cooldown: f32) -> Self {
        self.dash_distance = distance;
        self.dash_duration = duration;
        self.dash_cooldown = cooldown;
        self
    }

    /// Set the fall and low-jump gravity multipliers.
    pub fn with_gravity_shaping(mut self, fall: f32, low_jump: f32) -> Self {
        self.fall_multiplier = fall;
        self.low_jump_multiplier = low_jump;
        self
    }

    /// Set the vertical gravity used by the shaping branches.
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the maximum wall-slide descent speed.
    pub fn with_wall_slide_speed(mut self, speed: f32) -> Self {
        self.wall_slide_speed = speed;
        self
    }

    /// Set wall-jump push-off distance and ramp time together.
    pub fn with_wall_jump(mut self, push_off_distance: f32, push_off_time: f32) -> Self {
        self.wall_jump_push_off_distance = push_off_distance;
        self.wall_jump_push_off_time = push_off_time;
        self
    }
}

/// Error raised when a motion config file cannot be loaded.
#[derive(Debug)]
pub struct ConfigLoadError {
    pub file: String,
    pub message: String,
}

impl ConfigLoadError {
    fn new(path: &Path, message: String) -> Self {
        Self {
            file: path.display().to_string(),
            message,
        }
    }
}

impl fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ConfigLoadError {}

/// Load a [`MotionConfig`] from a RON file.
///
/// Missing fields fall back to their defaults, so a tuning file only needs to
/// name the knobs it changes.
pub fn load_motion_config(path: impl AsRef<Path>) -> Result<MotionConfig, ConfigLoadError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .map_err(|e| ConfigLoadError::new(path, format!("IO error: {}", e)))?;

    let config = ron::from_str(&contents)
        .map_err(|e| ConfigLoadError::new(path, format!("Parse error: {}", e)))?;

    debug!("loaded motion config from {}", path.display());
    Ok(config)
}
