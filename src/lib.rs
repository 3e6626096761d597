//! Skyhop - A third-person box platformer
//!
//! Core modules:
//! - `sim`: Frame simulation (kinematics, collisions, triggers, level progression)
//! - `levels`: Declarative level data
//! - `rebuild`: Background world rebuild with asset fallback
//! - `renderer`: Render sink snapshot types
//! - `tuning`: Data-driven difficulty balance
//! - `game`: Frame loop facade tying it all together

pub mod game;
pub mod levels;
pub mod notify;
pub mod rebuild;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use levels::{LevelCatalog, LevelDef, LevelError};
pub use notify::{EventLog, LogNotifier, Notifier};
pub use settings::{RenderMode, Settings};
pub use tuning::{Difficulty, Tuning};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_DT: f32 = 1.0 / 30.0;

    /// Gravity (units/s², applied to velocity.y)
    pub const GRAVITY: f32 = -24.0;
    /// Vertical launch speed of a jump
    pub const JUMP_SPEED: f32 = 9.2;
    /// Jump buffer window (seconds)
    pub const JUMP_BUFFER_WINDOW: f32 = 0.12;
    /// Coyote time window (seconds)
    pub const COYOTE_WINDOW: f32 = 0.10;

    /// Dash duration (seconds)
    pub const DASH_DURATION: f32 = 0.22;

    /// Horizontal response rate on the ground (1/s)
    pub const GROUND_ACCEL: f32 = 36.0;
    /// Horizontal response rate in the air, before the air control multiplier
    pub const AIR_ACCEL: f32 = 18.0;
    /// Air control multiplier
    pub const AIR_CONTROL: f32 = 0.75;
    /// Fraction of horizontal speed kept after one second of idle ground friction
    pub const GROUND_FRICTION: f32 = 0.0008;

    /// Falling below this height respawns the player
    pub const DEATH_PLANE_Y: f32 = -30.0;

    /// Player collision box half-extent
    pub const PLAYER_HALF_EXTENT: Vec3 = Vec3::new(0.45, 0.9, 0.45);
    /// Hazard (drone) collision box half-extent
    pub const HAZARD_HALF_EXTENT: Vec3 = Vec3::splat(0.55);
    /// Pickup radius for collectibles
    pub const PICKUP_RADIUS: f32 = 1.2;

    /// Cosmetic collectible motion
    pub const COLLECTIBLE_SPIN_SPEED: f32 = 2.2;
    pub const COLLECTIBLE_BOB_AMPLITUDE: f32 = 0.15;
    pub const COLLECTIBLE_BOB_SPEED: f32 = 2.0;
    /// Cosmetic goal spin (radians/s around x and y)
    pub const GOAL_SPIN_SPEED: (f32, f32) = (0.7, 1.1);

    /// Camera orbit limits and defaults
    pub const CAMERA_PITCH_MIN: f32 = -1.2;
    pub const CAMERA_PITCH_MAX: f32 = 0.2;
    pub const CAMERA_DISTANCE_MIN: f32 = 6.0;
    pub const CAMERA_DISTANCE_MAX: f32 = 28.0;
    pub const CAMERA_DEFAULT_PITCH: f32 = -0.25;
    pub const CAMERA_DEFAULT_DISTANCE: f32 = 14.0;
    /// Camera position smoothing rate (1/s)
    pub const CAMERA_SMOOTHING: f32 = 10.0;
    /// Look-at height above the player center
    pub const CAMERA_LOOK_HEIGHT: f32 = 0.8;
}

/// Interpolation factor for an exponential approach at `rate` over `dt`
///
/// Frame-rate independent: two steps of `dt/2` land where one step of `dt` does.
#[inline]
pub fn approach_factor(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt).exp()
}

/// Drop the vertical component of a vector
#[inline]
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}
