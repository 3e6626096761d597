//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic for a
//! given sequence of inputs and frame times:
//! - Stable iteration order (statics, then moving platforms, by table index)
//! - No rendering, asset or platform dependencies
//! - Platforms referenced by `PlatformId`, never by pointer

pub mod aabb;
pub mod camera;
pub mod collision;
pub mod oscillator;
pub mod platforms;
pub mod player;
pub mod progress;
pub mod state;
pub mod tick;
pub mod triggers;

pub use aabb::Aabb;
pub use camera::{CameraFollower, MoveBasis};
pub use collision::{Collider, Resolution, SeparatingAxis, level_colliders, resolve};
pub use oscillator::{Axis, Oscillator};
pub use platforms::{Hazard, MovingPlatform, PlatformId, PlatformSimulator, StaticPlatform};
pub use player::{KinematicController, PlayerState, StepOutcome};
pub use progress::{LevelPhase, LevelProgress, RequestOutcome};
pub use state::{Collectible, GameEvent, Goal, World};
pub use tick::{InputIntent, tick};
