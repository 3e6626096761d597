//! Player kinematics
//!
//! Per-frame integration of the player box: platform carry, camera-relative
//! movement, gravity, buffered/coyote jumps and a single-use dash. All rate
//! based blending uses exponential laws so the feel does not change with the
//! frame rate.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::camera::MoveBasis;
use super::collision::{level_colliders, resolve};
use super::platforms::{PlatformId, PlatformSimulator, StaticPlatform};
use super::tick::InputIntent;
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{approach_factor, horizontal};

/// Kinematic state of the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub position: Vec3,
    pub velocity: Vec3,
    pub half_extent: Vec3,
    pub grounded: bool,
    /// Moving platform the player is standing on (index, never a reference)
    pub ground_platform: Option<PlatformId>,
    pub coyote_timer: f32,
    pub dash_available: bool,
    pub dashing: bool,
    /// Remaining dash time; only positive while `dashing`
    pub dash_timer: f32,
    pub jump_buffer_timer: f32,
    /// Unit-length heading; never zero
    pub facing: Vec3,
    pub spawn_position: Vec3,
}

impl PlayerState {
    pub fn new(spawn: Vec3) -> Self {
        Self {
            position: spawn,
            velocity: Vec3::ZERO,
            half_extent: PLAYER_HALF_EXTENT,
            grounded: false,
            ground_platform: None,
            coyote_timer: 0.0,
            dash_available: true,
            dashing: false,
            dash_timer: 0.0,
            jump_buffer_timer: 0.0,
            facing: Vec3::Z,
            spawn_position: spawn,
        }
    }

    /// Put the player back on the spawn point with fresh kinematics
    pub fn respawn(&mut self) {
        *self = Self {
            half_extent: self.half_extent,
            ..Self::new(self.spawn_position)
        };
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position, self.half_extent)
    }

    /// Horizontal speed (ignores the vertical component)
    pub fn horizontal_speed(&self) -> f32 {
        horizontal(self.velocity).length()
    }
}

/// What happened during one controller step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub jumped: bool,
    pub dashed: bool,
    /// Player dropped below the death plane; caller must respawn
    pub fell: bool,
}

/// Integrates the player from input intent
///
/// Holds the only input memory that is not part of the player state: the
/// previous frame's dash button, for edge detection.
#[derive(Debug, Clone, Default)]
pub struct KinematicController {
    prev_dash_held: bool,
}

impl KinematicController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the player by one frame
    #[allow(clippy::too_many_arguments)]
    pub fn step(
        &mut self,
        player: &mut PlayerState,
        dt: f32,
        intent: &InputIntent,
        basis: &MoveBasis,
        tuning: &Tuning,
        statics: &[StaticPlatform],
        platforms: &PlatformSimulator,
    ) -> StepOutcome {
        let dt = dt.clamp(0.0, MAX_DT);
        let mut outcome = StepOutcome::default();

        // Ride the supporting platform before our own motion
        if player.grounded {
            if let Some(delta) = player.ground_platform.and_then(|id| platforms.delta_of(id)) {
                player.position += delta;
            }
        }

        if intent.jump_held {
            player.jump_buffer_timer = JUMP_BUFFER_WINDOW;
        } else {
            player.jump_buffer_timer = (player.jump_buffer_timer - dt).max(0.0);
        }

        let dash_pressed = intent.dash_held && !self.prev_dash_held;
        self.prev_dash_held = intent.dash_held;

        if player.grounded {
            player.coyote_timer = COYOTE_WINDOW;
        } else {
            player.coyote_timer = (player.coyote_timer - dt).max(0.0);
        }

        let wish = basis.wish(intent);
        if wish != Vec3::ZERO {
            player.facing = wish;
        }

        if dash_pressed && player.dash_available && !player.dashing {
            let dir = if wish != Vec3::ZERO { wish } else { player.facing };
            player.velocity = horizontal(dir * tuning.dash_speed);
            player.dashing = true;
            player.dash_timer = DASH_DURATION;
            player.dash_available = false;
            outcome.dashed = true;
        }

        if player.dashing {
            player.dash_timer -= dt;
            if player.dash_timer <= 0.0 {
                player.dash_timer = 0.0;
                player.dashing = false;
            }
        }

        if !player.dashing {
            player.velocity.y += GRAVITY * dt;

            let rate = if player.grounded {
                GROUND_ACCEL
            } else {
                AIR_ACCEL * AIR_CONTROL
            };
            let target = wish * tuning.max_speed;
            let mut h = horizontal(player.velocity).lerp(target, approach_factor(rate, dt));
            if wish == Vec3::ZERO && player.grounded {
                h *= GROUND_FRICTION.powf(dt);
            }
            player.velocity.x = h.x;
            player.velocity.z = h.z;
        }

        if player.jump_buffer_timer > 0.0 && (player.grounded || player.coyote_timer > 0.0) {
            player.velocity.y = JUMP_SPEED;
            player.grounded = false;
            player.ground_platform = None;
            player.coyote_timer = 0.0;
            player.jump_buffer_timer = 0.0;
            outcome.jumped = true;
        }

        player.position += player.velocity * dt;

        player.grounded = false;
        player.ground_platform = None;
        let res = resolve(
            player.position,
            player.half_extent,
            level_colliders(statics, platforms),
        );
        player.position = res.position;
        player.velocity *= res.velocity_mask;
        player.grounded = res.grounded;
        player.ground_platform = res.ground_platform;

        if player.grounded {
            player.dash_available = true;
        }

        if player.position.y < DEATH_PLANE_Y {
            outcome.fell = true;
        }

        outcome
    }
}
