//! Level geometry: static boxes, moving platforms and patrolling hazards
//!
//! Moving platforms and hazards share the same oscillation law. Only moving
//! platforms record a per-frame `delta`, which is what carries a standing
//! player along.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::oscillator::Oscillator;
use crate::consts::HAZARD_HALF_EXTENT;

/// Stable handle to a moving platform (index into the active platform table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatformId(pub u32);

impl PlatformId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Immutable box created at level load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticPlatform {
    pub aabb: Aabb,
    /// Full size as declared by the level data
    pub size: Vec3,
}

impl StaticPlatform {
    pub fn new(pos: Vec3, size: Vec3) -> Self {
        Self {
            aabb: Aabb::from_size(pos, size),
            size,
        }
    }
}

/// A platform oscillating around its base position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovingPlatform {
    pub id: PlatformId,
    pub base_position: Vec3,
    pub motion: Oscillator,
    pub current_position: Vec3,
    pub previous_position: Vec3,
    /// `current_position - previous_position` for the last update
    pub delta: Vec3,
    pub aabb: Aabb,
}

impl MovingPlatform {
    pub fn new(id: PlatformId, pos: Vec3, size: Vec3, motion: Oscillator) -> Self {
        Self {
            id,
            base_position: pos,
            motion,
            current_position: pos,
            previous_position: pos,
            delta: Vec3::ZERO,
            aabb: Aabb::from_size(pos, size),
        }
    }

    /// Advance one frame and record the displacement
    pub fn update(&mut self, dt: f32) {
        self.previous_position = self.current_position;
        self.motion.advance(dt);
        self.current_position = self.motion.position_from(self.base_position);
        self.delta = self.current_position - self.previous_position;
        self.aabb.center = self.current_position;
    }
}

/// A patrolling drone; touching it respawns the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub base_position: Vec3,
    pub patrol: Oscillator,
    pub aabb: Aabb,
}

impl Hazard {
    pub fn new(pos: Vec3, patrol: Oscillator) -> Self {
        Self {
            base_position: pos,
            patrol,
            aabb: Aabb::new(pos, HAZARD_HALF_EXTENT),
        }
    }

    /// Advance with the patrol speed scaled by `speed_scale`
    pub fn update(&mut self, dt: f32, speed_scale: f32) {
        self.patrol.advance_scaled(dt, speed_scale);
        self.aabb.center = self.patrol.position_from(self.base_position);
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.aabb.center
    }
}

/// Advances every moving platform and hazard of the active level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformSimulator {
    pub moving: Vec<MovingPlatform>,
    pub hazards: Vec<Hazard>,
}

impl PlatformSimulator {
    pub fn new(moving: Vec<MovingPlatform>, hazards: Vec<Hazard>) -> Self {
        Self { moving, hazards }
    }

    /// Advance all platforms by `dt` and all hazards by `dt * hazard_speed_scale`
    pub fn update(&mut self, dt: f32, hazard_speed_scale: f32) {
        for platform in &mut self.moving {
            platform.update(dt);
        }
        for hazard in &mut self.hazards {
            hazard.update(dt, hazard_speed_scale);
        }
    }

    /// Frame delta of a platform, `None` if the id is not in this table
    pub fn delta_of(&self, id: PlatformId) -> Option<Vec3> {
        self.get(id).map(|p| p.delta)
    }

    pub fn get(&self, id: PlatformId) -> Option<&MovingPlatform> {
        self.moving.get(id.index()).filter(|p| p.id == id)
    }
}
