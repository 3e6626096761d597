//! Active world state and simulation events
//!
//! A `World` is everything one level needs at runtime. It is built in one
//! piece from a `LevelDef` and replaced in one piece on level change, so
//! nothing inside can outlive the level it belongs to.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::oscillator::{Axis, Oscillator};
use super::platforms::{Hazard, MovingPlatform, PlatformId, PlatformSimulator, StaticPlatform};
use super::player::PlayerState;
use crate::consts::*;
use crate::levels::LevelDef;

/// A pickup; stays taken until the next respawn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub position: Vec3,
    pub taken: bool,
    /// Cosmetic vertical bob
    pub bob: Oscillator,
    /// Cosmetic spin around Y (radians)
    pub spin: f32,
}

impl Collectible {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            taken: false,
            bob: Oscillator::new(Axis::Y, COLLECTIBLE_BOB_AMPLITUDE, COLLECTIBLE_BOB_SPEED),
            spin: 0.0,
        }
    }

    /// Where to draw it; pickups always test against `position`
    pub fn display_position(&self) -> Vec3 {
        self.bob.position_from(self.position)
    }

    pub fn animate(&mut self, dt: f32) {
        self.bob.advance(dt);
        self.spin += dt * COLLECTIBLE_SPIN_SPEED;
    }
}

/// Level exit; distance based, not box based
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub position: Vec3,
    pub trigger_radius: f32,
    /// Cosmetic rotation (x, y) in radians
    pub spin: (f32, f32),
}

impl Goal {
    pub fn new(position: Vec3, trigger_radius: f32) -> Self {
        Self {
            position,
            trigger_radius,
            spin: (0.0, 0.0),
        }
    }

    pub fn animate(&mut self, dt: f32) {
        self.spin.0 += dt * GOAL_SPIN_SPEED.0;
        self.spin.1 += dt * GOAL_SPIN_SPEED.1;
    }
}

/// Runtime state of the active level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Catalog index this world was built from
    pub level_index: usize,
    pub statics: Vec<StaticPlatform>,
    pub platforms: PlatformSimulator,
    pub collectibles: Vec<Collectible>,
    pub goal: Goal,
    pub player: PlayerState,
    /// Simulated seconds since this world was built
    pub time: f32,
}

impl World {
    /// Build a fresh world from level data with the player on the spawn point
    pub fn from_level(level_index: usize, level: &LevelDef) -> Self {
        let statics = level
            .platforms
            .iter()
            .map(|p| StaticPlatform::new(Vec3::from(p.pos), Vec3::from(p.size)))
            .collect();

        let moving = level
            .moving_platforms
            .iter()
            .enumerate()
            .map(|(i, m)| {
                MovingPlatform::new(
                    PlatformId(i as u32),
                    Vec3::from(m.pos),
                    Vec3::from(m.size),
                    Oscillator::new(m.axis, m.amp, m.speed),
                )
            })
            .collect();

        let hazards = level
            .hazards
            .iter()
            .map(|h| Hazard::new(Vec3::from(h.pos), Oscillator::new(h.patrol_axis, h.amp, h.speed)))
            .collect();

        let collectibles = level
            .collectibles
            .iter()
            .map(|c| Collectible::new(Vec3::from(c.pos)))
            .collect();

        Self {
            level_index,
            statics,
            platforms: PlatformSimulator::new(moving, hazards),
            collectibles,
            goal: Goal::new(Vec3::from(level.goal.pos), level.goal.radius),
            player: PlayerState::new(Vec3::from(level.spawn.pos)),
            time: 0.0,
        }
    }

    /// Reset the player and all pickups; level geometry keeps running
    pub fn respawn(&mut self) {
        self.player.respawn();
        for c in &mut self.collectibles {
            c.taken = false;
        }
    }

    pub fn collected_count(&self) -> usize {
        self.collectibles.iter().filter(|c| c.taken).count()
    }
}

/// Something worth telling the player about
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Jump,
    Dash,
    Pickup { collected: usize, total: usize },
    /// Goal reached and the next level was queued
    LevelClear { next: usize, count: usize },
    Fell,
    HazardHit,
    /// Manual reset of the current level
    Reset { level: usize, count: usize },
    /// Asset fetch failed; world built from primitives
    AssetFallback { reason: String },
    LevelLoaded { level: usize, count: usize },
    DifficultyChanged { label: &'static str },
    ModeChanged { label: &'static str, level: usize, count: usize },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Jump => write!(f, "JUMP!"),
            GameEvent::Dash => write!(f, "DASH!"),
            GameEvent::Pickup { collected, total } => write!(f, "Collected! ({collected}/{total})"),
            GameEvent::LevelClear { next, count } => {
                write!(f, "Level clear! → {}/{}", next + 1, count)
            }
            GameEvent::Fell => write!(f, "Fell! Respawn."),
            GameEvent::HazardHit => write!(f, "Hit by drone! Respawn."),
            GameEvent::Reset { level, count } => write!(f, "Reset • Level {}/{}", level + 1, count),
            GameEvent::AssetFallback { .. } => {
                write!(f, "Full mode asset load failed — primitives fallback.")
            }
            GameEvent::LevelLoaded { level, count } => write!(f, "Level {}/{}", level + 1, count),
            GameEvent::DifficultyChanged { label } => write!(f, "Difficulty: {label}"),
            GameEvent::ModeChanged { label, level, count } => {
                write!(f, "Mode: {} • Level {}/{}", label.to_uppercase(), level + 1, count)
            }
        }
    }
}
