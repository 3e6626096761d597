//! Level catalog
//!
//! Levels are plain data, loaded from JSON. The built-in catalog is compiled
//! into the binary; a custom catalog can be parsed from any JSON string with
//! the same shape.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::oscillator::Axis;

const BUILTIN_LEVELS: &str = include_str!("../assets/levels.json");

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("invalid level data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level catalog is empty")]
    Empty,
    #[error("level {level}: {what} has a negative size")]
    NegativeSize { level: usize, what: &'static str },
    #[error("level {level}: goal radius must be positive, got {radius}")]
    BadGoalRadius { level: usize, radius: f32 },
}

/// Static box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxDef {
    pub pos: [f32; 3],
    pub size: [f32; 3],
}

/// Oscillating platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingPlatformDef {
    pub pos: [f32; 3],
    pub size: [f32; 3],
    pub axis: Axis,
    pub amp: f32,
    pub speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollectibleDef {
    pub pos: [f32; 3],
}

/// Patrolling drone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardDef {
    pub pos: [f32; 3],
    pub patrol_axis: Axis,
    pub amp: f32,
    pub speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnDef {
    pub pos: [f32; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalDef {
    pub pos: [f32; 3],
    pub radius: f32,
}

/// One level as authored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDef {
    #[serde(default)]
    pub name: String,
    pub spawn: SpawnDef,
    pub goal: GoalDef,
    #[serde(default)]
    pub platforms: Vec<BoxDef>,
    #[serde(default)]
    pub moving_platforms: Vec<MovingPlatformDef>,
    #[serde(default)]
    pub collectibles: Vec<CollectibleDef>,
    /// Older level files call these `enemies`
    #[serde(default, alias = "enemies")]
    pub hazards: Vec<HazardDef>,
}

impl LevelDef {
    fn validate(&self, level: usize) -> Result<(), LevelError> {
        let negative = |size: &[f32; 3]| size.iter().any(|s| *s < 0.0);

        if self.platforms.iter().any(|p| negative(&p.size)) {
            return Err(LevelError::NegativeSize {
                level,
                what: "platform",
            });
        }
        if self.moving_platforms.iter().any(|p| negative(&p.size)) {
            return Err(LevelError::NegativeSize {
                level,
                what: "moving platform",
            });
        }
        if self.goal.radius.is_nan() || self.goal.radius <= 0.0 {
            return Err(LevelError::BadGoalRadius {
                level,
                radius: self.goal.radius,
            });
        }
        Ok(())
    }
}

/// Ordered, non-empty list of levels
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<LevelDef>,
}

impl LevelCatalog {
    /// The levels shipped with the game
    pub fn builtin() -> Result<Self, LevelError> {
        Self::from_json(BUILTIN_LEVELS)
    }

    /// Parse and validate a JSON array of levels
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let levels: Vec<LevelDef> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    pub fn new(levels: Vec<LevelDef>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::Empty);
        }
        for (i, level) in levels.iter().enumerate() {
            level.validate(i)?;
        }
        log::debug!("Level catalog loaded: {} levels", levels.len());
        Ok(Self { levels })
    }

    /// Level at `index`, wrapping around the catalog
    pub fn level(&self, index: usize) -> &LevelDef {
        &self.levels[index % self.levels.len()]
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelDef> {
        self.levels.iter()
    }
}
