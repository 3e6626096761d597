//! Difficulty tiers and the movement tunings they select

use serde::{Deserialize, Serialize};

/// Difficulty tier; read every frame by the controller and platform simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Per-tier movement parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Horizontal speed the movement blend approaches (m/s)
    pub max_speed: f32,
    /// Horizontal speed set on dash (m/s)
    pub dash_speed: f32,
    /// Multiplier on hazard patrol speed
    pub hazard_speed_scale: f32,
}

impl Difficulty {
    /// Map the 1-3 tier used by the UI; anything else is rejected
    pub fn from_tier(tier: u8) -> Option<Self> {
        match tier {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Normal),
            3 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn tier(&self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Normal => 2,
            Difficulty::Hard => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn tuning(&self) -> Tuning {
        match self {
            Difficulty::Easy => Tuning {
                max_speed: 7.2,
                dash_speed: 20.0,
                hazard_speed_scale: 0.8,
            },
            Difficulty::Normal => Tuning {
                max_speed: 6.6,
                dash_speed: 20.0,
                hazard_speed_scale: 1.0,
            },
            Difficulty::Hard => Tuning {
                max_speed: 6.2,
                dash_speed: 18.0,
                hazard_speed_scale: 1.25,
            },
        }
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Difficulty::default().tuning()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_roundtrip() {
        for tier in 1..=3 {
            let d = Difficulty::from_tier(tier).unwrap();
            assert_eq!(d.tier(), tier);
        }
    }

    #[test]
    fn test_out_of_range_tiers() {
        assert_eq!(Difficulty::from_tier(0), None);
        assert_eq!(Difficulty::from_tier(4), None);
        assert_eq!(Difficulty::from_tier(255), None);
    }

    #[test]
    fn test_harder_is_slower_and_drones_faster() {
        let easy = Difficulty::Easy.tuning();
        let normal = Difficulty::Normal.tuning();
        let hard = Difficulty::Hard.tuning();
        assert!(easy.max_speed > normal.max_speed && normal.max_speed > hard.max_speed);
        assert!(hard.dash_speed < normal.dash_speed);
        assert!(easy.hazard_speed_scale < 1.0 && hard.hazard_speed_scale > 1.0);
        assert_eq!(Tuning::default(), normal);
    }
}
