//! Periodic motion along a single axis
//!
//! One phase accumulator drives moving platforms, patrolling hazards and the
//! cosmetic bob of collectibles:
//! - `phase += dt * speed`
//! - `offset = sin(phase) * amplitude`, applied along `axis`

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// World axis an oscillator moves along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    X,
    Y,
    Z,
}

impl Axis {
    /// Unit vector for this axis
    #[inline]
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

/// Sinusoidal phase accumulator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillator {
    pub axis: Axis,
    pub amplitude: f32,
    /// Angular speed (radians/s)
    pub speed: f32,
    /// Accumulated phase (radians)
    pub phase: f32,
}

impl Oscillator {
    pub fn new(axis: Axis, amplitude: f32, speed: f32) -> Self {
        Self {
            axis,
            amplitude,
            speed,
            phase: 0.0,
        }
    }

    /// Advance the phase by `dt` and return the new scalar offset
    #[inline]
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.advance_scaled(dt, 1.0)
    }

    /// Advance with the angular speed multiplied by `rate`
    ///
    /// Hazards use this to apply the difficulty multiplier.
    pub fn advance_scaled(&mut self, dt: f32, rate: f32) -> f32 {
        self.phase += dt * self.speed * rate;
        self.offset()
    }

    /// Current scalar offset along the axis
    #[inline]
    pub fn offset(&self) -> f32 {
        self.phase.sin() * self.amplitude
    }

    /// Current offset as a world-space displacement
    #[inline]
    pub fn displacement(&self) -> Vec3 {
        self.axis.unit() * self.offset()
    }

    /// `base` moved by the current displacement
    #[inline]
    pub fn position_from(&self, base: Vec3) -> Vec3 {
        base + self.displacement()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_starts_at_base() {
        let osc = Oscillator::new(Axis::Y, 2.0, 1.2);
        assert_eq!(osc.offset(), 0.0);
        assert_eq!(osc.position_from(Vec3::new(10.0, 5.0, 6.0)), Vec3::new(10.0, 5.0, 6.0));
    }

    #[test]
    fn test_advance_accumulates_phase() {
        let mut osc = Oscillator::new(Axis::X, 3.5, 1.0);
        osc.advance(0.5);
        osc.advance(0.5);
        assert!((osc.phase - 1.0).abs() < 1e-6);
        assert!((osc.offset() - 1.0f32.sin() * 3.5).abs() < 1e-5);
    }

    #[test]
    fn test_peak_offset_along_axis() {
        let mut osc = Oscillator::new(Axis::Z, 4.0, 1.0);
        let off = osc.advance(FRAC_PI_2);
        assert!((off - 4.0).abs() < 1e-5);
        let d = osc.displacement();
        assert!(d.x.abs() < 1e-6 && d.y.abs() < 1e-6);
        assert!((d.z - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_scaled_rate() {
        let mut fast = Oscillator::new(Axis::X, 1.0, 1.2);
        let mut slow = fast;
        fast.advance_scaled(0.1, 1.25);
        slow.advance_scaled(0.1, 0.8);
        assert!((fast.phase - 0.15).abs() < 1e-6);
        assert!((slow.phase - 0.096).abs() < 1e-6);
    }

    #[test]
    fn test_axis_deserializes_lowercase() {
        let axis: Axis = serde_json::from_str("\"y\"").unwrap();
        assert_eq!(axis, Axis::Y);
        assert_eq!(axis.as_str(), "y");
    }
}
