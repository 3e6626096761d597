//! Per-box instance records for the render sink

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// What an instance depicts; stored as `u32` in `BoxInstance::kind`
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceKind {
    Static = 0,
    Moving = 1,
    Player = 2,
    Collectible = 3,
    Hazard = 4,
    Goal = 5,
}

/// One oriented box, laid out for direct upload as an instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BoxInstance {
    pub center: [f32; 3],
    /// Rotation around +Y (radians)
    pub yaw: f32,
    pub half_extent: [f32; 3],
    pub kind: u32,
    pub color: [f32; 4],
}

impl BoxInstance {
    pub fn new(kind: InstanceKind, center: Vec3, half_extent: Vec3, color: [f32; 4]) -> Self {
        Self {
            center: center.to_array(),
            yaw: 0.0,
            half_extent: half_extent.to_array(),
            kind: kind as u32,
            color,
        }
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self
    }

    pub fn is(&self, kind: InstanceKind) -> bool {
        self.kind == kind as u32
    }
}

/// `0xRRGGBB` to linear-ish RGBA
pub const fn rgb(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Colors for game elements
pub mod colors {
    use super::rgb;

    pub const PLAYER: [f32; 4] = rgb(0x8fd3ff);
    pub const PLATFORM: [f32; 4] = rgb(0x6bffb3);
    /// Full mode draws the ground texture; this is its average tone
    pub const PLATFORM_GRASS: [f32; 4] = rgb(0x5f8f3a);
    pub const MOVING_PLATFORM: [f32; 4] = rgb(0xffd166);
    pub const COLLECTIBLE: [f32; 4] = rgb(0xff4d6d);
    pub const HAZARD: [f32; 4] = rgb(0x9b5de5);
    pub const GOAL: [f32; 4] = rgb(0x00f5d4);
    pub const BACKGROUND_PROTOTYPE: [f32; 4] = rgb(0x0b1020);
    pub const BACKGROUND_FULL: [f32; 4] = rgb(0x87b5ff);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_has_no_padding() {
        assert_eq!(std::mem::size_of::<BoxInstance>(), 48);
        let b = BoxInstance::new(InstanceKind::Goal, Vec3::ONE, Vec3::splat(0.5), colors::GOAL);
        let bytes: &[u8] = bytemuck::bytes_of(&b);
        assert_eq!(bytes.len(), 48);
        assert!(b.is(InstanceKind::Goal));
    }

    #[test]
    fn test_rgb() {
        assert_eq!(rgb(0xff0000), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(rgb(0x000000)[3], 1.0);
    }
}
