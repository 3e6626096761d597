//! Axis-aligned boxes
//!
//! All level geometry, the player and hazards are boxes described by a
//! center and a non-negative half-extent.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// An axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec3,
    /// Half size on each axis (always >= 0)
    pub half_extent: Vec3,
}

impl Aabb {
    pub fn new(center: Vec3, half_extent: Vec3) -> Self {
        Self {
            center,
            half_extent: half_extent.abs(),
        }
    }

    /// Box from a center and a full size
    pub fn from_size(center: Vec3, size: Vec3) -> Self {
        Self::new(center, size * 0.5)
    }

    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extent
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extent
    }

    /// Full size on each axis
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.half_extent * 2.0
    }

    /// Per-axis overlap depth: `min(maxA, maxB) - max(minA, minB)`
    ///
    /// Negative or zero components mean the boxes are apart on that axis.
    #[inline]
    pub fn overlap_depths(&self, other: &Aabb) -> Vec3 {
        self.max().min(other.max()) - self.min().max(other.min())
    }

    /// True when the boxes overlap with positive depth on all three axes
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let d = self.overlap_depths(other);
        d.x > 0.0 && d.y > 0.0 && d.z > 0.0
    }
}
