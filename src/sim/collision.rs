//! Collision resolution between the player box and level geometry
//!
//! Sequential relaxation over a fixed collider order (static platforms, then
//! moving platforms). Each overlapping collider pushes the player out along
//! its axis of least penetration, ties broken X, then Z, then Y. The outcome
//! with several simultaneous overlaps depends on that order, and the order is
//! part of the game feel, so it must stay stable.

use glam::Vec3;

use super::aabb::Aabb;
use super::platforms::{PlatformId, PlatformSimulator, StaticPlatform};

/// A box the player can collide with
#[derive(Debug, Clone, Copy)]
pub struct Collider {
    pub aabb: Aabb,
    /// Set for moving platforms, which can carry the player
    pub support: Option<PlatformId>,
}

/// Separating axis picked for one contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparatingAxis {
    X,
    Y,
    Z,
}

impl SeparatingAxis {
    /// Axis of least penetration, ties going to X, then Z, then Y
    pub fn pick(depths: Vec3) -> Self {
        if depths.x <= depths.y && depths.x <= depths.z {
            SeparatingAxis::X
        } else if depths.z <= depths.x && depths.z <= depths.y {
            SeparatingAxis::Z
        } else {
            SeparatingAxis::Y
        }
    }

    #[inline]
    fn index(self) -> usize {
        match self {
            SeparatingAxis::X => 0,
            SeparatingAxis::Y => 1,
            SeparatingAxis::Z => 2,
        }
    }
}

/// Result of a full resolution pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub position: Vec3,
    /// 1.0 on axes whose velocity survives, 0.0 on axes that were blocked
    pub velocity_mask: Vec3,
    pub grounded: bool,
    pub ground_platform: Option<PlatformId>,
}

/// The collider sequence for a level: static platforms first, then moving ones
pub fn level_colliders<'a>(
    statics: &'a [StaticPlatform],
    platforms: &'a PlatformSimulator,
) -> impl Iterator<Item = Collider> + 'a {
    let fixed = statics.iter().map(|s| Collider {
        aabb: s.aabb,
        support: None,
    });
    let moving = platforms.moving.iter().map(|m| Collider {
        aabb: m.aabb,
        support: Some(m.id),
    });
    fixed.chain(moving)
}

/// Push a box at `position` out of every collider, in iteration order
pub fn resolve(
    position: Vec3,
    half_extent: Vec3,
    colliders: impl IntoIterator<Item = Collider>,
) -> Resolution {
    let mut out = Resolution {
        position,
        velocity_mask: Vec3::ONE,
        grounded: false,
        ground_platform: None,
    };
    let mut player = Aabb::new(position, half_extent);

    for collider in colliders {
        let depths = player.overlap_depths(&collider.aabb);
        if !(depths.x > 0.0 && depths.y > 0.0 && depths.z > 0.0) {
            continue;
        }

        let axis = SeparatingAxis::pick(depths);
        let i = axis.index();
        let dir = if out.position[i] < collider.aabb.center[i] {
            -1.0
        } else {
            1.0
        };
        out.position[i] += dir * depths[i];
        out.velocity_mask[i] = 0.0;

        if axis == SeparatingAxis::Y && dir > 0.0 {
            out.grounded = true;
            if collider.support.is_some() {
                out.ground_platform = collider.support;
            }
        }

        player = Aabb::new(out.position, half_extent);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYER_HALF_EXTENT;

    fn fixed(center: Vec3, half: Vec3) -> Collider {
        Collider {
            aabb: Aabb::new(center, half),
            support: None,
        }
    }

    #[test]
    fn test_lands_on_top_of_platform() {
        let floor = fixed(Vec3::ZERO, Vec3::new(5.0, 0.5, 5.0));
        // Feet slightly sunk into the top face after a frame of falling
        let start = Vec3::new(0.3, 0.5 + 0.9 - 0.07, -0.2);
        let res = resolve(start, PLAYER_HALF_EXTENT, [floor]);

        assert!(res.grounded);
        assert!(res.ground_platform.is_none());
        assert_eq!(res.velocity_mask, Vec3::new(1.0, 0.0, 1.0));
        let feet = res.position.y - PLAYER_HALF_EXTENT.y;
        assert!((feet - 0.5).abs() < 1e-5, "feet at {feet}");
        assert_eq!(res.position.x, 0.3);
        assert_eq!(res.position.z, -0.2);
    }

    #[test]
    fn test_no_contact_keeps_everything() {
        let floor = fixed(Vec3::ZERO, Vec3::new(5.0, 0.5, 5.0));
        let start = Vec3::new(0.0, 3.0, 0.0);
        let res = resolve(start, PLAYER_HALF_EXTENT, [floor]);
        assert_eq!(res.position, start);
        assert_eq!(res.velocity_mask, Vec3::ONE);
        assert!(!res.grounded);
    }

    #[test]
    fn test_ceiling_hit_does_not_ground() {
        let ceiling = fixed(Vec3::new(0.0, 3.0, 0.0), Vec3::new(5.0, 0.5, 5.0));
        let start = Vec3::new(0.0, 3.0 - 0.5 - 0.9 + 0.05, 0.0);
        let res = resolve(start, PLAYER_HALF_EXTENT, [ceiling]);
        assert!(!res.grounded);
        assert!(res.position.y < start.y);
        assert_eq!(res.velocity_mask.y, 0.0);
    }

    #[test]
    fn test_side_wall_pushes_on_x() {
        let wall = fixed(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.5, 5.0, 5.0));
        let start = Vec3::new(0.1, 0.0, 0.0);
        let res = resolve(start, PLAYER_HALF_EXTENT, [wall]);
        // Player max.x must end up at the wall's min.x
        assert!((res.position.x + 0.45 - 0.5).abs() < 1e-5);
        assert_eq!(res.velocity_mask, Vec3::new(0.0, 1.0, 1.0));
        assert!(!res.grounded);
    }

    #[test]
    fn test_tie_break_order() {
        assert_eq!(SeparatingAxis::pick(Vec3::new(0.2, 0.2, 0.2)), SeparatingAxis::X);
        assert_eq!(SeparatingAxis::pick(Vec3::new(0.3, 0.2, 0.2)), SeparatingAxis::Z);
        assert_eq!(SeparatingAxis::pick(Vec3::new(0.2, 0.5, 0.2)), SeparatingAxis::X);
        assert_eq!(SeparatingAxis::pick(Vec3::new(0.5, 0.1, 0.2)), SeparatingAxis::Y);
    }

    #[test]
    fn test_equal_centers_push_positive() {
        let block = fixed(Vec3::ZERO, Vec3::splat(0.45));
        let res = resolve(Vec3::ZERO, Vec3::splat(0.45), [block]);
        // All depths equal: X wins, direction is + when not strictly less
        assert!((res.position.x - 0.9).abs() < 1e-6);
        assert_eq!(res.position.y, 0.0);
    }

    #[test]
    fn test_moving_platform_binds_support() {
        let lift = Collider {
            aabb: Aabb::new(Vec3::ZERO, Vec3::new(2.5, 0.5, 2.5)),
            support: Some(PlatformId(4)),
        };
        let res = resolve(Vec3::new(0.0, 1.35, 0.0), PLAYER_HALF_EXTENT, [lift]);
        assert!(res.grounded);
        assert_eq!(res.ground_platform, Some(PlatformId(4)));
    }

    #[test]
    fn test_order_dependence_is_preserved() {
        // Floor plus a low step overlapping the player's shin
        let floor = fixed(Vec3::new(0.0, -0.5, 0.0), Vec3::new(10.0, 0.5, 10.0));
        let step = fixed(Vec3::new(0.43, 0.0, 0.0), Vec3::new(0.3, 0.3, 2.0));
        let start = Vec3::new(0.0, 0.85, 0.0);

        // Floor first: standing on the floor, the step is shallow enough to climb
        let a = resolve(start, PLAYER_HALF_EXTENT, [floor, step]);
        assert!(a.grounded);
        assert!((a.position.y - 1.2).abs() < 1e-5);
        assert_eq!(a.position.x, 0.0);

        // Step first: still sunk into the floor, the step shoves sideways
        let b = resolve(start, PLAYER_HALF_EXTENT, [step, floor]);
        assert!(b.grounded);
        assert!((b.position.x + 0.32).abs() < 1e-5);
        assert!((b.position.y - 0.9).abs() < 1e-5);
    }

    #[test]
    fn test_no_residual_penetration() {
        let statics = [
            fixed(Vec3::new(0.0, -1.5, 0.0), Vec3::new(20.0, 1.0, 20.0)),
            fixed(Vec3::new(3.0, 0.0, -2.0), Vec3::new(3.0, 0.5, 3.0)),
            fixed(Vec3::new(-6.0, 2.0, 0.0), Vec3::new(1.0, 4.0, 1.0)),
        ];
        let starts = [
            Vec3::new(3.0, 1.3, -2.0),
            Vec3::new(-5.1, 1.0, 0.2),
            Vec3::new(8.0, -0.45, 4.0),
            Vec3::new(0.2, 0.35, -0.5),
        ];
        for start in starts {
            let res = resolve(start, PLAYER_HALF_EXTENT, statics);
            let player = Aabb::new(res.position, PLAYER_HALF_EXTENT);
            for c in &statics {
                let d = player.overlap_depths(&c.aabb);
                let penetrating = d.x > 1e-4 && d.y > 1e-4 && d.z > 1e-4;
                assert!(!penetrating, "start {start:?} still inside {c:?}: {d:?}");
            }
        }
    }
}
