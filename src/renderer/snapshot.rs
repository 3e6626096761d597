//! Immutable per-frame view of the world for whatever draws it

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::instance::{BoxInstance, InstanceKind, colors, rgb};
use crate::rebuild::Fidelity;
use crate::sim::{CameraFollower, World};

const COLLECTIBLE_HALF_EXTENT: Vec3 = Vec3::splat(0.35);
const GOAL_HALF_EXTENT: Vec3 = Vec3::splat(0.9);
const TINT_SEED: u64 = 0x5ca1_ab1e;

/// Random but repeatable colors for the moving platforms of a level
pub fn platform_tints(level_index: usize, count: usize) -> Vec<[f32; 4]> {
    let mut rng = Pcg32::seed_from_u64(TINT_SEED ^ level_index as u64);
    (0..count).map(|_| rgb(rng.random::<u32>() & 0x00ff_ffff)).collect()
}

/// Heading of a facing vector as a yaw angle
fn yaw_of(facing: Vec3) -> f32 {
    facing.x.atan2(facing.z)
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub instances: Vec<BoxInstance>,
    pub eye: Vec3,
    pub look_at: Vec3,
    pub background: [f32; 4],
    pub fidelity: Fidelity,
}

impl FrameSnapshot {
    /// Capture the world as seen from `camera`
    ///
    /// `tints` colors moving platforms in primitives mode; missing entries
    /// fall back to the default platform color.
    pub fn capture(world: &World, camera: &CameraFollower, fidelity: Fidelity, tints: &[[f32; 4]]) -> Self {
        let full = fidelity == Fidelity::Full;
        let mut instances = Vec::with_capacity(
            world.statics.len()
                + world.platforms.moving.len()
                + world.platforms.hazards.len()
                + world.collectibles.len()
                + 2,
        );

        let ground = if full { colors::PLATFORM_GRASS } else { colors::PLATFORM };
        for s in &world.statics {
            instances.push(BoxInstance::new(InstanceKind::Static, s.aabb.center, s.aabb.half_extent, ground));
        }

        for (i, m) in world.platforms.moving.iter().enumerate() {
            let color = if full {
                colors::MOVING_PLATFORM
            } else {
                tints.get(i).copied().unwrap_or(colors::MOVING_PLATFORM)
            };
            instances.push(BoxInstance::new(InstanceKind::Moving, m.aabb.center, m.aabb.half_extent, color));
        }

        for c in world.collectibles.iter().filter(|c| !c.taken) {
            instances.push(
                BoxInstance::new(
                    InstanceKind::Collectible,
                    c.display_position(),
                    COLLECTIBLE_HALF_EXTENT,
                    colors::COLLECTIBLE,
                )
                .with_yaw(c.spin),
            );
        }

        for h in &world.platforms.hazards {
            instances.push(BoxInstance::new(InstanceKind::Hazard, h.position(), h.aabb.half_extent, colors::HAZARD));
        }

        instances.push(
            BoxInstance::new(InstanceKind::Goal, world.goal.position, GOAL_HALF_EXTENT, colors::GOAL)
                .with_yaw(world.goal.spin.1),
        );

        let player = &world.player;
        instances.push(
            BoxInstance::new(InstanceKind::Player, player.position, player.half_extent, colors::PLAYER)
                .with_yaw(yaw_of(player.facing)),
        );

        Self {
            instances,
            eye: camera.position,
            look_at: camera.look_at,
            background: if full {
                colors::BACKGROUND_FULL
            } else {
                colors::BACKGROUND_PROTOTYPE
            },
            fidelity,
        }
    }

    pub fn count(&self, kind: InstanceKind) -> usize {
        self.instances.iter().filter(|b| b.is(kind)).count()
    }

    /// Raw bytes of the instance list, ready for upload
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LevelCatalog;

    fn world() -> World {
        let catalog = LevelCatalog::builtin().unwrap();
        World::from_level(0, catalog.level(0))
    }

    #[test]
    fn test_tints_are_deterministic_per_level() {
        assert_eq!(platform_tints(2, 3), platform_tints(2, 3));
        assert_ne!(platform_tints(2, 3), platform_tints(3, 3));
        assert!(platform_tints(0, 4).iter().all(|c| c[3] == 1.0));
    }

    #[test]
    fn test_capture_counts() {
        let mut world = world();
        world.collectibles[0].taken = true;
        let snap = FrameSnapshot::capture(&world, &CameraFollower::default(), Fidelity::Primitives, &[]);

        assert_eq!(snap.count(InstanceKind::Static), 8);
        assert_eq!(snap.count(InstanceKind::Moving), 2);
        assert_eq!(snap.count(InstanceKind::Collectible), 3);
        assert_eq!(snap.count(InstanceKind::Hazard), 1);
        assert_eq!(snap.count(InstanceKind::Goal), 1);
        assert_eq!(snap.count(InstanceKind::Player), 1);
        assert_eq!(snap.instance_bytes().len(), snap.instances.len() * 48);
        assert_eq!(snap.background, colors::BACKGROUND_PROTOTYPE);
    }

    #[test]
    fn test_tints_only_in_primitives() {
        let world = world();
        let tints = platform_tints(0, 2);
        let proto = FrameSnapshot::capture(&world, &CameraFollower::default(), Fidelity::Primitives, &tints);
        let full = FrameSnapshot::capture(&world, &CameraFollower::default(), Fidelity::Full, &tints);

        let moving = |s: &FrameSnapshot| -> Vec<[f32; 4]> {
            s.instances
                .iter()
                .filter(|b| b.is(InstanceKind::Moving))
                .map(|b| b.color)
                .collect()
        };
        assert_eq!(moving(&proto), tints);
        assert!(moving(&full).iter().all(|c| *c == colors::MOVING_PLATFORM));
    }

    #[test]
    fn test_player_yaw_follows_facing() {
        let mut world = world();
        world.player.facing = Vec3::X;
        let snap = FrameSnapshot::capture(&world, &CameraFollower::default(), Fidelity::Primitives, &[]);
        let player = snap.instances.iter().find(|b| b.is(InstanceKind::Player)).unwrap();
        assert!((player.yaw - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
