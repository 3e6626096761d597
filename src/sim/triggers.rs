//! Overlap checks against hazards, pickups and the goal
//!
//! Run after the player step. A hazard hit respawns the player and skips the
//! remaining checks for the frame.

use super::platforms::PlatformSimulator;
use super::player::PlayerState;
use super::progress::{LevelProgress, RequestOutcome};
use super::state::{Collectible, GameEvent, Goal, World};
use crate::consts::PICKUP_RADIUS;

/// True if the player box overlaps any hazard box
pub fn hazard_contact(player: &PlayerState, platforms: &PlatformSimulator) -> bool {
    let body = player.aabb();
    platforms.hazards.iter().any(|h| body.overlaps(&h.aabb))
}

/// Mark every untaken pickup within reach as taken
///
/// Returns the indices collected this call, in table order.
pub fn collect_pickups(player: &PlayerState, collectibles: &mut [Collectible]) -> Vec<usize> {
    let mut taken = Vec::new();
    for (i, c) in collectibles.iter_mut().enumerate() {
        if !c.taken && player.position.distance(c.position) < PICKUP_RADIUS {
            c.taken = true;
            taken.push(i);
        }
    }
    taken
}

pub fn goal_reached(player: &PlayerState, goal: &Goal) -> bool {
    player.position.distance(goal.position) < goal.trigger_radius
}

/// Run all trigger checks for one frame, appending what happened to `events`
pub fn evaluate(world: &mut World, progress: &mut LevelProgress, events: &mut Vec<GameEvent>) {
    if hazard_contact(&world.player, &world.platforms) {
        log::debug!("Hazard hit at {:?}", world.player.position);
        world.respawn();
        events.push(GameEvent::HazardHit);
        return;
    }

    let total = world.collectibles.len();
    let newly = collect_pickups(&world.player, &mut world.collectibles);
    if !newly.is_empty() {
        let mut collected = world.collected_count() - newly.len();
        for _ in newly {
            collected += 1;
            events.push(GameEvent::Pickup { collected, total });
        }
    }

    if goal_reached(&world.player, &world.goal) && progress.advance() == RequestOutcome::Accepted {
        let next = (progress.current_index() + 1) % progress.level_count();
        log::info!("Level {} cleared", progress.current_index() + 1);
        events.push(GameEvent::LevelClear {
            next,
            count: progress.level_count(),
        });
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::levels::LevelCatalog;

    fn first_world() -> (World, LevelProgress) {
        let catalog = LevelCatalog::builtin().unwrap();
        (
            World::from_level(0, catalog.level(0)),
            LevelProgress::new(catalog.len()),
        )
    }

    #[test]
    fn test_hazard_respawns_and_resets_pickups() {
        let (mut world, mut progress) = first_world();
        world.collectibles[0].taken = true;
        world.player.velocity = Vec3::new(3.0, -1.0, 2.0);
        world.player.dash_available = false;
        world.player.facing = Vec3::X;
        world.player.position = world.platforms.hazards[0].position();

        let mut events = Vec::new();
        evaluate(&mut world, &mut progress, &mut events);

        assert_eq!(events, vec![GameEvent::HazardHit]);
        assert_eq!(world.player.position, world.player.spawn_position);
        assert_eq!(world.player.velocity, Vec3::ZERO);
        assert!(world.player.dash_available);
        assert_eq!(world.player.facing, Vec3::Z);
        assert_eq!(world.collected_count(), 0);
    }

    #[test]
    fn test_hazard_short_circuits_goal() {
        let (mut world, mut progress) = first_world();
        // Park a drone on the goal
        world.platforms.hazards[0].aabb.center = world.goal.position;
        world.player.position = world.goal.position;

        let mut events = Vec::new();
        evaluate(&mut world, &mut progress, &mut events);
        assert_eq!(events, vec![GameEvent::HazardHit]);
        assert!(progress.is_idle());
    }

    #[test]
    fn test_pickup_is_idempotent() {
        let (mut world, _) = first_world();
        world.player.position = world.collectibles[0].position + Vec3::new(0.5, 0.5, 0.0);
        assert_eq!(collect_pickups(&world.player, &mut world.collectibles), vec![0]);
        assert!(collect_pickups(&world.player, &mut world.collectibles).is_empty());
        assert_eq!(world.collected_count(), 1);
    }

    #[test]
    fn test_pickup_out_of_reach() {
        let (mut world, _) = first_world();
        world.player.position = world.collectibles[0].position + Vec3::new(PICKUP_RADIUS + 0.05, 0.0, 0.0);
        assert!(collect_pickups(&world.player, &mut world.collectibles).is_empty());
    }

    #[test]
    fn test_pickup_event_counts() {
        let (mut world, mut progress) = first_world();
        world.collectibles[2].taken = true;
        world.player.position = world.collectibles[1].position;

        let mut events = Vec::new();
        evaluate(&mut world, &mut progress, &mut events);
        assert_eq!(
            events,
            vec![GameEvent::Pickup {
                collected: 2,
                total: 4
            }]
        );
    }

    #[test]
    fn test_goal_requests_once() {
        let (mut world, mut progress) = first_world();
        world.player.position = world.goal.position + Vec3::new(0.0, 0.5, 0.0);

        let mut events = Vec::new();
        for _ in 0..10 {
            evaluate(&mut world, &mut progress, &mut events);
        }

        let clears: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelClear { .. }))
            .collect();
        assert_eq!(clears, vec![&GameEvent::LevelClear { next: 1, count: 7 }]);
        assert_eq!(progress.take_pending(), Some(1));
        assert_eq!(progress.take_pending(), None);
    }
}
