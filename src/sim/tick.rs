//! Variable timestep simulation tick
//!
//! Advances the active world by one rendered frame. Everything here is
//! deterministic for a given sequence of `(input, dt)` pairs.

use super::camera::MoveBasis;
use super::player::KinematicController;
use super::progress::LevelProgress;
use super::state::{GameEvent, World};
use super::triggers;
use crate::consts::MAX_DT;
use crate::tuning::Difficulty;

/// Held controls for one frame, already decoupled from any input device
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputIntent {
    pub left: bool,
    pub right: bool,
    pub forward: bool,
    pub back: bool,
    pub jump_held: bool,
    pub dash_held: bool,
}

impl InputIntent {
    /// Raw (strafe, forward) axes in {-1, 0, 1}
    pub fn axes(&self) -> (f32, f32) {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        (axis(self.left, self.right), axis(self.back, self.forward))
    }
}

/// Advance the world by one frame and report what happened
///
/// Order: platforms and hazards, cosmetics, player step, then triggers. A fall
/// below the death plane respawns the player and skips the triggers.
pub fn tick(
    world: &mut World,
    controller: &mut KinematicController,
    progress: &mut LevelProgress,
    input: &InputIntent,
    basis: &MoveBasis,
    difficulty: Difficulty,
    dt: f32,
) -> Vec<GameEvent> {
    let dt = dt.clamp(0.0, MAX_DT);
    let tuning = difficulty.tuning();
    let mut events = Vec::new();

    world.time += dt;
    world.platforms.update(dt, tuning.hazard_speed_scale);

    for c in &mut world.collectibles {
        c.animate(dt);
    }
    world.goal.animate(dt);

    let outcome = controller.step(
        &mut world.player,
        dt,
        input,
        basis,
        &tuning,
        &world.statics,
        &world.platforms,
    );
    if outcome.jumped {
        events.push(GameEvent::Jump);
    }
    if outcome.dashed {
        events.push(GameEvent::Dash);
    }
    if outcome.fell {
        log::debug!("Fell below the death plane");
        world.respawn();
        events.push(GameEvent::Fell);
        return events;
    }

    triggers::evaluate(world, progress, &mut events);
    events
}
