//! Game facade
//!
//! Owns the active world and everything around it: level progression, the
//! background rebuilder, the camera and the notification sink. One `update`
//! call is one rendered frame:
//!
//! 1. Publish a finished rebuild, if any
//! 2. Simulate (platforms, player, triggers)
//! 3. Launch the rebuild for a freshly queued transition
//! 4. Follow the player with the camera
//!
//! Nothing here blocks; level loads complete on a later frame.

use std::sync::Arc;

use crate::levels::LevelCatalog;
use crate::notify::{LogNotifier, Notifier};
use crate::rebuild::{AssetSource, Fidelity, RebuiltWorld, Rebuilder, WorldAssets};
use crate::renderer::{FrameSnapshot, platform_tints};
use crate::settings::{RenderMode, Settings};
use crate::sim::{
    CameraFollower, GameEvent, InputIntent, KinematicController, LevelProgress, RequestOutcome, World, tick,
};
use crate::tuning::Difficulty;

/// Which message to show once the pending rebuild is published
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Announcement {
    Level,
    Mode,
}

pub struct Game<N: Notifier = LogNotifier> {
    catalog: LevelCatalog,
    settings: Settings,
    world: World,
    fidelity: Fidelity,
    controller: KinematicController,
    progress: LevelProgress,
    camera: CameraFollower,
    rebuilder: Rebuilder,
    /// Full-mode assets from the first successful fetch
    assets: Option<WorldAssets>,
    tints: Vec<[f32; 4]>,
    announce: Option<Announcement>,
    notifier: N,
}

impl<N: Notifier> Game<N> {
    /// Start on `settings.start_level` with a primitives world
    ///
    /// In Full mode the start level is immediately queued for a rebuild so
    /// the assets load in the background.
    pub fn new(settings: Settings, catalog: LevelCatalog, source: Arc<dyn AssetSource>, notifier: N) -> Self {
        let progress = LevelProgress::starting_at(catalog.len(), settings.start_level);
        let index = progress.current_index();
        let world = World::from_level(index, catalog.level(index));
        let mut camera = CameraFollower::new(settings.camera_yaw, settings.camera_pitch, settings.camera_distance);
        camera.snap(world.player.position);

        log::info!(
            "Starting on level {}/{} ({}, {})",
            index + 1,
            catalog.len(),
            settings.mode.as_str(),
            settings.difficulty.label()
        );

        let mut game = Self {
            tints: platform_tints(index, world.platforms.moving.len()),
            catalog,
            settings,
            world,
            fidelity: Fidelity::Primitives,
            controller: KinematicController::new(),
            progress,
            camera,
            rebuilder: Rebuilder::new(source),
            assets: None,
            announce: None,
            notifier,
        };
        if game.settings.mode == RenderMode::Full {
            game.request_current(Announcement::Mode);
        }
        game
    }

    /// Advance one rendered frame
    pub fn update(&mut self, dt: f32, input: &InputIntent) -> Vec<GameEvent> {
        let mut events = Vec::new();

        if let Some(rebuilt) = self.rebuilder.poll() {
            self.publish(rebuilt, &mut events);
        }

        let basis = self.camera.basis();
        events.extend(tick(
            &mut self.world,
            &mut self.controller,
            &mut self.progress,
            input,
            &basis,
            self.settings.difficulty,
            dt,
        ));

        if let Some(target) = self.progress.take_pending() {
            if self.announce.is_none() {
                self.announce = Some(Announcement::Level);
            }
            self.rebuilder.launch(
                target,
                self.catalog.level(target).clone(),
                self.settings.mode,
                self.assets.clone(),
            );
        }

        self.camera.update(dt.clamp(0.0, crate::consts::MAX_DT), self.world.player.position);

        for event in &events {
            self.notifier.notify(&event.to_string());
        }
        events
    }

    /// Swap in a finished world; the single point where the active level changes
    fn publish(&mut self, rebuilt: RebuiltWorld, events: &mut Vec<GameEvent>) {
        let RebuiltWorld {
            target,
            world,
            fidelity,
            assets,
            fallback_reason,
        } = rebuilt;

        self.world = world;
        self.fidelity = fidelity;
        self.tints = platform_tints(target, self.world.platforms.moving.len());
        if assets.is_some() {
            self.assets = assets;
        }
        self.progress.finish();

        if let Some(reason) = fallback_reason {
            events.push(GameEvent::AssetFallback { reason });
        }

        let count = self.catalog.len();
        events.push(match self.announce.take() {
            Some(Announcement::Mode) => GameEvent::ModeChanged {
                label: self.settings.mode.as_str(),
                level: target,
                count,
            },
            _ => GameEvent::LevelLoaded { level: target, count },
        });
        log::info!("Level {}/{} ready ({:?})", target + 1, count, fidelity);
    }

    fn request(&mut self, outcome: RequestOutcome, announce: Announcement) -> RequestOutcome {
        if outcome == RequestOutcome::Accepted {
            self.announce = Some(announce);
        }
        outcome
    }

    fn request_current(&mut self, announce: Announcement) -> RequestOutcome {
        let outcome = self.progress.request(self.progress.current_index());
        self.request(outcome, announce)
    }

    fn emit(&mut self, event: GameEvent) {
        self.notifier.notify(&event.to_string());
    }

    // === Controls ===

    /// Select difficulty by tier 1-3; other values are ignored
    pub fn set_difficulty(&mut self, tier: u8) -> bool {
        match Difficulty::from_tier(tier) {
            Some(difficulty) => {
                self.settings.difficulty = difficulty;
                self.emit(GameEvent::DifficultyChanged {
                    label: difficulty.label(),
                });
                true
            }
            None => {
                log::warn!("Ignoring difficulty tier {tier} (expected 1-3)");
                false
            }
        }
    }

    /// Switch render mode and rebuild the current level with it
    ///
    /// If a transition is already in flight the new mode still sticks and
    /// applies from the next rebuild on.
    pub fn set_mode(&mut self, mode: RenderMode) -> RequestOutcome {
        self.settings.mode = mode;
        self.request_current(Announcement::Mode)
    }

    pub fn go_to_level(&mut self, index: i64) -> RequestOutcome {
        let outcome = self.progress.go_to(index);
        self.request(outcome, Announcement::Level)
    }

    pub fn next_level(&mut self) -> RequestOutcome {
        let outcome = self.progress.advance();
        self.request(outcome, Announcement::Level)
    }

    /// Back to the first level (win screen "play again")
    pub fn restart_run(&mut self) -> RequestOutcome {
        let outcome = self.progress.restart_run();
        self.request(outcome, Announcement::Level)
    }

    /// Respawn on the current level without reloading it
    pub fn reset(&mut self) {
        self.world.respawn();
        self.emit(GameEvent::Reset {
            level: self.progress.current_index(),
            count: self.catalog.len(),
        });
    }

    pub fn orbit_camera(&mut self, dx: f32, dy: f32) {
        self.camera.orbit(dx, dy);
    }

    pub fn zoom_camera(&mut self, delta: f32) {
        self.camera.zoom(delta);
    }

    pub fn pinch_camera(&mut self, start_distance: f32, scale: f32) {
        self.camera.pinch(start_distance, scale);
    }

    // === Queries ===

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.world, &self.camera, self.fidelity, &self.tints)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn progress(&self) -> &LevelProgress {
        &self.progress
    }

    pub fn camera(&self) -> &CameraFollower {
        &self.camera
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn fidelity(&self) -> Fidelity {
        self.fidelity
    }

    pub fn level_count(&self) -> usize {
        self.catalog.len()
    }

    /// A level transition is queued or being rebuilt
    pub fn is_advancing(&self) -> bool {
        !self.progress.is_idle()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}
