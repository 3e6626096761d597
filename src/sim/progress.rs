//! Level progression state machine
//!
//! Two states with a single pending slot. A transition request is accepted
//! only while idle; everything that arrives while a rebuild is pending or in
//! flight is dropped. `finish` always returns the machine to idle, whether the
//! rebuild succeeded or fell back to primitives.

use serde::{Deserialize, Serialize};

/// Where the progression currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LevelPhase {
    /// Playing the current level, ready for a transition
    #[default]
    Idle,
    /// A transition to `target` is pending or being rebuilt
    Advancing { target: usize },
}

/// Result of a transition request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Accepted,
    /// Another transition was already in progress
    Dropped,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelProgress {
    current_index: usize,
    level_count: usize,
    pending_target: Option<usize>,
    phase: LevelPhase,
}

impl LevelProgress {
    /// Start idle on level 0 of a catalog with `level_count` levels (at least 1)
    pub fn new(level_count: usize) -> Self {
        Self::starting_at(level_count, 0)
    }

    /// Start idle on `index` (wrapped into range)
    pub fn starting_at(level_count: usize, index: i64) -> Self {
        let level_count = level_count.max(1);
        Self {
            current_index: index.rem_euclid(level_count as i64) as usize,
            level_count,
            pending_target: None,
            phase: LevelPhase::Idle,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn level_count(&self) -> usize {
        self.level_count
    }

    pub fn phase(&self) -> LevelPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == LevelPhase::Idle
    }

    /// Wrap any index (negative or past the end) into the catalog
    pub fn normalize(&self, index: i64) -> usize {
        index.rem_euclid(self.level_count as i64) as usize
    }

    /// Ask for a transition to `target` (wrapped into range)
    pub fn request(&mut self, target: usize) -> RequestOutcome {
        match self.phase {
            LevelPhase::Idle => {
                let target = target % self.level_count;
                self.pending_target = Some(target);
                self.phase = LevelPhase::Advancing { target };
                RequestOutcome::Accepted
            }
            LevelPhase::Advancing { target: busy } => {
                log::debug!("Level request {target} dropped, already advancing to {busy}");
                RequestOutcome::Dropped
            }
        }
    }

    /// Jump to an arbitrary level index
    pub fn go_to(&mut self, index: i64) -> RequestOutcome {
        let target = self.normalize(index);
        self.request(target)
    }

    /// Request the level after the current one, wrapping at the end
    pub fn advance(&mut self) -> RequestOutcome {
        self.request((self.current_index + 1) % self.level_count)
    }

    /// Request a fresh run from the first level
    pub fn restart_run(&mut self) -> RequestOutcome {
        self.request(0)
    }

    /// Hand the pending target to whoever launches the rebuild; yields it once
    pub fn take_pending(&mut self) -> Option<usize> {
        self.pending_target.take()
    }

    /// Rebuild is done and published
    ///
    /// Returns the new current index, or `None` if nothing was advancing.
    pub fn finish(&mut self) -> Option<usize> {
        match self.phase {
            LevelPhase::Advancing { target } => {
                self.current_index = target;
                self.pending_target = None;
                self.phase = LevelPhase::Idle;
                Some(target)
            }
            LevelPhase::Idle => None,
        }
    }
}
