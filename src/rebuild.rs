//! Asynchronous world rebuild
//!
//! A level change builds the next `World` on a worker thread, optionally
//! fetching Full-mode assets first. The frame loop polls for the result at the
//! start of a frame and swaps it in with one assignment. A failed fetch is
//! tried once and the level is built from primitives instead; a worker that
//! dies without reporting is replaced by a synchronous primitives build, so a
//! launched rebuild always produces a world.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use thiserror::Error;

use crate::levels::LevelDef;
use crate::settings::RenderMode;
use crate::sim::World;

pub const GROUND_TEXTURE_FILE: &str = "grasslight-big.jpg";
pub const PLAYER_MODEL_FILE: &str = "RobotExpressive.glb";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("asset {0} is empty")]
    Empty(PathBuf),
    #[error("asset source unavailable: {0}")]
    Unavailable(String),
}

/// Raw Full-mode assets; decoding is the renderer's business
#[derive(Debug, Clone)]
pub struct WorldAssets {
    pub ground_texture: Arc<[u8]>,
    pub player_model: Arc<[u8]>,
}

/// Where Full-mode assets come from
pub trait AssetSource: Send + Sync {
    fn fetch(&self) -> Result<WorldAssets, AssetError>;
}

/// Reads assets from a local directory
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read(&self, name: &str) -> Result<Arc<[u8]>, AssetError> {
        let path = self.root.join(name);
        let bytes = fs::read(&path).map_err(|source| AssetError::Io {
            path: path.clone(),
            source,
        })?;
        if bytes.is_empty() {
            return Err(AssetError::Empty(path));
        }
        Ok(bytes.into())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirectoryAssets {
    fn fetch(&self) -> Result<WorldAssets, AssetError> {
        let ground_texture = self.read(GROUND_TEXTURE_FILE)?;
        let player_model = self.read(PLAYER_MODEL_FILE)?;
        log::info!("Loaded Full mode assets from {}", self.root.display());
        Ok(WorldAssets {
            ground_texture,
            player_model,
        })
    }
}

/// How a rebuilt world will be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fidelity {
    Full,
    Primitives,
}

/// A finished rebuild, ready to be published
#[derive(Debug)]
pub struct RebuiltWorld {
    pub target: usize,
    pub world: World,
    pub fidelity: Fidelity,
    /// Assets the world was built with; the caller caches them
    pub assets: Option<WorldAssets>,
    /// Why Full mode was not honored, if it was requested
    pub fallback_reason: Option<String>,
}

impl RebuiltWorld {
    fn primitives(target: usize, level: &LevelDef, reason: Option<String>) -> Self {
        Self {
            target,
            world: World::from_level(target, level),
            fidelity: Fidelity::Primitives,
            assets: None,
            fallback_reason: reason,
        }
    }
}

fn build(
    target: usize,
    level: &LevelDef,
    mode: RenderMode,
    cached: Option<WorldAssets>,
    source: &dyn AssetSource,
) -> RebuiltWorld {
    if mode == RenderMode::Prototype {
        return RebuiltWorld::primitives(target, level, None);
    }

    let fetched = match cached {
        Some(assets) => Ok(assets),
        None => source.fetch(),
    };
    match fetched {
        Ok(assets) => RebuiltWorld {
            target,
            world: World::from_level(target, level),
            fidelity: Fidelity::Full,
            assets: Some(assets),
            fallback_reason: None,
        },
        Err(e) => {
            log::warn!("Full mode asset load failed: {e}");
            RebuiltWorld::primitives(target, level, Some(e.to_string()))
        }
    }
}

struct InFlight {
    target: usize,
    level: LevelDef,
    rx: Receiver<RebuiltWorld>,
}

/// Runs at most one world rebuild at a time
pub struct Rebuilder {
    source: Arc<dyn AssetSource>,
    in_flight: Option<InFlight>,
    /// Result produced without a worker (spawn failure)
    ready: Option<RebuiltWorld>,
}

impl Rebuilder {
    pub fn new(source: Arc<dyn AssetSource>) -> Self {
        Self {
            source,
            in_flight: None,
            ready: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some() || self.ready.is_some()
    }

    /// Start building `level` as catalog entry `target`
    ///
    /// The caller guarantees only one rebuild is launched at a time; a second
    /// launch replaces the first and its result is discarded.
    pub fn launch(&mut self, target: usize, level: LevelDef, mode: RenderMode, cached: Option<WorldAssets>) {
        if self.is_busy() {
            log::warn!("Rebuild launched while another is in flight; dropping the old one");
            self.in_flight = None;
            self.ready = None;
        }

        let (tx, rx) = mpsc::channel();
        let source = Arc::clone(&self.source);
        let worker_level = level.clone();
        let spawned = thread::Builder::new()
            .name("world-rebuild".into())
            .spawn(move || {
                let rebuilt = build(target, &worker_level, mode, cached, source.as_ref());
                // Receiver gone means the result was superseded
                let _ = tx.send(rebuilt);
            });

        match spawned {
            Ok(_) => {
                log::debug!("Rebuilding level {} ({})", target + 1, mode.as_str());
                self.in_flight = Some(InFlight { target, level, rx });
            }
            Err(e) => {
                log::warn!("Could not spawn rebuild worker: {e}");
                self.ready = Some(RebuiltWorld::primitives(target, &level, Some(e.to_string())));
            }
        }
    }

    /// Non-blocking check for a finished rebuild
    pub fn poll(&mut self) -> Option<RebuiltWorld> {
        if let Some(done) = self.ready.take() {
            return Some(done);
        }

        let in_flight = self.in_flight.as_ref()?;
        match in_flight.rx.try_recv() {
            Ok(rebuilt) => {
                self.in_flight = None;
                Some(rebuilt)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                let InFlight { target, level, .. } = self.in_flight.take()?;
                log::warn!("Rebuild worker for level {} died; building primitives", target + 1);
                Some(RebuiltWorld::primitives(
                    target,
                    &level,
                    Some("rebuild worker stopped".to_owned()),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    use super::*;
    use crate::levels::LevelCatalog;

    struct Failing;

    impl AssetSource for Failing {
        fn fetch(&self) -> Result<WorldAssets, AssetError> {
            Err(AssetError::Unavailable("offline".into()))
        }
    }

    struct InMemory;

    impl AssetSource for InMemory {
        fn fetch(&self) -> Result<WorldAssets, AssetError> {
            Ok(WorldAssets {
                ground_texture: Arc::from(&b"jpg"[..]),
                player_model: Arc::from(&b"glb"[..]),
            })
        }
    }

    /// Blocks until the test sends a go-ahead
    struct Gated(Mutex<Receiver<()>>);

    impl AssetSource for Gated {
        fn fetch(&self) -> Result<WorldAssets, AssetError> {
            let gate = self.0.lock().map_err(|_| AssetError::Unavailable("poisoned".into()))?;
            let _ = gate.recv();
            InMemory.fetch()
        }
    }

    struct Panicking;

    impl AssetSource for Panicking {
        fn fetch(&self) -> Result<WorldAssets, AssetError> {
            panic!("asset backend crashed");
        }
    }

    fn level(i: usize) -> LevelDef {
        LevelCatalog::builtin().unwrap().level(i).clone()
    }

    fn wait(rebuilder: &mut Rebuilder) -> RebuiltWorld {
        let start = Instant::now();
        loop {
            if let Some(done) = rebuilder.poll() {
                return done;
            }
            assert!(start.elapsed() < Duration::from_secs(5), "rebuild never finished");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_prototype_never_fetches() {
        let mut r = Rebuilder::new(Arc::new(Failing));
        r.launch(2, level(2), RenderMode::Prototype, None);
        let done = wait(&mut r);
        assert_eq!(done.target, 2);
        assert_eq!(done.world.level_index, 2);
        assert_eq!(done.fidelity, Fidelity::Primitives);
        assert!(done.fallback_reason.is_none());
        assert!(!r.is_busy());
    }

    #[test]
    fn test_fetch_failure_falls_back() {
        let mut r = Rebuilder::new(Arc::new(Failing));
        r.launch(1, level(1), RenderMode::Full, None);
        let done = wait(&mut r);
        assert_eq!(done.fidelity, Fidelity::Primitives);
        assert!(done.assets.is_none());
        assert!(done.fallback_reason.unwrap().contains("offline"));
    }

    #[test]
    fn test_full_mode_with_assets() {
        let mut r = Rebuilder::new(Arc::new(InMemory));
        r.launch(0, level(0), RenderMode::Full, None);
        let done = wait(&mut r);
        assert_eq!(done.fidelity, Fidelity::Full);
        assert_eq!(&*done.assets.unwrap().player_model, b"glb");
    }

    #[test]
    fn test_cached_assets_skip_fetch() {
        let cached = InMemory.fetch().unwrap();
        let mut r = Rebuilder::new(Arc::new(Failing));
        r.launch(0, level(0), RenderMode::Full, Some(cached));
        assert_eq!(wait(&mut r).fidelity, Fidelity::Full);
    }

    #[test]
    fn test_poll_does_not_block() {
        let (go, gate) = mpsc::channel();
        let mut r = Rebuilder::new(Arc::new(Gated(Mutex::new(gate))));
        r.launch(3, level(3), RenderMode::Full, None);

        for _ in 0..20 {
            assert!(r.poll().is_none());
        }
        assert!(r.is_busy());

        go.send(()).unwrap();
        let done = wait(&mut r);
        assert_eq!(done.target, 3);
        assert_eq!(done.fidelity, Fidelity::Full);
    }

    #[test]
    fn test_dead_worker_builds_fallback() {
        let mut r = Rebuilder::new(Arc::new(Panicking));
        r.launch(4, level(4), RenderMode::Full, None);
        let done = wait(&mut r);
        assert_eq!(done.target, 4);
        assert_eq!(done.fidelity, Fidelity::Primitives);
        assert!(done.fallback_reason.is_some());
    }

    #[test]
    fn test_directory_assets_missing_files() {
        let source = DirectoryAssets::new(std::env::temp_dir().join("skyhop-no-such-dir"));
        assert!(matches!(source.fetch(), Err(AssetError::Io { .. })));
    }

    #[test]
    fn test_poll_idle_is_none() {
        let mut r = Rebuilder::new(Arc::new(InMemory));
        assert!(r.poll().is_none());
    }
}
