//! Skyhop headless runner
//!
//! Plays a short scripted run through the first level without a window and
//! logs every notification. Useful for checking feel changes from a terminal:
//!
//! ```text
//! RUST_LOG=info skyhop [settings.json] [seconds]
//! ```

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::process::ExitCode;
    use std::sync::Arc;

    use skyhop::rebuild::DirectoryAssets;
    use skyhop::sim::InputIntent;
    use skyhop::{Game, LevelCatalog, LogNotifier, Settings};

    env_logger::init();
    log::info!("Skyhop (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = args.next().map(Settings::load).unwrap_or_default();
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(6.0);

    let catalog = match LevelCatalog::builtin() {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("Built-in levels are broken: {e}");
            return ExitCode::FAILURE;
        }
    };

    let source = Arc::new(DirectoryAssets::new("assets"));
    let mut game = Game::new(settings, catalog, source, LogNotifier);

    const DT: f32 = 1.0 / 60.0;
    let frames = (seconds / DT) as u32;
    for frame in 0..frames {
        let t = frame as f32 * DT;
        // Walk toward the first steps, hop twice and dash once on the way
        let input = InputIntent {
            forward: true,
            right: t > 0.5,
            jump_held: (1.0..1.1).contains(&t) || (2.2..2.3).contains(&t),
            dash_held: (2.5..2.55).contains(&t),
            ..Default::default()
        };
        game.update(DT, &input);

        if frame % 60 == 0 {
            let p = &game.world().player;
            log::debug!(
                "t={t:.1}s pos=({:.2}, {:.2}, {:.2}) grounded={} speed={:.2}",
                p.position.x,
                p.position.y,
                p.position.z,
                p.grounded,
                p.horizontal_speed()
            );
        }
    }

    let world = game.world();
    let snapshot = game.snapshot();
    println!(
        "Level {}/{} after {seconds:.1}s: player at {:?}, {}/{} collected, {} boxes in frame",
        game.progress().current_index() + 1,
        game.level_count(),
        world.player.position,
        world.collected_count(),
        world.collectibles.len(),
        snapshot.instances.len()
    );
    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser builds drive `skyhop::Game` from their own frame callback
}
