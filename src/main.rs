//! Dopaman entry point
//!
//! Loads settings, assets and the high score, then runs the game loop. With
//! no windowing backend linked in, the game plays itself headless and logs
//! its HUD (set `RUST_LOG=info` to watch).

use std::path::Path;

use dopaman::assets::load_assets;
use dopaman::audio::AudioManager;
use dopaman::consts::TICK_RATE;
use dopaman::platform::{LogRenderer, ScriptedInput};
use dopaman::settings::SETTINGS_FILE;
use dopaman::sim::GameState;
use dopaman::{App, FileHighScoreStore, HighScoreStore, Settings};

fn main() {
    env_logger::init();
    log::info!("Dopaman starting...");

    let settings = Settings::load(Path::new(SETTINGS_FILE));

    let assets = match load_assets(&settings.asset_dir) {
        Ok(assets) => assets,
        Err(e) => {
            eprintln!("Error loading assets: {e}");
            std::process::exit(1);
        }
    };

    let store = FileHighScoreStore::new(&settings.high_score_file);
    let high_score = store.load();

    let seed: u64 = rand::random();
    log::info!("Seed {}", seed);
    let state = GameState::new(seed, settings.difficulty, high_score);

    let audio = AudioManager::new(None, &assets, &settings);
    let mut app = App::new(
        state,
        LogRenderer::new(TICK_RATE * 5),
        ScriptedInput::autopilot(),
        audio,
        store,
    );
    app.run();
}
