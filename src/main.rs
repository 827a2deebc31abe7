//! Sprite Clicker entry point
//!
//! Headless demo: a simulated player works through the unlocked levels and
//! the progress is saved between runs.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use sprite_clicker::Tuning;
use sprite_clicker::persistence::LevelProgressStore;
use sprite_clicker::sim::{SessionState, run_level};

/// Attempts per level before the demo gives up
const MAX_ATTEMPTS: u32 = 3;

/// Play every level from the first up to the final one, retrying failures
fn run_campaign(tuning: &Tuning, seed: u64, mut store: Box<dyn LevelProgressStore>) {
    log::info!("Unlocked level on start: {}", store.unlocked_level());

    let mut seed = seed;
    for level in 1..=tuning.final_level {
        if level > store.unlocked_level() {
            log::info!("Level {} is locked, stopping", level);
            return;
        }

        let mut cleared = false;
        for attempt in 1..=MAX_ATTEMPTS {
            let (report, returned) = run_level(level, tuning, seed, store);
            store = returned;
            seed = seed.wrapping_add(1);

            let snap = report.snapshot;
            log::info!(
                "Level {} attempt {}: {:?} with {}/{} ({} frames)",
                level,
                attempt,
                snap.state,
                snap.score,
                snap.target,
                report.frames
            );

            if snap.state == SessionState::Complete {
                if let Some(unlock) = report.unlock {
                    if unlock.game_finished {
                        log::info!("Final level cleared - roll the ending!");
                    }
                }
                cleared = true;
                break;
            }
        }

        if !cleared {
            log::warn!("Level {} not cleared after {} attempts", level, MAX_ATTEMPTS);
            return;
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    use sprite_clicker::persistence::LocalStorageStore;

    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    log::info!("Sprite Clicker starting...");
    let seed = js_sys::Date::now() as u64;
    run_campaign(&Tuning::default(), seed, Box::new(LocalStorageStore::load()));
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use sprite_clicker::persistence::FileStore;
    use std::path::Path;
    use std::time::{SystemTime, UNIX_EPOCH};

    env_logger::init();
    log::info!("Sprite Clicker (native) starting...");

    // Optional tuning JSON as the first argument
    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load_or_default(Path::new(&path)),
        None => Tuning::default(),
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    log::info!("Seed: {}", seed);

    let store = FileStore::open("sprite_clicker_progress.json");
    run_campaign(&tuning, seed, Box::new(store));
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
