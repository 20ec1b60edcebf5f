//! Flippy Bottle entry point
//!
//! The browser build is driven from JavaScript through the library's
//! `FlipGame` export. Natively this runs a headless demo: one auto-played
//! round, logged event by event.
//!
//! Usage: `flippy-bottle [seed] [tuning.json]` (set `RUST_LOG=debug` for detail)

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flippy_bottle::persistence::{self, MemoryStore};
    use flippy_bottle::sim::{GameEvent, PowerZone, RoundController, RoundPhase};
    use flippy_bottle::{Game, Tuning};

    env_logger::init();
    log::info!("Flippy Bottle (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5EED);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring tuning file {}: {}", path, e);
                Tuning::default()
            }),
            Err(e) => {
                log::warn!("Could not read {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };
    let frame_ms = tuning.oscillator_interval_ms;

    let store = MemoryStore::new();
    let progress = persistence::load_or_default(&store);
    let mut game = Game::with_controller(RoundController::with_tuning(seed, tuning), progress, store);
    log::info!("Game initialized with seed: {}", seed);

    game.start_round();
    let mut flips = 0u32;
    let mut ended = false;

    // Bot: hold until the meter enters the sweet spot, then let go
    while !ended && flips < 1000 {
        match game.controller().phase() {
            RoundPhase::Idle => {
                game.press_start();
                flips += 1;
            }
            RoundPhase::Charging => {
                if PowerZone::from_charge(game.controller().charge()) == PowerZone::Perfect {
                    game.press_end();
                }
            }
            RoundPhase::Flying | RoundPhase::RoundEnding { .. } => {}
        }
        game.update(frame_ms);

        for event in game.drain_events() {
            match event {
                GameEvent::Landed {
                    outcome,
                    points,
                    combo,
                    score,
                } => println!("flip {flips:>3}: {outcome:?} +{points} (x{combo}) score {score}"),
                GameEvent::RoundEnded { final_score } => {
                    println!("round over: {final_score}");
                    ended = true;
                }
                other => log::trace!("{:?}", other),
            }
        }
    }

    if !ended {
        game.end_round();
    }
    let progress = game.progress();
    println!(
        "high score {}, points {}",
        progress.high_score, progress.total_points
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `wasm_start` in the library, this is just to satisfy the compiler
}
