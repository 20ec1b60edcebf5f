//! Game instance
//!
//! Wraps the round controller with the progress collaborator: finished rounds
//! are committed to progress and saved, and save failures never reach the
//! round loop. Both the browser bindings and the native driver sit on this.

use crate::error::ShopError;
use crate::persistence::{self, ProgressStore};
use crate::progress::PersistentProgress;
use crate::sim::{GameEvent, RoundController};

/// Game instance holding the round controller and saved progress
#[derive(Debug)]
pub struct Game<S: ProgressStore> {
    controller: RoundController,
    progress: PersistentProgress,
    store: S,
    /// Events already checked for round ends, waiting for the presentation layer
    pending: Vec<GameEvent>,
}

impl<S: ProgressStore> Game<S> {
    /// Load progress from `store` (defaults on failure) and set up a controller
    pub fn new(seed: u64, store: S) -> Self {
        let progress = persistence::load_or_default(&store);
        Self::with_controller(RoundController::new(seed), progress, store)
    }

    pub fn with_controller(controller: RoundController, progress: PersistentProgress, store: S) -> Self {
        Self {
            controller,
            progress,
            store,
            pending: Vec::new(),
        }
    }

    pub fn controller(&self) -> &RoundController {
        &self.controller
    }

    pub fn progress(&self) -> &PersistentProgress {
        &self.progress
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn start_round(&mut self) {
        self.controller.start_round();
        self.pump_events();
    }

    pub fn end_round(&mut self) {
        self.controller.end_round();
        self.pump_events();
    }

    pub fn press_start(&mut self) -> bool {
        self.controller.press_start()
    }

    pub fn press_end(&mut self) -> bool {
        self.controller.press_end()
    }

    /// Advance one animation frame
    pub fn update(&mut self, elapsed_ms: f32) {
        self.controller.update(elapsed_ms);
        self.pump_events();
    }

    /// Everything that happened since the last drain, in order
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.pump_events();
        std::mem::take(&mut self.pending)
    }

    pub fn buy_skin(&mut self, id: &str) -> Result<(), ShopError> {
        self.progress.buy_skin(id)?;
        persistence::save_or_log(&mut self.store, &self.progress);
        Ok(())
    }

    pub fn select_skin(&mut self, id: &str) -> Result<(), ShopError> {
        self.progress.select_skin(id)?;
        persistence::save_or_log(&mut self.store, &self.progress);
        Ok(())
    }

    pub fn select_background(&mut self, id: &str) -> Result<(), ShopError> {
        self.progress.select_background(id)?;
        persistence::save_or_log(&mut self.store, &self.progress);
        Ok(())
    }

    fn pump_events(&mut self) {
        let events = self.controller.drain_events();
        let mut dirty = false;
        for event in &events {
            if let GameEvent::RoundEnded { final_score } = event {
                if self.progress.record_round(*final_score) {
                    log::info!("New high score: {}", final_score);
                }
                dirty = true;
            }
        }
        if dirty {
            persistence::save_or_log(&mut self.store, &self.progress);
        }
        self.pending.extend(events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PersistError;
    use crate::persistence::MemoryStore;
    use crate::sim::RoundPhase;

    struct ReadOnlyStore;

    impl ProgressStore for ReadOnlyStore {
        fn load(&self) -> Result<PersistentProgress, PersistError> {
            Ok(PersistentProgress::default())
        }

        fn save(&mut self, _progress: &PersistentProgress) -> Result<(), PersistError> {
            Err(PersistError::Storage("read only".into()))
        }
    }

    /// Play flips at zero charge until the round ends
    fn play_round<S: ProgressStore>(game: &mut Game<S>) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..10_000 {
            match game.controller().phase() {
                RoundPhase::Idle if game.controller().is_round_open() || events.is_empty() => {
                    game.press_start();
                    game.press_end();
                }
                RoundPhase::Idle => break,
                _ => game.update(16.0),
            }
            events.extend(game.drain_events());
        }
        events
    }

    fn final_score(events: &[GameEvent]) -> Option<u64> {
        events.iter().find_map(|e| match e {
            GameEvent::RoundEnded { final_score } => Some(*final_score),
            _ => None,
        })
    }

    #[test]
    fn test_round_end_commits_and_saves() {
        let mut game = Game::new(11, MemoryStore::new());
        let events = play_round(&mut game);

        let score = final_score(&events).expect("round never ended");
        assert_eq!(game.progress().high_score, score);
        assert_eq!(game.progress().total_points, score);

        let saved = game.store().load().unwrap();
        assert_eq!(&saved, game.progress());
    }

    #[test]
    fn test_events_pass_through_in_order() {
        let mut game = Game::new(11, MemoryStore::new());
        let events = play_round(&mut game);
        assert_eq!(events.first(), Some(&GameEvent::RoundStarted));
        assert!(matches!(events.last(), Some(GameEvent::RoundEnded { .. })));
    }

    #[test]
    fn test_save_failure_does_not_stop_play() {
        let mut game = Game::new(11, ReadOnlyStore);
        let events = play_round(&mut game);
        let score = final_score(&events).expect("round never ended");
        assert_eq!(game.progress().total_points, score);

        // Next round still starts
        assert!(game.press_start());
        assert_eq!(game.controller().phase(), RoundPhase::Charging);
    }

    #[test]
    fn test_manual_end_commits_once() {
        let mut game = Game::new(4, MemoryStore::new());
        game.start_round();
        game.end_round();
        game.end_round();
        let ended = game
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::RoundEnded { .. }))
            .count();
        assert_eq!(ended, 1);
    }

    #[test]
    fn test_shop_actions_persist() {
        let progress = PersistentProgress {
            total_points: 600,
            ..Default::default()
        };
        let mut game = Game::with_controller(RoundController::new(1), progress, MemoryStore::new());

        game.buy_skin("gold").unwrap();
        game.select_skin("gold").unwrap();
        game.select_background("forest").unwrap();
        assert!(game.buy_skin("lava").is_err());

        let saved = game.store().load().unwrap();
        assert_eq!(saved.total_points, 100);
        assert_eq!(saved.selected_skin, "gold");
        assert_eq!(saved.selected_background, "forest");
    }

    #[test]
    fn test_loads_existing_progress() {
        let store = MemoryStore::with_blob(r#"{"highScore":90,"totalPoints":40}"#);
        let game = Game::new(1, store);
        assert_eq!(game.progress().high_score, 90);
        assert_eq!(game.progress().total_points, 40);
    }
}
