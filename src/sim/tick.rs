//! Round controller
//!
//! Ties the charge meter, flight and scoring into the flip cycle:
//!
//! ```text
//! Idle --press--> Charging --release--> Flying --land--> Idle            (Perfect/Good)
//!                                                   \--> RoundEnding --delay--> Idle (Fail)
//! ```
//!
//! Everything runs on one thread. The host calls [`RoundController::update`]
//! once per animation frame (or drives `oscillator_tick`/`flight_tick`
//! directly) and drains the resulting events for rendering.

use rand::Rng;
use rand_pcg::Pcg32;

use super::flight::{FlightSimulator, FlightState, Velocity, launch_velocity};
use super::landing::classify;
use super::power::{PowerOscillator, PowerZone};
use super::score::{RoundState, ScoreEngine};
use super::state::{GameEvent, RngState, RoundPhase};
use crate::platform::IntervalTimer;
use crate::tuning::Tuning;

/// What the last release produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub charge: f32,
    pub velocity: Velocity,
}

/// Flip-cycle state machine. Invalid input sequences are ignored.
#[derive(Debug)]
pub struct RoundController<R: Rng = Pcg32> {
    tuning: Tuning,
    rng: R,
    phase: RoundPhase,
    oscillator: PowerOscillator,
    timer: IntervalTimer,
    flight: Option<FlightSimulator>,
    /// Open round; created on round start, dropped on round end
    session: Option<ScoreEngine>,
    last_launch: Option<Launch>,
    events: Vec<GameEvent>,
}

impl RoundController<Pcg32> {
    /// Controller with default tuning and a seeded RNG
    pub fn new(seed: u64) -> Self {
        Self::with_rng(RngState::new(seed).to_rng(), Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self::with_rng(RngState::new(seed).to_rng(), tuning)
    }
}

impl<R: Rng> RoundController<R> {
    /// Controller drawing launch randomness from `rng`.
    /// Invalid tuning is replaced by the defaults.
    pub fn with_rng(rng: R, tuning: Tuning) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Invalid tuning ({}), using defaults", e);
                Tuning::default()
            }
        };
        Self {
            oscillator: PowerOscillator::new(tuning.charge_step, tuning.charge_max),
            timer: IntervalTimer::new(tuning.oscillator_interval_ms, tuning.max_substeps),
            tuning,
            rng,
            phase: RoundPhase::Idle,
            flight: None,
            session: None,
            last_launch: None,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Score and combo of the open round, if any
    pub fn round(&self) -> Option<RoundState> {
        self.session.as_ref().map(ScoreEngine::round)
    }

    pub fn is_round_open(&self) -> bool {
        self.session.is_some()
    }

    /// Current charge (0 outside of Charging)
    pub fn charge(&self) -> f32 {
        self.oscillator.sample()
    }

    pub fn is_oscillator_running(&self) -> bool {
        self.oscillator.is_running()
    }

    pub fn flight_state(&self) -> Option<&FlightState> {
        self.flight.as_ref().map(FlightSimulator::state)
    }

    pub fn last_launch(&self) -> Option<Launch> {
        self.last_launch
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Begin a new round. An open round is ended (and reported) first.
    pub fn start_round(&mut self) {
        self.end_round();
        self.open_session();
    }

    /// End the open round now. Does nothing if no round is open.
    pub fn end_round(&mut self) {
        self.oscillator.stop();
        self.timer.stop();
        self.flight = None;
        self.phase = RoundPhase::Idle;

        if let Some(session) = self.session.take() {
            let final_score = session.score();
            log::info!("Round ended with score {}", final_score);
            self.events.push(GameEvent::RoundEnded { final_score });
        }
    }

    /// Player pressed: start charging. Ignored unless Idle.
    pub fn press_start(&mut self) -> bool {
        if !self.phase.accepts_press() {
            return false;
        }
        if self.session.is_none() {
            self.open_session();
        }

        self.oscillator.start();
        self.timer.start();
        self.phase = RoundPhase::Charging;
        log::debug!("Charging");
        true
    }

    /// Player released: launch the bottle. Ignored unless Charging.
    pub fn press_end(&mut self) -> bool {
        if self.phase != RoundPhase::Charging {
            return false;
        }

        // Oscillator stops before the flight exists, so no charge tick can
        // land after the release
        self.oscillator.stop();
        self.timer.stop();

        let charge = self.oscillator.sample();
        let velocity = launch_velocity(charge, &self.tuning, &mut self.rng);
        self.flight = Some(FlightSimulator::launch(velocity, &self.tuning));
        self.last_launch = Some(Launch { charge, velocity });

        self.oscillator.reset();
        self.push_charge();
        self.phase = RoundPhase::Flying;
        log::debug!(
            "Released at {:.1}% (vy={:.2}, spin={:.2} deg/tick)",
            charge,
            velocity.y,
            velocity.rotation_speed
        );
        true
    }

    /// One charge-meter tick. Ignored unless Charging.
    pub fn oscillator_tick(&mut self) {
        if self.phase != RoundPhase::Charging {
            return;
        }
        self.oscillator.tick();
        self.push_charge();
    }

    /// One flight tick. Ignored unless Flying.
    pub fn flight_tick(&mut self) {
        if self.phase != RoundPhase::Flying {
            return;
        }
        let Some(flight) = self.flight.as_mut() else {
            self.phase = RoundPhase::Idle;
            return;
        };

        match flight.next() {
            Some(snapshot) => {
                log::trace!("Flight {:?}", snapshot);
                self.events.push(GameEvent::Flight {
                    x: snapshot.position.x,
                    y: snapshot.position.y,
                    rotation: snapshot.rotation,
                });
            }
            None => self.land(),
        }
    }

    /// Advance by one animation frame of `elapsed_ms` wall time
    pub fn update(&mut self, elapsed_ms: f32) {
        match self.phase {
            RoundPhase::Idle => {}
            RoundPhase::Charging => {
                for _ in 0..self.timer.advance(elapsed_ms) {
                    self.oscillator_tick();
                }
            }
            RoundPhase::Flying => self.flight_tick(),
            RoundPhase::RoundEnding { remaining_ms } => {
                let elapsed = if elapsed_ms.is_finite() {
                    elapsed_ms.max(0.0)
                } else {
                    0.0
                };
                let remaining_ms = remaining_ms - elapsed;
                if remaining_ms <= 0.0 {
                    self.end_round();
                } else {
                    self.phase = RoundPhase::RoundEnding { remaining_ms };
                }
            }
        }
    }

    fn open_session(&mut self) {
        self.session = Some(ScoreEngine::new());
        self.phase = RoundPhase::Idle;
        log::info!("Round started");
        self.events.push(GameEvent::RoundStarted);
    }

    fn push_charge(&mut self) {
        let value = self.oscillator.sample();
        self.events.push(GameEvent::Charge {
            value,
            zone: PowerZone::from_charge(value),
        });
    }

    fn land(&mut self) {
        let Some(flight) = self.flight.take() else {
            return;
        };
        let rotation = flight.state().rotation;
        let outcome = classify(rotation);

        let session = self.session.get_or_insert_with(ScoreEngine::new);
        let award = session.apply_outcome(outcome);
        let score = session.score();
        log::debug!(
            "Landed at {:.1} deg: {:?} +{} (combo {}, score {})",
            rotation,
            outcome,
            award.points,
            award.combo,
            score
        );

        self.events.push(GameEvent::Landed {
            outcome,
            points: award.points,
            combo: award.combo,
            score,
        });

        self.phase = if award.round_over {
            RoundPhase::RoundEnding {
                remaining_ms: self.tuning.fail_display_ms,
            }
        } else {
            RoundPhase::Idle
        };
    }
}
