//! Round state types shared with the presentation layer
//!
//! Everything the host needs to draw a frame arrives as a [`GameEvent`].

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::landing::LandingOutcome;
use super::power::PowerZone;

/// Current phase of the flip cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum RoundPhase {
    /// Waiting for a press (input enabled)
    Idle,
    /// Player is holding, charge meter oscillating
    Charging,
    /// Bottle in the air, input disabled
    Flying,
    /// Failed landing on screen, round ends when the delay runs out
    RoundEnding { remaining_ms: f32 },
}

impl RoundPhase {
    /// Whether a press would currently be accepted
    pub fn accepts_press(&self) -> bool {
        matches!(self, RoundPhase::Idle)
    }
}

/// Output for the presentation layer and the progress collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A fresh round session opened
    RoundStarted,
    /// Charge meter moved (after every oscillator tick, and on release)
    Charge { value: f32, zone: PowerZone },
    /// Bottle pose after an airborne flight tick
    Flight { x: f32, y: f32, rotation: f32 },
    /// Bottle touched down and was scored
    Landed {
        outcome: LandingOutcome,
        points: u64,
        combo: u32,
        score: u64,
    },
    /// Round finished; commit this score to persistent progress
    RoundEnded { final_score: u64 },
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}
