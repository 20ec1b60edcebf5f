//! Round scoring
//!
//! Consecutive clean landings build a combo that multiplies the points of
//! each landing. A failed landing resets the combo and ends the round.

use serde::{Deserialize, Serialize};

use super::landing::LandingOutcome;

/// Score and combo for the current round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub score: u64,
    pub combo: u32,
}

/// Result of scoring one landing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub points: u64,
    pub combo: u32,
    /// True when this landing ends the round
    pub round_over: bool,
}

/// Owns the round's score and combo from round start to round end
#[derive(Debug, Clone, Default)]
pub struct ScoreEngine {
    round: RoundState,
}

impl ScoreEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn round(&self) -> RoundState {
        self.round
    }

    pub fn score(&self) -> u64 {
        self.round.score
    }

    pub fn combo(&self) -> u32 {
        self.round.combo
    }

    /// Apply a landing outcome and return what it earned
    pub fn apply_outcome(&mut self, outcome: LandingOutcome) -> Award {
        if outcome.is_fail() {
            self.round.combo = 0;
            return Award {
                points: 0,
                combo: 0,
                round_over: true,
            };
        }

        self.round.combo += 1;
        let points = outcome.base_points() * u64::from(self.round.combo);
        self.round.score += points;

        Award {
            points,
            combo: self.round.combo,
            round_over: false,
        }
    }
}
