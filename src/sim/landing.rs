//! Landing classification
//!
//! Two target zones 180 degrees apart (standing on its base, or on its cap).
//! The Good band contains the Perfect band, so Perfect must be checked first.

use serde::{Deserialize, Serialize};

use crate::normalize_degrees;

/// How cleanly the bottle landed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandingOutcome {
    Perfect,
    Good,
    Fail,
}

impl LandingOutcome {
    /// Points per combo level
    pub fn base_points(self) -> u64 {
        match self {
            LandingOutcome::Perfect => 10,
            LandingOutcome::Good => 5,
            LandingOutcome::Fail => 0,
        }
    }

    pub fn is_fail(self) -> bool {
        self == LandingOutcome::Fail
    }
}

fn is_perfect(angle: f32) -> bool {
    angle > 335.0 || angle < 25.0 || (angle > 155.0 && angle < 205.0)
}

fn is_good(angle: f32) -> bool {
    angle > 315.0 || angle < 45.0 || (angle > 135.0 && angle < 225.0)
}

/// Classify the final rotation (degrees, any range)
pub fn classify(rotation: f32) -> LandingOutcome {
    let angle = normalize_degrees(rotation);
    if is_perfect(angle) {
        LandingOutcome::Perfect
    } else if is_good(angle) {
        LandingOutcome::Good
    } else {
        LandingOutcome::Fail
    }
}
