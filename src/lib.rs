//! Flippy Bottle - A bottle-flip arcade mini-game
//!
//! Core modules:
//! - `sim`: Deterministic flip core (charge meter, flight physics, landing, scoring)
//! - `game`: Round controller wired to saved progress
//! - `tuning`: Data-driven game balance
//! - `platform`: Frame-time to fixed-tick conversion
//! - `progress`: Persistent high score, currency and cosmetics
//! - `persistence`: Save/load of progress
//! - `shop`: Skin and background catalogs

pub mod error;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod progress;
pub mod shop;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{PersistError, ShopError, TuningError};
pub use game::Game;
pub use progress::PersistentProgress;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Oscillator timer cadence (~60 Hz)
    pub const OSCILLATOR_INTERVAL_MS: f32 = 16.0;
    /// Maximum oscillator ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Charge meter
    pub const CHARGE_STEP: f32 = 1.5;
    pub const CHARGE_MAX: f32 = 100.0;

    /// Play field (percent of the normalized field)
    pub const REST_X: f32 = 50.0;
    pub const GROUND_Y: f32 = 70.0;

    /// Per-tick flight integration
    pub const GRAVITY: f32 = 0.8;
    pub const HORIZONTAL_DRAG: f32 = 0.99;
    pub const ANGULAR_DAMPING: f32 = 0.98;

    /// Launch strength: power = BASE_POWER + charge% * POWER_RANGE
    pub const BASE_POWER: f32 = 6.0;
    pub const POWER_RANGE: f32 = 6.0;
    /// Horizontal launch velocity is uniform in [-jitter, jitter)
    pub const HORIZONTAL_JITTER: f32 = 0.25;
    /// Upper bound for tuned launch speeds (power and jitter)
    pub const MAX_LAUNCH_SPEED: f32 = 1000.0;

    /// A flight still airborne after this many ticks is put on the ground
    pub const MAX_FLIGHT_TICKS: u32 = 10_000;

    /// How long a failed landing stays on screen before the round ends
    pub const FAIL_DISPLAY_MS: f32 = 2000.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let normalized = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= 360.0 { 0.0 } else { normalized }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(-10.0), 350.0);
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(-1e-7), 0.0);
    }

    proptest! {
        #[test]
        fn test_normalize_degrees_in_range(angle in -100_000.0f32..100_000.0) {
            let n = normalize_degrees(angle);
            prop_assert!((0.0..360.0).contains(&n));
        }
    }
}
