//! Data-driven game balance
//!
//! Every physics and timing constant can be overridden from a JSON blob.
//! Missing keys fall back to the defaults in [`crate::consts`], so an override
//! only needs the values it changes.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Runtime-tunable timing and physics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Charge meter ===
    pub oscillator_interval_ms: f32,
    pub charge_step: f32,
    pub charge_max: f32,
    pub max_substeps: u32,

    // === Play field ===
    pub rest_x: f32,
    pub ground_y: f32,

    // === Flight ===
    pub gravity: f32,
    pub horizontal_drag: f32,
    pub angular_damping: f32,

    // === Launch ===
    pub base_power: f32,
    pub power_range: f32,
    pub horizontal_jitter: f32,

    // === Round ===
    pub fail_display_ms: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            oscillator_interval_ms: OSCILLATOR_INTERVAL_MS,
            charge_step: CHARGE_STEP,
            charge_max: CHARGE_MAX,
            max_substeps: MAX_SUBSTEPS,

            rest_x: REST_X,
            ground_y: GROUND_Y,

            gravity: GRAVITY,
            horizontal_drag: HORIZONTAL_DRAG,
            angular_damping: ANGULAR_DAMPING,

            base_power: BASE_POWER,
            power_range: POWER_RANGE,
            horizontal_jitter: HORIZONTAL_JITTER,

            fail_display_ms: FAIL_DISPLAY_MS,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would stall or blow up the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        for (field, value) in [
            ("oscillator_interval_ms", self.oscillator_interval_ms),
            ("charge_step", self.charge_step),
            ("charge_max", self.charge_max),
            ("rest_x", self.rest_x),
            ("ground_y", self.ground_y),
            ("gravity", self.gravity),
            ("horizontal_drag", self.horizontal_drag),
            ("angular_damping", self.angular_damping),
            ("base_power", self.base_power),
            ("power_range", self.power_range),
            ("horizontal_jitter", self.horizontal_jitter),
            ("fail_display_ms", self.fail_display_ms),
        ] {
            // Out-of-range JSON numbers parse to infinity
            if !value.is_finite() {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be finite",
                });
            }
        }

        if !is_positive(self.oscillator_interval_ms) {
            return Err(TuningError::Invalid {
                field: "oscillator_interval_ms",
                reason: "must be positive",
            });
        }
        if !is_positive(self.charge_step) {
            return Err(TuningError::Invalid {
                field: "charge_step",
                reason: "must be positive",
            });
        }
        if !(is_positive(self.charge_max) && self.charge_max <= CHARGE_MAX) {
            return Err(TuningError::Invalid {
                field: "charge_max",
                reason: "must be in (0, 100]",
            });
        }
        if self.max_substeps == 0 {
            return Err(TuningError::Invalid {
                field: "max_substeps",
                reason: "must be at least 1",
            });
        }
        for (field, value) in [
            ("horizontal_drag", self.horizontal_drag),
            ("angular_damping", self.angular_damping),
        ] {
            if !(is_positive(value) && value <= 1.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be in (0, 1]",
                });
            }
        }
        if !is_positive(self.gravity) {
            // Without gravity a launched bottle never comes back down
            return Err(TuningError::Invalid {
                field: "gravity",
                reason: "must be positive",
            });
        }
        for (field, value) in [
            ("base_power", self.base_power),
            ("power_range", self.power_range),
            ("horizontal_jitter", self.horizontal_jitter),
        ] {
            if !(0.0..=MAX_LAUNCH_SPEED).contains(&value) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be in [0, 1000]",
                });
            }
        }
        if self.base_power + self.power_range > MAX_LAUNCH_SPEED {
            return Err(TuningError::Invalid {
                field: "power_range",
                reason: "base_power + power_range must not exceed 1000",
            });
        }
        if self.fail_display_ms < 0.0 {
            return Err(TuningError::Invalid {
                field: "fail_display_ms",
                reason: "must not be negative",
            });
        }
        Ok(())
    }
}

/// False for zero, negatives and NaN
fn is_positive(value: f32) -> bool {
    value > 0.0
}
