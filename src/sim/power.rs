//! Charge meter
//!
//! While the player holds input the charge bounces between 0 and the max at a
//! fixed step per oscillator tick. The value read at release sets launch
//! strength and the rotation-speed band.

use serde::{Deserialize, Serialize};

use crate::consts::{CHARGE_MAX, CHARGE_STEP};

/// Direction the charge is currently moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargeDirection {
    Rising,
    Falling,
}

impl ChargeDirection {
    pub fn sign(self) -> f32 {
        match self {
            ChargeDirection::Rising => 1.0,
            ChargeDirection::Falling => -1.0,
        }
    }
}

/// Oscillating charge value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChargeState {
    pub value: f32,
    pub direction: ChargeDirection,
}

impl Default for ChargeState {
    fn default() -> Self {
        Self {
            value: 0.0,
            direction: ChargeDirection::Rising,
        }
    }
}

/// Meter feedback band, for labelling only (rotation bands are in `flight`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerZone {
    Perfect,
    Good,
    Okay,
}

impl PowerZone {
    pub fn from_charge(charge: f32) -> Self {
        if (60.0..=95.0).contains(&charge) {
            PowerZone::Perfect
        } else if (40.0..=100.0).contains(&charge) {
            PowerZone::Good
        } else {
            PowerZone::Okay
        }
    }
}

/// Drives the charge value while the player holds input
#[derive(Debug, Clone)]
pub struct PowerOscillator {
    charge: ChargeState,
    running: bool,
    step: f32,
    max: f32,
}

impl Default for PowerOscillator {
    fn default() -> Self {
        Self::new(CHARGE_STEP, CHARGE_MAX)
    }
}

impl PowerOscillator {
    /// `max` is capped at [`CHARGE_MAX`]; the charge is a percent
    pub fn new(step: f32, max: f32) -> Self {
        Self {
            charge: ChargeState::default(),
            running: false,
            step,
            max: max.min(CHARGE_MAX),
        }
    }

    /// Resume a running oscillation from a saved charge
    pub fn from_state(state: ChargeState, step: f32, max: f32) -> Self {
        let mut osc = Self::new(step, max);
        osc.charge = ChargeState {
            value: state.value.clamp(0.0, osc.max),
            direction: state.direction,
        };
        osc.running = true;
        osc
    }

    /// Begin a fresh oscillation from zero, rising
    pub fn start(&mut self) {
        self.charge = ChargeState::default();
        self.running = true;
    }

    /// Halt ticking. Stopping an already-stopped oscillator does nothing.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance one oscillator tick. Ignored while stopped.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }

        let charge = &mut self.charge;
        charge.value += charge.direction.sign() * self.step;

        if charge.value >= self.max {
            charge.value = self.max;
            charge.direction = ChargeDirection::Falling;
        }
        if charge.value <= 0.0 {
            charge.value = 0.0;
            charge.direction = ChargeDirection::Rising;
        }
    }

    /// Current charge, always clamped to [0, max] regardless of tick history.
    /// `max` never exceeds 100.
    pub fn sample(&self) -> f32 {
        self.charge.value.clamp(0.0, self.max)
    }

    pub fn state(&self) -> ChargeState {
        self.charge
    }

    /// Drop the charge back to zero after a release
    pub fn reset(&mut self) {
        self.charge = ChargeState::default();
    }
}
