//! Bottle flight
//!
//! Fixed-timestep ballistic integration with drag and angular damping. One
//! tick per display frame. The bottle lands when it reaches the ground line.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_FLIGHT_TICKS;
use crate::tuning::Tuning;

/// Rotation speeds (degrees/tick) of the sweet spot: one or two full turns
pub const SWEET_SPOT_SPEEDS: [f32; 2] = [360.0 / 25.0, 360.0 / 12.5];

/// Launch velocity, fixed at release
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
    /// Degrees per tick
    pub rotation_speed: f32,
}

/// Launch strength for a charge percent in [0, 100]
pub fn launch_power(charge: f32, tuning: &Tuning) -> f32 {
    let pct = charge.clamp(0.0, 100.0) / 100.0;
    tuning.base_power + pct * tuning.power_range
}

/// Rotation speed band for a charge percent
pub fn rotation_speed<R: Rng + ?Sized>(charge: f32, rng: &mut R) -> f32 {
    if (60.0..=95.0).contains(&charge) {
        // Sweet spot still needs luck to stick
        if rng.random_bool(0.5) {
            SWEET_SPOT_SPEEDS[0]
        } else {
            SWEET_SPOT_SPEEDS[1]
        }
    } else if (40.0..60.0).contains(&charge) {
        rng.random_range(13.0..15.0)
    } else if charge > 95.0 && charge <= 100.0 {
        rng.random_range(15.0..17.0)
    } else {
        rng.random_range(10.0..20.0)
    }
}

/// Derive the launch velocity from the charge sampled at release
pub fn launch_velocity<R: Rng + ?Sized>(charge: f32, tuning: &Tuning, rng: &mut R) -> Velocity {
    let charge = charge.clamp(0.0, 100.0);
    let power = launch_power(charge, tuning);
    let rotation_speed = rotation_speed(charge, rng);
    let x = if tuning.horizontal_jitter > 0.0 {
        rng.random_range(-tuning.horizontal_jitter..tuning.horizontal_jitter)
    } else {
        0.0
    };

    Velocity {
        x,
        y: -power,
        rotation_speed,
    }
}

/// Bottle pose and motion during a flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightState {
    pub position: Vec2,
    /// Degrees, unbounded accumulator
    pub rotation: f32,
    pub velocity: Velocity,
}

/// Integrates one flight from launch until ground contact.
///
/// Each call to `next` advances one tick and yields the airborne snapshot.
/// The tick that reaches the ground yields `None` and the iterator stays
/// exhausted; a new flight needs a new `launch`. No flight lasts longer than
/// [`MAX_FLIGHT_TICKS`].
#[derive(Debug, Clone)]
pub struct FlightSimulator {
    state: FlightState,
    gravity: f32,
    horizontal_drag: f32,
    angular_damping: f32,
    ground_y: f32,
    ticks: u32,
    landed: bool,
}

impl FlightSimulator {
    /// Start a flight from the rest position
    pub fn launch(velocity: Velocity, tuning: &Tuning) -> Self {
        Self {
            state: FlightState {
                position: Vec2::new(tuning.rest_x, tuning.ground_y),
                rotation: 0.0,
                velocity,
            },
            gravity: tuning.gravity,
            horizontal_drag: tuning.horizontal_drag,
            angular_damping: tuning.angular_damping,
            ground_y: tuning.ground_y,
            ticks: 0,
            landed: false,
        }
    }

    pub fn state(&self) -> &FlightState {
        &self.state
    }

    pub fn has_landed(&self) -> bool {
        self.landed
    }

    /// Ticks integrated so far, including the landing tick
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Rotation used for landing classification
    pub fn final_rotation(&self) -> Option<f32> {
        self.landed.then_some(self.state.rotation)
    }

    /// Advance one tick. Returns true if the bottle is still airborne.
    pub fn step(&mut self) -> bool {
        if self.landed {
            return false;
        }
        self.ticks += 1;

        let s = &mut self.state;
        s.position.y += s.velocity.y;
        s.position.x += s.velocity.x;

        s.velocity.y += self.gravity;
        s.velocity.x *= self.horizontal_drag;
        s.velocity.rotation_speed *= self.angular_damping;

        // Ground check happens before this tick's rotation is applied
        let grounded = s.position.y >= self.ground_y;
        if grounded || self.ticks >= MAX_FLIGHT_TICKS {
            if !grounded {
                log::warn!("Flight still airborne after {} ticks, forcing landing", self.ticks);
            }
            s.position.y = self.ground_y;
            self.landed = true;
            return false;
        }

        s.rotation += s.velocity.rotation_speed;
        true
    }
}

impl Iterator for FlightSimulator {
    type Item = FlightState;

    fn next(&mut self) -> Option<FlightState> {
        self.step().then_some(self.state)
    }
}

impl std::iter::FusedIterator for FlightSimulator {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn still_velocity(power: f32, rotation_speed: f32) -> Velocity {
        Velocity {
            x: 0.0,
            y: -power,
            rotation_speed,
        }
    }

    #[test]
    fn test_launch_power_bounds() {
        let tuning = Tuning::default();
        assert_eq!(launch_power(0.0, &tuning), 6.0);
        assert_eq!(launch_power(100.0, &tuning), 12.0);
        assert_eq!(launch_power(50.0, &tuning), 9.0);
    }

    #[test]
    fn test_launch_velocity_bands() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);

        for _ in 0..200 {
            let v = launch_velocity(60.0, &tuning, &mut rng);
            assert!(SWEET_SPOT_SPEEDS.contains(&v.rotation_speed));
            assert!((v.y + 9.6).abs() < 1e-5);
            assert!((-0.25..0.25).contains(&v.x));

            let v = launch_velocity(50.0, &tuning, &mut rng);
            assert!((13.0..15.0).contains(&v.rotation_speed));

            let v = launch_velocity(97.0, &tuning, &mut rng);
            assert!((15.0..17.0).contains(&v.rotation_speed));

            let v = launch_velocity(10.0, &tuning, &mut rng);
            assert!((10.0..20.0).contains(&v.rotation_speed));
        }
    }

    #[test]
    fn test_sweet_spot_uses_both_speeds() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(99);
        let speeds: Vec<f32> = (0..100)
            .map(|_| launch_velocity(80.0, &tuning, &mut rng).rotation_speed)
            .collect();
        assert!(speeds.contains(&SWEET_SPOT_SPEEDS[0]));
        assert!(speeds.contains(&SWEET_SPOT_SPEEDS[1]));
    }

    #[test]
    fn test_flight_starts_at_rest_position() {
        let tuning = Tuning::default();
        let flight = FlightSimulator::launch(still_velocity(6.0, 10.0), &tuning);
        assert_eq!(flight.state().position, Vec2::new(50.0, 70.0));
        assert_eq!(flight.state().rotation, 0.0);
        assert!(!flight.has_landed());
        assert_eq!(flight.final_rotation(), None);
    }

    #[test]
    fn test_first_tick_integration() {
        let tuning = Tuning::default();
        let mut flight = FlightSimulator::launch(
            Velocity {
                x: 0.2,
                y: -10.0,
                rotation_speed: 20.0,
            },
            &tuning,
        );
        let snap = flight.next().unwrap();
        assert!((snap.position.x - 50.2).abs() < 1e-5);
        assert_eq!(snap.position.y, 60.0);
        assert!((snap.velocity.y - -9.2).abs() < 1e-5);
        assert!((snap.velocity.x - 0.198).abs() < 1e-6);
        // Rotation uses the damped speed
        assert!((snap.rotation - 19.6).abs() < 1e-5);
    }

    #[test]
    fn test_flight_lands_and_stays_landed() {
        let tuning = Tuning::default();
        let mut flight = FlightSimulator::launch(still_velocity(12.0, 28.8), &tuning);
        let snapshots: Vec<FlightState> = flight.by_ref().collect();

        assert!(!snapshots.is_empty());
        assert!(flight.has_landed());
        assert!(snapshots.iter().all(|s| s.position.y < 70.0));
        assert_eq!(flight.state().position.y, 70.0);
        assert_eq!(flight.ticks() as usize, snapshots.len() + 1);

        // Exhausted: further calls do nothing
        let before = *flight.state();
        assert!(flight.next().is_none());
        assert!(!flight.step());
        assert_eq!(*flight.state(), before);
    }

    #[test]
    fn test_runaway_flight_is_forced_down() {
        let tuning = Tuning::default();
        for velocity in [
            still_velocity(1e30, 10.0),
            still_velocity(f32::INFINITY, 10.0),
            still_velocity(f32::NAN, 10.0),
        ] {
            let mut flight = FlightSimulator::launch(velocity, &tuning);
            let airborne = flight.by_ref().count();
            assert!(flight.has_landed());
            assert_eq!(airborne as u32, MAX_FLIGHT_TICKS - 1);
            assert_eq!(flight.state().position.y, 70.0);
            assert!(flight.final_rotation().is_some());
        }
    }

    #[test]
    fn test_landing_tick_skips_rotation() {
        let tuning = Tuning::default();
        let mut flight = FlightSimulator::launch(still_velocity(9.0, 14.4), &tuning);
        let last = flight.by_ref().last().unwrap();
        assert_eq!(flight.final_rotation(), Some(last.rotation));
    }

    #[test]
    fn test_rotation_sums_damped_speeds() {
        let tuning = Tuning::default();
        let mut flight = FlightSimulator::launch(still_velocity(6.0, 10.0), &tuning);
        let airborne = flight.by_ref().count();

        let mut speed = 10.0f32;
        let mut expected = 0.0f32;
        for _ in 0..airborne {
            speed *= 0.98;
            expected += speed;
        }
        let rotation = flight.final_rotation().unwrap();
        assert!((rotation - expected).abs() < 1e-3);
    }
}
