//! Deterministic flip core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected, seedable RNG only
//! - No rendering, storage or platform dependencies

pub mod flight;
pub mod landing;
pub mod power;
pub mod score;
pub mod state;
pub mod tick;

pub use flight::{FlightSimulator, FlightState, SWEET_SPOT_SPEEDS, Velocity, launch_power, launch_velocity};
pub use landing::{LandingOutcome, classify};
pub use power::{ChargeDirection, ChargeState, PowerOscillator, PowerZone};
pub use score::{Award, RoundState, ScoreEngine};
pub use state::{GameEvent, RngState, RoundPhase};
pub use tick::{Launch, RoundController};
