//! Motion module for axis-store.
//!
//! Provides ramp profile calculation and per-step period generation.

mod movement;
mod profile;

pub use movement::{RampMovement, RampPhase};
pub use profile::{Direction, RampProfile, MICROS_PER_SEC};
