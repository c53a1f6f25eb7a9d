//! Axis mechanics configuration from TOML.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::motion::RampProfile;

use super::units::{Millimeters, MillimetersPerSec, MillimetersPerSecSquared, Steps};

/// Mechanics of one leadscrew-driven linear axis.
///
/// Every field has a default, so an empty `[axis]` table describes the
/// reference machine: a 40000 step/rev driver on a 4-start, 2 mm pitch screw.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    /// Driver steps per motor revolution, microstepping included.
    pub steps_per_revolution: f64,

    /// Number of thread starts on the leadscrew.
    pub leadscrew_starts: f64,

    /// Thread pitch of the leadscrew.
    #[serde(rename = "leadscrew_pitch_mm")]
    pub leadscrew_pitch: Millimeters,

    /// Cruise speed.
    #[serde(rename = "speed_mm_per_sec")]
    pub speed: MillimetersPerSec,

    /// Acceleration and deceleration rate.
    #[serde(rename = "acceleration_mm_per_sec2")]
    pub acceleration: MillimetersPerSecSquared,

    /// Invert direction pin logic.
    pub invert_direction: bool,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            steps_per_revolution: 40_000.0,
            leadscrew_starts: 4.0,
            leadscrew_pitch: Millimeters(2.0),
            speed: MillimetersPerSec(1.0),
            acceleration: MillimetersPerSecSquared(0.1),
            invert_direction: false,
        }
    }
}

impl AxisConfig {
    /// Carriage travel for one motor revolution.
    #[inline]
    pub fn lead(&self) -> Millimeters {
        Millimeters(self.leadscrew_starts * self.leadscrew_pitch.0)
    }

    /// Steps per millimetre of carriage travel.
    #[inline]
    pub fn steps_per_mm(&self) -> f64 {
        self.steps_per_revolution / self.lead().0
    }

    /// Cruise speed in steps per second.
    #[inline]
    pub fn speed_steps_per_sec(&self) -> f64 {
        self.speed.0 * self.steps_per_mm()
    }

    /// Acceleration in steps per second squared.
    #[inline]
    pub fn acceleration_steps_per_sec2(&self) -> f64 {
        self.acceleration.0 * self.steps_per_mm()
    }

    /// Build the ramp profile for this axis.
    ///
    /// # Errors
    ///
    /// Returns the [`RampProfile::new`] error when the converted speed or
    /// acceleration cannot form a ramp.
    pub fn ramp_profile(&self) -> Result<RampProfile, ConfigError> {
        RampProfile::new(self.speed_steps_per_sec(), self.acceleration_steps_per_sec2())
    }

    /// Convert a carriage position to the nearest step.
    #[inline]
    pub fn mm_to_steps(&self, mm: Millimeters) -> Steps {
        Steps::from_millimeters(mm, self.steps_per_mm())
    }

    /// Convert a step count to a carriage position.
    #[inline]
    pub fn steps_to_mm(&self, steps: Steps) -> Millimeters {
        steps.to_millimeters(self.steps_per_mm())
    }
}
