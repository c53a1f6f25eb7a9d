//! Ramp profile calculation.
//!
//! Derives the constants of a symmetric trapezoidal speed ramp following
//! David Austin's real-time profile and Aryeh Eiderman's iterative refinement
//! (<http://hwml.com/LeibRamp.htm>).

use libm::{round, sqrt};

use crate::error::ConfigError;

use super::movement::RampMovement;

/// Microseconds in one second.
pub const MICROS_PER_SEC: f64 = 1_000_000.0;

/// Direction of axis motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Clockwise (positive step count).
    #[default]
    Clockwise,
    /// Counter-clockwise (negative step count).
    CounterClockwise,
}

impl Direction {
    /// Get direction from signed step count.
    #[inline]
    pub fn from_steps(steps: i64) -> Self {
        if steps >= 0 {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

/// Acceleration constants for one axis configuration.
///
/// Created once per configuration and shared by every movement planned with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampProfile {
    target_speed_steps_per_sec: f64,
    acceleration_steps_per_sec2: f64,
    accel_distance_steps: u32,
    base_step_period_us: u32,
    target_step_period_us: u32,
    accel_multiplier: f64,
}

impl RampProfile {
    /// Default cruise speed of the reference firmware.
    pub const DEFAULT_TARGET_SPEED_STEPS_PER_SEC: f64 = 50.0;
    /// Default acceleration of the reference firmware.
    pub const DEFAULT_ACCELERATION_STEPS_PER_SEC2: f64 = 25.0;

    /// Create a ramp profile.
    ///
    /// # Errors
    ///
    /// - `InvalidTargetSpeed` / `InvalidAcceleration` if an input is not a
    ///   finite positive number.
    /// - `RampInverted` if cruising would be slower than the first step, which
    ///   happens when the ramp is shorter than one step.
    /// - `TargetSpeedTooHigh` if the cruise period rounds to zero microseconds.
    pub fn new(target_speed: f64, acceleration: f64) -> Result<Self, ConfigError> {
        if !(target_speed.is_finite() && target_speed > 0.0) {
            return Err(ConfigError::InvalidTargetSpeed(target_speed));
        }
        if !(acceleration.is_finite() && acceleration > 0.0) {
            return Err(ConfigError::InvalidAcceleration(acceleration));
        }

        let accel_distance_steps = round(target_speed * target_speed / (2.0 * acceleration)) as u32;
        let base_step_period_us = round(MICROS_PER_SEC / sqrt(2.0 * acceleration)) as u32;
        let target_step_period_us = round(MICROS_PER_SEC / target_speed) as u32;
        let accel_multiplier = acceleration / (MICROS_PER_SEC * MICROS_PER_SEC);

        if target_step_period_us == 0 {
            return Err(ConfigError::TargetSpeedTooHigh(target_speed));
        }
        if target_step_period_us > base_step_period_us {
            return Err(ConfigError::RampInverted {
                base_period_us: base_step_period_us,
                target_period_us: target_step_period_us,
            });
        }

        Ok(Self {
            target_speed_steps_per_sec: target_speed,
            acceleration_steps_per_sec2: acceleration,
            accel_distance_steps,
            base_step_period_us,
            target_step_period_us,
            accel_multiplier,
        })
    }

    /// Plan a movement of `steps` steps with this profile.
    #[inline]
    pub fn movement(&self, steps: u32) -> RampMovement {
        RampMovement::new(*self, steps)
    }

    /// Cruise speed in steps per second.
    #[inline]
    pub fn target_speed_steps_per_sec(&self) -> f64 {
        self.target_speed_steps_per_sec
    }

    /// Acceleration in steps per second squared.
    #[inline]
    pub fn acceleration_steps_per_sec2(&self) -> f64 {
        self.acceleration_steps_per_sec2
    }

    /// Steps needed to reach cruise speed from rest.
    #[inline]
    pub fn accel_distance_steps(&self) -> u32 {
        self.accel_distance_steps
    }

    /// Period of the first (and last) step of a full ramp.
    #[inline]
    pub fn base_step_period_us(&self) -> u32 {
        self.base_step_period_us
    }

    /// Period while cruising.
    #[inline]
    pub fn target_step_period_us(&self) -> u32 {
        self.target_step_period_us
    }

    /// `acceleration / 1e12`, the constant of the period recurrence.
    #[inline]
    pub fn accel_multiplier(&self) -> f64 {
        self.accel_multiplier
    }
}

impl Default for RampProfile {
    fn default() -> Self {
        // Constant inputs known to satisfy every check in `new`.
        let target_speed = Self::DEFAULT_TARGET_SPEED_STEPS_PER_SEC;
        let acceleration = Self::DEFAULT_ACCELERATION_STEPS_PER_SEC2;
        Self {
            target_speed_steps_per_sec: target_speed,
            acceleration_steps_per_sec2: acceleration,
            accel_distance_steps: 50,
            base_step_period_us: 141_421,
            target_step_period_us: 20_000,
            accel_multiplier: acceleration / (MICROS_PER_SEC * MICROS_PER_SEC),
        }
    }
}
