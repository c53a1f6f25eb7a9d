//! Configuration validation.

use crate::error::{ConfigError, Result};

use super::{AxisConfig, MachineConfig, TimingConfig};

/// Validate a machine configuration.
///
/// Checks:
/// - Steps per revolution and leadscrew geometry are positive
/// - Speed and acceleration are positive
/// - The resulting ramp cruises faster than its first step
/// - Timing intervals are non-zero
pub fn validate_config(config: &MachineConfig) -> Result<()> {
    validate_axis(&config.axis)?;
    validate_timing(&config.timing)?;

    Ok(())
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn validate_axis(config: &AxisConfig) -> Result<()> {
    if !is_positive(config.steps_per_revolution) {
        return Err(ConfigError::InvalidStepsPerRevolution(config.steps_per_revolution).into());
    }

    if !is_positive(config.leadscrew_starts) || !is_positive(config.leadscrew_pitch.0) {
        return Err(ConfigError::InvalidLeadscrew {
            starts: config.leadscrew_starts,
            pitch: config.leadscrew_pitch.0,
        }
        .into());
    }

    if !is_positive(config.speed.0) {
        return Err(ConfigError::InvalidTargetSpeed(config.speed.0).into());
    }

    if !is_positive(config.acceleration.0) {
        return Err(ConfigError::InvalidAcceleration(config.acceleration.0).into());
    }

    config.ramp_profile()?;

    Ok(())
}

fn validate_timing(config: &TimingConfig) -> Result<()> {
    if config.clock_tick_us == 0 {
        return Err(ConfigError::InvalidInterval(config.clock_tick_us).into());
    }

    if config.progress_report_us == 0 {
        return Err(ConfigError::InvalidInterval(config.progress_report_us).into());
    }

    Ok(())
}
