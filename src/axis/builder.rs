//! Builder pattern for AxisController.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::AxisConfig;
use crate::error::{ConfigError, Error, Result};
use crate::motion::RampProfile;
use crate::timer::Scheduler;

use super::controller::AxisController;
use super::progress::{AxisId, ProgressSink};

/// Builder for creating AxisController instances.
///
/// Pins, delay and timer are required. Without a profile or configuration
/// the reference machine's [`AxisConfig::default`] is used.
pub struct AxisControllerBuilder<EN, DIR, STEP, D, T, S = ()> {
    id: AxisId,
    enable_pin: Option<EN>,
    dir_pin: Option<DIR>,
    step_pin: Option<STEP>,
    delay: Option<D>,
    timer: Option<T>,
    sink: S,
    profile: Option<RampProfile>,
    steps_per_mm: Option<f64>,
    invert_direction: bool,
}

impl<EN, DIR, STEP, D, T> Default for AxisControllerBuilder<EN, DIR, STEP, D, T, ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<EN, DIR, STEP, D, T> AxisControllerBuilder<EN, DIR, STEP, D, T, ()> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            id: AxisId::default(),
            enable_pin: None,
            dir_pin: None,
            step_pin: None,
            delay: None,
            timer: None,
            sink: (),
            profile: None,
            steps_per_mm: None,
            invert_direction: false,
        }
    }
}

impl<EN, DIR, STEP, D, T, S> AxisControllerBuilder<EN, DIR, STEP, D, T, S> {
    /// Set the axis identity.
    pub fn id(mut self, id: AxisId) -> Self {
        self.id = id;
        self
    }

    /// Set the ENABLE pin.
    pub fn enable_pin(mut self, pin: EN) -> Self {
        self.enable_pin = Some(pin);
        self
    }

    /// Set the DIR pin.
    pub fn dir_pin(mut self, pin: DIR) -> Self {
        self.dir_pin = Some(pin);
        self
    }

    /// Set the STEP pin.
    pub fn step_pin(mut self, pin: STEP) -> Self {
        self.step_pin = Some(pin);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: D) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the step timer.
    pub fn timer(mut self, timer: T) -> Self {
        self.timer = Some(timer);
        self
    }

    /// Set the receiver of progress reports.
    pub fn sink<S2>(self, sink: S2) -> AxisControllerBuilder<EN, DIR, STEP, D, T, S2> {
        AxisControllerBuilder {
            id: self.id,
            enable_pin: self.enable_pin,
            dir_pin: self.dir_pin,
            step_pin: self.step_pin,
            delay: self.delay,
            timer: self.timer,
            sink,
            profile: self.profile,
            steps_per_mm: self.steps_per_mm,
            invert_direction: self.invert_direction,
        }
    }

    /// Set the ramp profile directly.
    pub fn profile(mut self, profile: RampProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Set the steps per millimetre used by millimetre moves.
    pub fn steps_per_mm(mut self, steps_per_mm: f64) -> Self {
        self.steps_per_mm = Some(steps_per_mm);
        self
    }

    /// Set direction inversion.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Configure profile, scale and direction from an AxisConfig.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot form a ramp.
    pub fn from_config(mut self, config: &AxisConfig) -> Result<Self> {
        self.profile = Some(config.ramp_profile()?);
        self.steps_per_mm = Some(config.steps_per_mm());
        self.invert_direction = config.invert_direction;
        Ok(self)
    }
}

impl<EN, DIR, STEP, D, T, S> AxisControllerBuilder<EN, DIR, STEP, D, T, S>
where
    EN: OutputPin,
    DIR: OutputPin,
    STEP: OutputPin,
    D: DelayNs,
    T: Scheduler,
    S: ProgressSink,
{
    /// Build the AxisController.
    ///
    /// The controller starts stopped at position zero with ENABLE released and
    /// STEP idling high.
    ///
    /// # Errors
    ///
    /// Returns an error if a required part is missing or a pin fails.
    pub fn build(self) -> Result<AxisController<EN, DIR, STEP, D, T, S>> {
        let enable_pin = self.enable_pin.ok_or(ConfigError::Missing("enable_pin"))?;
        let dir_pin = self.dir_pin.ok_or(ConfigError::Missing("dir_pin"))?;
        let step_pin = self.step_pin.ok_or(ConfigError::Missing("step_pin"))?;
        let delay = self.delay.ok_or(ConfigError::Missing("delay"))?;
        let timer = self.timer.ok_or(ConfigError::Missing("timer"))?;

        let reference = AxisConfig::default();
        let profile = match self.profile {
            Some(profile) => profile,
            None => reference.ramp_profile()?,
        };
        let steps_per_mm = self.steps_per_mm.unwrap_or_else(|| reference.steps_per_mm());

        AxisController::new(
            self.id,
            enable_pin,
            dir_pin,
            step_pin,
            delay,
            timer,
            self.sink,
            profile,
            steps_per_mm,
            self.invert_direction,
        )
        .map_err(Error::from)
    }
}
