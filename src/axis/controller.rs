//! Interrupt-driven axis controller.
//!
//! Generic over embedded-hal 1.0 pin types, a delay provider for the short
//! setup times and a [`Scheduler`] that re-arms the step timer.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use fugit::MicrosDurationU32;

use crate::config::units::{Millimeters, Steps};
use crate::error::AxisError;
use crate::motion::{Direction, RampMovement, RampProfile};
use crate::model::AxisState;
use crate::timer::Scheduler;

use super::builder::AxisControllerBuilder;
use super::position::Position;
use super::progress::{AxisId, AxisProgress, AxisSnapshot, AxisStatus, ProgressSink};

/// ENABLE must settle this long before DIRECTION changes.
pub const ENABLE_SETUP_US: u32 = 5;
/// DIRECTION must settle this long before the first pulse.
pub const DIRECTION_SETUP_US: u32 = 6;
/// Low time of a step pulse (driver minimum is 2.5µs).
pub const STEP_PULSE_US: u32 = 3;

/// Result of a successful [`AxisController::move_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveOutcome {
    /// The axis was already at the target; nothing was started.
    AtTarget,
    /// A movement was planned and the step timer armed.
    Started {
        /// Steps in the movement.
        steps: u32,
        /// Direction of travel.
        direction: Direction,
    },
}

/// Drives one stepper axis from a hardware timer interrupt.
///
/// Generic over:
/// - `EN`, `DIR`, `STEP`: signal lines (must implement `OutputPin`)
/// - `D`: delay provider for setup times (must implement `DelayNs`)
/// - `T`: step timer (must implement [`Scheduler`])
/// - `S`: receiver of status transitions (defaults to discarding them)
///
/// `status() == Stopped` holds exactly when no movement is active and the
/// step timer is disarmed.
pub struct AxisController<EN, DIR, STEP, D, T, S = ()>
where
    EN: OutputPin,
    DIR: OutputPin,
    STEP: OutputPin,
    D: DelayNs,
    T: Scheduler,
    S: ProgressSink,
{
    id: AxisId,
    enable_pin: EN,
    dir_pin: DIR,
    step_pin: STEP,
    delay: D,
    timer: T,
    sink: S,
    profile: RampProfile,
    invert_direction: bool,
    movement: Option<RampMovement>,
    position: Position,
    target_position: Steps,
    direction: Direction,
    status: AxisStatus,
    enabled: bool,
    paused: bool,
    last_move_completed: bool,
}

impl<EN, DIR, STEP, D, T> AxisController<EN, DIR, STEP, D, T, ()>
where
    EN: OutputPin,
    DIR: OutputPin,
    STEP: OutputPin,
    D: DelayNs,
    T: Scheduler,
{
    /// Start building a controller.
    pub fn builder() -> AxisControllerBuilder<EN, DIR, STEP, D, T, ()> {
        AxisControllerBuilder::new()
    }
}

impl<EN, DIR, STEP, D, T, S> AxisController<EN, DIR, STEP, D, T, S>
where
    EN: OutputPin,
    DIR: OutputPin,
    STEP: OutputPin,
    D: DelayNs,
    T: Scheduler,
    S: ProgressSink,
{
    /// Create a stopped controller at the origin and drive the lines idle.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: AxisId,
        mut enable_pin: EN,
        dir_pin: DIR,
        mut step_pin: STEP,
        delay: D,
        timer: T,
        sink: S,
        profile: RampProfile,
        steps_per_mm: f64,
        invert_direction: bool,
    ) -> Result<Self, AxisError> {
        enable_pin.set_low().map_err(|_| AxisError::PinError)?;
        step_pin.set_high().map_err(|_| AxisError::PinError)?;

        Ok(Self {
            id,
            enable_pin,
            dir_pin,
            step_pin,
            delay,
            timer,
            sink,
            profile,
            invert_direction,
            movement: None,
            position: Position::new(steps_per_mm),
            target_position: Steps::default(),
            direction: Direction::default(),
            status: AxisStatus::Stopped,
            enabled: false,
            paused: false,
            last_move_completed: true,
        })
    }

    /// Start a move to an absolute position in steps.
    ///
    /// # Errors
    ///
    /// - `Busy` if a move is in progress; the running move is left untouched.
    /// - `MoveTooLong` if the distance exceeds `u32::MAX` steps or does not
    ///   fit in an `i64`.
    /// - `PinError` / `Timer` if the hardware rejects the start; the axis is
    ///   stopped again before returning.
    pub fn move_to(&mut self, target: Steps) -> Result<MoveOutcome, AxisError> {
        if self.status != AxisStatus::Stopped {
            return Err(AxisError::Busy);
        }

        let delta = target
            .value()
            .checked_sub(self.position.steps().value())
            .ok_or(AxisError::MoveTooLong)?;
        if delta == 0 {
            self.target_position = target;
            return Ok(MoveOutcome::AtTarget);
        }

        let steps = u32::try_from(delta.unsigned_abs()).map_err(|_| AxisError::MoveTooLong)?;
        let direction = Direction::from_steps(delta);

        self.target_position = target;
        self.direction = direction;
        self.last_move_completed = false;

        let mut movement = self.profile.movement(steps);
        if let Err(e) = self.start(&mut movement) {
            let _ = self.stop();
            return Err(e);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "axis {} move to {} ({} steps {})",
            self.id,
            target.value(),
            steps,
            direction
        );

        self.movement = Some(movement);
        self.paused = false;
        self.set_status(AxisStatus::RampUp);

        Ok(MoveOutcome::Started { steps, direction })
    }

    /// Start a move to an absolute position in millimetres.
    ///
    /// The target is rounded to the nearest step.
    pub fn move_to_mm(&mut self, target: Millimeters) -> Result<MoveOutcome, AxisError> {
        let steps = self.position.steps_for(target);
        self.move_to(steps)
    }

    fn start(&mut self, movement: &mut RampMovement) -> Result<(), AxisError> {
        self.enable_pin.set_high().map_err(|_| AxisError::PinError)?;
        self.enabled = true;
        self.delay.delay_us(ENABLE_SETUP_US);

        let pin_high = match self.direction {
            Direction::Clockwise => !self.invert_direction,
            Direction::CounterClockwise => self.invert_direction,
        };
        if pin_high {
            self.dir_pin.set_high().map_err(|_| AxisError::PinError)?;
        } else {
            self.dir_pin.set_low().map_err(|_| AxisError::PinError)?;
        }
        self.delay.delay_us(DIRECTION_SETUP_US);

        let period = movement.next();
        self.arm(period)
    }

    fn arm(&mut self, period_us: u32) -> Result<(), AxisError> {
        self.timer
            .schedule_once(MicrosDurationU32::from_ticks(period_us))
            .map_err(|_e| {
                #[cfg(feature = "defmt")]
                defmt::error!("axis {} timer rejected {}us", self.id, period_us);
                AxisError::Timer
            })
    }

    /// Step timer interrupt body.
    ///
    /// Emits one pulse, updates the position and either re-arms the timer
    /// with the next period or stops when the movement is done. When the
    /// axis is stopped it only makes sure the timer is disarmed.
    ///
    /// # Errors
    ///
    /// Any pin or timer failure stops the axis and is returned.
    pub fn on_tick(&mut self) -> Result<(), AxisError> {
        if self.status == AxisStatus::Stopped {
            self.timer.cancel();
            return Ok(());
        }

        if let Err(e) = self.pulse() {
            let _ = self.stop();
            return Err(e);
        }
        self.position.move_steps(self.direction.sign());

        let next = match self.movement.as_mut() {
            Some(movement) if !movement.is_done() => {
                let phase = movement.phase();
                Some((phase, movement.next()))
            }
            _ => None,
        };

        let Some((phase, period)) = next else {
            return self.stop();
        };

        self.set_status(AxisStatus::from(phase));

        if let Err(e) = self.arm(period) {
            let _ = self.stop();
            return Err(e);
        }

        Ok(())
    }

    fn pulse(&mut self) -> Result<(), AxisError> {
        self.step_pin.set_low().map_err(|_| AxisError::PinError)?;
        self.delay.delay_us(STEP_PULSE_US);
        self.step_pin.set_high().map_err(|_| AxisError::PinError)
    }

    /// Pause the step timer without touching the ramp state.
    ///
    /// Does nothing when stopped.
    pub fn pause(&mut self) -> Result<(), AxisError> {
        if self.status == AxisStatus::Stopped || self.paused {
            return Ok(());
        }

        self.timer.pause().map_err(|_| AxisError::Timer)?;
        self.paused = true;
        Ok(())
    }

    /// Resume a paused step timer.
    ///
    /// Does nothing when stopped.
    pub fn resume(&mut self) -> Result<(), AxisError> {
        if self.status == AxisStatus::Stopped || !self.paused {
            return Ok(());
        }

        self.timer.resume().map_err(|_| AxisError::Timer)?;
        self.paused = false;
        Ok(())
    }

    /// Abort any movement, disarm the timer and release ENABLE.
    ///
    /// Safe to call repeatedly. The timer is disarmed before this returns,
    /// even when releasing ENABLE fails.
    pub fn stop(&mut self) -> Result<(), AxisError> {
        self.timer.cancel();

        if let Some(movement) = self.movement.take() {
            self.last_move_completed = movement.is_done();
        }
        self.paused = false;
        self.set_status(AxisStatus::Stopped);

        if self.enabled {
            self.enabled = false;
            self.enable_pin.set_low().map_err(|_| AxisError::PinError)?;
        }

        Ok(())
    }

    /// Make the axis follow a committed store state.
    ///
    /// Starts a move when the axis is stopped and the state's target differs
    /// from the current position. Returns `None` when nothing was started.
    pub fn follow(&mut self, state: &AxisState) -> Result<Option<MoveOutcome>, AxisError> {
        if self.status != AxisStatus::Stopped
            || state.target_position_steps == self.position.steps()
        {
            return Ok(None);
        }

        self.move_to(state.target_position_steps).map(Some)
    }

    /// Redefine the current position without moving.
    ///
    /// # Errors
    ///
    /// Returns `NotStopped` while a move is in progress.
    pub fn set_position(&mut self, steps: Steps) -> Result<(), AxisError> {
        if self.status != AxisStatus::Stopped {
            return Err(AxisError::NotStopped);
        }

        self.position.set_steps(steps);
        self.target_position = steps;
        Ok(())
    }

    /// Send the current position to the progress sink.
    ///
    /// Intended for a periodic platform callback; status transitions are
    /// reported on their own.
    pub fn progress(&mut self) {
        let progress = AxisProgress::from(self.snapshot());
        self.sink.report(progress);
    }

    fn set_status(&mut self, status: AxisStatus) {
        if self.status == status {
            return;
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("axis {} {} -> {}", self.id, self.status, status);

        self.status = status;
        let progress = AxisProgress::from(self.snapshot());
        self.sink.report(progress);
    }

    /// Point-in-time view of the controller.
    pub fn snapshot(&self) -> AxisSnapshot {
        AxisSnapshot {
            id: self.id,
            position: self.position.steps(),
            target_position: self.target_position,
            status: self.status,
            direction: self.direction,
            paused: self.paused,
            steps_remaining: match self.movement {
                Some(_) => (self.target_position - self.position.steps()).abs() as u32,
                None => 0,
            },
        }
    }

    /// Check if the axis is stopped after finishing its last move.
    ///
    /// `false` while moving and after a move was aborted.
    #[inline]
    pub fn is_move_completed(&self) -> bool {
        self.status == AxisStatus::Stopped && self.last_move_completed
    }

    /// Get current position in steps.
    #[inline]
    pub fn current_position_steps(&self) -> Steps {
        self.position.steps()
    }

    /// Get current position in millimetres.
    #[inline]
    pub fn current_position_mm(&self) -> Millimeters {
        self.position.millimeters()
    }

    /// Target of the current or last move.
    #[inline]
    pub fn target_position_steps(&self) -> Steps {
        self.target_position
    }

    /// Current motion status.
    #[inline]
    pub fn status(&self) -> AxisStatus {
        self.status
    }

    /// Direction of the current or last move.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Check if ENABLE is asserted.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Check if the step timer is paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Axis identity.
    #[inline]
    pub fn id(&self) -> AxisId {
        self.id
    }

    /// The ramp profile used for new moves.
    #[inline]
    pub fn profile(&self) -> &RampProfile {
        &self.profile
    }

    /// The active movement, if any.
    #[inline]
    pub fn movement(&self) -> Option<&RampMovement> {
        self.movement.as_ref()
    }

    /// Access the progress sink.
    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Access the step timer.
    #[inline]
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Release the hardware resources.
    pub fn release(self) -> (EN, DIR, STEP, D, T, S) {
        (
            self.enable_pin,
            self.dir_pin,
            self.step_pin,
            self.delay,
            self.timer,
            self.sink,
        )
    }
}
