//! Step-by-step cursor over one planned movement.

use super::profile::RampProfile;

/// Where a movement is along its ramp.
///
/// Always derived from the step counters, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RampPhase {
    /// No step taken yet.
    Start,
    /// Accelerating from rest toward cruise speed.
    RampUp,
    /// Cruising at target speed.
    Max,
    /// Decelerating toward rest.
    RampDown,
    /// Every step has been produced.
    End,
}

/// Runtime state of one movement.
///
/// Each call to [`next`](Self::next) yields the period preceding the next
/// step pulse, using the iterative Leib recurrence instead of a square root
/// per step.
#[derive(Debug, Clone)]
pub struct RampMovement {
    profile: RampProfile,
    steps_total: u32,
    steps_completed: u32,
    accel_distance_steps: u32,
    current_step_period_us: f64,
}

impl RampMovement {
    /// Plan a movement of `steps_total` steps.
    ///
    /// The ramp is shortened to half the move when the move is too short to
    /// reach cruise speed. Zero steps yields a movement that is already done.
    pub fn new(profile: RampProfile, steps_total: u32) -> Self {
        Self {
            profile,
            steps_total,
            steps_completed: 0,
            accel_distance_steps: profile.accel_distance_steps().min(steps_total / 2),
            current_step_period_us: profile.base_step_period_us() as f64,
        }
    }

    /// Check if every step has been produced.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.steps_completed == self.steps_total
    }

    /// Current phase, derived from the step counters.
    pub fn phase(&self) -> RampPhase {
        if self.steps_completed == 0 {
            return RampPhase::Start;
        }

        if self.steps_completed >= self.steps_total {
            return RampPhase::End;
        }

        if self.steps_completed <= self.accel_distance_steps {
            return RampPhase::RampUp;
        }

        if self.steps_total - self.steps_completed <= self.accel_distance_steps {
            return RampPhase::RampDown;
        }

        RampPhase::Max
    }

    /// Produce the period for the next step and advance the cursor.
    ///
    /// Returns the period truncated to whole microseconds. Once the movement
    /// is done, the base period is returned and the counters stay put.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u32 {
        let period = self.next_step_period_us();
        self.current_step_period_us = period;

        if self.steps_completed < self.steps_total {
            self.steps_completed += 1;
        }

        period as u32
    }

    // Equation [23] of the Leib ramp paper.
    fn next_step_period_us(&self) -> f64 {
        let base = self.profile.base_step_period_us() as f64;
        let target = self.profile.target_step_period_us() as f64;

        let multiplier = match self.phase() {
            RampPhase::Start | RampPhase::End => return base,
            RampPhase::Max => return target,
            RampPhase::RampUp => -self.profile.accel_multiplier(),
            RampPhase::RampDown => self.profile.accel_multiplier(),
        };

        let p = self.current_step_period_us;
        let q = multiplier * p * p;
        let next = p * (1.0 + q + 1.5 * q * q);

        next.clamp(target, base)
    }

    /// Total steps in this movement.
    #[inline]
    pub fn steps_total(&self) -> u32 {
        self.steps_total
    }

    /// Steps produced so far.
    #[inline]
    pub fn steps_completed(&self) -> u32 {
        self.steps_completed
    }

    /// Steps left to produce.
    #[inline]
    pub fn steps_remaining(&self) -> u32 {
        self.steps_total - self.steps_completed
    }

    /// Ramp length in steps after clamping to the move length.
    #[inline]
    pub fn accel_distance_steps(&self) -> u32 {
        self.accel_distance_steps
    }

    /// Period most recently produced, in microseconds.
    #[inline]
    pub fn current_step_period_us(&self) -> f64 {
        self.current_step_period_us
    }

    /// The profile this movement was planned with.
    #[inline]
    pub fn profile(&self) -> &RampProfile {
        &self.profile
    }

    /// Get progress as a fraction (0.0 to 1.0).
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.steps_total == 0 {
            1.0
        } else {
            self.steps_completed as f32 / self.steps_total as f32
        }
    }
}
