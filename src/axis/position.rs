//! Position tracking for a linear axis.
//!
//! Provides absolute position tracking in steps with millimetre conversions.

use crate::config::units::{Millimeters, Steps};

/// Axis position tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    steps: Steps,
    steps_per_mm: f64,
}

impl Position {
    /// Create a position tracker at the origin.
    #[inline]
    pub fn new(steps_per_mm: f64) -> Self {
        Self {
            steps: Steps::default(),
            steps_per_mm,
        }
    }

    /// Get current position in steps.
    #[inline]
    pub fn steps(&self) -> Steps {
        self.steps
    }

    /// Get current position in millimetres.
    #[inline]
    pub fn millimeters(&self) -> Millimeters {
        self.steps.to_millimeters(self.steps_per_mm)
    }

    /// Set position in steps.
    #[inline]
    pub fn set_steps(&mut self, steps: Steps) {
        self.steps = steps;
    }

    /// Move by a number of steps.
    #[inline]
    pub fn move_steps(&mut self, delta: i64) {
        self.steps = Steps(self.steps.0 + delta);
    }

    /// Steps per millimetre conversion factor.
    #[inline]
    pub fn steps_per_mm(&self) -> f64 {
        self.steps_per_mm
    }

    /// Convert a carriage position to the nearest step.
    #[inline]
    pub fn steps_for(&self, target: Millimeters) -> Steps {
        Steps::from_millimeters(target, self.steps_per_mm)
    }
}
