//! Axis status and progress reporting.

use crate::config::units::Steps;
use crate::motion::{Direction, RampPhase};

/// Identifies an axis of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisId {
    /// The X axis.
    #[default]
    X,
}

/// Coarse motion status of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisStatus {
    /// No movement active and the step timer is disarmed.
    #[default]
    Stopped,
    /// Accelerating.
    RampUp,
    /// Cruising at target speed.
    Maxing,
    /// Decelerating.
    RampDown,
}

impl AxisStatus {
    /// Check if a movement is active.
    #[inline]
    pub fn is_moving(self) -> bool {
        self != AxisStatus::Stopped
    }
}

impl From<RampPhase> for AxisStatus {
    fn from(phase: RampPhase) -> Self {
        match phase {
            RampPhase::Start | RampPhase::RampUp => AxisStatus::RampUp,
            RampPhase::Max => AxisStatus::Maxing,
            RampPhase::RampDown | RampPhase::End => AxisStatus::RampDown,
        }
    }
}

/// Position report dispatched from the axis into the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisProgress {
    /// Reporting axis.
    pub id: AxisId,
    /// Absolute position.
    pub position_steps: Steps,
    /// Target of the current or last move.
    pub target_position_steps: Steps,
    /// Status at the time of the report.
    pub status: AxisStatus,
}

/// Point-in-time view of an axis controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSnapshot {
    /// Axis identity.
    pub id: AxisId,
    /// Absolute position.
    pub position: Steps,
    /// Target of the current or last move.
    pub target_position: Steps,
    /// Motion status.
    pub status: AxisStatus,
    /// Direction of the current or last move.
    pub direction: Direction,
    /// Whether the step timer is paused.
    pub paused: bool,
    /// Steps left in the current move.
    pub steps_remaining: u32,
}

impl From<AxisSnapshot> for AxisProgress {
    fn from(snapshot: AxisSnapshot) -> Self {
        Self {
            id: snapshot.id,
            position_steps: snapshot.position,
            target_position_steps: snapshot.target_position,
            status: snapshot.status,
        }
    }
}

/// Receives progress reports from an axis controller.
///
/// Called from interrupt context, so implementations must not block.
pub trait ProgressSink {
    /// Accept one report.
    fn report(&mut self, progress: AxisProgress);
}

/// Discards every report.
impl ProgressSink for () {
    #[inline]
    fn report(&mut self, _progress: AxisProgress) {}
}

impl<S: ProgressSink + ?Sized> ProgressSink for &mut S {
    #[inline]
    fn report(&mut self, progress: AxisProgress) {
        S::report(self, progress)
    }
}
