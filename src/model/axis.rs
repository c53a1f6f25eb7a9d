//! Axis sub-domain of the store.

use crate::axis::{AxisId, AxisProgress, AxisStatus};
use crate::config::units::Steps;

/// Committed view of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisState {
    /// Last reported position.
    pub position_steps: Steps,
    /// Where the axis should go next.
    pub target_position_steps: Steps,
    /// Last reported status.
    pub status: AxisStatus,
}

impl AxisState {
    /// Axis at the origin, stopped, with no pending target.
    pub const fn new() -> Self {
        Self {
            position_steps: Steps(0),
            target_position_steps: Steps(0),
            status: AxisStatus::Stopped,
        }
    }

    /// Check if the committed target differs from the reported position.
    #[inline]
    pub fn has_pending_target(&self) -> bool {
        self.target_position_steps != self.position_steps
    }
}

/// Every axis of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxesState {
    /// The X axis.
    pub x: AxisState,
}

impl AxesState {
    /// All axes at their initial state.
    pub const fn new() -> Self {
        Self { x: AxisState::new() }
    }

    /// State of one axis.
    pub fn get(&self, id: AxisId) -> &AxisState {
        match id {
            AxisId::X => &self.x,
        }
    }

    fn get_mut(&mut self, id: AxisId) -> &mut AxisState {
        match id {
            AxisId::X => &mut self.x,
        }
    }
}

/// Actions of the axis sub-domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisAction {
    /// Request a move to an absolute step target.
    Schedule {
        /// Axis to move.
        id: AxisId,
        /// Absolute target.
        target_position_steps: Steps,
    },
    /// Report from a running controller.
    Progress(AxisProgress),
}

/// Apply one axis action.
///
/// Progress reports update position and status but never the target, so a
/// report from the previous move cannot undo a newer schedule.
pub fn reduce(mut state: AxesState, action: &AxisAction) -> AxesState {
    match *action {
        AxisAction::Schedule {
            id,
            target_position_steps,
        } => {
            state.get_mut(id).target_position_steps = target_position_steps;
        }
        AxisAction::Progress(progress) => {
            let axis = state.get_mut(progress.id);
            axis.position_steps = progress.position_steps;
            axis.status = progress.status;
        }
    }

    state
}
