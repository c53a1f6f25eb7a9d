//! Clock sub-domain of the store.

/// Main loop tick counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockState {
    /// Ticks since start, wrapping.
    pub ticks: u32,
}

impl ClockState {
    /// Counter at zero.
    pub const fn new() -> Self {
        Self { ticks: 0 }
    }
}

/// Actions of the clock sub-domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockAction {
    /// One clock period elapsed.
    Tick,
}

/// Apply one clock action.
pub fn reduce(state: ClockState, action: &ClockAction) -> ClockState {
    match action {
        ClockAction::Tick => ClockState {
            ticks: state.ticks.wrapping_add(1),
        },
    }
}
