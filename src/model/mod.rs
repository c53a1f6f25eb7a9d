//! Application state and actions.
//!
//! The root reducer routes each action to the sub-reducer owning its domain;
//! the other sub-states pass through unchanged.

mod axis;
mod clock;
mod outputs;

pub use axis::{AxesState, AxisAction, AxisState};
pub use clock::{ClockAction, ClockState};
pub use outputs::{OutputId, OutputsAction, OutputsState};

use crate::axis::AxisProgress;
use crate::store::{Reducer, Store};

/// Complete application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct State {
    /// Motion axes.
    pub axis: AxesState,
    /// Auxiliary outputs.
    pub outputs: OutputsState,
    /// Tick counter.
    pub clock: ClockState,
}

impl State {
    /// Initial state, usable in a `static` store.
    pub const fn new() -> Self {
        Self {
            axis: AxesState::new(),
            outputs: OutputsState::new(),
            clock: ClockState::new(),
        }
    }
}

/// Every action the store accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Startup marker; no sub-domain handles it.
    Init,
    /// Axis sub-domain.
    Axis(AxisAction),
    /// Outputs sub-domain.
    Outputs(OutputsAction),
    /// Clock sub-domain.
    Clock(ClockAction),
}

impl From<AxisProgress> for Action {
    fn from(progress: AxisProgress) -> Self {
        Action::Axis(AxisAction::Progress(progress))
    }
}

impl From<AxisAction> for Action {
    fn from(action: AxisAction) -> Self {
        Action::Axis(action)
    }
}

impl From<OutputsAction> for Action {
    fn from(action: OutputsAction) -> Self {
        Action::Outputs(action)
    }
}

impl From<ClockAction> for Action {
    fn from(action: ClockAction) -> Self {
        Action::Clock(action)
    }
}

/// Root reducer of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct App;

impl Reducer for App {
    type State = State;
    type Action = Action;

    fn reduce(state: State, action: &Action) -> State {
        match action {
            Action::Axis(action) => State {
                axis: axis::reduce(state.axis, action),
                ..state
            },
            Action::Outputs(action) => State {
                outputs: outputs::reduce(state.outputs, action),
                ..state
            },
            Action::Clock(action) => State {
                clock: clock::reduce(state.clock, action),
                ..state
            },
            Action::Init => state,
        }
    }
}

/// Action queue capacity of the firmware store.
pub const QUEUE_CAPACITY: usize = 20;

/// Subscriber registry capacity of the firmware store.
pub const MAX_SUBSCRIBERS: usize = 4;

/// The application store with firmware capacities.
pub type AppStore = Store<App, QUEUE_CAPACITY, MAX_SUBSCRIBERS>;
