//! Axis module for axis-store.
//!
//! Provides the interrupt-driven axis controller, position tracking and the
//! critical-section cell that shares it with the main loop.

mod builder;
mod controller;
mod position;
mod progress;
mod shared;

pub use builder::AxisControllerBuilder;
pub use controller::{
    AxisController, MoveOutcome, DIRECTION_SETUP_US, ENABLE_SETUP_US, STEP_PULSE_US,
};
pub use position::Position;
pub use progress::{AxisId, AxisProgress, AxisSnapshot, AxisStatus, ProgressSink};
pub use shared::SharedAxis;
