//! # axis-store
//!
//! Interrupt-driven stepper axis control with a reducer-based action store.
//!
//! ## Features
//!
//! - **Leib ramp**: per-step periods from an iterative recurrence, no square
//!   root in the interrupt
//! - **embedded-hal 1.0**: `OutputPin` for ENABLE/DIR/STEP, `DelayNs` for setup times
//! - **Interrupt-safe store**: actions queued from any context, folded by the
//!   main loop through a pure reducer tree
//! - **no_std compatible**: Core library works without standard library
//! - **Configuration-driven**: Axis mechanics in millimetres, loadable from TOML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use axis_store::{AppStore, AxisController, SharedAxis, State};
//!
//! static STORE: AppStore = AppStore::new(State::new());
//! static AXIS: SharedAxis<MyAxis> = SharedAxis::empty();
//!
//! let axis = AxisController::builder()
//!     .from_config(&config.axis)?
//!     .enable_pin(enable)
//!     .dir_pin(dir)
//!     .step_pin(step)
//!     .delay(delay)
//!     .timer(step_timer)
//!     .sink(STORE.dispatcher())
//!     .build()?;
//! AXIS.install(axis);
//!
//! loop {
//!     STORE.drain();
//!     let state = STORE.get_state();
//!     AXIS.lock(|axis| axis.follow(&state.axis.x));
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Core modules
pub mod axis;
pub mod config;
pub mod effects;
pub mod error;
pub mod model;
pub mod motion;
pub mod store;
pub mod timer;

// Re-exports for ergonomic API
pub use axis::{
    AxisController, AxisControllerBuilder, AxisId, AxisProgress, AxisSnapshot, AxisStatus,
    MoveOutcome, ProgressSink, SharedAxis,
};
pub use config::{validate_config, AxisConfig, MachineConfig, TimingConfig};
pub use effects::PeriodicAction;
pub use error::{Error, QueueFull, Result};
pub use model::{Action, App, AppStore, State};
pub use motion::{Direction, RampMovement, RampPhase, RampProfile};
pub use store::{ActionQueue, Dispatcher, Reducer, Store};
pub use timer::Scheduler;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Millimeters, MillimetersPerSec, MillimetersPerSecSquared, Steps};
