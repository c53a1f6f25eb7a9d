//! Configuration module for axis-store.
//!
//! Provides types for loading and validating the axis mechanics and loop
//! timing from TOML files (with `std` feature) or constructed in code.

mod axis;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use axis::AxisConfig;
pub use system::{MachineConfig, TimingConfig};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Millimeters, MillimetersPerSec, MillimetersPerSecSquared, Steps, UnitExt};
