//! Error types for axis-store.
//!
//! Provides unified error handling across configuration, axis control, and the action store.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all axis-store operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Axis controller operation error
    Axis(AxisError),
    /// Action store error
    Store(StoreError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Invalid target speed (must be finite and > 0)
    InvalidTargetSpeed(f64),
    /// Invalid acceleration (must be finite and > 0)
    InvalidAcceleration(f64),
    /// Cruise speed is too fast to time in whole microseconds
    TargetSpeedTooHigh(f64),
    /// Invalid steps per revolution (must be > 0)
    InvalidStepsPerRevolution(f64),
    /// Invalid leadscrew geometry (starts and pitch must be > 0)
    InvalidLeadscrew {
        /// Number of thread starts
        starts: f64,
        /// Thread pitch in millimetres
        pitch: f64,
    },
    /// Cruise step period would be longer than the first step period
    RampInverted {
        /// Period of the first step in microseconds
        base_period_us: u32,
        /// Period at cruise speed in microseconds
        target_period_us: u32,
    },
    /// Invalid timing interval (must be > 0)
    InvalidInterval(u32),
    /// Builder is missing a required part
    Missing(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Axis controller errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisError {
    /// A move is already in progress
    Busy,
    /// Pin operation failed
    PinError,
    /// Step timer rejected a scheduling request
    Timer,
    /// Operation requires the axis to be stopped
    NotStopped,
    /// Move distance does not fit in a single movement
    MoveTooLong,
}

/// Action store errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Subscriber registry is full
    TooManySubscribers {
        /// Registry capacity
        capacity: usize,
    },
}

/// The action queue has no free slot.
///
/// Carries the rejected action back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueFull<A>(pub A);

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Axis(e) => write!(f, "Axis error: {}", e),
            Error::Store(e) => write!(f, "Store error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidTargetSpeed(v) => {
                write!(f, "Invalid target speed: {}. Must be > 0", v)
            }
            ConfigError::InvalidAcceleration(v) => {
                write!(f, "Invalid acceleration: {}. Must be > 0", v)
            }
            ConfigError::TargetSpeedTooHigh(v) => {
                write!(f, "Target speed {} steps/s has a step period under 1us", v)
            }
            ConfigError::InvalidStepsPerRevolution(v) => {
                write!(f, "Invalid steps per revolution: {}. Must be > 0", v)
            }
            ConfigError::InvalidLeadscrew { starts, pitch } => {
                write!(f, "Invalid leadscrew: {} starts with {} mm pitch", starts, pitch)
            }
            ConfigError::RampInverted { base_period_us, target_period_us } => write!(
                f,
                "Cruise step period {}us is longer than first step period {}us",
                target_period_us, base_period_us
            ),
            ConfigError::InvalidInterval(v) => write!(f, "Invalid interval: {}us. Must be > 0", v),
            ConfigError::Missing(part) => write!(f, "{} is required", part),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for AxisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisError::Busy => write!(f, "Axis is busy with another move"),
            AxisError::PinError => write!(f, "GPIO pin operation failed"),
            AxisError::Timer => write!(f, "Step timer operation failed"),
            AxisError::NotStopped => write!(f, "Axis must be stopped"),
            AxisError::MoveTooLong => write!(f, "Move exceeds {} steps", u32::MAX),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::TooManySubscribers { capacity } => {
                write!(f, "Subscriber registry full ({} slots)", capacity)
            }
        }
    }
}

impl<A> fmt::Display for QueueFull<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Action queue is full")
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<AxisError> for Error {
    fn from(e: AxisError) -> Self {
        Error::Axis(e)
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        Error::Store(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for AxisError {}

#[cfg(feature = "std")]
impl std::error::Error for StoreError {}

#[cfg(feature = "std")]
impl<A: fmt::Debug> std::error::Error for QueueFull<A> {}
