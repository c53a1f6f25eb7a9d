//! Machine configuration - root configuration structure.

use fugit::MicrosDurationU32;
use serde::Deserialize;

use super::axis::AxisConfig;

/// Main loop timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Period of the clock tick action in microseconds.
    pub clock_tick_us: u32,

    /// Period of the axis position report in microseconds.
    pub progress_report_us: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            clock_tick_us: 10_000,
            progress_report_us: 1_000,
        }
    }
}

impl TimingConfig {
    /// Clock tick period.
    #[inline]
    pub fn clock_tick(&self) -> MicrosDurationU32 {
        MicrosDurationU32::from_ticks(self.clock_tick_us)
    }

    /// Position report period.
    #[inline]
    pub fn progress_report(&self) -> MicrosDurationU32 {
        MicrosDurationU32::from_ticks(self.progress_report_us)
    }
}

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MachineConfig {
    /// The X axis.
    #[serde(default)]
    pub axis: AxisConfig,

    /// Loop and report timing.
    #[serde(default)]
    pub timing: TimingConfig,
}
