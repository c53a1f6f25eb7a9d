//! Configuration parsing and validation tests.

use axis_store::config::{
    parse_config, validate_config, AxisConfig, MachineConfig, Millimeters, MillimetersPerSec,
    MillimetersPerSecSquared, TimingConfig,
};
use axis_store::error::{ConfigError, Error};
use axis_store::{load_config, AxisController};

const FULL_CONFIG: &str = r#"
[axis]
steps_per_revolution = 3200
leadscrew_starts = 1
leadscrew_pitch_mm = 8.0
speed_mm_per_sec = 20.0
acceleration_mm_per_sec2 = 50.0
invert_direction = true

[timing]
clock_tick_us = 5000
progress_report_us = 2000
"#;

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn test_parse_full_config() {
    let config = parse_config(FULL_CONFIG).expect("Should parse full config");

    assert_eq!(config.axis.steps_per_revolution, 3200.0);
    assert_eq!(config.axis.leadscrew_pitch, Millimeters(8.0));
    assert!(config.axis.invert_direction);
    assert_eq!(config.axis.steps_per_mm(), 400.0);
    assert_eq!(config.timing.clock_tick_us, 5000);
    assert_eq!(config.timing.progress_report().ticks(), 2000);
}

#[test]
fn test_defaults_describe_reference_machine() {
    let config = MachineConfig::default();

    assert_eq!(config.axis.steps_per_revolution, 40_000.0);
    assert_eq!(config.axis.leadscrew_starts, 4.0);
    assert_eq!(config.axis.leadscrew_pitch, Millimeters(2.0));
    assert_eq!(config.axis.speed, MillimetersPerSec(1.0));
    assert_eq!(config.axis.acceleration, MillimetersPerSecSquared(0.1));
    assert_eq!(config.timing.clock_tick().ticks(), 10_000);
    assert_eq!(config.timing.progress_report_us, 1_000);
}

#[test]
fn test_parse_rejects_bad_toml() {
    let result = parse_config("[axis]\nspeed_mm_per_sec = \"fast\"\n");
    assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
}

#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join("axis_store_load_config_test.toml");
    std::fs::write(&path, FULL_CONFIG).expect("Should write temp config");

    let config = load_config(&path).expect("Should load config");
    assert_eq!(config.axis.speed, MillimetersPerSec(20.0));

    let _ = std::fs::remove_file(&path);
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_parse_rejects_invalid_values() {
    let result = parse_config("[axis]\nsteps_per_revolution = 0\n");
    assert_eq!(
        result,
        Err(Error::Config(ConfigError::InvalidStepsPerRevolution(0.0)))
    );

    let result = parse_config("[axis]\nacceleration_mm_per_sec2 = 0.0\n");
    assert_eq!(
        result,
        Err(Error::Config(ConfigError::InvalidAcceleration(0.0)))
    );

    let result = parse_config("[timing]\nprogress_report_us = 0\n");
    assert_eq!(result, Err(Error::Config(ConfigError::InvalidInterval(0))));
}

#[test]
fn test_validation_rejects_inverted_ramp() {
    // 0.001 mm/s cruise is 5 steps/s, slower than the first step at 1 mm/s²
    let config = MachineConfig {
        axis: AxisConfig {
            speed: MillimetersPerSec(0.001),
            acceleration: MillimetersPerSecSquared(1.0),
            ..AxisConfig::default()
        },
        timing: TimingConfig::default(),
    };

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::RampInverted { .. }))
    ));
}

#[test]
fn test_builder_from_config() {
    let config = parse_config(FULL_CONFIG).unwrap();
    let profile = config.axis.ramp_profile().unwrap();

    // 20 mm/s * 400 steps/mm
    assert_eq!(profile.target_step_period_us(), 125);

    let builder = AxisController::<
        embedded_hal_mock::eh1::digital::Mock,
        embedded_hal_mock::eh1::digital::Mock,
        embedded_hal_mock::eh1::digital::Mock,
        embedded_hal_mock::eh1::delay::NoopDelay,
        NoTimer,
    >::builder()
    .from_config(&config.axis);
    assert!(builder.is_ok());
}

struct NoTimer;

impl axis_store::timer::Scheduler for NoTimer {
    type Error = ();

    fn schedule_once(&mut self, _: fugit::MicrosDurationU32) -> Result<(), ()> {
        Err(())
    }

    fn schedule_periodic(&mut self, _: fugit::MicrosDurationU32) -> Result<(), ()> {
        Err(())
    }

    fn pause(&mut self) -> Result<(), ()> {
        Err(())
    }

    fn resume(&mut self) -> Result<(), ()> {
        Err(())
    }

    fn cancel(&mut self) {}
}
