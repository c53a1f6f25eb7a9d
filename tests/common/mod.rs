//! Host fakes for pins, delays, timers and progress sinks.

#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use axis_store::axis::{AxisController, AxisProgress, AxisStatus, ProgressSink};
use axis_store::motion::RampProfile;
use axis_store::timer::Scheduler;
use fugit::MicrosDurationU32;

/// Signal line of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Enable,
    Dir,
    Step,
}

/// One observable hardware interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Pin(Line, bool),
    DelayUs(u32),
    DelayNs(u32),
}

pub type Log = Rc<RefCell<Vec<Event>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

/// Output pin appending every write to a shared log.
pub struct RecordingPin {
    line: Line,
    log: Log,
}

impl RecordingPin {
    pub fn new(line: Line, log: &Log) -> Self {
        Self {
            line,
            log: log.clone(),
        }
    }
}

impl embedded_hal::digital::ErrorType for RecordingPin {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for RecordingPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Pin(self.line, true));
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Pin(self.line, false));
        Ok(())
    }
}

/// Delay provider that returns immediately and logs the requested time.
pub struct RecordingDelay {
    log: Log,
}

impl RecordingDelay {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl embedded_hal::delay::DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::DelayNs(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.log.borrow_mut().push(Event::DelayUs(us));
    }
}

/// Call made on a fake timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCall {
    Once(u32),
    Periodic(u32),
    Pause,
    Resume,
    Cancel,
}

/// Timer recording every call; never fires on its own.
#[derive(Debug, Default)]
pub struct FakeTimer {
    pub calls: Vec<TimerCall>,
    pub fail: bool,
}

impl FakeTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            calls: Vec::new(),
            fail: true,
        }
    }

    /// Delays passed to `schedule_once`, in order.
    pub fn once_delays(&self) -> Vec<u32> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                TimerCall::Once(us) => Some(*us),
                _ => None,
            })
            .collect()
    }

    pub fn last(&self) -> Option<TimerCall> {
        self.calls.last().copied()
    }
}

impl Scheduler for FakeTimer {
    type Error = ();

    fn schedule_once(&mut self, delay: MicrosDurationU32) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        self.calls.push(TimerCall::Once(delay.ticks()));
        Ok(())
    }

    fn schedule_periodic(&mut self, period: MicrosDurationU32) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        self.calls.push(TimerCall::Periodic(period.ticks()));
        Ok(())
    }

    fn pause(&mut self) -> Result<(), ()> {
        self.calls.push(TimerCall::Pause);
        Ok(())
    }

    fn resume(&mut self) -> Result<(), ()> {
        self.calls.push(TimerCall::Resume);
        Ok(())
    }

    fn cancel(&mut self) {
        self.calls.push(TimerCall::Cancel);
    }
}

/// Progress sink keeping every report.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub reports: Vec<AxisProgress>,
}

impl RecordingSink {
    pub fn statuses(&self) -> Vec<AxisStatus> {
        self.reports.iter().map(|report| report.status).collect()
    }
}

impl ProgressSink for RecordingSink {
    fn report(&mut self, progress: AxisProgress) {
        self.reports.push(progress);
    }
}

pub type TestAxis =
    AxisController<RecordingPin, RecordingPin, RecordingPin, RecordingDelay, FakeTimer, RecordingSink>;

/// 50 steps/s cruise with 50 steps/s² acceleration.
pub fn reference_profile() -> RampProfile {
    RampProfile::new(50.0, 50.0).expect("reference profile is valid")
}

/// Reference-profile axis at 100 steps/mm writing into `log`.
pub fn build_axis(log: &Log, timer: FakeTimer) -> TestAxis {
    AxisController::builder()
        .enable_pin(RecordingPin::new(Line::Enable, log))
        .dir_pin(RecordingPin::new(Line::Dir, log))
        .step_pin(RecordingPin::new(Line::Step, log))
        .delay(RecordingDelay::new(log))
        .timer(timer)
        .sink(RecordingSink::default())
        .profile(reference_profile())
        .steps_per_mm(100.0)
        .build()
        .expect("axis should build")
}

/// Fire the step interrupt until the axis stops.
pub fn run_to_stop(axis: &mut TestAxis) -> u32 {
    let mut ticks = 0;
    while axis.status() != AxisStatus::Stopped {
        axis.on_tick().expect("tick should succeed");
        ticks += 1;
    }
    ticks
}
