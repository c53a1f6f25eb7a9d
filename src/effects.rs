//! Periodic action sources.

use fugit::MicrosDurationU32;

use crate::model::{Action, ClockAction};
use crate::store::Dispatcher;
use crate::timer::Scheduler;

/// Dispatches a fixed action every time a periodic timer fires.
///
/// The platform calls [`fire`](Self::fire) from the timer's interrupt.
pub struct PeriodicAction<T: Scheduler, A: Clone> {
    timer: T,
    action: A,
    running: bool,
}

impl<T: Scheduler, A: Clone> PeriodicAction<T, A> {
    /// Bind `action` to `timer`. Nothing runs until [`start`](Self::start).
    pub fn new(timer: T, action: A) -> Self {
        Self {
            timer,
            action,
            running: false,
        }
    }

    /// Arm the timer with `period`.
    pub fn start(&mut self, period: MicrosDurationU32) -> Result<(), T::Error> {
        self.timer.schedule_periodic(period)?;
        self.running = true;
        Ok(())
    }

    /// Disarm the timer.
    pub fn stop(&mut self) {
        self.timer.cancel();
        self.running = false;
    }

    /// Timer callback: queue the bound action while running.
    pub fn fire<const N: usize>(&self, dispatcher: Dispatcher<'_, A, N>) {
        if self.running {
            dispatcher.dispatch(self.action.clone());
        }
    }

    /// Check if the timer is armed.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Access the timer.
    #[inline]
    pub fn timer(&self) -> &T {
        &self.timer
    }
}

impl<T: Scheduler> PeriodicAction<T, Action> {
    /// The main loop clock, dispatching [`ClockAction::Tick`].
    pub fn clock(timer: T) -> Self {
        Self::new(timer, Action::Clock(ClockAction::Tick))
    }
}
