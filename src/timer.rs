//! Hardware timer capability.
//!
//! The platform owns the actual timer peripheral and calls back into the
//! crate from its interrupt handler (for example
//! [`AxisController::on_tick`](crate::axis::AxisController::on_tick)). This
//! trait is the half of that contract the crate drives.

use fugit::MicrosDurationU32;

/// A one-shot or periodic hardware timer.
pub trait Scheduler {
    /// Error raised by the underlying peripheral.
    type Error: core::fmt::Debug;

    /// Fire once after `delay`, replacing any pending deadline.
    fn schedule_once(&mut self, delay: MicrosDurationU32) -> Result<(), Self::Error>;

    /// Fire every `period` until cancelled.
    fn schedule_periodic(&mut self, period: MicrosDurationU32) -> Result<(), Self::Error>;

    /// Freeze the pending deadline without losing it.
    fn pause(&mut self) -> Result<(), Self::Error>;

    /// Continue a paused deadline.
    fn resume(&mut self) -> Result<(), Self::Error>;

    /// Disarm the timer. Disarming an idle timer does nothing.
    fn cancel(&mut self);
}

impl<T: Scheduler + ?Sized> Scheduler for &mut T {
    type Error = T::Error;

    #[inline]
    fn schedule_once(&mut self, delay: MicrosDurationU32) -> Result<(), Self::Error> {
        T::schedule_once(self, delay)
    }

    #[inline]
    fn schedule_periodic(&mut self, period: MicrosDurationU32) -> Result<(), Self::Error> {
        T::schedule_periodic(self, period)
    }

    #[inline]
    fn pause(&mut self) -> Result<(), Self::Error> {
        T::pause(self)
    }

    #[inline]
    fn resume(&mut self) -> Result<(), Self::Error> {
        T::resume(self)
    }

    #[inline]
    fn cancel(&mut self) {
        T::cancel(self)
    }
}
