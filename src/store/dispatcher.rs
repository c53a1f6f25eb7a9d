//! Producer handle onto an action queue.

use crate::axis::{AxisProgress, ProgressSink};
use crate::error::QueueFull;

use super::queue::ActionQueue;

/// Copyable handle that pushes actions into a queue from any context.
pub struct Dispatcher<'q, A, const N: usize> {
    queue: &'q ActionQueue<A, N>,
}

impl<A, const N: usize> Clone for Dispatcher<'_, A, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, const N: usize> Copy for Dispatcher<'_, A, N> {}

impl<'q, A, const N: usize> Dispatcher<'q, A, N> {
    /// Create a handle onto `queue`.
    pub const fn new(queue: &'q ActionQueue<A, N>) -> Self {
        Self { queue }
    }

    /// Queue an action.
    ///
    /// # Panics
    ///
    /// Panics when the queue is full. A saturated queue means the main loop
    /// has stalled, which is left to the panic handler and watchdog.
    pub fn dispatch(&self, action: A) {
        if self.queue.push(action).is_err() {
            #[cfg(feature = "defmt")]
            defmt::error!("action queue saturated ({} slots)", N);

            panic!("action queue saturated ({} slots)", N);
        }
    }

    /// Queue an action, handing it back when the queue is full.
    pub fn try_dispatch(&self, action: A) -> Result<(), QueueFull<A>> {
        self.queue.push(action)
    }
}

/// Turns axis status reports into queued actions.
impl<A, const N: usize> ProgressSink for Dispatcher<'_, A, N>
where
    A: From<AxisProgress>,
{
    fn report(&mut self, progress: AxisProgress) {
        self.dispatch(A::from(progress));
    }
}
