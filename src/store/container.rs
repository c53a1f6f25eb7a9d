//! The action store.

use core::cell::{Cell, RefCell};
use core::marker::PhantomData;

use critical_section::Mutex;
use heapless::Vec;

use crate::error::{QueueFull, StoreError};

use super::dispatcher::Dispatcher;
use super::queue::ActionQueue;
use super::reducer::Reducer;

/// Main-loop observer called once per non-empty drain.
///
/// Receives the committed state and a dispatcher; anything it dispatches is
/// processed by the next drain.
pub type Subscriber<R, const N: usize> =
    fn(&<R as Reducer>::State, Dispatcher<'_, <R as Reducer>::Action, N>);

/// Queued, reducer-based state container.
///
/// - `R`: root reducer
/// - `N`: action queue capacity
/// - `SUBS`: subscriber registry capacity
///
/// Dispatching is safe from any context. [`drain`](Self::drain) belongs to
/// the main loop: it folds the queued actions outside any critical section and
/// then publishes the result in one step, so readers never see a half-applied
/// batch.
pub struct Store<R: Reducer, const N: usize, const SUBS: usize> {
    queue: ActionQueue<R::Action, N>,
    state: Mutex<RefCell<R::State>>,
    subscribers: Mutex<RefCell<Vec<Subscriber<R, N>, SUBS>>>,
    draining: Mutex<Cell<bool>>,
    _reducer: PhantomData<fn() -> R>,
}

impl<R: Reducer, const N: usize, const SUBS: usize> Store<R, N, SUBS> {
    /// Create a store holding `initial`.
    pub const fn new(initial: R::State) -> Self {
        Self {
            queue: ActionQueue::new(),
            state: Mutex::new(RefCell::new(initial)),
            subscribers: Mutex::new(RefCell::new(Vec::new())),
            draining: Mutex::new(Cell::new(false)),
            _reducer: PhantomData,
        }
    }

    /// Producer handle onto this store's queue.
    #[inline]
    pub fn dispatcher(&self) -> Dispatcher<'_, R::Action, N> {
        Dispatcher::new(&self.queue)
    }

    /// Queue an action for the next drain.
    ///
    /// # Panics
    ///
    /// Panics when the queue is full.
    pub fn dispatch(&self, action: R::Action) {
        self.dispatcher().dispatch(action);
    }

    /// Queue an action, handing it back when the queue is full.
    pub fn try_dispatch(&self, action: R::Action) -> Result<(), QueueFull<R::Action>> {
        self.queue.push(action)
    }

    /// Copy of the last committed state.
    pub fn get_state(&self) -> R::State {
        critical_section::with(|cs| self.state.borrow_ref(cs).clone())
    }

    /// Register a main-loop observer.
    ///
    /// # Errors
    ///
    /// Returns `TooManySubscribers` when the registry is full.
    pub fn subscribe(&self, subscriber: Subscriber<R, N>) -> Result<(), StoreError> {
        critical_section::with(|cs| self.subscribers.borrow_ref_mut(cs).push(subscriber))
            .map_err(|_| StoreError::TooManySubscribers { capacity: SUBS })
    }

    /// Number of actions waiting for the next drain.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Apply every queued action and notify subscribers.
    ///
    /// Returns `true` if at least one action was processed, in which case
    /// every subscriber was called exactly once with the new state. Calls
    /// made while a drain is running return `false` and do nothing.
    pub fn drain(&self) -> bool {
        if critical_section::with(|cs| self.draining.borrow(cs).replace(true)) {
            return false;
        }
        let _guard = DrainGuard(&self.draining);

        let batch = self.queue.take();
        if batch.is_empty() {
            return false;
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("draining {} actions", batch.len());

        let state = batch.iter().fold(self.get_state(), R::reduce);
        critical_section::with(|cs| *self.state.borrow_ref_mut(cs) = state.clone());

        let subscribers = critical_section::with(|cs| self.subscribers.borrow_ref(cs).clone());
        let dispatcher = self.dispatcher();
        for subscriber in subscribers.iter() {
            subscriber(&state, dispatcher);
        }

        true
    }
}

/// Clears the re-entrancy flag when a drain ends, including by unwinding.
struct DrainGuard<'a>(&'a Mutex<Cell<bool>>);

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        critical_section::with(|cs| self.0.borrow(cs).set(false));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter;

    impl Reducer for Counter {
        type State = u32;
        type Action = u32;

        fn reduce(state: u32, action: &u32) -> u32 {
            state + action
        }
    }

    #[test]
    fn test_drain_empty_queue() {
        let store: Store<Counter, 4, 1> = Store::new(0);
        assert!(!store.drain());
        assert_eq!(store.get_state(), 0);
    }

    #[test]
    fn test_state_only_changes_on_drain() {
        let store: Store<Counter, 4, 1> = Store::new(0);
        store.dispatch(2);
        store.dispatch(3);

        assert_eq!(store.get_state(), 0);
        assert_eq!(store.pending(), 2);
        assert!(store.drain());
        assert_eq!(store.get_state(), 5);
    }

    struct Fragile;

    impl Reducer for Fragile {
        type State = u32;
        type Action = u32;

        fn reduce(state: u32, action: &u32) -> u32 {
            assert_ne!(*action, 0, "zero is rejected");
            state + action
        }
    }

    #[test]
    fn test_drain_recovers_after_panicking_reducer() {
        let store: Store<Fragile, 4, 1> = Store::new(1);
        store.dispatch(0);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| store.drain()));
        assert!(result.is_err());
        assert_eq!(store.get_state(), 1);

        store.dispatch(4);
        assert!(store.drain());
        assert_eq!(store.get_state(), 5);
    }

    #[test]
    fn test_subscriber_registry_bound() {
        let store: Store<Counter, 4, 1> = Store::new(0);
        store.subscribe(|_, _| {}).unwrap();

        assert_eq!(
            store.subscribe(|_, _| {}),
            Err(StoreError::TooManySubscribers { capacity: 1 })
        );
    }
}
