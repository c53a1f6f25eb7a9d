//! Store module for axis-store.
//!
//! Provides the interrupt-safe action queue, the reducer contract and the
//! store that folds queued actions into a published state snapshot.

mod container;
mod dispatcher;
mod queue;
mod reducer;

pub use container::{Store, Subscriber};
pub use dispatcher::Dispatcher;
pub use queue::ActionQueue;
pub use reducer::Reducer;
