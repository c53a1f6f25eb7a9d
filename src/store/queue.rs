//! Bounded action queue shared with interrupt context.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::error::QueueFull;

/// Fixed-capacity FIFO of pending actions.
///
/// Producers push from any context; the consumer swaps the whole content out
/// in one critical section with [`take`](Self::take) and works on its private
/// copy. Pushes never block or allocate.
pub struct ActionQueue<A, const N: usize> {
    slots: Mutex<RefCell<Deque<A, N>>>,
}

impl<A, const N: usize> ActionQueue<A, N> {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self {
            slots: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Append an action.
    ///
    /// # Errors
    ///
    /// Hands the action back when every slot is taken.
    pub fn push(&self, action: A) -> Result<(), QueueFull<A>> {
        critical_section::with(|cs| self.slots.borrow_ref_mut(cs).push_back(action))
            .map_err(QueueFull)
    }

    /// Move every pending action out, leaving the queue empty.
    pub fn take(&self) -> Deque<A, N> {
        critical_section::with(|cs| {
            core::mem::replace(&mut *self.slots.borrow_ref_mut(cs), Deque::new())
        })
    }

    /// Number of pending actions.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.slots.borrow_ref(cs).len())
    }

    /// Check if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<A, const N: usize> Default for ActionQueue<A, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let queue: ActionQueue<u8, 4> = ActionQueue::new();
        queue.push(1).unwrap();
        queue.push(2).unwrap();
        queue.push(3).unwrap();

        let batch = queue.take();
        assert!(queue.is_empty());
        assert_eq!(batch.iter().copied().collect::<heapless::Vec<u8, 4>>(), [1, 2, 3]);
    }

    #[test]
    fn test_full_queue_returns_action() {
        let queue: ActionQueue<u8, 2> = ActionQueue::new();
        queue.push(1).unwrap();
        queue.push(2).unwrap();

        assert_eq!(queue.push(3), Err(QueueFull(3)));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.capacity(), 2);
    }

    #[test]
    fn test_take_frees_slots() {
        let queue: ActionQueue<u8, 1> = ActionQueue::new();
        queue.push(1).unwrap();
        let _ = queue.take();

        assert!(queue.push(2).is_ok());
    }
}
