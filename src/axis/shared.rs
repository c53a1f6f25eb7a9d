//! Interrupt-safe home for an axis controller.

use core::cell::RefCell;

use critical_section::Mutex;

/// A controller shared between the step timer interrupt and the main loop.
///
/// Usable in a `static`. Every access runs inside a critical section, so
/// closures passed to [`lock`](Self::lock) must stay short.
///
/// ```rust,ignore
/// static AXIS: SharedAxis<MyAxis> = SharedAxis::empty();
///
/// #[interrupt]
/// fn TIMER0() {
///     AXIS.lock(|axis| axis.on_tick());
/// }
/// ```
pub struct SharedAxis<A> {
    inner: Mutex<RefCell<Option<A>>>,
}

impl<A> SharedAxis<A> {
    /// Create an empty cell.
    pub const fn empty() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Put a controller in the cell, returning the previous one.
    pub fn install(&self, axis: A) -> Option<A> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).replace(axis))
    }

    /// Take the controller out of the cell.
    pub fn take(&self) -> Option<A> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take())
    }

    /// Check if a controller is installed.
    pub fn is_installed(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref(cs).is_some())
    }

    /// Run `f` on the controller with interrupts masked.
    ///
    /// Returns `None` when the cell is empty.
    pub fn lock<R>(&self, f: impl FnOnce(&mut A) -> R) -> Option<R> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).as_mut().map(f))
    }
}

impl<A> Default for SharedAxis<A> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_empty_and_installed() {
        let cell: SharedAxis<u32> = SharedAxis::empty();
        assert_eq!(cell.lock(|v| *v), None);

        assert_eq!(cell.install(7), None);
        assert_eq!(cell.lock(|v| {
            *v += 1;
            *v
        }), Some(8));

        assert_eq!(cell.take(), Some(8));
        assert!(!cell.is_installed());
    }
}
