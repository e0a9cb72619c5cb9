//! Cooperative cancellation token.
//!
//! A shared flag set by the command side and observed by the render loop
//! at the top of each tick. An in-progress tick is never interrupted;
//! the running effect stops cleanly between frames.

use core::cell::Cell;

use critical_section::Mutex;

/// Cooperative stop flag, safe to share across execution contexts.
pub struct CancelToken {
    inner: Mutex<Cell<bool>>,
}

impl CancelToken {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(false)),
        }
    }

    /// Request cancellation. Idempotent: repeated requests are no-ops.
    pub fn request(&self) {
        critical_section::with(|cs| self.inner.borrow(cs).set(true));
    }

    /// Check the flag without consuming it.
    pub fn is_requested(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow(cs).get())
    }

    /// Consume a pending request, returning whether one was set.
    pub fn observe(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow(cs).replace(false))
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
