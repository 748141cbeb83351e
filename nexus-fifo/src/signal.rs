//! Manual-reset readiness event for the blocking reader.
//!
//! The flag stays set until explicitly reset, mirroring an OS manual-reset
//! event. It is a wake-up hint only: a set flag does not guarantee data, so
//! the reader must still check the ring under its lock after `wait` returns.
//!
//! Lock order: the ring mutex may be held while calling [`ReadySignal::reset`].
//! [`ReadySignal::set`] is only called after the ring mutex is released, and
//! [`ReadySignal::wait`] holds nothing but the signal's own mutex.

use parking_lot::{Condvar, Mutex};

pub(crate) struct ReadySignal {
    ready: Mutex<bool>,
    cond: Condvar,
}

impl ReadySignal {
    /// Creates the signal in the "not ready" state.
    pub(crate) fn new() -> Self {
        Self {
            ready: Mutex::new(false),
            cond: Condvar::new(),
        }
    }

    /// Sets the flag, waking any waiter on the unset → set edge.
    ///
    /// Setting an already-set flag is a no-op and issues no wakeup.
    #[inline]
    pub(crate) fn set(&self) {
        let mut ready = self.ready.lock();
        if !*ready {
            *ready = true;
            self.cond.notify_all();
        }
    }

    /// Clears the flag so the next `wait` actually blocks.
    #[inline]
    pub(crate) fn reset(&self) {
        *self.ready.lock() = false;
    }

    /// Blocks until the flag is set. Returns immediately if already set.
    ///
    /// Loops on the flag, so spurious condvar wakeups are absorbed here.
    pub(crate) fn wait(&self) {
        let mut ready = self.ready.lock();
        while !*ready {
            self.cond.wait(&mut ready);
        }
    }

    #[inline]
    pub(crate) fn is_set(&self) -> bool {
        *self.ready.lock()
    }
}
