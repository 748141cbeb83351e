//! The slot store behind a [`Fifo`](crate::Fifo).
//!
//! `Ring` is a plain circular buffer with no synchronization of its own. It
//! lives inside the fifo's mutex, so every method takes `&mut self` (or
//! `&self` for reads) and the borrow checker enforces that the lock is held.
//!
//! Layout:
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │ slots: Box<[MaybeUninit<T>]>   (capacity, never grows) │
//! ├───────────────────────────────────────────────────────┤
//! │ insertion  - next slot a producer writes               │
//! │ extraction - next slot the consumer reads              │
//! │ len        - live items, authoritative count           │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! Live items occupy the circular range `[extraction, extraction + len)`.
//! Slots outside that range are uninitialized or hold moved-out data and are
//! never read.

use std::mem::MaybeUninit;

use crate::BuildError;

pub(crate) struct Ring<T> {
    slots: Box<[MaybeUninit<T>]>,
    insertion: usize,
    extraction: usize,
    len: usize,
}

impl<T> Ring<T> {
    /// Allocates storage for exactly `capacity` slots.
    ///
    /// Allocation failure is reported rather than aborting the process.
    pub(crate) fn allocate(capacity: usize) -> Result<Self, BuildError> {
        if capacity == 0 {
            return Err(BuildError::ZeroCapacity);
        }

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| BuildError::AllocationFailed { capacity })?;
        slots.resize_with(capacity, MaybeUninit::uninit);

        Ok(Self {
            slots: slots.into_boxed_slice(),
            insertion: 0,
            extraction: 0,
            len: 0,
        })
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Next cursor position, modulo capacity.
    #[inline]
    fn advance(&self, index: usize) -> usize {
        let next = index + 1;
        if next == self.slots.len() { 0 } else { next }
    }

    /// Writes `value` at the insertion cursor.
    ///
    /// Returns the value back if every slot is live.
    #[inline]
    pub(crate) fn push(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            return Err(value);
        }

        self.slots[self.insertion].write(value);
        self.insertion = self.advance(self.insertion);
        self.len += 1;
        Ok(())
    }

    /// Moves the value out of the extraction cursor.
    #[inline]
    pub(crate) fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        // Safety: len > 0, so the slot at `extraction` is the head of the live
        // range and was initialized by `push`. Advancing the cursor below
        // removes it from the live range, so it is never read twice.
        let value = unsafe { self.slots[self.extraction].assume_init_read() };
        self.extraction = self.advance(self.extraction);
        self.len -= 1;
        Some(value)
    }
}

impl<T> Drop for Ring<T> {
    fn drop(&mut self) {
        let mut index = self.extraction;
        for _ in 0..self.len {
            // Safety: every slot in the live range is initialized and owned
            // by the ring.
            unsafe { self.slots[index].assume_init_drop() };
            index = self.advance(index);
        }
    }
}
