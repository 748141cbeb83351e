//! The bounded multi-producer single-consumer fifo.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_utils::CachePadded;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::builder::FifoBuilder;
use crate::ring::Ring;
use crate::signal::ReadySignal;
use crate::{BuildError, DEFAULT_CAPACITY, PushError, TryPopError};

/// A fixed-capacity fifo for many writer threads and one reader thread.
///
/// Producers call [`push`](Fifo::push), which never blocks. The reader calls
/// [`try_pop`](Fifo::try_pop), which never waits for data, or
/// [`pop`](Fifo::pop), which sleeps until data arrives.
///
/// All methods take `&self`; share the fifo with `Arc` or scoped threads.
///
/// # Single consumer
///
/// Only one thread at a time may use the pop family. This is a caller
/// contract, not an enforced one: concurrent readers remain memory-safe and
/// `pop` never returns without an item, but ordering between readers is
/// unspecified.
///
/// # Example
///
/// ```
/// use nexus_fifo::Fifo;
/// use std::sync::Arc;
/// use std::thread;
///
/// let fifo = Arc::new(Fifo::<u64>::new(16));
///
/// let writer = {
///     let fifo = Arc::clone(&fifo);
///     thread::spawn(move || {
///         let mut item = 42;
///         while let Err(e) = fifo.push(item) {
///             item = e.into_inner();
///             std::hint::spin_loop();
///         }
///     })
/// };
///
/// // Sleeps until the writer has pushed.
/// assert_eq!(fifo.pop(), 42);
/// writer.join().unwrap();
/// ```
pub struct Fifo<T> {
    /// Published copy of the ring's length.
    ///
    /// Stored only while the ring lock is held; loaded without the lock as a
    /// fast-path hint. Never used to decide whether a slot may be touched.
    population: CachePadded<AtomicUsize>,
    /// Immutable after construction, readable without the lock.
    capacity: usize,
    ring: Mutex<Ring<T>>,
    ready: ReadySignal,
    label: &'static str,
}

impl<T> Fifo<T> {
    /// Creates a fifo with exactly `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 or the slot store can't be allocated.
    /// Use [`Fifo::builder`] to handle these as errors.
    ///
    /// # Example
    ///
    /// ```
    /// use nexus_fifo::Fifo;
    ///
    /// let fifo = Fifo::<String>::new(5);
    /// assert_eq!(fifo.capacity(), 5);
    /// assert_eq!(fifo.population(), 0);
    /// ```
    pub fn new(capacity: usize) -> Self {
        match FifoBuilder::new().capacity(capacity).build() {
            Ok(fifo) => fifo,
            Err(e) => panic!("failed to build fifo: {e}"),
        }
    }

    /// Returns a builder for configuring capacity and label.
    pub fn builder() -> FifoBuilder {
        FifoBuilder::new()
    }

    pub(crate) fn from_builder(builder: FifoBuilder) -> Result<Self, BuildError> {
        let label = builder.label_value();
        let ring = Ring::allocate(builder.capacity_value())?;
        let capacity = ring.capacity();

        debug!(label, capacity, "fifo constructed");

        Ok(Self {
            population: CachePadded::new(AtomicUsize::new(0)),
            capacity,
            ring: Mutex::new(ring),
            ready: ReadySignal::new(),
            label,
        })
    }

    /// Attempts to push an item without blocking.
    ///
    /// May be called from any number of threads concurrently.
    ///
    /// # Errors
    ///
    /// The item is handed back inside the error:
    ///
    /// - [`PushError::Full`] if the fifo looked full before any locking.
    /// - [`PushError::Locked`] if another thread held the lock.
    /// - [`PushError::Preempted`] if the lock was acquired but another
    ///   producer had just taken the last free slot.
    ///
    /// # Example
    ///
    /// ```
    /// use nexus_fifo::{Fifo, PushError};
    ///
    /// let fifo = Fifo::<u32>::new(2);
    ///
    /// assert!(fifo.push(1).is_ok());
    /// assert!(fifo.push(2).is_ok());
    /// assert!(matches!(fifo.push(3), Err(PushError::Full(3))));
    /// ```
    #[inline]
    pub fn push(&self, item: T) -> Result<(), PushError<T>> {
        // Racy peek: only spares a lock attempt when clearly full.
        if self.population.load(Ordering::Acquire) >= self.capacity {
            return Err(PushError::Full(item));
        }

        let Some(mut ring) = self.ring.try_lock() else {
            return Err(PushError::Locked(item));
        };

        if let Err(item) = ring.push(item) {
            drop(ring);
            trace!(label = self.label, "push preempted for last slot");
            return Err(PushError::Preempted(item));
        }
        self.population.store(ring.len(), Ordering::Release);
        drop(ring);

        // Outside the ring lock so a woken reader doesn't contend with us.
        self.ready.set();
        Ok(())
    }

    /// Attempts to pop the oldest item without waiting for data.
    ///
    /// If data is present but a producer is mid-push, this waits for the
    /// producer to release the lock (a bounded, short wait).
    ///
    /// Single consumer only; see the [type-level docs](Fifo#single-consumer).
    ///
    /// # Errors
    ///
    /// Returns [`TryPopError::Empty`] if no item is available.
    ///
    /// # Example
    ///
    /// ```
    /// use nexus_fifo::{Fifo, TryPopError};
    ///
    /// let fifo = Fifo::<u32>::new(4);
    /// assert_eq!(fifo.try_pop(), Err(TryPopError::Empty));
    ///
    /// fifo.push(7).unwrap();
    /// assert_eq!(fifo.try_pop(), Ok(7));
    /// ```
    #[inline]
    pub fn try_pop(&self) -> Result<T, TryPopError> {
        if self.population.load(Ordering::Acquire) == 0 {
            return Err(TryPopError::Empty);
        }

        self.take().ok_or(TryPopError::Empty)
    }

    /// Pops the oldest item, sleeping until one is available.
    ///
    /// Waits indefinitely; only a successful push (or process exit) releases
    /// a blocked reader.
    ///
    /// Single consumer only; see the [type-level docs](Fifo#single-consumer).
    pub fn pop(&self) -> T {
        loop {
            if self.population.load(Ordering::Acquire) == 0 {
                trace!(label = self.label, "reader waiting for data");
                self.ready.wait();
            }

            if let Some(item) = self.take() {
                return item;
            }

            // Woken by a stale signal: the item it announced is already gone.
            trace!(label = self.label, "reader woke to empty fifo");
        }
    }

    /// Critical section shared by the pop family.
    ///
    /// Resets readiness whenever the ring is left empty, so a following
    /// `pop` blocks instead of spinning on a stale signal.
    #[inline]
    fn take(&self) -> Option<T> {
        let mut ring = self.ring.lock();

        let item = ring.pop();
        if item.is_some() {
            self.population.store(ring.len(), Ordering::Release);
        }
        if ring.is_empty() {
            self.ready.reset();
        }

        item
    }

    /// Returns the number of items currently queued.
    ///
    /// Diagnostic only: the value may be stale by the time it's returned.
    #[inline]
    pub fn population(&self) -> usize {
        self.population.load(Ordering::Acquire)
    }

    /// Returns the number of slots.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if the fifo looked empty. Hint only.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.population() == 0
    }

    /// Returns `true` if the fifo looked full. Hint only.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.population() >= self.capacity
    }

    /// Returns the label attached to this fifo's log events.
    #[inline]
    pub const fn label(&self) -> &'static str {
        self.label
    }
}

impl<T> Default for Fifo<T> {
    /// A fifo with [`DEFAULT_CAPACITY`] slots.
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<T> Drop for Fifo<T> {
    fn drop(&mut self) {
        // Remaining items are dropped with the ring.
        debug!(
            label = self.label,
            remaining = self.ring.get_mut().len(),
            "fifo dropped"
        );
    }
}

impl<T> fmt::Debug for Fifo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fifo")
            .field("label", &self.label)
            .field("capacity", &self.capacity)
            .field("population", &self.population())
            .finish_non_exhaustive()
    }
}
