//! Construction-time configuration for [`Fifo`].

use crate::{BuildError, DEFAULT_CAPACITY, Fifo};

/// Builder for a [`Fifo`].
///
/// # Example
///
/// ```
/// use nexus_fifo::Fifo;
///
/// let fifo: Fifo<u64> = Fifo::<u64>::builder()
///     .capacity(64)
///     .label("orders")
///     .build()?;
///
/// assert_eq!(fifo.capacity(), 64);
/// assert_eq!(fifo.label(), "orders");
/// # Ok::<(), nexus_fifo::BuildError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FifoBuilder {
    capacity: usize,
    label: &'static str,
}

impl Default for FifoBuilder {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            label: "fifo",
        }
    }
}

impl FifoBuilder {
    /// Creates a builder with [`DEFAULT_CAPACITY`] slots and the label `"fifo"`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of slots. Exact: no rounding is applied.
    #[must_use]
    pub const fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the label attached to this fifo's log events.
    #[must_use]
    pub const fn label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    /// Allocates the slot store and synchronization primitives.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::ZeroCapacity`] if the capacity is zero and
    /// [`BuildError::AllocationFailed`] if the slot store can't be allocated.
    pub fn build<T>(self) -> Result<Fifo<T>, BuildError> {
        Fifo::from_builder(self)
    }

    pub(crate) const fn capacity_value(&self) -> usize {
        self.capacity
    }

    pub(crate) const fn label_value(&self) -> &'static str {
        self.label
    }
}
