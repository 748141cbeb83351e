//! Operation outcomes and construction errors.

use std::fmt;

/// The five distinguishable outcomes of a fifo operation.
///
/// [`Fifo::push`](crate::Fifo::push) and [`Fifo::try_pop`](crate::Fifo::try_pop)
/// return `Result`s; `Status` flattens either kind of result into a single
/// value for callers (and test rigs) that branch on, or print, which outcome
/// occurred.
///
/// # Example
///
/// ```
/// use nexus_fifo::{Fifo, Status};
///
/// let fifo = Fifo::<u32>::new(1);
///
/// assert_eq!(Status::of_pop(&fifo.try_pop()), Status::Empty);
/// assert_eq!(Status::of_push(&fifo.push(1)), Status::Success);
/// assert_eq!(Status::of_push(&fifo.push(2)), Status::Full);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The operation completed.
    Success,
    /// Push rejected: every slot was occupied, detected before touching the lock.
    Full,
    /// Pop rejected: no items were available.
    Empty,
    /// Push rejected: another thread held the lock. Retry later.
    Locked,
    /// Push rejected: the lock was acquired but another producer had just
    /// taken the last free slot.
    Preempted,
}

impl Status {
    /// Status of a [`Fifo::push`](crate::Fifo::push) result.
    pub fn of_push<T>(result: &Result<(), PushError<T>>) -> Self {
        match result {
            Ok(()) => Self::Success,
            Err(e) => e.status(),
        }
    }

    /// Status of a [`Fifo::try_pop`](crate::Fifo::try_pop) result.
    pub fn of_pop<T>(result: &Result<T, TryPopError>) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(e) => e.status(),
        }
    }

    /// Stable upper-case name, suitable for logs and test output.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Full => "FULL",
            Self::Empty => "EMPTY",
            Self::Locked => "LOCKED",
            Self::Preempted => "PREEMPTED",
        }
    }

    /// Returns `true` for [`Status::Success`].
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned by [`Fifo::push`](crate::Fifo::push).
///
/// Every variant hands the rejected item back to the caller, who decides
/// whether and when to retry.
#[derive(Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PushError<T> {
    /// The fifo was full.
    #[error("fifo is full")]
    Full(T),
    /// Another thread held the lock.
    #[error("fifo is locked by another thread")]
    Locked(T),
    /// Another producer took the last free slot first.
    #[error("preempted by another producer for the last free slot")]
    Preempted(T),
}

impl<T> PushError<T> {
    /// Returns the item that couldn't be pushed.
    pub fn into_inner(self) -> T {
        match self {
            Self::Full(item) | Self::Locked(item) | Self::Preempted(item) => item,
        }
    }

    /// The [`Status`] this error corresponds to.
    pub const fn status(&self) -> Status {
        match self {
            Self::Full(_) => Status::Full,
            Self::Locked(_) => Status::Locked,
            Self::Preempted(_) => Status::Preempted,
        }
    }

    /// Returns `true` if this error is the `Full` variant.
    pub const fn is_full(&self) -> bool {
        matches!(self, Self::Full(_))
    }

    /// Returns `true` if this error is the `Locked` variant.
    pub const fn is_locked(&self) -> bool {
        matches!(self, Self::Locked(_))
    }

    /// Returns `true` if this error is the `Preempted` variant.
    pub const fn is_preempted(&self) -> bool {
        matches!(self, Self::Preempted(_))
    }
}

impl<T> fmt::Debug for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self, f)
    }
}

/// Error returned by [`Fifo::try_pop`](crate::Fifo::try_pop).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TryPopError {
    /// No items were available.
    #[error("fifo is empty")]
    Empty,
}

impl TryPopError {
    /// The [`Status`] this error corresponds to.
    pub const fn status(self) -> Status {
        match self {
            Self::Empty => Status::Empty,
        }
    }
}

/// Error building a [`Fifo`](crate::Fifo).
///
/// Construction is the only place a fifo can fail outright; a failed build
/// never yields a partially initialized queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// Capacity was zero.
    #[error("capacity cannot be zero")]
    ZeroCapacity,
    /// The slot storage could not be allocated.
    #[error("failed to allocate storage for {capacity} slots")]
    AllocationFailed {
        /// Requested number of slots.
        capacity: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_error_carries_item() {
        let err = PushError::Preempted(String::from("work"));
        assert_eq!(err.status(), Status::Preempted);
        assert!(err.is_preempted());
        assert!(!err.is_full());
        assert_eq!(err.into_inner(), "work");
    }

    #[test]
    fn status_of_results() {
        assert_eq!(Status::of_push::<u8>(&Ok(())), Status::Success);
        assert_eq!(Status::of_push(&Err(PushError::Locked(1u8))), Status::Locked);
        assert_eq!(Status::of_pop(&Ok::<u8, _>(3)), Status::Success);
        assert_eq!(
            Status::of_pop::<u8>(&Err(TryPopError::Empty)),
            Status::Empty
        );
    }

    #[test]
    fn display() {
        assert_eq!(Status::Preempted.to_string(), "PREEMPTED");
        assert_eq!(format!("{:<8}|", Status::Full), "FULL    |");
        assert_eq!(PushError::Full(()).to_string(), "fifo is full");
        assert_eq!(format!("{:?}", PushError::Locked(())), "fifo is locked by another thread");
        assert_eq!(
            BuildError::AllocationFailed { capacity: 8 }.to_string(),
            "failed to allocate storage for 8 slots"
        );
    }
}
