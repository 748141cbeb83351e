//! # nexus-fifo
//!
//! A bounded multi-producer single-consumer fifo for handing fixed-size work
//! items from many writer threads to one reader thread with low latency.
//!
//! ## Features
//!
//! - **Non-blocking writers**: [`Fifo::push`] never waits. It succeeds or
//!   reports why it didn't ([`Status::Full`], [`Status::Locked`],
//!   [`Status::Preempted`]) and hands the item back.
//! - **Sleeping reader**: [`Fifo::pop`] parks the reader on a readiness event
//!   until data arrives; [`Fifo::try_pop`] returns [`Status::Empty`] instead.
//! - **Fixed storage**: one allocation at construction, exact capacity, no
//!   resizing.
//!
//! ## Design
//!
//! ```text
//!  writer ─┐                         ┌──────────────────────────────┐
//!  writer ─┼─ peek ─ try_lock ─────▶ │ Mutex<Ring>                  │
//!  writer ─┘   │        │            │  slots[cap]  ins  ext  len   │
//!              │     Locked          └──────────────┬───────────────┘
//!            Full                                   │ publish len
//!                                    population (CachePadded atomic)
//!
//!  push ok ──▶ ReadySignal::set ──▶ wakes reader blocked in pop()
//!  pop empties ring ──▶ ReadySignal::reset
//! ```
//!
//! - The unsynchronized population peek lets a writer bail out with
//!   [`Status::Full`] without touching the lock. It is a hint, never trusted
//!   for slot access.
//! - Writers only `try_lock`. Losing the lock is [`Status::Locked`]; winning
//!   it but finding the last slot gone is [`Status::Preempted`].
//! - The readiness event is set after the writer releases the lock, so the
//!   woken reader doesn't immediately contend with it.
//! - The reader re-checks the ring under the lock after every wake and waits
//!   again if a stale signal woke it.
//!
//! ## Example
//!
//! ```
//! use nexus_fifo::{Fifo, Status};
//!
//! let fifo = Fifo::<i32>::new(2);
//!
//! assert_eq!(Status::of_push(&fifo.push(7)), Status::Success);
//! assert_eq!(Status::of_push(&fifo.push(8)), Status::Success);
//! assert_eq!(Status::of_push(&fifo.push(9)), Status::Full);
//!
//! assert_eq!(fifo.try_pop(), Ok(7));
//! assert_eq!(fifo.pop(), 8);
//! assert_eq!(Status::of_pop(&fifo.try_pop()), Status::Empty);
//! ```
//!
//! ## Logging
//!
//! Construction and teardown emit `debug` events; contention outcomes and
//! reader waits emit `trace` events. Every event carries the fifo's
//! [`label`](FifoBuilder::label).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod builder;
mod error;
mod fifo;
mod ring;
mod signal;

pub use builder::FifoBuilder;
pub use error::{BuildError, PushError, Status, TryPopError};
pub use fifo::Fifo;

/// Capacity used by [`Fifo::default`] and [`FifoBuilder::new`].
pub const DEFAULT_CAPACITY: usize = 5;
