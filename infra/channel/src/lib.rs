//! # Channel
//!
//! A single-slot, synchronous notification channel used by reactive properties.
//!
//! ## Overview
//!
//! A [`Channel`] holds at most one [`Subscriber`]. Connecting a new subscriber replaces
//! the previous one; emitting invokes the subscriber inline, on the caller's stack,
//! before [`Channel::emit`] returns. There is no queueing, batching or fan-out.
//!
//! Every emission carries a [`Change`] payload: the emitting source, the new value,
//! the source's name and the [`EventKind`].
//!
//! ## Features
//!
//! * **Synchronous**: observers see the post-mutation state of the source.
//! * **Identity-based disconnect**: [`Subscriber`] handles compare by pointer.
//! * **Single-threaded**: built on `Rc`; channels are neither `Send` nor `Sync`.
//!
//! # Example
//!
//! ```rust
//! use reprop_channel::{Change, Channel, EventKind};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! struct Gauge;
//!
//! let seen = Rc::new(Cell::new(0.0));
//! let mut channel = Channel::<Gauge, f64>::new();
//!
//! let sink = seen.clone();
//! let handle = channel.connect_fn(move |change| sink.set(*change.value));
//!
//! let gauge = Gauge;
//! channel.emit(Change::new(&gauge, &42.0, "gauge", EventKind::Changed));
//! assert_eq!(seen.get(), 42.0);
//!
//! assert!(channel.disconnect(&handle));
//! assert!(!channel.emit(Change::new(&gauge, &7.0, "gauge", EventKind::Changed)));
//! ```

mod channel;
mod event;

pub use channel::{Channel, Subscriber};
pub use event::{Change, EventKind};
