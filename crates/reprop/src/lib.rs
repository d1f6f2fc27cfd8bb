//! # Reprop
//!
//! Reactive properties: typed fields that gate reads and writes by an [`AccessMode`],
//! validate writes against a caller-supplied constraint, detect genuine change and
//! notify a single observer synchronously.
//!
//! ## Property kinds
//!
//! * [`Property`]: one stored value. Emits [`EventKind::Changed`] when a write
//!   actually changes it.
//! * [`DerivedProperty`]: no stored value. Every read re-runs the evaluator, so
//!   there is nothing to emit.
//! * [`DictProperty`]: a key-value mapping. Emits [`EventKind::RangeChanged`] when a
//!   key is inserted and [`EventKind::Changed`] when an existing key is overwritten.
//!
//! ## Write pipeline
//!
//! Policy violations (writing a `ReadOnly` property, a rejected constraint, an unchanged
//! value) are silent no-ops: `set` still returns the attempted value, nothing is stored
//! and nothing is emitted. Lookups of absent keys and reads of unconfigured derived
//! properties fail with a [`PropertyError`].
//!
//! # Example
//!
//! ```rust
//! use reprop::prelude::*;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let events = Rc::new(RefCell::new(Vec::new()));
//!
//! let mut speed = Property::new("speed", AccessMode::ReadWrite, 0.0_f64);
//! let sink = events.clone();
//! speed.connect_fn(move |change| {
//!     sink.borrow_mut().push((change.name.to_owned(), *change.value, change.kind));
//! });
//!
//! speed.set(320.0);
//! speed.set(320.0);
//!
//! assert_eq!(speed.get(), 320.0);
//! assert_eq!(events.borrow().as_slice(), &[("speed".to_owned(), 320.0, EventKind::Changed)]);
//! ```

mod access;
mod derived;
mod dictionary;
mod error;
pub mod prelude;
mod scalar;

pub use access::AccessMode;
pub use derived::{DerivedProperty, UNCONFIGURED};
pub use dictionary::{DictChange, DictProperty, DictSubscriber};
pub use error::{PropertyError, PropertyErrorExt};
pub use reprop_channel::{Change, Channel, EventKind, Subscriber};
pub use scalar::{Property, PropertyChange, PropertySubscriber, WRITE_ONLY_MASK};
