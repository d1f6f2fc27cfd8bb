use crate::event::Change;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace};

/// A cloneable handle to a subscriber callback.
///
/// Two handles are equal only when they point at the same callback allocation,
/// which is what [`Channel::disconnect`] compares against.
pub struct Subscriber<P: ?Sized, V: ?Sized>(Rc<dyn Fn(Change<'_, P, V>)>);

impl<P: ?Sized, V: ?Sized> Subscriber<P, V> {
    /// Wraps a callback into a shareable handle.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(Change<'_, P, V>) + 'static,
    {
        Self(Rc::new(callback))
    }

    fn call(&self, change: Change<'_, P, V>) {
        (self.0)(change);
    }
}

impl<P: ?Sized, V: ?Sized> Clone for Subscriber<P, V> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<P: ?Sized, V: ?Sized> PartialEq for Subscriber<P, V> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<P: ?Sized, V: ?Sized> Eq for Subscriber<P, V> {}

impl<P: ?Sized, V: ?Sized> fmt::Debug for Subscriber<P, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Subscriber").field(&Rc::as_ptr(&self.0).cast::<()>()).finish()
    }
}

/// A single-slot synchronous event sink.
///
/// Holds at most one subscriber; [`Channel::connect`] silently replaces any
/// previous one.
pub struct Channel<P: ?Sized, V: ?Sized> {
    subscriber: Option<Subscriber<P, V>>,
}

impl<P: ?Sized, V: ?Sized> Default for Channel<P, V> {
    fn default() -> Self {
        Self { subscriber: None }
    }
}

impl<P: ?Sized, V: ?Sized> fmt::Debug for Channel<P, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel").field("subscriber", &self.subscriber).finish()
    }
}

impl<P: ?Sized, V: ?Sized> Channel<P, V> {
    /// Creates a channel with no subscriber.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `subscriber` as the sole subscriber, discarding any previous one.
    pub fn connect(&mut self, subscriber: Subscriber<P, V>) {
        if self.subscriber.replace(subscriber).is_some() {
            debug!("Channel subscriber replaced");
        }
    }

    /// Wraps `callback` in a [`Subscriber`], connects it and returns the handle
    /// needed to [`disconnect`](Self::disconnect) it later.
    pub fn connect_fn<F>(&mut self, callback: F) -> Subscriber<P, V>
    where
        F: Fn(Change<'_, P, V>) + 'static,
    {
        let subscriber = Subscriber::new(callback);
        self.connect(subscriber.clone());
        subscriber
    }

    /// Clears the subscriber only if it is `subscriber`.
    ///
    /// Returns `true` when the subscriber was removed.
    pub fn disconnect(&mut self, subscriber: &Subscriber<P, V>) -> bool {
        if self.subscriber.as_ref() == Some(subscriber) {
            self.subscriber = None;
            debug!("Channel subscriber disconnected");
            true
        } else {
            false
        }
    }

    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.subscriber.is_some()
    }

    /// Invokes the subscriber, if any, before returning.
    ///
    /// Returns `true` when a subscriber was invoked.
    pub fn emit(&self, change: Change<'_, P, V>) -> bool {
        let Some(subscriber) = &self.subscriber else {
            trace!(property = change.name, kind = %change.kind, "Change dropped: no subscriber");
            return false;
        };
        trace!(property = change.name, kind = %change.kind, "Change emitted");
        subscriber.call(change);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;
    use std::cell::RefCell;

    struct Source;

    fn recorder() -> (Rc<RefCell<Vec<(String, i32, EventKind)>>>, Subscriber<Source, i32>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let subscriber = Subscriber::<Source, i32>::new(move |change| {
            sink.borrow_mut().push((change.name.to_owned(), *change.value, change.kind));
        });
        (log, subscriber)
    }

    #[test]
    fn test_emit_without_subscriber_is_noop() {
        let channel = Channel::<Source, i32>::new();
        assert!(!channel.is_connected());
        assert!(!channel.emit(Change::new(&Source, &1, "x", EventKind::Changed)));
    }

    #[test]
    fn test_emit_invokes_subscriber_synchronously() {
        let (log, subscriber) = recorder();
        let mut channel = Channel::new();
        channel.connect(subscriber);

        assert!(channel.emit(Change::new(&Source, &5, "x", EventKind::Changed)));
        assert_eq!(log.borrow().as_slice(), &[("x".to_owned(), 5, EventKind::Changed)]);
    }

    #[test]
    fn test_connect_replaces_previous_subscriber() {
        let (first_log, first) = recorder();
        let (second_log, second) = recorder();
        let mut channel = Channel::new();

        channel.connect(first);
        channel.connect(second);
        channel.emit(Change::new(&Source, &9, "x", EventKind::RangeChanged));

        assert!(first_log.borrow().is_empty());
        assert_eq!(second_log.borrow().len(), 1);
    }

    #[test]
    fn test_disconnect_requires_same_subscriber() {
        let (_, connected) = recorder();
        let (_, stranger) = recorder();
        let mut channel = Channel::new();
        channel.connect(connected.clone());

        assert!(!channel.disconnect(&stranger));
        assert!(channel.is_connected());

        assert!(channel.disconnect(&connected));
        assert!(!channel.is_connected());
        assert!(!channel.disconnect(&connected));
    }

    #[test]
    fn test_subscriber_clones_compare_equal() {
        let (_, subscriber) = recorder();
        let (_, other) = recorder();
        assert_eq!(subscriber, subscriber.clone());
        assert_ne!(subscriber, other);
    }
}
