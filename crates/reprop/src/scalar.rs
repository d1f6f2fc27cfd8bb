use crate::access::AccessMode;
use reprop_channel::{Change, Channel, EventKind, Subscriber};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, trace};

/// Rendered in place of the value of a [`AccessMode::WriteOnly`] property.
pub const WRITE_ONLY_MASK: &str = "********";

/// Subscriber accepted by a [`Property<T>`].
pub type PropertySubscriber<T> = Subscriber<Property<T>, T>;

/// Payload emitted by a [`Property<T>`].
pub type PropertyChange<'a, T> = Change<'a, Property<T>, T>;

type Constraint<T> = Box<dyn Fn(&T) -> bool>;

/// A stored, access-gated, validated value that notifies one subscriber on change.
///
/// A write is applied only when, in this order:
/// 1. the new value differs from the stored one,
/// 2. the access mode permits writes,
/// 3. the constraint, if any, accepts the value.
///
/// Every failed check is a silent no-op. A successful write stores the value and
/// then emits [`EventKind::Changed`] before [`Property::set`] returns.
pub struct Property<T> {
    value: T,
    name: String,
    access: AccessMode,
    constraint: Option<Constraint<T>>,
    channel: Channel<Self, T>,
}

impl<T> Property<T> {
    pub fn new(name: impl Into<String>, access: AccessMode, initial: T) -> Self {
        Self { value: initial, name: name.into(), access, constraint: None, channel: Channel::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn access(&self) -> AccessMode {
        self.access
    }

    /// Assigns the predicate consulted on every subsequent write, replacing any previous one.
    pub fn set_constraint<F>(&mut self, constraint: F)
    where
        F: Fn(&T) -> bool + 'static,
    {
        debug!(property = %self.name, "Constraint assigned");
        self.constraint = Some(Box::new(constraint));
    }

    #[must_use]
    pub fn with_constraint<F>(mut self, constraint: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        self.set_constraint(constraint);
        self
    }

    pub fn clear_constraint(&mut self) {
        self.constraint = None;
    }

    pub const fn has_constraint(&self) -> bool {
        self.constraint.is_some()
    }

    /// Replaces the subscriber.
    pub fn connect(&mut self, subscriber: PropertySubscriber<T>) {
        self.channel.connect(subscriber);
    }

    /// Connects a closure and returns its handle for [`Property::disconnect`].
    pub fn connect_fn<F>(&mut self, callback: F) -> PropertySubscriber<T>
    where
        F: Fn(PropertyChange<'_, T>) + 'static,
    {
        self.channel.connect_fn(callback)
    }

    pub fn disconnect(&mut self, subscriber: &PropertySubscriber<T>) -> bool {
        self.channel.disconnect(subscriber)
    }

    pub const fn is_connected(&self) -> bool {
        self.channel.is_connected()
    }
}

impl<T: Default> Property<T> {
    /// Creates a property holding `T::default()`.
    pub fn with_default(name: impl Into<String>, access: AccessMode) -> Self {
        Self::new(name, access, T::default())
    }
}

impl<T: Clone + Default> Property<T> {
    /// Returns the stored value, or `T::default()` for write-only properties.
    pub fn get(&self) -> T {
        self.observable().into_owned()
    }

    fn observable(&self) -> Cow<'_, T> {
        if self.access.can_read() { Cow::Borrowed(&self.value) } else { Cow::Owned(T::default()) }
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Attempts to store `value` and always returns it.
    pub fn set(&mut self, value: T) -> T {
        if self.value == value {
            trace!(property = %self.name, reason = "unchanged", "Write skipped");
            return value;
        }
        if !self.access.can_write() {
            trace!(property = %self.name, reason = "read_only", "Write rejected");
            return value;
        }
        if let Some(constraint) = &self.constraint
            && !constraint(&value)
        {
            trace!(property = %self.name, reason = "constraint", "Write rejected");
            return value;
        }

        self.value = value.clone();

        let this = &*self;
        this.channel.emit(Change::new(this, &value, &this.name, EventKind::Changed));
        value
    }
}

impl<T: PartialEq + Clone + Default> PartialEq<T> for Property<T> {
    fn eq(&self, other: &T) -> bool {
        *self.observable() == *other
    }
}

impl<T: PartialOrd + Clone + Default> PartialOrd<T> for Property<T> {
    fn partial_cmp(&self, other: &T) -> Option<Ordering> {
        T::partial_cmp(&self.observable(), other)
    }
}

impl<T: fmt::Display> fmt::Display for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.access.can_read() {
            fmt::Display::fmt(&self.value, f)
        } else {
            f.write_str(WRITE_ONLY_MASK)
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Property");
        s.field("name", &self.name).field("access", &self.access);
        if self.access.can_read() {
            s.field("value", &self.value);
        } else {
            s.field("value", &WRITE_ONLY_MASK);
        }
        s.field("constrained", &self.constraint.is_some())
            .field("connected", &self.channel.is_connected())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn counted<T: 'static>(property: &mut Property<T>) -> Rc<Cell<usize>> {
        let hits = Rc::new(Cell::new(0));
        let sink = hits.clone();
        property.connect_fn(move |_| sink.set(sink.get() + 1));
        hits
    }

    #[test]
    fn test_set_stores_and_emits_once() {
        let mut speed = Property::new("speed", AccessMode::ReadWrite, 0.0_f64);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        speed.connect_fn(move |change| {
            sink.borrow_mut().push((change.name.to_owned(), *change.value, change.kind));
        });

        assert!((speed.set(320.0) - 320.0).abs() < f64::EPSILON);
        assert!((speed.get() - 320.0).abs() < f64::EPSILON);
        assert_eq!(seen.borrow().as_slice(), &[("speed".to_owned(), 320.0, EventKind::Changed)]);
    }

    #[test]
    fn test_equal_write_is_silent() {
        let mut gear = Property::new("gear", AccessMode::ReadWrite, 3_u8);
        let hits = counted(&mut gear);

        assert_eq!(gear.set(3), 3);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_read_only_never_mutates() {
        let mut vin = Property::new("vin", AccessMode::ReadOnly, "WDB123".to_owned());
        let hits = counted(&mut vin);

        assert_eq!(vin.set("XYZ".to_owned()), "XYZ");
        assert_eq!(vin.get(), "WDB123");
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_constraint_rejects_silently() {
        let mut rpm = Property::new("rpm", AccessMode::ReadWrite, 800_u32)
            .with_constraint(|v: &u32| *v <= 7_000);
        let hits = counted(&mut rpm);

        assert_eq!(rpm.set(9_000), 9_000);
        assert_eq!(rpm.get(), 800);
        assert_eq!(rpm.set(6_500), 6_500);
        assert_eq!(rpm.get(), 6_500);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_equality_checked_before_constraint() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let mut level = Property::new("level", AccessMode::ReadWrite, 1_i32);
        level.set_constraint(move |_| {
            counter.set(counter.get() + 1);
            true
        });

        level.set(1);
        assert_eq!(calls.get(), 0);
        level.set(2);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_clear_constraint_allows_any_value() {
        let mut level = Property::new("level", AccessMode::ReadWrite, 1_i32).with_constraint(|_| false);
        level.set(5);
        assert_eq!(level.get(), 1);

        level.clear_constraint();
        assert!(!level.has_constraint());
        level.set(5);
        assert_eq!(level.get(), 5);
    }

    #[test]
    fn test_write_only_hides_value() {
        let mut pin = Property::new("pin", AccessMode::WriteOnly, 0_u32);
        let hits = counted(&mut pin);

        pin.set(1234);
        assert_eq!(pin.get(), 0);
        assert_eq!(pin.to_string(), WRITE_ONLY_MASK);
        assert!(!format!("{pin:?}").contains("1234"));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_subscriber_observes_post_mutation_state() {
        let observed = Rc::new(Cell::new(0));
        let sink = observed.clone();
        let mut count = Property::new("count", AccessMode::ReadWrite, 0_i64);
        count.connect_fn(move |change| sink.set(change.source.get()));

        count.set(42);
        assert_eq!(observed.get(), 42);
    }

    #[test]
    fn test_disconnect_stops_notifications() {
        let mut count: Property<i64> = Property::with_default("count", AccessMode::ReadWrite);
        let hits = Rc::new(Cell::new(0));
        let sink = hits.clone();
        let handle = count.connect_fn(move |_| sink.set(sink.get() + 1));

        count.set(1);
        assert!(count.disconnect(&handle));
        count.set(2);
        assert_eq!(hits.get(), 1);
        assert!(!count.is_connected());
    }

    #[test]
    fn test_comparisons_delegate_to_value() {
        let speed = Property::new("speed", AccessMode::ReadWrite, 120_i32);
        assert!(speed == 120);
        assert!(speed > 100);
        assert!(speed < 200);

        let hidden = Property::new("hidden", AccessMode::WriteOnly, 120_i32);
        assert!(hidden == 0);
    }

    #[test]
    fn test_display_uses_value_formatting() {
        let speed = Property::new("speed", AccessMode::ReadOnly, 1.5_f64);
        assert_eq!(speed.to_string(), "1.5");
        assert_eq!(format!("{speed:.2}"), "1.50");
    }
}
