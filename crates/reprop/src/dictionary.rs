use crate::access::AccessMode;
use crate::error::PropertyError;
use fxhash::FxHashMap;
use reprop_channel::{Change, Channel, EventKind, Subscriber};
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use tracing::{debug, trace};

/// Subscriber accepted by a [`DictProperty<K, V>`].
pub type DictSubscriber<K, V> = Subscriber<DictProperty<K, V>, V>;

/// Payload emitted by a [`DictProperty<K, V>`].
pub type DictChange<'a, K, V> = Change<'a, DictProperty<K, V>, V>;

type Constraint<K, V> = Box<dyn Fn(&K, &V) -> bool>;

/// A key-indexed collection that notifies one subscriber on every accepted write.
///
/// Inserting a new key emits [`EventKind::RangeChanged`]; overwriting a present key
/// emits [`EventKind::Changed`], even when the new value equals the old one.
/// Removal never emits.
///
/// Access gating:
/// * `ReadOnly` rejects `set` and `remove` silently.
/// * `WriteOnly` fails `get` with [`PropertyError::AccessDenied`] and yields no
///   values; keys and length stay visible.
pub struct DictProperty<K, V> {
    entries: FxHashMap<K, V>,
    name: String,
    access: AccessMode,
    constraint: Option<Constraint<K, V>>,
    channel: Channel<Self, V>,
}

impl<K, V> DictProperty<K, V> {
    pub fn new(name: impl Into<String>, access: AccessMode) -> Self {
        Self {
            entries: FxHashMap::default(),
            name: name.into(),
            access,
            constraint: None,
            channel: Channel::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn access(&self) -> AccessMode {
        self.access
    }

    /// Assigns the `(key, value)` predicate consulted on every subsequent write.
    pub fn set_constraint<F>(&mut self, constraint: F)
    where
        F: Fn(&K, &V) -> bool + 'static,
    {
        debug!(property = %self.name, "Constraint assigned");
        self.constraint = Some(Box::new(constraint));
    }

    #[must_use]
    pub fn with_constraint<F>(mut self, constraint: F) -> Self
    where
        F: Fn(&K, &V) -> bool + 'static,
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

    pub fn connect(&mut self, subscriber: DictSubscriber<K, V>) {
        self.channel.connect(subscriber);
    }

    pub fn connect_fn<F>(&mut self, callback: F) -> DictSubscriber<K, V>
    where
        F: Fn(DictChange<'_, K, V>) + 'static,
    {
        self.channel.connect_fn(callback)
    }

    pub fn disconnect(&mut self, subscriber: &DictSubscriber<K, V>) -> bool {
        self.channel.disconnect(subscriber)
    }

    pub const fn is_connected(&self) -> bool {
        self.channel.is_connected()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    /// Values in unspecified order; empty for write-only dictionaries.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        let readable = self.access.can_read();
        self.entries.values().filter(move |_| readable)
    }

    /// Entries in unspecified order; empty for write-only dictionaries.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        let readable = self.access.can_read();
        self.entries.iter().filter(move |_| readable)
    }
}

impl<K: Eq + Hash, V> DictProperty<K, V> {
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Looks up `key`.
    ///
    /// # Errors
    /// Returns [`PropertyError::NotFound`] when `key` is absent and
    /// [`PropertyError::AccessDenied`] for write-only dictionaries.
    pub fn get<Q>(&self, key: &Q) -> Result<&V, PropertyError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        if !self.access.can_read() {
            return Err(PropertyError::AccessDenied {
                message: format!("dictionary '{}' is write-only", self.name).into(),
                context: None,
            });
        }
        self.entries.get(key).ok_or_else(|| PropertyError::NotFound {
            message: format!("{key:?} is not present in '{}'", self.name).into(),
            context: None,
        })
    }

    /// Deletes `key` without emitting. Returns `true` when an entry was removed.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if !self.access.can_write() {
            trace!(property = %self.name, reason = "read_only", "Remove rejected");
            return false;
        }
        self.entries.remove(key).is_some()
    }
}

impl<K: Eq + Hash, V: Clone> DictProperty<K, V> {
    /// Attempts to store `value` under `key` and always returns `value`.
    pub fn set(&mut self, key: K, value: V) -> V {
        if !self.access.can_write() {
            trace!(property = %self.name, reason = "read_only", "Write rejected");
            return value;
        }
        if let Some(constraint) = &self.constraint
            && !constraint(&key, &value)
        {
            trace!(property = %self.name, reason = "constraint", "Write rejected");
            return value;
        }

        let kind = match self.entries.insert(key, value.clone()) {
            Some(_) => EventKind::Changed,
            None => EventKind::RangeChanged,
        };

        let this = &*self;
        this.channel.emit(Change::new(this, &value, &this.name, kind));
        value
    }
}

impl<K, V> fmt::Debug for DictProperty<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("DictProperty");
        s.field("name", &self.name).field("access", &self.access);
        if self.access.can_read() {
            s.field("entries", &self.entries);
        } else {
            s.field("keys", &self.entries.keys().collect::<Vec<_>>());
        }
        s.field("constrained", &self.constraint.is_some())
            .field("connected", &self.channel.is_connected())
            .finish()
    }
}
