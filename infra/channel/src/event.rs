use std::fmt;
use strum_macros::{Display, EnumString, IntoStaticStr};

/// The kind of mutation a [`Change`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum EventKind {
    /// An existing value was replaced.
    Changed,
    /// The key population of a collection grew.
    RangeChanged,
}

/// Payload delivered to a subscriber on every emission.
///
/// Borrows everything from the emitter; subscribers that need to keep the value
/// must clone it.
pub struct Change<'a, P: ?Sized, V: ?Sized> {
    /// The emitting property.
    pub source: &'a P,
    /// The value that was written.
    pub value: &'a V,
    /// Name of the emitting property.
    pub name: &'a str,
    pub kind: EventKind,
}

impl<'a, P: ?Sized, V: ?Sized> Change<'a, P, V> {
    #[must_use]
    pub const fn new(source: &'a P, value: &'a V, name: &'a str, kind: EventKind) -> Self {
        Self { source, value, name, kind }
    }
}

impl<P: ?Sized, V: ?Sized> Clone for Change<'_, P, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: ?Sized, V: ?Sized> Copy for Change<'_, P, V> {}

impl<P: ?Sized, V: fmt::Debug + ?Sized> fmt::Debug for Change<'_, P, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Change")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_event_kind_renders_variant_name() {
        assert_eq!(EventKind::Changed.to_string(), "Changed");
        assert_eq!(EventKind::RangeChanged.to_string(), "RangeChanged");
        let raw: &'static str = EventKind::RangeChanged.into();
        assert_eq!(raw, "RangeChanged");
    }

    #[test]
    fn test_event_kind_parses_from_name() {
        assert_eq!(EventKind::from_str("Changed").ok(), Some(EventKind::Changed));
        assert!(EventKind::from_str("Removed").is_err());
    }

    #[test]
    fn test_change_debug_skips_source() {
        struct Opaque;
        let change = Change::new(&Opaque, &3_u8, "level", EventKind::Changed);
        let rendered = format!("{change:?}");
        assert!(rendered.contains("\"level\""));
        assert!(rendered.contains("Changed"));
        assert!(!rendered.contains("Opaque"));
    }
}
