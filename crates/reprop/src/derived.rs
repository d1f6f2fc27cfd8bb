use crate::error::PropertyError;
use std::fmt;
use tracing::debug;

/// Rendered by a [`DerivedProperty`] that has no evaluator yet.
pub const UNCONFIGURED: &str = "<unconfigured>";

type Evaluator<T> = Box<dyn Fn() -> T>;

/// A computed, read-only view.
///
/// Holds no value and no cache: every [`DerivedProperty::get`] runs the evaluator,
/// so two consecutive reads differ whenever the evaluator's captured state does.
/// Nothing is stored, so nothing is ever emitted. Propagating changes of the inputs
/// is left to the owner.
pub struct DerivedProperty<T> {
    name: String,
    evaluator: Option<Evaluator<T>>,
}

impl<T> DerivedProperty<T> {
    /// Creates a property with no evaluator; reads fail until one is assigned.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), evaluator: None }
    }

    pub fn with_evaluator<F>(name: impl Into<String>, evaluator: F) -> Self
    where
        F: Fn() -> T + 'static,
    {
        Self { name: name.into(), evaluator: Some(Box::new(evaluator)) }
    }

    pub fn set_evaluator<F>(&mut self, evaluator: F)
    where
        F: Fn() -> T + 'static,
    {
        debug!(property = %self.name, "Evaluator assigned");
        self.evaluator = Some(Box::new(evaluator));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn is_configured(&self) -> bool {
        self.evaluator.is_some()
    }

    /// Evaluates the property.
    ///
    /// # Errors
    /// Returns [`PropertyError::NotConfigured`] if no evaluator was assigned.
    pub fn get(&self) -> Result<T, PropertyError> {
        let evaluator = self.evaluator.as_ref().ok_or_else(|| PropertyError::NotConfigured {
            message: format!("derived property '{}' has no evaluator", self.name).into(),
            context: None,
        })?;
        Ok(evaluator())
    }
}

impl<T: fmt::Display> fmt::Display for DerivedProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.evaluator {
            Some(evaluator) => fmt::Display::fmt(&evaluator(), f),
            None => f.write_str(UNCONFIGURED),
        }
    }
}

impl<T> fmt::Debug for DerivedProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedProperty")
            .field("name", &self.name)
            .field("configured", &self.evaluator.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_unconfigured_read_fails() {
        let mph = DerivedProperty::<f64>::new("mph");
        assert!(!mph.is_configured());
        assert!(matches!(mph.get(), Err(PropertyError::NotConfigured { .. })));
        assert_eq!(mph.to_string(), UNCONFIGURED);
    }

    #[test]
    fn test_every_read_reevaluates() {
        let source = Rc::new(Cell::new(10));
        let input = source.clone();
        let doubled = DerivedProperty::with_evaluator("doubled", move || input.get() * 2);

        assert_eq!(doubled.get().ok(), Some(20));
        source.set(21);
        assert_eq!(doubled.get().ok(), Some(42));
        assert_eq!(doubled.to_string(), "42");
    }

    #[test]
    fn test_set_evaluator_replaces_previous() {
        let mut label = DerivedProperty::with_evaluator("label", || "old".to_owned());
        label.set_evaluator(|| "new".to_owned());
        assert_eq!(label.get().ok().as_deref(), Some("new"));
    }

    #[test]
    fn test_evaluation_count_matches_reads() {
        let calls = Rc::new(Cell::new(0_u32));
        let counter = calls.clone();
        let mut ticks = DerivedProperty::new("ticks");
        ticks.set_evaluator(move || {
            counter.set(counter.get() + 1);
            counter.get()
        });

        let _ = ticks.get();
        let _ = ticks.to_string();
        assert_eq!(calls.get(), 2);
    }
}
