use crate::config::CarConfig;
use reprop::{AccessMode, DerivedProperty, DictProperty, EventKind, Property};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use tracing::info;

const KM_PER_MILE: f64 = 1.609_344;

/// One emitted change as seen by the car's subscribers.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub property: String,
    /// Rendered value; masked for write-only properties.
    pub value: String,
    pub kind: EventKind,
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} = {}", self.kind, self.property, self.value)
    }
}

/// Shared, append-only record of everything the car emitted.
#[derive(Debug, Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<EventRecord>>>);

impl EventLog {
    pub fn record(&self, property: &str, value: String, kind: EventKind) {
        info!(property, %value, %kind, "Property changed");
        self.0.borrow_mut().push(EventRecord { property: property.to_owned(), value, kind });
    }

    pub fn snapshot(&self) -> Vec<EventRecord> {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// A car whose fields are reactive properties.
///
/// Every stateful property reports into one shared [`EventLog`]. `speed_mph` reads a
/// snapshot that the `speed` subscriber refreshes, so it always agrees with `speed`.
pub struct Car {
    pub model: Property<String>,
    /// Kilometres per hour, constrained to `0..=top_speed`.
    pub speed: Property<f64>,
    pub speed_mph: DerivedProperty<f64>,
    pub vin: Property<String>,
    pub pin: Property<u32>,
    /// Free-form brand lookup; keys and values must be non-empty.
    pub lookup: DictProperty<String, String>,
    log: EventLog,
}

impl Car {
    pub fn new(config: &CarConfig) -> Self {
        let log = EventLog::default();

        let mut model = Property::new("model", AccessMode::ReadWrite, config.model.clone())
            .with_constraint(|model: &String| !model.trim().is_empty());
        let sink = log.clone();
        model.connect_fn(move |change| {
            sink.record(change.name, change.source.to_string(), change.kind);
        });

        let top_speed = config.top_speed;
        let mut speed = Property::new("speed", AccessMode::ReadWrite, 0.0_f64)
            .with_constraint(move |kph: &f64| kph.is_finite() && (0.0..=top_speed).contains(kph));
        let current = Rc::new(Cell::new(speed.get()));
        let (sink, latest) = (log.clone(), current.clone());
        speed.connect_fn(move |change| {
            latest.set(*change.value);
            sink.record(change.name, change.source.to_string(), change.kind);
        });

        let speed_mph =
            DerivedProperty::with_evaluator("speed_mph", move || current.get() / KM_PER_MILE);

        let vin = Property::new("vin", AccessMode::ReadOnly, config.vin.clone());

        let mut pin = Property::new("pin", config.pin_access, 0_u32)
            .with_constraint(|pin: &u32| *pin <= 9999);
        let sink = log.clone();
        pin.connect_fn(move |change| {
            sink.record(change.name, change.source.to_string(), change.kind);
        });

        let mut lookup = DictProperty::new("lookup", AccessMode::ReadWrite)
            .with_constraint(|key: &String, value: &String| !key.is_empty() && !value.is_empty());
        let sink = log.clone();
        lookup.connect_fn(move |change| {
            sink.record(change.name, change.value.clone(), change.kind);
        });

        info!(model = %config.model, top_speed, pin_access = %config.pin_access, "Car assembled");

        Self { model, speed, speed_mph, vin, pin, lookup, log }
    }

    pub const fn log(&self) -> &EventLog {
        &self.log
    }

    /// Renders every property as `name = value`, one per line; lookup keys are sorted.
    pub fn describe(&self) -> String {
        let mut out = format!(
            "{} = {}\n{} = {}\n{} = {:.2}\n{} = {}\n{} = {}\n",
            self.model.name(),
            self.model,
            self.speed.name(),
            self.speed,
            self.speed_mph.name(),
            self.speed_mph,
            self.vin.name(),
            self.vin,
            self.pin.name(),
            self.pin,
        );

        let mut entries: Vec<(&String, &String)> = self.lookup.iter().collect();
        entries.sort_unstable_by_key(|(key, _)| *key);
        for (key, value) in entries {
            out.push_str(&format!("{}.{key} = {value}\n", self.lookup.name()));
        }
        out
    }
}

impl fmt::Debug for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Car")
            .field("model", &self.model)
            .field("speed", &self.speed)
            .field("speed_mph", &self.speed_mph)
            .field("vin", &self.vin)
            .field("pin", &self.pin)
            .field("lookup", &self.lookup)
            .field("events", &self.log.len())
            .finish()
    }
}
