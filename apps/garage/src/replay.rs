use crate::car::Car;
use reprop::{PropertyError, PropertyErrorExt};
use tracing::{info, warn};

/// Drives a scripted session through every property of `car`.
///
/// Rejected writes are silent by nature and show up only as missing log entries;
/// failed reads are logged and returned.
pub fn replay(car: &mut Car) -> Vec<PropertyError> {
    let mut failures = Vec::new();

    car.speed.set(320.0);
    car.speed.set(320.0);
    info!(speed = %car.speed, mph = %car.speed_mph, "Cruising");

    car.lookup.set("Volvo".to_owned(), "Geele".to_owned());
    car.lookup.set("Volvo".to_owned(), "Saab".to_owned());

    for brand in ["Volvo", "Honda"] {
        match car.lookup.get(brand).context("Brand lookup") {
            Ok(owner) => info!(brand, %owner, "Lookup hit"),
            Err(e) => {
                warn!(brand, error = %e, "Lookup failed");
                failures.push(e);
            },
        }
    }

    let vin = car.vin.get();
    car.vin.set("TAMPERED".to_owned());
    if car.vin != vin {
        warn!("VIN changed despite read-only access");
    }

    car.pin.set(1234);

    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CarConfig;
    use reprop::EventKind;

    #[test]
    fn test_replay_produces_expected_events() {
        let mut car = Car::new(&CarConfig::default());
        let failures = replay(&mut car);

        let kinds: Vec<(String, EventKind)> =
            car.log().snapshot().into_iter().map(|r| (r.property, r.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("speed".to_owned(), EventKind::Changed),
                ("lookup".to_owned(), EventKind::RangeChanged),
                ("lookup".to_owned(), EventKind::Changed),
                ("pin".to_owned(), EventKind::Changed),
            ]
        );

        assert_eq!(failures.len(), 1);
        assert!(matches!(failures[0], PropertyError::NotFound { .. }));
        assert_eq!(failures[0].attached_context(), Some("Brand lookup"));
        assert_eq!(car.vin.get(), CarConfig::default().vin);
    }

    #[test]
    fn test_replay_on_slow_car_skips_speed_event() {
        let mut car = Car::new(&CarConfig { top_speed: 180.0, ..CarConfig::default() });
        replay(&mut car);

        assert!(car.speed == 0.0);
        assert!(car.log().snapshot().iter().all(|r| r.property != "speed"));
    }
}
