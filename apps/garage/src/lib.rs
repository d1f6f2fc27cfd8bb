//! # Garage
//!
//! A demo consumer of `reprop`: a [`Car`](car::Car) that declares one named field per
//! property, wires constraints and evaluators, and records every emitted change into
//! an [`EventLog`](car::EventLog).
//!
//! ## Example
//! ```rust
//! use reprop_garage::car::Car;
//! use reprop_garage::config::CarConfig;
//!
//! let mut car = Car::new(&CarConfig::default());
//! car.speed.set(120.0);
//! assert_eq!(car.log().len(), 1);
//! assert!((car.speed_mph.get().unwrap_or_default() - 74.56).abs() < 0.01);
//! ```

pub mod car;
pub mod cli;
pub mod config;
pub mod replay;
