//! Electrical calculations for a capacitor tank: two parallel banks wired in
//! series, driven at one frequency and current, with every part and group
//! checked against its rated maxima.

pub mod analysis;
pub mod assembler;
pub mod combine;
pub mod element;
pub mod error;
pub mod ir;
pub mod monitor;
pub mod output;
pub mod parser;
pub mod registry;
pub mod stats;

pub use assembler::{assemble, Tank};
pub use element::{Element, ElementKind, Measurement, Rating, Reading};
pub use error::{Result, TankError};
pub use ir::{ComponentSpec, TankLayout};
pub use monitor::{Observation, Observer, Report, Violation, ViolationKind};
pub use registry::Registry;
