//! Input records handed to the core.
//!
//! The parser produces `ComponentSpec`s from a rating file; the CLI produces a
//! `TankLayout` from the group arguments. The assembler consumes both.

use serde_derive::Deserialize;

/// Manufacturer ratings of one capacitor part.
///
/// Field names match the rating file: `voltage`, `current` and `power` are the
/// rated maxima, not operating values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComponentSpec {
    /// Unique part name (e.g. "1uF_1000V").
    pub name: String,
    /// Capacitance in farads.
    pub capacitance: f64,
    /// Maximum voltage in volts.
    #[serde(rename = "voltage")]
    pub max_voltage: f64,
    /// Maximum current in amperes.
    #[serde(rename = "current")]
    pub max_current: f64,
    /// Maximum power in watts.
    #[serde(rename = "power")]
    pub max_power: f64,
}

impl ComponentSpec {
    pub fn new(
        name: impl Into<String>,
        capacitance: f64,
        max_voltage: f64,
        max_current: f64,
        max_power: f64,
    ) -> Self {
        Self {
            name: name.into(),
            capacitance,
            max_voltage,
            max_current,
            max_power,
        }
    }
}

/// Group membership of a tank: two parallel banks wired in series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TankLayout {
    pub group1: Vec<String>,
    pub group2: Vec<String>,
}

impl TankLayout {
    pub fn new<A, B, S, T>(group1: A, group2: B) -> Self
    where
        A: IntoIterator<Item = S>,
        B: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            group1: group1.into_iter().map(Into::into).collect(),
            group2: group2.into_iter().map(Into::into).collect(),
        }
    }
}
