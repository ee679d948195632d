//! Capacitor rating file parser.
//!
//! Parses a JSON rating file into `ComponentSpec` records.
//!
//! # Accepted layouts
//!
//! ```text
//! [ {"name": "1uF_1000V", "capacitance": 1e-6, "voltage": 1000, "current": 100, "power": 5e5}, ... ]
//! { "capacitors": [ ... ] }
//! ```
//!
//! Capacitance is in farads; `voltage`, `current` and `power` are the rated
//! maxima in V, A and W.

use std::path::Path;

use serde_derive::Deserialize;

use crate::error::{Result, TankError};
use crate::ir::ComponentSpec;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RatingFile {
    List(Vec<ComponentSpec>),
    Wrapped { capacitors: Vec<ComponentSpec> },
}

/// Parse a rating file's contents into component specs.
pub fn parse(input: &str) -> Result<Vec<ComponentSpec>> {
    let specs = match serde_json::from_str::<RatingFile>(input)? {
        RatingFile::List(specs) => specs,
        RatingFile::Wrapped { capacitors } => capacitors,
    };

    for (index, spec) in specs.iter().enumerate() {
        check_spec(index, spec)?;
    }
    Ok(specs)
}

/// Read and parse a rating file from disk.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<ComponentSpec>> {
    let input = std::fs::read_to_string(path)?;
    parse(&input)
}

fn check_spec(index: usize, spec: &ComponentSpec) -> Result<()> {
    if spec.name.trim().is_empty() {
        return Err(TankError::Parse(format!("record {index}: name is empty")));
    }
    if !spec.capacitance.is_finite() || spec.capacitance <= 0.0 {
        return Err(parse_err(spec, "capacitance must be positive", spec.capacitance));
    }
    for (label, value) in [
        ("voltage", spec.max_voltage),
        ("current", spec.max_current),
        ("power", spec.max_power),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(parse_err(spec, &format!("{label} must be non-negative"), value));
        }
    }
    Ok(())
}

fn parse_err(spec: &ComponentSpec, msg: &str, value: f64) -> TankError {
    TankError::Parse(format!("capacitor '{}': {msg} (got {value})", spec.name))
}
