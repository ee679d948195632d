//! Series and parallel combination rules.
//!
//! Rated values combine once, when a group is built:
//!
//! | quantity     | series                 | parallel    |
//! |--------------|------------------------|-------------|
//! | capacitance  | 1 / Σ(1/Cᵢ), zeros skipped | Σ Cᵢ    |
//! | max current  | min Iᵢ                 | Σ Iᵢ        |
//! | max voltage  | Σ Vᵢ                   | min Vᵢ      |
//! | max power    | Σ Pᵢ                   | Σ Pᵢ        |
//!
//! Reactances combine at every calculation: series reactances add, parallel
//! reactances combine like parallel resistances.

use crate::element::Rating;

/// π as used by the reactance formula. Kept at five decimals so results line
/// up with the existing tooling that consumes the printed values.
#[allow(clippy::approx_constant)]
pub const PI_APPROX: f64 = 3.14159;

/// Capacitive reactance Xc = 1 / (2πfC) in ohms.
///
/// A zero frequency or capacitance gives `inf`; no special handling.
pub fn reactance(frequency: f64, capacitance: f64) -> f64 {
    1.0 / (2.0 * PI_APPROX * frequency * capacitance)
}

/// Series capacitance. Zero-valued members are skipped; all zeros gives 0.
pub fn series_capacitance(capacitances: impl IntoIterator<Item = f64>) -> f64 {
    let inverse_total: f64 = capacitances
        .into_iter()
        .filter(|&c| c != 0.0)
        .map(|c| 1.0 / c)
        .sum();
    if inverse_total == 0.0 {
        0.0
    } else {
        1.0 / inverse_total
    }
}

pub fn parallel_capacitance(capacitances: impl IntoIterator<Item = f64>) -> f64 {
    capacitances.into_iter().sum()
}

/// Reactance of a parallel bank: 1 / Σ(1/Xᵢ).
pub fn parallel_reactance(reactances: impl IntoIterator<Item = f64>) -> f64 {
    let reciprocal: f64 = reactances.into_iter().map(|x| 1.0 / x).sum();
    1.0 / reciprocal
}

pub fn series_reactance(reactances: impl IntoIterator<Item = f64>) -> f64 {
    reactances.into_iter().sum()
}

/// Derived rating of members wired in series.
///
/// An empty slice yields an infinite current limit; callers reject empty
/// groups before getting here.
pub fn series_rating(members: &[Rating]) -> Rating {
    Rating {
        capacitance: series_capacitance(members.iter().map(|r| r.capacitance)),
        max_voltage: members.iter().map(|r| r.max_voltage).sum(),
        max_current: min_of(members.iter().map(|r| r.max_current)),
        max_power: members.iter().map(|r| r.max_power).sum(),
    }
}

/// Derived rating of members wired in parallel.
pub fn parallel_rating(members: &[Rating]) -> Rating {
    Rating {
        capacitance: parallel_capacitance(members.iter().map(|r| r.capacitance)),
        max_voltage: min_of(members.iter().map(|r| r.max_voltage)),
        max_current: members.iter().map(|r| r.max_current).sum(),
        max_power: members.iter().map(|r| r.max_power).sum(),
    }
}

fn min_of(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::INFINITY, f64::min)
}
