//! Observation and rating-violation reporting for monitored elements.
//!
//! After a monitored element is calculated it emits one `Observation` and,
//! independently, one `Violation` per quantity above its rated maximum. Both go
//! to an `Observer`; violations never stop the calculation.

use std::fmt;

use crate::element::{Rating, Reading};
use crate::output::Sig;

/// Receives reports from monitored elements, innermost first.
pub trait Observer {
    fn observe(&mut self, observation: &Observation);
    fn violation(&mut self, violation: &Violation);
}

/// Discards everything.
impl Observer for () {
    fn observe(&mut self, _observation: &Observation) {}
    fn violation(&mut self, _violation: &Violation) {}
}

/// Operating point of one element after a calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub name: String,
    pub current: f64,
    pub voltage: f64,
    pub power: f64,
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Capacitor: {}, Current: {}, Voltage: {}, Power: {}",
            self.name,
            Sig(self.current),
            Sig(self.voltage),
            Sig(self.power)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    Overcurrent,
    Overvoltage,
    Overpower,
}

impl ViolationKind {
    pub const ALL: [ViolationKind; 3] = [
        ViolationKind::Overcurrent,
        ViolationKind::Overvoltage,
        ViolationKind::Overpower,
    ];

    pub fn quantity(self) -> &'static str {
        match self {
            ViolationKind::Overcurrent => "current",
            ViolationKind::Overvoltage => "voltage",
            ViolationKind::Overpower => "power",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            ViolationKind::Overcurrent => "A",
            ViolationKind::Overvoltage => "V",
            ViolationKind::Overpower => "W",
        }
    }

    fn measured(self, reading: &Reading) -> f64 {
        match self {
            ViolationKind::Overcurrent => reading.current,
            ViolationKind::Overvoltage => reading.voltage,
            ViolationKind::Overpower => reading.power,
        }
    }

    fn limit(self, rating: &Rating) -> f64 {
        match self {
            ViolationKind::Overcurrent => rating.max_current,
            ViolationKind::Overvoltage => rating.max_voltage,
            ViolationKind::Overpower => rating.max_power,
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ViolationKind::Overcurrent => "Overcurrent",
            ViolationKind::Overvoltage => "Overvoltage",
            ViolationKind::Overpower => "Overpower",
        };
        f.write_str(label)
    }
}

/// A measured value above the element's rated maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub name: String,
    pub measured: f64,
    pub limit: f64,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quantity = self.kind.quantity();
        let unit = self.kind.unit();
        write!(
            f,
            "Warning: {} condition on {}. The {quantity} is {}{unit}, \
             which exceeds the maximum {quantity} of {}{unit}!",
            self.kind,
            self.name,
            Sig(self.measured),
            Sig(self.limit)
        )
    }
}

/// Violations of `rating` by `reading`, in current/voltage/power order.
pub fn check(name: &str, rating: &Rating, reading: &Reading) -> Vec<Violation> {
    ViolationKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let measured = kind.measured(reading);
            let limit = kind.limit(rating);
            (measured > limit).then(|| Violation {
                kind,
                name: name.to_string(),
                measured,
                limit,
            })
        })
        .collect()
}

/// Report one monitored calculation to `observer`.
pub(crate) fn inspect(
    name: &str,
    rating: &Rating,
    reading: &Reading,
    observer: &mut dyn Observer,
) {
    let observation = Observation {
        name: name.to_string(),
        current: reading.current,
        voltage: reading.voltage,
        power: reading.power,
    };
    tracing::debug!(
        element = name,
        current = reading.current,
        voltage = reading.voltage,
        power = reading.power,
        "calculated"
    );
    observer.observe(&observation);

    for violation in check(name, rating, reading) {
        tracing::warn!(
            element = name,
            kind = %violation.kind,
            measured = violation.measured,
            limit = violation.limit,
            "rating exceeded"
        );
        observer.violation(&violation);
    }
}

/// One entry of a `Report`, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Observation(Observation),
    Violation(Violation),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Observation(observation) => fmt::Display::fmt(observation, f),
            Event::Violation(violation) => fmt::Display::fmt(violation, f),
        }
    }
}

/// Observer that records everything it is told.
#[derive(Debug, Clone, Default)]
pub struct Report {
    events: Vec<Event>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn observations(&self) -> impl Iterator<Item = &Observation> {
        self.events.iter().filter_map(|e| match e {
            Event::Observation(observation) => Some(observation),
            Event::Violation(_) => None,
        })
    }

    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.events.iter().filter_map(|e| match e {
            Event::Violation(violation) => Some(violation),
            Event::Observation(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Observer for Report {
    fn observe(&mut self, observation: &Observation) {
        self.events.push(Event::Observation(observation.clone()));
    }

    fn violation(&mut self, violation: &Violation) {
        self.events.push(Event::Violation(violation.clone()));
    }
}
