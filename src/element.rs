//! Capacitive elements: single parts, parallel banks, series strings and
//! monitored wrappers, all sharing one calculation contract.
//!
//! A tree is built once and never restructured. Rated values of groups are
//! derived at construction from the members' ratings; measurement state is
//! overwritten by every `calculate` call and is empty before the first one.

use crate::combine;
use crate::error::{Result, TankError};
use crate::ir::ComponentSpec;
use crate::monitor::{self, Observer};

/// Rated capacitance and maxima of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rating {
    /// Farads.
    pub capacitance: f64,
    /// Volts.
    pub max_voltage: f64,
    /// Amperes.
    pub max_current: f64,
    /// Watts.
    pub max_power: f64,
}

impl From<&ComponentSpec> for Rating {
    fn from(spec: &ComponentSpec) -> Self {
        Self {
            capacitance: spec.capacitance,
            max_voltage: spec.max_voltage,
            max_current: spec.max_current,
            max_power: spec.max_power,
        }
    }
}

/// Values produced by one `calculate` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Ohms.
    pub reactance: f64,
    pub current: f64,
    pub voltage: f64,
    pub power: f64,
}

/// Last measured values of an element. `None` until calculated.
///
/// `reactance` is also set by `calculate_reactance` on its own, which is how a
/// parallel bank probes its members before it knows their currents.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Measurement {
    pub reactance: Option<f64>,
    pub current: Option<f64>,
    pub voltage: Option<f64>,
    pub power: Option<f64>,
}

impl From<Reading> for Measurement {
    fn from(reading: Reading) -> Self {
        Self {
            reactance: Some(reading.reactance),
            current: Some(reading.current),
            voltage: Some(reading.voltage),
            power: Some(reading.power),
        }
    }
}

/// Which combination an element represents, looking through monitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Single,
    Parallel,
    Series,
}

/// One physical capacitor.
#[derive(Debug, Clone)]
pub struct Single {
    name: String,
    rating: Rating,
    measurement: Measurement,
}

/// A parallel bank or a series string of owned members.
#[derive(Debug, Clone)]
pub struct Group {
    name: String,
    rating: Rating,
    members: Vec<Element>,
    measurement: Measurement,
}

#[derive(Debug, Clone)]
pub enum Element {
    Single(Single),
    Parallel(Group),
    Series(Group),
    /// Reports every calculation of the wrapped element to the observer and
    /// flags readings above its rating.
    Monitored(Box<Element>),
}

impl Element {
    pub fn single(
        name: impl Into<String>,
        capacitance: f64,
        max_voltage: f64,
        max_current: f64,
        max_power: f64,
    ) -> Self {
        Element::Single(Single {
            name: name.into(),
            rating: Rating {
                capacitance,
                max_voltage,
                max_current,
                max_power,
            },
            measurement: Measurement::default(),
        })
    }

    pub fn from_spec(spec: &ComponentSpec) -> Self {
        Element::Single(Single {
            name: spec.name.clone(),
            rating: Rating::from(spec),
            measurement: Measurement::default(),
        })
    }

    /// Members wired in parallel. Fails when `members` is empty.
    pub fn parallel(name: impl Into<String>, members: Vec<Element>) -> Result<Self> {
        let group = Group::new(name.into(), members, combine::parallel_rating)?;
        Ok(Element::Parallel(group))
    }

    /// Members wired in series. Fails when `members` is empty.
    pub fn series(name: impl Into<String>, members: Vec<Element>) -> Result<Self> {
        let group = Group::new(name.into(), members, combine::series_rating)?;
        Ok(Element::Series(group))
    }

    pub fn monitor(inner: Element) -> Self {
        Element::Monitored(Box::new(inner))
    }

    pub fn name(&self) -> &str {
        match self {
            Element::Single(single) => &single.name,
            Element::Parallel(group) | Element::Series(group) => &group.name,
            Element::Monitored(inner) => inner.name(),
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Single(_) => ElementKind::Single,
            Element::Parallel(_) => ElementKind::Parallel,
            Element::Series(_) => ElementKind::Series,
            Element::Monitored(inner) => inner.kind(),
        }
    }

    pub fn is_monitored(&self) -> bool {
        matches!(self, Element::Monitored(_))
    }

    /// Rated values; derived from the members for groups.
    pub fn rating(&self) -> Rating {
        match self {
            Element::Single(single) => single.rating,
            Element::Parallel(group) | Element::Series(group) => group.rating,
            Element::Monitored(inner) => inner.rating(),
        }
    }

    pub fn capacitance(&self) -> f64 {
        self.rating().capacitance
    }

    pub fn measurement(&self) -> &Measurement {
        match self {
            Element::Single(single) => &single.measurement,
            Element::Parallel(group) | Element::Series(group) => &group.measurement,
            Element::Monitored(inner) => inner.measurement(),
        }
    }

    pub fn reactance(&self) -> Option<f64> {
        self.measurement().reactance
    }

    pub fn current(&self) -> Option<f64> {
        self.measurement().current
    }

    pub fn voltage(&self) -> Option<f64> {
        self.measurement().voltage
    }

    pub fn power(&self) -> Option<f64> {
        self.measurement().power
    }

    /// Direct members; empty for a single capacitor.
    pub fn members(&self) -> &[Element] {
        match self {
            Element::Single(_) => &[],
            Element::Parallel(group) | Element::Series(group) => &group.members,
            Element::Monitored(inner) => inner.members(),
        }
    }

    /// Number of capacitors and groups in the tree, monitors not counted.
    pub fn node_count(&self) -> usize {
        match self {
            Element::Single(_) => 1,
            Element::Parallel(group) | Element::Series(group) => {
                1 + group.members.iter().map(Element::node_count).sum::<usize>()
            }
            Element::Monitored(inner) => inner.node_count(),
        }
    }

    /// Reactance at `frequency` from the rated capacitance, stored as the
    /// element's current reactance.
    pub fn calculate_reactance(&mut self, frequency: f64) -> f64 {
        match self {
            Element::Single(Single {
                rating,
                measurement,
                ..
            })
            | Element::Parallel(Group {
                rating,
                measurement,
                ..
            })
            | Element::Series(Group {
                rating,
                measurement,
                ..
            }) => {
                let xc = combine::reactance(frequency, rating.capacitance);
                measurement.reactance = Some(xc);
                xc
            }
            Element::Monitored(inner) => inner.calculate_reactance(frequency),
        }
    }

    /// Drive `current` through the element at `frequency`, updating the
    /// measurement state of the element and everything below it.
    ///
    /// Monitored elements report to `observer` after their inner element is
    /// done, so reports arrive innermost first.
    pub fn calculate(
        &mut self,
        frequency: f64,
        current: f64,
        observer: &mut dyn Observer,
    ) -> Reading {
        match self {
            Element::Single(single) => single.calculate(frequency, current),
            Element::Parallel(group) => group.calculate_parallel(frequency, current, observer),
            Element::Series(group) => group.calculate_series(frequency, current, observer),
            Element::Monitored(inner) => {
                let reading = inner.calculate(frequency, current, observer);
                monitor::inspect(inner.name(), &inner.rating(), &reading, observer);
                reading
            }
        }
    }

    /// Largest injected current that keeps every part within its voltage
    /// rating at `frequency`. Does not touch the measurement state.
    pub fn allowed_current(&self, frequency: f64) -> f64 {
        match self {
            Element::Single(single) => {
                let rating = &single.rating;
                rating.max_voltage / combine::reactance(frequency, rating.capacitance)
            }
            Element::Parallel(group) => group
                .members
                .iter()
                .map(|m| group.rating.max_voltage / combine::reactance(frequency, m.capacitance()))
                .sum(),
            Element::Series(group) => group
                .members
                .iter()
                .map(|m| m.allowed_current(frequency))
                .fold(f64::INFINITY, f64::min),
            Element::Monitored(inner) => inner.allowed_current(frequency),
        }
    }
}

impl Single {
    fn calculate(&mut self, frequency: f64, current: f64) -> Reading {
        let reactance = combine::reactance(frequency, self.rating.capacitance);
        let voltage = reactance * current;
        let reading = Reading {
            reactance,
            current,
            voltage,
            power: voltage * current,
        };
        self.measurement = reading.into();
        reading
    }
}

impl Group {
    fn new(name: String, members: Vec<Element>, rule: fn(&[Rating]) -> Rating) -> Result<Self> {
        if members.is_empty() {
            return Err(TankError::EmptyGroup(name));
        }
        let ratings: Vec<Rating> = members.iter().map(Element::rating).collect();
        Ok(Self {
            name,
            rating: rule(&ratings),
            members,
            measurement: Measurement::default(),
        })
    }

    /// Shared voltage across the bank; each member takes its share of the
    /// current by reactance.
    fn calculate_parallel(
        &mut self,
        frequency: f64,
        current: f64,
        observer: &mut dyn Observer,
    ) -> Reading {
        let reactances: Vec<f64> = self
            .members
            .iter_mut()
            .map(|m| m.calculate_reactance(frequency))
            .collect();
        let reactance = combine::parallel_reactance(reactances.iter().copied());
        let voltage = current * reactance;

        let mut power = 0.0;
        for (member, member_xc) in self.members.iter_mut().zip(&reactances) {
            power += member.calculate(frequency, voltage / member_xc, observer).power;
        }

        let reading = Reading {
            reactance,
            current,
            voltage,
            power,
        };
        self.measurement = reading.into();
        reading
    }

    /// Same current through every member; voltage, power and reactance add.
    fn calculate_series(
        &mut self,
        frequency: f64,
        current: f64,
        observer: &mut dyn Observer,
    ) -> Reading {
        let mut total = Reading {
            reactance: 0.0,
            current,
            voltage: 0.0,
            power: 0.0,
        };
        for member in &mut self.members {
            let reading = member.calculate(frequency, current, observer);
            total.reactance += reading.reactance;
            total.voltage += reading.voltage;
            total.power += reading.power;
        }
        self.measurement = total.into();
        total
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::monitor::{Report, ViolationKind};

    fn cap(name: &str, capacitance: f64) -> Element {
        Element::single(name, capacitance, 1000.0, 100.0, 5.0e5)
    }

    #[test]
    fn single_measurement_empty_before_calculate() {
        let c = cap("C1", 1e-6);
        assert_eq!(*c.measurement(), Measurement::default());
        assert!(c.voltage().is_none());
    }

    #[test]
    fn single_reactance_voltage_power() {
        let mut c = cap("C1", 1e-6);
        for current in [0.0, 0.5, 2.0, 150.0] {
            let reading = c.calculate(60.0, current, &mut ());
            let xc = 1.0 / (2.0 * combine::PI_APPROX * 60.0 * 1e-6);
            assert_relative_eq!(reading.reactance, xc);
            assert_relative_eq!(reading.voltage, xc * current);
            assert_relative_eq!(reading.power, xc * current * current);
            assert_eq!(c.current(), Some(current));
            assert_eq!(c.voltage(), Some(reading.voltage));
        }
    }

    #[test]
    fn calculate_reactance_stores_only_reactance() {
        let mut c = cap("C1", 2e-6);
        let xc = c.calculate_reactance(60.0);
        assert_eq!(c.reactance(), Some(xc));
        assert!(c.current().is_none());
        assert!(c.power().is_none());
    }

    #[test]
    fn zero_frequency_gives_infinite_reactance() {
        let mut c = cap("C1", 1e-6);
        let reading = c.calculate(0.0, 1.0, &mut ());
        assert!(reading.reactance.is_infinite());
        assert!(reading.voltage.is_infinite());
    }

    #[test]
    fn equal_caps_double_in_parallel_halve_in_series() {
        let parallel = Element::parallel("p", vec![cap("a", 1e-6), cap("b", 1e-6)]).unwrap();
        let series = Element::series("s", vec![cap("a", 1e-6), cap("b", 1e-6)]).unwrap();
        assert_relative_eq!(parallel.capacitance(), 2e-6, max_relative = 1e-12);
        assert_relative_eq!(series.capacitance(), 0.5e-6, max_relative = 1e-12);
        assert_eq!(parallel.kind(), ElementKind::Parallel);
        assert_eq!(series.kind(), ElementKind::Series);
    }

    #[test]
    fn series_of_zero_capacitance_is_zero() {
        let series = Element::series("s", vec![cap("a", 0.0), cap("b", 0.0)]).unwrap();
        assert_eq!(series.capacitance(), 0.0);
    }

    #[test]
    fn group_ratings_derived_from_member_ratings() {
        let a = Element::single("a", 10e-6, 1000.0, 500.0, 10.0);
        let b = Element::single("b", 20e-6, 800.0, 600.0, 20.0);
        let parallel = Element::parallel("p", vec![a.clone(), b.clone()]).unwrap();
        let rating = parallel.rating();
        assert_relative_eq!(rating.max_current, 1100.0);
        assert_relative_eq!(rating.max_voltage, 800.0);
        assert_relative_eq!(rating.max_power, 30.0);

        let series = Element::series("s", vec![a, b]).unwrap();
        let rating = series.rating();
        assert_relative_eq!(rating.max_current, 500.0);
        assert_relative_eq!(rating.max_voltage, 1800.0);
        assert_relative_eq!(rating.max_power, 30.0);
    }

    #[test]
    fn group_rating_sees_through_monitor() {
        let a = Element::monitor(Element::single("a", 1e-6, 1000.0, 100.0, 1.0));
        let b = Element::monitor(Element::single("b", 1e-6, 500.0, 100.0, 1.0));
        let parallel = Element::parallel("p", vec![a, b]).unwrap();
        assert_relative_eq!(parallel.rating().max_voltage, 500.0);
        assert_relative_eq!(parallel.capacitance(), 2e-6, max_relative = 1e-12);
    }

    #[test]
    fn empty_group_rejected() {
        let err = Element::parallel("empty", Vec::new()).unwrap_err();
        assert!(matches!(err, TankError::EmptyGroup(ref name) if name == "empty"));
        assert!(Element::series("empty", Vec::new()).is_err());
    }

    #[test]
    fn parallel_splits_current_by_reactance() {
        let mut bank = Element::parallel("p", vec![cap("a", 1e-6), cap("b", 3e-6)]).unwrap();
        let reading = bank.calculate(60.0, 4.0, &mut ());

        let xa = combine::reactance(60.0, 1e-6);
        let xb = combine::reactance(60.0, 3e-6);
        let xp = 1.0 / (1.0 / xa + 1.0 / xb);
        assert_relative_eq!(reading.reactance, xp, max_relative = 1e-12);
        assert_relative_eq!(reading.voltage, 4.0 * xp, max_relative = 1e-12);
        assert_eq!(reading.current, 4.0);

        let members = bank.members();
        let ia = members[0].current().unwrap();
        let ib = members[1].current().unwrap();
        assert_relative_eq!(ia, 1.0, max_relative = 1e-9);
        assert_relative_eq!(ib, 3.0, max_relative = 1e-9);
        assert_relative_eq!(members[0].voltage().unwrap(), reading.voltage, max_relative = 1e-12);
        let member_power = members[0].power().unwrap() + members[1].power().unwrap();
        assert_relative_eq!(reading.power, member_power, max_relative = 1e-12);
    }

    #[test]
    fn series_sums_member_readings() {
        let mut string = Element::series("s", vec![cap("a", 1e-6), cap("b", 2e-6)]).unwrap();
        let reading = string.calculate(50.0, 1.5, &mut ());
        let xa = combine::reactance(50.0, 1e-6);
        let xb = combine::reactance(50.0, 2e-6);
        assert_relative_eq!(reading.reactance, xa + xb, max_relative = 1e-12);
        assert_relative_eq!(reading.voltage, 1.5 * (xa + xb), max_relative = 1e-12);
        assert_relative_eq!(reading.power, 1.5 * 1.5 * (xa + xb), max_relative = 1e-12);
        for member in string.members() {
            assert_eq!(member.current(), Some(1.5));
        }
    }

    #[test]
    fn recalculation_is_idempotent() {
        let bank = Element::parallel("p", vec![cap("a", 1e-6), cap("b", 3.3e-6)]).unwrap();
        let mut root = Element::series("root", vec![bank.clone(), bank]).unwrap();
        let first = root.calculate(60.0, 2.0, &mut ());
        let snapshot = *root.members()[1].members()[0].measurement();
        let second = root.calculate(60.0, 2.0, &mut ());
        assert_eq!(first, second);
        assert_eq!(*root.members()[1].members()[0].measurement(), snapshot);
    }

    #[test]
    fn recalculation_overwrites_state() {
        let mut c = cap("C1", 1e-6);
        c.calculate(60.0, 1.0, &mut ());
        c.calculate(120.0, 3.0, &mut ());
        assert_eq!(c.current(), Some(3.0));
        assert_relative_eq!(c.reactance().unwrap(), combine::reactance(120.0, 1e-6));
        assert_relative_eq!(c.rating().max_current, 100.0);
    }

    #[test]
    fn monitor_forwards_reads() {
        let mut m = Element::monitor(cap("C1", 1e-6));
        assert!(m.is_monitored());
        assert_eq!(m.name(), "C1");
        assert_eq!(m.kind(), ElementKind::Single);
        let reading = m.calculate(60.0, 1.0, &mut ());
        assert_eq!(m.voltage(), Some(reading.voltage));
        assert_eq!(m.current(), Some(1.0));
    }

    #[test]
    fn monitor_reports_overcurrent_only() {
        let mut m = Element::monitor(Element::single("C1", 1e-6, 1.0e9, 100.0, 1.0e12));
        let mut report = Report::new();
        m.calculate(60.0, 150.0, &mut report);

        let violations: Vec<_> = report.violations().collect();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::Overcurrent);
        assert_eq!(violations[0].measured, 150.0);
        assert_eq!(violations[0].limit, 100.0);
        assert_eq!(report.observations().count(), 1);
    }

    #[test]
    fn unmonitored_tree_reports_nothing() {
        let mut root = Element::series("root", vec![cap("a", 1e-6)]).unwrap();
        let mut report = Report::new();
        root.calculate(60.0, 1.0e6, &mut report);
        assert!(report.is_empty());
    }

    #[test]
    fn node_count_ignores_monitors() {
        let bank = Element::monitor(
            Element::parallel("p", vec![Element::monitor(cap("a", 1e-6)), cap("b", 1e-6)]).unwrap(),
        );
        let root = Element::series("root", vec![bank, cap("c", 1e-6)]).unwrap();
        assert_eq!(root.node_count(), 5);
    }

    #[test]
    fn allowed_current_single() {
        let c = Element::single("C1", 1e-6, 1000.0, 500.0, 0.0);
        let expected = 1000.0 / combine::reactance(1.0, 1e-6);
        assert_relative_eq!(c.allowed_current(1.0), expected, max_relative = 1e-12);
        assert!(c.measurement().reactance.is_none());
    }

    #[test]
    fn allowed_current_parallel_uses_weakest_voltage() {
        let bank = Element::parallel(
            "p",
            vec![
                Element::single("a", 10e-6, 1000.0, 500.0, 0.0),
                Element::single("b", 20e-6, 800.0, 600.0, 0.0),
            ],
        )
        .unwrap();
        let expected = 800.0 / combine::reactance(1.0, 30e-6);
        assert_relative_eq!(bank.allowed_current(1.0), expected, max_relative = 1e-9);
    }

    #[test]
    fn allowed_current_series_is_weakest_member() {
        let string = Element::series(
            "s",
            vec![
                Element::single("a", 10e-6, 1000.0, 500.0, 0.0),
                Element::single("b", 20e-6, 800.0, 600.0, 0.0),
            ],
        )
        .unwrap();
        let a = 1000.0 / combine::reactance(1.0, 10e-6);
        let b = 800.0 / combine::reactance(1.0, 20e-6);
        assert_relative_eq!(string.allowed_current(1.0), a.min(b), max_relative = 1e-12);
    }
}
