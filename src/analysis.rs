//! Calculation phase: drive an assembled tank at one operating point.

use std::time::Instant;

use crate::assembler::Tank;
use crate::element::Reading;
use crate::monitor::Report;
use crate::stats::Stats;

/// Outcome of one tank calculation.
#[derive(Debug, Clone)]
pub struct TankResult {
    pub frequency: f64,
    /// Injected current (A).
    pub current: f64,
    /// Aggregate readings of the root.
    pub root: Reading,
    /// Observations and warnings, innermost element first.
    pub report: Report,
    /// Largest current the tank tolerates at this frequency without exceeding
    /// any voltage rating.
    pub allowed_current: f64,
}

impl TankResult {
    pub fn has_violations(&self) -> bool {
        self.report.violations().next().is_some()
    }
}

/// Calculate `tank` at `frequency` (Hz) with `current` (A) injected.
pub fn run(
    tank: &mut Tank,
    frequency: f64,
    current: f64,
    mut stats: Option<&mut Stats>,
) -> TankResult {
    let _span = tracing::info_span!("tank_analysis", frequency, current).entered();
    let start = Instant::now();

    let mut report = Report::new();
    let root = tank.calculate(frequency, current, &mut report);
    let allowed_current = tank.root().allowed_current(frequency);

    tracing::info!(
        reactance = root.reactance,
        voltage = root.voltage,
        power = root.power,
        allowed_current,
        "tank calculated"
    );

    if let Some(ref mut s) = stats {
        s.add_phase("Calculate", start.elapsed());
        s.elements = tank.root().node_count();
        s.observations += report.observations().count();
        s.violations += report.violations().count();
    }

    TankResult {
        frequency,
        current,
        root,
        report,
        allowed_current,
    }
}
