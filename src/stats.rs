//! Performance statistics collection for `--stats` output.

use std::time::{Duration, Instant};

/// Collects phase timings and counters.
///
/// Created when `--stats` is passed, threaded as `Option<&mut Stats>`.
pub struct Stats {
    total_start: Instant,
    phases: Vec<(&'static str, Duration)>,
    /// Capacitors loaded from the rating file.
    pub parts_loaded: usize,
    /// Capacitors and groups in the assembled tree.
    pub elements: usize,
    pub observations: usize,
    pub violations: usize,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    pub fn new() -> Self {
        Self {
            total_start: Instant::now(),
            phases: Vec::new(),
            parts_loaded: 0,
            elements: 0,
            observations: 0,
            violations: 0,
        }
    }

    /// Record a completed phase with its duration.
    pub fn add_phase(&mut self, name: &'static str, duration: Duration) {
        self.phases.push((name, duration));
    }

    pub fn phases(&self) -> &[(&'static str, Duration)] {
        &self.phases
    }

    /// Print the stats table to stderr.
    pub fn display(&self) {
        let total = self.total_start.elapsed();
        eprintln!();
        eprintln!("=== Tank Calculator Stats ===");

        for (name, dur) in &self.phases {
            eprintln!("  {:<24} {:>10.6}s", name, dur.as_secs_f64());
        }

        eprintln!("  Parts loaded:            {}", self.parts_loaded);
        eprintln!("  Tree elements:           {}", self.elements);
        eprintln!("  Observations:            {}", self.observations);
        eprintln!("  Violations:              {}", self.violations);
        eprintln!("  ─────────────────────────────────");
        eprintln!("  Total:                   {:>10.6}s", total.as_secs_f64());
    }
}
