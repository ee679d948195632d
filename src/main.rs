use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use tank_caps::analysis;
use tank_caps::assembler;
use tank_caps::ir::TankLayout;
use tank_caps::output;
use tank_caps::parser;
use tank_caps::registry::Registry;

/// Current, voltage and power of a two-bank capacitor tank, with rating warnings
#[derive(Parser)]
#[command(name = "calculate-tank-caps", version)]
struct Cli {
    /// Injected current in amperes
    #[arg(short = 'i', long = "current", default_value_t = 0.0)]
    current: f64,

    /// Operating frequency in hertz
    #[arg(short = 'f', long = "frequency", default_value_t = 0.0)]
    frequency: f64,

    /// Capacitors in group 1. Minimum 1 capacitor required. Maximum 5 capacitors allowed.
    #[arg(long, num_args = 1..=5, required = true)]
    group1: Vec<String>,

    /// Capacitors in group 2. Minimum 1 capacitor required. Maximum 5 capacitors allowed.
    #[arg(long, num_args = 1..=5, required = true)]
    group2: Vec<String>,

    /// JSON file with the capacitor ratings
    #[arg(short = 's', long = "spec")]
    spec: PathBuf,

    /// Print the tank totals after the per-capacitor lines
    #[arg(long)]
    summary: bool,

    /// Print performance stats to stderr
    #[arg(long)]
    stats: bool,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut stats = if cli.stats { Some(tank_caps::stats::Stats::new()) } else { None };

    let start = Instant::now();
    let specs = parser::load(&cli.spec).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", cli.spec.display(), e);
        std::process::exit(1);
    });
    if let Some(ref mut s) = stats {
        s.add_phase("Load", start.elapsed());
        s.parts_loaded = specs.len();
    }

    let registry = Registry::from(specs);
    let layout = TankLayout::new(cli.group1, cli.group2);

    let start = Instant::now();
    let mut tank = assembler::assemble(&registry, &layout).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });
    if let Some(ref mut s) = stats {
        s.add_phase("Assemble", start.elapsed());
    }

    let result = analysis::run(&mut tank, cli.frequency, cli.current, stats.as_mut());

    let mut stdout = io::stdout();
    output::write_report(&result.report, &mut stdout).unwrap_or_else(|e| {
        eprintln!("Output error: {}", e);
        std::process::exit(1);
    });
    if cli.summary {
        output::write_summary(&result, &mut stdout).unwrap_or_else(|e| {
            eprintln!("Output error: {}", e);
            std::process::exit(1);
        });
    }

    if let Some(ref stats) = stats {
        stats.display();
    }
}
