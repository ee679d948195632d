//! Text output of calculation reports.

use std::fmt;
use std::io::Write;

use crate::analysis::TankResult;
use crate::error::Result;
use crate::monitor::Report;

/// Significant digits printed for measured values.
pub const PRECISION: usize = 6;

/// Formats a value like a default C stream / `%g`: six significant digits,
/// trailing zeros dropped, scientific notation for exponents below -4 or at
/// least six.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sig(pub f64);

impl fmt::Display for Sig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if value.is_nan() {
            return f.write_str("nan");
        }
        if value.is_infinite() {
            return f.write_str(if value > 0.0 { "inf" } else { "-inf" });
        }
        if value == 0.0 {
            return f.write_str("0");
        }

        // Rounding to PRECISION digits first settles the exponent (999999.5 -> 1e+06).
        let sci = format!("{:.*e}", PRECISION - 1, value);
        let (mantissa, exponent) = sci.split_once('e').ok_or(fmt::Error)?;
        let exponent: i32 = exponent.parse().map_err(|_| fmt::Error)?;

        if exponent < -4 || exponent >= PRECISION as i32 {
            let sign = if exponent < 0 { '-' } else { '+' };
            write!(f, "{}e{sign}{:02}", trim_zeros(mantissa), exponent.abs())
        } else {
            let decimals = (PRECISION as i32 - 1 - exponent) as usize;
            let fixed = format!("{value:.decimals$}");
            f.write_str(trim_zeros(&fixed))
        }
    }
}

fn trim_zeros(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

/// Write every observation and warning, one per line, in emission order.
///
/// ```text
/// Capacitor: 1uF_1000V, Current: 0.465116, Voltage: 1233.76, Power: 573.842
/// Warning: Overvoltage condition on 1uF_1000V. The voltage is 1233.76V, which exceeds the maximum voltage of 1000V!
/// ```
pub fn write_report<W: Write>(report: &Report, writer: &mut W) -> Result<()> {
    for event in report.events() {
        writeln!(writer, "{event}")?;
    }
    Ok(())
}

/// Write the root's totals after the per-element lines.
pub fn write_summary<W: Write>(result: &TankResult, writer: &mut W) -> Result<()> {
    let root = &result.root;
    writeln!(
        writer,
        "Total: Reactance: {}Ohm, Current: {}A, Voltage: {}V, Power: {}W, Allowed current: {}A",
        Sig(root.reactance),
        Sig(root.current),
        Sig(root.voltage),
        Sig(root.power),
        Sig(result.allowed_current)
    )?;
    Ok(())
}
