//! Plain-text report writer.
//!
//! Two sections, each behind a dashed banner:
//! - the longest ops with their longest intervals
//! - interval totals across every qualifying op

use crate::aggregator::{IntervalTotals, OpSummary};
use std::io::{self, Write};

const BANNER: &str = "------------------------------";

/// Write both report sections
///
/// **Public** - main entry point for console output
pub fn write_report<W: Write>(
    out: &mut W,
    ranked: &[OpSummary],
    totals: &IntervalTotals,
    print_top: usize,
) -> io::Result<()> {
    write_top_ops(out, ranked, print_top)?;
    write_summary(out, totals)?;
    Ok(())
}

/// Write the Top-N section; `ranked` must already be sorted
pub fn write_top_ops<W: Write>(
    out: &mut W,
    ranked: &[OpSummary],
    print_top: usize,
) -> io::Result<()> {
    writeln!(out, "{}", BANNER)?;
    writeln!(out, "----- Top {} longest ops ", print_top)?;
    writeln!(out, "{}", BANNER)?;

    for op in ranked.iter().take(print_top) {
        writeln!(
            out,
            "== OP == {}, age {} took {}",
            op.description,
            format_seconds(op.age),
            format_seconds(op.duration)
        )?;

        for interval in &op.top_intervals {
            match op.percentage(interval) {
                Some(pct) => writeln!(
                    out,
                    "  > {} ({:3.2}) = {:3.0} %",
                    interval.key, interval.seconds, pct
                )?,
                None => writeln!(
                    out,
                    "  > {} ({:3.2}) = N/A",
                    interval.key, interval.seconds
                )?,
            }
        }
    }

    Ok(())
}

/// Write the cross-op summary section
pub fn write_summary<W: Write>(out: &mut W, totals: &IntervalTotals) -> io::Result<()> {
    writeln!(out, "{}", BANNER)?;
    writeln!(out, "----- Summary of all ops ")?;
    writeln!(out, "{}", BANNER)?;
    writeln!(out, "Total # Ops analyzed: {} ", totals.total_ops())?;

    writeln!(out, "* Across all ops, spots that took most total time:")?;
    for (key, seconds) in totals.by_total_seconds() {
        writeln!(out, "    >> {} -- Total {:3.2} seconds", key, seconds)?;
    }

    writeln!(
        out,
        "* Across all ops, average % of time each spot took in the op:"
    )?;
    for (key, pct) in totals.by_average_percent() {
        writeln!(out, "    >> {} -- Avg {:3.2}% ", key, pct)?;
    }

    Ok(())
}

/// Shortest round-trip form, always with a decimal point ("10.0", "0.25")
pub fn format_seconds(value: f64) -> String {
    format!("{:?}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::Interval;

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(10.0), "10.0");
        assert_eq!(format_seconds(1.5), "1.5");
        assert_eq!(format_seconds(0.003215), "0.003215");
    }

    #[test]
    fn test_zero_duration_prints_na() {
        let op = OpSummary {
            age: 2.0,
            description: "osd_op(noop)".to_string(),
            duration: 0.0,
            top_intervals: vec![Interval::new("start-done", 0.0)],
        };

        let mut buf = Vec::new();
        write_top_ops(&mut buf, &[op], 20).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("== OP == osd_op(noop), age 2.0 took 0.0\n"));
        assert!(text.contains("  > start-done (0.00) = N/A\n"));
    }

    #[test]
    fn test_print_top_limits_ops() {
        let ops: Vec<OpSummary> = (0..5)
            .map(|i| OpSummary {
                age: 1.0,
                description: format!("op{}", i),
                duration: 1.0,
                top_intervals: Vec::new(),
            })
            .collect();

        let mut buf = Vec::new();
        write_top_ops(&mut buf, &ops, 2).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text.matches("== OP ==").count(), 2);
        assert!(text.contains("----- Top 2 longest ops \n"));
    }
}
