//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Loads and concatenates the ops dumps
//! 2. Extracts intervals, filters and ranks the ops
//! 3. Accumulates cross-op interval totals
//! 4. Prints the report

use crate::aggregator::{collect_ranked_ops, AnalysisCounts, IntervalTotals, OpSummary};
use crate::output::write_report;
use crate::parser::load_dumps;
use crate::utils::config::AnalyzerConfig;
use anyhow::{Context, Result};
use log::{debug, info};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct AnalyzeArgs {
    /// Dump files, analyzed as one concatenated sequence
    pub files: Vec<PathBuf>,

    /// Effective configuration
    pub config: AnalyzerConfig,
}

/// Result of one analysis pass
#[derive(Debug)]
pub struct Analysis {
    /// Qualifying ops, longest first
    pub ranked: Vec<OpSummary>,

    /// Interval totals over all qualifying ops
    pub totals: IntervalTotals,

    pub counts: AnalysisCounts,
}

/// Execute the analyze command, printing the report to stdout
///
/// **Public** - main entry point called from main.rs
pub fn execute_analyze(args: &AnalyzeArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    analyze_to_writer(args, &mut out)?;
    out.flush().context("Failed to flush report")?;
    Ok(())
}

/// Run the analysis and write the report to `out`
pub fn analyze_to_writer<W: Write>(args: &AnalyzeArgs, out: &mut W) -> Result<Analysis> {
    let analysis = run_analysis(args)?;

    write_report(
        out,
        &analysis.ranked,
        &analysis.totals,
        args.config.print_top,
    )
    .context("Failed to write report")?;

    Ok(analysis)
}

/// Load, rank and aggregate without printing
pub fn run_analysis(args: &AnalyzeArgs) -> Result<Analysis> {
    let start_time = Instant::now();

    validate_args(args)?;

    info!("Step 1/3: Loading {} dump file(s)...", args.files.len());
    let ops = load_dumps(&args.files).context("Failed to load ops dumps")?;

    info!("Step 2/3: Ranking {} op records...", ops.len());
    let (ranked, counts) =
        collect_ranked_ops(&ops, &args.config).context("Failed to analyze op events")?;

    debug!("Longest ops:");
    for (i, op) in ranked.iter().take(3).enumerate() {
        debug!("  {}. {:.3}s: {}", i + 1, op.duration, op.description);
    }

    info!("Step 3/3: Summarizing {} qualifying ops...", ranked.len());
    let totals = IntervalTotals::from_ops(&ranked);

    info!(
        "Analyzed {} of {} ops in {:.2}s",
        counts.kept,
        counts.loaded,
        start_time.elapsed().as_secs_f64()
    );

    Ok(Analysis {
        ranked,
        totals,
        counts,
    })
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.files.is_empty() {
        anyhow::bail!("At least one ops dump file is required");
    }

    args.config
        .validate()
        .context("Invalid analyzer configuration")?;

    Ok(())
}

/// Print the effective configuration as TOML
pub fn display_config(config: &AnalyzerConfig) -> Result<()> {
    let text = config
        .to_toml_string()
        .context("Failed to render configuration")?;
    print!("{}", text);
    Ok(())
}
