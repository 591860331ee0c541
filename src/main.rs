//! Ceph Ops Analyzer CLI
//!
//! Reports the ops and event transitions that took the most time in
//! one or more `dump_historic_ops` files.

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use ceph_ops_analyzer::commands::{display_config, execute_analyze, AnalyzeArgs};
use ceph_ops_analyzer::utils::config::{load_config, AnalyzerConfig};

/// Ceph Ops Analyzer - find where slow OSD ops spent their time
#[derive(Parser, Debug)]
#[command(name = "ops-analyzer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// dump_historic_ops JSON files, analyzed in order
    #[arg(required_unless_present = "print_config")]
    files: Vec<PathBuf>,

    /// TOML file with measure_between and filter settings
    #[arg(short, long, env = "OPS_ANALYZER_CONFIG")]
    config: Option<PathBuf>,

    /// Number of longest ops to print (overrides the config)
    #[arg(short = 'n', long)]
    top: Option<usize>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };

    if let Some(top) = cli.top {
        config.print_top = top;
    }

    if cli.print_config {
        return display_config(&config);
    }

    let args = AnalyzeArgs {
        files: cli.files,
        config,
    };

    execute_analyze(&args)
}
