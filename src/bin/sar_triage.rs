//! Command line front end for catalog triage.

use anyhow::{Context, Result};
use clap::Parser;
use sartriage::{TriageConfig, TriagePipeline};
use std::path::PathBuf;

/// Select Umbra and Capella SAR scenes by region and quality, and export them as CSV.
#[derive(Parser, Debug)]
#[command(name = "sar-triage", version, about)]
struct Args {
    /// JSON configuration file; command line options override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Umbra catalog directory (searched recursively for *METADATA.json)
    #[arg(long)]
    umbra_dir: Option<PathBuf>,

    /// Capella catalog directory (searched recursively for *extended.json)
    #[arg(long)]
    capella_dir: Option<PathBuf>,

    /// Skip the Umbra catalog
    #[arg(long, conflicts_with = "umbra_dir")]
    no_umbra: bool,

    /// Skip the Capella catalog
    #[arg(long, conflicts_with = "capella_dir")]
    no_capella: bool,

    /// Directory the selection CSV files are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Incidence angle recorded for Capella scenes (degrees)
    #[arg(long)]
    incidence_default: Option<f64>,

    /// Log progress every N files (0 disables)
    #[arg(long)]
    progress_interval: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn into_config(self) -> Result<TriageConfig> {
        let mut config = match &self.config {
            Some(path) => TriageConfig::from_file(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?,
            None => TriageConfig::default(),
        };

        if let Some(dir) = self.umbra_dir {
            config.umbra_dir = Some(dir);
        }
        if let Some(dir) = self.capella_dir {
            config.capella_dir = Some(dir);
        }
        if self.no_umbra {
            config.umbra_dir = None;
        }
        if self.no_capella {
            config.capella_dir = None;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(angle) = self.incidence_default {
            config.default_incidence_angle_deg = angle;
        }
        if let Some(interval) = self.progress_interval {
            config.progress_interval = interval;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    let config = args.into_config()?;
    let report = TriagePipeline::new(config)
        .run()
        .context("catalog triage failed")?;

    log::info!(
        "Done: {} records from {} files",
        report.total_records(),
        report.umbra_files + report.capella_files
    );
    for outcome in &report.selections {
        match &outcome.output_path {
            Some(path) => log::info!("  {}: {} scenes -> {}", outcome.name, outcome.matched, path.display()),
            None => log::info!("  {}: {} scenes (not written)", outcome.name, outcome.matched),
        }
    }

    Ok(())
}
