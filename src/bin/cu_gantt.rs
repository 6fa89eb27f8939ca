//! Commit Unit Gantt Chart
//!
//! Reads the commit unit timestamp dump of a simulation run and shows how
//! long each commit spent in every pipeline stage.
//!
//! Usage:
//!   cargo run --release --bin cu_gantt -- run/cu_timestamps.txt 1 1000
//!   cargo run --release --bin cu_gantt -- run/cu_timestamps.txt 200 400 5000
//!   cargo run --release --bin cu_gantt -- run/cu_timestamps.txt 1 1000 --no-window

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cu_gantt::chart::{ChartLayout, ChartOptions, ChartSummary};
use cu_gantt::config::GanttConfig;
use cu_gantt::record::CommitRange;
use cu_gantt::scan::scan_file;
use cu_gantt::viewer;

#[derive(Parser, Debug)]
#[command(name = "cu_gantt")]
#[command(about = "Gantt chart of commit unit pipeline stages per commit id")]
#[command(allow_negative_numbers = true)]
struct Args {
    /// Timestamp log written by the commit unit
    log_path: PathBuf,

    /// Smallest commit id to chart (inclusive)
    min_id: i64,

    /// Largest commit id to chart (inclusive); scanning stops past it
    max_id: i64,

    /// Fixed x-axis width in cycles from the earliest timestamp (0 = full range)
    #[arg(default_value = "0")]
    x_window: u64,

    /// Chart config file (TOML); defaults to $CU_GANTT_CONFIG or ./cu_gantt.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the summary only, do not open the chart window
    #[arg(long, default_value = "false")]
    no_window: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "cu_gantt=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.min_id > args.max_id {
        bail!("min_id ({}) is greater than max_id ({})", args.min_id, args.max_id);
    }

    let config = match &args.config {
        Some(path) => GanttConfig::load(path)
            .with_context(|| format!("Failed to load config: {:?}", path))?,
        None => GanttConfig::from_env().context("Failed to load chart config")?,
    };

    let range = CommitRange::new(args.min_id, args.max_id);
    println!(
        "parsing '{}'; commit_id = ({} to {})",
        args.log_path.display(),
        range.min_id,
        range.max_id
    );

    let report = scan_file(&args.log_path, range)
        .with_context(|| format!("Failed to parse {:?}", args.log_path))?;
    let dataset = report.dataset;

    if let Some(commit_id) = report.terminated_at {
        info!(commit_id, "scan stopped at first commit past max_id");
    }

    println!("{}", ChartSummary::new(&dataset));

    if !dataset.incomplete_ids.is_empty() {
        warn!(
            count = dataset.incomplete_ids.len(),
            "records without a retire timestamp are charted with zero-width stages"
        );
        println!("incomplete (RT=0) commit ids: {:?}", dataset.incomplete_ids);
    }

    if args.no_window {
        return Ok(());
    }

    let options = ChartOptions::from_config(&config, args.x_window);
    let layout = ChartLayout::build(&dataset, &args.log_path, &options);
    viewer::show(layout, &config)
}
