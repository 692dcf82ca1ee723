// src/io/reporting.rs

use crate::analysis::stats::{AggregateStats, BatchSummary};
use crate::error::Result;
use crate::simulation::engine::{DailyRecord, SimulationTrial};
use crate::simulation::monte_carlo::SimulationBatch;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// One CSV row of a batch export: a daily record tagged with its trial.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchRow {
    trial: usize,
    day: usize,
    demand: f64,
    inventory: f64,
    order_placed: bool,
    total_cost: f64,
    cumulative_sales: Option<f64>,
}

impl BatchRow {
    fn new(trial: usize, r: &DailyRecord) -> Self {
        Self {
            trial,
            day: r.day,
            demand: r.demand,
            inventory: r.inventory,
            order_placed: r.order_placed,
            total_cost: r.total_cost,
            cumulative_sales: r.cumulative_sales,
        }
    }
}

/// Everything the front end needs to draw tables and charts.
#[derive(Debug, Serialize)]
pub struct SimulationReport<'a> {
    pub summary: &'a BatchSummary,
    pub batch: &'a SimulationBatch,
}

/// Writes one trial's records as CSV.
pub fn write_trial_csv<W: Write>(writer: W, trial: &SimulationTrial) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in &trial.records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes every record of every trial as CSV, with a leading `trial` column.
pub fn write_batch_csv<W: Write>(writer: W, batch: &SimulationBatch) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for trial in &batch.trials {
        for record in &trial.records {
            wtr.serialize(BatchRow::new(trial.index, record))?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the batch to `file_path` as CSV. A single-trial batch is written
/// without the `trial` column, matching the single-run table.
pub fn write_simulation_log(file_path: impl AsRef<Path>, batch: &SimulationBatch) -> Result<()> {
    let path = file_path.as_ref();
    let file = BufWriter::new(File::create(path)?);

    match batch.trials.as_slice() {
        [only] => write_trial_csv(file, only)?,
        _ => write_batch_csv(file, batch)?,
    }

    let rows: usize = batch.trials.iter().map(|t| t.records.len()).sum();
    info!(rows, path = %path.display(), "exported simulation log");
    Ok(())
}

/// Writes the summary and all records as pretty-printed JSON.
pub fn write_report_json(
    file_path: impl AsRef<Path>,
    batch: &SimulationBatch,
    summary: &BatchSummary,
) -> Result<()> {
    let path = file_path.as_ref();
    let mut file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut file, &SimulationReport { summary, batch })?;
    file.flush()?;

    info!(path = %path.display(), "exported JSON report");
    Ok(())
}

/// Prints the day-by-day table of a single trial.
pub fn display_trial_table(trial: &SimulationTrial) {
    println!(
        "{:>5} {:>8} {:>10} {:>7} {:>12} {:>10}",
        "Day", "Demand", "Inventory", "Order", "Total Cost", "Sales"
    );
    for r in &trial.records {
        let sales = r
            .cumulative_sales
            .map(|s| format!("{:.0}", s))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>5} {:>8.0} {:>10.0} {:>7} {:>12.2} {:>10}",
            r.day,
            r.demand,
            r.inventory,
            if r.order_placed { "yes" } else { "no" },
            r.total_cost,
            sales
        );
    }
}

fn display_stats(label: &str, stats: &AggregateStats) {
    println!("  {}:", label);
    println!(
        "    Mean: {:.2} ± {:.2} | Median: {:.2} | Std Dev: {:.2}",
        stats.mean, stats.confidence_interval.half_width, stats.median, stats.std_dev
    );
    println!(
        "    95% CI: [{:.2}, {:.2}] | Range: [{:.2}, {:.2}] | Distinct values: {}",
        stats.confidence_interval.lower,
        stats.confidence_interval.upper,
        stats.min,
        stats.max,
        stats.frequencies.len()
    );
}

/// Prints end-of-horizon statistics for each metric.
pub fn display_summary(summary: &BatchSummary) {
    println!("\n╔══════════════════════════════════════════════════════════════════════╗");
    println!("║                  MONTE CARLO RESULTS - END OF HORIZON                ║");
    println!("╚══════════════════════════════════════════════════════════════════════╝\n");
    println!(
        "Trials: {} | Horizon: {} days | Seed: {}\n",
        summary.trials, summary.horizon, summary.seed
    );
    for m in &summary.metrics {
        display_stats(m.metric.label(), &m.stats);
    }
}

/// Prints statistics for one metric under a caller-chosen selection.
pub fn display_metric(label: &str, stats: &AggregateStats) {
    println!();
    display_stats(label, stats);
}
