// src/analysis/stats.rs

//! Descriptive statistics over daily-record fields.
//!
//! Everything here is a pure view over already-materialized records: pick a
//! [`Metric`] and a [`Selection`], pull the observations out, aggregate.

use crate::error::{Result, SimError};
use crate::simulation::engine::{DailyRecord, SimulationTrial};
use crate::simulation::monte_carlo::SimulationBatch;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// z-score for a two-sided 95% interval. Used for every sample size; no
/// small-sample (t) correction.
pub const Z_95: f64 = 1.96;

/// `mean ± Z_95 * std_dev / sqrt(n)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
    pub half_width: f64,
}

/// How often one exact value was observed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyBin {
    pub value: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation (divides by n).
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub confidence_interval: ConfidenceInterval,
    /// In order of first occurrence, not sorted.
    pub frequencies: Vec<FrequencyBin>,
}

fn ensure_non_empty(xs: &[f64], context: &str) -> Result<()> {
    if xs.is_empty() {
        Err(SimError::empty_input(context))
    } else {
        Ok(())
    }
}

pub fn mean(xs: &[f64]) -> Result<f64> {
    ensure_non_empty(xs, "mean")?;
    Ok(xs.iter().sum::<f64>() / xs.len() as f64)
}

/// Middle value; the average of the two middle values for even lengths.
pub fn median(xs: &[f64]) -> Result<f64> {
    ensure_non_empty(xs, "median")?;
    let mut sorted = xs.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

/// Population standard deviation.
pub fn std_dev(xs: &[f64]) -> Result<f64> {
    let mean = mean(xs)?;
    // Constant input is exactly zero, whatever rounding the mean picked up.
    if xs.iter().all(|x| *x == xs[0]) {
        return Ok(0.0);
    }
    let variance = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / xs.len() as f64;
    Ok(variance.sqrt())
}

pub fn confidence_interval_95(xs: &[f64]) -> Result<ConfidenceInterval> {
    let mean = mean(xs)?;
    let half_width = Z_95 * (std_dev(xs)? / (xs.len() as f64).sqrt());
    Ok(ConfidenceInterval {
        lower: mean - half_width,
        upper: mean + half_width,
        half_width,
    })
}

/// Counts occurrences of each exact value, keyed in first-seen order.
pub fn frequencies(xs: &[f64]) -> Vec<FrequencyBin> {
    let mut slots: HashMap<u64, usize> = HashMap::new();
    let mut bins: Vec<FrequencyBin> = Vec::new();

    for &x in xs {
        // -0.0 and 0.0 are the same observation
        let value = if x == 0.0 { 0.0 } else { x };
        match slots.get(&value.to_bits()) {
            Some(&slot) => bins[slot].count += 1,
            None => {
                slots.insert(value.to_bits(), bins.len());
                bins.push(FrequencyBin { value, count: 1 });
            }
        }
    }
    bins
}

/// Every statistic at once. Fails with `EmptyInput` on an empty slice.
pub fn aggregate(xs: &[f64]) -> Result<AggregateStats> {
    ensure_non_empty(xs, "aggregate")?;

    let min = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Ok(AggregateStats {
        count: xs.len(),
        mean: mean(xs)?,
        median: median(xs)?,
        std_dev: std_dev(xs)?,
        min,
        max,
        confidence_interval: confidence_interval_95(xs)?,
        frequencies: frequencies(xs),
    })
}

// =========================================================================
// Observation extraction
// =========================================================================

/// A numeric field of [`DailyRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    Demand,
    Inventory,
    TotalCost,
    CumulativeSales,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Demand,
        Metric::Inventory,
        Metric::TotalCost,
        Metric::CumulativeSales,
    ];

    /// `None` when the record does not carry this field (cumulative sales
    /// outside the sales scenario).
    pub fn extract(self, record: &DailyRecord) -> Option<f64> {
        match self {
            Metric::Demand => Some(record.demand),
            Metric::Inventory => Some(record.inventory),
            Metric::TotalCost => Some(record.total_cost),
            Metric::CumulativeSales => record.cumulative_sales,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Demand => "demand",
            Metric::Inventory => "inventory",
            Metric::TotalCost => "totalCost",
            Metric::CumulativeSales => "cumulativeSales",
        }
    }
}

/// Which records of each trial to draw observations from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Every day of every trial.
    AllDays,
    /// The last day of each trial: one observation per trial.
    FinalDay,
    /// A single 1-based day of each trial.
    Day(usize),
}

pub fn trial_observations(trial: &SimulationTrial, metric: Metric, selection: Selection) -> Vec<f64> {
    match selection {
        Selection::AllDays => trial.records.iter().filter_map(|r| metric.extract(r)).collect(),
        Selection::FinalDay => trial.final_record().and_then(|r| metric.extract(r)).into_iter().collect(),
        Selection::Day(day) => trial
            .records
            .iter()
            .find(|r| r.day == day)
            .and_then(|r| metric.extract(r))
            .into_iter()
            .collect(),
    }
}

/// Observations across all trials of a batch, in trial order.
pub fn batch_observations(batch: &SimulationBatch, metric: Metric, selection: Selection) -> Vec<f64> {
    batch
        .trials
        .iter()
        .flat_map(|trial| trial_observations(trial, metric, selection))
        .collect()
}

/// End-of-horizon statistics for every metric the batch carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub trials: usize,
    pub horizon: usize,
    pub seed: u64,
    pub metrics: Vec<MetricSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSummary {
    pub metric: Metric,
    pub stats: AggregateStats,
}

impl BatchSummary {
    pub fn get(&self, metric: Metric) -> Option<&AggregateStats> {
        self.metrics
            .iter()
            .find(|m| m.metric == metric)
            .map(|m| &m.stats)
    }
}

pub fn summarize_batch(batch: &SimulationBatch) -> Result<BatchSummary> {
    let mut metrics = Vec::new();
    for metric in Metric::ALL {
        let xs = batch_observations(batch, metric, Selection::FinalDay);
        if xs.is_empty() {
            continue;
        }
        metrics.push(MetricSummary {
            metric,
            stats: aggregate(&xs)?,
        });
    }

    if metrics.is_empty() {
        return Err(SimError::empty_input("batch summary"));
    }

    Ok(BatchSummary {
        trials: batch.len(),
        horizon: batch.config.horizon,
        seed: batch.seed,
        metrics,
    })
}
