// src/simulation/config.rs

use crate::error::{Result, SimError};
use crate::strategy::implementations::{TrueNormal, UniformApprox};
use crate::strategy::traits::DemandSampler;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// The parameter record supplied by the form layer.
///
/// Field names serialize in camelCase so a record produced by the
/// front end can be loaded as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationParameters {
    pub mean_demand: f64,
    pub std_demand: f64,
    pub order_cost: f64,
    pub holding_cost: f64,
    pub shortage_cost: f64,
    /// Days between placing an order and receiving it. Only honored in
    /// `ReplenishmentMode::LeadTime`.
    pub lead_time: u32,
    /// Order-up-to level, also the starting stock.
    pub max_inventory: f64,
    pub reorder_point: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            mean_demand: 50.0,
            std_demand: 10.0,
            order_cost: 100.0,
            holding_cost: 1.0,
            shortage_cost: 5.0,
            lead_time: 2,
            max_inventory: 200.0,
            reorder_point: 50.0,
        }
    }
}

impl SimulationParameters {
    /// Loads a parameter record from a JSON file. Missing fields take
    /// their default values.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&raw)?;
        params.validate()?;
        Ok(params)
    }

    /// Fails fast on anything the engine cannot simulate meaningfully.
    pub fn validate(&self) -> Result<()> {
        let numeric = [
            ("meanDemand", self.mean_demand),
            ("stdDemand", self.std_demand),
            ("orderCost", self.order_cost),
            ("holdingCost", self.holding_cost),
            ("shortageCost", self.shortage_cost),
            ("maxInventory", self.max_inventory),
            ("reorderPoint", self.reorder_point),
        ];
        for (field, value) in numeric {
            if !value.is_finite() {
                return Err(SimError::validation(field, format!("{value} is not a finite number")));
            }
        }

        for (field, value) in [
            ("orderCost", self.order_cost),
            ("holdingCost", self.holding_cost),
            ("shortageCost", self.shortage_cost),
        ] {
            if value < 0.0 {
                return Err(SimError::validation(field, format!("cost must be >= 0, got {value}")));
            }
        }

        if self.max_inventory <= 0.0 {
            return Err(SimError::validation(
                "maxInventory",
                format!("must be > 0, got {}", self.max_inventory),
            ));
        }

        if self.std_demand < 0.0 {
            return Err(SimError::validation(
                "stdDemand",
                format!("must be >= 0, got {}", self.std_demand),
            ));
        }

        // Accepted for compatibility with existing parameter sets.
        if self.reorder_point > self.max_inventory {
            warn!(
                reorder_point = self.reorder_point,
                max_inventory = self.max_inventory,
                "reorder point exceeds max inventory; every day will trigger an order"
            );
        }

        Ok(())
    }
}

/// Which of the two dashboards the run reproduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scenario {
    /// Demand drawn straight from stock, unlimited backorder.
    Inventory,
    /// Sales capped by stock on hand, cumulative sales tracked.
    SalesMax,
}

impl Scenario {
    pub fn default_horizon(self) -> usize {
        match self {
            Scenario::Inventory => 30,
            Scenario::SalesMax => 365,
        }
    }

    pub fn default_trials(self) -> usize {
        match self {
            Scenario::Inventory => 1,
            Scenario::SalesMax => 2000,
        }
    }

    pub fn tracks_sales(self) -> bool {
        matches!(self, Scenario::SalesMax)
    }
}

/// Daily demand distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DemandModel {
    /// `mean + std * (U - 0.5)`, the historical generator. Bounded to
    /// `±std/2` around the mean; not Gaussian.
    #[default]
    UniformApprox,
    /// An actual normal draw with the given mean and standard deviation.
    TrueNormal,
}

impl DemandModel {
    pub fn build(self, params: &SimulationParameters) -> Result<Box<dyn DemandSampler>> {
        let sampler: Box<dyn DemandSampler> = match self {
            DemandModel::UniformApprox => Box::new(UniformApprox::new(params.mean_demand, params.std_demand)),
            DemandModel::TrueNormal => Box::new(TrueNormal::new(params.mean_demand, params.std_demand)?),
        };
        Ok(sampler)
    }
}

/// How placed orders reach the shelf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReplenishmentMode {
    /// Orders land the same day they are placed; `lead_time` is ignored.
    #[default]
    Instant,
    /// Orders land `lead_time` days later via the replenishment pipeline.
    LeadTime,
}

/// Everything that shapes a batch apart from the parameter record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub scenario: Scenario,
    pub horizon: usize,
    pub trials: usize,
    pub demand_model: DemandModel,
    pub replenishment: ReplenishmentMode,
    /// Batch seed. `None` draws a fresh one per run.
    pub seed: Option<u64>,
}

impl RunConfig {
    pub fn for_scenario(scenario: Scenario) -> Self {
        Self {
            scenario,
            horizon: scenario.default_horizon(),
            trials: scenario.default_trials(),
            demand_model: DemandModel::default(),
            replenishment: ReplenishmentMode::default(),
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.horizon == 0 {
            return Err(SimError::validation("horizon", "must be at least one day"));
        }
        if self.trials == 0 {
            return Err(SimError::validation("trials", "must be at least one trial"));
        }
        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::for_scenario(Scenario::Inventory)
    }
}
