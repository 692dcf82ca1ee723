//! Periodic-review inventory control under stochastic daily demand,
//! estimated by Monte Carlo.
//!
//! The two entry points used by a front end are [`run_simulation`] (drive
//! one or many independent trials) and [`aggregate`] (summarize any slice of
//! observations pulled from the resulting records).

pub mod analysis;
pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use analysis::stats::{
    aggregate, batch_observations, summarize_batch, AggregateStats, BatchSummary,
    ConfidenceInterval, FrequencyBin, Metric, Selection,
};
pub use error::{Result, SimError};
pub use simulation::config::{
    DemandModel, ReplenishmentMode, RunConfig, Scenario, SimulationParameters,
};
pub use simulation::engine::{DailyRecord, SimulationTrial};
pub use simulation::monte_carlo::{run_simulation, run_simulation_cancellable, SimulationBatch};
