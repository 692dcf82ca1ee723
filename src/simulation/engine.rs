// src/simulation/engine.rs

use crate::io::demand::generate_demand_schedule;
use crate::model::inventory::InventoryState;
use crate::simulation::config::{ReplenishmentMode, Scenario, SimulationParameters};
use crate::strategy::traits::DemandSampler;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// One simulated day. Serialized in camelCase so it reads the same in CSV
/// headers and in JSON handed to the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub day: usize,
    pub demand: f64,
    /// End-of-day stock, floored at zero.
    pub inventory: f64,
    pub order_placed: bool,
    /// Cumulative from day 1, not a daily delta.
    pub total_cost: f64,
    /// Running units sold. Only tracked in the sales scenario.
    pub cumulative_sales: Option<f64>,
}

/// One full-horizon run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationTrial {
    /// Position in the batch; also the random stream the trial drew from.
    pub index: usize,
    pub records: Vec<DailyRecord>,
}

impl SimulationTrial {
    pub fn final_record(&self) -> Option<&DailyRecord> {
        self.records.last()
    }

    pub fn orders_placed(&self) -> usize {
        self.records.iter().filter(|r| r.order_placed).count()
    }
}

pub struct TrialSimulation<'a> {
    params: &'a SimulationParameters,
    scenario: Scenario,

    // The Actor
    pub state: InventoryState,

    // Inputs/Outputs
    pub demand_schedule: Vec<f64>,
    pub current_day: usize,
    pub history: Vec<DailyRecord>,
}

impl<'a> TrialSimulation<'a> {
    /// The horizon is the length of `demand_schedule`.
    pub fn new(
        params: &'a SimulationParameters,
        scenario: Scenario,
        mode: ReplenishmentMode,
        demand_schedule: Vec<f64>,
    ) -> Self {
        let horizon = demand_schedule.len();
        Self {
            params,
            scenario,
            state: InventoryState::new(params, mode),
            demand_schedule,
            current_day: 1,
            history: Vec::with_capacity(horizon),
        }
    }

    pub fn horizon(&self) -> usize {
        self.demand_schedule.len()
    }

    pub fn run(&mut self) {
        while self.current_day <= self.horizon() {
            self.step();
        }
    }

    /// Runs to the end of the horizon and hands back the records.
    pub fn into_records(mut self) -> Vec<DailyRecord> {
        self.run();
        self.history
    }

    fn step(&mut self) {
        let day = self.current_day;
        let capped = self.scenario.tracks_sales();

        // =================================================================
        // PHASE 1: MORNING (Arrivals)
        // =================================================================
        self.state.receive_shipments(day);

        // =================================================================
        // PHASE 2: DAY (Demand)
        // =================================================================
        let demand = self.demand_schedule[day - 1];
        self.state.process_demand(demand, capped);

        // =================================================================
        // PHASE 3: EVENING (Reorder check, then costs on the signed level)
        // =================================================================
        self.state.review(day, self.params.order_cost);
        self.state
            .accrue_daily_cost(self.params.holding_cost, self.params.shortage_cost);

        // =================================================================
        // PHASE 4: RECORD & ADVANCE
        // =================================================================
        if day % 5 == 0 {
            trace!(
                day,
                level = self.state.level,
                on_order = self.state.pipeline.on_order(),
                total_cost = self.state.total_cost,
                "progress"
            );
        }
        self.record_history();
        self.current_day += 1;
    }

    fn record_history(&mut self) {
        self.history.push(DailyRecord {
            day: self.current_day,
            demand: self.state.last_demand,
            inventory: self.state.reported_level(),
            order_placed: self.state.last_order_placed,
            total_cost: self.state.total_cost,
            cumulative_sales: self
                .scenario
                .tracks_sales()
                .then_some(self.state.cumulative_sales),
        });
    }
}

/// Runs one trial: draws the horizon's demand from `rng`, then steps the
/// stocking point through it.
pub fn simulate_trial(
    params: &SimulationParameters,
    scenario: Scenario,
    mode: ReplenishmentMode,
    horizon: usize,
    sampler: &dyn DemandSampler,
    index: usize,
    rng: &mut dyn RngCore,
) -> SimulationTrial {
    let schedule = generate_demand_schedule(sampler, horizon, rng);
    let records = TrialSimulation::new(params, scenario, mode, schedule).into_records();

    let trial = SimulationTrial { index, records };
    if let Some(last) = trial.final_record() {
        debug!(
            trial = index,
            total_cost = last.total_cost,
            orders = trial.orders_placed(),
            "trial finished"
        );
    }
    trial
}
