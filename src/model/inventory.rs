// src/model/inventory.rs

use crate::model::queues::ReplenishmentPipeline;
use crate::simulation::config::{ReplenishmentMode, SimulationParameters};

/// The state of the single stocking point being simulated.
///
/// Stock is tracked as two values. `level` is the signed internal
/// position: it goes negative when demand outruns stock in the backorder
/// scenario, and that negative value is what shortage cost is charged on.
/// `reported_level()` is the same number floored at zero, which is what
/// the daily records show.
#[derive(Debug, Clone)]
pub struct InventoryState {
    // Policy
    max_inventory: f64,
    reorder_point: f64,
    mode: ReplenishmentMode,
    lead_time: usize,

    // State Variables
    pub level: f64,
    pub total_cost: f64,
    pub cumulative_sales: f64,
    pub pipeline: ReplenishmentPipeline,

    // Tracking for Analysis/Logging
    pub last_demand: f64,
    pub last_sales: f64,
    pub last_order_placed: bool,
    pub last_shipment_received: f64,
}

impl InventoryState {
    /// Starts full: `level = max_inventory`, nothing on order, no cost yet.
    pub fn new(params: &SimulationParameters, mode: ReplenishmentMode) -> Self {
        Self {
            max_inventory: params.max_inventory,
            reorder_point: params.reorder_point,
            mode,
            lead_time: params.lead_time as usize,
            level: params.max_inventory,
            total_cost: 0.0,
            cumulative_sales: 0.0,
            pipeline: ReplenishmentPipeline::new(),
            last_demand: 0.0,
            last_sales: 0.0,
            last_order_placed: false,
            last_shipment_received: 0.0,
        }
    }

    /// Step 0: Receive whatever the pipeline delivers today.
    pub fn receive_shipments(&mut self, day: usize) {
        let quantity = self.pipeline.take_arrivals(day);
        self.level += quantity;
        self.last_shipment_received = quantity;
    }

    /// Step 1: Take the day's demand out of stock.
    ///
    /// With `capped` only what is on the shelf can be sold and the rest is
    /// lost. Without it the full demand is withdrawn and the level may go
    /// negative (backorder).
    ///
    /// Returns the units sold.
    pub fn process_demand(&mut self, demand: f64, capped: bool) -> f64 {
        self.last_demand = demand;

        let sales = if capped {
            demand.min(self.level.max(0.0))
        } else {
            demand
        };

        self.level -= sales;
        self.cumulative_sales += sales;
        self.last_sales = sales;
        sales
    }

    /// Step 2: Reorder check.
    ///
    /// Returns true iff an order was placed today.
    pub fn review(&mut self, day: usize, order_cost: f64) -> bool {
        let placed = match self.mode {
            ReplenishmentMode::Instant => {
                if self.level <= self.reorder_point {
                    // Order-up-to: refill to the ceiling on the spot.
                    self.level += self.max_inventory - self.level;
                    true
                } else {
                    false
                }
            }
            ReplenishmentMode::LeadTime => {
                let position = self.inventory_position();
                let quantity = self.max_inventory - position;
                if position <= self.reorder_point && quantity > 0.0 {
                    self.pipeline.schedule(day + self.lead_time, quantity);
                    if self.lead_time == 0 {
                        self.level += self.pipeline.take_arrivals(day);
                    }
                    true
                } else {
                    false
                }
            }
        };

        if placed {
            self.total_cost += order_cost;
        }
        self.last_order_placed = placed;
        placed
    }

    /// Step 3: Charge holding and shortage cost on the signed level.
    ///
    /// Returns today's holding + shortage cost.
    pub fn accrue_daily_cost(&mut self, holding_cost: f64, shortage_cost: f64) -> f64 {
        let held = match self.mode {
            // Historical behavior: a negative level yields a negative
            // holding charge.
            ReplenishmentMode::Instant => self.level,
            ReplenishmentMode::LeadTime => self.level.max(0.0),
        };
        let short = (-self.level).max(0.0);

        let today = held * holding_cost + short * shortage_cost;
        self.total_cost += today;
        today
    }

    /// On hand plus on order.
    pub fn inventory_position(&self) -> f64 {
        self.level + self.pipeline.on_order()
    }

    /// The level as shown to users: never below zero.
    pub fn reported_level(&self) -> f64 {
        if self.level <= 0.0 {
            0.0
        } else {
            self.level
        }
    }
}
