// src/io/demand.rs

use crate::strategy::traits::DemandSampler;
use rand::RngCore;

/// Generates a demand schedule where every day has the exact same demand.
/// Useful for deterministic checks of the reorder logic.
pub fn generate_constant_demand(days: usize, value: f64) -> Vec<f64> {
    vec![value; days]
}

/// Draws one demand per simulated day from `sampler`.
///
/// # Arguments
/// * `sampler` - The demand distribution.
/// * `days` - Length of the simulation.
/// * `rng` - The trial's random stream; consumed once per day, in day order.
pub fn generate_demand_schedule(
    sampler: &dyn DemandSampler,
    days: usize,
    rng: &mut dyn RngCore,
) -> Vec<f64> {
    let mut schedule = Vec::with_capacity(days);
    for _ in 0..days {
        schedule.push(sampler.sample(rng));
    }
    schedule
}
