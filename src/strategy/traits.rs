// src/strategy/traits.rs

use rand::RngCore;
use std::fmt::Debug;

/// Draws one day's demand.
///
/// Samplers hold only their distribution parameters; all randomness comes
/// from the stream handed in, so one sampler can serve every trial of a
/// batch across threads.
pub trait DemandSampler: Debug + Send + Sync {
    /// Returns a non-negative, integer-valued demand.
    ///
    /// # Arguments
    /// * `rng` - The calling trial's own random stream.
    fn sample(&self, rng: &mut dyn RngCore) -> f64;
}
