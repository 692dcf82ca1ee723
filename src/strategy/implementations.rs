// src/strategy/implementations.rs

use crate::error::{Result, SimError};
use crate::strategy::traits::DemandSampler;
use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};

/// Round to the nearest unit and clamp negatives to zero.
fn to_demand(raw: f64) -> f64 {
    let rounded = raw.round();
    if rounded <= 0.0 {
        0.0
    } else {
        rounded
    }
}

// =========================================================================
// 1. Uniform Approximation (legacy)
// =========================================================================

/// The generator the dashboards have always used.
///
/// `demand = max(0, round(mean + std * (U - 0.5)))` with `U ~ [0, 1)`.
/// Despite the parameter names this is a uniform perturbation bounded to
/// `±std/2`, not a normal distribution. Kept bit-for-bit so existing
/// numbers reproduce.
#[derive(Debug, Clone)]
pub struct UniformApprox {
    mean: f64,
    std_dev: f64,
}

impl UniformApprox {
    pub fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }
}

impl DemandSampler for UniformApprox {
    fn sample(&self, rng: &mut dyn RngCore) -> f64 {
        let u: f64 = rng.gen();
        to_demand(self.mean + self.std_dev * (u - 0.5))
    }
}

// =========================================================================
// 2. True Normal
// =========================================================================

/// A Gaussian draw, rounded and clamped like the legacy generator.
///
/// Opt-in: switching to this changes every downstream number.
#[derive(Debug, Clone)]
pub struct TrueNormal {
    normal: Normal<f64>,
}

impl TrueNormal {
    pub fn new(mean: f64, std_dev: f64) -> Result<Self> {
        let normal = Normal::new(mean, std_dev)
            .map_err(|e| SimError::validation("stdDemand", e.to_string()))?;
        Ok(Self { normal })
    }
}

impl DemandSampler for TrueNormal {
    fn sample(&self, rng: &mut dyn RngCore) -> f64 {
        to_demand(self.normal.sample(rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    #[test]
    fn test_uniform_stays_within_half_std() {
        let sampler = UniformApprox::new(50.0, 10.0);
        let mut rng = create_test_rng();
        for _ in 0..10_000 {
            let d = sampler.sample(&mut rng);
            assert!((45.0..=55.0).contains(&d), "demand {} out of band", d);
            assert_eq!(d, d.round());
        }
    }

    #[test]
    fn test_uniform_zero_std_is_deterministic() {
        let sampler = UniformApprox::new(50.0, 0.0);
        let mut rng = create_test_rng();
        for _ in 0..100 {
            assert_eq!(sampler.sample(&mut rng), 50.0);
        }
    }

    #[test]
    fn test_uniform_clamps_at_zero() {
        let sampler = UniformApprox::new(-20.0, 4.0);
        let mut rng = create_test_rng();
        for _ in 0..100 {
            let d = sampler.sample(&mut rng);
            assert_eq!(d, 0.0);
            assert!(d.is_sign_positive());
        }
    }

    #[test]
    fn test_true_normal_spreads_beyond_uniform_band() {
        let sampler = TrueNormal::new(50.0, 10.0).unwrap();
        let mut rng = create_test_rng();
        let draws: Vec<f64> = (0..10_000).map(|_| sampler.sample(&mut rng)).collect();

        assert!(draws.iter().all(|d| *d >= 0.0 && *d == d.round()));
        // A bounded uniform never leaves [45, 55]; a normal with sd 10 does often.
        let outside = draws.iter().filter(|d| **d < 45.0 || **d > 55.0).count();
        assert!(outside > 3_000);

        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        assert!((mean - 50.0).abs() < 1.0);
    }

    #[test]
    fn test_true_normal_rejects_negative_std() {
        assert!(TrueNormal::new(50.0, -1.0).is_err());
    }
}
