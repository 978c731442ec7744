// src/rng.rs
//! Random Number Generation for Path Simulation
//!
//! # Design
//!
//! Path simulation needs reproducible standard normal draws:
//! 1. **Reproducibility**: Same seed → same path, bit for bit
//! 2. **Parallel safety**: Each worker owns its generator, nothing is shared
//! 3. **Statistical quality**: `rand_distr::StandardNormal` (ziggurat) over `StdRng`
//!
//! The simulator only consumes the [`NormalSource`] capability, so any
//! `rand::Rng` works and tests can script the draws.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Source of independent standard normal variates.
pub trait NormalSource {
    fn next_standard_normal(&mut self) -> f64;

    fn fill_standard_normal(&mut self, out: &mut [f64]) {
        for z in out.iter_mut() {
            *z = self.next_standard_normal();
        }
    }
}

impl<R: Rng + ?Sized> NormalSource for R {
    fn next_standard_normal(&mut self) -> f64 {
        get_normal_draw(self)
    }
}

/// RNG factory for reproducible parallel simulations
///
/// Path `i` always receives the generator seeded with `base_seed + i`, so a
/// batch is identical whatever the number of worker threads.
#[derive(Debug, Clone, Copy)]
pub struct RngFactory {
    base_seed: u64,
}

impl RngFactory {
    pub fn new(base_seed: u64) -> Self {
        Self { base_seed }
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Create an independent generator for a specific path
    pub fn create_std_rng(&self, path_id: u64) -> StdRng {
        seed_rng_from_u64(self.base_seed.wrapping_add(path_id))
    }
}

pub fn seed_rng_from_u64(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn get_normal_draw<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    StandardNormal.sample(rng)
}
