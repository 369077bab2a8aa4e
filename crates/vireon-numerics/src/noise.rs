//! Seeded Gaussian noise source.
//!
//! Respects the determinism contract: each generator owns a ChaCha8 RNG
//! seeded explicitly by the caller, so identical seeds produce identical
//! sequences and no global RNG state is ever touched.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use vireon_core::Field;

/// Deterministic standard-normal sampler.
#[derive(Clone, Debug)]
pub struct GaussianNoise {
    rng: ChaCha8Rng,
}

impl GaussianNoise {
    /// Create a sampler seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draw one `N(0, 1)` sample using the Box-Muller transform.
    /// Avoids the `rand_distr` dependency.
    pub fn sample(&mut self) -> f64 {
        let u1: f64 = self.rng.random::<f64>().max(1e-300); // avoid ln(0)
        let u2: f64 = self.rng.random();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }

    /// An `n × n` field of `scale · N(0, 1)` samples, row-major.
    pub fn field(&mut self, n: usize, scale: f64) -> Field {
        Field::from_fn(n, |_, _| scale * self.sample())
    }

    /// Add `scale · N(0, 1)` to every cell of `field`.
    pub fn perturb(&mut self, field: &mut Field, scale: f64) {
        for v in field.as_mut_slice() {
            *v += scale * self.sample();
        }
    }
}
