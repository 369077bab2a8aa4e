//! Localized Gaussian space-time forcing.
//!
//! ```text
//! χ(x, y, t) = -scale · exp(-r² / (2 σr²)) · exp(-(t - t0)² / (2 σt²))
//! ```
//!
//! `r` is the physical distance from the grid midpoint. The spatial factor
//! does not depend on `t`, so [`ForcingProfile`] evaluates it once per run
//! and the integrator multiplies by [`ForcingProfile::temporal`] each step.

use vireon_core::{Field, ForcingConfig, PeriodicGrid};

/// Cached spatial Gaussian plus the temporal envelope parameters.
#[derive(Clone, Debug)]
pub struct ForcingProfile {
    spatial: Field,
    scale: f64,
    t0: f64,
    sigma_t: f64,
}

impl ForcingProfile {
    /// Precompute the spatial factor for `grid`.
    pub fn new(grid: &PeriodicGrid, cfg: &ForcingConfig) -> Self {
        let two_sr2 = 2.0 * cfg.sigma_r() * cfg.sigma_r();
        let spatial = Field::from_fn(grid.n(), |r, c| (-grid.radius_sq(r, c) / two_sr2).exp());
        Self {
            spatial,
            scale: cfg.scale(),
            t0: cfg.t0(),
            sigma_t: cfg.sigma_t(),
        }
    }

    /// The unit-peak spatial Gaussian.
    pub fn spatial(&self) -> &Field {
        &self.spatial
    }

    /// Signed amplitude at time `t`: `-scale · exp(-(t - t0)² / (2 σt²))`.
    pub fn temporal(&self, t: f64) -> f64 {
        let dt = t - self.t0;
        -self.scale * (-dt * dt / (2.0 * self.sigma_t * self.sigma_t)).exp()
    }

    /// The full forcing field at time `t`.
    pub fn at(&self, t: f64) -> Field {
        let a = self.temporal(t);
        let mut out = self.spatial.clone();
        for v in out.as_mut_slice() {
            *v *= a;
        }
        out
    }
}

/// Evaluate the forcing field on `grid` at time `t`.
///
/// A zero `scale` yields an all-zero field.
pub fn forcing(grid: &PeriodicGrid, t: f64, cfg: &ForcingConfig) -> Field {
    ForcingProfile::new(grid, cfg).at(t)
}
