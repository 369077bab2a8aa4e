//! Test fixtures for VIREON-RD development.
//!
//! Provides small, fast model configurations and synthetic fields with
//! known spectral character (stripes, a single spot, constants) for
//! exercising the metrics and classifier.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::f64::consts::PI;

use vireon_core::{Field, ForcingConfig, GrayScottConfig, GridConfig, SqkConfig};

/// 32×32 grid, `L = 20`, with the given step, stop time, and stride.
pub fn tiny_grid(dt: f64, t_end: f64, save_every: u64) -> GridConfig {
    GridConfig::builder()
        .n(32)
        .length(20.0)
        .dt(dt)
        .t_end(t_end)
        .save_every(save_every)
        .build()
        .expect("tiny grid parameters are valid")
}

/// Unforced SQK on a 32×32 grid: `dt = 0.05`, `T = 0.5`, stride 2.
///
/// Reaction gains are softened 100× from the defaults, which diverge
/// within about ten steps at this `dt`.
pub fn tiny_sqk() -> SqkConfig {
    SqkConfig::builder()
        .grid(tiny_grid(0.05, 0.5, 2))
        .gains(1.0e-4, 2.0e-4, 1.5e-4)
        .forcing(
            ForcingConfig::builder()
                .scale(0.0)
                .build()
                .expect("zero forcing is valid"),
        )
        .enable_forcing(false)
        .build()
        .expect("tiny SQK parameters are valid")
}

/// Gray-Scott on a 32×32 grid: `dt = 1`, `T = 10`, stride 2, `F = 0.04`,
/// `k = 0.06`.
pub fn tiny_gray_scott() -> GrayScottConfig {
    GrayScottConfig::builder()
        .grid(tiny_grid(1.0, 10.0, 2))
        .du(0.16)
        .dv(0.08)
        .f(0.04)
        .k(0.06)
        .build()
        .expect("tiny Gray-Scott parameters are valid")
}

/// Axis along which [`stripes`] vary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Values vary with the row index (horizontal bands).
    Rows,
    /// Values vary with the column index (vertical bands).
    Cols,
}

/// `cos(2π · k / period)` along one axis, constant along the other.
pub fn stripes(n: usize, period: f64, axis: Axis) -> Field {
    Field::from_fn(n, |r, c| {
        let k = match axis {
            Axis::Rows => r,
            Axis::Cols => c,
        };
        (2.0 * PI * k as f64 / period).cos()
    })
}

/// Product of two cosines with equal period on both axes (a square
/// lattice of spots with an isotropic second-moment spectrum).
pub fn spot_lattice(n: usize, period: f64) -> Field {
    Field::from_fn(n, |r, c| {
        (2.0 * PI * r as f64 / period).cos() * (2.0 * PI * c as f64 / period).cos()
    })
}

/// A single Gaussian spot of width `sigma` (in cells) centred on the grid.
pub fn gaussian_spot(n: usize, sigma: f64) -> Field {
    let mid = (n as f64 - 1.0) / 2.0;
    Field::from_fn(n, |r, c| {
        let dr = r as f64 - mid;
        let dc = c as f64 - mid;
        (-(dr * dr + dc * dc) / (2.0 * sigma * sigma)).exp()
    })
}

/// Deterministic pseudo-random field in `[-1, 1)` (LCG; no RNG crate).
pub fn lcg_field(n: usize, seed: u64) -> Field {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    Field::from_fn(n, |_, _| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_have_expected_shapes() {
        assert_eq!(tiny_sqk().grid().n(), 32);
        assert!(!tiny_sqk().enable_forcing());
        assert_eq!(tiny_gray_scott().grid().iterations(), 11);
        assert_eq!(stripes(8, 4.0, Axis::Rows).n(), 8);
    }

    #[test]
    fn stripes_are_constant_along_one_axis() {
        let s = stripes(8, 4.0, Axis::Cols);
        for r in 0..8 {
            assert_eq!(s[(r, 3)], s[(0, 3)]);
        }
        assert_ne!(s[(0, 0)], s[(0, 1)]);
    }

    #[test]
    fn lcg_field_is_bounded_and_seeded() {
        let a = lcg_field(16, 9);
        assert!(a.as_slice().iter().all(|&v| (-1.0..1.0).contains(&v)));
        assert_eq!(a, lcg_field(16, 9));
        assert_ne!(a, lcg_field(16, 10));
    }
}
