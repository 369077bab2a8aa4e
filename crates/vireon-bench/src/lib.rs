//! Benchmark profiles for the VIREON-RD testbed.
//!
//! - [`gray_scott_profile`]: Gray-Scott on an `n × n` grid with unit
//!   spacing (`Du · dt / dx² = 0.16`, inside the explicit limit of 0.25)
//! - [`sqk_profile`]: SQK at its default spacing and step, softened gains
//! - [`warm_model`]: a model advanced past its initial transient

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use vireon_core::{GrayScottConfig, GridConfig, SqkConfig};
use vireon_engine::Model;

/// Gray-Scott on `n × n` cells, `L = n`, `dt = 1`, run to `t_end`.
pub fn gray_scott_profile(n: usize, t_end: f64) -> GrayScottConfig {
    let grid = GridConfig::builder()
        .n(n)
        .length(n as f64)
        .dt(1.0)
        .t_end(t_end)
        .save_every(50)
        .build()
        .expect("benchmark grid is valid");
    GrayScottConfig::builder()
        .grid(grid)
        .f(0.04)
        .k(0.06)
        .build()
        .expect("benchmark Gray-Scott parameters are valid")
}

/// SQK on `n × n` cells with `L = 40 · n / 128`, so the spacing (and the
/// stable default `dt = 0.01`) matches the 128-cell default.
///
/// Reaction gains are softened 100× so the state stays finite over
/// benchmark-length runs.
pub fn sqk_profile(n: usize, t_end: f64) -> SqkConfig {
    let grid = GridConfig::builder()
        .n(n)
        .length(40.0 * n as f64 / 128.0)
        .dt(0.01)
        .t_end(t_end)
        .save_every(100)
        .build()
        .expect("benchmark grid is valid");
    SqkConfig::builder()
        .grid(grid)
        .gains(1.0e-4, 2.0e-4, 1.5e-4)
        .build()
        .expect("benchmark SQK parameters are valid")
}

/// A Gray-Scott model on `n × n` cells after `steps` updates.
pub fn warm_model(n: usize, steps: u32, seed: u64) -> Model {
    let cfg = gray_scott_profile(n, 0.0);
    let mut model = Model::new(&cfg.into(), seed);
    for _ in 0..steps {
        model.step(cfg.grid().dt());
    }
    model
}

#[cfg(test)]
mod tests {
    use super::*;
    use vireon_engine::{run_gray_scott, run_sqk, RunStatus};

    #[test]
    fn profiles_are_stable() {
        assert_eq!(run_gray_scott(&gray_scott_profile(32, 50.0), 1).status(), RunStatus::Ok);
        assert_eq!(run_sqk(&sqk_profile(32, 0.5), 1).status(), RunStatus::Ok);
    }

    #[test]
    fn warm_model_is_deterministic() {
        let a = warm_model(16, 20, 3).snapshot();
        let b = warm_model(16, 20, 3).snapshot();
        assert_eq!(a, b);
        assert!(!warm_model(16, 20, 3).diverged());
    }
}
