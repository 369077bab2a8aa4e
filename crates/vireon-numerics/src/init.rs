//! Seeded initial conditions.
//!
//! Both generators are pure functions of `(config, seed)`: the RNG is
//! created inside the call, so identical inputs reproduce bit-identical
//! fields and concurrent runs never share generator state.

use vireon_core::{Field, GrayScottConfig, SqkConfig};

use crate::noise::GaussianNoise;

/// Noise amplitude applied to all three SQK channels.
const SQK_BACKGROUND_NOISE: f64 = 0.01;

/// Initial `(G, X, Y)` for the SQK model.
#[derive(Clone, Debug, PartialEq)]
pub struct SqkInit {
    /// Field `G`.
    pub g: Field,
    /// Field `X` (carries the Gaussian bump).
    pub x: Field,
    /// Field `Y`.
    pub y: Field,
}

/// Initial `(u, v)` for the Gray-Scott model.
#[derive(Clone, Debug, PartialEq)]
pub struct GrayScottInit {
    /// Field `u`.
    pub u: Field,
    /// Field `v`.
    pub v: Field,
}

/// Near-zero `G`, `X`, `Y` with a centred Gaussian bump injected into `X`.
///
/// ```text
/// G = 0.01 N(0,1)
/// X = amp · exp(-r² / (2σ²)) + 0.01 N(0,1)
/// Y = 0.01 N(0,1)
/// ```
pub fn init_sqk(cfg: &SqkConfig, seed: u64) -> SqkInit {
    let grid = cfg.grid().grid();
    let n = grid.n();
    let amp = cfg.seed_gaussian_amp();
    let two_s2 = 2.0 * cfg.seed_gaussian_sigma() * cfg.seed_gaussian_sigma();

    let mut noise = GaussianNoise::new(seed);
    let g = noise.field(n, SQK_BACKGROUND_NOISE);
    let mut x = Field::from_fn(n, |r, c| amp * (-grid.radius_sq(r, c) / two_s2).exp());
    noise.perturb(&mut x, SQK_BACKGROUND_NOISE);
    let y = noise.field(n, SQK_BACKGROUND_NOISE);

    SqkInit { g, x, y }
}

/// Uniform background `u = 1, v = 0` with a centred square set to
/// `(seed_u, seed_v)`, then `noise · N(0,1)` added to both fields.
///
/// The square has side `max(1, floor(seed_square_frac · n))` and starts at
/// `n/2 - side/2` on both axes.
pub fn init_gray_scott(cfg: &GrayScottConfig, seed: u64) -> GrayScottInit {
    let n = cfg.grid().n();
    let side = ((cfg.seed_square_frac() * n as f64) as usize).clamp(1, n);
    let start = n / 2 - side / 2;
    let end = start + side;

    let mut u = Field::filled(n, 1.0);
    let mut v = Field::zeros(n);
    for r in start..end {
        for c in start..end {
            u[(r, c)] = cfg.seed_u();
            v[(r, c)] = cfg.seed_v();
        }
    }

    let mut noise = GaussianNoise::new(seed);
    noise.perturb(&mut u, cfg.noise());
    noise.perturb(&mut v, cfg.noise());

    GrayScottInit { u, v }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vireon_core::GridConfig;
    use vireon_test_utils::{tiny_gray_scott, tiny_sqk};

    #[test]
    fn sqk_is_deterministic_per_seed() {
        let cfg = tiny_sqk();
        assert_eq!(init_sqk(&cfg, 11), init_sqk(&cfg, 11));
        assert_ne!(init_sqk(&cfg, 11), init_sqk(&cfg, 12));
    }

    #[test]
    fn sqk_bump_lands_in_x() {
        let cfg = tiny_sqk();
        let init = init_sqk(&cfg, 1);
        let n = cfg.grid().n();
        let mid = n / 2;
        // Bump amplitude 0.4 dwarfs the 0.01 noise near the centre.
        assert!(init.x[(mid, mid)] > 0.2);
        assert!(init.g[(mid, mid)].abs() < 0.1);
        assert!(init.y[(mid, mid)].abs() < 0.1);
        assert!(init.x[(mid, mid)] > init.x[(0, 0)]);
    }

    #[test]
    fn gray_scott_square_and_background() {
        let grid = GridConfig::builder().n(20).build().unwrap();
        let cfg = GrayScottConfig::builder()
            .grid(grid)
            .noise(0.0)
            .seed_square_frac(0.2)
            .build()
            .unwrap();
        let init = init_gray_scott(&cfg, 5);
        // side 4, start 8, end 12
        assert_eq!(init.u[(8, 8)], 0.5);
        assert_eq!(init.v[(11, 11)], 0.25);
        assert_eq!(init.u[(7, 8)], 1.0);
        assert_eq!(init.v[(12, 12)], 0.0);
    }

    #[test]
    fn gray_scott_minimum_square_is_one_cell() {
        let grid = GridConfig::builder().n(8).build().unwrap();
        let cfg = GrayScottConfig::builder()
            .grid(grid)
            .noise(0.0)
            .seed_square_frac(0.0)
            .build()
            .unwrap();
        let init = init_gray_scott(&cfg, 0);
        let seeded = init.v.as_slice().iter().filter(|&&v| v != 0.0).count();
        assert_eq!(seeded, 1);
        assert_eq!(init.v[(4, 4)], 0.25);
    }

    #[test]
    fn gray_scott_noise_is_seeded() {
        let cfg = tiny_gray_scott();
        assert_eq!(init_gray_scott(&cfg, 3), init_gray_scott(&cfg, 3));
        assert_ne!(init_gray_scott(&cfg, 3), init_gray_scott(&cfg, 4));
    }
}
