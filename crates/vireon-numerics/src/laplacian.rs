//! 5-point Laplacian on a periodic square grid.
//!
//! ```text
//! ∆u[r][c] = (u[r-1][c] + u[r+1][c] + u[r][c-1] + u[r][c+1] - 4 u[r][c]) / dx²
//! ```
//!
//! Indices wrap modulo `n` on both axes; there is no edge special-casing.

use vireon_core::{Field, PeriodicGrid};

/// A Laplacian stencil bound to one grid size and spacing.
///
/// Holds the wrapped neighbour tables so the integrator can apply the
/// operator every step without recomputing modular arithmetic or
/// allocating.
#[derive(Clone, Debug)]
pub struct PeriodicLaplacian {
    n: usize,
    inv_dx2: f64,
    prev: Vec<usize>,
    next: Vec<usize>,
}

impl PeriodicLaplacian {
    /// Build the stencil for `grid`.
    pub fn new(grid: &PeriodicGrid) -> Self {
        let (prev, next) = grid.wrap_tables();
        let dx = grid.dx();
        Self {
            n: grid.n(),
            inv_dx2: 1.0 / (dx * dx),
            prev,
            next,
        }
    }

    /// Cells per side this stencil was built for.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Write `∆field` into `out`.
    ///
    /// # Panics
    ///
    /// Panics if `field` or `out` is not `n × n`.
    pub fn apply(&self, field: &Field, out: &mut Field) {
        let n = self.n;
        assert_eq!(field.n(), n, "input field size does not match stencil");
        assert_eq!(out.n(), n, "output field size does not match stencil");
        let u = field.as_slice();
        let o = out.as_mut_slice();
        for r in 0..n {
            let up = self.prev[r] * n;
            let down = self.next[r] * n;
            let row = r * n;
            for c in 0..n {
                let centre = u[row + c];
                let sum = u[up + c] + u[down + c] + u[row + self.prev[c]] + u[row + self.next[c]];
                o[row + c] = (sum - 4.0 * centre) * self.inv_dx2;
            }
        }
    }
}

/// Periodic 5-point Laplacian of `field` with spacing `dx`.
pub fn laplacian(field: &Field, dx: f64) -> Field {
    let n = field.n();
    let mut out = Field::zeros(n);
    if n == 0 {
        return out;
    }
    let grid = match PeriodicGrid::new(n, dx * n as f64) {
        Ok(grid) => grid,
        // Non-positive or non-finite spacing: no meaningful stencil.
        Err(_) => return Field::filled(n, f64::NAN),
    };
    PeriodicLaplacian::new(&grid).apply(field, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn constant_field_has_zero_laplacian() {
        let f = Field::filled(6, 3.25);
        let l = laplacian(&f, 0.5);
        assert!(l.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn point_source_stencil() {
        let mut f = Field::zeros(5);
        f[(2, 2)] = 1.0;
        let l = laplacian(&f, 1.0);
        assert_eq!(l[(2, 2)], -4.0);
        assert_eq!(l[(1, 2)], 1.0);
        assert_eq!(l[(3, 2)], 1.0);
        assert_eq!(l[(2, 1)], 1.0);
        assert_eq!(l[(2, 3)], 1.0);
        assert_eq!(l[(0, 0)], 0.0);
    }

    #[test]
    fn corner_wraps_to_opposite_edges() {
        let mut f = Field::zeros(4);
        f[(0, 0)] = 1.0;
        let l = laplacian(&f, 1.0);
        assert_eq!(l[(3, 0)], 1.0);
        assert_eq!(l[(0, 3)], 1.0);
        assert_eq!(l[(1, 0)], 1.0);
        assert_eq!(l[(0, 1)], 1.0);
    }

    #[test]
    fn spacing_scales_by_inverse_square() {
        let mut f = Field::zeros(4);
        f[(1, 1)] = 1.0;
        let l = laplacian(&f, 0.5);
        assert_eq!(l[(1, 1)], -16.0);
    }

    #[test]
    fn plane_wave_is_an_eigenfunction() {
        // cos(2π c / n) has discrete eigenvalue (2cos(2π/n) - 2) / dx².
        let n = 16;
        let k = 2.0 * std::f64::consts::PI / n as f64;
        let f = Field::from_fn(n, |_, c| (k * c as f64).cos());
        let l = laplacian(&f, 1.0);
        let lambda = 2.0 * k.cos() - 2.0;
        for r in 0..n {
            for c in 0..n {
                assert!((l[(r, c)] - lambda * f[(r, c)]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn invalid_spacing_yields_nan() {
        let l = laplacian(&Field::zeros(3), 0.0);
        assert!(l.as_slice().iter().all(|v| v.is_nan()));
    }

    proptest! {
        #[test]
        fn laplacian_sums_to_zero(n in 1usize..12, seed in proptest::collection::vec(-10.0f64..10.0, 144)) {
            let f = Field::from_fn(n, |r, c| seed[r * 12 + c]);
            let l = laplacian(&f, 1.0);
            let total: f64 = l.as_slice().iter().sum();
            prop_assert!(total.abs() < 1e-9);
        }
    }
}
