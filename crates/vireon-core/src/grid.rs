//! Periodic square grid geometry.
//!
//! Every operator in the workspace assumes an `n × n` torus with isotropic
//! spacing `dx = length / n`. Axis wrapping and centred physical
//! coordinates live here so the Laplacian, the forcing term, and the
//! initial-condition generators agree on them.

use crate::error::ConfigError;

/// An `n × n` periodic grid of physical side `length`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeriodicGrid {
    n: usize,
    length: f64,
}

impl PeriodicGrid {
    /// Create a grid, validating `n >= 1` and `length` finite and positive.
    pub fn new(n: usize, length: f64) -> Result<Self, ConfigError> {
        if n == 0 {
            return Err(ConfigError::ZeroGridSize);
        }
        if !length.is_finite() {
            return Err(ConfigError::NonFinite {
                param: "length",
                value: length,
            });
        }
        if length <= 0.0 {
            return Err(ConfigError::NonPositive {
                param: "length",
                value: length,
            });
        }
        Ok(Self { n, length })
    }

    /// Construct without validation; callers guarantee `n >= 1` and a
    /// finite positive `length`.
    pub(crate) const fn from_parts(n: usize, length: f64) -> Self {
        Self { n, length }
    }

    /// Cells per side.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Physical side length.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Uniform spacing `length / n`.
    pub fn dx(&self) -> f64 {
        self.length / self.n as f64
    }

    /// Total cell count.
    pub fn cell_count(&self) -> usize {
        self.n * self.n
    }

    /// Wrap `index + offset` onto `[0, n)`.
    pub fn wrap(&self, index: usize, offset: isize) -> usize {
        let n = self.n as isize;
        (((index as isize + offset) % n + n) % n) as usize
    }

    /// Physical coordinate of cell index `k` along one axis, measured from
    /// the grid midpoint `(n - 1) / 2`.
    pub fn centred_coord(&self, k: usize) -> f64 {
        (k as f64 - (self.n as f64 - 1.0) / 2.0) * self.dx()
    }

    /// Squared physical distance of `(row, col)` from the grid midpoint.
    pub fn radius_sq(&self, row: usize, col: usize) -> f64 {
        let y = self.centred_coord(row);
        let x = self.centred_coord(col);
        x * x + y * y
    }

    /// Per-axis lookup tables `(prev, next)` of wrapped neighbour indices.
    pub fn wrap_tables(&self) -> (Vec<usize>, Vec<usize>) {
        let prev = (0..self.n).map(|k| self.wrap(k, -1)).collect();
        let next = (0..self.n).map(|k| self.wrap(k, 1)).collect();
        (prev, next)
    }
}
