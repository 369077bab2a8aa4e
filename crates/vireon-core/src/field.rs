//! Dense square scalar fields and named field maps.

use std::ops::{Index, IndexMut};

use indexmap::IndexMap;

use crate::error::FieldShapeError;

/// A dense `n × n` grid of `f64` values stored row-major.
///
/// Represents one physical quantity at one instant. Cloning produces an
/// independent deep copy, which is how snapshots are captured.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    n: usize,
    data: Vec<f64>,
}

/// Named fields of one model state, in the model's canonical order.
pub type FieldMap = IndexMap<&'static str, Field>;

impl Field {
    /// An `n × n` field of zeros.
    pub fn zeros(n: usize) -> Self {
        Self::filled(n, 0.0)
    }

    /// An `n × n` field with every cell set to `value`.
    pub fn filled(n: usize, value: f64) -> Self {
        Self {
            n,
            data: vec![value; n * n],
        }
    }

    /// Build a field by evaluating `f(row, col)` for every cell.
    pub fn from_fn(n: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                data.push(f(row, col));
            }
        }
        Self { n, data }
    }

    /// Wrap a row-major buffer of `n * n` values.
    pub fn from_vec(n: usize, data: Vec<f64>) -> Result<Self, FieldShapeError> {
        if data.len() != n * n {
            return Err(FieldShapeError {
                expected: n * n,
                got: data.len(),
            });
        }
        Ok(Self { n, data })
    }

    /// Side length.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Total number of cells (`n * n`).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for the degenerate `0 × 0` field.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major view of the values.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable row-major view of the values.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Consume the field, returning its buffer.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// True when every cell is finite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    /// Arithmetic mean. Zero for an empty field.
    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }

    /// Population standard deviation. Zero for an empty field.
    pub fn std(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        let var = self
            .data
            .iter()
            .map(|v| (v - mean) * (v - mean))
            .sum::<f64>()
            / self.data.len() as f64;
        var.sqrt()
    }

    /// Sum of absolute values.
    pub fn sum_abs(&self) -> f64 {
        self.data.iter().map(|v| v.abs()).sum()
    }

    /// Sum of absolute deviations from the field's own mean.
    pub fn sum_abs_deviation(&self) -> f64 {
        let mean = self.mean();
        self.data.iter().map(|v| (v - mean).abs()).sum()
    }
}

impl Index<(usize, usize)> for Field {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[row * self.n + col]
    }
}

impl IndexMut<(usize, usize)> for Field {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.data[row * self.n + col]
    }
}

/// True when every field in the map is finite.
pub fn all_finite(fields: &FieldMap) -> bool {
    fields.values().all(Field::is_finite)
}
