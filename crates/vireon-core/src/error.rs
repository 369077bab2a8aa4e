//! Error types for the VIREON-RD testbed.
//!
//! Only configuration resolution can fail. Numerical divergence is a run
//! outcome (see `RunStatus` in `vireon-engine`) and degenerate metric inputs
//! resolve to documented fallback values, so neither appears here.

use std::error::Error;
use std::fmt;

/// Errors detected while resolving or building a configuration.
///
/// Raised before any grid memory is allocated.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The model name did not match any known alias.
    UnknownModel {
        /// The name as supplied by the caller.
        name: String,
    },
    /// A parameter was NaN or infinite.
    NonFinite {
        /// Parameter name.
        param: &'static str,
        /// The offending value.
        value: f64,
    },
    /// A parameter that must be strictly positive was zero or negative.
    NonPositive {
        /// Parameter name.
        param: &'static str,
        /// The offending value.
        value: f64,
    },
    /// A parameter that must be non-negative was negative.
    Negative {
        /// Parameter name.
        param: &'static str,
        /// The offending value.
        value: f64,
    },
    /// A parameter fell outside its closed range.
    OutOfRange {
        /// Parameter name.
        param: &'static str,
        /// The offending value.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },
    /// Grid resolution `n` was zero.
    ZeroGridSize,
    /// Snapshot stride `save_every` was zero.
    ZeroSaveEvery,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownModel { name } => {
                write!(f, "unknown model {name:?} (use 'sqk' or 'gs')")
            }
            Self::NonFinite { param, value } => {
                write!(f, "{param} must be finite, got {value}")
            }
            Self::NonPositive { param, value } => {
                write!(f, "{param} must be > 0, got {value}")
            }
            Self::Negative { param, value } => {
                write!(f, "{param} must be >= 0, got {value}")
            }
            Self::OutOfRange {
                param,
                value,
                min,
                max,
            } => write!(f, "{param} must be in [{min}, {max}], got {value}"),
            Self::ZeroGridSize => write!(f, "grid size n must be at least 1"),
            Self::ZeroSaveEvery => write!(f, "save_every must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

/// A flat buffer did not match the requested square shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldShapeError {
    /// Expected element count (`n * n`).
    pub expected: usize,
    /// Actual element count.
    pub got: usize,
}

impl fmt::Display for FieldShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field buffer has {} elements, expected {}",
            self.got, self.expected
        )
    }
}

impl Error for FieldShapeError {}
