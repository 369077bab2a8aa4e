//! Core types for the VIREON-RD reaction-diffusion testbed.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! value types shared by every other crate in the workspace: dense scalar
//! fields, the periodic grid geometry, immutable model configurations, and
//! the configuration error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod field;
pub mod grid;

pub use config::{
    ForcingConfig, ForcingConfigBuilder, GrayScottConfig, GrayScottConfigBuilder, GridConfig,
    GridConfigBuilder, ModelConfig, ModelKind, SqkConfig, SqkConfigBuilder,
};
pub use error::{ConfigError, FieldShapeError};
pub use field::{all_finite, Field, FieldMap};
pub use grid::PeriodicGrid;
