//! VIREON-RD: an evaluation testbed for two-dimensional reaction-diffusion
//! systems.
//!
//! This is the top-level facade crate. It re-exports the workspace crates
//! and adds the run pipeline that ties them together: integrate a model,
//! evaluate its pattern, score it, and aggregate scores across seeds.
//!
//! # Quick start
//!
//! ```rust
//! use vireon::prelude::*;
//!
//! let grid = GridConfig::builder()
//!     .n(32)
//!     .length(20.0)
//!     .dt(1.0)
//!     .t_end(10.0)
//!     .save_every(5)
//!     .build()
//!     .unwrap();
//! let config = GrayScottConfig::builder()
//!     .grid(grid)
//!     .f(0.04)
//!     .k(0.06)
//!     .build()
//!     .unwrap();
//!
//! let record = run_one(&config.into(), 7, &RunOptions::default());
//! assert_eq!(record.meta.status, RunStatus::Ok);
//! assert!(record.metrics.trp >= 0.0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `vireon-core` | fields, grid geometry, configuration, errors |
//! | [`numerics`] | `vireon-numerics` | Laplacian, forcing, initial conditions |
//! | [`engine`] | `vireon-engine` | model stepping and the integration loop |
//! | [`eval`] | `vireon-eval` | spectral metrics, classification, TRP, gates |
//! | [`record`] | this crate | run and suite records |
//! | [`pipeline`] | this crate | `run_one`, `run_suite` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Fields, grid geometry, configuration, and errors (`vireon-core`).
pub use vireon_core as types;

/// Periodic Laplacian, forcing, and seeded initial conditions
/// (`vireon-numerics`).
pub use vireon_numerics as numerics;

/// Model stepping and the integration loop (`vireon-engine`).
pub use vireon_engine as engine;

/// Spectral metrics, classification, scoring, and gates (`vireon-eval`).
pub use vireon_eval as eval;

pub mod pipeline;
pub mod record;

pub use pipeline::{
    evaluate, run_named, run_one, run_suite, run_suite_named, RunOptions, SuiteReport,
};
pub use record::{
    MetricValue, MetricsRecord, RunMeta, RunRecord, SuiteRun, SuiteSummary, ENGINE_VERSION,
};

/// Common imports for typical use.
///
/// ```rust
/// use vireon::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use vireon_core::{
        ConfigError, Field, FieldMap, ForcingConfig, GrayScottConfig, GridConfig, ModelConfig,
        ModelKind, SqkConfig,
    };

    // Engine
    pub use vireon_engine::{integrate, Model, RunStatus, SimulationResult};

    // Evaluation
    pub use vireon_eval::{
        EvalConfig, FalsifierConfig, FieldMetrics, GateRecord, PatternLabel, TrpConfig,
    };

    // Pipeline
    pub use crate::pipeline::{run_named, run_one, run_suite, RunOptions, SuiteReport};
    pub use crate::record::{MetricsRecord, RunMeta, RunRecord, SuiteSummary};
}
