//! Pattern diagnostics and scoring for VIREON-RD runs.
//!
//! - [`spectral`]: structure factor, radial profile, peak wavelength,
//!   anisotropy.
//! - [`stats`]: energy localization and KL divergence.
//! - [`classify`]: per-field metrics, pattern labels, and spectral drift.
//! - [`trp`]: the TRP score, its algebraic inversion, and `E_current`.
//! - [`falsify`]: quality gates and suite aggregation.
//!
//! Every function here is total over finite input. Degenerate input (no
//! energy, no spectral mass) resolves to a defined fallback value rather
//! than an error.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod classify;
pub mod falsify;
pub mod spectral;
pub mod stats;
pub mod trp;

pub use classify::{
    classify_pattern, eval_field, eval_time_drift, EvalConfig, FieldMetrics, PatternLabel,
};
pub use falsify::{
    compute_rp, falsify_one, suite_delta_e_store, FalsifierConfig, GateRecord, ScoreExtras,
};
pub use spectral::{anisotropy, peak_wavelength, radial_average, structure_factor, RadialProfile};
pub use stats::{kl_divergence, localization};
pub use trp::{e_current, trp_rotate, trp_score, TrpConfig, TrpKnown, TrpSolution};
