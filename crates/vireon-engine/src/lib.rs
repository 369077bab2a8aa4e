//! Time integration for the VIREON-RD testbed.
//!
//! [`integrate`] drives a [`Model`] forward with explicit Euler steps,
//! capturing deep-copied snapshots every `save_every` steps and stopping
//! at the first non-finite state. The returned [`SimulationResult`]
//! records whether the run finished (`ok`) or diverged (`blowup`).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod hash;
pub mod model;
pub mod sim;

pub use hash::field_map_hash;
pub use model::{GrayScottModel, Model, SqkModel};
pub use sim::{integrate, run_gray_scott, run_sqk, RunStatus, SimulationResult};
