//! Numerical building blocks for the VIREON-RD integrators.
//!
//! - [`laplacian`]: 5-point periodic Laplacian ([`PeriodicLaplacian`] caches
//!   the wrap tables for repeated use).
//! - [`forcing`]: Gaussian space-time source ([`ForcingProfile`] caches the
//!   spatial part).
//! - [`init_sqk`] / [`init_gray_scott`]: seeded initial conditions.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod forcing;
pub mod init;
pub mod laplacian;
pub mod noise;

pub use forcing::{forcing, ForcingProfile};
pub use init::{init_gray_scott, init_sqk, GrayScottInit, SqkInit};
pub use laplacian::{laplacian, PeriodicLaplacian};
pub use noise::GaussianNoise;
