//! The integration loop and its result record.

use std::fmt;

use tracing::{debug, warn};
use vireon_core::{Field, FieldMap, GrayScottConfig, ModelConfig, ModelKind, SqkConfig};

use crate::hash::field_map_hash;
use crate::model::Model;

// ── RunStatus ──────────────────────────────────────────────────────

/// How an integration ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RunStatus {
    /// All requested steps completed with finite state.
    Ok,
    /// A non-finite value appeared and integration stopped early.
    Blowup {
        /// Number of updates applied when divergence was first observed.
        stop_step: u64,
        /// Simulation time of the diverged state: `stop_step · dt`.
        stop_time: f64,
    },
}

impl RunStatus {
    /// `"ok"` or `"blowup"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Blowup { .. } => "blowup",
        }
    }

    /// True for [`RunStatus::Ok`].
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Step at which divergence was observed, if any.
    pub fn stop_step(&self) -> Option<u64> {
        match self {
            Self::Ok => None,
            Self::Blowup { stop_step, .. } => Some(*stop_step),
        }
    }

    /// Simulation time at which divergence was observed, if any.
    pub fn stop_time(&self) -> Option<f64> {
        match self {
            Self::Ok => None,
            Self::Blowup { stop_time, .. } => Some(*stop_time),
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── SimulationResult ───────────────────────────────────────────────

/// Output of one integration: sampled history plus final state.
///
/// `times[i]` is the simulation time of `snapshots[i]`. Snapshots are
/// deep copies taken before the update of their step.
#[derive(Clone, Debug)]
pub struct SimulationResult {
    model: ModelKind,
    dt: f64,
    t_end: f64,
    save_every: u64,
    times: Vec<f64>,
    snapshots: Vec<FieldMap>,
    final_state: FieldMap,
    status: RunStatus,
}

impl SimulationResult {
    /// Which model produced this result.
    pub fn model(&self) -> ModelKind {
        self.model
    }

    /// Step size.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Requested stop time.
    pub fn t_end(&self) -> f64 {
        self.t_end
    }

    /// Snapshot stride in steps.
    pub fn save_every(&self) -> u64 {
        self.save_every
    }

    /// Timestamps of the captured snapshots, ascending.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Captured snapshots, parallel to [`times`](Self::times).
    pub fn snapshots(&self) -> &[FieldMap] {
        &self.snapshots
    }

    /// Fields after the last applied update.
    pub fn final_state(&self) -> &FieldMap {
        &self.final_state
    }

    /// Outcome of the run.
    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// One field of the final state by name.
    pub fn final_field(&self, name: &str) -> Option<&Field> {
        self.final_state.get(name)
    }

    /// Simulated time actually covered: `t_end` for a completed run, the
    /// divergence time for a blow-up.
    pub fn elapsed(&self) -> f64 {
        self.status.stop_time().unwrap_or(self.t_end)
    }

    /// The model's primary field in every snapshot, followed by its final
    /// value. Names missing from a snapshot are skipped.
    pub fn primary_series(&self) -> Vec<&Field> {
        let name = self.model.primary_field();
        self.snapshots
            .iter()
            .filter_map(|s| s.get(name))
            .chain(self.final_state.get(name))
            .collect()
    }

    /// FNV-1a digest of the final state.
    pub fn final_digest(&self) -> u64 {
        field_map_hash(&self.final_state)
    }
}

// ── integrate ──────────────────────────────────────────────────────

/// Upper bound on snapshot slots reserved before the first step.
const SNAPSHOT_RESERVE: u64 = 256;

/// Integrate `config` from the initial condition generated by `seed`.
///
/// Runs `ceil(t_end / dt) + 1` explicit Euler updates. At iteration `n`
/// a snapshot is captured first when `n % save_every == 0`, then the
/// model advances. Integration stops at the first update that produces
/// a non-finite value, reporting [`RunStatus::Blowup`].
pub fn integrate(config: &ModelConfig, seed: u64) -> SimulationResult {
    let grid = config.grid();
    let dt = grid.dt();
    let save_every = grid.save_every();
    let iterations = grid.iterations();
    let kind = config.kind();

    debug!(model = %kind, seed, n = grid.n(), iterations, "integration started");

    let mut model = Model::new(config, seed);
    // Runs may diverge long before t_end; grow past this on demand.
    let capacity = iterations
        .div_ceil(save_every)
        .min(SNAPSHOT_RESERVE) as usize;
    let mut times = Vec::with_capacity(capacity);
    let mut snapshots = Vec::with_capacity(capacity);
    let mut status = RunStatus::Ok;

    for n in 0..iterations {
        if n % save_every == 0 {
            times.push(n as f64 * dt);
            snapshots.push(model.snapshot());
        }
        model.step(dt);
        if model.diverged() {
            let stop_step = n + 1;
            let stop_time = stop_step as f64 * dt;
            warn!(model = %kind, seed, stop_step, stop_time, "integration diverged");
            status = RunStatus::Blowup {
                stop_step,
                stop_time,
            };
            break;
        }
    }

    debug!(
        model = %kind,
        seed,
        status = status.as_str(),
        snapshots = snapshots.len(),
        "integration finished"
    );

    SimulationResult {
        model: kind,
        dt,
        t_end: grid.t_end(),
        save_every,
        times,
        snapshots,
        final_state: model.into_fields(),
        status,
    }
}

/// Integrate an SQK configuration.
pub fn run_sqk(config: &SqkConfig, seed: u64) -> SimulationResult {
    integrate(&ModelConfig::Sqk(*config), seed)
}

/// Integrate a Gray-Scott configuration.
pub fn run_gray_scott(config: &GrayScottConfig, seed: u64) -> SimulationResult {
    integrate(&ModelConfig::GrayScott(*config), seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vireon_test_utils::{tiny_grid, tiny_gray_scott};

    #[test]
    fn status_accessors() {
        assert_eq!(RunStatus::Ok.as_str(), "ok");
        assert_eq!(RunStatus::Ok.stop_step(), None);
        let b = RunStatus::Blowup {
            stop_step: 7,
            stop_time: 0.7,
        };
        assert_eq!(b.to_string(), "blowup");
        assert_eq!(b.stop_step(), Some(7));
        assert_eq!(b.stop_time(), Some(0.7));
        assert!(!b.is_ok());
    }

    #[test]
    fn snapshot_times_follow_stride() {
        // T = 10, dt = 1 → 11 iterations; stride 2 → n = 0, 2, ..., 10.
        let r = run_gray_scott(&tiny_gray_scott(), 0);
        assert_eq!(r.times(), &[0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(r.snapshots().len(), r.times().len());
    }

    #[test]
    fn zero_duration_still_takes_one_step() {
        let cfg = GrayScottConfig::builder()
            .grid(tiny_grid(1.0, 0.0, 1))
            .build()
            .unwrap();
        let r = run_gray_scott(&cfg, 0);
        assert_eq!(r.times(), &[0.0]);
        assert_ne!(r.snapshots()[0], *r.final_state());
    }

    #[test]
    fn primary_series_appends_final() {
        let r = run_gray_scott(&tiny_gray_scott(), 2);
        let series = r.primary_series();
        assert_eq!(series.len(), r.snapshots().len() + 1);
        assert_eq!(series.last().copied(), r.final_field("v"));
    }

    #[test]
    fn elapsed_is_t_end_when_ok() {
        let r = run_gray_scott(&tiny_gray_scott(), 2);
        assert!(r.status().is_ok());
        assert_eq!(r.elapsed(), 10.0);
    }
}
