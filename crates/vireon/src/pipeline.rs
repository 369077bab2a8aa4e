//! Single runs and multi-seed suites.
//!
//! [`run_one`] integrates a model, evaluates its primary field, and scores
//! the result. [`run_suite`] does the same for many seeds on a small pool
//! of scoped worker threads. Runs share no mutable state, so the suite
//! output is identical to running the seeds one after another.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use tracing::debug;
use vireon_core::{ConfigError, ModelConfig};
use vireon_engine::{integrate, SimulationResult};
use vireon_eval::{
    eval_field, eval_time_drift, falsify_one, EvalConfig, FalsifierConfig, FieldMetrics, TrpConfig,
};

use crate::record::{MetricsRecord, RunMeta, RunRecord, SuiteSummary, ENGINE_VERSION};

/// Evaluation, scoring, and scheduling settings for a run or suite.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunOptions {
    /// Classifier thresholds.
    pub eval: EvalConfig,
    /// TRP constants.
    pub trp: TrpConfig,
    /// Gate thresholds.
    pub falsifier: FalsifierConfig,
    /// Worker threads for suites. `None` uses the available parallelism.
    pub threads: Option<NonZeroUsize>,
}

/// Result of [`run_suite`].
#[derive(Clone, Debug, PartialEq)]
pub struct SuiteReport {
    /// Aggregated scores.
    pub summary: SuiteSummary,
    /// Per-seed records, in seed order.
    pub records: Vec<RunRecord>,
}

/// Evaluate and score a finished integration.
///
/// The primary field (`X` for SQK, `v` for Gray-Scott) of the final state
/// is classified; drift is measured over that field's snapshots followed
/// by its final value. Elapsed time is `t_end` for a completed run and
/// the divergence time for a blow-up.
pub fn evaluate(
    spec: &str,
    config: &ModelConfig,
    seed: u64,
    result: &SimulationResult,
    opts: &RunOptions,
) -> RunRecord {
    let grid = config.grid();
    let primary = result.model().primary_field();

    let field_metrics = match result.final_field(primary) {
        Some(field) => eval_field(field, &opts.eval),
        None => FieldMetrics::unusable(),
    };
    let kl = eval_time_drift(&result.primary_series());
    let t = result.elapsed();
    let (gates, score) = falsify_one(&field_metrics, kl, t, &opts.trp, &opts.falsifier);

    RunRecord {
        meta: RunMeta {
            engine_version: ENGINE_VERSION,
            spec: spec.to_owned(),
            seed,
            model: result.model(),
            n: grid.n(),
            length: grid.length(),
            dt: result.dt(),
            t_end: result.t_end(),
            save_every: result.save_every(),
            status: result.status(),
        },
        metrics: MetricsRecord::new(&field_metrics, kl, &score),
        gates,
    }
}

fn run_with_spec(spec: &str, config: &ModelConfig, seed: u64, opts: &RunOptions) -> RunRecord {
    let result = integrate(config, seed);
    let record = evaluate(spec, config, seed, &result, opts);
    debug!(
        spec,
        seed,
        status = record.meta.status.as_str(),
        label = record.metrics.label.as_str(),
        trp = record.metrics.trp,
        "run evaluated"
    );
    record
}

/// Integrate, evaluate, and score one seed.
///
/// The record's `spec` is the model's canonical name.
pub fn run_one(config: &ModelConfig, seed: u64, opts: &RunOptions) -> RunRecord {
    run_with_spec(config.kind().as_str(), config, seed, opts)
}

/// Resolve `name` to its default configuration, then [`run_one`].
///
/// Fails before any grid memory is allocated if the name is unknown.
pub fn run_named(name: &str, seed: u64, opts: &RunOptions) -> Result<RunRecord, ConfigError> {
    let config = ModelConfig::from_name(name)?;
    Ok(run_with_spec(&normalize(name), &config, seed, opts))
}

/// Run every seed and aggregate their `E_current` values.
///
/// Seeds are distributed over `opts.threads` scoped workers; records come
/// back through a channel and are reordered to match `seeds`.
pub fn run_suite(config: &ModelConfig, seeds: &[u64], opts: &RunOptions) -> SuiteReport {
    suite_with_spec(config.kind().as_str(), config, seeds, opts)
}

/// Resolve `name` to its default configuration, then [`run_suite`].
pub fn run_suite_named(
    name: &str,
    seeds: &[u64],
    opts: &RunOptions,
) -> Result<SuiteReport, ConfigError> {
    let config = ModelConfig::from_name(name)?;
    Ok(suite_with_spec(&normalize(name), &config, seeds, opts))
}

fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

fn default_threads() -> usize {
    thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

fn suite_with_spec(
    spec: &str,
    config: &ModelConfig,
    seeds: &[u64],
    opts: &RunOptions,
) -> SuiteReport {
    let workers = opts
        .threads
        .map_or_else(default_threads, NonZeroUsize::get)
        .min(seeds.len());
    debug!(spec, seeds = seeds.len(), workers, "suite started");

    let (tx, rx) = crossbeam_channel::unbounded::<(usize, RunRecord)>();
    let next = AtomicUsize::new(0);

    thread::scope(|s| {
        for _ in 0..workers {
            let tx = tx.clone();
            let next = &next;
            s.spawn(move || loop {
                let idx = next.fetch_add(1, Ordering::Relaxed);
                let Some(&seed) = seeds.get(idx) else {
                    break;
                };
                let record = run_with_spec(spec, config, seed, opts);
                if tx.send((idx, record)).is_err() {
                    break;
                }
            });
        }
    });
    drop(tx);

    let mut slots: Vec<Option<RunRecord>> = vec![None; seeds.len()];
    for (idx, record) in rx.try_iter() {
        slots[idx] = Some(record);
    }
    let records: Vec<RunRecord> = slots.into_iter().flatten().collect();

    let summary = SuiteSummary::from_records(spec, &records);
    debug!(
        spec,
        e_global_min = summary.e_global_min,
        de_store_mean = summary.de_store_mean,
        "suite finished"
    );
    SuiteReport { summary, records }
}
