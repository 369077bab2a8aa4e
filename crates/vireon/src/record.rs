//! Plain records handed to reporting collaborators.
//!
//! These mirror the run artifact shapes (`meta`, `metrics`, `gates`,
//! `suite`) without committing to a serialization format.

use std::fmt;

use vireon_core::ModelKind;
use vireon_engine::RunStatus;
use vireon_eval::{FieldMetrics, GateRecord, PatternLabel, ScoreExtras};

/// Version string recorded in every [`RunMeta`].
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

// ── RunMeta ────────────────────────────────────────────────────────

/// Provenance of one run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunMeta {
    /// Crate version that produced the run.
    pub engine_version: &'static str,
    /// Name the model was requested by.
    pub spec: String,
    /// Initial-condition seed.
    pub seed: u64,
    /// Model variant.
    pub model: ModelKind,
    /// Cells per side.
    pub n: usize,
    /// Domain side length.
    pub length: f64,
    /// Step size.
    pub dt: f64,
    /// Requested stop time.
    pub t_end: f64,
    /// Snapshot stride.
    pub save_every: u64,
    /// How the integration ended.
    pub status: RunStatus,
}

impl RunMeta {
    /// Step at which the run diverged, if it did.
    pub fn stop_step(&self) -> Option<u64> {
        self.status.stop_step()
    }

    /// Time at which the run diverged, if it did.
    pub fn stop_time(&self) -> Option<f64> {
        self.status.stop_time()
    }
}

// ── MetricsRecord ──────────────────────────────────────────────────

/// One metric value: a real number or a label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MetricValue {
    /// Real-valued metric; may be NaN or infinite.
    Real(f64),
    /// Categorical metric.
    Label(&'static str),
}

impl fmt::Display for MetricValue {
    /// Non-finite reals render as `NaN`, `inf`, or `-inf`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(v) => write!(f, "{v}"),
            Self::Label(s) => f.write_str(s),
        }
    }
}

/// Evaluation and score of one run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MetricsRecord {
    /// Dominant wavelength in index units.
    pub lambda_star: f64,
    /// Spectral anisotropy index.
    pub anisotropy: f64,
    /// Energy localization index.
    pub localization: f64,
    /// Pattern label.
    pub label: PatternLabel,
    /// Mean spectral drift toward the final field.
    pub kl_mean_to_final: f64,
    /// Structure proxy.
    pub r: f64,
    /// Coherence proxy.
    pub p: f64,
    /// TRP score.
    pub trp: f64,
    /// Inverse efficiency.
    pub e_current: f64,
}

impl MetricsRecord {
    /// External metric names, in reporting order.
    pub const NAMES: [&'static str; 9] = [
        "lambda_star",
        "anisotropy",
        "localization",
        "label",
        "kl_mean_to_final",
        "R",
        "P",
        "TRP",
        "E_current",
    ];

    /// Combine field metrics, drift, and score.
    pub fn new(field: &FieldMetrics, kl_mean_to_final: f64, score: &ScoreExtras) -> Self {
        Self {
            lambda_star: field.lambda_star,
            anisotropy: field.anisotropy,
            localization: field.localization,
            label: field.label,
            kl_mean_to_final,
            r: score.r,
            p: score.p,
            trp: score.trp,
            e_current: score.e_current,
        }
    }

    /// `(name, value)` pairs in [`NAMES`](Self::NAMES) order.
    pub fn entries(&self) -> [(&'static str, MetricValue); 9] {
        use MetricValue::{Label, Real};
        let n = Self::NAMES;
        [
            (n[0], Real(self.lambda_star)),
            (n[1], Real(self.anisotropy)),
            (n[2], Real(self.localization)),
            (n[3], Label(self.label.as_str())),
            (n[4], Real(self.kl_mean_to_final)),
            (n[5], Real(self.r)),
            (n[6], Real(self.p)),
            (n[7], Real(self.trp)),
            (n[8], Real(self.e_current)),
        ]
    }

    /// Look up a metric by its external name.
    pub fn get(&self, name: &str) -> Option<MetricValue> {
        self.entries()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }
}

// ── RunRecord ──────────────────────────────────────────────────────

/// Everything a reporter needs about one run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunRecord {
    /// Provenance.
    pub meta: RunMeta,
    /// Metrics and score.
    pub metrics: MetricsRecord,
    /// Gate outcomes.
    pub gates: GateRecord,
}

// ── Suite ──────────────────────────────────────────────────────────

/// Per-seed entry of a [`SuiteSummary`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SuiteRun {
    /// Seed of the run.
    pub seed: u64,
    /// Its inverse efficiency.
    pub e_current: f64,
    /// Its TRP score.
    pub trp: f64,
}

/// Aggregate of a multi-seed suite.
#[derive(Clone, Debug, PartialEq)]
pub struct SuiteSummary {
    /// Name the model was requested by.
    pub spec: String,
    /// Seeds in submission order.
    pub seeds: Vec<u64>,
    /// Smallest `E_current` across the suite.
    pub e_global_min: f64,
    /// Mean excess of `E_current` over the minimum.
    pub de_store_mean: f64,
    /// Per-seed entries, parallel to `seeds`.
    pub runs: Vec<SuiteRun>,
}

impl SuiteSummary {
    /// Aggregate a suite from its run records, in order.
    pub fn from_records(spec: &str, records: &[RunRecord]) -> Self {
        let runs: Vec<SuiteRun> = records
            .iter()
            .map(|r| SuiteRun {
                seed: r.meta.seed,
                e_current: r.metrics.e_current,
                trp: r.metrics.trp,
            })
            .collect();
        let e_values: Vec<f64> = runs.iter().map(|r| r.e_current).collect();
        let (e_global_min, de_store_mean) = vireon_eval::suite_delta_e_store(&e_values);
        Self {
            spec: spec.to_owned(),
            seeds: runs.iter().map(|r| r.seed).collect(),
            e_global_min,
            de_store_mean,
            runs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MetricsRecord {
        MetricsRecord {
            lambda_star: f64::NAN,
            anisotropy: 0.1,
            localization: 0.5,
            label: PatternLabel::Spots,
            kl_mean_to_final: 0.0,
            r: 0.5,
            p: 0.9,
            trp: f64::INFINITY,
            e_current: 2.0,
        }
    }

    #[test]
    fn entries_follow_external_names() {
        let names: Vec<_> = sample().entries().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, MetricsRecord::NAMES);
        assert_eq!(sample().get("label"), Some(MetricValue::Label("spots")));
        assert_eq!(sample().get("E_current"), Some(MetricValue::Real(2.0)));
        assert_eq!(sample().get("missing"), None);
    }

    #[test]
    fn non_finite_values_render_explicitly() {
        let m = sample();
        assert_eq!(m.get("lambda_star").unwrap().to_string(), "NaN");
        assert_eq!(m.get("TRP").unwrap().to_string(), "inf");
        assert_eq!(MetricValue::Real(f64::NEG_INFINITY).to_string(), "-inf");
        assert_eq!(MetricValue::Real(0.25).to_string(), "0.25");
    }

    #[test]
    fn meta_exposes_stop_point() {
        let meta = RunMeta {
            engine_version: ENGINE_VERSION,
            spec: "gs".into(),
            seed: 1,
            model: ModelKind::GrayScott,
            n: 32,
            length: 20.0,
            dt: 1.0,
            t_end: 10.0,
            save_every: 2,
            status: RunStatus::Blowup {
                stop_step: 4,
                stop_time: 4.0,
            },
        };
        assert_eq!(meta.stop_step(), Some(4));
        assert_eq!(meta.stop_time(), Some(4.0));
        assert!(!meta.engine_version.is_empty());
    }
}
