//! Quality gates and suite-level aggregation.
//!
//! A run is reduced to two proxies, `R` (structure) and `P` (coherence),
//! which feed the TRP score. Each gate is an independent pass/fail check
//! with a stable external name.

use crate::classify::{FieldMetrics, PatternLabel};
use crate::trp::{e_current, trp_score, TrpConfig};

/// Gate thresholds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FalsifierConfig {
    /// Minimum TRP score.
    pub min_trp: f64,
    /// Minimum localization index.
    pub min_localization: f64,
    /// Maximum mean spectral drift.
    pub max_kl_drift: f64,
    /// Require a finite, positive `lambda_star`.
    pub require_finite_lambda: bool,
    /// Fail runs labelled blank.
    pub forbid_blank: bool,
}

impl Default for FalsifierConfig {
    fn default() -> Self {
        Self {
            min_trp: 1e-6,
            min_localization: 0.40,
            max_kl_drift: 1.0,
            require_finite_lambda: true,
            forbid_blank: true,
        }
    }
}

/// `R = max(localization, 0)` and
/// `P = 1 / (1 + max(anisotropy, 0) + max(kl, 0))`.
///
/// NaN inputs count as 0.
pub fn compute_rp(metrics: &FieldMetrics, kl_mean_to_final: f64) -> (f64, f64) {
    let r = metrics.localization.max(0.0);
    let p = 1.0 / (1.0 + metrics.anisotropy.max(0.0) + kl_mean_to_final.max(0.0));
    (r, p)
}

// ── GateRecord ─────────────────────────────────────────────────────

/// Outcome of every gate for one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GateRecord {
    trp: bool,
    localization: bool,
    drift: bool,
    lambda_finite: bool,
    non_blank: bool,
}

impl GateRecord {
    /// Gate names, in reporting order.
    pub const NAMES: [&'static str; 5] = [
        "TRPGate",
        "LocalizationGate",
        "DriftGate",
        "LambdaFiniteGate",
        "NonBlankGate",
    ];

    /// TRP at or above `min_trp`.
    pub fn trp(&self) -> bool {
        self.trp
    }

    /// Localization at or above `min_localization`.
    pub fn localization(&self) -> bool {
        self.localization
    }

    /// Drift at or below `max_kl_drift`.
    pub fn drift(&self) -> bool {
        self.drift
    }

    /// `lambda_star` finite and positive, or not required.
    pub fn lambda_finite(&self) -> bool {
        self.lambda_finite
    }

    /// Label not blank, or blank allowed.
    pub fn non_blank(&self) -> bool {
        self.non_blank
    }

    /// `(name, passed)` pairs in [`NAMES`](Self::NAMES) order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, bool)> {
        let values = [
            self.trp,
            self.localization,
            self.drift,
            self.lambda_finite,
            self.non_blank,
        ];
        Self::NAMES.into_iter().zip(values)
    }

    /// Look up a gate by its external name.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// True when every gate passed.
    pub fn all_pass(&self) -> bool {
        self.iter().all(|(_, v)| v)
    }
}

/// Score quantities derived alongside the gates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreExtras {
    /// Structure proxy.
    pub r: f64,
    /// Coherence proxy.
    pub p: f64,
    /// TRP score.
    pub trp: f64,
    /// Inverse efficiency.
    pub e_current: f64,
}

/// Evaluate every gate and derive the score for one run.
///
/// `t` is the elapsed simulation time. Comparisons against NaN fail.
pub fn falsify_one(
    metrics: &FieldMetrics,
    kl_mean_to_final: f64,
    t: f64,
    trp_cfg: &TrpConfig,
    cfg: &FalsifierConfig,
) -> (GateRecord, ScoreExtras) {
    let (r, p) = compute_rp(metrics, kl_mean_to_final);
    let trp = trp_score(r, p, t, trp_cfg);
    let extras = ScoreExtras {
        r,
        p,
        trp,
        e_current: e_current(r, p, t, trp_cfg),
    };

    let lam = metrics.lambda_star;
    let gates = GateRecord {
        trp: trp >= cfg.min_trp,
        localization: metrics.localization >= cfg.min_localization,
        drift: kl_mean_to_final <= cfg.max_kl_drift,
        lambda_finite: !cfg.require_finite_lambda || (lam.is_finite() && lam > 0.0),
        non_blank: !cfg.forbid_blank || metrics.label != PatternLabel::Blank,
    };
    (gates, extras)
}

/// `(E_global_min, ΔE_store_mean)` over a suite's `E_current` values.
///
/// `ΔE_store_mean` is the mean excess over the minimum. Empty input
/// yields `(0, 0)`.
pub fn suite_delta_e_store(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let spread = values.iter().map(|v| v - min).sum::<f64>() / values.len() as f64;
    (min, spread)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(localization: f64, anisotropy: f64, lambda_star: f64, label: PatternLabel) -> FieldMetrics {
        FieldMetrics {
            lambda_star,
            anisotropy,
            localization,
            label,
        }
    }

    #[test]
    fn rp_from_metrics() {
        let (r, p) = compute_rp(&metrics(0.7, 0.5, 3.0, PatternLabel::Spots), 0.5);
        assert_eq!(r, 0.7);
        assert!((p - 0.5).abs() < 1e-15);
    }

    #[test]
    fn rp_treats_nan_and_negatives_as_zero() {
        let (r, p) = compute_rp(&FieldMetrics::unusable(), f64::NAN);
        assert_eq!(r, 0.0);
        assert_eq!(p, 1.0);
        let (r, p) = compute_rp(&metrics(-0.2, -1.0, 1.0, PatternLabel::Spots), -3.0);
        assert_eq!((r, p), (0.0, 1.0));
    }

    #[test]
    fn healthy_run_passes_every_gate() {
        let m = metrics(0.8, 0.1, 6.0, PatternLabel::Radial);
        let (gates, extras) = falsify_one(&m, 0.2, 10.0, &TrpConfig::default(), &FalsifierConfig::default());
        assert!(gates.all_pass(), "{gates:?}");
        assert!(extras.trp > 0.0);
        assert!((extras.e_current - (10.0 + 1e-9) / (extras.r * extras.p)).abs() < 1e-9);
    }

    #[test]
    fn each_gate_fails_independently() {
        let trp = TrpConfig::default();
        let cfg = FalsifierConfig::default();

        let (g, _) = falsify_one(&metrics(0.1, 0.0, 6.0, PatternLabel::Spots), 0.0, 1.0, &trp, &cfg);
        assert!(!g.localization() && g.drift() && g.lambda_finite() && g.non_blank());

        let (g, _) = falsify_one(&metrics(0.8, 0.0, 6.0, PatternLabel::Spots), 2.0, 1.0, &trp, &cfg);
        assert!(!g.drift() && g.localization());

        let (g, _) = falsify_one(&metrics(0.8, 0.0, f64::NAN, PatternLabel::Spots), 0.0, 1.0, &trp, &cfg);
        assert!(!g.lambda_finite() && g.trp());

        let (g, _) = falsify_one(&metrics(0.8, 0.0, 6.0, PatternLabel::Blank), 0.0, 1.0, &trp, &cfg);
        assert!(!g.non_blank() && g.lambda_finite());

        // R floored to 1e-12 over a long run scores below min_trp.
        let (g, _) = falsify_one(&metrics(0.0, 0.0, 6.0, PatternLabel::Spots), 0.0, 100.0, &trp, &cfg);
        assert!(!g.trp());
    }

    #[test]
    fn optional_gates_can_be_disabled() {
        let cfg = FalsifierConfig {
            require_finite_lambda: false,
            forbid_blank: false,
            ..FalsifierConfig::default()
        };
        let m = metrics(0.8, 0.0, f64::NAN, PatternLabel::Blank);
        let (g, _) = falsify_one(&m, 0.0, 1.0, &TrpConfig::default(), &cfg);
        assert!(g.lambda_finite());
        assert!(g.non_blank());
    }

    #[test]
    fn nan_metrics_fail_comparison_gates() {
        let (g, _) = falsify_one(
            &FieldMetrics::unusable(),
            f64::NAN,
            1.0,
            &TrpConfig::default(),
            &FalsifierConfig::default(),
        );
        assert!(!g.localization());
        assert!(!g.drift());
        assert!(!g.lambda_finite());
        assert!(g.non_blank());
    }

    #[test]
    fn gate_names_are_stable() {
        let (g, _) = falsify_one(
            &metrics(0.8, 0.1, 6.0, PatternLabel::Radial),
            0.2,
            10.0,
            &TrpConfig::default(),
            &FalsifierConfig::default(),
        );
        let names: Vec<_> = g.iter().map(|(n, _)| n).collect();
        assert_eq!(names, GateRecord::NAMES);
        assert_eq!(g.get("DriftGate"), Some(true));
        assert_eq!(g.get("NoSuchGate"), None);
    }

    #[test]
    fn suite_aggregation() {
        let (min, spread) = suite_delta_e_store(&[5.0, 7.0, 5.0]);
        assert_eq!(min, 5.0);
        assert!((spread - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(suite_delta_e_store(&[]), (0.0, 0.0));
        assert_eq!(suite_delta_e_store(&[4.0]), (4.0, 0.0));
    }
}
