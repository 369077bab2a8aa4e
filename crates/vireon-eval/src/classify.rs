//! Per-field evaluation, pattern classification, and spectral drift.

use std::fmt;

use vireon_core::Field;

use crate::spectral::{anisotropy, radial_average, structure_factor};
use crate::stats::{kl_divergence, localization};

/// Thresholds used by [`classify_pattern`] and [`eval_field`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EvalConfig {
    /// Localization quantile: energy share of the top `1 − loc_q` pixels.
    pub loc_q: f64,
    /// Anisotropy at or above which a pattern is labelled stripes.
    pub anisotropy_stripe: f64,
    /// Localization at or above which a pattern is labelled radial.
    pub localization_radial: f64,
    /// Standard deviation at or below which a field is blank.
    pub blank_std: f64,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            loc_q: 0.95,
            anisotropy_stripe: 0.25,
            localization_radial: 0.65,
            blank_std: 1e-6,
        }
    }
}

/// Coarse morphology of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatternLabel {
    /// Isotropic, spread-out structure.
    Spots,
    /// Strong directional bias.
    Stripes,
    /// Energy concentrated in few pixels.
    Radial,
    /// Near-constant field.
    Blank,
    /// The field could not be classified (non-finite values).
    Unknown,
}

impl PatternLabel {
    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spots => "spots",
            Self::Stripes => "stripes",
            Self::Radial => "radial",
            Self::Blank => "blank",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PatternLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label a field given its structure factor `s`.
///
/// Checks in order: blank (std), stripes (anisotropy), radial
/// (localization), else spots. Never returns [`PatternLabel::Unknown`].
pub fn classify_pattern(s: &Field, field: &Field, cfg: &EvalConfig) -> PatternLabel {
    if field.std() <= cfg.blank_std {
        return PatternLabel::Blank;
    }
    if anisotropy(s) >= cfg.anisotropy_stripe {
        return PatternLabel::Stripes;
    }
    if localization(field, cfg.loc_q) >= cfg.localization_radial {
        return PatternLabel::Radial;
    }
    PatternLabel::Spots
}

/// Spectral and spatial metrics of one field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldMetrics {
    /// Dominant wavelength in index units; NaN when undefined.
    pub lambda_star: f64,
    /// Spectral anisotropy index.
    pub anisotropy: f64,
    /// Energy localization index.
    pub localization: f64,
    /// Pattern label.
    pub label: PatternLabel,
}

impl FieldMetrics {
    /// Metrics of a field that cannot be evaluated.
    pub fn unusable() -> Self {
        Self {
            lambda_star: f64::NAN,
            anisotropy: f64::NAN,
            localization: f64::NAN,
            label: PatternLabel::Unknown,
        }
    }
}

/// Compute [`FieldMetrics`] for `field`.
///
/// A field holding any non-finite value yields [`FieldMetrics::unusable`].
pub fn eval_field(field: &Field, cfg: &EvalConfig) -> FieldMetrics {
    if !field.is_finite() {
        return FieldMetrics::unusable();
    }
    let s = structure_factor(field);
    let profile = radial_average(&s);
    FieldMetrics {
        lambda_star: profile.peak_wavelength(),
        anisotropy: anisotropy(&s),
        localization: localization(field, cfg.loc_q),
        label: classify_pattern(&s, field, cfg),
    }
}

/// Structure factor clamped to `≥ 0` and normalized to unit mass.
fn spectral_distribution(field: &Field) -> Vec<f64> {
    let mut s = structure_factor(field).into_vec();
    let mut mass = 0.0;
    for v in &mut s {
        *v = v.max(0.0);
        mass += *v;
    }
    let mass = f64::max(mass, 1e-12);
    for v in &mut s {
        *v /= mass;
    }
    s
}

/// Mean KL divergence from each earlier field's spectrum to the last one.
///
/// Returns NaN if any field holds a non-finite value, otherwise 0 for
/// fewer than two fields.
///
/// # Panics
///
/// Panics if the fields differ in size.
pub fn eval_time_drift(fields: &[&Field]) -> f64 {
    if !fields.iter().all(|f| f.is_finite()) {
        return f64::NAN;
    }
    let Some((last, earlier)) = fields.split_last() else {
        return 0.0;
    };
    if earlier.is_empty() {
        return 0.0;
    }

    let target = spectral_distribution(last);
    let total: f64 = earlier
        .iter()
        .map(|f| kl_divergence(&spectral_distribution(f), &target))
        .sum();
    total / earlier.len() as f64
}
