//! Distributional statistics: energy localization and KL divergence.

use vireon_core::Field;

/// Mass at or below which a distribution is treated as empty.
const MASS_EPS: f64 = 1e-12;

/// Fraction of total energy (`x²`) held by the highest-energy
/// `(1 − q)` share of pixels.
///
/// The top slice holds `clamp(round((1 − q) · size), 1, size)` pixels, so
/// at least one pixel is always counted. Returns 0 when the total energy
/// is at or below `1e-12`, and NaN for a non-finite field.
///
/// A uniform field scores `1 − q`, not `q`. The default thresholds
/// (`localization_radial = 0.65`, `min_localization = 0.40`) are
/// calibrated against this top-slice reading.
pub fn localization(field: &Field, q: f64) -> f64 {
    let mut energy: Vec<f64> = field.as_slice().iter().map(|v| v * v).collect();
    let total: f64 = energy.iter().sum();
    if !total.is_finite() {
        return f64::NAN;
    }
    if total <= MASS_EPS {
        return 0.0;
    }

    let size = energy.len();
    let k = ((1.0 - q) * size as f64).round().clamp(1.0, size as f64) as usize;
    energy.sort_unstable_by(f64::total_cmp);
    let top: f64 = energy[size - k..].iter().sum();
    (top / total).clamp(0.0, 1.0)
}

/// `D_KL(p ‖ q)` between two non-negative arrays.
///
/// Negative entries are clamped to 0 and both inputs are renormalized to
/// unit mass. Returns 0 when either mass is at or below `1e-12`. Logs are
/// taken of `max(x, 1e-12)`; the result is clamped at 0 to absorb
/// rounding.
///
/// # Panics
///
/// Panics if `p` and `q` differ in length.
pub fn kl_divergence(p: &[f64], q: &[f64]) -> f64 {
    assert_eq!(p.len(), q.len(), "kl_divergence: length mismatch");

    let sp: f64 = p.iter().map(|v| v.max(0.0)).sum();
    let sq: f64 = q.iter().map(|v| v.max(0.0)).sum();
    if sp <= MASS_EPS || sq <= MASS_EPS {
        return 0.0;
    }

    let kl: f64 = p
        .iter()
        .zip(q)
        .map(|(&pi, &qi)| {
            let pi = pi.max(0.0) / sp;
            let qi = qi.max(0.0) / sq;
            pi * (pi.max(MASS_EPS).ln() - qi.max(MASS_EPS).ln())
        })
        .sum();
    kl.max(0.0)
}
