//! The TRP score and its algebraic inversion.
//!
//! ```text
//! TRP = max(R, floor_R) · max(P, floor_P) / (max(T, 0)^k + ε)
//! ```
//!
//! `R` measures structure, `P` coherence, `T` elapsed simulation time, and
//! `k` is the configured time exponent.

/// Constants of the TRP formula.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrpConfig {
    /// Added to the time term so `T = 0` is finite.
    pub eps: f64,
    /// Exponent `k` applied to elapsed time.
    pub time_power: f64,
    /// Lower bound applied to `R`.
    pub result_floor: f64,
    /// Lower bound applied to `P`.
    pub product_floor: f64,
}

impl Default for TrpConfig {
    fn default() -> Self {
        Self {
            eps: 1e-9,
            time_power: 1.0,
            result_floor: 1e-12,
            product_floor: 1e-12,
        }
    }
}

/// Floor applied to `R·P` in [`e_current`].
const RP_FLOOR: f64 = 1e-12;

/// Time-discounted score of structure `r` and coherence `p` after time `t`.
///
/// Non-increasing in `t` for fixed `r`, `p`.
pub fn trp_score(r: f64, p: f64, t: f64, cfg: &TrpConfig) -> f64 {
    let r = r.max(cfg.result_floor);
    let p = p.max(cfg.product_floor);
    let t = t.max(0.0);
    r * p / (t.powf(cfg.time_power) + cfg.eps)
}

/// Inverse efficiency `(T + ε) / max(R·P, 1e-12)`; lower is better.
pub fn e_current(r: f64, p: f64, t: f64, cfg: &TrpConfig) -> f64 {
    (t + cfg.eps) / (r * p).max(RP_FLOOR)
}

/// The subset of `{R, P, T}` known to the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrpKnown {
    /// Structure, if known.
    pub r: Option<f64>,
    /// Coherence, if known.
    pub p: Option<f64>,
    /// Elapsed time, if known.
    pub t: Option<f64>,
}

impl TrpKnown {
    /// How many of the three quantities are known.
    pub fn count(&self) -> usize {
        [self.r, self.p, self.t].iter().filter(|v| v.is_some()).count()
    }
}

/// Result of [`trp_rotate`]: the score plus every quantity known or solved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrpSolution {
    /// The score the inversion was performed against.
    pub trp: f64,
    /// Structure, given or solved.
    pub r: Option<f64>,
    /// Coherence, given or solved.
    pub p: Option<f64>,
    /// Elapsed time, given or solved.
    pub t: Option<f64>,
}

/// Solve the TRP relation for the one unknown among `{R, P, T}`.
///
/// ```text
/// R = TRP · (T^k + ε) / P
/// P = TRP · (T^k + ε) / R
/// T = (R·P / TRP − ε)^(1/k)
/// ```
///
/// Floors are not applied, so inversion is exact only for inputs above
/// them. With fewer than two known quantities nothing is inferred and the
/// given inputs are echoed back. When all three are given they are echoed
/// unchanged.
pub fn trp_rotate(trp: f64, known: TrpKnown, cfg: &TrpConfig) -> TrpSolution {
    let mut out = TrpSolution {
        trp,
        r: known.r,
        p: known.p,
        t: known.t,
    };
    if known.count() != 2 {
        return out;
    }

    let k = cfg.time_power;
    match (known.r, known.p, known.t) {
        (None, Some(p), Some(t)) => out.r = Some(trp * (t.powf(k) + cfg.eps) / p),
        (Some(r), None, Some(t)) => out.p = Some(trp * (t.powf(k) + cfg.eps) / r),
        (Some(r), Some(p), None) => out.t = Some((r * p / trp - cfg.eps).powf(1.0 / k)),
        _ => {}
    }
    out
}
