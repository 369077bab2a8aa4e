//! Frequency-domain metrics on a single field.
//!
//! Spectra are laid out with zero frequency at index `n/2` on both axes
//! (the `fftshift` convention). Radial and moment computations measure
//! distance from the geometric centre `(n − 1)/2`, in index units.

use std::f64::consts::PI;

use rustfft::num_complex::Complex64;
use rustfft::FftPlanner;
use vireon_core::Field;

/// Total spectral weight at or below which anisotropy is reported as 0.
const WEIGHT_EPS: f64 = 1e-12;

/// Radial bins skipped before the peak search.
const DC_BINS: usize = 3;

/// Minimum profile length for a meaningful peak.
const MIN_PROFILE_BINS: usize = 5;

/// `|FFT2(field − mean)|²`, recentred so zero frequency sits at `n/2`.
///
/// A non-finite input yields a non-finite spectrum.
pub fn structure_factor(field: &Field) -> Field {
    let n = field.n();
    if n == 0 {
        return Field::zeros(0);
    }

    let mean = field.mean();
    let mut rows: Vec<Complex64> = field
        .as_slice()
        .iter()
        .map(|&v| Complex64::new(v - mean, 0.0))
        .collect();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);

    // Row transforms over contiguous chunks, then column transforms on the
    // transpose.
    fft.process(&mut rows);
    let mut cols = vec![Complex64::new(0.0, 0.0); n * n];
    for r in 0..n {
        for c in 0..n {
            cols[c * n + r] = rows[r * n + c];
        }
    }
    fft.process(&mut cols);

    let half = n / 2;
    Field::from_fn(n, |r, c| {
        let kr = (r + n - half) % n;
        let kc = (c + n - half) % n;
        cols[kc * n + kr].norm_sqr()
    })
}

/// Mean spectral power per integer radius.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialProfile {
    /// Bin radii `0, 1, 2, ...` as reals.
    pub radii: Vec<f64>,
    /// Mean power in each bin.
    pub power: Vec<f64>,
}

impl RadialProfile {
    /// Number of bins.
    pub fn len(&self) -> usize {
        self.power.len()
    }

    /// True when there are no bins.
    pub fn is_empty(&self) -> bool {
        self.power.is_empty()
    }

    /// [`peak_wavelength`] of this profile.
    pub fn peak_wavelength(&self) -> f64 {
        peak_wavelength(&self.radii, &self.power)
    }
}

/// Average `s` over rings of equal `floor(distance)` from the centre.
///
/// Bins with no members average to 0.
pub fn radial_average(s: &Field) -> RadialProfile {
    let n = s.n();
    if n == 0 {
        return RadialProfile {
            radii: Vec::new(),
            power: Vec::new(),
        };
    }

    let centre = (n as f64 - 1.0) / 2.0;
    let bin_of = |r: usize, c: usize| {
        let dr = r as f64 - centre;
        let dc = c as f64 - centre;
        (dr * dr + dc * dc).sqrt() as usize
    };
    // Corners are farthest from the centre.
    let bins = bin_of(0, 0) + 1;

    let mut sum = vec![0.0; bins];
    let mut count = vec![0usize; bins];
    for r in 0..n {
        for c in 0..n {
            let b = bin_of(r, c);
            sum[b] += s[(r, c)];
            count[b] += 1;
        }
    }

    let power = sum
        .iter()
        .zip(&count)
        .map(|(&total, &cnt)| total / cnt.max(1) as f64)
        .collect();
    RadialProfile {
        radii: (0..bins).map(|b| b as f64).collect(),
        power,
    }
}

/// Dominant wavelength `2π / r_peak` from a radial profile, in index units.
///
/// The first three bins are skipped (fewer for short profiles) to avoid
/// the DC region. Returns NaN for profiles shorter than five bins, or when
/// the peak radius is not positive. NaN powers never win the search.
pub fn peak_wavelength(radii: &[f64], power: &[f64]) -> f64 {
    let len = power.len().min(radii.len());
    if len < MIN_PROFILE_BINS {
        return f64::NAN;
    }

    let start = DC_BINS.min(len - 1);
    let mut best = start;
    for i in start + 1..len {
        // Strict comparison keeps the first maximum.
        if power[i] > power[best] || (power[best].is_nan() && !power[i].is_nan()) {
            best = i;
        }
    }

    let k = radii[best];
    if k > 0.0 {
        2.0 * PI / k
    } else {
        f64::NAN
    }
}

/// Directional bias of a centred spectrum.
///
/// ```text
/// mxx = Σ w·(c − centre)² / Σ w      (w = max(S, 0))
/// myy = Σ w·(r − centre)² / Σ w
/// A   = |mxx − myy| / (mxx + myy + ε)
/// ```
///
/// Zero for isotropic spectra and when total weight is negligible.
pub fn anisotropy(s: &Field) -> f64 {
    let n = s.n();
    let centre = (n as f64 - 1.0) / 2.0;

    let mut z = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for r in 0..n {
        let dy = r as f64 - centre;
        for c in 0..n {
            let dx = c as f64 - centre;
            let w = s[(r, c)].max(0.0);
            z += w;
            sxx += w * dx * dx;
            syy += w * dy * dy;
        }
    }

    if z <= WEIGHT_EPS {
        return 0.0;
    }
    let mxx = sxx / z;
    let myy = syy / z;
    (mxx - myy).abs() / (mxx + myy + WEIGHT_EPS)
}
