//! Light-Curve Proxies and Quench Timing
//!
//! Pipeline:
//!
//! 1. flux ← flux / median(flux)
//! 2. Σ = (flux - min) / (max - min)
//! 3. dΣ/dt = ∇Σ / ∇t
//! 4. Z = clip(1 - |dΣ/dt| / max|dΣ/dt|, 0, 1)
//! 5. corner: Z > z_above and Σ < sigma_below
//! 6. quench: argmax |d²Σ/dt²|
//!
//! ∇ is the unit-spacing gradient: central differences inside, one-sided
//! differences at both ends.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dwell::{corner_flags, dwell_stats, CornerRegion, DwellStats};
use crate::error::{Result, ToyError};
use crate::systems::{PhaseState, Trajectory};

/// Minimum samples for second differences
const MIN_SAMPLES: usize = 3;

/// Thresholds of the observational corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Z must exceed this
    pub z_above: f64,
    /// Σ must stay below this. Defaults to 0.2; the full light-curve
    /// pipeline has also been run with 0.25, which widens the corner.
    pub sigma_below: f64,
}

impl ProxyConfig {
    pub fn region(&self) -> CornerRegion {
        CornerRegion::TrapHighEscapeLow {
            z_above: self.z_above,
            sigma_below: self.sigma_below,
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            z_above: 0.7,
            sigma_below: 0.2,
        }
    }
}

/// Proxies and corner diagnostics of one light curve
#[derive(Debug, Clone)]
pub struct ProxyReport {
    /// Sample times
    pub time: Array1<f64>,
    /// (Z, Σ) per sample
    pub trajectory: Trajectory,
    /// Per-sample corner membership
    pub corner_flags: Vec<bool>,
    /// Corner residency
    pub stats: DwellStats,
    /// dwell count × median sample spacing
    pub dwell_time: f64,
    /// Sample of maximal |d²Σ/dt²|
    pub quench_index: usize,
    /// Time at `quench_index`
    pub quench_time: f64,
}

/// Unit-spacing gradient. Fewer than two samples give zeros.
pub fn gradient(values: &Array1<f64>) -> Array1<f64> {
    let n = values.len();
    let mut grad = Array1::zeros(n);

    if n < 2 {
        return grad;
    }

    grad[0] = values[1] - values[0];
    grad[n - 1] = values[n - 1] - values[n - 2];
    for i in 1..n - 1 {
        grad[i] = (values[i + 1] - values[i - 1]) / 2.0;
    }

    grad
}

/// Median ignoring NaN; NaN if nothing is left
pub fn median(values: &Array1<f64>) -> f64 {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|x| !x.is_nan()).collect();
    if sorted.is_empty() {
        return f64::NAN;
    }
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Index of the largest value, first on ties, NaN skipped
fn argmax(values: &Array1<f64>) -> usize {
    let mut best = 0;
    let mut best_value = f64::NEG_INFINITY;

    for (i, &v) in values.iter().enumerate() {
        if v > best_value {
            best = i;
            best_value = v;
        }
    }

    best
}

/// Derive (Z, Σ) proxies, corner dwell and quench time from a light curve
///
/// # Arguments
/// * `time` - Sample times (any monotone unit)
/// * `flux` - Smoothed flux, same length as `time`
/// * `config` - Observational corner thresholds
pub fn derive_proxies(time: &Array1<f64>, flux: &Array1<f64>, config: &ProxyConfig) -> Result<ProxyReport> {
    if time.len() != flux.len() {
        return Err(ToyError::LengthMismatch {
            time: time.len(),
            flux: flux.len(),
        });
    }
    if time.len() < MIN_SAMPLES {
        return Err(ToyError::InsufficientData {
            needed: MIN_SAMPLES,
            got: time.len(),
        });
    }

    let normalized = flux / median(flux);

    let lo = normalized.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = normalized.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = hi - lo;
    let sigma = if range > 0.0 {
        normalized.mapv(|f| (f - lo) / range)
    } else {
        Array1::zeros(normalized.len())
    };

    let spacing = gradient(time);
    let d_sigma = gradient(&sigma) / &spacing;
    let d2_sigma = gradient(&d_sigma) / &spacing;

    let peak_slope = d_sigma.iter().map(|d| d.abs()).fold(0.0, f64::max);
    let z = if peak_slope > 0.0 {
        d_sigma.mapv(|d| (1.0 - d.abs() / peak_slope).clamp(0.0, 1.0))
    } else {
        Array1::ones(d_sigma.len())
    };

    let trajectory = Trajectory::from_states(
        z.iter()
            .zip(sigma.iter())
            .map(|(&z, &s)| PhaseState::new(z, s))
            .collect(),
    );

    let flags = corner_flags(&trajectory, &config.region());
    let stats = dwell_stats(&flags);
    let dwell_time = stats.dwell_time(median(&spacing));

    let quench_index = argmax(&d2_sigma.mapv(f64::abs));
    let quench_time = time[quench_index];

    debug!(
        samples = time.len(),
        dwell_fraction = stats.dwell_fraction,
        quench_index,
        "derived light-curve proxies"
    );

    Ok(ProxyReport {
        time: time.clone(),
        trajectory,
        corner_flags: flags,
        stats,
        dwell_time,
        quench_index,
        quench_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_gradient_edges_and_interior() {
        let g = gradient(&array![1.0, 2.0, 4.0, 7.0]);
        assert_eq!(g.to_vec(), vec![1.0, 1.5, 2.5, 3.0]);
        assert_eq!(gradient(&array![5.0]).to_vec(), vec![0.0]);
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&array![3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&array![4.0, 1.0, 2.0, 3.0]), 2.5);
        assert_eq!(median(&array![f64::NAN, 1.0, 3.0]), 2.0);
        assert!(median(&Array1::<f64>::zeros(0)).is_nan());
    }

    #[test]
    fn test_plateau_then_rise() {
        let time = Array1::from_iter((0..11).map(|i| i as f64));
        let flux = array![1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

        let report = derive_proxies(&time, &flux, &ProxyConfig::default()).unwrap();

        assert_eq!(report.trajectory.len(), 11);
        assert_eq!(
            report.corner_flags,
            vec![true, true, true, true, true, false, false, false, false, false, false]
        );
        assert_eq!(report.stats.dwell_count, 5);
        assert_eq!(report.stats.entry_count, 1);
        assert_eq!(report.stats.max_run_length, 5);
        assert_abs_diff_eq!(report.dwell_time, 5.0, epsilon = 1e-12);
        assert_eq!(report.quench_index, 5);
        assert_abs_diff_eq!(report.quench_time, 5.0);

        let sigma = report.trajectory.sigma_series();
        assert_abs_diff_eq!(sigma[0], 0.0);
        assert_abs_diff_eq!(sigma[10], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_flux_is_full_trap() {
        let time = array![0.0, 0.5, 1.0, 1.5];
        let flux = array![2.0, 2.0, 2.0, 2.0];
        let report = derive_proxies(&time, &flux, &ProxyConfig::default()).unwrap();

        assert!(report.trajectory.iter().all(|s| s.z == 1.0 && s.sigma == 0.0));
        assert_eq!(report.stats.dwell_fraction, 1.0);
        assert_abs_diff_eq!(report.dwell_time, 2.0, epsilon = 1e-12);
        assert_eq!(report.quench_index, 0);
    }

    #[test]
    fn test_proxies_stay_in_square() {
        let time = Array1::from_iter((0..200).map(|i| i as f64 * 0.02));
        let flux = time.mapv(|t| 1.0 + 0.3 * (3.0 * t).sin() + 0.05 * t);
        let report = derive_proxies(&time, &flux, &ProxyConfig::default()).unwrap();
        assert!(report.trajectory.iter().all(|s| s.is_within_unit_square()));
    }

    #[test]
    fn test_default_corner_bounds() {
        let config = ProxyConfig::default();
        assert_eq!((config.z_above, config.sigma_below), (0.7, 0.2));

        let state = PhaseState::new(0.8, 0.22);
        assert!(!config.region().contains(&state));
        assert!(ProxyConfig { sigma_below: 0.25, ..config }.region().contains(&state));
    }

    #[test]
    fn test_input_errors() {
        let err = derive_proxies(&array![0.0, 1.0, 2.0], &array![1.0, 2.0], &ProxyConfig::default());
        assert!(matches!(err, Err(ToyError::LengthMismatch { time: 3, flux: 2 })));

        let err = derive_proxies(&array![0.0, 1.0], &array![1.0, 2.0], &ProxyConfig::default());
        assert!(matches!(err, Err(ToyError::InsufficientData { needed: 3, got: 2 })));
    }
}
