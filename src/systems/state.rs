//! Phase State and Trajectory
//!
//! A phase state is the pair (Z, Σ) in the unit square:
//!
//! - Z: trap strength
//! - Σ: entropy escape
//!
//! All rules in this crate act on the offset from the center (0.5, 0.5),
//! so the distance from center doubles as the "energy" of a loop.

use ndarray::{Array1, Array2};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::boundary::{BoundaryPolicy, Bounds};

/// Center of the phase square
pub const CENTER: f64 = 0.5;

/// Relative amplitude drift below which a loop counts as conserved
pub const AMPLITUDE_DRIFT_TOLERANCE: f64 = 0.02;

/// A point (Z, Σ) in phase space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseState {
    /// Trap strength Z
    pub z: f64,
    /// Entropy escape Σ
    pub sigma: f64,
}

impl PhaseState {
    pub fn new(z: f64, sigma: f64) -> Self {
        Self { z, sigma }
    }

    /// The center (0.5, 0.5)
    pub fn center() -> Self {
        Self::new(CENTER, CENTER)
    }

    /// State at a given offset from the center
    pub fn from_offset(dz: f64, dsigma: f64) -> Self {
        Self::new(CENTER + dz, CENTER + dsigma)
    }

    /// Centered coordinates (Z - 0.5, Σ - 0.5)
    pub fn offset(&self) -> (f64, f64) {
        (self.z - CENTER, self.sigma - CENTER)
    }

    pub fn distance_from_center(&self) -> f64 {
        self.distance_to(&Self::center())
    }

    pub fn distance_to(&self, other: &PhaseState) -> f64 {
        let dz = self.z - other.z;
        let ds = self.sigma - other.sigma;
        (dz * dz + ds * ds).sqrt()
    }

    /// Linear pull toward `target`: x ← (1 - λ)·x + λ·target
    pub fn pulled_toward(&self, target: &PhaseState, strength: f64) -> Self {
        let keep = 1.0 - strength;
        Self::new(
            keep * self.z + strength * target.z,
            keep * self.sigma + strength * target.sigma,
        )
    }

    /// Display-only shear: Z is tilted by Σ's offset, then clipped to the square.
    ///
    /// Never feed the result back into the dynamics.
    pub fn sheared(&self, shear: f64) -> Self {
        let (u, v) = self.offset();
        Self::new(
            (CENTER + u + shear * v).clamp(0.0, 1.0),
            (CENTER + v).clamp(0.0, 1.0),
        )
    }

    /// Add Gaussian jitter to both coordinates, then bring them back with `policy`.
    ///
    /// A negative or NaN `noise_std` leaves the state untouched.
    pub fn perturbed<R: Rng + ?Sized>(
        &self,
        noise_std: f64,
        policy: BoundaryPolicy,
        rng: &mut R,
    ) -> Self {
        let normal = match Normal::new(0.0, noise_std) {
            Ok(n) => n,
            Err(_) => return *self,
        };
        let bounds = Bounds::unit();

        Self::new(
            policy.apply(self.z + normal.sample(rng), bounds),
            policy.apply(self.sigma + normal.sample(rng), bounds),
        )
    }

    pub fn is_within_unit_square(&self) -> bool {
        let unit = Bounds::unit();
        unit.contains(self.z) && unit.contains(self.sigma)
    }
}

impl Default for PhaseState {
    fn default() -> Self {
        Self::center()
    }
}

/// Amplitude diagnostics for a loop
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmplitudeReport {
    /// Distance from center at the first sample
    pub initial: f64,
    /// Distance from center at the last sample
    pub final_amplitude: f64,
    /// |final - initial| / initial
    pub relative_drift: f64,
    /// Drift below 2%
    pub conserved: bool,
}

/// Ordered sequence of phase states, one per simulated step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    states: Vec<PhaseState>,
}

impl Trajectory {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            states: Vec::with_capacity(n),
        }
    }

    pub(crate) fn push(&mut self, state: PhaseState) {
        self.states.push(state);
    }

    /// Wrap an externally produced sequence (e.g. observational proxies)
    pub fn from_states(states: Vec<PhaseState>) -> Self {
        Self { states }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PhaseState> {
        self.states.iter()
    }

    pub fn first(&self) -> Option<&PhaseState> {
        self.states.first()
    }

    pub fn last(&self) -> Option<&PhaseState> {
        self.states.last()
    }

    /// Z(t) as a series
    pub fn z_series(&self) -> Array1<f64> {
        Array1::from_iter(self.states.iter().map(|s| s.z))
    }

    /// Σ(t) as a series
    pub fn sigma_series(&self) -> Array1<f64> {
        Array1::from_iter(self.states.iter().map(|s| s.sigma))
    }

    /// N × 2 point cloud (columns Z, Σ)
    pub fn to_points(&self) -> Array2<f64> {
        let n = self.states.len();
        let mut points = Array2::zeros((n, 2));

        for (i, s) in self.states.iter().enumerate() {
            points[[i, 0]] = s.z;
            points[[i, 1]] = s.sigma;
        }

        points
    }

    pub fn distances_from_center(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.distance_from_center()).collect()
    }

    /// Every `stride`-th sample, for rendering. A stride of 0 is treated as 1.
    pub fn stride(&self, stride: usize) -> Trajectory {
        let stride = stride.max(1);
        Self {
            states: self.states.iter().step_by(stride).copied().collect(),
        }
    }

    /// Compare first and last distance from center
    pub fn amplitude_report(&self) -> Option<AmplitudeReport> {
        let initial = self.first()?.distance_from_center();
        let final_amplitude = self.last()?.distance_from_center();
        let relative_drift = (final_amplitude - initial).abs() / (initial + 1e-12);

        Some(AmplitudeReport {
            initial,
            final_amplitude,
            relative_drift,
            conserved: relative_drift < AMPLITUDE_DRIFT_TOLERANCE,
        })
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a PhaseState;
    type IntoIter = std::slice::Iter<'a, PhaseState>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}
