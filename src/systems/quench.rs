//! Corner Quench: Rotation Plus Corner-Triggered Dissipation
//!
//! Each step first applies the exact conservative rotation, then checks
//! the rotated proposal against the corner region. Inside a corner the
//! state is pulled toward a target:
//!
//!   x ← (1 - q)·x + q·x_target,   q ∈ [0, 1]
//!
//! This is the only place energy leaves the system. q = 0 is pure
//! rotation; q = 1 snaps to the target on corner entry.
//!
//! The quench trigger may be evaluated on a sheared view of the proposal
//! (`view_shear`), which tilts the loop into the corners without
//! changing the stored coordinates. The view only gates the quench:
//! dwell statistics are always taken on the stored (Z, Σ).

use serde::{Deserialize, Serialize};

use super::coupling::rotate_about_center;
use super::integrator::Proposal;
use super::state::PhaseState;
use crate::dwell::CornerRegion;

/// Point the quench pulls toward
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuenchTarget {
    /// (0.5, 0.5)
    #[default]
    Center,
    /// (1, 1)
    HighCorner,
    /// (0, 0)
    LowCorner,
    /// Arbitrary point
    Point(PhaseState),
}

impl QuenchTarget {
    pub fn point(&self) -> PhaseState {
        match *self {
            QuenchTarget::Center => PhaseState::center(),
            QuenchTarget::HighCorner => PhaseState::new(1.0, 1.0),
            QuenchTarget::LowCorner => PhaseState::new(0.0, 0.0),
            QuenchTarget::Point(p) => p,
        }
    }
}

/// Closed loops that lose amplitude while inside a corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerQuench {
    /// Angular speed ω of the underlying rotation
    pub omega: f64,
    /// Symmetric corner threshold θ ∈ (0.5, 1)
    pub corner_threshold: f64,
    /// Pull fraction q per in-corner step
    pub quench_strength: f64,
    /// Where the pull points
    #[serde(default)]
    pub target: QuenchTarget,
    /// Shear of the view the corner test sees (0 = raw coordinates)
    #[serde(default)]
    pub view_shear: f64,
}

impl CornerQuench {
    pub fn new(omega: f64, corner_threshold: f64, quench_strength: f64) -> Self {
        Self {
            omega,
            corner_threshold,
            quench_strength,
            target: QuenchTarget::Center,
            view_shear: 0.0,
        }
    }

    pub fn with_target(mut self, target: QuenchTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_view_shear(mut self, shear: f64) -> Self {
        self.view_shear = shear;
        self
    }

    pub fn region(&self) -> CornerRegion {
        CornerRegion::symmetric(self.corner_threshold)
    }

    /// Quench strength restricted to [0, 1]; NaN passes through
    pub fn effective_strength(&self) -> f64 {
        self.quench_strength.clamp(0.0, 1.0)
    }

    /// Quench trigger, through the sheared view. Not the dwell classifier.
    pub fn in_corner(&self, state: &PhaseState) -> bool {
        if self.view_shear == 0.0 {
            self.region().contains(state)
        } else {
            self.region().contains(&state.sheared(self.view_shear))
        }
    }

    pub fn propose(&self, state: PhaseState, dt: f64) -> Proposal {
        let rotated = rotate_about_center(state, self.omega * dt);

        if self.in_corner(&rotated) {
            let pulled = rotated.pulled_toward(&self.target.point(), self.effective_strength());
            Proposal::position(pulled).with_dissipation(true)
        } else {
            Proposal::position(rotated)
        }
    }
}

impl Default for CornerQuench {
    fn default() -> Self {
        Self::new(3.0, 0.8, 0.01)
    }
}
