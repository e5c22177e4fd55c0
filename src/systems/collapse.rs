//! Corner Collapse: Square Clocks With a Corner-Gated Restoring Impulse
//!
//! The two axes keep their independent drives. While the pre-step state
//! sits in a symmetric corner, both velocities receive a pull toward the
//! center:
//!
//!   dZ/dt += k·(½ - Z),   dΣ/dt += k·(½ - Σ)
//!
//! Outside the corners the motion is exactly the independent-clock motion.
//! With away-from-center drives the state runs into a corner, gets knocked
//! back across the threshold and is driven in again, so it locks onto the
//! corner edge instead of resting at the wall.

use serde::{Deserialize, Serialize};

use super::independent::{AxisDrive, IndependentClocks, SignSense};
use super::integrator::Proposal;
use super::state::{PhaseState, CENTER};
use crate::dwell::CornerRegion;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerCollapse {
    /// Drive on Z
    pub z: AxisDrive,
    /// Drive on Σ
    pub sigma: AxisDrive,
    /// Restoring rate k applied inside the corner
    pub k_collapse: f64,
    /// Symmetric corner threshold θ ∈ (0.5, 1)
    pub corner_threshold: f64,
}

impl CornerCollapse {
    pub fn new(clocks: IndependentClocks, k_collapse: f64, corner_threshold: f64) -> Self {
        Self {
            z: clocks.z,
            sigma: clocks.sigma,
            k_collapse,
            corner_threshold,
        }
    }

    /// Both axes pushed away from the center, Z faster than Σ
    pub fn edge_lock() -> Self {
        Self::new(
            IndependentClocks::new(
                AxisDrive::Sign { rate: 0.6, sense: SignSense::Away },
                AxisDrive::Sign { rate: 0.4, sense: SignSense::Away },
            ),
            2.5,
            0.9,
        )
    }

    pub fn clocks(&self) -> IndependentClocks {
        IndependentClocks::new(self.z, self.sigma)
    }

    pub fn region(&self) -> CornerRegion {
        CornerRegion::symmetric(self.corner_threshold)
    }

    pub fn propose(&self, state: PhaseState, dt: f64, time: f64) -> Proposal {
        let free = self.clocks().propose(state, time);
        if !self.region().contains(&state) {
            return free;
        }

        Proposal {
            z: free.z.kicked(self.k_collapse * (CENTER - state.z), dt),
            sigma: free.sigma.kicked(self.k_collapse * (CENTER - state.sigma), dt),
            dissipated: self.k_collapse != 0.0,
        }
    }
}

impl Default for CornerCollapse {
    fn default() -> Self {
        Self::edge_lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::AxisUpdate;
    use approx::assert_abs_diff_eq;

    fn velocities(p: &Proposal) -> (f64, f64) {
        match (p.z, p.sigma) {
            (AxisUpdate::Velocity(dz), AxisUpdate::Velocity(ds)) => (dz, ds),
            other => panic!("unexpected proposal {:?}", other),
        }
    }

    #[test]
    fn test_outside_corner_matches_independent_clocks() {
        let collapse = CornerCollapse::edge_lock();
        for s in [
            PhaseState::new(0.6, 0.4),
            PhaseState::new(0.95, 0.2),
            PhaseState::new(0.88, 0.95),
            PhaseState::new(0.5, 0.5),
        ] {
            let p = collapse.propose(s, 0.01, 0.0);
            assert_eq!(p, collapse.clocks().propose(s, 0.0));
            assert!(!p.dissipated);
        }
    }

    #[test]
    fn test_impulse_fires_inside_corner() {
        let collapse = CornerCollapse::edge_lock();

        let (dz, ds) = velocities(&collapse.propose(PhaseState::new(0.95, 0.92), 0.01, 0.0));
        assert_abs_diff_eq!(dz, 0.6 - 2.5 * 0.45, epsilon = 1e-12);
        assert_abs_diff_eq!(ds, 0.4 - 2.5 * 0.42, epsilon = 1e-12);

        // low-low corner: the impulse points up, against the away drive
        let p = collapse.propose(PhaseState::new(0.05, 0.08), 0.01, 0.0);
        assert!(p.dissipated);
        let (dz, ds) = velocities(&p);
        assert_abs_diff_eq!(dz, -0.6 + 2.5 * 0.45, epsilon = 1e-12);
        assert_abs_diff_eq!(ds, -0.4 + 2.5 * 0.42, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_k_never_dissipates() {
        let collapse = CornerCollapse { k_collapse: 0.0, ..CornerCollapse::edge_lock() };
        let s = PhaseState::new(0.95, 0.95);
        let p = collapse.propose(s, 0.01, 0.0);
        assert!(!p.dissipated);
        assert_eq!(p.z, collapse.clocks().propose(s, 0.0).z);
    }
}
