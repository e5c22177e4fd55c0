//! State Integrator: One Explicit Step
//!
//! A regime rule proposes, per axis, either a velocity or a new position:
//!
//!   Velocity(v):  x' = x + dt·v      (forward Euler)
//!   Position(p):  x' = p             (closed form / exact map)
//!
//! The proposal is then passed through the boundary function, one
//! coordinate at a time. dt is fixed for the whole run.

use crate::boundary::BoundaryFn;

use super::params::RegimeParams;
use super::state::PhaseState;

/// What a rule says about one coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisUpdate {
    /// Derivative, integrated with forward Euler
    Velocity(f64),
    /// Directly computed next position
    Position(f64),
}

impl AxisUpdate {
    /// Unconstrained next value of `x`
    pub fn advance(self, x: f64, dt: f64) -> f64 {
        match self {
            AxisUpdate::Velocity(v) => x + dt * v,
            AxisUpdate::Position(p) => p,
        }
    }

    /// Add an extra velocity; a closed-form position takes one Euler step of it
    pub fn kicked(self, dv: f64, dt: f64) -> Self {
        match self {
            AxisUpdate::Velocity(v) => AxisUpdate::Velocity(v + dv),
            AxisUpdate::Position(p) => AxisUpdate::Position(p + dt * dv),
        }
    }
}

/// A rule's proposal for both coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proposal {
    pub z: AxisUpdate,
    pub sigma: AxisUpdate,
    /// The rule removed energy on this step
    pub dissipated: bool,
}

impl Proposal {
    pub fn velocity(dz: f64, dsigma: f64) -> Self {
        Self {
            z: AxisUpdate::Velocity(dz),
            sigma: AxisUpdate::Velocity(dsigma),
            dissipated: false,
        }
    }

    pub fn position(state: PhaseState) -> Self {
        Self {
            z: AxisUpdate::Position(state.z),
            sigma: AxisUpdate::Position(state.sigma),
            dissipated: false,
        }
    }

    pub fn with_dissipation(mut self, dissipated: bool) -> Self {
        self.dissipated = dissipated;
        self
    }
}

/// Apply a proposal and the boundary function to the unit square
pub fn integrate(state: PhaseState, proposal: &Proposal, dt: f64, boundary: BoundaryFn) -> PhaseState {
    let z = proposal.z.advance(state.z, dt);
    let sigma = proposal.sigma.advance(state.sigma, dt);

    PhaseState::new(boundary(z, 0.0, 1.0), boundary(sigma, 0.0, 1.0))
}

/// One full step: evaluate the regime rule, integrate, apply the boundary.
///
/// `time` is the elapsed time of the state being produced. The boundary
/// policy is resolved on every call; [`PhaseSimulator`](super::PhaseSimulator)
/// resolves it once per run instead.
pub fn step(state: PhaseState, params: &RegimeParams, time: f64) -> PhaseState {
    let dt = params.effective_dt();
    let proposal = params.regime.propose(state, dt, time);
    integrate(state, &proposal, dt, params.boundary.resolve())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::{clamp, reflect};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_euler_velocity() {
        let s = PhaseState::new(0.5, 0.5);
        let next = integrate(s, &Proposal::velocity(1.0, -2.0), 0.1, clamp);
        assert_abs_diff_eq!(next.z, 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(next.sigma, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_kick_on_both_update_kinds() {
        assert_eq!(AxisUpdate::Velocity(1.0).kicked(-0.5, 0.1), AxisUpdate::Velocity(0.5));
        match AxisUpdate::Position(0.3).kicked(2.0, 0.1) {
            AxisUpdate::Position(p) => assert_abs_diff_eq!(p, 0.5, epsilon = 1e-12),
            other => panic!("unexpected update {:?}", other),
        }
    }

    #[test]
    fn test_position_ignores_dt() {
        let s = PhaseState::new(0.1, 0.1);
        let next = integrate(s, &Proposal::position(PhaseState::new(0.7, 0.2)), 5.0, clamp);
        assert_eq!(next, PhaseState::new(0.7, 0.2));
    }

    #[test]
    fn test_step_uses_params() {
        // sign square: Z pushed toward 0.5, Σ pushed away
        let params = RegimeParams::square_default();
        let next = step(params.initial, &params, params.dt);
        assert_abs_diff_eq!(next.z, 0.58, epsilon = 1e-12);
        assert_abs_diff_eq!(next.sigma, 0.38, epsilon = 1e-12);
    }

    #[test]
    fn test_boundary_applied_per_coordinate() {
        let s = PhaseState::new(0.95, 0.05);
        let next = integrate(s, &Proposal::velocity(1.0, -1.0), 0.1, reflect);
        assert_abs_diff_eq!(next.z, 0.95, epsilon = 1e-12);
        assert_abs_diff_eq!(next.sigma, 0.05, epsilon = 1e-12);
    }
}
