//! Phase Simulator: Running a Regime for N Steps
//!
//! The boundary policy is resolved once when the simulator is built; each
//! step evaluates the regime rule, integrates, and applies the resolved
//! boundary function. A run is a single uninterrupted loop that owns its
//! trajectory.

use tracing::{debug, trace};

use crate::boundary::BoundaryFn;

use super::integrator::integrate;
use super::params::RegimeParams;
use super::state::{PhaseState, Trajectory};
use super::traits::DynamicalSystem;

/// Stepper for one regime configuration
pub struct PhaseSimulator {
    /// Run configuration
    params: RegimeParams,
    /// Resolved boundary function
    boundary: BoundaryFn,
    /// Step size actually used
    dt: f64,
    /// Current state
    state: PhaseState,
    /// Steps taken so far
    steps_taken: usize,
    /// Steps on which the rule dissipated
    quench_count: usize,
    /// Whether the most recent step dissipated
    last_quenched: bool,
}

impl PhaseSimulator {
    pub fn new(params: RegimeParams) -> Self {
        Self {
            boundary: params.boundary.resolve(),
            dt: params.effective_dt(),
            state: params.initial,
            params,
            steps_taken: 0,
            quench_count: 0,
            last_quenched: false,
        }
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Number of steps on which energy was removed
    pub fn quench_count(&self) -> usize {
        self.quench_count
    }

    pub fn last_step_quenched(&self) -> bool {
        self.last_quenched
    }

    /// Run the configured number of steps and collect every produced state
    pub fn trajectory(mut self) -> Trajectory {
        let steps = self.params.steps;
        let mut trajectory = Trajectory::with_capacity(steps);

        for _ in 0..steps {
            self.step();
            trajectory.push(self.state);
        }

        trajectory
    }
}

impl DynamicalSystem for PhaseSimulator {
    type State = PhaseState;

    fn step(&mut self) {
        let time = (self.steps_taken + 1) as f64 * self.dt;
        let proposal = self.params.regime.propose(self.state, self.dt, time);

        self.state = integrate(self.state, &proposal, self.dt, self.boundary);
        self.steps_taken += 1;

        if proposal.dissipated && !self.last_quenched {
            trace!(step = self.steps_taken, z = self.state.z, sigma = self.state.sigma, "corner entry");
        }
        if proposal.dissipated {
            self.quench_count += 1;
        }
        self.last_quenched = proposal.dissipated;
    }

    fn state(&self) -> PhaseState {
        self.state
    }

    fn time(&self) -> f64 {
        self.steps_taken as f64 * self.dt
    }

    fn order_parameter(&self) -> f64 {
        self.state.distance_from_center()
    }
}

/// Run a full simulation. Zero steps yields an empty trajectory.
pub fn simulate(params: &RegimeParams) -> Trajectory {
    debug!(
        regime = params.regime.name(),
        steps = params.steps,
        dt = params.dt,
        boundary = params.boundary.name(),
        "starting simulation"
    );

    let simulator = PhaseSimulator::new(*params);
    let trajectory = simulator.trajectory();

    debug!(samples = trajectory.len(), "simulation finished");
    trajectory
}
