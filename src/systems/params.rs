//! Regime Parameters: Immutable Run Configuration
//!
//! One record per run, passed by value into the simulation. The
//! interactive layer owns any mutable slider state and re-runs the
//! simulation on every change.

use serde::{Deserialize, Serialize};

use super::collapse::CornerCollapse;
use super::coupling::ConservativeCoupling;
use super::independent::{AxisDrive, IndependentClocks};
use super::quench::CornerQuench;
use super::regime::RegimeRule;
use super::state::PhaseState;
use crate::boundary::BoundaryPolicy;
use crate::error::{invalid_config, Result};

/// Full configuration of one simulation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeParams {
    /// Number of steps (= trajectory length)
    pub steps: usize,
    /// Fixed time increment
    pub dt: f64,
    /// Starting point (not part of the trajectory)
    #[serde(default)]
    pub initial: PhaseState,
    /// Boundary handling for every coordinate
    #[serde(default)]
    pub boundary: BoundaryPolicy,
    /// Transition rule
    pub regime: RegimeRule,
}

impl RegimeParams {
    pub fn new(steps: usize, dt: f64, initial: PhaseState, boundary: BoundaryPolicy, regime: RegimeRule) -> Self {
        Self {
            steps,
            dt,
            initial,
            boundary,
            regime,
        }
    }

    /// Toy 1: sign-driven square, clamped walls
    pub fn square_default() -> Self {
        Self::new(
            4000,
            0.02,
            PhaseState::new(0.6, 0.4),
            BoundaryPolicy::Clamp,
            IndependentClocks::sign_square().into(),
        )
    }

    /// Toy 1 variant: constant clocks between reflecting walls
    pub fn reflecting_square_default() -> Self {
        Self::new(
            15000,
            0.01,
            PhaseState::new(0.62, 0.41),
            BoundaryPolicy::Reflect,
            IndependentClocks::reflecting_square(1.0, 1.31).into(),
        )
    }

    /// Toy 2: closed loops, ω = 4, kick (0.18, 0)
    pub fn closed_loop_default() -> Self {
        Self::new(
            20000,
            0.01,
            PhaseState::from_offset(0.18, 0.0),
            BoundaryPolicy::Clamp,
            ConservativeCoupling::default().into(),
        )
    }

    /// Toy 3: a 0.49 loop that reaches the 0.8 corners, 1% quench per corner step
    pub fn corner_quench_default() -> Self {
        Self::new(
            15000,
            0.01,
            PhaseState::from_offset(0.49, 0.0),
            BoundaryPolicy::Clamp,
            CornerQuench::default().into(),
        )
    }

    /// Toy 3 variant: away-driven square with a restoring impulse in the 0.9 corners
    pub fn corner_collapse_default() -> Self {
        Self::new(
            5000,
            0.01,
            PhaseState::new(0.6, 0.55),
            BoundaryPolicy::Clamp,
            CornerCollapse::edge_lock().into(),
        )
    }

    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    pub fn with_initial(mut self, initial: PhaseState) -> Self {
        self.initial = initial;
        self
    }

    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_regime(mut self, regime: impl Into<RegimeRule>) -> Self {
        self.regime = regime.into();
        self
    }

    /// dt actually used for stepping: non-positive or non-finite dt freezes the run
    pub fn effective_dt(&self) -> f64 {
        if self.dt > 0.0 && self.dt.is_finite() {
            self.dt
        } else {
            0.0
        }
    }

    /// Report the first degenerate setting.
    ///
    /// Simulation never calls this; degenerate settings still produce a
    /// defined trajectory.
    pub fn validate(&self) -> Result<()> {
        if self.steps == 0 {
            return Err(invalid_config("steps must be > 0"));
        }
        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(invalid_config(format!("dt must be positive and finite, got {}", self.dt)));
        }
        if !self.initial.is_within_unit_square() {
            return Err(invalid_config(format!(
                "initial state ({}, {}) lies outside the unit square",
                self.initial.z, self.initial.sigma
            )));
        }

        match &self.regime {
            RegimeRule::Independent(clocks) => validate_clocks(clocks)?,
            RegimeRule::ConservativeCoupling(_) => {}
            RegimeRule::CornerQuench(quench) => {
                validate_threshold(quench.corner_threshold)?;
                if !(0.0..=1.0).contains(&quench.quench_strength) {
                    return Err(invalid_config(format!(
                        "quench strength must lie in [0, 1], got {}",
                        quench.quench_strength
                    )));
                }
            }
            RegimeRule::CornerCollapse(collapse) => {
                validate_clocks(&collapse.clocks())?;
                validate_threshold(collapse.corner_threshold)?;
                if !(collapse.k_collapse >= 0.0) {
                    return Err(invalid_config(format!(
                        "collapse rate must be >= 0, got {}",
                        collapse.k_collapse
                    )));
                }
            }
        }

        Ok(())
    }
}

fn validate_clocks(clocks: &IndependentClocks) -> Result<()> {
    for (axis, drive) in [("z", clocks.z), ("sigma", clocks.sigma)] {
        if let AxisDrive::Sawtooth { period } = drive {
            if !(period > 0.0) {
                return Err(invalid_config(format!(
                    "{} sawtooth period must be > 0, got {}",
                    axis, period
                )));
            }
        }
    }
    Ok(())
}

fn validate_threshold(threshold: f64) -> Result<()> {
    if !(threshold > 0.5 && threshold < 1.0) {
        return Err(invalid_config(format!(
            "corner threshold must lie in (0.5, 1), got {}",
            threshold
        )));
    }
    Ok(())
}

impl Default for RegimeParams {
    fn default() -> Self {
        Self::square_default()
    }
}
