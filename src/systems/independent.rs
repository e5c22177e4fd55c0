//! Independent Clocks: Bounded Phase-Space Regime (BPSR)
//!
//! Z and Σ evolve with no cross-term. Each axis runs its own "clock":
//!
//! - **Sign**:      dx/dt = r·sign(x - ½)   (away)  or r·sign(½ - x) (toward)
//! - **Linear**:    dx/dt = r·(x - ½)       (away)  or r·(½ - x)     (toward)
//! - **Constant**:  dx/dt = v
//! - **Sawtooth**:  x(t) = (t / T) mod 1
//! - **Sine**:      x(t) = ½ + ½·sin(ωt + φ)   or ½ + ½·|sin(ωt + φ)| (rectified)
//!
//! The last two are closed forms: the position is recomputed from the
//! elapsed time, not integrated. Combined with the boundary policies this
//! produces the square traversal every other regime is compared against.

use serde::{Deserialize, Serialize};

use super::integrator::{AxisUpdate, Proposal};
use super::state::{PhaseState, CENTER};

/// Direction of a center-relative drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignSense {
    /// Pushes toward 0.5
    Toward,
    /// Pushes away from 0.5
    Away,
}

impl SignSense {
    /// Signed distance in the driving direction
    fn displacement(self, x: f64) -> f64 {
        match self {
            SignSense::Toward => CENTER - x,
            SignSense::Away => x - CENTER,
        }
    }
}

/// Clock driving a single axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisDrive {
    /// Fixed-speed push toward or away from the center
    Sign { rate: f64, sense: SignSense },
    /// Push proportional to the offset from the center
    Linear { rate: f64, sense: SignSense },
    /// Constant clock velocity
    Constant { velocity: f64 },
    /// Closed-form ramp with the given period
    Sawtooth { period: f64 },
    /// Closed-form sinusoid about the center; rectified keeps it in [½, 1]
    Sine {
        angular_frequency: f64,
        phase: f64,
        #[serde(default)]
        rectified: bool,
    },
}

impl AxisDrive {
    /// Update for coordinate `x` producing the sample at elapsed `time`
    pub fn update(&self, x: f64, time: f64) -> AxisUpdate {
        match *self {
            AxisDrive::Sign { rate, sense } => {
                AxisUpdate::Velocity(rate * sign(sense.displacement(x)))
            }
            AxisDrive::Linear { rate, sense } => {
                AxisUpdate::Velocity(rate * sense.displacement(x))
            }
            AxisDrive::Constant { velocity } => AxisUpdate::Velocity(velocity),
            AxisDrive::Sawtooth { period } => {
                if period > 0.0 {
                    AxisUpdate::Position((time / period).rem_euclid(1.0))
                } else {
                    AxisUpdate::Position(0.0)
                }
            }
            AxisDrive::Sine { angular_frequency, phase, rectified } => {
                let wave = (angular_frequency * time + phase).sin();
                let wave = if rectified { wave.abs() } else { wave };
                AxisUpdate::Position(CENTER + 0.5 * wave)
            }
        }
    }

    pub fn is_closed_form(&self) -> bool {
        matches!(self, AxisDrive::Sawtooth { .. } | AxisDrive::Sine { .. })
    }
}

/// sign with sign(0) = 0
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Two uncoupled clocks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndependentClocks {
    /// Drive on Z
    pub z: AxisDrive,
    /// Drive on Σ
    pub sigma: AxisDrive,
}

impl IndependentClocks {
    pub fn new(z: AxisDrive, sigma: AxisDrive) -> Self {
        Self { z, sigma }
    }

    /// Sign drives: Z toward the center, Σ away from it
    pub fn sign_square() -> Self {
        Self::new(
            AxisDrive::Sign { rate: 1.0, sense: SignSense::Toward },
            AxisDrive::Sign { rate: 1.0, sense: SignSense::Away },
        )
    }

    /// Constant clock velocities; pair with reflecting walls
    pub fn reflecting_square(rate_z: f64, rate_sigma: f64) -> Self {
        Self::new(
            AxisDrive::Constant { velocity: rate_z },
            AxisDrive::Constant { velocity: rate_sigma },
        )
    }

    /// Closed-form sawtooth clocks with periods Tz, TΣ
    pub fn periodic(period_z: f64, period_sigma: f64) -> Self {
        Self::new(
            AxisDrive::Sawtooth { period: period_z },
            AxisDrive::Sawtooth { period: period_sigma },
        )
    }

    pub fn propose(&self, state: PhaseState, time: f64) -> Proposal {
        Proposal {
            z: self.z.update(state.z, time),
            sigma: self.sigma.update(state.sigma, time),
            dissipated: false,
        }
    }
}

impl Default for IndependentClocks {
    fn default() -> Self {
        Self::sign_square()
    }
}
