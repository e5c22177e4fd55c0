//! Systems Module: Phase-Space Toy Dynamics
//!
//! Implements the three toy regimes on the (Z, Σ) unit square:
//!
//! - **Independent clocks** (Toy 1): bounded square traversal, no coupling
//! - **Conservative coupling** (Toy 2): exact rotation, closed loops
//! - **Corner quench** (Toy 3): rotation plus dissipation inside corners
//! - **Corner collapse** (Toy 3 variant): square clocks plus a restoring
//!   impulse inside corners
//!
//! Control flow per step:
//!
//! ```text
//! RegimeRule::propose ──► integrate (Euler / closed form) ──► boundary fn
//! ```
//!
//! The full trajectory is then handed to [`crate::dwell`] for read-only
//! corner statistics.

mod traits;
mod state;
mod integrator;
mod independent;
mod coupling;
mod quench;
mod collapse;
mod regime;
mod params;
mod simulator;

pub use traits::DynamicalSystem;
pub use state::{PhaseState, Trajectory, AmplitudeReport, CENTER, AMPLITUDE_DRIFT_TOLERANCE};
pub use integrator::{AxisUpdate, Proposal, integrate, step};
pub use independent::{AxisDrive, IndependentClocks, SignSense};
pub use coupling::{ConservativeCoupling, rotate_about_center};
pub use quench::{CornerQuench, QuenchTarget};
pub use collapse::CornerCollapse;
pub use regime::RegimeRule;
pub use params::RegimeParams;
pub use simulator::{PhaseSimulator, simulate};
