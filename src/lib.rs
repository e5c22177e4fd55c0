//! # Bounded Phase Toys
//!
//! Small deterministic dynamical systems on the phase square
//! (Z, Σ) ∈ [0, 1]², with corner-dwell diagnostics for stability.
//!
//! ## Variables
//!
//! - **Z**: trap strength
//! - **Σ**: entropy escape
//!
//! ## Regimes
//!
//! 1. **Independent clocks (BPSR)**: Z and Σ evolve with no cross-term and
//!    trace out the square. The reference regime.
//!
//! 2. **Conservative coupling**: exact rotation about (½, ½),
//!
//!      (u, v) ↦ (u cos θ + v sin θ, -u sin θ + v cos θ),  θ = ω·dt
//!
//!    The distance from center is invariant to floating-point precision.
//!
//! 3. **Corner quench**: the same rotation, plus a pull toward a target
//!    applied only while the state is in a corner:
//!
//!      x ← (1 - q)·x + q·x_target
//!
//!    A collapse variant keeps the independent clocks and adds a restoring
//!    impulse k·(½ - x) to both velocities while in a corner.
//!
//! ## Corner Dwell
//!
//! A state is in a corner when (Z > θ and Σ > θ) or (Z < 1-θ and Σ < 1-θ).
//! Dwell fraction, entry count and longest run are reduced from the per-step
//! flags, and the fraction is reported as stable (< 5%), pre-instability
//! (< 15%) or high instability.
//!
//! ## Example
//!
//! ```
//! use bounded_phase_toys::{simulate, classify, dwell_stats, RegimeParams};
//!
//! let params = RegimeParams::corner_quench_default().with_steps(2000);
//! let trajectory = simulate(&params);
//! let stats = dwell_stats(&classify(&trajectory, 0.8));
//!
//! assert_eq!(trajectory.len(), 2000);
//! assert!(stats.entry_count <= stats.dwell_count);
//! ```

pub mod error;
pub mod boundary;
pub mod systems;
pub mod dwell;
pub mod observation;
pub mod telemetry;

pub use error::{Result, ToyError};

// Re-exports from boundary
pub use boundary::{
    BoundaryPolicy,
    BoundaryFn,
    Bounds,
    clamp,
    reflect,
    wrap,
};

// Re-exports from systems
pub use systems::{
    // Traits
    DynamicalSystem,
    // State
    PhaseState,
    Trajectory,
    AmplitudeReport,
    // Integrator
    AxisUpdate,
    Proposal,
    integrate,
    step,
    // Regimes
    AxisDrive,
    SignSense,
    IndependentClocks,
    ConservativeCoupling,
    rotate_about_center,
    CornerQuench,
    QuenchTarget,
    CornerCollapse,
    RegimeRule,
    RegimeParams,
    // Running
    PhaseSimulator,
    simulate,
};

// Re-exports from dwell
pub use dwell::{
    CornerRegion,
    CornerRun,
    DwellStats,
    DwellTracker,
    StabilityBand,
    classify,
    corner_flags,
    corner_runs,
    dwell_stats,
};

// Re-exports from observation
pub use observation::{
    ProxyConfig,
    ProxyReport,
    derive_proxies,
};
