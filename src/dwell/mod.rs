//! Dwell Module: Corner Classification and Residency Statistics
//!
//! Two diagonal corners of the phase square signal instability:
//!
//!   high-high:  Z > θ  and  Σ > θ
//!   low-low:    Z < 1-θ and Σ < 1-θ
//!
//! Given a trajectory, each step is flagged in/out of a corner and the
//! flags are reduced to:
//!
//! - dwell count (steps inside)
//! - dwell fraction (dwell count / total steps)
//! - entry count (maximal runs of consecutive in-corner steps)
//! - maximum run length
//!
//! Classification is read-only: nothing here feeds back into the dynamics.
//!
//! ## Reporting bands
//!
//! | fraction        | band              |
//! |-----------------|-------------------|
//! | < 0.05          | stable            |
//! | [0.05, 0.15)    | pre-instability   |
//! | ≥ 0.15          | high instability  |

mod region;
mod stats;
mod tracker;

pub use region::CornerRegion;
pub use stats::{
    DwellStats,
    StabilityBand,
    CornerRun,
    classify,
    corner_flags,
    corner_runs,
    dwell_stats,
};
pub use tracker::DwellTracker;
