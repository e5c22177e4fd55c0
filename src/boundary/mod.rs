//! Boundary Module: Keeping Phase Coordinates Inside the Square
//!
//! Every update proposes an unconstrained coordinate. Before it is stored
//! it is mapped back into [lo, hi] by one of three policies:
//!
//! - **Clamp**: x ↦ min(hi, max(lo, x)). Momentum is lost at the wall.
//! - **Reflect**: billiard wall. An overshoot of δ comes back as δ inside.
//! - **Wrap**: torus topology, x ↦ lo + (x - lo) mod (hi - lo).
//!
//! A degenerate domain (lo ≥ hi) maps everything to lo.

mod policy;

pub use policy::{
    BoundaryPolicy,
    BoundaryFn,
    Bounds,
    clamp,
    reflect,
    wrap,
};
