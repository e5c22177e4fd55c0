//! Observation Module: Phase Proxies from Measured Brightness
//!
//! Maps an already-smoothed light curve onto the toy phase square so the
//! same corner diagnostics can be applied to data:
//!
//! - Σ(t): min-max normalised flux (escape proxy)
//! - Z(t): 1 - |dΣ/dt| / max|dΣ/dt| (suppressed slope = strong trap)
//!
//! The observational corner is asymmetric: Z high and Σ low.
//! Fetching and smoothing the light curve happen outside this crate.

mod proxy;

pub use proxy::{ProxyConfig, ProxyReport, derive_proxies, gradient, median};
