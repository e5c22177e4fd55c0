//! Boundary Policies: Clamp, Reflect, Wrap
//!
//! Reflection folds x into one period [0, 2·span) of the mirrored line
//! and mirrors the upper half:
//!
//!   y = (x - lo) mod 2·span
//!   y > span  ⇒  y ← 2·span - y
//!
//! so any number of wall bounces inside a single step is resolved at once.

use serde::{Deserialize, Serialize};

/// Resolved boundary function `(x, lo, hi) -> x'`
pub type BoundaryFn = fn(f64, f64, f64) -> f64;

/// How out-of-range proposals are brought back into the domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Hard clip at the walls
    #[default]
    Clamp,
    /// Billiard-style mirror at the walls
    Reflect,
    /// Periodic (modulo) domain
    Wrap,
}

impl BoundaryPolicy {
    /// Resolve the policy to a plain function once, before stepping
    pub fn resolve(self) -> BoundaryFn {
        match self {
            BoundaryPolicy::Clamp => clamp,
            BoundaryPolicy::Reflect => reflect,
            BoundaryPolicy::Wrap => wrap,
        }
    }

    /// Apply the policy to a single coordinate
    pub fn apply(self, x: f64, bounds: Bounds) -> f64 {
        (self.resolve())(x, bounds.lo, bounds.hi)
    }

    pub fn name(self) -> &'static str {
        match self {
            BoundaryPolicy::Clamp => "clamp",
            BoundaryPolicy::Reflect => "reflect",
            BoundaryPolicy::Wrap => "wrap",
        }
    }
}

/// Closed interval [lo, hi]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub lo: f64,
    pub hi: f64,
}

impl Bounds {
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// The unit interval every phase coordinate lives in
    pub fn unit() -> Self {
        Self { lo: 0.0, hi: 1.0 }
    }

    pub fn span(&self) -> f64 {
        self.hi - self.lo
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.lo < self.hi)
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.lo && x <= self.hi
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::unit()
    }
}

/// Hard clamp into [lo, hi]
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    if Bounds::new(lo, hi).is_degenerate() {
        return lo;
    }
    hi.min(lo.max(x))
}

/// Reflect x into [lo, hi] like a billiard wall
pub fn reflect(x: f64, lo: f64, hi: f64) -> f64 {
    let bounds = Bounds::new(lo, hi);
    if bounds.is_degenerate() {
        return lo;
    }

    let span = bounds.span();
    let period = 2.0 * span;

    let mut y = (x - lo).rem_euclid(period);

    // rem_euclid can round up to exactly `period`; keep folding until in range
    while y < 0.0 || y > span {
        if y >= period {
            y -= period;
        } else if y < 0.0 {
            y += period;
        }
        if y > span {
            y = period - y;
        }
    }

    (lo + y).min(hi)
}

/// Wrap x onto the circle [lo, hi)
pub fn wrap(x: f64, lo: f64, hi: f64) -> f64 {
    let bounds = Bounds::new(lo, hi);
    if bounds.is_degenerate() {
        return lo;
    }
    (lo + (x - lo).rem_euclid(bounds.span())).min(hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const POLICIES: [BoundaryPolicy; 3] = [
        BoundaryPolicy::Clamp,
        BoundaryPolicy::Reflect,
        BoundaryPolicy::Wrap,
    ];

    #[test]
    fn test_containment_far_outside() {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = Bounds::new(-0.25, 1.5);

        for policy in POLICIES {
            for _ in 0..5000 {
                let x: f64 = rng.random_range(-1.0e4..1.0e4);
                let y = policy.apply(x, bounds);
                assert!(bounds.contains(y), "{:?} mapped {} to {}", policy, x, y);
            }
        }
    }

    #[test]
    fn test_containment_unit_interval() {
        for policy in POLICIES {
            for i in -2000..2000 {
                let x = i as f64 * 0.0137;
                let y = policy.apply(x, Bounds::unit());
                assert!((0.0..=1.0).contains(&y), "{:?} mapped {} to {}", policy, x, y);
            }
        }
    }

    #[test]
    fn test_clamp_basic() {
        assert_eq!(clamp(1.7, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-0.3, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.42, 0.0, 1.0), 0.42);
    }

    #[test]
    fn test_reflect_identity_inside() {
        for i in 0..=20 {
            let delta = i as f64 * 0.05;
            assert_abs_diff_eq!(reflect(delta, 0.0, 1.0), delta, epsilon = 1e-12);
            assert_abs_diff_eq!(reflect(0.2 + delta * 0.5, 0.2, 0.7), 0.2 + delta * 0.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_reflect_single_bounce() {
        for delta in [0.01, 0.05, 0.1, 0.3] {
            assert_abs_diff_eq!(reflect(1.0 + delta, 0.0, 1.0), 1.0 - delta, epsilon = 1e-12);
            assert_abs_diff_eq!(reflect(-delta, 0.0, 1.0), delta, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_reflect_multiple_bounces() {
        // 2.3 = up to 1, back to 0, up 0.3
        assert_abs_diff_eq!(reflect(2.3, 0.0, 1.0), 0.3, epsilon = 1e-12);
        // 1.6 overshoots by 0.6, mirrors to 0.4
        assert_abs_diff_eq!(reflect(1.6, 0.0, 1.0), 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(reflect(-1.25, 0.0, 1.0), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_wrap_correctness() {
        for delta in [0.0, 0.1, 0.25, 0.9] {
            assert_abs_diff_eq!(wrap(1.0 + delta, 0.0, 1.0), delta, epsilon = 1e-12);
            assert_abs_diff_eq!(wrap(2.0 + delta, 1.0, 2.0), 1.0 + delta, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(wrap(-0.25, 0.0, 1.0), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_domain_returns_lo() {
        for policy in POLICIES {
            assert_eq!(policy.apply(0.3, Bounds::new(0.5, 0.5)), 0.5);
            assert_eq!(policy.apply(-9.0, Bounds::new(0.8, 0.2)), 0.8);
        }
        assert!(Bounds::new(0.5, 0.5).is_degenerate());
        assert!(Bounds::new(f64::NAN, 1.0).is_degenerate());
        assert!(!Bounds::unit().is_degenerate());
        assert_eq!(Bounds::new(0.25, 0.75).span(), 0.5);
    }

    #[test]
    fn test_resolve_matches_apply() {
        for policy in POLICIES {
            let f = policy.resolve();
            assert_eq!(f(1.3, 0.0, 1.0), policy.apply(1.3, Bounds::unit()));
        }
    }

    #[test]
    fn test_policy_serde_names() {
        let json = serde_json::to_string(&BoundaryPolicy::Reflect).unwrap();
        assert_eq!(json, "\"reflect\"");
        let back: BoundaryPolicy = serde_json::from_str("\"wrap\"").unwrap();
        assert_eq!(back, BoundaryPolicy::Wrap);
    }
}
