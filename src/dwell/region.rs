//! Corner regions of the phase square

use serde::{Deserialize, Serialize};

use crate::systems::PhaseState;

/// Default symmetric corner threshold
pub const DEFAULT_CORNER_THRESHOLD: f64 = 0.85;

/// A region of the phase square counted as "corner"
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerRegion {
    /// High-high or low-low diagonal corners, θ ∈ (0.5, 1)
    Symmetric { threshold: f64 },
    /// Strong trap with little escape: Z > z_above and Σ < sigma_below
    TrapHighEscapeLow { z_above: f64, sigma_below: f64 },
}

impl CornerRegion {
    pub fn symmetric(threshold: f64) -> Self {
        CornerRegion::Symmetric { threshold }
    }

    pub fn contains(&self, state: &PhaseState) -> bool {
        match *self {
            CornerRegion::Symmetric { threshold } => {
                let low = 1.0 - threshold;
                (state.z > threshold && state.sigma > threshold)
                    || (state.z < low && state.sigma < low)
            }
            CornerRegion::TrapHighEscapeLow { z_above, sigma_below } => {
                state.z > z_above && state.sigma < sigma_below
            }
        }
    }
}

impl Default for CornerRegion {
    fn default() -> Self {
        Self::symmetric(DEFAULT_CORNER_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_corners() {
        let region = CornerRegion::symmetric(0.85);
        assert!(region.contains(&PhaseState::new(0.9, 0.95)));
        assert!(region.contains(&PhaseState::new(0.1, 0.05)));
        assert!(!region.contains(&PhaseState::new(0.9, 0.1)));
        assert!(!region.contains(&PhaseState::new(0.5, 0.5)));
        // strict inequality at the threshold
        assert!(!region.contains(&PhaseState::new(0.85, 0.9)));
    }

    #[test]
    fn test_trap_high_escape_low() {
        let region = CornerRegion::TrapHighEscapeLow { z_above: 0.7, sigma_below: 0.2 };
        assert!(region.contains(&PhaseState::new(0.8, 0.1)));
        assert!(!region.contains(&PhaseState::new(0.1, 0.1)));
        assert!(!region.contains(&PhaseState::new(0.9, 0.9)));
    }
}
