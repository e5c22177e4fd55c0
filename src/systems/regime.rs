//! Regime Rules: One Transition Function per Toy
//!
//! | regime                | toy | coupling | dissipation     |
//! |-----------------------|-----|----------|-----------------|
//! | independent clocks    | 1   | none     | none            |
//! | conservative coupling | 2   | rotation | none            |
//! | corner quench         | 3   | rotation | inside corners  |
//! | corner collapse       | 3   | none     | inside corners  |
//!
//! Every rule is a pure function of the current state, dt and elapsed
//! time. Differences between toys are configuration, not code paths.

use serde::{Deserialize, Serialize};

use super::collapse::CornerCollapse;
use super::coupling::ConservativeCoupling;
use super::independent::IndependentClocks;
use super::integrator::Proposal;
use super::quench::CornerQuench;
use super::state::PhaseState;

/// Tagged regime rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegimeRule {
    Independent(IndependentClocks),
    ConservativeCoupling(ConservativeCoupling),
    CornerQuench(CornerQuench),
    CornerCollapse(CornerCollapse),
}

impl RegimeRule {
    /// Proposal for the step producing the sample at elapsed `time`
    pub fn propose(&self, state: PhaseState, dt: f64, time: f64) -> Proposal {
        match self {
            RegimeRule::Independent(rule) => rule.propose(state, time),
            RegimeRule::ConservativeCoupling(rule) => rule.propose(state, dt),
            RegimeRule::CornerQuench(rule) => rule.propose(state, dt),
            RegimeRule::CornerCollapse(rule) => rule.propose(state, dt, time),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RegimeRule::Independent(_) => "independent_clocks",
            RegimeRule::ConservativeCoupling(_) => "conservative_coupling",
            RegimeRule::CornerQuench(_) => "corner_quench",
            RegimeRule::CornerCollapse(_) => "corner_collapse",
        }
    }

    /// True when the rule never removes energy
    pub fn is_conservative(&self) -> bool {
        match self {
            RegimeRule::CornerQuench(rule) => rule.effective_strength() == 0.0,
            RegimeRule::CornerCollapse(rule) => rule.k_collapse == 0.0,
            _ => true,
        }
    }
}

impl From<IndependentClocks> for RegimeRule {
    fn from(rule: IndependentClocks) -> Self {
        RegimeRule::Independent(rule)
    }
}

impl From<ConservativeCoupling> for RegimeRule {
    fn from(rule: ConservativeCoupling) -> Self {
        RegimeRule::ConservativeCoupling(rule)
    }
}

impl From<CornerQuench> for RegimeRule {
    fn from(rule: CornerQuench) -> Self {
        RegimeRule::CornerQuench(rule)
    }
}

impl From<CornerCollapse> for RegimeRule {
    fn from(rule: CornerCollapse) -> Self {
        RegimeRule::CornerCollapse(rule)
    }
}
