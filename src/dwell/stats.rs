//! Dwell Statistics: Batch Reduction of Corner Flags

use serde::Serialize;

use super::region::CornerRegion;
use crate::systems::Trajectory;

/// Fraction below which a run is reported stable
pub const STABLE_FRACTION: f64 = 0.05;
/// Fraction at or above which a run is reported as high instability
pub const HIGH_INSTABILITY_FRACTION: f64 = 0.15;

/// Qualitative stability band (reporting convention)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StabilityBand {
    /// Rare corner capture
    Stable,
    /// Corner residency rising
    PreInstability,
    /// Sustained corner capture, collapse imminent
    HighInstability,
}

impl StabilityBand {
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction < STABLE_FRACTION {
            StabilityBand::Stable
        } else if fraction < HIGH_INSTABILITY_FRACTION {
            StabilityBand::PreInstability
        } else {
            StabilityBand::HighInstability
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StabilityBand::Stable => "stable / persistent",
            StabilityBand::PreInstability => "pre-instability",
            StabilityBand::HighInstability => "high instability / imminent collapse",
        }
    }
}

/// Corner residency summary of one trajectory
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DwellStats {
    /// Steps inside a corner
    pub dwell_count: usize,
    /// Steps classified
    pub total_steps: usize,
    /// dwell_count / total_steps (0 for an empty trajectory)
    pub dwell_fraction: f64,
    /// Number of maximal in-corner runs
    pub entry_count: usize,
    /// Longest in-corner run
    pub max_run_length: usize,
}

impl DwellStats {
    pub(crate) fn from_counts(
        dwell_count: usize,
        total_steps: usize,
        entry_count: usize,
        max_run_length: usize,
    ) -> Self {
        let dwell_fraction = if total_steps == 0 {
            0.0
        } else {
            dwell_count as f64 / total_steps as f64
        };

        Self {
            dwell_count,
            total_steps,
            dwell_fraction,
            entry_count,
            max_run_length,
        }
    }

    /// Time spent in corners for a fixed step size
    pub fn dwell_time(&self, dt: f64) -> f64 {
        self.dwell_count as f64 * dt
    }

    pub fn band(&self) -> StabilityBand {
        StabilityBand::from_fraction(self.dwell_fraction)
    }

    pub fn has_entry(&self) -> bool {
        self.entry_count > 0
    }
}

/// One maximal run of in-corner steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CornerRun {
    /// Index of the first in-corner step
    pub start: usize,
    /// Number of consecutive in-corner steps
    pub length: usize,
}

/// Flag each step against the symmetric corner with threshold θ
pub fn classify(trajectory: &Trajectory, threshold: f64) -> Vec<bool> {
    corner_flags(trajectory, &CornerRegion::symmetric(threshold))
}

/// Flag each step against an arbitrary corner region
pub fn corner_flags(trajectory: &Trajectory, region: &CornerRegion) -> Vec<bool> {
    trajectory.iter().map(|s| region.contains(s)).collect()
}

/// Maximal runs of `true` flags, in order
pub fn corner_runs(flags: &[bool]) -> Vec<CornerRun> {
    let mut runs = Vec::new();
    let mut current: Option<CornerRun> = None;

    for (i, &flag) in flags.iter().enumerate() {
        if flag {
            if let Some(run) = current.as_mut() {
                run.length += 1;
            } else {
                current = Some(CornerRun { start: i, length: 1 });
            }
        } else if let Some(run) = current.take() {
            runs.push(run);
        }
    }
    runs.extend(current);

    runs
}

/// Reduce per-step flags to dwell statistics
pub fn dwell_stats(flags: &[bool]) -> DwellStats {
    let mut dwell_count = 0;
    let mut entry_count = 0;
    let mut max_run = 0;
    let mut run = 0;
    let mut prev = false;

    for &flag in flags {
        if flag {
            if !prev {
                entry_count += 1;
            }
            dwell_count += 1;
            run += 1;
            max_run = max_run.max(run);
        } else {
            run = 0;
        }
        prev = flag;
    }

    DwellStats::from_counts(dwell_count, flags.len(), entry_count, max_run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::PhaseState;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const T: bool = true;
    const F: bool = false;

    #[test]
    fn test_reference_flag_sequence() {
        let flags = [F, F, T, T, T, F, T, F, F];
        let stats = dwell_stats(&flags);

        assert_eq!(stats.dwell_count, 4);
        assert_eq!(stats.entry_count, 2);
        assert_eq!(stats.max_run_length, 3);
        assert_abs_diff_eq!(stats.dwell_fraction, 4.0 / 9.0, epsilon = 1e-15);
    }

    #[test]
    fn test_start_inside_counts_as_entry() {
        let stats = dwell_stats(&[T, T, F]);
        assert_eq!(stats.entry_count, 1);
        assert_eq!(stats.max_run_length, 2);
    }

    #[test]
    fn test_isolated_flag() {
        let stats = dwell_stats(&[F, T, F]);
        assert_eq!(stats.entry_count, 1);
        assert_eq!(stats.max_run_length, 1);
        assert_eq!(stats.dwell_count, 1);
    }

    #[test]
    fn test_empty_flags() {
        let stats = dwell_stats(&[]);
        assert_eq!(stats.dwell_count, 0);
        assert_eq!(stats.dwell_fraction, 0.0);
        assert_eq!(stats.entry_count, 0);
        assert_eq!(stats.max_run_length, 0);
        assert!(!stats.has_entry());
    }

    #[test]
    fn test_consistency_on_random_flags() {
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..200 {
            let len = rng.random_range(0..300);
            let p: f64 = rng.random_range(0.0..1.0);
            let flags: Vec<bool> = (0..len).map(|_| rng.random_bool(p)).collect();
            let stats = dwell_stats(&flags);

            assert_eq!(flags.iter().filter(|&&f| f).count(), stats.dwell_count);
            assert!(stats.entry_count <= stats.dwell_count);
            assert!(stats.max_run_length <= stats.dwell_count);
            assert!((0.0..=1.0).contains(&stats.dwell_fraction));

            let runs = corner_runs(&flags);
            assert_eq!(runs.len(), stats.entry_count);
            assert_eq!(runs.iter().map(|r| r.length).max().unwrap_or(0), stats.max_run_length);
            assert_eq!(runs.iter().map(|r| r.length).sum::<usize>(), stats.dwell_count);
        }
    }

    #[test]
    fn test_corner_runs_positions() {
        let runs = corner_runs(&[F, F, T, T, T, F, T, F, F]);
        assert_eq!(runs, vec![
            CornerRun { start: 2, length: 3 },
            CornerRun { start: 6, length: 1 },
        ]);
    }

    #[test]
    fn test_classify_trajectory() {
        let traj = Trajectory::from_states(vec![
            PhaseState::new(0.5, 0.5),
            PhaseState::new(0.9, 0.9),
            PhaseState::new(0.1, 0.1),
            PhaseState::new(0.9, 0.1),
        ]);
        assert_eq!(classify(&traj, 0.85), vec![F, T, T, F]);

        // consecutive high-high then low-low is one contiguous run
        let stats = dwell_stats(&classify(&traj, 0.85));
        assert_eq!(stats.entry_count, 1);
        assert_eq!(stats.max_run_length, 2);
    }

    #[test]
    fn test_bands() {
        assert_eq!(StabilityBand::from_fraction(0.0), StabilityBand::Stable);
        assert_eq!(StabilityBand::from_fraction(0.049), StabilityBand::Stable);
        assert_eq!(StabilityBand::from_fraction(0.05), StabilityBand::PreInstability);
        assert_eq!(StabilityBand::from_fraction(0.1499), StabilityBand::PreInstability);
        assert_eq!(StabilityBand::from_fraction(0.15), StabilityBand::HighInstability);
        assert_eq!(StabilityBand::from_fraction(1.0), StabilityBand::HighInstability);
    }

    #[test]
    fn test_dwell_time() {
        let stats = dwell_stats(&[T, T, F, T]);
        assert_abs_diff_eq!(stats.dwell_time(0.03), 0.09, epsilon = 1e-12);
    }
}
