//! Dwell Tracker: Streaming Corner Residency
//!
//! Step-by-step counterpart of [`dwell_stats`](super::dwell_stats): feed one
//! in/out flag per step and read the running statistics at any point.

use super::region::CornerRegion;
use super::stats::{CornerRun, DwellStats};
use crate::systems::PhaseState;

/// Streaming corner dwell accumulator
#[derive(Debug, Clone, Default)]
pub struct DwellTracker {
    /// Steps observed
    total_steps: usize,
    /// Steps flagged in-corner
    dwell_count: usize,
    /// Length of the run in progress (0 when outside)
    current_run: usize,
    /// Longest run seen so far
    max_run: usize,
    /// Completed and in-progress runs
    runs: Vec<CornerRun>,
}

impl DwellTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset tracker state
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record one step
    ///
    /// Returns true if this step starts a new corner entry
    pub fn update(&mut self, in_corner: bool) -> bool {
        let t = self.total_steps;
        self.total_steps += 1;

        if !in_corner {
            self.current_run = 0;
            return false;
        }

        self.dwell_count += 1;
        self.current_run += 1;
        self.max_run = self.max_run.max(self.current_run);

        if self.current_run == 1 {
            self.runs.push(CornerRun { start: t, length: 1 });
            true
        } else {
            if let Some(run) = self.runs.last_mut() {
                run.length = self.current_run;
            }
            false
        }
    }

    /// Classify a state against `region` and record it
    pub fn observe(&mut self, state: &PhaseState, region: &CornerRegion) -> bool {
        self.update(region.contains(state))
    }

    /// Record multiple steps
    pub fn update_batch(&mut self, flags: &[bool]) -> DwellStats {
        for &flag in flags {
            self.update(flag);
        }
        self.result()
    }

    /// Current statistics
    pub fn result(&self) -> DwellStats {
        DwellStats::from_counts(
            self.dwell_count,
            self.total_steps,
            self.runs.len(),
            self.max_run,
        )
    }

    pub fn runs(&self) -> &[CornerRun] {
        &self.runs
    }

    /// Currently inside a corner?
    pub fn is_inside(&self) -> bool {
        self.current_run > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dwell::{corner_runs, dwell_stats};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_tracker_reports_entries() {
        let mut tracker = DwellTracker::new();
        let entered: Vec<bool> = [false, true, true, false, true]
            .iter()
            .map(|&f| tracker.update(f))
            .collect();

        assert_eq!(entered, vec![false, true, false, false, true]);
        assert!(tracker.is_inside());
        assert_eq!(tracker.result().entry_count, 2);
    }

    #[test]
    fn test_tracker_matches_batch() {
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..100 {
            let flags: Vec<bool> = (0..rng.random_range(0..200))
                .map(|_| rng.random_bool(0.3))
                .collect();

            let mut tracker = DwellTracker::new();
            let streamed = tracker.update_batch(&flags);

            assert_eq!(streamed, dwell_stats(&flags));
            assert_eq!(tracker.runs(), corner_runs(&flags).as_slice());
        }
    }

    #[test]
    fn test_reset() {
        let mut tracker = DwellTracker::new();
        tracker.update_batch(&[true, true]);
        tracker.reset();
        assert_eq!(tracker.result().total_steps, 0);
        assert!(!tracker.is_inside());
    }

    #[test]
    fn test_observe_uses_region() {
        let mut tracker = DwellTracker::new();
        let region = CornerRegion::symmetric(0.85);
        assert!(tracker.observe(&PhaseState::new(0.95, 0.9), &region));
        assert!(!tracker.observe(&PhaseState::new(0.5, 0.5), &region));
        assert_eq!(tracker.result().dwell_count, 1);
    }
}
