//! Dynamical System Trait: Common Stepping API
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    DynamicalSystem Trait                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  + step()              - Advance system by dt               │
//! │  + run(n)              - Run n steps                        │
//! │  + state()             - Current state snapshot             │
//! │  + time()              - Elapsed simulated time             │
//! │  + order_parameter()   - Scalar summary of the state        │
//! └─────────────────────────────────────────────────────────────┘
//! ```

/// Trait for step-wise simulated systems
pub trait DynamicalSystem {
    /// State type for this system
    type State;

    /// Advance system by one timestep
    fn step(&mut self);

    /// Run multiple timesteps
    fn run(&mut self, n_steps: usize) {
        for _ in 0..n_steps {
            self.step();
        }
    }

    /// Get current state snapshot
    fn state(&self) -> Self::State;

    /// Elapsed simulated time
    fn time(&self) -> f64;

    /// System-specific scalar summary
    ///
    /// For the phase toys this is the distance from the center,
    /// i.e. the loop amplitude.
    fn order_parameter(&self) -> f64;
}
