//! Corner Quench Scan: Dwell Fraction vs Quench Strength
//!
//! Runs Toy 3 from the same initial loop for a ladder of quench strengths
//! and reports how corner residency and loop amplitude respond.
//!
//! ## Protocol
//!
//! 1. Start on a loop of amplitude 0.49 that reaches both corners
//! 2. Run the undamped rotation as reference (q = 0)
//! 3. Repeat with increasing q
//! 4. Compare dwell fraction, entries, longest run and final amplitude,
//!    all classified on the stored (Z, Σ)
//! 5. Classify each run into a stability band

use bounded_phase_toys::telemetry::init_tracing;
use bounded_phase_toys::{
    classify, dwell_stats, simulate, CornerQuench, DwellTracker, RegimeParams, RegimeRule,
    StabilityBand,
};

fn main() {
    init_tracing();

    println!("═══════════════════════════════════════════════════════════════");
    println!("  Toy 3: Corner Dwell → Quench Scan");
    println!("═══════════════════════════════════════════════════════════════\n");

    let base = RegimeParams::corner_quench_default();
    let reference = match base.regime {
        RegimeRule::CornerQuench(q) => q,
        _ => CornerQuench::default(),
    };
    let strengths = [0.0, 0.005, 0.01, 0.02, 0.03, 0.05, 0.1, 0.2, 1.0];

    println!("System Parameters:");
    println!("  Steps = {}, dt = {:.3}", base.steps, base.dt);
    println!("  ω = {:.2} (θ = {:.3} rad/step)", reference.omega, reference.omega * base.dt);
    println!("  Corner threshold = {:.2}", reference.corner_threshold);
    println!("  Quench trigger view shear = {:.2}", reference.view_shear);
    println!(
        "  Initial amplitude = {:.4}\n",
        base.initial.distance_from_center()
    );

    println!("   q     | dwell %  entries  max run | amp final | band");
    println!("---------|---------------------------|-----------|-----------------");

    let mut first_stable: Option<f64> = None;

    for &q in &strengths {
        let quench = CornerQuench {
            quench_strength: q,
            ..reference
        };
        let params = base.with_regime(quench);
        let trajectory = simulate(&params);

        let flags = classify(&trajectory, quench.corner_threshold);
        let stats = dwell_stats(&flags);

        // first entry step, from the streaming tracker
        let mut tracker = DwellTracker::new();
        tracker.update_batch(&flags);
        let first_entry = tracker.runs().first().map(|r| r.start);

        let amp_final = trajectory
            .last()
            .map(|s| s.distance_from_center())
            .unwrap_or(0.0);

        println!(
            "  {:.3}  | {:6.2}   {:6}   {:6}  |  {:.4}   | {}",
            q,
            100.0 * stats.dwell_fraction,
            stats.entry_count,
            stats.max_run_length,
            amp_final,
            stats.band().label()
        );

        if q > 0.0 && first_stable.is_none() && stats.band() == StabilityBand::Stable {
            first_stable = Some(q);
        }
        if q == 0.0 {
            if let Some(step) = first_entry {
                println!("         (reference first enters a corner at step {})", step);
            }
        }
    }

    println!("\n─────────────────────────────────────────────────────────────");
    match first_stable {
        Some(q) => {
            println!("  ✓ Quench strength q = {:.3} is enough to keep the loop", q);
            println!("    out of the corners (dwell < 5%).");
        }
        None => {
            println!("  ⚠ No tested quench strength brought dwell below 5%.");
        }
    }

    println!("\n═══════════════════════════════════════════════════════════════");
    println!("  Analysis Complete");
    println!("═══════════════════════════════════════════════════════════════");
}
