//! Toy Suite: Run Any Phase Toy From the Command Line
//!
//! Usage:
//!   toy_suite square --clock reflecting      # Toy 1, reflecting walls
//!   toy_suite closed-loop --omega 4          # Toy 2, exact rotation
//!   toy_suite quench --strength 0.05         # Toy 3, corner quench
//!   toy_suite collapse --k 2.5               # Toy 3 variant, corner collapse
//!   toy_suite proxy curve.json               # light-curve proxies
//!   toy_suite run --config params.json       # any regime from JSON
//!
//! Every command prints a text report, or JSON with `--json`. Dwell
//! statistics are always taken on the stored (Z, Σ); a quench with a
//! sheared trigger view also reports what that view saw, separately.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

use bounded_phase_toys::telemetry::init_tracing;
use bounded_phase_toys::{
    classify, derive_proxies, dwell_stats, simulate, AmplitudeReport, AxisDrive, BoundaryPolicy,
    ConservativeCoupling, CornerCollapse, CornerQuench, DwellStats, IndependentClocks, PhaseState,
    ProxyConfig, QuenchTarget, RegimeParams, RegimeRule, SignSense, StabilityBand, Trajectory,
};

#[derive(Parser)]
#[command(name = "toy_suite")]
#[command(about = "Bounded phase-space toys with corner dwell diagnostics")]
#[command(version)]
struct Cli {
    /// Emit JSON instead of a text report
    #[arg(long, global = true)]
    json: bool,

    /// Include the trajectory in JSON output
    #[arg(long, global = true)]
    trajectory: bool,

    /// Keep every n-th sample of the emitted trajectory
    #[arg(long, global = true, default_value_t = 1)]
    stride: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Toy 1: independent clocks
    Square {
        #[arg(long, default_value_t = 4000)]
        steps: usize,
        #[arg(long, default_value_t = 0.02)]
        dt: f64,
        #[arg(long, default_value_t = 0.6)]
        z0: f64,
        #[arg(long, default_value_t = 0.4)]
        sigma0: f64,
        /// Clock family
        #[arg(long, value_enum, default_value_t = ClockArg::Sign)]
        clock: ClockArg,
        /// Z clock rate (reflecting) or period (periodic)
        #[arg(long, default_value_t = 1.0)]
        z_clock: f64,
        /// Σ clock rate (reflecting) or period (periodic)
        #[arg(long, default_value_t = 1.31)]
        sigma_clock: f64,
        #[arg(long, value_enum)]
        boundary: Option<BoundaryArg>,
        /// Gaussian jitter on the initial state
        #[arg(long)]
        jitter: Option<f64>,
        #[arg(long, default_value_t = 0.85)]
        threshold: f64,
    },

    /// Toy 2: conservative rotation about the center
    ClosedLoop {
        #[arg(long, default_value_t = 20000)]
        steps: usize,
        #[arg(long, default_value_t = 0.01)]
        dt: f64,
        /// Loop speed ω
        #[arg(long, default_value_t = 4.0)]
        omega: f64,
        #[arg(long, default_value_t = 0.18, allow_hyphen_values = true)]
        kick_z: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        kick_sigma: f64,
        #[arg(long, value_enum, default_value_t = BoundaryArg::Clamp)]
        boundary: BoundaryArg,
        #[arg(long, default_value_t = 0.85)]
        threshold: f64,
    },

    /// Toy 3: rotation with corner-triggered quench
    Quench {
        #[arg(long, default_value_t = 15000)]
        steps: usize,
        #[arg(long, default_value_t = 0.01)]
        dt: f64,
        #[arg(long, default_value_t = 3.0)]
        omega: f64,
        /// Initial loop amplitude
        #[arg(long, default_value_t = 0.49)]
        amplitude: f64,
        #[arg(long, default_value_t = 0.8)]
        threshold: f64,
        /// Pull fraction per in-corner step
        #[arg(long, default_value_t = 0.01)]
        strength: f64,
        /// Shear of the view the quench trigger sees
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        shear: f64,
        #[arg(long, value_enum, default_value_t = TargetArg::Center)]
        target: TargetArg,
    },

    /// Toy 3 variant: away-driven square with a restoring impulse in the corners
    Collapse {
        #[arg(long, default_value_t = 5000)]
        steps: usize,
        #[arg(long, default_value_t = 0.01)]
        dt: f64,
        #[arg(long, default_value_t = 0.6)]
        z0: f64,
        #[arg(long, default_value_t = 0.55)]
        sigma0: f64,
        /// Sign-drive rate on Z (away from the center)
        #[arg(long, default_value_t = 0.6)]
        drive_z: f64,
        /// Sign-drive rate on Σ (away from the center)
        #[arg(long, default_value_t = 0.4)]
        drive_sigma: f64,
        /// Restoring rate inside the corner
        #[arg(long, default_value_t = 2.5)]
        k: f64,
        #[arg(long, default_value_t = 0.9)]
        threshold: f64,
    },

    /// Z/Σ proxies from a smoothed light curve ({"time": [...], "flux": [...]})
    Proxy {
        input: PathBuf,
        #[arg(long, default_value_t = 0.7)]
        z_above: f64,
        #[arg(long, default_value_t = 0.2)]
        sigma_below: f64,
    },

    /// Run a regime described by a JSON parameter file
    Run {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long, default_value_t = 0.85)]
        threshold: f64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ClockArg {
    Sign,
    Reflecting,
    Periodic,
}

#[derive(Clone, Copy, ValueEnum)]
enum BoundaryArg {
    Clamp,
    Reflect,
    Wrap,
}

impl From<BoundaryArg> for BoundaryPolicy {
    fn from(arg: BoundaryArg) -> Self {
        match arg {
            BoundaryArg::Clamp => BoundaryPolicy::Clamp,
            BoundaryArg::Reflect => BoundaryPolicy::Reflect,
            BoundaryArg::Wrap => BoundaryPolicy::Wrap,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum TargetArg {
    Center,
    High,
    Low,
}

impl From<TargetArg> for QuenchTarget {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Center => QuenchTarget::Center,
            TargetArg::High => QuenchTarget::HighCorner,
            TargetArg::Low => QuenchTarget::LowCorner,
        }
    }
}

#[derive(Serialize)]
struct SimulationOutput<'a> {
    regime: &'static str,
    params: &'a RegimeParams,
    stats: DwellStats,
    dwell_time: f64,
    band: StabilityBand,
    /// Dwell as seen through a sheared quench trigger view
    #[serde(skip_serializing_if = "Option::is_none")]
    quench_view_stats: Option<DwellStats>,
    amplitude: Option<AmplitudeReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trajectory: Option<Trajectory>,
}

#[derive(Deserialize)]
struct LightCurve {
    time: Vec<f64>,
    flux: Vec<f64>,
}

#[derive(Serialize)]
struct ProxyOutput {
    samples: usize,
    stats: DwellStats,
    band: StabilityBand,
    dwell_time: f64,
    quench_index: usize,
    quench_time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    trajectory: Option<Trajectory>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let options = OutputOptions {
        json: cli.json,
        trajectory: cli.trajectory,
        stride: cli.stride,
    };

    match cli.command {
        Commands::Square {
            steps,
            dt,
            z0,
            sigma0,
            clock,
            z_clock,
            sigma_clock,
            boundary,
            jitter,
            threshold,
        } => {
            let (clocks, default_boundary) = match clock {
                ClockArg::Sign => (IndependentClocks::sign_square(), BoundaryPolicy::Clamp),
                ClockArg::Reflecting => (
                    IndependentClocks::reflecting_square(z_clock, sigma_clock),
                    BoundaryPolicy::Reflect,
                ),
                ClockArg::Periodic => (
                    IndependentClocks::periodic(z_clock, sigma_clock),
                    BoundaryPolicy::Clamp,
                ),
            };
            let boundary = boundary.map(BoundaryPolicy::from).unwrap_or(default_boundary);

            let mut initial = PhaseState::new(z0, sigma0);
            if let Some(noise) = jitter {
                initial = initial.perturbed(noise, boundary, &mut rand::rng());
                info!(z = initial.z, sigma = initial.sigma, "jittered initial state");
            }

            let params = RegimeParams::new(steps, dt, initial, boundary, clocks.into());
            report_simulation(&options, &params, threshold)
        }

        Commands::ClosedLoop {
            steps,
            dt,
            omega,
            kick_z,
            kick_sigma,
            boundary,
            threshold,
        } => {
            let params = RegimeParams::new(
                steps,
                dt,
                PhaseState::from_offset(kick_z, kick_sigma),
                boundary.into(),
                ConservativeCoupling::new(omega).into(),
            );
            report_simulation(&options, &params, threshold)
        }

        Commands::Quench {
            steps,
            dt,
            omega,
            amplitude,
            threshold,
            strength,
            shear,
            target,
        } => {
            let quench = CornerQuench::new(omega, threshold, strength)
                .with_target(target.into())
                .with_view_shear(shear);
            let params = RegimeParams::corner_quench_default()
                .with_steps(steps)
                .with_dt(dt)
                .with_initial(PhaseState::from_offset(amplitude, 0.0))
                .with_regime(quench);
            report_simulation(&options, &params, threshold)
        }

        Commands::Collapse {
            steps,
            dt,
            z0,
            sigma0,
            drive_z,
            drive_sigma,
            k,
            threshold,
        } => {
            let clocks = IndependentClocks::new(
                AxisDrive::Sign { rate: drive_z, sense: SignSense::Away },
                AxisDrive::Sign { rate: drive_sigma, sense: SignSense::Away },
            );
            let params = RegimeParams::corner_collapse_default()
                .with_steps(steps)
                .with_dt(dt)
                .with_initial(PhaseState::new(z0, sigma0))
                .with_regime(CornerCollapse::new(clocks, k, threshold));
            report_simulation(&options, &params, threshold)
        }

        Commands::Proxy {
            input,
            z_above,
            sigma_below,
        } => {
            let text = fs::read_to_string(&input)
                .with_context(|| format!("reading light curve {}", input.display()))?;
            let curve: LightCurve = serde_json::from_str(&text)
                .with_context(|| format!("parsing light curve {}", input.display()))?;

            let config = ProxyConfig { z_above, sigma_below };
            let report = derive_proxies(&Array1::from(curve.time), &Array1::from(curve.flux), &config)?;

            let output = ProxyOutput {
                samples: report.trajectory.len(),
                stats: report.stats,
                band: report.stats.band(),
                dwell_time: report.dwell_time,
                quench_index: report.quench_index,
                quench_time: report.quench_time,
                trajectory: options.trajectory.then(|| report.trajectory.stride(options.stride)),
            };

            if options.json {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                banner("Light-Curve Corner Diagnostics");
                println!("Samples               : {}", output.samples);
                println!("Corner (Z > {:.2}, Σ < {:.2})", z_above, sigma_below);
                print_dwell(&output.stats, output.dwell_time);
                println!("Quench index          : {}", output.quench_index);
                println!("Quench time           : {:.4}", output.quench_time);
                footer();
            }
            Ok(())
        }

        Commands::Run { config, threshold } => {
            let text = fs::read_to_string(&config)
                .with_context(|| format!("reading config {}", config.display()))?;
            let params: RegimeParams = serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", config.display()))?;
            report_simulation(&options, &params, threshold)
        }
    }
}

/// Output flags shared by every command
struct OutputOptions {
    json: bool,
    trajectory: bool,
    stride: usize,
}

/// Dwell through the quench's sheared trigger view, when it differs from the raw square
fn quench_view_stats(params: &RegimeParams, trajectory: &Trajectory) -> Option<DwellStats> {
    match &params.regime {
        RegimeRule::CornerQuench(quench) if quench.view_shear != 0.0 => {
            let flags: Vec<bool> = trajectory.iter().map(|s| quench.in_corner(s)).collect();
            Some(dwell_stats(&flags))
        }
        _ => None,
    }
}

fn report_simulation(options: &OutputOptions, params: &RegimeParams, threshold: f64) -> Result<()> {
    if let Err(e) = params.validate() {
        warn!("{e}; continuing with degenerate settings");
    }

    let trajectory = simulate(params);
    let stats = dwell_stats(&classify(&trajectory, threshold));

    let output = SimulationOutput {
        regime: params.regime.name(),
        params,
        stats,
        dwell_time: stats.dwell_time(params.effective_dt()),
        band: stats.band(),
        quench_view_stats: quench_view_stats(params, &trajectory),
        amplitude: trajectory.amplitude_report(),
        trajectory: options.trajectory.then(|| trajectory.stride(options.stride)),
    };

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    banner(&format!("Phase Toy: {}", output.regime));
    println!("Steps = {}, dt = {:.4}, boundary = {}", params.steps, params.dt, params.boundary.name());
    println!("Initial state (Z, Σ) = ({:.3}, {:.3})", params.initial.z, params.initial.sigma);

    if let Some(last) = trajectory.last() {
        println!("Final state   (Z, Σ) = ({:.3}, {:.3})", last.z, last.sigma);
    }

    if let Some(amp) = output.amplitude {
        println!("\nAmplitude:");
        println!("  initial = {:.4}, final = {:.4}", amp.initial, amp.final_amplitude);
        if amp.conserved {
            println!("  ✓ Conservative loop (drift {:.2}%)", 100.0 * amp.relative_drift);
        } else {
            println!("  ⚠ Amplitude drift {:.2}%", 100.0 * amp.relative_drift);
        }
    }

    println!();
    println!("Corner (θ = {:.2}) on stored (Z, Σ)", threshold);
    print_dwell(&output.stats, output.dwell_time);

    if let Some(view) = output.quench_view_stats {
        println!("\nQuench trigger view (sheared, not the dwell classifier):");
        println!(
            "  dwell {:.2}%, {} entries, max run {}",
            100.0 * view.dwell_fraction,
            view.entry_count,
            view.max_run_length
        );
    }
    footer();
    Ok(())
}

fn print_dwell(stats: &DwellStats, dwell_time: f64) {
    println!("Corner dwell fraction : {:.2}%", 100.0 * stats.dwell_fraction);
    println!("Corner dwell (steps)  : {}", stats.dwell_count);
    println!("Corner dwell time     : {:.4}", dwell_time);
    println!("Corner entries        : {}", stats.entry_count);
    println!("Max corner run        : {}", stats.max_run_length);

    if stats.has_entry() {
        println!("Regime                : {}", stats.band().label());
    } else {
        println!("Regime                : {} (no corner entry; try a lower threshold)", stats.band().label());
    }
}

fn banner(title: &str) {
    println!("═══════════════════════════════════════════════════════════════");
    println!("  {}", title);
    println!("═══════════════════════════════════════════════════════════════\n");
}

fn footer() {
    println!("\n═══════════════════════════════════════════════════════════════");
    println!("  Analysis Complete");
    println!("═══════════════════════════════════════════════════════════════");
}
