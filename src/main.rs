/*
 * Slime Mold Simulation
 *
 * A population of agents starts at the centre of the arena. Every few ticks
 * each agent looks for the closest neighbour inside its forward cone and
 * swerves toward it; the fading trails they leave behind form the
 * slime-mold-like network.
 *
 * Run with a window (default) or headless. --time-it reports how long the
 * first 100 ticks take.
 */

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use slime_mold::app;
use slime_mold::renderer::NannouGateway;
use slime_mold::{HeadlessGateway, Renormalization, SimulationParams, SlimeMoldSimulation};

// Ticks timed by --time-it
const TIMED_STEPS: u64 = 100;

#[derive(Parser, Debug)]
#[command(name = "slime_mold", version, about = "Slime-mold-like flocking simulation")]
struct Cli {
    /// Number of agents.
    #[arg(long, default_value_t = 300)]
    agents: usize,

    /// Arena width.
    #[arg(long, default_value_t = 720.0)]
    width: f64,

    /// Arena height.
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Seed for the initial headings; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Rescale turns to exactly the original speed instead of the
    /// square-root law.
    #[arg(long)]
    unit_steering: bool,

    /// Time the first 100 ticks and exit.
    #[arg(long)]
    time_it: bool,

    /// Run without a window.
    #[arg(long)]
    headless: bool,

    /// Number of ticks for a headless run.
    #[arg(long, default_value_t = 1000)]
    steps: u64,
}

impl Cli {
    fn params(&self) -> SimulationParams {
        SimulationParams {
            width: self.width,
            height: self.height,
            num_agents: self.agents,
            seed: self.seed,
            renormalization: if self.unit_steering {
                Renormalization::Unit
            } else {
                Renormalization::RootOfNorm
            },
            ..SimulationParams::default()
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let params = cli.params();

    if cli.headless {
        let steps = if cli.time_it { TIMED_STEPS } else { cli.steps };
        return run_headless(params, steps, cli.time_it);
    }

    let mut simulation = SlimeMoldSimulation::new(NannouGateway::new(), params)?;
    simulation.start()?;
    app::run(simulation, cli.time_it.then_some(TIMED_STEPS));
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn run_headless(params: SimulationParams, steps: u64, time_it: bool) -> Result<()> {
    let mut simulation = SlimeMoldSimulation::new(HeadlessGateway::new(), params)?;
    simulation.start()?;

    let started = Instant::now();
    let ran = simulation.run_for(Some(steps));
    let elapsed = started.elapsed();

    info!(
        steps = ran,
        circles = simulation.gateway().last_frame().len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "headless run complete"
    );
    if time_it {
        println!("Time taken: {:.3}", elapsed.as_secs_f64());
    }
    Ok(())
}
