/*
 * Simulation Module
 *
 * Drives a World through an EngineGateway: builds the population at the
 * arena centre, advances one tick per call, turns every trail into fading
 * circles and hands the frame to the gateway. A quit request coming back
 * from the gateway is caught here, once, and turned into a clean stop.
 */

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::agent::{make_n_agents, AgentFactory, Centres};
use crate::error::SimResult;
use crate::gateway::{Circle, CircleFactory, EngineGateway, UserHasQuit};
use crate::params::SimulationParams;
use crate::vector::Vector2;
use crate::world::World;

// Newest trail point is opaque and small, oldest transparent and large
const ALPHA_RANGE: (f64, f64) = (255.0, 0.0);
const RADIUS_RANGE: (f64, f64) = (2.0, 3.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Quit,
}

pub struct SlimeMoldSimulation<G> {
    gateway: G,
    params: SimulationParams,
    world: World,
    circle_factory: CircleFactory,
    rng: StdRng,
    finished: bool,
}

impl<G: EngineGateway> SlimeMoldSimulation<G> {
    pub fn new(gateway: G, params: SimulationParams) -> SimResult<Self> {
        let world = World::new(&params)?;
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            gateway,
            circle_factory: CircleFactory::new(params.circle_radius, params.colour),
            params,
            world,
            rng,
            finished: false,
        })
    }

    // Open the gateway's world and populate the arena
    pub fn start(&mut self) -> SimResult<()> {
        self.gateway.make_world(self.params.shape())?;
        self.populate()?;
        info!(
            width = self.params.width,
            height = self.params.height,
            agents = self.params.num_agents,
            seed = ?self.params.seed,
            "slime mold simulation started"
        );
        Ok(())
    }

    // Throw away the current population and start again from the centre
    pub fn restart(&mut self) -> SimResult<()> {
        self.world.reset();
        self.populate()?;
        debug!(agents = self.world.agents().len(), "population reset");
        Ok(())
    }

    fn populate(&mut self) -> SimResult<()> {
        let centre = Vector2::new(self.params.width / 2.0, self.params.height / 2.0);
        let agents = make_n_agents(
            self.params.num_agents,
            &Centres::Single(centre),
            AgentFactory::RandomVelocity,
            &mut self.rng,
        )?;
        self.world.spawn(agents);
        Ok(())
    }

    pub fn run_one_timestep(&mut self) -> Result<(), UserHasQuit> {
        self.world.step();
        let circles = self.circles();
        self.gateway.update_circles(&circles)
    }

    pub fn try_running_one_timestep(&mut self) -> StepOutcome {
        if self.finished {
            return StepOutcome::Quit;
        }

        match self.run_one_timestep() {
            Ok(()) => StepOutcome::Continue,
            Err(UserHasQuit) => {
                self.finish();
                StepOutcome::Quit
            }
        }
    }

    // Step until the gateway quits or `max_steps` ticks have run. Returns the
    // number of ticks that completed.
    pub fn run_for(&mut self, max_steps: Option<u64>) -> u64 {
        let mut steps = 0;
        while max_steps.map_or(true, |max| steps < max) {
            if self.try_running_one_timestep() == StepOutcome::Quit {
                break;
            }
            steps += 1;
        }
        steps
    }

    // Mark the run as over; later steps are no-ops
    pub fn finish(&mut self) {
        if !self.finished {
            info!(tick = self.world.tick(), "user has quit, stopping simulation");
            self.finished = true;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// One circle per trail point per agent, fading from newest to oldest.
    pub fn circles(&self) -> Vec<Circle> {
        let total = self.world.trails().iter().map(|t| t.len()).sum();
        let mut circles = Vec::with_capacity(total);

        for trail in self.world.trails() {
            let n = trail.len();
            let alphas = linspace(ALPHA_RANGE.0, ALPHA_RANGE.1, n);
            let radii = linspace(RADIUS_RANGE.0, RADIUS_RANGE.1, n);
            for ((&point, alpha), radius) in trail.iter().zip(alphas).zip(radii) {
                circles.push(self.circle_factory.build(point, alpha, Some(radius)));
            }
        }

        circles
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut SimulationParams {
        &mut self.params
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }
}

// `n` evenly spaced values from `start` to `stop` inclusive. A single value
// is `start`.
fn linspace(start: f64, stop: f64, n: usize) -> impl Iterator<Item = f64> {
    let step = if n > 1 { (stop - start) / (n - 1) as f64 } else { 0.0 };
    (0..n).map(move |i| start + step * i as f64)
}
