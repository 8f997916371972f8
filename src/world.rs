/*
 * World Module
 *
 * This module owns the simulation state and advances it one tick at a time.
 * A tick runs in strict phases:
 * 1. Move every agent, reflect it off the walls, insert it into the grid
 * 2. Agents due this tick sense their neighbourhood and turn
 * 3. Every agent's position is pushed onto its trail
 * 4. The grid is cleared and the tick counter advances
 *
 * Sensing only ever sees a grid built from post-move positions of all agents.
 */

use tracing::trace;

use crate::agent::{Agent, Renormalization};
use crate::error::SimResult;
use crate::params::SimulationParams;
use crate::spatial_grid::SpatialGrid;
use crate::trail::TrailBuffer;
use crate::vector::Vector2;

pub struct World {
    width: f64,
    height: f64,
    agents: Vec<Agent>,
    trails: Vec<TrailBuffer<Vector2>>,
    grid: SpatialGrid,
    tick: u64,
    trail_capacity: usize,
    sensing_period: u64,
    turn_alpha: f64,
    renormalization: Renormalization,
}

impl World {
    pub fn new(params: &SimulationParams) -> SimResult<Self> {
        params.validate()?;

        Ok(Self {
            width: params.width,
            height: params.height,
            agents: Vec::with_capacity(params.num_agents),
            trails: Vec::with_capacity(params.num_agents),
            grid: SpatialGrid::new(params.cell_size)?,
            tick: 0,
            trail_capacity: params.trail_capacity,
            sensing_period: params.sensing_period,
            turn_alpha: params.turn_alpha,
            renormalization: params.renormalization,
        })
    }

    // Add agents, each with a fresh trail
    pub fn spawn(&mut self, agents: impl IntoIterator<Item = Agent>) {
        for agent in agents {
            self.agents.push(agent);
            self.trails.push(TrailBuffer::new(self.trail_capacity));
        }
    }

    // Drop every agent and trail and restart the tick counter
    pub fn reset(&mut self) {
        self.agents.clear();
        self.trails.clear();
        self.grid.clear();
        self.tick = 0;
    }

    pub fn step(&mut self) {
        assert_eq!(
            self.agents.len(),
            self.trails.len(),
            "every agent must own exactly one trail"
        );

        // Move phase, then grid build from post-move positions
        for (i, agent) in self.agents.iter_mut().enumerate() {
            agent.advance();
            agent.reflect_on_bounds(self.width, self.height);
            self.grid.insert(i, agent.position());
        }

        // Sense phase
        let mut turns = 0usize;
        for i in 0..self.agents.len() {
            if !self.is_due(i) {
                continue;
            }

            let target = {
                let agents = &self.agents;
                let me = &agents[i];
                let candidates = self.grid.neighbors_of(me.position());
                me.sense(candidates.into_iter().map(|j| &agents[j]))
                    .map(Agent::position)
            };

            if let Some(target) = target {
                self.agents[i].turn_with(target, self.turn_alpha, self.renormalization);
                turns += 1;
            }
        }

        for (agent, trail) in self.agents.iter().zip(self.trails.iter_mut()) {
            trail.push(agent.position());
        }

        self.grid.clear();
        trace!(tick = self.tick, turns, "tick complete");
        self.tick += 1;
    }

    #[inline]
    fn is_due(&self, index: usize) -> bool {
        (self.tick + index as u64) % self.sensing_period == 0
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn trails(&self) -> &[TrailBuffer<Vector2>] {
        &self.trails
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn shape(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}
