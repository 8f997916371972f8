/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains the
 * settings for a slime mold run: arena shape, population, grid and trail
 * sizes, and the steering schedule. The pause flag is toggled from the UI.
 */

use crate::agent::Renormalization;
use crate::error::{SimError, SimResult};

#[derive(Clone, Debug, PartialEq)]
pub struct SimulationParams {
    pub width: f64,
    pub height: f64,
    pub num_agents: usize,
    // Side of a spatial grid cell; the 3x3 block must cover the sensing range
    pub cell_size: f64,
    pub trail_capacity: usize,
    // An agent senses when (tick + index) is a multiple of this
    pub sensing_period: u64,
    pub turn_alpha: f64,
    pub renormalization: Renormalization,
    pub circle_radius: f64,
    pub colour: [u8; 3],
    pub seed: Option<u64>,
    pub pause_simulation: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            width: 720.0,
            height: 720.0,
            num_agents: 300,
            cell_size: 70.0,
            trail_capacity: 100,
            sensing_period: 5,
            turn_alpha: 10.0,
            renormalization: Renormalization::RootOfNorm,
            circle_radius: 2.0,
            colour: [255, 255, 255],
            seed: None,
            pause_simulation: false,
        }
    }
}

impl SimulationParams {
    pub fn shape(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    // Check everything that must hold before a world can be built
    pub fn validate(&self) -> SimResult<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if !positive(self.width) || !positive(self.height) {
            return Err(SimError::InvalidShape { width: self.width, height: self.height });
        }
        if self.num_agents == 0 {
            return Err(SimError::NoAgents);
        }
        if !positive(self.cell_size) {
            return Err(SimError::InvalidCellSize(self.cell_size));
        }
        if self.sensing_period == 0 {
            return Err(SimError::InvalidSensingPeriod);
        }
        Ok(())
    }
}
