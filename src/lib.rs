/*
 * Slime Mold Simulation - Module Definitions
 *
 * The simulation core (vector, agent, spatial_grid, trail, world,
 * simulation) depends only on the EngineGateway trait in `gateway`. The
 * nannou window lives in app, renderer, input, ui and debug.
 */

// Re-export key components for easier access
pub use agent::{measure_cos_theta, Agent, AgentFactory, Centres, Renormalization, ORIGINAL_MAGNITUDE};
pub use error::{SimError, SimResult};
pub use gateway::{Circle, CircleFactory, EngineGateway, HeadlessGateway, UserHasQuit};
pub use params::SimulationParams;
pub use simulation::{SlimeMoldSimulation, StepOutcome};
pub use spatial_grid::SpatialGrid;
pub use trail::TrailBuffer;
pub use vector::Vector2;
pub use world::World;

// Define modules
pub mod agent;
pub mod app;
pub mod debug;
pub mod error;
pub mod gateway;
pub mod input;
pub mod params;
pub mod renderer;
pub mod simulation;
pub mod spatial_grid;
pub mod trail;
pub mod ui;
pub mod vector;
pub mod world;
