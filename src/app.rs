/*
 * Application Module
 *
 * This module defines the nannou application model and its update loop.
 * The simulation is built and started before nannou takes over the main
 * thread; each update then:
 * - latches keyboard input into the gateway and reads the displacement hint
 * - runs the egui controls
 * - advances the simulation one tick unless paused
 * - stops the app when the gateway reports a quit
 */

use std::sync::Mutex;
use std::time::Instant;

use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::{info, warn};

use crate::debug::DebugInfo;
use crate::gateway::EngineGateway;
use crate::input::{self, KeyState, KEY_STEP};
use crate::renderer::{self, NannouGateway};
use crate::simulation::{SlimeMoldSimulation, StepOutcome};
use crate::ui;

// nannou's model function takes no arguments, so the started simulation is
// parked here by `run` and picked up by `model`.
static PENDING: Mutex<Option<Pending>> = Mutex::new(None);

struct Pending {
    simulation: SlimeMoldSimulation<NannouGateway>,
    time_it: Option<u64>,
}

// Wall-clock timing of the first `steps` ticks
pub struct TimeIt {
    pub started: Instant,
    pub steps: u64,
}

pub struct Model {
    pub simulation: SlimeMoldSimulation<NannouGateway>,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub time_it: Option<TimeIt>,
}

/// Hand a started simulation to nannou and block until the window closes.
///
/// With `time_it` set, the app quits after that many ticks and reports the
/// elapsed time.
pub fn run(simulation: SlimeMoldSimulation<NannouGateway>, time_it: Option<u64>) {
    if let Ok(mut pending) = PENDING.lock() {
        *pending = Some(Pending { simulation, time_it });
    }
    nannou::app(model).update(update).run();
}

fn model(app: &App) -> Model {
    let pending = PENDING
        .lock()
        .ok()
        .and_then(|mut pending| pending.take())
        .expect("app::run parks the simulation before nannou starts");

    let (width, height) = pending.simulation.gateway().shape();

    let window_id = app
        .new_window()
        .title("Slime Mold Simulation")
        .size(width as u32, height as u32)
        .view(renderer::view)
        .key_pressed(input::key_pressed)
        .raw_event(input::raw_window_event)
        .closed(input::window_closed)
        .build()
        .expect("failed to open the simulation window");

    let window = app.window(window_id).expect("window was just created");
    let egui = Egui::from_window(&window);

    Model {
        simulation: pending.simulation,
        egui,
        debug_info: DebugInfo::default(),
        time_it: pending.time_it.map(|steps| TimeIt { started: Instant::now(), steps }),
    }
}

fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let gateway = model.simulation.gateway_mut();
    gateway.set_input(KeyState::from_app(app), update.since_last.as_secs_f64());
    match gateway.get_keyboard_displacement(KEY_STEP) {
        Ok(displacement) => model.debug_info.displacement = displacement,
        Err(_) => {
            model.simulation.finish();
            app.quit();
            return;
        }
    }

    model.egui.set_elapsed_time(update.since_start);
    let actions = ui::update_ui(&mut model.egui, model.simulation.params_mut(), &model.debug_info);

    if actions.reset {
        if let Err(err) = model.simulation.restart() {
            warn!(error = %err, "could not reset agents");
        }
    }

    if !model.simulation.params().pause_simulation
        && model.simulation.try_running_one_timestep() == StepOutcome::Quit
    {
        app.quit();
        return;
    }

    let world = model.simulation.world();
    model.debug_info.tick = world.tick();
    model.debug_info.agents = world.agents().len();
    model.debug_info.circles = model.simulation.gateway().frame().len();

    if let Some(timer) = &model.time_it {
        if model.debug_info.tick >= timer.steps {
            let elapsed = timer.started.elapsed();
            info!(steps = timer.steps, elapsed_ms = elapsed.as_millis() as u64, "timing run complete");
            println!("Time taken: {:.3}", elapsed.as_secs_f64());
            app.quit();
        }
    }
}
