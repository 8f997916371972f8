/*
 * UI Module
 *
 * The egui controls window: population size, reset, pause, and live
 * statistics from DebugInfo.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::SimulationParams;

// Largest population the slider offers
const MAX_AGENTS: usize = 5000;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UiActions {
    pub reset: bool,
}

pub fn update_ui(egui: &mut Egui, params: &mut SimulationParams, debug_info: &DebugInfo) -> UiActions {
    let mut actions = UiActions::default();
    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Population", |ui| {
                ui.add(egui::Slider::new(&mut params.num_agents, 1..=MAX_AGENTS).text("Agents (on reset)"));
                if ui.button("Reset Agents").clicked() {
                    actions.reset = true;
                }
            });

            ui.collapsing("Statistics", |ui| {
                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
                ui.label(format!("Tick: {}", debug_info.tick));
                ui.label(format!("Agents: {}", debug_info.agents));
                ui.label(format!("Trail circles: {}", debug_info.circles));
                let (dx, dy) = debug_info.displacement;
                ui.label(format!("Keyboard hint: ({dx:.1}, {dy:.1})"));
            });

            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    actions
}
