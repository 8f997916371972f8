/*
 * Input Module
 *
 * This module handles keyboard and window events for the slime mold window.
 *
 * Features:
 * - W/A/S/D state turned into a displacement hint scaled by frame time
 * - Escape or closing the window requests a clean quit
 * - Space toggles pause
 * - Raw events forwarded to egui
 */

use nannou::prelude::*;

use crate::app::Model;

// Displacement per second of held key
pub const KEY_STEP: f64 = 200.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl KeyState {
    pub fn from_app(app: &App) -> Self {
        let keys = &app.keys.down;
        Self {
            up: keys.contains(&Key::W),
            down: keys.contains(&Key::S),
            left: keys.contains(&Key::A),
            right: keys.contains(&Key::D),
        }
    }

    // Screen-style displacement: up is negative y
    pub fn displacement(self, step: f64, dt: f64) -> (f64, f64) {
        let amount = step * dt;
        let mut dx = 0.0;
        let mut dy = 0.0;
        if self.up {
            dy -= amount;
        }
        if self.down {
            dy += amount;
        }
        if self.left {
            dx -= amount;
        }
        if self.right {
            dx += amount;
        }
        (dx, dy)
    }
}

// Key pressed event handler
pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        Key::Escape => model.simulation.gateway_mut().request_quit(),
        Key::Space => {
            let params = model.simulation.params_mut();
            params.pause_simulation = !params.pause_simulation;
        }
        _ => {}
    }
}

// Window closed event handler
pub fn window_closed(_app: &App, model: &mut Model) {
    model.simulation.gateway_mut().request_quit();
}

// Pass raw window events through to egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
