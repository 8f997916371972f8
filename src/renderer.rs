/*
 * Renderer Module
 *
 * This module holds the nannou side of the gateway and draws each frame.
 * The simulation hands its circles to NannouGateway during update; view
 * draws whatever frame the gateway holds.
 *
 * World coordinates have the origin at the top-left with y pointing down.
 * nannou puts the origin at the window centre with y pointing up, so every
 * circle is mapped before drawing.
 */

use nannou::color::{srgba, Srgba};
use nannou::prelude::*;
use tracing::warn;

use crate::app::Model;
use crate::error::{SimError, SimResult};
use crate::gateway::{Circle, EngineGateway, UserHasQuit};
use crate::input::KeyState;
use crate::vector::Vector2;

#[derive(Debug, Default)]
pub struct NannouGateway {
    shape: (f64, f64),
    frame: Vec<Circle>,
    keys: KeyState,
    dt: f64,
    quit_requested: bool,
}

impl NannouGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shape(&self) -> (f64, f64) {
        self.shape
    }

    pub fn frame(&self) -> &[Circle] {
        &self.frame
    }

    // Latch this frame's keyboard state and elapsed time
    pub fn set_input(&mut self, keys: KeyState, dt: f64) {
        self.keys = keys;
        self.dt = dt;
    }

    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    fn check_quit(&self) -> Result<(), UserHasQuit> {
        if self.quit_requested {
            Err(UserHasQuit)
        } else {
            Ok(())
        }
    }
}

impl EngineGateway for NannouGateway {
    fn make_world(&mut self, shape: (f64, f64)) -> SimResult<()> {
        let (width, height) = shape;
        // The window is opened at this size, so it has to fit in a u32
        if !(width >= 1.0 && height >= 1.0 && width <= u32::MAX as f64 && height <= u32::MAX as f64) {
            return Err(SimError::Backend(format!("cannot open a {width}x{height} window")));
        }
        self.shape = shape;
        Ok(())
    }

    fn update_circles(&mut self, circles: &[Circle]) -> Result<(), UserHasQuit> {
        self.check_quit()?;
        self.frame.clear();
        self.frame.extend_from_slice(circles);
        Ok(())
    }

    fn get_keyboard_displacement(&mut self, step: f64) -> Result<(f64, f64), UserHasQuit> {
        self.check_quit()?;
        Ok(self.keys.displacement(step, self.dt))
    }
}

// Map a world position onto the window
#[inline]
pub fn to_screen(position: Vector2, shape: (f64, f64)) -> Vec2 {
    let (width, height) = shape;
    vec2(
        (position.x - width / 2.0) as f32,
        (height / 2.0 - position.y) as f32,
    )
}

fn circle_colour(circle: &Circle) -> Srgba<u8> {
    let [r, g, b] = circle.colour;
    let alpha = circle.alpha.round().clamp(0.0, 255.0) as u8;
    srgba(r, g, b, alpha)
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();

    // Clear the background
    draw.background().color(BLACK);

    let gateway = model.simulation.gateway();
    let shape = gateway.shape();

    for circle in gateway.frame() {
        draw.ellipse()
            .xy(to_screen(circle.centre, shape))
            .radius(circle.radius as f32)
            .color(circle_colour(circle));
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        warn!(error = ?err, "failed to draw frame");
    }

    // Draw the egui UI
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        warn!(error = ?err, "failed to draw controls");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_screen_flips_and_centres() {
        let shape = (720.0, 720.0);
        assert_eq!(to_screen(Vector2::new(360.0, 360.0), shape), vec2(0.0, 0.0));
        assert_eq!(to_screen(Vector2::new(0.0, 0.0), shape), vec2(-360.0, 360.0));
        assert_eq!(to_screen(Vector2::new(720.0, 720.0), shape), vec2(360.0, -360.0));
    }

    #[test]
    fn gateway_stores_frame_until_quit() {
        let mut gateway = NannouGateway::new();
        gateway.make_world((720.0, 480.0)).unwrap();
        assert_eq!(gateway.shape(), (720.0, 480.0));

        let circle = Circle {
            centre: Vector2::new(1.0, 1.0),
            radius: 2.0,
            colour: [255, 255, 255],
            alpha: 255.0,
        };
        gateway.update_circles(std::slice::from_ref(&circle)).unwrap();
        assert_eq!(gateway.frame(), &[circle]);

        gateway.request_quit();
        assert_eq!(gateway.update_circles(&[]), Err(UserHasQuit));
        assert_eq!(gateway.get_keyboard_displacement(1.0), Err(UserHasQuit));
        // The last good frame stays on screen
        assert_eq!(gateway.frame().len(), 1);
    }

    #[test]
    fn gateway_rejects_unopenable_window() {
        let mut gateway = NannouGateway::new();
        assert!(matches!(gateway.make_world((0.5, 10.0)), Err(SimError::Backend(_))));
    }

    #[test]
    fn keyboard_hint_uses_latched_input() {
        let mut gateway = NannouGateway::new();
        gateway.set_input(KeyState { right: true, ..Default::default() }, 0.5);
        assert_eq!(gateway.get_keyboard_displacement(10.0), Ok((5.0, 0.0)));
    }

    #[test]
    fn alpha_is_clamped_into_a_byte() {
        let mut circle = Circle {
            centre: Vector2::ZERO,
            radius: 2.0,
            colour: [10, 20, 30],
            alpha: 300.0,
        };
        assert_eq!(circle_colour(&circle).alpha, 255);
        circle.alpha = -4.0;
        assert_eq!(circle_colour(&circle).alpha, 0);
    }
}
