/*
 * Gateway Module
 *
 * The boundary between the simulation and whatever draws it. The simulation
 * only ever talks to an EngineGateway; the nannou window and the headless
 * recorder are two implementations of it.
 */

use thiserror::Error;

use crate::error::SimResult;
use crate::vector::Vector2;

/// Raised by a gateway when the user asks to stop. Not a failure: the run
/// loop catches it once and stops cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("user has quit")]
pub struct UserHasQuit;

#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    pub centre: Vector2,
    pub radius: f64,
    pub colour: [u8; 3],
    // 0 is fully transparent, 255 fully opaque
    pub alpha: f64,
}

#[derive(Clone, Debug)]
pub struct CircleFactory {
    radius: f64,
    colour: [u8; 3],
}

impl CircleFactory {
    pub fn new(radius: f64, colour: [u8; 3]) -> Self {
        Self { radius, colour }
    }

    pub fn build(&self, centre: Vector2, alpha: f64, radius: Option<f64>) -> Circle {
        Circle {
            centre,
            radius: radius.unwrap_or(self.radius),
            colour: self.colour,
            alpha,
        }
    }
}

pub trait EngineGateway {
    // Prepare a surface of the given (width, height)
    fn make_world(&mut self, shape: (f64, f64)) -> SimResult<()>;

    // Present one frame
    fn update_circles(&mut self, circles: &[Circle]) -> Result<(), UserHasQuit>;

    // Keyboard-driven displacement scaled by the elapsed frame time
    fn get_keyboard_displacement(&mut self, step: f64) -> Result<(f64, f64), UserHasQuit>;
}

/// A gateway with no display. It keeps the last frame for inspection and can
/// be scripted to quit after a number of frames.
#[derive(Debug, Default)]
pub struct HeadlessGateway {
    shape: Option<(f64, f64)>,
    frame: Vec<Circle>,
    frames_drawn: u64,
    quit_after: Option<u64>,
    displacement: (f64, f64),
}

impl HeadlessGateway {
    pub fn new() -> Self {
        Self::default()
    }

    // Signal quit on the frame after `frames` have been drawn
    pub fn quit_after(mut self, frames: u64) -> Self {
        self.quit_after = Some(frames);
        self
    }

    // Unit displacement returned per unit of `step`
    pub fn with_displacement(mut self, dx: f64, dy: f64) -> Self {
        self.displacement = (dx, dy);
        self
    }

    pub fn shape(&self) -> Option<(f64, f64)> {
        self.shape
    }

    pub fn last_frame(&self) -> &[Circle] {
        &self.frame
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    fn check_quit(&self) -> Result<(), UserHasQuit> {
        match self.quit_after {
            Some(limit) if self.frames_drawn >= limit => Err(UserHasQuit),
            _ => Ok(()),
        }
    }
}

impl EngineGateway for HeadlessGateway {
    fn make_world(&mut self, shape: (f64, f64)) -> SimResult<()> {
        self.shape = Some(shape);
        Ok(())
    }

    fn update_circles(&mut self, circles: &[Circle]) -> Result<(), UserHasQuit> {
        self.check_quit()?;
        self.frame.clear();
        self.frame.extend_from_slice(circles);
        self.frames_drawn += 1;
        Ok(())
    }

    fn get_keyboard_displacement(&mut self, step: f64) -> Result<(f64, f64), UserHasQuit> {
        self.check_quit()?;
        let (dx, dy) = self.displacement;
        Ok((dx * step, dy * step))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_factory_defaults_radius() {
        let factory = CircleFactory::new(2.0, [255, 255, 255]);
        let c = factory.build(Vector2::new(1.0, 2.0), 128.0, None);
        assert_eq!(c.radius, 2.0);
        assert_eq!(c.colour, [255, 255, 255]);
        assert_eq!(c.alpha, 128.0);

        let c = factory.build(Vector2::new(1.0, 2.0), 0.0, Some(3.0));
        assert_eq!(c.radius, 3.0);
    }

    #[test]
    fn headless_quits_after_limit() {
        let mut gateway = HeadlessGateway::new().quit_after(2);
        gateway.make_world((10.0, 10.0)).unwrap();
        assert_eq!(gateway.shape(), Some((10.0, 10.0)));

        assert!(gateway.update_circles(&[]).is_ok());
        assert!(gateway.update_circles(&[]).is_ok());
        assert_eq!(gateway.update_circles(&[]), Err(UserHasQuit));
        assert_eq!(gateway.get_keyboard_displacement(1.0), Err(UserHasQuit));
        assert_eq!(gateway.frames_drawn(), 2);
    }

    #[test]
    fn headless_scales_displacement() {
        let mut gateway = HeadlessGateway::new().with_displacement(1.0, -0.5);
        assert_eq!(gateway.get_keyboard_displacement(4.0), Ok((4.0, -2.0)));
    }
}
