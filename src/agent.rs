/*
 * Agent Module
 *
 * This module defines the Agent struct and its behavior.
 * Each tick an agent:
 * 1. Moves by its velocity
 * 2. Reflects its velocity off the arena walls
 * 3. Periodically senses the closest neighbor inside its forward cone
 * 4. Turns toward that neighbor and rescales its speed
 */

use rand::Rng;

use crate::error::{SimError, SimResult};
use crate::vector::Vector2;

pub const ORIGINAL_MAGNITUDE: f64 = 2.0;

// Candidates further than this on either axis are skipped before any
// angle is computed.
pub const SENSING_RANGE: f64 = 100.0;

// cos(60°). Candidates below this are outside the forward cone.
pub const VISION_CONE: f64 = 0.5;

// Upper bound of the random heading, in radians.
const MAX_HEADING: f64 = 3.14;

/// How `turn` rescales the blended velocity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Renormalization {
    /// Scale by `ORIGINAL_MAGNITUDE / sqrt(|v|)`. The resulting speed is
    /// `ORIGINAL_MAGNITUDE * sqrt(|v|)`, which shapes the characteristic
    /// slime dynamics.
    #[default]
    RootOfNorm,
    /// Scale by `ORIGINAL_MAGNITUDE / |v|`, so the speed is always exactly
    /// `ORIGINAL_MAGNITUDE`.
    Unit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    position: Vector2,
    velocity: Vector2,
}

impl Agent {
    pub fn new(position: Vector2, velocity: Vector2) -> Self {
        Self { position, velocity }
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    // Move by one tick's worth of velocity
    pub fn advance(&mut self) {
        self.position += self.velocity;
    }

    // Flip the velocity component of each axis the agent is outside of.
    // The position is left alone, so an agent may sit out of bounds for a
    // tick before it heads back in.
    pub fn reflect_on_bounds(&mut self, max_x: f64, max_y: f64) {
        if self.position.x > max_x || self.position.x < 0.0 {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y > max_y || self.position.y < 0.0 {
            self.velocity.y = -self.velocity.y;
        }
    }

    /// Pick the closest candidate inside the forward cone.
    ///
    /// The agent itself is recognised by identity and skipped, so callers may
    /// pass the whole neighbourhood. On exact distance ties the first
    /// candidate encountered wins.
    pub fn sense<'a, I>(&self, candidates: I) -> Option<&'a Agent>
    where
        I: IntoIterator<Item = &'a Agent>,
    {
        let mut closest = None;
        let mut min_distance = f64::INFINITY;

        for other in candidates {
            if std::ptr::eq(other, self) {
                continue;
            }

            let displacement = other.position - self.position;
            if displacement.x.abs() > SENSING_RANGE || displacement.y.abs() > SENSING_RANGE {
                continue;
            }

            if measure_cos_theta(self.velocity, displacement) < VISION_CONE {
                continue;
            }

            let distance = displacement.norm();
            if distance < min_distance {
                min_distance = distance;
                closest = Some(other);
            }
        }

        closest
    }

    // Steer toward the target using the default renormalization
    pub fn turn(&mut self, target: Vector2, alpha: f64) {
        self.turn_with(target, alpha, Renormalization::RootOfNorm);
    }

    /// Blend the velocity toward `target` and rescale it.
    ///
    /// `alpha` is applied literally: values outside `[0, 1]` extrapolate
    /// rather than being clamped. A blend that cancels to zero (or overflows)
    /// leaves the velocity untouched instead of producing NaN.
    pub fn turn_with(&mut self, target: Vector2, alpha: f64, law: Renormalization) {
        let to_target = target - self.position;
        let blended = self.velocity * (1.0 - alpha) + to_target * alpha;

        let divisor = match law {
            Renormalization::RootOfNorm => blended.norm().sqrt(),
            Renormalization::Unit => blended.norm(),
        };
        if divisor == 0.0 || !divisor.is_finite() {
            return;
        }

        self.velocity = blended * (ORIGINAL_MAGNITUDE / divisor);
    }
}

/// Forward/behind discriminator between two vectors.
///
/// For a positive dot product this is the true cosine. Otherwise the raw dot
/// product is returned unscaled, which is still below any positive threshold.
pub fn measure_cos_theta(v1: Vector2, v2: Vector2) -> f64 {
    let dot = v1.dot(v2);
    if dot > 0.0 {
        dot / (v1.norm() * v2.norm())
    } else {
        dot
    }
}

// Two ways of turning a starting position into an agent
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AgentFactory {
    RandomVelocity,
    FixedVelocity(Vector2),
}

impl AgentFactory {
    pub fn build<R: Rng + ?Sized>(&self, position: Vector2, rng: &mut R) -> Agent {
        let velocity = match *self {
            AgentFactory::RandomVelocity => {
                let angle = rng.gen_range(0.0..MAX_HEADING);
                Vector2::new(
                    ORIGINAL_MAGNITUDE * angle.cos(),
                    ORIGINAL_MAGNITUDE * angle.sin(),
                )
            }
            AgentFactory::FixedVelocity(velocity) => velocity,
        };
        Agent::new(position, velocity)
    }
}

// Where the agents of a population start
#[derive(Clone, Debug, PartialEq)]
pub enum Centres {
    Single(Vector2),
    Each(Vec<Vector2>),
}

pub fn make_n_agents<R: Rng + ?Sized>(
    n: usize,
    centres: &Centres,
    factory: AgentFactory,
    rng: &mut R,
) -> SimResult<Vec<Agent>> {
    if n == 0 {
        return Err(SimError::NoAgents);
    }

    match centres {
        Centres::Single(centre) => Ok((0..n).map(|_| factory.build(*centre, &mut *rng)).collect()),
        Centres::Each(list) => {
            if list.len() != n {
                return Err(SimError::CentreCountMismatch { expected: n, got: list.len() });
            }
            Ok(list.iter().map(|&centre| factory.build(centre, &mut *rng)).collect())
        }
    }
}
