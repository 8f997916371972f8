/*
 * Vector Module
 *
 * This module defines Vector2, the plain 2D value type used for agent
 * positions, velocities and displacements. It is Copy, so mutating one
 * vector can never alter another.
 */

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use crate::error::SimError;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn x(self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(self) -> f64 {
        self.y
    }

    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    // Euclidean length
    #[inline]
    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    // Displacement from `other` to `self`
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Vector2 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    #[inline]
    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Vector2> for (f64, f64) {
    fn from(v: Vector2) -> Self {
        (v.x, v.y)
    }
}

// Coordinates arriving as loose slices (CLI input, test fixtures) are
// checked for shape and finiteness here, once, at construction.
impl TryFrom<&[f64]> for Vector2 {
    type Error = SimError;

    fn try_from(coordinates: &[f64]) -> Result<Self, Self::Error> {
        let [x, y] = coordinates else {
            return Err(SimError::Dimension { got: coordinates.len() });
        };
        for &value in [x, y] {
            if !value.is_finite() {
                return Err(SimError::NonFinite { value });
            }
        }
        Ok(Self::new(*x, *y))
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}
