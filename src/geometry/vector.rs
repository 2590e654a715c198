use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::geometry::point::Point;

/// A 2D vector with polar accessors.
///
/// Angles are in radians, measured counter-clockwise from +x in a y-up space.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_polar(magnitude: f64, angle: f64) -> Self {
        Self::new(magnitude * angle.cos(), magnitude * angle.sin())
    }

    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Direction in `(-π, π]`, computed as `sign(y) · acos(x / |v|)` with `sign(0) = +1`.
    ///
    /// The result is NaN for the zero vector; callers that can see one must check
    /// [`Vector::magnitude`] first.
    pub fn angle(self) -> f64 {
        let sign = if self.y >= 0.0 { 1.0 } else { -1.0 };
        sign * (self.x / self.magnitude()).clamp(-1.0, 1.0).acos()
    }

    /// A vector with `self`'s magnitude pointing along `direction`.
    pub fn align(self, direction: Vector) -> Self {
        direction * (self.magnitude() / direction.magnitude())
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, k: f64) -> Vector {
        Vector::new(self.x * k, self.y * k)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

impl From<Point> for Vector {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<[f64; 2]> for Vector {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Vector> for [f64; 2] {
    fn from(v: Vector) -> Self {
        [v.x, v.y]
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.3} r, {:.1} deg)",
            self.magnitude(),
            self.angle().to_degrees()
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/vector.rs"]
mod tests;
