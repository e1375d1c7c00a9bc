//! 2D affine matrices in SVG order
//!
//! A matrix `[a c e; b d f; 0 0 1]` maps a point as
//! ```text
//! x' = a*x + c*y + e
//! y' = b*x + d*y + f
//! ```
//! Rotation follows the SVG convention: clockwise positive angles with the
//! Y axis pointing down.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::DecodeError;
use crate::geom::Point;

const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    pub fn translate(x: f64, y: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, x, y)
    }

    /// Clockwise rotation about the origin, in degrees
    pub fn rotate(angle_degrees: f64) -> Self {
        let radians = angle_degrees.to_radians();
        let (sin_a, cos_a) = radians.sin_cos();
        Self::new(cos_a, sin_a, -sin_a, cos_a, 0.0, 0.0)
    }

    pub fn is_identity(&self) -> bool {
        let id = Self::identity();
        (self.a - id.a).abs() < EPSILON
            && (self.b - id.b).abs() < EPSILON
            && (self.c - id.c).abs() < EPSILON
            && (self.d - id.d).abs() < EPSILON
            && (self.e - id.e).abs() < EPSILON
            && (self.f - id.f).abs() < EPSILON
    }

    /// `self * other`: applies `other` first, then `self`
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn apply(&self, point: Point) -> Point {
        Point {
            x: self.a * point.x + self.c * point.y + self.e,
            y: self.b * point.x + self.d * point.y + self.f,
        }
    }

    /// This matrix applied about `center` instead of the origin
    pub fn anchored_at(&self, center: Point) -> Matrix {
        Matrix::translate(center.x, center.y)
            .multiply(self)
            .multiply(&Matrix::translate(-center.x, -center.y))
    }
}

impl FromStr for Matrix {
    type Err = DecodeError;

    /// Accepts `matrix(a, b, c, d, e, f)` or six bare numbers
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let body = s
            .strip_prefix("matrix(")
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(s);

        let values = body
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<f64>())
            .collect::<Result<Vec<_>, _>>()?;

        match values.as_slice() {
            [a, b, c, d, e, f] => Ok(Matrix::new(*a, *b, *c, *d, *e, *f)),
            other => Err(DecodeError::Matrix(other.len())),
        }
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "matrix({}, {}, {}, {}, {}, {})",
            self.a, self.b, self.c, self.d, self.e, self.f
        )
    }
}
