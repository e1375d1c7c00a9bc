//! Structured path content in absolute coordinates
//!
//! Every path is reduced to four commands: move-to, line-to, cubic curve-to
//! and close-path. Quadratics and arcs are converted to cubics when parsed.

use std::f64::consts::FRAC_PI_2;

use serde::Serialize;

use crate::geom::{Matrix, Point, Selrect};

/// End point and control points of a cubic Bézier segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurveParams {
    pub x: f64,
    pub y: f64,
    pub c1x: f64,
    pub c1y: f64,
    pub c2x: f64,
    pub c2y: f64,
}

impl CurveParams {
    pub fn new(c1: Point, c2: Point, to: Point) -> Self {
        Self {
            x: to.x,
            y: to.y,
            c1x: c1.x,
            c1y: c1.y,
            c2x: c2.x,
            c2y: c2.y,
        }
    }

    pub fn c1(&self) -> Point {
        Point::new(self.c1x, self.c1y)
    }

    pub fn c2(&self) -> Point {
        Point::new(self.c2x, self.c2y)
    }

    pub fn to(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "command", content = "params", rename_all = "kebab-case")]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    CurveTo(CurveParams),
    ClosePath,
}

impl PathSegment {
    fn transform(&self, matrix: &Matrix) -> PathSegment {
        match self {
            PathSegment::MoveTo(p) => PathSegment::MoveTo(matrix.apply(*p)),
            PathSegment::LineTo(p) => PathSegment::LineTo(matrix.apply(*p)),
            PathSegment::CurveTo(c) => PathSegment::CurveTo(CurveParams::new(
                matrix.apply(c.c1()),
                matrix.apply(c.c2()),
                matrix.apply(c.to()),
            )),
            PathSegment::ClosePath => PathSegment::ClosePath,
        }
    }
}

/// A parsed path
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct PathContent(pub Vec<PathSegment>);

impl PathContent {
    /// Apply an affine transform to every point of the path
    ///
    /// Cubic Béziers are closed under affine maps, so transforming the
    /// control points is exact.
    pub fn transform(&self, matrix: &Matrix) -> PathContent {
        if matrix.is_identity() {
            return self.clone();
        }
        PathContent(self.0.iter().map(|seg| seg.transform(matrix)).collect())
    }

    /// Tight axis-aligned bounds, including curve extrema
    ///
    /// Returns `None` for a path without any points.
    pub fn selrect(&self) -> Option<Selrect> {
        let mut points = Vec::new();
        let mut current = Point::default();
        let mut start = Point::default();

        for seg in &self.0 {
            match seg {
                PathSegment::MoveTo(p) => {
                    points.push(*p);
                    current = *p;
                    start = *p;
                }
                PathSegment::LineTo(p) => {
                    points.push(*p);
                    current = *p;
                }
                PathSegment::CurveTo(c) => {
                    points.push(c.to());
                    points.extend(curve_extrema(current, c));
                    current = c.to();
                }
                PathSegment::ClosePath => {
                    current = start;
                }
            }
        }

        Selrect::from_points(points)
    }
}

/// Points where a cubic reaches a horizontal or vertical extreme
fn curve_extrema(from: Point, curve: &CurveParams) -> Vec<Point> {
    let (c1, c2, to) = (curve.c1(), curve.c2(), curve.to());
    let mut ts = axis_roots(from.x, c1.x, c2.x, to.x);
    ts.extend(axis_roots(from.y, c1.y, c2.y, to.y));

    ts.into_iter()
        .filter(|t| *t > 0.0 && *t < 1.0)
        .map(|t| {
            let mt = 1.0 - t;
            let blend = |p0: f64, p1: f64, p2: f64, p3: f64| {
                mt * mt * mt * p0 + 3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t * p3
            };
            Point::new(
                blend(from.x, c1.x, c2.x, to.x),
                blend(from.y, c1.y, c2.y, to.y),
            )
        })
        .collect()
}

/// Roots of the derivative of a one-dimensional cubic Bézier
fn axis_roots(p0: f64, p1: f64, p2: f64, p3: f64) -> Vec<f64> {
    const EPSILON: f64 = 1e-12;

    let a = -p0 + 3.0 * p1 - 3.0 * p2 + p3;
    let b = 2.0 * (p0 - 2.0 * p1 + p2);
    let c = p1 - p0;

    if a.abs() < EPSILON {
        if b.abs() < EPSILON {
            return Vec::new();
        }
        return vec![-c / b];
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return Vec::new();
    }
    let sqrt = discriminant.sqrt();
    vec![(-b + sqrt) / (2.0 * a), (-b - sqrt) / (2.0 * a)]
}

/// Convert an SVG elliptical arc to cubic Béziers
///
/// Returns `None` when a radius is zero (the arc degrades to a line) and an
/// empty list when both endpoints coincide.
pub fn arc_to_curves(
    from: Point,
    rx: f64,
    ry: f64,
    rotation_degrees: f64,
    large_arc: bool,
    sweep: bool,
    to: Point,
) -> Option<Vec<CurveParams>> {
    if from == to {
        return Some(Vec::new());
    }
    let (mut rx, mut ry) = (rx.abs(), ry.abs());
    if rx == 0.0 || ry == 0.0 {
        return None;
    }

    let (sin_phi, cos_phi) = rotation_degrees.to_radians().sin_cos();

    // Endpoint to center parameterization
    let dx2 = (from.x - to.x) / 2.0;
    let dy2 = (from.y - to.y) / 2.0;
    let x1p = cos_phi * dx2 + sin_phi * dy2;
    let y1p = -sin_phi * dx2 + cos_phi * dy2;

    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let scale = lambda.sqrt();
        rx *= scale;
        ry *= scale;
    }

    let num = rx * rx * ry * ry - rx * rx * y1p * y1p - ry * ry * x1p * x1p;
    let den = rx * rx * y1p * y1p + ry * ry * x1p * x1p;
    let sign = if large_arc == sweep { -1.0 } else { 1.0 };
    let coef = sign * (num / den).max(0.0).sqrt();
    let cxp = coef * (rx * y1p / ry);
    let cyp = coef * (-ry * x1p / rx);

    let cx = cos_phi * cxp - sin_phi * cyp + (from.x + to.x) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (from.y + to.y) / 2.0;

    let u = ((x1p - cxp) / rx, (y1p - cyp) / ry);
    let v = ((-x1p - cxp) / rx, (-y1p - cyp) / ry);
    let theta1 = vector_angle((1.0, 0.0), u);
    let mut delta = vector_angle(u, v);
    if !sweep && delta > 0.0 {
        delta -= 2.0 * std::f64::consts::PI;
    } else if sweep && delta < 0.0 {
        delta += 2.0 * std::f64::consts::PI;
    }

    let count = (delta.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
    let step = delta / count as f64;
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    let map = |ux: f64, uy: f64| {
        Point::new(
            cx + rx * ux * cos_phi - ry * uy * sin_phi,
            cy + rx * ux * sin_phi + ry * uy * cos_phi,
        )
    };

    let curves = (0..count)
        .map(|i| {
            let a1 = theta1 + step * i as f64;
            let a2 = a1 + step;
            let (sin1, cos1) = a1.sin_cos();
            let (sin2, cos2) = a2.sin_cos();
            let c1 = map(cos1 - k * sin1, sin1 + k * cos1);
            let c2 = map(cos2 + k * sin2, sin2 - k * cos2);
            let end = if i + 1 == count { to } else { map(cos2, sin2) };
            CurveParams::new(c1, c2, end)
        })
        .collect();

    Some(curves)
}

fn vector_angle(u: (f64, f64), v: (f64, f64)) -> f64 {
    (u.0 * v.1 - u.1 * v.0).atan2(u.0 * v.0 + u.1 * v.1)
}
