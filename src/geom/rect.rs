//! Points, selection rectangles and corner transforms

use serde::Serialize;

use crate::geom::Matrix;

/// A 2D point in the document coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned selection rectangle of a shape in its local space
///
/// Carries both the origin/size and the edge coordinates, as the editor
/// consumes either form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Selrect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Selrect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    /// Smallest rectangle containing every point, or `None` for no points
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Selrect> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min_x, min_y, max_x, max_y) = points.fold(
            (first.x, first.y, first.x, first.y),
            |(min_x, min_y, max_x, max_y), p| {
                (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
            },
        );
        Some(Selrect::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    /// Center point of the rectangle
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Corners clockwise from the top-left
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x1, self.y1),
            Point::new(self.x2, self.y1),
            Point::new(self.x2, self.y2),
            Point::new(self.x1, self.y2),
        ]
    }
}

/// Apply `matrix` to each point, anchored at `center`
pub fn transform_points(points: &[Point], center: Point, matrix: &Matrix) -> Vec<Point> {
    if matrix.is_identity() {
        return points.to_vec();
    }
    let anchored = matrix.anchored_at(center);
    points.iter().map(|p| anchored.apply(*p)).collect()
}

/// Corner points of `selrect` transformed about its own center
pub fn rect_points(selrect: &Selrect, matrix: &Matrix) -> Vec<Point> {
    transform_points(&selrect.corners(), selrect.center(), matrix)
}
