//! Geometry primitives: points, matrices and selection rectangles

pub mod matrix;
pub mod rect;

pub use matrix::Matrix;
pub use rect::{rect_points, transform_points, Point, Selrect};
