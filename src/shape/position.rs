//! Position, size, selection rectangle and corner points per shape kind

use log::warn;

use crate::geom::{rect_points, transform_points, Point, Selrect};
use crate::meta::{decode, meta};
use crate::path::{parse_path, PathContent};
use crate::shape::svg_data::SvgData;
use crate::shape::{ShapeAttrs, ShapeContent, ShapeType};
use crate::tree::Node;

impl ShapeAttrs {
    /// Derive geometry from the raw attributes
    ///
    /// Reads the shape's `transform` and `transform-inverse`, so it runs
    /// after the common stage.
    pub fn with_position(self, shape_type: ShapeType, node: &Node, data: &SvgData) -> Self {
        match shape_type {
            ShapeType::Frame | ShapeType::Rect | ShapeType::Image | ShapeType::Text => self
                .with_rect(
                    data.float("x"),
                    data.float("y"),
                    data.float("width"),
                    data.float("height"),
                ),
            ShapeType::Circle => {
                let rx = data.float("rx").or_else(|| data.float("r"));
                let ry = data.float("ry").or_else(|| data.float("r"));
                let cx = data.float("cx");
                let cy = data.float("cy");
                self.with_rect(
                    cx.zip(rx).map(|(cx, rx)| cx - rx),
                    cy.zip(ry).map(|(cy, ry)| cy - ry),
                    rx.map(|rx| rx * 2.0),
                    ry.map(|ry| ry * 2.0),
                )
            }
            ShapeType::Path => self.with_path(node, data),
            ShapeType::SvgRaw => {
                let x = meta(node, "x", decode::float);
                let y = meta(node, "y", decode::float);
                let width = meta(node, "width", decode::float);
                let height = meta(node, "height", decode::float);
                if x.is_none() && y.is_none() && width.is_none() && height.is_none() {
                    self
                } else {
                    self.with_rect(x, y, width, height)
                }
            }
            ShapeType::Group | ShapeType::Bool => self,
        }
    }

    /// Store the rectangle and derive `selrect` and `points`
    ///
    /// Missing values stay absent on the shape but count as zero for the
    /// selection rectangle.
    fn with_rect(
        mut self,
        x: Option<f64>,
        y: Option<f64>,
        width: Option<f64>,
        height: Option<f64>,
    ) -> Self {
        let selrect = Selrect::new(
            x.unwrap_or(0.0),
            y.unwrap_or(0.0),
            width.unwrap_or(0.0),
            height.unwrap_or(0.0),
        );
        let transform = self.transform.unwrap_or_default();

        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        self.points = Some(rect_points(&selrect, &transform));
        self.selrect = Some(selrect);
        self
    }

    /// Path content in the shape's local space
    ///
    /// The exported `d` is in document space; undoing the shape transform
    /// about the stored center yields the unrotated content and its bounds.
    fn with_path(mut self, node: &Node, data: &SvgData) -> Self {
        let content = match data.get("d") {
            Some(d) => match parse_path(d) {
                Ok(content) => content,
                Err(errors) => {
                    for err in errors {
                        warn!("invalid path data: {}", err);
                    }
                    return self;
                }
            },
            None => PathContent::default(),
        };

        let center = Point::new(
            meta(node, "center-x", decode::float).unwrap_or(0.0),
            meta(node, "center-y", decode::float).unwrap_or(0.0),
        );
        let transform = self.transform.unwrap_or_default();
        let inverse = self.transform_inverse.unwrap_or_default();

        let content = content.transform(&inverse.anchored_at(center));
        if let Some(selrect) = content.selrect() {
            self.points = Some(transform_points(&selrect.corners(), center, &transform));
            self.selrect = Some(selrect);
        }
        self.content = Some(ShapeContent::Path(content));
        self
    }
}
