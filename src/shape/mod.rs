//! Shape property extraction
//!
//! [`parse_data`] turns one shape element into a [`ShapeAttrs`] by running
//! the attribute stages in a fixed order over a single raw-attribute view.

mod compose;
pub mod gradient;
mod position;
pub mod svg_data;
pub mod svg_raw;
mod types;

use log::trace;

pub use compose::strip_id_prefixes;
pub use svg_data::SvgData;
pub use types::{
    BlendMode, Blur, Export, Gradient, GradientStop, GradientType, ImageMetadata, Shadow,
    ShadowColor, ShapeAttrs, ShapeContent, ShapeType, StrokeAlignment, SvgRawContent, SvgValue,
    Viewbox,
};

use crate::ids::IdSource;
use crate::tree::Item;

/// Build the properties of a shape
///
/// Returns `None` for close markers, which end a shape rather than start
/// one.
pub fn parse_data(shape_type: ShapeType, item: &Item<'_>, ids: &dyn IdSource) -> Option<ShapeAttrs> {
    let node = item.node()?;
    trace!("parsing <{}> as {}", node.tag, shape_type);

    let data = SvgData::new(shape_type, node);

    let attrs = ShapeAttrs::default()
        .with_common(node)
        .with_position(shape_type, node, &data)
        .with_fill(node, &data)
        .with_stroke(node, &data)
        .with_layer(&data)
        .with_shadows(node, ids)
        .with_blur(node, ids)
        .with_exports(node)
        .with_svg_attrs(node, &data)
        .with_kind_extras(shape_type, node, &data);

    Some(attrs)
}
