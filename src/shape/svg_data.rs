//! Raw SVG attributes a shape's geometry and paint are read from
//!
//! Exported shapes wrap their drawable element in a group, so the values
//! live partly on the shape node and partly on data elements below it.
//! Inline `style` declarations are expanded into plain attributes.

use indexmap::IndexMap;

use crate::meta::{decode, decode_value};
use crate::shape::ShapeType;
use crate::style::parse_style;
use crate::tree::traverse::DESCRIPTOR_TAG;
use crate::tree::Node;

/// Elements that carry the drawable geometry of a shape
const DATA_TAGS: &[&str] = &["rect", "ellipse", "path", "text", "foreignObject", "image"];

/// Class of the rect holding a frame's geometry and fill
const FRAME_BACKGROUND: &str = "frame-background";

/// Merged attribute view of a shape node
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SvgData {
    attrs: IndexMap<String, String>,
}

impl SvgData {
    pub fn new(shape_type: ShapeType, node: &Node) -> Self {
        let mut data = SvgData::default();

        match shape_type {
            ShapeType::Rect
            | ShapeType::Image
            | ShapeType::Path
            | ShapeType::Text
            | ShapeType::Circle => {
                data.merge(node);
                for element in data_elements(node).filter(|n| DATA_TAGS.contains(&n.tag.as_str())) {
                    data.merge(element);
                }
            }
            ShapeType::Frame => {
                if let Some(background) = data_elements(node).find(|n| is_frame_background(n)) {
                    data.merge(background);
                }
                data.merge(node);
            }
            ShapeType::Group | ShapeType::SvgRaw | ShapeType::Bool => data.merge(node),
        }

        data
    }

    /// Later attributes override earlier ones; style declarations are expanded
    fn merge(&mut self, node: &Node) {
        for (name, value) in &node.attrs {
            if name == "style" || name == "data-style" {
                self.attrs.extend(parse_style(value));
            } else {
                self.attrs.insert(name.clone(), value.clone());
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// A numeric attribute; malformed values are logged and treated as absent
    pub fn float(&self, name: &str) -> Option<f64> {
        self.get(name)
            .and_then(|value| decode_value(name, value, decode::float))
    }

    pub fn attrs(&self) -> &IndexMap<String, String> {
        &self.attrs
    }
}

fn data_elements(node: &Node) -> impl Iterator<Item = &Node> {
    node.descendants_pruned(|n| n.tag != DESCRIPTOR_TAG && n.tag != "defs")
}

fn is_frame_background(node: &Node) -> bool {
    node.attr("class")
        .map(|class| class.split_whitespace().any(|c| c == FRAME_BACKGROUND))
        .unwrap_or(false)
}
