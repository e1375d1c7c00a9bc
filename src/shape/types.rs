//! The shape property bag and its record types

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ParseError;
use crate::geom::{Matrix, Point, Selrect};
use crate::path::PathContent;
use crate::tree::{Child, Node};

/// Declared kind of a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeType {
    Frame,
    Rect,
    Image,
    Path,
    Text,
    Circle,
    Group,
    SvgRaw,
    /// Boolean operation; handled like a group
    Bool,
}

impl ShapeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeType::Frame => "frame",
            ShapeType::Rect => "rect",
            ShapeType::Image => "image",
            ShapeType::Path => "path",
            ShapeType::Text => "text",
            ShapeType::Circle => "circle",
            ShapeType::Group => "group",
            ShapeType::SvgRaw => "svg-raw",
            ShapeType::Bool => "bool",
        }
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "frame" => Ok(ShapeType::Frame),
            "rect" => Ok(ShapeType::Rect),
            "image" => Ok(ShapeType::Image),
            "path" => Ok(ShapeType::Path),
            "text" => Ok(ShapeType::Text),
            "circle" => Ok(ShapeType::Circle),
            "group" => Ok(ShapeType::Group),
            "svg-raw" => Ok(ShapeType::SvgRaw),
            "bool" => Ok(ShapeType::Bool),
            other => Err(ParseError::UnknownShapeType {
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrokeAlignment {
    Center,
    Inner,
    Outer,
}

impl FromStr for StrokeAlignment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "center" => Ok(StrokeAlignment::Center),
            "inner" => Ok(StrokeAlignment::Inner),
            "outer" => Ok(StrokeAlignment::Outer),
            _ => Err(()),
        }
    }
}

/// CSS `mix-blend-mode` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl FromStr for BlendMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "normal" => BlendMode::Normal,
            "multiply" => BlendMode::Multiply,
            "screen" => BlendMode::Screen,
            "overlay" => BlendMode::Overlay,
            "darken" => BlendMode::Darken,
            "lighten" => BlendMode::Lighten,
            "color-dodge" => BlendMode::ColorDodge,
            "color-burn" => BlendMode::ColorBurn,
            "hard-light" => BlendMode::HardLight,
            "soft-light" => BlendMode::SoftLight,
            "difference" => BlendMode::Difference,
            "exclusion" => BlendMode::Exclusion,
            "hue" => BlendMode::Hue,
            "saturation" => BlendMode::Saturation,
            "color" => BlendMode::Color,
            "luminosity" => BlendMode::Luminosity,
            _ => return Err(()),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientType {
    Linear,
    Radial,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientStop {
    pub color: String,
    pub opacity: f64,
    pub offset: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Gradient {
    #[serde(rename = "type")]
    pub kind: GradientType,
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
    pub width: f64,
    pub stops: Vec<GradientStop>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShadowColor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

/// Drop or inner shadow
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Shadow {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    pub color: ShadowColor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spread: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Blur {
    pub id: Uuid,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// An export rule: file type, name suffix and scale
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Export {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewbox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Reference to an uploaded media object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageMetadata {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(rename = "mime-type", skip_serializing_if = "Option::is_none")]
    pub mtype: Option<String>,
}

/// Loosely structured markup value
///
/// Raw SVG content is kept as a tree of maps, lists and strings so it can be
/// re-embedded without the importer understanding it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SvgValue {
    Text(String),
    List(Vec<SvgValue>),
    Map(IndexMap<String, SvgValue>),
}

impl From<&Node> for SvgValue {
    fn from(node: &Node) -> Self {
        let mut map = IndexMap::new();
        map.insert("tag".to_string(), SvgValue::Text(node.tag.clone()));
        map.insert(
            "attrs".to_string(),
            SvgValue::Map(
                node.attrs
                    .iter()
                    .map(|(k, v)| (k.clone(), SvgValue::Text(v.clone())))
                    .collect(),
            ),
        );
        if let Some(content) = &node.content {
            map.insert(
                "content".to_string(),
                SvgValue::List(content.iter().map(SvgValue::from).collect()),
            );
        }
        SvgValue::Map(map)
    }
}

impl From<&Child> for SvgValue {
    fn from(child: &Child) -> Self {
        match child {
            Child::Element(node) => SvgValue::from(node),
            Child::Text(text) => SvgValue::Text(text.clone()),
        }
    }
}

/// Pass-through markup of an `svg-raw` shape
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SvgRawContent {
    pub attrs: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<SvgValue>>,
}

/// Kind-specific `content` field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ShapeContent {
    Path(PathContent),
    /// Rich text document
    Text(serde_json::Value),
    SvgRaw(SvgRawContent),
}

/// Properties of one imported shape
///
/// Every field is optional; fields that were not derived from the document
/// are left out of the serialized form.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ShapeAttrs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<Matrix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform_inverse: Option<Matrix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flip_x: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flip_y: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proportion: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proportion_lock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints_h: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints_v: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_scroll: Option<bool>,

    // Geometry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selrect: Option<Selrect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Point>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<ShapeContent>,

    // Fill
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color_gradient: Option<Gradient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_image: Option<ImageMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_fill_on_export: Option<bool>,

    // Stroke
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_alignment: Option<StrokeAlignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color_gradient: Option<Gradient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_cap_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_cap_end: Option<String>,

    // Layer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blend_mode: Option<BlendMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    // Effects and exports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Vec<Shadow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur: Option<Blur>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exports: Option<Vec<Export>>,

    // SVG import
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svg_attrs: Option<IndexMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svg_viewbox: Option<Viewbox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svg_transform: Option<Matrix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svg_defs: Option<IndexMap<String, SvgValue>>,

    // Kind specific
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rx: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ry: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r3: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r4: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ImageMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grow_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masked_group: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_shape_type_names() {
        for kind in [
            ShapeType::Frame,
            ShapeType::Rect,
            ShapeType::Image,
            ShapeType::Path,
            ShapeType::Text,
            ShapeType::Circle,
            ShapeType::Group,
            ShapeType::SvgRaw,
            ShapeType::Bool,
        ] {
            assert_eq!(kind.as_str().parse::<ShapeType>(), Ok(kind));
            assert_eq!(
                serde_json::to_value(kind).unwrap(),
                serde_json::Value::String(kind.to_string())
            );
        }
    }

    #[test]
    fn test_unknown_shape_type() {
        assert_eq!(
            "star".parse::<ShapeType>(),
            Err(ParseError::UnknownShapeType {
                value: "star".to_string()
            })
        );
    }

    #[test]
    fn test_empty_attrs_serialize_to_empty_object() {
        let json = serde_json::to_value(ShapeAttrs::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn test_attrs_use_kebab_case_keys() {
        let attrs = ShapeAttrs {
            fill_color: Some("#fff".to_string()),
            stroke_alignment: Some(StrokeAlignment::Inner),
            blend_mode: Some(BlendMode::ColorDodge),
            ..Default::default()
        };
        let json = serde_json::to_value(attrs).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "fill-color": "#fff",
                "stroke-alignment": "inner",
                "blend-mode": "color-dodge"
            })
        );
    }

    #[test]
    fn test_svg_value_from_node() {
        let node = Node::new("circle").with_attr("r", "4").with_text("hi");
        let value = SvgValue::from(&node);
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"tag": "circle", "attrs": {"r": "4"}, "content": ["hi"]})
        );
    }
}
