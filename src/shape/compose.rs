//! Attribute stages of the shape pipeline
//!
//! Each stage takes the property bag by value and returns it with its own
//! fields filled in. Stages only read fields written by the common and
//! geometry stages.

use indexmap::IndexMap;
use regex::Regex;

use crate::color::is_hex_color;
use crate::ids::IdSource;
use crate::meta::{decode, decode_value, meta};
use crate::shape::gradient;
use crate::shape::svg_data::SvgData;
use crate::shape::svg_raw::svg_content;
use crate::shape::{
    Blur, Export, ImageMetadata, Shadow, ShadowColor, ShapeAttrs, ShapeContent, ShapeType,
    StrokeAlignment, SvgValue, Viewbox,
};
use crate::tree::{shape_descriptor_child, Node};

fn id_prefix_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"([0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}-)+",
        )
        .expect("valid regex")
    })
}

/// Remove shape-id prefixes the exporter adds to ids referenced in values
pub fn strip_id_prefixes(value: &str) -> String {
    id_prefix_regex().replace_all(value, "").into_owned()
}

/// Raw attribute, falling back from metadata
fn meta_or_raw<T>(
    node: &Node,
    data: &SvgData,
    name: &str,
    decode: fn(&str) -> Result<T, crate::error::DecodeError>,
) -> Option<T> {
    meta(node, name, decode)
        .or_else(|| data.get(name).and_then(|value| decode_value(name, value, decode)))
}

impl ShapeAttrs {
    /// Identity, flags, transforms and constraints
    pub fn with_common(mut self, node: &Node) -> Self {
        self.name = meta(node, "name", decode::text);
        self.blocked = meta(node, "blocked", decode::boolean);
        self.hidden = meta(node, "hidden", decode::boolean);
        self.transform = meta(node, "transform", decode::matrix);
        self.transform_inverse = meta(node, "transform-inverse", decode::matrix);
        self.flip_x = meta(node, "flip-x", decode::boolean);
        self.flip_y = meta(node, "flip-y", decode::boolean);
        self.proportion = meta(node, "proportion", decode::float);
        self.proportion_lock = meta(node, "proportion-lock", decode::boolean);
        self.rotation = meta(node, "rotation", decode::float);
        self.constraints_h = meta(node, "constraints-h", decode::keyword);
        self.constraints_v = meta(node, "constraints-v", decode::keyword);
        self.fixed_scroll = meta(node, "fixed-scroll", decode::boolean);
        self
    }

    /// Solid or gradient fill
    pub fn with_fill(mut self, node: &Node, data: &SvgData) -> Self {
        self.hide_fill_on_export = meta(node, "hide-fill-on-export", decode::boolean);

        let Some(fill) = data.get("fill") else {
            return self;
        };

        if let Some(gradient) = gradient::resolve(node, fill) {
            self.fill_color_gradient = Some(gradient);
            self.fill_color = None;
            self.fill_opacity = None;
        } else if is_hex_color(fill) {
            self.fill_color = Some(fill.trim().to_string());
            self.fill_opacity = Some(
                data.get("fill-opacity")
                    .and_then(|value| decode_value("fill-opacity", value, decode::fraction))
                    .unwrap_or(1.0),
            );
        }
        self
    }

    /// Stroke paint, width, alignment, style and caps
    ///
    /// Inner strokes are drawn clipped to the shape, so their stored width
    /// is half the exported one.
    pub fn with_stroke(mut self, node: &Node, data: &SvgData) -> Self {
        self.stroke_alignment =
            meta_or_raw(node, data, "stroke-alignment", decode::symbol::<StrokeAlignment>);
        self.stroke_style = meta_or_raw(node, data, "stroke-style", decode::keyword);
        self.stroke_cap_start = meta(node, "stroke-cap-start", decode::keyword);
        self.stroke_cap_end = meta(node, "stroke-cap-end", decode::keyword);

        let stroke = data.get("stroke");
        self.stroke_color = stroke
            .filter(|value| is_hex_color(value))
            .map(|value| value.trim().to_string());
        self.stroke_opacity = data
            .get("stroke-opacity")
            .and_then(|value| decode_value("stroke-opacity", value, decode::fraction));
        self.stroke_width = data.float("stroke-width");

        if let Some(gradient) = stroke.and_then(|value| gradient::resolve(node, value)) {
            self.stroke_color_gradient = Some(gradient);
            self.stroke_color = None;
            self.stroke_opacity = None;
        }

        if self.stroke_alignment == Some(StrokeAlignment::Inner) {
            self.stroke_width = self.stroke_width.map(|width| width / 2.0);
        }
        self
    }

    /// Blend mode and opacity, from raw attributes only
    pub fn with_layer(mut self, data: &SvgData) -> Self {
        self.blend_mode = data
            .get("mix-blend-mode")
            .and_then(|value| decode_value("mix-blend-mode", value, decode::symbol));
        self.opacity = data.float("opacity");
        self
    }

    pub fn with_shadows(mut self, node: &Node, ids: &dyn IdSource) -> Self {
        let shadows: Vec<Shadow> = descriptor_entries(node, "penpot:shadows", "penpot:shadow")
            .map(|entry| Shadow {
                id: ids.next_id(),
                style: meta(entry, "shadow-type", decode::keyword),
                hidden: meta(entry, "hidden", decode::boolean),
                color: ShadowColor {
                    color: meta(entry, "color", decode::text),
                    opacity: meta(entry, "opacity", decode::fraction),
                },
                offset_x: meta(entry, "offset-x", decode::float),
                offset_y: meta(entry, "offset-y", decode::float),
                blur: meta(entry, "blur", decode::float),
                spread: meta(entry, "spread", decode::float),
            })
            .collect();

        if !shadows.is_empty() {
            self.shadow = Some(shadows);
        }
        self
    }

    /// The first `penpot:blur` entry
    pub fn with_blur(mut self, node: &Node, ids: &dyn IdSource) -> Self {
        if let Some(entry) = shape_descriptor_child(node, "penpot:blur") {
            self.blur = Some(Blur {
                id: ids.next_id(),
                kind: meta(entry, "blur-type", decode::keyword),
                hidden: meta(entry, "hidden", decode::boolean),
                value: meta(entry, "value", decode::float),
            });
        }
        self
    }

    pub fn with_exports(mut self, node: &Node) -> Self {
        let exports: Vec<Export> = descriptor_entries(node, "penpot:exports", "penpot:export")
            .map(|entry| Export {
                kind: meta(entry, "type", decode::keyword),
                suffix: meta(entry, "suffix", decode::text),
                scale: meta(entry, "scale", decode::float),
            })
            .collect();

        if !exports.is_empty() {
            self.exports = Some(exports);
        }
        self
    }

    /// Attributes kept from the original SVG the shape was imported from
    pub fn with_svg_attrs(mut self, node: &Node, data: &SvgData) -> Self {
        let Some(import) = shape_descriptor_child(node, "penpot:svg-import") else {
            return self;
        };

        if let Some(names) = meta(import, "svg-attrs", decode::text) {
            let attrs: IndexMap<String, String> = names
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .filter_map(|name| {
                    data.get(name)
                        .map(|value| (name.to_string(), strip_id_prefixes(value)))
                })
                .collect();
            self.svg_attrs = Some(attrs);
        }

        let viewbox = ["svg-viewbox-x", "svg-viewbox-y", "svg-viewbox-width", "svg-viewbox-height"]
            .map(|name| meta(import, name, decode::float));
        if viewbox.iter().any(Option::is_some) {
            let [x, y, width, height] = viewbox.map(|v| v.unwrap_or(0.0));
            self.svg_viewbox = Some(Viewbox { x, y, width, height });
        }

        self.svg_transform = meta(import, "svg-transform", decode::matrix);

        let defs: IndexMap<String, SvgValue> = import
            .elements()
            .filter(|n| n.tag == "penpot:svg-def")
            .filter_map(|def| {
                let id = def.attr("def-id")?;
                let body = def.elements().next()?;
                Some((id.to_string(), SvgValue::from(body)))
            })
            .collect();
        if !defs.is_empty() {
            self.svg_defs = Some(defs);
        }
        self
    }

    /// Stages that only apply to some kinds
    pub fn with_kind_extras(self, shape_type: ShapeType, node: &Node, data: &SvgData) -> Self {
        let attrs = match shape_type {
            ShapeType::Rect => self.with_radii(node, data),
            ShapeType::Text => self.with_text(node),
            ShapeType::Group => self.with_group(node),
            ShapeType::SvgRaw => self.with_svg_content(node),
            _ => self,
        };
        attrs.with_image(shape_type, node)
    }

    /// Per-corner radii when `r1` is declared, else the `rx`/`ry` pair
    fn with_radii(mut self, node: &Node, data: &SvgData) -> Self {
        match meta(node, "r1", decode::float) {
            Some(r1) => {
                self.r1 = Some(r1);
                self.r2 = meta(node, "r2", decode::float);
                self.r3 = meta(node, "r3", decode::float);
                self.r4 = meta(node, "r4", decode::float);
            }
            None => {
                self.rx = Some(data.float("rx").unwrap_or(0.0));
                self.ry = Some(data.float("ry").unwrap_or(0.0));
            }
        }
        self
    }

    /// Media metadata: the image itself for images, a fill image otherwise
    fn with_image(mut self, shape_type: ShapeType, node: &Node) -> Self {
        let Some(id) = meta(node, "media-id", decode::keyword) else {
            return self;
        };
        let metadata = ImageMetadata {
            id,
            width: meta(node, "media-width", decode::float),
            height: meta(node, "media-height", decode::float),
            mtype: meta(node, "media-mtype", decode::keyword),
        };
        if shape_type == ShapeType::Image {
            self.metadata = Some(metadata);
        } else {
            self.fill_image = Some(metadata);
        }
        self
    }

    fn with_text(mut self, node: &Node) -> Self {
        self.grow_type = meta(node, "grow-type", decode::keyword);
        if let Some(content) = meta(node, "content", decode::json) {
            self.content = Some(ShapeContent::Text(content));
        }
        self
    }

    fn with_group(mut self, node: &Node) -> Self {
        if meta(node, "masked-group", decode::boolean) == Some(true) {
            self.masked_group = Some(true);
        }
        self
    }

    fn with_svg_content(mut self, node: &Node) -> Self {
        self.content = svg_content(node).map(ShapeContent::SvgRaw);
        self
    }
}

/// `entry` elements inside the descriptor's `list` child
fn descriptor_entries<'a>(
    node: &'a Node,
    list: &str,
    entry: &'a str,
) -> impl Iterator<Item = &'a Node> + 'a {
    shape_descriptor_child(node, list)
        .into_iter()
        .flat_map(|container| container.elements())
        .filter(move |n| n.tag == entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Matrix;
    use crate::ids::SequentialIds;
    use crate::shape::{BlendMode, Gradient, GradientType};
    use crate::tree::traverse::{DESCRIPTOR_TAG, TYPE_ATTR};
    use pretty_assertions::assert_eq;

    fn descriptor(kind: &str) -> Node {
        Node::new(DESCRIPTOR_TAG).with_attr(TYPE_ATTR, kind)
    }

    fn data(kind: ShapeType, node: &Node) -> SvgData {
        SvgData::new(kind, node)
    }

    fn gradient_shape(authored: bool) -> Node {
        painted_with_gradient(authored, Node::new("rect").with_attr("fill", "url(#g1)"))
    }

    fn painted_with_gradient(authored: bool, painted: Node) -> Node {
        let mut gradient = Node::new("linearGradient")
            .with_attr("id", "g1")
            .with_attr("x1", "0")
            .with_attr("y1", "0")
            .with_attr("x2", "1")
            .with_attr("y2", "1")
            .with_child(Node::new("stop").with_attr("offset", "0").with_attr("stop-color", "#000000"))
            .with_child(Node::new("stop").with_attr("offset", "1").with_attr("stop-color", "#ffffff"));
        if authored {
            gradient = gradient.with_attr("penpot:gradient", "true");
        }
        Node::new("g")
            .with_child(descriptor("rect"))
            .with_child(Node::new("defs").with_child(gradient))
            .with_child(painted)
    }

    #[test]
    fn test_common_stage() {
        let node = Node::new("g").with_child(
            descriptor("rect")
                .with_attr("penpot:name", "Box")
                .with_attr("penpot:hidden", "true")
                .with_attr("penpot:blocked", "no")
                .with_attr("penpot:transform", "matrix(1, 0, 0, 1, 0, 0)")
                .with_attr("penpot:rotation", "12.5")
                .with_attr("penpot:proportion", "not-a-number")
                .with_attr("penpot:constraints-h", "leftright"),
        );
        let attrs = ShapeAttrs::default().with_common(&node);
        assert_eq!(attrs.name.as_deref(), Some("Box"));
        assert_eq!(attrs.hidden, Some(true));
        assert_eq!(attrs.blocked, Some(false));
        assert_eq!(attrs.transform, Some(Matrix::identity()));
        assert_eq!(attrs.rotation, Some(12.5));
        assert_eq!(attrs.proportion, None);
        assert_eq!(attrs.constraints_h.as_deref(), Some("leftright"));
    }

    #[test]
    fn test_common_stage_is_idempotent() {
        let node = Node::new("g").with_child(
            descriptor("rect")
                .with_attr("penpot:name", "Box")
                .with_attr("penpot:flip-x", "true"),
        );
        let once = ShapeAttrs::default().with_common(&node);
        let twice = once.clone().with_common(&node);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_hex_fill_defaults_opacity() {
        let node = Node::new("g")
            .with_child(descriptor("rect"))
            .with_child(Node::new("rect").with_attr("fill", "#31efb8"));
        let attrs = ShapeAttrs::default().with_fill(&node, &data(ShapeType::Rect, &node));
        assert_eq!(attrs.fill_color.as_deref(), Some("#31efb8"));
        assert_eq!(attrs.fill_opacity, Some(1.0));
        assert_eq!(attrs.fill_color_gradient, None);
    }

    #[test]
    fn test_named_color_fill_is_unset() {
        let node = Node::new("rect").with_attr("fill", "red").with_attr("fill-opacity", "0.3");
        let attrs = ShapeAttrs::default().with_fill(&node, &data(ShapeType::Group, &node));
        assert_eq!(attrs.fill_color, None);
        assert_eq!(attrs.fill_opacity, None);
    }

    #[test]
    fn test_authored_gradient_fill() {
        let node = gradient_shape(true);
        let attrs = ShapeAttrs::default().with_fill(&node, &data(ShapeType::Rect, &node));
        let gradient: Gradient = attrs.fill_color_gradient.expect("gradient");
        assert_eq!(gradient.kind, GradientType::Linear);
        assert_eq!(
            (gradient.start_x, gradient.start_y, gradient.end_x, gradient.end_y, gradient.width),
            (0.0, 0.0, 1.0, 1.0, 1.0)
        );
        assert_eq!(gradient.stops.len(), 2);
        assert_eq!(attrs.fill_color, None);
    }

    #[test]
    fn test_unauthored_gradient_fill() {
        let node = gradient_shape(false);
        let attrs = ShapeAttrs::default().with_fill(&node, &data(ShapeType::Rect, &node));
        assert_eq!(attrs.fill_color, None);
        assert_eq!(attrs.fill_color_gradient, None);
    }

    #[test]
    fn test_inner_stroke_halves_width() {
        let node = Node::new("g")
            .with_child(descriptor("rect").with_attr("penpot:stroke-alignment", "inner"))
            .with_child(
                Node::new("rect")
                    .with_attr("stroke", "#000000")
                    .with_attr("stroke-width", "4")
                    .with_attr("stroke-opacity", "0.5"),
            );
        let attrs = ShapeAttrs::default().with_stroke(&node, &data(ShapeType::Rect, &node));
        assert_eq!(attrs.stroke_alignment, Some(StrokeAlignment::Inner));
        assert_eq!(attrs.stroke_width, Some(2.0));
        assert_eq!(attrs.stroke_color.as_deref(), Some("#000000"));
        assert_eq!(attrs.stroke_opacity, Some(0.5));
    }

    fn gradient_stroke(authored: bool) -> ShapeAttrs {
        let node = painted_with_gradient(
            authored,
            Node::new("rect")
                .with_attr("stroke", "url(#g1)")
                .with_attr("stroke-opacity", "0.5")
                .with_attr("stroke-width", "2"),
        );
        ShapeAttrs::default().with_stroke(&node, &data(ShapeType::Rect, &node))
    }

    #[test]
    fn test_authored_gradient_stroke() {
        let attrs = gradient_stroke(true);
        let gradient = attrs.stroke_color_gradient.expect("gradient");
        assert_eq!(gradient.kind, GradientType::Linear);
        assert_eq!(gradient.stops.len(), 2);
        assert_eq!(attrs.stroke_color, None);
        assert_eq!(attrs.stroke_opacity, None);
        assert_eq!(attrs.stroke_width, Some(2.0));
    }

    #[test]
    fn test_unauthored_gradient_stroke() {
        let attrs = gradient_stroke(false);
        assert_eq!(attrs.stroke_color_gradient, None);
        assert_eq!(attrs.stroke_color, None);
    }

    #[test]
    fn test_center_stroke_keeps_width() {
        let node = Node::new("path")
            .with_attr("stroke-alignment", "center")
            .with_attr("stroke-width", "4")
            .with_attr("penpot:stroke-style", "dashed")
            .with_attr("penpot:stroke-cap-end", "round");
        let attrs = ShapeAttrs::default().with_stroke(&node, &data(ShapeType::Group, &node));
        assert_eq!(attrs.stroke_alignment, Some(StrokeAlignment::Center));
        assert_eq!(attrs.stroke_width, Some(4.0));
        assert_eq!(attrs.stroke_style.as_deref(), Some("dashed"));
        assert_eq!(attrs.stroke_cap_end.as_deref(), Some("round"));
        assert_eq!(attrs.stroke_color, None);
    }

    #[test]
    fn test_layer_options() {
        let node = Node::new("g").with_attr("style", "mix-blend-mode: multiply; opacity: 0.4");
        let attrs = ShapeAttrs::default().with_layer(&data(ShapeType::Group, &node));
        assert_eq!(attrs.blend_mode, Some(BlendMode::Multiply));
        assert_eq!(attrs.opacity, Some(0.4));

        let node = Node::new("g").with_attr("mix-blend-mode", "sparkle");
        let attrs = ShapeAttrs::default().with_layer(&data(ShapeType::Group, &node));
        assert_eq!(attrs.blend_mode, None);
    }

    #[test]
    fn test_shadows_get_fresh_ids() {
        let shadow = |kind: &str| {
            Node::new("penpot:shadow")
                .with_attr("penpot:shadow-type", kind)
                .with_attr("penpot:color", "#000000")
                .with_attr("penpot:opacity", "0.2")
                .with_attr("penpot:offset-x", "4")
                .with_attr("penpot:offset-y", "4")
                .with_attr("penpot:blur", "8")
                .with_attr("penpot:spread", "0")
        };
        let node = Node::new("g").with_child(
            descriptor("rect").with_child(
                Node::new("penpot:shadows")
                    .with_child(shadow("drop-shadow"))
                    .with_child(shadow("inner-shadow")),
            ),
        );
        let ids = SequentialIds::new();
        let shadows = ShapeAttrs::default()
            .with_shadows(&node, &ids)
            .shadow
            .expect("shadows");

        assert_eq!(shadows.len(), 2);
        assert_ne!(shadows[0].id, shadows[1].id);
        assert_eq!(shadows[0].style.as_deref(), Some("drop-shadow"));
        assert_eq!(shadows[1].style.as_deref(), Some("inner-shadow"));
        assert_eq!(shadows[0].color.opacity, Some(0.2));
        assert_eq!(shadows[0].blur, Some(8.0));
    }

    #[test]
    fn test_no_shadows_leaves_field_unset() {
        let node = Node::new("g").with_child(descriptor("rect"));
        let attrs = ShapeAttrs::default().with_shadows(&node, &SequentialIds::new());
        assert_eq!(attrs.shadow, None);
    }

    #[test]
    fn test_first_blur_wins() {
        let node = Node::new("g").with_child(
            descriptor("rect")
                .with_child(
                    Node::new("penpot:blur")
                        .with_attr("penpot:blur-type", "layer-blur")
                        .with_attr("penpot:value", "4"),
                )
                .with_child(Node::new("penpot:blur").with_attr("penpot:value", "9")),
        );
        let blur = ShapeAttrs::default()
            .with_blur(&node, &SequentialIds::new())
            .blur
            .expect("blur");
        assert_eq!(blur.kind.as_deref(), Some("layer-blur"));
        assert_eq!(blur.value, Some(4.0));
    }

    #[test]
    fn test_exports() {
        let node = Node::new("g").with_child(
            descriptor("rect").with_child(
                Node::new("penpot:exports")
                    .with_child(
                        Node::new("penpot:export")
                            .with_attr("penpot:type", "png")
                            .with_attr("penpot:suffix", "@2x")
                            .with_attr("penpot:scale", "2"),
                    )
                    .with_child(Node::new("penpot:export").with_attr("penpot:type", "svg")),
            ),
        );
        let exports = ShapeAttrs::default().with_exports(&node).exports.expect("exports");
        assert_eq!(
            exports,
            vec![
                Export {
                    kind: Some("png".to_string()),
                    suffix: Some("@2x".to_string()),
                    scale: Some(2.0)
                },
                Export {
                    kind: Some("svg".to_string()),
                    suffix: None,
                    scale: None
                },
            ]
        );
    }

    #[test]
    fn test_strip_id_prefixes() {
        assert_eq!(
            strip_id_prefixes("url(#3f2b1c4d-0a1b-4c2d-8e3f-123456789abc-fill-0)"),
            "url(#fill-0)"
        );
        assert_eq!(strip_id_prefixes("evenodd"), "evenodd");
    }

    #[test]
    fn test_svg_import_attributes() {
        let node = Node::new("g")
            .with_child(
                descriptor("path").with_child(
                    Node::new("penpot:svg-import")
                        .with_attr("penpot:svg-attrs", "fill-rule, clip-path,missing")
                        .with_attr("penpot:svg-viewbox-x", "0")
                        .with_attr("penpot:svg-viewbox-width", "24")
                        .with_attr("penpot:svg-transform", "matrix(2, 0, 0, 2, 0, 0)")
                        .with_child(
                            Node::new("penpot:svg-def")
                                .with_attr("def-id", "clip1")
                                .with_child(Node::new("clipPath").with_child(Node::new("rect"))),
                        ),
                ),
            )
            .with_child(
                Node::new("path")
                    .with_attr("fill-rule", "evenodd")
                    .with_attr("clip-path", "url(#3f2b1c4d-0a1b-4c2d-8e3f-123456789abc-clip1)"),
            );
        let attrs = ShapeAttrs::default().with_svg_attrs(&node, &data(ShapeType::Path, &node));

        let svg_attrs = attrs.svg_attrs.expect("svg attrs");
        assert_eq!(
            svg_attrs.into_iter().collect::<Vec<_>>(),
            vec![
                ("fill-rule".to_string(), "evenodd".to_string()),
                ("clip-path".to_string(), "url(#clip1)".to_string()),
            ]
        );
        assert_eq!(
            attrs.svg_viewbox,
            Some(Viewbox {
                x: 0.0,
                y: 0.0,
                width: 24.0,
                height: 0.0
            })
        );
        assert_eq!(attrs.svg_transform, Some(Matrix::new(2.0, 0.0, 0.0, 2.0, 0.0, 0.0)));
        let defs = attrs.svg_defs.expect("defs");
        assert!(defs.contains_key("clip1"));
    }

    #[test]
    fn test_no_svg_import_descriptor() {
        let node = Node::new("g").with_child(descriptor("path"));
        let attrs = ShapeAttrs::default().with_svg_attrs(&node, &data(ShapeType::Path, &node));
        assert_eq!(attrs, ShapeAttrs::default());
    }

    #[test]
    fn test_corner_radii_precedence() {
        let node = Node::new("g")
            .with_child(
                descriptor("rect")
                    .with_attr("penpot:r1", "1")
                    .with_attr("penpot:r2", "2")
                    .with_attr("penpot:r3", "3")
                    .with_attr("penpot:r4", "4"),
            )
            .with_child(Node::new("rect").with_attr("rx", "8").with_attr("ry", "8"));
        let attrs = ShapeAttrs::default().with_kind_extras(
            ShapeType::Rect,
            &node,
            &data(ShapeType::Rect, &node),
        );
        assert_eq!(
            (attrs.r1, attrs.r2, attrs.r3, attrs.r4),
            (Some(1.0), Some(2.0), Some(3.0), Some(4.0))
        );
        assert_eq!((attrs.rx, attrs.ry), (None, None));
    }

    #[test]
    fn test_single_radius_pair() {
        let node = Node::new("g")
            .with_child(descriptor("rect"))
            .with_child(Node::new("rect").with_attr("rx", "8"));
        let attrs = ShapeAttrs::default().with_kind_extras(
            ShapeType::Rect,
            &node,
            &data(ShapeType::Rect, &node),
        );
        assert_eq!((attrs.rx, attrs.ry), (Some(8.0), Some(0.0)));
        assert_eq!(attrs.r1, None);
    }

    #[test]
    fn test_image_metadata_and_fill_image() {
        let media = |kind: &str| {
            descriptor(kind)
                .with_attr("penpot:media-id", "abc")
                .with_attr("penpot:media-width", "640")
                .with_attr("penpot:media-height", "480")
                .with_attr("penpot:media-mtype", "image/png")
        };

        let image = Node::new("g").with_child(media("image"));
        let attrs = ShapeAttrs::default().with_kind_extras(
            ShapeType::Image,
            &image,
            &data(ShapeType::Image, &image),
        );
        let metadata = attrs.metadata.expect("metadata");
        assert_eq!(metadata.id, "abc");
        assert_eq!(metadata.width, Some(640.0));
        assert_eq!(metadata.mtype.as_deref(), Some("image/png"));
        assert_eq!(attrs.fill_image, None);

        let rect = Node::new("g").with_child(media("rect"));
        let attrs = ShapeAttrs::default().with_kind_extras(
            ShapeType::Rect,
            &rect,
            &data(ShapeType::Rect, &rect),
        );
        assert!(attrs.fill_image.is_some());
        assert_eq!(attrs.metadata, None);
    }

    #[test]
    fn test_text_content_is_json() {
        let node = Node::new("g").with_child(
            descriptor("text")
                .with_attr("penpot:grow-type", "auto-width")
                .with_attr("penpot:content", r#"{"type":"root","children":[]}"#),
        );
        let attrs = ShapeAttrs::default().with_kind_extras(
            ShapeType::Text,
            &node,
            &data(ShapeType::Text, &node),
        );
        assert_eq!(attrs.grow_type.as_deref(), Some("auto-width"));
        assert_eq!(
            attrs.content,
            Some(ShapeContent::Text(
                serde_json::json!({"type": "root", "children": []})
            ))
        );
    }

    #[test]
    fn test_malformed_text_content_is_absent() {
        let node = Node::new("g").with_child(descriptor("text").with_attr("penpot:content", "{oops"));
        let attrs = ShapeAttrs::default().with_kind_extras(
            ShapeType::Text,
            &node,
            &data(ShapeType::Text, &node),
        );
        assert_eq!(attrs.content, None);
    }

    #[test]
    fn test_masked_group() {
        let masked = Node::new("g").with_child(descriptor("group").with_attr("penpot:masked-group", "true"));
        let plain = Node::new("g").with_child(descriptor("group").with_attr("penpot:masked-group", "false"));
        let run = |node: &Node| {
            ShapeAttrs::default()
                .with_kind_extras(ShapeType::Group, node, &data(ShapeType::Group, node))
                .masked_group
        };
        assert_eq!(run(&masked), Some(true));
        assert_eq!(run(&plain), None);
    }
}
