//! Resolution of `url(#id)` paint references to authored gradients

use log::debug;
use regex::Regex;

use crate::meta::{decode, decode_value, meta};
use crate::shape::{Gradient, GradientStop, GradientType};
use crate::style::parse_style;
use crate::tree::Node;

/// Marker attribute set on gradients created in the editor
const AUTHORED_ATTR: &str = "penpot:gradient";

fn url_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*url\(\s*#([^)\s]+)\s*\)\s*$").expect("valid regex"))
}

/// The fragment id of a `url(#id)` value
pub fn reference_id(value: &str) -> Option<&str> {
    url_regex()
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Resolve a fill or stroke value against the gradients defined below `node`
///
/// Only gradients carrying the authoring marker are returned; anything else,
/// including dangling references, resolves to `None`.
pub fn resolve(node: &Node, value: &str) -> Option<Gradient> {
    let id = reference_id(value)?;
    let definition = node.descendants().find(|n| {
        matches!(n.tag.as_str(), "linearGradient" | "radialGradient") && n.attr("id") == Some(id)
    });

    let Some(definition) = definition else {
        debug!("gradient reference #{} has no definition", id);
        return None;
    };
    if definition.attr(AUTHORED_ATTR) != Some("true") {
        debug!("gradient #{} was not authored in the editor; ignoring", id);
        return None;
    }

    let stops = definition
        .elements()
        .filter(|n| n.tag == "stop")
        .map(parse_stop)
        .collect();

    let gradient = if definition.tag == "linearGradient" {
        let coord = |name: &str| {
            definition
                .attr(name)
                .and_then(|value| decode_value(name, value, decode::fraction))
                .unwrap_or(0.0)
        };
        Gradient {
            kind: GradientType::Linear,
            start_x: coord("x1"),
            start_y: coord("y1"),
            end_x: coord("x2"),
            end_y: coord("y2"),
            width: 1.0,
            stops,
        }
    } else {
        let param = |name: &str, default: f64| meta(definition, name, decode::float).unwrap_or(default);
        Gradient {
            kind: GradientType::Radial,
            start_x: param("start-x", 0.0),
            start_y: param("start-y", 0.0),
            end_x: param("end-x", 0.0),
            end_y: param("end-y", 0.0),
            width: param("width", 1.0),
            stops,
        }
    };

    Some(gradient)
}

/// Stop properties may be plain attributes or inline style
fn parse_stop(stop: &Node) -> GradientStop {
    let style = stop.attr("style").map(parse_style).unwrap_or_default();
    let property = |name: &str| {
        stop.attr(name)
            .or_else(|| style.get(name).map(String::as_str))
    };

    GradientStop {
        color: property("stop-color").unwrap_or("#000000").trim().to_string(),
        opacity: property("stop-opacity")
            .and_then(|value| decode_value("stop-opacity", value, decode::fraction))
            .unwrap_or(1.0),
        offset: property("offset")
            .and_then(|value| decode_value("offset", value, decode::fraction))
            .unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stop(offset: &str, color: &str) -> Node {
        Node::new("stop")
            .with_attr("offset", offset)
            .with_attr("stop-color", color)
    }

    fn linear(id: &str, authored: bool) -> Node {
        let mut gradient = Node::new("linearGradient")
            .with_attr("id", id)
            .with_attr("x1", "0")
            .with_attr("y1", "0")
            .with_attr("x2", "1")
            .with_attr("y2", "1")
            .with_child(stop("0", "#ff0000"))
            .with_child(stop("1", "#0000ff"));
        if authored {
            gradient = gradient.with_attr(AUTHORED_ATTR, "true");
        }
        gradient
    }

    fn shape_with(definition: Node) -> Node {
        Node::new("g").with_child(Node::new("defs").with_child(definition))
    }

    #[test]
    fn test_reference_id() {
        assert_eq!(reference_id("url(#g1)"), Some("g1"));
        assert_eq!(reference_id(" url( #fill-0 ) "), Some("fill-0"));
        assert_eq!(reference_id("#ff0000"), None);
        assert_eq!(reference_id("url(image.png)"), None);
    }

    #[test]
    fn test_authored_linear_gradient() {
        let node = shape_with(linear("g1", true));
        let gradient = resolve(&node, "url(#g1)").expect("gradient");
        assert_eq!(
            gradient,
            Gradient {
                kind: GradientType::Linear,
                start_x: 0.0,
                start_y: 0.0,
                end_x: 1.0,
                end_y: 1.0,
                width: 1.0,
                stops: vec![
                    GradientStop {
                        color: "#ff0000".to_string(),
                        opacity: 1.0,
                        offset: 0.0
                    },
                    GradientStop {
                        color: "#0000ff".to_string(),
                        opacity: 1.0,
                        offset: 1.0
                    },
                ],
            }
        );
    }

    #[test]
    fn test_unauthored_gradient_is_ignored() {
        let node = shape_with(linear("g2", false));
        assert_eq!(resolve(&node, "url(#g2)"), None);
    }

    #[test]
    fn test_dangling_reference() {
        let node = shape_with(linear("g1", true));
        assert_eq!(resolve(&node, "url(#missing)"), None);
    }

    #[test]
    fn test_radial_reads_metadata() {
        let node = shape_with(
            Node::new("radialGradient")
                .with_attr("id", "r")
                .with_attr(AUTHORED_ATTR, "true")
                .with_attr("cx", "0.9")
                .with_attr("penpot:start-x", "0.5")
                .with_attr("penpot:start-y", "0.5")
                .with_attr("penpot:end-x", "0.5")
                .with_attr("penpot:end-y", "1")
                .with_attr("penpot:width", "0.8")
                .with_child(
                    Node::new("stop").with_attr("style", "stop-color: #abcdef; stop-opacity: 50%"),
                ),
        );
        let gradient = resolve(&node, "url(#r)").expect("gradient");
        assert_eq!(gradient.kind, GradientType::Radial);
        assert_eq!(
            (gradient.start_x, gradient.end_y, gradient.width),
            (0.5, 1.0, 0.8)
        );
        assert_eq!(
            gradient.stops,
            vec![GradientStop {
                color: "#abcdef".to_string(),
                opacity: 0.5,
                offset: 0.0
            }]
        );
    }

    #[test]
    fn test_percentage_coordinates() {
        let node = shape_with(
            Node::new("linearGradient")
                .with_attr("id", "p")
                .with_attr(AUTHORED_ATTR, "true")
                .with_attr("x2", "100%")
                .with_attr("y2", "50%"),
        );
        let gradient = resolve(&node, "url(#p)").expect("gradient");
        assert_eq!((gradient.end_x, gradient.end_y), (1.0, 0.5));
        assert!(gradient.stops.is_empty());
    }
}
