//! Pass-through content of `svg-raw` shapes

use indexmap::IndexMap;
use log::debug;

use crate::meta::NAMESPACE;
use crate::shape::{SvgRawContent, SvgValue};
use crate::style::parse_style;
use crate::tree::traverse::DESCRIPTOR_TAG;
use crate::tree::{shape_descriptor_child, Node};

const CONTENT_TAG: &str = "penpot:svg-content";
const TAG_ATTR: &str = "penpot:tag";

/// Build the raw content of an `svg-raw` shape
///
/// `None` when the shape has no `penpot:svg-content` descriptor.
pub fn svg_content(node: &Node) -> Option<SvgRawContent> {
    let Some(descriptor) = shape_descriptor_child(node, CONTENT_TAG) else {
        debug!("svg-raw shape <{}> has no {}", node.tag, CONTENT_TAG);
        return None;
    };

    let prefix = format!("{}:", NAMESPACE);
    let attrs: IndexMap<String, String> = descriptor
        .attrs
        .iter()
        .filter(|(name, _)| !name.starts_with(&prefix))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    let tag = descriptor.attr(TAG_ATTR).map(str::to_string);
    let children = node
        .elements()
        .filter(|child| child.tag != DESCRIPTOR_TAG)
        .last()
        .and_then(|wrapped| wrapped.content.as_ref());

    let content = match (tag.as_deref(), children) {
        (Some("svg"), Some(children)) => Some(
            children
                .iter()
                .map(|child| camelize(SvgValue::from(child)))
                .collect(),
        ),
        (Some("text"), Some(children)) => Some(children.iter().map(SvgValue::from).collect()),
        _ => None,
    };

    Some(SvgRawContent { attrs, tag, content })
}

/// Rename every map key to camel case, recursively
///
/// `style` strings are expanded into maps first, so their properties are
/// renamed as well.
pub fn camelize(value: SvgValue) -> SvgValue {
    match value {
        SvgValue::Map(map) => SvgValue::Map(
            map.into_iter()
                .map(|(key, value)| {
                    let value = match value {
                        SvgValue::Text(text) if key == "style" => SvgValue::Map(
                            parse_style(&text)
                                .into_iter()
                                .map(|(k, v)| (k, SvgValue::Text(v)))
                                .collect(),
                        ),
                        other => other,
                    };
                    (camelize_key(&key), camelize(value))
                })
                .collect(),
        ),
        SvgValue::List(items) => SvgValue::List(items.into_iter().map(camelize).collect()),
        text @ SvgValue::Text(_) => text,
    }
}

/// `stroke-width` → `strokeWidth`, `xlink:href` → `xlinkHref`
pub fn camelize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for (i, part) in key.split(|c: char| c == '-' || c == ':').filter(|p| !p.is_empty()).enumerate() {
        if i == 0 {
            out.push_str(part);
            continue;
        }
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
