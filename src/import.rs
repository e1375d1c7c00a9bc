//! Whole-document import
//!
//! Walks the flattened traversal once. Opening shapes are parsed and pushed
//! on a stack; each close marker pops the innermost open shape and attaches
//! it to its parent, so the result mirrors the shape nesting of the
//! document without recursion.

use log::{debug, info, warn};
use serde::Serialize;

use crate::config::ImportConfig;
use crate::error::DocumentError;
use crate::ids::IdSource;
use crate::shape::{parse_data, ShapeAttrs, ShapeType};
use crate::tree::{flatten, is_shape, shape_type, valid_document, Item, Node};

/// A parsed shape with its nested shapes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportedShape {
    #[serde(rename = "type")]
    pub shape_type: ShapeType,
    #[serde(flatten)]
    pub attrs: ShapeAttrs,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ImportedShape>,
}

/// A node that looked like a shape but could not be classified
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedNode {
    pub tag: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    /// Top-level shapes in document order
    pub shapes: Vec<ImportedShape>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedNode>,
}

impl ImportReport {
    /// Number of shapes at every depth
    pub fn shape_count(&self) -> usize {
        fn count(shapes: &[ImportedShape]) -> usize {
            shapes.iter().map(|s| 1 + count(&s.children)).sum()
        }
        count(&self.shapes)
    }
}

/// Entry of the construction stack
enum Open {
    Shape(ImportedShape),
    /// A shape left out of the result, hidden or unclassified; its
    /// descendants are dropped too
    Dropped,
}

/// Parse and import a serialized document
pub fn import_document(
    source: &str,
    config: &ImportConfig,
    ids: &dyn IdSource,
) -> Result<ImportReport, DocumentError> {
    let root = Node::parse_xml(source)?;
    import_tree(&root, config, ids)
}

/// Import an already parsed document tree
pub fn import_tree(
    root: &Node,
    config: &ImportConfig,
    ids: &dyn IdSource,
) -> Result<ImportReport, DocumentError> {
    if !valid_document(root) {
        if config.require_namespace {
            return Err(DocumentError::MissingNamespace);
        }
        warn!("document does not declare the penpot namespace; importing anyway");
    }

    let mut report = ImportReport::default();
    let mut stack: Vec<Open> = Vec::new();

    for item in flatten(root) {
        let node = match item {
            Item::Close(_) => {
                match stack.pop() {
                    Some(Open::Shape(shape)) => attach(&mut stack, &mut report.shapes, shape),
                    Some(Open::Dropped) => {}
                    None => warn!("close marker without an open shape"),
                }
                continue;
            }
            Item::Element(node) => node,
        };

        if !is_shape(&item) {
            continue;
        }

        let kind = match shape_type(&item) {
            Ok(kind) => kind,
            Err(err) => {
                warn!("skipping <{}>: {}", node.tag, err);
                report.skipped.push(SkippedNode {
                    tag: node.tag.clone(),
                    reason: err.to_string(),
                });
                stack.push(Open::Dropped);
                continue;
            }
        };

        if matches!(stack.last(), Some(Open::Dropped)) {
            stack.push(Open::Dropped);
            continue;
        }

        let attrs = parse_data(kind, &item, ids).unwrap_or_default();
        if config.skip_hidden && attrs.hidden == Some(true) {
            debug!("dropping hidden {} {:?}", kind, attrs.name);
            stack.push(Open::Dropped);
            continue;
        }

        stack.push(Open::Shape(ImportedShape {
            shape_type: kind,
            attrs,
            children: Vec::new(),
        }));
    }

    // Every shape has a close, so the stack is empty here
    while let Some(open) = stack.pop() {
        if let Open::Shape(shape) = open {
            warn!("unclosed {} shape", shape.shape_type);
            attach(&mut stack, &mut report.shapes, shape);
        }
    }

    info!(
        "imported {} shapes, skipped {} nodes",
        report.shape_count(),
        report.skipped.len()
    );
    Ok(report)
}

/// Add a finished shape to the innermost open shape, or to the roots
fn attach(stack: &mut [Open], roots: &mut Vec<ImportedShape>, shape: ImportedShape) {
    match stack.last_mut() {
        Some(Open::Shape(parent)) => parent.children.push(shape),
        Some(Open::Dropped) => {}
        None => roots.push(shape),
    }
}
