//! Shape classification and flattened depth-first traversal
//!
//! A shape is any element carrying a `penpot:shape` descriptor child. The
//! traversal emits every element in pre-order and, once a shape's children
//! are exhausted, a synthetic [`Item::Close`] for it, whether or not its
//! declared type is recognized. A consumer can then rebuild the shape
//! hierarchy with a plain stack: push on an opening shape, pop on a close.

use crate::error::ParseError;
use crate::shape::ShapeType;
use crate::tree::Node;

/// Reserved tag of the shape descriptor child
pub const DESCRIPTOR_TAG: &str = "penpot:shape";

/// Attribute on the descriptor declaring the shape kind
pub const TYPE_ATTR: &str = "penpot:type";

/// Namespace declaration a valid document carries on its root
pub const NAMESPACE_DECL: &str = "xmlns:penpot";

/// One step of a flattened traversal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Item<'a> {
    /// A real element of the tree
    Element(&'a Node),
    /// End of the subtree of a shape; `None` when its type could not be
    /// classified
    Close(Option<ShapeType>),
}

impl<'a> Item<'a> {
    /// The underlying element, if this is not a close marker
    pub fn node(&self) -> Option<&'a Node> {
        match self {
            Item::Element(node) => Some(node),
            Item::Close(_) => None,
        }
    }

    pub fn is_close(&self) -> bool {
        matches!(self, Item::Close(_))
    }
}

/// True iff the document root declares the penpot namespace
pub fn valid_document(root: &Node) -> bool {
    root.attrs.contains_key(NAMESPACE_DECL)
}

pub fn is_branch(node: &Node) -> bool {
    node.is_branch()
}

/// The shape descriptor of `node`, if any
pub fn shape_descriptor(node: &Node) -> Option<&Node> {
    node.find_child(DESCRIPTOR_TAG)
}

/// The first child of the shape descriptor carrying `tag`
pub fn shape_descriptor_child<'a>(node: &'a Node, tag: &str) -> Option<&'a Node> {
    shape_descriptor(node)?.find_child(tag)
}

/// True for close markers and for elements that carry a descriptor
pub fn is_shape(item: &Item<'_>) -> bool {
    match item {
        Item::Close(_) => true,
        Item::Element(node) => shape_descriptor(node).is_some(),
    }
}

/// Classify an item
///
/// A close marker reports the type it was created with. An element reports
/// its declared `penpot:type`; undeclared or unrecognized types are errors
/// so callers can skip the node rather than guess its kind.
pub fn shape_type(item: &Item<'_>) -> Result<ShapeType, ParseError> {
    match item {
        Item::Close(Some(shape_type)) => Ok(*shape_type),
        Item::Close(None) => Err(ParseError::UnclassifiedClose),
        Item::Element(node) => declared_type(node),
    }
}

fn declared_type(node: &Node) -> Result<ShapeType, ParseError> {
    let descriptor = shape_descriptor(node).ok_or_else(|| ParseError::NotAShape {
        tag: node.tag.clone(),
    })?;
    let value = descriptor
        .attr(TYPE_ATTR)
        .ok_or_else(|| ParseError::MissingShapeType {
            tag: node.tag.clone(),
        })?;
    value.parse()
}

/// Children of an element as traversal items
///
/// Every node with a descriptor gets a trailing close marker, carrying its
/// type when the declared type is recognized.
pub fn children_of(node: &Node) -> impl Iterator<Item = Item<'_>> + '_ {
    let close = shape_descriptor(node).map(|_| Item::Close(declared_type(node).ok()));
    node.elements().map(Item::Element).chain(close)
}

/// Lazy depth-first pre-order traversal rooted at `node`
///
/// The iterator is a pure function of its input: cloning it or calling
/// `flatten` again restarts the walk.
pub fn flatten(node: &Node) -> Flatten<'_> {
    Flatten {
        stack: vec![Item::Element(node)],
    }
}

/// Iterator returned by [`flatten`]
#[derive(Debug, Clone)]
pub struct Flatten<'a> {
    stack: Vec<Item<'a>>,
}

impl<'a> Iterator for Flatten<'a> {
    type Item = Item<'a>;

    fn next(&mut self) -> Option<Item<'a>> {
        let item = self.stack.pop()?;
        if let Item::Element(node) = item {
            if is_branch(node) {
                let start = self.stack.len();
                self.stack.extend(children_of(node));
                self.stack[start..].reverse();
            }
        }
        Some(item)
    }
}
