//! Immutable XML node tree
//!
//! Nodes are produced once from a serialized document and only ever read
//! afterwards. Attribute and tag names keep their namespace prefix
//! (`penpot:type`, `xlink:href`) so metadata lookups can use qualified keys.

use indexmap::IndexMap;

use crate::error::DocumentError;

/// A child of an element: either a nested element or a run of text
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Element(Node),
    Text(String),
}

/// An XML element
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    /// Qualified tag name (`rect`, `penpot:shape`)
    pub tag: String,
    /// Qualified attribute names to raw values
    pub attrs: IndexMap<String, String>,
    /// Ordered children, or `None` for a leaf
    pub content: Option<Vec<Child>>,
}

impl Node {
    /// Create a leaf element with no attributes
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: IndexMap::new(),
            content: None,
        }
    }

    /// Set an attribute
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Append a child element, turning this node into a branch
    pub fn with_child(mut self, child: Node) -> Self {
        self.content
            .get_or_insert_with(Vec::new)
            .push(Child::Element(child));
        self
    }

    /// Append a text run, turning this node into a branch
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content
            .get_or_insert_with(Vec::new)
            .push(Child::Text(text.into()));
        self
    }

    /// Mark this node as a branch without adding children
    pub fn with_empty_content(mut self) -> Self {
        self.content.get_or_insert_with(Vec::new);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// True iff the node carries a (possibly empty) child sequence
    pub fn is_branch(&self) -> bool {
        self.content.is_some()
    }

    /// Element children in document order, text runs skipped
    pub fn elements(&self) -> impl Iterator<Item = &Node> + '_ {
        self.content
            .iter()
            .flatten()
            .filter_map(|child| match child {
                Child::Element(node) => Some(node),
                Child::Text(_) => None,
            })
    }

    /// First element child with the given tag
    pub fn find_child(&self, tag: &str) -> Option<&Node> {
        self.elements().find(|child| child.tag == tag)
    }

    /// All descendant elements in depth-first pre-order, excluding `self`
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::new(self, |_| true)
    }

    /// Descendant elements, not entering subtrees rooted at nodes rejected by `enter`
    ///
    /// Rejected nodes are still yielded; only their children are pruned.
    pub fn descendants_pruned(&self, enter: fn(&Node) -> bool) -> Descendants<'_> {
        Descendants::new(self, enter)
    }

    /// Parse a serialized XML document into its root element
    ///
    /// Namespace declarations in scope at the root are materialized as
    /// `xmlns` / `xmlns:<prefix>` attributes so callers can check them.
    pub fn parse_xml(source: &str) -> Result<Node, DocumentError> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };
        let doc = roxmltree::Document::parse_with_options(source, options)?;
        let root = doc.root_element();
        let mut node = Self::from_xml(source, root);

        for ns in root.namespaces() {
            let key = match ns.name() {
                Some("xml") => continue,
                Some(prefix) => format!("xmlns:{}", prefix),
                None => "xmlns".to_string(),
            };
            node.attrs
                .entry(key)
                .or_insert_with(|| ns.uri().to_string());
        }

        Ok(node)
    }

    fn from_xml(source: &str, element: roxmltree::Node<'_, '_>) -> Node {
        let tag_name = element.tag_name();
        let tag = qualified_name(element, tag_name.namespace(), tag_name.name());

        let attrs = element
            .attributes()
            .map(|attr| {
                (
                    qualified_name(element, attr.namespace(), attr.name()),
                    attr.value().to_string(),
                )
            })
            .collect();

        let children: Vec<Child> = element
            .children()
            .filter_map(|child| {
                if child.is_element() {
                    Some(Child::Element(Self::from_xml(source, child)))
                } else if child.is_text() {
                    child
                        .text()
                        .filter(|text| !text.trim().is_empty())
                        .map(|text| Child::Text(text.to_string()))
                } else {
                    None
                }
            })
            .collect();

        // `<g></g>` stays a branch with no children, `<g/>` is a leaf
        let self_closing = source
            .get(element.range())
            .map_or(true, |raw| raw.ends_with("/>"));

        Node {
            tag,
            attrs,
            content: (!children.is_empty() || !self_closing).then_some(children),
        }
    }
}

fn qualified_name(element: roxmltree::Node<'_, '_>, namespace: Option<&str>, local: &str) -> String {
    match namespace.and_then(|uri| element.lookup_prefix(uri)) {
        Some(prefix) => format!("{}:{}", prefix, local),
        None => local.to_string(),
    }
}

/// Pre-order iterator over descendant elements
#[derive(Clone)]
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
    enter: fn(&Node) -> bool,
}

impl<'a> Descendants<'a> {
    fn new(root: &'a Node, enter: fn(&Node) -> bool) -> Self {
        let mut stack: Vec<&Node> = root.elements().collect();
        stack.reverse();
        Self { stack, enter }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let node = self.stack.pop()?;
        if (self.enter)(node) {
            let start = self.stack.len();
            self.stack.extend(node.elements());
            self.stack[start..].reverse();
        }
        Some(node)
    }
}
