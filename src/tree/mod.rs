//! Document tree model and shape traversal

pub mod node;
pub mod traverse;

pub use node::{Child, Node};
pub use traverse::{
    children_of, flatten, is_branch, is_shape, shape_descriptor, shape_descriptor_child,
    shape_type, valid_document, Flatten, Item,
};
