//! SVG path data: lexer, grammar and structured content

pub mod content;
mod grammar;
pub mod lexer;

pub use content::{arc_to_curves, CurveParams, PathContent, PathSegment};
pub use grammar::parse_path;
