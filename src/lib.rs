//! Shape Import - read design shapes back out of exported SVG documents
//!
//! Documents exported by the editor are plain SVG with a `penpot:` namespace
//! of extra metadata. This library walks such a document, recognizes the
//! shape elements and turns each into a typed property bag: geometry, fill,
//! stroke, effects, export rules and pass-through SVG content.
//!
//! # Example
//!
//! ```rust
//! use shape_import::{import_document, ImportConfig, SequentialIds, ShapeType};
//!
//! let svg = r##"
//! <svg xmlns="http://www.w3.org/2000/svg" xmlns:penpot="https://penpot.app/xmlns">
//!   <g>
//!     <penpot:shape penpot:type="rect" penpot:name="Card"/>
//!     <rect x="10" y="20" width="30" height="40" fill="#ffffff"/>
//!   </g>
//! </svg>"##;
//!
//! let report = import_document(svg, &ImportConfig::default(), &SequentialIds::new()).unwrap();
//! let card = &report.shapes[0];
//! assert_eq!(card.shape_type, ShapeType::Rect);
//! assert_eq!(card.attrs.width, Some(30.0));
//! ```

pub mod color;
pub mod config;
pub mod error;
pub mod geom;
pub mod ids;
pub mod import;
pub mod meta;
pub mod path;
pub mod shape;
pub mod style;
pub mod tree;

pub use config::{ConfigError, ImportConfig};
pub use error::{DecodeError, DocumentError, ParseError, PathError};
pub use ids::{IdSource, SequentialIds, UuidIds};
pub use import::{import_document, import_tree, ImportReport, ImportedShape, SkippedNode};
pub use shape::{parse_data, ShapeAttrs, ShapeType};
pub use tree::{flatten, is_shape, shape_type, valid_document, Item, Node};
