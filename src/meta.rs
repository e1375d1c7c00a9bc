//! Access to `penpot:*` metadata attributes
//!
//! Metadata may sit directly on a shape element or on its descriptor child.
//! The element's own attributes take precedence.

use log::warn;

use crate::error::{DecodeError, ParseError};
use crate::tree::{shape_descriptor, Node};

/// Prefix of every metadata attribute
pub const NAMESPACE: &str = "penpot";

/// Qualified key for a metadata attribute name
pub fn meta_key(name: &str) -> String {
    format!("{}:{}", NAMESPACE, name)
}

/// Raw string value of a metadata attribute
pub fn raw_meta<'a>(node: &'a Node, name: &str) -> Option<&'a str> {
    let key = meta_key(name);
    node.attr(&key)
        .or_else(|| shape_descriptor(node).and_then(|descriptor| descriptor.attr(&key)))
}

/// Read and decode a metadata attribute
///
/// Returns `Ok(None)` when the attribute is absent and a
/// [`ParseError::InvalidAttribute`] naming the attribute when decoding fails.
pub fn read_meta<T>(
    node: &Node,
    name: &str,
    decode: impl FnOnce(&str) -> Result<T, DecodeError>,
) -> Result<Option<T>, ParseError> {
    match raw_meta(node, name) {
        Some(value) => decode(value)
            .map(Some)
            .map_err(|source| ParseError::invalid_attribute(meta_key(name), value, source)),
        None => Ok(None),
    }
}

/// Like [`read_meta`], but a malformed value is logged and treated as absent
pub fn meta<T>(
    node: &Node,
    name: &str,
    decode: impl FnOnce(&str) -> Result<T, DecodeError>,
) -> Option<T> {
    recover(read_meta(node, name, decode))
}

/// Decode a plain (non-metadata) attribute value, logging failures
pub fn decode_value<T>(
    attribute: &str,
    value: &str,
    decode: impl FnOnce(&str) -> Result<T, DecodeError>,
) -> Option<T> {
    recover(
        decode(value)
            .map(Some)
            .map_err(|source| ParseError::invalid_attribute(attribute, value, source)),
    )
}

fn recover<T>(result: Result<Option<T>, ParseError>) -> Option<T> {
    result.unwrap_or_else(|err| {
        warn!("{}; treating it as absent", err);
        None
    })
}

/// Value decoders for metadata attributes
pub mod decode {
    use std::str::FromStr;

    use crate::error::DecodeError;
    use crate::geom::Matrix;

    pub fn text(value: &str) -> Result<String, DecodeError> {
        Ok(value.to_string())
    }

    /// `"true"` is true, anything else is false
    pub fn boolean(value: &str) -> Result<bool, DecodeError> {
        Ok(value.trim() == "true")
    }

    pub fn float(value: &str) -> Result<f64, DecodeError> {
        Ok(value.trim().parse::<f64>()?)
    }

    /// A float, or a percentage converted to a fraction (`"50%"` → 0.5)
    pub fn fraction(value: &str) -> Result<f64, DecodeError> {
        match value.trim().strip_suffix('%') {
            Some(percent) => Ok(percent.trim().parse::<f64>()? / 100.0),
            None => float(value),
        }
    }

    /// A trimmed, non-empty symbolic value
    pub fn keyword(value: &str) -> Result<String, DecodeError> {
        let value = value.trim();
        if value.is_empty() {
            Err(DecodeError::Empty)
        } else {
            Ok(value.to_string())
        }
    }

    pub fn matrix(value: &str) -> Result<Matrix, DecodeError> {
        Matrix::from_str(value)
    }

    /// Parse a keyword into a typed enum, rejecting unknown values
    pub fn symbol<T: FromStr>(value: &str) -> Result<T, DecodeError> {
        value.trim().parse().map_err(|_| DecodeError::Keyword)
    }

    pub fn json(value: &str) -> Result<serde_json::Value, DecodeError> {
        serde_json::from_str(value).map_err(|err| DecodeError::Json(err.to_string()))
    }
}
