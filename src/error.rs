//! Error types for document reading, metadata decoding and path parsing

use chumsky::error::{Rich, RichReason};
use thiserror::Error;

use crate::path::lexer::Token;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Failure to decode a single attribute value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("not a number")]
    Float(#[from] std::num::ParseFloatError),
    #[error("expected 6 matrix components, found {0}")]
    Matrix(usize),
    #[error("empty value")]
    Empty,
    #[error("unrecognized keyword")]
    Keyword,
    #[error("invalid JSON: {0}")]
    Json(String),
}

/// Errors raised while classifying a node or reading its metadata
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The declared `penpot:type` is not a known shape kind
    #[error("unknown shape type '{value}'")]
    UnknownShapeType { value: String },

    /// The shape descriptor carries no `penpot:type`
    #[error("shape descriptor on <{tag}> declares no type")]
    MissingShapeType { tag: String },

    /// A close marker of a shape whose type could not be classified
    #[error("close marker of an unclassified shape")]
    UnclassifiedClose,

    /// The node has no shape descriptor at all
    #[error("<{tag}> is not a shape")]
    NotAShape { tag: String },

    /// An attribute value could not be decoded
    #[error("invalid value '{value}' for attribute '{attribute}': {source}")]
    InvalidAttribute {
        attribute: String,
        value: String,
        #[source]
        source: DecodeError,
    },
}

impl ParseError {
    /// Create an invalid attribute error
    pub fn invalid_attribute(
        attribute: impl Into<String>,
        value: impl Into<String>,
        source: DecodeError,
    ) -> Self {
        Self::InvalidAttribute {
            attribute: attribute.into(),
            value: value.into(),
            source,
        }
    }

    /// Name of the offending attribute, if this error concerns one
    pub fn attribute(&self) -> Option<&str> {
        match self {
            Self::InvalidAttribute { attribute, .. } => Some(attribute),
            _ => None,
        }
    }
}

/// Errors raised while reading a whole document
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("root element does not declare the xmlns:penpot namespace")]
    MissingNamespace,
}

/// Errors raised while parsing SVG path data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("path syntax error at {span:?}: {message}")]
    Syntax { span: Span, message: String },

    #[error("command '{command}' takes arguments in groups of {arity}, found {found}")]
    Arity {
        command: char,
        arity: usize,
        found: usize,
    },

    #[error("path data must start with a move-to, found '{0}'")]
    MissingMoveTo(char),
}

impl<'a> From<Rich<'a, Token>> for PathError {
    fn from(err: Rich<'a, Token>) -> Self {
        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => match found {
                Some(tok) => format!("unexpected {}", format_token(tok)),
                None => "unexpected end of input".to_string(),
            },
            RichReason::Custom(msg) => msg.to_string(),
        };

        PathError::Syntax {
            span: err.span().into_range(),
            message,
        }
    }
}

fn format_token(tok: &Token) -> String {
    match tok {
        Token::Command(c) => format!("command '{}'", c),
        Token::Number(n) => format!("number {}", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_attribute_display() {
        let source = "abc".parse::<f64>().unwrap_err();
        let err = ParseError::invalid_attribute("penpot:rotation", "abc", source.into());
        insta::assert_snapshot!(
            err.to_string(),
            @"invalid value 'abc' for attribute 'penpot:rotation': not a number"
        );
        assert_eq!(err.attribute(), Some("penpot:rotation"));
    }

    #[test]
    fn test_unknown_shape_type_display() {
        let err = ParseError::UnknownShapeType {
            value: "blob".to_string(),
        };
        insta::assert_snapshot!(err.to_string(), @"unknown shape type 'blob'");
        assert_eq!(err.attribute(), None);
    }

    #[test]
    fn test_arity_display() {
        let err = PathError::Arity {
            command: 'C',
            arity: 6,
            found: 4,
        };
        assert!(err.to_string().contains("groups of 6"));
    }
}
