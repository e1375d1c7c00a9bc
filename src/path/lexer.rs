//! Lexer for SVG path data using logos

use logos::Logos;

use crate::error::{PathError, Span};

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r,]+")]
pub enum Token {
    #[regex(r"[MmLlHhVvCcSsQqTtAaZz]", |lex| lex.slice().chars().next())]
    Command(char),

    #[regex(r"[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),
}

/// Lex path data into tokens with spans
///
/// Input that is neither a command, a number nor a separator yields a
/// [`PathError::Syntax`] covering the offending text.
pub fn lex(input: &str) -> impl Iterator<Item = Result<(Token, Span), PathError>> + '_ {
    Token::lexer(input).spanned().map(move |(tok, span)| match tok {
        Ok(tok) => Ok((tok, span)),
        Err(()) => Err(PathError::Syntax {
            message: format!("unexpected character '{}'", &input[span.clone()]),
            span,
        }),
    })
}
