//! Path data grammar using chumsky
//!
//! The grammar only groups tokens into `command number*` runs. Arity checks
//! and the conversion to absolute segments happen in [`normalize`], where
//! the current point is known.

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::error::PathError;
use crate::geom::Point;
use crate::path::content::{arc_to_curves, CurveParams, PathContent, PathSegment};
use crate::path::lexer::{lex, Token};

/// A command letter with its raw, not yet grouped, arguments
#[derive(Debug, Clone, PartialEq)]
struct RawCommand {
    letter: char,
    args: Vec<f64>,
}

/// Parse SVG path data into absolute move/line/curve/close segments
pub fn parse_path(input: &str) -> Result<PathContent, Vec<PathError>> {
    let len = input.len();

    let tokens = lex(input)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| vec![err])?;
    let token_iter = tokens.into_iter().map(|(tok, span)| (tok, span.into()));

    let token_stream = Stream::from_iter(token_iter)
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    let commands = commands_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(PathError::from).collect::<Vec<_>>())?;

    normalize(&commands).map_err(|err| vec![err])
}

fn commands_parser<'a, I>() -> impl Parser<'a, I, Vec<RawCommand>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let letter = select! {
        Token::Command(c) => c,
    };

    let number = select! {
        Token::Number(n) => n,
    };

    letter
        .then(number.repeated().collect::<Vec<_>>())
        .map(|(letter, args)| RawCommand { letter, args })
        .repeated()
        .collect::<Vec<_>>()
        .then_ignore(end())
}

/// Number of arguments one repetition of a command consumes
fn arity(letter: char) -> usize {
    match letter.to_ascii_uppercase() {
        'M' | 'L' | 'T' => 2,
        'H' | 'V' => 1,
        'C' => 6,
        'S' | 'Q' => 4,
        'A' => 7,
        _ => 0,
    }
}

/// Resolve relative commands, shorthands, quadratics and arcs
fn normalize(commands: &[RawCommand]) -> Result<PathContent, PathError> {
    let mut segments = Vec::new();
    let mut current = Point::default();
    let mut start = Point::default();
    // Reflection sources for S/s and T/t
    let mut last_cubic: Option<Point> = None;
    let mut last_quad: Option<Point> = None;

    if let Some(first) = commands.first() {
        if !matches!(first.letter, 'M' | 'm') {
            return Err(PathError::MissingMoveTo(first.letter));
        }
    }

    for cmd in commands {
        let n = arity(cmd.letter);
        let groups: Vec<&[f64]> = if n == 0 {
            if !cmd.args.is_empty() {
                return Err(PathError::Arity {
                    command: cmd.letter,
                    arity: 0,
                    found: cmd.args.len(),
                });
            }
            vec![&cmd.args[..]]
        } else {
            if cmd.args.is_empty() || cmd.args.len() % n != 0 {
                return Err(PathError::Arity {
                    command: cmd.letter,
                    arity: n,
                    found: cmd.args.len(),
                });
            }
            cmd.args.chunks(n).collect()
        };

        let relative = cmd.letter.is_ascii_lowercase();
        let offset = |p: Point, current: Point| {
            if relative {
                Point::new(current.x + p.x, current.y + p.y)
            } else {
                p
            }
        };

        for (index, args) in groups.into_iter().enumerate() {
            let mut cubic_control = None;
            let mut quad_control = None;

            match (cmd.letter.to_ascii_uppercase(), args) {
                ('M', [x, y]) => {
                    let to = offset(Point::new(*x, *y), current);
                    // Pairs after the first are implicit line-tos
                    if index == 0 {
                        segments.push(PathSegment::MoveTo(to));
                        start = to;
                    } else {
                        segments.push(PathSegment::LineTo(to));
                    }
                    current = to;
                }
                ('L', [x, y]) => {
                    current = offset(Point::new(*x, *y), current);
                    segments.push(PathSegment::LineTo(current));
                }
                ('H', [x]) => {
                    let x = if relative { current.x + x } else { *x };
                    current = Point::new(x, current.y);
                    segments.push(PathSegment::LineTo(current));
                }
                ('V', [y]) => {
                    let y = if relative { current.y + y } else { *y };
                    current = Point::new(current.x, y);
                    segments.push(PathSegment::LineTo(current));
                }
                ('C', [x1, y1, x2, y2, x, y]) => {
                    let c1 = offset(Point::new(*x1, *y1), current);
                    let c2 = offset(Point::new(*x2, *y2), current);
                    let to = offset(Point::new(*x, *y), current);
                    segments.push(PathSegment::CurveTo(CurveParams::new(c1, c2, to)));
                    cubic_control = Some(c2);
                    current = to;
                }
                ('S', [x2, y2, x, y]) => {
                    let c1 = reflect(last_cubic, current);
                    let c2 = offset(Point::new(*x2, *y2), current);
                    let to = offset(Point::new(*x, *y), current);
                    segments.push(PathSegment::CurveTo(CurveParams::new(c1, c2, to)));
                    cubic_control = Some(c2);
                    current = to;
                }
                ('Q', [qx, qy, x, y]) => {
                    let q = offset(Point::new(*qx, *qy), current);
                    let to = offset(Point::new(*x, *y), current);
                    segments.push(PathSegment::CurveTo(quadratic_to_cubic(current, q, to)));
                    quad_control = Some(q);
                    current = to;
                }
                ('T', [x, y]) => {
                    let q = reflect(last_quad, current);
                    let to = offset(Point::new(*x, *y), current);
                    segments.push(PathSegment::CurveTo(quadratic_to_cubic(current, q, to)));
                    quad_control = Some(q);
                    current = to;
                }
                ('A', [rx, ry, rotation, large_arc, sweep, x, y]) => {
                    let to = offset(Point::new(*x, *y), current);
                    let curves = arc_to_curves(
                        current,
                        *rx,
                        *ry,
                        *rotation,
                        *large_arc != 0.0,
                        *sweep != 0.0,
                        to,
                    );
                    match curves {
                        Some(curves) => segments.extend(curves.into_iter().map(PathSegment::CurveTo)),
                        None => segments.push(PathSegment::LineTo(to)),
                    }
                    current = to;
                }
                ('Z', []) => {
                    segments.push(PathSegment::ClosePath);
                    current = start;
                }
                _ => {
                    return Err(PathError::Syntax {
                        span: 0..0,
                        message: format!("unsupported command '{}'", cmd.letter),
                    })
                }
            }

            last_cubic = cubic_control;
            last_quad = quad_control;
        }
    }

    Ok(PathContent(segments))
}

/// Reflect the previous control point about the current point
fn reflect(control: Option<Point>, current: Point) -> Point {
    match control {
        Some(c) => Point::new(2.0 * current.x - c.x, 2.0 * current.y - c.y),
        None => current,
    }
}

/// Degree-elevate a quadratic Bézier to a cubic one
fn quadratic_to_cubic(from: Point, control: Point, to: Point) -> CurveParams {
    let c1 = Point::new(
        from.x + (control.x - from.x) * 2.0 / 3.0,
        from.y + (control.y - from.y) * 2.0 / 3.0,
    );
    let c2 = Point::new(
        to.x + (control.x - to.x) * 2.0 / 3.0,
        to.y + (control.y - to.y) * 2.0 / 3.0,
    );
    CurveParams::new(c1, c2, to)
}
