//! A small line-oriented language for replaying board gestures.
//!
//! ```text
//! drag green square
//! move green square to 420 60
//! release green square
//! click small red circle
//! drag red circle
//! drop on holding area
//! release red circle
//! ```
//!
//! Blank lines and lines starting with `#` are skipped by [`parse_script`].

use std::str::FromStr;

use chumsky::prelude::*;
use token_rules::ast::{Color, Shape, Size, Token, UnknownWord};

use crate::board::Gesture;
use crate::error::ScriptError;

type Extra<'src> = extra::Err<Rich<'src, char>>;

fn vocabulary<'src, T>() -> impl Parser<'src, &'src str, T, Extra<'src>> + Clone
where
    T: FromStr<Err = UnknownWord>,
{
    text::ascii::ident().try_map(|word: &str, span| word.parse::<T>().map_err(|e| Rich::custom(span, e)))
}

fn token_parser<'src>() -> impl Parser<'src, &'src str, Token, Extra<'src>> + Clone {
    let gap = one_of(" \t").repeated().at_least(1);

    vocabulary::<Size>()
        .then_ignore(gap.clone())
        .or_not()
        .then(vocabulary::<Color>())
        .then_ignore(gap)
        .then(vocabulary::<Shape>())
        .map(|((size, color), shape)| Token { color, shape, size })
        .labelled("token")
}

fn pixels<'src>() -> impl Parser<'src, &'src str, f64, Extra<'src>> + Clone {
    just('-')
        .or_not()
        .then(text::int(10))
        .then(just('.').then(text::digits(10)).or_not())
        .to_slice()
        .try_map(|number: &str, span| number.parse::<f64>().map_err(|e| Rich::custom(span, e)))
        .labelled("pixels")
}

/// Parses one gesture line.
pub fn gesture_parser<'src>() -> impl Parser<'src, &'src str, Gesture, Extra<'src>> {
    let gap = one_of(" \t").repeated().at_least(1);
    let pad = one_of(" \t\r").repeated();
    let token = token_parser();

    let click = just("click")
        .ignore_then(gap.clone())
        .ignore_then(token.clone())
        .map(Gesture::Click);

    let drag = just("drag")
        .ignore_then(gap.clone())
        .ignore_then(token.clone())
        .map(Gesture::Drag);

    let holding_area = just("holding")
        .ignore_then(gap.clone())
        .ignore_then(just("area"))
        .to(Gesture::DropOntoHoldingArea);

    let drop = just("drop")
        .ignore_then(gap.clone())
        .ignore_then(just("on"))
        .ignore_then(gap.clone())
        .ignore_then(holding_area.or(token.clone().map(Gesture::DropOntoToken)));

    let relocate = just("move")
        .ignore_then(gap.clone())
        .ignore_then(token.clone())
        .then_ignore(gap.clone())
        .then_ignore(just("to"))
        .then_ignore(gap.clone())
        .then(pixels())
        .then_ignore(gap.clone())
        .then(pixels())
        .map(|((token, left), top)| Gesture::Move { token, left, top });

    let release = just("release")
        .ignore_then(gap)
        .ignore_then(token)
        .map(Gesture::Release);

    pad.clone()
        .ignore_then(choice((click, drag, drop, relocate, release)))
        .then_ignore(pad)
        .then_ignore(end())
}

/// Parses a single gesture line. `line` is the one-based number reported on
/// failure.
pub fn parse_gesture(src: &str, line: usize) -> Result<Gesture, ScriptError> {
    gesture_parser()
        .parse(src)
        .into_result()
        .map_err(|errors| ScriptError {
            line,
            messages: errors.iter().map(|e| e.to_string()).collect(),
        })
}

/// Parses a whole script, one gesture per non-blank line.
pub fn parse_script(src: &str) -> Result<Vec<Gesture>, ScriptError> {
    src.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| parse_gesture(line, index + 1))
        .collect()
}
