use crate::ast::*;
use crate::lexeme::Lexeme;
use chumsky::input::ValueInput;
use chumsky::{Parser, error::Rich, prelude::*};

pub type Span = SimpleSpan;

/// A Parser for token phrases in the rule language.
/// This parser currently handles:
/// - Plain tokens: `red square`
/// - Sized tokens: `small red square`, `large yellow circle`
pub fn token_parser<'tokens, 'src: 'tokens, I>()
-> impl Parser<'tokens, I, Token, extra::Err<Rich<'tokens, Lexeme<'src>, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Lexeme<'src>, Span = Span>,
{
    let size = select! { Lexeme::Size(size) => size }.labelled("size");
    let color = select! { Lexeme::Color(color) => color }.labelled("color");
    let shape = select! { Lexeme::Shape(shape) => shape }.labelled("shape");

    size.or_not()
        .then(color)
        .then(shape)
        .map(|((size, color), shape)| Token { color, shape, size })
        .labelled("token")
}

/// A Parser for leaf phrases in the rule language.
/// This parser currently handles:
/// - Single token interactions: `touch <token>`, `pick up <token>`
/// - Dual token interactions: `use <token> to touch <token>`,
///   `move <token> away from <token>`, `put <token> left of <token>`
/// - Triple token interactions: `put <token> between <token> and <token>`
///
/// Either every token of a leaf carries a size or none does.
pub fn interaction_parser<'tokens, 'src: 'tokens, I>()
-> impl Parser<'tokens, I, Interaction, extra::Err<Rich<'tokens, Lexeme<'src>, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Lexeme<'src>, Span = Span>,
{
    let token = token_parser::<I>();

    // touch <token>
    let touch = just(Lexeme::Touch)
        .ignore_then(token.clone())
        .map(Interaction::touch)
        .labelled("touch");

    // pick up <token>
    let pick_up = just(Lexeme::Pick)
        .then(just(Lexeme::Up))
        .ignore_then(token.clone())
        .map(Interaction::pick_up)
        .labelled("pick up");

    // use <token> to touch <token>
    let use_to_touch = just(Lexeme::Use)
        .ignore_then(token.clone())
        .then_ignore(just(Lexeme::To))
        .then_ignore(just(Lexeme::Touch))
        .then(token.clone())
        .map(|(first, second)| Interaction::use_to_touch(first, second))
        .labelled("use to touch");

    // move <token> away from <token>
    let move_away_from = just(Lexeme::Move)
        .ignore_then(token.clone())
        .then_ignore(just(Lexeme::Away))
        .then_ignore(just(Lexeme::From))
        .then(token.clone())
        .map(|(first, second)| Interaction::move_away_from(first, second))
        .labelled("move away from");

    // put <token> left of <token>
    let put_left_of = just(Lexeme::Put)
        .ignore_then(token.clone())
        .then_ignore(just(Lexeme::Left))
        .then_ignore(just(Lexeme::Of))
        .then(token.clone())
        .map(|(first, second)| Interaction::put_left_of(first, second))
        .labelled("put left of");

    // put <token> between <token> and <token>
    let put_between = just(Lexeme::Put)
        .ignore_then(token.clone())
        .then_ignore(just(Lexeme::Between))
        .then(token.clone())
        .then_ignore(just(Lexeme::And))
        .then(token)
        .map(|((first, second), third)| Interaction::put_between(first, second, third))
        .labelled("put between");

    choice((
        touch,
        pick_up,
        use_to_touch,
        move_away_from,
        put_left_of,
        put_between,
    ))
    .labelled("interaction")
    // Emitted rather than returned so that enclosing labels keep the message.
    .validate(|interaction, e, emitter| {
        if !interaction.has_uniform_size() {
            emitter.emit(Rich::custom(
                e.span(),
                "either every token of an interaction has a size or none does",
            ));
        }
        interaction
    })
}

/// A Parser for clauses in the rule language.
/// This parser currently handles:
/// - A single leaf phrase: `touch red square`
/// - Two alternatives: `pick up blue circle or pick up red square`
pub fn clause_parser<'tokens, 'src: 'tokens, I>()
-> impl Parser<'tokens, I, Rule, extra::Err<Rich<'tokens, Lexeme<'src>, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Lexeme<'src>, Span = Span>,
{
    let leaf = interaction_parser::<I>().map(Rule::Leaf);

    leaf.clone()
        .then(just(Lexeme::Or).ignore_then(leaf).or_not())
        .map(|(first, second)| match second {
            Some(second) => Rule::first_or_second(first, second),
            None => first,
        })
        .labelled("clause")
}

/// A Parser for steps in the rule language.
/// This parser currently handles:
/// - One clause: `touch red square`
/// - Unordered clauses: `touch red square, touch yellow circle`
pub fn step_parser<'tokens, 'src: 'tokens, I>()
-> impl Parser<'tokens, I, Rule, extra::Err<Rich<'tokens, Lexeme<'src>, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Lexeme<'src>, Span = Span>,
{
    clause_parser::<I>()
        .separated_by(just(Lexeme::Comma))
        .at_least(1)
        .collect::<Vec<_>>()
        .map(|mut clauses| {
            if clauses.len() == 1 {
                clauses.remove(0)
            } else {
                Rule::InAnyOrder(clauses)
            }
        })
        .labelled("step")
}

/// A Parser for an entire rule text.
/// This parser currently handles:
/// - `nothing`, which must be the whole input
/// - Ordered steps, one per line: `touch red square\npick up white circle`
///
/// Blank lines are ignored.
pub fn rule_parser<'tokens, 'src: 'tokens, I>()
-> impl Parser<'tokens, I, Rule, extra::Err<Rich<'tokens, Lexeme<'src>, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Lexeme<'src>, Span = Span>,
{
    let blank = just(Lexeme::Newline).repeated();

    let nothing = just(Lexeme::Nothing).to(Rule::DoNothing).labelled("nothing");

    let steps = step_parser::<I>()
        .separated_by(just(Lexeme::Newline).repeated().at_least(1))
        .allow_trailing()
        .at_least(1)
        .collect::<Vec<_>>()
        .map(|mut steps| {
            if steps.len() == 1 {
                steps.remove(0)
            } else {
                Rule::InOrder(steps)
            }
        })
        .labelled("steps");

    blank
        .clone()
        .ignore_then(nothing.or(steps))
        .then_ignore(blank)
        .then_ignore(end())
        .labelled("rule")
}
