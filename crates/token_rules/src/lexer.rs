use crate::ast::{Color, Shape, Size};
use crate::lexeme::Lexeme;
use chumsky::prelude::*;

pub type Spanned<T> = (T, SimpleSpan);

fn word_lexeme(word: &str) -> Lexeme<'_> {
    match word {
        "nothing" => Lexeme::Nothing,
        "touch" => Lexeme::Touch,
        "pick" => Lexeme::Pick,
        "up" => Lexeme::Up,
        "use" => Lexeme::Use,
        "to" => Lexeme::To,
        "move" => Lexeme::Move,
        "away" => Lexeme::Away,
        "from" => Lexeme::From,
        "put" => Lexeme::Put,
        "left" => Lexeme::Left,
        "of" => Lexeme::Of,
        "between" => Lexeme::Between,
        "and" => Lexeme::And,
        "or" => Lexeme::Or,
        _ => {
            if let Ok(color) = word.parse::<Color>() {
                Lexeme::Color(color)
            } else if let Ok(shape) = word.parse::<Shape>() {
                Lexeme::Shape(shape)
            } else if let Ok(size) = word.parse::<Size>() {
                Lexeme::Size(size)
            } else {
                Lexeme::Word(word)
            }
        }
    }
}

/// Constructs the lexer that transforms rule text into spanned `Lexeme`s.
///
/// This lexer handles:
/// - Keywords of the leaf templates: `touch`, `pick up`, `use .. to touch`, ...
/// - Vocabulary words: colors, shapes and sizes
/// - Separators: `,` between clauses and line breaks between steps
///
/// Spaces, tabs and carriage returns are skipped. Line breaks are kept since
/// they separate ordered steps.
pub fn lexer<'src>()
-> impl Parser<'src, &'src str, Vec<Spanned<Lexeme<'src>>>, extra::Err<Rich<'src, char, SimpleSpan>>>
{
    let word = text::ascii::ident().map(word_lexeme);

    let separator = choice((
        just(',').to(Lexeme::Comma),
        just('\n').to(Lexeme::Newline),
    ));

    let inline_space = one_of(" \t\r").repeated();

    inline_space
        .clone()
        .ignore_then(
            word.or(separator)
                .map_with(|lexeme, e| (lexeme, e.span()))
                .then_ignore(inline_space)
                .repeated()
                .collect(),
        )
        .then_ignore(end())
}
