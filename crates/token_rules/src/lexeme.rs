use std::fmt;

use crate::ast::{Color, Shape, Size};

/// A lexeme of the rule language.
/// Produced by the lexer to distinguish keywords, vocabulary words and separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Lexeme<'src> {
    /// `nothing`, the whole-input rule that is never satisfied
    Nothing,

    /// `touch`, in `touch <token>` and `use <token> to touch <token>`
    Touch,
    /// `pick`, in `pick up <token>`
    Pick,
    /// `up`, in `pick up <token>`
    Up,
    /// `use`, in `use <token> to touch <token>`
    Use,
    /// `to`, in `use <token> to touch <token>`
    To,
    /// `move`, in `move <token> away from <token>`
    Move,
    /// `away`, in `move <token> away from <token>`
    Away,
    /// `from`, in `move <token> away from <token>`
    From,
    /// `put`, in `put <token> left of <token>` and `put <token> between ...`
    Put,
    /// `left`, in `put <token> left of <token>`
    Left,
    /// `of`, in `put <token> left of <token>`
    Of,
    /// `between`, in `put <token> between <token> and <token>`
    Between,
    /// `and`, in `put <token> between <token> and <token>`
    And,

    /// `or` literal alternative, eg. `<leaf> or <leaf>`
    Or,
    /// Symbol separating unordered clauses, eg. `<clause>, <clause>`
    Comma,
    /// Line break separating ordered steps
    Newline,

    /// A color word, like `red`
    Color(Color),
    /// A shape word, like `circle`
    Shape(Shape),
    /// A size word, like `small`
    Size(Size),

    /// Any other word; never accepted by the grammar
    Word(&'src str),
}

impl<'src> fmt::Display for Lexeme<'src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lexeme::Nothing => write!(f, "nothing"),
            Lexeme::Touch => write!(f, "touch"),
            Lexeme::Pick => write!(f, "pick"),
            Lexeme::Up => write!(f, "up"),
            Lexeme::Use => write!(f, "use"),
            Lexeme::To => write!(f, "to"),
            Lexeme::Move => write!(f, "move"),
            Lexeme::Away => write!(f, "away"),
            Lexeme::From => write!(f, "from"),
            Lexeme::Put => write!(f, "put"),
            Lexeme::Left => write!(f, "left"),
            Lexeme::Of => write!(f, "of"),
            Lexeme::Between => write!(f, "between"),
            Lexeme::And => write!(f, "and"),
            Lexeme::Or => write!(f, "or"),
            Lexeme::Comma => write!(f, ","),
            Lexeme::Newline => write!(f, "newline"),
            Lexeme::Color(color) => write!(f, "{}", color),
            Lexeme::Shape(shape) => write!(f, "{}", shape),
            Lexeme::Size(size) => write!(f, "{}", size),
            Lexeme::Word(word) => write!(f, "\"{}\"", word),
        }
    }
}
