use std::{fmt, str::FromStr};

/// Fill color of a token on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Red,
    Black,
    Yellow,
    White,
    Green,
    Blue,
    Orange,
}

/// Outline of a token on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shape {
    Circle,
    Square,
}

/// Optional size of a token. Only boards with two token sizes use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Size {
    Small,
    Large,
}

/// Returned when a word does not name a color, shape or size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownWord(pub String);

impl fmt::Display for UnknownWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown word `{}`", self.0)
    }
}

impl std::error::Error for UnknownWord {}

impl FromStr for Color {
    type Err = UnknownWord;

    fn from_str(word: &str) -> Result<Self, Self::Err> {
        match word {
            "red" => Ok(Color::Red),
            "black" => Ok(Color::Black),
            "yellow" => Ok(Color::Yellow),
            "white" => Ok(Color::White),
            "green" => Ok(Color::Green),
            "blue" => Ok(Color::Blue),
            "orange" => Ok(Color::Orange),
            _ => Err(UnknownWord(word.to_string())),
        }
    }
}

impl FromStr for Shape {
    type Err = UnknownWord;

    fn from_str(word: &str) -> Result<Self, Self::Err> {
        match word {
            "circle" => Ok(Shape::Circle),
            "square" => Ok(Shape::Square),
            _ => Err(UnknownWord(word.to_string())),
        }
    }
}

impl FromStr for Size {
    type Err = UnknownWord;

    fn from_str(word: &str) -> Result<Self, Self::Err> {
        match word {
            "small" => Ok(Size::Small),
            "large" => Ok(Size::Large),
            _ => Err(UnknownWord(word.to_string())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Color::Red => "red",
            Color::Black => "black",
            Color::Yellow => "yellow",
            Color::White => "white",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Orange => "orange",
        };
        f.write_str(word)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Circle => f.write_str("circle"),
            Shape::Square => f.write_str("square"),
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Size::Small => f.write_str("small"),
            Size::Large => f.write_str("large"),
        }
    }
}

/// Canonical value key of a token, usable in maps.
///
/// A plain token and a sized token with the same color and shape have
/// different keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenKey(pub Color, pub Shape, pub Option<Size>);

/// A manipulable object on the board (e.g., `small red square`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub color: Color,
    pub shape: Shape,
    pub size: Option<Size>,
}

impl Token {
    pub fn plain(color: Color, shape: Shape) -> Self {
        Token {
            color,
            shape,
            size: None,
        }
    }

    pub fn sized(size: Size, color: Color, shape: Shape) -> Self {
        Token {
            color,
            shape,
            size: Some(size),
        }
    }

    pub fn is_sized(&self) -> bool {
        self.size.is_some()
    }

    pub fn key(&self) -> TokenKey {
        TokenKey(self.color, self.shape, self.size)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(size) = self.size {
            write!(f, "{} ", size)?;
        }
        write!(f, "{} {}", self.color, self.shape)
    }
}

/// The fixed set of things a participant can do with tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// `touch <token>`
    Touch,
    /// `pick up <token>`
    PickUp,
    /// `use <token> to touch <token>`
    UseToTouch,
    /// `move <token> away from <token>`
    MoveAwayFrom,
    /// `put <token> left of <token>`
    PutLeftOf,
    /// `put <token> between <token> and <token>`
    PutBetween,
}

impl Action {
    /// Number of tokens an interaction with this action names.
    pub fn arity(self) -> usize {
        match self {
            Action::Touch | Action::PickUp => 1,
            Action::UseToTouch | Action::MoveAwayFrom | Action::PutLeftOf => 2,
            Action::PutBetween => 3,
        }
    }

    /// Whether the action can only be judged from token geometry.
    pub fn is_directional(self) -> bool {
        matches!(
            self,
            Action::MoveAwayFrom | Action::PutLeftOf | Action::PutBetween
        )
    }
}

/// A recognized user action on one, two or three tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Interaction {
    Single {
        token: Token,
        action: Action,
    },
    Dual {
        first: Token,
        second: Token,
        action: Action,
    },
    Triple {
        first: Token,
        second: Token,
        third: Token,
        action: Action,
    },
}

impl Interaction {
    pub fn touch(token: Token) -> Self {
        Interaction::Single {
            token,
            action: Action::Touch,
        }
    }

    pub fn pick_up(token: Token) -> Self {
        Interaction::Single {
            token,
            action: Action::PickUp,
        }
    }

    pub fn use_to_touch(first: Token, second: Token) -> Self {
        Interaction::Dual {
            first,
            second,
            action: Action::UseToTouch,
        }
    }

    pub fn move_away_from(first: Token, second: Token) -> Self {
        Interaction::Dual {
            first,
            second,
            action: Action::MoveAwayFrom,
        }
    }

    pub fn put_left_of(first: Token, second: Token) -> Self {
        Interaction::Dual {
            first,
            second,
            action: Action::PutLeftOf,
        }
    }

    pub fn put_between(first: Token, second: Token, third: Token) -> Self {
        Interaction::Triple {
            first,
            second,
            third,
            action: Action::PutBetween,
        }
    }

    pub fn action(&self) -> Action {
        match self {
            Interaction::Single { action, .. }
            | Interaction::Dual { action, .. }
            | Interaction::Triple { action, .. } => *action,
        }
    }

    /// The token the participant acts with (the only one for single interactions).
    pub fn primary_token(&self) -> &Token {
        match self {
            Interaction::Single { token, .. } => token,
            Interaction::Dual { first, .. } | Interaction::Triple { first, .. } => first,
        }
    }

    pub fn tokens(&self) -> Vec<Token> {
        match self {
            Interaction::Single { token, .. } => vec![*token],
            Interaction::Dual { first, second, .. } => vec![*first, *second],
            Interaction::Triple {
                first,
                second,
                third,
                ..
            } => vec![*first, *second, *third],
        }
    }

    /// True when either every token carries a size or none does.
    pub fn has_uniform_size(&self) -> bool {
        let tokens = self.tokens();
        let sized = tokens.iter().filter(|t| t.is_sized()).count();
        sized == 0 || sized == tokens.len()
    }

    pub fn is_sized(&self) -> bool {
        self.primary_token().is_sized()
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interaction::Single {
                token,
                action: Action::Touch,
            } => write!(f, "touch {}", token),
            Interaction::Single {
                token,
                action: Action::PickUp,
            } => write!(f, "pick up {}", token),
            Interaction::Dual {
                first,
                second,
                action: Action::UseToTouch,
            } => write!(f, "use {} to touch {}", first, second),
            Interaction::Dual {
                first,
                second,
                action: Action::MoveAwayFrom,
            } => write!(f, "move {} away from {}", first, second),
            Interaction::Dual {
                first,
                second,
                action: Action::PutLeftOf,
            } => write!(f, "put {} left of {}", first, second),
            Interaction::Triple {
                first,
                second,
                third,
                action: Action::PutBetween,
            } => write!(f, "put {} between {} and {}", first, second, third),
            // Arity and action disagree; no rule text describes this.
            _ => {
                let tokens: Vec<String> = self.tokens().iter().map(|t| t.to_string()).collect();
                write!(f, "<{:?} on {}>", self.action(), tokens.join(", "))
            }
        }
    }
}

/// A compiled expectation describing which interactions conclude a trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// `nothing`: never satisfied by an interaction.
    DoNothing,
    /// Exactly one required interaction.
    Leaf(Interaction),
    /// Children satisfied one after another (one step per line).
    InOrder(Vec<Rule>),
    /// Children satisfied in any order (comma separated clauses).
    InAnyOrder(Vec<Rule>),
    /// Either alternative (`a or b`).
    FirstOrSecond(Box<Rule>, Box<Rule>),
}

impl Rule {
    pub fn first_or_second(first: Rule, second: Rule) -> Self {
        Rule::FirstOrSecond(Box::new(first), Box::new(second))
    }

    /// Number of leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Rule::DoNothing => 0,
            Rule::Leaf(_) => 1,
            Rule::InOrder(children) | Rule::InAnyOrder(children) => {
                children.iter().map(Rule::leaf_count).sum()
            }
            Rule::FirstOrSecond(first, second) => first.leaf_count() + second.leaf_count(),
        }
    }
}

impl From<Interaction> for Rule {
    fn from(interaction: Interaction) -> Self {
        Rule::Leaf(interaction)
    }
}

fn join(f: &mut fmt::Formatter<'_>, rules: &[Rule], separator: &str) -> fmt::Result {
    for (i, rule) in rules.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", rule)?;
    }
    Ok(())
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::DoNothing => f.write_str("nothing"),
            Rule::Leaf(interaction) => write!(f, "{}", interaction),
            Rule::InOrder(steps) => join(f, steps, "\n"),
            Rule::InAnyOrder(clauses) => join(f, clauses, ", "),
            Rule::FirstOrSecond(first, second) => write!(f, "{} or {}", first, second),
        }
    }
}
