//! The token board shown to participants and an in-memory UI adapter for it.
//!
//! [`BoardLayout`] describes which tokens appear and where they start.
//! [`BoardControl`] plays the part of the UI adapter: it is driven by
//! [`Gesture`]s, remembers which token each notification concerns, and tracks
//! every token's box so that the [`TokenController`](crate::controller::TokenController)
//! can query it.

use std::collections::HashMap;

use token_rules::ast::{Color, Shape, Size, Token, TokenKey};
use tracing::warn;

use crate::controller::{Notification, TokenControl, TokenController, TokenModel};
use crate::matcher::Offer;
use crate::relation::TokenPosition;

pub const TOKEN_WIDTH_PIXELS: f64 = 150.0;
pub const SMALL_TOKEN_WIDTH_PIXELS: f64 = 100.0;
pub const GRID_GAP_PIXELS: f64 = 60.0;

const CIRCLE_ROW: [Color; 5] = [Color::Red, Color::Black, Color::Yellow, Color::White, Color::Green];
const SQUARE_ROW: [Color; 5] = [Color::Black, Color::Red, Color::White, Color::Green, Color::Yellow];

/// Tokens on the board, row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLayout {
    rows: Vec<Vec<Token>>,
}

impl BoardLayout {
    /// A row of circles over a row of squares, all plain.
    pub fn standard() -> Self {
        BoardLayout {
            rows: vec![
                CIRCLE_ROW.iter().map(|c| Token::plain(*c, Shape::Circle)).collect(),
                SQUARE_ROW.iter().map(|c| Token::plain(*c, Shape::Square)).collect(),
            ],
        }
    }

    /// Large circles and squares over small circles and squares.
    pub fn two_sizes() -> Self {
        let row = |colors: &[Color; 5], size, shape| {
            colors.iter().map(|c| Token::sized(size, *c, shape)).collect()
        };
        BoardLayout {
            rows: vec![
                row(&CIRCLE_ROW, Size::Large, Shape::Circle),
                row(&SQUARE_ROW, Size::Large, Shape::Square),
                row(&CIRCLE_ROW, Size::Small, Shape::Circle),
                row(&SQUARE_ROW, Size::Small, Shape::Square),
            ],
        }
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.rows.iter().flatten()
    }

    pub fn contains(&self, token: &Token) -> bool {
        self.tokens().any(|t| t == token)
    }

    /// Starting box of every token, laid out on a grid.
    pub fn initial_positions(&self) -> Vec<(Token, TokenPosition)> {
        let pitch = TOKEN_WIDTH_PIXELS + GRID_GAP_PIXELS;
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, tokens)| {
                tokens.iter().enumerate().map(move |(column, token)| {
                    let width = match token.size {
                        Some(Size::Small) => SMALL_TOKEN_WIDTH_PIXELS,
                        _ => TOKEN_WIDTH_PIXELS,
                    };
                    let position =
                        TokenPosition::new(column as f64 * pitch, row as f64 * pitch, width, width);
                    (*token, position)
                })
            })
            .collect()
    }
}

/// A participant gesture on the board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Click(Token),
    Drag(Token),
    DropOntoToken(Token),
    DropOntoHoldingArea,
    /// Repositions a token's top-left corner; no notification follows.
    Move { token: Token, left: f64, top: f64 },
    Release(Token),
}

/// In-memory UI adapter for a [`BoardLayout`].
#[derive(Debug, Clone)]
pub struct BoardControl {
    layout: BoardLayout,
    positions: HashMap<TokenKey, TokenPosition>,
    clicked: Option<Token>,
    dragged: Option<Token>,
    dropped_onto: Option<Token>,
    released: Option<Token>,
}

impl BoardControl {
    pub fn new(layout: BoardLayout) -> Self {
        let positions = layout
            .initial_positions()
            .into_iter()
            .map(|(token, position)| (token.key(), position))
            .collect();
        BoardControl {
            layout,
            positions,
            clicked: None,
            dragged: None,
            dropped_onto: None,
            released: None,
        }
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    /// Updates adapter state for `gesture` and returns the notification the
    /// translator should receive. Gestures on tokens that are not on the
    /// board are dropped.
    pub fn apply(&mut self, gesture: Gesture) -> Option<Notification> {
        match gesture {
            Gesture::Click(token) => self.on_board(token).then(|| {
                self.clicked = Some(token);
                Notification::TokenClicked
            }),
            Gesture::Drag(token) => self.on_board(token).then(|| {
                self.dragged = Some(token);
                Notification::TokenDragged
            }),
            Gesture::DropOntoToken(token) => self.on_board(token).then(|| {
                self.dropped_onto = Some(token);
                Notification::TokenDroppedOntoToken
            }),
            Gesture::DropOntoHoldingArea => Some(Notification::HoldingAreaDroppedOnto),
            Gesture::Move { token, left, top } => {
                if self.on_board(token) {
                    let moved = self.token_position(&token).moved_to(left, top);
                    self.positions.insert(token.key(), moved);
                }
                None
            }
            Gesture::Release(token) => self.on_board(token).then(|| {
                self.released = Some(token);
                Notification::TokenReleased
            }),
        }
    }

    fn on_board(&self, token: Token) -> bool {
        let present = self.layout.contains(&token);
        if !present {
            warn!(%token, "gesture on a token that is not on the board");
        }
        present
    }
}

impl TokenControl for BoardControl {
    fn token_clicked(&self) -> Option<Token> {
        self.clicked
    }

    fn token_dragged(&self) -> Option<Token> {
        self.dragged
    }

    fn token_dropped_onto(&self) -> Option<Token> {
        self.dropped_onto
    }

    fn token_released(&self) -> Option<Token> {
        self.released
    }

    fn token_position(&self, token: &Token) -> TokenPosition {
        self.positions.get(&token.key()).copied().unwrap_or_default()
    }

    fn tokens(&self) -> Vec<Token> {
        self.layout.tokens().copied().collect()
    }
}

impl<M: TokenModel> TokenController<BoardControl, M> {
    /// Applies `gesture` to the board and forwards the resulting notification.
    pub fn perform(&mut self, gesture: Gesture) -> Option<Offer> {
        let notification = self.control_mut().apply(gesture)?;
        self.notify(notification)
    }
}
