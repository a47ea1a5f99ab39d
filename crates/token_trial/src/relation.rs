//! Token geometry captured when a token is released.
//!
//! A [`PositionRelation`] answers the directional questions the matcher asks
//! about a release: did the released token end up further from another token,
//! to its left, or between two others. All comparisons use the centroids of the
//! tokens' bounding boxes.

use std::collections::HashMap;

use kurbo::{Point, Rect};
use token_rules::ast::{Token, TokenKey};

/// Bounding box of a token in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TokenPosition {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl TokenPosition {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        TokenPosition {
            left,
            top,
            width,
            height,
        }
    }

    /// Same size, moved so that its top-left corner is at (`left`, `top`).
    pub fn moved_to(self, left: f64, top: f64) -> Self {
        TokenPosition { left, top, ..self }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_origin_size((self.left, self.top), (self.width, self.height))
    }

    pub fn centroid(&self) -> Point {
        self.rect().center()
    }
}

/// Geometry snapshot taken when a token is released.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionRelation {
    released: Token,
    before: TokenPosition,
    after: TokenPosition,
    positions: HashMap<TokenKey, TokenPosition>,
}

impl PositionRelation {
    /// `before` and `after` are the released token's boxes at drag start and at
    /// release; `positions` holds the last known box of every other token.
    pub fn new(
        released: Token,
        before: TokenPosition,
        after: TokenPosition,
        positions: HashMap<TokenKey, TokenPosition>,
    ) -> Self {
        PositionRelation {
            released,
            before,
            after,
            positions,
        }
    }

    pub fn released_token(&self) -> &Token {
        &self.released
    }

    pub fn position_before(&self) -> TokenPosition {
        self.before
    }

    pub fn position_after(&self) -> TokenPosition {
        self.after
    }

    /// Last known box of `token`; the released token reports its release box.
    /// Tokens never seen sit at the origin with no extent.
    pub fn position_of(&self, token: &Token) -> TokenPosition {
        if *token == self.released {
            return self.after;
        }
        self.positions.get(&token.key()).copied().unwrap_or_default()
    }

    /// Distance between the centroids of two tokens.
    pub fn distance_between(&self, a: &Token, b: &Token) -> f64 {
        self.position_of(a)
            .centroid()
            .distance(self.position_of(b).centroid())
    }

    pub fn released_token_is_further_from(&self, token: &Token) -> bool {
        let reference = self.position_of(token).centroid();
        self.after.centroid().distance(reference) > self.before.centroid().distance(reference)
    }

    pub fn released_token_is_left_of(&self, token: &Token) -> bool {
        self.after.centroid().x < self.position_of(token).centroid().x
    }

    /// Horizontal betweenness: the release centroid lies strictly between the
    /// centroids of `a` and `b`.
    pub fn released_token_is_between(&self, a: &Token, b: &Token) -> bool {
        let x = self.after.centroid().x;
        let a = self.position_of(a).centroid().x;
        let b = self.position_of(b).centroid().x;
        a.min(b) < x && x < a.max(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use token_rules::ast::{Color, Shape};

    fn yellow_square() -> Token {
        Token::plain(Color::Yellow, Shape::Square)
    }

    fn green_square() -> Token {
        Token::plain(Color::Green, Shape::Square)
    }

    fn relation(before: TokenPosition, after: TokenPosition) -> PositionRelation {
        let mut positions = HashMap::new();
        positions.insert(yellow_square().key(), TokenPosition::new(10.0, 20.0, 30.0, 40.0));
        positions.insert(
            Token::plain(Color::Red, Shape::Circle).key(),
            TokenPosition::new(400.0, 20.0, 30.0, 40.0),
        );
        PositionRelation::new(green_square(), before, after, positions)
    }

    #[test]
    fn centroid_is_box_center() {
        let position = TokenPosition::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(position.centroid(), Point::new(25.0, 40.0));
    }

    #[test]
    fn further_from_compares_centroid_distances() {
        let before = TokenPosition::new(50.0, 60.0, 70.0, 80.0);
        let after = TokenPosition::new(90.0, 100.0, 70.0, 80.0);
        assert!(relation(before, after).released_token_is_further_from(&yellow_square()));
        assert!(!relation(after, before).released_token_is_further_from(&yellow_square()));
    }

    #[test]
    fn left_of_and_between() {
        let before = TokenPosition::new(500.0, 60.0, 70.0, 80.0);
        let after = TokenPosition::new(100.0, 60.0, 70.0, 80.0);
        let relation = relation(before, after);
        let red_circle = Token::plain(Color::Red, Shape::Circle);
        assert!(relation.released_token_is_left_of(&red_circle));
        assert!(!relation.released_token_is_left_of(&yellow_square()));
        assert!(relation.released_token_is_between(&yellow_square(), &red_circle));
        assert!(relation.released_token_is_between(&red_circle, &yellow_square()));
    }

    #[test]
    fn unseen_tokens_sit_at_origin() {
        let relation = relation(TokenPosition::default(), TokenPosition::default());
        let blue_circle = Token::plain(Color::Blue, Shape::Circle);
        assert_eq!(relation.position_of(&blue_circle), TokenPosition::default());
        assert_eq!(relation.distance_between(&blue_circle, &green_square()), 0.0);
    }
}
