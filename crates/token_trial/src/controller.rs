//! Translates raw board gestures into submitted interactions.
//!
//! The [`TokenController`] sits between a UI adapter ([`TokenControl`]) and a
//! model ([`TokenModel`]). It listens to the adapter's notifications, asks the
//! adapter which tokens were involved and where they are, and submits the
//! corresponding interactions:
//!
//! | gesture                                 | submission                          |
//! |-----------------------------------------|-------------------------------------|
//! | click                                   | `touch <clicked>`                   |
//! | drag, then drop onto another token      | `use <dragged> to touch <target>`   |
//! | drag, drop onto holding area, release   | `pick up <dragged>`                 |
//! | release anywhere else                   | `touch <released>` + geometry       |

use std::collections::HashMap;

use token_rules::ast::{Interaction, Token, TokenKey};
use tracing::{debug, warn};

use crate::matcher::Offer;
use crate::relation::{PositionRelation, TokenPosition};

/// The UI adapter: reports which token each notification concerns and where
/// tokens currently are.
///
/// The token accessors return `None` when the adapter has not seen the
/// corresponding gesture; the translator then drops the notification.
pub trait TokenControl {
    fn token_clicked(&self) -> Option<Token>;
    fn token_dragged(&self) -> Option<Token>;
    fn token_dropped_onto(&self) -> Option<Token>;
    fn token_released(&self) -> Option<Token>;
    /// Current bounding box of `token`.
    fn token_position(&self, token: &Token) -> TokenPosition;
    /// Every token currently on the board.
    fn tokens(&self) -> Vec<Token>;
}

/// Receives the interactions recognized by a [`TokenController`].
pub trait TokenModel {
    fn submit_single(&mut self, interaction: Interaction, relation: Option<PositionRelation>)
    -> Offer;
    /// Dual and triple interactions.
    fn submit_dual(&mut self, interaction: Interaction) -> Offer;
}

/// The notifications a UI adapter delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    TokenClicked,
    TokenDragged,
    TokenDroppedOntoToken,
    HoldingAreaDroppedOnto,
    TokenReleased,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    token: Token,
    origin: TokenPosition,
    onto_holding_area: bool,
}

#[derive(Debug)]
pub struct TokenController<C, M> {
    control: C,
    model: M,
    drag: Option<Drag>,
    positions: HashMap<TokenKey, TokenPosition>,
}

impl<C: TokenControl, M: TokenModel> TokenController<C, M> {
    pub fn new(control: C, model: M) -> Self {
        TokenController {
            control,
            model,
            drag: None,
            positions: HashMap::new(),
        }
    }

    pub fn control(&self) -> &C {
        &self.control
    }

    pub fn control_mut(&mut self) -> &mut C {
        &mut self.control
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Last known box of `token`, as seen through notifications.
    pub fn last_known_position(&self, token: &Token) -> TokenPosition {
        self.positions.get(&token.key()).copied().unwrap_or_default()
    }

    /// Dispatches one adapter notification. Returns the model's verdict when
    /// the notification led to a submission.
    pub fn notify(&mut self, notification: Notification) -> Option<Offer> {
        match notification {
            Notification::TokenClicked => self.token_clicked(),
            Notification::TokenDragged => {
                self.token_dragged();
                None
            }
            Notification::TokenDroppedOntoToken => self.token_dropped_onto_token(),
            Notification::HoldingAreaDroppedOnto => {
                self.holding_area_dropped_onto();
                None
            }
            Notification::TokenReleased => self.token_released(),
        }
    }

    pub fn token_clicked(&mut self) -> Option<Offer> {
        let Some(token) = self.control.token_clicked() else {
            warn!("click notification without a clicked token");
            return None;
        };
        self.observe(&token);
        debug!(%token, "token clicked");
        Some(self.model.submit_single(Interaction::touch(token), None))
    }

    pub fn token_dragged(&mut self) {
        let Some(token) = self.control.token_dragged() else {
            warn!("drag notification without a dragged token");
            return;
        };
        let origin = self.observe(&token);
        debug!(%token, "token dragged");
        self.drag = Some(Drag {
            token,
            origin,
            onto_holding_area: false,
        });
    }

    pub fn token_dropped_onto_token(&mut self) -> Option<Offer> {
        let Some(target) = self.control.token_dropped_onto() else {
            warn!("drop notification without a target token");
            return None;
        };
        self.observe(&target);
        let Some(drag) = self.drag.take() else {
            warn!(%target, "drop onto token without a drag in progress");
            return None;
        };
        debug!(dragged = %drag.token, %target, "token dropped onto token");
        Some(
            self.model
                .submit_dual(Interaction::use_to_touch(drag.token, target)),
        )
    }

    pub fn holding_area_dropped_onto(&mut self) {
        match self.drag.as_mut() {
            Some(drag) => drag.onto_holding_area = true,
            None => warn!("drop onto holding area without a drag in progress"),
        }
    }

    pub fn token_released(&mut self) -> Option<Offer> {
        if let Some(drag) = self.drag.filter(|drag| drag.onto_holding_area) {
            self.drag = None;
            debug!(token = %drag.token, "token picked up");
            return Some(
                self.model
                    .submit_single(Interaction::pick_up(drag.token), None),
            );
        }

        let Some(released) = self.control.token_released() else {
            warn!("release notification without a released token");
            return None;
        };
        let after = self.control.token_position(&released);
        let before = match self.drag.take() {
            Some(drag) if drag.token == released => drag.origin,
            _ => self
                .positions
                .get(&released.key())
                .copied()
                .unwrap_or(after),
        };

        for token in self.control.tokens() {
            if token != released {
                self.observe(&token);
            }
        }
        self.positions.insert(released.key(), after);

        debug!(%released, "token released");
        let relation = PositionRelation::new(released, before, after, self.positions.clone());
        Some(
            self.model
                .submit_single(Interaction::touch(released), Some(relation)),
        )
    }

    fn observe(&mut self, token: &Token) -> TokenPosition {
        let position = self.control.token_position(token);
        self.positions.insert(token.key(), position);
        position
    }
}
