use token_rules::ast::{Action, Interaction};

use crate::relation::PositionRelation;

/// Decides whether a release of the expected interaction's primary token
/// counts as performing a directional interaction.
///
/// Releases arrive as plain `touch` interactions; only their geometry tells
/// whether a token was moved away from, put left of, or put between others.
pub trait ReleaseEvidence {
    fn supports(&self, expected: &Interaction, relation: &PositionRelation) -> bool;
}

/// Judges directional interactions from bounding-box centroids.
///
/// - `move A away from B`: A's centroid ends further from B's than it started.
/// - `put A left of B`: A's centroid ends with a smaller x than B's.
/// - `put A between B and C`: A's centroid x ends strictly between B's and C's.
#[derive(Debug, Clone, Copy, Default)]
pub struct CentroidEvidence;

impl ReleaseEvidence for CentroidEvidence {
    fn supports(&self, expected: &Interaction, relation: &PositionRelation) -> bool {
        match expected {
            Interaction::Dual {
                second,
                action: Action::MoveAwayFrom,
                ..
            } => relation.released_token_is_further_from(second),
            Interaction::Dual {
                second,
                action: Action::PutLeftOf,
                ..
            } => relation.released_token_is_left_of(second),
            Interaction::Triple {
                second,
                third,
                action: Action::PutBetween,
                ..
            } => relation.released_token_is_between(second, third),
            _ => false,
        }
    }
}
