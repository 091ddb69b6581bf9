use shakmaty::{Color, Role};

use crate::rules::Rules;
use crate::types::{MATE_SCORE, Score};

/// Material weight of each piece kind.
pub const PIECE_VALUES: [(Role, Score); 6] = [
    (Role::Pawn, 100),
    (Role::Knight, 320),
    (Role::Bishop, 330),
    (Role::Rook, 500),
    (Role::Queen, 900),
    (Role::King, 20_000),
];

pub const MOBILITY_WEIGHT: Score = 10;
pub const CHECK_PENALTY: Score = 50;

/// Leaf scorer used by the search.
pub trait Evaluate<R: Rules + ?Sized> {
    /// Score from the perspective of the side to move. Must not mutate `pos`.
    fn evaluate(&self, pos: &R) -> Score;
}

/// Material, mobility and check status.
#[derive(Clone, Copy, Debug, Default)]
pub struct Evaluator;

impl<R: Rules + ?Sized> Evaluate<R> for Evaluator {
    fn evaluate(&self, pos: &R) -> Score {
        evaluate(pos)
    }
}

/// Evaluates a position from the perspective of the side to move.
///
/// A mated side to move scores `-MATE_SCORE`; every draw the rules engine
/// reports scores exactly 0.
pub fn evaluate<R: Rules + ?Sized>(pos: &R) -> Score {
    if pos.is_checkmate() {
        return -MATE_SCORE;
    }
    if pos.is_stalemate() || pos.is_insufficient_material() || pos.is_rule_draw() {
        return 0;
    }

    let us = pos.turn();
    let mut score = material(pos, us);

    score += MOBILITY_WEIGHT * pos.mobility() as Score;

    if pos.is_check() {
        score -= CHECK_PENALTY;
    }

    score
}

/// Material balance seen from `side`.
pub fn material<R: Rules + ?Sized>(pos: &R, side: Color) -> Score {
    PIECE_VALUES
        .iter()
        .map(|&(role, value)| {
            let ours = pos.piece_count(role, side) as Score;
            let theirs = pos.piece_count(role, !side) as Score;
            (ours - theirs) * value
        })
        .sum()
}
