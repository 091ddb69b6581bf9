use crate::rules::Rules;
use crate::types::Score;

pub const CAPTURE_BONUS: Score = 1000;
pub const CHECK_BONUS: Score = 500;
pub const PROMOTION_BONUS: Score = 800;

#[derive(Clone, Debug, PartialEq)]
pub struct ScoredMove<M> {
    pub mv: M,
    pub score: Score,
}

/// Heuristic priority of a single move. Additive: capture, check, promotion.
pub fn score_move<R: Rules + ?Sized>(pos: &mut R, mv: &R::Move) -> Result<Score, R::Error> {
    let mut score = 0;
    if pos.is_capture(mv) {
        score += CAPTURE_BONUS;
    }
    if pos.gives_check(mv)? {
        score += CHECK_BONUS;
    }
    if pos.promotion(mv).is_some() {
        score += PROMOTION_BONUS;
    }
    Ok(score)
}

/// Generates and orders the legal moves of `pos`, best first.
///
/// Moves with equal heuristic score keep their enumeration order, so the
/// sort must stay stable. There is no cap on the number of moves.
pub fn order_moves<R: Rules + ?Sized>(pos: &mut R) -> Result<Vec<ScoredMove<R::Move>>, R::Error> {
    let moves = pos.legal_moves();
    let mut scored = Vec::with_capacity(moves.len());

    for mv in moves {
        let score = score_move(pos, &mv)?;
        scored.push(ScoredMove { mv, score });
    }

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    Ok(scored)
}
