use std::time::Instant;

use tracing::debug;

use crate::evaluation::{Evaluate, Evaluator};
use crate::movegen::order_moves;
use crate::rules::Rules;
use crate::types::{SCORE_INFINITY, Score, SearchResult, is_mate_score};

/// Per-search counters plus the leaf evaluator. Nothing here survives from one
/// `find_best_move` call to the next.
pub struct SearchState<E = Evaluator> {
    pub nodes: u64,
    pub evaluations: u64,
    pub cutoffs: u64,
    pub evaluator: E,
}

impl SearchState {
    pub fn new() -> Self {
        Self::with_evaluator(Evaluator)
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> SearchState<E> {
    pub fn with_evaluator(evaluator: E) -> Self {
        Self {
            nodes: 0,
            evaluations: 0,
            cutoffs: 0,
            evaluator,
        }
    }

    pub fn reset(&mut self) {
        self.nodes = 0;
        self.evaluations = 0;
        self.cutoffs = 0;
    }
}

/// Leaf value from the root mover's perspective. The evaluator scores for the
/// side to move, which is the root mover exactly when `maximizing`.
fn leaf_value<R, E>(pos: &R, state: &mut SearchState<E>, maximizing: bool) -> Score
where
    R: Rules + ?Sized,
    E: Evaluate<R>,
{
    state.evaluations += 1;
    let score = state.evaluator.evaluate(pos);
    if maximizing { score } else { -score }
}

/// Picks a move for the side to move by searching `depth` plies.
///
/// Returns `best_move: None` when there is no legal move; the score is then the
/// static evaluation of the terminal position. `pos` is restored before
/// returning `Ok`. On `Err` the position is left wherever the failure hit.
pub fn find_best_move<R, E>(
    pos: &mut R,
    state: &mut SearchState<E>,
    depth: u8,
) -> Result<SearchResult<R::Move>, R::Error>
where
    R: Rules + ?Sized,
    E: Evaluate<R>,
{
    state.reset();
    let depth = depth.max(1);
    let start = Instant::now();
    state.nodes += 1;

    let moves = order_moves(pos)?;

    let mut best_move: Option<R::Move> = None;
    let mut best_score = -SCORE_INFINITY;
    let mut alpha = -SCORE_INFINITY;
    let beta = SCORE_INFINITY;

    for scored in moves {
        pos.apply(&scored.mv)?;
        let score = search_value(pos, state, depth - 1, alpha, beta, false)?;
        pos.undo()?;

        debug!(mv = ?scored.mv, ordering = scored.score, score, "root move searched");

        // Ties keep the earlier move
        if score > best_score {
            best_score = score;
            best_move = Some(scored.mv);
        }
        // Only narrows the window for later siblings; root moves are never pruned.
        alpha = alpha.max(score);
    }

    if best_move.is_none() {
        best_score = leaf_value(pos, state, true);
    }

    debug!(
        depth,
        score = best_score,
        mate = is_mate_score(best_score),
        nodes = state.nodes,
        evaluations = state.evaluations,
        cutoffs = state.cutoffs,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "search complete"
    );

    Ok(SearchResult {
        best_move,
        score: best_score,
        depth,
        nodes: state.nodes,
    })
}

/// Minimax with alpha-beta pruning over the shared position.
///
/// Scores are from the perspective of the side to move at the root of the
/// search: `maximizing` is true when that side is to move at this node.
pub fn search_value<R, E>(
    pos: &mut R,
    state: &mut SearchState<E>,
    depth: u8,
    mut alpha: Score,
    mut beta: Score,
    maximizing: bool,
) -> Result<Score, R::Error>
where
    R: Rules + ?Sized,
    E: Evaluate<R>,
{
    state.nodes += 1;

    if depth == 0 || pos.is_terminal() {
        return Ok(leaf_value(pos, state, maximizing));
    }

    let moves = order_moves(pos)?;

    let mut best = if maximizing { -SCORE_INFINITY } else { SCORE_INFINITY };

    for scored in &moves {
        pos.apply(&scored.mv)?;
        let value = search_value(pos, state, depth - 1, alpha, beta, !maximizing)?;
        pos.undo()?;

        if maximizing {
            best = best.max(value);
            alpha = alpha.max(best);
        } else {
            best = best.min(value);
            beta = beta.min(best);
        }

        if beta <= alpha {
            state.cutoffs += 1;
            break;
        }
    }

    Ok(best)
}
