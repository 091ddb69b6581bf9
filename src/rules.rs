use std::fmt::Debug;

use shakmaty::{Color, Role};

/// What the search needs from a rules engine. `apply` and `undo` must be exact
/// inverses when paired in LIFO order.
pub trait Rules {
    type Move: Clone + PartialEq + Debug;
    type Error: std::error::Error;

    /// Side to move.
    fn turn(&self) -> Color;

    /// Every legal move for the side to move. The order returned here is the
    /// tie-break order of move ordering, so it must be deterministic.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Number of legal moves for the side to move.
    fn mobility(&self) -> usize {
        self.legal_moves().len()
    }

    fn apply(&mut self, mv: &Self::Move) -> Result<(), Self::Error>;

    /// Reverts the most recent `apply`.
    fn undo(&mut self) -> Result<(), Self::Error>;

    fn is_check(&self) -> bool;
    fn is_checkmate(&self) -> bool;
    fn is_stalemate(&self) -> bool;
    fn is_insufficient_material(&self) -> bool;

    /// Drawn by a rule other than stalemate or insufficient material.
    fn is_rule_draw(&self) -> bool {
        false
    }

    fn is_terminal(&self) -> bool {
        self.is_checkmate()
            || self.is_stalemate()
            || self.is_insufficient_material()
            || self.is_rule_draw()
    }

    fn piece_count(&self, role: Role, color: Color) -> u32;

    fn is_capture(&self, mv: &Self::Move) -> bool;

    fn promotion(&self, mv: &Self::Move) -> Option<Role>;

    /// Whether the opponent is in check after `mv`. The position is restored
    /// before returning.
    fn gives_check(&mut self, mv: &Self::Move) -> Result<bool, Self::Error> {
        self.apply(mv)?;
        let check = self.is_check();
        self.undo()?;
        Ok(check)
    }
}
