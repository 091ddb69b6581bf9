use std::fmt;

use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Piece, Position, Role};

use crate::error::RulesError;
use crate::rules::Rules;

/// Halfmoves without a capture or pawn move after which the game is drawn.
const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;
const FIVEFOLD: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
        })
    }
}

/// A chess game with an undo log: the position plus every position it was
/// reached from, so moves can be taken back in LIFO order.
#[derive(Clone, Debug)]
pub struct Game {
    position: Chess,
    undo_log: Vec<Chess>,
    // Zobrist keys of the game so far, current position last.
    keys: Vec<Zobrist64>,
}

impl Default for Game {
    fn default() -> Self {
        Self::from_position(Chess::default())
    }
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_position(position: Chess) -> Self {
        let key = position.zobrist_hash::<Zobrist64>(EnPassantMode::Legal);
        Self {
            position,
            undo_log: Vec::new(),
            keys: vec![key],
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let invalid = |reason: String| RulesError::InvalidFen {
            fen: fen.to_string(),
            reason,
        };
        let parsed: Fen = fen.trim().parse().map_err(|e| invalid(format!("{e}")))?;
        let position: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| invalid(format!("{e}")))?;
        Ok(Self::from_position(position))
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    pub fn fen(&self) -> String {
        Fen::from_setup(self.position.clone().into_setup(EnPassantMode::Legal)).to_string()
    }

    /// Number of moves that can currently be undone.
    pub fn history_len(&self) -> usize {
        self.undo_log.len()
    }

    pub fn zobrist(&self) -> Zobrist64 {
        self.position.zobrist_hash(EnPassantMode::Legal)
    }

    /// Parses UCI move text (`e2e4`, `e7e8q`) against the current position.
    pub fn parse_uci(&self, text: &str) -> Result<Move, RulesError> {
        let uci: UciMove = text
            .trim()
            .parse()
            .map_err(|_| RulesError::InvalidMoveText(text.to_string()))?;
        uci.to_move(&self.position)
            .map_err(|_| RulesError::IllegalMove(text.to_string()))
    }

    pub fn uci(&self, mv: &Move) -> String {
        mv.to_uci(CastlingMode::Standard).to_string()
    }

    fn repetitions(&self) -> usize {
        match self.keys.last() {
            Some(current) => self.keys.iter().filter(|&k| k == current).count(),
            None => 0,
        }
    }

    pub fn result(&self) -> Option<GameResult> {
        if self.is_checkmate() {
            return Some(match self.position.turn() {
                Color::White => GameResult::BlackWins,
                Color::Black => GameResult::WhiteWins,
            });
        }
        if self.is_terminal() {
            return Some(GameResult::Draw);
        }
        None
    }
}

impl Rules for Game {
    type Move = Move;
    type Error = RulesError;

    fn turn(&self) -> Color {
        self.position.turn()
    }

    fn legal_moves(&self) -> Vec<Move> {
        self.position.legal_moves().into_iter().collect()
    }

    fn mobility(&self) -> usize {
        self.position.legal_moves().len()
    }

    fn apply(&mut self, mv: &Move) -> Result<(), RulesError> {
        if !self.position.is_legal(mv) {
            return Err(RulesError::IllegalMove(self.uci(mv)));
        }
        let mut next = self.position.clone();
        next.play_unchecked(mv);
        let key = next.zobrist_hash::<Zobrist64>(EnPassantMode::Legal);
        self.undo_log.push(std::mem::replace(&mut self.position, next));
        self.keys.push(key);
        Ok(())
    }

    fn undo(&mut self) -> Result<(), RulesError> {
        let previous = self.undo_log.pop().ok_or(RulesError::NothingToUndo)?;
        self.position = previous;
        self.keys.pop();
        Ok(())
    }

    fn is_check(&self) -> bool {
        self.position.is_check()
    }

    fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    fn is_insufficient_material(&self) -> bool {
        self.position.is_insufficient_material()
    }

    fn is_rule_draw(&self) -> bool {
        let seventy_five = self.position.halfmoves() >= SEVENTY_FIVE_MOVE_PLIES
            && !self.position.is_checkmate();
        seventy_five || self.repetitions() >= FIVEFOLD
    }

    fn piece_count(&self, role: Role, color: Color) -> u32 {
        self.position.board().by_piece(Piece { color, role }).count() as u32
    }

    fn is_capture(&self, mv: &Move) -> bool {
        mv.is_capture()
    }

    fn promotion(&self, mv: &Move) -> Option<Role> {
        mv.promotion()
    }

    fn gives_check(&mut self, mv: &Move) -> Result<bool, RulesError> {
        if !self.position.is_legal(mv) {
            return Err(RulesError::IllegalMove(self.uci(mv)));
        }
        let mut next = self.position.clone();
        next.play_unchecked(mv);
        Ok(next.is_check())
    }
}
