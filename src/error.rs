use thiserror::Error;

/// Failures raised by the rules engine while the core queries or mutates a game.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// Move is not a member of the current legal move set
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// Undo requested with an empty history
    #[error("no move to undo")]
    NothingToUndo,

    #[error("invalid FEN {fen:?}: {reason}")]
    InvalidFen { fen: String, reason: String },

    /// Text that is not a UCI move at all (e.g. `e9e4`)
    #[error("unparsable move text {0:?}")]
    InvalidMoveText(String),
}

/// Errors surfaced by the UCI and interactive drivers.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
