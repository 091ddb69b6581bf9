pub mod error;
pub mod evaluation;
pub mod game;
pub mod movegen;
pub mod play;
pub mod rules;
pub mod search;
pub mod types;
pub mod uci;

pub use error::{EngineError, RulesError};
pub use evaluation::{Evaluate, Evaluator, evaluate};
pub use game::{Game, GameResult};
pub use rules::Rules;
pub use search::{SearchState, find_best_move, search_value};
pub use types::{EngineConfig, MATE_SCORE, SCORE_INFINITY, Score, SearchResult};
