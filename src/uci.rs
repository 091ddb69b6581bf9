use std::io::{self, BufRead, Write};
use std::time::Instant;

use tracing::{debug, warn};

use crate::error::{EngineResult, RulesError};
use crate::game::Game;
use crate::rules::Rules;
use crate::search::{self, SearchState};
use crate::types::{EngineConfig, MAX_DEPTH, Score};

pub fn run(config: EngineConfig) -> EngineResult<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut session = Session::new(config);
    for line in stdin.lock().lines() {
        let line = line?;
        if !session.handle(&line, &mut out)? {
            break;
        }
        out.flush()?;
    }
    Ok(())
}

/// One UCI conversation: the current game plus engine options.
pub struct Session {
    game: Game,
    config: EngineConfig,
    state: SearchState,
}

impl Session {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            game: Game::new(),
            config,
            state: SearchState::new(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Handles one command line. Returns `false` on `quit`.
    pub fn handle(&mut self, line: &str, out: &mut impl Write) -> EngineResult<bool> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = tokens.first() else {
            return Ok(true);
        };

        match command {
            "uci" => {
                writeln!(out, "id name {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))?;
                writeln!(out, "id author the {} authors", env!("CARGO_PKG_NAME"))?;
                writeln!(
                    out,
                    "option name Depth type spin default {} min 1 max {}",
                    self.config.depth, MAX_DEPTH
                )?;
                writeln!(out, "uciok")?;
            }
            "isready" => writeln!(out, "readyok")?,
            "ucinewgame" => self.game = Game::new(),
            "position" => {
                if let Err(e) = self.set_position(&tokens) {
                    warn!(error = %e, "ignoring position command");
                }
            }
            "go" => self.go(&tokens, out)?,
            "setoption" => parse_setoption(&tokens, &mut self.config),
            "d" | "print" => writeln!(out, "{}", self.game.fen())?,
            "quit" => return Ok(false),
            other => debug!(command = other, "unknown command"),
        }
        Ok(true)
    }

    fn set_position(&mut self, tokens: &[&str]) -> Result<(), RulesError> {
        let game = parse_position(tokens)?;
        self.game = game;
        Ok(())
    }

    fn go(&mut self, tokens: &[&str], out: &mut impl Write) -> EngineResult<()> {
        let depth = parse_go_depth(tokens).unwrap_or(self.config.depth);
        let start = Instant::now();

        let result = search::find_best_move(&mut self.game, &mut self.state, depth)?;

        let elapsed_ms = start.elapsed().as_millis().max(1) as u64;
        let nps = result.nodes * 1000 / elapsed_ms;
        let pv = result
            .best_move
            .as_ref()
            .map(|m| self.game.uci(m))
            .unwrap_or_default();
        writeln!(
            out,
            "info depth {} {} nodes {} time {} nps {} pv {}",
            result.depth,
            format_score(result.score),
            result.nodes,
            elapsed_ms,
            nps,
            pv
        )?;

        match result.best_move {
            Some(m) => writeln!(out, "bestmove {}", self.game.uci(&m))?,
            None => writeln!(out, "bestmove 0000")?,
        }
        Ok(())
    }
}

/// Format a score for UCI output. Mate distance is not tracked, so sentinels
/// are reported as centipawns too.
pub fn format_score(score: Score) -> String {
    format!("score cp {}", score)
}

fn parse_go_depth(tokens: &[&str]) -> Option<u8> {
    let idx = tokens.iter().position(|&t| t == "depth")?;
    tokens.get(idx + 1).and_then(|t| parse_depth(t))
}

/// Depth text clamped to `1..=MAX_DEPTH`; out-of-range numbers are clamped, not rejected.
fn parse_depth(text: &str) -> Option<u8> {
    let depth = text.trim().parse::<u32>().ok()?;
    Some(depth.clamp(1, MAX_DEPTH as u32) as u8)
}

fn parse_position(tokens: &[&str]) -> Result<Game, RulesError> {
    let mut idx = 1;
    let mut game = match tokens.get(idx) {
        Some(&"startpos") => {
            idx += 1;
            Game::new()
        }
        Some(&"fen") => {
            idx += 1;
            // Collect FEN fields up to "moves" keyword or end of tokens
            let mut fen_parts: Vec<&str> = Vec::new();
            while idx < tokens.len() && tokens[idx] != "moves" && fen_parts.len() < 6 {
                fen_parts.push(tokens[idx]);
                idx += 1;
            }
            Game::from_fen(&fen_parts.join(" "))?
        }
        _ => return Err(RulesError::InvalidFen {
            fen: tokens[1..].join(" "),
            reason: "expected startpos or fen".to_string(),
        }),
    };

    if tokens.get(idx) == Some(&"moves") {
        for &text in &tokens[idx + 1..] {
            let mv = game.parse_uci(text)?;
            game.apply(&mv)?;
        }
    }
    Ok(game)
}

fn parse_setoption(tokens: &[&str], config: &mut EngineConfig) {
    let name_idx = tokens.iter().position(|&t| t == "name");
    let value_idx = tokens.iter().position(|&t| t == "value");

    if let (Some(ni), Some(vi)) = (name_idx, value_idx) {
        if ni >= vi {
            return;
        }
        let name: String = tokens[ni + 1..vi].join(" ");
        let value: String = tokens[vi + 1..].join(" ");

        match name.to_lowercase().as_str() {
            "depth" => match parse_depth(&value) {
                Some(depth) => *config = EngineConfig::with_depth(depth),
                None => warn!(value = %value, "invalid Depth option"),
            },
            other => debug!(option = other, "unknown option"),
        }
    }
}
