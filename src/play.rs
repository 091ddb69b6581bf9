use std::io::{self, BufRead, Write};

use shakmaty::{Color, File, Move, Position, Rank, Square};
use tracing::info;

use crate::error::EngineResult;
use crate::game::{Game, GameResult};
use crate::rules::Rules;
use crate::search::{self, SearchState};
use crate::types::EngineConfig;

pub fn run(config: EngineConfig, human: Color) -> EngineResult<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut game = Game::new();
    let result = play(&mut game, &config, human, &mut stdin.lock(), &mut stdout.lock())?;
    info!(result = ?result, moves = game.history_len(), "game finished");
    Ok(())
}

/// Runs the game loop until the game ends or input is exhausted (`quit` or EOF).
/// Moves are UCI text; a bare pawn move to the last rank prompts for the piece.
pub fn play(
    game: &mut Game,
    config: &EngineConfig,
    human: Color,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> EngineResult<Option<GameResult>> {
    let mut state = SearchState::new();

    loop {
        render(game, out)?;

        if let Some(result) = game.result() {
            writeln!(out, "Game over. Result: {}", result)?;
            return Ok(Some(result));
        }

        if game.turn() == human {
            write!(out, "Your move: ")?;
            out.flush()?;
            let Some(line) = read_line(input)? else {
                return Ok(None);
            };
            let text = line.trim();
            if text == "quit" {
                return Ok(None);
            }
            match read_human_move(game, text, input, out) {
                Ok(mv) => game.apply(&mv)?,
                Err(e) => writeln!(out, "{}", e)?,
            }
        } else {
            let result = search::find_best_move(game, &mut state, config.depth)?;
            let Some(mv) = result.best_move else {
                return Ok(game.result());
            };
            writeln!(out, "Engine plays {} (score {})", game.uci(&mv), result.score)?;
            game.apply(&mv)?;
        }
    }
}

fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn read_human_move(
    game: &Game,
    text: &str,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> EngineResult<Move> {
    if text.len() == 4 && game.parse_uci(&format!("{text}q")).is_ok() {
        write!(out, "Promote to (Q, R, B, N): ")?;
        out.flush()?;
        let answer = read_line(input)?.unwrap_or_default();
        let piece = promotion_choice(&answer);
        return Ok(game.parse_uci(&format!("{text}{piece}"))?);
    }
    Ok(game.parse_uci(text)?)
}

/// Maps the answer to the promotion prompt to a UCI promotion letter.
fn promotion_choice(answer: &str) -> char {
    match answer.trim().chars().next().map(|c| c.to_ascii_uppercase()) {
        Some('R') => 'r',
        Some('B') => 'b',
        Some('N') => 'n',
        _ => 'q',
    }
}

/// Text grid, rank 8 at the top. The king of a side in check is bracketed.
pub fn render(game: &Game, out: &mut impl Write) -> io::Result<()> {
    let board = game.position().board();
    let checked_king: Option<Square> = if game.is_check() {
        board.king_of(game.turn())
    } else {
        None
    };

    for &rank in Rank::ALL.iter().rev() {
        write!(out, "{} ", rank.char())?;
        for &file in File::ALL.iter() {
            let sq = Square::from_coords(file, rank);
            let symbol = board.piece_at(sq).map_or('.', |p| p.char());
            if Some(sq) == checked_king {
                write!(out, "[{}]", symbol)?;
            } else {
                write!(out, " {} ", symbol)?;
            }
        }
        writeln!(out)?;
    }
    write!(out, " ")?;
    for &file in File::ALL.iter() {
        write!(out, " {} ", file.char())?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::{Piece, Role};
    use std::io::Cursor;

    fn play_script(game: &mut Game, human: Color, script: &str) -> (Option<GameResult>, String) {
        let config = EngineConfig::with_depth(1);
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = play(game, &config, human, &mut input, &mut out).unwrap();
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_promotion_choice() {
        assert_eq!(promotion_choice("n\n"), 'n');
        assert_eq!(promotion_choice("Rook"), 'r');
        assert_eq!(promotion_choice(""), 'q');
        assert_eq!(promotion_choice("x"), 'q');
    }

    #[test]
    fn test_human_then_engine_move() {
        let mut game = Game::new();
        let (result, output) = play_script(&mut game, Color::White, "e2e4\nquit\n");
        assert_eq!(result, None);
        assert!(output.contains("Engine plays"));
        assert_eq!(game.history_len(), 2);
    }

    #[test]
    fn test_engine_moves_first_when_human_is_black() {
        let mut game = Game::new();
        let (_, output) = play_script(&mut game, Color::Black, "quit\n");
        assert!(output.contains("Engine plays"));
        assert_eq!(game.history_len(), 1);
        assert_eq!(game.turn(), Color::Black);
    }

    #[test]
    fn test_illegal_input_is_rejected() {
        let mut game = Game::new();
        let (_, output) = play_script(&mut game, Color::White, "e2e5\nhello\n");
        assert!(output.contains("illegal move: e2e5"));
        assert!(output.contains("unparsable move text"));
        assert_eq!(game.history_len(), 0);
    }

    #[test]
    fn test_underpromotion_prompt() {
        let mut game = Game::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let (_, output) = play_script(&mut game, Color::White, "a7a8\nn\nquit\n");
        assert!(output.contains("Promote to (Q, R, B, N): "));
        let piece = game.position().board().piece_at(Square::A8);
        assert_eq!(piece, Some(Piece { color: Color::White, role: Role::Knight }));
    }

    #[test]
    fn test_promotion_defaults_to_queen() {
        let mut game = Game::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
        play_script(&mut game, Color::White, "a7a8\n\nquit\n");
        let piece = game.position().board().piece_at(Square::A8);
        assert_eq!(piece, Some(Piece { color: Color::White, role: Role::Queen }));
    }

    #[test]
    fn test_game_over_reports_result() {
        let mut game =
            Game::from_fen("rnb1kbnr/pppp1ppp/4p3/8/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        let (result, output) = play_script(&mut game, Color::White, "");
        assert_eq!(result, Some(GameResult::BlackWins));
        assert!(output.contains("Game over. Result: 0-1"));
        // White king is in check
        assert!(output.contains("[K]"));
    }

    #[test]
    fn test_render_startpos() {
        let mut out = Vec::new();
        render(&Game::new(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let first = text.lines().next().unwrap();
        assert_eq!(first, "8  r  n  b  q  k  b  n  r ");
        assert!(text.lines().last().unwrap().contains(" a  b  c  d  e  f  g  h "));
    }
}
