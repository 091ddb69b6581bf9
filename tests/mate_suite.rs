use gambit::search::{SearchState, find_best_move};
use gambit::types::MATE_SCORE;
use gambit::Game;

/// Mate-in-one positions in EPD form, best moves given as UCI text.
const MATE_IN_ONE: &str = r#"
r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - bm h5f7; id "scholar";
rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - bm d8h4; id "fool";
6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - bm a1a8; id "back rank white";
r5k1/5ppp/8/8/8/8/5PPP/6K1 b - - bm a8a1; id "back rank black";
k7/8/1K6/8/8/8/7Q/8 w - - bm h2h8; id "queen and king";
"#;

/// Parse an EPD line: "<FEN> bm <move(s)>; id "<name>";"
fn parse_epd_line(line: &str) -> Option<(String, Vec<String>, String)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let bm_idx = line.find(" bm ")?;
    let fen = line[..bm_idx].to_string();
    let rest = &line[bm_idx + 4..];

    let semi_idx = rest.find(';')?;
    let best_moves: Vec<String> = rest[..semi_idx].split_whitespace().map(|s| s.to_string()).collect();

    let id = rest
        .find("id \"")
        .and_then(|start| {
            let content = &rest[start + 4..];
            content.find('"').map(|end| content[..end].to_string())
        })
        .unwrap_or_else(|| "unknown".to_string());

    Some((fen, best_moves, id))
}

#[test]
fn test_epd_parser() {
    let line = "6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - bm a1a8; id \"back rank white\";";
    let (fen, moves, id) = parse_epd_line(line).unwrap();
    assert_eq!(fen, "6k1/5ppp/8/8/8/8/5PPP/R5K1 w - -");
    assert_eq!(moves, vec!["a1a8"]);
    assert_eq!(id, "back rank white");
    assert!(parse_epd_line("   ").is_none());
}

#[test]
fn test_mate_in_one_suite() {
    let mut total = 0;

    for line in MATE_IN_ONE.lines() {
        let Some((fen, best_moves, id)) = parse_epd_line(line) else {
            continue;
        };
        total += 1;

        // EPD carries no move clocks
        let fen = format!("{} 0 1", fen);
        let mut game = Game::from_fen(&fen).unwrap_or_else(|e| panic!("{}: {}", id, e));
        for depth in 1..=2 {
            let mut state = SearchState::new();
            let result = find_best_move(&mut game, &mut state, depth).unwrap();
            let found = game.uci(&result.best_move.unwrap());
            assert!(
                best_moves.contains(&found),
                "{} depth {}: expected {:?}, got {}",
                id, depth, best_moves, found
            );
            assert_eq!(result.score, MATE_SCORE, "{} depth {}", id, depth);
        }
        assert_eq!(game.fen(), Game::from_fen(&fen).unwrap().fen());
    }

    assert_eq!(total, 5, "Expected 5 mate-in-one positions, got {}", total);
}
