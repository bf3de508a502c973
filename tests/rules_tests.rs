//! Rules-level integration tests: legality, captures, ko, eyes, scoring and
//! the board text format, exercised through both `Board` and `GameState`.

use tengen::board::{Board, Color, GameError, Move};
use tengen::game::GameState;

// =============================================================================
// Helper functions
// =============================================================================

/// Parse a board grid, panicking on bad test input.
fn board(text: &str) -> Board {
    text.parse().unwrap_or_else(|e| panic!("bad grid {text:?}: {e}"))
}

/// Check that `is_legal_move` agrees with what `play` actually does, for
/// every point and both colors, and that every successful placement leaves
/// the placed group with at least one liberty.
fn assert_legality_matches_play(b: &Board) {
    for color in [Color::Black, Color::White] {
        for y in 0..b.size() {
            for x in 0..b.size() {
                let mv = Move::play(x, y);
                let legal = b.is_legal_move(mv, color);
                let mut probe = b.clone();
                match probe.play(mv, color) {
                    Ok(_) => {
                        assert!(
                            legal,
                            "play succeeded at ({x},{y}) for {color} but legality said no"
                        );
                        let group = probe.group_at((x, y)).expect("placed stone has a group");
                        assert!(
                            !group.liberties().is_empty(),
                            "placed group at ({x},{y}) has no liberties"
                        );
                    }
                    Err(GameError::IllegalMove(_)) => {
                        assert!(
                            !legal,
                            "play failed at ({x},{y}) for {color} but legality said yes"
                        );
                    }
                    Err(err) => panic!("unexpected error at ({x},{y}): {err}"),
                }
            }
        }
    }
}

// =============================================================================
// Legality property
// =============================================================================

#[test]
fn test_legality_matches_play_on_small_boards() {
    assert_legality_matches_play(&Board::new(3));
    assert_legality_matches_play(&board("+W+\nWBW\n+++"));
    assert_legality_matches_play(&board("B++\nWB+\n+WB"));
    assert_legality_matches_play(&board("+B+\nB++\n+++"));
    assert_legality_matches_play(&board("WW+\nBB+\n+++"));
}

#[test]
fn test_pass_is_always_legal() {
    let g = GameState::two_player(5);
    assert!(g.is_legal_move(Move::Pass, Color::Black));
    assert!(g.is_legal_move(Move::Pass, Color::White));
    let full_corner = GameState::with_board(board("BW+\n+++\n+++"), [Color::Black, Color::White]);
    assert!(full_corner.is_legal_move(Move::Pass, Color::Black));
}

// =============================================================================
// Captures and scoring
// =============================================================================

#[test]
fn test_single_capture_through_game_state() {
    let mut g = GameState::with_board(board("+W+\nWBW\n+++"), [Color::White, Color::Black]);
    let captured = g.add_move(Move::play(1, 2)).unwrap();
    assert_eq!(captured, vec![(1, 1)]);
    assert_eq!(g.score().get(Color::White), 5);
    assert_eq!(g.score().get(Color::Black), -1);

    // The freed point stays open for White but is suicide for Black; there
    // is no ko here because the capturing stone has liberties to spare.
    assert!(g.is_legal_move(Move::play(1, 1), Color::White));
    assert!(!g.is_legal_move(Move::play(1, 1), Color::Black));
}

#[test]
fn test_multi_capture_sequence_scores() {
    let mut g = GameState::with_board(
        board("+++++\nWW+WW\nBB+BB\nWW+WW\n+++++"),
        [Color::Black, Color::White],
    );
    g.add_move(Move::play(2, 2)).unwrap();
    g.add_move(Move::play(2, 1)).unwrap();
    assert_eq!(g.score().get(Color::White), 5);
    g.add_move(Move::play(2, 3)).unwrap();
    let captured = g.add_move(Move::play(2, 4)).unwrap();
    assert_eq!(captured.len(), 6);
    assert_eq!(g.score().get(Color::White), 15);
    assert_eq!(g.score().get(Color::Black), -6);
}

#[test]
fn test_self_capture_rescued_by_capture_is_legal() {
    let mut g = GameState::with_board(board("B++\nWB+\n+WB"), [Color::Black, Color::White]);
    let mv = Move::play(0, 2);
    assert!(g.is_legal_move(mv, Color::Black));
    let captured = g.add_move(mv).unwrap();
    assert_eq!(captured.len(), 2);
}

// =============================================================================
// Ko
// =============================================================================

#[test]
fn test_single_stone_ko_is_barred_for_one_ply() {
    // Classic ko shape: black diamond around (1,1)/(2,1), white mirror to
    // the right. Black throws in, white retakes, black must wait a ply.
    let mut g = GameState::with_board(
        board("+BW+\nB++W\n+BW+\n++++"),
        [Color::Black, Color::White],
    );
    g.add_move(Move::play(2, 1)).unwrap(); // B throw-in
    let captured = g.add_move(Move::play(1, 1)).unwrap(); // W retakes
    assert_eq!(captured, vec![(2, 1)]);

    // The immediate recapture is the one illegal point on the board.
    assert!(!g.is_legal_move(Move::play(2, 1), Color::Black));
    for mv in g.possible_moves(Color::Black) {
        assert_ne!(mv, Move::play(2, 1));
    }
    assert!(g.is_legal_move(Move::play(3, 3), Color::Black));

    // After a ko threat elsewhere the retake is available again.
    g.add_move(Move::play(3, 3)).unwrap(); // B elsewhere
    g.add_move(Move::play(0, 3)).unwrap(); // W answers
    let captured = g.add_move(Move::play(2, 1)).unwrap();
    assert_eq!(captured, vec![(1, 1)]);
}

// =============================================================================
// Eyes
// =============================================================================

#[test]
fn test_ring_of_one_group_makes_an_eye() {
    let g = GameState::with_board(
        board("+++++\n+BBB+\n+B+B+\n+BBB+\n+++++"),
        [Color::Black, Color::White],
    );
    assert!(g.is_eye(Move::play(2, 2), Color::Black));
    assert!(!g.is_eye(Move::play(2, 2), Color::White));
}

#[test]
fn test_diamond_of_separate_groups_is_not_an_eye() {
    // Four disconnected stones around (2,1): same color, four groups.
    let g = GameState::with_board(
        board("++B++\n+B+B+\n++B++\n+++++\n+++++"),
        [Color::Black, Color::White],
    );
    assert!(!g.is_eye(Move::play(2, 1), Color::Black));
}

#[test]
fn test_corner_eye_on_the_edge() {
    let g = GameState::with_board(board("+B+\nBB+\n+++"), [Color::Black, Color::White]);
    assert!(g.is_eye(Move::play(0, 0), Color::Black));
    assert!(!g.is_eye(Move::play(0, 0), Color::White));
}

// =============================================================================
// Dead-group cleanup
// =============================================================================

#[test]
fn test_cleanup_sweeps_both_colors_independently() {
    // Three one-liberty groups of mixed colors, two healthy neighbors.
    let mut g = GameState::with_board(board("BW+B\n+++W\n+++B\n++++"), [Color::Black, Color::White]);
    g.capture_dead_groups();
    // Dead: B(0,0), B(3,0) and W(3,1) each had a single liberty.
    assert_eq!(g.board().stone_at((0, 0)), None);
    assert_eq!(g.board().stone_at((3, 0)), None);
    assert_eq!(g.board().stone_at((3, 1)), None);
    // Alive: W(1,0) and B(3,2) kept two or more.
    assert!(g.board().stone_at((1, 0)).is_some());
    assert!(g.board().stone_at((3, 2)).is_some());
}

// =============================================================================
// Board text format
// =============================================================================

#[test]
fn test_round_trip_live_position() {
    let text = "+BW+\nB++W\n+BW+\n++++";
    assert_eq!(board(text).to_string(), text);
}

#[test]
fn test_non_square_grid_is_a_format_error() {
    assert!(matches!(
        "+++\n++\n+++".parse::<Board>(),
        Err(GameError::Format(_))
    ));
    assert!(matches!(
        "++++\n++++\n++++".parse::<Board>(),
        Err(GameError::Format(_))
    ));
}

#[test]
fn test_unknown_characters_read_as_empty() {
    let b = board("...\n.B.\n...");
    assert!(b.stone_at((1, 1)).is_some());
    assert_eq!(b.to_string(), "+++\n+B+\n+++");
}
