/// Tests for the interaction controller: pick-up rules, drop handling,
/// board re-sync, status text and reset.
///
/// The controller is driven exactly as the widget would drive it, with
/// recording fakes standing in for the board and the status regions.

mod common;

use chess_core::{BoardEvents, DragDecision, DropOutcome, Game, GameEngine, Orientation};
use common::{controller, controller_from, play, BoardCall, START_FEN};

const SCHOLARS_MATE: [(&str, &str); 7] = [
    ("e2", "e4"),
    ("e7", "e5"),
    ("f1", "c4"),
    ("b8", "c6"),
    ("d1", "h5"),
    ("g8", "f6"),
    ("h5", "f7"),
];

const PIECES: [&str; 12] = [
    "wP", "wN", "wB", "wR", "wQ", "wK", "bP", "bN", "bB", "bR", "bQ", "bK",
];

#[test]
fn test_fresh_game_is_white_to_move() {
    let c = controller();
    assert_eq!(c.display().status, "White to move");
    assert_eq!(c.display().moves, "");
}

#[test]
fn test_black_in_check() {
    let mut c = controller();
    play(&mut c, &[("e2", "e4"), ("d7", "d5"), ("f1", "b5")]);
    assert_eq!(c.display().status, "Black to move, Black is in check");
    assert_eq!(c.display().moves, "<li>e4</li><li>d5</li><li>Bb5+</li>");
}

#[test]
fn test_white_wins_by_checkmate() {
    let mut c = controller();
    play(&mut c, &SCHOLARS_MATE);
    assert_eq!(c.display().status, "Game over, White wins by checkmate!");
    assert_eq!(c.engine().history().last().map(String::as_str), Some("Qxf7#"));
}

#[test]
fn test_black_wins_by_checkmate() {
    let mut c = controller();
    play(&mut c, &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")]);
    assert_eq!(c.display().status, "Game over, Black wins by checkmate!");
}

#[test]
fn test_stalemate_is_drawn() {
    let game = Game::from_fen("k7/8/1Q6/8/8/8/8/7K w - - 0 1").unwrap();
    let mut c = controller_from(game);
    play(&mut c, &[("b6", "c7")]);
    assert_eq!(c.display().status, "Game over, drawn position");
}

#[test]
fn test_insufficient_material_is_drawn() {
    // White is in check from the pawn; taking it leaves bare kings.
    let game = Game::from_fen("8/8/8/4k3/8/8/3p4/4K3 w - - 0 1").unwrap();
    let mut c = controller_from(game);
    assert_eq!(c.display().status, "White to move, White is in check");
    play(&mut c, &[("e1", "d2")]);
    assert_eq!(c.display().status, "Game over, drawn position");
}

#[test]
fn test_illegal_pawn_drop_snaps_back() {
    let mut c = controller();
    let writes = c.display().status_writes;

    assert_eq!(c.on_drop("e2", "e5"), DropOutcome::Snapback);
    assert_eq!(c.on_drop("e2", "d3"), DropOutcome::Snapback);

    assert!(c.engine().history().is_empty());
    assert_eq!(c.engine().fen(), START_FEN);
    assert_eq!(c.display().status_writes, writes);
    assert!(c.board().calls.is_empty());
}

#[test]
fn test_accepted_drop_updates_status_once() {
    let mut c = controller();
    for (source, target) in [("e2", "e4"), ("c7", "c5"), ("g1", "f3")] {
        let len = c.engine().history().len();
        let writes = c.display().status_writes;
        assert_eq!(c.on_drop(source, target), DropOutcome::Accepted);
        assert_eq!(c.engine().history().len(), len + 1);
        assert_eq!(c.display().status_writes, writes + 1);
    }
}

#[test]
fn test_game_over_denies_every_pickup() {
    let mut c = controller();
    play(&mut c, &SCHOLARS_MATE);
    for piece in PIECES {
        for square in ["a1", "e8", "h8", "d4"] {
            assert_eq!(
                c.on_drag_start(square, piece, "start", Orientation::White),
                DragDecision::Deny,
                "{piece} on {square}"
            );
        }
    }
}

#[test]
fn test_wrong_colour_denied() {
    let mut c = controller();
    for piece in ["bP", "bN", "bB", "bR", "bQ", "bK"] {
        assert_eq!(c.on_drag_start("e7", piece, "start", Orientation::White), DragDecision::Deny);
    }
    assert_eq!(c.on_drag_start("g1", "wN", "start", Orientation::Black), DragDecision::Allow);

    play(&mut c, &[("e2", "e4")]);
    for piece in ["wP", "wN", "wB", "wR", "wQ", "wK"] {
        assert_eq!(c.on_drag_start("e4", piece, "start", Orientation::White), DragDecision::Deny);
    }
    assert_eq!(c.on_drag_start("e7", "bP", "start", Orientation::White), DragDecision::Allow);
}

#[test]
fn test_snap_end_resyncs_special_moves() {
    // En passant removes a pawn the user never touched.
    let mut c = controller();
    play(&mut c, &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")]);
    assert_eq!(c.on_drop("e5", "d6"), DropOutcome::Accepted);
    c.on_snap_end();
    let fen = c.engine().fen();
    assert!(fen.starts_with("rnbqkbnr/1pp1pppp/p2P4/8/8/8/PPPP1PPP/RNBQKBNR b"));
    assert_eq!(c.board().calls.last(), Some(&BoardCall::SetPosition(fen)));
}

#[test]
fn test_update_status_is_idempotent() {
    let mut c = controller();
    play(&mut c, &[("d2", "d4"), ("g8", "f6")]);
    c.update_status();
    let first = (c.display().status.clone(), c.display().moves.clone());
    c.update_status();
    let second = (c.display().status.clone(), c.display().moves.clone());
    assert_eq!(first, second);
}

#[test]
fn test_reset_after_moves() {
    let mut c = controller();
    play(&mut c, &[("e2", "e4"), ("e7", "e5"), ("g1", "f3")]);
    c.reset();

    assert!(c.engine().history().is_empty());
    assert_eq!(c.engine().fen(), START_FEN);
    assert_eq!(c.display().status, "White to move");
    assert_eq!(c.display().moves, "");
    assert_eq!(c.board().calls.last(), Some(&BoardCall::Start));
}

#[test]
fn test_undo_restores_previous_status() {
    let mut c = controller();
    play(&mut c, &[("e2", "e4"), ("d7", "d5"), ("f1", "b5")]);
    assert!(c.undo());
    assert_eq!(c.display().status, "White to move");
    assert_eq!(c.display().moves, "<li>e4</li><li>d5</li>");
}

#[test]
fn test_pgn_roundtrip_through_controller() {
    let mut c = controller();
    play(&mut c, &SCHOLARS_MATE);
    let text = c.pgn(&Default::default());
    assert!(text.trim_end().ends_with("4. Qxf7# 1-0"));

    let mut other = controller();
    other.load_pgn(&text).unwrap();
    assert_eq!(other.engine().history(), c.engine().history());
    assert_eq!(other.display().status, "Game over, White wins by checkmate!");
    assert_eq!(
        other.board().calls.last(),
        Some(&BoardCall::SetPosition(c.engine().fen()))
    );
}

#[test]
fn test_drops_refused_once_drawn_or_out_of_turn() {
    let mut c = controller();
    // Black's pawn, White to move.
    assert_eq!(c.on_drop("e7", "e5"), DropOutcome::Snapback);
    // Empty source square.
    assert_eq!(c.on_drop("e4", "e5"), DropOutcome::Snapback);
    assert!(c.engine().history().is_empty());

    let game = Game::from_fen("8/8/8/4k3/8/8/3p4/4K3 w - - 0 1").unwrap();
    let mut c = controller_from(game);
    play(&mut c, &[("e1", "d2")]);
    let writes = c.display().status_writes;
    assert_eq!(c.on_drop("e5", "e4"), DropOutcome::Snapback);
    assert_eq!(c.engine().history(), ["Kxd2"]);
    assert_eq!(c.display().status_writes, writes);
}

#[test]
fn test_pgn_from_custom_start_loads_and_resets() {
    let start = "4k3/8/8/8/8/8/4P3/4K3 b - - 0 12";
    let mut c = controller_from(Game::from_fen(start).unwrap());
    play(&mut c, &[("e8", "d7"), ("e2", "e4")]);
    let text = c.pgn(&Default::default());
    assert!(text.contains(&format!("[FEN \"{start}\"]")));

    let mut other = controller();
    other.load_pgn(&text).unwrap();
    assert_eq!(other.engine().history(), c.engine().history());
    assert_eq!(other.engine().fen(), c.engine().fen());

    other.reset();
    assert!(other.engine().history().is_empty());
    assert_eq!(other.engine().fen(), start);
    assert_eq!(
        other.board().calls.last(),
        Some(&BoardCall::SetPosition(start.to_string()))
    );
}
