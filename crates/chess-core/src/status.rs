//! Status line and move list shown next to the board.

use shakmaty::Color;

use crate::engine::GameEngine;

/// The two text regions written after every state change.
pub trait StatusDisplay {
    /// Replace the status line.
    fn set_status(&mut self, text: &str);

    /// Replace the move list with the given `<li>` items.
    fn set_move_list(&mut self, html: &str);
}

pub fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

/// Human-readable game status. Checkmate beats draw beats "to move".
pub fn status_line<E: GameEngine + ?Sized>(engine: &E) -> String {
    let to_move = color_name(engine.turn());

    if engine.is_checkmate() {
        // The side to move is the one that got mated.
        let winner = color_name(engine.turn().other());
        format!("Game over, {winner} wins by checkmate!")
    } else if engine.is_draw() {
        "Game over, drawn position".to_string()
    } else if engine.is_check() {
        format!("{to_move} to move, {to_move} is in check")
    } else {
        format!("{to_move} to move")
    }
}

/// One `<li>` per move, oldest first.
pub fn move_list_html(history: &[String]) -> String {
    history
        .iter()
        .map(|san| format!("<li>{san}</li>"))
        .collect()
}
