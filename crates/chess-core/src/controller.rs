//! Interaction controller: mediates between the board widget and the game engine.
//!
//! One controller owns one engine, one widget and one display for the whole
//! session. Every handler runs to completion on `&mut self`, so a handler can
//! never be re-entered while another is in progress.

use shakmaty::{Role, Square};

use crate::board::{BoardEvents, BoardWidget, DragDecision, DropOutcome, Orientation, PieceCode};
use crate::engine::{Game, GameEngine};
use crate::error::CoreError;
use crate::game_data::GameMetadata;
use crate::pgn;
use crate::status::{self, StatusDisplay};

pub struct Controller<E, B, D> {
    engine: E,
    board: B,
    display: D,
}

impl<E: GameEngine, B: BoardWidget, D: StatusDisplay> Controller<E, B, D> {
    /// Take ownership of the collaborators and paint the initial status.
    pub fn new(engine: E, board: B, display: D) -> Self {
        let mut controller = Self {
            engine,
            board,
            display,
        };
        controller.update_status();
        controller
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Rewrite the status line and the move list from the engine.
    pub fn update_status(&mut self) {
        let text = status::status_line(&self.engine);
        let moves = status::move_list_html(self.engine.history());
        self.display.set_status(&text);
        self.display.set_move_list(&moves);
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        self.board.start();
        let fen = self.engine.fen();
        if fen != pgn::STANDARD_START_FEN {
            self.board.set_position(&fen);
        }
        self.update_status();
        tracing::info!("game reset");
    }

    /// Take back the last move. Returns `false` when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.engine.undo() {
            Some(record) => {
                tracing::debug!(from = %record.from, to = %record.to, san = %record.san, "move taken back");
                let fen = self.engine.fen();
                self.board.set_position(&fen);
                self.update_status();
                true
            }
            None => false,
        }
    }
}

impl<B: BoardWidget, D: StatusDisplay> Controller<Game, B, D> {
    /// The game so far as PGN text.
    pub fn pgn(&self, metadata: &GameMetadata) -> String {
        let metadata = GameMetadata {
            result: pgn::result_token(&self.engine).to_string(),
            ..metadata.clone()
        };
        let start = self.engine.initial_fen();
        pgn::write_pgn(&metadata, Some(&start), self.engine.history())
    }

    /// Replace the game with the one in `text`, starting from its `FEN` tag
    /// or the standard position. On error nothing changes.
    pub fn load_pgn(&mut self, text: &str) -> Result<(), CoreError> {
        let data = pgn::parse_pgn(text)
            .ok_or_else(|| CoreError::InvalidPgn("no game found".to_string()))?;
        let start = match &data.fen {
            Some(fen) => Game::from_fen(fen)?,
            None => Game::new(),
        };
        let game = start.with_moves(&data.moves)?;

        self.engine = game;
        let fen = self.engine.fen();
        self.board.set_position(&fen);
        self.update_status();
        tracing::info!(moves = data.moves.len(), "game loaded from PGN");
        Ok(())
    }
}

impl<E: GameEngine, B: BoardWidget, D: StatusDisplay> BoardEvents for Controller<E, B, D> {
    /// Whether the piece may be picked up. Reads the engine only.
    fn on_drag_start(
        &mut self,
        source: &str,
        piece: &str,
        _position: &str,
        _orientation: Orientation,
    ) -> DragDecision {
        if self.engine.is_game_over() {
            tracing::debug!(source, piece, "pick-up denied: game over");
            return DragDecision::Deny;
        }

        match piece.parse::<PieceCode>() {
            Ok(code) if code.color == self.engine.turn() => DragDecision::Allow,
            Ok(_) => {
                tracing::debug!(source, piece, "pick-up denied: not this side's turn");
                DragDecision::Deny
            }
            Err(e) => {
                tracing::warn!(source, "pick-up denied: {e}");
                DragDecision::Deny
            }
        }
    }

    /// Try the move, always promoting to a queen. A drop the pick-up rules
    /// would have refused snaps back even if the engine could play it.
    fn on_drop(&mut self, source: &str, target: &str) -> DropOutcome {
        let (Ok(from), Ok(to)) = (source.parse::<Square>(), target.parse::<Square>()) else {
            tracing::debug!(source, target, "drop off the board");
            return DropOutcome::Snapback;
        };

        if self.engine.is_game_over() {
            tracing::debug!(source, target, "drop refused: game over");
            return DropOutcome::Snapback;
        }
        if self.engine.color_at(from) != Some(self.engine.turn()) {
            tracing::debug!(source, target, "drop refused: not this side's piece");
            return DropOutcome::Snapback;
        }

        match self.engine.apply_move(from, to, Some(Role::Queen)) {
            Some(record) => {
                tracing::debug!(source, target, san = %record.san, "move accepted");
                self.update_status();
                DropOutcome::Accepted
            }
            None => {
                tracing::debug!(source, target, "illegal move, snapping back");
                DropOutcome::Snapback
            }
        }
    }

    /// Re-sync the widget with the canonical position once its animation is done.
    fn on_snap_end(&mut self) {
        let fen = self.engine.fen();
        self.board.set_position(&fen);
    }
}
