//! Chess game state, board widget contract and the interaction controller
//! that ties them together.

pub mod board;
pub mod controller;
pub mod engine;
pub mod error;
pub mod game_data;
pub mod pgn;
pub mod status;

pub use board::{BoardConfig, BoardEvents, BoardPosition, BoardWidget, DragDecision, DropOutcome, Orientation, PieceCode};
pub use controller::Controller;
pub use engine::{DrawReason, Game, GameEngine, MoveRecord};
pub use error::CoreError;
pub use status::StatusDisplay;
