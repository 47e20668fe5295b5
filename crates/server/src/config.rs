use std::env;

use chess_core::{BoardConfig, BoardPosition, Game, Orientation};
use chess_core::game_data::GameMetadata;

use crate::error::AppError;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Custom starting position; `None` plays from the standard layout.
    pub start_fen: Option<String>,
    pub orientation: Orientation,
    pub white_name: String,
    pub black_name: String,
    pub event: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            start_fen: None,
            orientation: Orientation::White,
            white_name: "White".to_string(),
            black_name: "Black".to_string(),
            event: "Casual Game".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let start_fen = env::var("START_FEN")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        if let Some(fen) = &start_fen {
            Game::from_fen(fen)?;
        }

        let orientation = match env::var("BOARD_ORIENTATION") {
            Ok(v) => v.parse().map_err(AppError::BadRequest)?,
            Err(_) => defaults.orientation,
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            start_fen,
            orientation,
            white_name: env::var("WHITE_NAME").unwrap_or(defaults.white_name),
            black_name: env::var("BLACK_NAME").unwrap_or(defaults.black_name),
            event: env::var("PGN_EVENT").unwrap_or(defaults.event),
        })
    }

    /// Fresh game for a new session.
    pub fn new_game(&self) -> Result<Game, AppError> {
        match &self.start_fen {
            Some(fen) => Ok(Game::from_fen(fen)?),
            None => Ok(Game::new()),
        }
    }

    /// Construction config sent to the widget.
    pub fn board_config(&self) -> BoardConfig {
        BoardConfig {
            draggable: true,
            position: self
                .start_fen
                .clone()
                .map_or(BoardPosition::Start, BoardPosition::Fen),
            orientation: self.orientation,
        }
    }

    /// PGN tags for a game played today.
    pub fn pgn_metadata(&self) -> GameMetadata {
        GameMetadata {
            event: self.event.clone(),
            date: chrono::Local::now().format("%Y.%m.%d").to_string(),
            white: self.white_name.clone(),
            black: self.black_name.clone(),
            ..GameMetadata::default()
        }
    }
}
