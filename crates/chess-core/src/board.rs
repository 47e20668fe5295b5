//! Board widget contract: construction config, piece codes, and the two
//! directions of traffic (controller → widget, widget → controller).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use shakmaty::{Color, Role};

use crate::error::CoreError;

/// Which side is drawn at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    White,
    Black,
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(Orientation::White),
            "black" | "b" => Ok(Orientation::Black),
            other => Err(format!("unknown orientation '{other}'")),
        }
    }
}

/// Initial layout: the widget's own start layout or an explicit position string.
///
/// Serialized as the bare string the widget takes: `"start"` or the FEN.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BoardPosition {
    #[default]
    Start,
    Fen(String),
}

impl Serialize for BoardPosition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BoardPosition::Start => serializer.serialize_str("start"),
            BoardPosition::Fen(fen) => serializer.serialize_str(fen),
        }
    }
}

impl<'de> Deserialize<'de> for BoardPosition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(if value == "start" {
            BoardPosition::Start
        } else {
            BoardPosition::Fen(value)
        })
    }
}

/// Configuration the widget is constructed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub draggable: bool,
    pub position: BoardPosition,
    pub orientation: Orientation,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            draggable: true,
            position: BoardPosition::Start,
            orientation: Orientation::White,
        }
    }
}

/// Widget piece identifier: colour letter + role letter, e.g. `wP`, `bK`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceCode {
    pub color: Color,
    pub role: Role,
}

impl FromStr for PieceCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(CoreError::InvalidPiece(s.to_string()));
        }
        let color = match bytes[0] {
            b'w' => Color::White,
            b'b' => Color::Black,
            _ => return Err(CoreError::InvalidPiece(s.to_string())),
        };
        let role = match bytes[1] {
            b'P' => Role::Pawn,
            b'N' => Role::Knight,
            b'B' => Role::Bishop,
            b'R' => Role::Rook,
            b'Q' => Role::Queen,
            b'K' => Role::King,
            _ => return Err(CoreError::InvalidPiece(s.to_string())),
        };
        Ok(Self { color, role })
    }
}

impl fmt::Display for PieceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color = match self.color {
            Color::White => 'w',
            Color::Black => 'b',
        };
        write!(f, "{}{}", color, self.role.upper_char())
    }
}

/// Pick-up verdict for a drag start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragDecision {
    Allow,
    Deny,
}

/// Drop verdict; `Snapback` sends the piece back to its origin square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropOutcome {
    Accepted,
    Snapback,
}

/// Commands the controller sends to the rendered board.
pub trait BoardWidget {
    /// Show the given position string.
    fn set_position(&mut self, fen: &str);

    /// Back to the standard starting layout.
    fn start(&mut self);
}

/// Gestures the board delivers to whoever was registered at construction.
pub trait BoardEvents {
    fn on_drag_start(
        &mut self,
        source: &str,
        piece: &str,
        position: &str,
        orientation: Orientation,
    ) -> DragDecision;

    fn on_drop(&mut self, source: &str, target: &str) -> DropOutcome;

    fn on_snap_end(&mut self);
}
