//! One page session: a controller wired to a remote board and display.
//!
//! The remote widget cannot be called directly from Rust, so widget and
//! display calls are queued as [`ServerMessage`]s and flushed after each
//! handler returns, in the order the controller made them.

use chess_core::game_data::GameMetadata;
use chess_core::{
    BoardConfig, BoardEvents, BoardWidget, Controller, DragDecision, DropOutcome, Game,
    Orientation, StatusDisplay,
};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::AppError;

/// Server → Client messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Construct the widget; always the first message of a session.
    Init { config: BoardConfig },
    DragStart { allow: bool },
    Drop { result: DropOutcome },
    SetPosition { fen: String },
    Start,
    Status { text: String },
    Moves { html: String },
    Pgn { pgn: String },
    Error { message: String },
}

/// Client → Server messages
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    DragStart {
        source: String,
        piece: String,
        #[serde(default)]
        position: String,
        #[serde(default)]
        orientation: Orientation,
    },
    Drop {
        source: String,
        target: String,
    },
    SnapEnd,
    Reset,
    Undo,
    ExportPgn,
    LoadPgn {
        pgn: String,
    },
}

#[derive(Debug, Default)]
pub struct RemoteBoard {
    outbox: Vec<ServerMessage>,
}

impl BoardWidget for RemoteBoard {
    fn set_position(&mut self, fen: &str) {
        self.outbox.push(ServerMessage::SetPosition {
            fen: fen.to_string(),
        });
    }

    fn start(&mut self) {
        self.outbox.push(ServerMessage::Start);
    }
}

#[derive(Debug, Default)]
pub struct RemoteDisplay {
    outbox: Vec<ServerMessage>,
}

impl StatusDisplay for RemoteDisplay {
    fn set_status(&mut self, text: &str) {
        self.outbox.push(ServerMessage::Status {
            text: text.to_string(),
        });
    }

    fn set_move_list(&mut self, html: &str) {
        self.outbox.push(ServerMessage::Moves {
            html: html.to_string(),
        });
    }
}

pub struct Session {
    controller: Controller<Game, RemoteBoard, RemoteDisplay>,
    metadata: GameMetadata,
}

impl Session {
    /// Start a session. Returns it together with the greeting: the widget
    /// config followed by the initial status.
    pub fn open(config: &Config) -> Result<(Self, Vec<ServerMessage>), AppError> {
        let game = config.new_game()?;
        let controller = Controller::new(game, RemoteBoard::default(), RemoteDisplay::default());
        let mut session = Self {
            controller,
            metadata: config.pgn_metadata(),
        };

        let mut greeting = vec![ServerMessage::Init {
            config: config.board_config(),
        }];
        greeting.extend(session.flush());
        Ok((session, greeting))
    }

    pub fn controller(&self) -> &Controller<Game, RemoteBoard, RemoteDisplay> {
        &self.controller
    }

    /// Dispatch one client message. The direct reply, if any, comes first.
    pub fn handle(&mut self, msg: ClientMessage) -> Vec<ServerMessage> {
        let reply = match msg {
            ClientMessage::DragStart { .. } | ClientMessage::Drop { .. } | ClientMessage::SnapEnd => {
                gesture(&mut self.controller, msg)
            }
            ClientMessage::Reset => {
                self.controller.reset();
                None
            }
            ClientMessage::Undo => {
                if !self.controller.undo() {
                    tracing::debug!("undo with empty history");
                }
                None
            }
            ClientMessage::ExportPgn => Some(ServerMessage::Pgn {
                pgn: self.controller.pgn(&self.metadata),
            }),
            ClientMessage::LoadPgn { pgn } => match self.controller.load_pgn(&pgn) {
                Ok(()) => None,
                Err(e) => {
                    tracing::warn!("rejected PGN: {e}");
                    Some(ServerMessage::Error {
                        message: AppError::from(e).client_message(),
                    })
                }
            },
        };

        let mut out: Vec<ServerMessage> = reply.into_iter().collect();
        out.extend(self.flush());
        out
    }

    /// Board calls first, then display calls.
    fn flush(&mut self) -> Vec<ServerMessage> {
        let mut out = std::mem::take(&mut self.controller.board_mut().outbox);
        out.append(&mut self.controller.display_mut().outbox);
        out
    }
}

/// Forward a widget gesture to its board-event handler. Other messages are
/// not gestures and get no reply here.
fn gesture(events: &mut impl BoardEvents, msg: ClientMessage) -> Option<ServerMessage> {
    match msg {
        ClientMessage::DragStart {
            source,
            piece,
            position,
            orientation,
        } => {
            let decision = events.on_drag_start(&source, &piece, &position, orientation);
            Some(ServerMessage::DragStart {
                allow: decision == DragDecision::Allow,
            })
        }
        ClientMessage::Drop { source, target } => Some(ServerMessage::Drop {
            result: events.on_drop(&source, &target),
        }),
        ClientMessage::SnapEnd => {
            events.on_snap_end();
            None
        }
        _ => None,
    }
}
