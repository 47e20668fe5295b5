#![allow(dead_code)]

use std::net::SocketAddr;

use chess_core::{BoardEvents, BoardWidget, Controller, DropOutcome, Game, StatusDisplay};
use reqwest::Client;
use server::config::Config;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Board widget fake that records every call.
#[derive(Debug, Default)]
pub struct RecordingBoard {
    pub calls: Vec<BoardCall>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardCall {
    SetPosition(String),
    Start,
}

impl BoardWidget for RecordingBoard {
    fn set_position(&mut self, fen: &str) {
        self.calls.push(BoardCall::SetPosition(fen.to_string()));
    }

    fn start(&mut self) {
        self.calls.push(BoardCall::Start);
    }
}

/// Display fake holding the current region contents and a write counter.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub status: String,
    pub moves: String,
    pub status_writes: usize,
}

impl StatusDisplay for RecordingDisplay {
    fn set_status(&mut self, text: &str) {
        self.status = text.to_string();
        self.status_writes += 1;
    }

    fn set_move_list(&mut self, html: &str) {
        self.moves = html.to_string();
    }
}

pub type TestController = Controller<Game, RecordingBoard, RecordingDisplay>;

pub fn controller() -> TestController {
    controller_from(Game::new())
}

pub fn controller_from(game: Game) -> TestController {
    Controller::new(game, RecordingBoard::default(), RecordingDisplay::default())
}

/// Drop each `(source, target)` pair, asserting every move is accepted.
pub fn play(controller: &mut TestController, moves: &[(&str, &str)]) {
    for (source, target) in moves {
        assert_eq!(
            controller.on_drop(source, target),
            DropOutcome::Accepted,
            "{source}-{target} should be legal"
        );
        controller.on_snap_end();
    }
}

/// Serve the full router on an ephemeral local port.
pub async fn spawn_server(config: Config) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = server::routes::router(config);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Build a reqwest client for tests.
pub fn client() -> Client {
    Client::new()
}
