//! WebSocket play route: one controller per connection, closed with the socket.

use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    response::IntoResponse,
    Extension,
};
use chess_core::GameEngine;
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};

use crate::config::Config;
use crate::error::AppError;
use crate::session::{ClientMessage, ServerMessage, Session};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Extension(config): Extension<Config>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, config))
}

async fn handle_socket(socket: WebSocket, config: Config) {
    let (mut sender, mut receiver) = socket.split();

    let (mut session, greeting) = match Session::open(&config) {
        Ok(opened) => opened,
        Err(e) => {
            let _ = send_all(
                &mut sender,
                &[ServerMessage::Error {
                    message: e.client_message(),
                }],
            )
            .await;
            return;
        }
    };
    tracing::info!("Play session opened");

    if let Err(e) = send_all(&mut sender, &greeting).await {
        tracing::warn!("Failed to greet client: {e}");
        return;
    }

    while let Some(Ok(msg)) = receiver.next().await {
        let text = match msg {
            Message::Text(t) => t.to_string(),
            Message::Close(_) => break,
            _ => continue,
        };

        let replies = match serde_json::from_str::<ClientMessage>(&text) {
            Ok(client_msg) => {
                tracing::debug!(?client_msg, "client message");
                session.handle(client_msg)
            }
            Err(e) => {
                tracing::warn!("Invalid client message: {e}");
                vec![ServerMessage::Error {
                    message: AppError::from(e).client_message(),
                }]
            }
        };

        if let Err(e) = send_all(&mut sender, &replies).await {
            tracing::warn!("Dropping play session: {e}");
            break;
        }
    }

    tracing::info!(
        moves = session.controller().engine().history().len(),
        "Play session closed"
    );
}

// ---- Helper: send messages in order ----

async fn send_all(
    sender: &mut SplitSink<WebSocket, Message>,
    messages: &[ServerMessage],
) -> Result<(), AppError> {
    for msg in messages {
        let json = serde_json::to_string(msg)
            .map_err(|e| AppError::Internal(format!("serialize {msg:?}: {e}")))?;
        sender.send(Message::Text(json.into())).await?;
    }
    Ok(())
}
