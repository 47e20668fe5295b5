use chess_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Invalid message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("WebSocket error: {0}")]
    Socket(#[from] axum::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Text for the client-facing `error` message.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Socket(e) => {
                tracing::error!("Socket error: {e}");
                "Connection error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}
