#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid FEN: {0}")]
    InvalidFen(String),

    #[error("Invalid square: {0}")]
    InvalidSquare(String),

    #[error("Invalid piece code: {0}")]
    InvalidPiece(String),

    #[error("Illegal move {san} at ply {ply}")]
    IllegalSan { san: String, ply: usize },

    #[error("Invalid PGN: {0}")]
    InvalidPgn(String),
}
