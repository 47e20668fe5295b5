//! Game engine handle: authoritative rules, history and terminal-state detection.
//!
//! The controller only talks to the [`GameEngine`] trait. [`Game`] is the
//! shakmaty-backed implementation used by the server.

use shakmaty::fen::Fen;
use shakmaty::san::{San, SanPlus};
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Position, Rank, Role, Square};

use crate::error::CoreError;

/// Why a game ended without a winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    ThreefoldRepetition,
}

/// A move the engine accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub san: String,
    pub promotion: Option<Role>,
}

/// Rules/state collaborator driven by the controller.
pub trait GameEngine {
    fn turn(&self) -> Color;

    /// Colour of the piece on `square`, if any.
    fn color_at(&self, square: Square) -> Option<Color>;

    fn is_checkmate(&self) -> bool;
    fn is_check(&self) -> bool;
    fn draw_reason(&self) -> Option<DrawReason>;

    /// SAN of every accepted move, oldest first.
    fn history(&self) -> &[String];

    /// Canonical position string.
    fn fen(&self) -> String;

    /// Apply `from`-`to`. `promotion` is only read when a pawn reaches the
    /// last rank. Returns `None` (state untouched) for an illegal move.
    fn apply_move(&mut self, from: Square, to: Square, promotion: Option<Role>)
        -> Option<MoveRecord>;

    /// Take back the last move, if any.
    fn undo(&mut self) -> Option<MoveRecord>;

    /// Back to the initial position with an empty history.
    fn reset(&mut self);

    fn is_draw(&self) -> bool {
        self.draw_reason().is_some()
    }

    fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_draw()
    }
}

#[derive(Debug, Clone)]
struct Ply {
    before: Chess,
    record: MoveRecord,
}

/// shakmaty-backed game: a start position plus the linear sequence of accepted moves.
#[derive(Debug, Clone)]
pub struct Game {
    initial: Chess,
    pos: Chess,
    plies: Vec<Ply>,
    history: Vec<String>,
    /// Repetition key of the initial position and of the position after each ply.
    keys: Vec<String>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Standard starting position.
    pub fn new() -> Self {
        Self::from_position(Chess::default())
    }

    /// Start from a custom position.
    pub fn from_fen(fen: &str) -> Result<Self, CoreError> {
        let parsed = Fen::from_ascii(fen.trim().as_bytes())
            .map_err(|e| CoreError::InvalidFen(format!("{fen}: {e}")))?;
        let pos = parsed
            .into_position::<Chess>(CastlingMode::Standard)
            .map_err(|e| CoreError::InvalidFen(format!("{fen}: {e}")))?;
        Ok(Self::from_position(pos))
    }

    /// Replay SAN moves (check/mate suffixes allowed) from the standard start.
    pub fn from_san_moves(moves: &[String]) -> Result<Self, CoreError> {
        Self::new().with_moves(moves)
    }

    /// Replay SAN moves on top of this game.
    pub fn with_moves(self, moves: &[String]) -> Result<Self, CoreError> {
        let mut game = self;
        let offset = game.history.len();
        for (ply, san_str) in moves.iter().enumerate() {
            let illegal = || CoreError::IllegalSan {
                san: san_str.clone(),
                ply: offset + ply + 1,
            };
            let san: SanPlus = san_str.trim().parse().map_err(|_| illegal())?;
            let mv = san.san.to_move(&game.pos).map_err(|_| illegal())?;
            let from = mv.from().ok_or_else(illegal)?;
            let to = match mv.to_uci(CastlingMode::Standard) {
                UciMove::Normal { to, .. } => to,
                _ => return Err(illegal()),
            };
            game.apply_move(from, to, mv.promotion()).ok_or_else(illegal)?;
        }
        Ok(game)
    }

    fn from_position(pos: Chess) -> Self {
        let key = repetition_key(&pos);
        Self {
            initial: pos.clone(),
            pos,
            plies: Vec::new(),
            history: Vec::new(),
            keys: vec![key],
        }
    }

    /// FEN of the position the game started from.
    pub fn initial_fen(&self) -> String {
        fen_of(&self.initial)
    }

    fn needs_promotion(&self, from: Square, to: Square) -> bool {
        let Some(piece) = self.pos.board().piece_at(from) else {
            return false;
        };
        let last_rank = match piece.color {
            Color::White => Rank::Eighth,
            Color::Black => Rank::First,
        };
        piece.role == Role::Pawn && to.rank() == last_rank
    }

    fn is_threefold(&self) -> bool {
        let Some(current) = self.keys.last() else {
            return false;
        };
        self.keys.iter().filter(|k| *k == current).count() >= 3
    }
}

impl GameEngine for Game {
    fn turn(&self) -> Color {
        self.pos.turn()
    }

    fn color_at(&self, square: Square) -> Option<Color> {
        self.pos.board().color_at(square)
    }

    fn is_checkmate(&self) -> bool {
        self.pos.is_checkmate()
    }

    fn is_check(&self) -> bool {
        self.pos.is_check()
    }

    fn draw_reason(&self) -> Option<DrawReason> {
        if self.pos.is_checkmate() {
            return None;
        }
        if self.pos.is_stalemate() {
            Some(DrawReason::Stalemate)
        } else if self.pos.is_insufficient_material() {
            Some(DrawReason::InsufficientMaterial)
        } else if self.pos.halfmoves() >= 100 {
            Some(DrawReason::FiftyMoveRule)
        } else if self.is_threefold() {
            Some(DrawReason::ThreefoldRepetition)
        } else {
            None
        }
    }

    fn history(&self) -> &[String] {
        &self.history
    }

    fn fen(&self) -> String {
        fen_of(&self.pos)
    }

    fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Option<MoveRecord> {
        let promotion = if self.needs_promotion(from, to) {
            Some(promotion?)
        } else {
            None
        };

        let uci = UciMove::Normal { from, to, promotion };
        let mv = uci.to_move(&self.pos).ok()?;

        let before = self.pos.clone();
        let san = San::from_move(&self.pos, mv).to_string();
        self.pos.play_unchecked(mv);

        let suffix = if self.pos.is_checkmate() {
            "#"
        } else if self.pos.is_check() {
            "+"
        } else {
            ""
        };
        let san = format!("{san}{suffix}");

        let record = MoveRecord {
            from,
            to,
            san: san.clone(),
            promotion,
        };
        tracing::debug!(%from, %to, san = %san, "move applied");

        self.history.push(san);
        self.keys.push(repetition_key(&self.pos));
        self.plies.push(Ply {
            before,
            record: record.clone(),
        });
        Some(record)
    }

    fn undo(&mut self) -> Option<MoveRecord> {
        let ply = self.plies.pop()?;
        self.pos = ply.before;
        self.history.pop();
        self.keys.pop();
        Some(ply.record)
    }

    fn reset(&mut self) {
        *self = Self::from_position(self.initial.clone());
    }
}

fn fen_of(pos: &Chess) -> String {
    Fen::from_position(pos, EnPassantMode::Legal).to_string()
}

/// Placement, side to move, castling and en passant: the FEN minus both clocks.
fn repetition_key(pos: &Chess) -> String {
    fen_of(pos).split(' ').take(4).collect::<Vec<_>>().join(" ")
}
