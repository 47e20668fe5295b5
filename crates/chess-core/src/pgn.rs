//! PGN export of the running game and a lightweight regex-based reader.

use regex::Regex;
use shakmaty::Color;

use crate::engine::GameEngine;
use crate::game_data::{GameData, GameMetadata};

pub const STANDARD_START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Result token for the current game state.
pub fn result_token<E: GameEngine + ?Sized>(engine: &E) -> &'static str {
    if engine.is_checkmate() {
        match engine.turn() {
            Color::White => "0-1",
            Color::Black => "1-0",
        }
    } else if engine.is_draw() {
        "1/2-1/2"
    } else {
        "*"
    }
}

/// Render a PGN game. `start_fen` adds the SetUp/FEN tags and numbers the
/// moves from that position; pass `None` for the standard start.
pub fn write_pgn(metadata: &GameMetadata, start_fen: Option<&str>, moves: &[String]) -> String {
    let mut out = String::new();
    let tags = [
        ("Event", metadata.event.as_str()),
        ("Site", metadata.site.as_str()),
        ("Date", metadata.date.as_str()),
        ("Round", "-"),
        ("White", metadata.white.as_str()),
        ("Black", metadata.black.as_str()),
        ("Result", metadata.result.as_str()),
    ];
    for (key, value) in tags {
        out.push_str(&format!("[{key} \"{}\"]\n", escape_tag(value)));
    }

    let start_fen = start_fen.filter(|f| *f != STANDARD_START_FEN);
    let (mut number, mut white_to_move) = (1u32, true);
    if let Some(fen) = start_fen {
        out.push_str("[SetUp \"1\"]\n");
        out.push_str(&format!("[FEN \"{fen}\"]\n"));
        let fields: Vec<&str> = fen.split_whitespace().collect();
        white_to_move = fields.get(1).copied() != Some("b");
        number = fields.get(5).and_then(|n| n.parse().ok()).unwrap_or(1);
    }
    out.push('\n');

    let mut tokens: Vec<String> = Vec::with_capacity(moves.len() * 2 + 1);
    for (i, san) in moves.iter().enumerate() {
        if white_to_move {
            tokens.push(format!("{number}."));
        } else if i == 0 {
            tokens.push(format!("{number}..."));
        }
        tokens.push(san.clone());
        if !white_to_move {
            number += 1;
        }
        white_to_move = !white_to_move;
    }
    tokens.push(metadata.result.clone());
    out.push_str(&tokens.join(" "));
    out.push('\n');
    out
}

fn escape_tag(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Parse a PGN string into a GameData struct.
/// Returns `None` for text with neither tags nor moves.
pub fn parse_pgn(pgn: &str) -> Option<GameData> {
    let header_re = Regex::new(r#"\[(\w+)\s+"([^"]*)"\]"#).ok()?;

    let mut metadata = GameMetadata::default();
    let mut setup = None;
    let mut fen = None;
    let mut saw_tag = false;

    for cap in header_re.captures_iter(pgn) {
        saw_tag = true;
        let key = &cap[1];
        let value = cap[2].to_string();
        match key {
            "Event" => metadata.event = value,
            "Site" => metadata.site = value,
            "Date" => metadata.date = value,
            "White" => metadata.white = value,
            "Black" => metadata.black = value,
            "Result" => metadata.result = value,
            "SetUp" => setup = Some(value),
            "FEN" => fen = Some(value),
            _ => {}
        }
    }

    // FEN only counts together with SetUp "1"; the standard start is implied.
    let fen = fen.filter(|f| setup.as_deref() == Some("1") && f != STANDARD_START_FEN);

    let moves = extract_moves(pgn);
    if moves.is_empty() && !saw_tag {
        return None;
    }

    Some(GameData { metadata, fen, moves })
}

/// Extract SAN moves from PGN text (after removing headers, comments, variations).
pub fn extract_moves(pgn: &str) -> Vec<String> {
    let header_re = Regex::new(r"\[[^\]]*\]").expect("valid header regex");
    let no_headers = header_re.replace_all(pgn, "");

    let comment_re = Regex::new(r"\{[^}]*\}").expect("valid comment regex");
    let no_comments = comment_re.replace_all(&no_headers, "");

    let variation_re = Regex::new(r"\([^)]*\)").expect("valid variation regex");
    let no_variations = variation_re.replace_all(&no_comments, "");

    let move_re = Regex::new(
        r"[KQRBN]?[a-h]?[1-8]?x?[a-h][1-8](?:=[QRBN])?[+#]?|(?:O-O-O|O-O)[+#]?",
    )
    .expect("valid move regex");

    move_re
        .find_iter(&no_variations)
        .map(|m| m.as_str().to_string())
        .collect()
}
