// PGN import/export. Only the main line of the first game is kept.
use cozy_chess::Board as CozyBoard;

use crate::board::cozy::GameMove;
use crate::board::san::{self, SanError};
use crate::board::{Color, EditBoard};
use crate::fen;

const SEVEN_TAG_ROSTER: [(&str, &str); 7] = [
    ("Event", "?"),
    ("Site", "?"),
    ("Date", "????.??.??"),
    ("Round", "?"),
    ("White", "?"),
    ("Black", "?"),
    ("Result", "*"),
];

const LINE_WIDTH: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PgnError {
    #[error("no game found")]
    Empty,
    #[error("malformed tag: {0}")]
    BadTag(String),
    #[error("unterminated {0}")]
    Unterminated(&'static str),
    #[error("unexpected '{0}'")]
    Unexpected(char),
    #[error("FEN tag rejected: {0}")]
    BadFen(String),
    #[error("ply {ply}: {source}")]
    Move { ply: usize, source: SanError },
}

/// A parsed game: tags in source order, the resolved main line and the position it starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgnGame {
    pub headers: Vec<(String, String)>,
    pub moves: Vec<GameMove>,
    pub base: EditBoard,
    pub result: String,
}

impl PgnGame {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }
}

enum Token {
    Tag(String, String),
    Move(String),
    Result(String),
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(text: &'a str) -> Self { Self { chars: text.chars().peekable() } }

    fn skip_until(&mut self, end: char, what: &'static str) -> Result<(), PgnError> {
        for c in self.chars.by_ref() {
            if c == end { return Ok(()); }
        }
        Err(PgnError::Unterminated(what))
    }

    fn skip_variation(&mut self) -> Result<(), PgnError> {
        let mut depth = 1usize;
        while let Some(c) = self.chars.next() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 { return Ok(()); }
                }
                '{' => self.skip_until('}', "comment")?,
                _ => {}
            }
        }
        Err(PgnError::Unterminated("variation"))
    }

    fn tag(&mut self) -> Result<Token, PgnError> {
        let mut raw = String::new();
        let mut in_quotes = false;
        let mut escaped = false;
        loop {
            let c = self.chars.next().ok_or(PgnError::Unterminated("tag"))?;
            if in_quotes {
                if escaped { escaped = false; } else if c == '\\' { escaped = true; } else if c == '"' { in_quotes = false; }
            } else if c == '"' {
                in_quotes = true;
            } else if c == ']' {
                break;
            }
            raw.push(c);
        }
        let body = raw.trim();
        let (name, rest) = body.split_once(char::is_whitespace).ok_or_else(|| PgnError::BadTag(body.to_string()))?;
        let value = rest.trim();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') || value.len() < 2 || !value.starts_with('"') || !value.ends_with('"') {
            return Err(PgnError::BadTag(body.to_string()));
        }
        let inner = &value[1..value.len() - 1];
        let mut unescaped = String::with_capacity(inner.len());
        let mut it = inner.chars();
        while let Some(c) = it.next() {
            if c == '\\' { if let Some(n) = it.next() { unescaped.push(n); } } else { unescaped.push(c); }
        }
        Ok(Token::Tag(name.to_string(), unescaped))
    }

    fn next_token(&mut self) -> Result<Option<Token>, PgnError> {
        loop {
            let Some(&c) = self.chars.peek() else { return Ok(None) };
            match c {
                c if c.is_whitespace() => { self.chars.next(); }
                '[' => { self.chars.next(); return self.tag().map(Some); }
                '{' => { self.chars.next(); self.skip_until('}', "comment")?; }
                ';' | '%' => { self.chars.next(); let _ = self.skip_until('\n', "line"); }
                '(' => { self.chars.next(); self.skip_variation()?; }
                ')' | '}' | ']' => return Err(PgnError::Unexpected(c)),
                '$' => {
                    self.chars.next();
                    while self.chars.peek().map_or(false, |c| c.is_ascii_digit()) { self.chars.next(); }
                }
                _ => {
                    let mut word = String::new();
                    while let Some(&c) = self.chars.peek() {
                        if c.is_whitespace() || "{}()[];$".contains(c) { break; }
                        word.push(c);
                        self.chars.next();
                    }
                    if matches!(word.as_str(), "1-0" | "0-1" | "1/2-1/2" | "*") {
                        return Ok(Some(Token::Result(word)));
                    }
                    // "12." / "12..." / "12.e4"
                    let rest = word.trim_start_matches(|c: char| c.is_ascii_digit());
                    let san = if rest.len() < word.len() && rest.starts_with('.') { rest.trim_start_matches('.') } else { word.as_str() };
                    if !san.is_empty() { return Ok(Some(Token::Move(san.to_string()))); }
                }
            }
        }
    }
}

/// Parses the first game in `text`, resolving every main-line move against the rules provider.
pub fn parse_pgn(text: &str) -> Result<PgnGame, PgnError> {
    let mut lexer = Lexer::new(text);
    let mut headers: Vec<(String, String)> = Vec::new();
    let mut sans: Vec<String> = Vec::new();
    let mut result = None;
    while let Some(tok) = lexer.next_token()? {
        match tok {
            Token::Tag(k, v) => {
                // a tag after movetext starts the next game
                if !sans.is_empty() { break; }
                match headers.iter_mut().find(|(name, _)| *name == k) {
                    Some(slot) => slot.1 = v,
                    None => headers.push((k, v)),
                }
            }
            Token::Move(s) => sans.push(s),
            Token::Result(r) => { result = Some(r); break; }
        }
    }
    if headers.is_empty() && sans.is_empty() && result.is_none() { return Err(PgnError::Empty); }

    let fen_tag = headers.iter().find(|(k, _)| k == "FEN").map(|(_, v)| v.as_str());
    // any placement is accepted as a base; only a line of moves needs a legal position
    let base = match fen_tag {
        Some(text) => fen::parse_fen(text).map_err(|e| PgnError::BadFen(format!("{text}: {e}")))?,
        None => EditBoard::standard(),
    };
    let mut moves = Vec::with_capacity(sans.len());
    if !sans.is_empty() {
        let mut board = match fen_tag {
            Some(_) => {
                let text = fen::to_fen(&base);
                CozyBoard::from_fen(&text, false).map_err(|e| PgnError::BadFen(format!("{text}: {e:?}")))?
            }
            None => CozyBoard::default(),
        };
        for (i, s) in sans.iter().enumerate() {
            let mv = san::resolve(&board, s).map_err(|source| PgnError::Move { ply: i + 1, source })?;
            moves.push(san::to_game_move(&board, mv));
            board.play(mv);
        }
    }
    let result = result
        .or_else(|| headers.iter().find(|(k, _)| k == "Result").map(|(_, v)| v.clone()))
        .unwrap_or_else(|| "*".to_string());
    log::debug!("parsed PGN: {} tags, {} plies, result {}", headers.len(), moves.len(), result);
    Ok(PgnGame { headers, moves, base, result })
}

fn escape(value: &str) -> String { value.replace('\\', "\\\\").replace('"', "\\\"") }

/// Writes headers (Seven Tag Roster first), the first `upto` moves and the termination marker.
pub fn write_pgn(game: &PgnGame, upto: usize) -> String {
    let mut out = String::new();
    for (name, default) in SEVEN_TAG_ROSTER {
        let value = game.header(name).unwrap_or(default);
        out.push_str(&format!("[{} \"{}\"]\n", name, escape(value)));
    }
    for (name, value) in &game.headers {
        if SEVEN_TAG_ROSTER.iter().any(|(n, _)| n == name) { continue; }
        out.push_str(&format!("[{} \"{}\"]\n", name, escape(value)));
    }
    out.push('\n');

    let mut words: Vec<String> = Vec::new();
    let mut number = game.base.fullmove_number;
    let mut side = game.base.side_to_move;
    for (i, mv) in game.moves.iter().take(upto).enumerate() {
        match side {
            Color::White => words.push(format!("{number}.")),
            Color::Black if i == 0 => words.push(format!("{number}...")),
            Color::Black => {}
        }
        words.push(mv.san.clone());
        if side == Color::Black { number += 1; }
        side = side.opposite();
    }
    words.push(game.header("Result").unwrap_or(&game.result).to_string());

    let mut line_len = 0usize;
    for w in words {
        if line_len > 0 && line_len + 1 + w.len() > LINE_WIDTH {
            out.push('\n');
            line_len = 0;
        }
        if line_len > 0 { out.push(' '); line_len += 1; }
        line_len += w.len();
        out.push_str(&w);
    }
    out.push('\n');
    out
}

/// Position-only export used when no game is locked in.
pub fn position_only(fen: &str) -> String { format!("[FEN \"{}\"]\n\n", escape(fen)) }

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_tags_comments_and_variations() {
        let text = r#"[Event "Casual \"blitz\""]
[White "Anna"]

1. e4 {best by test} e5 (1... c5 2. Nf3) 2. Nf3 $1 Nc6?! ; trailing note
3.Bb5 1-0"#;
        let g = parse_pgn(text).unwrap();
        assert_eq!(g.header("Event"), Some("Casual \"blitz\""));
        let sans: Vec<&str> = g.moves.iter().map(|m| m.san.as_str()).collect();
        assert_eq!(sans, vec!["e4", "e5", "Nf3", "Nc6", "Bb5"]);
        assert_eq!(g.result, "1-0");
    }

    #[test]
    fn rejects_illegal_and_empty_input() {
        assert_eq!(parse_pgn("   "), Err(PgnError::Empty));
        assert!(matches!(parse_pgn("PGN here"), Err(PgnError::Move { ply: 1, .. })));
        assert!(matches!(parse_pgn("1. e4 e5 2. Ke3"), Err(PgnError::Move { ply: 3, .. })));
        assert!(matches!(parse_pgn("1. e4 { open"), Err(PgnError::Unterminated("comment"))));
        assert!(matches!(parse_pgn("[Event]"), Err(PgnError::BadTag(_))));
    }

    #[test]
    fn fen_tag_sets_the_base_position() {
        let text = "[FEN \"4k3/8/8/8/8/8/4P3/4K3 b - - 0 7\"]\n\n7... Kd7 8. e4 *";
        let g = parse_pgn(text).unwrap();
        assert_eq!(g.base.fullmove_number, 7);
        assert_eq!(g.moves.len(), 2);
        let out = write_pgn(&g, 2);
        assert!(out.contains("7... Kd7 8. e4 *"), "{out}");
    }

    #[test]
    fn stray_closing_delimiters_are_errors() {
        assert_eq!(parse_pgn("1. e4 ) e5"), Err(PgnError::Unexpected(')')));
        assert_eq!(parse_pgn("1. e4 } e5"), Err(PgnError::Unexpected('}')));
        assert_eq!(parse_pgn("] 1. e4"), Err(PgnError::Unexpected(']')));
    }

    #[test]
    fn fen_tag_without_moves_may_be_illegal() {
        let g = parse_pgn("[FEN \"8/8/8/8/8/8/8/P6P w - - 0 1\"]\n\n").unwrap();
        assert!(g.moves.is_empty());
        assert_eq!(fen::placement(&g.base), "8/8/8/8/8/8/8/P6P");
        assert!(matches!(parse_pgn("[FEN \"8/8/8/8/8/8/8/P6P w - - 0 1\"]\n1. a2"), Err(PgnError::BadFen(_))));
        assert!(matches!(parse_pgn("[FEN \"not a fen\"]"), Err(PgnError::BadFen(_))));
    }

    #[test]
    fn writes_roster_and_partial_line() {
        let g = parse_pgn("[Result \"0-1\"]\n1. e4 e5 2. Nf3 Nc6 0-1").unwrap();
        let out = write_pgn(&g, 3);
        let expected = "[Event \"?\"]\n[Site \"?\"]\n[Date \"????.??.??\"]\n[Round \"?\"]\n[White \"?\"]\n[Black \"?\"]\n[Result \"0-1\"]\n\n1. e4 e5 2. Nf3 0-1\n";
        assert_eq!(out, expected);
    }

    #[test]
    fn only_the_first_game_is_read() {
        let g = parse_pgn("1. d4 d5 *\n\n[Event \"second\"]\n1. e4 *").unwrap();
        assert_eq!(g.moves.len(), 2);
        assert_eq!(g.header("Event"), None);
    }

    #[test]
    fn long_games_wrap() {
        let text = "1. Nf3 Nf6 2. Ng1 Ng8 3. Nf3 Nf6 4. Ng1 Ng8 5. Nf3 Nf6 6. Ng1 Ng8 7. Nf3 Nf6 8. Ng1 Ng8 9. Nf3 Nf6";
        let g = parse_pgn(text).unwrap();
        let out = write_pgn(&g, g.moves.len());
        assert!(out.lines().all(|l| l.len() <= LINE_WIDTH));
        assert!(out.trim_end().ends_with("9. Nf3 Nf6 *"));
    }
}
