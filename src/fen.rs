// FEN for editor boards. Unlike cozy-chess this accepts any placement, kings or not.
use crate::board::{CastlingRights, Color, EditBoard, Piece, Square};

pub const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("empty FEN")]
    Empty,
    #[error("too many fields ({0})")]
    TooManyFields(usize),
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} does not cover 8 files")]
    RankWidth { rank: usize },
    #[error("invalid piece: {0}")]
    InvalidPiece(char),
    #[error("invalid side to move: {0}")]
    InvalidColor(String),
    #[error("invalid castling field: {0}")]
    InvalidCastling(String),
    #[error("invalid en passant square: {0}")]
    InvalidEnPassant(String),
    #[error("invalid move counter: {0}")]
    InvalidCounter(String),
}

/// Parses FEN. Only the placement field is required; missing fields default to
/// `w - - 0 1`.
pub fn parse_fen(fen: &str) -> Result<EditBoard, FenError> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.is_empty() { return Err(FenError::Empty); }
    if parts.len() > 6 { return Err(FenError::TooManyFields(parts.len())); }

    let mut board = EditBoard::empty();
    let ranks: Vec<&str> = parts[0].split('/').collect();
    if ranks.len() != 8 { return Err(FenError::RankCount(ranks.len())); }
    for (row, text) in ranks.iter().enumerate() {
        let rank = 7 - row;
        let mut file = 0usize;
        for c in text.chars() {
            if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += skip as usize;
            } else {
                let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPiece(c))?;
                let sq = Square::new(file as u8, rank as u8).ok_or(FenError::RankWidth { rank: rank + 1 })?;
                board.set(sq, piece);
                file += 1;
            }
            if file > 8 { return Err(FenError::RankWidth { rank: rank + 1 }); }
        }
        if file != 8 { return Err(FenError::RankWidth { rank: rank + 1 }); }
    }

    board.side_to_move = match parts.get(1).copied().unwrap_or("w") {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(FenError::InvalidColor(other.to_string())),
    };
    board.castling = parse_castling(parts.get(2).copied().unwrap_or("-"))?;
    board.en_passant = match parts.get(3).copied().unwrap_or("-") {
        "-" => None,
        s => Some(Square::parse(s).filter(|sq| sq.rank() == 2 || sq.rank() == 5).ok_or_else(|| FenError::InvalidEnPassant(s.to_string()))?),
    };
    board.halfmove_clock = parse_counter(parts.get(4).copied().unwrap_or("0"))?;
    board.fullmove_number = parse_counter(parts.get(5).copied().unwrap_or("1"))?.max(1);
    Ok(board)
}

fn parse_castling(s: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::none();
    if s == "-" { return Ok(rights); }
    for c in s.chars() {
        let slot = match c {
            'K' => &mut rights.white_short,
            'Q' => &mut rights.white_long,
            'k' => &mut rights.black_short,
            'q' => &mut rights.black_long,
            _ => return Err(FenError::InvalidCastling(s.to_string())),
        };
        if *slot { return Err(FenError::InvalidCastling(s.to_string())); }
        *slot = true;
    }
    Ok(rights)
}

fn parse_counter(s: &str) -> Result<u32, FenError> {
    s.parse::<u32>().map_err(|_| FenError::InvalidCounter(s.to_string()))
}

pub fn placement(board: &EditBoard) -> String {
    let mut out = String::with_capacity(72);
    for rank in (0..8u8).rev() {
        let mut empty = 0;
        for file in 0..8u8 {
            match Square::new(file, rank).and_then(|sq| board.get(sq)) {
                Some(p) => {
                    if empty > 0 { out.push_str(&empty.to_string()); empty = 0; }
                    out.push(p.fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 { out.push_str(&empty.to_string()); }
        if rank > 0 { out.push('/'); }
    }
    out
}

/// Full six-field FEN. Castling and en-passant fields only keep what the
/// placement still supports.
pub fn to_fen(board: &EditBoard) -> String {
    let side = match board.side_to_move { Color::White => "w", Color::Black => "b" };
    let c = board.effective_castling();
    let mut castling = String::new();
    if c.white_short { castling.push('K'); }
    if c.white_long { castling.push('Q'); }
    if c.black_short { castling.push('k'); }
    if c.black_long { castling.push('q'); }
    if castling.is_empty() { castling.push('-'); }
    let ep = board.effective_en_passant().map_or_else(|| "-".to_string(), |sq| sq.to_string());
    format!("{} {} {} {} {} {}", placement(board), side, castling, ep, board.halfmove_clock, board.fullmove_number)
}
