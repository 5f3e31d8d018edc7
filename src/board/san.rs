// Standard Algebraic Notation against legal cozy-chess positions.
use cozy_chess::{Board as CozyBoard, Move as CozyMove, Piece as CozyPiece};

use super::cozy::{from_cozy_color, from_cozy_piece, from_cozy_square, to_cozy_piece, GameMove, MoveKind};
use super::{Piece, PieceKind, Square};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SanError {
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    #[error("no legal move matches {0}")]
    NoLegalMove(String),
    #[error("ambiguous move: {0}")]
    AmbiguousMove(String),
}

struct SanPattern {
    piece: PieceKind,
    from_file: Option<u8>,
    from_rank: Option<u8>,
    to: Square,
    promotion: Option<PieceKind>,
}

enum Parsed {
    Castle { long: bool },
    Normal(SanPattern),
}

fn parse(token: &str) -> Result<Parsed, SanError> {
    let bad = || SanError::InvalidFormat(token.to_string());
    let core = token.trim_end_matches(|c| matches!(c, '+' | '#' | '!' | '?'));
    match core {
        "O-O" | "0-0" => return Ok(Parsed::Castle { long: false }),
        "O-O-O" | "0-0-0" => return Ok(Parsed::Castle { long: true }),
        _ => {}
    }
    let mut chars: Vec<char> = core.chars().filter(|&c| c != 'x' && c != '-').collect();
    let piece = match chars.first() {
        Some(&c) if c.is_ascii_uppercase() => {
            chars.remove(0);
            PieceKind::from_letter(c).filter(|k| *k != PieceKind::Pawn).ok_or_else(bad)?
        }
        Some(_) => PieceKind::Pawn,
        None => return Err(bad()),
    };
    let mut promotion = None;
    if let Some(&last) = chars.last() {
        if last.is_ascii_alphabetic() && PieceKind::from_letter(last).is_some() && last.is_ascii_uppercase() {
            promotion = PieceKind::from_letter(last);
            chars.pop();
            if chars.last() == Some(&'=') { chars.pop(); }
        }
    }
    if chars.len() < 2 { return Err(bad()); }
    let to = Square::from_chars(chars[chars.len() - 2], chars[chars.len() - 1]).ok_or_else(bad)?;
    let mut from_file = None;
    let mut from_rank = None;
    for &c in &chars[..chars.len() - 2] {
        match c {
            'a'..='h' if from_file.is_none() => from_file = Some(c as u8 - b'a'),
            '1'..='8' if from_rank.is_none() => from_rank = Some(c as u8 - b'1'),
            _ => return Err(bad()),
        }
    }
    if promotion.is_some() && piece != PieceKind::Pawn { return Err(bad()); }
    Ok(Parsed::Normal(SanPattern { piece, from_file, from_rank, to, promotion }))
}

pub fn legal_moves(board: &CozyBoard) -> Vec<CozyMove> {
    let mut out = Vec::new();
    board.generate_moves(|ml| { out.extend(ml); false });
    out
}

// cozy-chess encodes castling as the king capturing its own rook.
fn is_castle(board: &CozyBoard, mv: CozyMove) -> bool {
    board.piece_on(mv.from) == Some(CozyPiece::King) && board.color_on(mv.to) == Some(board.side_to_move())
}

/// Finds the unique legal move written as `token`.
pub fn resolve(board: &CozyBoard, token: &str) -> Result<CozyMove, SanError> {
    let parsed = parse(token)?;
    let candidates: Vec<CozyMove> = legal_moves(board)
        .into_iter()
        .filter(|&mv| match &parsed {
            Parsed::Castle { long } => is_castle(board, mv) && ((mv.to.file() as u8) < (mv.from.file() as u8)) == *long,
            Parsed::Normal(p) => {
                let from = from_cozy_square(mv.from);
                !is_castle(board, mv)
                    && board.piece_on(mv.from).map(from_cozy_piece) == Some(p.piece)
                    && from_cozy_square(mv.to) == p.to
                    && p.from_file.map_or(true, |f| from.file() == f)
                    && p.from_rank.map_or(true, |r| from.rank() == r)
                    && mv.promotion.map(from_cozy_piece) == p.promotion
            }
        })
        .collect();
    match candidates.as_slice() {
        [mv] => Ok(*mv),
        [] => Err(SanError::NoLegalMove(token.to_string())),
        _ => Err(SanError::AmbiguousMove(token.to_string())),
    }
}

/// SAN for a legal move, with check and mate suffixes.
pub fn format(board: &CozyBoard, mv: CozyMove) -> String {
    let mut out = String::new();
    let from = from_cozy_square(mv.from);
    let to = from_cozy_square(mv.to);
    if is_castle(board, mv) {
        out.push_str(if to.file() < from.file() { "O-O-O" } else { "O-O" });
    } else {
        let kind = board.piece_on(mv.from).map(from_cozy_piece).unwrap_or(PieceKind::Pawn);
        let capture = board.piece_on(mv.to).is_some() || (kind == PieceKind::Pawn && from.file() != to.file());
        if kind == PieceKind::Pawn {
            if capture { out.push(from.file_char()); }
        } else {
            out.push(kind.letter());
            let rivals: Vec<Square> = legal_moves(board)
                .into_iter()
                .filter(|&o| o.to == mv.to && o.from != mv.from && board.piece_on(o.from) == Some(to_cozy_piece(kind)) && !is_castle(board, o))
                .map(|o| from_cozy_square(o.from))
                .collect();
            if !rivals.is_empty() {
                if rivals.iter().all(|r| r.file() != from.file()) {
                    out.push(from.file_char());
                } else if rivals.iter().all(|r| r.rank() != from.rank()) {
                    out.push(from.rank_char());
                } else {
                    out.push(from.file_char());
                    out.push(from.rank_char());
                }
            }
        }
        if capture { out.push('x'); }
        out.push_str(&to.to_string());
        if let Some(p) = mv.promotion {
            out.push('=');
            out.push(from_cozy_piece(p).letter());
        }
    }
    let mut child = board.clone();
    child.play(mv);
    if !child.checkers().is_empty() {
        out.push(if legal_moves(&child).is_empty() { '#' } else { '+' });
    }
    out
}

/// Converts a legal cozy-chess move into a board-independent record.
pub fn to_game_move(board: &CozyBoard, mv: CozyMove) -> GameMove {
    let from = from_cozy_square(mv.from);
    let raw_to = from_cozy_square(mv.to);
    let color = from_cozy_color(board.side_to_move());
    let kind = board.piece_on(mv.from).map(from_cozy_piece).unwrap_or(PieceKind::Pawn);
    let san = format(board, mv);
    let (to, move_kind) = if is_castle(board, mv) {
        let long = raw_to.file() < from.file();
        let (king_file, rook_file) = if long { (2, 3) } else { (6, 5) };
        let rank = from.rank();
        let to = Square::from_raw(rank * 8 + king_file);
        (to, MoveKind::Castle { rook_from: raw_to, rook_to: Square::from_raw(rank * 8 + rook_file) })
    } else if kind == PieceKind::Pawn && from.file() != raw_to.file() && board.piece_on(mv.to).is_none() {
        (raw_to, MoveKind::EnPassant)
    } else if kind == PieceKind::Pawn && from.rank().abs_diff(raw_to.rank()) == 2 {
        (raw_to, MoveKind::DoublePush)
    } else {
        (raw_to, MoveKind::Normal)
    };
    GameMove {
        from,
        to,
        piece: Piece::new(kind, color),
        promotion: mv.promotion.map(from_cozy_piece),
        kind: move_kind,
        san,
    }
}
