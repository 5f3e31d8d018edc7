// Rules provider: everything that needs chess movement rules goes through cozy-chess here.
use cozy_chess::{
    get_bishop_moves, get_king_moves, get_knight_moves, get_pawn_attacks, get_rook_moves, BitBoard,
    Board as CozyBoard, Color as CozyColor, Piece as CozyPiece, Square as CozySquare,
};

use super::{CastlingRights, Color, EditBoard, Piece, PieceKind, Square};

pub fn to_cozy_square(sq: Square) -> CozySquare { CozySquare::index(sq.index()) }

pub fn from_cozy_square(sq: CozySquare) -> Square { Square::from_raw(sq as u8) }

pub fn to_cozy_color(c: Color) -> CozyColor {
    match c { Color::White => CozyColor::White, Color::Black => CozyColor::Black }
}

pub fn from_cozy_color(c: CozyColor) -> Color {
    match c { CozyColor::White => Color::White, CozyColor::Black => Color::Black }
}

pub fn to_cozy_piece(k: PieceKind) -> CozyPiece {
    match k {
        PieceKind::Pawn => CozyPiece::Pawn,
        PieceKind::Knight => CozyPiece::Knight,
        PieceKind::Bishop => CozyPiece::Bishop,
        PieceKind::Rook => CozyPiece::Rook,
        PieceKind::Queen => CozyPiece::Queen,
        PieceKind::King => CozyPiece::King,
    }
}

pub fn from_cozy_piece(p: CozyPiece) -> PieceKind {
    match p {
        CozyPiece::Pawn => PieceKind::Pawn,
        CozyPiece::Knight => PieceKind::Knight,
        CozyPiece::Bishop => PieceKind::Bishop,
        CozyPiece::Rook => PieceKind::Rook,
        CozyPiece::Queen => PieceKind::Queen,
        CozyPiece::King => PieceKind::King,
    }
}

/// Copies a legal cozy-chess position into an editor board.
pub fn from_cozy(board: &CozyBoard) -> EditBoard {
    let mut out = EditBoard::empty();
    for &csq in CozySquare::ALL.iter() {
        if let (Some(p), Some(c)) = (board.piece_on(csq), board.color_on(csq)) {
            out.set(from_cozy_square(csq), Piece::new(from_cozy_piece(p), from_cozy_color(c)));
        }
    }
    let stm = board.side_to_move();
    out.side_to_move = from_cozy_color(stm);
    let white = board.castle_rights(CozyColor::White);
    let black = board.castle_rights(CozyColor::Black);
    out.castling = CastlingRights {
        white_short: white.short.is_some(),
        white_long: white.long.is_some(),
        black_short: black.short.is_some(),
        black_long: black.long.is_some(),
    };
    out.en_passant = board.en_passant().and_then(|file| {
        let rank = if stm == CozyColor::White { 5 } else { 2 };
        Square::new(file as u8, rank)
    });
    out.halfmove_clock = board.halfmove_clock() as u32;
    out.fullmove_number = board.fullmove_number() as u32;
    out
}

pub fn standard_start() -> EditBoard { from_cozy(&CozyBoard::default()) }

/// Bitboards of an editor board, built without cozy-chess position validation.
struct Occupancy {
    all: BitBoard,
    colors: [BitBoard; 2],
    kinds: [BitBoard; 6],
}

impl Occupancy {
    fn of(board: &EditBoard) -> Self {
        let mut occ = Occupancy { all: BitBoard::EMPTY, colors: [BitBoard::EMPTY; 2], kinds: [BitBoard::EMPTY; 6] };
        for (sq, p) in board.pieces() {
            let bb = BitBoard(1u64 << sq.index());
            occ.all |= bb;
            occ.colors[p.color as usize] |= bb;
            occ.kinds[p.kind as usize] |= bb;
        }
        occ
    }

    fn kind(&self, k: PieceKind) -> BitBoard { self.kinds[k as usize] }

    fn attackers(&self, target: Square, color: Color) -> BitBoard {
        let t = to_cozy_square(target);
        let diag = self.kind(PieceKind::Bishop) | self.kind(PieceKind::Queen);
        let line = self.kind(PieceKind::Rook) | self.kind(PieceKind::Queen);
        let mut atk = get_pawn_attacks(t, to_cozy_color(color.opposite())) & self.kind(PieceKind::Pawn);
        atk |= get_knight_moves(t) & self.kind(PieceKind::Knight);
        atk |= get_king_moves(t) & self.kind(PieceKind::King);
        atk |= get_bishop_moves(t, self.all) & diag;
        atk |= get_rook_moves(t, self.all) & line;
        atk & self.colors[color as usize]
    }
}

/// Squares holding `color` pieces that attack `target`. Pins and side to move are ignored.
pub fn attackers_of(board: &EditBoard, target: Square, color: Color) -> Vec<Square> {
    Occupancy::of(board).attackers(target, color).into_iter().map(from_cozy_square).collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttackCount {
    pub white: u8,
    pub black: u8,
}

/// Attacker counts for every square, indexed by `Square::index`.
pub fn attack_counts(board: &EditBoard) -> [AttackCount; Square::NUM] {
    let occ = Occupancy::of(board);
    let mut out = [AttackCount::default(); Square::NUM];
    for sq in Square::all() {
        out[sq.index()] = AttackCount {
            white: occ.attackers(sq, Color::White).len() as u8,
            black: occ.attackers(sq, Color::Black).len() as u8,
        };
    }
    out
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKind {
    Normal,
    DoublePush,
    EnPassant,
    Castle { rook_from: Square, rook_to: Square },
}

/// A move of a loaded game, resolved once against the legal position it was played in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameMove {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub promotion: Option<PieceKind>,
    pub kind: MoveKind,
    pub san: String,
}

/// Plays a recorded move onto an editor board. The board may have drifted away from the
/// position the move was recorded in, so nothing is validated.
pub fn apply_move(board: &mut EditBoard, mv: &GameMove) {
    let mover = board.remove(mv.from).unwrap_or(mv.piece);
    let color = mover.color;
    let mut capture = board.get(mv.to).is_some();
    match mv.kind {
        MoveKind::EnPassant => {
            if let Some(victim) = Square::new(mv.to.file(), mv.from.rank()) {
                capture |= board.remove(victim).is_some();
            }
        }
        MoveKind::Castle { rook_from, rook_to } => {
            if let Some(rook) = board.remove(rook_from) { board.set(rook_to, rook); }
        }
        MoveKind::Normal | MoveKind::DoublePush => {}
    }
    let placed = match mv.promotion { Some(kind) => Piece::new(kind, color), None => mover };
    board.set(mv.to, placed);

    if mover.kind == PieceKind::King { board.castling.clear_color(color); }
    board.castling.touch(mv.from);
    board.castling.touch(mv.to);
    board.en_passant = match mv.kind {
        MoveKind::DoublePush => Square::new(mv.from.file(), (mv.from.rank() + mv.to.rank()) / 2),
        _ => None,
    };
    if mover.kind == PieceKind::Pawn || capture { board.halfmove_clock = 0; } else { board.halfmove_clock += 1; }
    if color == Color::Black { board.fullmove_number += 1; }
    board.side_to_move = color.opposite();
}
