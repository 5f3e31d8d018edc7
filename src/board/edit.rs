use super::{Color, Piece, PieceKind, Square};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CastlingRights {
    pub white_short: bool,
    pub white_long: bool,
    pub black_short: bool,
    pub black_long: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights { white_short: true, white_long: true, black_short: true, black_long: true };

    pub fn none() -> Self { Self::default() }

    pub fn is_empty(&self) -> bool { *self == Self::none() }

    pub fn clear_color(&mut self, color: Color) {
        match color {
            Color::White => { self.white_short = false; self.white_long = false; }
            Color::Black => { self.black_short = false; self.black_long = false; }
        }
    }

    /// Drops the right tied to a rook corner once anything leaves or lands there.
    pub fn touch(&mut self, sq: Square) {
        match sq.index() {
            0 => self.white_long = false,
            7 => self.white_short = false,
            56 => self.black_long = false,
            63 => self.black_short = false,
            _ => {}
        }
    }
}

/// Freely editable position. Any placement is valid, including boards without kings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditBoard {
    squares: [Option<Piece>; Square::NUM],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Default for EditBoard {
    fn default() -> Self { Self::empty() }
}

impl EditBoard {
    pub fn empty() -> Self {
        Self {
            squares: [None; Square::NUM],
            side_to_move: Color::White,
            castling: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Canonical initial position, taken from the rules provider.
    pub fn standard() -> Self { super::cozy::standard_start() }

    pub fn get(&self, sq: Square) -> Option<Piece> { self.squares[sq.index()] }

    pub fn set(&mut self, sq: Square, piece: Piece) { self.squares[sq.index()] = Some(piece); }

    pub fn remove(&mut self, sq: Square) -> Option<Piece> { self.squares[sq.index()].take() }

    pub fn clear(&mut self) { *self = Self::empty(); }

    pub fn reset_to_standard_start(&mut self) { *self = Self::standard(); }

    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    pub fn is_empty(&self) -> bool { self.squares.iter().all(Option::is_none) }

    /// Same pieces on the same squares, ignoring FEN side data.
    pub fn same_placement(&self, other: &EditBoard) -> bool { self.squares == other.squares }

    /// Castling rights still backed by king and rook on their home squares.
    pub fn effective_castling(&self) -> CastlingRights {
        let has = |name: &str, kind: PieceKind, color: Color| {
            Square::parse(name).and_then(|sq| self.get(sq)) == Some(Piece::new(kind, color))
        };
        let wk = has("e1", PieceKind::King, Color::White);
        let bk = has("e8", PieceKind::King, Color::Black);
        CastlingRights {
            white_short: self.castling.white_short && wk && has("h1", PieceKind::Rook, Color::White),
            white_long: self.castling.white_long && wk && has("a1", PieceKind::Rook, Color::White),
            black_short: self.castling.black_short && bk && has("h8", PieceKind::Rook, Color::Black),
            black_long: self.castling.black_long && bk && has("a8", PieceKind::Rook, Color::Black),
        }
    }

    /// En-passant target kept only if a pawn of the side to move can capture onto it.
    pub fn effective_en_passant(&self) -> Option<Square> {
        let ep = self.en_passant?;
        let (capture_rank, pushed_rank) = match self.side_to_move {
            Color::White => (5, 4),
            Color::Black => (2, 3),
        };
        if ep.rank() != capture_rank { return None; }
        let pushed = Square::new(ep.file(), pushed_rank)?;
        if self.get(pushed) != Some(Piece::new(PieceKind::Pawn, self.side_to_move.opposite())) { return None; }
        let pawn = Piece::new(PieceKind::Pawn, self.side_to_move);
        let capturer = [ep.file().checked_sub(1), Some(ep.file() + 1)]
            .into_iter()
            .flatten()
            .filter_map(|f| Square::new(f, pushed_rank))
            .any(|sq| self.get(sq) == Some(pawn));
        if capturer { Some(ep) } else { None }
    }
}
