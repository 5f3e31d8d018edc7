// A loaded PGN main line and the cursor stepping it onto the editor board.
use crate::board::cozy::{apply_move, GameMove};
use crate::board::EditBoard;
use crate::pgn::{self, PgnGame};

#[derive(Debug, Clone)]
pub struct LoadedGame {
    game: PgnGame,
    cursor: usize,
    // board before each replayed move; len() == cursor
    undo: Vec<EditBoard>,
}

impl LoadedGame {
    pub fn new(game: PgnGame) -> Self { Self { game, cursor: 0, undo: Vec::new() } }

    pub fn game(&self) -> &PgnGame { &self.game }
    pub fn headers(&self) -> &[(String, String)] { &self.game.headers }
    pub fn moves(&self) -> &[GameMove] { &self.game.moves }
    pub fn base(&self) -> &EditBoard { &self.game.base }
    pub fn cursor(&self) -> usize { self.cursor }
    pub fn len(&self) -> usize { self.game.moves.len() }
    pub fn is_empty(&self) -> bool { self.game.moves.is_empty() }
    pub fn at_end(&self) -> bool { self.cursor == self.len() }

    /// Applies the move under the cursor to `board`. Returns false at the end of the line.
    pub fn step_forward(&mut self, board: &mut EditBoard) -> bool {
        let Some(mv) = self.game.moves.get(self.cursor) else { return false };
        self.undo.push(board.clone());
        apply_move(board, mv);
        self.cursor += 1;
        true
    }

    /// Restores the board saved before the last replayed move.
    pub fn step_backward(&mut self, board: &mut EditBoard) -> bool {
        let Some(prev) = self.undo.pop() else { return false };
        *board = prev;
        self.cursor -= 1;
        true
    }

    /// The base position with the first `cursor` moves replayed.
    pub fn replayed(&self) -> EditBoard {
        let mut board = self.game.base.clone();
        for mv in &self.game.moves[..self.cursor] { apply_move(&mut board, mv); }
        board
    }

    pub fn export(&self) -> String { pgn::write_pgn(&self.game, self.cursor) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;
    use crate::pgn::parse_pgn;

    #[test]
    fn cursor_stays_in_bounds() {
        let mut g = LoadedGame::new(parse_pgn("1. e4 e5").unwrap());
        let mut b = g.base().clone();
        assert!(!g.step_backward(&mut b));
        assert!(g.step_forward(&mut b));
        assert!(g.step_forward(&mut b));
        assert!(g.at_end());
        assert!(!g.step_forward(&mut b));
        assert_eq!(g.cursor(), 2);
        assert_eq!(b, g.replayed());
        assert!(g.step_backward(&mut b));
        assert_eq!(g.cursor(), 1);
        assert!(b.get(Square::parse("e5").unwrap()).is_none());
        assert!(b.get(Square::parse("e4").unwrap()).is_some());
    }

    #[test]
    fn export_stops_at_cursor() {
        let mut g = LoadedGame::new(parse_pgn("1. d4 Nf6 2. c4 e6").unwrap());
        let mut b = g.base().clone();
        g.step_forward(&mut b);
        let out = g.export();
        assert!(out.contains("\n1. d4 *"), "{out}");
        assert!(!out.contains("Nf6"));
    }
}
