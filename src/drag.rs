// Drag-and-drop of pieces between board squares and toolbox stamps.
use crate::board::{EditBoard, Piece, Square};
use crate::layout::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragSource {
    /// Lifted off the board; the origin square stays empty while dragging.
    Board { origin: Square },
    Toolbox,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragSession {
    pub source: DragSource,
    pub piece: Piece,
    /// Pointer position inside the glyph when the drag started.
    pub offset: Point,
    pub pointer: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragVisual {
    pub piece: Piece,
    pub top_left: Point,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    Placed { square: Square, piece: Piece, source: DragSource },
    /// A board piece released off the board is deleted.
    Discarded { origin: Square, piece: Piece },
    /// A stamp released off the board changes nothing.
    Cancelled,
    NotDragging,
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self { Self::default() }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state { DragState::Dragging(s) => Some(s), DragState::Idle => None }
    }

    pub fn is_dragging(&self) -> bool { self.session().is_some() }

    /// Lifts the piece on `sq`. Returns false if the square is empty or a drag is already running.
    pub fn begin_from_board(&mut self, board: &mut EditBoard, sq: Square, square_top_left: Point, pointer: Point) -> bool {
        if self.is_dragging() { return false; }
        let Some(piece) = board.remove(sq) else { return false };
        log::debug!("drag start: {:?} from {}", piece, sq);
        self.state = DragState::Dragging(DragSession {
            source: DragSource::Board { origin: sq },
            piece,
            offset: pointer - square_top_left,
            pointer,
        });
        true
    }

    pub fn begin_from_stamp(&mut self, piece: Piece, stamp_top_left: Point, pointer: Point) -> bool {
        if self.is_dragging() { return false; }
        log::debug!("drag start: {:?} from toolbox", piece);
        self.state = DragState::Dragging(DragSession { source: DragSource::Toolbox, piece, offset: pointer - stamp_top_left, pointer });
        true
    }

    pub fn pointer_move(&mut self, pointer: Point) {
        if let DragState::Dragging(s) = &mut self.state { s.pointer = pointer; }
    }

    /// Ends the drag. `dest` is the board square under the pointer, if any.
    pub fn release(&mut self, board: &mut EditBoard, dest: Option<Square>) -> DropOutcome {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else { return DropOutcome::NotDragging };
        let outcome = match (dest, session.source) {
            (Some(square), source) => {
                board.set(square, session.piece);
                DropOutcome::Placed { square, piece: session.piece, source }
            }
            (None, DragSource::Board { origin }) => DropOutcome::Discarded { origin, piece: session.piece },
            (None, DragSource::Toolbox) => DropOutcome::Cancelled,
        };
        log::debug!("drag end: {:?}", outcome);
        outcome
    }

    pub fn visual(&self) -> Option<DragVisual> {
        self.session().map(|s| DragVisual { piece: s.piece, top_left: s.pointer - s.offset })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, PieceKind};

    fn sq(name: &str) -> Square { Square::parse(name).unwrap() }

    #[test]
    fn lift_vacates_origin_until_drop() {
        let mut b = EditBoard::standard();
        let mut d = DragController::new();
        assert!(d.begin_from_board(&mut b, sq("g1"), Point::new(480, 560), Point::new(500, 590)));
        assert_eq!(b.get(sq("g1")), None);
        d.pointer_move(Point::new(420, 430));
        let v = d.visual().unwrap();
        assert_eq!(v.top_left, Point::new(400, 400));
        assert_eq!(v.piece, Piece::new(PieceKind::Knight, Color::White));
        let out = d.release(&mut b, Some(sq("f3")));
        assert!(matches!(out, DropOutcome::Placed { .. }));
        assert_eq!(b.get(sq("f3")), Some(Piece::new(PieceKind::Knight, Color::White)));
        assert!(!d.is_dragging());
    }

    #[test]
    fn empty_square_does_not_start_a_drag() {
        let mut b = EditBoard::empty();
        let mut d = DragController::new();
        assert!(!d.begin_from_board(&mut b, sq("e4"), Point::default(), Point::default()));
        assert_eq!(d.release(&mut b, Some(sq("e4"))), DropOutcome::NotDragging);
    }

    #[test]
    fn second_press_is_ignored_while_dragging() {
        let mut b = EditBoard::standard();
        let mut d = DragController::new();
        assert!(d.begin_from_board(&mut b, sq("e2"), Point::default(), Point::default()));
        assert!(!d.begin_from_board(&mut b, sq("d2"), Point::default(), Point::default()));
        assert!(b.get(sq("d2")).is_some());
        assert!(!d.begin_from_stamp(Piece::new(PieceKind::Queen, Color::White), Point::default(), Point::default()));
    }

    #[test]
    fn stamp_released_off_board_is_cancelled() {
        let mut b = EditBoard::empty();
        let mut d = DragController::new();
        d.begin_from_stamp(Piece::new(PieceKind::Rook, Color::Black), Point::new(740, 480), Point::new(750, 500));
        assert_eq!(d.release(&mut b, None), DropOutcome::Cancelled);
        assert!(b.is_empty());
    }
}
