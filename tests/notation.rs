#![cfg(feature = "notation")]

use pieboard::fen;
use pieboard::layout::{ButtonId, Layout, DEFAULT_PANEL_WIDTH, DEFAULT_SQUARE_SIZE};
use pieboard::{Color, EditorError, Piece, PieceKind, Session, Square};
use pretty_assertions::assert_eq;

fn sq(name: &str) -> Square { Square::parse(name).unwrap() }

fn session() -> Session { Session::new(Layout::full(DEFAULT_SQUARE_SIZE, DEFAULT_PANEL_WIDTH)) }

#[test]
fn invalid_fen_changes_nothing() {
    let mut s = session();
    s.set_pgn_text("1. e4 e5");
    s.load_pgn().unwrap();
    s.step_forward();
    let board = s.board().clone();
    s.set_fen_text("FEN here");
    let err = s.press(ButtonId::LoadFen).unwrap_err();
    assert!(matches!(err, EditorError::InvalidFen(_)));
    assert_eq!(s.board(), &board);
    assert!(s.is_locked());
    assert_eq!(s.cursor(), 1);
    assert!(s.last_error().unwrap().contains("invalid FEN"));
}

#[test]
fn invalid_pgn_changes_nothing() {
    let mut s = session();
    let board = s.board().clone();
    s.set_pgn_text("PGN here");
    assert!(matches!(s.load_pgn(), Err(EditorError::InvalidPgn(_))));
    assert_eq!(s.board(), &board);
    assert!(!s.is_locked());
    assert!(s.loaded_game().is_none());
}

#[test]
fn fen_export_then_import_reproduces_the_board() {
    let mut s = session();
    let moves = [("e2", "e5"), ("g8", "off"), ("a1", "h8")];
    for (from, to) in moves {
        let p = s.layout().square_rect(sq(from)).center();
        s.pointer_down(p).unwrap();
        let dest = if to == "off" { s.layout().void_point() } else { s.layout().square_rect(sq(to)).center() };
        s.pointer_up(dest);
    }
    s.board_mut().set(sq("d4"), Piece::new(PieceKind::King, Color::Black));
    let edited = s.board().clone();
    s.press(ButtonId::ExportFen).unwrap();
    let text = s.fen_text().to_string();
    s.press(ButtonId::Clear).unwrap();
    s.set_fen_text(text.clone());
    s.press(ButtonId::LoadFen).unwrap();
    assert!(s.board().same_placement(&edited));
    assert_eq!(fen::to_fen(s.board()), text);
}

#[test]
fn loading_fen_forgets_the_game() {
    let mut s = session();
    s.set_pgn_text("1. e4");
    s.load_pgn().unwrap();
    s.set_fen_text("8/8/8/8/8/8/8/K6k b - - 0 40");
    s.load_fen().unwrap();
    assert!(s.loaded_game().is_none());
    assert!(!s.is_locked());
    assert_eq!(s.cursor(), 0);
    assert_eq!(s.board().side_to_move, Color::Black);
}

#[test]
fn unlocked_pgn_export_is_position_only() {
    let mut s = session();
    s.press(ButtonId::ExportPgn).unwrap();
    assert_eq!(s.pgn_text(), format!("[FEN \"{}\"]\n\n", fen::STARTPOS));
    // and it loads back as an empty locked game at that position
    s.load_pgn().unwrap();
    assert!(s.is_locked());
    assert_eq!(s.move_count(), 0);
    assert_eq!(s.board(), &pieboard::EditBoard::standard());
}

#[test]
fn e4_e5_nf3_scenario() {
    let mut s = session();
    s.set_pgn_text("1. e4 e5 2. Nf3");
    s.press(ButtonId::LoadPgn).unwrap();
    assert_eq!((s.cursor(), s.is_locked(), s.move_count()), (0, true, 3));
    for _ in 0..3 { s.press(ButtonId::Next).unwrap(); }
    assert_eq!(s.cursor(), 3);
    assert_eq!(s.board().get(sq("e4")), Some(Piece::new(PieceKind::Pawn, Color::White)));
    assert_eq!(s.board().get(sq("e5")), Some(Piece::new(PieceKind::Pawn, Color::Black)));
    assert_eq!(s.board().get(sq("f3")), Some(Piece::new(PieceKind::Knight, Color::White)));
    s.press(ButtonId::ExportPgn).unwrap();
    assert!(s.pgn_text().contains("\n1. e4 e5 2. Nf3 *"), "{}", s.pgn_text());
    assert!(s.pgn_text().starts_with("[Event \"?\"]"));
}

#[test]
fn position_only_export_loads_back_for_any_placement() {
    let mut s = session();
    s.board_mut().remove(sq("e8"));
    s.board_mut().set(sq("a8"), Piece::new(PieceKind::Pawn, Color::White));
    let exported = fen::to_fen(s.board());
    s.press(ButtonId::ExportPgn).unwrap();
    s.press(ButtonId::LoadPgn).unwrap();
    assert!(s.is_locked());
    assert_eq!(s.move_count(), 0);
    assert_eq!(fen::to_fen(s.board()), exported);
    assert!(!s.step_forward());
}
