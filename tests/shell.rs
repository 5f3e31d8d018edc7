use pieboard::layout::{Layout, DEFAULT_PANEL_WIDTH, DEFAULT_SQUARE_SIZE};
use pieboard::shell::EditorShell;
use pieboard::{Color, Piece, PieceKind, Session, Square};

fn run(layout: Layout, script: &str) -> (EditorShell, String) {
    let mut shell = EditorShell::new(Session::new(layout), false);
    let mut out = Vec::new();
    shell.run_loop(script.as_bytes(), &mut out).unwrap();
    (shell, String::from_utf8(out).unwrap())
}

#[test]
fn drag_commands_edit_the_board() {
    let (shell, out) = run(Layout::minimal(DEFAULT_SQUARE_SIZE, DEFAULT_PANEL_WIDTH), "drag e2 e4\ndrag bQ a3\ndrag h8 off\nquit\ndrag a1 a2\n");
    let b = shell.session().board();
    assert_eq!(b.get(Square::parse("e4").unwrap()), Some(Piece::new(PieceKind::Pawn, Color::White)));
    assert_eq!(b.get(Square::parse("a3").unwrap()), Some(Piece::new(PieceKind::Queen, Color::Black)));
    assert!(b.get(Square::parse("h8").unwrap()).is_none());
    // nothing after quit runs
    assert!(b.get(Square::parse("a1").unwrap()).is_some());
    assert!(out.contains("4 | . . . . P . . . |"), "{out}");
}

#[test]
fn raw_pointer_commands() {
    let (shell, _) = run(Layout::minimal(DEFAULT_SQUARE_SIZE, DEFAULT_PANEL_WIDTH), "down 500 590\nmove 420 430\nup 420 430\n");
    let b = shell.session().board();
    assert_eq!(b.get(Square::parse("f3").unwrap()), Some(Piece::new(PieceKind::Knight, Color::White)));
}

#[test]
fn bad_input_is_reported_not_fatal() {
    let (_, out) = run(Layout::minimal(DEFAULT_SQUARE_SIZE, DEFAULT_PANEL_WIDTH), "jump\ndrag e4 e5\nclick load_pgn\nclick nope\ndown 1\n");
    assert!(out.contains("unknown command: jump"));
    assert!(out.contains("nothing to drag at e4"));
    assert!(out.contains("button load_pgn is not available"));
    assert!(out.contains("unknown button: nope"));
    assert!(out.contains("usage: down X Y"));
}

#[cfg(feature = "notation")]
#[test]
fn notation_buttons_through_the_shell() {
    let script = "pgn [White \"A\"]\\n1. d4 d5\nclick load_pgn\nclick next\nclick next\nclick export_pgn\nfen nonsense\nclick load_fen\n";
    let (shell, out) = run(Layout::full(DEFAULT_SQUARE_SIZE, DEFAULT_PANEL_WIDTH), script);
    let s = shell.session();
    assert_eq!(s.cursor(), 2);
    assert!(s.pgn_text().contains("1. d4 d5 *"));
    assert!(out.contains("locked move 2/2"));
    assert!(out.contains("invalid FEN"));
}
