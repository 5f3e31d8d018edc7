use pieboard::board::cozy::attackers_of;
use pieboard::{Color, EditBoard, Piece, PieceKind, Square};

fn all_pieces() -> Vec<Piece> {
    Color::ALL.iter().flat_map(|&c| PieceKind::ALL.iter().map(move |&k| Piece::new(k, c))).collect()
}

#[test]
fn set_then_get_on_every_square() {
    let mut b = EditBoard::standard();
    for (i, sq) in Square::all().enumerate() {
        let p = all_pieces()[i % 12];
        b.set(sq, p);
        assert_eq!(b.get(sq), Some(p), "square {sq}");
    }
}

#[test]
fn clear_empties_everything() {
    let mut b = EditBoard::standard();
    b.clear();
    assert!(Square::all().all(|sq| b.get(sq).is_none()));
    assert_eq!(b, EditBoard::empty());
}

#[test]
fn any_configuration_is_allowed() {
    let mut b = EditBoard::empty();
    let king = Piece::new(PieceKind::King, Color::White);
    for name in ["a1", "h8", "d4"] {
        b.set(Square::parse(name).unwrap(), king);
    }
    // pawns on the back rank too
    b.set(Square::parse("e8").unwrap(), Piece::new(PieceKind::Pawn, Color::Black));
    assert_eq!(b.pieces().count(), 4);
}

#[test]
fn attackers_ignore_side_to_move() {
    let mut b = EditBoard::standard();
    b.side_to_move = Color::Black;
    let e3 = Square::parse("e3").unwrap();
    assert_eq!(attackers_of(&b, e3, Color::White).len(), 2);
    assert!(attackers_of(&b, e3, Color::Black).is_empty());
}
