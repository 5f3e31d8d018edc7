// Text rendering of the session: board with attacker badges, drag state and status.
use std::fmt::Write;

use crate::board::Square;
use crate::session::Session;

fn badge(n: u8) -> char {
    match n {
        0 => ' ',
        1..=9 => (b'0' + n) as char,
        _ => '+',
    }
}

/// One row per rank, rank 8 first. With `attacks` each cell reads
/// `<white count><piece><black count>`.
pub fn board_text(session: &Session, attacks: bool) -> String {
    let board = session.board();
    let counts = session.attack_counts();
    let mut out = String::new();
    let cell_width = if attacks { 3 } else { 1 };
    let rule = format!("  +{}+\n", "-".repeat(8 * (cell_width + 1) + 1));
    out.push_str(&rule);
    for rank in (0..8u8).rev() {
        let _ = write!(out, "{} |", rank + 1);
        for file in 0..8u8 {
            let sq = Square::from_raw(rank * 8 + file);
            let piece = board.get(sq).map_or('.', |p| p.fen_char());
            out.push(' ');
            if attacks {
                let c = counts[sq.index()];
                out.push(badge(c.white));
                out.push(piece);
                out.push(badge(c.black));
            } else {
                out.push(piece);
            }
        }
        out.push_str(" |\n");
    }
    out.push_str(&rule);
    out.push_str("   ");
    for f in 'a'..='h' {
        out.push(' ');
        if attacks { let _ = write!(out, " {f} "); } else { out.push(f); }
    }
    out.push('\n');
    out
}

pub fn status_text(session: &Session) -> String {
    let mut out = String::new();
    if let Some(v) = session.current_drag_visual() {
        let _ = writeln!(out, "dragging {} at ({}, {})", v.piece.fen_char(), v.top_left.x, v.top_left.y);
    }
    let buttons: Vec<&str> = session.layout().buttons().iter().map(|(b, _)| b.label(session.is_locked())).collect();
    let _ = writeln!(out, "[{}]", buttons.join("] ["));
    #[cfg(feature = "notation")]
    {
        use crate::layout::ButtonId;
        if session.layout().has_button(ButtonId::LoadPgn) {
            let lock = if session.is_locked() { "locked" } else { "unlocked" };
            let _ = writeln!(out, "{} move {}/{}", lock, session.cursor(), session.move_count());
            let _ = writeln!(out, "FEN: {}", session.fen_text());
            let _ = writeln!(out, "PGN: {}", session.pgn_text().replace('\n', " / "));
        }
    }
    if let Some(err) = session.last_error() {
        let _ = writeln!(out, "error: {err}");
    }
    out
}

pub fn render(session: &Session, attacks: bool) -> String {
    let mut out = board_text(session, attacks);
    out.push_str(&status_text(session));
    out
}
