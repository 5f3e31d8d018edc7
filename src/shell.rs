// Line-command front end: turns text commands into pointer intents and button presses.
use std::io::{self, BufRead, Write};

use crate::board::{Color, Piece, PieceKind, Square};
use crate::layout::{ButtonId, Point};
use crate::render;
use crate::session::Session;

const HELP: &str = "\
commands:
  down X Y | move X Y | up X Y    pointer intents in window pixels
  drag FROM TO                    FROM: square or stamp (wQ, bn, ...); TO: square or 'off'
  click BUTTON                    load_fen export_fen load_pgn export_pgn prev next lock clear start
  fen TEXT | pgn TEXT             set a text field (in pgn, \\n is a newline)
  type TEXT | backspace           edit the focused field
  attacks on|off | show | help | quit";

pub enum Flow {
    Continue { redraw: bool },
    Quit,
}

pub struct EditorShell {
    session: Session,
    attacks: bool,
}

impl EditorShell {
    pub fn new(session: Session, attacks: bool) -> Self { Self { session, attacks } }

    pub fn session(&self) -> &Session { &self.session }

    fn parse_point(args: &str) -> Option<Point> {
        let mut it = args.split_whitespace().map(|t| t.parse::<i32>());
        match (it.next(), it.next(), it.next()) {
            (Some(Ok(x)), Some(Ok(y)), None) => Some(Point::new(x, y)),
            _ => None,
        }
    }

    fn parse_stamp(tok: &str) -> Option<Piece> {
        let mut chars = tok.chars();
        let color = match chars.next()? { 'w' => Color::White, 'b' => Color::Black, _ => return None };
        let kind = PieceKind::from_letter(chars.next()?)?;
        if chars.next().is_some() { return None; }
        Some(Piece::new(kind, color))
    }

    fn cmd_pointer(&mut self, verb: &str, args: &str, out: &mut impl Write) -> io::Result<bool> {
        let Some(p) = Self::parse_point(args) else {
            writeln!(out, "usage: {verb} X Y")?;
            return Ok(false);
        };
        match verb {
            "down" => {
                if let Err(e) = self.session.pointer_down(p) { writeln!(out, "{e}")?; }
            }
            "move" => self.session.pointer_move(p),
            _ => { self.session.pointer_up(p); }
        }
        Ok(true)
    }

    // Expressed as pointer intents at the centre of the source and destination rectangles.
    fn cmd_drag(&mut self, args: &str, out: &mut impl Write) -> io::Result<bool> {
        let mut toks = args.split_whitespace();
        let (Some(from), Some(to), None) = (toks.next(), toks.next(), toks.next()) else {
            writeln!(out, "usage: drag FROM TO")?;
            return Ok(false);
        };
        let layout = self.session.layout();
        let start = match Square::parse(from) {
            Some(sq) => Some(layout.square_rect(sq).center()),
            None => Self::parse_stamp(from).and_then(|p| layout.stamp_for(p)).map(|s| s.rect.center()),
        };
        let end = match to {
            "off" => Some(layout.void_point()),
            name => Square::parse(name).map(|sq| layout.square_rect(sq).center()),
        };
        let (Some(start), Some(end)) = (start, end) else {
            writeln!(out, "unknown source or destination: {from} {to}")?;
            return Ok(false);
        };
        if let Err(e) = self.session.pointer_down(start) { writeln!(out, "{e}")?; }
        if !self.session.is_dragging() {
            writeln!(out, "nothing to drag at {from}")?;
            return Ok(false);
        }
        self.session.pointer_move(end);
        self.session.pointer_up(end);
        Ok(true)
    }

    fn cmd_click(&mut self, name: &str, out: &mut impl Write) -> io::Result<bool> {
        let Some(id) = ButtonId::parse(name) else {
            writeln!(out, "unknown button: {name}")?;
            return Ok(false);
        };
        if !self.session.layout().has_button(id) {
            writeln!(out, "button {name} is not available")?;
            return Ok(false);
        }
        if let Err(e) = self.session.press(id) { writeln!(out, "{e}")?; }
        Ok(true)
    }

    /// Runs one command line.
    pub fn execute(&mut self, line: &str, out: &mut impl Write) -> io::Result<Flow> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let redraw = match verb {
            "" => false,
            "quit" | "exit" => return Ok(Flow::Quit),
            "help" => { writeln!(out, "{HELP}")?; false }
            "show" => true,
            "down" | "move" | "up" => self.cmd_pointer(verb, rest, out)?,
            "drag" => self.cmd_drag(rest, out)?,
            "click" => self.cmd_click(rest, out)?,
            "fen" => { self.session.set_fen_text(rest); true }
            "pgn" => { self.session.set_pgn_text(rest.replace("\\n", "\n")); true }
            "type" => { self.session.type_text(&rest.replace("\\n", "\n")); true }
            "backspace" => { self.session.backspace(); true }
            "attacks" => match rest {
                "on" => { self.attacks = true; true }
                "off" => { self.attacks = false; true }
                _ => { writeln!(out, "usage: attacks on|off")?; false }
            },
            other => { writeln!(out, "unknown command: {other} (try 'help')")?; false }
        };
        Ok(Flow::Continue { redraw })
    }

    pub fn run_loop<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        write!(out, "{}", render::render(&self.session, self.attacks))?;
        for line in input.lines() {
            let line = line?;
            match self.execute(&line, out)? {
                Flow::Quit => break,
                Flow::Continue { redraw: true } => write!(out, "{}", render::render(&self.session, self.attacks))?,
                Flow::Continue { redraw: false } => {}
            }
            out.flush()?;
        }
        Ok(())
    }
}
