// Pixel geometry of the editor window and hit testing of pointer positions.
use crate::board::{Color, Piece, PieceKind, Square};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self { Self { x, y } }
}

impl std::ops::Sub for Point {
    type Output = Point;
    fn sub(self, o: Point) -> Point { Point::new(self.x - o.x, self.y - o.y) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self { Self { x, y, w, h } }
    pub fn contains(&self, p: Point) -> bool { p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h }
    pub fn top_left(&self) -> Point { Point::new(self.x, self.y) }
    pub fn center(&self) -> Point { Point::new(self.x + self.w / 2, self.y + self.h / 2) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ButtonId {
    LoadFen,
    ExportFen,
    LoadPgn,
    ExportPgn,
    Prev,
    Next,
    LockToggle,
    Clear,
    Start,
}

impl ButtonId {
    pub const ALL: [ButtonId; 9] = [
        ButtonId::LoadFen,
        ButtonId::ExportFen,
        ButtonId::LoadPgn,
        ButtonId::ExportPgn,
        ButtonId::Prev,
        ButtonId::Next,
        ButtonId::LockToggle,
        ButtonId::Clear,
        ButtonId::Start,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ButtonId::LoadFen => "load_fen",
            ButtonId::ExportFen => "export_fen",
            ButtonId::LoadPgn => "load_pgn",
            ButtonId::ExportPgn => "export_pgn",
            ButtonId::Prev => "prev",
            ButtonId::Next => "next",
            ButtonId::LockToggle => "lock",
            ButtonId::Clear => "clear",
            ButtonId::Start => "start",
        }
    }

    pub fn parse(name: &str) -> Option<ButtonId> { Self::ALL.into_iter().find(|b| b.name() == name) }

    /// Label shown on the button; the lock toggle reflects the current flag.
    pub fn label(self, locked: bool) -> &'static str {
        match self {
            ButtonId::LoadFen => "Load FEN",
            ButtonId::ExportFen => "Export FEN",
            ButtonId::LoadPgn => "Load PGN",
            ButtonId::ExportPgn => "Export PGN",
            ButtonId::Prev => "Prev",
            ButtonId::Next => "Next",
            ButtonId::LockToggle => if locked { "Lock" } else { "Unlock" },
            ButtonId::Clear => "Clear",
            ButtonId::Start => "Start",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextField {
    Fen,
    Pgn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stamp {
    pub rect: Rect,
    pub piece: Piece,
}

/// What a pointer position lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Square(Square),
    Stamp(Stamp),
    Button(ButtonId),
    Field(TextField),
    Void,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    square_size: i32,
    panel_width: i32,
    buttons: Vec<(ButtonId, Rect)>,
    fields: Vec<(TextField, Rect)>,
    stamps: Vec<Stamp>,
}

pub const DEFAULT_SQUARE_SIZE: i32 = 80;
pub const DEFAULT_PANEL_WIDTH: i32 = 200;

impl Layout {
    /// Editor with FEN/PGN fields, navigation buttons and the toolbox below them.
    pub fn full(square_size: i32, panel_width: i32) -> Self {
        let x0 = square_size * 8;
        let buttons = vec![
            (ButtonId::LoadFen, Rect::new(x0 + 10, 130, 80, 30)),
            (ButtonId::ExportFen, Rect::new(x0 + 100, 130, 90, 30)),
            (ButtonId::LoadPgn, Rect::new(x0 + 10, 170, 80, 30)),
            (ButtonId::ExportPgn, Rect::new(x0 + 100, 170, 90, 30)),
            (ButtonId::Prev, Rect::new(x0 + 10, 210, 80, 30)),
            (ButtonId::Next, Rect::new(x0 + 100, 210, 90, 30)),
            (ButtonId::LockToggle, Rect::new(x0 + 10, 250, 180, 30)),
            (ButtonId::Clear, Rect::new(x0 + 10, 290, 80, 30)),
            (ButtonId::Start, Rect::new(x0 + 100, 290, 90, 30)),
        ];
        let fields = vec![
            (TextField::Fen, Rect::new(x0 + 10, 10, 180, 30)),
            (TextField::Pgn, Rect::new(x0 + 10, 50, 180, 70)),
        ];
        let stamps = Self::toolbox(x0, 330, panel_width, square_size * 8);
        Self { square_size, panel_width, buttons, fields, stamps }
    }

    /// Board, Clear/Start and the toolbox only.
    pub fn minimal(square_size: i32, panel_width: i32) -> Self {
        let x0 = square_size * 8;
        let (btn_w, btn_h) = (panel_width - 20, 40);
        let buttons = vec![
            (ButtonId::Clear, Rect::new(x0 + 10, 10, btn_w, btn_h)),
            (ButtonId::Start, Rect::new(x0 + 10, 10 + btn_h + 5, btn_w, btn_h)),
        ];
        let grid_top = 10 + 2 * (btn_h + 5);
        let stamps = Self::toolbox(x0, grid_top, panel_width, square_size * 8);
        Self { square_size, panel_width, buttons, fields: Vec::new(), stamps }
    }

    // Two columns (white, black), one row per piece kind.
    fn toolbox(x0: i32, top: i32, panel_width: i32, height: i32) -> Vec<Stamp> {
        let cell_w = panel_width / 2;
        let cell_h = (height - top - 10) / PieceKind::ALL.len() as i32;
        let mut stamps = Vec::with_capacity(12);
        for (row, kind) in PieceKind::ALL.into_iter().enumerate() {
            let y = top + row as i32 * cell_h;
            stamps.push(Stamp { rect: Rect::new(x0, y, cell_w, cell_h), piece: Piece::new(kind, Color::White) });
            stamps.push(Stamp { rect: Rect::new(x0 + cell_w, y, cell_w, cell_h), piece: Piece::new(kind, Color::Black) });
        }
        stamps
    }

    pub fn square_size(&self) -> i32 { self.square_size }
    pub fn board_width(&self) -> i32 { self.square_size * 8 }
    pub fn width(&self) -> i32 { self.board_width() + self.panel_width }
    pub fn height(&self) -> i32 { self.board_width() }
    pub fn buttons(&self) -> &[(ButtonId, Rect)] { &self.buttons }
    pub fn stamps(&self) -> &[Stamp] { &self.stamps }
    pub fn has_button(&self, id: ButtonId) -> bool { self.button_rect(id).is_some() }

    pub fn button_rect(&self, id: ButtonId) -> Option<Rect> {
        self.buttons.iter().find(|(b, _)| *b == id).map(|(_, r)| *r)
    }

    pub fn field_rect(&self, field: TextField) -> Option<Rect> {
        self.fields.iter().find(|(f, _)| *f == field).map(|(_, r)| *r)
    }

    pub fn stamp_for(&self, piece: Piece) -> Option<Stamp> { self.stamps.iter().copied().find(|s| s.piece == piece) }

    /// Rank 8 is drawn at the top.
    pub fn square_rect(&self, sq: Square) -> Rect {
        let s = self.square_size;
        Rect::new(sq.file() as i32 * s, (7 - sq.rank() as i32) * s, s, s)
    }

    pub fn square_at(&self, p: Point) -> Option<Square> {
        if p.x < 0 || p.y < 0 || p.x >= self.board_width() || p.y >= self.height() { return None; }
        let file = p.x / self.square_size;
        let rank = 7 - p.y / self.square_size;
        Square::new(file as u8, rank as u8)
    }

    pub fn hit_test(&self, p: Point) -> Target {
        if let Some(sq) = self.square_at(p) { return Target::Square(sq); }
        if let Some((f, _)) = self.fields.iter().find(|(_, r)| r.contains(p)) { return Target::Field(*f); }
        if let Some((b, _)) = self.buttons.iter().find(|(_, r)| r.contains(p)) { return Target::Button(*b); }
        if let Some(s) = self.stamps.iter().find(|s| s.rect.contains(p)) { return Target::Stamp(*s); }
        Target::Void
    }

    /// A panel point that hits nothing, below the toolbox.
    pub fn void_point(&self) -> Point { Point::new(self.board_width() + 2, self.height() - 2) }
}
