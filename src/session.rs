// The editor session: board, drag state, loaded game and text fields, driven by input intents.
use log::{debug, info};
#[cfg(feature = "notation")]
use log::warn;

use crate::board::cozy::{attack_counts, AttackCount};
use crate::board::{EditBoard, Square};
use crate::config::EditorConfig;
use crate::drag::{DragController, DragVisual, DropOutcome};
use crate::error::EditorError;
use crate::fen;
#[cfg(feature = "notation")]
use crate::game::LoadedGame;
use crate::layout::{ButtonId, Layout, Point, Target, TextField};
#[cfg(feature = "notation")]
use crate::pgn;

pub struct Session {
    board: EditBoard,
    drag: DragController,
    layout: Layout,
    #[cfg(feature = "notation")]
    game: Option<LoadedGame>,
    locked: bool,
    fen_text: String,
    pgn_text: String,
    focus: Option<TextField>,
    last_error: Option<String>,
}

impl Session {
    /// Standard start position.
    pub fn new(layout: Layout) -> Self {
        Self {
            board: EditBoard::standard(),
            drag: DragController::new(),
            layout,
            #[cfg(feature = "notation")]
            game: None,
            locked: false,
            fen_text: String::new(),
            pgn_text: String::new(),
            focus: None,
            last_error: None,
        }
    }

    pub fn from_config(cfg: &EditorConfig) -> Result<Self, EditorError> {
        let mut s = Self::new(cfg.layout());
        s.fen_text = cfg.fen_placeholder.clone();
        s.pgn_text = cfg.pgn_placeholder.clone();
        if let Some(text) = &cfg.initial_fen {
            s.board = fen::parse_fen(text)?;
        }
        Ok(s)
    }

    pub fn board(&self) -> &EditBoard { &self.board }

    /// Direct edits; these unlock a locked game like any other edit.
    pub fn board_mut(&mut self) -> &mut EditBoard {
        self.unlock_for_edit();
        &mut self.board
    }

    pub fn layout(&self) -> &Layout { &self.layout }
    pub fn is_locked(&self) -> bool { self.locked }
    pub fn is_dragging(&self) -> bool { self.drag.is_dragging() }
    pub fn drag(&self) -> &DragController { &self.drag }
    pub fn current_drag_visual(&self) -> Option<DragVisual> { self.drag.visual() }
    pub fn fen_text(&self) -> &str { &self.fen_text }
    pub fn pgn_text(&self) -> &str { &self.pgn_text }
    pub fn set_fen_text(&mut self, text: impl Into<String>) { self.fen_text = text.into(); }
    pub fn set_pgn_text(&mut self, text: impl Into<String>) { self.pgn_text = text.into(); }
    pub fn focus(&self) -> Option<TextField> { self.focus }
    pub fn last_error(&self) -> Option<&str> { self.last_error.as_deref() }

    pub fn attack_counts(&self) -> [AttackCount; Square::NUM] { attack_counts(&self.board) }

    fn unlock_for_edit(&mut self) {
        if self.locked {
            debug!("direct edit unlocks the loaded game");
            self.locked = false;
        }
    }

    // ---- pointer intents ----

    pub fn pointer_down(&mut self, p: Point) -> Result<(), EditorError> {
        if self.drag.is_dragging() { return Ok(()); }
        let target = self.layout.hit_test(p);
        self.focus = match target { Target::Field(f) => Some(f), _ => None };
        match target {
            Target::Square(sq) => {
                if self.board.get(sq).is_some() {
                    self.unlock_for_edit();
                    let top_left = self.layout.square_rect(sq).top_left();
                    self.drag.begin_from_board(&mut self.board, sq, top_left, p);
                }
            }
            Target::Stamp(stamp) => { self.drag.begin_from_stamp(stamp.piece, stamp.rect.top_left(), p); }
            Target::Button(id) => return self.press(id),
            Target::Field(_) | Target::Void => {}
        }
        Ok(())
    }

    pub fn pointer_move(&mut self, p: Point) { self.drag.pointer_move(p); }

    pub fn pointer_up(&mut self, p: Point) -> DropOutcome {
        self.drag.pointer_move(p);
        let dest = self.layout.square_at(p);
        let outcome = self.drag.release(&mut self.board, dest);
        if let DropOutcome::Placed { .. } = outcome { self.unlock_for_edit(); }
        outcome
    }

    // ---- text fields ----

    /// Types into the focused field. Enter leaves the single-line FEN field.
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            match (self.focus, c) {
                (Some(TextField::Fen), '\n') => self.focus = None,
                (Some(TextField::Fen), c) => self.fen_text.push(c),
                (Some(TextField::Pgn), c) => self.pgn_text.push(c),
                (None, _) => {}
            }
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            Some(TextField::Fen) => { self.fen_text.pop(); }
            Some(TextField::Pgn) => { self.pgn_text.pop(); }
            None => {}
        }
    }

    // ---- buttons ----

    /// Runs a button's action. Buttons missing from the layout do nothing.
    pub fn press(&mut self, id: ButtonId) -> Result<(), EditorError> {
        if !self.layout.has_button(id) {
            debug!("button {} not available in this layout", id.name());
            return Ok(());
        }
        match id {
            ButtonId::Clear => self.clear(),
            ButtonId::Start => self.start(),
            #[cfg(feature = "notation")]
            ButtonId::LoadFen => return self.load_fen(),
            #[cfg(feature = "notation")]
            ButtonId::ExportFen => self.export_fen(),
            #[cfg(feature = "notation")]
            ButtonId::LoadPgn => return self.load_pgn(),
            #[cfg(feature = "notation")]
            ButtonId::ExportPgn => self.export_pgn(),
            #[cfg(feature = "notation")]
            ButtonId::Prev => { self.step_backward(); }
            #[cfg(feature = "notation")]
            ButtonId::Next => { self.step_forward(); }
            #[cfg(feature = "notation")]
            ButtonId::LockToggle => self.toggle_lock(),
            #[cfg(not(feature = "notation"))]
            _ => {}
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.board.clear();
        self.drop_game();
        info!("board cleared");
    }

    pub fn start(&mut self) {
        self.board.reset_to_standard_start();
        self.drop_game();
        info!("board reset to the start position");
    }

    fn drop_game(&mut self) {
        self.locked = false;
        #[cfg(feature = "notation")]
        { self.game = None; }
    }
}

#[cfg(feature = "notation")]
impl Session {
    pub fn loaded_game(&self) -> Option<&LoadedGame> { self.game.as_ref() }
    pub fn cursor(&self) -> usize { self.game.as_ref().map_or(0, LoadedGame::cursor) }
    pub fn move_count(&self) -> usize { self.game.as_ref().map_or(0, LoadedGame::len) }

    fn report(&mut self, err: EditorError) -> EditorError {
        warn!("{err}");
        self.last_error = Some(err.to_string());
        err
    }

    /// Replaces the board with the FEN field's position and forgets any loaded game.
    pub fn load_fen(&mut self) -> Result<(), EditorError> {
        let board = fen::parse_fen(self.fen_text.trim()).map_err(|e| self.report(e.into()))?;
        self.board = board;
        self.drop_game();
        self.last_error = None;
        info!("loaded FEN {}", fen::to_fen(&self.board));
        Ok(())
    }

    pub fn export_fen(&mut self) {
        self.fen_text = fen::to_fen(&self.board);
        info!("exported FEN {}", self.fen_text);
    }

    /// Parses the PGN field, resets the board to the game's start and locks it.
    pub fn load_pgn(&mut self) -> Result<(), EditorError> {
        let game = pgn::parse_pgn(self.pgn_text.trim()).map_err(|e| self.report(e.into()))?;
        info!("loaded PGN with {} moves", game.moves.len());
        self.board = game.base.clone();
        self.game = Some(LoadedGame::new(game));
        self.locked = true;
        self.last_error = None;
        Ok(())
    }

    /// Locked games export up to the cursor; anything else exports the position alone.
    pub fn export_pgn(&mut self) {
        self.pgn_text = match (&self.game, self.locked) {
            (Some(game), true) => game.export(),
            _ => pgn::position_only(&fen::to_fen(&self.board)),
        };
        info!("exported PGN ({} bytes)", self.pgn_text.len());
    }

    pub fn step_forward(&mut self) -> bool {
        if !self.locked { return false; }
        let Some(game) = self.game.as_mut() else { return false };
        let stepped = game.step_forward(&mut self.board);
        if stepped { debug!("cursor {}/{}", game.cursor(), game.len()); }
        stepped
    }

    pub fn step_backward(&mut self) -> bool {
        if !self.locked { return false; }
        let Some(game) = self.game.as_mut() else { return false };
        let stepped = game.step_backward(&mut self.board);
        if stepped { debug!("cursor {}/{}", game.cursor(), game.len()); }
        stepped
    }

    pub fn toggle_lock(&mut self) {
        self.locked = !self.locked;
        debug!("lock {}", if self.locked { "on" } else { "off" });
    }
}
