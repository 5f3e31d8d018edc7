// Chess position editor: editable board, drag-and-drop, FEN/PGN import-export
pub mod board;
pub mod config;
pub mod drag;
pub mod error;
pub mod fen;
#[cfg(feature = "notation")]
pub mod game;
pub mod layout;
pub mod pgn;
pub mod render;
pub mod session;
pub mod shell;

pub use board::{Color, EditBoard, Piece, PieceKind, Square};
pub use config::EditorConfig;
pub use error::EditorError;
pub use session::Session;
