use crate::fen::FenError;
use crate::pgn::PgnError;

/// Import failures. Both are recoverable: the session is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    #[error("invalid FEN: {0}")]
    InvalidFen(#[from] FenError),
    #[error("invalid PGN: {0}")]
    InvalidPgn(#[from] PgnError),
}
