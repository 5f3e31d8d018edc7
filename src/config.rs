use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::layout::{Layout, DEFAULT_PANEL_WIDTH, DEFAULT_SQUARE_SIZE};

/// Editor settings, read from JSON. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub square_size: i32,
    pub panel_width: i32,
    /// Board, Clear/Start and toolbox only.
    pub minimal: bool,
    pub show_attacks: bool,
    /// Starting position; the standard start when unset.
    pub initial_fen: Option<String>,
    pub fen_placeholder: String,
    pub pgn_placeholder: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            square_size: DEFAULT_SQUARE_SIZE,
            panel_width: DEFAULT_PANEL_WIDTH,
            minimal: !cfg!(feature = "notation"),
            show_attacks: true,
            initial_fen: None,
            fen_placeholder: "FEN here".to_string(),
            pgn_placeholder: "PGN here".to_string(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: EditorConfig = serde_json::from_str(text).context("parsing editor config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.square_size < 8 { anyhow::bail!("square_size must be at least 8, got {}", self.square_size); }
        if self.panel_width < 40 { anyhow::bail!("panel_width must be at least 40, got {}", self.panel_width); }
        Ok(())
    }

    /// Without the `notation` feature only the minimal layout exists.
    pub fn layout(&self) -> Layout {
        if self.minimal || !cfg!(feature = "notation") {
            Layout::minimal(self.square_size, self.panel_width)
        } else {
            Layout::full(self.square_size, self.panel_width)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = EditorConfig::from_json(r#"{ "square_size": 60, "show_attacks": false }"#).unwrap();
        assert_eq!(cfg.square_size, 60);
        assert!(!cfg.show_attacks);
        assert_eq!(cfg.panel_width, DEFAULT_PANEL_WIDTH);
        assert_eq!(cfg.layout().board_width(), 480);
    }

    #[test]
    fn rejects_tiny_squares_and_bad_json() {
        assert!(EditorConfig::from_json(r#"{ "square_size": 2 }"#).is_err());
        assert!(EditorConfig::from_json("{ nope").is_err());
    }
}
