use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use pieboard::shell::EditorShell;
use pieboard::{EditorConfig, Session};

#[derive(Parser, Debug)]
#[command(author, version, about = "Edit chess positions: drag pieces, step through games, import/export FEN and PGN", long_about = None)]
struct Args {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting FEN position (overrides the config)
    #[arg(long)]
    fen: Option<String>,

    /// PGN file to load and lock at startup
    #[arg(long)]
    pgn: Option<PathBuf>,

    /// Board square size in pixels
    #[arg(long)]
    square_size: Option<i32>,

    /// Board, Clear/Start and toolbox only
    #[arg(long)]
    minimal: bool,

    /// Hide attacker counts
    #[arg(long)]
    no_attacks: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    if let Some(fen) = args.fen { cfg.initial_fen = Some(fen); }
    if let Some(size) = args.square_size { cfg.square_size = size; }
    cfg.minimal |= args.minimal;
    cfg.show_attacks &= !args.no_attacks;
    cfg.validate()?;
    info!("layout {}x{}, minimal={}", cfg.layout().width(), cfg.layout().height(), cfg.minimal);

    let mut session = Session::from_config(&cfg).context("initial position")?;
    if let Some(path) = &args.pgn {
        load_pgn_file(&mut session, path)?;
    }

    let mut shell = EditorShell::new(session, cfg.show_attacks);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    shell.run_loop(stdin.lock(), &mut stdout)?;
    Ok(())
}

#[cfg(feature = "notation")]
fn load_pgn_file(session: &mut Session, path: &std::path::Path) -> Result<()> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    session.set_pgn_text(text);
    session.load_pgn().with_context(|| format!("loading {}", path.display()))?;
    Ok(())
}

#[cfg(not(feature = "notation"))]
fn load_pgn_file(_session: &mut Session, path: &std::path::Path) -> Result<()> {
    anyhow::bail!("{}: PGN support needs the `notation` feature", path.display())
}
