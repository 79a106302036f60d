use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use sca_editor_lib::{init_logging, replay, AppState, Settings};

/// Replays tab commands (one JSON object per line) and prints every
/// resulting "update-tabs" payload as a JSON line.
#[derive(Parser, Debug)]
#[command(name = "sca-editor", version, about)]
struct Cli {
    /// Settings file (JSON). Defaults apply when missing.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Command script. Reads stdin when omitted.
    #[arg(long)]
    script: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = cli.settings.as_deref().map(Settings::load).unwrap_or_default();
    init_logging(&settings.log_level);

    let reader: Box<dyn BufRead> = match &cli.script {
        Some(path) => {
            let file = fs::File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    let app = AppState::new(settings);
    let stats = replay(&app, reader, io::stdout().lock()).context("replay failed")?;

    let state = app.snapshot()?;
    log::info!(
        "Applied {} commands, rejected {} ({} tabs open, active: {:?})",
        stats.applied,
        stats.rejected,
        state.len(),
        state.active_id()
    );

    Ok(())
}
