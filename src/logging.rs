use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;

use crate::error::AppResult;

/// Sends tracing output to a file, since the terminal belongs to the game.
pub fn init(path: &Path, verbose: bool) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    // A subscriber may already be installed (tests); keep that one.
    let _ = tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_max_level(level)
        .try_init();
    Ok(())
}
