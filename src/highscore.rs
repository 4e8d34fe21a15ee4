//! High score persistence.
//!
//! The core only ever produces a single integer. Where it goes is up to the
//! `HighScoreStore` implementation; failures never reach the player.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{HighScoreError, Result};

/// Persistence collaborator for the best score.
pub trait HighScoreStore {
    fn load(&self) -> Result<u32>;
    fn save(&self, score: u32) -> Result<()>;
}

/// Decimal integer in a plain text file.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileStore {
    fn load(&self) -> Result<u32> {
        let text = std::fs::read_to_string(&self.path)?;
        let text = text.trim();
        if text.is_empty() {
            return Ok(0);
        }
        text.parse()
            .map_err(|_| HighScoreError::Parse(text.to_string()))
    }

    fn save(&self, score: u32) -> Result<()> {
        std::fs::write(&self.path, score.to_string())?;
        Ok(())
    }
}

/// Load the stored best score, treating any failure as 0.
pub fn load_or_zero(store: &impl HighScoreStore) -> u32 {
    match store.load() {
        Ok(score) => {
            log::debug!("loaded high score {}", score);
            score
        }
        Err(HighScoreError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            log::debug!("no stored high score yet");
            0
        }
        Err(e) => {
            log::warn!("ignoring stored high score: {}", e);
            0
        }
    }
}

/// Best-effort save; a failure is logged and otherwise ignored.
pub fn save_quietly(store: &impl HighScoreStore, score: u32) {
    match store.save(score) {
        Ok(()) => log::info!("high score {} saved", score),
        Err(e) => log::warn!("could not save high score {}: {}", score, e),
    }
}
