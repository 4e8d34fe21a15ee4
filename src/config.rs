//! Startup configuration.
//!
//! These are constants for the lifetime of the process; nothing here is
//! exposed as a runtime option.

use std::path::PathBuf;
use std::time::Duration;

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH, TICKS_PER_SECOND};

pub const TITLE: &str = "Space Blaster";

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,
    pub ticks_per_second: u32,
    pub title: String,
    /// Plain-text file holding the best score.
    pub high_score_path: PathBuf,
    /// Where the binary sends its log output.
    pub log_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        let home = data_dir();
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            ticks_per_second: TICKS_PER_SECOND,
            title: TITLE.to_string(),
            high_score_path: home.join(".space_blaster_score"),
            log_path: home.join(".space_blaster.log"),
        }
    }
}

impl GameConfig {
    /// Wall-clock length of one tick.
    pub fn frame(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }
}

fn data_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
}
