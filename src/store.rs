use std::fs;
use std::path::PathBuf;

use log::{error, info};

pub const HIGH_SCORE_FILE: &str = ".snekpen_high_score.txt";

/// High-score persistence, injected into the controller so games and tests
/// never touch process-wide paths directly. Failures stay behind this
/// boundary: a load problem reads as zero, a save problem is logged and
/// swallowed.
pub trait ScoreStore {
    fn load(&mut self) -> u32;
    fn save(&mut self, score: u32);
}

pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileScoreStore { path: path.into() }
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&mut self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                let score = text.trim().parse().unwrap_or(0);
                info!("Loaded high score: {}", score);
                score
            }
            Err(e) => {
                info!("No high score loaded: {}", e);
                0
            }
        }
    }

    fn save(&mut self, score: u32) {
        if let Err(e) = fs::write(&self.path, score.to_string()) {
            error!("Error saving high score: {}", e);
        }
    }
}
