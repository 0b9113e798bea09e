//! High score persistence
//!
//! The high score is a single integer on disk, rounded to the nearest ten
//! when written. It is read once at startup and written at quit.

use std::path::{Path, PathBuf};

use crate::persistence::{self, PersistError};
use crate::round_to_ten;

/// Default file name, relative to the working directory
pub const DEFAULT_HIGH_SCORE_FILE: &str = "highscore_alien_invasion.json";

/// Location of the persisted high score
#[derive(Debug, Clone)]
pub struct HighScoreFile {
    path: PathBuf,
}

impl Default for HighScoreFile {
    fn default() -> Self {
        Self::new(DEFAULT_HIGH_SCORE_FILE)
    }
}

impl HighScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored high score; absent or unreadable files count as 0
    pub fn load(&self) -> u64 {
        match persistence::load_json::<u64>(&self.path) {
            Ok(score) => {
                log::info!("Loaded high score {score}");
                score
            }
            Err(PersistError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Ignoring high score file {}: {e}", self.path.display());
                0
            }
        }
    }

    /// Persist the high score, rounded to the nearest ten
    pub fn save(&self, high_score: u64) -> Result<(), PersistError> {
        let rounded = round_to_ten(high_score);
        persistence::save_json(&self.path, &rounded)?;
        log::info!("High score {rounded} saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_missing_file_loads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let file = HighScoreFile::new(dir.path().join("hs.json"));
        assert_eq!(file.load(), 0);
    }

    #[test]
    fn test_malformed_file_loads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hs.json");
        std::fs::write(&path, "{ \"score\": ").unwrap();
        assert_eq!(HighScoreFile::new(path).load(), 0);
    }

    #[test]
    fn test_unwritable_location_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = HighScoreFile::new(dir.path().join("missing-dir").join("hs.json"));
        assert!(matches!(file.save(100), Err(PersistError::Io(_))));
    }

    proptest! {
        #[test]
        fn prop_save_then_load_rounds_to_ten(score in 0u64..10_000_000) {
            let dir = tempfile::tempdir().unwrap();
            let file = HighScoreFile::new(dir.path().join("hs.json"));
            file.save(score).unwrap();
            prop_assert_eq!(file.load(), round_to_ten(score));
        }
    }
}
