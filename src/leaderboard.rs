use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

pub const SHOWN_ENTRIES: usize = 3;

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("leaderboard io: {0}")]
    Io(#[from] io::Error),
    #[error("leaderboard encoding: {0}")]
    Codec(#[from] bincode::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    pub stretch: u32,
    pub lifetime_seconds: u32,
}

/// Every finished run, best score first. Stored as one bincode blob.
#[derive(Debug, Default)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
    path: Option<PathBuf>,
}

impl Leaderboard {
    /// Store that never touches disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Reads the store at `path`. A missing or unreadable file gives an
    /// empty store.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let entries = match fs::read(path) {
            Ok(bytes) => match bincode::deserialize::<Vec<LeaderboardEntry>>(&bytes) {
                Ok(mut entries) => {
                    entries.sort_by(|a, b| b.score.cmp(&a.score));
                    entries
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "corrupt leaderboard, starting empty");
                    Vec::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read leaderboard, starting empty");
                Vec::new()
            }
        };
        info!(path = %path.display(), entries = entries.len(), "leaderboard loaded");
        Self {
            entries,
            path: Some(path.to_path_buf()),
        }
    }

    /// Appends a run and re-sorts by score, ties keeping insertion order.
    /// Returns the new top entries.
    pub fn add(&mut self, entry: LeaderboardEntry) -> Vec<LeaderboardEntry> {
        self.entries.push(entry);
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.top()
    }

    pub fn top(&self) -> Vec<LeaderboardEntry> {
        self.entries.iter().take(SHOWN_ENTRIES).cloned().collect()
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn save(&self) -> Result<(), LeaderboardError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let bytes = bincode::serialize(&self.entries)?;
        fs::write(path, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: u32) -> LeaderboardEntry {
        LeaderboardEntry {
            name: name.to_owned(),
            score,
            stretch: 4,
            lifetime_seconds: 12,
        }
    }

    #[test]
    fn sorts_descending_on_add() {
        let mut board = Leaderboard::in_memory();
        board.add(entry("a", 10));
        board.add(entry("b", 50));
        let top = board.add(entry("c", 30));
        let scores: Vec<u32> = top.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![50, 30, 10]);

        let top = board.add(entry("d", 5));
        assert_eq!(top.len(), 3);
        assert!(top.iter().all(|e| e.name != "d"));
        assert_eq!(board.len(), 4);
    }

    #[test]
    fn equal_scores_keep_insertion_order() {
        let mut board = Leaderboard::in_memory();
        board.add(entry("first", 20));
        board.add(entry("second", 20));
        let top = board.add(entry("third", 40));
        let names: Vec<&str> = top.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["third", "first", "second"]);
    }

    #[test]
    fn in_memory_save_is_a_no_op() {
        let mut board = Leaderboard::in_memory();
        board.add(entry("a", 1));
        assert!(board.save().is_ok());
    }
}
