//! High score persistence
//!
//! A single integer, read once at startup and written when a round beats it.
//! Read failures fall back to 0 and write failures are dropped; the game
//! never stops over storage.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Key/value pair the app reads and writes the best score through
pub trait HighScoreStore {
    /// Stored best score, 0 if missing or unreadable
    fn load(&self) -> u64;
    /// Persist a new best score. Failures are swallowed.
    fn save(&mut self, score: u64);
}

/// In-memory store (tests, sessions without storage)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub score: u64,
    /// Number of writes seen
    pub writes: u32,
}

impl MemoryStore {
    pub fn with_score(score: u64) -> Self {
        Self { score, writes: 0 }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u64 {
        self.score
    }

    fn save(&mut self, score: u64) {
        self.score = score;
        self.writes += 1;
    }
}

/// On-disk record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u64,
}

/// JSON file store for native builds
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl HighScoreStore for FileStore {
    fn load(&self) -> u64 {
        let Ok(json) = std::fs::read_to_string(&self.path) else {
            log::info!("No high score at {}, starting fresh", self.path.display());
            return 0;
        };
        match serde_json::from_str::<HighScoreRecord>(&json) {
            Ok(record) => {
                log::info!("Loaded high score {}", record.high_score);
                record.high_score
            }
            Err(e) => {
                log::warn!("Unreadable high score file {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, score: u64) {
        let record = HighScoreRecord { high_score: score };
        let Ok(json) = serde_json::to_string(&record) else {
            return;
        };
        match std::fs::write(&self.path, json) {
            Ok(()) => log::info!("High score saved ({})", score),
            Err(e) => log::warn!("Could not save high score: {}", e),
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::HighScoreStore;

    /// Browser LocalStorage store; the value is a plain decimal string
    #[derive(Debug, Clone, Copy, Default)]
    pub struct LocalStorageStore;

    impl LocalStorageStore {
        const STORAGE_KEY: &'static str = "neurogrid_high_score";

        fn storage() -> Option<web_sys::Storage> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
        }
    }

    impl HighScoreStore for LocalStorageStore {
        fn load(&self) -> u64 {
            let score = Self::storage()
                .and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten())
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(0);
            log::info!("Loaded high score {}", score);
            score
        }

        fn save(&mut self, score: u64) {
            if let Some(storage) = Self::storage() {
                let _ = storage.set_item(Self::STORAGE_KEY, &score.to_string());
                log::info!("High score saved ({})", score);
            }
        }
    }
}
