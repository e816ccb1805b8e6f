//! High score persistence
//!
//! The session only exposes one scalar to persist. Storage is a port injected
//! into the session constructor: an in-memory fake for tests and native runs,
//! LocalStorage on the web.

/// Where the single best-score scalar lives
pub trait HighScoreStore {
    /// Current record, 0 when nothing was ever stored
    fn load(&self) -> u32;
    /// Persist a new record
    fn save(&mut self, score: u32);
}

/// In-memory store for tests and the native demo
#[derive(Debug, Default)]
pub struct MemoryHighScore {
    score: u32,
}

impl MemoryHighScore {
    pub fn new(score: u32) -> Self {
        Self { score }
    }
}

impl HighScoreStore for MemoryHighScore {
    fn load(&self) -> u32 {
        self.score
    }

    fn save(&mut self, score: u32) {
        self.score = score;
    }
}

/// LocalStorage-backed store (web only). A missing or unparseable entry reads
/// as 0; storage failures are logged and dropped, never fatal.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorageHighScore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageHighScore {
    const STORAGE_KEY: &'static str = "tiltball_highscore";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageHighScore {
    fn load(&self) -> u32 {
        Self::storage()
            .and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    fn save(&mut self, score: u32) {
        if let Some(storage) = Self::storage() {
            if storage
                .set_item(Self::STORAGE_KEY, &score.to_string())
                .is_err()
            {
                log::warn!("failed to persist high score");
            }
        } else {
            log::warn!("LocalStorage unavailable, high score not persisted");
        }
    }
}
