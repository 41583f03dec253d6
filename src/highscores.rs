//! High score tracking
//!
//! A single best-run score, persisted through the host's key/value store.
//! Storage failures are never fatal: the score is still tracked for the
//! session, it just will not survive a restart.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// Best-run score
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    best: u64,
}

impl HighScores {
    /// Storage key in the host's key/value store
    const STORAGE_KEY: &'static str = "cloud_hopper_highscore";

    pub fn new() -> Self {
        Self { best: 0 }
    }

    /// Best score so far, if any run has scored
    pub fn best(&self) -> Option<u64> {
        (self.best > 0).then_some(self.best)
    }

    /// Check if a score beats the stored best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished run. Returns true when it became the new best.
    pub fn record(&mut self, score: u64, store: &mut dyn KeyValueStore) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        self.save(store);
        true
    }

    pub fn load(store: &dyn KeyValueStore) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(scores) => {
                    log::info!("loaded high score");
                    return scores;
                }
                Err(err) => log::warn!("high score entry unreadable, starting fresh: {err}"),
            }
        } else {
            log::info!("no high score found, starting fresh");
        }
        Self::new()
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        if let Ok(json) = serde_json::to_string(self) {
            if !store.set(Self::STORAGE_KEY, &json) {
                log::warn!("high score not persisted; keeping it for this session");
            }
        }
    }
}
