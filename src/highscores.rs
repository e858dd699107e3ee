//! Best score store
//!
//! One scalar persisted under a single key. Read once at startup, cached,
//! and written back only when a finished session beats it.

use crate::persistence::KeyValueSlot;

/// Best score persisted in a key-value slot
#[derive(Debug, Clone)]
pub struct HighScoreStore<S: KeyValueSlot> {
    slot: S,
    cached: u64,
}

impl<S: KeyValueSlot> HighScoreStore<S> {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "flappy_high_score";

    /// Open the store and cache the persisted best score
    pub fn open(slot: S) -> Self {
        let mut store = Self { slot, cached: 0 };
        store.cached = store.load();
        store
    }

    /// Read the persisted best score (0 if absent or corrupt)
    pub fn load(&self) -> u64 {
        match self.slot.get_item(Self::STORAGE_KEY) {
            Some(raw) => match parse_score(&raw) {
                Some(score) => {
                    log::info!("Loaded high score {}", score);
                    score
                }
                None => {
                    log::warn!("Discarding corrupt high score {:?}", raw);
                    0
                }
            },
            None => {
                log::info!("No high score found, starting fresh");
                0
            }
        }
    }

    /// Persist `value` and cache it
    pub fn save(&mut self, value: u64) {
        self.cached = value;
        match self.slot.set_item(Self::STORAGE_KEY, &value.to_string()) {
            Ok(()) => log::info!("High score saved ({})", value),
            Err(e) => log::warn!("High score not saved: {}", e),
        }
    }

    /// Save `score` if it beats the cached best. Returns true on a new record.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.cached {
            self.save(score);
            true
        } else {
            false
        }
    }

    /// Cached best score
    pub fn best(&self) -> u64 {
        self.cached
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    pub fn into_slot(self) -> S {
        self.slot
    }
}

/// Accepts plain integers and the float text some web builds wrote
fn parse_score(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(score) = raw.parse::<u64>() {
        return Some(score);
    }
    match raw.parse::<f64>() {
        Ok(score) if score.is_finite() && score >= 0.0 => Some(score.floor() as u64),
        _ => None,
    }
}
