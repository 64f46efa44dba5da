//! Persisted player record: coin balance, unlocked characters, selection
//!
//! Reads happen at session start (and on every `start()`), writes on every
//! mutation. The in-memory copy is authoritative for the session; when the
//! backend fails the write is logged and the value simply isn't persisted.

use std::collections::BTreeSet;

use super::store::KeyValueStore;
use crate::characters::CharacterId;

/// Coin balance key
pub const COINS_KEY: &str = "playerCoins";
/// Selected character key
pub const SELECTED_CHARACTER_KEY: &str = "selectedCharacter";

/// Per-character unlock flag key
pub fn unlock_key(id: CharacterId) -> String {
    format!("unlocked_{}", id.as_str())
}

/// The cross-session record plus the store it lives in
pub struct Profile<S: KeyValueStore> {
    store: S,
    coins: u32,
    unlocked: BTreeSet<CharacterId>,
    selected: CharacterId,
}

impl<S: KeyValueStore> Profile<S> {
    /// Load the record from `store`, defaulting anything missing or unreadable
    pub fn load(store: S) -> Self {
        let mut profile = Self {
            store,
            coins: 0,
            unlocked: BTreeSet::new(),
            selected: CharacterId::Default,
        };
        profile.reload();
        profile
    }

    /// Re-read everything from the store
    pub fn reload(&mut self) {
        self.coins = self.read_coins().unwrap_or(self.coins);

        for id in CharacterId::ALL {
            let unlocked = id.character().is_free()
                || self.read(&unlock_key(id)).as_deref() == Some("true");
            if unlocked {
                self.unlocked.insert(id);
            }
        }

        if let Some(selected) = self
            .read(SELECTED_CHARACTER_KEY)
            .and_then(|s| CharacterId::from_str(&s))
        {
            self.selected = selected;
        }
    }

    /// Re-read only the coin balance (what `start()` needs)
    pub fn reload_coins(&mut self) -> u32 {
        if let Some(coins) = self.read_coins() {
            self.coins = coins;
        }
        self.coins
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    /// Set and persist the coin balance
    pub fn set_coins(&mut self, coins: u32) {
        self.coins = coins;
        self.write(COINS_KEY, &coins.to_string());
    }

    pub fn is_unlocked(&self, id: CharacterId) -> bool {
        self.unlocked.contains(&id)
    }

    /// Mark a character as unlocked and persist the flag
    pub fn unlock(&mut self, id: CharacterId) {
        self.unlocked.insert(id);
        self.write(&unlock_key(id), "true");
    }

    pub fn selected(&self) -> CharacterId {
        self.selected
    }

    /// Equip a character and persist the choice
    pub fn select(&mut self, id: CharacterId) {
        self.selected = id;
        self.write(SELECTED_CHARACTER_KEY, id.as_str());
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn read_coins(&self) -> Option<u32> {
        let raw = self.read(COINS_KEY)?;
        match raw.trim().parse::<u32>() {
            Ok(coins) => Some(coins),
            Err(_) => {
                log::warn!("Ignoring unreadable coin balance {:?}", raw);
                None
            }
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Failed to read {}: {}", key, e);
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            log::warn!("Failed to save {} ({}), keeping it in memory only", key, e);
        }
    }
}
