//! Cross-session persistence
//!
//! Features:
//! - Minimal key-value store contract (`KeyValueStore`)
//! - In-memory store for native runs and tests
//! - LocalStorage-backed store in the browser
//! - Best-effort `Profile` record: failures are logged, never raised

pub mod profile;
pub mod store;

pub use profile::{COINS_KEY, Profile, SELECTED_CHARACTER_KEY, unlock_key};
pub use store::{KeyValueStore, MemoryStore, StorageError};

#[cfg(target_arch = "wasm32")]
pub use store::LocalStorageStore;
