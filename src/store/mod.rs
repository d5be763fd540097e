//! Durable key/value storage shared by the coin ledger and the front-end.

mod error;
mod memory;
mod models;
mod schema; // Diesel generated schema - internal use only
mod sqlite;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use models::{KvEntry, NewKvEntry};
pub use sqlite::SqliteStore;

/// Key holding the coin balance as a base-10 integer string.
pub const COINS_KEY: &str = "tic-tac-toe-coins";

/// Key holding the dark-mode preference (`"true"` / `"false"`).
pub const THEME_KEY: &str = "dark-mode";

/// A string-keyed store whose values survive across sessions.
pub trait KeyValueStore: std::fmt::Debug {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}
