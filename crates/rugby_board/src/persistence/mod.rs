// Save/Load for the tactics board
// One JSON snapshot under a fixed key in a key-value store

pub mod adapter;
pub mod error;
pub mod snapshot;
pub mod store;

pub use adapter::PersistenceAdapter;
pub use error::PersistError;
pub use snapshot::{BoardSnapshot, PieceRole, PieceState};
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Durable-storage key of the single saved board.
pub const STORAGE_KEY: &str = "rugby-u12-state";
