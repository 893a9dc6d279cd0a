//! Durable storage for the mortydex favorites set.
//!
//! - [`KeyValueStore`]: async key-value persistence seam.
//! - [`MemoryStore`] / [`FileStore`]: in-process and on-disk backends.
//! - [`FavoritesStore`]: the favorites set under one well-known key, with
//!   change notifications.

pub mod error;
pub mod events;
pub mod favorites;
pub mod file;
pub mod kv;
pub mod memory;

pub use error::StoreError;
pub use events::FavoritesChanged;
pub use favorites::{CommitPolicy, FavoritesStore, ToggleOutcome, FAVORITES_KEY};
pub use file::FileStore;
pub use kv::KeyValueStore;
pub use memory::MemoryStore;
