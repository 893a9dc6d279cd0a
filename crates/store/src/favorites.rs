//! The favorites store: canonical persistence of liked character ids.
//!
//! [`FavoritesStore`] wraps a [`KeyValueStore`] and keeps the complete
//! favorites set under one well-known key as a JSON list of integers.
//! Reads fail soft to an empty set; writes always replace the whole set.
//! Successful writes are announced on a broadcast channel so that other
//! sessions holding a copy of the same characters can re-overlay them.

use std::sync::atomic::{AtomicU64, Ordering};

use mortydex_core::merge::toggle_in_collection;
use mortydex_core::types::{Character, CharacterId, LikedIds};
use serde::de::Error as _;
use tokio::sync::broadcast;

use crate::error::StoreError;
use crate::events::FavoritesChanged;
use crate::kv::KeyValueStore;

/// Storage key under which the liked ids are persisted.
pub const FAVORITES_KEY: &str = "@liked_personagens";

/// Buffer capacity for the change notification channel.
const EVENT_CAPACITY: usize = 64;

// ---------------------------------------------------------------------------
// Toggle policy and outcome
// ---------------------------------------------------------------------------

/// When the in-memory flip of a toggle becomes visible relative to the write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitPolicy {
    /// Apply the flip, then write. A failed write keeps the flip and is
    /// reported through [`ToggleOutcome::persisted`].
    Optimistic,
    /// Write first and apply the flip only once the write succeeded.
    Transactional,
}

/// What a toggle produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// The collection the caller should display from now on.
    pub collection: Vec<Character>,
    /// The full favorites set derived from `collection`.
    pub liked: LikedIds,
    /// The target's new flag, or `None` if it was not in the collection.
    pub now_liked: Option<bool>,
    /// Whether `liked` reached durable storage.
    pub persisted: bool,
}

impl ToggleOutcome {
    /// Whether this toggle removed the target from the favorites.
    pub fn was_unliked(&self) -> bool {
        self.now_liked == Some(false)
    }
}

// ---------------------------------------------------------------------------
// FavoritesStore
// ---------------------------------------------------------------------------

/// Shared, write-through holder of the favorites set.
///
/// Designed to be shared via `Arc<FavoritesStore<S>>` between sessions.
pub struct FavoritesStore<S> {
    backend: S,
    key: String,
    version: AtomicU64,
    events: broadcast::Sender<FavoritesChanged>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Create a store persisting under [`FAVORITES_KEY`].
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, FAVORITES_KEY)
    }

    /// Create a store persisting under a custom key.
    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            backend,
            key: key.into(),
            version: AtomicU64::new(0),
            events,
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Number of successful writes made through this store.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    /// Subscribe to notifications of successful writes.
    pub fn subscribe(&self) -> broadcast::Receiver<FavoritesChanged> {
        self.events.subscribe()
    }

    /// Read the persisted favorites set.
    ///
    /// Never fails: a missing value, a backend error, or an unparseable
    /// value is logged and yields an empty set.
    pub async fn load(&self) -> LikedIds {
        match self.backend.get(&self.key).await {
            Ok(Some(raw)) => match decode_liked(&raw) {
                Ok(liked) => {
                    tracing::debug!(key = %self.key, count = liked.len(), "Favorites loaded");
                    liked
                }
                Err(e) => {
                    tracing::warn!(key = %self.key, error = %e, "Stored favorites are unreadable, starting empty");
                    LikedIds::new()
                }
            },
            Ok(None) => {
                tracing::debug!(key = %self.key, "No favorites stored yet");
                LikedIds::new()
            }
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "Failed to read favorites");
                LikedIds::new()
            }
        }
    }

    /// Persist the complete favorites set, replacing the stored value.
    ///
    /// On success the version is bumped and a [`FavoritesChanged`] event is
    /// published. On failure the error is logged and returned; nothing is
    /// published.
    pub async fn save(&self, liked: &LikedIds) -> Result<(), StoreError> {
        let raw = serde_json::to_string(liked)?;

        if let Err(e) = self.backend.set(&self.key, raw).await {
            tracing::error!(key = %self.key, error = %e, "Failed to save favorites");
            return Err(e);
        }

        let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(key = %self.key, version, count = liked.len(), "Favorites saved");

        // A send error only means nobody is subscribed.
        let _ = self.events.send(FavoritesChanged {
            version,
            liked: liked.clone(),
        });
        Ok(())
    }

    /// Flip `target` in `collection` and persist the recomputed set.
    ///
    /// Under [`CommitPolicy::Optimistic`] this never returns an error; a
    /// failed write shows up as `persisted == false` with the flip applied.
    /// Under [`CommitPolicy::Transactional`] a failed write is returned and
    /// the caller keeps its current collection.
    ///
    /// A target that is not in `collection` changes nothing and writes
    /// nothing.
    pub async fn toggle(
        &self,
        collection: &[Character],
        target: CharacterId,
        policy: CommitPolicy,
    ) -> Result<ToggleOutcome, StoreError> {
        let toggled = toggle_in_collection(collection, target);

        if toggled.now_liked.is_none() {
            tracing::debug!(character_id = target, "Toggle target not in collection");
            return Ok(ToggleOutcome {
                collection: toggled.collection,
                liked: toggled.liked,
                now_liked: None,
                persisted: false,
            });
        }

        let persisted = match policy {
            CommitPolicy::Optimistic => self.save(&toggled.liked).await.is_ok(),
            CommitPolicy::Transactional => {
                self.save(&toggled.liked).await?;
                true
            }
        };

        Ok(ToggleOutcome {
            collection: toggled.collection,
            liked: toggled.liked,
            now_liked: toggled.now_liked,
            persisted,
        })
    }
}

/// Decode a stored JSON list of ids. Duplicates collapse; zero is invalid.
fn decode_liked(raw: &str) -> Result<LikedIds, serde_json::Error> {
    let ids: Vec<CharacterId> = serde_json::from_str(raw)?;
    if ids.contains(&0) {
        return Err(serde_json::Error::custom("character id 0 is not valid"));
    }
    Ok(ids.into_iter().collect())
}
