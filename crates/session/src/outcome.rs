//! Result values reported by session operations.

use mortydex_core::types::CharacterId;

/// What a listing or search load did to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Characters were fetched; `added` of them were new to the collection.
    Loaded { added: usize },
    /// A search ran and matched nothing.
    NoMatch,
    /// The listing has no further pages.
    Exhausted,
    /// Listing pagination is paused while a search query is active.
    Searching,
    /// The fetch failed; the collection was left as it was.
    Failed,
}

/// Report of a like/unlike action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeChange {
    pub id: CharacterId,
    /// The character's flag after the toggle.
    pub liked: bool,
    /// Whether the new favorites set reached durable storage.
    pub persisted: bool,
    /// Whether the detail view of this character was closed in response.
    pub closed_detail: bool,
}
