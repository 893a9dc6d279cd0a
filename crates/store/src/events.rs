//! Change notifications published by the favorites store.

use mortydex_core::types::LikedIds;
use serde::{Deserialize, Serialize};

/// Broadcast after every successful favorites write.
///
/// `version` increases by one per write made through the same store, so a
/// subscriber can tell whether it has seen the latest set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoritesChanged {
    pub version: u64,
    pub liked: LikedIds,
}
