//! Favorites session: the liked characters, re-resolved on every focus.
//!
//! [`FavoritesSession`] reads the favorites store, resolves the ids through
//! one batched catalog lookup, and refreshes its collection last-seen-wins.
//! Likes are committed transactionally: nothing changes in memory unless
//! the write succeeded.

use std::sync::Arc;

use mortydex_catalog::CatalogSource;
use mortydex_core::error::CoreError;
use mortydex_core::filter::filter_by_name;
use mortydex_core::merge::refresh_by_id;
use mortydex_core::types::{Character, CharacterId};
use mortydex_store::{CommitPolicy, FavoritesStore, KeyValueStore};

use crate::error::SessionResult;
use crate::outcome::LikeChange;
use crate::resolve::resolve_favorites;

/// Lifecycle of the favorites view, re-entered on every focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesState {
    /// Never focused.
    Idle,
    Loading,
    /// At least one favorite is shown.
    Populated,
    /// The store holds no favorites.
    Empty,
    /// Resolving the favorites failed; the previous collection is kept.
    Error(String),
}

pub struct FavoritesSession<C, S> {
    catalog: Arc<C>,
    favorites: Arc<FavoritesStore<S>>,
    collection: Vec<Character>,
    state: FavoritesState,
    query: String,
    selected: Option<CharacterId>,
}

impl<C: CatalogSource, S: KeyValueStore> FavoritesSession<C, S> {
    pub fn new(catalog: Arc<C>, favorites: Arc<FavoritesStore<S>>) -> Self {
        Self {
            catalog,
            favorites,
            collection: Vec::new(),
            state: FavoritesState::Idle,
            query: String::new(),
            selected: None,
        }
    }

    pub fn state(&self) -> &FavoritesState {
        &self.state
    }

    pub fn collection(&self) -> &[Character] {
        &self.collection
    }

    /// The collection filtered by the local query.
    pub fn visible(&self) -> Vec<&Character> {
        filter_by_name(&self.collection, &self.query)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Filter the displayed favorites. No catalog request is made.
    pub fn set_query(&mut self, text: &str) {
        self.query = text.to_string();
    }

    /// Reload the favorites from the store and the catalog.
    ///
    /// Characters no longer in the store are dropped; the rest take the
    /// freshly fetched fields. On a catalog failure the state becomes
    /// [`FavoritesState::Error`] and the collection is left as it was.
    pub async fn focus(&mut self) -> &FavoritesState {
        self.state = FavoritesState::Loading;
        let liked = self.favorites.load().await;

        if liked.is_empty() {
            self.collection.clear();
            self.selected = None;
            self.state = FavoritesState::Empty;
            tracing::info!("No favorites to show");
            return &self.state;
        }

        match resolve_favorites(&liked, self.catalog.as_ref()).await {
            Ok(fresh) => {
                let mut existing = std::mem::take(&mut self.collection);
                existing.retain(|c| liked.contains(&c.id));
                self.collection = refresh_by_id(existing, fresh);

                if let Some(id) = self.selected {
                    if !self.collection.iter().any(|c| c.id == id) {
                        self.selected = None;
                    }
                }

                self.state = if self.collection.is_empty() {
                    FavoritesState::Empty
                } else {
                    FavoritesState::Populated
                };
                tracing::info!(count = self.collection.len(), "Favorites refreshed");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load favorites");
                self.state = FavoritesState::Error(e.to_string());
            }
        }
        &self.state
    }

    /// Like or unlike a shown favorite.
    ///
    /// The set is written before the collection changes; a failed write is
    /// returned and nothing changes. An unliked character stays listed with
    /// its flag cleared until the next [`focus`](Self::focus).
    pub async fn toggle_like(&mut self, id: CharacterId) -> SessionResult<LikeChange> {
        self.position(id)?;

        let outcome = self
            .favorites
            .toggle(&self.collection, id, CommitPolicy::Transactional)
            .await?;

        let closed_detail = outcome.was_unliked() && self.selected == Some(id);
        if closed_detail {
            self.selected = None;
        }

        let change = LikeChange {
            id,
            liked: outcome.now_liked.unwrap_or(false),
            persisted: outcome.persisted,
            closed_detail,
        };
        self.collection = outcome.collection;
        Ok(change)
    }

    pub fn select(&mut self, id: CharacterId) -> SessionResult<&Character> {
        let index = self.position(id)?;
        self.selected = Some(id);
        Ok(&self.collection[index])
    }

    pub fn selected(&self) -> Option<&Character> {
        self.selected
            .and_then(|id| self.collection.iter().find(|c| c.id == id))
    }

    pub fn back(&mut self) {
        self.selected = None;
    }

    fn position(&self, id: CharacterId) -> Result<usize, CoreError> {
        self.collection
            .iter()
            .position(|c| c.id == id)
            .ok_or(CoreError::NotFound {
                entity: "favorite",
                id,
            })
    }
}
