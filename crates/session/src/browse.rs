//! Browse session: paginated listing and name search.
//!
//! [`BrowseSession`] owns the collection shown by the browse view. Listing
//! pages are appended with first-seen-wins merging; a search replaces the
//! collection outright. Likes are committed optimistically: the flip is
//! shown immediately and a failed write is reported, not rolled back.

use std::sync::Arc;

use mortydex_catalog::CatalogSource;
use mortydex_core::error::CoreError;
use mortydex_core::filter::filter_by_name;
use mortydex_core::merge::{dedup_overlay, merge_page, overlay_favorites};
use mortydex_core::types::{Character, CharacterId, LikedIds};
use mortydex_store::{CommitPolicy, FavoritesChanged, FavoritesStore, KeyValueStore};

use crate::error::SessionResult;
use crate::outcome::{LikeChange, LoadOutcome};

/// First page number of the catalog listing.
const FIRST_PAGE: u32 = 1;

pub struct BrowseSession<C, S> {
    catalog: Arc<C>,
    favorites: Arc<FavoritesStore<S>>,
    collection: Vec<Character>,
    /// Page to request on the next [`load_next_page`](Self::load_next_page).
    next_page: u32,
    has_more: bool,
    query: String,
    search_empty: bool,
    selected: Option<CharacterId>,
}

impl<C: CatalogSource, S: KeyValueStore> BrowseSession<C, S> {
    pub fn new(catalog: Arc<C>, favorites: Arc<FavoritesStore<S>>) -> Self {
        Self {
            catalog,
            favorites,
            collection: Vec::new(),
            next_page: FIRST_PAGE,
            has_more: true,
            query: String::new(),
            search_empty: false,
            selected: None,
        }
    }

    // ---- accessors ----

    /// The whole collection, unfiltered.
    pub fn collection(&self) -> &[Character] {
        &self.collection
    }

    /// The collection filtered by the current query, as displayed.
    pub fn visible(&self) -> Vec<&Character> {
        filter_by_name(&self.collection, &self.query)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    /// Whether the last search matched nothing.
    pub fn is_search_empty(&self) -> bool {
        self.search_empty
    }

    fn is_searching(&self) -> bool {
        !self.query.trim().is_empty()
    }

    // ---- loading ----

    /// Fetch the next listing page and append its new characters.
    ///
    /// Does nothing once the listing is exhausted or while a search is
    /// active. A failed fetch is logged, leaves the collection unchanged,
    /// and does not advance the page counter.
    pub async fn load_next_page(&mut self) -> LoadOutcome {
        if self.is_searching() {
            return LoadOutcome::Searching;
        }
        if !self.has_more {
            return LoadOutcome::Exhausted;
        }

        let page = self.next_page;
        let body = match self.catalog.fetch_page(page).await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(page, error = %e, "Failed to load catalog page");
                return LoadOutcome::Failed;
            }
        };

        let liked = self.favorites.load().await;
        let has_next = body.has_next();
        let before = self.collection.len();
        let incoming = body.results.into_iter().map(|r| r.into_character(false));

        self.collection = merge_page(std::mem::take(&mut self.collection), incoming, &liked);
        self.has_more = has_next;
        self.next_page = page + 1;

        let added = self.collection.len() - before;
        tracing::info!(page, added, has_more = self.has_more, "Loaded catalog page");
        LoadOutcome::Loaded { added }
    }

    /// Change the search text.
    ///
    /// A non-empty query replaces the collection with the catalog's search
    /// results. An empty query resets pagination and replaces the
    /// collection with a fresh first page. Neither case merges with what
    /// was shown before.
    pub async fn set_query(&mut self, text: &str) -> LoadOutcome {
        self.query = text.to_string();
        self.search_empty = false;

        if !self.is_searching() {
            self.collection.clear();
            self.next_page = FIRST_PAGE;
            self.has_more = true;
            return self.load_next_page().await;
        }

        let query = self.query.trim().to_string();
        match self.catalog.search_by_name(&query).await {
            Ok(page) => {
                let liked = self.favorites.load().await;
                let results = page.results.into_iter().map(|r| r.into_character(false));
                self.collection = dedup_overlay(results, &liked);
                self.search_empty = self.collection.is_empty();
                tracing::info!(query = %query, count = self.collection.len(), "Search completed");

                if self.search_empty {
                    LoadOutcome::NoMatch
                } else {
                    LoadOutcome::Loaded {
                        added: self.collection.len(),
                    }
                }
            }
            Err(e) => {
                tracing::error!(query = %query, error = %e, "Search failed");
                self.collection.clear();
                LoadOutcome::Failed
            }
        }
    }

    // ---- favorites ----

    /// Like or unlike a character in the collection.
    ///
    /// The flip is applied even if the write fails; check
    /// [`LikeChange::persisted`]. Unliking the character whose detail is
    /// open closes the detail.
    pub async fn toggle_like(&mut self, id: CharacterId) -> SessionResult<LikeChange> {
        self.position(id)?;

        let outcome = self
            .favorites
            .toggle(&self.collection, id, CommitPolicy::Optimistic)
            .await?;

        let closed_detail = outcome.was_unliked() && self.selected == Some(id);
        if closed_detail {
            self.selected = None;
        }
        if !outcome.persisted {
            tracing::warn!(character_id = id, "Favorite change shown but not saved");
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

    /// Re-read the favorites store and re-derive every liked flag.
    pub async fn reconcile(&mut self) -> LikedIds {
        let liked = self.favorites.load().await;
        self.apply_liked(&liked);
        liked
    }

    /// Re-overlay the collection from a change published by the store.
    pub fn apply_change(&mut self, change: &FavoritesChanged) {
        self.apply_liked(&change.liked);
    }

    fn apply_liked(&mut self, liked: &LikedIds) {
        self.collection = overlay_favorites(std::mem::take(&mut self.collection), liked);
    }

    // ---- detail navigation ----

    /// Open the detail view of a character in the collection.
    pub fn select(&mut self, id: CharacterId) -> SessionResult<&Character> {
        let index = self.position(id)?;
        self.selected = Some(id);
        Ok(&self.collection[index])
    }

    /// The character whose detail is open, if any.
    pub fn selected(&self) -> Option<&Character> {
        self.selected.and_then(|id| self.find(id))
    }

    /// Close the detail view.
    pub fn back(&mut self) {
        self.selected = None;
    }

    fn find(&self, id: CharacterId) -> Option<&Character> {
        self.collection.iter().find(|c| c.id == id)
    }

    fn position(&self, id: CharacterId) -> Result<usize, CoreError> {
        self.collection
            .iter()
            .position(|c| c.id == id)
            .ok_or(CoreError::NotFound {
                entity: "character",
                id,
            })
    }
}
