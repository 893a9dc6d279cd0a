//! The catalog seam used by the sessions.
//!
//! [`CatalogSource`] abstracts the three lookups a session needs so that
//! tests can substitute an in-memory catalog for [`CatalogApi`].

use std::future::Future;

use mortydex_core::types::LikedIds;

use crate::api::{CatalogApi, CatalogApiError};
use crate::messages::{CharacterPage, RawCharacter};

/// Trait implemented by every character catalog backend.
pub trait CatalogSource: Send + Sync {
    /// One page of the full listing, numbered from 1.
    fn fetch_page(
        &self,
        page: u32,
    ) -> impl Future<Output = Result<CharacterPage, CatalogApiError>> + Send;

    /// Characters whose name contains `name`. No match is an empty page.
    fn search_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<CharacterPage, CatalogApiError>> + Send;

    /// Every character in `ids`, fetched in a single batch.
    fn fetch_by_ids(
        &self,
        ids: &LikedIds,
    ) -> impl Future<Output = Result<Vec<RawCharacter>, CatalogApiError>> + Send;
}

impl CatalogSource for CatalogApi {
    async fn fetch_page(&self, page: u32) -> Result<CharacterPage, CatalogApiError> {
        CatalogApi::fetch_page(self, page).await
    }

    async fn search_by_name(&self, name: &str) -> Result<CharacterPage, CatalogApiError> {
        CatalogApi::search_by_name(self, name).await
    }

    async fn fetch_by_ids(&self, ids: &LikedIds) -> Result<Vec<RawCharacter>, CatalogApiError> {
        CatalogApi::fetch_by_ids(self, ids).await
    }
}
