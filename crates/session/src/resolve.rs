//! Favorites resolution: liked ids to full character records.

use mortydex_catalog::{CatalogApiError, CatalogSource};
use mortydex_core::types::{Character, LikedIds};

/// Fetch every liked character in one batched lookup.
///
/// An empty set resolves to an empty list without calling the catalog.
/// Every result is liked by definition; order follows the catalog's reply.
pub async fn resolve_favorites<C: CatalogSource>(
    liked: &LikedIds,
    catalog: &C,
) -> Result<Vec<Character>, CatalogApiError> {
    if liked.is_empty() {
        return Ok(Vec::new());
    }

    let records = catalog.fetch_by_ids(liked).await?;
    tracing::debug!(
        requested = liked.len(),
        resolved = records.len(),
        "Resolved favorites"
    );
    Ok(records
        .into_iter()
        .map(|record| record.into_character(true))
        .collect())
}
