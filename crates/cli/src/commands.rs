//! One-shot subcommands: each runs a single operation and prints the result.

use std::io::Write;
use std::sync::Arc;

use mortydex_catalog::CatalogSource;
use mortydex_core::merge::merge_page;
use mortydex_core::types::{CharacterId, LikedIds};
use mortydex_session::{BrowseSession, FavoritesSession, FavoritesState, LoadOutcome};
use mortydex_store::{CommitPolicy, FavoritesStore, KeyValueStore};

use crate::render;

/// Print listing page `number` with favorites marked.
pub async fn page<C, S>(
    catalog: &C,
    store: &FavoritesStore<S>,
    number: u32,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    C: CatalogSource,
    S: KeyValueStore,
{
    let body = catalog.fetch_page(number).await?;
    let liked = store.load().await;
    let has_next = body.has_next();
    let collection = merge_page(
        Vec::new(),
        body.results.into_iter().map(|r| r.into_character(false)),
        &liked,
    );

    let rows: Vec<_> = collection.iter().collect();
    writeln!(out, "{}", render::list(&rows))?;
    if has_next {
        writeln!(out, "(more on page {})", number + 1)?;
    }
    Ok(())
}

/// Print characters whose name contains `name`.
pub async fn search<C, S>(
    catalog: Arc<C>,
    store: Arc<FavoritesStore<S>>,
    name: &str,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    C: CatalogSource,
    S: KeyValueStore,
{
    let mut session = BrowseSession::new(catalog, store);
    match session.set_query(name).await {
        LoadOutcome::Failed => anyhow::bail!("search for '{name}' failed"),
        LoadOutcome::NoMatch => writeln!(out, "No character found")?,
        _ => writeln!(out, "{}", render::list(&session.visible()))?,
    }
    Ok(())
}

/// Print the detail card of character `id`.
pub async fn show<C, S>(
    catalog: &C,
    store: &FavoritesStore<S>,
    id: CharacterId,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    C: CatalogSource,
    S: KeyValueStore,
{
    let liked = store.load().await;
    let records = catalog.fetch_by_ids(&LikedIds::from([id])).await?;
    let Some(record) = records.into_iter().find(|r| r.id == id) else {
        anyhow::bail!("character {id} not found in the catalog");
    };

    let character = record.into_character(liked.contains(&id));
    write!(out, "{}", render::detail(&character))?;
    Ok(())
}

/// Flip the liked state of character `id`.
///
/// The set is recomputed from a collection holding every current favorite
/// plus the target, so liking one character keeps the others.
pub async fn like<C, S>(
    catalog: &C,
    store: &FavoritesStore<S>,
    id: CharacterId,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    C: CatalogSource,
    S: KeyValueStore,
{
    let liked = store.load().await;
    let mut wanted = liked.clone();
    wanted.insert(id);

    let records = catalog.fetch_by_ids(&wanted).await?;
    let collection = merge_page(
        Vec::new(),
        records.into_iter().map(|r| r.into_character(false)),
        &liked,
    );

    let outcome = store
        .toggle(&collection, id, CommitPolicy::Transactional)
        .await?;

    match outcome.now_liked {
        None => anyhow::bail!("character {id} not found in the catalog"),
        Some(now_liked) => {
            let verb = if now_liked { "Liked" } else { "Unliked" };
            writeln!(out, "{verb} character {id} ({} favorites)", outcome.liked.len())?;
        }
    }
    Ok(())
}

/// Print every favorite character.
pub async fn favorites<C, S>(
    catalog: Arc<C>,
    store: Arc<FavoritesStore<S>>,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    C: CatalogSource,
    S: KeyValueStore,
{
    let mut session = FavoritesSession::new(catalog, store);
    match session.focus().await.clone() {
        FavoritesState::Error(message) => anyhow::bail!("could not load favorites: {message}"),
        FavoritesState::Empty => writeln!(out, "No favorites yet")?,
        _ => writeln!(out, "{}", render::list(&session.visible()))?,
    }
    Ok(())
}
