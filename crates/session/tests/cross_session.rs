//! Consistency between the browse and favorites sessions sharing one
//! favorites store.

mod common;

use std::sync::Arc;

use mortydex_core::types::LikedIds;
use mortydex_session::{BrowseSession, FavoritesSession, FavoritesState};

use common::{store_with, two_page_catalog};

#[tokio::test]
async fn like_in_browse_shows_up_on_favorites_focus() {
    let catalog = Arc::new(two_page_catalog());
    let store = store_with(None);
    let mut browse = BrowseSession::new(catalog.clone(), store.clone());
    let mut favorites = FavoritesSession::new(catalog, store);

    browse.load_next_page().await;
    browse.toggle_like(2).await.unwrap();
    browse.toggle_like(3).await.unwrap();

    assert_eq!(favorites.focus().await, &FavoritesState::Populated);
    let ids: Vec<u32> = favorites.collection().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[tokio::test]
async fn unlike_in_favorites_reaches_browse_through_change_event() {
    let catalog = Arc::new(two_page_catalog());
    let store = store_with(Some("[1,2]"));
    let mut browse = BrowseSession::new(catalog.clone(), store.clone());
    let mut favorites = FavoritesSession::new(catalog, store.clone());
    let mut changes = store.subscribe();

    browse.load_next_page().await;
    assert!(browse.collection()[0].liked);

    favorites.focus().await;
    favorites.toggle_like(1).await.unwrap();

    let change = changes.recv().await.unwrap();
    assert_eq!(change.liked, LikedIds::from([2]));
    browse.apply_change(&change);

    assert!(!browse.collection()[0].liked);
    assert!(browse.collection()[1].liked);
}

#[tokio::test]
async fn last_write_replaces_whole_set() {
    let catalog = Arc::new(two_page_catalog());
    let store = store_with(Some("[4]"));
    let mut browse = BrowseSession::new(catalog.clone(), store.clone());
    let mut favorites = FavoritesSession::new(catalog, store.clone());

    // Favorites shows 4; browse only holds page 1, where 4 is absent.
    favorites.focus().await;
    browse.load_next_page().await;
    browse.toggle_like(1).await.unwrap();

    // The browse write was computed from its own collection.
    assert_eq!(store.load().await, LikedIds::from([1]));

    favorites.focus().await;
    let ids: Vec<u32> = favorites.collection().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1]);
    assert_eq!(store.version(), 1);
}
