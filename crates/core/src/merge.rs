//! Collection merge rules shared by the browse and favorites sessions.
//!
//! A session collection is an ordered, identifier-deduplicated cache of
//! [`Character`]s whose `liked` flags mirror the favorites set at the time
//! the collection was last reconciled. Two merge policies exist:
//!
//! - [`merge_page`] is first-seen-wins and is used for paginated and
//!   searched results.
//! - [`refresh_by_id`] is last-seen-wins and is used when the favorites
//!   session re-fetches every liked character on focus.

use std::collections::{HashMap, HashSet};

use crate::types::{Character, CharacterId, LikedIds};

/* --------------------------------------------------------------------------
Merging
-------------------------------------------------------------------------- */

/// Append a freshly fetched batch to an existing collection.
///
/// Every incoming character gets its `liked` flag from `liked`. Characters
/// whose identifier is already present (in `existing` or earlier in the same
/// batch) are dropped without touching the entry that was seen first.
/// The relative order of both inputs is preserved.
pub fn merge_page(
    mut existing: Vec<Character>,
    incoming: impl IntoIterator<Item = Character>,
    liked: &LikedIds,
) -> Vec<Character> {
    let mut seen: HashSet<CharacterId> = existing.iter().map(|c| c.id).collect();

    for mut character in incoming {
        if !seen.insert(character.id) {
            continue;
        }
        character.liked = liked.contains(&character.id);
        existing.push(character);
    }

    existing
}

/// Build a fresh collection from search results, dropping repeated ids.
///
/// Equivalent to merging into an empty collection; the caller replaces its
/// collection with the result instead of extending it.
pub fn dedup_overlay(
    incoming: impl IntoIterator<Item = Character>,
    liked: &LikedIds,
) -> Vec<Character> {
    merge_page(Vec::new(), incoming, liked)
}

/// Replace cached entries with freshly fetched ones, keyed by identifier.
///
/// Existing entries keep their position but take the fresh record's fields.
/// Fresh records with unseen identifiers are appended in fetch order.
pub fn refresh_by_id(
    mut existing: Vec<Character>,
    fresh: impl IntoIterator<Item = Character>,
) -> Vec<Character> {
    let mut positions: HashMap<CharacterId, usize> = existing
        .iter()
        .enumerate()
        .map(|(index, c)| (c.id, index))
        .collect();

    for character in fresh {
        match positions.get(&character.id) {
            Some(&index) => existing[index] = character,
            None => {
                positions.insert(character.id, existing.len());
                existing.push(character);
            }
        }
    }

    existing
}

/* --------------------------------------------------------------------------
Favorites overlay
-------------------------------------------------------------------------- */

/// Re-derive every `liked` flag from set membership.
pub fn overlay_favorites(mut collection: Vec<Character>, liked: &LikedIds) -> Vec<Character> {
    for character in &mut collection {
        character.liked = liked.contains(&character.id);
    }
    collection
}

/// Collect the identifiers of every liked character in `collection`.
pub fn liked_ids_of(collection: &[Character]) -> LikedIds {
    collection
        .iter()
        .filter(|c| c.liked)
        .map(|c| c.id)
        .collect()
}

/* --------------------------------------------------------------------------
Toggling
-------------------------------------------------------------------------- */

/// Result of flipping one character's liked flag in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggled {
    /// The collection with the target's flag flipped.
    pub collection: Vec<Character>,
    /// The complete favorites set recomputed from `collection`.
    pub liked: LikedIds,
    /// The target's new flag, or `None` if it was not in the collection.
    pub now_liked: Option<bool>,
}

impl Toggled {
    /// Whether this toggle removed the target from the favorites.
    pub fn was_unliked(&self) -> bool {
        self.now_liked == Some(false)
    }
}

/// Flip the liked flag of `target` and recompute the full favorites set.
///
/// The set is rebuilt from the collection rather than patched, so the
/// collection is the staging area for the next full-set write.
pub fn toggle_in_collection(collection: &[Character], target: CharacterId) -> Toggled {
    let mut now_liked = None;
    let collection: Vec<Character> = collection
        .iter()
        .map(|c| {
            let mut c = c.clone();
            if c.id == target {
                c.liked = !c.liked;
                now_liked = Some(c.liked);
            }
            c
        })
        .collect();
    let liked = liked_ids_of(&collection);

    Toggled {
        collection,
        liked,
        now_liked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::character;

    fn ids(collection: &[Character]) -> Vec<CharacterId> {
        collection.iter().map(|c| c.id).collect()
    }

    fn set(ids: &[CharacterId]) -> LikedIds {
        ids.iter().copied().collect()
    }

    #[test]
    fn merge_disjoint_appends_in_order() {
        let existing = vec![character(1, "Rick"), character(2, "Morty")];
        let incoming = vec![character(3, "Summer"), character(4, "Beth")];

        let merged = merge_page(existing, incoming, &LikedIds::new());

        assert_eq!(merged.len(), 4);
        assert_eq!(ids(&merged), vec![1, 2, 3, 4]);
    }

    #[test]
    fn merge_overlapping_keeps_first_seen() {
        let existing = vec![character(1, "Rick")];
        let mut stale = character(1, "Rick Prime");
        stale.status = "Dead".into();
        let incoming = vec![stale, character(2, "Morty")];

        let merged = merge_page(existing, incoming, &set(&[1]));

        assert_eq!(ids(&merged), vec![1, 2]);
        assert_eq!(merged[0].name, "Rick");
        assert_eq!(merged[0].status, "Alive");
        // Existing entries are not re-overlaid either.
        assert!(!merged[0].liked);
    }

    #[test]
    fn merge_drops_duplicates_within_batch() {
        let incoming = vec![character(5, "Jerry"), character(5, "Jerry again")];
        let merged = merge_page(Vec::new(), incoming, &LikedIds::new());
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "Jerry");
    }

    #[test]
    fn merge_overlays_liked_on_incoming() {
        let incoming = vec![character(1, "Rick"), character(2, "Morty")];
        let merged = merge_page(Vec::new(), incoming, &set(&[2]));
        assert!(!merged[0].liked);
        assert!(merged[1].liked);
    }

    #[test]
    fn merge_empty_incoming_returns_existing() {
        let existing = vec![character(1, "Rick"), character(2, "Morty")];
        let merged = merge_page(existing.clone(), Vec::new(), &set(&[1, 2]));
        assert_eq!(merged, existing);
    }

    #[test]
    fn dedup_overlay_starts_from_empty() {
        let results = vec![character(8, "Rick"), character(8, "Rick"), character(9, "Doofus Rick")];
        let collection = dedup_overlay(results, &set(&[9]));
        assert_eq!(ids(&collection), vec![8, 9]);
        assert!(collection[1].liked);
    }

    #[test]
    fn refresh_replaces_fields_in_place() {
        let existing = vec![character(1, "Rick"), character(2, "Morty")];
        let mut fresh_rick = character(1, "Rick");
        fresh_rick.location.name = "Earth (Replacement Dimension)".into();

        let refreshed = refresh_by_id(existing, vec![character(3, "Summer"), fresh_rick]);

        assert_eq!(ids(&refreshed), vec![1, 2, 3]);
        assert_eq!(refreshed[0].location.name, "Earth (Replacement Dimension)");
    }

    #[test]
    fn overlay_sets_flags_from_membership() {
        let mut liked_rick = character(1, "Rick");
        liked_rick.liked = true;
        let collection = vec![liked_rick, character(2, "Morty")];

        let overlaid = overlay_favorites(collection, &set(&[2]));

        assert!(!overlaid[0].liked);
        assert!(overlaid[1].liked);
        assert_eq!(overlaid[0].name, "Rick");
    }

    #[test]
    fn overlay_is_idempotent() {
        let collection = vec![character(1, "Rick"), character(2, "Morty"), character(3, "Summer")];
        let liked = set(&[1, 3]);

        let once = overlay_favorites(collection, &liked);
        let twice = overlay_favorites(once.clone(), &liked);

        assert_eq!(once, twice);
    }

    #[test]
    fn toggle_likes_and_recomputes_set() {
        let collection = vec![character(1, "Rick")];

        let toggled = toggle_in_collection(&collection, 1);

        assert!(toggled.collection[0].liked);
        assert_eq!(toggled.liked, set(&[1]));
        assert_eq!(toggled.now_liked, Some(true));
        assert!(!toggled.was_unliked());
    }

    #[test]
    fn toggle_twice_restores_original() {
        let mut summer = character(3, "Summer");
        summer.liked = true;
        let collection = vec![character(1, "Rick"), character(2, "Morty"), summer];
        let original_set = liked_ids_of(&collection);

        let first = toggle_in_collection(&collection, 2);
        let second = toggle_in_collection(&first.collection, 2);

        assert_eq!(second.collection, collection);
        assert_eq!(second.liked, original_set);
        assert!(second.was_unliked());
    }

    #[test]
    fn toggle_unknown_target_changes_nothing() {
        let mut rick = character(1, "Rick");
        rick.liked = true;
        let collection = vec![rick];

        let toggled = toggle_in_collection(&collection, 99);

        assert_eq!(toggled.collection, collection);
        assert_eq!(toggled.liked, set(&[1]));
        assert_eq!(toggled.now_liked, None);
    }
}
