//! Name filtering applied to a collection before it is displayed.

use crate::types::Character;

/// Characters whose name contains `query`, case-insensitively.
///
/// An empty query matches everything.
pub fn filter_by_name<'a>(collection: &'a [Character], query: &str) -> Vec<&'a Character> {
    let needle = query.trim().to_lowercase();
    collection
        .iter()
        .filter(|c| needle.is_empty() || c.name.to_lowercase().contains(&needle))
        .collect()
}
