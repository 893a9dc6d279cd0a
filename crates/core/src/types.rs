//! Domain types shared by every mortydex crate.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Catalog identifiers are positive integers assigned by the remote API.
pub type CharacterId = u32;

/// The persisted set of liked character identifiers.
///
/// Ordered so that serializing it always yields an ascending list.
pub type LikedIds = BTreeSet<CharacterId>;

/// Shown in place of the catalog's `type` field when it is null or empty.
pub const UNKNOWN_KIND: &str = "Unknown";

/// A named record nested in a character (origin, last known location).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
}

impl Place {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// One catalog character as held in a session collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub species: String,
    /// Sub-species or variant, the catalog's `type` field.
    #[serde(rename = "type")]
    pub kind: String,
    /// Avatar image URI.
    pub image: String,
    pub gender: String,
    pub status: String,
    pub origin: Place,
    pub location: Place,
    /// Local-only flag derived from the favorites set.
    #[serde(default)]
    pub liked: bool,
}

/// Parse a user-supplied character identifier.
///
/// The catalog numbers characters from 1, so zero is rejected along with
/// anything that is not an unsigned integer.
pub fn parse_character_id(raw: &str) -> Result<CharacterId, CoreError> {
    match raw.trim().parse::<CharacterId>() {
        Ok(0) | Err(_) => Err(CoreError::Validation(format!(
            "Invalid character id '{}': expected a positive integer",
            raw.trim()
        ))),
        Ok(id) => Ok(id),
    }
}
