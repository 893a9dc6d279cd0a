//! Wire types of the character catalog REST API.
//!
//! The catalog answers page and search requests with
//! `{"info": {...}, "results": [...]}` and batch lookups with either a
//! bare array or, when exactly one id was requested, a bare object. This
//! module deserializes those shapes and normalizes raw records into
//! [`Character`]s.

use mortydex_core::types::{Character, CharacterId, Place, UNKNOWN_KIND};
use serde::{Deserialize, Serialize};

/// Name used when a nested origin or location record is missing.
pub const UNKNOWN_PLACE: &str = "unknown";

/// A character record exactly as the catalog sends it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCharacter {
    pub id: CharacterId,
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub species: String,
    /// Nullable and frequently an empty string.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub origin: RawPlace,
    #[serde(default)]
    pub location: RawPlace,
    #[serde(default)]
    pub image: String,
}

/// Nested `{name, url}` record used for origin and location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPlace {
    #[serde(default = "unknown_place")]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

fn unknown_place() -> String {
    UNKNOWN_PLACE.to_string()
}

impl Default for RawPlace {
    fn default() -> Self {
        Self {
            name: unknown_place(),
            url: String::new(),
        }
    }
}

/// Pagination block of a page or search response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub pages: u32,
    /// URL of the next page, `None` on the last page.
    pub next: Option<String>,
    pub prev: Option<String>,
}

/// One page of characters (also the shape of name searches).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharacterPage {
    pub info: PageInfo,
    pub results: Vec<RawCharacter>,
}

impl CharacterPage {
    /// Whether the catalog has a page after this one.
    pub fn has_next(&self) -> bool {
        self.info.next.is_some()
    }
}

/// Body of a multi-id lookup.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BatchResponse {
    Many(Vec<RawCharacter>),
    One(Box<RawCharacter>),
}

impl BatchResponse {
    pub fn into_vec(self) -> Vec<RawCharacter> {
        match self {
            Self::Many(records) => records,
            Self::One(record) => vec![*record],
        }
    }
}

impl RawCharacter {
    /// Normalize into a session [`Character`] with the given liked flag.
    ///
    /// A null or empty `type` becomes [`UNKNOWN_KIND`].
    pub fn into_character(self, liked: bool) -> Character {
        let kind = self
            .kind
            .filter(|k| !k.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_KIND.to_string());

        Character {
            id: self.id,
            name: self.name,
            species: self.species,
            kind,
            image: self.image,
            gender: self.gender,
            status: self.status,
            origin: Place::new(self.origin.name),
            location: Place::new(self.location.name),
            liked,
        }
    }
}

/// Parse a page or search response body.
pub fn parse_page(text: &str) -> Result<CharacterPage, serde_json::Error> {
    serde_json::from_str(text)
}

/// Parse a batch lookup body, accepting both the array and object shapes.
pub fn parse_batch(text: &str) -> Result<Vec<RawCharacter>, serde_json::Error> {
    serde_json::from_str::<BatchResponse>(text).map(BatchResponse::into_vec)
}
