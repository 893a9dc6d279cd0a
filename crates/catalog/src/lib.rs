//! Character catalog REST client.
//!
//! Provides the catalog wire types, a [`reqwest`]-based client for the
//! page, search, and batch endpoints, and the [`CatalogSource`] trait the
//! sessions are written against.

pub mod api;
pub mod messages;
pub mod source;

pub use api::{CatalogApi, CatalogApiError, DEFAULT_API_URL};
pub use messages::{CharacterPage, PageInfo, RawCharacter, RawPlace};
pub use source::CatalogSource;
