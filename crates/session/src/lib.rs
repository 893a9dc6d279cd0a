//! Session state holders for the browse and favorites views.
//!
//! Each session keeps its own in-memory collection of characters, projected
//! from the catalog and the shared [`FavoritesStore`](mortydex_store::FavoritesStore).
//! The store is the source of truth for liked flags; sessions re-derive
//! them whenever they load or reconcile.

pub mod browse;
pub mod error;
pub mod favorites;
pub mod outcome;
pub mod resolve;

pub use browse::BrowseSession;
pub use error::{SessionError, SessionResult};
pub use favorites::{FavoritesSession, FavoritesState};
pub use outcome::{LikeChange, LoadOutcome};
pub use resolve::resolve_favorites;
