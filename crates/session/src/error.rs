use mortydex_catalog::CatalogApiError;
use mortydex_core::error::CoreError;
use mortydex_store::StoreError;

/// Errors a session operation hands back to its caller.
///
/// Most load failures are logged and absorbed into an outcome value; only
/// invalid requests and transactional write failures surface here.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Favorites store error: {0}")]
    Store(#[from] StoreError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogApiError),
}

pub type SessionResult<T> = Result<T, SessionError>;
