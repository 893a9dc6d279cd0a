//! Durable key-value persistence interface.
//!
//! Defines [`KeyValueStore`], the seam between the favorites store and the
//! platform storage it writes through. Values are opaque strings; callers
//! own their encoding.

use std::future::Future;

use crate::error::StoreError;

/// Trait implemented by every persistence backend (memory, file).
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing was written.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Store `value` under `key`, replacing any previous value entirely.
    fn set(&self, key: &str, value: String) -> impl Future<Output = Result<(), StoreError>> + Send;
}
