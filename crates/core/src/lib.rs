//! Domain types and collection merge rules for mortydex.
//!
//! Everything in this crate is pure: no I/O, no async. The store, catalog
//! and session crates build on these types.

pub mod error;
pub mod filter;
pub mod merge;
pub mod types;
