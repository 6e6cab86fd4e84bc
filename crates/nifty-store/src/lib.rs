//! Entity rows and the storage boundary for the nifty marketplace indexer.
//!
//! The reducers in `nifty-index` never touch a database directly. They write
//! typed rows through the [`EntityStore`] trait defined here, and the host
//! decides what actually backs it. Row keys come from `nifty-types`: listings
//! are keyed by listing id, audit rows by event id.
//!
//! # Row Types
//!
//! - [`Listing`] -- one row per actively listed token; mutated in place and
//!   removed on unlist
//! - [`NftListedEvent`], [`ListingUpdatedEvent`], [`NftBoughtEvent`],
//!   [`NftUnlistedEvent`] -- append-only audit rows, one per observed log
//!
//! # Storage Backends
//!
//! All backends implement the [`EntityStore`] trait:
//!
//! - [`InMemoryEntityStore`] -- table-per-kind store for tests and replays
//!
//! # Design Rules
//!
//! 1. `save` is an upsert: the latest row for `(kind, id)` wins.
//! 2. `load` of a missing row is `Ok(None)`, never an error.
//! 3. Removing an absent row is `Ok(false)`, not an error.
//! 4. Rows with empty ids are rejected before they reach a backend.
//! 5. The store never interprets rows beyond `(kind, id)`.
//! 6. All I/O errors are propagated, never silently ignored.

pub mod entity;
pub mod error;
pub mod memory;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use entity::{
    Entity, EntityKind, Listing, ListingUpdatedEvent, NftBoughtEvent, NftListedEvent,
    NftUnlistedEvent,
};
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryEntityStore;
pub use traits::EntityStore;
