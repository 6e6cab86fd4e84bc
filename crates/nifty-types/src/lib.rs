//! Foundation types for the nifty marketplace indexer.
//!
//! This crate provides the identifier, coordinate, and event types used
//! throughout the indexer. Every other nifty crate depends on `nifty-types`.
//!
//! # Key Types
//!
//! - [`EventId`]: transaction hash plus big-endian log index, naming one observed log
//! - [`ListingId`]: UTF-8 `"{contract}-{token}"` key shared by every event touching a listing
//! - [`EntityId`]: untyped key bytes as the store sees them
//! - [`LogContext`]: chain coordinates the host attaches to each decoded log
//! - [`MarketEvent`]: a decoded marketplace log ready for the reducers
//! - [`TypeError`]: errors produced by type operations

pub mod context;
pub mod error;
pub mod event;
pub mod id;

pub use context::LogContext;
pub use error::TypeError;
pub use event::{
    EventKind, EventPayload, ListingUpdated, MarketEvent, NftBought, NftListed, NftUnlisted,
};
pub use id::{EntityId, EventId, ListingId};
