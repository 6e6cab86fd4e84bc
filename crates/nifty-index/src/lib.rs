//! Event-indexing core for the nifty marketplace.
//!
//! This crate is the heart of the indexer. It provides:
//! - Reducers folding decoded marketplace logs into listing and audit rows
//! - An explicit policy for updates that target an unknown listing
//! - Replay over ordered event slices, with effect counters
//! - Stream validation (ordering, duplicate delivery, purchase settlement)
//! - The deployment manifest hosts use to configure a data source
//!
//! The host decodes chain logs into [`MarketEvent`]s and feeds them, in
//! chain order, to [`Indexer::apply`] or [`Indexer::apply_all`] together
//! with the [`EntityStore`] it wants written.
//!
//! [`MarketEvent`]: nifty_types::MarketEvent
//! [`EntityStore`]: nifty_store::EntityStore

pub mod error;
pub mod manifest;
pub mod policy;
pub mod reducer;
pub mod validation;

pub use error::{IndexError, IndexResult};
pub use manifest::{DataSource, IndexingOptions, Manifest};
pub use policy::UpdatePolicy;
pub use reducer::{Effect, Indexer, ReplaySummary};
pub use validation::{StreamValidator, ValidationReport, Violation, ViolationKind};
