use alloy_primitives::{Address, U256};
use thiserror::Error;

use nifty_store::StoreError;
use nifty_types::ListingId;

/// Errors produced while indexing events.
#[derive(Debug, Error)]
pub enum IndexError {
    /// An update event targeted a listing the store has never seen. Raised
    /// under [`UpdatePolicy::Strict`](crate::UpdatePolicy::Strict) only; the
    /// audit row is already written when this surfaces.
    #[error("listing {listing_id} not found for update (nft {nft_address} #{nft_id})")]
    ListingNotFound {
        listing_id: ListingId,
        nft_address: Address,
        nft_id: U256,
    },

    /// The deployment manifest failed to parse or failed a sanity check.
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    /// The store failed underneath a reducer.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result alias for indexing operations.
pub type IndexResult<T> = Result<T, IndexError>;
