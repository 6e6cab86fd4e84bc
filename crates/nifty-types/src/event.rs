use std::fmt;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::context::LogContext;
use crate::id::{EventId, ListingId};

/// Decoded `NftListed` log: a seller put a token up for sale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftListed {
    /// Contract of the listed token.
    pub nft_address: Address,
    /// Token id within the contract.
    pub nft_id: U256,
    /// Asking price in wei.
    pub price: U256,
    /// Account that created the listing.
    pub seller: Address,
}

/// Decoded `ListingUpdated` log: the seller changed the terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingUpdated {
    /// Contract of the listed token.
    pub nft_address: Address,
    /// Token id within the contract.
    pub nft_id: U256,
    /// New asking price in wei.
    pub price: U256,
    /// Account that owns the listing after the update.
    pub seller: Address,
}

/// Decoded `NftBought` log: a buyer settled a listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftBought {
    /// Contract of the purchased token.
    pub nft_address: Address,
    /// Token id within the contract.
    pub nft_id: U256,
    /// Account that paid for the token.
    pub buyer: Address,
    /// Settlement price in wei.
    pub price: U256,
}

/// Decoded `NftUnlisted` log: the listing was withdrawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftUnlisted {
    /// Contract of the withdrawn token.
    pub nft_address: Address,
    /// Token id within the contract.
    pub nft_id: U256,
}

/// Classification of marketplace events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A token was put up for sale.
    Listed,
    /// An existing listing's terms changed.
    Updated,
    /// A listing was settled by a purchase.
    Bought,
    /// A listing was withdrawn by its seller.
    Unlisted,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Listed => "NftListed",
            Self::Updated => "ListingUpdated",
            Self::Bought => "NftBought",
            Self::Unlisted => "NftUnlisted",
        };
        write!(f, "{s}")
    }
}

/// Payload carried by a marketplace event, one variant per log signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventPayload {
    Listed(NftListed),
    Updated(ListingUpdated),
    Bought(NftBought),
    Unlisted(NftUnlisted),
}

impl EventPayload {
    /// Classification of this payload.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Listed(_) => EventKind::Listed,
            Self::Updated(_) => EventKind::Updated,
            Self::Bought(_) => EventKind::Bought,
            Self::Unlisted(_) => EventKind::Unlisted,
        }
    }

    /// Contract address of the token the event concerns.
    pub fn nft_address(&self) -> Address {
        match self {
            Self::Listed(p) => p.nft_address,
            Self::Updated(p) => p.nft_address,
            Self::Bought(p) => p.nft_address,
            Self::Unlisted(p) => p.nft_address,
        }
    }

    /// Token id the event concerns.
    pub fn nft_id(&self) -> U256 {
        match self {
            Self::Listed(p) => p.nft_id,
            Self::Updated(p) => p.nft_id,
            Self::Bought(p) => p.nft_id,
            Self::Unlisted(p) => p.nft_id,
        }
    }
}

/// A decoded marketplace log ready for the reducers.
///
/// Pairs the chain coordinates the host observed with the decoded payload.
/// Everything the reducers write derives from these two parts; no other
/// input reaches the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketEvent {
    /// Where the log was observed.
    pub context: LogContext,
    /// What the log said.
    pub payload: EventPayload,
}

impl MarketEvent {
    pub fn new(context: LogContext, payload: EventPayload) -> Self {
        Self { context, payload }
    }

    /// Build a `Listed` event.
    pub fn listed(
        context: LogContext,
        nft_address: Address,
        nft_id: U256,
        price: U256,
        seller: Address,
    ) -> Self {
        Self::new(
            context,
            EventPayload::Listed(NftListed {
                nft_address,
                nft_id,
                price,
                seller,
            }),
        )
    }

    /// Build an `Updated` event.
    pub fn updated(
        context: LogContext,
        nft_address: Address,
        nft_id: U256,
        price: U256,
        seller: Address,
    ) -> Self {
        Self::new(
            context,
            EventPayload::Updated(ListingUpdated {
                nft_address,
                nft_id,
                price,
                seller,
            }),
        )
    }

    /// Build a `Bought` event.
    pub fn bought(
        context: LogContext,
        nft_address: Address,
        nft_id: U256,
        buyer: Address,
        price: U256,
    ) -> Self {
        Self::new(
            context,
            EventPayload::Bought(NftBought {
                nft_address,
                nft_id,
                buyer,
                price,
            }),
        )
    }

    /// Build an `Unlisted` event.
    pub fn unlisted(context: LogContext, nft_address: Address, nft_id: U256) -> Self {
        Self::new(
            context,
            EventPayload::Unlisted(NftUnlisted { nft_address, nft_id }),
        )
    }

    /// Classification of this event.
    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }

    /// Identifier of this event, derived from its chain coordinates.
    pub fn event_id(&self) -> EventId {
        self.context.event_id()
    }

    /// Identifier of the listing this event targets.
    pub fn listing_id(&self) -> ListingId {
        ListingId::derive(self.payload.nft_address(), self.payload.nft_id())
    }
}
