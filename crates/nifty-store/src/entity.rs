use std::fmt;

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use nifty_types::{
    EntityId, EventId, ListingId, ListingUpdated, LogContext, NftBought, NftListed, NftUnlisted,
};

/// One row per actively listed token.
///
/// A `Listing` exists from the moment a token is listed until it is
/// unlisted. It is keyed by [`ListingId`], so relisting the same token
/// overwrites the old row, and every later event for the same `(contract,
/// token)` pair lands on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Deterministic key derived from `(nft_address, nft_id)`.
    pub id: ListingId,
    /// Contract of the listed token.
    pub nft_address: Address,
    /// Token id within the contract.
    pub nft_id: U256,
    /// Current asking price in wei.
    pub price: U256,
    /// Account that owns the listing.
    pub seller: Address,
    /// Block timestamp of the event that created this row.
    pub created_at: u64,
    /// Block timestamp of the event that last mutated this row.
    pub updated_at: u64,
}

impl Listing {
    /// Build the row a fresh `NftListed` log produces.
    ///
    /// `created_at` and `updated_at` both start at the listing block's
    /// timestamp.
    pub fn open(log: &NftListed, context: &LogContext) -> Self {
        Self {
            id: ListingId::derive(log.nft_address, log.nft_id),
            nft_address: log.nft_address,
            nft_id: log.nft_id,
            price: log.price,
            seller: log.seller,
            created_at: context.block_timestamp,
            updated_at: context.block_timestamp,
        }
    }
}

/// Immutable record of one observed `NftListed` log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftListedEvent {
    /// Deterministic key derived from the log's chain coordinates.
    pub id: EventId,
    pub nft_address: Address,
    pub nft_id: U256,
    pub price: U256,
    pub seller: Address,
    pub block_number: u64,
    pub block_timestamp: u64,
    pub transaction_hash: B256,
}

impl NftListedEvent {
    /// Build the audit row for an observed log.
    pub fn from_log(log: &NftListed, context: &LogContext) -> Self {
        Self {
            id: context.event_id(),
            nft_address: log.nft_address,
            nft_id: log.nft_id,
            price: log.price,
            seller: log.seller,
            block_number: context.block_number,
            block_timestamp: context.block_timestamp,
            transaction_hash: context.transaction_hash,
        }
    }
}

/// Immutable record of one observed `ListingUpdated` log.
///
/// Written even when the update targets a listing the store has never seen;
/// the audit trail records what the chain emitted, not what the reducer
/// accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingUpdatedEvent {
    /// Deterministic key derived from the log's chain coordinates.
    pub id: EventId,
    pub nft_address: Address,
    pub nft_id: U256,
    pub price: U256,
    pub seller: Address,
    pub block_number: u64,
    pub block_timestamp: u64,
    pub transaction_hash: B256,
}

impl ListingUpdatedEvent {
    /// Build the audit row for an observed log.
    pub fn from_log(log: &ListingUpdated, context: &LogContext) -> Self {
        Self {
            id: context.event_id(),
            nft_address: log.nft_address,
            nft_id: log.nft_id,
            price: log.price,
            seller: log.seller,
            block_number: context.block_number,
            block_timestamp: context.block_timestamp,
            transaction_hash: context.transaction_hash,
        }
    }
}

/// Immutable record of one observed `NftBought` log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftBoughtEvent {
    /// Deterministic key derived from the log's chain coordinates.
    pub id: EventId,
    pub nft_address: Address,
    pub nft_id: U256,
    pub buyer: Address,
    pub price: U256,
    pub block_number: u64,
    pub block_timestamp: u64,
    pub transaction_hash: B256,
}

impl NftBoughtEvent {
    /// Build the audit row for an observed log.
    pub fn from_log(log: &NftBought, context: &LogContext) -> Self {
        Self {
            id: context.event_id(),
            nft_address: log.nft_address,
            nft_id: log.nft_id,
            buyer: log.buyer,
            price: log.price,
            block_number: context.block_number,
            block_timestamp: context.block_timestamp,
            transaction_hash: context.transaction_hash,
        }
    }
}

/// Immutable record of one observed `NftUnlisted` log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftUnlistedEvent {
    /// Deterministic key derived from the log's chain coordinates.
    pub id: EventId,
    pub nft_address: Address,
    pub nft_id: U256,
    pub block_number: u64,
    pub block_timestamp: u64,
    pub transaction_hash: B256,
}

impl NftUnlistedEvent {
    /// Build the audit row for an observed log.
    pub fn from_log(log: &NftUnlisted, context: &LogContext) -> Self {
        Self {
            id: context.event_id(),
            nft_address: log.nft_address,
            nft_id: log.nft_id,
            block_number: context.block_number,
            block_timestamp: context.block_timestamp,
            transaction_hash: context.transaction_hash,
        }
    }
}

/// Classification of stored rows. One variant per table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Listing,
    NftListedEvent,
    ListingUpdatedEvent,
    NftBoughtEvent,
    NftUnlistedEvent,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Listing => "Listing",
            Self::NftListedEvent => "NftListedEvent",
            Self::ListingUpdatedEvent => "ListingUpdatedEvent",
            Self::NftBoughtEvent => "NftBoughtEvent",
            Self::NftUnlistedEvent => "NftUnlistedEvent",
        };
        write!(f, "{s}")
    }
}

/// Any row the store can hold.
///
/// Every variant carries its own key; [`Entity::kind`] and [`Entity::id`]
/// together address the row. Stores persist these opaquely.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entity {
    Listing(Listing),
    NftListedEvent(NftListedEvent),
    ListingUpdatedEvent(ListingUpdatedEvent),
    NftBoughtEvent(NftBoughtEvent),
    NftUnlistedEvent(NftUnlistedEvent),
}

impl Entity {
    /// Which table this row belongs to.
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Listing(_) => EntityKind::Listing,
            Self::NftListedEvent(_) => EntityKind::NftListedEvent,
            Self::ListingUpdatedEvent(_) => EntityKind::ListingUpdatedEvent,
            Self::NftBoughtEvent(_) => EntityKind::NftBoughtEvent,
            Self::NftUnlistedEvent(_) => EntityKind::NftUnlistedEvent,
        }
    }

    /// The row's key bytes.
    pub fn id(&self) -> EntityId {
        match self {
            Self::Listing(row) => EntityId::from(&row.id),
            Self::NftListedEvent(row) => EntityId::from(&row.id),
            Self::ListingUpdatedEvent(row) => EntityId::from(&row.id),
            Self::NftBoughtEvent(row) => EntityId::from(&row.id),
            Self::NftUnlistedEvent(row) => EntityId::from(&row.id),
        }
    }

    /// Borrow the listing row, if that is what this is.
    pub fn as_listing(&self) -> Option<&Listing> {
        match self {
            Self::Listing(row) => Some(row),
            _ => None,
        }
    }

    /// Take the listing row, if that is what this is.
    pub fn into_listing(self) -> Option<Listing> {
        match self {
            Self::Listing(row) => Some(row),
            _ => None,
        }
    }
}

impl From<Listing> for Entity {
    fn from(row: Listing) -> Self {
        Self::Listing(row)
    }
}

impl From<NftListedEvent> for Entity {
    fn from(row: NftListedEvent) -> Self {
        Self::NftListedEvent(row)
    }
}

impl From<ListingUpdatedEvent> for Entity {
    fn from(row: ListingUpdatedEvent) -> Self {
        Self::ListingUpdatedEvent(row)
    }
}

impl From<NftBoughtEvent> for Entity {
    fn from(row: NftBoughtEvent) -> Self {
        Self::NftBoughtEvent(row)
    }
}

impl From<NftUnlistedEvent> for Entity {
    fn from(row: NftUnlistedEvent) -> Self {
        Self::NftUnlistedEvent(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> LogContext {
        LogContext::new(42, 1_700_000_000, B256::repeat_byte(0xaa), 1)
    }

    fn listed_log() -> NftListed {
        NftListed {
            nft_address: Address::with_last_byte(0x01),
            nft_id: U256::ZERO,
            price: U256::from(100u64),
            seller: Address::with_last_byte(0x02),
        }
    }

    #[test]
    fn open_listing_copies_log_fields() {
        let listing = Listing::open(&listed_log(), &context());
        assert_eq!(listing.id, ListingId::derive(Address::with_last_byte(0x01), U256::ZERO));
        assert_eq!(listing.price, U256::from(100u64));
        assert_eq!(listing.seller, Address::with_last_byte(0x02));
    }

    #[test]
    fn open_listing_starts_with_equal_timestamps() {
        let listing = Listing::open(&listed_log(), &context());
        assert_eq!(listing.created_at, 1_700_000_000);
        assert_eq!(listing.created_at, listing.updated_at);
    }

    #[test]
    fn audit_rows_are_keyed_by_event_id() {
        let ctx = context();
        let row = NftListedEvent::from_log(&listed_log(), &ctx);
        assert_eq!(row.id, ctx.event_id());
        assert_eq!(row.block_number, 42);
        assert_eq!(row.block_timestamp, 1_700_000_000);
        assert_eq!(row.transaction_hash, B256::repeat_byte(0xaa));
    }

    #[test]
    fn bought_row_records_buyer_and_price() {
        let log = NftBought {
            nft_address: Address::with_last_byte(0x01),
            nft_id: U256::ZERO,
            buyer: Address::with_last_byte(0x03),
            price: U256::from(100u64),
        };
        let row = NftBoughtEvent::from_log(&log, &context());
        assert_eq!(row.buyer, Address::with_last_byte(0x03));
        assert_eq!(row.price, U256::from(100u64));
    }

    #[test]
    fn entity_kind_and_id_agree_with_row() {
        let ctx = context();
        let listing = Listing::open(&listed_log(), &ctx);
        let audit = NftUnlistedEvent::from_log(
            &NftUnlisted {
                nft_address: Address::with_last_byte(0x01),
                nft_id: U256::ZERO,
            },
            &ctx,
        );

        let listing_entity = Entity::from(listing.clone());
        assert_eq!(listing_entity.kind(), EntityKind::Listing);
        assert_eq!(listing_entity.id(), EntityId::from(&listing.id));

        let audit_entity = Entity::from(audit.clone());
        assert_eq!(audit_entity.kind(), EntityKind::NftUnlistedEvent);
        assert_eq!(audit_entity.id(), EntityId::from(&audit.id));
    }

    #[test]
    fn listing_accessors_reject_other_kinds() {
        let listing = Entity::from(Listing::open(&listed_log(), &context()));
        assert!(listing.as_listing().is_some());
        assert!(listing.into_listing().is_some());

        let audit = Entity::from(NftListedEvent::from_log(&listed_log(), &context()));
        assert!(audit.as_listing().is_none());
        assert!(audit.into_listing().is_none());
    }

    #[test]
    fn entity_kind_display_names_tables() {
        assert_eq!(format!("{}", EntityKind::Listing), "Listing");
        assert_eq!(format!("{}", EntityKind::NftBoughtEvent), "NftBoughtEvent");
    }

    #[test]
    fn serde_roundtrip() {
        let entity = Entity::from(Listing::open(&listed_log(), &context()));
        let json = serde_json::to_string(&entity).unwrap();
        let parsed: Entity = serde_json::from_str(&json).unwrap();
        assert_eq!(entity, parsed);

        let audit = Entity::from(ListingUpdatedEvent::from_log(
            &ListingUpdated {
                nft_address: Address::with_last_byte(0x01),
                nft_id: U256::ZERO,
                price: U256::from(150u64),
                seller: Address::with_last_byte(0x02),
            },
            &context(),
        ));
        let json = serde_json::to_string(&audit).unwrap();
        let parsed: Entity = serde_json::from_str(&json).unwrap();
        assert_eq!(audit, parsed);
    }
}
