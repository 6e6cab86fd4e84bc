use nifty_types::{EntityId, ListingId};

use crate::entity::{Entity, EntityKind, Listing};
use crate::error::{StoreError, StoreResult};

/// Keyed entity store the reducers write through.
///
/// All implementations must satisfy these invariants:
/// - `save` is an upsert: a row with the same `(kind, id)` replaces the
///   previous row completely. Saving is how both creation and mutation
///   reach the store.
/// - `load` of a missing row returns `Ok(None)`, never an error.
/// - `remove` of a missing row returns `Ok(false)`; absence is not an error.
/// - Rows with empty ids are rejected with [`StoreError::EmptyId`].
/// - The store never interprets rows beyond `(kind, id)`.
/// - All I/O errors are propagated, never silently ignored.
pub trait EntityStore: Send + Sync {
    /// Load the row stored under `(kind, id)`.
    ///
    /// Returns `Ok(None)` if no such row exists.
    fn load(&self, kind: EntityKind, id: &EntityId) -> StoreResult<Option<Entity>>;

    /// Save a row under its own `(kind, id)`, replacing any previous row.
    fn save(&self, entity: Entity) -> StoreResult<()>;

    /// Remove the row stored under `(kind, id)`. Returns `true` if it existed.
    fn remove(&self, kind: EntityKind, id: &EntityId) -> StoreResult<bool>;

    /// Load and decode a listing row.
    ///
    /// Default implementation goes through [`EntityStore::load`]. Returns
    /// [`StoreError::KindMismatch`] if the backend hands back a row of the
    /// wrong kind for the listing table.
    fn load_listing(&self, id: &ListingId) -> StoreResult<Option<Listing>> {
        match self.load(EntityKind::Listing, &EntityId::from(id))? {
            None => Ok(None),
            Some(Entity::Listing(listing)) => Ok(Some(listing)),
            Some(other) => Err(StoreError::KindMismatch {
                id: id.to_hex(),
                expected: EntityKind::Listing,
                actual: other.kind(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Address, B256, U256};

    use nifty_types::{LogContext, NftBought, NftListed};

    use super::*;
    use crate::entity::NftBoughtEvent;
    use crate::memory::InMemoryEntityStore;

    fn context() -> LogContext {
        LogContext::new(7, 1_700_000_000, B256::repeat_byte(0x07), 0)
    }

    fn listing() -> Listing {
        Listing::open(
            &NftListed {
                nft_address: Address::with_last_byte(0x01),
                nft_id: U256::ZERO,
                price: U256::from(100u64),
                seller: Address::with_last_byte(0x02),
            },
            &context(),
        )
    }

    #[test]
    fn load_listing_decodes_saved_row() {
        let store = InMemoryEntityStore::new();
        let row = listing();
        store.save(row.clone().into()).unwrap();

        let loaded = store.load_listing(&row.id).unwrap();
        assert_eq!(loaded, Some(row));
    }

    #[test]
    fn load_listing_of_missing_row_is_none() {
        let store = InMemoryEntityStore::new();
        let id = ListingId::derive(Address::with_last_byte(0x09), U256::from(9u64));
        assert_eq!(store.load_listing(&id).unwrap(), None);
    }

    /// Backend that answers every load with a bought-event row, whatever
    /// kind was asked for. Exists to show `load_listing` refuses to decode
    /// such rows.
    struct MisfiledStore;

    impl EntityStore for MisfiledStore {
        fn load(&self, _kind: EntityKind, _id: &EntityId) -> StoreResult<Option<Entity>> {
            let audit = NftBoughtEvent::from_log(
                &NftBought {
                    nft_address: Address::with_last_byte(0x01),
                    nft_id: U256::ZERO,
                    buyer: Address::with_last_byte(0x03),
                    price: U256::from(100u64),
                },
                &context(),
            );
            Ok(Some(audit.into()))
        }

        fn save(&self, _entity: Entity) -> StoreResult<()> {
            Ok(())
        }

        fn remove(&self, _kind: EntityKind, _id: &EntityId) -> StoreResult<bool> {
            Ok(false)
        }
    }

    #[test]
    fn load_listing_rejects_wrong_kind() {
        let store = MisfiledStore;
        let id = ListingId::derive(Address::with_last_byte(0x01), U256::ZERO);
        let err = store.load_listing(&id).unwrap_err();
        assert!(matches!(
            err,
            StoreError::KindMismatch {
                expected: EntityKind::Listing,
                actual: EntityKind::NftBoughtEvent,
                ..
            }
        ));
    }
}
