//! Event reducers: the state machine that folds marketplace logs into rows.
//!
//! Each observed log makes two kinds of writes: an append-only audit row
//! keyed by event id, and a change to the listing table keyed by listing
//! id. The audit row is written first in every arm, so the trail records
//! what the chain emitted even when the listing change is refused.

use tracing::{debug, warn};

use nifty_store::{
    Entity, EntityKind, EntityStore, Listing, ListingUpdatedEvent, NftBoughtEvent, NftListedEvent,
    NftUnlistedEvent,
};
use nifty_types::{
    EntityId, EventPayload, ListingId, ListingUpdated, LogContext, MarketEvent, NftBought,
    NftListed, NftUnlisted,
};

use crate::error::{IndexError, IndexResult};
use crate::manifest::Manifest;
use crate::policy::UpdatePolicy;

/// What applying one event did to the listing table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// A listing row was created, or re-created, from a `Listed` event.
    ListingCreated,
    /// An existing listing row was mutated by an `Updated` event.
    ListingUpdated,
    /// An `Updated` event targeted an unknown listing and the mutation was
    /// skipped (lenient policy only).
    UpdateSkipped,
    /// A `Bought` event was recorded. The listing table is not touched;
    /// the marketplace contract emits a companion `Unlisted` log in the
    /// same transaction, and that log removes the row.
    PurchaseRecorded,
    /// An `Unlisted` event removed the listing row. `existed` is `false`
    /// when there was nothing to remove.
    ListingRemoved { existed: bool },
}

/// Counters from replaying a slice of events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events_applied: u64,
    pub listings_created: u64,
    pub listings_updated: u64,
    pub updates_skipped: u64,
    pub purchases_recorded: u64,
    pub listings_removed: u64,
}

impl ReplaySummary {
    fn record(&mut self, effect: Effect) {
        self.events_applied += 1;
        match effect {
            Effect::ListingCreated => self.listings_created += 1,
            Effect::ListingUpdated => self.listings_updated += 1,
            Effect::UpdateSkipped => self.updates_skipped += 1,
            Effect::PurchaseRecorded => self.purchases_recorded += 1,
            Effect::ListingRemoved { .. } => self.listings_removed += 1,
        }
    }
}

/// The reducer set, configured once per deployment.
///
/// Stateless apart from the update policy; everything else lives in the
/// store the host passes to each call. Events must arrive in chain order,
/// ascending `(block_number, log_index)`. The reducers trust the host on
/// that and apply last-write-wins mutations; [`StreamValidator`] can check
/// a slice first when the host's ordering is in doubt.
///
/// [`StreamValidator`]: crate::validation::StreamValidator
#[derive(Clone, Copy, Debug, Default)]
pub struct Indexer {
    policy: UpdatePolicy,
}

impl Indexer {
    /// Reducers with the given update policy.
    pub fn new(policy: UpdatePolicy) -> Self {
        Self { policy }
    }

    /// Reducers configured from a deployment manifest.
    pub fn from_manifest(manifest: &Manifest) -> Self {
        Self::new(manifest.indexing.update_policy)
    }

    /// The configured update policy.
    pub fn policy(&self) -> UpdatePolicy {
        self.policy
    }

    /// Apply one event to the store, dispatching on the payload variant.
    pub fn apply(&self, store: &dyn EntityStore, event: &MarketEvent) -> IndexResult<Effect> {
        match &event.payload {
            EventPayload::Listed(log) => self.apply_listed(store, log, &event.context),
            EventPayload::Updated(log) => self.apply_updated(store, log, &event.context),
            EventPayload::Bought(log) => self.apply_bought(store, log, &event.context),
            EventPayload::Unlisted(log) => self.apply_unlisted(store, log, &event.context),
        }
    }

    /// Apply a slice of events in order, counting what happened.
    ///
    /// Stops at the first error. Rows written before the failing event stay
    /// in the store, as does the failing event's own audit row.
    pub fn apply_all(
        &self,
        store: &dyn EntityStore,
        events: &[MarketEvent],
    ) -> IndexResult<ReplaySummary> {
        let mut summary = ReplaySummary::default();
        for event in events {
            let effect = self.apply(store, event)?;
            summary.record(effect);
        }
        debug!(events = summary.events_applied, "event slice applied");
        Ok(summary)
    }

    fn apply_listed(
        &self,
        store: &dyn EntityStore,
        log: &NftListed,
        context: &LogContext,
    ) -> IndexResult<Effect> {
        store.save(Entity::NftListedEvent(NftListedEvent::from_log(log, context)))?;

        let listing = Listing::open(log, context);
        let id = listing.id.clone();
        store.save(Entity::Listing(listing))?;
        debug!(listing = %id, price = %log.price, seller = %log.seller, "listing created");
        Ok(Effect::ListingCreated)
    }

    fn apply_updated(
        &self,
        store: &dyn EntityStore,
        log: &ListingUpdated,
        context: &LogContext,
    ) -> IndexResult<Effect> {
        store.save(Entity::ListingUpdatedEvent(ListingUpdatedEvent::from_log(
            log, context,
        )))?;

        let id = ListingId::derive(log.nft_address, log.nft_id);
        match store.load_listing(&id)? {
            Some(mut listing) => {
                listing.price = log.price;
                listing.seller = log.seller;
                listing.updated_at = context.block_timestamp;
                store.save(Entity::Listing(listing))?;
                debug!(listing = %id, price = %log.price, "listing updated");
                Ok(Effect::ListingUpdated)
            }
            None => match self.policy {
                UpdatePolicy::Strict => Err(IndexError::ListingNotFound {
                    listing_id: id,
                    nft_address: log.nft_address,
                    nft_id: log.nft_id,
                }),
                UpdatePolicy::Lenient => {
                    warn!(listing = %id, "update for unknown listing; mutation skipped");
                    Ok(Effect::UpdateSkipped)
                }
            },
        }
    }

    fn apply_bought(
        &self,
        store: &dyn EntityStore,
        log: &NftBought,
        context: &LogContext,
    ) -> IndexResult<Effect> {
        store.save(Entity::NftBoughtEvent(NftBoughtEvent::from_log(log, context)))?;

        // The listing row is left for the companion `Unlisted` log the
        // contract emits in the same transaction.
        let id = ListingId::derive(log.nft_address, log.nft_id);
        debug!(listing = %id, buyer = %log.buyer, price = %log.price, "purchase recorded");
        Ok(Effect::PurchaseRecorded)
    }

    fn apply_unlisted(
        &self,
        store: &dyn EntityStore,
        log: &NftUnlisted,
        context: &LogContext,
    ) -> IndexResult<Effect> {
        store.save(Entity::NftUnlistedEvent(NftUnlistedEvent::from_log(
            log, context,
        )))?;

        let id = ListingId::derive(log.nft_address, log.nft_id);
        let existed = store.remove(EntityKind::Listing, &EntityId::from(&id))?;
        debug!(listing = %id, existed, "listing removed");
        Ok(Effect::ListingRemoved { existed })
    }
}
