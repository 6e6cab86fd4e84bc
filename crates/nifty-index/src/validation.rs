use std::collections::HashSet;

use alloy_primitives::B256;

use nifty_types::{EventId, EventPayload, ListingId, MarketEvent};

/// Result of validating an event stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationReport {
    pub events_checked: u64,
    pub ordering_ok: bool,
    pub purchases_settled: bool,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific delivery-contract violation detected in a stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// Index of the offending event within the validated slice.
    pub position: usize,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    /// `(block_number, log_index)` did not strictly increase.
    OutOfOrder,
    /// The same `(transaction_hash, log_index)` appeared twice.
    DuplicateLog,
    /// A purchase had no unlist in its own transaction.
    UnsettledPurchase,
}

/// Delivery-contract validator.
///
/// The reducers trust the host on two promises: events arrive in chain
/// order, and every purchase comes with the unlist log the marketplace
/// contract emits in the same transaction. `StreamValidator` checks both on
/// a slice before it is replayed; a violated slice can still be applied,
/// but its listing table may end up wrong.
pub struct StreamValidator;

impl StreamValidator {
    /// Validate a slice of events against the delivery contract.
    pub fn validate(events: &[MarketEvent]) -> ValidationReport {
        let mut violations = Vec::new();
        let mut ordering_ok = true;
        let mut purchases_settled = true;

        // Unlists are collected up front so a purchase settles no matter
        // which order the two logs take inside their transaction.
        let mut unlisted: HashSet<(B256, ListingId)> = HashSet::new();
        for event in events {
            if let EventPayload::Unlisted(_) = event.payload {
                unlisted.insert((event.context.transaction_hash, event.listing_id()));
            }
        }

        let mut seen: HashSet<EventId> = HashSet::new();
        let mut last_position: Option<(u64, u32)> = None;

        for (position, event) in events.iter().enumerate() {
            let id = event.event_id();
            if !seen.insert(id) {
                ordering_ok = false;
                violations.push(Violation {
                    position,
                    kind: ViolationKind::DuplicateLog,
                    description: format!("log {id:?} delivered twice"),
                });
            } else if let Some((last_block, last_log)) = last_position {
                if event.context.position() <= (last_block, last_log) {
                    ordering_ok = false;
                    violations.push(Violation {
                        position,
                        kind: ViolationKind::OutOfOrder,
                        description: format!(
                            "{} arrived after block {last_block} log {last_log}",
                            event.context
                        ),
                    });
                }
            }
            last_position = Some(event.context.position());

            if let EventPayload::Bought(_) = event.payload {
                let key = (event.context.transaction_hash, event.listing_id());
                if !unlisted.contains(&key) {
                    purchases_settled = false;
                    violations.push(Violation {
                        position,
                        kind: ViolationKind::UnsettledPurchase,
                        description: "purchase without an unlist in its transaction".into(),
                    });
                }
            }
        }

        ValidationReport {
            events_checked: events.len() as u64,
            ordering_ok,
            purchases_settled,
            violations,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Address, U256};

    use nifty_types::LogContext;

    use super::*;

    fn nft_address() -> Address {
        Address::with_last_byte(0x01)
    }

    fn token() -> U256 {
        U256::ZERO
    }

    fn at(block: u64, tx_byte: u8, log_index: u32) -> LogContext {
        LogContext::new(block, block * 1_000, B256::repeat_byte(tx_byte), log_index)
    }

    fn listed(block: u64, tx_byte: u8, log_index: u32) -> MarketEvent {
        MarketEvent::listed(
            at(block, tx_byte, log_index),
            nft_address(),
            token(),
            U256::from(100u64),
            Address::with_last_byte(0x02),
        )
    }

    fn bought(block: u64, tx_byte: u8, log_index: u32) -> MarketEvent {
        MarketEvent::bought(
            at(block, tx_byte, log_index),
            nft_address(),
            token(),
            Address::with_last_byte(0x03),
            U256::from(100u64),
        )
    }

    fn unlisted(block: u64, tx_byte: u8, log_index: u32) -> MarketEvent {
        MarketEvent::unlisted(at(block, tx_byte, log_index), nft_address(), token())
    }

    #[test]
    fn ordered_stream_is_valid() {
        let events = [listed(1, 0xa1, 0), bought(2, 0xa2, 0), unlisted(2, 0xa2, 1)];
        let report = StreamValidator::validate(&events);

        assert!(report.is_valid());
        assert!(report.ordering_ok);
        assert!(report.purchases_settled);
        assert_eq!(report.events_checked, 3);
    }

    #[test]
    fn empty_stream_is_valid() {
        let report = StreamValidator::validate(&[]);
        assert!(report.is_valid());
        assert_eq!(report.events_checked, 0);
    }

    #[test]
    fn out_of_order_blocks_are_flagged() {
        let events = [listed(5, 0xa5, 0), listed(3, 0xa3, 0)];
        let report = StreamValidator::validate(&events);

        assert!(!report.is_valid());
        assert!(!report.ordering_ok);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].kind, ViolationKind::OutOfOrder);
        assert_eq!(report.violations[0].position, 1);
    }

    #[test]
    fn log_index_must_increase_within_a_block() {
        let events = [listed(5, 0xa5, 1), unlisted(5, 0xa5, 0)];
        let report = StreamValidator::validate(&events);

        assert!(!report.ordering_ok);
        assert_eq!(report.violations[0].kind, ViolationKind::OutOfOrder);
    }

    #[test]
    fn duplicate_log_is_flagged() {
        let event = listed(1, 0xa1, 0);
        let report = StreamValidator::validate(&[event, event]);

        assert!(!report.is_valid());
        assert!(!report.ordering_ok);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].kind, ViolationKind::DuplicateLog);
        assert_eq!(report.violations[0].position, 1);
    }

    #[test]
    fn purchase_settles_against_unlist_in_same_transaction() {
        // The contract emits both logs in the buy transaction; either order
        // must settle.
        let buy_then_unlist = [bought(2, 0xa2, 0), unlisted(2, 0xa2, 1)];
        assert!(StreamValidator::validate(&buy_then_unlist).purchases_settled);

        let unlist_then_buy = [unlisted(2, 0xa2, 0), bought(2, 0xa2, 1)];
        assert!(StreamValidator::validate(&unlist_then_buy).purchases_settled);
    }

    #[test]
    fn purchase_without_unlist_is_flagged() {
        let events = [listed(1, 0xa1, 0), bought(2, 0xa2, 0)];
        let report = StreamValidator::validate(&events);

        assert!(!report.is_valid());
        assert!(!report.purchases_settled);
        assert!(report.ordering_ok);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].kind, ViolationKind::UnsettledPurchase);
        assert_eq!(report.violations[0].position, 1);
    }

    #[test]
    fn unlist_in_another_transaction_does_not_settle_a_purchase() {
        let events = [bought(2, 0xa2, 0), unlisted(3, 0xa3, 0)];
        let report = StreamValidator::validate(&events);

        assert!(!report.purchases_settled);
        assert_eq!(report.violations[0].kind, ViolationKind::UnsettledPurchase);
    }

    #[test]
    fn unlist_for_another_listing_does_not_settle_a_purchase() {
        let other_token = MarketEvent::unlisted(at(2, 0xa2, 1), nft_address(), U256::from(7u64));
        let events = [bought(2, 0xa2, 0), other_token];
        let report = StreamValidator::validate(&events);

        assert!(!report.purchases_settled);
    }

    #[test]
    fn violations_accumulate_with_positions() {
        let events = [
            listed(5, 0xa5, 0),
            listed(3, 0xa3, 0), // out of order
            bought(6, 0xa6, 0), // unsettled
        ];
        let report = StreamValidator::validate(&events);

        assert_eq!(report.violations.len(), 2);
        assert_eq!(report.violations[0].position, 1);
        assert_eq!(report.violations[0].kind, ViolationKind::OutOfOrder);
        assert_eq!(report.violations[1].position, 2);
        assert_eq!(report.violations[1].kind, ViolationKind::UnsettledPurchase);
        assert_eq!(report.events_checked, 3);
    }
}
