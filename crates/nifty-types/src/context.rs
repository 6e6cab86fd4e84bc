use std::fmt;

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

use crate::id::EventId;

/// Chain coordinates of an observed log.
///
/// The host attaches one of these to every decoded log. The pair
/// `(block_number, log_index)` orders events within a stream; the pair
/// `(transaction_hash, log_index)` names them (see [`EventId`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogContext {
    /// Height of the block containing the log.
    pub block_number: u64,
    /// Unix timestamp of the block containing the log.
    pub block_timestamp: u64,
    /// Hash of the transaction that emitted the log.
    pub transaction_hash: B256,
    /// Position of the log within its transaction receipt.
    pub log_index: u32,
}

impl LogContext {
    pub fn new(
        block_number: u64,
        block_timestamp: u64,
        transaction_hash: B256,
        log_index: u32,
    ) -> Self {
        Self {
            block_number,
            block_timestamp,
            transaction_hash,
            log_index,
        }
    }

    /// Identifier of the event observed at these coordinates.
    pub fn event_id(&self) -> EventId {
        EventId::derive(self.transaction_hash, self.log_index)
    }

    /// Stream position used by ordering checks.
    pub fn position(&self) -> (u64, u32) {
        (self.block_number, self.log_index)
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block {} log {}", self.block_number, self.log_index)
    }
}
