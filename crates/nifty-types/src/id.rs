use std::fmt;

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// Deterministic identifier for an observed log.
///
/// An `EventId` is the 32-byte transaction hash followed by the big-endian
/// 4-byte log index, 36 bytes total. The same log always produces the same
/// `EventId`, so replaying a stream overwrites records instead of
/// duplicating them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId([u8; 36]);

impl EventId {
    /// Derive an `EventId` from a log's chain coordinates.
    pub fn derive(transaction_hash: B256, log_index: u32) -> Self {
        let mut bytes = [0u8; 36];
        bytes[..32].copy_from_slice(transaction_hash.as_slice());
        bytes[32..].copy_from_slice(&log_index.to_be_bytes());
        Self(bytes)
    }

    /// The raw 36 bytes.
    pub fn as_bytes(&self) -> &[u8; 36] {
        &self.0
    }

    /// The transaction hash component.
    pub fn transaction_hash(&self) -> B256 {
        B256::from_slice(&self.0[..32])
    }

    /// The log index component.
    pub fn log_index(&self) -> u32 {
        let mut index = [0u8; 4];
        index.copy_from_slice(&self.0[32..]);
        u32::from_be_bytes(index)
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string (72 hex characters, optional `0x` prefix).
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 36 {
            return Err(TypeError::InvalidLength {
                expected: 36,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 36];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventId({})", self.short_hex())
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

// [u8; 36] is past serde's array-impl ceiling, so ids serialize as hex
// strings. That also matches how hosts render them.
impl Serialize for EventId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Deterministic identifier for a listing.
///
/// A `ListingId` is the UTF-8 encoding of `"{nft_address}-{nft_id}"`, with
/// the address rendered as lowercase `0x` hex and the token id in decimal.
/// Every event touching the same `(contract, token)` pair lands on the same
/// listing row.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListingId(Vec<u8>);

impl ListingId {
    /// Derive a `ListingId` from the NFT contract address and token id.
    pub fn derive(nft_address: Address, nft_id: U256) -> Self {
        let text = format!("0x{}-{nft_id}", hex::encode(nft_address.as_slice()));
        Self(text.into_bytes())
    }

    /// The raw id bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the id, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// The id rendered as text, if it is valid UTF-8.
    ///
    /// Ids built by [`ListingId::derive`] always are; ids parsed from
    /// arbitrary hex may not be.
    pub fn as_utf8(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        let n = self.0.len().min(4);
        hex::encode(&self.0[..n])
    }

    /// Parse from a hex string (optional `0x` prefix).
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ListingId({})", self.short_hex())
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for ListingId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ListingId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Untyped entity key as the store sees it.
///
/// Stores address rows by `(kind, EntityId)` and never interpret the bytes.
/// [`EventId`] and [`ListingId`] both convert into this.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(Vec<u8>);

impl EntityId {
    /// Create an `EntityId` from raw bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// The raw id bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns `true` if the id has no bytes. Stores reject empty ids.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        let n = self.0.len().min(4);
        hex::encode(&self.0[..n])
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.short_hex())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<EventId> for EntityId {
    fn from(id: EventId) -> Self {
        Self(id.as_bytes().to_vec())
    }
}

impl From<&EventId> for EntityId {
    fn from(id: &EventId) -> Self {
        Self(id.as_bytes().to_vec())
    }
}

impl From<ListingId> for EntityId {
    fn from(id: ListingId) -> Self {
        Self(id.into_bytes())
    }
}

impl From<&ListingId> for EntityId {
    fn from(id: &ListingId) -> Self {
        Self(id.as_bytes().to_vec())
    }
}

impl Serialize for EntityId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let s = s.strip_prefix("0x").unwrap_or(&s);
        let bytes = hex::decode(s).map_err(serde::de::Error::custom)?;
        Ok(Self(bytes))
    }
}
