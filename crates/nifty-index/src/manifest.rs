use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::error::{IndexError, IndexResult};
use crate::policy::UpdatePolicy;

/// Deployment manifest for one indexer instance.
///
/// Hosts hand the indexer a TOML document naming the marketplace contract
/// to follow and how to index it:
///
/// ```toml
/// [source]
/// address = "0x5fbdb2315678afecb367f032d93f642f64180aa3"
/// start_block = 12
///
/// [indexing]
/// update_policy = "lenient"
/// ```
///
/// The `[indexing]` table and `start_block` may be omitted; they default to
/// the strict policy and block 0.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Contract the host should follow.
    pub source: DataSource,
    /// Reducer configuration.
    #[serde(default)]
    pub indexing: IndexingOptions,
}

impl Manifest {
    /// Parse and sanity-check a manifest from TOML text.
    pub fn from_toml_str(text: &str) -> IndexResult<Self> {
        let manifest: Manifest =
            toml::from_str(text).map_err(|e| IndexError::InvalidManifest(e.to_string()))?;
        if manifest.source.address == Address::ZERO {
            return Err(IndexError::InvalidManifest(
                "source.address must not be the zero address".into(),
            ));
        }
        Ok(manifest)
    }
}

/// The contract a deployment follows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSource {
    /// Marketplace contract address.
    pub address: Address,
    /// First block the host should scan. Zero means genesis.
    #[serde(default)]
    pub start_block: u64,
}

/// Reducer configuration carried by the manifest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexingOptions {
    /// Policy for updates that target an unknown listing.
    #[serde(default)]
    pub update_policy: UpdatePolicy,
}
