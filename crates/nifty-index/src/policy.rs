use std::fmt;

use serde::{Deserialize, Serialize};

/// How the update reducer treats an update for a listing the store has
/// never seen.
///
/// A healthy stream never produces one, but indexing that starts past the
/// original listing block (`start_block` mid-history) legitimately can.
/// Strict deployments stop so the operator can resync from an earlier
/// block; lenient ones keep the audit row and move on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdatePolicy {
    /// Fail the event with `ListingNotFound` after the audit row is written.
    #[default]
    Strict,
    /// Keep the audit row, skip the mutation, carry on.
    Lenient,
}

impl fmt::Display for UpdatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        };
        write!(f, "{s}")
    }
}
