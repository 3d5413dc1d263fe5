//! Registry entry types shared by the consistency check and the listing
//! regenerator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

mod json;
pub mod matching;

pub use json::load_registry_json;
pub use matching::{MatchCandidate, candidate_keys, find_match, match_count};

/// Whether a builder accepts or requires `X-Flashbots-Signature` on bundles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signing {
    Required,
    Optional,
    NotSupported,
}

impl Signing {
    /// Variant name as written in the listing (`Signing::<name>`) and in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Signing::Required => "Required",
            Signing::Optional => "Optional",
            Signing::NotSupported => "NotSupported",
        }
    }
}

impl fmt::Display for Signing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Signing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Required" => Ok(Signing::Required),
            "Optional" => Ok(Signing::Optional),
            "NotSupported" => Ok(Signing::NotSupported),
            other => Err(other.to_string()),
        }
    }
}

/// A known builder.
///
/// `extra_data` is the key used to correlate the builder with block
/// statistics; builders without one can never be matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub name: String,
    pub identifier: String,
    pub website: String,
    pub searcher_rpc: String,
    #[serde(default)]
    pub mev_share_rpc: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub extra_data: Option<String>,
    pub signing: Signing,
    pub account_required: bool,
}

impl RegistryEntry {
    /// The statistics key, if the entry has a non-empty one.
    pub fn key(&self) -> Option<&str> {
        self.extra_data.as_deref().filter(|key| !key.is_empty())
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
