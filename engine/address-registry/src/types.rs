use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A single entry of either deployment log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// On-chain address (e.g., "0x5FbDB2315678afecb367f032d93F642f64180aa3")
    pub address: String,

    /// Everything else the deployer wrote (network, tx hash, ...). Not interpreted.
    #[serde(flatten)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Record {
    /// Create a record with no metadata
    pub fn new(address: impl Into<String>) -> Self {
        Self { address: address.into(), metadata: serde_json::Map::new() }
    }
}

/// Name -> record mapping, as stored in `contracts.json` / `providers.json`
pub type RecordCollection = HashMap<String, Record>;

/// Which log an entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSource {
    Contracts,
    Providers,
}

impl fmt::Display for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordSource::Contracts => write!(f, "contracts"),
            RecordSource::Providers => write!(f, "providers"),
        }
    }
}

/// What to do when a name appears in both logs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Provider address replaces the contract address
    #[default]
    ProviderWins,
    /// Treat the collision as a configuration error
    Reject,
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "provider-wins" | "provider_wins" => Ok(DuplicatePolicy::ProviderWins),
            "reject" => Ok(DuplicatePolicy::Reject),
            other => Err(format!("unknown duplicate policy '{other}'")),
        }
    }
}
