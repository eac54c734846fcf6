use crate::config::RegistryConfig;
use crate::error::RegistryError;
use crate::types::{DuplicatePolicy, RecordCollection, RecordSource};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

static GLOBAL_REGISTRY: OnceCell<AddressRegistry> = OnceCell::const_new();

/// Address Registry - Maps contract and provider names to addresses
///
/// Built once from the contract and provider deployment logs, then only read.
/// There is no mutating API after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AddressRegistry {
    addresses: BTreeMap<String, String>,
}

impl AddressRegistry {
    /// Merge both collections into one registry
    ///
    /// Contracts are applied first, then providers. A provider entry overwrites
    /// a contract entry with the same name.
    pub fn build(contracts: &RecordCollection, providers: &RecordCollection) -> Self {
        let mut addresses = BTreeMap::new();

        for (name, record) in contracts {
            addresses.insert(name.clone(), record.address.clone());
        }

        for (name, record) in providers {
            if let Some(previous) = addresses.insert(name.clone(), record.address.clone()) {
                warn!(
                    "Provider '{}' overrides contract address {} with {}",
                    name, previous, record.address
                );
            }
        }

        debug!(
            "Merged {} contracts and {} providers into {} addresses",
            contracts.len(),
            providers.len(),
            addresses.len()
        );

        Self { addresses }
    }

    /// Merge both collections, applying `policy` to names present in both
    pub fn build_with_policy(
        contracts: &RecordCollection,
        providers: &RecordCollection,
        policy: DuplicatePolicy,
    ) -> Result<Self, RegistryError> {
        if policy == DuplicatePolicy::Reject {
            // Lowest name first so the reported collision is stable
            let collision = providers
                .iter()
                .filter_map(|(name, provider)| {
                    contracts.get(name).map(|contract| (name, contract, provider))
                })
                .min_by(|a, b| a.0.cmp(b.0));

            if let Some((name, contract, provider)) = collision {
                return Err(RegistryError::DuplicateName {
                    name: name.clone(),
                    contract_address: contract.address.clone(),
                    provider_address: provider.address.clone(),
                });
            }
        }

        Ok(Self::build(contracts, providers))
    }

    /// Load both deployment logs from disk and merge them
    pub async fn load(config: &RegistryConfig) -> Result<Self, RegistryError> {
        info!(
            "Loading address registry from {:?} and {:?}",
            config.contracts_path, config.providers_path
        );

        let contracts = read_collection(&config.contracts_path, RecordSource::Contracts).await?;
        let providers = read_collection(&config.providers_path, RecordSource::Providers).await?;

        let registry = Self::build_with_policy(&contracts, &providers, config.duplicate_policy)?;

        info!("Address registry ready with {} entries", registry.len());
        Ok(registry)
    }

    /// Same as [`AddressRegistry::load`] but from in-memory JSON documents
    pub fn from_json_str(
        contracts_json: &str,
        providers_json: &str,
        policy: DuplicatePolicy,
    ) -> Result<Self, RegistryError> {
        let contracts = parse_collection(
            contracts_json,
            &PathBuf::from(format!("<{}>", RecordSource::Contracts)),
        )?;
        let providers = parse_collection(
            providers_json,
            &PathBuf::from(format!("<{}>", RecordSource::Providers)),
        )?;

        Self::build_with_policy(&contracts, &providers, policy)
    }

    /// Get an address by name
    pub fn get(&self, name: &str) -> Result<&str, RegistryError> {
        self.address(name).ok_or_else(|| RegistryError::NotFound { name: name.to_string() })
    }

    /// Get an address by name, if present
    pub fn address(&self, name: &str) -> Option<&str> {
        self.addresses.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.addresses.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Iterate `(name, address)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.addresses.iter().map(|(name, address)| (name.as_str(), address.as_str()))
    }

    /// All registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.addresses.keys().map(String::as_str).collect()
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.addresses
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.addresses
    }
}

/// Load the process-wide registry exactly once
///
/// Concurrent callers wait on the same load. If loading fails the cell stays
/// empty and the error is returned to the caller.
pub async fn init_global(
    config: &RegistryConfig,
) -> Result<&'static AddressRegistry, RegistryError> {
    GLOBAL_REGISTRY.get_or_try_init(|| AddressRegistry::load(config)).await
}

/// The process-wide registry, if [`init_global`] has completed
pub fn global() -> Option<&'static AddressRegistry> {
    GLOBAL_REGISTRY.get()
}

async fn read_collection(
    path: &Path,
    source: RecordSource,
) -> Result<RecordCollection, RegistryError> {
    let json_content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| RegistryError::Io { path: path.to_path_buf(), source })?;

    let collection = parse_collection(&json_content, path)?;
    info!("Loaded {} {} records from {:?}", collection.len(), source, path);
    Ok(collection)
}

fn parse_collection(json: &str, path: &Path) -> Result<RecordCollection, RegistryError> {
    serde_json::from_str(json)
        .map_err(|source| RegistryError::Parse { path: path.to_path_buf(), source })
}
