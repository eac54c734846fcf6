//! Configuration for AddressRegistry

use crate::error::RegistryError;
use crate::types::DuplicatePolicy;
use serde::Serialize;
use std::env::VarError;
use std::path::PathBuf;

pub const CONTRACTS_PATH_ENV: &str = "ADDRESS_REGISTRY_CONTRACTS";
pub const PROVIDERS_PATH_ENV: &str = "ADDRESS_REGISTRY_PROVIDERS";
pub const DUPLICATE_POLICY_ENV: &str = "ADDRESS_REGISTRY_DUPLICATES";

/// Where to find the deployment logs and how to merge them
#[derive(Debug, Clone, Serialize)]
pub struct RegistryConfig {
    pub contracts_path: PathBuf,
    pub providers_path: PathBuf,
    pub duplicate_policy: DuplicatePolicy,
}

/// Default paths are relative to the working directory, so run the binary from
/// the workspace root where the sample `logs/` directory lives.
impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            contracts_path: PathBuf::from("logs/contracts.json"),
            providers_path: PathBuf::from("logs/providers.json"),
            duplicate_policy: DuplicatePolicy::ProviderWins,
        }
    }
}

impl RegistryConfig {
    /// Create config from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, RegistryError> {
        Self::from_lookup(env_var)
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, RegistryError>
    where
        F: Fn(&str) -> Result<Option<String>, RegistryError>,
    {
        let defaults = Self::default();

        let contracts_path =
            lookup(CONTRACTS_PATH_ENV)?.map(PathBuf::from).unwrap_or(defaults.contracts_path);
        let providers_path =
            lookup(PROVIDERS_PATH_ENV)?.map(PathBuf::from).unwrap_or(defaults.providers_path);

        let duplicate_policy = match lookup(DUPLICATE_POLICY_ENV)? {
            Some(value) => value.parse::<DuplicatePolicy>().map_err(|message| {
                RegistryError::InvalidConfig {
                    message: format!("{DUPLICATE_POLICY_ENV}: {message}"),
                }
            })?,
            None => defaults.duplicate_policy,
        };

        Ok(Self { contracts_path, providers_path, duplicate_policy })
    }
}

/// Unset means "use the default"; set but not UTF-8 is a config error
fn env_var(key: &str) -> Result<Option<String>, RegistryError> {
    match std::env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(RegistryError::InvalidConfig {
            message: format!("{key} is set but is not valid UTF-8"),
        }),
    }
}
