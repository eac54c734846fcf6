//! Error types for AddressRegistry

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "Name '{name}' is defined as both a contract ({contract_address}) and a provider ({provider_address})"
    )]
    DuplicateName { name: String, contract_address: String, provider_address: String },

    #[error("Address for '{name}' not found in registry")]
    NotFound { name: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}
