//! Address Registry - Maps contract and provider names to on-chain addresses
//!
//! This module merges the contract deployment log and the provider log into a
//! single read-only lookup table. Contracts are applied first and providers
//! second, so a provider entry overrides a contract entry of the same name.

pub mod config;
pub mod error;
pub mod registry;
pub mod types;

pub use config::RegistryConfig;
pub use error::RegistryError;
pub use registry::{global, init_global, AddressRegistry};
pub use types::{DuplicatePolicy, Record, RecordCollection, RecordSource};
