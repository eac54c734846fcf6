use address_registry::{
    global, init_global, AddressRegistry, DuplicatePolicy, RegistryConfig, RegistryError,
};
use std::path::Path;
use tempfile::TempDir;

const CONTRACTS: &str = r#"{
    "TokenA": { "address": "0x111", "network": "goerli" },
    "Vault": { "address": "0x444", "network": "goerli", "transactionHash": "0xdead" }
}"#;

const PROVIDERS: &str = r#"{
    "TokenA": { "address": "0x222" },
    "Oracle": { "address": "0x333", "jobId": "7da2702f37fd48e5b1b9a5715e3509b6" }
}"#;

fn write_logs(dir: &Path, contracts: &str, providers: &str) -> RegistryConfig {
    let contracts_path = dir.join("contracts.json");
    let providers_path = dir.join("providers.json");
    std::fs::write(&contracts_path, contracts).unwrap();
    std::fs::write(&providers_path, providers).unwrap();

    RegistryConfig {
        contracts_path,
        providers_path,
        duplicate_policy: DuplicatePolicy::ProviderWins,
    }
}

#[tokio::test]
async fn test_load_merges_both_logs() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_logs(temp_dir.path(), CONTRACTS, PROVIDERS);

    let registry = AddressRegistry::load(&config).await.unwrap();

    assert_eq!(registry.len(), 3);
    assert_eq!(registry.get("TokenA").unwrap(), "0x222");
    assert_eq!(registry.get("Vault").unwrap(), "0x444");
    assert_eq!(registry.get("Oracle").unwrap(), "0x333");
}

#[tokio::test]
async fn test_load_rejects_duplicates_when_configured() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = write_logs(temp_dir.path(), CONTRACTS, PROVIDERS);
    config.duplicate_policy = DuplicatePolicy::Reject;

    let result = AddressRegistry::load(&config).await;
    assert!(matches!(result, Err(RegistryError::DuplicateName { name, .. }) if name == "TokenA"));
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = write_logs(temp_dir.path(), CONTRACTS, PROVIDERS);
    config.providers_path = temp_dir.path().join("missing.json");

    match AddressRegistry::load(&config).await {
        Err(RegistryError::Io { path, .. }) => assert_eq!(path, config.providers_path),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_json_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_logs(temp_dir.path(), "{ not json", PROVIDERS);

    match AddressRegistry::load(&config).await {
        Err(RegistryError::Parse { path, .. }) => assert_eq!(path, config.contracts_path),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_record_without_address_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_logs(temp_dir.path(), CONTRACTS, r#"{"Oracle": {"jobId": "abc"}}"#);

    let result = AddressRegistry::load(&config).await;
    assert!(matches!(result, Err(RegistryError::Parse { .. })));
}

// Only test in this binary that touches the process-wide registry
#[tokio::test]
async fn test_global_initializes_once() {
    let temp_dir = TempDir::new().unwrap();

    // A failed load leaves the global empty
    let mut broken = write_logs(temp_dir.path(), CONTRACTS, PROVIDERS);
    broken.contracts_path = temp_dir.path().join("missing.json");
    assert!(init_global(&broken).await.is_err());
    assert!(global().is_none());

    let config = write_logs(temp_dir.path(), CONTRACTS, PROVIDERS);
    let first = init_global(&config).await.unwrap();
    assert_eq!(first.get("TokenA").unwrap(), "0x222");

    // Later calls return the already-built registry without re-reading
    std::fs::write(&config.providers_path, r#"{"TokenA": {"address": "0x999"}}"#).unwrap();
    let second = init_global(&config).await.unwrap();
    assert!(std::ptr::eq(first, second));
    assert_eq!(global().unwrap().get("TokenA").unwrap(), "0x222");
}
