//! Tests for configuration validation

use interview_expiry::config::{CacheBackendConfig, ReconcilerConfig, StoreBackendConfig};

#[test]
fn test_default_config_is_valid() {
    let cfg = ReconcilerConfig::default();
    assert_eq!(cfg.store, StoreBackendConfig::InMemory);
    assert_eq!(cfg.cache, CacheBackendConfig::InMemory);
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_zero_pool_size_rejected() {
    let cfg = ReconcilerConfig {
        pool_max_size: 0,
        ..ReconcilerConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_postgres_requires_database_url() {
    let mut cfg = ReconcilerConfig {
        store: StoreBackendConfig::Postgres,
        ..ReconcilerConfig::default()
    };
    assert!(cfg.validate().is_err());

    cfg.database_url = Some(String::new());
    assert!(cfg.validate().is_err());

    cfg.database_url = Some("postgres://app@localhost/recruit".into());
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "store": "postgres",
        "cache": "none",
        "database_url": "postgres://app@localhost/recruit",
        "pool_max_size": 4,
        "audit_capacity": 100
    }"#;

    let cfg = ReconcilerConfig::from_json_str(json).expect("valid config");
    assert_eq!(cfg.store, StoreBackendConfig::Postgres);
    assert_eq!(cfg.cache, CacheBackendConfig::None);
    assert_eq!(cfg.pool_max_size, 4);
    assert_eq!(cfg.audit_capacity, 100);
}

#[test]
fn test_config_from_json_applies_defaults() {
    let cfg = ReconcilerConfig::from_json_str(r#"{ "store": "in_memory" }"#).expect("valid config");
    assert_eq!(cfg, ReconcilerConfig::default());
}

#[test]
fn test_config_from_json_rejects_unknown_backend() {
    assert!(ReconcilerConfig::from_json_str(r#"{ "store": "redis" }"#).is_err());
}

/// Serializes tests that mutate the process environment.
static ENV_LOCK: parking_lot::Mutex<()> = parking_lot::const_mutex(());

const ENV_KEYS: [&str; 5] = [
    "INTERVIEW_STORE",
    "INTERVIEW_CACHE",
    "DATABASE_URL",
    "INTERVIEW_DB_POOL_SIZE",
    "INTERVIEW_AUDIT_CAPACITY",
];

fn with_env<R>(vars: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
    let _guard = ENV_LOCK.lock();
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
    for (key, value) in vars {
        std::env::set_var(key, value);
    }
    let result = f();
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
    result
}

#[test]
fn test_config_from_env() {
    let cfg = with_env(
        &[
            ("INTERVIEW_STORE", "postgres"),
            ("INTERVIEW_CACHE", "none"),
            ("DATABASE_URL", "postgres://app@localhost/recruit"),
            ("INTERVIEW_DB_POOL_SIZE", "3"),
            ("INTERVIEW_AUDIT_CAPACITY", "64"),
        ],
        ReconcilerConfig::from_env,
    )
    .expect("valid environment");

    assert_eq!(cfg.store, StoreBackendConfig::Postgres);
    assert_eq!(cfg.cache, CacheBackendConfig::None);
    assert_eq!(
        cfg.database_url.as_deref(),
        Some("postgres://app@localhost/recruit")
    );
    assert_eq!(cfg.pool_max_size, 3);
    assert_eq!(cfg.audit_capacity, 64);
}

#[test]
fn test_config_from_env_rejects_bad_pool_size() {
    let result = with_env(
        &[
            ("INTERVIEW_STORE", "in_memory"),
            ("INTERVIEW_DB_POOL_SIZE", "many"),
        ],
        ReconcilerConfig::from_env,
    );
    let err = result.expect_err("pool size must be numeric");
    assert!(err.to_string().contains("INTERVIEW_DB_POOL_SIZE"));
}

#[test]
fn test_config_from_env_requires_url_for_postgres() {
    let result = with_env(&[("INTERVIEW_STORE", "postgres")], ReconcilerConfig::from_env);
    assert!(result.is_err());
}
