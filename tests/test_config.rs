//! Integration tests for configuration loading.

use std::env;
use std::sync::Mutex;

use teambase::config::{Config, ConfigError, Environment};

// Use a mutex to serialize tests that modify environment variables
static ENV_LOCK: Mutex<()> = Mutex::new(());

const ALL_VARS: &[&str] = &[
    "TEAMBASE_TEST_MODE",
    "APP_ENV",
    "APP_NAME",
    "HOST",
    "PORT",
    "WORKERS",
    "CONTENT_DIR",
    "LOGS_DIR",
    "DATABASE_URL",
    "SECRET_KEY",
    "SESSION_EXPIRE_SECS",
    "LOGIN_DISABLED",
    "CORS_ORIGINS",
];

fn cleanup_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_development_defaults() {
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env();
    env::set_var("TEAMBASE_TEST_MODE", "1");

    let config = Config::from_env().expect("Failed to load config");

    assert_eq!(config.env, Environment::Development);
    assert_eq!(config.app_name, "teambase");
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 5000);
    assert_eq!(config.workers, 1);
    assert!(config.debug);
    assert!(!config.login_disabled);
    assert_eq!(config.session_expire_secs, 43200);
    assert_eq!(config.cors_origins, vec!["*".to_string()]);
    // Database file derived from the content directory
    assert!(config.database_url.starts_with("sqlite://"));
    assert!(config.database_url.ends_with("teambase.db"));

    cleanup_env();
}

#[test]
fn test_production_requires_secret_key() {
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env();
    env::set_var("TEAMBASE_TEST_MODE", "1");
    env::set_var("APP_ENV", "production");

    let result = Config::from_env();
    match result {
        Err(ConfigError::MissingVar(var)) => assert_eq!(var, "SECRET_KEY"),
        other => panic!("Expected MissingVar error for SECRET_KEY, got {:?}", other.map(|_| ())),
    }

    cleanup_env();
}

#[test]
fn test_production_profile() {
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env();
    env::set_var("TEAMBASE_TEST_MODE", "1");
    env::set_var("APP_ENV", "production");
    env::set_var("SECRET_KEY", "prod-secret");

    let config = Config::from_env().expect("Failed to load config");

    assert_eq!(config.env, Environment::Production);
    assert!(!config.debug);
    assert_eq!(config.secret_key, "prod-secret");

    cleanup_env();
}

#[test]
fn test_unknown_environment_rejected() {
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env();
    env::set_var("TEAMBASE_TEST_MODE", "1");
    env::set_var("APP_ENV", "staging");

    let result = Config::from_env();
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

    cleanup_env();
}

#[test]
fn test_invalid_port_rejected() {
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env();
    env::set_var("TEAMBASE_TEST_MODE", "1");
    env::set_var("PORT", "not-a-port");

    let result = Config::from_env();
    match result {
        Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "PORT"),
        other => panic!("Expected InvalidValue error for PORT, got {:?}", other.map(|_| ())),
    }

    cleanup_env();
}

#[test]
fn test_custom_values() {
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env();
    env::set_var("TEAMBASE_TEST_MODE", "1");
    env::set_var("APP_NAME", "myapp");
    env::set_var("HOST", "127.0.0.1");
    env::set_var("PORT", "8080");
    env::set_var("WORKERS", "4");
    env::set_var("LOGS_DIR", "/tmp/myapp-logs");
    env::set_var("DATABASE_URL", "sqlite:///tmp/myapp.db");
    env::set_var("LOGIN_DISABLED", "1");
    env::set_var("CORS_ORIGINS", "https://a.example.com, https://b.example.com");

    let config = Config::from_env().expect("Failed to load config");

    assert_eq!(config.app_name, "myapp");
    assert_eq!(config.server_addr(), "127.0.0.1:8080");
    assert_eq!(config.workers, 4);
    assert_eq!(config.database_url, "sqlite:///tmp/myapp.db");
    assert!(config.login_disabled);
    assert_eq!(
        config.cors_origins,
        vec![
            "https://a.example.com".to_string(),
            "https://b.example.com".to_string()
        ]
    );
    // Derived file names pick up the app name and logs directory
    assert_eq!(
        config.pid_file(),
        std::path::PathBuf::from("/tmp/myapp-logs/myapp-server.pid")
    );
    assert_eq!(
        config.server_log_file(),
        std::path::PathBuf::from("/tmp/myapp-logs/myapp-server.log")
    );

    cleanup_env();
}

#[test]
fn test_database_path_extraction() {
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env();
    env::set_var("TEAMBASE_TEST_MODE", "1");
    env::set_var("DATABASE_URL", "sqlite://content/app.db");

    let config = Config::from_env().expect("Failed to load config");
    assert_eq!(
        config.database_path(),
        Some(std::path::Path::new("content/app.db"))
    );

    cleanup_env();
}
