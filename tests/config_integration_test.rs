// Tally - Cross-store Activity Report Pipeline
// Copyright (c) 2025 Tally Contributors
// Licensed under the MIT License

//! Configuration integration tests
//!
//! Full load path: TOML file on disk, `${VAR}` environment substitution,
//! `TALLY_*` overrides, defaults, and validation failures.
//!
//! Tests that set process environment variables hold this mutex so they do
//! not race each other.

use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tally::config::load_config;
use tempfile::NamedTempFile;

static ENV_LOCK: Mutex<()> = Mutex::new(());

const FULL_CONFIG: &str = r#"
[application]
log_level = "info"

[roster_store]
connection_string = "postgresql://tally:pw@roster-db:5432/customers"
max_connections = 8
connection_timeout_seconds = 10
statement_timeout_seconds = 45

[event_store]
connection_string = "postgresql://tally:pw@event-db:5432/activity"

[storage]
bucket = "tally-reports"
region = "eu-west-1"
endpoint = "http://localhost:9000"
access_key_id = "AKIAEXAMPLE"
secret_access_key = "super-secret"
presign_ttl_seconds = 60000

[report]
page_size = 1000
window_days = 60

[logging]
local_enabled = true
local_path = "/var/log/tally"
local_rotation = "daily"
"#;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_full_config_round_trip() {
    let file = write_config(FULL_CONFIG);
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert_eq!(
        config.roster_store.connection_string,
        "postgresql://tally:pw@roster-db:5432/customers"
    );
    assert_eq!(config.roster_store.max_connections, 8);
    assert_eq!(config.roster_store.statement_timeout_seconds, 45);
    assert_eq!(
        config.event_store.connection_string,
        "postgresql://tally:pw@event-db:5432/activity"
    );
    // Unspecified event_store fields fall back to defaults
    assert_eq!(config.event_store.max_connections, 4);

    assert_eq!(config.storage.bucket, "tally-reports");
    assert_eq!(config.storage.region, "eu-west-1");
    assert_eq!(
        config.storage.endpoint.as_deref(),
        Some("http://localhost:9000")
    );
    assert_eq!(
        config.storage.secret_access_key.expose_secret().as_ref(),
        "super-secret"
    );
    assert_eq!(config.storage.presign_ttl_seconds, 60_000);

    assert_eq!(config.report.page_size, 1000);
    assert_eq!(config.report.window_days, 60);

    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_path, "/var/log/tally");
}

#[test]
fn test_minimal_config_uses_defaults() {
    let file = write_config(
        r#"
[roster_store]
connection_string = "postgresql://localhost/roster"

[event_store]
connection_string = "postgresql://localhost/events"

[storage]
bucket = "reports"
region = "us-east-1"
access_key_id = "AKIAEXAMPLE"
secret_access_key = "shhh"
"#,
    );
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.report.page_size, 1_000);
    assert_eq!(config.report.window_days, 60);
    assert_eq!(config.storage.presign_ttl_seconds, 60_000);
    assert!(config.storage.endpoint.is_none());
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_env_substitution_in_secret() {
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::set_var("TALLY_IT_SECRET_KEY", "from-env");

    let file = write_config(
        r#"
[roster_store]
connection_string = "postgresql://localhost/roster"

[event_store]
connection_string = "postgresql://localhost/events"

[storage]
bucket = "reports"
region = "us-east-1"
access_key_id = "AKIAEXAMPLE"
secret_access_key = "${TALLY_IT_SECRET_KEY}"
"#,
    );
    let config = load_config(file.path()).unwrap();
    std::env::remove_var("TALLY_IT_SECRET_KEY");

    assert_eq!(
        config.storage.secret_access_key.expose_secret().as_ref(),
        "from-env"
    );
}

#[test]
fn test_missing_substitution_variable_fails() {
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::remove_var("TALLY_IT_UNSET_KEY");

    let file = write_config(
        r#"
[roster_store]
connection_string = "postgresql://localhost/roster"

[event_store]
connection_string = "postgresql://localhost/events"

[storage]
bucket = "reports"
region = "us-east-1"
access_key_id = "AKIAEXAMPLE"
secret_access_key = "${TALLY_IT_UNSET_KEY}"
"#,
    );
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TALLY_IT_UNSET_KEY"));
}

#[test]
fn test_env_overrides_take_precedence() {
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::set_var("TALLY_STORAGE_BUCKET", "override-bucket");
    std::env::set_var("TALLY_REPORT_PAGE_SIZE", "250");
    std::env::set_var(
        "TALLY_EVENT_STORE_CONNECTION_STRING",
        "postgresql://other-host/events",
    );

    let file = write_config(FULL_CONFIG);
    let config = load_config(file.path());

    std::env::remove_var("TALLY_STORAGE_BUCKET");
    std::env::remove_var("TALLY_REPORT_PAGE_SIZE");
    std::env::remove_var("TALLY_EVENT_STORE_CONNECTION_STRING");

    let config = config.unwrap();
    assert_eq!(config.storage.bucket, "override-bucket");
    assert_eq!(config.report.page_size, 250);
    assert_eq!(
        config.event_store.connection_string,
        "postgresql://other-host/events"
    );
    // Non-overridden values keep their file values
    assert_eq!(config.storage.region, "eu-west-1");
}

#[test]
fn test_rejects_non_postgres_connection_string() {
    let file = write_config(
        r#"
[roster_store]
connection_string = "mysql://localhost/roster"

[event_store]
connection_string = "postgresql://localhost/events"

[storage]
bucket = "reports"
region = "us-east-1"
access_key_id = "AKIAEXAMPLE"
secret_access_key = "shhh"
"#,
    );
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("roster_store"));
}

#[test]
fn test_rejects_invalid_log_level() {
    let file = write_config(
        r#"
[application]
log_level = "verbose"

[roster_store]
connection_string = "postgresql://localhost/roster"

[event_store]
connection_string = "postgresql://localhost/events"

[storage]
bucket = "reports"
region = "us-east-1"
access_key_id = "AKIAEXAMPLE"
secret_access_key = "shhh"
"#,
    );
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("log_level"));
}

#[test]
fn test_rejects_zero_page_size() {
    let file = write_config(
        r#"
[roster_store]
connection_string = "postgresql://localhost/roster"

[event_store]
connection_string = "postgresql://localhost/events"

[storage]
bucket = "reports"
region = "us-east-1"
access_key_id = "AKIAEXAMPLE"
secret_access_key = "shhh"

[report]
page_size = 0
"#,
    );
    assert!(load_config(file.path()).is_err());
}

#[test]
fn test_rejects_malformed_toml() {
    let file = write_config("[storage\nbucket = ");
    assert!(load_config(file.path()).is_err());
}
