//! Configuration management
//!
//! TOML configuration with `${VAR}` environment substitution, `TALLY_*`
//! overrides, and validation. Secrets are wrapped in [`SecretString`].

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, LoggingConfig, ReportConfig, StorageConfig, StoreConfig, TallyConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
