//! Validate-config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        match load_config(config_path) {
            Ok(config) => {
                println!("Configuration is valid: {config_path}");
                println!("  Roster store: {}", config.roster_store.connection_string_safe());
                println!("  Event store:  {}", config.event_store.connection_string_safe());
                println!("  Bucket:       {}", config.storage.bucket);
                println!("  Page size:    {}", config.report.page_size);
                println!("  Window days:  {}", config.report.window_days);
                Ok(0)
            }
            Err(e) => {
                eprintln!("Configuration error: {e}");
                Ok(2)
            }
        }
    }
}
