//! Application configuration
//!
//! This module provides centralized configuration management using the `config` crate.
//! Configuration can be loaded from environment variables and config files.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub billing: BillingConfig,
}

/// HTTP server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_timeout() -> u64 {
    30
}

/// Database configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Idle connection timeout in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    2
}

fn default_acquire_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    600
}

/// Authentication configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// JWT signing secret
    pub jwt_secret: String,

    /// JWT token expiration in minutes
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration_minutes: i64,

    /// Password hashing cost (Argon2 time cost)
    #[serde(default = "default_hash_cost")]
    pub hash_cost: u32,
}

fn default_jwt_expiration() -> i64 {
    1440 // 24 hours
}

fn default_hash_cost() -> u32 {
    3
}

/// Billing-specific configuration
///
/// Values shown to users on the top-up screen plus the request floor.
#[derive(Debug, Deserialize, Clone)]
pub struct BillingConfig {
    /// Minimum credit top-up request amount in won
    #[serde(default = "default_min_topup")]
    pub min_topup_won: i64,

    /// Bank name displayed for deposit transfers
    #[serde(default = "default_bank_name")]
    pub deposit_bank_name: String,

    /// Bank account number displayed for deposit transfers
    #[serde(default = "default_bank_account")]
    pub deposit_bank_account: String,

    /// Account holder name displayed for deposit transfers
    #[serde(default = "default_account_holder")]
    pub deposit_account_holder: String,
}

fn default_min_topup() -> i64 {
    10_000
}

fn default_bank_name() -> String {
    "KB Kookmin".to_string()
}

fn default_bank_account() -> String {
    "1234-56-789012".to_string()
}

fn default_account_holder() -> String {
    "Shortform Factory".to_string()
}

impl AppConfig {
    /// Load configuration from environment and optional config file
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.workers", num_cpus::get() as i64)?
            .set_default("server.timeout_secs", 30)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("auth.jwt_expiration_minutes", 1440)?
            .set_default("auth.hash_cost", 3)?
            .set_default("billing.min_topup_won", 10_000)?
            .set_default("billing.deposit_bank_name", "KB Kookmin")?
            .set_default("billing.deposit_bank_account", "1234-56-789012")?
            .set_default("billing.deposit_account_holder", "Shortform Factory")?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables with SHORTFORM_ prefix
            .add_source(
                Environment::with_prefix("SHORTFORM")
                    .separator("__")
                    .try_parsing(true),
            )
            // Support legacy environment variables
            .add_source(Environment::default().try_parsing(true))
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(Environment::with_prefix("SHORTFORM").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Get the server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            min_topup_won: 10_000,
            deposit_bank_name: default_bank_name(),
            deposit_bank_account: default_bank_account(),
            deposit_account_holder: default_account_holder(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_billing_config() {
        let config = BillingConfig::default();
        assert_eq!(config.min_topup_won, 10_000);
        assert_eq!(config.deposit_bank_name, "KB Kookmin");
    }
}
