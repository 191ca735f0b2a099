//! Configuration module
//!
//! Loads demonstration-driver settings from environment variables.
//! Every variable has a default, so the driver runs out of the box.

use std::env;

/// Demonstration driver configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of worker threads in each concurrent storm
    pub demo_threads: usize,

    /// Operations performed by each worker thread
    pub demo_ops_per_thread: usize,

    /// Currency code for the demo accounts
    pub demo_currency: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let demo_threads = env::var("LEDGER_DEMO_THREADS")
            .unwrap_or_else(|_| "20".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("LEDGER_DEMO_THREADS"))?;
        if demo_threads == 0 {
            return Err(ConfigError::InvalidValue("LEDGER_DEMO_THREADS"));
        }

        let demo_ops_per_thread = env::var("LEDGER_DEMO_OPS_PER_THREAD")
            .unwrap_or_else(|_| "100".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("LEDGER_DEMO_OPS_PER_THREAD"))?;
        if demo_ops_per_thread == 0 {
            return Err(ConfigError::InvalidValue("LEDGER_DEMO_OPS_PER_THREAD"));
        }

        let demo_currency = env::var("LEDGER_DEMO_CURRENCY").unwrap_or_else(|_| "EUR".to_string());

        Ok(Self {
            demo_threads,
            demo_ops_per_thread,
            demo_currency,
        })
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
