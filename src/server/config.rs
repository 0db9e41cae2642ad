use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::core::{DEFAULT_DUE_DAYS, NumericMode};
use crate::store::StoreOptions;

/// Server settings, read from an optional `invoicing.toml` and
/// `INVOICING__*` environment variables (a `.env` file is honoured).
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory served for paths outside the API, e.g. a browser UI.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
    /// Reject malformed numbers instead of zeroing them.
    #[serde(default)]
    pub strict_numbers: bool,
    #[serde(default = "default_due_days")]
    pub due_days: i64,
    #[serde(default)]
    pub invoice_prefix: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_due_days() -> i64 {
    DEFAULT_DUE_DAYS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            static_dir: None,
            strict_numbers: false,
            due_days: default_due_days(),
            invoice_prefix: String::new(),
        }
    }
}

impl ServerConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        Config::builder()
            .add_source(File::with_name("invoicing").required(false))
            .add_source(Environment::with_prefix("INVOICING").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn numeric_mode(&self) -> NumericMode {
        if self.strict_numbers {
            NumericMode::Strict
        } else {
            NumericMode::Lenient
        }
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            numeric_mode: self.numeric_mode(),
            due_days: self.due_days,
            invoice_prefix: self.invoice_prefix.clone(),
        }
    }
}
