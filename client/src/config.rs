// client/src/config.rs

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the backend. Loaded from defaults, then an
/// optional config file, then `CLINIC_*` environment variables, in that
/// order of precedence (later wins).
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        // A `.env` next to the binary is honored when present.
        let _ = dotenvy::dotenv();

        let mut builder = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path.to_path_buf()));
        }

        builder = builder.add_source(Environment::with_prefix("CLINIC"));

        let cfg = builder
            .build()
            .context("failed to assemble client configuration")?;
        cfg.try_deserialize()
            .context("failed to parse client configuration")
    }

    /// Joins a resource path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
