// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zscaler One API client configuration
//!
//! Credentials are read from the environment before any network call is made.
//! A `.env` file in the working directory (or a parent) is loaded first;
//! variables already set in the process take precedence.
//!
//! Environment variables:
//! - `ZSCALER_IDENTITY_BASE_URL`: Zscaler Identity base URL (required)
//! - `ZSCALER_CLIENT_ID`: OAuth client id (required)
//! - `ZSCALER_CLIENT_SECRET`: OAuth client secret (required)
//! - `ZSCALER_API_BASE_URL`: API base URL (default: `https://api.zsapi.net`)

use std::fmt;
use tracing::debug;

use crate::types::{Error, Result};

pub const ENV_IDENTITY_BASE_URL: &str = "ZSCALER_IDENTITY_BASE_URL";
pub const ENV_CLIENT_ID: &str = "ZSCALER_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "ZSCALER_CLIENT_SECRET";
pub const ENV_API_BASE_URL: &str = "ZSCALER_API_BASE_URL";

/// Default Zscaler One API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://api.zsapi.net";

/// Example environment shown when required variables are missing
pub const EXAMPLE_ENV: &str = "\
ZSCALER_IDENTITY_BASE_URL=https://[YOUR-ID].zslogin.net
ZSCALER_CLIENT_ID=your_client_id
ZSCALER_CLIENT_SECRET=your_client_secret";

/// OAuth client configuration
#[derive(Clone)]
pub struct ClientConfig {
    /// Identity base URL, without trailing slash
    pub identity_base_url: String,
    pub client_id: String,
    pub client_secret: String,
    /// API base URL, without trailing slash
    pub api_base_url: String,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("identity_base_url", &self.identity_base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl ClientConfig {
    /// Create configuration from environment variables, after loading `.env`
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create configuration from an arbitrary variable lookup.
    ///
    /// Empty values count as missing. All missing names are reported together.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let identity_base_url = get(ENV_IDENTITY_BASE_URL);
        let client_id = get(ENV_CLIENT_ID);
        let client_secret = get(ENV_CLIENT_SECRET);

        match (identity_base_url, client_id, client_secret) {
            (Some(identity_base_url), Some(client_id), Some(client_secret)) => {
                let api_base_url =
                    get(ENV_API_BASE_URL).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
                Ok(Self {
                    identity_base_url: identity_base_url.trim_end_matches('/').to_string(),
                    client_id,
                    client_secret,
                    api_base_url: api_base_url.trim_end_matches('/').to_string(),
                })
            }
            (identity_base_url, client_id, client_secret) => {
                let missing: Vec<&str> = [
                    (ENV_IDENTITY_BASE_URL, identity_base_url.is_none()),
                    (ENV_CLIENT_ID, client_id.is_none()),
                    (ENV_CLIENT_SECRET, client_secret.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, is_missing)| is_missing.then_some(name))
                .collect();
                Err(Error::ConfigError(missing_vars_message(&missing)))
            }
        }
    }

    /// OAuth token endpoint
    pub fn token_url(&self) -> String {
        format!("{}/oauth2/v1/token", self.identity_base_url)
    }

    /// Device CSV export endpoint
    pub fn download_url(&self) -> String {
        format!("{}/zcc/papi/public/v1/downloadDevices", self.api_base_url)
    }
}

fn missing_vars_message(missing: &[&str]) -> String {
    let mut message = String::from("Missing required environment variables:\n");
    for name in missing {
        message.push_str(&format!("  - {}\n", name));
    }
    message.push_str("\nPlease set these in your environment or in a .env file.\nExample:\n");
    message.push_str(EXAMPLE_ENV);
    message
}
