// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! OAuth2 client-credentials authentication against Zscaler Identity
//!
//! The token obtained here lives only for the process lifetime and is handed
//! to the downloader as an explicit [`AccessToken`] value.

use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::config::ClientConfig;
use crate::types::{Error, Result};

/// Audience requested for Zscaler One API tokens
pub const OAUTH_AUDIENCE: &str = "https://api.zscaler.com";

/// Token request timeout
pub const AUTH_TIMEOUT: Duration = Duration::from_secs(30);

/// Bearer token returned by the identity provider
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    token: String,
    /// Lifetime in seconds, if the provider reported one
    pub expires_in: Option<u64>,
}

impl AccessToken {
    pub fn new(token: impl Into<String>, expires_in: Option<u64>) -> Self {
        Self {
            token: token.into(),
            expires_in,
        }
    }

    pub fn secret(&self) -> &str {
        &self.token
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    expires_in: Option<u64>,
}

/// Accept `expires_in` as either a JSON number or a numeric string
fn lenient_u64<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_u64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// OAuth2 client-credentials authenticator
pub struct Authenticator {
    client: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl Authenticator {
    /// Create a new authenticator
    ///
    /// # Errors
    /// Returns `ConnectivityError` if the HTTP client cannot be built
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Self::with_timeout(config, AUTH_TIMEOUT)
    }

    pub fn with_timeout(config: &ClientConfig, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::ConnectivityError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            token_url: config.token_url(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        })
    }

    /// Exchange the client credentials for a bearer token.
    ///
    /// Single attempt, no retry.
    ///
    /// # Errors
    /// - `ConnectivityError` / `TimeoutError` on transport failure
    /// - `AuthError` on a non-200 response or a response without `access_token`
    pub async fn authenticate(&self) -> Result<AccessToken> {
        info!("Authenticating with Zscaler One API");
        debug!(url = %self.token_url, client_id = %self.client_id, "OAuth token request");

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("audience", OAUTH_AUDIENCE),
        ];

        let response = self
            .client
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                error!("Authentication request failed: {}", e);
                Error::from(e)
            })?;

        let status = response.status();
        let body = response.text().await?;

        if status != reqwest::StatusCode::OK {
            error!(status = status.as_u16(), "Authentication failed");
            return Err(Error::AuthError(format!(
                "HTTP {} - {}",
                status.as_u16(),
                body
            )));
        }

        let parsed: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| Error::AuthError(format!("Invalid token response: {}", e)))?;

        let token = parsed
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::AuthError("No access token received".to_string()))?;

        match parsed.expires_in {
            Some(secs) => info!("Authentication successful (expires in {} seconds)", secs),
            None => info!("Authentication successful (expires in Unknown seconds)"),
        }

        Ok(AccessToken::new(token, parsed.expires_in))
    }
}
