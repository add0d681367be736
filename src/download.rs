// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Device CSV export download
//!
//! Fetches the `downloadDevices` export from the Zscaler One API with a bearer
//! token and writes the raw body to disk. Every failure is terminal; nothing is
//! retried.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::auth::AccessToken;
use crate::config::ClientConfig;
use crate::types::{body_preview, Error, Result};

/// Download request timeout
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// Characters of the response body shown in error previews
pub const PREVIEW_CHARS: usize = 200;

/// Content types accepted as a CSV export
const ACCEPTED_CONTENT_TYPES: [&str; 2] = ["application/octet-stream", "text/csv"];

/// Result of a successful download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSummary {
    pub path: PathBuf,
    pub bytes: usize,
    /// Newline count of the body, header line included
    pub estimated_records: usize,
    pub content_type: String,
}

/// Device CSV downloader
pub struct Downloader {
    client: reqwest::Client,
    download_url: String,
}

impl Downloader {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Self::with_timeout(config, DOWNLOAD_TIMEOUT)
    }

    pub fn with_timeout(config: &ClientConfig, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::ConnectivityError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            download_url: config.download_url(),
        })
    }

    /// Download the devices CSV to `destination`.
    ///
    /// # Errors
    /// - `AuthError` if the token is empty or the API answers 401
    /// - `RateLimitError` on 429
    /// - `FormatError` on 200 with a non-CSV content type
    /// - `HttpError` on any other status
    /// - `TimeoutError` / `ConnectivityError` on transport failure
    /// - `IoError` if the file cannot be written
    pub async fn download_devices_csv(
        &self,
        token: &AccessToken,
        destination: &Path,
    ) -> Result<DownloadSummary> {
        if token.secret().is_empty() {
            return Err(Error::AuthError(
                "Not authenticated - no access token".to_string(),
            ));
        }

        info!("Downloading devices CSV to: {}", destination.display());
        let start = Instant::now();

        let response = self
            .client
            .get(&self.download_url)
            .header(reqwest::header::AUTHORIZATION, token.bearer())
            .header(reqwest::header::ACCEPT, "*/*")
            .send()
            .await
            .map_err(|e| {
                error!("Download request failed: {}", e);
                Error::from(e)
            })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        debug!(
            status = status.as_u16(),
            content_type = %content_type,
            elapsed = ?start.elapsed(),
            "Download response received"
        );

        match status.as_u16() {
            200 => {}
            401 => {
                warn!("Download failed: Unauthorized (401)");
                return Err(Error::AuthError(
                    "Unauthorized (401) - token may have expired or lack necessary permissions"
                        .to_string(),
                ));
            }
            429 => {
                warn!("Download failed: Rate limited (429)");
                return Err(Error::RateLimitError(
                    "Too many API requests (429) - please wait before retrying".to_string(),
                ));
            }
            code => {
                let body = response.text().await.unwrap_or_default();
                error!(status = code, "Download failed");
                return Err(Error::HttpError {
                    status: code,
                    body: body_preview(&body, PREVIEW_CHARS),
                });
            }
        }

        let body = response.bytes().await?;

        if !is_csv_content_type(&content_type) {
            let preview = body_preview(&String::from_utf8_lossy(&body), PREVIEW_CHARS);
            error!("Unexpected content type: {}", content_type);
            return Err(Error::FormatError(format!(
                "Unexpected content type: {} (response preview: {})",
                content_type, preview
            )));
        }

        tokio::fs::write(destination, &body).await.map_err(|e| {
            error!(
                "Failed to write CSV file {}: {}",
                destination.display(),
                e
            );
            Error::IoError(e)
        })?;

        let summary = DownloadSummary {
            path: destination.to_path_buf(),
            bytes: body.len(),
            estimated_records: count_newlines(&body),
            content_type,
        };

        info!(
            bytes = summary.bytes,
            estimated_records = summary.estimated_records,
            elapsed = ?start.elapsed(),
            "Downloaded devices CSV to {}",
            destination.display()
        );

        Ok(summary)
    }
}

/// Whether a `Content-Type` header value denotes a CSV export
pub fn is_csv_content_type(content_type: &str) -> bool {
    ACCEPTED_CONTENT_TYPES
        .iter()
        .any(|accepted| content_type.contains(accepted))
}

fn count_newlines(body: &[u8]) -> usize {
    body.iter().filter(|&&b| b == b'\n').count()
}

/// Default export filename: `zscaler_devices_<YYYYMMDD_HHMMSS>.csv`
pub fn default_filename() -> String {
    default_filename_at(chrono::Local::now())
}

pub fn default_filename_at<Tz>(now: chrono::DateTime<Tz>) -> String
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("zscaler_devices_{}.csv", now.format("%Y%m%d_%H%M%S"))
}
