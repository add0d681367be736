// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! zcc-forward-zones - Zscaler device inventory to Unbound forward zones
//!
//! Two tools that run one after the other, sharing nothing but a CSV file:
//!
//! - `download-devices`: OAuth2 client-credentials login against Zscaler
//!   Identity, then download of the device inventory CSV export
//! - `generate-forward-zones`: CSV parsing, Windows device selection, hostname
//!   deduplication and Unbound `forward-zone:` generation
//!
//! # Usage
//!
//! ## As a Library
//!
//! ### Generating forward zones
//!
//! ```rust
//! use zcc_forward_zones::{
//!     csv_reader::parse_devices_csv,
//!     device_filter::filter_windows_devices,
//!     forward_zones::generate_forward_zones_config,
//! };
//!
//! let csv = "Hostname,Device Type,Device State\nPC01.corp.local,Windows 10,Registered\n";
//! let devices = parse_devices_csv(csv.as_bytes()).unwrap();
//! let windows = filter_windows_devices(&devices);
//!
//! let document = generate_forward_zones_config(&windows, "10.0.0.1,10.0.0.2", "test.local");
//! assert!(document.content.contains("name: \"pc01.test.local\""));
//! assert!(document.content.contains("forward-addr: 10.0.0.2"));
//! ```
//!
//! ### Downloading the device CSV
//!
//! ```rust,no_run
//! use zcc_forward_zones::{auth::Authenticator, config::ClientConfig, download::Downloader};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ClientConfig::from_env()?;
//!
//!     let token = Authenticator::new(&config)?.authenticate().await?;
//!     let summary = Downloader::new(&config)?
//!         .download_devices_csv(&token, std::path::Path::new("devices.csv"))
//!         .await?;
//!     println!("{} bytes written", summary.bytes);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## As Binaries
//!
//! ```bash
//! download-devices devices.csv
//! generate-forward-zones devices.csv zones.conf 10.0.0.12,10.0.0.13 --domain corp.local
//! ```

// Re-export public modules
pub mod auth;
pub mod cli;
pub mod config;
pub mod csv_reader;
pub mod dedup;
pub mod device_filter;
pub mod download;
pub mod forward_zones;
pub mod logging;
pub mod pipeline;
pub mod types;
pub mod writer;

// Re-export commonly used types

// Error types
pub use types::{DeviceRecord, Error, FilteredDevice, Result};

// Client types
pub use auth::{AccessToken, Authenticator};
pub use config::ClientConfig;
pub use download::{DownloadSummary, Downloader};

// Forward zone types
pub use forward_zones::{ForwardZoneConfig, ForwardZonesDocument, GenerationOutcome};

#[cfg(test)]
mod cli_test;
#[cfg(test)]
mod csv_reader_test;
#[cfg(test)]
mod device_filter_test;
#[cfg(test)]
mod writer_test;
