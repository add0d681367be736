// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! End-to-end pipelines behind the two binaries
//!
//! - Download: authenticate → download CSV
//! - Generate: read CSV → filter → deduplicate → render → write
//!
//! Each stage consumes the previous stage's complete output. Nothing is retried.

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::auth::Authenticator;
use crate::cli::GenerateArgs;
use crate::config::ClientConfig;
use crate::csv_reader::read_devices_csv;
use crate::device_filter::filter_windows_devices;
use crate::download::{default_filename, DownloadSummary, Downloader};
use crate::forward_zones::{
    generate_forward_zones_config, split_dns_ips, validate_dns_ip, ForwardZonesDocument,
    HEADER_LINES,
};
use crate::types::{Error, FilteredDevice, Result};
use crate::writer::save_config_file;

/// Zone count above which only the header is previewed
pub const FULL_PREVIEW_MAX_ZONES: usize = 100;

/// Lines shown in a full preview
pub const PREVIEW_LINES: usize = 15;

/// Sample devices shown in verbose mode
pub const VERBOSE_SAMPLE_DEVICES: usize = 3;

/// Above this many matches verbose mode skips the samples
pub const VERBOSE_SAMPLE_MAX_DEVICES: usize = 10;

/// Columns listed in verbose mode
pub const VERBOSE_MAX_COLUMNS: usize = 10;

// ========== Download ==========

/// Output path for the download and whether it was generated
pub fn resolve_output_path(output: Option<PathBuf>) -> (PathBuf, bool) {
    match output {
        Some(path) => (path, false),
        None => (PathBuf::from(default_filename()), true),
    }
}

/// Authenticate and download the devices CSV to `destination`
pub async fn run_download(config: &ClientConfig, destination: &Path) -> Result<DownloadSummary> {
    let authenticator = Authenticator::new(config)?;
    let token = authenticator.authenticate().await?;

    let downloader = Downloader::new(config)?;
    downloader.download_devices_csv(&token, destination).await
}

// ========== Generate ==========

/// What a generate run produced
#[derive(Debug, Clone)]
pub struct GenerateSummary {
    pub devices_read: usize,
    /// Column names of the first record
    pub columns: Vec<String>,
    pub windows_devices: Vec<FilteredDevice>,
    pub document: ForwardZonesDocument,
}

impl GenerateSummary {
    /// Zones in the written document, counted from its `name:` lines
    pub fn zone_count(&self) -> usize {
        count_zones(&self.document.content)
    }

    /// Devices that collapsed onto an existing zone
    pub fn duplicates_removed(&self) -> usize {
        self.windows_devices.len().saturating_sub(self.zone_count())
    }
}

/// Validate the DNS IP argument before any file is touched.
///
/// # Errors
/// `ValidationError` if no address is given or any address is invalid
pub fn validate_dns_ips_argument(dns_ips: &str) -> Result<Vec<String>> {
    let candidates = split_dns_ips(dns_ips);
    if candidates.is_empty() {
        return Err(Error::ValidationError(
            "No DNS IP addresses provided. Please provide at least one valid IPv4 address (e.g., 10.213.182.62)"
                .to_string(),
        ));
    }

    let invalid: Vec<&str> = candidates
        .iter()
        .map(String::as_str)
        .filter(|ip| !validate_dns_ip(ip))
        .collect();
    if !invalid.is_empty() {
        return Err(Error::ValidationError(format!(
            "Invalid DNS IP address(es): {}. Please provide valid IPv4 addresses (e.g., 10.213.182.62,192.168.1.1)",
            invalid.join(", ")
        )));
    }

    Ok(candidates)
}

/// Run the CSV → forward zones pipeline.
///
/// With `args.verbose`, the column listing is passed to `report` as soon as
/// the CSV is read, and the sample devices once filtering has matched.
///
/// # Errors
/// - `ValidationError` for bad DNS IPs
/// - `NotFoundError` / `FormatError` from the CSV reader
/// - `FormatError` when no Windows device matches
/// - `IoError` when the output cannot be written
pub async fn run_generate<R>(args: &GenerateArgs, mut report: R) -> Result<GenerateSummary>
where
    R: FnMut(&str),
{
    validate_dns_ips_argument(&args.dns_ips)?;

    info!("Step 1: Reading CSV file");
    let devices = read_devices_csv(&args.input_csv_file).await?;
    let columns: Vec<String> = devices
        .first()
        .map(|d| d.keys().map(str::to_string).collect())
        .unwrap_or_default();
    if args.verbose {
        report(&describe_columns(&columns));
    }

    info!("Step 2: Filtering Windows devices");
    let windows_devices = filter_windows_devices(&devices);
    if windows_devices.is_empty() {
        return Err(Error::FormatError(
            "No Windows devices found in the CSV file. Make sure the CSV contains devices with 'WINDOWS' in the device type field"
                .to_string(),
        ));
    }
    if args.verbose {
        for line in describe_samples(&windows_devices) {
            report(&line);
        }
        report("");
    }

    info!("Step 3: Generating forward zones configuration");
    let document = generate_forward_zones_config(&windows_devices, &args.dns_ips, &args.domain);

    info!("Step 4: Saving configuration file");
    save_config_file(&document.content, &args.output_conf_file).await?;

    if document.is_failure() {
        warn!(
            "Placeholder written to {}",
            args.output_conf_file.display()
        );
        return Err(Error::ValidationError(
            "No valid DNS IPs found after validation".to_string(),
        ));
    }

    Ok(GenerateSummary {
        devices_read: devices.len(),
        columns,
        windows_devices,
        document,
    })
}

// ========== Reporting ==========

/// Count `name:` lines in a rendered configuration
pub fn count_zones(content: &str) -> usize {
    content
        .split('\n')
        .filter(|line| line.trim().starts_with("name:"))
        .count()
}

/// Operator preview of a generated configuration.
///
/// Small configurations show their first lines; large ones only the header.
pub fn render_preview(content: &str, zone_count: usize) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut preview = Vec::new();

    if zone_count <= FULL_PREVIEW_MAX_ZONES {
        preview.push("-".repeat(40));
        preview.extend(lines.iter().take(PREVIEW_LINES).map(|l| l.to_string()));
        if lines.len() > PREVIEW_LINES {
            preview.push("...".to_string());
            preview.push(format!("[{} more lines]", lines.len() - PREVIEW_LINES));
        }
    } else {
        preview.push(format!(
            "Large configuration file generated ({} zones)",
            zone_count
        ));
        preview.push(format!("File size: ~{} characters", content.chars().count()));
        preview.push("Header preview:".to_string());
        preview.push("-".repeat(20));
        preview.extend(lines.iter().take(HEADER_LINES).map(|l| l.to_string()));
    }

    preview.join("\n")
}

/// Column listing for verbose mode
pub fn describe_columns(columns: &[String]) -> String {
    if columns.len() > VERBOSE_MAX_COLUMNS {
        format!(
            "Available columns ({} total): {:?}...",
            columns.len(),
            &columns[..VERBOSE_MAX_COLUMNS]
        )
    } else {
        format!("Available columns: {:?}", columns)
    }
}

/// Sample device listing for verbose mode
pub fn describe_samples(devices: &[FilteredDevice]) -> Vec<String> {
    if devices.len() > VERBOSE_SAMPLE_MAX_DEVICES {
        return vec![format!(
            "Large dataset detected ({} devices) - skipping sample output",
            devices.len()
        )];
    }

    let mut lines = vec!["Sample Windows devices found:".to_string()];
    for (i, device) in devices.iter().take(VERBOSE_SAMPLE_DEVICES).enumerate() {
        lines.push(format!(
            "  {}. {} ({})",
            i + 1,
            device.hostname,
            device.device_type
        ));
    }
    if devices.len() > VERBOSE_SAMPLE_DEVICES {
        lines.push(format!(
            "  ... and {} more",
            devices.len() - VERBOSE_SAMPLE_DEVICES
        ));
    }
    lines
}
