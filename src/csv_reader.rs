// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Device inventory CSV reader
//!
//! Exports differ in column naming and occasionally arrive without a usable
//! header line, so the reader sniffs the first line before choosing a strategy:
//!
//! 1. A first line with a comma and `hostname`/`device` is a header row.
//! 2. Otherwise the first row is scanned for known hostname and device-type
//!    column names; rows shorter than the header are dropped.
//! 3. If no hostname column can be found the first row is used as-is.
//!
//! Files that are not valid UTF-8 are re-read as Latin-1.

use std::path::Path;
use tracing::{debug, info, warn};

use crate::types::{DeviceRecord, Error, Result};

/// Substrings identifying a hostname column in a raw header row
pub const HOSTNAME_HEADER_KEYWORDS: [&str; 4] =
    ["hostname", "machine hostname", "machinehostname", "device name"];

/// Substrings identifying a device-type column in a raw header row
pub const DEVICE_TYPE_HEADER_KEYWORDS: [&str; 5] =
    ["device type", "devicetype", "type", "os", "platform"];

/// Column positions found by keyword scanning of a header row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderColumns {
    pub hostname: Option<usize>,
    pub device_type: Option<usize>,
}

/// Read a device inventory CSV file.
///
/// # Errors
/// - `NotFoundError` if the file does not exist
/// - `FormatError` if the file cannot be parsed or holds no device records
/// - `IoError` on any other read failure
pub async fn read_devices_csv(path: &Path) -> Result<Vec<DeviceRecord>> {
    if !tokio::fs::try_exists(path).await? {
        return Err(Error::NotFoundError(format!(
            "CSV file not found: {}",
            path.display()
        )));
    }

    info!("Reading CSV file: {}", path.display());
    let bytes = tokio::fs::read(path).await?;
    let devices = parse_devices_csv(&bytes)?;

    info!(
        "Successfully read {} device records from {}",
        devices.len(),
        path.display()
    );
    Ok(devices)
}

/// Parse device records from raw CSV bytes
pub fn parse_devices_csv(bytes: &[u8]) -> Result<Vec<DeviceRecord>> {
    let devices = match std::str::from_utf8(bytes) {
        Ok(text) => parse_text(text.strip_prefix('\u{feff}').unwrap_or(text))?,
        Err(e) => {
            warn!("CSV is not valid UTF-8 ({}), retrying as Latin-1", e);
            let text = decode_latin1(bytes);
            read_with_header(&text).map_err(|e| {
                Error::FormatError(format!(
                    "Error reading CSV file with encoding issues: {}",
                    e
                ))
            })?
        }
    };

    if devices.is_empty() {
        return Err(Error::FormatError(
            "No device records found in CSV file".to_string(),
        ));
    }

    Ok(devices)
}

/// Whether the first line of a file looks like a device inventory header
pub fn looks_like_header(first_line: &str) -> bool {
    let lower = first_line.to_lowercase();
    first_line.contains(',') && (lower.contains("hostname") || lower.contains("device"))
}

/// Scan header names for hostname and device-type columns.
///
/// A later matching column replaces an earlier one.
pub fn detect_header_columns<'a, I>(headers: I) -> HeaderColumns
where
    I: IntoIterator<Item = &'a str>,
{
    let mut columns = HeaderColumns::default();
    for (i, header) in headers.into_iter().enumerate() {
        let header = header.trim().to_lowercase();
        if HOSTNAME_HEADER_KEYWORDS.iter().any(|k| header.contains(k)) {
            columns.hostname = Some(i);
        }
        if DEVICE_TYPE_HEADER_KEYWORDS.iter().any(|k| header.contains(k)) {
            columns.device_type = Some(i);
        }
    }
    columns
}

fn parse_text(text: &str) -> Result<Vec<DeviceRecord>> {
    let first_line = text.lines().next().unwrap_or("").trim();
    if looks_like_header(first_line) {
        debug!("Header row detected: {}", first_line);
        return read_with_header(text);
    }

    let rows = read_rows(text)?;
    let Some(header_row) = rows.first() else {
        return Err(Error::FormatError("CSV file is empty".to_string()));
    };

    let columns = detect_header_columns(header_row.iter());
    match columns.hostname {
        None => {
            warn!("Could not detect hostname column. Using column names as provided.");
            read_with_header(text)
        }
        Some(hostname_col) => {
            debug!(
                hostname_col,
                device_type_col = ?columns.device_type,
                "Detected columns by keyword"
            );
            let headers: Vec<&str> = header_row.iter().collect();
            Ok(rows[1..]
                .iter()
                .filter(|row| row.len() >= headers.len())
                .map(|row| DeviceRecord::from_row(headers.iter().copied(), row.iter()))
                .collect())
        }
    }
}

/// First row is the header; every other row maps onto it
fn read_with_header(text: &str) -> Result<Vec<DeviceRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Ok(Vec::new());
    }

    let mut devices = Vec::new();
    for row in reader.records() {
        let row = row?;
        devices.push(DeviceRecord::from_row(headers.iter(), row.iter()));
    }
    Ok(devices)
}

fn read_rows(text: &str) -> Result<Vec<csv::StringRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    reader
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::from)
}

/// Every byte maps to the code point of the same value
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
