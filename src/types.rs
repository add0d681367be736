// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Common types and errors used throughout the zcc-forward-zones library

use std::collections::HashMap;

/// Error type shared by every pipeline stage
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("Network error: {0}")]
    ConnectivityError(String),

    #[error("Request timeout: {0}")]
    TimeoutError(String),

    #[error("Rate limited: {0}")]
    RateLimitError(String),

    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("Format error: {0}")]
    FormatError(String),

    #[error("File not found: {0}")]
    NotFoundError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    ValidationError(String),
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::FormatError(format!("Error reading CSV file: {}", e))
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::TimeoutError(e.to_string())
        } else {
            Error::ConnectivityError(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// One CSV row: column name to value, in header order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceRecord {
    fields: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl DeviceRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record by zipping headers with row values.
    ///
    /// Missing values become empty strings; extra values are dropped.
    pub fn from_row<'a, H, V>(headers: H, values: V) -> Self
    where
        H: IntoIterator<Item = &'a str>,
        V: IntoIterator<Item = &'a str>,
    {
        let mut record = Self::new();
        let mut values = values.into_iter();
        for header in headers {
            record.insert(header, values.next().unwrap_or(""));
        }
        record
    }

    /// Insert a field. A repeated column name keeps its first position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&pos) => self.fields[pos].1 = value,
            None => {
                self.index.insert(key.clone(), self.fields.len());
                self.fields.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&pos| self.fields[pos].1.as_str())
    }

    /// Column names in header order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DeviceRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// A device record that passed the Windows device filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredDevice {
    /// The original CSV row
    pub record: DeviceRecord,
    /// Trimmed hostname as found in the CSV
    pub hostname: String,
    /// Lower-cased device type
    pub device_type: String,
    /// Lower-cased device state (`registered` when the CSV has no state column)
    pub device_state: String,
}

/// Truncate a response body for operator-facing previews
pub fn body_preview(body: &str, max_chars: usize) -> String {
    body.chars().take(max_chars).collect()
}
