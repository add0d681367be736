// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Hostname normalization and deduplication

use std::collections::BTreeSet;
use tracing::info;

use crate::types::FilteredDevice;

/// Normalized hostnames that are never emitted as zones
pub const INVALID_HOSTNAMES: [&str; 5] = ["unknown", "n/a", "null", "localhost", ""];

/// Outcome of a deduplication pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupReport {
    /// Unique hostnames in ascending order
    pub hostnames: Vec<String>,
    /// Non-empty hostnames seen
    pub original: usize,
    pub duplicates: usize,
    pub invalid: usize,
}

/// Lower-case, trim and drop any domain suffix.
///
/// Returns `None` for empty or placeholder names.
pub fn normalize_hostname(hostname: &str) -> Option<String> {
    let lower = hostname.trim().to_lowercase();
    let short = match lower.find('.') {
        Some(dot) => &lower[..dot],
        None => lower.as_str(),
    };

    if INVALID_HOSTNAMES.contains(&short) {
        None
    } else {
        Some(short.to_string())
    }
}

/// Deduplicate raw hostnames into a sorted unique list
pub fn deduplicate<'a, I>(hostnames: I) -> DedupReport
where
    I: IntoIterator<Item = &'a str>,
{
    let mut unique = BTreeSet::new();
    let mut original = 0;
    let mut invalid = 0;

    for hostname in hostnames {
        if hostname.trim().is_empty() {
            continue;
        }
        original += 1;

        match normalize_hostname(hostname) {
            Some(name) => {
                unique.insert(name);
            }
            None => invalid += 1,
        }
    }

    let hostnames: Vec<String> = unique.into_iter().collect();
    let duplicates = original - hostnames.len() - invalid;

    DedupReport {
        hostnames,
        original,
        duplicates,
        invalid,
    }
}

/// Deduplicate the hostnames of filtered devices
pub fn deduplicate_hostnames(devices: &[FilteredDevice]) -> DedupReport {
    info!("Performing hostname deduplication");

    let report = deduplicate(devices.iter().map(|d| d.hostname.as_str()));

    info!(
        original = report.original,
        unique = report.hostnames.len(),
        duplicates = report.duplicates,
        invalid = report.invalid,
        "Hostname deduplication results"
    );

    report
}
