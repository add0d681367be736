// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Windows device selection
//!
//! Column roles are resolved once per dataset from the first record's keys with
//! a priority-ordered rule table. Each key is claimed by the first rule whose
//! role is still unassigned and whose pattern matches.

use tracing::{debug, info, warn};

use crate::types::{DeviceRecord, FilteredDevice};

/// What a CSV column holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Hostname,
    DeviceType,
    DeviceState,
}

/// How a rule matches a column name
#[derive(Debug, Clone, Copy)]
pub enum ColumnMatch {
    /// Lower-cased key equals the value
    Exact(&'static str),
    /// Normalized key (lower-case, no spaces or underscores) is in the set
    Normalized(&'static [&'static str]),
}

/// One entry of the column detection table
#[derive(Debug, Clone, Copy)]
pub struct ColumnRule {
    pub role: ColumnRole,
    pub pattern: ColumnMatch,
}

/// Column detection rules in priority order
pub const COLUMN_RULES: [ColumnRule; 4] = [
    ColumnRule {
        role: ColumnRole::DeviceState,
        pattern: ColumnMatch::Exact("device state"),
    },
    ColumnRule {
        role: ColumnRole::DeviceType,
        pattern: ColumnMatch::Normalized(&["devicetype", "type", "osversion", "os", "platform"]),
    },
    ColumnRule {
        role: ColumnRole::Hostname,
        pattern: ColumnMatch::Normalized(&["machinehostname", "hostname", "devicename", "name"]),
    },
    ColumnRule {
        role: ColumnRole::DeviceState,
        pattern: ColumnMatch::Normalized(&["devicestate", "state", "status", "connectionstatus"]),
    },
];

/// Hostname values treated as absent
pub const PLACEHOLDER_HOSTNAMES: [&str; 4] = ["unknown", "n/a", "null", ""];

/// Device-type substrings identifying Windows
pub const WINDOWS_KEYWORDS: [&str; 2] = ["windows", "win"];

/// Accepted device states
pub const VALID_STATES: [&str; 2] = ["registered", "unregistered"];

/// State assumed when the export has no state column
pub const DEFAULT_DEVICE_STATE: &str = "registered";

/// Column names resolved for a dataset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectedColumns {
    pub hostname: Option<String>,
    pub device_type: Option<String>,
    pub device_state: Option<String>,
}

impl DetectedColumns {
    fn slot(&mut self, role: ColumnRole) -> &mut Option<String> {
        match role {
            ColumnRole::Hostname => &mut self.hostname,
            ColumnRole::DeviceType => &mut self.device_type,
            ColumnRole::DeviceState => &mut self.device_state,
        }
    }

    fn is_complete(&self) -> bool {
        self.hostname.is_some() && self.device_type.is_some() && self.device_state.is_some()
    }
}

impl ColumnMatch {
    fn matches(&self, key: &str, normalized: &str) -> bool {
        match self {
            ColumnMatch::Exact(name) => key.to_lowercase() == *name,
            ColumnMatch::Normalized(names) => names.contains(&normalized),
        }
    }
}

/// Lower-case and drop spaces and underscores
pub fn normalize_column_name(key: &str) -> String {
    key.to_lowercase().replace([' ', '_'], "")
}

/// Resolve column roles from a record's keys
pub fn detect_columns(record: &DeviceRecord) -> DetectedColumns {
    let mut columns = DetectedColumns::default();

    for key in record.keys() {
        let normalized = normalize_column_name(key);
        for rule in &COLUMN_RULES {
            let slot = columns.slot(rule.role);
            if slot.is_none() && rule.pattern.matches(key, &normalized) {
                *slot = Some(key.to_string());
                break;
            }
        }
        if columns.is_complete() {
            break;
        }
    }

    columns
}

/// Keep Windows devices with a usable hostname in state registered or unregistered.
///
/// Returns an empty list, with a warning, when the hostname or device-type
/// column cannot be determined.
pub fn filter_windows_devices(devices: &[DeviceRecord]) -> Vec<FilteredDevice> {
    info!("Filtering Windows devices (registered/unregistered only)");

    let Some(first) = devices.first() else {
        return Vec::new();
    };

    let columns = detect_columns(first);
    let (Some(hostname_key), Some(device_type_key)) = (&columns.hostname, &columns.device_type)
    else {
        warn!(
            "Could not find device type or hostname fields. Available fields: {:?}...",
            first.keys().take(5).collect::<Vec<_>>()
        );
        return Vec::new();
    };

    match &columns.device_state {
        Some(state_key) => debug!("Device state field: '{}'", state_key),
        None => warn!(
            "Could not find device state field - proceeding without state filtering. Available fields: {:?}...",
            first.keys().take(10).collect::<Vec<_>>()
        ),
    }
    info!(
        "Using fields - Device type: '{}', Hostname: '{}'",
        device_type_key, hostname_key
    );

    let windows_devices: Vec<FilteredDevice> = devices
        .iter()
        .filter_map(|device| {
            let hostname = device.get(hostname_key).unwrap_or("").trim();
            let device_type = device.get(device_type_key).unwrap_or("").to_lowercase();
            let device_state = match &columns.device_state {
                Some(key) => device.get(key).unwrap_or("").to_lowercase(),
                None => DEFAULT_DEVICE_STATE.to_string(),
            };

            let keep = is_valid_hostname(hostname)
                && is_windows(&device_type)
                && VALID_STATES.contains(&device_state.as_str());

            keep.then(|| FilteredDevice {
                record: device.clone(),
                hostname: hostname.to_string(),
                device_type,
                device_state,
            })
        })
        .collect();

    info!(
        "Found {} Windows devices with valid hostnames and registered/unregistered state",
        windows_devices.len()
    );
    windows_devices
}

fn is_valid_hostname(hostname: &str) -> bool {
    !hostname.is_empty() && !PLACEHOLDER_HOSTNAMES.contains(&hostname.to_lowercase().as_str())
}

fn is_windows(device_type: &str) -> bool {
    WINDOWS_KEYWORDS.iter().any(|k| device_type.contains(k))
}
