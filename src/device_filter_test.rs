// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for device_filter module

use super::device_filter::*;
use crate::types::DeviceRecord;

fn device(hostname: &str, device_type: &str, state: &str) -> DeviceRecord {
    vec![
        ("Hostname", hostname),
        ("Device Type", device_type),
        ("Device State", state),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_detect_columns_standard_export() {
    let columns = detect_columns(&device("pc01", "Windows 10", "Registered"));

    assert_eq!(columns.hostname.as_deref(), Some("Hostname"));
    assert_eq!(columns.device_type.as_deref(), Some("Device Type"));
    assert_eq!(columns.device_state.as_deref(), Some("Device State"));
}

#[test]
fn test_detect_columns_normalized_names() {
    let record: DeviceRecord = vec![
        ("machine_hostname", "pc01"),
        ("OS_Version", "Windows 11"),
        ("Connection Status", "registered"),
    ]
    .into_iter()
    .collect();

    let columns = detect_columns(&record);
    assert_eq!(columns.hostname.as_deref(), Some("machine_hostname"));
    assert_eq!(columns.device_type.as_deref(), Some("OS_Version"));
    assert_eq!(columns.device_state.as_deref(), Some("Connection Status"));
}

#[test]
fn test_detect_columns_first_match_wins() {
    let record: DeviceRecord = vec![
        ("Name", "pc01"),
        ("Hostname", "pc01.corp.local"),
        ("Type", "Windows"),
        ("Platform", "x64"),
        ("Status", "Registered"),
    ]
    .into_iter()
    .collect();

    let columns = detect_columns(&record);
    assert_eq!(columns.hostname.as_deref(), Some("Name"));
    assert_eq!(columns.device_type.as_deref(), Some("Type"));
    assert_eq!(columns.device_state.as_deref(), Some("Status"));
}

#[test]
fn test_detect_columns_missing_roles() {
    let record: DeviceRecord = vec![("Computer", "pc01"), ("Owner", "jane")]
        .into_iter()
        .collect();
    assert_eq!(detect_columns(&record), DetectedColumns::default());
}

#[test]
fn test_normalize_column_name() {
    assert_eq!(normalize_column_name("Machine Hostname"), "machinehostname");
    assert_eq!(normalize_column_name("device_state"), "devicestate");
    assert_eq!(normalize_column_name("OS"), "os");
}

#[test]
fn test_filter_includes_registered_windows() {
    let devices = vec![device("PC01", "Windows 10", "Registered")];
    let filtered = filter_windows_devices(&devices);

    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].hostname, "PC01");
    assert_eq!(filtered[0].device_type, "windows 10");
    assert_eq!(filtered[0].device_state, "registered");
    assert_eq!(filtered[0].record.get("Hostname"), Some("PC01"));
}

#[test]
fn test_filter_excludes_linux_and_disabled() {
    let devices = vec![
        device("pc01", "Windows 10", "Registered"),
        device("srv01", "Linux", "Registered"),
        device("pc02", "Windows 11", "disabled"),
        device("pc03", "WIN", "Unregistered"),
        device("mac01", "macOS", "Unregistered"),
    ];

    let hostnames: Vec<String> = filter_windows_devices(&devices)
        .into_iter()
        .map(|d| d.hostname)
        .collect();
    assert_eq!(hostnames, vec!["pc01", "pc03"]);
}

#[test]
fn test_filter_excludes_placeholder_hostnames() {
    let devices = vec![
        device("", "Windows 10", "Registered"),
        device("   ", "Windows 10", "Registered"),
        device("Unknown", "Windows 10", "Registered"),
        device("N/A", "Windows 10", "Registered"),
        device("null", "Windows 10", "Registered"),
        device("  pc01  ", "Windows 10", "Registered"),
    ];

    let filtered = filter_windows_devices(&devices);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].hostname, "pc01");
}

#[test]
fn test_filter_without_state_column_treats_as_registered() {
    let devices: Vec<DeviceRecord> = vec![
        vec![("Hostname", "pc01"), ("OS", "Windows 10")]
            .into_iter()
            .collect(),
        vec![("Hostname", "srv01"), ("OS", "Ubuntu")]
            .into_iter()
            .collect(),
    ];

    let filtered = filter_windows_devices(&devices);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].device_state, DEFAULT_DEVICE_STATE);
}

#[test]
fn test_filter_without_hostname_column_is_empty() {
    let devices: Vec<DeviceRecord> = vec![vec![("Computer", "pc01"), ("OS", "Windows 10")]
        .into_iter()
        .collect()];
    assert!(filter_windows_devices(&devices).is_empty());
}

#[test]
fn test_filter_empty_input() {
    assert!(filter_windows_devices(&[]).is_empty());
}

#[test]
fn test_filter_state_is_compared_untrimmed() {
    let devices = vec![
        device("pc01", "Windows 10", " registered"),
        device("pc02", "Windows 10", "Registered"),
        device("pc03", "Windows 10", "unregistered "),
    ];

    let filtered = filter_windows_devices(&devices);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].hostname, "pc02");
    assert_eq!(filtered[0].device_state, "registered");
}
