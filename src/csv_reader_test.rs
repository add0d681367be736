// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for csv_reader module

use super::csv_reader::*;
use crate::types::Error;
use tempfile::TempDir;

#[test]
fn test_parse_with_header_row() {
    let csv = "Hostname,Device Type,Device State\npc01,Windows 10,Registered\nmac01,macOS,Registered\n";
    let devices = parse_devices_csv(csv.as_bytes()).unwrap();

    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].get("Hostname"), Some("pc01"));
    assert_eq!(devices[0].get("Device Type"), Some("Windows 10"));
    assert_eq!(devices[1].get("Device State"), Some("Registered"));
}

#[test]
fn test_parse_quoted_fields() {
    let csv = "Machine Hostname,Device Type,Owner\n\"pc01\",\"Windows 10, Enterprise\",\"Doe, Jane\"\n";
    let devices = parse_devices_csv(csv.as_bytes()).unwrap();

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].get("Device Type"), Some("Windows 10, Enterprise"));
    assert_eq!(devices[0].get("Owner"), Some("Doe, Jane"));
}

#[test]
fn test_parse_short_rows_padded_in_header_mode() {
    let csv = "Hostname,Device Type,Device State\npc01,Windows 10\n";
    let devices = parse_devices_csv(csv.as_bytes()).unwrap();

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].get("Device State"), Some(""));
}

#[test]
fn test_parse_strips_byte_order_mark() {
    let csv = "\u{feff}Hostname,Device Type\npc01,Windows\n";
    let devices = parse_devices_csv(csv.as_bytes()).unwrap();
    assert_eq!(devices[0].get("Hostname"), Some("pc01"));
}

#[test]
fn test_parse_keyword_detection_drops_short_rows() {
    // No comma on the first line: sniffing fails, keyword scan still finds
    // the hostname column.
    let csv = "Machine_Hostname;x\n";
    let devices = parse_devices_csv(csv.as_bytes());
    assert!(matches!(devices, Err(Error::FormatError(_))));

    // Header cell spans two physical lines, so the first line has no comma.
    let csv = "\"Machine Hostname\n\",Platform\npc01,Windows\nshort\npc03,Windows\n";
    let devices = parse_devices_csv(csv.as_bytes()).unwrap();

    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].get("Machine Hostname\n"), Some("pc01"));
    assert_eq!(devices[1].get("Machine Hostname\n"), Some("pc03"));
}

#[test]
fn test_parse_without_hostname_column_falls_back() {
    let csv = "Computer,Platform\nA,Windows\nB,Linux\n";
    let devices = parse_devices_csv(csv.as_bytes()).unwrap();

    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].get("Computer"), Some("A"));
}

#[test]
fn test_parse_empty_file() {
    let err = parse_devices_csv(b"").unwrap_err();
    assert!(matches!(err, Error::FormatError(ref m) if m.contains("empty")));
}

#[test]
fn test_parse_header_only() {
    let err = parse_devices_csv(b"Hostname,Device Type,Device State\n").unwrap_err();
    assert!(matches!(err, Error::FormatError(ref m) if m.contains("No device records")));
}

#[test]
fn test_parse_latin1_fallback() {
    let mut bytes = b"Hostname,Device Type,Owner\npc01,Windows 10,Ren".to_vec();
    bytes.push(0xE9); // 'é' in Latin-1, invalid as UTF-8
    bytes.extend_from_slice(b"\n");

    let devices = parse_devices_csv(&bytes).unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].get("Owner"), Some("René"));
}

#[test]
fn test_looks_like_header() {
    assert!(looks_like_header("Hostname,Type"));
    assert!(looks_like_header("Device Name,OS"));
    assert!(!looks_like_header("Hostname"));
    assert!(!looks_like_header("Name,OS"));
}

#[test]
fn test_detect_header_columns() {
    let columns = detect_header_columns(["Computer", "Device Name", "Platform"]);
    assert_eq!(columns.hostname, Some(1));
    assert_eq!(columns.device_type, Some(2));

    let columns = detect_header_columns(["Computer", "Owner"]);
    assert_eq!(columns, HeaderColumns::default());
}

#[tokio::test]
async fn test_read_devices_csv_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("devices.csv");
    std::fs::write(&path, "Hostname,Device Type\npc01,Windows\n").unwrap();

    let devices = read_devices_csv(&path).await.unwrap();
    assert_eq!(devices.len(), 1);
}

#[tokio::test]
async fn test_read_devices_csv_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = read_devices_csv(&dir.path().join("missing.csv"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFoundError(_)));
}

#[tokio::test]
async fn test_read_devices_csv_path_through_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("devices.csv");
    std::fs::write(&file, "Hostname\npc01\n").unwrap();

    let err = read_devices_csv(&file.join("nested.csv")).await.unwrap_err();
    assert!(matches!(err, Error::IoError(_)));
}
