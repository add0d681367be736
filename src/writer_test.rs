// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for writer module

use super::writer::*;
use crate::types::Error;
use tempfile::TempDir;

#[tokio::test]
async fn test_save_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("zones.conf");
    let content = "forward-zone:\n    name: \"pc01.domain.local\"\n    forward-addr: 10.0.0.1\n";

    save_config_file(content, &path).await.unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
}

#[tokio::test]
async fn test_save_config_file_larger_than_buffer() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("zones.conf");
    let content = "# filler line for buffering\n".repeat(WRITE_BUFFER_BYTES);

    save_config_file(&content, &path).await.unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap().len(), content.len());
}

#[tokio::test]
async fn test_save_config_file_overwrites() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("zones.conf");
    std::fs::write(&path, "old content that is much longer than the new one").unwrap();

    save_config_file("new", &path).await.unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
}

#[tokio::test]
async fn test_save_config_file_missing_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("zones.conf");

    let err = save_config_file("x", &path).await.unwrap_err();
    assert!(matches!(err, Error::IoError(_)));
}
