// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for cli module

use super::cli::*;
use crate::forward_zones::DEFAULT_DOMAIN;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_generate_args_positional() {
    let args = GenerateArgs::try_parse_from([
        "generate-forward-zones",
        "devices.csv",
        "zones.conf",
        "10.0.0.1,10.0.0.2",
    ])
    .unwrap();

    assert_eq!(args.input_csv_file, PathBuf::from("devices.csv"));
    assert_eq!(args.output_conf_file, PathBuf::from("zones.conf"));
    assert_eq!(args.dns_ips, "10.0.0.1,10.0.0.2");
    assert_eq!(args.domain, DEFAULT_DOMAIN);
    assert!(!args.verbose);
}

#[test]
fn test_generate_args_options() {
    let args = GenerateArgs::try_parse_from([
        "generate-forward-zones",
        "devices.csv",
        "zones.conf",
        "10.0.0.1",
        "-d",
        "corp.local",
        "-v",
    ])
    .unwrap();
    assert_eq!(args.domain, "corp.local");
    assert!(args.verbose);

    let args = GenerateArgs::try_parse_from([
        "generate-forward-zones",
        "--domain",
        "internal.local",
        "--verbose",
        "devices.csv",
        "zones.conf",
        "10.0.0.1",
    ])
    .unwrap();
    assert_eq!(args.domain, "internal.local");
    assert!(args.verbose);
}

#[test]
fn test_generate_args_missing_positional() {
    let err = GenerateArgs::try_parse_from(["generate-forward-zones", "devices.csv", "zones.conf"])
        .unwrap_err();
    assert!(err.use_stderr());
}

#[test]
fn test_download_args_optional_output() {
    let args = DownloadArgs::try_parse_from(["download-devices"]).unwrap();
    assert_eq!(args.output_filename, None);

    let args = DownloadArgs::try_parse_from(["download-devices", "out.csv"]).unwrap();
    assert_eq!(args.output_filename, Some(PathBuf::from("out.csv")));
}

#[test]
fn test_download_args_rejects_extra_positional() {
    let err = DownloadArgs::try_parse_from(["download-devices", "a.csv", "b.csv"]).unwrap_err();
    assert!(err.use_stderr());
}

#[test]
fn test_help_is_not_an_error_exit() {
    let err = DownloadArgs::try_parse_from(["download-devices", "--help"]).unwrap_err();
    assert!(!err.use_stderr());
}
