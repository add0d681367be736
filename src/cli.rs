// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Command-line arguments for the two binaries

use clap::Parser;
use std::path::PathBuf;

use crate::forward_zones::DEFAULT_DOMAIN;

const GENERATE_EXAMPLES: &str = "\
Examples:
  generate-forward-zones devices.csv forward_zones.conf 10.213.182.62
  generate-forward-zones devices.csv zones.conf 10.213.182.62,192.168.1.1
  generate-forward-zones devices.csv custom_zones.conf 10.213.182.62,192.168.1.1,8.8.8.8 --domain internal.local
  generate-forward-zones devices.csv my_zones.conf 10.213.182.62 --verbose";

const DOWNLOAD_EXAMPLES: &str = "\
Examples:
  download-devices devices.csv
  download-devices            # zscaler_devices_<YYYYMMDD_HHMMSS>.csv

Environment:
  ZSCALER_IDENTITY_BASE_URL, ZSCALER_CLIENT_ID, ZSCALER_CLIENT_SECRET (required)
  ZSCALER_API_BASE_URL (optional)";

/// Generate Unbound forward zones configuration from a Zscaler devices CSV
#[derive(Parser, Debug, Clone)]
#[command(name = "generate-forward-zones")]
#[command(version, after_help = GENERATE_EXAMPLES)]
pub struct GenerateArgs {
    /// Path to the Zscaler devices CSV file
    pub input_csv_file: PathBuf,

    /// Output configuration file path
    pub output_conf_file: PathBuf,

    /// DNS server IP addresses to forward queries to (comma-separated for multiple servers)
    pub dns_ips: String,

    /// Domain suffix for forward zones
    #[arg(short, long, default_value = DEFAULT_DOMAIN)]
    pub domain: String,

    /// Show detailed output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Download the Zscaler devices CSV export
#[derive(Parser, Debug, Clone)]
#[command(name = "download-devices")]
#[command(version, after_help = DOWNLOAD_EXAMPLES)]
pub struct DownloadArgs {
    /// Output filename (default: zscaler_devices_<YYYYMMDD_HHMMSS>.csv)
    pub output_filename: Option<PathBuf>,
}

/// Parse process arguments, exiting with status 1 on usage errors.
///
/// `--help` and `--version` still exit 0.
pub fn parse_args<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            // Printing can only fail if stdout/stderr are closed; nothing left to report to.
            let _ = e.print();
            std::process::exit(code);
        }
    }
}
