// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zscaler Devices CSV Downloader
//!
//! Exchanges OAuth client credentials for a bearer token and downloads the
//! device inventory export from the Zscaler One API `downloadDevices` endpoint.
//!
//! Configuration comes from the environment, or a `.env` file when present:
//! - `ZSCALER_IDENTITY_BASE_URL`
//! - `ZSCALER_CLIENT_ID`
//! - `ZSCALER_CLIENT_SECRET`

use anyhow::Context;
use tracing::error;

use zcc_forward_zones::{
    cli::{parse_args, DownloadArgs},
    config::ClientConfig,
    logging::init_logging,
    pipeline::{resolve_output_path, run_download},
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args: DownloadArgs = parse_args();
    init_logging(false);

    if let Err(e) = run(args).await {
        error!("{:#}", e);
        println!();
        println!("✗ Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: DownloadArgs) -> anyhow::Result<()> {
    println!("Zscaler Devices CSV Downloader");
    println!("{}", "=".repeat(40));

    let (output, generated) = resolve_output_path(args.output_filename);
    if generated {
        println!("Output file: {} (auto-generated)", output.display());
    } else {
        println!("Output file: {}", output.display());
    }
    println!();

    let config = ClientConfig::from_env().context("failed to load configuration")?;
    println!("Identity URL: {}", config.identity_base_url);
    println!("Client ID: {}", config.client_id);
    println!();

    let summary = run_download(&config, &output)
        .await
        .context("CSV download failed")?;

    println!(
        "✓ Successfully downloaded {} bytes to {}",
        summary.bytes,
        summary.path.display()
    );
    println!(
        "  - Estimated records: ~{} (including header)",
        summary.estimated_records
    );
    println!();
    println!("✓ CSV download completed successfully!");
    println!("File saved as: {}", summary.path.display());
    println!();
    println!("You can now use this file with:");
    println!(
        "generate-forward-zones {} zones.conf 10.0.0.12,10.0.0.13 --domain yourdomain.local",
        summary.path.display()
    );

    Ok(())
}
