// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zscaler Forward Zones Generator
//!
//! Reads a Zscaler devices CSV export and writes an Unbound forward-zone
//! configuration with one zone per unique Windows device hostname:
//!
//! ```text
//! forward-zone:
//!     name: "<hostname>.<domain>"
//!     forward-addr: <DNS_IP_1>
//!     forward-addr: <DNS_IP_2>
//! ```

use anyhow::Context;
use tracing::error;

use zcc_forward_zones::{
    cli::{parse_args, GenerateArgs},
    logging::init_logging,
    pipeline::{render_preview, run_generate, validate_dns_ips_argument},
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args: GenerateArgs = parse_args();
    init_logging(args.verbose);

    if let Err(e) = run(&args).await {
        error!("{:#}", e);
        println!("✗ Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: &GenerateArgs) -> anyhow::Result<()> {
    validate_dns_ips_argument(&args.dns_ips).context("invalid DNS IP argument")?;

    println!("Zscaler Forward Zones Generator");
    println!("{}", "=".repeat(40));
    println!("Input CSV: {}", args.input_csv_file.display());
    println!("Output file: {}", args.output_conf_file.display());
    println!("DNS IPs: {}", args.dns_ips);
    println!("Domain: {}", args.domain);
    println!();

    let summary = run_generate(args, |line| println!("{}", line))
        .await
        .context("forward zones generation failed")?;

    let zone_count = summary.zone_count();
    println!("✓ Successfully generated forward zones configuration!");
    println!("Configuration file: {}", args.output_conf_file.display());
    println!("Total forward zones created: {}", zone_count);
    println!("Windows devices processed: {}", summary.windows_devices.len());
    if summary.duplicates_removed() > 0 {
        println!(
            "Note: {} duplicate hostnames were removed during deduplication",
            summary.duplicates_removed()
        );
    }

    println!();
    println!("Preview of {}:", args.output_conf_file.display());
    println!("{}", render_preview(&summary.document.content, zone_count));

    Ok(())
}
