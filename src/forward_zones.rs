// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unbound forward-zone configuration generation
//!
//! Each unique hostname becomes one stanza:
//!
//! ```text
//! forward-zone:
//!     name: "pc01.domain.local"
//!     forward-addr: 10.0.0.1
//!     forward-addr: 10.0.0.2
//! ```
//!
//! # Examples
//!
//! ```rust
//! use zcc_forward_zones::forward_zones::ForwardZoneConfig;
//!
//! let config = ForwardZoneConfig::new(
//!     vec!["pc01".to_string()],
//!     vec!["10.0.0.1".to_string()],
//!     "test.local",
//! );
//! assert!(config.to_config().contains("name: \"pc01.test.local\""));
//! ```

use chrono::{DateTime, Local};
use nom::{
    bytes::complete::take_while_m_n,
    character::complete::char,
    combinator::{all_consuming, map_res},
    sequence::tuple,
    IResult,
};
use tracing::{info, warn};

use crate::dedup::deduplicate_hostnames;
use crate::types::FilteredDevice;

/// Default domain suffix for forward zones
pub const DEFAULT_DOMAIN: &str = "domain.local";

/// Document emitted when no hostname survives deduplication
pub const NO_HOSTNAMES_DOCUMENT: &str = "# No valid hostnames found\n";

/// Document emitted when no DNS server survives validation
pub const NO_DNS_SERVERS_DOCUMENT: &str = "# No valid DNS IPs found\n";

/// Number of lines in the rendered header block, blank separator included
pub const HEADER_LINES: usize = 7;

// ========== IPv4 Validation ==========

/// Parse one octet: 1-3 ASCII digits, value 0-255
fn octet(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(1, 3, |c: char| c.is_ascii_digit()), |s: &str| {
        s.parse::<u8>()
    })(input)
}

/// Parse a dotted-quad IPv4 address with nothing before or after it
fn ipv4(input: &str) -> IResult<&str, [u8; 4]> {
    let (rest, (a, _, b, _, c, _, d)) = all_consuming(tuple((
        octet,
        char('.'),
        octet,
        char('.'),
        octet,
        char('.'),
        octet,
    )))(input)?;
    Ok((rest, [a, b, c, d]))
}

/// Strict IPv4 syntax check. Leading zeros are accepted (`010.0.0.1`).
pub fn validate_dns_ip(candidate: &str) -> bool {
    ipv4(candidate).is_ok()
}

/// Split a comma-separated list, trimming entries and dropping empty ones
pub fn split_dns_ips(dns_ips: &str) -> Vec<String> {
    dns_ips
        .split(',')
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
        .collect()
}

/// DNS server candidates partitioned by validity, input order preserved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnsServerList {
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
}

impl DnsServerList {
    pub fn parse(dns_ips: &str) -> Self {
        let (valid, invalid) = split_dns_ips(dns_ips)
            .into_iter()
            .partition(|ip| validate_dns_ip(ip));
        Self { valid, invalid }
    }

    pub fn is_empty(&self) -> bool {
        self.valid.is_empty() && self.invalid.is_empty()
    }
}

// ========== Rendering ==========

/// Forward zones for a set of hostnames
#[derive(Debug, Clone)]
pub struct ForwardZoneConfig {
    /// Unique hostnames, emitted in the given order
    pub hostnames: Vec<String>,
    /// Validated DNS servers, emitted in the given order
    pub dns_servers: Vec<String>,
    pub domain: String,
    pub generated_at: DateTime<Local>,
}

impl ForwardZoneConfig {
    pub fn new(hostnames: Vec<String>, dns_servers: Vec<String>, domain: &str) -> Self {
        Self {
            hostnames,
            dns_servers,
            domain: domain.to_string(),
            generated_at: Local::now(),
        }
    }

    /// Render the Unbound configuration text
    pub fn to_config(&self) -> String {
        let lines_per_zone = 3 + self.dns_servers.len();
        let mut lines: Vec<String> =
            Vec::with_capacity(HEADER_LINES + self.hostnames.len() * lines_per_zone);

        lines.push("# Unbound Forward Zones Configuration".to_string());
        lines.push(format!(
            "# Generated on: {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        ));
        lines.push(format!("# Total forward zones: {}", self.hostnames.len()));
        lines.push(format!("# DNS servers: {}", self.dns_servers.join(", ")));
        lines.push(format!("# Domain: {}", self.domain));
        lines.push("# Note: Hostnames have been deduplicated to prevent conflicts".to_string());
        lines.push(String::new());

        for hostname in &self.hostnames {
            lines.push("forward-zone:".to_string());
            lines.push(format!("    name: \"{}.{}\"", hostname, self.domain));
            for dns_ip in &self.dns_servers {
                lines.push(format!("    forward-addr: {}", dns_ip));
            }
            lines.push(String::new());
        }

        lines.join("\n")
    }
}

/// How generation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// At least one zone was rendered
    Zones,
    /// Nothing survived deduplication; placeholder document
    NoHostnames,
    /// No DNS server survived validation; placeholder document
    NoDnsServers,
}

/// Generated document plus what went into it
#[derive(Debug, Clone)]
pub struct ForwardZonesDocument {
    pub content: String,
    pub outcome: GenerationOutcome,
    pub zone_count: usize,
    pub dns_servers: Vec<String>,
}

impl ForwardZonesDocument {
    fn placeholder(content: &str, outcome: GenerationOutcome) -> Self {
        Self {
            content: content.to_string(),
            outcome,
            zone_count: 0,
            dns_servers: Vec::new(),
        }
    }

    /// Whether the run must be reported as failed
    pub fn is_failure(&self) -> bool {
        self.outcome == GenerationOutcome::NoDnsServers
    }
}

/// Deduplicate hostnames, validate DNS servers and render the configuration.
///
/// Invalid DNS entries are dropped with a warning.
pub fn generate_forward_zones_config(
    devices: &[FilteredDevice],
    dns_ips: &str,
    domain: &str,
) -> ForwardZonesDocument {
    let report = deduplicate_hostnames(devices);
    if report.hostnames.is_empty() {
        warn!("No valid hostnames found after deduplication");
        return ForwardZonesDocument::placeholder(
            NO_HOSTNAMES_DOCUMENT,
            GenerationOutcome::NoHostnames,
        );
    }

    let servers = DnsServerList::parse(dns_ips);
    if servers.is_empty() {
        warn!("No valid DNS IPs provided");
        return ForwardZonesDocument::placeholder(
            NO_DNS_SERVERS_DOCUMENT,
            GenerationOutcome::NoDnsServers,
        );
    }
    for ip in &servers.invalid {
        warn!("Invalid DNS IP skipped: {}", ip);
    }
    if servers.valid.is_empty() {
        warn!("No valid DNS IPs found after validation");
        return ForwardZonesDocument::placeholder(
            NO_DNS_SERVERS_DOCUMENT,
            GenerationOutcome::NoDnsServers,
        );
    }

    info!(
        "Generating configuration for {} unique hostnames using DNS servers: {}",
        report.hostnames.len(),
        servers.valid.join(", ")
    );

    let zone_count = report.hostnames.len();
    let config = ForwardZoneConfig::new(report.hostnames, servers.valid, domain);
    let content = config.to_config();

    info!(
        "Configuration generation completed ({} lines)",
        content.split('\n').count()
    );

    ForwardZonesDocument {
        content,
        outcome: GenerationOutcome::Zones,
        zone_count,
        dns_servers: config.dns_servers,
    }
}

#[cfg(test)]
#[path = "forward_zones_test.rs"]
mod tests;
