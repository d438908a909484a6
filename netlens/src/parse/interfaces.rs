//! Interface listing and detail extractors.
//!
//! Two grammars cover the supported vendors:
//!
//! - Cisco-style fixed-column tables ("show ip interface brief"), one line
//!   per interface. Rows with fewer than five whitespace-delimited tokens,
//!   or whose first token is the header label, are not interfaces.
//! - Block-oriented listings (Juniper terse, HP/Huawei brief): an
//!   unindented line starts a new interface, status comes from literal
//!   "up"/"down" presence, the IP is scanned with a dotted-quad pattern,
//!   and indented continuation lines are ignored for the base listing.
//!
//! Detail enrichment is a separate, optional follow-up per interface; its
//! output is scanned with vendor-specific field labels, and a missing
//! label leaves the corresponding attribute at its prior default.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use super::{is_indented, IPV4};
use crate::catalog::Vendor;
use crate::records::{InterfaceRecord, LinkState, UNASSIGNED};

/// Parse a brief interface listing into normalized records.
pub fn parse_interfaces(text: &str, vendor: Vendor) -> Vec<InterfaceRecord> {
    match vendor {
        Vendor::Juniper | Vendor::Hp | Vendor::Huawei => parse_block_listing(text),
        Vendor::Cisco | Vendor::Mikrotik | Vendor::Unknown => parse_cisco_brief(text),
    }
}

/// Cisco "show ip interface brief": columns
/// `{name, ip, ok?, method, status, protocol}`.
fn parse_cisco_brief(text: &str) -> Vec<InterfaceRecord> {
    let mut records = Vec::new();

    for line in text.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 5 || tokens[0].eq_ignore_ascii_case("interface") {
            // Header, banner or truncated row.
            continue;
        }

        let mut record = InterfaceRecord::new(tokens[0]);
        record.ip = tokens[1].to_string();

        // "administratively down" occupies two tokens and shifts the
        // protocol column right by one.
        if tokens[4].eq_ignore_ascii_case("administratively") {
            record.status = LinkState::AdminDown;
            record.protocol = tokens
                .get(6)
                .map_or(LinkState::Unknown, |t| LinkState::from_token(t));
        } else {
            record.status = LinkState::from_token(tokens[4]);
            record.protocol = tokens
                .get(5)
                .map_or(LinkState::Unknown, |t| LinkState::from_token(t));
        }

        records.push(record);
    }

    records
}

/// Block-oriented listings (Juniper terse, HP/Huawei brief).
fn parse_block_listing(text: &str) -> Vec<InterfaceRecord> {
    let mut records = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() || is_indented(line) {
            // Continuation lines carry detail we only read via the
            // dedicated detail capability.
            continue;
        }

        let Some(name) = line.split_whitespace().next() else {
            continue;
        };
        if name.eq_ignore_ascii_case("interface") || name.ends_with(':') || name.starts_with('(') {
            // Column header or legend line ("*down: administratively down").
            continue;
        }

        let rest = &line[name.len()..];
        let mut record = InterfaceRecord::new(name);
        (record.status, record.protocol) = block_status(rest);
        record.ip = IPV4
            .captures(rest)
            .map(|c| c[1].to_string())
            .unwrap_or_else(|| UNASSIGNED.to_string());

        records.push(record);
    }

    records
}

fn block_status(rest: &str) -> (LinkState, LinkState) {
    let lower = rest.to_ascii_lowercase();
    if lower.contains("administratively down") || lower.contains("*down") {
        (LinkState::AdminDown, LinkState::Down)
    } else if lower.contains("up") {
        (LinkState::Up, LinkState::Up)
    } else if lower.contains("down") {
        (LinkState::Down, LinkState::Down)
    } else {
        (LinkState::Unknown, LinkState::Unknown)
    }
}

struct DetailLabels {
    speed: &'static LazyLock<Regex>,
    duplex: &'static LazyLock<Regex>,
    mac: &'static LazyLock<Regex>,
    mtu: &'static LazyLock<Regex>,
    description: &'static LazyLock<Regex>,
}

// Cisco "show interfaces": "Full-duplex, 1000Mb/s", "MTU 1500 bytes",
// "Hardware is ..., address is 0011.2233.4455 (bia ...)".
static CISCO_SPEED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\s?[GMK]b/s)").unwrap());
static CISCO_DUPLEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([Ff]ull|[Hh]alf|[Aa]uto)-duplex").unwrap());
static CISCO_MAC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"address is ([0-9a-fA-F]{4}\.[0-9a-fA-F]{4}\.[0-9a-fA-F]{4})").unwrap());
static CISCO_MTU: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"MTU (\d+)").unwrap());
static CISCO_DESC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Description:\s*(.+)").unwrap());

// Juniper "show interfaces": "Speed: 1000mbps", "Link-mode: Full-duplex",
// "Current address: 00:11:22:33:44:55", "MTU: 1514".
static JUNIPER_SPEED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Speed:\s*([^\s,]+)").unwrap());
static JUNIPER_DUPLEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:Link-mode|Duplex):\s*([Ff]ull|[Hh]alf|[Aa]uto)").unwrap());
static JUNIPER_MAC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Current address:\s*([0-9a-fA-F:]{17})").unwrap()
});
static JUNIPER_MTU: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"MTU:\s*(\d+)").unwrap());
static JUNIPER_DESC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Description:\s*(.+)").unwrap());

// HP/Huawei "display interface": "Speed : 1000", "Duplex: FULL",
// "Hardware address is 0011-2233-4455",
// "The Maximum Transmit Unit is 1500".
static VRP_SPEED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Speed\s*:\s*([^\s,]+)").unwrap());
static VRP_DUPLEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Duplex\s*:\s*([A-Za-z]+)").unwrap());
static VRP_MAC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[Hh]ardware address is ([0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4})").unwrap()
});
static VRP_MTU: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Maximum Transmit Unit is (\d+)").unwrap());
static VRP_DESC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Description\s*:\s*(.+)").unwrap());

fn detail_labels(vendor: Vendor) -> DetailLabels {
    match vendor {
        Vendor::Juniper => DetailLabels {
            speed: &JUNIPER_SPEED,
            duplex: &JUNIPER_DUPLEX,
            mac: &JUNIPER_MAC,
            mtu: &JUNIPER_MTU,
            description: &JUNIPER_DESC,
        },
        Vendor::Hp | Vendor::Huawei => DetailLabels {
            speed: &VRP_SPEED,
            duplex: &VRP_DUPLEX,
            mac: &VRP_MAC,
            mtu: &VRP_MTU,
            description: &VRP_DESC,
        },
        Vendor::Cisco | Vendor::Mikrotik | Vendor::Unknown => DetailLabels {
            speed: &CISCO_SPEED,
            duplex: &CISCO_DUPLEX,
            mac: &CISCO_MAC,
            mtu: &CISCO_MTU,
            description: &CISCO_DESC,
        },
    }
}

/// Fill speed/duplex/MAC/MTU/description from a detail query's output.
///
/// A label absent from the output leaves the corresponding attribute at
/// its prior default; enrichment never errors.
pub fn enrich_interface(record: &mut InterfaceRecord, text: &str, vendor: Vendor) {
    let labels = detail_labels(vendor);

    if let Some(c) = labels.speed.captures(text) {
        record.speed = c[1].to_string();
    }
    if let Some(c) = labels.duplex.captures(text) {
        record.duplex = c[1].to_ascii_lowercase();
    }
    if let Some(c) = labels.mac.captures(text) {
        record.mac_address = Some(c[1].to_string());
    }
    if let Some(c) = labels.mtu.captures(text) {
        record.mtu = c[1].parse().ok();
    }
    if let Some(c) = labels.description.captures(text) {
        let description = c[1].trim();
        if !description.is_empty() {
            record.description = Some(description.to_string());
        }
    }

    debug!(
        "enriched {} from {} detail output ({} bytes)",
        record.name,
        vendor,
        text.len()
    );
}
