//! Neighbor-discovery extractors (CDP and LLDP).
//!
//! Cisco CDP detail output is split into per-neighbor blocks on a divider
//! of four-or-more dashes; each block is searched independently for its
//! field labels, and a block without a Device ID is discarded. The
//! Juniper/HP/Huawei LLDP grammar is streaming: a "Neighbor...System"
//! marker line flushes the previous neighbor and starts a new one, field
//! label lines accumulate into it, and the last neighbor is flushed at end
//! of input.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::catalog::Vendor;
use crate::records::NeighborRecord;

static CDP_DIVIDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{4,}").unwrap());
static CDP_DEVICE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Device ID:\s*(\S+)").unwrap());
static CDP_IP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"IP address:\s*(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})").unwrap());
static CDP_PLATFORM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Platform:\s*([^,\r\n]+)").unwrap());
static CDP_LOCAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Interface:\s*([^,\s]+)").unwrap());
static CDP_REMOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Port ID \(outgoing port\):\s*(\S+)").unwrap());

static LLDP_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Neighbou?r.*System").unwrap());
static LLDP_CHASSIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Chassis\s*[Ii][Dd]\s*:\s*(\S+)").unwrap());
static LLDP_SYSNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Sys(?:tem)?\s*[Nn]ame\s*:\s*(\S+)").unwrap());
static LLDP_MGMT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:Mgmt|Management)\s*[Aa]ddr(?:ess)?\s*:\s*(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})")
        .unwrap()
});
static LLDP_DESCR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Sys(?:tem)?\s*[Dd]escr(?:iption)?\s*:\s*([^\r\n]+)").unwrap());
static LLDP_LOCAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Local\s*(?:[Ii]nterface|[Pp]ort)\s*:\s*(\S+)").unwrap());
static LLDP_REMOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:Remote\s*(?:[Ii]nterface|[Pp]ort)|Port\s*[Ii][Dd])\s*:\s*(\S+)").unwrap()
});

/// Parse neighbor-discovery output into normalized records.
pub fn parse_neighbors(text: &str, vendor: Vendor) -> Vec<NeighborRecord> {
    match vendor {
        Vendor::Juniper | Vendor::Hp | Vendor::Huawei => parse_lldp(text),
        Vendor::Cisco | Vendor::Mikrotik | Vendor::Unknown => parse_cdp(text),
    }
}

fn parse_cdp(text: &str) -> Vec<NeighborRecord> {
    let mut records = Vec::new();

    for block in CDP_DIVIDER.split(text) {
        let Some(device_id) = CDP_DEVICE_ID.captures(block).map(|c| c[1].to_string()) else {
            // Banner or empty block.
            continue;
        };

        records.push(NeighborRecord {
            device_id,
            mgmt_ip: CDP_IP.captures(block).map(|c| c[1].to_string()),
            platform: CDP_PLATFORM
                .captures(block)
                .map(|c| c[1].trim().to_string()),
            local_interface: CDP_LOCAL.captures(block).map(|c| c[1].to_string()),
            remote_interface: CDP_REMOTE.captures(block).map(|c| c[1].to_string()),
        });
    }

    records
}

/// Streaming LLDP accumulator between marker lines.
#[derive(Default)]
struct LldpNeighbor {
    chassis_id: Option<String>,
    sys_name: Option<String>,
    mgmt_ip: Option<String>,
    platform: Option<String>,
    local_interface: Option<String>,
    remote_interface: Option<String>,
}

impl LldpNeighbor {
    fn scan(&mut self, line: &str) {
        if let Some(c) = LLDP_SYSNAME.captures(line) {
            self.sys_name = Some(c[1].to_string());
        } else if let Some(c) = LLDP_CHASSIS.captures(line) {
            self.chassis_id = Some(c[1].to_string());
        }
        if let Some(c) = LLDP_MGMT.captures(line) {
            self.mgmt_ip = Some(c[1].to_string());
        }
        if let Some(c) = LLDP_DESCR.captures(line) {
            self.platform = Some(c[1].trim().to_string());
        }
        if let Some(c) = LLDP_LOCAL.captures(line) {
            self.local_interface = Some(c[1].to_string());
        }
        if let Some(c) = LLDP_REMOTE.captures(line) {
            self.remote_interface = Some(c[1].to_string());
        }
    }

    /// SysName overrides ChassisId when both are present; a neighbor with
    /// neither is discarded.
    fn finish(self) -> Option<NeighborRecord> {
        let device_id = self.sys_name.or(self.chassis_id)?;
        Some(NeighborRecord {
            device_id,
            mgmt_ip: self.mgmt_ip,
            platform: self.platform,
            local_interface: self.local_interface,
            remote_interface: self.remote_interface,
        })
    }
}

fn parse_lldp(text: &str) -> Vec<NeighborRecord> {
    let mut records = Vec::new();
    let mut current: Option<LldpNeighbor> = None;

    for line in text.lines() {
        if LLDP_MARKER.is_match(line) {
            if let Some(neighbor) = current.take() {
                match neighbor.finish() {
                    Some(record) => records.push(record),
                    None => debug!("discarding LLDP neighbor without an identifier"),
                }
            }
            current = Some(LldpNeighbor::default());
            continue;
        }
        if let Some(neighbor) = current.as_mut() {
            neighbor.scan(line);
        }
    }

    if let Some(neighbor) = current.take() {
        if let Some(record) = neighbor.finish() {
            records.push(record);
        }
    }

    records
}
