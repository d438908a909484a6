//! Normalized record types produced by the field extractors.
//!
//! Records are vendor-independent: every extractor, whatever grammar it
//! scraped, produces these shapes. They are created fresh per query and
//! never mutated afterwards, with one documented exception — the optional
//! interface detail enrichment step that fills speed/duplex/MAC/MTU/
//! description from a follow-up query.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Vendor;

/// Sentinel next-hop for directly connected routes.
pub const CONNECTED: &str = "Connected";

/// Sentinel address for interfaces without an assigned IP.
pub const UNASSIGNED: &str = "unassigned";

/// Sentinel address for traceroute hops that timed out.
pub const TIMEOUT_ADDRESS: &str = "*";

/// Administrative or link state of an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkState {
    Up,
    Down,
    #[serde(rename = "administratively-down")]
    AdminDown,
    Unknown,
}

impl LinkState {
    /// Lenient parse from a device status token.
    pub fn from_token(token: &str) -> Self {
        let token = token.trim();
        if token.eq_ignore_ascii_case("up") {
            LinkState::Up
        } else if token.eq_ignore_ascii_case("down") {
            LinkState::Down
        } else if token.to_ascii_lowercase().starts_with("administratively")
            || token.eq_ignore_ascii_case("admin-down")
            || token.eq_ignore_ascii_case("*down")
            || token.eq_ignore_ascii_case("disabled")
        {
            LinkState::AdminDown
        } else {
            LinkState::Unknown
        }
    }

    pub fn is_up(&self) -> bool {
        matches!(self, LinkState::Up)
    }
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LinkState::Up => "up",
            LinkState::Down => "down",
            LinkState::AdminDown => "administratively down",
            LinkState::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// One interface from a brief listing, optionally enriched with detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceRecord {
    /// Interface name; unique key within one query result.
    pub name: String,

    /// Administrative status.
    pub status: LinkState,

    /// Line protocol (link) status.
    pub protocol: LinkState,

    /// Assigned IPv4 address, or "unassigned".
    pub ip: String,

    /// Negotiated or configured speed; "auto" when not enriched.
    pub speed: String,

    /// Negotiated or configured duplex; "auto" when not enriched.
    pub duplex: String,

    /// Interface description, when the detail query reported one.
    pub description: Option<String>,

    /// Hardware (MAC) address, when the detail query reported one.
    pub mac_address: Option<String>,

    /// MTU in bytes, when the detail query reported one.
    pub mtu: Option<u32>,
}

impl InterfaceRecord {
    /// Create a record with the listing defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: LinkState::Unknown,
            protocol: LinkState::Unknown,
            ip: UNASSIGNED.to_string(),
            speed: "auto".to_string(),
            duplex: "auto".to_string(),
            description: None,
            mac_address: None,
            mtu: None,
        }
    }

    /// Whether the interface has an assigned address.
    pub fn has_address(&self) -> bool {
        self.ip != UNASSIGNED
    }
}

/// Classification of a route's origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteKind {
    Direct,
    Static,
    Dynamic,
}

/// One routing-table entry.
///
/// A result set is an ordered sequence reflecting device output order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    /// Destination network address.
    pub destination: String,

    /// Prefix length, 0..=32.
    pub prefix_len: u8,

    /// Next-hop address, or the "Connected" sentinel.
    pub next_hop: String,

    /// Egress interface, when the device reported one.
    pub interface: Option<String>,

    /// Routing-protocol code as printed by the device ("S", "O", "Static").
    pub protocol: String,

    /// Route metric.
    pub metric: u32,

    /// Administrative distance / route preference.
    pub distance: u32,

    /// Origin classification.
    pub kind: RouteKind,
}

impl RouteRecord {
    /// Destination/prefix identity key used for duplicate detection.
    pub fn key(&self) -> (String, u8) {
        (self.destination.clone(), self.prefix_len)
    }

    /// Whether this is the default route.
    pub fn is_default(&self) -> bool {
        self.destination == "0.0.0.0" && self.prefix_len == 0
    }
}

/// One discovered neighbor (CDP/LLDP).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborRecord {
    /// Remote device identifier; dedup key in the topology builder.
    pub device_id: String,

    /// Management address, when advertised.
    pub mgmt_ip: Option<String>,

    /// Platform / model string, when advertised.
    pub platform: Option<String>,

    /// Interface on the queried device.
    pub local_interface: Option<String>,

    /// Interface on the neighbor.
    pub remote_interface: Option<String>,
}

/// Outcome classification for a single traceroute hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HopStatus {
    Success,
    Timeout,
    Unreachable,
}

/// One traceroute hop, in device-reported order and numbering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceHop {
    /// 1-based hop index as reported by the device.
    pub hop: u32,

    /// Responding address, or "*" on timeout.
    pub address: String,

    /// Resolved hostname, when the device printed one.
    pub hostname: Option<String>,

    /// Round-trip time in milliseconds, when parsable.
    pub rtt_ms: Option<f64>,

    pub status: HopStatus,
}

impl TraceHop {
    /// A hop that never answered.
    pub fn timed_out(hop: u32) -> Self {
        Self {
            hop,
            address: TIMEOUT_ADDRESS.to_string(),
            hostname: None,
            rtt_ms: None,
            status: HopStatus::Timeout,
        }
    }
}

/// Aggregate ping outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingStatistics {
    /// Whether any echo was answered.
    pub success: bool,

    /// Packet loss percentage, 0..=100.
    pub packet_loss: f64,

    /// Minimum round-trip time in ms, absent when unparsable.
    pub rtt_min: Option<f64>,

    /// Average round-trip time in ms, absent when unparsable.
    pub rtt_avg: Option<f64>,

    /// Maximum round-trip time in ms, absent when unparsable.
    pub rtt_max: Option<f64>,

    /// Echo requests sent.
    pub sent: u32,

    /// Echo replies received; always <= sent.
    pub received: u32,
}

/// Identity and firmware facts from a version probe.
///
/// Fields default to "Unknown" when the banner does not carry them;
/// extraction is best-effort and never fails the capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub vendor: Vendor,
    pub model: String,
    pub version: String,
    pub serial: String,
    pub uptime: String,
    pub hostname: Option<String>,
}

impl DeviceInfo {
    pub fn unknown(vendor: Vendor) -> Self {
        Self {
            vendor,
            model: "Unknown".to_string(),
            version: "Unknown".to_string(),
            serial: "Unknown".to_string(),
            uptime: "Unknown".to_string(),
            hostname: None,
        }
    }
}

/// Issue severity, worst first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

/// One finding from the diagnostic rule evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticIssue {
    /// Stable machine-readable kind, e.g. "interface_down".
    pub kind: String,

    pub severity: Severity,

    /// Human-readable description.
    pub description: String,

    /// Suggested remediation.
    pub remediation: String,

    /// Affected component (interface name, "routing", ...).
    pub component: Option<String>,

    /// Structured detail payload for rules that carry one.
    pub detail: Option<serde_json::Value>,
}

impl DiagnosticIssue {
    pub fn new(
        kind: impl Into<String>,
        severity: Severity,
        description: impl Into<String>,
        remediation: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            severity,
            description: description.into(),
            remediation: remediation.into(),
            component: None,
            detail: None,
        }
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.detail = Some(detail);
        self
    }
}

/// Overall health verdict derived from the worst issue present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Error,
}

/// Full diagnostic report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub status: HealthStatus,
    pub summary: String,
    pub issues: Vec<DiagnosticIssue>,
    pub generated_at: DateTime<Utc>,
}

impl DiagnosticReport {
    /// Derive status and summary from an ordered issue list.
    ///
    /// Healthy iff no issues; Error iff any critical issue; else Warning.
    pub fn from_issues(issues: Vec<DiagnosticIssue>) -> Self {
        let status = if issues.is_empty() {
            HealthStatus::Healthy
        } else if issues.iter().any(|i| i.severity == Severity::Critical) {
            HealthStatus::Error
        } else {
            HealthStatus::Warning
        };

        let summary = if issues.is_empty() {
            "All systems operating normally".to_string()
        } else {
            format!("{} issue(s) detected", issues.len())
        };

        Self {
            status,
            summary,
            issues,
            generated_at: Utc::now(),
        }
    }
}

/// One device node in the topology graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyDevice {
    pub name: String,

    /// Management address, when known.
    pub address: Option<String>,

    /// "Router" or "Switch".
    pub device_type: String,

    /// Platform / vendor label, when known.
    pub platform: Option<String>,
}

/// One connection edge between two topology devices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyLink {
    pub from: String,
    pub to: String,
    pub local_interface: String,
    pub remote_interface: String,
}

/// Device/connection graph built from neighbor discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyGraph {
    /// Devices, deduplicated by name; the querying device comes first.
    pub devices: Vec<TopologyDevice>,

    /// One edge per neighbor record, duplicates included.
    pub connections: Vec<TopologyLink>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_state_tokens() {
        assert_eq!(LinkState::from_token("up"), LinkState::Up);
        assert_eq!(LinkState::from_token("UP"), LinkState::Up);
        assert_eq!(LinkState::from_token("down"), LinkState::Down);
        assert_eq!(LinkState::from_token("administratively"), LinkState::AdminDown);
        assert_eq!(LinkState::from_token("*down"), LinkState::AdminDown);
        assert_eq!(LinkState::from_token("testing"), LinkState::Unknown);
    }

    #[test]
    fn test_interface_defaults() {
        let record = InterfaceRecord::new("GigabitEthernet0");
        assert_eq!(record.ip, UNASSIGNED);
        assert_eq!(record.speed, "auto");
        assert_eq!(record.duplex, "auto");
        assert!(!record.has_address());
        assert!(record.description.is_none());
    }

    #[test]
    fn test_default_route_key() {
        let route = RouteRecord {
            destination: "0.0.0.0".to_string(),
            prefix_len: 0,
            next_hop: "10.0.0.254".to_string(),
            interface: None,
            protocol: "S".to_string(),
            metric: 0,
            distance: 1,
            kind: RouteKind::Static,
        };
        assert!(route.is_default());
        assert_eq!(route.key(), ("0.0.0.0".to_string(), 0));
    }

    #[test]
    fn test_report_status_derivation() {
        let healthy = DiagnosticReport::from_issues(vec![]);
        assert_eq!(healthy.status, HealthStatus::Healthy);
        assert!(healthy.issues.is_empty());

        let warning = DiagnosticReport::from_issues(vec![DiagnosticIssue::new(
            "interface_down",
            Severity::High,
            "down",
            "fix it",
        )]);
        assert_eq!(warning.status, HealthStatus::Warning);
        assert_eq!(warning.summary, "1 issue(s) detected");

        let error = DiagnosticReport::from_issues(vec![
            DiagnosticIssue::new("a", Severity::Low, "", ""),
            DiagnosticIssue::new("b", Severity::Critical, "", ""),
        ]);
        assert_eq!(error.status, HealthStatus::Error);
    }

    #[test]
    fn test_serde_labels() {
        let json = serde_json::to_string(&LinkState::AdminDown).unwrap();
        assert_eq!(json, "\"administratively-down\"");

        let json = serde_json::to_string(&Severity::High).unwrap();
        assert_eq!(json, "\"high\"");

        let json = serde_json::to_string(&HealthStatus::Healthy).unwrap();
        assert_eq!(json, "\"healthy\"");
    }
}
