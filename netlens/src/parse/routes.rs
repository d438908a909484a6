//! Routing-table extractors.
//!
//! The Cisco grammar recognizes a route-code prefix at line start and
//! tries the "is directly connected" pattern before the general next-hop
//! pattern — connected routes never carry a next-hop address or a
//! `[distance/metric]` bracket. The Juniper grammar is block-oriented: an
//! unindented `network/prefix` line opens an entry, its protocol and
//! next-hop come from the entry's own lines, and the entry is emitted when
//! the next unindented line starts or at end of input.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use super::is_indented;
use crate::catalog::Vendor;
use crate::records::{RouteKind, RouteRecord, CONNECTED};

/// Route codes Cisco-style tables print in the leftmost column.
const ROUTE_CODES: &str = "CSRBDOILEMNUVio*+%&";

static CISCO_CONNECTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\S{1,5})\s+(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})(?:/(\d{1,2}))?\s+is directly connected(?:,\s*(\S+))?",
    )
    .unwrap()
});

// The route code may carry a secondary token ("O IA", "O E2", "D EX").
static CISCO_VIA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\S{1,5}(?:\s+\S{1,2})?)\s+(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})(?:/(\d{1,2}))?\s+\[(\d+)/(\d+)\]\s+via\s+(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})(?:,\s*(\S+))?",
    )
    .unwrap()
});

static JUNIPER_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})/(\d{1,2})").unwrap()
});

static JUNIPER_PROTO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\w[\w-]*)/(\d+)\]").unwrap());

static JUNIPER_TO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bto (\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})").unwrap());

static JUNIPER_VIA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bvia (\S+)").unwrap());

static JUNIPER_METRIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bmetric (\d+)").unwrap());

/// Parse a routing table into normalized, device-ordered records.
pub fn parse_routes(text: &str, vendor: Vendor) -> Vec<RouteRecord> {
    match vendor {
        Vendor::Juniper => parse_juniper(text),
        Vendor::Cisco | Vendor::Hp | Vendor::Huawei | Vendor::Mikrotik | Vendor::Unknown => {
            parse_cisco(text)
        }
    }
}

fn code_is_route(code: &str) -> bool {
    code.chars().next().is_some_and(|c| ROUTE_CODES.contains(c))
}

/// Prefix length when the device printed no explicit mask: the address is
/// intended as a host route.
const HOST_PREFIX: u8 = 32;

fn parse_cisco(text: &str) -> Vec<RouteRecord> {
    let mut records = Vec::new();

    for line in text.lines() {
        // Connected lines are matched first; they never carry a bracket.
        if let Some(c) = CISCO_CONNECTED.captures(line) {
            if !code_is_route(&c[1]) {
                continue;
            }
            records.push(RouteRecord {
                destination: c[2].to_string(),
                prefix_len: c.get(3).map_or(HOST_PREFIX, |m| {
                    m.as_str().parse().unwrap_or(HOST_PREFIX)
                }),
                next_hop: CONNECTED.to_string(),
                interface: c.get(4).map(|m| m.as_str().to_string()),
                protocol: c[1].to_string(),
                metric: 0,
                distance: 0,
                kind: RouteKind::Direct,
            });
            continue;
        }

        if let Some(c) = CISCO_VIA.captures(line) {
            if !code_is_route(&c[1]) {
                continue;
            }
            // Column alignment can pad a two-token code; collapse it.
            let code = c[1].split_whitespace().collect::<Vec<_>>().join(" ");
            let kind = match code.chars().next() {
                Some('C') | Some('L') => RouteKind::Direct,
                Some('S') => RouteKind::Static,
                _ => RouteKind::Dynamic,
            };
            records.push(RouteRecord {
                destination: c[2].to_string(),
                prefix_len: c.get(3).map_or(HOST_PREFIX, |m| {
                    m.as_str().parse().unwrap_or(HOST_PREFIX)
                }),
                next_hop: c[6].to_string(),
                interface: c.get(7).map(|m| m.as_str().to_string()),
                protocol: code,
                metric: c[5].parse().unwrap_or(0),
                distance: c[4].parse().unwrap_or(0),
                kind,
            });
        }
        // Anything else (banner, code legend, "Gateway of last resort",
        // wrapped continuation) is skipped.
    }

    records
}

/// Accumulator for one Juniper route entry between unindented lines.
#[derive(Default)]
struct JuniperEntry {
    destination: String,
    prefix_len: u8,
    protocol: Option<String>,
    distance: u32,
    metric: u32,
    next_hop: Option<String>,
    interface: Option<String>,
}

impl JuniperEntry {
    fn scan(&mut self, line: &str) {
        if self.protocol.is_none() {
            if let Some(c) = JUNIPER_PROTO.captures(line) {
                self.protocol = Some(c[1].to_string());
                self.distance = c[2].parse().unwrap_or(0);
            }
        }
        if self.next_hop.is_none() {
            if let Some(c) = JUNIPER_TO.captures(line) {
                self.next_hop = Some(c[1].to_string());
            }
        }
        if self.interface.is_none() {
            if let Some(c) = JUNIPER_VIA.captures(line) {
                self.interface = Some(c[1].trim_end_matches(',').to_string());
            }
        }
        if self.metric == 0 {
            if let Some(c) = JUNIPER_METRIC.captures(line) {
                self.metric = c[1].parse().unwrap_or(0);
            }
        }
    }

    fn finish(self) -> RouteRecord {
        let protocol = self.protocol.unwrap_or_else(|| "Unknown".to_string());
        let kind = match protocol.as_str() {
            "Direct" | "Local" => RouteKind::Direct,
            "Static" => RouteKind::Static,
            _ => RouteKind::Dynamic,
        };
        let next_hop = match kind {
            RouteKind::Direct => CONNECTED.to_string(),
            _ => self.next_hop.unwrap_or_else(|| CONNECTED.to_string()),
        };
        RouteRecord {
            destination: self.destination,
            prefix_len: self.prefix_len,
            next_hop,
            interface: self.interface,
            protocol,
            metric: self.metric,
            distance: self.distance,
            kind,
        }
    }
}

fn parse_juniper(text: &str) -> Vec<RouteRecord> {
    let mut records = Vec::new();
    let mut current: Option<JuniperEntry> = None;

    for line in text.lines() {
        if !is_indented(line) {
            // A new unindented line closes the previous entry.
            if let Some(entry) = current.take() {
                records.push(entry.finish());
            }
            if let Some(c) = JUNIPER_ENTRY.captures(line) {
                let mut entry = JuniperEntry {
                    destination: c[1].to_string(),
                    prefix_len: c[2].parse().unwrap_or(HOST_PREFIX),
                    ..JuniperEntry::default()
                };
                // The opening line itself may carry the protocol bracket.
                entry.scan(line);
                current = Some(entry);
            } else {
                debug!("skipping non-entry line: {line:?}");
            }
        } else if let Some(entry) = current.as_mut() {
            entry.scan(line);
        }
    }

    if let Some(entry) = current.take() {
        records.push(entry.finish());
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cisco_static_default_route() {
        let line = "S*   0.0.0.0/0 [1/0] via 10.0.0.254, GigabitEthernet0/1";
        let records = parse_routes(line, Vendor::Cisco);
        assert_eq!(records.len(), 1);

        let route = &records[0];
        assert_eq!(route.destination, "0.0.0.0");
        assert_eq!(route.prefix_len, 0);
        assert_eq!(route.next_hop, "10.0.0.254");
        assert_eq!(route.distance, 1);
        assert_eq!(route.metric, 0);
        assert_eq!(route.kind, RouteKind::Static);
        assert_eq!(route.interface.as_deref(), Some("GigabitEthernet0/1"));
        assert!(route.is_default());
    }

    #[test]
    fn test_cisco_connected_route() {
        let line = "C    192.168.1.0/24 is directly connected, GigabitEthernet0/0";
        let records = parse_routes(line, Vendor::Cisco);
        assert_eq!(records.len(), 1);

        let route = &records[0];
        assert_eq!(route.next_hop, CONNECTED);
        assert_eq!(route.distance, 0);
        assert_eq!(route.metric, 0);
        assert_eq!(route.kind, RouteKind::Direct);
        assert_eq!(route.interface.as_deref(), Some("GigabitEthernet0/0"));
    }

    const CISCO_TABLE: &str = "\
Codes: L - local, C - connected, S - static, R - RIP, M - mobile, B - BGP
       D - EIGRP, EX - EIGRP external, O - OSPF, IA - OSPF inter area

Gateway of last resort is 10.0.0.254 to network 0.0.0.0

S*   0.0.0.0/0 [1/0] via 10.0.0.254, GigabitEthernet0/1
     192.168.1.0/24 is variably subnetted, 2 subnets, 2 masks
C       192.168.1.0/24 is directly connected, GigabitEthernet0/0
L       192.168.1.1/32 is directly connected, GigabitEthernet0/0
O    10.10.0.0/16 [110/20] via 10.0.0.2, GigabitEthernet0/1";

    #[test]
    fn test_cisco_table_order_and_noise() {
        let records = parse_routes(CISCO_TABLE, Vendor::Cisco);
        assert_eq!(records.len(), 4);

        // Device output order is preserved, not sorted.
        assert_eq!(records[0].destination, "0.0.0.0");
        assert_eq!(records[1].destination, "192.168.1.0");
        assert_eq!(records[2].destination, "192.168.1.1");
        assert_eq!(records[2].prefix_len, 32);
        assert_eq!(records[2].kind, RouteKind::Direct);
        assert_eq!(records[3].protocol, "O");
        assert_eq!(records[3].kind, RouteKind::Dynamic);
        assert_eq!(records[3].distance, 110);
        assert_eq!(records[3].metric, 20);
    }

    #[test]
    fn test_cisco_two_token_route_codes() {
        let text = "\
O IA  10.20.0.0/16 [110/30] via 10.0.0.2, GigabitEthernet0/1
D EX  10.30.0.0/16 [170/25600] via 10.0.0.3, GigabitEthernet0/2";
        let records = parse_routes(text, Vendor::Cisco);
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].protocol, "O IA");
        assert_eq!(records[0].kind, RouteKind::Dynamic);
        assert_eq!(records[0].distance, 110);
        assert_eq!(records[0].metric, 30);

        assert_eq!(records[1].protocol, "D EX");
        assert_eq!(records[1].distance, 170);
    }

    #[test]
    fn test_cisco_maskless_host_route() {
        let line = "S    10.1.1.1 [1/0] via 10.0.0.2, GigabitEthernet0/1";
        let records = parse_routes(line, Vendor::Cisco);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].prefix_len, 32);
    }

    const JUNIPER_TABLE: &str = "\
inet.0: 4 destinations, 4 routes (4 active, 0 holddown, 0 hidden)
+ = Active Route, - = Last Active, * = Both

0.0.0.0/0          *[Static/5] 2w4d 20:30:58
                    > to 10.0.0.254 via ge-0/0/0.0
192.168.1.0/24     *[Direct/0] 10w6d 18:10:59
                    > via ge-0/0/1.0
10.10.0.0/16       *[OSPF/10] 1d 02:33:41, metric 20
                    > to 10.0.0.2 via ge-0/0/0.0";

    #[test]
    fn test_juniper_blocks() {
        let records = parse_routes(JUNIPER_TABLE, Vendor::Juniper);
        assert_eq!(records.len(), 3);

        let default = &records[0];
        assert_eq!(default.destination, "0.0.0.0");
        assert_eq!(default.prefix_len, 0);
        assert_eq!(default.kind, RouteKind::Static);
        assert_eq!(default.next_hop, "10.0.0.254");
        assert_eq!(default.distance, 5);
        assert_eq!(default.interface.as_deref(), Some("ge-0/0/0.0"));

        let direct = &records[1];
        assert_eq!(direct.kind, RouteKind::Direct);
        assert_eq!(direct.next_hop, CONNECTED);
        assert_eq!(direct.interface.as_deref(), Some("ge-0/0/1.0"));

        let ospf = &records[2];
        assert_eq!(ospf.protocol, "OSPF");
        assert_eq!(ospf.kind, RouteKind::Dynamic);
        assert_eq!(ospf.distance, 10);
        assert_eq!(ospf.metric, 20);
    }

    #[test]
    fn test_juniper_entry_flushed_at_eof() {
        let text = "10.0.0.0/24        *[Direct/0] 00:00:01\n                    > via ge-0/0/2.0";
        let records = parse_routes(text, Vendor::Juniper);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].destination, "10.0.0.0");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_routes("", Vendor::Cisco).is_empty());
        assert!(parse_routes("", Vendor::Juniper).is_empty());
    }
}
