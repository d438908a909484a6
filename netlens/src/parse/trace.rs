//! Traceroute extractor.
//!
//! Each non-empty, non-banner line is matched against a hop pattern: a hop
//! number followed by either the `* * *` timeout marker or an
//! address/hostname with an optional round-trip time. A parenthesized
//! dotted-quad after the primary token is the resolved address, with the
//! primary token kept as the hostname; any other parenthetical is ignored.
//! Hop numbering is preserved exactly as the device reports it;
//! contiguity is not validated.
//!
//! Non-Cisco vendors currently reuse this grammar verbatim; that is a
//! known approximation, not a verified cross-vendor format.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use super::IPV4;
use crate::catalog::Vendor;
use crate::records::{HopStatus, TraceHop};

static HOP_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(\d+)\s+(.+)$").unwrap());
static RTT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*ms(?:ec)?").unwrap());
static RESOLVED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([^)]+)\)").unwrap());

const BANNERS: [&str; 2] = ["Tracing the route", "Type escape sequence"];

/// Parse traceroute output into hops, in device-reported order.
pub fn parse_traceroute(text: &str, vendor: Vendor) -> Vec<TraceHop> {
    if vendor != Vendor::Cisco && vendor != Vendor::Unknown {
        debug!("traceroute parsing for {vendor} reuses the Cisco grammar");
    }

    let mut hops = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() || BANNERS.iter().any(|b| line.contains(b)) {
            continue;
        }
        let Some(c) = HOP_LINE.captures(line) else {
            continue;
        };
        let Ok(hop) = c[1].parse::<u32>() else {
            continue;
        };
        let rest = c[2].trim();

        // Three asterisks (or a lone one) mean nothing answered this hop.
        if rest.starts_with('*') {
            hops.push(TraceHop::timed_out(hop));
            continue;
        }

        let primary = rest.split_whitespace().next().unwrap_or(rest);
        let resolved = RESOLVED
            .captures(rest)
            .map(|m| m[1].to_string())
            .filter(|token| is_ipv4(token));
        let (address, hostname) = match resolved {
            // "hostname (10.0.0.1)": the parenthesized token is the address.
            Some(address) => (address, Some(primary.to_string())),
            None => (primary.to_string(), None),
        };

        let status = if rest.contains("!H") || rest.contains("!N") || rest.contains("!U") {
            HopStatus::Unreachable
        } else {
            HopStatus::Success
        };

        hops.push(TraceHop {
            hop,
            address,
            hostname,
            rtt_ms: RTT.captures(rest).and_then(|m| m[1].parse().ok()),
            status,
        });
    }

    hops
}

/// Whether a token is exactly a literal dotted-quad address.
fn is_ipv4(token: &str) -> bool {
    IPV4.find(token).is_some_and(|m| m.as_str() == token)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CISCO_TRACE: &str = "\
Type escape sequence to abort.
Tracing the route to 8.8.8.8

  1 192.168.1.254 1 msec 1 msec 0 msec
  2 10.0.0.1 4 msec 3 msec 4 msec
  3  * * *
  4 gw.example.net (203.0.113.1) 12 msec 11 msec 13 msec
  5 8.8.8.8 20 msec 19 msec 21 msec";

    #[test]
    fn test_cisco_trace() {
        let hops = parse_traceroute(CISCO_TRACE, Vendor::Cisco);
        assert_eq!(hops.len(), 5);

        assert_eq!(hops[0].hop, 1);
        assert_eq!(hops[0].address, "192.168.1.254");
        assert_eq!(hops[0].rtt_ms, Some(1.0));
        assert_eq!(hops[0].status, HopStatus::Success);
        assert!(hops[0].hostname.is_none());
    }

    #[test]
    fn test_timeout_hop() {
        let hops = parse_traceroute(CISCO_TRACE, Vendor::Cisco);
        let timeout = &hops[2];
        assert_eq!(timeout.hop, 3);
        assert_eq!(timeout.address, "*");
        assert_eq!(timeout.status, HopStatus::Timeout);
        assert!(timeout.rtt_ms.is_none());
    }

    #[test]
    fn test_resolved_hostname() {
        let hops = parse_traceroute(CISCO_TRACE, Vendor::Cisco);
        let hop = &hops[3];
        assert_eq!(hop.address, "203.0.113.1");
        assert_eq!(hop.hostname.as_deref(), Some("gw.example.net"));
        assert_eq!(hop.rtt_ms, Some(12.0));
    }

    #[test]
    fn test_unreachable_marker() {
        let hops = parse_traceroute("  5 10.9.9.1 !H  *  !H", Vendor::Cisco);
        assert_eq!(hops.len(), 1);
        assert_eq!(hops[0].status, HopStatus::Unreachable);
        assert_eq!(hops[0].address, "10.9.9.1");
    }

    #[test]
    fn test_numbering_preserved_not_validated() {
        let text = "  1 10.0.0.1 1 msec\n  7 10.0.0.7 9 msec";
        let hops = parse_traceroute(text, Vendor::Cisco);
        assert_eq!(hops.len(), 2);
        assert_eq!(hops[0].hop, 1);
        assert_eq!(hops[1].hop, 7);
    }

    #[test]
    fn test_fractional_rtt_and_ms_suffix() {
        let hops = parse_traceroute("  1 10.0.0.1 0.5 ms", Vendor::Juniper);
        assert_eq!(hops[0].rtt_ms, Some(0.5));
    }

    #[test]
    fn test_non_address_parenthetical_ignored() {
        let hops = parse_traceroute("  2 gw.example.net (AS65000) 8 msec", Vendor::Cisco);
        assert_eq!(hops.len(), 1);
        assert_eq!(hops[0].address, "gw.example.net");
        assert!(hops[0].hostname.is_none());
        assert_eq!(hops[0].rtt_ms, Some(8.0));
    }

    #[test]
    fn test_is_ipv4() {
        assert!(is_ipv4("10.0.0.1"));
        assert!(!is_ipv4("gw.example.net"));
        assert!(!is_ipv4("10.0.0.1:443"));
    }
}
