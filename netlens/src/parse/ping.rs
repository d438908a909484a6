//! Ping extractor.
//!
//! The "Success rate is N percent (r/s)" aggregate is mandatory: its
//! absence is a parse failure for the capability, never a zero-loss
//! success — a caller must be able to tell "unable to determine ping
//! outcome" apart from "0% loss". The min/avg/max latency aggregate is
//! optional and left absent when unparsable.
//!
//! Like traceroute, non-Cisco vendors reuse this grammar verbatim for
//! now; the fallback is logged so migrations can find it.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::catalog::{Capability, Vendor};
use crate::error::ParseError;
use crate::records::PingStatistics;

static SUCCESS_RATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Success rate is (\d+) percent(?:\s*\((\d+)/(\d+)\))?").unwrap()
});

static RTT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"min/avg/max = (\d+(?:\.\d+)?)/(\d+(?:\.\d+)?)/(\d+(?:\.\d+)?)").unwrap()
});

/// Parse ping output into aggregate statistics.
pub fn parse_ping(text: &str, vendor: Vendor) -> Result<PingStatistics, ParseError> {
    if vendor != Vendor::Cisco && vendor != Vendor::Unknown {
        debug!("ping parsing for {vendor} reuses the Cisco grammar");
    }

    let caps = SUCCESS_RATE
        .captures(text)
        .ok_or(ParseError::MissingField {
            capability: Capability::Ping,
            field: "success rate",
        })?;

    let rate: f64 = caps[1].parse().unwrap_or(0.0);
    let received: u32 = caps.get(2).and_then(|m| m.as_str().parse().ok()).unwrap_or(0);
    let sent: u32 = caps.get(3).and_then(|m| m.as_str().parse().ok()).unwrap_or(0);

    let (rtt_min, rtt_avg, rtt_max) = match RTT_LINE.captures(text) {
        Some(c) => (c[1].parse().ok(), c[2].parse().ok(), c[3].parse().ok()),
        None => (None, None, None),
    };

    Ok(PingStatistics {
        success: rate > 0.0,
        packet_loss: 100.0 - rate,
        rtt_min,
        rtt_avg,
        rtt_max,
        sent,
        received: received.min(sent),
    })
}
