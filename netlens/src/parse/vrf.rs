//! VRF / routing-instance name extraction.
//!
//! The vrf_list capability yields a table whose first column is the
//! instance name; header, legend and summary rows are skipped. IOS indents
//! its data rows, so leading indent is stripped before the first-column
//! read. VRF-scoped interface and route listings reuse the interface/route
//! extractors unchanged.

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::Vendor;

// RouterOS prints key=value detail rows: `0 name="mgmt" ...`.
static ROS_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"name="?([^"\s]+)"?"#).unwrap());

/// Header labels that open vendor VRF tables.
const HEADER_TOKENS: [&str; 5] = ["Name", "VRF", "VPN-Instance", "Instance", "Total"];

/// Extract VRF names from a vrf_list capability's output.
pub fn parse_vrf_names(text: &str, vendor: Vendor) -> Vec<String> {
    if vendor == Vendor::Mikrotik {
        return text
            .lines()
            .filter_map(|line| ROS_NAME.captures(line).map(|c| c[1].to_string()))
            .collect();
    }

    let mut names = Vec::new();
    for line in text.lines() {
        let Some(first) = line.split_whitespace().next() else {
            continue;
        };
        if HEADER_TOKENS.iter().any(|h| first.eq_ignore_ascii_case(h)) || first.ends_with(':') {
            continue;
        }
        names.push(first.to_string());
    }
    names
}
