//! Per-vendor field extractors.
//!
//! Every extractor is a pure function over raw terminal text: no transport
//! calls, no shared state. Dispatch is by (capability, vendor); an unknown
//! vendor always falls back to the Cisco-style grammar, which is the
//! documented default rather than a heuristic guess.
//!
//! Device output has no formal grammar and varies across firmware
//! versions, so extraction is deliberately best-effort: malformed
//! individual lines are skipped rather than failing the whole parse. Only
//! a missing mandatory aggregate (ping's success-rate line) fails a
//! capability outright.

mod interfaces;
mod neighbors;
mod ping;
mod routes;
mod trace;
mod version;
mod vrf;

pub use interfaces::{enrich_interface, parse_interfaces};
pub use neighbors::parse_neighbors;
pub use ping::parse_ping;
pub use routes::parse_routes;
pub use trace::parse_traceroute;
pub use version::parse_device_info;
pub use vrf::parse_vrf_names;

use std::sync::LazyLock;

use regex::Regex;

/// Dotted-quad scanner shared by the block-oriented grammars.
pub(crate) static IPV4: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})").unwrap());

/// Whether a line is an indented continuation line.
pub(crate) fn is_indented(line: &str) -> bool {
    line.starts_with(' ') || line.starts_with('\t')
}
