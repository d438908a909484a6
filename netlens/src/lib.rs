//! # Netlens
//!
//! Multi-vendor network device query engine with normalized output parsing.
//!
//! Netlens maps abstract capabilities ("list interfaces", "routing table",
//! "ping") to vendor-specific CLI commands, executes them through an
//! injected transport, and scrapes the free-text replies into uniform
//! typed records — plus synthesized health diagnostics and a neighbor
//! topology graph — regardless of which vendor dialect the device speaks.
//!
//! ## Features
//!
//! - Closed multi-vendor catalog (Cisco, Juniper, HP, Huawei, MikroTik)
//!   with compile-time-checked dispatch
//! - Vendor detection from banner text over an ordered probe sequence
//! - Best-effort per-vendor parsers for interfaces, routes, neighbors,
//!   traceroute, ping and device identity
//! - Rule-based diagnostics and topology building over the normalized
//!   records
//! - Transport-agnostic: bring your own session layer via the
//!   [`Transport`](transport::Transport) trait
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use netlens::{Engine, StaticTransport};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), netlens::Error> {
//!     // Any Transport works here; StaticTransport replays canned output.
//!     let transport = StaticTransport::new()
//!         .with_response("show version", "Cisco IOS Software, Version 15.7(3)M2");
//!
//!     let mut engine = Engine::new(transport);
//!     let vendor = engine.detect().await?;
//!     println!("detected vendor: {vendor}");
//!
//!     let report = engine.diagnostics().await?;
//!     println!("{}: {}", report.summary, report.issues.len());
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod detect;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod parse;
pub mod records;
pub mod topology;
pub mod transport;

// Re-export main types for convenience
pub use catalog::{Capability, CommandParams, Vendor};
pub use engine::Engine;
pub use error::Error;
pub use records::{
    DeviceInfo, DiagnosticIssue, DiagnosticReport, HealthStatus, HopStatus, InterfaceRecord,
    LinkState, NeighborRecord, PingStatistics, RouteKind, RouteRecord, Severity, TopologyGraph,
    TraceHop,
};
pub use transport::{CommandOutput, StaticTransport, Transport};
