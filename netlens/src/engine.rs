//! Engine facade orchestrating catalog, transport and extractors.
//!
//! One engine owns one transport handle and the vendor tag for that
//! session. Every operation is: resolve the vendor's command through the
//! catalog, execute it with a per-capability timeout, and hand the reply
//! to the matching extractor. Failures stay typed — the engine never
//! fabricates a healthy or zero-loss result on error; fallback/dummy data
//! is a policy the caller may apply, never the engine.
//!
//! Engines are independent: querying several devices concurrently means
//! running one engine per device in parallel, with no shared state.

use std::time::Duration;

use log::debug;

use crate::catalog::{self, Capability, CommandParams, Vendor};
use crate::detect;
use crate::diagnostics;
use crate::error::{CatalogError, Result, TransportError};
use crate::parse;
use crate::records::{
    DeviceInfo, DiagnosticReport, InterfaceRecord, NeighborRecord, PingStatistics, RouteRecord,
    TopologyGraph, TraceHop,
};
use crate::topology;
use crate::transport::{CommandOutput, Transport};

/// Default timeout for status queries.
const QUICK_TIMEOUT: Duration = Duration::from_secs(10);

/// Default timeout for slow operations (traceroute, ping, full config).
const SLOW_TIMEOUT: Duration = Duration::from_secs(60);

/// Grace added on top of the transport's own timeout before the engine
/// gives up on the await itself.
const AWAIT_GRACE: Duration = Duration::from_secs(2);

/// Vendor-aware query facade over a single device session.
pub struct Engine<T: Transport> {
    transport: T,
    vendor: Vendor,
    quick_timeout: Duration,
    slow_timeout: Duration,
}

impl<T: Transport> Engine<T> {
    /// Create an engine over an injected transport handle.
    ///
    /// The vendor starts as `Unknown` (Cisco-style defaults); call
    /// [`detect`](Engine::detect) or [`with_vendor`](Engine::with_vendor)
    /// to pin it.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            vendor: Vendor::Unknown,
            quick_timeout: QUICK_TIMEOUT,
            slow_timeout: SLOW_TIMEOUT,
        }
    }

    /// Pin the vendor without probing.
    pub fn with_vendor(mut self, vendor: Vendor) -> Self {
        self.vendor = vendor;
        self
    }

    /// Override the per-capability timeout policy.
    pub fn with_timeouts(mut self, quick: Duration, slow: Duration) -> Self {
        self.quick_timeout = quick;
        self.slow_timeout = slow;
        self
    }

    /// The vendor currently assigned to this session.
    pub fn vendor(&self) -> Vendor {
        self.vendor
    }

    fn timeout_for(&self, capability: Capability) -> Duration {
        match capability {
            Capability::Traceroute | Capability::Ping | Capability::Config => self.slow_timeout,
            _ => self.quick_timeout,
        }
    }

    async fn execute(&mut self, command: &str, timeout: Duration) -> Result<CommandOutput> {
        debug!("executing {command:?} (timeout {timeout:?})");
        let bounded = tokio::time::timeout(
            timeout + AWAIT_GRACE,
            self.transport.execute(command, timeout),
        );
        match bounded.await {
            Ok(result) => Ok(result?),
            Err(_) => Err(TransportError::Timeout(timeout).into()),
        }
    }

    /// Resolve, execute and return stdout; non-empty stderr is an error.
    async fn run(&mut self, capability: Capability, params: &CommandParams) -> Result<String> {
        let command = catalog::resolve(self.vendor, capability, params)?;
        let output = self.execute(&command, self.timeout_for(capability)).await?;
        if output.has_stderr() {
            return Err(TransportError::Remote {
                stderr: output.stderr.trim().to_string(),
            }
            .into());
        }
        Ok(output.stdout)
    }

    /// Probe the device and assign its vendor.
    ///
    /// Issues the version-equivalent probe for each vendor family in
    /// detection order, feeding every reply into the detector and stopping
    /// at the first non-unknown classification. Probe failures (timeouts,
    /// rejected syntax) are tolerated; exhausting the sequence leaves the
    /// session at `Unknown`.
    pub async fn detect(&mut self) -> Result<Vendor> {
        let params = CommandParams::new();
        let mut outputs: Vec<String> = Vec::new();

        for probe_vendor in detect::PROBE_VENDORS {
            let command = catalog::resolve(probe_vendor, detect::PROBE_CAPABILITY, &params)?;
            match self.execute(&command, self.quick_timeout).await {
                Ok(output) if !output.has_stderr() => outputs.push(output.stdout),
                Ok(output) => debug!("probe {command:?} rejected: {}", output.stderr.trim()),
                Err(err) => debug!("probe {command:?} failed: {err}"),
            }

            let vendor = detect::detect_vendor(&outputs);
            if vendor != Vendor::Unknown {
                self.vendor = vendor;
                return Ok(vendor);
            }
        }

        self.vendor = Vendor::Unknown;
        Ok(Vendor::Unknown)
    }

    /// Device identity facts from the version capability.
    pub async fn device_info(&mut self) -> Result<DeviceInfo> {
        let text = self.run(Capability::Version, &CommandParams::new()).await?;
        Ok(parse::parse_device_info(&text, self.vendor))
    }

    /// Brief interface listing.
    pub async fn interfaces(&mut self) -> Result<Vec<InterfaceRecord>> {
        let text = self.run(Capability::Interfaces, &CommandParams::new()).await?;
        Ok(parse::parse_interfaces(&text, self.vendor))
    }

    /// One interface with detail enrichment applied.
    pub async fn interface_detail(&mut self, name: &str) -> Result<InterfaceRecord> {
        validate_param("interface", name)?;
        let params = CommandParams::new().interface(name);
        let text = self.run(Capability::InterfaceDetail, &params).await?;
        let mut record = InterfaceRecord::new(name);
        parse::enrich_interface(&mut record, &text, self.vendor);
        Ok(record)
    }

    /// Run the detail follow-up for each record in place.
    pub async fn enrich_interfaces(&mut self, records: &mut [InterfaceRecord]) -> Result<()> {
        for record in records.iter_mut() {
            validate_param("interface", &record.name)?;
            let params = CommandParams::new().interface(&record.name);
            let text = self.run(Capability::InterfaceDetail, &params).await?;
            parse::enrich_interface(record, &text, self.vendor);
        }
        Ok(())
    }

    /// Full routing table, in device output order.
    pub async fn routes(&mut self) -> Result<Vec<RouteRecord>> {
        let text = self.run(Capability::RoutingTable, &CommandParams::new()).await?;
        Ok(parse::parse_routes(&text, self.vendor))
    }

    /// Discovered neighbors.
    pub async fn neighbors(&mut self) -> Result<Vec<NeighborRecord>> {
        let text = self.run(Capability::Neighbors, &CommandParams::new()).await?;
        Ok(parse::parse_neighbors(&text, self.vendor))
    }

    /// Traceroute to a target, with the slow timeout.
    pub async fn traceroute(&mut self, target: &str) -> Result<Vec<TraceHop>> {
        validate_param("target", target)?;
        let params = CommandParams::new().target(target);
        let text = self.run(Capability::Traceroute, &params).await?;
        Ok(parse::parse_traceroute(&text, self.vendor))
    }

    /// Ping a target; a reply without the success-rate aggregate is a
    /// parse failure, never a fabricated zero-loss result.
    pub async fn ping(&mut self, target: &str) -> Result<PingStatistics> {
        validate_param("target", target)?;
        let params = CommandParams::new().target(target);
        let text = self.run(Capability::Ping, &params).await?;
        Ok(parse::parse_ping(&text, self.vendor)?)
    }

    /// Raw device configuration text.
    pub async fn config(&mut self) -> Result<String> {
        self.run(Capability::Config, &CommandParams::new()).await
    }

    /// Names of configured VRFs / routing instances.
    pub async fn vrf_list(&mut self) -> Result<Vec<String>> {
        let text = self.run(Capability::VrfList, &CommandParams::new()).await?;
        Ok(parse::parse_vrf_names(&text, self.vendor))
    }

    /// Interface listing scoped to one VRF.
    pub async fn vrf_interfaces(&mut self, vrf: &str) -> Result<Vec<InterfaceRecord>> {
        validate_param("vrf", vrf)?;
        let params = CommandParams::new().vrf(vrf);
        let text = self.run(Capability::VrfInterfaces, &params).await?;
        Ok(parse::parse_interfaces(&text, self.vendor))
    }

    /// Routing table scoped to one VRF.
    pub async fn vrf_routes(&mut self, vrf: &str) -> Result<Vec<RouteRecord>> {
        validate_param("vrf", vrf)?;
        let params = CommandParams::new().vrf(vrf);
        let text = self.run(Capability::VrfRoutes, &params).await?;
        Ok(parse::parse_routes(&text, self.vendor))
    }

    /// Gather interfaces and routes, then evaluate the health rules.
    pub async fn diagnostics(&mut self) -> Result<DiagnosticReport> {
        let interfaces = self.interfaces().await?;
        let routes = self.routes().await?;
        Ok(diagnostics::evaluate(&interfaces, &routes))
    }

    /// Build the device/connection graph around this device.
    pub async fn topology(&mut self, self_id: &str, self_address: &str) -> Result<TopologyGraph> {
        let neighbors = self.neighbors().await?;
        Ok(topology::build_topology(
            self_id,
            self_address,
            self.vendor.label(),
            &neighbors,
        ))
    }

    /// Execute an arbitrary command and return its raw output.
    ///
    /// No parsing, no stderr policy — the caller sees exactly what the
    /// device said.
    pub async fn run_raw(&mut self, command: &str) -> Result<CommandOutput> {
        self.execute(command, self.slow_timeout).await
    }
}

/// Whitelist parameter values before catalog substitution.
///
/// Targets, interface names and VRF names come from untrusted request
/// input and are interpolated literally into a remote command line, so
/// anything outside a conservative hostname/address/interface charset is
/// rejected here.
fn validate_param(name: &'static str, value: &str) -> std::result::Result<(), CatalogError> {
    let ok = !value.is_empty()
        && value.len() <= 255
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '/' | ':'));
    if ok {
        Ok(())
    } else {
        Err(CatalogError::InvalidParameter {
            name,
            value: value.to_string(),
        })
    }
}
