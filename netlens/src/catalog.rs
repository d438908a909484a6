//! Command catalog: maps (vendor, capability) pairs to vendor CLI commands.
//!
//! Each supported vendor family speaks its own command dialect. The catalog
//! holds one static template per (vendor, capability) pair, with named
//! `{target}`, `{interface}` and `{vrf}` placeholders substituted literally
//! at resolve time. Dispatch is an exhaustive match over the closed
//! [`Vendor`] and [`Capability`] enums, so adding a vendor is a
//! compile-time-checked exercise rather than a runtime registry lookup.
//!
//! The catalog does not validate or escape parameter values. Raw targets
//! come from untrusted request input, so callers must whitelist interface
//! names, VRF names and targets before substitution (the engine facade
//! does this for its own calls).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Device operating-system family.
///
/// Closed enumeration; immutable once assigned to a device session.
/// `Unknown` resolves commands and parses output through the Cisco-style
/// grammar, the documented default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    Cisco,
    Juniper,
    Hp,
    Huawei,
    Mikrotik,
    Unknown,
}

impl Vendor {
    /// All concrete vendors (excludes `Unknown`).
    pub const ALL: [Vendor; 5] = [
        Vendor::Cisco,
        Vendor::Juniper,
        Vendor::Hp,
        Vendor::Huawei,
        Vendor::Mikrotik,
    ];

    /// Lowercase label, stable across serialization.
    pub fn label(&self) -> &'static str {
        match self {
            Vendor::Cisco => "cisco",
            Vendor::Juniper => "juniper",
            Vendor::Hp => "hp",
            Vendor::Huawei => "huawei",
            Vendor::Mikrotik => "mikrotik",
            Vendor::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Vendor {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cisco" => Ok(Vendor::Cisco),
            "juniper" => Ok(Vendor::Juniper),
            "hp" => Ok(Vendor::Hp),
            "huawei" => Ok(Vendor::Huawei),
            "mikrotik" => Ok(Vendor::Mikrotik),
            "unknown" => Ok(Vendor::Unknown),
            _ => Err(()),
        }
    }
}

/// Abstract operation a caller wants performed, independent of vendor syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Version,
    Interfaces,
    InterfaceDetail,
    RoutingTable,
    Neighbors,
    Config,
    Traceroute,
    Ping,
    VrfList,
    VrfInterfaces,
    VrfRoutes,
}

impl Capability {
    /// All capabilities, in catalog order.
    pub const ALL: [Capability; 11] = [
        Capability::Version,
        Capability::Interfaces,
        Capability::InterfaceDetail,
        Capability::RoutingTable,
        Capability::Neighbors,
        Capability::Config,
        Capability::Traceroute,
        Capability::Ping,
        Capability::VrfList,
        Capability::VrfInterfaces,
        Capability::VrfRoutes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Version => "version",
            Capability::Interfaces => "interfaces",
            Capability::InterfaceDetail => "interface_detail",
            Capability::RoutingTable => "routing_table",
            Capability::Neighbors => "neighbors",
            Capability::Config => "config",
            Capability::Traceroute => "traceroute",
            Capability::Ping => "ping",
            Capability::VrfList => "vrf_list",
            Capability::VrfInterfaces => "vrf_interfaces",
            Capability::VrfRoutes => "vrf_routes",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named placeholder values for command templates.
#[derive(Debug, Clone, Default)]
pub struct CommandParams {
    /// Ping/traceroute destination.
    pub target: Option<String>,

    /// Interface name for per-interface queries.
    pub interface: Option<String>,

    /// VRF / routing-instance name.
    pub vrf: Option<String>,
}

impl CommandParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = Some(interface.into());
        self
    }

    pub fn vrf(mut self, vrf: impl Into<String>) -> Self {
        self.vrf = Some(vrf.into());
        self
    }
}

/// Look up the raw command template for a (vendor, capability) pair.
///
/// `Unknown` uses the Cisco table. `None` means the vendor genuinely has
/// no equivalent command; callers must surface that, never substitute.
pub fn template(vendor: Vendor, capability: Capability) -> Option<&'static str> {
    match vendor {
        Vendor::Cisco | Vendor::Unknown => cisco(capability),
        Vendor::Juniper => juniper(capability),
        Vendor::Hp => hp(capability),
        Vendor::Huawei => huawei(capability),
        Vendor::Mikrotik => mikrotik(capability),
    }
}

fn cisco(capability: Capability) -> Option<&'static str> {
    Some(match capability {
        Capability::Version => "show version",
        Capability::Interfaces => "show ip interface brief",
        Capability::InterfaceDetail => "show interfaces {interface}",
        Capability::RoutingTable => "show ip route",
        Capability::Neighbors => "show cdp neighbors detail",
        Capability::Config => "show running-config",
        Capability::Traceroute => "traceroute {target}",
        Capability::Ping => "ping {target}",
        Capability::VrfList => "show vrf",
        Capability::VrfInterfaces => "show ip interface brief vrf {vrf}",
        Capability::VrfRoutes => "show ip route vrf {vrf}",
    })
}

fn juniper(capability: Capability) -> Option<&'static str> {
    Some(match capability {
        Capability::Version => "show version",
        Capability::Interfaces => "show interfaces terse",
        Capability::InterfaceDetail => "show interfaces {interface}",
        Capability::RoutingTable => "show route",
        Capability::Neighbors => "show lldp neighbors detail",
        Capability::Config => "show configuration",
        Capability::Traceroute => "traceroute {target}",
        Capability::Ping => "ping {target} count 5",
        Capability::VrfList => "show route instance",
        Capability::VrfInterfaces => "show interfaces routing-instance {vrf} terse",
        Capability::VrfRoutes => "show route table {vrf}.inet.0",
    })
}

fn hp(capability: Capability) -> Option<&'static str> {
    Some(match capability {
        Capability::Version => "display version",
        Capability::Interfaces => "display ip interface brief",
        Capability::InterfaceDetail => "display interface {interface}",
        Capability::RoutingTable => "display ip routing-table",
        Capability::Neighbors => "display lldp neighbor-information verbose",
        Capability::Config => "display current-configuration",
        Capability::Traceroute => "tracert {target}",
        Capability::Ping => "ping {target}",
        Capability::VrfList => "display ip vpn-instance",
        Capability::VrfInterfaces => "display ip interface brief vpn-instance {vrf}",
        Capability::VrfRoutes => "display ip routing-table vpn-instance {vrf}",
    })
}

fn huawei(capability: Capability) -> Option<&'static str> {
    Some(match capability {
        Capability::Version => "display version",
        Capability::Interfaces => "display ip interface brief",
        Capability::InterfaceDetail => "display interface {interface}",
        Capability::RoutingTable => "display ip routing-table",
        Capability::Neighbors => "display lldp neighbor",
        Capability::Config => "display current-configuration",
        Capability::Traceroute => "tracert {target}",
        Capability::Ping => "ping {target}",
        Capability::VrfList => "display ip vpn-instance",
        Capability::VrfInterfaces => "display ip interface brief vpn-instance {vrf}",
        Capability::VrfRoutes => "display ip routing-table vpn-instance {vrf}",
    })
}

fn mikrotik(capability: Capability) -> Option<&'static str> {
    Some(match capability {
        Capability::Version => "/system resource print",
        Capability::Interfaces => "/ip address print",
        Capability::InterfaceDetail => "/interface print detail where name={interface}",
        Capability::RoutingTable => "/ip route print",
        Capability::Neighbors => "/ip neighbor print detail",
        Capability::Config => "/export",
        Capability::Traceroute => "/tool traceroute {target} count=1",
        Capability::Ping => "/ping {target} count=5",
        Capability::VrfList => "/ip vrf print",
        Capability::VrfInterfaces => "/ip vrf print detail where name={vrf}",
        Capability::VrfRoutes => "/ip route print where routing-table={vrf}",
    })
}

/// Resolve a (vendor, capability) pair to a concrete command string.
///
/// Placeholder substitution is literal; the catalog neither validates nor
/// escapes parameter values. A placeholder without a supplied value is a
/// [`CatalogError::MissingParameter`].
pub fn resolve(
    vendor: Vendor,
    capability: Capability,
    params: &CommandParams,
) -> Result<String, CatalogError> {
    let template = template(vendor, capability).ok_or(CatalogError::UnsupportedCapability {
        vendor,
        capability,
    })?;

    let mut command = template.to_string();
    for (placeholder, name, value) in [
        ("{target}", "target", params.target.as_deref()),
        ("{interface}", "interface", params.interface.as_deref()),
        ("{vrf}", "vrf", params.vrf.as_deref()),
    ] {
        if command.contains(placeholder) {
            let value = value.ok_or(CatalogError::MissingParameter { capability, name })?;
            command = command.replace(placeholder, value);
        }
    }

    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_params() -> CommandParams {
        CommandParams::new()
            .target("10.0.0.1")
            .interface("GigabitEthernet0/1")
            .vrf("CUSTOMER-A")
    }

    #[test]
    fn test_every_pair_resolves() {
        // Every (vendor, capability) pair the engine can use must resolve
        // to a non-empty command with no placeholder left behind.
        let params = full_params();
        for vendor in Vendor::ALL {
            for capability in Capability::ALL {
                let command = resolve(vendor, capability, &params)
                    .unwrap_or_else(|e| panic!("{vendor}/{capability}: {e}"));
                assert!(!command.is_empty());
                assert!(
                    !command.contains('{') && !command.contains('}'),
                    "{vendor}/{capability} left a placeholder: {command}"
                );
            }
        }
    }

    #[test]
    fn test_unknown_vendor_uses_cisco_table() {
        let params = CommandParams::new();
        let unknown = resolve(Vendor::Unknown, Capability::Interfaces, &params).unwrap();
        let cisco = resolve(Vendor::Cisco, Capability::Interfaces, &params).unwrap();
        assert_eq!(unknown, cisco);
        assert_eq!(cisco, "show ip interface brief");
    }

    #[test]
    fn test_substitution_is_literal() {
        let params = CommandParams::new().target("192.0.2.77");
        let command = resolve(Vendor::Cisco, Capability::Ping, &params).unwrap();
        assert_eq!(command, "ping 192.0.2.77");

        let command = resolve(Vendor::Juniper, Capability::Ping, &params).unwrap();
        assert_eq!(command, "ping 192.0.2.77 count 5");
    }

    #[test]
    fn test_missing_parameter() {
        let err = resolve(Vendor::Cisco, Capability::Traceroute, &CommandParams::new())
            .expect_err("traceroute requires a target");
        match err {
            CatalogError::MissingParameter { name, .. } => assert_eq!(name, "target"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_vrf_substitution() {
        let params = CommandParams::new().vrf("MGMT");
        let command = resolve(Vendor::Huawei, Capability::VrfRoutes, &params).unwrap();
        assert_eq!(command, "display ip routing-table vpn-instance MGMT");
    }

    #[test]
    fn test_vendor_round_trip() {
        for vendor in Vendor::ALL {
            assert_eq!(vendor.label().parse::<Vendor>(), Ok(vendor));
        }
        assert_eq!("CISCO".parse::<Vendor>(), Ok(Vendor::Cisco));
        assert!("arista".parse::<Vendor>().is_err());
    }
}
