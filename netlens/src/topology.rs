//! Topology graph construction from neighbor-discovery records.

use indexmap::IndexMap;

use crate::records::{NeighborRecord, TopologyDevice, TopologyGraph, TopologyLink};

/// Interface label used when a neighbor record left a side unresolved.
const UNKNOWN_INTERFACE: &str = "Unknown";

/// Build a device/connection graph around the querying device.
///
/// The querying device is always the first device entry. Neighbor devices
/// are deduplicated by identifier; every neighbor record contributes one
/// connection edge, duplicates included.
pub fn build_topology(
    self_id: &str,
    self_address: &str,
    vendor_label: &str,
    neighbors: &[NeighborRecord],
) -> TopologyGraph {
    let mut devices: IndexMap<String, TopologyDevice> = IndexMap::new();
    devices.insert(
        self_id.to_string(),
        TopologyDevice {
            name: self_id.to_string(),
            address: Some(self_address.to_string()),
            device_type: "Router".to_string(),
            platform: Some(vendor_label.to_string()),
        },
    );

    let mut connections = Vec::with_capacity(neighbors.len());

    for neighbor in neighbors {
        devices
            .entry(neighbor.device_id.clone())
            .or_insert_with(|| TopologyDevice {
                name: neighbor.device_id.clone(),
                address: neighbor.mgmt_ip.clone(),
                device_type: classify(neighbor.platform.as_deref()),
                platform: neighbor.platform.clone(),
            });

        connections.push(TopologyLink {
            from: self_id.to_string(),
            to: neighbor.device_id.clone(),
            local_interface: neighbor
                .local_interface
                .clone()
                .unwrap_or_else(|| UNKNOWN_INTERFACE.to_string()),
            remote_interface: neighbor
                .remote_interface
                .clone()
                .unwrap_or_else(|| UNKNOWN_INTERFACE.to_string()),
        });
    }

    TopologyGraph {
        devices: devices.into_values().collect(),
        connections,
    }
}

fn classify(platform: Option<&str>) -> String {
    match platform {
        Some(p) if p.contains("Switch") => "Switch".to_string(),
        _ => "Router".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbor(id: &str, platform: Option<&str>, local: Option<&str>) -> NeighborRecord {
        NeighborRecord {
            device_id: id.to_string(),
            mgmt_ip: Some("10.0.0.9".to_string()),
            platform: platform.map(String::from),
            local_interface: local.map(String::from),
            remote_interface: Some("ge-0/0/1".to_string()),
        }
    }

    #[test]
    fn test_querying_device_first() {
        let graph = build_topology("r1", "192.0.2.1", "cisco", &[]);
        assert_eq!(graph.devices.len(), 1);
        assert_eq!(graph.devices[0].name, "r1");
        assert_eq!(graph.devices[0].address.as_deref(), Some("192.0.2.1"));
        assert_eq!(graph.devices[0].platform.as_deref(), Some("cisco"));
        assert!(graph.connections.is_empty());
    }

    #[test]
    fn test_switch_classification() {
        let neighbors = [
            neighbor("sw1", Some("cisco WS-C3850 Switch"), Some("Gi0/1")),
            neighbor("r2", Some("cisco ISR4331"), Some("Gi0/2")),
            neighbor("x1", None, Some("Gi0/3")),
        ];
        let graph = build_topology("r1", "192.0.2.1", "cisco", &neighbors);

        assert_eq!(graph.devices[1].device_type, "Switch");
        assert_eq!(graph.devices[2].device_type, "Router");
        assert_eq!(graph.devices[3].device_type, "Router");
    }

    #[test]
    fn test_duplicate_neighbor_one_device_two_edges() {
        let neighbors = [
            neighbor("sw1", Some("Switch"), Some("Gi0/1")),
            neighbor("sw1", Some("Switch"), Some("Gi0/2")),
        ];
        let graph = build_topology("r1", "192.0.2.1", "cisco", &neighbors);

        assert_eq!(graph.devices.len(), 2);
        assert_eq!(graph.connections.len(), 2);
        assert_eq!(graph.connections[0].local_interface, "Gi0/1");
        assert_eq!(graph.connections[1].local_interface, "Gi0/2");
    }

    #[test]
    fn test_unresolved_interfaces_default_to_unknown() {
        let mut n = neighbor("r9", None, None);
        n.remote_interface = None;
        let graph = build_topology("r1", "192.0.2.1", "cisco", &[n]);

        let edge = &graph.connections[0];
        assert_eq!(edge.local_interface, "Unknown");
        assert_eq!(edge.remote_interface, "Unknown");
    }

    #[test]
    fn test_neighbor_sharing_self_name_not_duplicated() {
        let neighbors = [neighbor("r1", None, Some("Gi0/5"))];
        let graph = build_topology("r1", "192.0.2.1", "cisco", &neighbors);

        // Still one device entry, but the edge is kept.
        assert_eq!(graph.devices.len(), 1);
        assert_eq!(graph.connections.len(), 1);
    }
}
