//! Rule-based health evaluation over normalized records.
//!
//! Rules are pure functions of the interface and route records passed in;
//! the evaluator never re-invokes the transport. Issues come out in rule
//! order, and the report status derives from the worst severity present.

use std::collections::HashMap;

use serde_json::json;

use crate::records::{
    DiagnosticIssue, DiagnosticReport, InterfaceRecord, LinkState, RouteRecord, Severity,
};

/// Evaluate the health rules and assemble a report.
pub fn evaluate(interfaces: &[InterfaceRecord], routes: &[RouteRecord]) -> DiagnosticReport {
    let mut issues = Vec::new();

    check_interfaces(interfaces, &mut issues);
    check_default_route(routes, &mut issues);
    check_duplicate_routes(routes, &mut issues);

    DiagnosticReport::from_issues(issues)
}

fn check_interfaces(interfaces: &[InterfaceRecord], issues: &mut Vec<DiagnosticIssue>) {
    for interface in interfaces {
        if interface.status == LinkState::Down && interface.protocol == LinkState::Down {
            issues.push(
                DiagnosticIssue::new(
                    "interface_down",
                    Severity::High,
                    format!("{} is down", interface.name),
                    "Check the physical connection, or enable the interface with 'no shutdown'",
                )
                .with_component(&interface.name),
            );
        } else if interface.status == LinkState::AdminDown {
            issues.push(
                DiagnosticIssue::new(
                    "interface_admin_disabled",
                    Severity::Medium,
                    format!("{} is administratively disabled", interface.name),
                    "Enable the interface with 'no shutdown' if it is meant to carry traffic",
                )
                .with_component(&interface.name),
            );
        }
    }
}

fn check_default_route(routes: &[RouteRecord], issues: &mut Vec<DiagnosticIssue>) {
    if !routes.iter().any(|r| r.is_default()) {
        issues.push(
            DiagnosticIssue::new(
                "missing_default_route",
                Severity::High,
                "No default route is configured",
                "Configure one with 'ip route 0.0.0.0 0.0.0.0 <next-hop>'",
            )
            .with_component("routing"),
        );
    }
}

/// Flag destination/prefix keys re-announced under a different protocol.
///
/// Comparison is against the most recent prior sighting of the key only:
/// the first occurrence establishes the baseline and every sighting
/// re-arms it, so a non-adjacent re-sighting under the original protocol
/// resets the comparison. Detection is not exhaustive pairwise.
fn check_duplicate_routes(routes: &[RouteRecord], issues: &mut Vec<DiagnosticIssue>) {
    let mut last_seen: HashMap<(String, u8), String> = HashMap::new();

    for route in routes {
        let key = route.key();
        if let Some(previous) = last_seen.get(&key) {
            if *previous != route.protocol {
                issues.push(
                    DiagnosticIssue::new(
                        "duplicate_route",
                        Severity::Medium,
                        format!(
                            "{}/{} is announced by multiple protocols",
                            route.destination, route.prefix_len
                        ),
                        "Verify routing protocol redistribution and static route overlap",
                    )
                    .with_component("routing")
                    .with_detail(json!({
                        "destination": route.destination,
                        "prefix_len": route.prefix_len,
                        "protocols": [previous, &route.protocol],
                    })),
                );
            }
        }
        last_seen.insert(key, route.protocol.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{HealthStatus, RouteKind};

    fn iface(name: &str, status: LinkState, protocol: LinkState) -> InterfaceRecord {
        let mut record = InterfaceRecord::new(name);
        record.status = status;
        record.protocol = protocol;
        record
    }

    fn route(dest: &str, prefix: u8, protocol: &str) -> RouteRecord {
        RouteRecord {
            destination: dest.to_string(),
            prefix_len: prefix,
            next_hop: "10.0.0.254".to_string(),
            interface: None,
            protocol: protocol.to_string(),
            metric: 0,
            distance: 1,
            kind: RouteKind::Static,
        }
    }

    #[test]
    fn test_healthy_report() {
        let interfaces = [iface("Gi0", LinkState::Up, LinkState::Up)];
        let routes = [route("0.0.0.0", 0, "S")];
        let report = evaluate(&interfaces, &routes);

        assert_eq!(report.status, HealthStatus::Healthy);
        assert!(report.issues.is_empty());
        assert_eq!(report.summary, "All systems operating normally");
    }

    #[test]
    fn test_down_interface_and_missing_default_route() {
        let interfaces = [iface("Gi2", LinkState::Down, LinkState::Down)];
        let routes = [route("192.168.1.0", 24, "C")];
        let report = evaluate(&interfaces, &routes);

        assert_eq!(report.issues.len(), 2);
        assert_eq!(report.issues[0].kind, "interface_down");
        assert_eq!(report.issues[0].severity, Severity::High);
        assert_eq!(report.issues[0].component.as_deref(), Some("Gi2"));
        assert_eq!(report.issues[1].kind, "missing_default_route");
        assert_eq!(report.issues[1].severity, Severity::High);
        assert_eq!(report.issues[1].component.as_deref(), Some("routing"));

        // Two high issues, no critical: warning, not error.
        assert_eq!(report.status, HealthStatus::Warning);
        assert_eq!(report.summary, "2 issue(s) detected");
    }

    #[test]
    fn test_admin_disabled_is_medium() {
        let interfaces = [iface("Gi3", LinkState::AdminDown, LinkState::Down)];
        let routes = [route("0.0.0.0", 0, "S")];
        let report = evaluate(&interfaces, &routes);

        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].kind, "interface_admin_disabled");
        assert_eq!(report.issues[0].severity, Severity::Medium);
    }

    #[test]
    fn test_duplicate_route_detail_payload() {
        let routes = [
            route("0.0.0.0", 0, "S"),
            route("10.0.0.0", 24, "S"),
            route("10.0.0.0", 24, "O"),
        ];
        let report = evaluate(&[], &routes);

        assert_eq!(report.issues.len(), 1);
        let issue = &report.issues[0];
        assert_eq!(issue.kind, "duplicate_route");
        let detail = issue.detail.as_ref().unwrap();
        assert_eq!(detail["protocols"], json!(["S", "O"]));
    }

    #[test]
    fn test_duplicate_comparison_is_against_most_recent_sighting() {
        // S, O, O for the same key: only the S->O transition fires; the
        // second O matches the re-armed baseline.
        let routes = [
            route("0.0.0.0", 0, "S"),
            route("10.0.0.0", 24, "S"),
            route("10.0.0.0", 24, "O"),
            route("10.0.0.0", 24, "O"),
        ];
        let report = evaluate(&[], &routes);
        assert_eq!(report.issues.len(), 1);
    }

    #[test]
    fn test_same_protocol_duplicates_not_flagged() {
        let routes = [
            route("0.0.0.0", 0, "S"),
            route("10.0.0.0", 24, "O"),
            route("10.0.0.0", 24, "O"),
        ];
        let report = evaluate(&[], &routes);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_empty_inputs_flag_missing_default_route_only() {
        let report = evaluate(&[], &[]);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].kind, "missing_default_route");
    }
}
