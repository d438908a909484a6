//! Vendor detection from banner / version-probe output.
//!
//! Classification is a case-insensitive substring search against a fixed
//! ordered signature list; the first matching signature wins. Detection is
//! a pure function of the supplied text — the engine facade owns the probe
//! sequence and feeds each successive probe output into the detector.

use crate::catalog::{Capability, Vendor};

/// Ordered (signature, vendor) pairs. More specific signatures come first
/// so that e.g. a Huawei VRP banner quoting "HP" compatibility strings
/// cannot misclassify.
const SIGNATURES: &[(&str, Vendor)] = &[
    ("cisco ios", Vendor::Cisco),
    ("cisco nexus", Vendor::Cisco),
    ("cisco", Vendor::Cisco),
    ("junos", Vendor::Juniper),
    ("juniper", Vendor::Juniper),
    ("huawei", Vendor::Huawei),
    ("vrp (r) software", Vendor::Huawei),
    ("hewlett-packard", Vendor::Hp),
    ("hewlett packard", Vendor::Hp),
    ("procurve", Vendor::Hp),
    ("comware", Vendor::Hp),
    ("mikrotik", Vendor::Mikrotik),
    ("routeros", Vendor::Mikrotik),
];

/// Vendors whose version-equivalent command is worth probing, in order.
///
/// The Cisco-style probe comes first; the alternates cover the display-
/// and print-style command families. The engine resolves each of these
/// through the catalog's [`Capability::Version`] template.
pub const PROBE_VENDORS: [Vendor; 3] = [Vendor::Cisco, Vendor::Huawei, Vendor::Mikrotik];

/// Capability issued for vendor detection probes.
pub const PROBE_CAPABILITY: Capability = Capability::Version;

/// Classify a single blob of banner/version text.
pub fn classify(text: &str) -> Vendor {
    let haystack = text.to_ascii_lowercase();
    for (signature, vendor) in SIGNATURES {
        if haystack.contains(signature) {
            return *vendor;
        }
    }
    Vendor::Unknown
}

/// Classify an ordered sequence of probe outputs.
///
/// Each output is tried in order; the first non-unknown classification is
/// returned. Exhausting the sequence without a match yields
/// [`Vendor::Unknown`].
pub fn detect_vendor<S: AsRef<str>>(probe_outputs: &[S]) -> Vendor {
    for output in probe_outputs {
        let vendor = classify(output.as_ref());
        if vendor != Vendor::Unknown {
            return vendor;
        }
    }
    Vendor::Unknown
}
