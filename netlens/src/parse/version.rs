//! Device identity extraction from version-probe output.
//!
//! Best-effort: every field that cannot be located stays at "Unknown"
//! rather than failing the capability. The Cisco patterns follow the
//! classic "show version" banner; the other vendors use their own label
//! sets.

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::Vendor;
use crate::records::DeviceInfo;

static CISCO_MODEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[Cc]isco ([^(\r\n]+?) \(").unwrap());
static CISCO_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Version ([^,\s]+)").unwrap());
static CISCO_UPTIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\S+) uptime is ([^\r\n]+)").unwrap());
static CISCO_SERIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[Pp]rocessor board ID (\S+)").unwrap());

static JUNIPER_HOSTNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Hostname:\s*(\S+)").unwrap());
static JUNIPER_MODEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Model:\s*(\S+)").unwrap());
static JUNIPER_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Junos:\s*(\S+)").unwrap());

static VRP_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[Vv]ersion ([^\s,()]+)").unwrap());
static VRP_UPTIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\S+) uptime is ([^\r\n]+)").unwrap());

static ROS_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"version:\s*(\S+)").unwrap());
static ROS_BOARD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"board-name:\s*([^\r\n]+)").unwrap());
static ROS_UPTIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"uptime:\s*(\S+)").unwrap());

/// Extract device identity facts from a version probe's output.
pub fn parse_device_info(text: &str, vendor: Vendor) -> DeviceInfo {
    let mut info = DeviceInfo::unknown(vendor);

    match vendor {
        Vendor::Juniper => {
            if let Some(c) = JUNIPER_HOSTNAME.captures(text) {
                info.hostname = Some(c[1].to_string());
            }
            if let Some(c) = JUNIPER_MODEL.captures(text) {
                info.model = c[1].to_string();
            }
            if let Some(c) = JUNIPER_VERSION.captures(text) {
                info.version = c[1].to_string();
            }
        }
        Vendor::Hp | Vendor::Huawei => {
            if let Some(c) = VRP_VERSION.captures(text) {
                info.version = c[1].to_string();
            }
            if let Some(c) = VRP_UPTIME.captures(text) {
                info.model = c[1].to_string();
                info.uptime = c[2].trim().to_string();
            }
        }
        Vendor::Mikrotik => {
            if let Some(c) = ROS_VERSION.captures(text) {
                info.version = c[1].to_string();
            }
            if let Some(c) = ROS_BOARD.captures(text) {
                info.model = c[1].trim().to_string();
            }
            if let Some(c) = ROS_UPTIME.captures(text) {
                info.uptime = c[1].to_string();
            }
        }
        Vendor::Cisco | Vendor::Unknown => {
            if let Some(c) = CISCO_MODEL.captures(text) {
                info.model = c[1].trim().to_string();
            }
            if let Some(c) = CISCO_VERSION.captures(text) {
                info.version = c[1].to_string();
            }
            if let Some(c) = CISCO_UPTIME.captures(text) {
                info.hostname = Some(c[1].to_string());
                info.uptime = c[2].trim().to_string();
            }
            if let Some(c) = CISCO_SERIAL.captures(text) {
                info.serial = c[1].to_string();
            }
        }
    }

    info
}
