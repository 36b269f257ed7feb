use regex::Regex;
use serde::Serialize;
use std::net::Ipv4Addr;
use std::sync::LazyLock;

use crate::collected::{Collected, Collector};
use crate::probe::{RawAdapter, SystemProbe};

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:\.\d+)?)").expect("valid regex"));

/// A network adapter that is up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkAdapter {
    pub name: String,
    pub description: String,
    pub status: String,
    /// Leading number of the reported link speed; see [`parse_link_speed`]
    pub link_speed_mbps: f64,
    pub ipv4_addresses: Vec<Ipv4Addr>,
    pub mac_address: String,
}

/// Extracts the leading numeric token from a link speed such as "1 Gbps".
///
/// Only the number is kept; the unit text is ignored, so "1 Gbps" reads as
/// 1. Text without a leading number reads as 0.
///
/// ## Examples
///
/// ```
/// use vitals_lib::collectors::parse_link_speed;
///
/// assert_eq!(parse_link_speed("1 Gbps"), 1.0);
/// assert_eq!(parse_link_speed("866.7 Mbps"), 866.7);
/// assert_eq!(parse_link_speed("unknown"), 0.0);
/// ```
pub fn parse_link_speed(text: &str) -> f64 {
    LEADING_NUMBER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

impl From<RawAdapter> for NetworkAdapter {
    fn from(adapter: RawAdapter) -> Self {
        Self {
            link_speed_mbps: parse_link_speed(&adapter.link_speed),
            name: adapter.name,
            description: adapter.description,
            status: adapter.status,
            ipv4_addresses: adapter.ipv4_addresses,
            mac_address: adapter.mac_address.unwrap_or_default(),
        }
    }
}

/// Lists adapters in the "up" state, ordered by name.
pub fn collect(probe: &dyn SystemProbe) -> Collected<Vec<NetworkAdapter>> {
    let adapters = probe.adapters().map(|adapters| {
        let mut up: Vec<NetworkAdapter> = adapters
            .into_iter()
            .filter(RawAdapter::is_up)
            .map(NetworkAdapter::from)
            .collect();
        up.sort_by(|a, b| a.name.cmp(&b.name));
        up
    });
    Collected::from_result(Collector::NetworkAdapters, adapters)
}
