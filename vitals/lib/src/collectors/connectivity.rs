use serde::Serialize;

use crate::collected::{Collected, Collector};
use crate::probe::SystemProbe;

/// Reachability of one probed host.
///
/// Each host carries its own result, so one probe that cannot be issued
/// doesn't hide the others.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectivityResult {
    pub host: String,
    pub reachable: Collected<bool>,
}

impl ConnectivityResult {
    /// True only when the probe ran and got an answer.
    pub fn is_connected(&self) -> bool {
        matches!(self.reachable, Collected::Available(true))
    }
}

/// Sends one probe to each host, in order.
pub fn collect(probe: &dyn SystemProbe, hosts: &[String]) -> Vec<ConnectivityResult> {
    hosts
        .iter()
        .map(|host| {
            let reachable = match probe.ping(host) {
                Ok(reachable) => {
                    tracing::debug!(%host, reachable, "reachability probe finished");
                    Collected::Available(reachable)
                }
                Err(err) => {
                    Collected::failed(Collector::NetworkConnectivity, format!("{host}: {err}"))
                }
            };
            ConnectivityResult {
                host: host.clone(),
                reachable,
            }
        })
        .collect()
}
