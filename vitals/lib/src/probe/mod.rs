//! Queries against the host.
//!
//! Collectors never talk to the operating system directly. They go through
//! the [`SystemProbe`] trait, which returns raw, un-normalized values or a
//! [`ProbeError`]. [`HostProbe`] is the implementation backed by the real
//! machine; tests substitute their own.
//!
//! ## Examples
//!
//! ```no_run
//! use vitals_lib::probe::{HostProbe, SystemProbe};
//! use std::time::Duration;
//!
//! let probe = HostProbe::new(Duration::from_secs(30));
//! let snapshot = probe.os_snapshot().unwrap();
//! println!("{} {}", snapshot.os_name, snapshot.os_version);
//! ```

use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::time::Duration;
use strum::Display;

use crate::error::ProbeError;

mod command;
#[cfg(test)]
pub(crate) mod fake;
mod host;
mod linux;
mod windows;

pub use host::HostProbe;

/// Identity and memory figures from one OS instrumentation query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsSnapshot {
    /// Operating system name (e.g., "Windows 11 Pro", "Ubuntu 24.04 LTS")
    pub os_name: String,
    /// Operating system version
    pub os_version: String,
    /// CPU brand string
    pub processor: String,
    /// Computer (host) name
    pub computer_name: String,
    /// Total physical memory in bytes
    pub total_memory_bytes: u64,
    /// Free physical memory in bytes
    pub free_memory_bytes: u64,
}

/// A mounted filesystem volume as reported by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawVolume {
    /// Drive letter or mount point
    pub id: String,
    /// Used space in bytes, if the host could tell
    pub used_bytes: Option<u64>,
    /// Free space in bytes, if the host could tell
    pub free_bytes: Option<u64>,
}

/// A sound device with its numeric status codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSoundDevice {
    pub name: String,
    pub description: String,
    /// Availability code, 1-13 when known
    pub status_code: Option<u32>,
    /// Configuration manager error code, 0-10 when known
    pub config_error_code: Option<u32>,
}

/// A network adapter before filtering and speed parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAdapter {
    pub name: String,
    pub description: String,
    /// Operational status text (e.g., "Up", "Disconnected")
    pub status: String,
    /// Human readable link speed (e.g., "1 Gbps", "100 Mbps")
    pub link_speed: String,
    pub ipv4_addresses: Vec<Ipv4Addr>,
    /// MAC address in the platform's native notation
    pub mac_address: Option<String>,
}

impl RawAdapter {
    pub fn is_up(&self) -> bool {
        self.status.eq_ignore_ascii_case("up")
    }
}

/// Running state of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum ServiceRunState {
    Running,
    Stopped,
    Paused,
    #[strum(to_string = "Start Pending")]
    StartPending,
    #[strum(to_string = "Stop Pending")]
    StopPending,
    Unknown,
}

impl ServiceRunState {
    /// Parses the `Status` text of a Windows service.
    pub fn from_windows(status: &str) -> Self {
        match status {
            "Running" => Self::Running,
            "Stopped" => Self::Stopped,
            "Paused" | "PausePending" => Self::Paused,
            "StartPending" | "ContinuePending" => Self::StartPending,
            "StopPending" => Self::StopPending,
            _ => Self::Unknown,
        }
    }

    /// Derives the state from systemd's `ActiveState` and `SubState`.
    pub fn from_systemd(active: &str, sub: &str) -> Self {
        match (active, sub) {
            ("active", _) | ("reloading", _) => Self::Running,
            ("activating", _) => Self::StartPending,
            ("deactivating", _) => Self::StopPending,
            ("inactive", _) | ("failed", _) => Self::Stopped,
            _ => Self::Unknown,
        }
    }
}

/// How a service is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum ServiceStartType {
    Automatic,
    Manual,
    Disabled,
    Boot,
    System,
    Static,
    Unknown,
}

impl ServiceStartType {
    /// Parses the `StartType` text of a Windows service.
    pub fn from_windows(start_type: &str) -> Self {
        match start_type {
            "Automatic" | "AutomaticDelayedStart" => Self::Automatic,
            "Manual" => Self::Manual,
            "Disabled" => Self::Disabled,
            "Boot" => Self::Boot,
            "System" => Self::System,
            _ => Self::Unknown,
        }
    }

    /// Parses systemd's `UnitFileState`.
    pub fn from_systemd(unit_file_state: &str) -> Self {
        match unit_file_state {
            "enabled" | "enabled-runtime" | "alias" => Self::Automatic,
            "disabled" | "indirect" => Self::Manual,
            "masked" | "masked-runtime" => Self::Disabled,
            "static" | "generated" | "transient" => Self::Static,
            _ => Self::Unknown,
        }
    }
}

/// A service found on the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawService {
    pub id: String,
    pub display_name: String,
    pub state: ServiceRunState,
    pub start_type: ServiceStartType,
}

/// The external collaborators a report depends on.
///
/// Every method is one query. Implementations report failure through
/// [`ProbeError`] and never panic; the caller decides how a failure shows up
/// in the report.
pub trait SystemProbe {
    /// OS identity, processor name, computer name and memory totals.
    fn os_snapshot(&self) -> Result<OsSnapshot, ProbeError>;

    /// Overall processor utilization in percent, sampled over `window`.
    fn sample_cpu(&self, window: Duration) -> Result<f64, ProbeError>;

    /// Mounted filesystem volumes.
    fn volumes(&self) -> Result<Vec<RawVolume>, ProbeError>;

    /// Sends a single reachability probe to `host`.
    ///
    /// `Ok(false)` means the probe ran and got no answer; `Err` means the
    /// probe itself could not be issued.
    fn ping(&self, host: &str) -> Result<bool, ProbeError>;

    /// Number of available updates that are not installed yet.
    fn pending_updates(&self) -> Result<u64, ProbeError>;

    /// Sound devices known to the OS.
    fn sound_devices(&self) -> Result<Vec<RawSoundDevice>, ProbeError>;

    /// All network adapters, in any state.
    fn adapters(&self) -> Result<Vec<RawAdapter>, ProbeError>;

    /// Looks up one service by identifier. `Ok(None)` if no such service exists.
    fn service(&self, id: &str) -> Result<Option<RawService>, ProbeError>;
}
