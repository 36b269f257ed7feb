use serde::{Deserialize, Serialize};
use std::fmt;

/// Host operating system family.
///
/// Selects which platform queries [`HostProbe`](crate::probe::HostProbe)
/// issues and which service allow-list applies by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostOs {
    Linux,
    Macos,
    Windows,
    Other,
}

impl HostOs {
    /// Detect the current host OS.
    pub fn detect() -> Self {
        #[cfg(target_os = "linux")]
        {
            HostOs::Linux
        }
        #[cfg(target_os = "macos")]
        {
            HostOs::Macos
        }
        #[cfg(target_os = "windows")]
        {
            HostOs::Windows
        }
        #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
        {
            HostOs::Other
        }
    }

    /// Service identifiers checked when the configuration does not name any.
    pub fn default_critical_services(self) -> &'static [&'static str] {
        match self {
            HostOs::Windows => &[
                "wuauserv",
                "WinDefend",
                "Dnscache",
                "Audiosrv",
                "Spooler",
                "BITS",
            ],
            HostOs::Linux => &[
                "systemd-journald",
                "systemd-resolved",
                "NetworkManager",
                "sshd",
                "cron",
                "dbus",
            ],
            HostOs::Macos | HostOs::Other => &[],
        }
    }

    /// Heading for the pending updates section.
    pub fn updates_heading(self) -> &'static str {
        match self {
            HostOs::Windows => "Windows Updates",
            _ => "System Updates",
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostOs::Linux => write!(f, "Linux"),
            HostOs::Macos => write!(f, "macOS"),
            HostOs::Windows => write!(f, "Windows"),
            HostOs::Other => write!(f, "Other"),
        }
    }
}
