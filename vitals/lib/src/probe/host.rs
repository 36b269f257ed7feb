use std::thread;
use std::time::Duration;
use sysinfo::{CpuRefreshKind, Disks, MemoryRefreshKind, RefreshKind, System};

use super::{
    OsSnapshot, RawAdapter, RawService, RawSoundDevice, RawVolume, SystemProbe, command, linux,
    windows,
};
use crate::error::ProbeError;
use crate::platform::HostOs;

/// [`SystemProbe`] backed by the local machine.
///
/// Identity, CPU, memory and volumes come from `sysinfo` on every platform.
/// Updates, sound devices, adapters and services are platform specific; see
/// the `windows` and `linux` submodules.
#[derive(Debug, Clone)]
pub struct HostProbe {
    os: HostOs,
    command_timeout: Duration,
}

impl HostProbe {
    /// Create a probe for the current host.
    pub fn new(command_timeout: Duration) -> Self {
        Self {
            os: HostOs::detect(),
            command_timeout,
        }
    }

    /// The host OS this probe targets.
    pub fn host_os(&self) -> HostOs {
        self.os
    }

    fn ping_args<'a>(&self, host: &'a str) -> Vec<&'a str> {
        match self.os {
            HostOs::Windows => vec!["-n", "1", "-w", "2000", host],
            HostOs::Linux => vec!["-c", "1", "-W", "2", host],
            HostOs::Macos | HostOs::Other => vec!["-c", "1", host],
        }
    }
}

impl Default for HostProbe {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl SystemProbe for HostProbe {
    fn os_snapshot(&self) -> Result<OsSnapshot, ProbeError> {
        let sys = System::new_with_specifics(
            RefreshKind::nothing()
                .with_cpu(CpuRefreshKind::everything())
                .with_memory(MemoryRefreshKind::nothing().with_ram()),
        );

        // available_memory() may read 0 on some platforms; fall back to free_memory().
        let available = sys.available_memory();
        let free_memory_bytes = if available == 0 {
            sys.free_memory()
        } else {
            available
        };

        let os_name = System::long_os_version()
            .or_else(System::name)
            .ok_or_else(|| {
                ProbeError::Invalid("operating system name is unavailable".to_string())
            })?;

        Ok(OsSnapshot {
            os_name,
            os_version: System::os_version().unwrap_or_default(),
            processor: sys
                .cpus()
                .first()
                .map(|c| c.brand().trim().to_string())
                .unwrap_or_default(),
            computer_name: System::host_name().unwrap_or_default(),
            total_memory_bytes: sys.total_memory(),
            free_memory_bytes,
        })
    }

    fn sample_cpu(&self, window: Duration) -> Result<f64, ProbeError> {
        let mut sys = System::new_with_specifics(
            RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing().with_cpu_usage()),
        );
        if sys.cpus().is_empty() {
            return Err(ProbeError::Invalid("no processors reported".to_string()));
        }

        sys.refresh_cpu_usage();
        thread::sleep(window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL));
        sys.refresh_cpu_usage();

        let usage = f64::from(sys.global_cpu_usage());
        if usage.is_finite() {
            Ok(usage)
        } else {
            Err(ProbeError::Invalid(format!("processor counter returned {usage}")))
        }
    }

    fn volumes(&self) -> Result<Vec<RawVolume>, ProbeError> {
        let disks = Disks::new_with_refreshed_list();
        Ok(disks
            .iter()
            .map(|d| {
                let total = d.total_space();
                let free = d.available_space();
                RawVolume {
                    id: d.mount_point().display().to_string(),
                    used_bytes: total.checked_sub(free),
                    free_bytes: Some(free),
                }
            })
            .collect())
    }

    fn ping(&self, host: &str) -> Result<bool, ProbeError> {
        if host.is_empty() || host.starts_with('-') {
            return Err(ProbeError::Invalid(format!("refusing to probe host {host:?}")));
        }
        let output = command::run("ping", &self.ping_args(host), self.command_timeout)?;
        Ok(output.success())
    }

    fn pending_updates(&self) -> Result<u64, ProbeError> {
        match self.os {
            HostOs::Windows => windows::pending_updates(self.command_timeout),
            HostOs::Linux => linux::pending_updates(self.command_timeout),
            HostOs::Macos | HostOs::Other => Err(ProbeError::Unsupported("pending update search")),
        }
    }

    fn sound_devices(&self) -> Result<Vec<RawSoundDevice>, ProbeError> {
        match self.os {
            HostOs::Windows => windows::sound_devices(self.command_timeout),
            HostOs::Linux => linux::sound_devices(),
            HostOs::Macos | HostOs::Other => {
                Err(ProbeError::Unsupported("sound device enumeration"))
            }
        }
    }

    fn adapters(&self) -> Result<Vec<RawAdapter>, ProbeError> {
        match self.os {
            HostOs::Windows => windows::adapters(self.command_timeout),
            HostOs::Linux | HostOs::Macos | HostOs::Other => linux::adapters(),
        }
    }

    fn service(&self, id: &str) -> Result<Option<RawService>, ProbeError> {
        match self.os {
            HostOs::Windows => windows::service(id, self.command_timeout),
            HostOs::Linux => linux::service(id, self.command_timeout),
            HostOs::Macos | HostOs::Other => Err(ProbeError::Unsupported("service lookup")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_snapshot_reports_memory() {
        let snapshot = HostProbe::default().os_snapshot().unwrap();
        assert!(!snapshot.os_name.is_empty());
        assert!(snapshot.total_memory_bytes > 0);
        assert!(snapshot.free_memory_bytes <= snapshot.total_memory_bytes);
    }

    #[test]
    fn test_sample_cpu_is_a_percentage() {
        let usage = HostProbe::default()
            .sample_cpu(Duration::from_millis(250))
            .unwrap();
        assert!((0.0..=100.0).contains(&usage), "usage out of range: {usage}");
    }

    #[test]
    fn test_volumes_do_not_panic() {
        let _ = HostProbe::default().volumes().unwrap();
    }

    #[test]
    fn test_ping_rejects_option_like_hosts() {
        let err = HostProbe::default().ping("-f").unwrap_err();
        assert!(matches!(err, ProbeError::Invalid(_)));
    }

    #[test]
    fn test_ping_args_end_with_host() {
        let probe = HostProbe::default();
        assert_eq!(probe.ping_args("example.com").last(), Some(&"example.com"));
    }
}
