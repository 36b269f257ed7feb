//! The aggregate of one collection run.

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use sysinfo::System;

use crate::collected::Collected;
use crate::collectors::{
    self, AudioDevice, ConnectivityResult, CpuUsage, DiskUsageEntry, MemoryUsage, NetworkAdapter,
    PendingUpdateCount, ServiceStatus, SystemInfo,
};
use crate::config::VitalsConfig;
use crate::platform::HostOs;
use crate::probe::SystemProbe;

/// Everything one run collected.
///
/// Built once, rendered once, then dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub platform: HostOs,
    pub system: Collected<SystemInfo>,
    pub cpu: Collected<CpuUsage>,
    pub memory: Collected<MemoryUsage>,
    pub disks: Collected<Vec<DiskUsageEntry>>,
    pub connectivity: Vec<ConnectivityResult>,
    pub pending_updates: Collected<PendingUpdateCount>,
    pub audio: Collected<Vec<AudioDevice>>,
    pub adapters: Collected<Vec<NetworkAdapter>>,
    pub services: Collected<Vec<ServiceStatus>>,
}

impl HealthReport {
    /// Number of collectors (per-host probes counted individually) that came
    /// back unavailable.
    pub fn unavailable_count(&self) -> usize {
        let sections = [
            self.system.is_available(),
            self.cpu.is_available(),
            self.memory.is_available(),
            self.disks.is_available(),
            self.pending_updates.is_available(),
            self.audio.is_available(),
            self.adapters.is_available(),
            self.services.is_available(),
        ];
        let hosts = self.connectivity.iter().map(|c| c.reachable.is_available());

        sections.into_iter().chain(hosts).filter(|ok| !ok).count()
    }
}

/// Runs every collector against `probe`.
///
/// Collectors are independent. A failing collector shows up as an
/// unavailable section and never stops the others.
pub fn collect(probe: &dyn SystemProbe, config: &VitalsConfig, os: HostOs) -> HealthReport {
    tracing::debug!(platform = %os, "collecting health report");

    let (system, memory) = collectors::system::collect(probe);
    let cpu = collectors::cpu::collect(probe, config.cpu_sample_window());
    let disks = collectors::disk::collect(probe);
    let connectivity = collectors::connectivity::collect(probe, &config.probe_hosts);
    let pending_updates = collectors::updates::collect(probe);
    let audio = collectors::audio::collect(probe);
    let adapters = collectors::adapters::collect(probe);
    let services = collectors::services::collect(probe, &config.services_for(os));

    HealthReport {
        platform: os,
        system,
        cpu,
        memory,
        disks,
        connectivity,
        pending_updates,
        audio,
        adapters,
        services,
    }
}

/// Values the renderer stamps into the document that do not come from a
/// collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    pub host_name: String,
    pub generated_at: NaiveDateTime,
}

impl ReportContext {
    pub fn new(host_name: impl Into<String>, generated_at: NaiveDateTime) -> Self {
        Self {
            host_name: host_name.into(),
            generated_at,
        }
    }

    /// The local host name and the current local time.
    pub fn for_local_host() -> Self {
        let host_name = System::host_name().unwrap_or_else(|| "localhost".to_string());
        Self::new(host_name, Local::now().naive_local())
    }
}
