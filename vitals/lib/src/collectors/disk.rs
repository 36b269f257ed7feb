use serde::Serialize;

use super::{bytes_to_gb, round2};
use crate::collected::{Collected, Collector};
use crate::probe::{RawVolume, SystemProbe};

/// Usage of one mounted volume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskUsageEntry {
    /// Drive letter or mount point
    pub drive: String,
    pub usage_percent: f64,
    pub total_gb: f64,
    pub free_gb: f64,
}

impl DiskUsageEntry {
    /// Builds an entry, or `None` when the volume doesn't report both used
    /// and free space.
    pub fn from_volume(volume: &RawVolume) -> Option<Self> {
        let used = volume.used_bytes?;
        let free = volume.free_bytes?;
        let total = used.saturating_add(free);
        let usage_percent = if total == 0 {
            0.0
        } else {
            round2(used as f64 / total as f64 * 100.0)
        };

        Some(Self {
            drive: volume.id.clone(),
            usage_percent,
            total_gb: bytes_to_gb(total),
            free_gb: bytes_to_gb(free),
        })
    }
}

/// Lists volumes with known used and free space.
pub fn collect(probe: &dyn SystemProbe) -> Collected<Vec<DiskUsageEntry>> {
    let entries = probe
        .volumes()
        .map(|volumes| volumes.iter().filter_map(DiskUsageEntry::from_volume).collect());
    Collected::from_result(Collector::DiskUsage, entries)
}
