use serde::Serialize;

use super::{bytes_to_gb, round2};
use crate::collected::{Collected, Collector};
use crate::error::ProbeError;
use crate::probe::{OsSnapshot, SystemProbe};

/// Operating system and machine identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemInfo {
    pub os_name: String,
    pub os_version: String,
    pub processor: String,
    pub computer_name: String,
}

impl From<&OsSnapshot> for SystemInfo {
    fn from(snapshot: &OsSnapshot) -> Self {
        Self {
            os_name: snapshot.os_name.clone(),
            os_version: snapshot.os_version.clone(),
            processor: snapshot.processor.clone(),
            computer_name: snapshot.computer_name.clone(),
        }
    }
}

/// Physical memory utilization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryUsage {
    pub total_gb: f64,
    pub used_gb: f64,
    pub free_gb: f64,
    /// `(total - free) / total * 100`, rounded to two decimals
    pub usage_percent: f64,
}

impl MemoryUsage {
    /// Computes usage from a snapshot.
    ///
    /// ## Errors
    ///
    /// A snapshot with zero total memory can't produce a percentage and is
    /// rejected as [`ProbeError::Invalid`].
    pub fn from_snapshot(snapshot: &OsSnapshot) -> Result<Self, ProbeError> {
        let total = snapshot.total_memory_bytes;
        if total == 0 {
            return Err(ProbeError::Invalid("host reported zero total memory".to_string()));
        }
        let free = snapshot.free_memory_bytes.min(total);
        let used = total - free;

        Ok(Self {
            total_gb: bytes_to_gb(total),
            used_gb: bytes_to_gb(used),
            free_gb: bytes_to_gb(free),
            usage_percent: round2(used as f64 / total as f64 * 100.0),
        })
    }
}

/// Runs the single OS query and derives both identity and memory from it.
pub fn collect(probe: &dyn SystemProbe) -> (Collected<SystemInfo>, Collected<MemoryUsage>) {
    match probe.os_snapshot() {
        Ok(snapshot) => (
            Collected::Available(SystemInfo::from(&snapshot)),
            Collected::from_result(Collector::MemoryUsage, MemoryUsage::from_snapshot(&snapshot)),
        ),
        Err(err) => {
            let reason = err.to_string();
            (
                Collected::failed(Collector::SystemInfo, reason.clone()),
                Collected::failed(Collector::MemoryUsage, reason),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::fake::FakeProbe;

    const GIB: u64 = 1024 * 1024 * 1024;

    fn snapshot(total: u64, free: u64) -> OsSnapshot {
        OsSnapshot {
            total_memory_bytes: total,
            free_memory_bytes: free,
            ..Default::default()
        }
    }

    #[test]
    fn test_sixteen_gb_with_four_free_is_75_percent() {
        let usage = MemoryUsage::from_snapshot(&snapshot(16 * GIB, 4 * GIB)).unwrap();
        assert_eq!(usage.usage_percent, 75.0);
        assert_eq!(usage.total_gb, 16.0);
        assert_eq!(usage.used_gb, 12.0);
        assert_eq!(usage.free_gb, 4.0);
    }

    #[test]
    fn test_percent_is_rounded_to_two_decimals() {
        let usage = MemoryUsage::from_snapshot(&snapshot(3 * GIB, 2 * GIB)).unwrap();
        assert_eq!(usage.usage_percent, 33.33);
    }

    #[test]
    fn test_percent_stays_in_range() {
        for (total, free) in [(1, 0), (1, 1), (7 * GIB, 3), (100, 250)] {
            let usage = MemoryUsage::from_snapshot(&snapshot(total, free)).unwrap();
            assert!(
                (0.0..=100.0).contains(&usage.usage_percent),
                "{total}/{free} -> {}",
                usage.usage_percent
            );
        }
    }

    #[test]
    fn test_zero_total_is_rejected() {
        let err = MemoryUsage::from_snapshot(&snapshot(0, 0)).unwrap_err();
        assert!(matches!(err, ProbeError::Invalid(_)));
    }

    #[test]
    fn test_collect_uses_one_snapshot() {
        let probe = FakeProbe::workstation();
        let (system, memory) = collect(&probe);
        let system = system.available().unwrap();
        assert_eq!(system.os_name, "Windows 11 Pro");
        assert_eq!(system.computer_name, "WS-042");
        assert_eq!(memory.available().unwrap().usage_percent, 75.0);
    }

    #[test]
    fn test_collect_failure_marks_both_unavailable() {
        let probe = FakeProbe::default();
        let (system, memory) = collect(&probe);
        assert!(!system.is_available());
        assert!(!memory.is_available());
        assert_eq!(system.reason(), memory.reason());
    }
}
