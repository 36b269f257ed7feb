//! Scripted probe for unit tests.

use std::collections::HashMap;
use std::time::Duration;

use super::{OsSnapshot, RawAdapter, RawService, RawSoundDevice, RawVolume, SystemProbe};
use crate::error::ProbeError;

const GIB: u64 = 1024 * 1024 * 1024;

/// Answers every query from fields; `None` fields fail with `Unsupported`.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeProbe {
    pub snapshot: Option<OsSnapshot>,
    pub cpu: Option<f64>,
    pub volumes: Option<Vec<RawVolume>>,
    /// host -> reachable; hosts not listed fail the probe
    pub reachable: HashMap<String, bool>,
    pub updates: Option<u64>,
    pub sound: Option<Vec<RawSoundDevice>>,
    pub adapters: Option<Vec<RawAdapter>>,
    /// `None` makes every service lookup fail
    pub services: Option<Vec<RawService>>,
}

impl FakeProbe {
    /// A host with 16 GiB of memory, 4 GiB free, and nothing else answering.
    pub fn workstation() -> Self {
        Self {
            snapshot: Some(OsSnapshot {
                os_name: "Windows 11 Pro".to_string(),
                os_version: "10.0.22631".to_string(),
                processor: "Intel(R) Core(TM) i7-9750H CPU @ 2.60GHz".to_string(),
                computer_name: "WS-042".to_string(),
                total_memory_bytes: 16 * GIB,
                free_memory_bytes: 4 * GIB,
            }),
            ..Default::default()
        }
    }
}

impl SystemProbe for FakeProbe {
    fn os_snapshot(&self) -> Result<OsSnapshot, ProbeError> {
        self.snapshot.clone().ok_or(ProbeError::Unsupported("os snapshot"))
    }

    fn sample_cpu(&self, _window: Duration) -> Result<f64, ProbeError> {
        self.cpu.ok_or(ProbeError::Unsupported("cpu sampling"))
    }

    fn volumes(&self) -> Result<Vec<RawVolume>, ProbeError> {
        self.volumes.clone().ok_or(ProbeError::Unsupported("volumes"))
    }

    fn ping(&self, host: &str) -> Result<bool, ProbeError> {
        self.reachable
            .get(host)
            .copied()
            .ok_or_else(|| ProbeError::Invalid(format!("no route to {host}")))
    }

    fn pending_updates(&self) -> Result<u64, ProbeError> {
        self.updates.ok_or(ProbeError::Unsupported("pending update search"))
    }

    fn sound_devices(&self) -> Result<Vec<RawSoundDevice>, ProbeError> {
        self.sound.clone().ok_or(ProbeError::Unsupported("sound devices"))
    }

    fn adapters(&self) -> Result<Vec<RawAdapter>, ProbeError> {
        self.adapters.clone().ok_or(ProbeError::Unsupported("adapters"))
    }

    fn service(&self, id: &str) -> Result<Option<RawService>, ProbeError> {
        let services = self
            .services
            .as_ref()
            .ok_or(ProbeError::Unsupported("service lookup"))?;
        Ok(services.iter().find(|s| s.id == id).cloned())
    }
}
