use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::time::Duration;

use vitals_lib::probe::{
    OsSnapshot, RawAdapter, RawService, RawSoundDevice, RawVolume, ServiceRunState,
    ServiceStartType,
};
use vitals_lib::{ProbeError, SystemProbe};

const GIB: u64 = 1024 * 1024 * 1024;

/// Scripted host for end-to-end tests.
///
/// Queries whose field is `None` fail; hosts missing from `reachable` fail
/// their probe.
#[derive(Debug, Clone, Default)]
pub struct StubProbe {
    pub snapshot: Option<OsSnapshot>,
    pub cpu: Option<f64>,
    pub volumes: Option<Vec<RawVolume>>,
    pub reachable: HashMap<String, bool>,
    pub updates: Option<u64>,
    pub sound: Option<Vec<RawSoundDevice>>,
    pub adapters: Option<Vec<RawAdapter>>,
    pub services: Option<Vec<RawService>>,
}

impl SystemProbe for StubProbe {
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
            .ok_or_else(|| ProbeError::Invalid(format!("cannot resolve {host}")))
    }

    fn pending_updates(&self) -> Result<u64, ProbeError> {
        self.updates.ok_or(ProbeError::MissingTool("apt-get or dnf"))
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

/// A healthy Windows workstation: 16 GB of memory with 4 GB free, one disk,
/// one working sound card, two adapters (one down), two of the six default
/// services installed.
pub fn healthy_workstation() -> StubProbe {
    StubProbe {
        snapshot: Some(OsSnapshot {
            os_name: "Microsoft Windows 11 Pro".to_string(),
            os_version: "10.0.22631".to_string(),
            processor: "AMD Ryzen 7 5800X 8-Core Processor".to_string(),
            computer_name: "FRONTDESK-01".to_string(),
            total_memory_bytes: 16 * GIB,
            free_memory_bytes: 4 * GIB,
        }),
        cpu: Some(18.5),
        volumes: Some(vec![RawVolume {
            id: "C:".to_string(),
            used_bytes: Some(150 * GIB),
            free_bytes: Some(350 * GIB),
        }]),
        reachable: HashMap::new(),
        updates: Some(0),
        sound: Some(vec![RawSoundDevice {
            name: "Realtek(R) Audio".to_string(),
            description: "Realtek High Definition Audio".to_string(),
            status_code: Some(3),
            config_error_code: Some(0),
        }]),
        adapters: Some(vec![
            RawAdapter {
                name: "Ethernet".to_string(),
                description: "Intel(R) Ethernet Connection I219-V".to_string(),
                status: "Up".to_string(),
                link_speed: "1 Gbps".to_string(),
                ipv4_addresses: vec![Ipv4Addr::new(10, 0, 0, 15)],
                mac_address: Some("3C-7C-3F-11-22-33".to_string()),
            },
            RawAdapter {
                name: "Wi-Fi".to_string(),
                description: "Intel(R) Wi-Fi 6 AX201".to_string(),
                status: "Disconnected".to_string(),
                link_speed: "0 bps".to_string(),
                ipv4_addresses: Vec::new(),
                mac_address: Some("3C-7C-3F-44-55-66".to_string()),
            },
        ]),
        services: Some(vec![
            RawService {
                id: "Spooler".to_string(),
                display_name: "Print Spooler".to_string(),
                state: ServiceRunState::Running,
                start_type: ServiceStartType::Automatic,
            },
            RawService {
                id: "BITS".to_string(),
                display_name: "Background Intelligent Transfer Service".to_string(),
                state: ServiceRunState::Stopped,
                start_type: ServiceStartType::Manual,
            },
        ]),
    }
}
