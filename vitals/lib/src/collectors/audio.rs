use serde::Serialize;

use crate::classify;
use crate::collected::{Collected, Collector};
use crate::probe::{RawSoundDevice, SystemProbe};

/// A sound device with its classified status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioDevice {
    pub name: String,
    pub description: String,
    /// Classifier label, "OK" for a healthy device
    pub status: String,
    pub status_message: String,
}

impl AudioDevice {
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}

impl From<RawSoundDevice> for AudioDevice {
    fn from(device: RawSoundDevice) -> Self {
        // A missing code is as unknown as an unlisted one.
        let status = classify::device_status(device.status_code.unwrap_or(0));
        let mut status_message = status.message.to_string();

        if let Some(code) = device.config_error_code {
            let config = classify::config_error(code);
            if !config.message.is_empty() {
                status_message.push(' ');
                status_message.push_str(config.message);
            }
        }

        Self {
            name: device.name,
            description: device.description,
            status: status.label.to_string(),
            status_message,
        }
    }
}

pub fn collect(probe: &dyn SystemProbe) -> Collected<Vec<AudioDevice>> {
    let devices = probe
        .sound_devices()
        .map(|devices| devices.into_iter().map(AudioDevice::from).collect());
    Collected::from_result(Collector::AudioDevices, devices)
}
