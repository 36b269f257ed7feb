//! Lookup tables translating numeric device codes into labels and messages.
//!
//! Sound devices report two integers: an availability code (1-13) and a
//! configuration-manager error code (0-10). Both tables fall back to a
//! default entry labelled [`UNKNOWN_LABEL`] for anything they do not list.

use serde::Serialize;

/// Label used by both tables for unrecognized codes.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// A label and its human readable explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub label: &'static str,
    pub message: &'static str,
}

impl Classification {
    const fn new(label: &'static str, message: &'static str) -> Self {
        Self { label, message }
    }

    /// True when this is the fallback entry for an unlisted code.
    pub fn is_unknown(&self) -> bool {
        self.label == UNKNOWN_LABEL
    }
}

const DEVICE_STATUS_UNKNOWN: Classification =
    Classification::new(UNKNOWN_LABEL, "The device status could not be determined.");

const CONFIG_ERROR_UNKNOWN: Classification = Classification::new(UNKNOWN_LABEL, "");

/// Classifies a device status (availability) code.
pub fn device_status(code: u32) -> Classification {
    match code {
        1 => Classification::new("Other", "The device reports a vendor specific state."),
        2 => Classification::new("Indeterminate", "The device does not know its own state."),
        3 => Classification::new("OK", "The device is running at full power."),
        4 => Classification::new("Warning", "The device is running but reports a warning."),
        5 => Classification::new("In Test", "The device is in a test state."),
        6 => Classification::new("Not Applicable", "Status does not apply to this device."),
        7 => Classification::new("Power Off", "The device is powered off."),
        8 => Classification::new("Offline", "The device is offline."),
        9 => Classification::new("Off Duty", "The device is off duty."),
        10 => Classification::new("Degraded", "The device is running in a degraded state."),
        11 => Classification::new("Not Installed", "The device is not installed."),
        12 => Classification::new("Install Error", "The device failed to install."),
        13 => Classification::new("Power Save", "The device is in a power saving mode."),
        _ => DEVICE_STATUS_UNKNOWN,
    }
}

/// Classifies a configuration-manager error code.
///
/// The fallback entry has an empty message, so nothing is appended to the
/// status message for codes outside the table.
pub fn config_error(code: u32) -> Classification {
    match code {
        0 => Classification::new("Working", "This device is working properly."),
        1 => Classification::new("Not Configured", "This device is not configured correctly."),
        2 => Classification::new(
            "Driver Load Failed",
            "The driver for this device could not be loaded.",
        ),
        3 => Classification::new(
            "Driver Corrupted",
            "The driver for this device might be corrupted, or the system may be low on memory.",
        ),
        4 => Classification::new(
            "Registry Corrupted",
            "This device is not working properly. A driver or the registry might be corrupted.",
        ),
        5 => Classification::new(
            "Resource Unmanaged",
            "The driver for this device needs a resource that cannot be managed.",
        ),
        6 => Classification::new(
            "Boot Conflict",
            "The boot configuration for this device conflicts with other devices.",
        ),
        7 => Classification::new("Cannot Filter", "The device filter could not be applied."),
        8 => Classification::new("Loader Missing", "The driver loader for the device is missing."),
        9 => Classification::new(
            "Firmware Error",
            "The controlling firmware is reporting the resources for the device incorrectly.",
        ),
        10 => Classification::new("Cannot Start", "This device cannot start."),
        _ => CONFIG_ERROR_UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_device_status_is_known() {
        for code in 1..=13 {
            let c = device_status(code);
            assert!(!c.is_unknown(), "code {code} should be listed");
            assert!(!c.message.is_empty());
        }
    }

    #[test]
    fn test_unlisted_device_status_is_unknown() {
        for code in [0, 14, 99, u32::MAX] {
            assert_eq!(device_status(code).label, UNKNOWN_LABEL);
        }
    }

    #[test]
    fn test_every_listed_config_error_is_known() {
        for code in 0..=10 {
            let c = config_error(code);
            assert!(!c.is_unknown(), "code {code} should be listed");
            assert!(!c.message.is_empty());
        }
    }

    #[test]
    fn test_unlisted_config_error_is_unknown_and_silent() {
        for code in [11, 22, u32::MAX] {
            let c = config_error(code);
            assert_eq!(c.label, UNKNOWN_LABEL);
            assert!(c.message.is_empty());
        }
    }

    #[test]
    fn test_lookups_are_idempotent() {
        for code in 0..20 {
            assert_eq!(device_status(code), device_status(code));
            assert_eq!(config_error(code), config_error(code));
        }
    }

    #[test]
    fn test_running_device_is_ok() {
        assert_eq!(device_status(3).label, "OK");
    }
}
